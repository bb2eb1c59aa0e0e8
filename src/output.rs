//! CLI output formatting for analysis results.
//!
//! Output is **information-centric, not file-centric**: the primary line
//! for each analyzed image is its verdict — index, name, score, tier —
//! with the source file's details shown as secondary context via an
//! indented `Source:` line. Metric bars and tips follow, indented under
//! the verdict they belong to.
//!
//! ```text
//! 001 orchard-07.jpg — 82% ripe (Very good)
//!     Source: 1200x800 jpeg, 148.3 KB
//!     Color   [########--] 84
//!     Shape   [#######---] 71
//!     Texture [########--] 78
//!     Ripe and ready! This pomegranate is ready to eat! ...
//!     🍽️ Best eaten right away
//! ```

use crate::verdict::AnalysisRecord;

const INDENT: &str = "    ";
const BAR_CELLS: usize = 10;

/// Source-file context shown under the verdict line.
#[derive(Debug, Clone)]
pub struct SourceInfo {
    /// Short format name ("jpeg", "png", ...).
    pub format: String,
    /// Pixel dimensions when the header could be read.
    pub dimensions: Option<(u32, u32)>,
    /// File size in bytes.
    pub bytes: u64,
}

impl SourceInfo {
    fn line(&self) -> String {
        match self.dimensions {
            Some((w, h)) => format!(
                "{INDENT}Source: {w}x{h} {}, {}",
                self.format,
                human_size(self.bytes)
            ),
            None => format!("{INDENT}Source: {}, {}", self.format, human_size(self.bytes)),
        }
    }
}

/// Render one verdict as display lines.
///
/// `index` is the 1-based position in the batch; `name` is the file name
/// (or any label the caller wants on the header line).
pub fn verdict_lines(
    index: usize,
    name: &str,
    source: Option<&SourceInfo>,
    record: &AnalysisRecord,
) -> Vec<String> {
    let state = if record.ripe { "ripe" } else { "not ripe" };
    let mut lines = vec![format!(
        "{index:03} {name} — {}% {state} ({})",
        record.ripeness,
        record.tier.name()
    )];
    if let Some(info) = source {
        lines.push(info.line());
    }
    lines.push(metric_line("Color  ", record.metrics.color));
    lines.push(metric_line("Shape  ", record.metrics.shape));
    lines.push(metric_line("Texture", record.metrics.texture));
    lines.push(format!(
        "{INDENT}{} {}",
        record.headline, record.recommendation
    ));
    for tip in &record.tips {
        lines.push(format!("{INDENT}{} {}", tip.icon, tip.text));
    }
    lines
}

fn metric_line(label: &str, value: u8) -> String {
    format!("{INDENT}{label} [{}] {value}", metric_bar(value))
}

/// Ten-cell bar for a 0–100 metric value, filled proportionally.
pub fn metric_bar(value: u8) -> String {
    let filled = (usize::from(value.min(100)) * BAR_CELLS) / 100;
    let mut bar = String::with_capacity(BAR_CELLS);
    for cell in 0..BAR_CELLS {
        bar.push(if cell < filled { '#' } else { '-' });
    }
    bar
}

/// Human-readable byte count: bytes below 1 KB, one decimal above.
pub fn human_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Analyzer;
    use crate::verdict::tests::MockPicker;

    // =========================================================================
    // metric_bar
    // =========================================================================

    #[test]
    fn bar_empty_at_zero() {
        assert_eq!(metric_bar(0), "----------");
    }

    #[test]
    fn bar_full_at_hundred() {
        assert_eq!(metric_bar(100), "##########");
    }

    #[test]
    fn bar_proportional_midrange() {
        assert_eq!(metric_bar(60), "######----");
        assert_eq!(metric_bar(75), "#######---");
    }

    #[test]
    fn bar_is_always_ten_cells() {
        for v in 0..=100u8 {
            assert_eq!(metric_bar(v).chars().count(), 10);
        }
    }

    // =========================================================================
    // human_size
    // =========================================================================

    #[test]
    fn size_bytes() {
        assert_eq!(human_size(512), "512 B");
    }

    #[test]
    fn size_kilobytes() {
        assert_eq!(human_size(151_859), "148.3 KB");
    }

    #[test]
    fn size_megabytes() {
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MB");
    }

    // =========================================================================
    // verdict_lines
    // =========================================================================

    fn sample_lines(source: Option<&SourceInfo>) -> Vec<String> {
        let engine = Analyzer::new().with_picker(MockPicker::default());
        let record = engine.analyze(b"abc").unwrap();
        verdict_lines(1, "orchard-07.jpg", source, &record)
    }

    #[test]
    fn header_carries_index_name_score_and_tier() {
        let lines = sample_lines(None);
        assert_eq!(lines[0], "001 orchard-07.jpg — 68% not ripe (Good)");
    }

    #[test]
    fn source_line_present_when_info_given() {
        let info = SourceInfo {
            format: "jpeg".into(),
            dimensions: Some((1200, 800)),
            bytes: 151_859,
        };
        let lines = sample_lines(Some(&info));
        assert_eq!(lines[1], "    Source: 1200x800 jpeg, 148.3 KB");
    }

    #[test]
    fn source_line_without_dimensions() {
        let info = SourceInfo {
            format: "webp".into(),
            dimensions: None,
            bytes: 100,
        };
        assert_eq!(info.line(), "    Source: webp, 100 B");
    }

    #[test]
    fn includes_three_metric_bars_and_tips() {
        let lines = sample_lines(None);
        let bars = lines.iter().filter(|l| l.contains('[')).count();
        assert_eq!(bars, 3);
        // headline + recommendation line, then three tips at the end
        assert_eq!(lines.len(), 1 + 3 + 1 + 3);
    }
}
