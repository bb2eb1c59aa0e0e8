//! Standalone HTML report for a verdict.
//!
//! Renders one [`AnalysisRecord`] as a self-contained result card — score,
//! tier badge, metric bars, recommendation, tips — with inline CSS and no
//! scripts or external assets, so the file can be opened from disk or
//! attached anywhere as-is.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! The tier's gradient token, opaque to the engine, lands here as the
//! badge's `background`.

use crate::verdict::AnalysisRecord;
use maud::{DOCTYPE, Markup, html};

const REPORT_CSS: &str = "\
body { font-family: system-ui, sans-serif; background: #1a1a2e; color: #eee;
       display: flex; justify-content: center; padding: 3rem 1rem; }
.card { background: #16213e; border-radius: 16px; padding: 2rem; max-width: 420px; width: 100%; }
.card h1 { font-size: 1.3rem; margin: 0 0 0.25rem; }
.source { color: #9aa0b5; font-size: 0.85rem; margin: 0 0 1.5rem; }
.score { font-size: 3rem; font-weight: 700; margin: 0; }
.score small { font-size: 1rem; font-weight: 400; color: #9aa0b5; }
.badge { display: inline-block; color: #fff; border-radius: 999px;
         padding: 0.3rem 1rem; font-size: 0.9rem; margin: 0.5rem 0 1.5rem; }
.metric { margin: 0.75rem 0; }
.metric .label { display: flex; justify-content: space-between; font-size: 0.85rem; }
.metric .track { background: #0f3460; border-radius: 6px; height: 8px; margin-top: 0.25rem; }
.metric .fill { background: linear-gradient(90deg, #e94560, #ff9f40);
                border-radius: 6px; height: 8px; }
.recommendation { line-height: 1.5; margin: 1.5rem 0 1rem; }
.tips { list-style: none; padding: 0; margin: 0; }
.tips li { padding: 0.35rem 0; }
.tips .icon { margin-right: 0.5rem; }
";

/// Render the full report document for one verdict.
///
/// `source_name` labels the card (typically the image's file name).
pub fn render_report(source_name: &str, record: &AnalysisRecord) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Ripeness report — " (source_name) }
                style { (REPORT_CSS) }
            }
            body {
                (result_card(source_name, record))
            }
        }
    }
}

/// The result card itself (embeddable; `render_report` wraps it in a page).
pub fn result_card(source_name: &str, record: &AnalysisRecord) -> Markup {
    html! {
        div.card {
            h1 { (record.headline) }
            p.source { (source_name) " · fingerprint " (record.fingerprint) }
            p.score { (record.ripeness) "%" small { " ripeness" } }
            span.badge style={ "background: " (record.tier.gradient()) } {
                (record.tier.name())
            }
            (metric_row("Color", record.metrics.color))
            (metric_row("Shape", record.metrics.shape))
            (metric_row("Texture", record.metrics.texture))
            p.recommendation { (record.recommendation) }
            ul.tips {
                @for tip in &record.tips {
                    li {
                        span.icon { (tip.icon) }
                        (tip.text)
                    }
                }
            }
        }
    }
}

/// One labeled metric bar; the fill width is the metric value in percent.
fn metric_row(label: &str, value: u8) -> Markup {
    html! {
        div.metric {
            div.label {
                span { (label) }
                span { (value) }
            }
            div.track {
                div.fill style={ "width: " (value) "%" } {}
            }
        }
    }
}
