//! Verdict composition — turning a score into the displayed record.
//!
//! Everything deterministic about a verdict (tier, metrics, headline) is a
//! pure function of the score and characteristics. The two free-text
//! choices — which recommendation phrasing to show and the "wait N days"
//! figure for unripe fruit — are genuinely random, drawn through the
//! [`TextPicker`] seam so the scoring pipeline stays testable on its own.
//! Once a record is cached those choices are frozen: re-analyzing the same
//! image replays the stored record rather than redrawing.

use crate::characteristics::Characteristics;
use crate::fingerprint::Fingerprint;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ripeness threshold: at or above, the fruit is ready to eat.
pub const RIPE_THRESHOLD: u8 = 75;

/// Display metrics never render below this floor — a bar at 12% would read
/// as "broken fruit" rather than "modest measurement".
const METRIC_FLOOR: u8 = 60;

/// Discrete quality band over the ripeness score.
///
/// Ordered by descending threshold; [`QualityTier::for_ripeness`] picks the
/// highest band whose threshold the score clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QualityTier {
    Excellent,
    VeryGood,
    Good,
    Average,
}

impl QualityTier {
    /// Band thresholds, highest first.
    const BANDS: [(u8, QualityTier); 3] = [
        (85, QualityTier::Excellent),
        (75, QualityTier::VeryGood),
        (65, QualityTier::Good),
    ];

    /// Select the band for a ripeness score.
    pub fn for_ripeness(ripeness: u8) -> Self {
        for (threshold, tier) in Self::BANDS {
            if ripeness >= threshold {
                return tier;
            }
        }
        QualityTier::Average
    }

    /// Human-readable band name.
    pub fn name(self) -> &'static str {
        match self {
            QualityTier::Excellent => "Excellent",
            QualityTier::VeryGood => "Very good",
            QualityTier::Good => "Good",
            QualityTier::Average => "Average",
        }
    }

    /// CSS gradient token for the band badge. Opaque to the engine; the
    /// HTML report passes it straight into a `background` property.
    pub fn gradient(self) -> &'static str {
        match self {
            QualityTier::Excellent => "linear-gradient(135deg, #00f5ff, #8338ec)",
            QualityTier::VeryGood => "linear-gradient(135deg, #00f5ff, #00c4cc)",
            QualityTier::Good => "linear-gradient(135deg, #ff9f40, #ff6b35)",
            QualityTier::Average => "linear-gradient(135deg, #ffd23f, #ff9f40)",
        }
    }
}

/// The three bar metrics shown alongside the score, each floored to 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMetrics {
    pub color: u8,
    pub shape: u8,
    pub texture: u8,
}

/// One handling tip: a pictogram plus a short line of advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    pub icon: String,
    pub text: String,
}

impl Tip {
    fn new(icon: &str, text: impl Into<String>) -> Self {
        Self {
            icon: icon.to_string(),
            text: text.into(),
        }
    }
}

/// The complete, immutable result of one analysis.
///
/// Cached by fingerprint and shared via `Arc`; never mutated after
/// composition, so the randomly chosen text fields stay fixed for the
/// lifetime of the cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub fingerprint: Fingerprint,
    /// Final score in 45..=100.
    pub ripeness: u8,
    /// Whether `ripeness` clears [`RIPE_THRESHOLD`].
    pub ripe: bool,
    pub tier: QualityTier,
    pub metrics: DisplayMetrics,
    /// One-line verdict header ("Ripe and ready!" / "Not ripe yet").
    pub headline: String,
    pub recommendation: String,
    pub tips: Vec<Tip>,
}

/// Source of the two non-deterministic choices in a verdict.
///
/// `Sync` so a shared [`Analyzer`](crate::analyzer::Analyzer) can compose
/// records from rayon workers. The production impl is [`ThreadRngPicker`];
/// tests script the draws with a mock.
pub trait TextPicker: Send + Sync {
    /// Index into a text pool of `len` entries. Must return `< len`.
    fn pick_index(&self, len: usize) -> usize;

    /// "Wait another N days" figure for unripe fruit, in 2..=4.
    fn days_remaining(&self) -> u8;
}

/// Thread-local RNG picker used in production.
#[derive(Debug, Default)]
pub struct ThreadRngPicker;

impl TextPicker for ThreadRngPicker {
    fn pick_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }

    fn days_remaining(&self) -> u8 {
        rand::thread_rng().gen_range(2..=4)
    }
}

const RIPE_RECOMMENDATIONS: [&str; 4] = [
    "This pomegranate is ready to eat! The deep red color and surface texture point to perfect ripeness.",
    "Ripe and sweet — this is the ideal moment to eat it. The flavor will be rich and full.",
    "The fruit has reached ideal ripeness. The arils inside will be juicy and sweet.",
    "A perfect pomegranate. Color and texture indicate high quality and excellent flavor.",
];

const UNRIPE_RECOMMENDATIONS: [&str; 4] = [
    "Not fully ripe yet. Give it a few more days to reach peak ripeness.",
    "Worth the wait — it will be sweeter and juicier in a few days.",
    "On its way to ripeness, but not at peak flavor yet. Give it more time.",
    "Almost there! A few more days and it will reach perfect ripeness.",
];

fn ripe_tips() -> Vec<Tip> {
    vec![
        Tip::new("🍽️", "Best eaten right away"),
        Tip::new("🌡️", "Keeps in the fridge for up to 5 days"),
        Tip::new("🥗", "Great in salads and fresh juice"),
    ]
}

fn unripe_tips(days: u8) -> Vec<Tip> {
    vec![
        Tip::new("⏰", format!("Wait another {days} days")),
        Tip::new("🏠", "Store at room temperature"),
        Tip::new("🔄", "Check again in a few days"),
    ]
}

/// Assemble the full record for a scored image.
///
/// Pure except for the two picker draws. Does not touch the cache —
/// storing the record is the engine's job.
pub fn compose(
    fingerprint: Fingerprint,
    characteristics: &Characteristics,
    ripeness: u8,
    picker: &dyn TextPicker,
) -> AnalysisRecord {
    let ripe = ripeness >= RIPE_THRESHOLD;
    let pool: &[&str] = if ripe {
        &RIPE_RECOMMENDATIONS
    } else {
        &UNRIPE_RECOMMENDATIONS
    };
    let recommendation = pool[picker.pick_index(pool.len()).min(pool.len() - 1)].to_string();
    let tips = if ripe {
        ripe_tips()
    } else {
        unripe_tips(picker.days_remaining())
    };

    AnalysisRecord {
        fingerprint,
        ripeness,
        ripe,
        tier: QualityTier::for_ripeness(ripeness),
        metrics: DisplayMetrics {
            color: characteristics.redness.clamp(METRIC_FLOOR, 100),
            shape: characteristics.roundness.clamp(METRIC_FLOOR, 100),
            texture: characteristics.texture.clamp(METRIC_FLOOR, 100),
        },
        headline: if ripe {
            "Ripe and ready!".to_string()
        } else {
            "Not ripe yet".to_string()
        },
        recommendation,
        tips,
    }
}
