//! Keyword-based classification of atypical period labels.

use serde::{Deserialize, Serialize};

/// Labels of calendar events that recur every year.
const SEASONAL_KEYWORDS: &[&str] = &[
    "christmas",
    "natal",
    "black friday",
    "mother's day",
    "dia das mães",
    "father's day",
    "dia dos pais",
    "easter",
    "páscoa",
    "back to school",
    "volta às aulas",
    "valentine",
    "dia dos namorados",
    "festa junina",
    "carnival",
    "carnaval",
    "new year",
    "ano novo",
    "cyber monday",
    "clearance sale",
    "liquidação",
    "saldão",
    "annual sale",
    "promoção anual",
];

/// Seasonal keywords that mark a high-intensity event.
const HIGH_INTENSITY_KEYWORDS: &[&str] = &["christmas", "natal", "black friday"];

/// Labels of one-off commercial actions.
const PROMOTIONAL_KEYWORDS: &[&str] = &[
    "promotion",
    "promoção",
    "discount",
    "desconto",
    "offer",
    "oferta",
    "campaign",
    "campanha",
    "launch",
    "lançamento",
    "opening",
    "inauguração",
    "store anniversary",
    "aniversário loja",
    "stock clearance",
    "queima estoque",
];

/// What kind of event a label describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A recurring calendar event whose lift shows up in past years.
    SeasonalExpected,
    /// A commercial action with a controlled impact.
    Promotional,
    /// Anything else.
    Outlier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    Annual,
    Monthly,
    Once,
}

/// Classification derived from a period label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventClassification {
    pub kind: EventKind,
    pub intensity: Intensity,
    pub recurrence: Recurrence,
}

impl EventClassification {
    pub fn is_seasonal(&self) -> bool {
        self.kind == EventKind::SeasonalExpected
    }
}

/// Classify a label by case-insensitive keyword matching.
///
/// Seasonal keywords win over promotional ones; unknown labels are outliers.
pub fn classify_event(label: &str) -> EventClassification {
    let text = label.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

    if contains_any(SEASONAL_KEYWORDS) {
        let intensity = if contains_any(HIGH_INTENSITY_KEYWORDS) {
            Intensity::High
        } else {
            Intensity::Medium
        };
        return EventClassification {
            kind: EventKind::SeasonalExpected,
            intensity,
            recurrence: Recurrence::Annual,
        };
    }

    if contains_any(PROMOTIONAL_KEYWORDS) {
        return EventClassification {
            kind: EventKind::Promotional,
            intensity: Intensity::Medium,
            recurrence: Recurrence::Once,
        };
    }

    EventClassification {
        kind: EventKind::Outlier,
        intensity: Intensity::Low,
        recurrence: Recurrence::Once,
    }
}
