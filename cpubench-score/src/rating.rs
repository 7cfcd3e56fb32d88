//! Qualitative rating tiers.

use serde::{Deserialize, Serialize};

/// One rating threshold: matches any normalized score at or above `min_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingTier {
    /// Inclusive lower bound on the normalized score.
    pub min_score: f64,
    /// Label reported for scores in this tier.
    pub label: String,
}

impl RatingTier {
    /// Tier from a threshold and label.
    pub fn new(min_score: f64, label: &str) -> RatingTier {
        RatingTier {
            min_score,
            label: label.to_string(),
        }
    }
}

/// Priority-ordered rating table.
///
/// Tiers are evaluated strictly in the order they appear and the first tier
/// whose threshold is met wins. The table is never re-sorted by threshold:
/// order is part of the configuration, so a table listing a low threshold
/// before a higher one shadows the higher tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingTable {
    /// Tiers in evaluation order, plus the fallback label at the end.
    pub tiers: Vec<RatingTier>,
}

/// Label reported when no tier matches.
const FALLBACK_LABEL: &str = "☆☆☆ (Low Performance)";

impl Default for RatingTable {
    fn default() -> Self {
        RatingTable {
            tiers: vec![
                RatingTier::new(1800.0, "★★★ (Exceptional Performance)"),
                RatingTier::new(1500.0, "★★★★☆ (High Performance)"),
                RatingTier::new(1000.0, "★★★☆☆ (Good Performance)"),
                RatingTier::new(600.0, "★★☆☆☆ (Moderate Performance)"),
                RatingTier::new(300.0, "★☆☆☆ (Basic Performance)"),
            ],
        }
    }
}

impl RatingTable {
    /// First tier label whose threshold the score meets, in table order.
    pub fn evaluate(&self, normalized_score: f64) -> &str {
        self.tiers
            .iter()
            .find(|tier| normalized_score >= tier.min_score)
            .map(|tier| tier.label.as_str())
            .unwrap_or(FALLBACK_LABEL)
    }

    /// Label used when the score is below every tier.
    pub fn lowest_label(&self) -> &str {
        FALLBACK_LABEL
    }
}
