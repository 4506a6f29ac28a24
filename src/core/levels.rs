use crate::domain::model::{KeywordLevels, KeywordMetrics, Level};
use crate::utils::error::Result;
use crate::utils::validation::validate_ascending;
use serde::{Deserialize, Serialize};

/// Upper bounds (inclusive) for `Very Low`, `Low`, `Medium` and `High`.
/// Anything above the last bound is `Very High`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelThresholds([f64; 4]);

impl LevelThresholds {
    pub const DEFAULT: LevelThresholds = LevelThresholds([20.0, 40.0, 60.0, 80.0]);

    pub fn new(bounds: [f64; 4]) -> Result<Self> {
        let thresholds = Self(bounds);
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn bounds(&self) -> &[f64; 4] {
        &self.0
    }

    pub fn validate(&self) -> Result<()> {
        validate_ascending("thresholds", &self.0)
    }

    pub fn classify(&self, score: f64) -> Level {
        // NaN falls through every comparison; treat it like a missing metric.
        let score = if score.is_nan() { 0.0 } else { score };
        self.0
            .iter()
            .position(|bound| score <= *bound)
            .map(|i| Level::ALL[i])
            .unwrap_or(Level::VeryHigh)
    }

    pub fn classify_metrics(&self, metrics: &KeywordMetrics) -> KeywordLevels {
        KeywordLevels {
            volume_level: self.classify(metrics.volume),
            competition_level: self.classify(metrics.competition),
            overall_level: self.classify(metrics.overall),
        }
    }
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}
