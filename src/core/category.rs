//! Groundwater stress categories and their decline-rate thresholds.

use crate::error::PredictionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stress classification, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StressCategory {
    Safe,
    #[serde(rename = "Semi-critical")]
    SemiCritical,
    Critical,
    #[serde(rename = "Over-exploited")]
    OverExploited,
}

impl StressCategory {
    /// All categories in ascending severity.
    pub const ALL: [StressCategory; 4] = [
        Self::Safe,
        Self::SemiCritical,
        Self::Critical,
        Self::OverExploited,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::SemiCritical => "Semi-critical",
            Self::Critical => "Critical",
            Self::OverExploited => "Over-exploited",
        }
    }

    /// The next, more severe category. `None` for Over-exploited.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Safe => Some(Self::SemiCritical),
            Self::SemiCritical => Some(Self::Critical),
            Self::Critical => Some(Self::OverExploited),
            Self::OverExploited => None,
        }
    }

    /// Decline rate (m/year) at which this category gives way to the next.
    pub fn decline_threshold(&self) -> Option<f64> {
        match self {
            Self::Safe => Some(0.1),
            Self::SemiCritical => Some(0.5),
            Self::Critical => Some(1.0),
            Self::OverExploited => None,
        }
    }

    /// Fraction of the current depth used to scale time-to-transition.
    pub fn depth_fraction(&self) -> Option<f64> {
        match self {
            Self::Safe => Some(0.2),
            Self::SemiCritical => Some(0.3),
            Self::Critical => Some(0.4),
            Self::OverExploited => None,
        }
    }

    fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for StressCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StressCategory {
    type Err = PredictionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == trimmed)
            .ok_or_else(|| PredictionError::InvalidCategory {
                value: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_names() {
        assert_eq!("Safe".parse::<StressCategory>().unwrap(), StressCategory::Safe);
        assert_eq!(
            "  Semi-critical\n".parse::<StressCategory>().unwrap(),
            StressCategory::SemiCritical
        );
        assert_eq!(
            "Over-exploited".parse::<StressCategory>().unwrap(),
            StressCategory::OverExploited
        );
    }

    #[test]
    fn rejects_unknown_names_with_valid_set() {
        let err = "safe".parse::<StressCategory>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'safe'"));
        assert!(msg.contains("Safe, Semi-critical, Critical, Over-exploited"));
    }

    #[test]
    fn ordered_by_severity() {
        assert!(StressCategory::Safe < StressCategory::SemiCritical);
        assert!(StressCategory::Critical < StressCategory::OverExploited);
        assert_eq!(StressCategory::Critical.next(), Some(StressCategory::OverExploited));
        assert_eq!(StressCategory::OverExploited.next(), None);
        assert_eq!(StressCategory::OverExploited.decline_threshold(), None);
    }

    #[test]
    fn serializes_with_display_names() {
        let json = serde_json::to_string(&StressCategory::SemiCritical).unwrap();
        assert_eq!(json, "\"Semi-critical\"");
        let back: StressCategory = serde_json::from_str("\"Over-exploited\"").unwrap();
        assert_eq!(back, StressCategory::OverExploited);
    }
}
