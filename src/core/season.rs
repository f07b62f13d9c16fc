//! Measurement seasons and per-year recharge summaries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two annual measurement seasons bracketing the monsoon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Season {
    /// January through May.
    PreMonsoon,
    /// October through December.
    PostMonsoon,
}

impl Season {
    /// Bucket for a calendar month. Monsoon months (June-September) have none.
    pub fn from_month(month: u32) -> Option<Self> {
        match month {
            1..=5 => Some(Self::PreMonsoon),
            10..=12 => Some(Self::PostMonsoon),
            _ => None,
        }
    }

    /// Season a forecast is anchored to. Monsoon months count as pre-monsoon.
    pub fn for_forecast(month: u32) -> Self {
        Self::from_month(month).unwrap_or(Self::PreMonsoon)
    }

    pub fn opposite(&self) -> Self {
        match self {
            Self::PreMonsoon => Self::PostMonsoon,
            Self::PostMonsoon => Self::PreMonsoon,
        }
    }

    /// Month range shown alongside a forecast year.
    pub fn display_range(&self) -> &'static str {
        match self {
            Self::PreMonsoon => "January-May",
            Self::PostMonsoon => "October-December",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreMonsoon => f.write_str("pre-monsoon"),
            Self::PostMonsoon => f.write_str("post-monsoon"),
        }
    }
}

/// Seasonal depths for one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RechargeEntry {
    pub year: i32,
    /// Mean pre-monsoon depth, if any pre-monsoon reading exists.
    pub pre_monsoon: Option<f64>,
    /// Mean post-monsoon depth, if any post-monsoon reading exists.
    pub post_monsoon: Option<f64>,
    /// `pre_monsoon - post_monsoon`; positive when the water table rose.
    pub recharge: Option<f64>,
}

impl RechargeEntry {
    /// Both season depths are present and numeric.
    pub fn is_complete(&self) -> bool {
        matches!(
            (self.pre_monsoon, self.post_monsoon),
            (Some(pre), Some(post)) if pre.is_finite() && post.is_finite()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_map_to_buckets() {
        for m in 1..=5 {
            assert_eq!(Season::from_month(m), Some(Season::PreMonsoon));
        }
        for m in 6..=9 {
            assert_eq!(Season::from_month(m), None);
            assert_eq!(Season::for_forecast(m), Season::PreMonsoon);
        }
        for m in 10..=12 {
            assert_eq!(Season::from_month(m), Some(Season::PostMonsoon));
        }
    }

    #[test]
    fn opposite_alternates() {
        assert_eq!(Season::PreMonsoon.opposite(), Season::PostMonsoon);
        assert_eq!(Season::PostMonsoon.opposite().opposite(), Season::PostMonsoon);
    }

    #[test]
    fn completeness_requires_both_finite() {
        let mut entry = RechargeEntry {
            year: 2020,
            pre_monsoon: Some(8.0),
            post_monsoon: Some(6.5),
            recharge: Some(1.5),
        };
        assert!(entry.is_complete());
        entry.post_monsoon = Some(f64::NAN);
        assert!(!entry.is_complete());
        entry.post_monsoon = None;
        assert!(!entry.is_complete());
    }
}
