use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Flood severity rating for a depth of ponded surface water.
///
/// Ratings are ordered from least to most severe, so they can be compared
/// directly (`FloodSeverity::Minor < FloodSeverity::Severe`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FloodSeverity {
    #[serde(rename = "No flooding")]
    None,
    #[serde(rename = "Minor Flooding")]
    Minor,
    #[serde(rename = "Moderate Flooding")]
    Moderate,
    #[serde(rename = "Severe Flooding")]
    Severe,
    #[serde(rename = "Extreme Flooding")]
    Extreme,
}

impl FloodSeverity {
    /// All ratings, least severe first.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Minor,
        Self::Moderate,
        Self::Severe,
        Self::Extreme,
    ];

    /// Rates a ponded water depth given in millimetres.
    ///
    /// Thresholds are inclusive lower bounds checked from the most severe
    /// down: 600, 301, 151, 51, and 0 mm. Negative or NaN depths cannot come
    /// out of a water balance, so they are logged as a reporting anomaly and
    /// rated [`FloodSeverity::None`].
    #[must_use]
    pub fn classify(depth_mm: f64) -> Self {
        if let Some(severity) = Self::ALL
            .iter()
            .rev()
            .find(|severity| depth_mm >= severity.lower_bound_mm())
        {
            return *severity;
        }

        warn!(depth_mm, "unexpected water depth; rating as no flooding");
        Self::None
    }

    /// Smallest depth, in millimetres, that earns this rating.
    #[must_use]
    pub fn lower_bound_mm(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Minor => 51.0,
            Self::Moderate => 151.0,
            Self::Severe => 301.0,
            Self::Extreme => 600.0,
        }
    }

    /// Human-readable label used in reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "No flooding",
            Self::Minor => "Minor Flooding",
            Self::Moderate => "Moderate Flooding",
            Self::Severe => "Severe Flooding",
            Self::Extreme => "Extreme Flooding",
        }
    }
}

impl fmt::Display for FloodSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive_lower_bounds() {
        assert_eq!(FloodSeverity::classify(0.0), FloodSeverity::None);
        assert_eq!(FloodSeverity::classify(50.99), FloodSeverity::None);
        assert_eq!(FloodSeverity::classify(51.0), FloodSeverity::Minor);
        assert_eq!(FloodSeverity::classify(150.99), FloodSeverity::Minor);
        assert_eq!(FloodSeverity::classify(151.0), FloodSeverity::Moderate);
        assert_eq!(FloodSeverity::classify(300.99), FloodSeverity::Moderate);
        assert_eq!(FloodSeverity::classify(301.0), FloodSeverity::Severe);
        assert_eq!(FloodSeverity::classify(599.99), FloodSeverity::Severe);
        assert_eq!(FloodSeverity::classify(600.0), FloodSeverity::Extreme);
        assert_eq!(FloodSeverity::classify(5_000.0), FloodSeverity::Extreme);
    }

    #[test]
    fn anomalous_depths_do_not_panic() {
        assert_eq!(FloodSeverity::classify(-1.0), FloodSeverity::None);
        assert_eq!(FloodSeverity::classify(f64::NAN), FloodSeverity::None);
    }

    #[test]
    fn ratings_are_ordered_by_severity() {
        assert!(FloodSeverity::None < FloodSeverity::Minor);
        assert!(FloodSeverity::Severe < FloodSeverity::Extreme);
        assert_eq!(FloodSeverity::ALL.iter().max(), Some(&FloodSeverity::Extreme));
    }

    #[test]
    fn labels_match_report_wording() {
        assert_eq!(FloodSeverity::None.to_string(), "No flooding");
        assert_eq!(FloodSeverity::Moderate.to_string(), "Moderate Flooding");
    }
}
