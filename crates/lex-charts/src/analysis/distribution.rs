//! Distribution shape classification from summary statistics.

use crate::types::{ColumnStatisticalProfile, DescriptiveStats};
use serde::{Deserialize, Serialize};
use std::fmt;

// Normality and tail thresholds on the standardized moments.
const NORMAL_SKEW_LIMIT: f64 = 0.5;
const NORMAL_KURTOSIS_LIMIT: f64 = 1.0;
const HEAVY_TAIL_KURTOSIS: f64 = 2.0;
const LIGHT_TAIL_KURTOSIS: f64 = -1.0;
const TRANSFORM_SKEW: f64 = 1.0;
const BOX_COX_KURTOSIS: f64 = 3.0;

// Outlier-rate cut points, strictly decreasing.
const SEVERE_OUTLIER_RATE: f64 = 0.10;
const MODERATE_OUTLIER_RATE: f64 = 0.05;
const MILD_OUTLIER_RATE: f64 = 0.01;

/// Outlier severity, ordered from `None` to `Severe`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OutlierSeverity {
    #[default]
    None,
    Mild,
    Moderate,
    Severe,
}

impl OutlierSeverity {
    /// Classify an outlier rate (share of values, 0 - 1).
    pub fn from_rate(rate: f64) -> Self {
        if rate > SEVERE_OUTLIER_RATE {
            Self::Severe
        } else if rate > MODERATE_OUTLIER_RATE {
            Self::Moderate
        } else if rate > MILD_OUTLIER_RATE {
            Self::Mild
        } else {
            Self::None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

impl fmt::Display for OutlierSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TailBehavior {
    Light,
    #[default]
    Normal,
    Heavy,
}

/// Only unimodal distributions are reported; there is no multimodality
/// detection from summary statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    #[default]
    Unimodal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transformation {
    Log,
    Square,
    BoxCox,
}

impl Transformation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Square => "square",
            Self::BoxCox => "box-cox",
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape verdict for one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionAnalysis {
    pub is_normal: bool,
    pub skewness: f64,
    pub kurtosis: f64,
    pub modality: Modality,
    pub outlier_severity: OutlierSeverity,
    pub tail_behavior: TailBehavior,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_transformation: Option<Transformation>,
    /// False when the verdict was filled from defaults.
    pub complete: bool,
}

impl Default for DistributionAnalysis {
    fn default() -> Self {
        Self {
            is_normal: false,
            skewness: 0.0,
            kurtosis: 0.0,
            modality: Modality::Unimodal,
            outlier_severity: OutlierSeverity::None,
            tail_behavior: TailBehavior::Normal,
            recommended_transformation: None,
            complete: false,
        }
    }
}

impl DistributionAnalysis {
    /// Short description of the skew direction.
    pub fn skew_description(&self) -> &'static str {
        if self.skewness > NORMAL_SKEW_LIMIT {
            "right-skewed"
        } else if self.skewness < -NORMAL_SKEW_LIMIT {
            "left-skewed"
        } else {
            "approximately symmetric"
        }
    }
}

/// Classifies a column's distribution shape from its moments.
pub struct DistributionAnalyzer;

impl DistributionAnalyzer {
    /// Analyze the optional statistics of a profile.
    pub fn analyze(profile: &ColumnStatisticalProfile) -> DistributionAnalysis {
        match &profile.statistics {
            Some(stats) => Self::analyze_stats(stats, profile.total_values),
            None => DistributionAnalysis::default(),
        }
    }

    /// Analyze explicit statistics; `total_values` is floored at 1.
    pub fn analyze_stats(stats: &DescriptiveStats, total_values: u64) -> DistributionAnalysis {
        let skewness = stats.skewness;
        let kurtosis = stats.kurtosis;

        let is_normal =
            skewness.abs() < NORMAL_SKEW_LIMIT && kurtosis.abs() < NORMAL_KURTOSIS_LIMIT;

        let outlier_rate = stats.outlier_count as f64 / total_values.max(1) as f64;

        DistributionAnalysis {
            is_normal,
            skewness,
            kurtosis,
            modality: Modality::Unimodal,
            outlier_severity: OutlierSeverity::from_rate(outlier_rate),
            tail_behavior: Self::tail_behavior(kurtosis),
            recommended_transformation: Self::recommend_transformation(skewness, kurtosis),
            complete: true,
        }
    }

    fn tail_behavior(kurtosis: f64) -> TailBehavior {
        if kurtosis.abs() > HEAVY_TAIL_KURTOSIS {
            TailBehavior::Heavy
        } else if kurtosis < LIGHT_TAIL_KURTOSIS {
            TailBehavior::Light
        } else {
            TailBehavior::Normal
        }
    }

    fn recommend_transformation(skewness: f64, kurtosis: f64) -> Option<Transformation> {
        if skewness > TRANSFORM_SKEW {
            Some(Transformation::Log)
        } else if skewness < -TRANSFORM_SKEW {
            Some(Transformation::Square)
        } else if kurtosis.abs() > BOX_COX_KURTOSIS {
            Some(Transformation::BoxCox)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnDataType;

    fn stats(skewness: f64, kurtosis: f64, outlier_count: u64) -> DescriptiveStats {
        DescriptiveStats {
            skewness,
            kurtosis,
            outlier_count,
        }
    }

    #[test]
    fn test_missing_statistics_use_defaults() {
        let profile = ColumnStatisticalProfile::new("x", ColumnDataType::NumericFloat, 100, 80);
        let analysis = DistributionAnalyzer::analyze(&profile);
        assert!(!analysis.is_normal);
        assert_eq!(analysis.skewness, 0.0);
        assert_eq!(analysis.kurtosis, 0.0);
        assert_eq!(analysis.outlier_severity, OutlierSeverity::None);
        assert_eq!(analysis.tail_behavior, TailBehavior::Normal);
        assert_eq!(analysis.recommended_transformation, None);
        assert!(!analysis.complete);
    }

    #[test]
    fn test_right_skew_suggests_log() {
        let analysis = DistributionAnalyzer::analyze_stats(&stats(1.2, 0.5, 0), 100);
        assert!(!analysis.is_normal);
        assert_eq!(analysis.recommended_transformation, Some(Transformation::Log));
        assert_eq!(analysis.skew_description(), "right-skewed");
    }

    #[test]
    fn test_left_skew_suggests_square() {
        let analysis = DistributionAnalyzer::analyze_stats(&stats(-1.5, 0.0, 0), 100);
        assert_eq!(
            analysis.recommended_transformation,
            Some(Transformation::Square)
        );
    }

    #[test]
    fn test_extreme_kurtosis_suggests_box_cox() {
        let analysis = DistributionAnalyzer::analyze_stats(&stats(0.2, 4.0, 0), 100);
        assert_eq!(
            analysis.recommended_transformation,
            Some(Transformation::BoxCox)
        );
        assert_eq!(analysis.tail_behavior, TailBehavior::Heavy);
    }

    #[test]
    fn test_normal_distribution() {
        let analysis = DistributionAnalyzer::analyze_stats(&stats(0.1, -0.3, 0), 100);
        assert!(analysis.is_normal);
        assert_eq!(analysis.recommended_transformation, None);
        assert_eq!(analysis.modality, Modality::Unimodal);
    }

    #[test]
    fn test_normality_boundaries_are_exclusive() {
        assert!(!DistributionAnalyzer::analyze_stats(&stats(0.5, 0.0, 0), 10).is_normal);
        assert!(!DistributionAnalyzer::analyze_stats(&stats(0.0, 1.0, 0), 10).is_normal);
    }

    #[test]
    fn test_light_tails() {
        let analysis = DistributionAnalyzer::analyze_stats(&stats(0.0, -1.5, 0), 100);
        assert_eq!(analysis.tail_behavior, TailBehavior::Light);
        let analysis = DistributionAnalyzer::analyze_stats(&stats(0.0, -2.5, 0), 100);
        assert_eq!(analysis.tail_behavior, TailBehavior::Heavy);
    }

    #[test]
    fn test_outlier_severity_thresholds() {
        let severity = |count| {
            DistributionAnalyzer::analyze_stats(&stats(0.0, 0.0, count), 1000).outlier_severity
        };
        assert_eq!(severity(0), OutlierSeverity::None);
        assert_eq!(severity(10), OutlierSeverity::None);
        assert_eq!(severity(11), OutlierSeverity::Mild);
        assert_eq!(severity(50), OutlierSeverity::Mild);
        assert_eq!(severity(51), OutlierSeverity::Moderate);
        assert_eq!(severity(100), OutlierSeverity::Moderate);
        assert_eq!(severity(101), OutlierSeverity::Severe);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(OutlierSeverity::None < OutlierSeverity::Mild);
        assert!(OutlierSeverity::Mild < OutlierSeverity::Moderate);
        assert!(OutlierSeverity::Moderate < OutlierSeverity::Severe);
    }

    #[test]
    fn test_zero_total_values_does_not_divide_by_zero() {
        let analysis = DistributionAnalyzer::analyze_stats(&stats(0.0, 0.0, 0), 0);
        assert_eq!(analysis.outlier_severity, OutlierSeverity::None);
    }
}
