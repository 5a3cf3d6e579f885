//! Axis scale selection.

use super::distribution::Transformation;
use serde::{Deserialize, Serialize};

/// Range ratio above which a strictly positive axis switches to log.
const LOG_RANGE_RATIO: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    Linear,
    Log,
    /// Discrete bands for categorical axes.
    Band,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleRecommendation {
    pub scale: ScaleType,
    /// `[min, max]` with `min <= max`.
    pub domain: [f64; 2],
    pub zero_anchored: bool,
    pub reasoning: String,
}

/// Picks an axis scale from a column's value range.
pub struct ScaleRecommender;

impl ScaleRecommender {
    pub fn recommend(min: f64, max: f64, hint: Option<Transformation>) -> ScaleRecommendation {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };

        if hint == Some(Transformation::Log) {
            return ScaleRecommendation {
                scale: ScaleType::Log,
                domain: [min, max],
                zero_anchored: false,
                reasoning: "Log scale compresses the long right tail of a skewed distribution"
                    .to_string(),
            };
        }

        if min > 0.0 && max / min > LOG_RANGE_RATIO {
            return ScaleRecommendation {
                scale: ScaleType::Log,
                domain: [min, max],
                zero_anchored: false,
                reasoning: format!(
                    "Values span {:.0}x from {min} to {max}; a log scale keeps them readable",
                    max / min
                ),
            };
        }

        let zero_anchored = min >= 0.0;
        let reasoning = if zero_anchored {
            "Linear scale anchored at zero for non-negative values".to_string()
        } else {
            "Linear scale over a range that crosses zero".to_string()
        };

        ScaleRecommendation {
            scale: ScaleType::Linear,
            domain: [min, max],
            zero_anchored,
            reasoning,
        }
    }

    /// Scale for a numeric column whose range may be unknown.
    pub fn for_range(
        min: Option<f64>,
        max: Option<f64>,
        hint: Option<Transformation>,
    ) -> ScaleRecommendation {
        match (min, max) {
            (Some(min), Some(max)) => Self::recommend(min, max, hint),
            _ => ScaleRecommendation {
                scale: ScaleType::Linear,
                domain: [0.0, 1.0],
                zero_anchored: true,
                reasoning: "Value range unavailable; defaulting to a linear unit domain"
                    .to_string(),
            },
        }
    }

    /// Band scale over the categories of a column.
    pub fn categorical(unique_values: u64) -> ScaleRecommendation {
        ScaleRecommendation {
            scale: ScaleType::Band,
            domain: [0.0, unique_values as f64],
            zero_anchored: true,
            reasoning: format!("One band per category ({unique_values} categories)"),
        }
    }

    /// Linear count axis used for frequency channels.
    pub fn count_axis(max_count: u64) -> ScaleRecommendation {
        ScaleRecommendation {
            scale: ScaleType::Linear,
            domain: [0.0, max_count as f64],
            zero_anchored: true,
            reasoning: "Counts start at zero so bar lengths stay comparable".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_hint_wins() {
        let scale = ScaleRecommender::recommend(-5.0, 10.0, Some(Transformation::Log));
        assert_eq!(scale.scale, ScaleType::Log);
        assert_eq!(scale.domain, [-5.0, 10.0]);
    }

    #[test]
    fn test_wide_positive_range_uses_log() {
        let scale = ScaleRecommender::recommend(1.0, 5000.0, None);
        assert_eq!(scale.scale, ScaleType::Log);
        assert!(!scale.zero_anchored);
    }

    #[test]
    fn test_ratio_exactly_1000_stays_linear() {
        let scale = ScaleRecommender::recommend(1.0, 1000.0, None);
        assert_eq!(scale.scale, ScaleType::Linear);
        assert!(scale.zero_anchored);
    }

    #[test]
    fn test_zero_min_stays_linear() {
        let scale = ScaleRecommender::recommend(0.0, 1e9, None);
        assert_eq!(scale.scale, ScaleType::Linear);
        assert!(scale.zero_anchored);
    }

    #[test]
    fn test_negative_range_not_zero_anchored() {
        let scale = ScaleRecommender::recommend(-20.0, 40.0, Some(Transformation::BoxCox));
        assert_eq!(scale.scale, ScaleType::Linear);
        assert!(!scale.zero_anchored);
        assert!(scale.reasoning.contains("crosses zero"));
    }

    #[test]
    fn test_domain_is_ordered() {
        let scale = ScaleRecommender::recommend(9.0, 3.0, None);
        assert_eq!(scale.domain, [3.0, 9.0]);
    }

    #[test]
    fn test_missing_range_defaults() {
        let scale = ScaleRecommender::for_range(None, Some(3.0), None);
        assert_eq!(scale.scale, ScaleType::Linear);
        assert_eq!(scale.domain, [0.0, 1.0]);
    }

    #[test]
    fn test_categorical_band() {
        let scale = ScaleRecommender::categorical(7);
        assert_eq!(scale.scale, ScaleType::Band);
        assert_eq!(scale.domain, [0.0, 7.0]);
    }
}
