//! Rule-based chart selection for a single column.

use super::{Decision, finalize_alternatives, log_warnings};
use crate::analysis::{
    DistributionAnalysis, DistributionAnalyzer, OutlierSeverity, ScaleRecommender,
};
use crate::error::Result;
use crate::performance::{PerformanceRequest, PerformanceStrategyPlanner};
use crate::types::{
    AlternativeOption, AnalysisWarning, Channel, ChannelEncoding, ChartRecommendation, ChartType,
    ColorScheme, ColumnDataType, ColumnStatisticalProfile, Confidence, DatasetShape,
    EncodingStrategy, Interaction, RecommendationOutcome, WarningKind,
};
use crate::utils::{is_ordinal, shannon_entropy, uniform_entropy};
use tracing::debug;

const HIGH_CARDINALITY_RATIO: f64 = 0.8;
const MEDIUM_CARDINALITY_RATIO: f64 = 0.3;
const HIGH_UNIQUE_COUNT: u64 = 50;

const PIE_MAX_CATEGORIES: u64 = 5;
const PIE_MIN_ENTROPY: f64 = 1.5;
const BAR_MAX_CATEGORIES: u64 = 10;
const HORIZONTAL_BAR_MAX_CATEGORIES: u64 = 20;

/// Chooses a chart for one column from its statistical profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnivariateChartSelector {
    planner: PerformanceStrategyPlanner,
}

/// Per-call facts shared by the rule tables.
struct ColumnFacts<'a> {
    profile: &'a ColumnStatisticalProfile,
    distribution: DistributionAnalysis,
    cardinality: f64,
}

impl UnivariateChartSelector {
    pub fn new(planner: PerformanceStrategyPlanner) -> Self {
        Self { planner }
    }

    /// Recommend a chart for `profile`.
    ///
    /// Fails only on invalid input; missing optional statistics produce a
    /// fallback recommendation plus warnings.
    pub fn select(&self, profile: &ColumnStatisticalProfile) -> Result<RecommendationOutcome> {
        profile.validate()?;

        let facts = ColumnFacts {
            profile,
            distribution: DistributionAnalyzer::analyze(profile),
            cardinality: profile.cardinality(),
        };
        let mut warnings = Vec::new();

        if profile.total_values == 0 {
            warnings.push(AnalysisWarning::new(
                WarningKind::EmptyColumn,
                &profile.column_name,
                "column has no values",
            ));
        }

        let recommendation = match &profile.data_type {
            t if t.is_numeric() => self.select_numeric(&facts, &mut warnings),
            t if t.is_categorical() => self.select_categorical(&facts, &mut warnings),
            _ => self.select_unsupported(&facts, &mut warnings),
        };

        debug!(
            "Univariate decision for '{}': {} ({})",
            profile.column_name, recommendation.chart_type, recommendation.confidence
        );
        log_warnings(&warnings);

        Ok(RecommendationOutcome {
            recommendation,
            warnings,
        })
    }

    // ==================== numeric ====================

    fn select_numeric(
        &self,
        facts: &ColumnFacts<'_>,
        warnings: &mut Vec<AnalysisWarning>,
    ) -> ChartRecommendation {
        let profile = facts.profile;
        let d = &facts.distribution;

        let incomplete = !d.complete || profile.total_values == 0;
        if !d.complete {
            warnings.push(AnalysisWarning::new(
                WarningKind::IncompleteData,
                &profile.column_name,
                "skewness/kurtosis unavailable; assuming non-normal values without outliers",
            ));
        }

        let decision = Self::numeric_rules(facts)
            .degrade_if(incomplete, "distribution statistics unavailable.");

        let mut alternatives = Vec::new();
        if d.outlier_severity != OutlierSeverity::None {
            alternatives.push(AlternativeOption::new(
                ChartType::BoxPlot,
                0.75,
                "Flags outliers and quartiles explicitly but hides the distribution's shape",
            ));
        }
        if !d.is_normal {
            alternatives.push(AlternativeOption::new(
                ChartType::ViolinPlot,
                0.70,
                "Shows skew and tails in full but is harder to read for general audiences",
            ));
        }

        let scale = if decision.chart_type == ChartType::BarChart {
            ScaleRecommender::categorical(profile.unique_values)
        } else {
            ScaleRecommender::for_range(profile.min, profile.max, d.recommended_transformation)
        };
        let value_field = match decision.chart_type {
            ChartType::DensityPlot | ChartType::ViolinPlot => "density",
            _ => "count",
        };
        let encoding = EncodingStrategy {
            primary: ChannelEncoding {
                channel: Channel::X,
                field: profile.column_name.clone(),
                scale,
            },
            secondary: vec![ChannelEncoding {
                channel: Channel::Y,
                field: value_field.to_string(),
                scale: ScaleRecommender::count_axis(profile.total_values),
            }],
            color_scheme: ColorScheme::Sequential,
        };

        let mut characteristics = Vec::new();
        if d.complete {
            characteristics.push(format!(
                "distribution: {}",
                if d.is_normal {
                    "approximately normal"
                } else {
                    "non-normal"
                }
            ));
            characteristics.push(format!(
                "skew: {} ({:+.2})",
                d.skew_description(),
                d.skewness
            ));
            characteristics.push(format!("tails: {:?}", d.tail_behavior).to_lowercase());
        } else {
            characteristics.push("distribution: unknown (statistics unavailable)".to_string());
        }
        characteristics.push(format!("outliers: {}", d.outlier_severity));
        characteristics.push(cardinality_characteristic(facts));
        if let Some(transform) = d.recommended_transformation {
            characteristics.push(format!("suggested transform: {transform}"));
        }

        self.assemble(facts, decision, characteristics, encoding, alternatives)
    }

    fn numeric_rules(facts: &ColumnFacts<'_>) -> Decision {
        let d = &facts.distribution;
        let cardinality = facts.cardinality;
        let unique = facts.profile.unique_values;

        let continuous = |d: &DistributionAnalysis| {
            if d.is_normal && d.outlier_severity == OutlierSeverity::None {
                Decision::new(
                    ChartType::DensityPlot,
                    0.90,
                    "Smooth density curve for a continuous, near-normal variable without outliers.",
                )
            } else if d.outlier_severity == OutlierSeverity::Severe {
                Decision::new(
                    ChartType::ViolinPlot,
                    0.85,
                    "Violin plot keeps the density shape visible while exposing severe outliers.",
                )
            } else {
                Decision::new(
                    ChartType::Histogram,
                    0.80,
                    "Histogram shows the spread of a continuous, non-normal variable.",
                )
            }
        };

        if cardinality > HIGH_CARDINALITY_RATIO {
            continuous(d)
        } else if cardinality > MEDIUM_CARDINALITY_RATIO {
            Decision::new(
                ChartType::Histogram,
                0.85,
                "Histogram groups a moderately repetitive numeric variable into bins.",
            )
        } else if unique > HIGH_UNIQUE_COUNT {
            continuous(d)
        } else {
            Decision::new(
                ChartType::BarChart,
                0.90,
                "Few distinct values; each value is shown as a discrete category.",
            )
        }
    }

    // ==================== categorical ====================

    fn select_categorical(
        &self,
        facts: &ColumnFacts<'_>,
        warnings: &mut Vec<AnalysisWarning>,
    ) -> ChartRecommendation {
        let profile = facts.profile;
        let unique = profile.unique_values;

        let observed_entropy = profile.frequencies.as_ref().and_then(shannon_entropy);
        let entropy = observed_entropy.unwrap_or_else(|| uniform_entropy(unique));
        let incomplete = observed_entropy.is_none() || profile.total_values == 0;
        if observed_entropy.is_none() {
            warnings.push(AnalysisWarning::new(
                WarningKind::IncompleteData,
                &profile.column_name,
                "frequency table unavailable; assuming a uniform category distribution",
            ));
        }

        let ordinal = is_ordinal(&profile.column_name, profile.frequencies.as_ref());

        let decision = if unique <= PIE_MAX_CATEGORIES && entropy > PIE_MIN_ENTROPY {
            Decision::new(
                ChartType::PieChart,
                0.85,
                "Few, evenly spread categories read well as parts of a whole.",
            )
        } else if unique <= BAR_MAX_CATEGORIES {
            if ordinal {
                Decision::new(
                    ChartType::OrderedBarChart,
                    0.90,
                    "Bars kept in the categories' natural order make the ordinal scale visible.",
                )
            } else {
                Decision::new(
                    ChartType::BarChart,
                    0.90,
                    "Bar chart compares counts across a small number of categories.",
                )
            }
        } else if unique <= HORIZONTAL_BAR_MAX_CATEGORIES {
            Decision::new(
                ChartType::HorizontalBarChart,
                0.80,
                "Horizontal bars leave room for the labels of many categories.",
            )
        } else {
            Decision::new(
                ChartType::Treemap,
                0.75,
                "Treemap fits a large number of categories into a fixed area.",
            )
        }
        .degrade_if(incomplete, "category frequencies unavailable.");

        let mut alternatives = Vec::new();
        match decision.chart_type {
            ChartType::PieChart => {
                alternatives.push(AlternativeOption::new(
                    ChartType::DonutChart,
                    0.75,
                    "Same part-to-whole reading with room for a total in the center",
                ));
                alternatives.push(AlternativeOption::new(
                    ChartType::BarChart,
                    0.70,
                    "Easier to compare similar slices precisely, loses the part-to-whole framing",
                ));
            }
            ChartType::Treemap => alternatives.push(AlternativeOption::new(
                ChartType::HorizontalBarChart,
                0.60,
                "Exact comparisons between categories, but needs scrolling for long lists",
            )),
            _ => {
                if unique <= PIE_MAX_CATEGORIES + 2 && entropy > PIE_MIN_ENTROPY {
                    alternatives.push(AlternativeOption::new(
                        ChartType::PieChart,
                        0.60,
                        "Part-to-whole view; angles are harder to compare than bar lengths",
                    ));
                }
                if unique > BAR_MAX_CATEGORIES {
                    alternatives.push(AlternativeOption::new(
                        ChartType::Treemap,
                        0.65,
                        "Compact for many categories, but area is harder to judge than length",
                    ));
                }
            }
        }

        let band = ChannelEncoding {
            channel: Channel::X,
            field: profile.column_name.clone(),
            scale: ScaleRecommender::categorical(unique),
        };
        let count = |channel| ChannelEncoding {
            channel,
            field: "count".to_string(),
            scale: ScaleRecommender::count_axis(profile.total_values),
        };
        let encoding = match decision.chart_type {
            ChartType::PieChart | ChartType::DonutChart => EncodingStrategy {
                primary: count(Channel::Angle),
                secondary: vec![ChannelEncoding {
                    channel: Channel::Color,
                    ..band
                }],
                color_scheme: ColorScheme::Categorical,
            },
            ChartType::Treemap => EncodingStrategy {
                primary: count(Channel::Area),
                secondary: vec![ChannelEncoding {
                    channel: Channel::Color,
                    ..band
                }],
                color_scheme: ColorScheme::Categorical,
            },
            ChartType::HorizontalBarChart => EncodingStrategy {
                primary: ChannelEncoding {
                    channel: Channel::Y,
                    ..band
                },
                secondary: vec![count(Channel::X)],
                color_scheme: ColorScheme::Categorical,
            },
            _ => EncodingStrategy {
                primary: band,
                secondary: vec![count(Channel::Y)],
                color_scheme: ColorScheme::Categorical,
            },
        };

        let mut characteristics = vec![
            format!("categories: {unique}"),
            if observed_entropy.is_some() {
                format!("entropy: {entropy:.2} bits")
            } else {
                format!("entropy: {entropy:.2} bits (assumed uniform)")
            },
            format!("ordinal: {}", if ordinal { "yes" } else { "no" }),
            cardinality_characteristic(facts),
        ];
        if profile.data_type == ColumnDataType::Boolean {
            characteristics.push("binary flag".to_string());
        }

        self.assemble(facts, decision, characteristics, encoding, alternatives)
    }

    // ==================== unsupported ====================

    fn select_unsupported(
        &self,
        facts: &ColumnFacts<'_>,
        warnings: &mut Vec<AnalysisWarning>,
    ) -> ChartRecommendation {
        let profile = facts.profile;
        let code = profile.data_type.code();

        warnings.push(AnalysisWarning::new(
            WarningKind::UnsupportedDataType,
            &profile.column_name,
            format!("no univariate selection rules for data type '{code}'"),
        ));

        let (decision, scale) = match profile.data_type {
            ColumnDataType::Datetime => (
                Decision::new(
                    ChartType::Histogram,
                    0.5,
                    "Histogram over time bins shows when values occur.",
                ),
                ScaleRecommender::for_range(profile.min, profile.max, None),
            ),
            _ => (
                Decision::new(
                    ChartType::BarChart,
                    0.5,
                    "Bar chart of the most frequent values.",
                ),
                ScaleRecommender::categorical(profile.unique_values),
            ),
        };
        let decision =
            decision.degrade_if(true, &format!("data type '{code}' has no dedicated rules."));

        let encoding = EncodingStrategy {
            primary: ChannelEncoding {
                channel: Channel::X,
                field: profile.column_name.clone(),
                scale,
            },
            secondary: vec![ChannelEncoding {
                channel: Channel::Y,
                field: "count".to_string(),
                scale: ScaleRecommender::count_axis(profile.total_values),
            }],
            color_scheme: ColorScheme::Categorical,
        };
        let characteristics = vec![
            format!("data type: {code}"),
            cardinality_characteristic(facts),
        ];

        self.assemble(facts, decision, characteristics, encoding, Vec::new())
    }

    fn assemble(
        &self,
        facts: &ColumnFacts<'_>,
        decision: Decision,
        data_characteristics: Vec<String>,
        encoding: EncodingStrategy,
        alternatives: Vec<AlternativeOption>,
    ) -> ChartRecommendation {
        let profile = facts.profile;

        let mut interactions = vec![Interaction::Hover];
        if facts.distribution.outlier_severity != OutlierSeverity::None {
            interactions.push(Interaction::HighlightOutliers);
        }

        let performance_guidance = self.planner.guidance(
            &PerformanceRequest::new(DatasetShape::new(profile.total_values, 1))
                .with_chart(decision.chart_type)
                .with_interactions(interactions.len() as u32),
        );
        let alternatives = finalize_alternatives(&decision, alternatives);

        ChartRecommendation {
            columns: vec![profile.column_name.clone()],
            chart_type: decision.chart_type,
            confidence: Confidence::new(decision.confidence),
            justification: decision.justification,
            data_characteristics,
            encoding,
            interactions,
            alternatives,
            performance_guidance,
        }
    }
}

fn cardinality_characteristic(facts: &ColumnFacts<'_>) -> String {
    let bucket = if facts.cardinality > HIGH_CARDINALITY_RATIO
        || facts.profile.unique_values > HIGH_UNIQUE_COUNT
    {
        "high"
    } else if facts.cardinality > MEDIUM_CARDINALITY_RATIO {
        "medium"
    } else {
        "low"
    };
    format!("cardinality: {bucket} ({:.2})", facts.cardinality)
}
