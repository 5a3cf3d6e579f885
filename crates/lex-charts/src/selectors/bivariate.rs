//! Chart selection for a pair of columns.

use super::{Decision, finalize_alternatives, log_warnings};
use crate::analysis::{DistributionAnalyzer, ScaleRecommender};
use crate::error::{ChartError, Result};
use crate::performance::{PerformanceRequest, PerformanceStrategyPlanner};
use crate::types::{
    AlternativeOption, AnalysisWarning, Channel, ChannelEncoding, ChartRecommendation, ChartType,
    ColorScheme, ColumnDataType, ColumnStatisticalProfile, Confidence, CorrelationProfile,
    DatasetShape, EncodingStrategy, Interaction, RecommendationOutcome, RelationshipType,
    WarningKind,
};
use tracing::debug;

const DENSE_POINTS: u64 = 10_000;
const MEDIUM_POINTS: u64 = 1_000;
const OVERPLOTTING_POINTS: u64 = 5_000;
const SAMPLING_POINTS: u64 = 50_000;

/// Chooses a chart for two columns and their correlation summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BivariateChartSelector {
    planner: PerformanceStrategyPlanner,
}

impl BivariateChartSelector {
    pub fn new(planner: PerformanceStrategyPlanner) -> Self {
        Self { planner }
    }

    /// Recommend a chart for `x` against `y`.
    ///
    /// `correlation` must describe the same two columns, in either order.
    pub fn select(
        &self,
        x: &ColumnStatisticalProfile,
        y: &ColumnStatisticalProfile,
        correlation: &CorrelationProfile,
    ) -> Result<RecommendationOutcome> {
        x.validate()?;
        y.validate()?;
        correlation.validate()?;
        Self::check_pairing(x, y, correlation)?;

        let points = correlation.total_points();
        let mut warnings = Vec::new();

        let recommendation = if x.data_type.is_numeric() && y.data_type.is_numeric() {
            self.select_numeric_pair(x, y, correlation, points, &mut warnings)
        } else {
            warnings.push(AnalysisWarning::new(
                WarningKind::UnsupportedDataType,
                correlation.subject(),
                format!(
                    "no bivariate selection rules for {} × {}",
                    x.data_type, y.data_type
                ),
            ));
            self.select_fallback(x, y, correlation, points)
        };

        debug!(
            "Bivariate decision for '{}': {} ({}) over {} points",
            correlation.subject(),
            recommendation.chart_type,
            recommendation.confidence,
            points
        );
        log_warnings(&warnings);

        Ok(RecommendationOutcome {
            recommendation,
            warnings,
        })
    }

    fn check_pairing(
        x: &ColumnStatisticalProfile,
        y: &ColumnStatisticalProfile,
        correlation: &CorrelationProfile,
    ) -> Result<()> {
        let names = [x.column_name.as_str(), y.column_name.as_str()];
        for variable in [&correlation.variable1, &correlation.variable2] {
            if !names.contains(&variable.as_str()) {
                return Err(ChartError::ColumnNotFound(variable.clone()));
            }
        }
        if correlation.variable1 == correlation.variable2 && x.column_name != y.column_name {
            return Err(ChartError::invalid_field(
                correlation.subject(),
                "variable2",
                "correlation pairs a column with itself",
            ));
        }
        Ok(())
    }

    fn select_numeric_pair(
        &self,
        x: &ColumnStatisticalProfile,
        y: &ColumnStatisticalProfile,
        correlation: &CorrelationProfile,
        points: u64,
        warnings: &mut Vec<AnalysisWarning>,
    ) -> ChartRecommendation {
        for profile in [x, y] {
            if profile.min.is_none() || profile.max.is_none() {
                warnings.push(AnalysisWarning::new(
                    WarningKind::IncompleteData,
                    &profile.column_name,
                    "value range unavailable; axis defaults to a linear unit domain",
                ));
            }
        }

        let non_linear = correlation.relationship_type == RelationshipType::NonLinear;

        let decision = if points > DENSE_POINTS {
            if correlation.strength.is_strong() {
                Decision::new(
                    ChartType::HexbinPlot,
                    0.90,
                    "Hexagonal bins show where a strong relationship concentrates.",
                )
            } else {
                Decision::new(
                    ChartType::DensityScatter,
                    0.85,
                    "Density-shaded points keep a weak relationship visible across many points.",
                )
            }
        } else if points > MEDIUM_POINTS {
            if non_linear {
                Decision::new(
                    ChartType::SmoothScatter,
                    0.80,
                    "Scatter plot with a smoothed trend line follows the non-linear relationship.",
                )
            } else {
                Decision::new(
                    ChartType::ScatterPlot,
                    0.90,
                    "Scatter plot shows the relationship between the two variables.",
                )
            }
        } else {
            Decision::new(
                ChartType::ScatterPlot,
                0.95,
                "Every point can be drawn individually at this size.",
            )
        };

        let mut alternatives = Vec::new();
        if points > OVERPLOTTING_POINTS {
            alternatives.extend([
                AlternativeOption::new(
                    ChartType::HexbinPlot,
                    0.80,
                    "Removes overplotting at the cost of individual points",
                ),
                AlternativeOption::new(
                    ChartType::DensityScatter,
                    0.75,
                    "Keeps points while shading by local density",
                ),
                AlternativeOption::new(
                    ChartType::ContourPlot,
                    0.70,
                    "Smooth density outline, hides outlying points",
                ),
            ]);
        }
        if points > SAMPLING_POINTS {
            alternatives.push(AlternativeOption::new(
                ChartType::SampledScatter,
                0.70,
                "Fast to render, but rare points may be dropped",
            ));
        }
        if non_linear {
            alternatives.push(AlternativeOption::new(
                ChartType::SmoothScatter,
                0.75,
                "Trend line makes curvature explicit",
            ));
        }

        let axis = |profile: &ColumnStatisticalProfile, channel| {
            let distribution = DistributionAnalyzer::analyze(profile);
            ChannelEncoding {
                channel,
                field: profile.column_name.clone(),
                scale: ScaleRecommender::for_range(
                    profile.min,
                    profile.max,
                    distribution.recommended_transformation,
                ),
            }
        };
        let encoding = EncodingStrategy {
            primary: axis(x, Channel::X),
            secondary: vec![axis(y, Channel::Y)],
            color_scheme: ColorScheme::Sequential,
        };

        let data_characteristics = vec![
            format!(
                "correlation: {} {:?}",
                correlation.strength.as_str(),
                correlation.direction
            )
            .to_lowercase(),
            format!("relationship: {}", correlation.relationship_type.as_str()),
            format!("significance: p = {:.3}", correlation.significance),
            format!("points: {points}"),
        ];

        self.assemble(x, y, points, decision, data_characteristics, encoding, alternatives)
    }

    /// Pairs outside numeric × numeric get a type-driven chart as a fallback.
    fn select_fallback(
        &self,
        x: &ColumnStatisticalProfile,
        y: &ColumnStatisticalProfile,
        correlation: &CorrelationProfile,
        points: u64,
    ) -> ChartRecommendation {
        let types = (&x.data_type, &y.data_type);
        let either = |f: fn(&ColumnDataType) -> bool, g: fn(&ColumnDataType) -> bool| {
            (f(types.0) && g(types.1)) || (g(types.0) && f(types.1))
        };
        let is_datetime = |t: &ColumnDataType| *t == ColumnDataType::Datetime;

        let numeric_by_category =
            either(ColumnDataType::is_numeric, ColumnDataType::is_categorical);

        let (decision, color_scheme) = if numeric_by_category {
            (
                Decision::new(
                    ChartType::BoxPlot,
                    0.5,
                    "Box plots compare the numeric spread across categories.",
                ),
                ColorScheme::Categorical,
            )
        } else if types.0.is_categorical() && types.1.is_categorical() {
            (
                Decision::new(
                    ChartType::Heatmap,
                    0.5,
                    "Heatmap of co-occurrence counts between the two categorical columns.",
                ),
                ColorScheme::Sequential,
            )
        } else if either(is_datetime, ColumnDataType::is_numeric) {
            (
                Decision::new(
                    ChartType::LineChart,
                    0.5,
                    "Line chart follows the numeric value over time.",
                ),
                ColorScheme::Sequential,
            )
        } else {
            (
                Decision::new(
                    ChartType::ScatterPlot,
                    0.5,
                    "Scatter plot as a neutral view of the two columns.",
                ),
                ColorScheme::Sequential,
            )
        };
        let decision = decision.degrade_if(
            true,
            &format!("{} × {} has no dedicated rules.", x.data_type, y.data_type),
        );

        let axis = |profile: &ColumnStatisticalProfile, channel| ChannelEncoding {
            channel,
            field: profile.column_name.clone(),
            scale: if profile.data_type.is_categorical() {
                ScaleRecommender::categorical(profile.unique_values)
            } else {
                ScaleRecommender::for_range(profile.min, profile.max, None)
            },
        };
        // Time and categories read best along the horizontal axis.
        let (horizontal, vertical) = if y.data_type == ColumnDataType::Datetime
            || (y.data_type.is_categorical() && !x.data_type.is_categorical())
        {
            (y, x)
        } else {
            (x, y)
        };
        let encoding = EncodingStrategy {
            primary: axis(horizontal, Channel::X),
            secondary: vec![axis(vertical, Channel::Y)],
            color_scheme,
        };

        let data_characteristics = vec![
            format!("types: {} × {}", x.data_type, y.data_type),
            format!("relationship: {}", correlation.relationship_type.as_str()),
            format!("points: {points}"),
        ];

        self.assemble(x, y, points, decision, data_characteristics, encoding, Vec::new())
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        &self,
        x: &ColumnStatisticalProfile,
        y: &ColumnStatisticalProfile,
        points: u64,
        decision: Decision,
        data_characteristics: Vec<String>,
        encoding: EncodingStrategy,
        alternatives: Vec<AlternativeOption>,
    ) -> ChartRecommendation {
        let mut interactions = vec![Interaction::Hover];
        if points > MEDIUM_POINTS {
            interactions.push(Interaction::ZoomPan);
        }

        let performance_guidance = self.planner.guidance(
            &PerformanceRequest::new(DatasetShape::new(points, 2))
                .with_chart(decision.chart_type)
                .with_interactions(interactions.len() as u32),
        );
        let alternatives = finalize_alternatives(&decision, alternatives);

        ChartRecommendation {
            columns: vec![x.column_name.clone(), y.column_name.clone()],
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
