//! Facade over the selectors, the ranker and the performance planner.
//!
//! [`ChartAdvisor`] owns a validated [`AdvisorConfig`] and is the entry point
//! used by the CLI. It holds no mutable state, so one advisor can serve
//! any number of threads.

use crate::config::AdvisorConfig;
use crate::error::{ChartError, Result, ResultExt};
use crate::performance::{
    AggregationStrategy, PerformanceProfile, PerformanceRequest, PerformanceStrategyPlanner,
    SamplingConfiguration, plan_aggregation, plan_sampling,
};
use crate::ranking::{RankedRecommendations, RecommendationRanker};
use crate::reporting::{AdvisorReport, ReportEntry};
use crate::selectors::{BivariateChartSelector, UnivariateChartSelector};
use crate::types::{
    AnalysisInput, ChartType, ColumnStatisticalProfile, CorrelationProfile, DatasetShape,
    RecommendationOutcome,
};
use rayon::prelude::*;
use tracing::{debug, info};

/// Runs every recommendation operation under one configuration.
#[derive(Debug, Clone)]
pub struct ChartAdvisor {
    config: AdvisorConfig,
    planner: PerformanceStrategyPlanner,
    univariate: UnivariateChartSelector,
    bivariate: BivariateChartSelector,
    ranker: RecommendationRanker,
}

static_assertions::assert_impl_all!(ChartAdvisor: Send, Sync);

impl Default for ChartAdvisor {
    fn default() -> Self {
        Self::from_valid_config(AdvisorConfig::default())
    }
}

impl ChartAdvisor {
    /// Create an advisor, rejecting an invalid configuration.
    pub fn new(config: AdvisorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: AdvisorConfig) -> Self {
        let planner = PerformanceStrategyPlanner::new(config.target_render_points);
        Self {
            univariate: UnivariateChartSelector::new(planner),
            bivariate: BivariateChartSelector::new(planner),
            ranker: RecommendationRanker::new(config.max_alternatives_per_chart, planner),
            planner,
            config,
        }
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Recommend a chart for a single column.
    pub fn recommend_column(
        &self,
        profile: &ColumnStatisticalProfile,
    ) -> Result<RecommendationOutcome> {
        self.univariate.select(profile)
    }

    /// Recommend a chart for two columns.
    pub fn recommend_pair(
        &self,
        x: &ColumnStatisticalProfile,
        y: &ColumnStatisticalProfile,
        correlation: &CorrelationProfile,
    ) -> Result<RecommendationOutcome> {
        self.bivariate.select(x, y, correlation)
    }

    /// Recommend a chart for each column, in input order.
    ///
    /// The first invalid profile fails the whole batch.
    pub fn recommend_columns(
        &self,
        profiles: &[ColumnStatisticalProfile],
    ) -> Result<Vec<RecommendationOutcome>> {
        let evaluate = |profile: &ColumnStatisticalProfile| {
            self.recommend_column(profile)
                .context(format!("Column '{}'", profile.column_name))
        };

        if self.config.parallel_batches {
            profiles.par_iter().map(evaluate).collect()
        } else {
            profiles.iter().map(evaluate).collect()
        }
    }

    /// Recommend a chart for each correlation of `input`, in input order.
    pub fn recommend_pairs(&self, input: &AnalysisInput) -> Result<Vec<RecommendationOutcome>> {
        let evaluate = |correlation: &CorrelationProfile| -> Result<RecommendationOutcome> {
            let x = input
                .column(&correlation.variable1)
                .ok_or_else(|| ChartError::ColumnNotFound(correlation.variable1.clone()))?;
            let y = input
                .column(&correlation.variable2)
                .ok_or_else(|| ChartError::ColumnNotFound(correlation.variable2.clone()))?;
            self.recommend_pair(x, y, correlation)
                .context(format!("Pair '{}'", correlation.subject()))
        };

        if self.config.parallel_batches {
            input.correlations.par_iter().map(evaluate).collect()
        } else {
            input.correlations.iter().map(evaluate).collect()
        }
    }

    /// Order a recommendation with its alternatives.
    pub fn rank(
        &self,
        outcome: &RecommendationOutcome,
        shape: DatasetShape,
    ) -> RankedRecommendations {
        self.ranker.rank(&outcome.recommendation, shape)
    }

    /// Dataset-level performance plan, independent of any chart.
    pub fn dataset_profile(&self, shape: DatasetShape) -> PerformanceProfile {
        self.planner.plan(
            &PerformanceRequest::new(shape)
                .with_interactions(self.config.interaction_complexity)
                .prefer_canvas(self.config.prefer_canvas),
        )
    }

    pub fn sampling(&self, row_count: u64, chart_type: Option<ChartType>) -> SamplingConfiguration {
        plan_sampling(row_count, chart_type)
    }

    pub fn aggregation(
        &self,
        total_data_points: u64,
        chart_type: Option<ChartType>,
    ) -> AggregationStrategy {
        plan_aggregation(total_data_points, chart_type, self.planner.target_points())
    }

    /// Validate `input` and produce recommendations for all columns and pairs.
    pub fn analyze(&self, input: &AnalysisInput) -> Result<AdvisorReport> {
        input.validate()?;
        info!(
            "Analyzing {} columns and {} pairs ({} rows)",
            input.columns.len(),
            input.correlations.len(),
            input.dataset.row_count
        );

        let row_count = input.dataset.row_count;
        let columns = self.recommend_columns(&input.columns)?;
        let pairs = self.recommend_pairs(input)?;

        let to_entries = |outcomes: Vec<RecommendationOutcome>, width: u64| -> Vec<ReportEntry> {
            outcomes
                .into_iter()
                .map(|outcome| {
                    let ranking = self.rank(&outcome, DatasetShape::new(row_count, width));
                    ReportEntry::new(outcome, ranking)
                })
                .collect()
        };
        let columns = to_entries(columns, 1);
        let pairs = to_entries(pairs, 2);

        let dataset_performance = self.dataset_profile(input.dataset);
        debug!(
            "Dataset plan: {} ({} rendering)",
            dataset_performance.data_size.category, dataset_performance.rendering.technique
        );

        Ok(AdvisorReport::new(
            input.schema_version,
            input.dataset,
            self.config.target_rendering_libraries.clone(),
            dataset_performance,
            columns,
            pairs,
        ))
    }
}
