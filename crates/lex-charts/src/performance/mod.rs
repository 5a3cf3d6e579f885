//! Performance planning for a given data volume.
//!
//! The planner runs in a fixed order:
//!
//! 1. [`DataVolumeClassifier`] buckets the dataset and scores complexity
//! 2. the rendering technique is chosen from size and complexity
//! 3. memory is estimated for that technique
//! 4. sampling, aggregation and staged loading are derived independently
//!
//! Everything here is arithmetic over counts; no data is touched.

mod aggregation;
mod rendering;
mod sampling;
mod volume;

pub use aggregation::{
    AggregationMethod, AggregationParameters, AggregationStrategy, LoadingStage, plan_aggregation,
    plan_loading,
};
pub use rendering::{
    MemoryBreakdown, MemoryEstimate, RenderingOptimization, RenderingStrategy,
    RenderingTechnique, estimate_memory, select_rendering,
};
pub use sampling::{SamplingConfiguration, SamplingQuality, SamplingTechnique, plan_sampling};
pub use volume::{
    ComplexityAssessment, ComplexityLevel, DataSizeCategory, DataVolumeClassifier, SizeCategory,
};

use crate::types::{ChartType, DatasetShape};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Total memory above which an explicit warning is added.
const MEMORY_WARNING_MB: f64 = 512.0;

/// Default number of points a chart should end up drawing.
pub const DEFAULT_TARGET_POINTS: u64 = 10_000;

/// What to plan for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRequest {
    pub shape: DatasetShape,
    pub chart_type: Option<ChartType>,
    /// Number of interaction kinds the chart wires up.
    pub interaction_complexity: u32,
    /// Caller asks for canvas rendering regardless of volume.
    pub prefer_canvas: bool,
}

impl PerformanceRequest {
    pub fn new(shape: DatasetShape) -> Self {
        Self {
            shape,
            chart_type: None,
            interaction_complexity: 1,
            prefer_canvas: false,
        }
    }

    pub fn with_chart(mut self, chart_type: ChartType) -> Self {
        self.chart_type = Some(chart_type);
        self
    }

    pub fn with_interactions(mut self, interaction_complexity: u32) -> Self {
        self.interaction_complexity = interaction_complexity;
        self
    }

    pub fn prefer_canvas(mut self, prefer: bool) -> Self {
        self.prefer_canvas = prefer;
        self
    }
}

/// Full performance plan for a dataset and chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceProfile {
    pub data_size: DataSizeCategory,
    pub complexity: ComplexityAssessment,
    pub memory: MemoryEstimate,
    pub rendering: RenderingStrategy,
    pub sampling: SamplingConfiguration,
    pub aggregation: AggregationStrategy,
    pub loading_plan: Vec<LoadingStage>,
    pub optimization_recommendations: Vec<String>,
    pub adaptive_strategies: Vec<String>,
}

/// Compact subset attached to each chart recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceGuidance {
    pub size_category: SizeCategory,
    pub rendering_technique: RenderingTechnique,
    pub sampling: SamplingConfiguration,
    pub aggregation: AggregationStrategy,
    pub notes: Vec<String>,
}

/// Derives rendering, sampling and aggregation strategies from data volume.
#[derive(Debug, Clone, Copy)]
pub struct PerformanceStrategyPlanner {
    target_points: u64,
}

impl Default for PerformanceStrategyPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_POINTS)
    }
}

impl PerformanceStrategyPlanner {
    pub fn new(target_points: u64) -> Self {
        Self {
            target_points: target_points.max(1),
        }
    }

    pub fn target_points(&self) -> u64 {
        self.target_points
    }

    pub fn plan(&self, request: &PerformanceRequest) -> PerformanceProfile {
        let data_size = DataVolumeClassifier::classify(request.shape);
        let complexity = DataVolumeClassifier::assess_complexity(
            request.shape,
            request.chart_type,
            request.interaction_complexity,
        );

        let rendering = select_rendering(
            &data_size,
            complexity.level,
            request.prefer_canvas,
            request.interaction_complexity,
        );
        let memory = estimate_memory(
            data_size.total_data_points,
            rendering.technique,
            complexity.level,
        );

        let sampling = plan_sampling(request.shape.row_count, request.chart_type);
        let aggregation = plan_aggregation(
            data_size.total_data_points,
            request.chart_type,
            self.target_points,
        );
        let loading_plan = plan_loading(data_size.category, complexity.level);

        let mut optimization_recommendations: Vec<String> = rendering
            .optimizations
            .iter()
            .map(|o| format!("{}: {}", o.label(), o.description()))
            .collect();
        if memory.total_mb > MEMORY_WARNING_MB {
            optimization_recommendations.push(format!(
                "Estimated memory of {:.0} MB is high; reduce data before it reaches the client",
                memory.total_mb
            ));
        }

        let mut adaptive_strategies = Vec::new();
        if sampling.sampling_required {
            adaptive_strategies.push(format!(
                "Sample {} of {} rows using {} sampling",
                sampling.sample_size, request.shape.row_count, sampling.technique
            ));
        }
        if aggregation.is_needed() {
            adaptive_strategies.push(format!(
                "Aggregate by {} for {:.0}% data reduction",
                aggregation.method, aggregation.data_reduction
            ));
        }
        if loading_plan.len() > 1 {
            adaptive_strategies.push(format!(
                "Load progressively in {} stages",
                loading_plan.len()
            ));
        }

        debug!(
            "Performance plan: {} points ({}), {:?} complexity, {} rendering, {:.1} MB",
            data_size.total_data_points,
            data_size.category,
            complexity.level,
            rendering.technique,
            memory.total_mb
        );

        PerformanceProfile {
            data_size,
            complexity,
            memory,
            rendering,
            sampling,
            aggregation,
            loading_plan,
            optimization_recommendations,
            adaptive_strategies,
        }
    }

    /// Compact guidance for a single chart recommendation.
    pub fn guidance(&self, request: &PerformanceRequest) -> PerformanceGuidance {
        let profile = self.plan(request);
        let notes = profile
            .rendering
            .optimizations
            .iter()
            .map(|o| o.label().to_string())
            .chain(profile.adaptive_strategies.iter().cloned())
            .collect();

        PerformanceGuidance {
            size_category: profile.data_size.category,
            rendering_technique: profile.rendering.technique,
            sampling: profile.sampling,
            aggregation: profile.aggregation,
            notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_massive_dataset() {
        let planner = PerformanceStrategyPlanner::default();
        let profile = planner.plan(
            &PerformanceRequest::new(DatasetShape::new(5_000_000, 10))
                .with_chart(ChartType::ScatterPlot),
        );

        assert_eq!(profile.data_size.category, SizeCategory::Massive);
        assert_eq!(profile.rendering.technique, RenderingTechnique::Webgl);
        assert_eq!(profile.sampling.technique, SamplingTechnique::Adaptive);
        assert_eq!(profile.aggregation.method, AggregationMethod::Clustering);
        assert!(profile.loading_plan.len() >= 2);
        assert!(
            profile
                .optimization_recommendations
                .iter()
                .any(|r| r.contains("MB is high"))
        );
        assert_eq!(profile.adaptive_strategies.len(), 3);
    }

    #[test]
    fn test_plan_tiny_dataset_has_no_adaptive_strategies() {
        let planner = PerformanceStrategyPlanner::default();
        let profile = planner.plan(&PerformanceRequest::new(DatasetShape::new(50, 3)));

        assert_eq!(profile.data_size.category, SizeCategory::Tiny);
        assert_eq!(profile.rendering.technique, RenderingTechnique::Svg);
        assert!(!profile.sampling.sampling_required);
        assert!(!profile.aggregation.is_needed());
        assert_eq!(profile.loading_plan.len(), 1);
        assert!(profile.adaptive_strategies.is_empty());
    }

    #[test]
    fn test_guidance_mirrors_plan() {
        let planner = PerformanceStrategyPlanner::new(1_000);
        let request = PerformanceRequest::new(DatasetShape::new(20_000, 1))
            .with_chart(ChartType::Histogram)
            .with_interactions(2);
        let guidance = planner.guidance(&request);
        let profile = planner.plan(&request);

        assert_eq!(guidance.rendering_technique, profile.rendering.technique);
        assert_eq!(guidance.sampling, profile.sampling);
        assert_eq!(guidance.aggregation.method, AggregationMethod::Binning);
        assert!(guidance.notes.iter().any(|n| n == "Event Debouncing"));
    }

    #[test]
    fn test_target_points_floor() {
        assert_eq!(PerformanceStrategyPlanner::new(0).target_points(), 1);
    }
}
