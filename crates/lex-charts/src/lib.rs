//! Chart Recommendation Engine
//!
//! Decides which chart to draw for the columns of a dataset, how to encode
//! it, and at what rendering and sampling fidelity, working only from
//! pre-computed statistical summaries. Raw data rows are never read.
//!
//! # Overview
//!
//! - **Distribution Analysis**: normality, skew, tails and outlier severity
//!   from summary moments
//! - **Chart Selection**: rule tables for single columns and column pairs
//! - **Scale Selection**: linear, log or band axes per value range
//! - **Performance Planning**: size buckets, rendering technique, sampling,
//!   aggregation and staged loading
//! - **Ranking**: primary recommendation merged with its alternatives
//!
//! Missing optional statistics never fail a call. The rules run on
//! documented defaults and the result is returned as a low-confidence
//! fallback together with an [`AnalysisWarning`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_charts::{AnalysisInput, ChartAdvisor, AdvisorConfig};
//!
//! let input = AnalysisInput::from_json(&std::fs::read_to_string("stats.json")?)?;
//!
//! let advisor = ChartAdvisor::new(
//!     AdvisorConfig::builder()
//!         .max_alternatives_per_chart(3)
//!         .target_render_points(10_000)
//!         .build()?,
//! )?;
//!
//! let report = advisor.analyze(&input)?;
//! for entry in &report.columns {
//!     println!(
//!         "{}: {} ({})",
//!         entry.subject, entry.recommendation.chart_type, entry.recommendation.confidence
//!     );
//! }
//! ```
//!
//! # Single Recommendations
//!
//! ```rust,ignore
//! use lex_charts::{ColumnDataType, ColumnStatisticalProfile, UnivariateChartSelector};
//!
//! let profile = ColumnStatisticalProfile::new("age", ColumnDataType::NumericInteger, 1000, 70)
//!     .with_range(18.0, 90.0)
//!     .with_statistics(0.4, -0.2, 3);
//!
//! let outcome = UnivariateChartSelector::default().select(&profile)?;
//! assert!(outcome.warnings.is_empty());
//! ```

pub mod advisor;
pub mod analysis;
pub mod config;
pub mod error;
pub mod performance;
pub mod ranking;
pub mod reporting;
pub mod selectors;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use advisor::ChartAdvisor;
pub use analysis::{
    DistributionAnalysis, DistributionAnalyzer, Modality, OutlierSeverity, ScaleRecommendation,
    ScaleRecommender, ScaleType, TailBehavior, Transformation,
};
pub use config::{AdvisorConfig, AdvisorConfigBuilder, ConfigValidationError};
pub use error::{ChartError, Result as ChartResult, ResultExt};
pub use performance::{
    AggregationMethod, AggregationStrategy, DataSizeCategory, DataVolumeClassifier,
    PerformanceGuidance, PerformanceProfile, PerformanceRequest, PerformanceStrategyPlanner,
    RenderingTechnique, SamplingConfiguration, SamplingTechnique, SizeCategory,
};
pub use ranking::{RankedChart, RankedRecommendations, RecommendationRanker};
pub use reporting::{AdvisorReport, ReportEntry, ReportGenerator, ReportSummary};
pub use selectors::{BivariateChartSelector, UnivariateChartSelector};
pub use types::{
    AlternativeOption, AnalysisInput, AnalysisWarning, ChartRecommendation, ChartType,
    ColumnDataType, ColumnStatisticalProfile, Confidence, CorrelationDirection,
    CorrelationProfile, CorrelationStrength, DatasetShape, DescriptiveStats,
    INCOMPLETE_ANALYSIS_NOTE, RecommendationOutcome, RelationshipType, SCHEMA_VERSION,
    WarningKind,
};
