//! Statistical analysis of column summaries.
//!
//! - [`DistributionAnalyzer`] classifies distribution shape, outlier severity
//!   and tail weight, and suggests a transformation.
//! - [`ScaleRecommender`] picks an axis scale and domain.

mod distribution;
mod scale;

pub use distribution::{
    DistributionAnalysis, DistributionAnalyzer, Modality, OutlierSeverity, TailBehavior,
    Transformation,
};
pub use scale::{ScaleRecommendation, ScaleRecommender, ScaleType};
