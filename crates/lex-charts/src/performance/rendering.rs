//! Rendering technique selection and memory estimation.

use super::volume::{ComplexityLevel, DataSizeCategory};
use serde::{Deserialize, Serialize};
use std::fmt;

const BYTES_PER_POINT: f64 = 6.0;
const BYTES_PER_MB: f64 = 1_048_576.0;
const INTERACTION_MEMORY_CAP_MB: f64 = 50.0;
const CACHE_MEMORY_CAP_MB: f64 = 20.0;

const WEBGL_POINT_THRESHOLD: u64 = 50_000;
const CANVAS_POINT_THRESHOLD: u64 = 5_000;
const LEVEL_OF_DETAIL_THRESHOLD: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderingTechnique {
    Svg,
    Canvas,
    Webgl,
    Hybrid,
}

impl RenderingTechnique {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Canvas => "canvas",
            Self::Webgl => "webgl",
            Self::Hybrid => "hybrid",
        }
    }

    fn memory_multiplier(self) -> f64 {
        match self {
            Self::Svg => 1.0,
            Self::Canvas => 1.5,
            Self::Webgl => 2.0,
            Self::Hybrid => 1.0,
        }
    }

    /// Draws into a pixel buffer rather than the DOM.
    pub fn is_raster(self) -> bool {
        matches!(self, Self::Canvas | Self::Webgl)
    }

    fn reasoning(self) -> &'static str {
        match self {
            Self::Webgl => {
                "GPU-accelerated rendering is required to keep this volume of points interactive"
            }
            Self::Canvas => {
                "Canvas avoids per-point DOM nodes while keeping the drawing API simple"
            }
            Self::Svg => "Small data renders crisply as vector graphics with native DOM events",
            Self::Hybrid => {
                "Canvas for the data layer with SVG for axes, labels and annotations"
            }
        }
    }

    fn expected_performance(self) -> &'static str {
        match self {
            Self::Webgl => "60fps pan and zoom with millions of points on capable hardware",
            Self::Canvas => "Smooth redraws up to roughly 100k points",
            Self::Svg => "Instant rendering and interaction",
            Self::Hybrid => "Smooth interaction with crisp text at moderate volumes",
        }
    }

    fn limitations(self) -> &'static [&'static str] {
        match self {
            Self::Webgl => &[
                "Requires WebGL support in the client",
                "Text rendering and hit testing need extra work",
            ],
            Self::Canvas => &[
                "No per-element DOM events; hit testing is manual",
                "Raster output blurs when scaled",
            ],
            Self::Svg => &["DOM size grows linearly with the number of marks"],
            Self::Hybrid => &["Two rendering layers must be kept in sync"],
        }
    }
}

impl fmt::Display for RenderingTechnique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderingOptimization {
    LevelOfDetail,
    ViewportCulling,
    EventDebouncing,
}

impl RenderingOptimization {
    pub fn label(self) -> &'static str {
        match self {
            Self::LevelOfDetail => "Level of Detail",
            Self::ViewportCulling => "Viewport Culling",
            Self::EventDebouncing => "Event Debouncing",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::LevelOfDetail => {
                "Render aggregated marks when zoomed out, full detail when zoomed in"
            }
            Self::ViewportCulling => "Skip drawing marks outside the visible viewport",
            Self::EventDebouncing => "Throttle hover and brush handlers to the frame rate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderingStrategy {
    pub technique: RenderingTechnique,
    pub reasoning: String,
    pub expected_performance: String,
    pub limitations: Vec<String>,
    pub optimizations: Vec<RenderingOptimization>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemoryBreakdown {
    pub dom_elements_mb: f64,
    pub canvas_memory_mb: f64,
    pub data_structures_mb: f64,
    pub caching_mb: f64,
    pub buffers_mb: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemoryEstimate {
    pub base_data_mb: f64,
    pub rendering_mb: f64,
    pub interaction_mb: f64,
    pub total_mb: f64,
    pub breakdown: MemoryBreakdown,
}

/// Choose a technique for the data volume and attach optimizations.
pub fn select_rendering(
    size: &DataSizeCategory,
    complexity: ComplexityLevel,
    prefer_canvas: bool,
    interaction_complexity: u32,
) -> RenderingStrategy {
    let points = size.total_data_points;

    let technique = if points > WEBGL_POINT_THRESHOLD || complexity == ComplexityLevel::Extreme {
        RenderingTechnique::Webgl
    } else if points > CANVAS_POINT_THRESHOLD || prefer_canvas {
        RenderingTechnique::Canvas
    } else if size.category.is_lightweight() {
        RenderingTechnique::Svg
    } else {
        RenderingTechnique::Hybrid
    };

    let mut optimizations = Vec::new();
    if points > LEVEL_OF_DETAIL_THRESHOLD {
        optimizations.push(RenderingOptimization::LevelOfDetail);
    }
    if technique.is_raster() {
        optimizations.push(RenderingOptimization::ViewportCulling);
    }
    if interaction_complexity > 1 {
        optimizations.push(RenderingOptimization::EventDebouncing);
    }

    RenderingStrategy {
        technique,
        reasoning: technique.reasoning().to_string(),
        expected_performance: technique.expected_performance().to_string(),
        limitations: technique.limitations().iter().map(|s| s.to_string()).collect(),
        optimizations,
    }
}

/// Estimate client memory in MB for drawing `total_data_points`.
pub fn estimate_memory(
    total_data_points: u64,
    technique: RenderingTechnique,
    complexity: ComplexityLevel,
) -> MemoryEstimate {
    let base_data_mb = total_data_points as f64 * BYTES_PER_POINT / BYTES_PER_MB;

    let complexity_multiplier = if complexity == ComplexityLevel::Complex {
        1.3
    } else {
        1.0
    };
    let rendering_mb = base_data_mb * technique.memory_multiplier() * complexity_multiplier;
    let interaction_mb = (base_data_mb * 0.2).min(INTERACTION_MEMORY_CAP_MB);
    let total_mb = base_data_mb + rendering_mb + interaction_mb;

    MemoryEstimate {
        base_data_mb,
        rendering_mb,
        interaction_mb,
        total_mb,
        breakdown: MemoryBreakdown {
            dom_elements_mb: rendering_mb * 0.4,
            canvas_memory_mb: rendering_mb * 0.3,
            data_structures_mb: base_data_mb * 0.8,
            caching_mb: (total_mb * 0.1).min(CACHE_MEMORY_CAP_MB),
            buffers_mb: rendering_mb * 0.2,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::performance::volume::DataVolumeClassifier;
    use crate::types::DatasetShape;

    fn size(rows: u64, cols: u64) -> DataSizeCategory {
        DataVolumeClassifier::classify(DatasetShape::new(rows, cols))
    }

    #[test]
    fn test_massive_uses_webgl() {
        let strategy = select_rendering(&size(5_000_000, 10), ComplexityLevel::Complex, false, 1);
        assert_eq!(strategy.technique, RenderingTechnique::Webgl);
        assert!(strategy.optimizations.contains(&RenderingOptimization::LevelOfDetail));
        assert!(strategy.optimizations.contains(&RenderingOptimization::ViewportCulling));
        assert!(!strategy.optimizations.contains(&RenderingOptimization::EventDebouncing));
    }

    #[test]
    fn test_extreme_complexity_forces_webgl() {
        let strategy = select_rendering(&size(100, 10), ComplexityLevel::Extreme, false, 0);
        assert_eq!(strategy.technique, RenderingTechnique::Webgl);
    }

    #[test]
    fn test_mid_volume_uses_canvas() {
        let strategy = select_rendering(&size(6_000, 1), ComplexityLevel::Simple, false, 2);
        assert_eq!(strategy.technique, RenderingTechnique::Canvas);
        assert!(strategy.optimizations.contains(&RenderingOptimization::EventDebouncing));
        assert!(!strategy.optimizations.contains(&RenderingOptimization::LevelOfDetail));
    }

    #[test]
    fn test_canvas_hint() {
        let strategy = select_rendering(&size(100, 2), ComplexityLevel::Simple, true, 0);
        assert_eq!(strategy.technique, RenderingTechnique::Canvas);
    }

    #[test]
    fn test_small_uses_svg() {
        let strategy = select_rendering(&size(1_000, 4), ComplexityLevel::Simple, false, 1);
        assert_eq!(strategy.technique, RenderingTechnique::Svg);
        assert!(strategy.optimizations.is_empty());
    }

    #[test]
    fn test_canvas_threshold_is_exclusive() {
        let strategy = select_rendering(&size(5_000, 1), ComplexityLevel::Simple, false, 0);
        assert_eq!(strategy.technique, RenderingTechnique::Svg);
    }

    #[test]
    fn test_memory_estimate_components() {
        let estimate =
            estimate_memory(1_048_576, RenderingTechnique::Canvas, ComplexityLevel::Simple);
        assert!((estimate.base_data_mb - 6.0).abs() < 1e-9);
        assert!((estimate.rendering_mb - 9.0).abs() < 1e-9);
        assert!((estimate.interaction_mb - 1.2).abs() < 1e-9);
        assert!((estimate.total_mb - 16.2).abs() < 1e-9);
        assert!((estimate.breakdown.caching_mb - 1.62).abs() < 1e-9);
        assert!((estimate.breakdown.data_structures_mb - 4.8).abs() < 1e-9);
    }

    #[test]
    fn test_memory_complex_multiplier_and_caps() {
        let estimate =
            estimate_memory(500_000_000, RenderingTechnique::Webgl, ComplexityLevel::Complex);
        let base = 500_000_000.0 * 6.0 / 1_048_576.0;
        assert!((estimate.rendering_mb - base * 2.0 * 1.3).abs() < 1e-6);
        assert_eq!(estimate.interaction_mb, 50.0);
        assert_eq!(estimate.breakdown.caching_mb, 20.0);
    }
}
