//! Data volume buckets and rendering complexity scoring.

use crate::types::{ChartType, DatasetShape};
use serde::{Deserialize, Serialize};
use std::fmt;

// Upper bounds (exclusive) of total data points per bucket.
const TINY_LIMIT: u64 = 1_000;
const SMALL_LIMIT: u64 = 10_000;
const MEDIUM_LIMIT: u64 = 100_000;
const LARGE_LIMIT: u64 = 1_000_000;
const HUGE_LIMIT: u64 = 10_000_000;

const HEAVY_ROW_COUNT: u64 = 100_000;
const WIDE_COLUMN_COUNT: u64 = 5;
const RICH_INTERACTION: u32 = 2;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SizeCategory {
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
    Massive,
}

impl SizeCategory {
    pub fn from_points(total_data_points: u64) -> Self {
        match total_data_points {
            p if p < TINY_LIMIT => Self::Tiny,
            p if p < SMALL_LIMIT => Self::Small,
            p if p < MEDIUM_LIMIT => Self::Medium,
            p if p < LARGE_LIMIT => Self::Large,
            p if p < HUGE_LIMIT => Self::Huge,
            _ => Self::Massive,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Huge => "huge",
            Self::Massive => "massive",
        }
    }

    /// Small enough to draw everything in one pass.
    pub fn is_lightweight(self) -> bool {
        matches!(self, Self::Tiny | Self::Small)
    }

    fn characterization(self) -> &'static str {
        match self {
            Self::Tiny => "Fits comfortably in any rendering approach",
            Self::Small => "Interactive rendering without special handling",
            Self::Medium => "Noticeable rendering cost for DOM-based charts",
            Self::Large => "Requires sampling or aggregation for smooth interaction",
            Self::Huge => "Too many points to draw individually at interactive speed",
            Self::Massive => "Needs reduction before any client-side rendering",
        }
    }

    fn scaling_challenges(self) -> &'static [&'static str] {
        match self {
            Self::Tiny => &[],
            Self::Small => &["Label overlap in dense regions"],
            Self::Medium => &["DOM node count", "Overplotting"],
            Self::Large => &["Overplotting", "Interaction latency", "Memory pressure"],
            Self::Huge => &["Rendering throughput", "Memory pressure", "Data transfer size"],
            Self::Massive => &[
                "Data transfer size",
                "Browser memory limits",
                "Aggregation latency",
                "Progressive loading required",
            ],
        }
    }
}

impl fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSizeCategory {
    pub category: SizeCategory,
    pub row_count: u64,
    pub column_count: u64,
    pub total_data_points: u64,
    pub characterization: String,
    pub scaling_challenges: Vec<String>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    Simple,
    Moderate,
    Complex,
    Extreme,
}

impl ComplexityLevel {
    pub fn from_score(total: f64) -> Self {
        if total < 2.0 {
            Self::Simple
        } else if total < 4.0 {
            Self::Moderate
        } else if total < 8.0 {
            Self::Complex
        } else {
            Self::Extreme
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityAssessment {
    pub compute_factor: f64,
    pub render_factor: f64,
    pub total: f64,
    pub level: ComplexityLevel,
}

/// Buckets dataset size and scores rendering complexity.
pub struct DataVolumeClassifier;

impl DataVolumeClassifier {
    pub fn classify(shape: DatasetShape) -> DataSizeCategory {
        let total_data_points = shape.total_data_points();
        let category = SizeCategory::from_points(total_data_points);

        DataSizeCategory {
            category,
            row_count: shape.row_count,
            column_count: shape.column_count,
            total_data_points,
            characterization: category.characterization().to_string(),
            scaling_challenges: category
                .scaling_challenges()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn assess_complexity(
        shape: DatasetShape,
        chart_type: Option<ChartType>,
        interaction_complexity: u32,
    ) -> ComplexityAssessment {
        let mut compute = 1.0;
        let mut render = 1.0;

        if shape.row_count > HEAVY_ROW_COUNT {
            compute *= 2.0;
            render *= 1.5;
        }
        if chart_type.is_some_and(|c| c.name_contains(&["density", "contour"])) {
            compute *= 1.5;
            render *= 1.3;
        }
        if shape.column_count > WIDE_COLUMN_COUNT {
            compute *= 1.2;
        }
        if interaction_complexity > RICH_INTERACTION {
            render *= 1.4;
        }

        let total = compute * render;
        ComplexityAssessment {
            compute_factor: compute,
            render_factor: render,
            total,
            level: ComplexityLevel::from_score(total),
        }
    }
}
