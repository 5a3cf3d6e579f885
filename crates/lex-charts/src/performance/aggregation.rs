//! Aggregation strategy and staged loading plan.

use super::volume::{ComplexityLevel, SizeCategory};
use crate::types::ChartType;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_DATA_REDUCTION: f64 = 95.0;
const CLUSTERING_MIN_REDUCTION: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMethod {
    Binning,
    Clustering,
    Downsampling,
    Summarization,
}

impl AggregationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binning => "binning",
            Self::Clustering => "clustering",
            Self::Downsampling => "downsampling",
            Self::Summarization => "summarization",
        }
    }

    /// (information retention %, visual fidelity %) once reduction applies.
    fn quality(self) -> (f64, f64) {
        match self {
            Self::Binning => (95.0, 98.0),
            Self::Clustering => (85.0, 90.0),
            Self::Summarization => (90.0, 95.0),
            Self::Downsampling => (80.0, 85.0),
        }
    }
}

impl fmt::Display for AggregationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Method-specific knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregationParameters {
    Binning { bin_count: u64 },
    Clustering { cluster_count: u64 },
    Downsampling { stride: u64 },
    Summarization { window_size: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregationStrategy {
    pub method: AggregationMethod,
    /// total points / target points, at least 1.
    pub reduction_factor: f64,
    pub parameters: AggregationParameters,
    pub data_reduction: f64,
    pub information_retention: f64,
    pub visual_fidelity: f64,
}

impl AggregationStrategy {
    pub fn is_needed(&self) -> bool {
        self.reduction_factor > 1.0
    }
}

/// Pick how to reduce `total_data_points` down to `target_points`.
pub fn plan_aggregation(
    total_data_points: u64,
    chart_type: Option<ChartType>,
    target_points: u64,
) -> AggregationStrategy {
    let target = target_points.max(1);
    let reduction_needed = total_data_points as f64 / target as f64;

    if reduction_needed <= 1.0 {
        return AggregationStrategy {
            method: AggregationMethod::Downsampling,
            reduction_factor: 1.0,
            parameters: AggregationParameters::Downsampling { stride: 1 },
            data_reduction: 0.0,
            information_retention: 100.0,
            visual_fidelity: 100.0,
        };
    }

    let fragments = |names: &[&str]| chart_type.is_some_and(|c| c.name_contains(names));
    let step = reduction_needed.ceil() as u64;

    let (method, parameters) = if fragments(&["histogram", "density"]) {
        (
            AggregationMethod::Binning,
            AggregationParameters::Binning { bin_count: target },
        )
    } else if fragments(&["scatter"]) && reduction_needed > CLUSTERING_MIN_REDUCTION {
        (
            AggregationMethod::Clustering,
            AggregationParameters::Clustering {
                cluster_count: target,
            },
        )
    } else if fragments(&["line", "time"]) {
        (
            AggregationMethod::Summarization,
            AggregationParameters::Summarization { window_size: step },
        )
    } else {
        (
            AggregationMethod::Downsampling,
            AggregationParameters::Downsampling { stride: step },
        )
    };

    let (information_retention, visual_fidelity) = method.quality();

    AggregationStrategy {
        method,
        reduction_factor: reduction_needed,
        parameters,
        data_reduction: ((1.0 - 1.0 / reduction_needed) * 100.0).min(MAX_DATA_REDUCTION),
        information_retention,
        visual_fidelity,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingStage {
    pub stage: u8,
    pub description: String,
    /// Share of the full data volume loaded by this stage.
    pub data_volume_pct: f64,
    pub on_demand: bool,
}

/// Staged loading for data that cannot be drawn in one pass.
pub fn plan_loading(size: SizeCategory, complexity: ComplexityLevel) -> Vec<LoadingStage> {
    if size.is_lightweight() {
        return vec![LoadingStage {
            stage: 1,
            description: "Load the complete dataset".to_string(),
            data_volume_pct: 100.0,
            on_demand: false,
        }];
    }

    let mut stages = vec![
        LoadingStage {
            stage: 1,
            description: "Chart structure with a 10% sample".to_string(),
            data_volume_pct: 10.0,
            on_demand: false,
        },
        LoadingStage {
            stage: 2,
            description: "Aggregated representation".to_string(),
            data_volume_pct: 50.0,
            on_demand: false,
        },
    ];

    if complexity >= ComplexityLevel::Complex {
        stages.push(LoadingStage {
            stage: 3,
            description: "Full detail for the zoomed region".to_string(),
            data_volume_pct: 100.0,
            on_demand: true,
        });
    }

    stages
}
