//! Row sampling configuration.

use crate::types::ChartType;
use serde::{Deserialize, Serialize};
use std::fmt;

const NO_SAMPLING_LIMIT: u64 = 1_000;
const ADAPTIVE_ROW_COUNT: u64 = 1_000_000;
const STRATIFIED_ROW_COUNT: u64 = 100_000;
const SYSTEMATIC_ROW_COUNT: u64 = 10_000;

const ADAPTIVE_MIN_SAMPLE: f64 = 1_000.0;
const ADAPTIVE_MAX_SAMPLE: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingTechnique {
    Random,
    Stratified,
    Systematic,
    Reservoir,
    Adaptive,
}

impl SamplingTechnique {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Stratified => "stratified",
            Self::Systematic => "systematic",
            Self::Reservoir => "reservoir",
            Self::Adaptive => "adaptive",
        }
    }
}

impl fmt::Display for SamplingTechnique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingQuality {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingConfiguration {
    pub technique: SamplingTechnique,
    /// Never larger than the row count.
    pub sample_size: u64,
    pub preserve_outliers: bool,
    pub quality: SamplingQuality,
    /// False when every row is drawn.
    pub sampling_required: bool,
}

/// Pick a sampling technique and size for `row_count` rows.
pub fn plan_sampling(row_count: u64, chart_type: Option<ChartType>) -> SamplingConfiguration {
    if row_count <= NO_SAMPLING_LIMIT {
        return SamplingConfiguration {
            technique: SamplingTechnique::Random,
            sample_size: row_count,
            preserve_outliers: true,
            quality: SamplingQuality::High,
            sampling_required: false,
        };
    }

    let rows = row_count as f64;
    let (technique, base_size, quality, preserve_outliers) = if row_count > ADAPTIVE_ROW_COUNT {
        (
            SamplingTechnique::Adaptive,
            rows.sqrt().clamp(ADAPTIVE_MIN_SAMPLE, ADAPTIVE_MAX_SAMPLE),
            SamplingQuality::Medium,
            true,
        )
    } else if row_count > STRATIFIED_ROW_COUNT {
        (
            SamplingTechnique::Stratified,
            (rows * 0.1).min(5_000.0),
            SamplingQuality::High,
            true,
        )
    } else if row_count > SYSTEMATIC_ROW_COUNT {
        (
            SamplingTechnique::Systematic,
            (rows * 0.2).min(2_000.0),
            SamplingQuality::High,
            false,
        )
    } else {
        (
            SamplingTechnique::Random,
            (rows * 0.5).min(1_000.0),
            SamplingQuality::High,
            false,
        )
    };

    let adjusted = base_size * chart_adjustment(chart_type);
    let sample_size = (adjusted.floor() as u64).min(row_count);

    SamplingConfiguration {
        technique,
        sample_size,
        preserve_outliers,
        quality,
        sampling_required: true,
    }
}

/// Point-heavy charts need more samples; binned charts tolerate fewer.
fn chart_adjustment(chart_type: Option<ChartType>) -> f64 {
    match chart_type {
        Some(c) if c.name_contains(&["scatter", "density"]) => 1.5,
        Some(c) if c.name_contains(&["histogram", "binned"]) => 0.8,
        _ => 1.0,
    }
}
