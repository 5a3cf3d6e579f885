//! Input schema and recommendation output types.
//!
//! The input side (`AnalysisInput`, `ColumnStatisticalProfile`,
//! `CorrelationProfile`) is produced by an upstream statistics stage and is
//! read-only here. Required fields are plain values; optional statistics are
//! `Option`s whose absence maps onto documented defaults (see
//! [`DistributionAnalyzer`](crate::analysis::DistributionAnalyzer)).

use crate::analysis::ScaleRecommendation;
use crate::error::{ChartError, Result};
use crate::performance::PerformanceGuidance;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Input schema version understood by this engine.
pub const SCHEMA_VERSION: u32 = 1;

/// Justification prefix used by every fallback recommendation.
pub const INCOMPLETE_ANALYSIS_NOTE: &str =
    "Default recommendation — statistical analysis incomplete";

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

// ============================================================================
// Input Schema
// ============================================================================

/// Data type code of a column as reported by the statistics stage.
///
/// Unknown codes do not fail deserialization; they land in
/// [`ColumnDataType::Unknown`] and take the fallback recommendation path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnDataType {
    NumericFloat,
    NumericInteger,
    Categorical,
    Datetime,
    Boolean,
    Text,
    Unknown(String),
}

impl ColumnDataType {
    pub fn code(&self) -> &str {
        match self {
            Self::NumericFloat => "numeric-float",
            Self::NumericInteger => "numeric-integer",
            Self::Categorical => "categorical",
            Self::Datetime => "datetime",
            Self::Boolean => "boolean",
            Self::Text => "text",
            Self::Unknown(code) => code,
        }
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::NumericFloat | Self::NumericInteger)
    }

    /// Categorical in the charting sense: a small closed set of labels.
    #[inline]
    pub fn is_categorical(&self) -> bool {
        matches!(self, Self::Categorical | Self::Boolean)
    }
}

impl From<String> for ColumnDataType {
    fn from(code: String) -> Self {
        match code.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "numeric-float" => Self::NumericFloat,
            "numeric-integer" => Self::NumericInteger,
            "categorical" => Self::Categorical,
            "datetime" => Self::Datetime,
            "boolean" => Self::Boolean,
            "text" => Self::Text,
            _ => Self::Unknown(code),
        }
    }
}

impl From<ColumnDataType> for String {
    fn from(data_type: ColumnDataType) -> Self {
        data_type.code().to_string()
    }
}

impl fmt::Display for ColumnDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Moment statistics of a numeric column. Optional as a whole on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub skewness: f64,
    pub kurtosis: f64,
    #[serde(default)]
    pub outlier_count: u64,
}

/// Summary statistics of a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnStatisticalProfile {
    pub column_name: String,
    pub data_type: ColumnDataType,
    pub total_values: u64,
    pub unique_values: u64,
    /// Share of missing cells, 0 - 100.
    #[serde(default)]
    pub missing_percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<DescriptiveStats>,
    /// Category label -> count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequencies: Option<BTreeMap<String, u64>>,
}

impl ColumnStatisticalProfile {
    /// Create a profile with only the required fields set.
    pub fn new(
        column_name: impl Into<String>,
        data_type: ColumnDataType,
        total_values: u64,
        unique_values: u64,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            data_type,
            total_values,
            unique_values,
            missing_percentage: 0.0,
            min: None,
            max: None,
            statistics: None,
            frequencies: None,
        }
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn with_statistics(mut self, skewness: f64, kurtosis: f64, outlier_count: u64) -> Self {
        self.statistics = Some(DescriptiveStats {
            skewness,
            kurtosis,
            outlier_count,
        });
        self
    }

    pub fn with_frequencies<I, S>(mut self, frequencies: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        self.frequencies = Some(
            frequencies
                .into_iter()
                .map(|(label, count)| (label.into(), count))
                .collect(),
        );
        self
    }

    /// Ratio of unique values to total values; 0 for an empty column.
    pub fn cardinality(&self) -> f64 {
        if self.total_values == 0 {
            0.0
        } else {
            self.unique_values as f64 / self.total_values as f64
        }
    }

    /// Reject structurally invalid profiles.
    pub fn validate(&self) -> Result<()> {
        let name = self.column_name.trim();
        if name.is_empty() {
            return Err(ChartError::MissingIdentifier("column_name".to_string()));
        }

        if self.unique_values > self.total_values {
            return Err(ChartError::InconsistentCounts {
                column: name.to_string(),
                reason: format!(
                    "unique_values ({}) exceeds total_values ({})",
                    self.unique_values, self.total_values
                ),
            });
        }

        if !(0.0..=100.0).contains(&self.missing_percentage) {
            return Err(ChartError::invalid_field(
                name,
                "missing_percentage",
                format!("{} is outside 0..=100", self.missing_percentage),
            ));
        }

        for (field, value) in [("min", self.min), ("max", self.max)] {
            if let Some(v) = value
                && !v.is_finite()
            {
                return Err(ChartError::invalid_field(name, field, "must be finite"));
            }
        }

        if let (Some(min), Some(max)) = (self.min, self.max)
            && min > max
        {
            return Err(ChartError::invalid_field(
                name,
                "min",
                format!("min ({min}) is greater than max ({max})"),
            ));
        }

        if let Some(stats) = &self.statistics {
            if !stats.skewness.is_finite() {
                return Err(ChartError::invalid_field(name, "skewness", "must be finite"));
            }
            if !stats.kurtosis.is_finite() {
                return Err(ChartError::invalid_field(name, "kurtosis", "must be finite"));
            }
            if stats.outlier_count > self.total_values {
                return Err(ChartError::InconsistentCounts {
                    column: name.to_string(),
                    reason: format!(
                        "outlier_count ({}) exceeds total_values ({})",
                        stats.outlier_count, self.total_values
                    ),
                });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl CorrelationStrength {
    pub fn is_strong(self) -> bool {
        matches!(self, Self::Strong | Self::VeryStrong)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::VeryWeak => "very weak",
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
            Self::VeryStrong => "very strong",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationDirection {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Linear,
    NonLinear,
    Monotonic,
    None,
}

impl RelationshipType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::NonLinear => "non-linear",
            Self::Monotonic => "monotonic",
            Self::None => "no clear",
        }
    }
}

/// Pairwise relationship summary between two columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationProfile {
    pub variable1: String,
    pub variable2: String,
    pub strength: CorrelationStrength,
    pub direction: CorrelationDirection,
    /// p-value of the correlation test.
    pub significance: f64,
    pub relationship_type: RelationshipType,
    pub sample_size1: u64,
    pub sample_size2: u64,
}

impl CorrelationProfile {
    /// Number of points a bivariate chart would plot.
    pub fn total_points(&self) -> u64 {
        self.sample_size1.min(self.sample_size2)
    }

    pub fn subject(&self) -> String {
        format!("{} × {}", self.variable1, self.variable2)
    }

    pub fn validate(&self) -> Result<()> {
        if self.variable1.trim().is_empty() {
            return Err(ChartError::MissingIdentifier("variable1".to_string()));
        }
        if self.variable2.trim().is_empty() {
            return Err(ChartError::MissingIdentifier("variable2".to_string()));
        }
        if !(0.0..=1.0).contains(&self.significance) {
            return Err(ChartError::invalid_field(
                self.subject(),
                "significance",
                format!("p-value {} is outside 0..=1", self.significance),
            ));
        }
        Ok(())
    }
}

/// Dataset-level size summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetShape {
    pub row_count: u64,
    pub column_count: u64,
}

impl DatasetShape {
    pub fn new(row_count: u64, column_count: u64) -> Self {
        Self {
            row_count,
            column_count,
        }
    }

    pub fn total_data_points(&self) -> u64 {
        self.row_count.saturating_mul(self.column_count)
    }
}

/// Versioned input document consumed by [`ChartAdvisor`](crate::ChartAdvisor).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisInput {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub dataset: DatasetShape,
    pub columns: Vec<ColumnStatisticalProfile>,
    #[serde(default)]
    pub correlations: Vec<CorrelationProfile>,
}

impl AnalysisInput {
    /// Parse an input document. Schema violations (negative counts, missing
    /// required fields) are reported as [`ChartError::MalformedInput`].
    pub fn from_json(json: &str) -> Result<Self> {
        let input: AnalysisInput =
            serde_json::from_str(json).map_err(|e| ChartError::MalformedInput(e.to_string()))?;
        input.validate()?;
        Ok(input)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnStatisticalProfile> {
        self.columns.iter().find(|c| c.column_name == name)
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(ChartError::UnsupportedSchemaVersion {
                found: self.schema_version,
                expected: SCHEMA_VERSION,
            });
        }
        let mut seen = HashSet::with_capacity(self.columns.len());
        for column in &self.columns {
            column.validate()?;
            if !seen.insert(column.column_name.as_str()) {
                return Err(ChartError::invalid_field(
                    &column.column_name,
                    "column_name",
                    "duplicate column name",
                ));
            }
        }
        for correlation in &self.correlations {
            correlation.validate()?;
            for name in [&correlation.variable1, &correlation.variable2] {
                if self.column(name).is_none() {
                    return Err(ChartError::ColumnNotFound(name.clone()));
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Chart Vocabulary
// ============================================================================

/// Closed set of chart types the engine can recommend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Histogram,
    DensityPlot,
    ViolinPlot,
    BoxPlot,
    BarChart,
    OrderedBarChart,
    HorizontalBarChart,
    PieChart,
    DonutChart,
    Treemap,
    ScatterPlot,
    SmoothScatter,
    DensityScatter,
    HexbinPlot,
    ContourPlot,
    SampledScatter,
    LineChart,
    Heatmap,
}

impl ChartType {
    /// Stable snake_case identifier, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Histogram => "histogram",
            Self::DensityPlot => "density_plot",
            Self::ViolinPlot => "violin_plot",
            Self::BoxPlot => "box_plot",
            Self::BarChart => "bar_chart",
            Self::OrderedBarChart => "ordered_bar_chart",
            Self::HorizontalBarChart => "horizontal_bar_chart",
            Self::PieChart => "pie_chart",
            Self::DonutChart => "donut_chart",
            Self::Treemap => "treemap",
            Self::ScatterPlot => "scatter_plot",
            Self::SmoothScatter => "smooth_scatter",
            Self::DensityScatter => "density_scatter",
            Self::HexbinPlot => "hexbin_plot",
            Self::ContourPlot => "contour_plot",
            Self::SampledScatter => "sampled_scatter",
            Self::LineChart => "line_chart",
            Self::Heatmap => "heatmap",
        }
    }

    /// Human-readable name for justification text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Histogram => "Histogram",
            Self::DensityPlot => "Density plot",
            Self::ViolinPlot => "Violin plot",
            Self::BoxPlot => "Box plot",
            Self::BarChart => "Bar chart",
            Self::OrderedBarChart => "Ordered bar chart",
            Self::HorizontalBarChart => "Horizontal bar chart",
            Self::PieChart => "Pie chart",
            Self::DonutChart => "Donut chart",
            Self::Treemap => "Treemap",
            Self::ScatterPlot => "Scatter plot",
            Self::SmoothScatter => "Smoothed scatter plot",
            Self::DensityScatter => "Density scatter plot",
            Self::HexbinPlot => "Hexbin plot",
            Self::ContourPlot => "Contour plot",
            Self::SampledScatter => "Sampled scatter plot",
            Self::LineChart => "Line chart",
            Self::Heatmap => "Heatmap",
        }
    }

    /// Whether the identifier contains any of the given fragments. The
    /// performance heuristics key on name fragments such as "scatter".
    pub fn name_contains(self, fragments: &[&str]) -> bool {
        let name = self.as_str();
        fragments.iter().any(|f| name.contains(f))
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision confidence, always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// Confidence assigned to every fallback recommendation.
    pub const FALLBACK: Confidence = Confidence(0.5);

    /// Clamp into `[0, 1]`; NaN becomes 0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<Confidence> for f64 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

impl TryFrom<f64> for Confidence {
    type Error = String;

    fn try_from(value: f64) -> std::result::Result<Self, Self::Error> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!("confidence {value} is outside 0..=1"))
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

// ============================================================================
// Recommendation Output
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    X,
    Y,
    Color,
    Size,
    Angle,
    Area,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    Sequential,
    Categorical,
    Diverging,
}

/// One visual channel bound to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelEncoding {
    pub channel: Channel,
    pub field: String,
    pub scale: ScaleRecommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingStrategy {
    pub primary: ChannelEncoding,
    #[serde(default)]
    pub secondary: Vec<ChannelEncoding>,
    pub color_scheme: ColorScheme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    Hover,
    HighlightOutliers,
    ZoomPan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeOption {
    pub chart_type: ChartType,
    pub confidence: Confidence,
    pub tradeoffs: String,
}

impl AlternativeOption {
    pub fn new(chart_type: ChartType, confidence: f64, tradeoffs: impl Into<String>) -> Self {
        Self {
            chart_type,
            confidence: Confidence::new(confidence),
            tradeoffs: tradeoffs.into(),
        }
    }
}

/// A complete recommendation for one column or one column pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartRecommendation {
    /// Column(s) the recommendation visualizes.
    pub columns: Vec<String>,
    pub chart_type: ChartType,
    pub confidence: Confidence,
    pub justification: String,
    pub data_characteristics: Vec<String>,
    pub encoding: EncodingStrategy,
    pub interactions: Vec<Interaction>,
    pub alternatives: Vec<AlternativeOption>,
    pub performance_guidance: PerformanceGuidance,
}

impl ChartRecommendation {
    /// Whether this is a degraded fallback recommendation.
    pub fn is_fallback(&self) -> bool {
        self.justification.starts_with(INCOMPLETE_ANALYSIS_NOTE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Optional statistics were absent; defaults were used.
    IncompleteData,
    /// The data type code has no dedicated selection rules.
    UnsupportedDataType,
    /// The column has no values at all.
    EmptyColumn,
}

/// Recoverable condition reported next to a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisWarning {
    pub kind: WarningKind,
    pub subject: String,
    pub message: String,
}

impl AnalysisWarning {
    pub fn new(kind: WarningKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// Result of a single top-level recommendation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationOutcome {
    pub recommendation: ChartRecommendation,
    pub warnings: Vec<AnalysisWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_codes_roundtrip() {
        let parsed: ColumnDataType = serde_json::from_str("\"numeric-float\"").unwrap();
        assert_eq!(parsed, ColumnDataType::NumericFloat);
        let parsed: ColumnDataType = serde_json::from_str("\"numeric_integer\"").unwrap();
        assert_eq!(parsed, ColumnDataType::NumericInteger);
        assert_eq!(
            serde_json::to_string(&ColumnDataType::Categorical).unwrap(),
            "\"categorical\""
        );
    }

    #[test]
    fn test_unknown_data_type_does_not_fail() {
        let parsed: ColumnDataType = serde_json::from_str("\"geo-point\"").unwrap();
        assert_eq!(parsed, ColumnDataType::Unknown("geo-point".to_string()));
        assert!(!parsed.is_numeric());
        assert!(!parsed.is_categorical());
    }

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(Confidence::new(1.7).value(), 1.0);
        assert_eq!(Confidence::new(-0.2).value(), 0.0);
        assert_eq!(Confidence::new(f64::NAN).value(), 0.0);
        assert_eq!(Confidence::new(0.85).value(), 0.85);
    }

    #[test]
    fn test_confidence_deserialization_rejects_out_of_range() {
        assert!(serde_json::from_str::<Confidence>("0.9").is_ok());
        assert!(serde_json::from_str::<Confidence>("1.5").is_err());
    }

    #[test]
    fn test_chart_type_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ChartType::HorizontalBarChart).unwrap(),
            "\"horizontal_bar_chart\""
        );
        assert_eq!(ChartType::DensityScatter.to_string(), "density_scatter");
    }

    #[test]
    fn test_chart_type_name_contains() {
        assert!(ChartType::DensityScatter.name_contains(&["scatter"]));
        assert!(ChartType::DensityScatter.name_contains(&["density"]));
        assert!(!ChartType::HexbinPlot.name_contains(&["histogram", "binned"]));
        assert!(ChartType::ContourPlot.name_contains(&["density", "contour"]));
    }

    #[test]
    fn test_cardinality() {
        let profile = ColumnStatisticalProfile::new("x", ColumnDataType::NumericFloat, 100, 60);
        assert_eq!(profile.cardinality(), 0.6);
        let empty = ColumnStatisticalProfile::new("x", ColumnDataType::NumericFloat, 0, 0);
        assert_eq!(empty.cardinality(), 0.0);
    }

    #[test]
    fn test_validate_blank_name() {
        let profile = ColumnStatisticalProfile::new("  ", ColumnDataType::Categorical, 10, 2);
        assert!(matches!(
            profile.validate(),
            Err(ChartError::MissingIdentifier(_))
        ));
    }

    #[test]
    fn test_validate_unique_exceeds_total() {
        let profile = ColumnStatisticalProfile::new("id", ColumnDataType::NumericInteger, 10, 11);
        assert!(matches!(
            profile.validate(),
            Err(ChartError::InconsistentCounts { .. })
        ));
    }

    #[test]
    fn test_validate_inverted_range() {
        let profile = ColumnStatisticalProfile::new("x", ColumnDataType::NumericFloat, 10, 5)
            .with_range(10.0, 1.0);
        assert!(matches!(
            profile.validate(),
            Err(ChartError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_validate_non_finite_statistics() {
        let profile = ColumnStatisticalProfile::new("x", ColumnDataType::NumericFloat, 10, 5)
            .with_statistics(f64::NAN, 0.0, 0);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_negative_count_is_malformed_input() {
        let json = r#"{
            "dataset": { "row_count": 10, "column_count": 1 },
            "columns": [{
                "column_name": "age",
                "data_type": "numeric-integer",
                "total_values": -5,
                "unique_values": 3
            }]
        }"#;
        let err = AnalysisInput::from_json(json).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_INPUT");
    }

    #[test]
    fn test_schema_version_checked() {
        let json = r#"{
            "schema_version": 2,
            "dataset": { "row_count": 10, "column_count": 1 },
            "columns": []
        }"#;
        let err = AnalysisInput::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            ChartError::UnsupportedSchemaVersion {
                found: 2,
                expected: 1
            }
        ));
    }

    #[test]
    fn test_correlation_must_reference_known_columns() {
        let json = r#"{
            "dataset": { "row_count": 10, "column_count": 1 },
            "columns": [{
                "column_name": "a",
                "data_type": "numeric-float",
                "total_values": 10,
                "unique_values": 10
            }],
            "correlations": [{
                "variable1": "a",
                "variable2": "b",
                "strength": "weak",
                "direction": "positive",
                "significance": 0.2,
                "relationship_type": "linear",
                "sample_size1": 10,
                "sample_size2": 10
            }]
        }"#;
        let err = AnalysisInput::from_json(json).unwrap_err();
        assert!(matches!(err, ChartError::ColumnNotFound(ref name) if name == "b"));
    }

    #[test]
    fn test_duplicate_column_names_rejected() {
        let input = AnalysisInput {
            schema_version: SCHEMA_VERSION,
            dataset: DatasetShape::new(10, 2),
            columns: vec![
                ColumnStatisticalProfile::new("a", ColumnDataType::NumericFloat, 10, 10),
                ColumnStatisticalProfile::new("a", ColumnDataType::Categorical, 10, 2),
            ],
            correlations: Vec::new(),
        };
        let err = input.validate().unwrap_err();
        assert!(matches!(
            err,
            ChartError::InvalidField { ref subject, ref field, .. }
                if subject == "a" && field == "column_name"
        ));
        assert!(err.is_validation());
    }

    #[test]
    fn test_total_data_points_saturates() {
        let shape = DatasetShape::new(u64::MAX, 3);
        assert_eq!(shape.total_data_points(), u64::MAX);
    }
}
