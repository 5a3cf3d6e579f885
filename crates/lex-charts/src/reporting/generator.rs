use crate::error::Result;
use crate::performance::PerformanceProfile;
use crate::ranking::RankedRecommendations;
use crate::types::{AnalysisWarning, ChartRecommendation, DatasetShape, RecommendationOutcome};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

// ============================================================================
// Report Types
// ============================================================================

/// Complete recommendation report for one input document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path of the input document, when read from disk
    pub input_file: Option<String>,
    pub schema_version: u32,
    pub dataset: DatasetShape,
    /// Rendering libraries the caller targets (informational)
    pub target_rendering_libraries: Vec<String>,
    pub summary: ReportSummary,
    /// Performance plan for the dataset as a whole
    pub dataset_performance: PerformanceProfile,
    /// One entry per column, in input order
    pub columns: Vec<ReportEntry>,
    /// One entry per correlation, in input order
    pub pairs: Vec<ReportEntry>,
    /// Warnings of all entries, columns first
    pub warnings: Vec<AnalysisWarning>,
}

/// Recommendation and ranking for one column or pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub subject: String,
    pub recommendation: ChartRecommendation,
    pub ranking: RankedRecommendations,
    pub warnings: Vec<AnalysisWarning>,
}

impl ReportEntry {
    pub fn new(outcome: RecommendationOutcome, ranking: RankedRecommendations) -> Self {
        Self {
            subject: ranking.subject.clone(),
            recommendation: outcome.recommendation,
            ranking,
            warnings: outcome.warnings,
        }
    }
}

/// Aggregate counts over a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub columns_analyzed: usize,
    pub pairs_analyzed: usize,
    /// Entries that fell back to a default recommendation
    pub fallback_count: usize,
    pub warning_count: usize,
    /// Chart type -> number of entries recommending it as primary
    pub chart_counts: BTreeMap<String, usize>,
}

impl AdvisorReport {
    pub fn new(
        schema_version: u32,
        dataset: DatasetShape,
        target_rendering_libraries: Vec<String>,
        dataset_performance: PerformanceProfile,
        columns: Vec<ReportEntry>,
        pairs: Vec<ReportEntry>,
    ) -> Self {
        let warnings: Vec<AnalysisWarning> = columns
            .iter()
            .chain(&pairs)
            .flat_map(|entry| entry.warnings.iter().cloned())
            .collect();

        let mut chart_counts = BTreeMap::new();
        for entry in columns.iter().chain(&pairs) {
            *chart_counts
                .entry(entry.recommendation.chart_type.to_string())
                .or_insert(0) += 1;
        }

        let summary = ReportSummary {
            columns_analyzed: columns.len(),
            pairs_analyzed: pairs.len(),
            fallback_count: columns
                .iter()
                .chain(&pairs)
                .filter(|entry| entry.recommendation.is_fallback())
                .count(),
            warning_count: warnings.len(),
            chart_counts,
        };

        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: None,
            schema_version,
            dataset,
            target_rendering_libraries,
            summary,
            dataset_performance,
            columns,
            pairs,
            warnings,
        }
    }

    pub fn with_input_file(mut self, path: impl Into<String>) -> Self {
        self.input_file = Some(path.into());
        self
    }

    /// All entries, columns first.
    pub fn entries(&self) -> impl Iterator<Item = &ReportEntry> {
        self.columns.iter().chain(&self.pairs)
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Writes and renders [`AdvisorReport`]s.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    output_dir: PathBuf,
    output_name: Option<String>,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
            output_name: None,
        }
    }
}

impl ReportGenerator {
    /// Create a new ReportGenerator with custom output settings.
    pub fn new(output_dir: PathBuf, output_name: Option<String>) -> Self {
        Self {
            output_dir,
            output_name,
        }
    }

    /// Pretty-printed JSON of the report.
    pub fn to_json(report: &AdvisorReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    /// Write a report to a JSON file.
    ///
    /// The file is `<output_name>.json` when a name was configured, otherwise
    /// `<report_base_name>_charts.json`.
    pub fn write_report_to_file(
        &self,
        report: &AdvisorReport,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let file_name = match &self.output_name {
            Some(name) => format!("{name}.json"),
            None => format!("{report_base_name}_charts.json"),
        };
        let report_path = self.output_dir.join(file_name);
        let mut file = File::create(&report_path)?;
        file.write_all(Self::to_json(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }

    /// Plain-text table of the primary recommendation per entry.
    pub fn render_summary(report: &AdvisorReport) -> String {
        let mut out = String::new();
        let rule = "-".repeat(78);

        let _ = writeln!(
            out,
            "Dataset: {} rows x {} columns ({}, {} rendering)",
            report.dataset.row_count,
            report.dataset.column_count,
            report.dataset_performance.data_size.category,
            report.dataset_performance.rendering.technique
        );
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<30} {:<22} {:>6}  {:<16}",
            "Subject", "Chart", "Conf.", "Alternatives"
        );
        let _ = writeln!(out, "{rule}");

        for entry in report.entries() {
            let rec = &entry.recommendation;
            let alternatives: Vec<&str> = entry
                .ranking
                .entries
                .iter()
                .filter(|e| !e.is_primary)
                .map(|e| e.chart_type.as_str())
                .collect();
            let marker = if rec.is_fallback() { "*" } else { "" };
            let _ = writeln!(
                out,
                "{:<30} {:<22} {:>6}  {}",
                truncate_str(&entry.subject, 29),
                format!("{}{}", rec.chart_type, marker),
                rec.confidence.to_string(),
                alternatives.join(", ")
            );
        }
        let _ = writeln!(out, "{rule}");

        let summary = &report.summary;
        let _ = writeln!(
            out,
            "{} columns, {} pairs, {} fallbacks (*), {} warnings",
            summary.columns_analyzed,
            summary.pairs_analyzed,
            summary.fallback_count,
            summary.warning_count
        );

        out
    }
}

/// Truncate a string to max characters with ellipsis.
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChartAdvisor;
    use crate::types::{AnalysisInput, ColumnDataType, ColumnStatisticalProfile};

    fn report() -> AdvisorReport {
        let input = AnalysisInput {
            schema_version: 1,
            dataset: DatasetShape::new(200, 2),
            columns: vec![
                ColumnStatisticalProfile::new("price", ColumnDataType::NumericFloat, 200, 190)
                    .with_range(1.0, 99.0)
                    .with_statistics(0.1, 0.0, 0),
                ColumnStatisticalProfile::new("notes", ColumnDataType::Text, 200, 180),
            ],
            correlations: Vec::new(),
        };
        ChartAdvisor::default().analyze(&input).unwrap()
    }

    #[test]
    fn test_summary_counts() {
        let report = report();
        assert_eq!(report.summary.columns_analyzed, 2);
        assert_eq!(report.summary.pairs_analyzed, 0);
        assert_eq!(report.summary.fallback_count, 1);
        assert_eq!(report.summary.warning_count, 1);
        assert_eq!(report.summary.chart_counts.get("density_plot"), Some(&1));
    }

    #[test]
    fn test_render_summary_marks_fallbacks() {
        let text = ReportGenerator::render_summary(&report());
        assert!(text.contains("density_plot"));
        assert!(text.contains("bar_chart*"));
        assert!(text.contains("1 fallbacks"));
    }

    #[test]
    fn test_json_contains_schema_fields() {
        let json = ReportGenerator::to_json(&report().with_input_file("in.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["input_file"], "in.json");
        assert_eq!(value["columns"][0]["recommendation"]["chart_type"], "density_plot");
        assert_eq!(value["columns"][0]["ranking"]["entries"][0]["rank"], 1);
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = std::env::temp_dir().join(format!("lex_charts_report_{}", std::process::id()));
        let generator = ReportGenerator::new(dir.clone(), None);
        let path = generator.write_report_to_file(&report(), "sales").unwrap();

        assert!(path.ends_with("sales_charts.json"));
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"schema_version\": 1"));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a_very_long_column_name", 10), "a_very_...");
    }
}
