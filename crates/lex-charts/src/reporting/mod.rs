//! Report generation module.
//!
//! [`AdvisorReport`] is the single document produced for a whole input. It is
//! used for:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//! - Programmatic access in library mode
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_charts::{AnalysisInput, ChartAdvisor};
//! use lex_charts::reporting::ReportGenerator;
//!
//! let input = AnalysisInput::from_json(&json)?;
//! let report = ChartAdvisor::default().analyze(&input)?;
//!
//! println!("{}", ReportGenerator::render_summary(&report));
//!
//! let generator = ReportGenerator::new(PathBuf::from("output"), None);
//! generator.write_report_to_file(&report, "sales")?;
//! ```

mod generator;

pub use generator::{AdvisorReport, ReportEntry, ReportGenerator, ReportSummary};
