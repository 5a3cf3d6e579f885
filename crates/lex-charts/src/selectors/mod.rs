//! Chart type selection for single columns and column pairs.
//!
//! Both selectors are rule tables over pre-computed statistics. When the
//! statistics a rule needs are missing, the rule still runs on documented
//! defaults, but the result is downgraded to a fallback: confidence
//! [`Confidence::FALLBACK`] and a justification starting with
//! [`INCOMPLETE_ANALYSIS_NOTE`].

mod bivariate;
mod univariate;

pub use bivariate::BivariateChartSelector;
pub use univariate::UnivariateChartSelector;

use crate::types::{
    AlternativeOption, AnalysisWarning, ChartType, Confidence, INCOMPLETE_ANALYSIS_NOTE,
};
use tracing::warn;

/// Alternatives of a fallback keep this share of their nominal confidence.
const FALLBACK_ALTERNATIVE_WEIGHT: f64 = 0.5;

/// Outcome of a rule table before it is dressed up as a recommendation.
#[derive(Debug, Clone)]
pub(crate) struct Decision {
    pub chart_type: ChartType,
    pub confidence: f64,
    pub justification: String,
}

impl Decision {
    pub fn new(chart_type: ChartType, confidence: f64, justification: impl Into<String>) -> Self {
        Self {
            chart_type,
            confidence,
            justification: justification.into(),
        }
    }

    /// Downgrade to a fallback when the analysis ran on defaults.
    pub fn degrade_if(self, incomplete: bool, detail: &str) -> Self {
        if !incomplete {
            return self;
        }
        Self {
            chart_type: self.chart_type,
            confidence: Confidence::FALLBACK.value(),
            justification: format!(
                "{}: {} {}",
                INCOMPLETE_ANALYSIS_NOTE, detail, self.justification
            ),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.justification.starts_with(INCOMPLETE_ANALYSIS_NOTE)
    }
}

/// Drop alternatives equal to the chosen chart and weaken them for fallbacks.
pub(crate) fn finalize_alternatives(
    decision: &Decision,
    alternatives: Vec<AlternativeOption>,
) -> Vec<AlternativeOption> {
    alternatives
        .into_iter()
        .filter(|alt| alt.chart_type != decision.chart_type)
        .map(|alt| {
            if decision.is_fallback() {
                AlternativeOption {
                    confidence: Confidence::new(
                        alt.confidence.value() * FALLBACK_ALTERNATIVE_WEIGHT,
                    ),
                    ..alt
                }
            } else {
                alt
            }
        })
        .collect()
}

pub(crate) fn log_warnings(warnings: &[AnalysisWarning]) {
    for warning in warnings {
        warn!("{} ({:?}): {}", warning.subject, warning.kind, warning.message);
    }
}
