//! Configuration for the chart advisor.
//!
//! Use [`AdvisorConfig::builder()`] for a validated configuration with a
//! fluent API, or deserialize one from JSON and call
//! [`AdvisorConfig::validate`].

use crate::error::ChartError;
use crate::performance::DEFAULT_TARGET_POINTS;
use crate::ranking::DEFAULT_MAX_ALTERNATIVES;
use serde::{Deserialize, Serialize};

/// Upper bound for [`AdvisorConfig::max_alternatives_per_chart`].
pub const MAX_ALTERNATIVES_LIMIT: usize = 20;

/// Upper bound for [`AdvisorConfig::interaction_complexity`].
pub const MAX_INTERACTION_COMPLEXITY: u32 = 10;

/// Configuration for [`ChartAdvisor`](crate::ChartAdvisor).
///
/// # Example
///
/// ```rust,ignore
/// use lex_charts::config::AdvisorConfig;
///
/// let config = AdvisorConfig::builder()
///     .max_alternatives_per_chart(5)
///     .target_render_points(20_000)
///     .parallel_batches(false)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Most alternatives kept per recommendation after ranking (1 - 20).
    /// Default: 3
    pub max_alternatives_per_chart: usize,

    /// Rendering libraries the caller targets. Informational only; carried
    /// into reports but never consulted by the selectors.
    /// Default: empty
    pub target_rendering_libraries: Vec<String>,

    /// Number of points a chart should end up drawing. Drives the
    /// aggregation reduction factor.
    /// Default: 10,000
    pub target_render_points: u64,

    /// Interaction complexity used for the dataset-level performance plan
    /// (0 - 10).
    /// Default: 1
    pub interaction_complexity: u32,

    /// Request canvas rendering for the dataset-level plan regardless of
    /// volume.
    /// Default: false
    pub prefer_canvas: bool,

    /// Evaluate column and pair batches on the rayon thread pool.
    /// Default: true
    pub parallel_batches: bool,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            max_alternatives_per_chart: DEFAULT_MAX_ALTERNATIVES,
            target_rendering_libraries: Vec::new(),
            target_render_points: DEFAULT_TARGET_POINTS,
            interaction_complexity: 1,
            prefer_canvas: false,
            parallel_batches: true,
        }
    }
}

impl AdvisorConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AdvisorConfigBuilder {
        AdvisorConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(1..=MAX_ALTERNATIVES_LIMIT).contains(&self.max_alternatives_per_chart) {
            return Err(ConfigValidationError::InvalidMaxAlternatives(
                self.max_alternatives_per_chart,
            ));
        }

        if self.target_render_points == 0 {
            return Err(ConfigValidationError::InvalidTargetPoints);
        }

        if self.interaction_complexity > MAX_INTERACTION_COMPLEXITY {
            return Err(ConfigValidationError::InvalidInteractionComplexity(
                self.interaction_complexity,
            ));
        }

        if let Some(library) = self
            .target_rendering_libraries
            .iter()
            .find(|l| l.trim().is_empty())
        {
            return Err(ConfigValidationError::InvalidLibraryName(library.clone()));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid max_alternatives_per_chart: {0} (must be between 1 and 20)")]
    InvalidMaxAlternatives(usize),

    #[error("Invalid target_render_points: must be at least 1")]
    InvalidTargetPoints,

    #[error("Invalid interaction_complexity: {0} (must be at most 10)")]
    InvalidInteractionComplexity(u32),

    #[error("Invalid rendering library name: '{0}'")]
    InvalidLibraryName(String),
}

impl From<ConfigValidationError> for ChartError {
    fn from(err: ConfigValidationError) -> Self {
        ChartError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`AdvisorConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AdvisorConfigBuilder {
    max_alternatives_per_chart: Option<usize>,
    target_rendering_libraries: Option<Vec<String>>,
    target_render_points: Option<u64>,
    interaction_complexity: Option<u32>,
    prefer_canvas: Option<bool>,
    parallel_batches: Option<bool>,
}

impl AdvisorConfigBuilder {
    /// Set how many alternatives survive ranking.
    pub fn max_alternatives_per_chart(mut self, max: usize) -> Self {
        self.max_alternatives_per_chart = Some(max);
        self
    }

    /// Set the rendering libraries recorded in reports.
    pub fn target_rendering_libraries<I, S>(mut self, libraries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_rendering_libraries = Some(libraries.into_iter().map(Into::into).collect());
        self
    }

    /// Set the number of points a chart should draw after aggregation.
    pub fn target_render_points(mut self, points: u64) -> Self {
        self.target_render_points = Some(points);
        self
    }

    pub fn interaction_complexity(mut self, complexity: u32) -> Self {
        self.interaction_complexity = Some(complexity);
        self
    }

    pub fn prefer_canvas(mut self, prefer: bool) -> Self {
        self.prefer_canvas = Some(prefer);
        self
    }

    /// Enable or disable parallel batch evaluation.
    pub fn parallel_batches(mut self, parallel: bool) -> Self {
        self.parallel_batches = Some(parallel);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AdvisorConfig` or an error if validation fails.
    pub fn build(self) -> Result<AdvisorConfig, ConfigValidationError> {
        let defaults = AdvisorConfig::default();
        let config = AdvisorConfig {
            max_alternatives_per_chart: self
                .max_alternatives_per_chart
                .unwrap_or(defaults.max_alternatives_per_chart),
            target_rendering_libraries: self
                .target_rendering_libraries
                .unwrap_or(defaults.target_rendering_libraries),
            target_render_points: self
                .target_render_points
                .unwrap_or(defaults.target_render_points),
            interaction_complexity: self
                .interaction_complexity
                .unwrap_or(defaults.interaction_complexity),
            prefer_canvas: self.prefer_canvas.unwrap_or(defaults.prefer_canvas),
            parallel_batches: self.parallel_batches.unwrap_or(defaults.parallel_batches),
        };

        config.validate()?;
        Ok(config)
    }
}
