//! Ranking of a recommendation and its alternatives.
//!
//! The ranker is stateless: it flattens a [`ChartRecommendation`] into a
//! single ordered list and attaches the performance plan for the chosen chart.

use crate::performance::{PerformanceProfile, PerformanceRequest, PerformanceStrategyPlanner};
use crate::types::{ChartRecommendation, ChartType, Confidence, DatasetShape};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Default cap on alternatives kept per chart.
pub const DEFAULT_MAX_ALTERNATIVES: usize = 3;

/// One entry of a ranked list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedChart {
    /// 1-based position.
    pub rank: usize,
    pub chart_type: ChartType,
    pub confidence: Confidence,
    /// Justification for the primary, tradeoffs for alternatives.
    pub rationale: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecommendations {
    /// Column or column pair the list belongs to.
    pub subject: String,
    pub entries: Vec<RankedChart>,
    pub performance: PerformanceProfile,
}

impl RankedRecommendations {
    /// Highest-ranked entry.
    pub fn top(&self) -> Option<&RankedChart> {
        self.entries.first()
    }
}

/// Orders a primary recommendation and its alternatives.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationRanker {
    max_alternatives: usize,
    planner: PerformanceStrategyPlanner,
}

impl Default for RecommendationRanker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ALTERNATIVES, PerformanceStrategyPlanner::default())
    }
}

impl RecommendationRanker {
    pub fn new(max_alternatives: usize, planner: PerformanceStrategyPlanner) -> Self {
        Self {
            max_alternatives,
            planner,
        }
    }

    pub fn max_alternatives(&self) -> usize {
        self.max_alternatives
    }

    /// Rank `recommendation` for a dataset of the given shape.
    pub fn rank(
        &self,
        recommendation: &ChartRecommendation,
        shape: DatasetShape,
    ) -> RankedRecommendations {
        let mut alternatives: Vec<_> = recommendation.alternatives.iter().collect();
        // Stable sort keeps generation order among equal confidences.
        alternatives.sort_by(|a, b| by_confidence_desc(a.confidence, b.confidence));
        alternatives.truncate(self.max_alternatives);

        let mut entries = Vec::with_capacity(alternatives.len() + 1);
        entries.push(RankedChart {
            rank: 0,
            chart_type: recommendation.chart_type,
            confidence: recommendation.confidence,
            rationale: recommendation.justification.clone(),
            is_primary: true,
        });
        entries.extend(alternatives.into_iter().map(|alt| RankedChart {
            rank: 0,
            chart_type: alt.chart_type,
            confidence: alt.confidence,
            rationale: alt.tradeoffs.clone(),
            is_primary: false,
        }));

        // Primary sits first, so a stable sort keeps it ahead on ties.
        entries.sort_by(|a, b| by_confidence_desc(a.confidence, b.confidence));
        for (index, entry) in entries.iter_mut().enumerate() {
            entry.rank = index + 1;
        }

        let performance = self.planner.plan(
            &PerformanceRequest::new(shape)
                .with_chart(recommendation.chart_type)
                .with_interactions(recommendation.interactions.len() as u32),
        );

        let subject = recommendation.columns.join(" × ");
        debug!(
            "Ranked {} entries for '{}' (top: {})",
            entries.len(),
            subject,
            entries[0].chart_type
        );

        RankedRecommendations {
            subject,
            entries,
            performance,
        }
    }
}

fn by_confidence_desc(a: Confidence, b: Confidence) -> Ordering {
    b.value().total_cmp(&a.value())
}
