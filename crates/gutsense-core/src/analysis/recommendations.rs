//! Recommendation Generator
//!
//! Turns classifier and combination output into ranked "test next" actions.
//! High-confidence, high-impact categories get elimination tests; categories
//! already avoided for a stretch get reintroduction tests; forming patterns
//! get monitoring. Ordering is deterministic: priority, then impact, then
//! name.

use chrono::NaiveDateTime;
use std::cmp::Ordering;

use crate::config::AnalysisConfig;
use crate::models::{MealEntry, TriggerCategory};

use super::types::{
    ConfidenceTier, FoodCombination, ImpactBand, Priority, RecommendationType,
    TestingRecommendation, TriggerConfidenceLevel,
};

/// Planner over classifier and combination output
pub struct RecommendationPlanner<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> RecommendationPlanner<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// At most `max_recommendations` actions. A needs-data category never
    /// drives a recommendation.
    pub fn plan(
        &self,
        levels: &[TriggerConfidenceLevel],
        combinations: &[FoodCombination],
        completed: &[MealEntry],
        now: NaiveDateTime,
    ) -> Vec<TestingRecommendation> {
        // Carry the impact score alongside for the final ordering
        let mut ranked: Vec<(f64, TestingRecommendation)> = Vec::new();

        for level in levels {
            let days_avoided = self.days_since_last(level.category, completed, now);

            match level.confidence {
                ConfidenceTier::High
                    if matches!(level.impact_band, ImpactBand::High | ImpactBand::Moderate) =>
                {
                    if days_avoided >= self.config.reintroduce_after_days {
                        ranked.push((
                            level.impact_score,
                            TestingRecommendation {
                                food: self.subject(level),
                                action: RecommendationType::Reintroduce,
                                priority: Priority::Medium,
                                reason: format!(
                                    "Avoided for {} days. Reintroduce once to confirm it was the trigger",
                                    days_avoided
                                ),
                                days_avoided: Some(days_avoided),
                            },
                        ));
                    } else {
                        let priority = if level.impact_band == ImpactBand::High {
                            Priority::High
                        } else {
                            Priority::Medium
                        };
                        ranked.push((
                            level.impact_score,
                            TestingRecommendation {
                                food: self.subject(level),
                                action: RecommendationType::Eliminate,
                                priority,
                                reason: format!(
                                    "Rated {:.1} on average with {} vs {:.1} without, across {} meals",
                                    level.avg_bloating_with,
                                    level.category.label().to_lowercase(),
                                    level.avg_bloating_without,
                                    level.occurrences
                                ),
                                days_avoided: None,
                            },
                        ));
                    }
                }
                ConfidenceTier::Investigating if level.impact_score > 0.0 => {
                    let priority = if level.impact_score >= self.config.impact_moderate {
                        Priority::Medium
                    } else {
                        Priority::Low
                    };
                    ranked.push((
                        level.impact_score,
                        TestingRecommendation {
                            food: self.subject(level),
                            action: RecommendationType::Monitor,
                            priority,
                            reason: format!(
                                "Only {} meals logged with {}. Keep logging to firm up the pattern",
                                level.occurrences,
                                level.category.label().to_lowercase()
                            ),
                            days_avoided: None,
                        },
                    ));
                }
                _ => {}
            }
        }

        // Surface the strongest combination as a monitoring target
        if let Some(combo) = combinations.first() {
            ranked.push((
                combo.margin(),
                TestingRecommendation {
                    food: format!(
                        "{} + {}",
                        combo.triggers[0].label(),
                        combo.triggers[1].label()
                    ),
                    action: RecommendationType::Monitor,
                    priority: Priority::Medium,
                    reason: format!(
                        "Rated {:.1} together vs {:.1} apart across {} meals",
                        combo.avg_bloating_together, combo.avg_bloating_separate, combo.occurrences
                    ),
                    days_avoided: None,
                },
            ));
        }

        ranked.sort_by(|(impact_a, a), (impact_b, b)| {
            b.priority
                .rank()
                .cmp(&a.priority.rank())
                .then_with(|| impact_b.partial_cmp(impact_a).unwrap_or(Ordering::Equal))
                .then_with(|| a.food.cmp(&b.food))
        });
        ranked.truncate(self.config.max_recommendations);

        tracing::debug!(recommendations = ranked.len(), "Recommendation planning complete");

        ranked.into_iter().map(|(_, rec)| rec).collect()
    }

    /// What to name in the recommendation: the category's most frequent
    /// food when one exists, else the category label.
    fn subject(&self, level: &TriggerConfidenceLevel) -> String {
        level
            .top_foods
            .first()
            .cloned()
            .unwrap_or_else(|| level.category.label().to_string())
    }

    /// Whole days since the most recent entry containing the category;
    /// 0 when the category has never been seen (nothing to reintroduce).
    fn days_since_last(
        &self,
        category: TriggerCategory,
        completed: &[MealEntry],
        now: NaiveDateTime,
    ) -> i64 {
        completed
            .iter()
            .rev()
            .find(|e| e.contains_category(category))
            .map(|e| (now.date() - e.created_at.date()).num_days().max(0))
            .unwrap_or(0)
    }
}
