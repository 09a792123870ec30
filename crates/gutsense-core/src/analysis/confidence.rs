//! Trigger Frequency & Confidence Classifier
//!
//! Per-category occurrence counts, with/without discomfort averages, the
//! differential impact score used for ranking and coloring, and a coarse
//! confidence tier that scales with sample size only.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::config::AnalysisConfig;
use crate::models::{MealEntry, TriggerCategory};

use super::normalize::{mean_rating, rounded_percentage};
use super::types::{ConfidenceTier, ImpactBand, TriggerConfidenceLevel};

/// Classifier over the normalized entry set
pub struct ConfidenceClassifier<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> ConfidenceClassifier<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// One row per category with at least one occurrence, sorted by impact
    /// score descending (category key as tie-break).
    pub fn analyze(&self, completed: &[MealEntry]) -> Vec<TriggerConfidenceLevel> {
        let total = completed.len();
        let mut levels = Vec::new();

        for category in TriggerCategory::ALL {
            let (with, without): (Vec<&MealEntry>, Vec<&MealEntry>) = completed
                .iter()
                .partition(|e| e.contains_category(category));

            let occurrences = with.len();
            if occurrences == 0 {
                continue;
            }

            let avg_with = mean_rating(with.iter().copied());
            let avg_without = mean_rating(without.iter().copied());
            let impact_score = avg_with - avg_without;
            let confidence = self.tier(occurrences);

            levels.push(TriggerConfidenceLevel {
                category,
                occurrences,
                avg_bloating_with: avg_with,
                avg_bloating_without: avg_without,
                impact_score,
                percentage: rounded_percentage(occurrences, total),
                confidence,
                confidence_percentage: confidence.display_percentage(),
                impact_band: ImpactBand::for_score(impact_score, self.config),
                risk_percentage: risk_percentage(avg_with),
                top_foods: self.top_foods(category, &with),
            });
        }

        levels.sort_by(|a, b| {
            b.impact_score
                .partial_cmp(&a.impact_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.category.as_str().cmp(b.category.as_str()))
        });

        tracing::debug!(
            categories = levels.len(),
            entries = total,
            "Trigger confidence classification complete"
        );

        levels
    }

    /// Tier is a total function of occurrence count; boundaries are
    /// inclusive on the lower bound of the next tier.
    pub fn tier(&self, occurrences: usize) -> ConfidenceTier {
        if occurrences >= self.config.high_confidence_min_occurrences {
            ConfidenceTier::High
        } else if occurrences >= self.config.investigating_min_occurrences {
            ConfidenceTier::Investigating
        } else {
            ConfidenceTier::NeedsData
        }
    }

    /// Distinct foods tagged under `category` across the containing entries,
    /// counted once per entry, ordered by descending frequency with
    /// first-seen order breaking ties.
    fn top_foods(&self, category: TriggerCategory, containing: &[&MealEntry]) -> Vec<String> {
        struct FoodStat {
            display: String,
            count: usize,
            first_seen: usize,
        }

        let mut stats: HashMap<String, FoodStat> = HashMap::new();
        let mut order = 0usize;

        for entry in containing {
            let mut seen_in_entry: Vec<String> = Vec::new();
            for trigger in &entry.detected_triggers {
                if trigger.category != category {
                    continue;
                }
                let display = trigger.food.trim();
                if display.is_empty() {
                    continue;
                }
                let key = display.to_lowercase();
                if seen_in_entry.contains(&key) {
                    continue;
                }
                seen_in_entry.push(key.clone());

                if let Some(stat) = stats.get_mut(&key) {
                    stat.count += 1;
                } else {
                    stats.insert(
                        key,
                        FoodStat {
                            display: display.to_string(),
                            count: 1,
                            first_seen: order,
                        },
                    );
                    order += 1;
                }
            }
        }

        let mut ranked: Vec<FoodStat> = stats.into_values().collect();
        ranked.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.first_seen.cmp(&b.first_seen))
        });
        ranked.truncate(self.config.top_foods_cap);
        ranked.into_iter().map(|s| s.display).collect()
    }
}

/// `avg_with / 5 * 100`, clamped to [0, 100].
fn risk_percentage(avg_with: f64) -> u32 {
    (avg_with / 5.0 * 100.0).round().clamp(0.0, 100.0) as u32
}
