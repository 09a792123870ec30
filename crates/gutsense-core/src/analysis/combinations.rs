//! Combination Detector
//!
//! Finds unordered category pairs whose joint average discomfort exceeds
//! their separate averages. Quadratic in the category count, which is fixed
//! and small; linear passes over entries dominate in practice.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::config::AnalysisConfig;
use crate::models::{MealEntry, TriggerCategory};

use super::normalize::mean_rating;
use super::types::FoodCombination;

/// Detector over the normalized entry set
pub struct CombinationDetector<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> CombinationDetector<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Pairs with enough co-occurrences and a positive together-vs-separate
    /// margin, sorted by margin descending (pair keys as tie-break).
    pub fn analyze(&self, completed: &[MealEntry]) -> Vec<FoodCombination> {
        // Categories actually present; BTreeSet gives a deterministic order
        let present: Vec<TriggerCategory> = completed
            .iter()
            .flat_map(|e| e.detected_triggers.iter().map(|t| t.category))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut combinations = Vec::new();

        for (i, &a) in present.iter().enumerate() {
            for &b in &present[i + 1..] {
                let mut together: Vec<&MealEntry> = Vec::new();
                let mut separate: Vec<&MealEntry> = Vec::new();

                for entry in completed {
                    let has_a = entry.contains_category(a);
                    let has_b = entry.contains_category(b);
                    if has_a && has_b {
                        together.push(entry);
                    } else if has_a || has_b {
                        separate.push(entry);
                    }
                }

                if together.len() < self.config.min_combination_occurrences {
                    continue;
                }

                let avg_together = mean_rating(together.iter().copied());
                let avg_separate = mean_rating(separate.iter().copied());
                if avg_together <= avg_separate {
                    continue;
                }

                combinations.push(FoodCombination {
                    triggers: [a, b],
                    occurrences: together.len(),
                    avg_bloating_together: avg_together,
                    avg_bloating_separate: avg_separate,
                });
            }
        }

        combinations.sort_by(|x, y| {
            y.margin()
                .partial_cmp(&x.margin())
                .unwrap_or(Ordering::Equal)
                .then_with(|| x.triggers[0].as_str().cmp(y.triggers[0].as_str()))
                .then_with(|| x.triggers[1].as_str().cmp(y.triggers[1].as_str()))
        });

        tracing::debug!(pairs = combinations.len(), "Combination detection complete");

        combinations
    }
}
