//! Food Safety Classifier
//!
//! Per-food (not per-category) safe/caution/danger labeling from the same
//! completed entries, plus a trending view of safe foods eaten recently.
//! Foods are grouped by trimmed, case-insensitive string; the first-seen
//! casing is reported.

use chrono::NaiveDateTime;
use std::collections::HashMap;

use crate::config::AnalysisConfig;
use crate::models::MealEntry;

use super::normalize::recent_window;
use super::types::{FoodInsight, SafetyLevel};

struct FoodGroup {
    display: String,
    ratings: Vec<u8>,
    first_seen: usize,
}

/// Classifier over distinct food strings
pub struct FoodSafetyClassifier<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> FoodSafetyClassifier<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Insights for every food observed at least `min_food_count` times,
    /// sorted by observation count descending (first-seen tie-break).
    pub fn analyze(&self, completed: &[MealEntry]) -> Vec<FoodInsight> {
        let groups = self.group_foods(completed);

        let mut insights: Vec<(usize, FoodInsight)> = groups
            .into_values()
            .filter(|g| g.ratings.len() >= self.config.min_food_count)
            .map(|g| {
                let count = g.ratings.len();
                let avg = g.ratings.iter().map(|&r| f64::from(r)).sum::<f64>() / count as f64;
                (
                    g.first_seen,
                    FoodInsight {
                        food: g.display,
                        count,
                        avg_bloating: avg,
                        safety_level: self.classify(avg, &g.ratings),
                    },
                )
            })
            .collect();

        insights.sort_by(|a, b| b.1.count.cmp(&a.1.count).then_with(|| a.0.cmp(&b.0)));

        tracing::debug!(foods = insights.len(), "Food safety classification complete");

        insights.into_iter().map(|(_, insight)| insight).collect()
    }

    /// Safe foods eaten within the trending window, ranked by recent count,
    /// truncated to the configured cap.
    pub fn trending_safe(
        &self,
        insights: &[FoodInsight],
        completed: &[MealEntry],
        now: NaiveDateTime,
    ) -> Vec<FoodInsight> {
        let recent = recent_window(completed, now, self.config.trending_window_days);

        let mut recent_counts: HashMap<String, usize> = HashMap::new();
        for entry in &recent {
            let mut seen: Vec<String> = Vec::new();
            for trigger in &entry.detected_triggers {
                let key = trigger.food.trim().to_lowercase();
                if key.is_empty() || seen.contains(&key) {
                    continue;
                }
                seen.push(key.clone());
                *recent_counts.entry(key).or_insert(0) += 1;
            }
        }

        let mut trending: Vec<(usize, usize, FoodInsight)> = insights
            .iter()
            .enumerate()
            .filter(|(_, i)| i.safety_level == SafetyLevel::Safe)
            .filter_map(|(position, insight)| {
                let key = insight.food.trim().to_lowercase();
                recent_counts
                    .get(&key)
                    .filter(|&&count| count >= 1)
                    .map(|&count| (count, position, insight.clone()))
            })
            .collect();

        trending.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        trending.truncate(self.config.trending_foods_cap);
        trending.into_iter().map(|(_, _, insight)| insight).collect()
    }

    fn group_foods(&self, completed: &[MealEntry]) -> HashMap<String, FoodGroup> {
        let mut groups: HashMap<String, FoodGroup> = HashMap::new();
        let mut order = 0usize;

        for entry in completed {
            let Some(rating) = entry.rating() else {
                continue;
            };
            let mut seen_in_entry: Vec<String> = Vec::new();
            for trigger in &entry.detected_triggers {
                let display = trigger.food.trim();
                if display.is_empty() {
                    continue;
                }
                let key = display.to_lowercase();
                if seen_in_entry.contains(&key) {
                    continue;
                }
                seen_in_entry.push(key.clone());

                if let Some(group) = groups.get_mut(&key) {
                    group.ratings.push(rating);
                } else {
                    groups.insert(
                        key,
                        FoodGroup {
                            display: display.to_string(),
                            ratings: vec![rating],
                            first_seen: order,
                        },
                    );
                    order += 1;
                }
            }
        }

        groups
    }

    /// Safe requires a low average *and* a dominant share of low
    /// observations; danger takes either a high average or a high share of
    /// high observations. The two can't both hold on a 1-5 scale.
    fn classify(&self, avg: f64, ratings: &[u8]) -> SafetyLevel {
        let count = ratings.len();
        let low_share = ratings
            .iter()
            .filter(|&&r| r <= self.config.comfortable_max_rating)
            .count() as f64
            / count as f64;
        let high_share = ratings
            .iter()
            .filter(|&&r| r >= self.config.high_min_rating)
            .count() as f64
            / count as f64;

        if avg <= f64::from(self.config.comfortable_max_rating)
            && low_share >= self.config.safe_low_share
        {
            SafetyLevel::Safe
        } else if avg >= self.config.high_avg_threshold
            || high_share >= self.config.danger_high_share
        {
            SafetyLevel::Danger
        } else {
            SafetyLevel::Caution
        }
    }
}
