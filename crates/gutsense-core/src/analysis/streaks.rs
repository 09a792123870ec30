//! Streak & Success Metrics
//!
//! Consecutive comfortable meals, all-time longest run, and rolling
//! improvement over the recent window. All aggregates degrade to zero on
//! empty input.

use chrono::{Duration, NaiveDateTime};

use crate::config::AnalysisConfig;
use crate::models::MealEntry;

use super::normalize::mean_rating;
use super::types::SuccessMetrics;

/// Analyzer over the normalized (chronologically sorted) entry set
pub struct SuccessAnalyzer<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> SuccessAnalyzer<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn success_metrics(
        &self,
        completed: &[MealEntry],
        recent: &[MealEntry],
        now: NaiveDateTime,
    ) -> SuccessMetrics {
        let comfortable =
            |e: &MealEntry| e.rating().is_some_and(|r| r <= self.config.comfortable_max_rating);

        let current_streak = completed
            .iter()
            .rev()
            .take_while(|e| comfortable(*e))
            .count();

        let mut longest_streak = 0usize;
        let mut run = 0usize;
        for entry in completed {
            if comfortable(entry) {
                run += 1;
                longest_streak = longest_streak.max(run);
            } else {
                run = 0;
            }
        }

        let comfortable_meal_rate = share(recent, |e| comfortable(e));
        let trigger_avoidance_rate = share(recent, |e| e.detected_triggers.is_empty());

        let current_avg = mean_rating(recent.iter());
        let all_time_avg = mean_rating(completed.iter());

        // Positive when recent discomfort is below the all-time average
        let improvement_percentage = if all_time_avg > 0.0 && !recent.is_empty() {
            (all_time_avg - current_avg) / all_time_avg * 100.0
        } else {
            0.0
        };

        // The equal-length period just before the recent window
        let window_start = now - Duration::days(self.config.lookback_days);
        let previous_start = window_start - Duration::days(self.config.lookback_days);
        let previous: Vec<&MealEntry> = completed
            .iter()
            .filter(|e| e.created_at >= previous_start && e.created_at < window_start)
            .collect();

        SuccessMetrics {
            comfortable_meal_rate,
            trigger_avoidance_rate,
            current_streak,
            longest_streak,
            improvement_percentage,
            current_avg_bloating: current_avg,
            previous_period_avg_bloating: mean_rating(previous.into_iter()),
        }
    }
}

/// Share of entries matching the predicate, as a 0-100 percentage.
fn share<F>(entries: &[MealEntry], predicate: F) -> f64
where
    F: Fn(&MealEntry) -> bool,
{
    if entries.is_empty() {
        return 0.0;
    }
    entries.iter().filter(|e| predicate(e)).count() as f64 / entries.len() as f64 * 100.0
}
