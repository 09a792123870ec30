//! Temporal & Weekly Trend Analyzer
//!
//! Time-of-day distribution of high-bloating meals, the first-half versus
//! second-half trend over the recent window, and week-over-week comparison
//! with newly prominent categories.

use chrono::{NaiveDateTime, Timelike};

use crate::config::AnalysisConfig;
use crate::models::{MealEntry, TriggerCategory};

use super::normalize::{mean_rating, recent_window};
use super::types::{TimeDistribution, TimeOfDay, TimePatterns, Trend, WeeklyComparison};

/// Analyzer over the normalized entry set
pub struct TemporalAnalyzer<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> TemporalAnalyzer<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Tally high-bloating entries into wall-clock buckets. `worst_time` is
    /// the fullest bucket; ties resolve in fixed bucket order and an empty
    /// tally yields `None`.
    pub fn time_patterns(&self, completed: &[MealEntry]) -> TimePatterns {
        let mut distribution = TimeDistribution::default();

        for entry in completed {
            if entry
                .rating()
                .is_some_and(|r| r >= self.config.high_min_rating)
            {
                distribution.increment(TimeOfDay::from_hour(entry.created_at.hour()));
            }
        }

        let mut worst_time = None;
        let mut worst_count = 0usize;
        for bucket in TimeOfDay::ALL {
            let count = distribution.count(bucket);
            // Strictly greater keeps the earlier bucket on ties
            if count > worst_count {
                worst_count = count;
                worst_time = Some(bucket);
            }
        }

        TimePatterns {
            worst_time,
            distribution,
        }
    }

    /// This-week average versus overall, trend over the recent window, and
    /// categories whose recent share rose sharply against baseline.
    pub fn weekly_comparison(
        &self,
        completed: &[MealEntry],
        recent: &[MealEntry],
        now: NaiveDateTime,
    ) -> WeeklyComparison {
        let this_week = recent_window(completed, now, self.config.trending_window_days);

        WeeklyComparison {
            this_week_avg_bloating: mean_rating(this_week.iter()),
            overall_avg_bloating: mean_rating(completed.iter()),
            trend: self.trend(recent),
            new_patterns: self.new_patterns(completed, &this_week),
        }
    }

    /// Split the recent window into halves by index order and compare
    /// averages, with a dead-zone around zero. Fewer than four entries is
    /// not enough for a half-to-half comparison and reads as stable.
    fn trend(&self, recent: &[MealEntry]) -> Trend {
        if recent.len() < 4 {
            return Trend::Stable;
        }

        let mid = recent.len() / 2;
        let older = mean_rating(recent[..mid].iter());
        let newer = mean_rating(recent[mid..].iter());
        let delta = newer - older;

        if delta.abs() <= self.config.trend_dead_zone {
            Trend::Stable
        } else if delta < 0.0 {
            Trend::Improving
        } else {
            Trend::Worsening
        }
    }

    /// Categories whose frequency share in the trailing week is at least
    /// `new_pattern_ratio` times their all-time share, with at least two
    /// recent occurrences. Sorted by recent count descending.
    fn new_patterns(
        &self,
        completed: &[MealEntry],
        this_week: &[MealEntry],
    ) -> Vec<TriggerCategory> {
        if completed.is_empty() || this_week.is_empty() {
            return vec![];
        }

        let mut flagged: Vec<(usize, TriggerCategory)> = Vec::new();

        for category in TriggerCategory::ALL {
            let recent_count = this_week
                .iter()
                .filter(|e| e.contains_category(category))
                .count();
            if recent_count < 2 {
                continue;
            }

            let overall_count = completed
                .iter()
                .filter(|e| e.contains_category(category))
                .count();
            let recent_share = recent_count as f64 / this_week.len() as f64;
            let overall_share = overall_count as f64 / completed.len() as f64;

            if recent_share >= overall_share * self.config.new_pattern_ratio {
                flagged.push((recent_count, category));
            }
        }

        flagged.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then_with(|| a.1.as_str().cmp(b.1.as_str()))
        });
        flagged.into_iter().map(|(_, category)| category).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalize::completed_entries;
    use crate::test_utils::{aug_noon, entry_at};
    use chrono::NaiveDate;

    fn at_hour(id: &str, day: u32, hour: u32, rating: u8) -> MealEntry {
        entry_at(
            id,
            NaiveDate::from_ymd_opt(2026, 8, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            rating,
            &[],
        )
    }

    #[test]
    fn test_worst_time_and_distribution() {
        let config = AnalysisConfig::default();
        let entries = vec![
            at_hour("a", 1, 8, 4),
            at_hour("b", 2, 19, 5),
            at_hour("c", 3, 20, 4),
            at_hour("d", 4, 22, 5),
            at_hour("e", 5, 13, 2), // comfortable, ignored
        ];

        let patterns = TemporalAnalyzer::new(&config).time_patterns(&entries);

        assert_eq!(patterns.worst_time, Some(TimeOfDay::Evening));
        assert_eq!(patterns.distribution.morning, 1);
        assert_eq!(patterns.distribution.evening, 2);
        assert_eq!(patterns.distribution.night, 1);
        assert_eq!(patterns.distribution.afternoon, 0);
    }

    #[test]
    fn test_worst_time_tie_breaks_to_earlier_bucket() {
        let config = AnalysisConfig::default();
        let entries = vec![at_hour("a", 1, 8, 4), at_hour("b", 2, 22, 5)];

        let patterns = TemporalAnalyzer::new(&config).time_patterns(&entries);
        assert_eq!(patterns.worst_time, Some(TimeOfDay::Morning));
    }

    #[test]
    fn test_no_high_entries_no_worst_time() {
        let config = AnalysisConfig::default();
        let entries = vec![at_hour("a", 1, 8, 2), at_hour("b", 2, 19, 3)];

        let patterns = TemporalAnalyzer::new(&config).time_patterns(&entries);
        assert!(patterns.worst_time.is_none());
        assert_eq!(patterns.distribution.total(), 0);
    }

    #[test]
    fn test_improving_trend() {
        let config = AnalysisConfig::default();
        let recent: Vec<MealEntry> = [5u8, 4, 4, 2, 1, 1]
            .iter()
            .enumerate()
            .map(|(i, &r)| entry_at(&format!("e{}", i), aug_noon(10 + i as u32), r, &[]))
            .collect();

        let analyzer = TemporalAnalyzer::new(&config);
        let comparison = analyzer.weekly_comparison(&recent, &recent, aug_noon(16));
        assert_eq!(comparison.trend, Trend::Improving);
    }

    #[test]
    fn test_dead_zone_reads_stable() {
        let config = AnalysisConfig::default();
        // Halves average 3.0 vs 3.25: inside the 0.3 dead-zone
        let recent: Vec<MealEntry> = [3u8, 3, 3, 3, 3, 4, 3, 3]
            .iter()
            .enumerate()
            .map(|(i, &r)| entry_at(&format!("e{}", i), aug_noon(10 + i as u32), r, &[]))
            .collect();

        let analyzer = TemporalAnalyzer::new(&config);
        let comparison = analyzer.weekly_comparison(&recent, &recent, aug_noon(18));
        assert_eq!(comparison.trend, Trend::Stable);
    }

    #[test]
    fn test_worsening_trend() {
        let config = AnalysisConfig::default();
        let recent: Vec<MealEntry> = [1u8, 1, 2, 4, 5, 5]
            .iter()
            .enumerate()
            .map(|(i, &r)| entry_at(&format!("e{}", i), aug_noon(10 + i as u32), r, &[]))
            .collect();

        let analyzer = TemporalAnalyzer::new(&config);
        let comparison = analyzer.weekly_comparison(&recent, &recent, aug_noon(16));
        assert_eq!(comparison.trend, Trend::Worsening);
    }

    #[test]
    fn test_too_few_entries_stable() {
        let config = AnalysisConfig::default();
        let recent: Vec<MealEntry> = vec![
            entry_at("a", aug_noon(10), 5, &[]),
            entry_at("b", aug_noon(11), 1, &[]),
        ];

        let analyzer = TemporalAnalyzer::new(&config);
        let comparison = analyzer.weekly_comparison(&recent, &recent, aug_noon(12));
        assert_eq!(comparison.trend, Trend::Stable);
    }

    #[test]
    fn test_new_patterns_flags_recent_spike() {
        use crate::models::TriggerCategory::{Caffeine, Dairy};
        let config = AnalysisConfig::default();

        let mut raw: Vec<MealEntry> = Vec::new();
        // Dairy belongs to the baseline weeks only
        for day in [1u32, 5, 9] {
            raw.push(entry_at(
                &format!("d{}", day),
                aug_noon(day),
                3,
                &[(Dairy, "Milk")],
            ));
        }
        // Caffeine only shows up this week
        for day in [16u32, 18] {
            raw.push(entry_at(
                &format!("c{}", day),
                aug_noon(day),
                3,
                &[(Caffeine, "Espresso")],
            ));
        }

        let completed = completed_entries(&raw);
        let analyzer = TemporalAnalyzer::new(&config);
        let comparison = analyzer.weekly_comparison(&completed, &completed, aug_noon(19));

        assert!(comparison.new_patterns.contains(&Caffeine));
        assert!(!comparison.new_patterns.contains(&Dairy));
    }

    #[test]
    fn test_empty_input_defaults() {
        let config = AnalysisConfig::default();
        let analyzer = TemporalAnalyzer::new(&config);

        let comparison = analyzer.weekly_comparison(&[], &[], aug_noon(1));
        assert_eq!(comparison.this_week_avg_bloating, 0.0);
        assert_eq!(comparison.overall_avg_bloating, 0.0);
        assert_eq!(comparison.trend, Trend::Stable);
        assert!(comparison.new_patterns.is_empty());
    }
}
