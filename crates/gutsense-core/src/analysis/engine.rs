//! Analysis Engine - orchestrates the full trigger-correlation pass
//!
//! A single `analyze` call runs every component over one entry snapshot and
//! assembles the composite report. The engine is pure: same entries and
//! reference instant in, same report out, every time.

use chrono::{Local, NaiveDateTime};

use crate::config::AnalysisConfig;
use crate::models::MealEntry;

use super::combinations::CombinationDetector;
use super::confidence::ConfidenceClassifier;
use super::food_safety::FoodSafetyClassifier;
use super::normalize;
use super::recommendations::RecommendationPlanner;
use super::streaks::SuccessAnalyzer;
use super::temporal::TemporalAnalyzer;
use super::types::{AnalysisReport, OverviewStats, RecentEntry};

/// The main analysis engine
pub struct AnalysisEngine {
    config: AnalysisConfig,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisEngine {
    /// Engine with default thresholds
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze against the current local wall clock.
    pub fn analyze(&self, entries: &[MealEntry]) -> AnalysisReport {
        self.analyze_at(entries, Local::now().naive_local())
    }

    /// Analyze against an explicit reference instant. Deterministic: day
    /// windows, streaks, and avoidance spans are all measured from `now`.
    pub fn analyze_at(&self, entries: &[MealEntry], now: NaiveDateTime) -> AnalysisReport {
        let completed = normalize::completed_entries(entries);
        tracing::debug!(
            raw = entries.len(),
            completed = completed.len(),
            "Normalized meal entries"
        );

        if completed.is_empty() {
            return AnalysisReport::default();
        }

        let recent = normalize::recent_window(&completed, now, self.config.lookback_days);

        let trigger_confidence = ConfidenceClassifier::new(&self.config).analyze(&completed);

        let safety = FoodSafetyClassifier::new(&self.config);
        let food_insights = safety.analyze(&completed);
        let trending_safe_foods = safety.trending_safe(&food_insights, &completed, now);

        let combinations = CombinationDetector::new(&self.config).analyze(&completed);

        let temporal = TemporalAnalyzer::new(&self.config);
        let time_patterns = temporal.time_patterns(&completed);
        let weekly_comparison = temporal.weekly_comparison(&completed, &recent, now);

        let success_metrics =
            SuccessAnalyzer::new(&self.config).success_metrics(&completed, &recent, now);

        let testing_recommendations = RecommendationPlanner::new(&self.config).plan(
            &trigger_confidence,
            &combinations,
            &completed,
            now,
        );

        let overview = self.overview(&completed, now);
        let recent_entries = self.recent_entries(&completed);

        tracing::debug!(
            triggers = trigger_confidence.len(),
            foods = food_insights.len(),
            combinations = combinations.len(),
            recommendations = testing_recommendations.len(),
            "Analysis complete"
        );

        AnalysisReport {
            trigger_confidence,
            food_insights,
            trending_safe_foods,
            combinations,
            weekly_comparison,
            time_patterns,
            success_metrics,
            testing_recommendations,
            overview,
            recent_entries,
        }
    }

    fn overview(&self, completed: &[MealEntry], now: NaiveDateTime) -> OverviewStats {
        let days_tracked = completed
            .first()
            .map(|e| (now.date() - e.created_at.date()).num_days().max(0) + 1)
            .unwrap_or(0);

        let high_bloating_count = completed
            .iter()
            .filter(|e| e.rating().is_some_and(|r| r >= self.config.high_min_rating))
            .count();
        let low_bloating_count = completed
            .iter()
            .filter(|e| {
                e.rating()
                    .is_some_and(|r| r <= self.config.comfortable_max_rating)
            })
            .count();

        OverviewStats {
            days_tracked,
            total_logs: completed.len(),
            avg_bloating: normalize::mean_rating(completed.iter()),
            high_bloating_count,
            low_bloating_count,
        }
    }

    /// Newest entries first, capped, in the compact shape the narrative
    /// payload needs.
    fn recent_entries(&self, completed: &[MealEntry]) -> Vec<RecentEntry> {
        completed
            .iter()
            .rev()
            .take(self.config.recent_entries_cap)
            .map(|entry| {
                let foods: Vec<String> = {
                    let mut seen: Vec<String> = Vec::new();
                    for trigger in &entry.detected_triggers {
                        let food = trigger.food.trim();
                        if !food.is_empty() && !seen.iter().any(|f| f.eq_ignore_ascii_case(food)) {
                            seen.push(food.to_string());
                        }
                    }
                    seen
                };

                let food = entry
                    .description
                    .as_deref()
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| {
                        if foods.is_empty() {
                            "Unlabeled meal".to_string()
                        } else {
                            foods.join(", ")
                        }
                    });

                let mut categories: Vec<_> = entry
                    .detected_triggers
                    .iter()
                    .map(|t| t.category)
                    .collect();
                categories.sort();
                categories.dedup();

                RecentEntry {
                    food,
                    trigger_categories: categories,
                    timestamp: entry.created_at,
                    bloat_rating: entry.rating().unwrap_or(0),
                    notes: entry.notes.clone(),
                }
            })
            .collect()
    }
}

/// One-shot analysis with default configuration and the local wall clock.
pub fn analyze(entries: &[MealEntry]) -> AnalysisReport {
    AnalysisEngine::new().analyze(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{fingerprint, TriggerCategory};
    use crate::test_utils::{aug_noon, entry_at};

    fn sample_entries() -> Vec<MealEntry> {
        vec![
            entry_at("a", aug_noon(1), 4, &[(TriggerCategory::Dairy, "Milk")]),
            entry_at("b", aug_noon(3), 5, &[(TriggerCategory::Dairy, "Cheese")]),
            entry_at("c", aug_noon(5), 2, &[]),
            entry_at("d", aug_noon(7), 1, &[]),
            entry_at("e", aug_noon(9), 4, &[(TriggerCategory::Dairy, "Milk")]),
        ]
    }

    #[test]
    fn test_analyze_empty_is_safe() {
        let report = AnalysisEngine::new().analyze_at(&[], aug_noon(1));

        assert!(report.trigger_confidence.is_empty());
        assert!(report.food_insights.is_empty());
        assert!(report.combinations.is_empty());
        assert!(report.testing_recommendations.is_empty());
        assert_eq!(report.overview.total_logs, 0);
        assert_eq!(report.overview.days_tracked, 0);
        assert_eq!(report.success_metrics.current_streak, 0);
    }

    #[test]
    fn test_determinism() {
        let entries = sample_entries();
        let engine = AnalysisEngine::new();

        let first = engine.analyze_at(&entries, aug_noon(10));
        let second = engine.analyze_at(&entries, aug_noon(10));

        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn test_order_independence() {
        let entries = sample_entries();
        let mut shuffled = entries.clone();
        shuffled.reverse();
        let engine = AnalysisEngine::new();

        let a = engine.analyze_at(&entries, aug_noon(10));
        let b = engine.analyze_at(&shuffled, aug_noon(10));

        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
        // Fingerprints differ by order, matching the caller-side memo
        // contract of hashing the snapshot as handed over
        assert_ne!(fingerprint(&entries), fingerprint(&shuffled));
    }

    #[test]
    fn test_overview_counts() {
        let report = AnalysisEngine::new().analyze_at(&sample_entries(), aug_noon(10));

        assert_eq!(report.overview.total_logs, 5);
        assert_eq!(report.overview.days_tracked, 10);
        assert_eq!(report.overview.high_bloating_count, 3);
        assert_eq!(report.overview.low_bloating_count, 2);
        assert!((report.overview.avg_bloating - 3.2).abs() < 1e-9);
    }

    #[test]
    fn test_recent_entries_newest_first_and_capped() {
        let config = AnalysisConfig {
            recent_entries_cap: 3,
            ..AnalysisConfig::default()
        };
        let report =
            AnalysisEngine::with_config(config).analyze_at(&sample_entries(), aug_noon(10));

        assert_eq!(report.recent_entries.len(), 3);
        assert_eq!(report.recent_entries[0].food, "Milk");
        assert_eq!(report.recent_entries[0].timestamp, aug_noon(9));
        assert!(report.recent_entries[0].timestamp > report.recent_entries[1].timestamp);
    }

    #[test]
    fn test_report_serializes_contract_field_names() {
        let report = AnalysisEngine::new().analyze_at(&sample_entries(), aug_noon(10));
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("triggerConfidence").is_some());
        assert!(json.get("foodInsights").is_some());
        assert!(json.get("combinations").is_some());
        assert!(json.get("weeklyComparison").is_some());
        assert!(json.get("successMetrics").is_some());
        assert!(json.get("testingRecommendations").is_some());
    }
}
