//! Narrative payload assembly
//!
//! Builds the compact, one-way payload an external narrative-generation
//! service consumes. Everything here is derived from an already-computed
//! [`AnalysisReport`]; entries are never re-scanned. Caching of the
//! generated narrative belongs to the caller, via [`NarrativeCache`].

use chrono::{Duration, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::analysis::types::{AnalysisReport, ConfidenceTier, TimeDistribution};
use crate::error::Result;

/// Triggers carried on the payload; the service wants the signal, not the
/// long tail
const IDENTIFIED_TRIGGERS_CAP: usize = 5;

/// One logged meal in the outbound shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeFoodEntry {
    pub food: String,
    pub trigger_categories: Vec<String>,
    pub timestamp: NaiveDateTime,
    pub bloat_rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A trigger hypothesis in the outbound shape; `confidence` is the display
/// mapping expressed as a 0-1 fraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifiedTrigger {
    pub category: String,
    pub confidence: f64,
    pub avg_rating: f64,
    pub occurrences: usize,
    pub common_foods: Vec<String>,
}

/// Time-of-day section of the payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeTimePatterns {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worst_time: Option<String>,
    pub distribution: TimeDistribution,
}

/// The full outbound payload, serialized in snake_case per the service
/// contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativePayload {
    pub days_tracked: i64,
    pub total_logs: usize,
    pub food_entries: Vec<NarrativeFoodEntry>,
    pub identified_triggers: Vec<IdentifiedTrigger>,
    pub time_patterns: NarrativeTimePatterns,
    pub avg_bloating: f64,
    pub high_bloating_count: usize,
    pub low_bloating_count: usize,
}

impl NarrativePayload {
    /// Derive the payload from a finished report.
    pub fn from_report(report: &AnalysisReport) -> Self {
        let food_entries = report
            .recent_entries
            .iter()
            .map(|entry| NarrativeFoodEntry {
                food: entry.food.clone(),
                trigger_categories: entry
                    .trigger_categories
                    .iter()
                    .map(|c| c.as_str().to_string())
                    .collect(),
                timestamp: entry.timestamp,
                bloat_rating: entry.bloat_rating,
                notes: entry.notes.clone(),
            })
            .collect();

        let identified_triggers = report
            .trigger_confidence
            .iter()
            .filter(|level| level.confidence != ConfidenceTier::NeedsData)
            .take(IDENTIFIED_TRIGGERS_CAP)
            .map(|level| IdentifiedTrigger {
                category: level.category.as_str().to_string(),
                confidence: f64::from(level.confidence_percentage) / 100.0,
                avg_rating: level.avg_bloating_with,
                occurrences: level.occurrences,
                common_foods: level.top_foods.clone(),
            })
            .collect();

        Self {
            days_tracked: report.overview.days_tracked,
            total_logs: report.overview.total_logs,
            food_entries,
            identified_triggers,
            time_patterns: NarrativeTimePatterns {
                worst_time: report
                    .time_patterns
                    .worst_time
                    .map(|t| t.as_str().to_string()),
                distribution: report.time_patterns.distribution.clone(),
            },
            avg_bloating: report.overview.avg_bloating,
            high_bloating_count: report.overview.high_bloating_count,
            low_bloating_count: report.overview.low_bloating_count,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Caller-owned cache for generated narratives.
///
/// The engine never reads or writes persistent storage; whoever calls the
/// narrative service decides how long a generated narrative stays fresh and
/// keys it however suits them (a day stamp, or [`crate::models::fingerprint`]
/// of the entry snapshot).
pub trait NarrativeCache {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: String, ttl: Duration);
}

/// In-memory TTL cache, suitable for a single app session.
#[derive(Default)]
pub struct MemoryNarrativeCache {
    entries: Mutex<HashMap<String, (String, NaiveDateTime)>>,
}

impl MemoryNarrativeCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NarrativeCache for MemoryNarrativeCache {
    fn get(&self, key: &str) -> Option<String> {
        let now = Local::now().naive_local();
        let Ok(entries) = self.entries.lock() else {
            return None;
        };
        entries
            .get(key)
            .filter(|(_, expires_at)| *expires_at > now)
            .map(|(value, _)| value.clone())
    }

    fn put(&self, key: &str, value: String, ttl: Duration) {
        let expires_at = Local::now().naive_local() + ttl;
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), (value, expires_at));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisEngine;
    use crate::models::TriggerCategory;
    use crate::test_utils::{aug_noon, entry_at};

    fn sample_report() -> AnalysisReport {
        let entries = vec![
            entry_at("a", aug_noon(1), 4, &[(TriggerCategory::Dairy, "Milk")]),
            entry_at("b", aug_noon(2), 5, &[(TriggerCategory::Dairy, "Cheese")]),
            entry_at("c", aug_noon(3), 1, &[]),
            entry_at("d", aug_noon(4), 2, &[]),
        ];
        AnalysisEngine::new().analyze_at(&entries, aug_noon(5))
    }

    #[test]
    fn test_payload_from_report() {
        let payload = NarrativePayload::from_report(&sample_report());

        assert_eq!(payload.total_logs, 4);
        assert_eq!(payload.days_tracked, 5);
        assert_eq!(payload.food_entries.len(), 4);
        assert_eq!(payload.high_bloating_count, 2);
        assert_eq!(payload.low_bloating_count, 2);

        assert_eq!(payload.identified_triggers.len(), 1);
        let dairy = &payload.identified_triggers[0];
        assert_eq!(dairy.category, "dairy");
        assert_eq!(dairy.occurrences, 2);
        assert!(dairy.confidence > 0.0 && dairy.confidence <= 1.0);
        assert!((dairy.avg_rating - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_needs_data_triggers_excluded() {
        let entries = vec![entry_at(
            "g",
            aug_noon(1),
            5,
            &[(TriggerCategory::Gluten, "Bread")],
        )];
        let report = AnalysisEngine::new().analyze_at(&entries, aug_noon(2));
        let payload = NarrativePayload::from_report(&report);

        assert!(payload.identified_triggers.is_empty());
    }

    #[test]
    fn test_payload_serializes_snake_case() {
        let payload = NarrativePayload::from_report(&sample_report());
        let json = serde_json::to_value(&payload).unwrap();

        assert!(json.get("days_tracked").is_some());
        assert!(json.get("identified_triggers").is_some());
        assert!(json.get("time_patterns").is_some());
        assert!(json["food_entries"][0].get("bloat_rating").is_some());
    }

    #[test]
    fn test_memory_cache_roundtrip() {
        let cache = MemoryNarrativeCache::new();
        assert!(cache.get("2026-08-30").is_none());

        cache.put("2026-08-30", "narrative text".to_string(), Duration::hours(24));
        assert_eq!(cache.get("2026-08-30").as_deref(), Some("narrative text"));
    }

    #[test]
    fn test_memory_cache_expiry() {
        let cache = MemoryNarrativeCache::new();
        cache.put("stale", "old".to_string(), Duration::seconds(-1));
        assert!(cache.get("stale").is_none());
    }
}
