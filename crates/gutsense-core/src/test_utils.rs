//! Shared builders for unit tests

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{DetectedTrigger, MealEntry, RatingStatus, TriggerCategory};

/// A completed entry at a fixed timestamp with no triggers.
pub fn entry(id: &str, rating: u8) -> MealEntry {
    entry_at(
        id,
        NaiveDate::from_ymd_opt(2026, 8, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        rating,
        &[],
    )
}

/// A completed entry with explicit timestamp and (category, food) tags.
pub fn entry_at(
    id: &str,
    created_at: NaiveDateTime,
    rating: u8,
    triggers: &[(TriggerCategory, &str)],
) -> MealEntry {
    MealEntry {
        id: id.to_string(),
        created_at,
        rating_status: RatingStatus::Completed,
        bloating_rating: Some(rating),
        detected_triggers: triggers
            .iter()
            .map(|(category, food)| DetectedTrigger {
                category: *category,
                food: (*food).to_string(),
                confidence: 0.8,
            })
            .collect(),
        notes: None,
        description: None,
    }
}

/// Noon on the given day of August 2026; shorthand for date-window tests.
pub fn aug_noon(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, day)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}
