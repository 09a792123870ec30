//! Entry Normalizer
//!
//! Filters raw meal records into the analyzable subset every other component
//! works from. Pending entries, missing ratings, and out-of-range ratings
//! are dropped here so a single malformed entry never aborts analysis of
//! the rest.

use chrono::{Duration, NaiveDateTime};

use crate::models::MealEntry;

/// Completed, rated entries sorted by creation time ascending.
pub fn completed_entries(raw: &[MealEntry]) -> Vec<MealEntry> {
    let mut entries: Vec<MealEntry> = raw
        .iter()
        .filter(|e| e.is_analyzable())
        .cloned()
        .collect();
    entries.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    entries
}

/// Entries within the trailing `days` window ending at `now`, order
/// preserved. Pass already-normalized entries.
pub fn recent_window(completed: &[MealEntry], now: NaiveDateTime, days: i64) -> Vec<MealEntry> {
    let cutoff = now - Duration::days(days);
    completed
        .iter()
        .filter(|e| e.created_at >= cutoff)
        .cloned()
        .collect()
}

/// Mean rating over the given entries; 0.0 when empty.
pub(crate) fn mean_rating<'a, I>(entries: I) -> f64
where
    I: IntoIterator<Item = &'a MealEntry>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for entry in entries {
        if let Some(rating) = entry.rating() {
            sum += f64::from(rating);
            count += 1;
        }
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// `part / whole * 100`, rounded; 0 when `whole` is 0.
pub(crate) fn rounded_percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{entry, entry_at};
    use chrono::NaiveDate;

    fn noon(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_filters_and_sorts() {
        let mut pending = entry_at("p", noon(2), 3, &[]);
        pending.rating_status = crate::models::RatingStatus::Pending;

        let mut unrated = entry_at("u", noon(3), 3, &[]);
        unrated.bloating_rating = None;

        let mut out_of_range = entry_at("o", noon(4), 3, &[]);
        out_of_range.bloating_rating = Some(9);

        let raw = vec![
            entry_at("b", noon(5), 4, &[]),
            pending,
            entry_at("a", noon(1), 2, &[]),
            unrated,
            out_of_range,
        ];

        let completed = completed_entries(&raw);
        assert_eq!(completed.len(), 2);
        assert_eq!(completed[0].id, "a");
        assert_eq!(completed[1].id, "b");
    }

    #[test]
    fn test_empty_input() {
        assert!(completed_entries(&[]).is_empty());
        assert!(recent_window(&[], noon(10), 14).is_empty());
    }

    #[test]
    fn test_recent_window_bounds() {
        let completed = vec![
            entry_at("old", noon(1), 3, &[]),
            entry_at("edge", noon(6), 3, &[]),
            entry_at("new", noon(19), 3, &[]),
        ];

        let recent = recent_window(&completed, noon(20), 14);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, "edge");
        assert_eq!(recent[1].id, "new");
    }

    #[test]
    fn test_mean_rating() {
        let entries = vec![entry("a", 4), entry("b", 2)];
        assert!((mean_rating(entries.iter()) - 3.0).abs() < f64::EPSILON);
        assert_eq!(mean_rating(std::iter::empty::<&MealEntry>()), 0.0);
    }

    #[test]
    fn test_rounded_percentage() {
        assert_eq!(rounded_percentage(0, 0), 0);
        assert_eq!(rounded_percentage(1, 3), 33);
        assert_eq!(rounded_percentage(2, 3), 67);
        assert_eq!(rounded_percentage(3, 3), 100);
    }
}
