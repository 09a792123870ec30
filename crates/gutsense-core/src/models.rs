//! Core data models for Gutsense
//!
//! The input side of the engine: meal entries as the persistence layer hands
//! them over, including the closed trigger-category enumeration that absorbs
//! arbitrary upstream classifier strings at the deserialization boundary.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Rating lifecycle state of a meal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingStatus {
    /// Logged but not yet rated
    Pending,
    /// Rated by the user; eligible for analysis
    Completed,
}

impl RatingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RatingStatus::Pending => "pending",
            RatingStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for RatingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RatingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RatingStatus::Pending),
            "completed" => Ok(RatingStatus::Completed),
            _ => Err(format!("Unknown rating status: {}", s)),
        }
    }
}

/// Known trigger classes, plus a fallback for anything the upstream
/// classifier emits that we don't recognize.
///
/// The set is closed so downstream components can match exhaustively;
/// unrecognized strings deserialize to [`TriggerCategory::Unknown`] instead
/// of failing the whole entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCategory {
    Dairy,
    Gluten,
    HighFat,
    Spicy,
    HighFodmap,
    Caffeine,
    Alcohol,
    ArtificialSweeteners,
    Legumes,
    Cruciferous,
    Citrus,
    Carbonated,
    #[serde(other)]
    Unknown,
}

impl TriggerCategory {
    /// The twelve known classes, in display priority order.
    pub const KNOWN: [TriggerCategory; 12] = [
        TriggerCategory::Dairy,
        TriggerCategory::Gluten,
        TriggerCategory::HighFat,
        TriggerCategory::Spicy,
        TriggerCategory::HighFodmap,
        TriggerCategory::Caffeine,
        TriggerCategory::Alcohol,
        TriggerCategory::ArtificialSweeteners,
        TriggerCategory::Legumes,
        TriggerCategory::Cruciferous,
        TriggerCategory::Citrus,
        TriggerCategory::Carbonated,
    ];

    /// All categories including the fallback, for exhaustive scans.
    pub const ALL: [TriggerCategory; 13] = [
        TriggerCategory::Dairy,
        TriggerCategory::Gluten,
        TriggerCategory::HighFat,
        TriggerCategory::Spicy,
        TriggerCategory::HighFodmap,
        TriggerCategory::Caffeine,
        TriggerCategory::Alcohol,
        TriggerCategory::ArtificialSweeteners,
        TriggerCategory::Legumes,
        TriggerCategory::Cruciferous,
        TriggerCategory::Citrus,
        TriggerCategory::Carbonated,
        TriggerCategory::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerCategory::Dairy => "dairy",
            TriggerCategory::Gluten => "gluten",
            TriggerCategory::HighFat => "high_fat",
            TriggerCategory::Spicy => "spicy",
            TriggerCategory::HighFodmap => "high_fodmap",
            TriggerCategory::Caffeine => "caffeine",
            TriggerCategory::Alcohol => "alcohol",
            TriggerCategory::ArtificialSweeteners => "artificial_sweeteners",
            TriggerCategory::Legumes => "legumes",
            TriggerCategory::Cruciferous => "cruciferous",
            TriggerCategory::Citrus => "citrus",
            TriggerCategory::Carbonated => "carbonated",
            TriggerCategory::Unknown => "unknown",
        }
    }

    /// Human-readable label for recommendations and narrative output.
    pub fn label(&self) -> &'static str {
        match self {
            TriggerCategory::Dairy => "Dairy",
            TriggerCategory::Gluten => "Gluten",
            TriggerCategory::HighFat => "High-fat foods",
            TriggerCategory::Spicy => "Spicy foods",
            TriggerCategory::HighFodmap => "High-FODMAP foods",
            TriggerCategory::Caffeine => "Caffeine",
            TriggerCategory::Alcohol => "Alcohol",
            TriggerCategory::ArtificialSweeteners => "Artificial sweeteners",
            TriggerCategory::Legumes => "Legumes",
            TriggerCategory::Cruciferous => "Cruciferous vegetables",
            TriggerCategory::Citrus => "Citrus",
            TriggerCategory::Carbonated => "Carbonated drinks",
            TriggerCategory::Unknown => "Other",
        }
    }
}

impl fmt::Display for TriggerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TriggerCategory {
    type Err = String;

    /// Parses a category key. Unrecognized strings fold into `Unknown`
    /// rather than erroring, matching the deserialization fallback.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "dairy" => TriggerCategory::Dairy,
            "gluten" => TriggerCategory::Gluten,
            "high_fat" => TriggerCategory::HighFat,
            "spicy" => TriggerCategory::Spicy,
            "high_fodmap" => TriggerCategory::HighFodmap,
            "caffeine" => TriggerCategory::Caffeine,
            "alcohol" => TriggerCategory::Alcohol,
            "artificial_sweeteners" => TriggerCategory::ArtificialSweeteners,
            "legumes" => TriggerCategory::Legumes,
            "cruciferous" => TriggerCategory::Cruciferous,
            "citrus" => TriggerCategory::Citrus,
            "carbonated" => TriggerCategory::Carbonated,
            _ => TriggerCategory::Unknown,
        })
    }
}

/// A single suspected trigger attached to an entry by the upstream detector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedTrigger {
    pub category: TriggerCategory,
    /// Free-text food name as the user logged it
    pub food: String,
    /// Detector's own 0-1 confidence, passed through untouched
    pub confidence: f64,
}

/// A logged meal as the persistence collaborator hands it over
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub rating_status: RatingStatus,
    /// 1-5 discomfort rating; absent until the user rates the meal
    #[serde(default)]
    pub bloating_rating: Option<u8>,
    #[serde(default)]
    pub detected_triggers: Vec<DetectedTrigger>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl MealEntry {
    /// Whether this entry participates in any statistic: completed and
    /// carrying an in-range rating. Out-of-range ratings are treated as
    /// malformed and excluded rather than clamped.
    pub fn is_analyzable(&self) -> bool {
        self.rating_status == RatingStatus::Completed
            && matches!(self.bloating_rating, Some(1..=5))
    }

    /// The validated rating, if present and in range.
    pub fn rating(&self) -> Option<u8> {
        self.bloating_rating.filter(|r| (1..=5).contains(r))
    }

    pub fn contains_category(&self, category: TriggerCategory) -> bool {
        self.detected_triggers.iter().any(|t| t.category == category)
    }
}

/// Content fingerprint of an entry snapshot.
///
/// Callers may use this as a memoization key: the engine is a pure function
/// of its input, so identical fingerprints yield identical reports.
pub fn fingerprint(entries: &[MealEntry]) -> String {
    let mut hasher = Sha256::new();
    for entry in entries {
        hasher.update(entry.id.as_bytes());
        hasher.update(entry.created_at.and_utc().timestamp().to_le_bytes());
        hasher.update(entry.rating_status.as_str().as_bytes());
        hasher.update([entry.bloating_rating.unwrap_or(0)]);
        for trigger in &entry.detected_triggers {
            hasher.update(trigger.category.as_str().as_bytes());
            hasher.update(trigger.food.as_bytes());
            hasher.update(trigger.confidence.to_bits().to_le_bytes());
        }
        if let Some(notes) = &entry.notes {
            hasher.update(notes.as_bytes());
        }
        if let Some(description) = &entry.description {
            hasher.update(description.as_bytes());
        }
    }
    hex::encode(hasher.finalize())
}
