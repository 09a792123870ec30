//! Gutsense Core Library
//!
//! Shared functionality for the Gutsense meal and symptom tracker:
//! - Meal entry data model with a closed trigger-category enumeration
//! - Trigger correlation and confidence engine (pure `entries -> report`)
//! - Food safety classification and combination detection
//! - Temporal patterns, streaks, and success metrics
//! - Testing recommendation planner
//! - Narrative payload assembly for the external summary service
//!
//! The engine is deterministic, synchronous, and side-effect-free: it owns
//! no storage and performs no I/O. Callers re-run [`analysis::analyze`] (or
//! an [`analysis::AnalysisEngine`]) whenever the entry set changes, and may
//! memoize on [`models::fingerprint`].

pub mod analysis;
pub mod config;
pub mod error;
pub mod models;
pub mod narrative;

#[cfg(test)]
pub mod test_utils;

pub use analysis::{
    analyze, AnalysisEngine, AnalysisReport, ConfidenceTier, FoodCombination, FoodInsight,
    ImpactBand, OverviewStats, Priority, RecentEntry, RecommendationType, SafetyLevel,
    SuccessMetrics, TestingRecommendation, TimeDistribution, TimeOfDay, TimePatterns, Trend,
    TriggerConfidenceLevel, WeeklyComparison,
};
pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use models::{fingerprint, DetectedTrigger, MealEntry, RatingStatus, TriggerCategory};
pub use narrative::{
    IdentifiedTrigger, MemoryNarrativeCache, NarrativeCache, NarrativeFoodEntry,
    NarrativePayload, NarrativeTimePatterns,
};
