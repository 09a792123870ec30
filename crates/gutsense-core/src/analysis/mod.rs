//! Trigger Correlation & Confidence Engine
//!
//! The analytical core of Gutsense: a pure, synchronous transform from a
//! snapshot of logged meals into ranked trigger hypotheses, food safety
//! labels, combination effects, temporal patterns, streaks, and testing
//! recommendations. Confidence scales with sample size, every percentage is
//! well-defined down to zero observations, and identical input always
//! produces an identical report.
//!
//! ## Components
//!
//! - **Normalizer** - filters raw records into the analyzable subset
//! - **Confidence Classifier** - per-category stats and confidence tiers
//! - **Food Safety Classifier** - per-food safe/caution/danger labels
//! - **Combination Detector** - category pairs worse together than apart
//! - **Temporal Analyzer** - time-of-day patterns and weekly trend
//! - **Success Analyzer** - streaks and rolling improvement
//! - **Recommendation Planner** - ranked eliminate/reintroduce/monitor tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gutsense_core::analysis::AnalysisEngine;
//!
//! let engine = AnalysisEngine::new();
//! let report = engine.analyze(&entries);
//! ```

pub mod combinations;
pub mod confidence;
pub mod engine;
pub mod food_safety;
pub mod normalize;
pub mod recommendations;
pub mod streaks;
pub mod temporal;
pub mod types;

pub use combinations::CombinationDetector;
pub use confidence::ConfidenceClassifier;
pub use engine::{analyze, AnalysisEngine};
pub use food_safety::FoodSafetyClassifier;
pub use recommendations::RecommendationPlanner;
pub use streaks::SuccessAnalyzer;
pub use temporal::TemporalAnalyzer;
pub use types::{
    AnalysisReport, ConfidenceTier, FoodCombination, FoodInsight, ImpactBand, OverviewStats,
    Priority, RecentEntry, RecommendationType, SafetyLevel, SuccessMetrics,
    TestingRecommendation, TimeDistribution, TimeOfDay, TimePatterns, Trend,
    TriggerConfidenceLevel, WeeklyComparison,
};
