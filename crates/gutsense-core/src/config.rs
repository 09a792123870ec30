//! Analysis configuration
//!
//! Every threshold the engine uses lives here, declared once so severity
//! bands, comfort thresholds, and tier boundaries are testable independently
//! of rendering. UI legends depend on the defaults below; changing them is a
//! contract change for consumers.

/// Tunable thresholds and caps for the analysis engine.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// A rating at or below this is a "comfortable" meal (default 2)
    pub comfortable_max_rating: u8,
    /// A rating at or above this is a "high bloating" meal (default 4)
    pub high_min_rating: u8,
    /// Average rating at or above this marks a food as high on its own
    /// (default 3.5); used alongside the per-observation high share
    pub high_avg_threshold: f64,
    /// Share of low-rated observations required for a Safe food (default 0.70)
    pub safe_low_share: f64,
    /// Share of high-rated observations that forces a Danger food (default 0.60)
    pub danger_high_share: f64,
    /// Minimum observations before a food is reported at all (default 2)
    pub min_food_count: usize,
    /// Minimum co-occurrences before a category pair is reported (default 2)
    pub min_combination_occurrences: usize,
    /// Occurrences at which confidence moves from needs-data to
    /// investigating (default 2); boundary inclusive
    pub investigating_min_occurrences: usize,
    /// Occurrences at which confidence becomes high (default 5); boundary
    /// inclusive
    pub high_confidence_min_occurrences: usize,
    /// Impact score band boundaries (defaults 2.0 / 1.0 / 0.5); part of the
    /// public contract since UI legends key off the bands
    pub impact_high: f64,
    pub impact_moderate: f64,
    pub impact_mild: f64,
    /// Half-to-half average delta within this magnitude reads as Stable
    /// (default 0.3)
    pub trend_dead_zone: f64,
    /// Recent window for trend and success metrics, in days (default 14)
    pub lookback_days: i64,
    /// Window for trending-safe-foods and new-pattern detection (default 7)
    pub trending_window_days: i64,
    /// Most frequent foods reported per category (default 3)
    pub top_foods_cap: usize,
    /// Trending safe foods reported (default 3)
    pub trending_foods_cap: usize,
    /// Maximum testing recommendations produced (default 5)
    pub max_recommendations: usize,
    /// Days without a category before a reintroduction test is suggested
    /// (default 14)
    pub reintroduce_after_days: i64,
    /// Recent-share multiple over baseline share that flags a new pattern
    /// (default 2.0)
    pub new_pattern_ratio: f64,
    /// Recent entries carried on the report for the narrative payload
    /// (default 30)
    pub recent_entries_cap: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            comfortable_max_rating: 2,
            high_min_rating: 4,
            high_avg_threshold: 3.5,
            safe_low_share: 0.70,
            danger_high_share: 0.60,
            min_food_count: 2,
            min_combination_occurrences: 2,
            investigating_min_occurrences: 2,
            high_confidence_min_occurrences: 5,
            impact_high: 2.0,
            impact_moderate: 1.0,
            impact_mild: 0.5,
            trend_dead_zone: 0.3,
            lookback_days: 14,
            trending_window_days: 7,
            top_foods_cap: 3,
            trending_foods_cap: 3,
            max_recommendations: 5,
            reintroduce_after_days: 14,
            new_pattern_ratio: 2.0,
            recent_entries_cap: 30,
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lookback_days(mut self, days: i64) -> Self {
        self.lookback_days = days;
        self
    }

    pub fn with_top_foods_cap(mut self, cap: usize) -> Self {
        self.top_foods_cap = cap;
        self
    }

    pub fn with_max_recommendations(mut self, max: usize) -> Self {
        self.max_recommendations = max;
        self
    }
}
