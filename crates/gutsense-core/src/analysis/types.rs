//! Core types for the analysis engine
//!
//! Everything derived from a meal-entry snapshot. Field names and nesting
//! are a contract the presentation views depend on; report types serialize
//! in camelCase to match it.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::AnalysisConfig;
use crate::models::TriggerCategory;

/// Coarse sample-size label for a trigger hypothesis.
///
/// Reflects how much data backs the category, not statistical significance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfidenceTier {
    /// Fewer than two occurrences; nothing to conclude yet
    NeedsData,
    /// 2-4 occurrences; pattern forming
    Investigating,
    /// 5+ occurrences; enough to act on
    High,
}

impl ConfidenceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::NeedsData => "needsData",
            ConfidenceTier::Investigating => "investigating",
            ConfidenceTier::High => "high",
        }
    }

    /// Numeric rank for monotonicity checks (higher = more confident)
    pub fn rank(&self) -> u8 {
        match self {
            ConfidenceTier::NeedsData => 0,
            ConfidenceTier::Investigating => 1,
            ConfidenceTier::High => 2,
        }
    }

    /// Display-only 0-100 mapping of the tier. Not a p-value; the UI shows
    /// this as a progress indicator.
    pub fn display_percentage(&self) -> u32 {
        match self {
            ConfidenceTier::NeedsData => 20,
            ConfidenceTier::Investigating => 60,
            ConfidenceTier::High => 90,
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConfidenceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "needsData" => Ok(ConfidenceTier::NeedsData),
            "investigating" => Ok(ConfidenceTier::Investigating),
            "high" => Ok(ConfidenceTier::High),
            _ => Err(format!("Unknown confidence tier: {}", s)),
        }
    }
}

/// Severity band of an impact score. Step function boundaries come from
/// [`AnalysisConfig`]; the defaults (2.0 / 1.0 / 0.5) are part of the
/// public contract because UI legends key off them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImpactBand {
    High,
    Moderate,
    Mild,
    /// Near-zero or negative impact; the category may even be helpful
    Low,
}

impl ImpactBand {
    pub fn for_score(score: f64, config: &AnalysisConfig) -> Self {
        if score >= config.impact_high {
            ImpactBand::High
        } else if score >= config.impact_moderate {
            ImpactBand::Moderate
        } else if score >= config.impact_mild {
            ImpactBand::Mild
        } else {
            ImpactBand::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactBand::High => "high",
            ImpactBand::Moderate => "moderate",
            ImpactBand::Mild => "mild",
            ImpactBand::Low => "low",
        }
    }
}

impl fmt::Display for ImpactBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-category correlation stats: the engine's primary output row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerConfidenceLevel {
    pub category: TriggerCategory,
    /// Completed entries containing this category
    pub occurrences: usize,
    pub avg_bloating_with: f64,
    pub avg_bloating_without: f64,
    /// `avg_bloating_with - avg_bloating_without`; signed, negative means
    /// the category correlates with less discomfort
    pub impact_score: f64,
    /// Share of completed entries containing the category, rounded 0-100
    pub percentage: u32,
    pub confidence: ConfidenceTier,
    /// Display mapping of the tier, 0-100
    pub confidence_percentage: u32,
    pub impact_band: ImpactBand,
    /// `avg_bloating_with / 5 * 100`, clamped to 0-100
    pub risk_percentage: u32,
    /// Most frequent foods tagged under this category, first-seen tie-break
    pub top_foods: Vec<String>,
}

/// Safety label for a specific food string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SafetyLevel {
    Safe,
    Caution,
    Danger,
}

impl SafetyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyLevel::Safe => "safe",
            SafetyLevel::Caution => "caution",
            SafetyLevel::Danger => "danger",
        }
    }
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SafetyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "safe" => Ok(SafetyLevel::Safe),
            "caution" => Ok(SafetyLevel::Caution),
            "danger" => Ok(SafetyLevel::Danger),
            _ => Err(format!("Unknown safety level: {}", s)),
        }
    }
}

/// Per-food stats, independent of category-level analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodInsight {
    pub food: String,
    pub count: usize,
    pub avg_bloating: f64,
    pub safety_level: SafetyLevel,
}

/// An unordered category pair whose joint effect exceeds the parts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodCombination {
    pub triggers: [TriggerCategory; 2],
    /// Entries containing both categories
    pub occurrences: usize,
    pub avg_bloating_together: f64,
    /// Average over entries containing exactly one of the pair
    pub avg_bloating_separate: f64,
}

impl FoodCombination {
    /// How much worse the pair is together than apart
    pub fn margin(&self) -> f64 {
        self.avg_bloating_together - self.avg_bloating_separate
    }
}

/// Direction of the recent trend (lower rating = better)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Trend {
    Improving,
    Worsening,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Worsening => "worsening",
            Trend::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Week-over-week comparison plus recent trend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyComparison {
    pub this_week_avg_bloating: f64,
    pub overall_avg_bloating: f64,
    pub trend: Trend,
    /// Categories whose recent frequency rose sharply versus baseline
    pub new_patterns: Vec<TriggerCategory>,
}

impl Default for WeeklyComparison {
    fn default() -> Self {
        Self {
            this_week_avg_bloating: 0.0,
            overall_avg_bloating: 0.0,
            trend: Trend::Stable,
            new_patterns: vec![],
        }
    }
}

/// Wall-clock bucket of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Fixed priority order; also the tie-break order for `worst_time`.
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    /// Bucket boundaries: [0,12) morning, [12,17) afternoon, [17,21)
    /// evening, [21,24) night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// High-bloating entry counts per time-of-day bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDistribution {
    pub morning: usize,
    pub afternoon: usize,
    pub evening: usize,
    pub night: usize,
}

impl TimeDistribution {
    pub fn count(&self, bucket: TimeOfDay) -> usize {
        match bucket {
            TimeOfDay::Morning => self.morning,
            TimeOfDay::Afternoon => self.afternoon,
            TimeOfDay::Evening => self.evening,
            TimeOfDay::Night => self.night,
        }
    }

    pub fn increment(&mut self, bucket: TimeOfDay) {
        match bucket {
            TimeOfDay::Morning => self.morning += 1,
            TimeOfDay::Afternoon => self.afternoon += 1,
            TimeOfDay::Evening => self.evening += 1,
            TimeOfDay::Night => self.night += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.morning + self.afternoon + self.evening + self.night
    }
}

/// When bad days happen
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePatterns {
    /// Bucket with the most high-bloating entries; `None` when there are no
    /// high-bloating entries at all
    pub worst_time: Option<TimeOfDay>,
    pub distribution: TimeDistribution,
}

/// Aggregate progress metrics over the recent window plus all-time streaks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessMetrics {
    /// Share of recent meals rated comfortable, 0-100
    pub comfortable_meal_rate: f64,
    /// Share of recent meals with no detected trigger categories, 0-100
    pub trigger_avoidance_rate: f64,
    pub current_streak: usize,
    pub longest_streak: usize,
    /// Signed; positive when recent discomfort is lower than all-time
    pub improvement_percentage: f64,
    pub current_avg_bloating: f64,
    pub previous_period_avg_bloating: f64,
}

/// What kind of test to run next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecommendationType {
    Eliminate,
    Reintroduce,
    Monitor,
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationType::Eliminate => "eliminate",
            RecommendationType::Reintroduce => "reintroduce",
            RecommendationType::Monitor => "monitor",
        }
    }
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recommendation urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Numeric rank for sorting (higher = more urgent)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ranked "test next" action
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestingRecommendation {
    /// The food (or category label) to act on
    pub food: String,
    #[serde(rename = "type")]
    pub action: RecommendationType,
    pub priority: Priority,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_avoided: Option<i64>,
}

/// Snapshot-wide aggregates, carried so the narrative payload can be built
/// without re-scanning entries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub days_tracked: i64,
    pub total_logs: usize,
    pub avg_bloating: f64,
    pub high_bloating_count: usize,
    pub low_bloating_count: usize,
}

/// A compact view of one recent completed entry, newest first on the report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentEntry {
    /// Entry description when present, otherwise the tagged foods joined
    pub food: String,
    pub trigger_categories: Vec<TriggerCategory>,
    pub timestamp: NaiveDateTime,
    pub bloat_rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The composite result of a full analysis pass.
///
/// Every field is always present: insufficient data shows up as empty
/// collections and zeroed metrics, never as nulls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub trigger_confidence: Vec<TriggerConfidenceLevel>,
    pub food_insights: Vec<FoodInsight>,
    pub trending_safe_foods: Vec<FoodInsight>,
    pub combinations: Vec<FoodCombination>,
    pub weekly_comparison: WeeklyComparison,
    pub time_patterns: TimePatterns,
    pub success_metrics: SuccessMetrics,
    pub testing_recommendations: Vec<TestingRecommendation>,
    pub overview: OverviewStats,
    pub recent_entries: Vec<RecentEntry>,
}
