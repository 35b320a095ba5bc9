//! Performance prediction model - weights, tiers, confidence

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Manual production baselines used for savings comparisons.
pub const MANUAL_PRODUCTION_SECONDS: f64 = 8.0 * 3600.0;
pub const MANUAL_PRODUCTION_COST: f64 = 150.0;

/// Prediction confidence never reaches full certainty.
pub const CONFIDENCE_CAP: f64 = 0.95;

/// The six success factors, in weight order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessFactor {
    HookEffectiveness,
    NihilisticOptimismBalance,
    VisualMetaphorQuality,
    ScientificAccuracy,
    CosmicPerspective,
    EmpowermentFactor,
}

impl SuccessFactor {
    pub const ALL: [SuccessFactor; 6] = [
        SuccessFactor::HookEffectiveness,
        SuccessFactor::NihilisticOptimismBalance,
        SuccessFactor::VisualMetaphorQuality,
        SuccessFactor::ScientificAccuracy,
        SuccessFactor::CosmicPerspective,
        SuccessFactor::EmpowermentFactor,
    ];

    /// Factor weights from the fitted prediction model. Invariant: sum 1.0.
    /// Treated as configured constants, not verified domain truths.
    pub fn weight(&self) -> f64 {
        match self {
            SuccessFactor::HookEffectiveness => 0.25,
            SuccessFactor::NihilisticOptimismBalance => 0.20,
            SuccessFactor::VisualMetaphorQuality => 0.18,
            SuccessFactor::ScientificAccuracy => 0.15,
            SuccessFactor::CosmicPerspective => 0.12,
            SuccessFactor::EmpowermentFactor => 0.10,
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            SuccessFactor::HookEffectiveness => "hook_effectiveness",
            SuccessFactor::NihilisticOptimismBalance => "nihilistic_optimism_balance",
            SuccessFactor::VisualMetaphorQuality => "visual_metaphor_quality",
            SuccessFactor::ScientificAccuracy => "scientific_accuracy",
            SuccessFactor::CosmicPerspective => "cosmic_perspective",
            SuccessFactor::EmpowermentFactor => "empowerment_factor",
        }
    }
}

/// Weighted success probability over factor scores in [0,1]. Missing factors
/// default to 0.5. Bounded in [0,1] by construction.
pub fn success_probability(scores: &BTreeMap<&'static str, f64>) -> f64 {
    SuccessFactor::ALL
        .iter()
        .map(|factor| {
            let score = scores.get(factor.wire_name()).copied().unwrap_or(0.5);
            score * factor.weight()
        })
        .sum()
}

/// Confidence in a prediction given the factor scores that fed it:
/// 0.4 x data completeness + 0.6 x mean factor score, capped at 0.95.
pub fn prediction_confidence(scores: &BTreeMap<&'static str, f64>) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let completeness =
        scores.values().filter(|v| **v > 0.0).count() as f64 / scores.len() as f64;
    let quality = scores.values().sum::<f64>() / scores.len() as f64;
    (completeness * 0.4 + quality * 0.6).min(CONFIDENCE_CAP)
}

/// Qualitative benchmark band for a single factor score.
pub fn factor_benchmark(score: f64) -> &'static str {
    if score >= 0.9 {
        "excellent"
    } else if score >= 0.8 {
        "good"
    } else if score >= 0.6 {
        "average"
    } else {
        "needs_improvement"
    }
}

/// Discretized success classification, ordered worst to best so that
/// comparisons follow tier quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessTier {
    NeedsOptimization,
    AveragePerformance,
    ModerateSuccess,
    HighSuccess,
    ViralPotential,
}

impl SuccessTier {
    /// Non-overlapping thresholds, checked in descending order.
    pub fn classify(probability: f64) -> Self {
        if probability >= 0.85 {
            SuccessTier::ViralPotential
        } else if probability >= 0.75 {
            SuccessTier::HighSuccess
        } else if probability >= 0.65 {
            SuccessTier::ModerateSuccess
        } else if probability >= 0.50 {
            SuccessTier::AveragePerformance
        } else {
            SuccessTier::NeedsOptimization
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SuccessTier::NeedsOptimization => "needs_optimization",
            SuccessTier::AveragePerformance => "average_performance",
            SuccessTier::ModerateSuccess => "moderate_success",
            SuccessTier::HighSuccess => "high_success",
            SuccessTier::ViralPotential => "viral_potential",
        }
    }
}

impl fmt::Display for SuccessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timing vs target: lower is better, `meets_target` when actual <= target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingPerformance {
    pub actual_seconds: f64,
    pub target_seconds: f64,
    pub performance_ratio: f64,
    pub meets_target: bool,
    pub time_saved_vs_manual: f64,
}

impl TimingPerformance {
    pub fn evaluate(actual_seconds: f64, target_seconds: f64) -> Self {
        Self {
            actual_seconds,
            target_seconds,
            performance_ratio: actual_seconds / target_seconds,
            meets_target: actual_seconds <= target_seconds,
            time_saved_vs_manual: MANUAL_PRODUCTION_SECONDS - actual_seconds,
        }
    }
}

/// Cost vs target: lower is better, `meets_target` when actual <= target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostPerformance {
    pub actual_cost: f64,
    pub target_cost: f64,
    pub cost_efficiency: f64,
    pub meets_target: bool,
    pub cost_savings_vs_manual: f64,
}

impl CostPerformance {
    pub fn evaluate(actual_cost: f64, target_cost: f64) -> Self {
        Self {
            actual_cost,
            target_cost,
            cost_efficiency: actual_cost / target_cost,
            meets_target: actual_cost <= target_cost,
            cost_savings_vs_manual: MANUAL_PRODUCTION_COST - actual_cost,
        }
    }
}

/// Quality vs target: higher is better, `meets_target` when actual >= target.
/// The asymmetry against timing/cost is intentional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityPerformance {
    pub actual_quality: f64,
    pub target_quality: f64,
    pub quality_ratio: f64,
    pub meets_target: bool,
    pub quality_breakdown: BTreeMap<String, f64>,
}

impl QualityPerformance {
    pub fn evaluate(
        actual_quality: f64,
        target_quality: f64,
        quality_breakdown: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            actual_quality,
            target_quality,
            quality_ratio: actual_quality / target_quality,
            meets_target: actual_quality >= target_quality,
            quality_breakdown,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingAnalysis {
    pub timing_performance: TimingPerformance,
    pub cost_performance: CostPerformance,
    pub quality_performance: QualityPerformance,
    pub overall_performance_score: f64,
}

impl ProcessingAnalysis {
    pub fn new(
        timing: TimingPerformance,
        cost: CostPerformance,
        quality: QualityPerformance,
    ) -> Self {
        let scores = [
            if timing.meets_target { 1.0 } else { 0.5 },
            if cost.meets_target { 1.0 } else { 0.5 },
            if quality.meets_target { 1.0 } else { 0.5 },
        ];
        let overall = scores.iter().sum::<f64>() / scores.len() as f64;
        Self {
            timing_performance: timing,
            cost_performance: cost,
            quality_performance: quality,
            overall_performance_score: overall,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorAnalysis {
    pub raw_score: f64,
    pub weight: f64,
    pub weighted_contribution: f64,
    pub benchmark: String,
}

/// Audience-metric projections derived from the success probability by
/// linear interpolation between the historical worst and best bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictedMetrics {
    pub predicted_retention_rate: f64,
    pub predicted_engagement_score: f64,
    pub predicted_sharing_probability: f64,
    pub predicted_educational_impact: f64,
    pub overall_success_tier: SuccessTier,
}

impl PredictedMetrics {
    pub fn from_probability(probability: f64) -> Self {
        Self {
            predicted_retention_rate: 45.0 + probability * 44.0,
            predicted_engagement_score: 4.0 + probability * 5.0,
            predicted_sharing_probability: 15.0 + probability * 59.0,
            predicted_educational_impact: 40.0 + probability * 51.0,
            overall_success_tier: SuccessTier::classify(probability),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_factors(score: f64) -> BTreeMap<&'static str, f64> {
        SuccessFactor::ALL
            .iter()
            .map(|f| (f.wire_name(), score))
            .collect()
    }

    #[test]
    fn factor_weights_sum_to_one() {
        let total: f64 = SuccessFactor::ALL.iter().map(|f| f.weight()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn uniform_half_scores_give_average_performance() {
        let scores = all_factors(0.5);
        let p = success_probability(&scores);
        assert!((p - 0.5).abs() < 1e-9);
        assert_eq!(SuccessTier::classify(p), SuccessTier::AveragePerformance);
    }

    #[test]
    fn probability_stays_in_unit_interval() {
        assert!((success_probability(&all_factors(0.0)) - 0.0).abs() < 1e-9);
        assert!((success_probability(&all_factors(1.0)) - 1.0).abs() < 1e-9);
        // Missing factors default to 0.5.
        let empty = BTreeMap::new();
        assert!((success_probability(&empty) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn tiers_are_ordered_and_non_overlapping() {
        let cases = [
            (0.49, SuccessTier::NeedsOptimization),
            (0.50, SuccessTier::AveragePerformance),
            (0.64, SuccessTier::AveragePerformance),
            (0.65, SuccessTier::ModerateSuccess),
            (0.74, SuccessTier::ModerateSuccess),
            (0.75, SuccessTier::HighSuccess),
            (0.84, SuccessTier::HighSuccess),
            (0.85, SuccessTier::ViralPotential),
            (1.00, SuccessTier::ViralPotential),
        ];
        for (p, tier) in cases {
            assert_eq!(SuccessTier::classify(p), tier, "p={p}");
        }
        // Monotone: a larger probability never maps to a worse tier.
        let mut probabilities = vec![0.0, 0.3, 0.5, 0.64, 0.65, 0.749, 0.75, 0.849, 0.85, 1.0];
        probabilities.dedup();
        for pair in probabilities.windows(2) {
            assert!(SuccessTier::classify(pair[0]) <= SuccessTier::classify(pair[1]));
        }
    }

    #[test]
    fn confidence_is_capped() {
        let confident = all_factors(1.0);
        assert_eq!(prediction_confidence(&confident), CONFIDENCE_CAP);
        let half = all_factors(0.5);
        // completeness 1.0, mean 0.5 -> 0.4 + 0.3
        assert!((prediction_confidence(&half) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn meets_target_asymmetry_is_preserved() {
        assert!(TimingPerformance::evaluate(400.0, 480.0).meets_target);
        assert!(!TimingPerformance::evaluate(500.0, 480.0).meets_target);
        assert!(CostPerformance::evaluate(2.0, 2.5).meets_target);
        assert!(!CostPerformance::evaluate(3.0, 2.5).meets_target);
        assert!(QualityPerformance::evaluate(9.2, 9.0, BTreeMap::new()).meets_target);
        assert!(!QualityPerformance::evaluate(8.5, 9.0, BTreeMap::new()).meets_target);
    }

    #[test]
    fn overall_performance_averages_pass_fail_scores() {
        let analysis = ProcessingAnalysis::new(
            TimingPerformance::evaluate(400.0, 480.0),
            CostPerformance::evaluate(3.0, 2.5),
            QualityPerformance::evaluate(9.2, 9.0, BTreeMap::new()),
        );
        // 1.0 + 0.5 + 1.0 over 3
        assert!((analysis.overall_performance_score - 2.5 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn predicted_metrics_interpolate_the_historical_bands() {
        let low = PredictedMetrics::from_probability(0.0);
        assert_eq!(low.predicted_retention_rate, 45.0);
        assert_eq!(low.predicted_sharing_probability, 15.0);
        let high = PredictedMetrics::from_probability(1.0);
        assert_eq!(high.predicted_retention_rate, 89.0);
        assert_eq!(high.predicted_educational_impact, 91.0);
    }
}
