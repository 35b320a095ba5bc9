//! PerformanceAnalyzer - run metrics against targets plus success prediction
//!
//! Entirely deterministic: the prediction model is a fixed weighted sum over
//! six success factors extracted from the processing trace, and the business
//! projections are linear interpolations over the historical bands. Missing
//! trace fields degrade to their documented defaults; a trace without
//! timestamps scores zero elapsed seconds instead of failing.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use crate::application::dto::{PerformanceTargets, ProcessingTrace};
use crate::domain::value_objects::{
    factor_benchmark, prediction_confidence, success_probability, CostPerformance,
    FactorAnalysis, PredictedMetrics, ProcessingAnalysis, QualityPerformance, SuccessFactor,
    SuccessTier, TimingPerformance, MANUAL_PRODUCTION_COST, MANUAL_PRODUCTION_SECONDS,
};

/// Per-video processing cost estimate: compute, model calls, storage, rest.
const COMPUTE_COST: f64 = 0.50;
const MODEL_COST: f64 = 1.00;
const STORAGE_COST: f64 = 0.10;
const OTHER_COST: f64 = 0.40;

/// PerformanceAnalyzer stage payload.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceAnalysis {
    pub status: &'static str,
    pub processing_analysis: ProcessingAnalysis,
    pub success_prediction: SuccessPrediction,
    pub methodology_analysis: MethodologyAnalysis,
    pub improvement_insights: ImprovementInsights,
    pub business_metrics: BusinessMetrics,
    pub feedback_loops: serde_json::Value,
    pub performance_benchmarks: serde_json::Value,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessPrediction {
    pub overall_success_probability: f64,
    pub success_classification: SuccessTier,
    pub factor_analysis: BTreeMap<&'static str, FactorAnalysis>,
    pub predicted_metrics: PredictedMetrics,
    pub prediction_confidence: f64,
    pub model_version: &'static str,
    pub training_data_size: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodologyAnalysis {
    pub methodology_scores: BTreeMap<&'static str, f64>,
    pub overall_effectiveness: f64,
    pub historical_comparison: HistoricalComparison,
    pub methodology_compliance: bool,
    pub optimization_opportunities: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoricalComparison {
    pub above_average_factors: Vec<&'static str>,
    pub below_average_factors: Vec<&'static str>,
    pub overall_comparison: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImprovementInsights {
    pub performance_insights: Vec<serde_json::Value>,
    pub quality_insights: Vec<serde_json::Value>,
    pub cost_optimization_insights: Vec<serde_json::Value>,
    pub success_factor_insights: Vec<SuccessFactorInsight>,
    pub methodology_insights: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessFactorInsight {
    pub factor: &'static str,
    pub current_score: f64,
    pub impact_on_success: f64,
    pub improvement_priority: &'static str,
    pub specific_recommendations: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BusinessMetrics {
    pub cost_efficiency: CostEfficiency,
    pub time_efficiency: TimeEfficiency,
    pub revenue_projections: RevenueProjections,
    pub scalability_metrics: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct CostEfficiency {
    pub cost_per_video: f64,
    pub cost_savings_per_video: f64,
    pub cost_reduction_percentage: f64,
    pub monthly_cost_savings: f64,
    pub annual_cost_savings: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeEfficiency {
    pub time_per_video_seconds: f64,
    pub time_savings_per_video_hours: f64,
    pub time_reduction_percentage: f64,
    pub monthly_time_savings_hours: f64,
    pub productivity_multiplier: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenueProjections {
    pub success_probability: f64,
    pub predicted_views: u64,
    pub predicted_revenue: f64,
    pub roi_percentage: f64,
    pub break_even_views: f64,
}

#[derive(Default)]
pub struct PerformanceAnalyzerService;

impl PerformanceAnalyzerService {
    pub fn new() -> Self {
        Self
    }

    /// Full run analysis: actuals vs targets, success prediction, insights.
    pub fn analyze(
        &self,
        trace: &ProcessingTrace,
        targets: &PerformanceTargets,
    ) -> PerformanceAnalysis {
        let processing_analysis = analyze_processing(trace, targets);
        let success_prediction = predict_success(trace);
        let methodology_analysis = methodology_effectiveness();
        let improvement_insights =
            improvement_insights(&processing_analysis, &success_prediction);
        let business_metrics = business_metrics(&processing_analysis, &success_prediction);

        PerformanceAnalysis {
            status: "success",
            processing_analysis,
            success_prediction,
            methodology_analysis,
            improvement_insights,
            business_metrics,
            feedback_loops: feedback_loops(),
            performance_benchmarks: performance_benchmarks(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

fn analyze_processing(trace: &ProcessingTrace, targets: &PerformanceTargets) -> ProcessingAnalysis {
    let actual_seconds = elapsed_seconds(trace);
    let estimated_cost = COMPUTE_COST + MODEL_COST + STORAGE_COST + OTHER_COST;
    let quality_breakdown = quality_scores(trace);
    let final_quality = quality_breakdown["final_quality"];

    ProcessingAnalysis::new(
        TimingPerformance::evaluate(actual_seconds, targets.processing_time),
        CostPerformance::evaluate(estimated_cost, targets.cost),
        QualityPerformance::evaluate(final_quality, targets.quality_score, quality_breakdown),
    )
}

/// Elapsed wall time of the run. Traces without both timestamps count as
/// zero elapsed seconds.
fn elapsed_seconds(trace: &ProcessingTrace) -> f64 {
    let parse = |s: &Option<String>| {
        s.as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
    };
    match (parse(&trace.start_time), parse(&trace.end_time)) {
        (Some(start), Some(end)) => (end - start).num_milliseconds() as f64 / 1000.0,
        _ => 0.0,
    }
}

fn quality_scores(trace: &ProcessingTrace) -> BTreeMap<String, f64> {
    let final_quality = trace
        .quality_assurance
        .as_ref()
        .and_then(|qa| qa.final_quality_score)
        .unwrap_or(8.0);

    BTreeMap::from([
        ("final_quality".to_string(), final_quality),
        ("content_quality".to_string(), 8.5),
        ("visual_quality".to_string(), 8.3),
        ("audio_quality".to_string(), 8.7),
        ("educational_effectiveness".to_string(), 8.4),
    ])
}

/// Factor scores extracted from the trace, each in [0,1]. The hook and
/// scientific-accuracy factors come from upstream analyses; the rest are
/// methodology constants until platform feedback exists to fit them.
fn extract_success_factors(trace: &ProcessingTrace) -> BTreeMap<&'static str, f64> {
    let hook_potential = trace
        .content_analysis
        .as_ref()
        .and_then(|ca| ca.structure_analysis.as_ref())
        .and_then(|sa| sa.analysis.as_ref())
        .and_then(|a| a.hook_potential)
        .unwrap_or(7.5);
    let quality_score = trace
        .content_analysis
        .as_ref()
        .and_then(|ca| ca.quality_validation.as_ref())
        .and_then(|qv| qv.quality_score)
        .unwrap_or(8.0);

    BTreeMap::from([
        ("hook_effectiveness", hook_potential / 10.0),
        ("nihilistic_optimism_balance", 0.85),
        ("visual_metaphor_quality", 0.80),
        ("scientific_accuracy", quality_score / 10.0),
        ("cosmic_perspective", 0.75),
        ("empowerment_factor", 0.90),
    ])
}

fn predict_success(trace: &ProcessingTrace) -> SuccessPrediction {
    let factors = extract_success_factors(trace);
    let probability = success_probability(&factors);

    let factor_analysis = SuccessFactor::ALL
        .iter()
        .map(|factor| {
            let raw_score = factors.get(factor.wire_name()).copied().unwrap_or(0.5);
            (
                factor.wire_name(),
                FactorAnalysis {
                    raw_score,
                    weight: factor.weight(),
                    weighted_contribution: raw_score * factor.weight(),
                    benchmark: factor_benchmark(raw_score).to_string(),
                },
            )
        })
        .collect();

    SuccessPrediction {
        overall_success_probability: probability,
        success_classification: SuccessTier::classify(probability),
        factor_analysis,
        predicted_metrics: PredictedMetrics::from_probability(probability),
        prediction_confidence: prediction_confidence(&factors),
        model_version: "kurzgesagt_quantified_v4.1",
        training_data_size: "200_plus_videos",
    }
}

fn methodology_effectiveness() -> MethodologyAnalysis {
    let scores = BTreeMap::from([
        ("hook_effectiveness", 0.85),
        ("nihilistic_optimism_integration", 0.82),
        ("visual_metaphor_usage", 0.78),
        ("cosmic_perspective_presence", 0.75),
        ("empowerment_message_strength", 0.88),
        ("scientific_accuracy_maintenance", 0.90),
    ]);

    let overall = scores.values().sum::<f64>() / scores.len() as f64;
    let above: Vec<&'static str> = scores
        .iter()
        .filter(|(_, v)| **v > 0.8)
        .map(|(k, _)| *k)
        .collect();
    let below: Vec<&'static str> = scores
        .iter()
        .filter(|(_, v)| **v < 0.7)
        .map(|(k, _)| *k)
        .collect();
    let optimizations = scores
        .iter()
        .filter(|(_, v)| **v < 0.8)
        .map(|(k, v)| format!("Improve {k} (current: {v:.2})"))
        .collect();

    MethodologyAnalysis {
        overall_effectiveness: overall,
        historical_comparison: HistoricalComparison {
            above_average_factors: above,
            below_average_factors: below,
            overall_comparison: "performs_well_vs_historical_data",
        },
        methodology_compliance: overall >= 0.85,
        optimization_opportunities: optimizations,
        methodology_scores: scores,
    }
}

fn improvement_insights(
    processing: &ProcessingAnalysis,
    prediction: &SuccessPrediction,
) -> ImprovementInsights {
    let mut insights = ImprovementInsights {
        performance_insights: Vec::new(),
        quality_insights: Vec::new(),
        cost_optimization_insights: Vec::new(),
        success_factor_insights: Vec::new(),
        methodology_insights: Vec::new(),
    };

    let timing = &processing.timing_performance;
    if !timing.meets_target {
        let overshoot =
            (timing.actual_seconds - timing.target_seconds) / timing.target_seconds * 100.0;
        insights.performance_insights.push(json!({
            "type": "processing_time_optimization",
            "current_performance": timing.actual_seconds,
            "target": timing.target_seconds,
            "improvement_potential": format!("{overshoot:.1}% reduction needed"),
            "suggested_actions": [
                "Optimize worker function memory allocation",
                "Implement parallel processing where possible",
                "Cache frequently used AI model responses"
            ]
        }));
    }

    let quality = &processing.quality_performance;
    if !quality.meets_target {
        insights.quality_insights.push(json!({
            "type": "quality_enhancement",
            "current_quality": quality.actual_quality,
            "target": quality.target_quality,
            "improvement_areas": [
                "Enhance visual design consistency",
                "Improve audio mixing balance"
            ]
        }));
    }

    for factor in SuccessFactor::ALL {
        let Some(analysis) = prediction.factor_analysis.get(factor.wire_name()) else {
            continue;
        };
        if analysis.raw_score < 0.8 {
            insights.success_factor_insights.push(SuccessFactorInsight {
                factor: factor.wire_name(),
                current_score: analysis.raw_score,
                impact_on_success: analysis.weight,
                improvement_priority: if analysis.weight > 0.15 { "high" } else { "medium" },
                specific_recommendations: factor_recommendations(factor),
            });
        }
    }

    insights
}

fn factor_recommendations(factor: SuccessFactor) -> Vec<&'static str> {
    match factor {
        SuccessFactor::HookEffectiveness => {
            vec!["Use more provocative questions", "Include surprising statistics"]
        }
        SuccessFactor::NihilisticOptimismBalance => {
            vec!["Balance complexity with hope", "Add cosmic perspective"]
        }
        SuccessFactor::VisualMetaphorQuality => {
            vec!["Improve analogy clarity", "Enhance visual storytelling"]
        }
        SuccessFactor::ScientificAccuracy => {
            vec!["Verify all claims", "Cite reliable sources"]
        }
        SuccessFactor::CosmicPerspective => {
            vec!["Add universal context", "Connect to bigger picture"]
        }
        SuccessFactor::EmpowermentFactor => {
            vec!["Strengthen concluding message", "Add actionable insights"]
        }
    }
}

fn business_metrics(
    processing: &ProcessingAnalysis,
    prediction: &SuccessPrediction,
) -> BusinessMetrics {
    let automated_cost = processing.cost_performance.actual_cost;
    let cost_savings = MANUAL_PRODUCTION_COST - automated_cost;

    let automated_time = processing.timing_performance.actual_seconds;
    let time_savings = MANUAL_PRODUCTION_SECONDS - automated_time;

    let probability = prediction.overall_success_probability;
    let predicted_views = estimate_views(probability);
    let predicted_revenue = predicted_views as f64 * 0.001;

    BusinessMetrics {
        cost_efficiency: CostEfficiency {
            cost_per_video: automated_cost,
            cost_savings_per_video: cost_savings,
            cost_reduction_percentage: cost_savings / MANUAL_PRODUCTION_COST * 100.0,
            monthly_cost_savings: cost_savings * 1000.0,
            annual_cost_savings: cost_savings * 12000.0,
        },
        time_efficiency: TimeEfficiency {
            time_per_video_seconds: automated_time,
            time_savings_per_video_hours: time_savings / 3600.0,
            time_reduction_percentage: time_savings / MANUAL_PRODUCTION_SECONDS * 100.0,
            monthly_time_savings_hours: time_savings / 3600.0 * 1000.0,
            productivity_multiplier: if automated_time > 0.0 {
                MANUAL_PRODUCTION_SECONDS / automated_time
            } else {
                0.0
            },
        },
        revenue_projections: RevenueProjections {
            success_probability: probability,
            predicted_views,
            predicted_revenue,
            roi_percentage: (predicted_revenue - automated_cost) / automated_cost * 100.0,
            break_even_views: automated_cost / 0.001,
        },
        scalability_metrics: json!({
            "max_videos_per_month": 15000,
            "current_capacity_utilization": 0.067,
            "scaling_potential": "15x current production",
            "infrastructure_ready_for_scale": true
        }),
    }
}

fn estimate_views(success_probability: f64) -> u64 {
    let base_views = 10_000.0;
    let max_multiplier = 50.0;
    (base_views * (1.0 + success_probability * max_multiplier)) as u64
}

fn feedback_loops() -> serde_json::Value {
    json!({
        "data_collection_points": {
            "processing_metrics": "Coletados automaticamente a cada execução",
            "quality_scores": "Avaliação AI + validação humana ocasional",
            "user_engagement": "Métricas de plataforma (views, likes, shares)",
            "learning_outcomes": "Surveys e testes de retenção"
        },
        "model_update_triggers": {
            "performance_degradation": "Atualizar se accuracy < 80%",
            "new_data_threshold": "Retreinar a cada 100 novos vídeos",
            "methodology_evolution": "Incorporar novos insights Kurzgesagt",
            "user_feedback_patterns": "Ajustar baseado em feedback consistente"
        },
        "optimization_recommendations": {
            "immediate_actions": [
                "Cache AI model responses for similar content",
                "Optimize worker memory allocation",
                "Implement parallel processing where possible"
            ],
            "short_term_improvements": [
                "A/B test different hook strategies",
                "Refine visual metaphor library",
                "Enhance empowerment messaging templates"
            ],
            "long_term_strategy": [
                "Develop predictive models for content virality",
                "Integrate real-time audience feedback",
                "Expand to multi-language support",
                "Implement advanced personalization"
            ],
            "methodology_refinements": [
                "Study latest Kurzgesagt releases for methodology updates",
                "Incorporate new cognitive science research",
                "Refine nihilistic optimism balance based on audience feedback",
                "Enhance cosmic perspective integration techniques"
            ]
        },
        "monitoring_and_alerting": {
            "quality_alerts": "Notificar se qualidade < 8.5",
            "performance_alerts": "Alertar se tempo > 600 segundos",
            "cost_alerts": "Monitorar se custo > $3.00",
            "success_tracking": "Dashboard em tempo real de predições vs resultados"
        }
    })
}

fn performance_benchmarks() -> serde_json::Value {
    json!({
        "retention_rate": { "excellent": 89, "good": 75, "average": 60, "poor": 45 },
        "engagement_metrics": { "excellent": 9.0, "good": 7.5, "average": 6.0, "poor": 4.0 },
        "sharing_probability": { "excellent": 74, "good": 55, "average": 35, "poor": 15 },
        "educational_impact": { "excellent": 91, "good": 75, "average": 60, "poor": 40 }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::{
        AnalysisTrace, ContentAnalyzerResponse, QualityTraceEntry, QualityValidationTrace,
        StructureAnalysisTrace,
    };

    fn trace(
        hook_potential: f64,
        quality_score: f64,
        final_quality: f64,
        elapsed: Option<(&str, &str)>,
    ) -> ProcessingTrace {
        ProcessingTrace {
            start_time: elapsed.map(|(s, _)| s.to_string()),
            end_time: elapsed.map(|(_, e)| e.to_string()),
            content_analysis: Some(ContentAnalyzerResponse {
                structure_analysis: Some(StructureAnalysisTrace {
                    analysis: Some(AnalysisTrace {
                        hook_potential: Some(hook_potential),
                    }),
                }),
                quality_validation: Some(QualityValidationTrace {
                    quality_score: Some(quality_score),
                }),
            }),
            quality_assurance: Some(QualityTraceEntry {
                final_quality_score: Some(final_quality),
            }),
        }
    }

    #[test]
    fn timing_and_quality_targets_are_asymmetric() {
        let service = PerformanceAnalyzerService::new();
        let trace = trace(
            9.0,
            10.0,
            9.5,
            Some(("2026-08-23T10:00:00Z", "2026-08-23T10:06:00Z")),
        );
        let result = service.analyze(&trace, &PerformanceTargets::default());

        let timing = &result.processing_analysis.timing_performance;
        assert_eq!(timing.actual_seconds, 360.0);
        assert!(timing.meets_target);
        assert_eq!(timing.time_saved_vs_manual, 28800.0 - 360.0);

        let quality = &result.processing_analysis.quality_performance;
        assert!(quality.meets_target);
        assert_eq!(quality.actual_quality, 9.5);

        let cost = &result.processing_analysis.cost_performance;
        assert_eq!(cost.actual_cost, 2.0);
        assert!(cost.meets_target);

        assert_eq!(result.processing_analysis.overall_performance_score, 1.0);
    }

    #[test]
    fn missing_timestamps_degrade_to_zero_elapsed() {
        let service = PerformanceAnalyzerService::new();
        let result = service.analyze(&ProcessingTrace::default(), &PerformanceTargets::default());
        let timing = &result.processing_analysis.timing_performance;
        assert_eq!(timing.actual_seconds, 0.0);
        assert!(timing.meets_target);
    }

    #[test]
    fn empty_trace_defaults_quality_to_eight() {
        let service = PerformanceAnalyzerService::new();
        let result = service.analyze(&ProcessingTrace::default(), &PerformanceTargets::default());
        let quality = &result.processing_analysis.quality_performance;
        assert_eq!(quality.actual_quality, 8.0);
        // Target 9.0: the quality check misses while timing and cost pass.
        assert!(!quality.meets_target);
        assert!(
            (result.processing_analysis.overall_performance_score - 2.5 / 3.0).abs() < 1e-9
        );
    }

    #[test]
    fn factor_scores_flow_from_the_trace() {
        let prediction = predict_success(&trace(9.0, 10.0, 9.5, None));
        let hook = &prediction.factor_analysis["hook_effectiveness"];
        assert!((hook.raw_score - 0.9).abs() < 1e-9);
        assert_eq!(hook.benchmark, "excellent");
        let science = &prediction.factor_analysis["scientific_accuracy"];
        assert!((science.raw_score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn default_factors_classify_as_high_success() {
        // hook 0.75, optimism 0.85, metaphor 0.80, science 0.80,
        // cosmic 0.75, empowerment 0.90 -> weighted 0.8015
        let prediction = predict_success(&ProcessingTrace::default());
        assert!((prediction.overall_success_probability - 0.8015).abs() < 1e-9);
        assert_eq!(prediction.success_classification, SuccessTier::HighSuccess);
        assert!(prediction.prediction_confidence <= 0.95);
    }

    #[test]
    fn weak_factors_generate_prioritized_insights() {
        let prediction = predict_success(&trace(5.0, 6.0, 8.0, None));
        let processing =
            analyze_processing(&ProcessingTrace::default(), &PerformanceTargets::default());
        let insights = improvement_insights(&processing, &prediction);

        let hook_insight = insights
            .success_factor_insights
            .iter()
            .find(|i| i.factor == "hook_effectiveness")
            .unwrap();
        // Weight 0.25 > 0.15
        assert_eq!(hook_insight.improvement_priority, "high");
        let cosmic_insight = insights
            .success_factor_insights
            .iter()
            .find(|i| i.factor == "cosmic_perspective")
            .unwrap();
        assert_eq!(cosmic_insight.improvement_priority, "medium");
    }

    #[test]
    fn business_projections_scale_with_probability() {
        let prediction = predict_success(&ProcessingTrace::default());
        let processing =
            analyze_processing(&ProcessingTrace::default(), &PerformanceTargets::default());
        let metrics = business_metrics(&processing, &prediction);

        assert_eq!(metrics.cost_efficiency.cost_per_video, 2.0);
        assert_eq!(metrics.cost_efficiency.cost_savings_per_video, 148.0);
        let expected_views = estimate_views(prediction.overall_success_probability);
        assert_eq!(metrics.revenue_projections.predicted_views, expected_views);
        assert_eq!(metrics.revenue_projections.break_even_views, 2000.0);
    }
}
