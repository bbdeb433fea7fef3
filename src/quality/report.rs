use serde::Serialize;

/// Fixed component weights. They sum to 1.0.
pub const WEIGHT_PERFORMANCE: f64 = 0.20;
pub const WEIGHT_VARIETY: f64 = 0.20;
pub const WEIGHT_CONSISTENCY: f64 = 0.25;
pub const WEIGHT_ENGAGEMENT: f64 = 0.20;
pub const WEIGHT_STABILITY: f64 = 0.15;

/// Operator-facing thresholds checked by every report.
#[derive(Debug, Clone, Serialize)]
pub struct QualityThresholds {
    pub min_uniqueness: f64,
    pub min_consistency: f64,
    pub min_completion_rate: f64,
    pub max_error_rate: f64,
    pub max_generation_ms: f64,
    /// Minimum mean rating on the 1–5 scale.
    pub min_satisfaction: f64,
    pub min_system_health: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_uniqueness: 0.70,
            min_consistency: 0.80,
            min_completion_rate: 0.60,
            max_error_rate: 0.05,
            max_generation_ms: 5_000.0,
            min_satisfaction: 3.0,
            min_system_health: 0.90,
        }
    }
}

/// Pass/fail per threshold, in threshold order.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ThresholdChecks {
    pub uniqueness_ok: bool,
    pub consistency_ok: bool,
    pub completion_ok: bool,
    pub error_rate_ok: bool,
    pub generation_time_ok: bool,
    pub satisfaction_ok: bool,
    pub system_health_ok: bool,
}

impl ThresholdChecks {
    pub fn all_ok(&self) -> bool {
        self.uniqueness_ok
            && self.consistency_ok
            && self.completion_ok
            && self.error_rate_ok
            && self.generation_time_ok
            && self.satisfaction_ok
            && self.system_health_ok
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            Grade::A
        } else if score >= 0.8 {
            Grade::B
        } else if score >= 0.7 {
            Grade::C
        } else if score >= 0.6 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

/// Score trajectory across reports. Trend analysis is not implemented;
/// every report carries `Stable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

/// On-demand snapshot of content quality. Pure data; generating one never
/// persists anything.
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub performance: f64,
    pub variety: f64,
    pub consistency: f64,
    pub engagement: f64,
    pub stability: f64,
    pub overall: f64,
    pub grade: Grade,
    pub trend: Trend,
    pub thresholds: ThresholdChecks,
    pub recommendations: Vec<String>,
    pub critical_issues: Vec<String>,
}

/// Combine component scores with the fixed weight vector.
pub fn weighted_overall(
    performance: f64,
    variety: f64,
    consistency: f64,
    engagement: f64,
    stability: f64,
) -> f64 {
    performance * WEIGHT_PERFORMANCE
        + variety * WEIGHT_VARIETY
        + consistency * WEIGHT_CONSISTENCY
        + engagement * WEIGHT_ENGAGEMENT
        + stability * WEIGHT_STABILITY
}

/// Recommendations keyed off fixed component cut-points.
pub fn recommendations_for(
    performance: f64,
    variety: f64,
    consistency: f64,
    engagement: f64,
    stability: f64,
) -> Vec<String> {
    let mut recommendations = Vec::new();
    if performance < 0.6 {
        recommendations
            .push("generation latency or failure rate is high; profile slow generators".to_string());
    }
    if variety < 0.7 {
        recommendations.push(
            "output variety is low; widen generator parameter ranges or add templates".to_string(),
        );
    }
    if consistency < 0.8 {
        recommendations
            .push("coherence scores are degraded; review recent world or narrative changes".to_string());
    }
    if engagement < 0.6 {
        recommendations
            .push("players abandon or rate content poorly; review pacing and rewards".to_string());
    }
    if stability < 0.9 {
        recommendations
            .push("generator error rates are elevated; inspect the critical-error log".to_string());
    }
    if recommendations.is_empty() {
        recommendations.push("content quality is healthy; no action needed".to_string());
    }
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let sum = WEIGHT_PERFORMANCE
            + WEIGHT_VARIETY
            + WEIGHT_CONSISTENCY
            + WEIGHT_ENGAGEMENT
            + WEIGHT_STABILITY;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn grade_boundaries() {
        assert_eq!(Grade::from_score(0.90), Grade::A);
        assert_eq!(Grade::from_score(0.899999), Grade::B);
        assert_eq!(Grade::from_score(0.80), Grade::B);
        assert_eq!(Grade::from_score(0.75), Grade::C);
        assert_eq!(Grade::from_score(0.60), Grade::D);
        assert_eq!(Grade::from_score(0.59), Grade::F);
        assert_eq!(Grade::from_score(0.0), Grade::F);
    }

    #[test]
    fn one_weak_component_cannot_cross_a_grade_alone() {
        // performance 0.4, everything else 1.0:
        // 0.4 * 0.20 + 1.0 * 0.80 = 0.92, still an A.
        let overall = weighted_overall(0.4, 1.0, 1.0, 1.0, 1.0);
        assert!((overall - 0.92).abs() < 1e-12);
        assert_eq!(Grade::from_score(overall), Grade::A);
    }

    #[test]
    fn healthy_components_recommend_nothing_actionable() {
        let recommendations = recommendations_for(1.0, 1.0, 1.0, 1.0, 1.0);
        assert_eq!(recommendations.len(), 1);
        assert!(recommendations[0].contains("healthy"));
    }

    #[test]
    fn each_weak_component_adds_a_recommendation() {
        let recommendations = recommendations_for(0.1, 0.1, 0.1, 0.1, 0.1);
        assert_eq!(recommendations.len(), 5);
    }

    #[test]
    fn default_thresholds_match_operator_contract() {
        let thresholds = QualityThresholds::default();
        assert_eq!(thresholds.min_uniqueness, 0.70);
        assert_eq!(thresholds.min_consistency, 0.80);
        assert_eq!(thresholds.min_completion_rate, 0.60);
        assert_eq!(thresholds.max_error_rate, 0.05);
        assert_eq!(thresholds.max_generation_ms, 5_000.0);
        assert_eq!(thresholds.min_satisfaction, 3.0);
        assert_eq!(thresholds.min_system_health, 0.90);
    }
}
