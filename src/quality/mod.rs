mod consistency;
mod engagement;
mod report;
mod stability;
mod variety;

pub use consistency::{ConsistencyScores, ConsistencyTracker};
pub use engagement::{EngagementTracker, MAX_RATING, MIN_RATING, PlayerFeedback};
pub use report::{
    Grade, QualityReport, QualityThresholds, ThresholdChecks, Trend, WEIGHT_CONSISTENCY,
    WEIGHT_ENGAGEMENT, WEIGHT_PERFORMANCE, WEIGHT_STABILITY, WEIGHT_VARIETY, recommendations_for,
    weighted_overall,
};
pub use stability::StabilityTracker;
pub use variety::VarietyTracker;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::category::ContentCategory;
use crate::content::GeneratedContent;
use crate::error::GenError;
use crate::metrics::{GenerationMetrics, MetricsSnapshot};
use crate::validate::ValidationResult;

struct Assessment {
    overall: f64,
    grade: Grade,
}

/// Composite quality engine: generation metrics plus the variety,
/// consistency, engagement, and stability trackers, each behind its own
/// lock. Recording is best-effort and never fails a generation call.
pub struct ContentQualityMetrics {
    metrics: Arc<GenerationMetrics>,
    thresholds: QualityThresholds,
    variety: RwLock<VarietyTracker>,
    consistency: RwLock<ConsistencyTracker>,
    engagement: RwLock<EngagementTracker>,
    stability: RwLock<StabilityTracker>,
    assessment: RwLock<Assessment>,
}

impl ContentQualityMetrics {
    pub fn new(metrics: Arc<GenerationMetrics>) -> Self {
        Self::with_thresholds(metrics, QualityThresholds::default())
    }

    pub fn with_thresholds(metrics: Arc<GenerationMetrics>, thresholds: QualityThresholds) -> Self {
        Self {
            metrics,
            thresholds,
            variety: RwLock::new(VarietyTracker::new()),
            consistency: RwLock::new(ConsistencyTracker::new()),
            engagement: RwLock::new(EngagementTracker::new()),
            stability: RwLock::new(StabilityTracker::new()),
            assessment: RwLock::new(Assessment {
                overall: 1.0,
                grade: Grade::A,
            }),
        }
    }

    pub fn metrics(&self) -> &GenerationMetrics {
        &self.metrics
    }

    pub fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }

    /// Single ingestion point for generation outcomes. Errors raise the
    /// category's stability rate; successes update latency, hash the
    /// artifact for variety, and notify the consistency tracker.
    pub fn record_content_generation(
        &self,
        category: ContentCategory,
        outcome: Result<&GeneratedContent, &GenError>,
        duration: Duration,
    ) {
        match outcome {
            Ok(content) => {
                self.metrics.record_generation(category, duration, true);
                self.variety
                    .write()
                    .record_hash(category, content.content_hash());
                self.consistency.write().observe_artifact(category, content);
                self.stability.write().record_success(category, duration);
            }
            Err(err) => {
                self.metrics.record_generation(category, duration, false);
                self.stability
                    .write()
                    .record_error(category, &err.to_string());
            }
        }
    }

    /// Fold a validation outcome into stability as a soft signal.
    pub fn record_validation(&self, category: ContentCategory, result: &ValidationResult) {
        self.stability
            .write()
            .record_validation(category, result.is_valid());
    }

    pub fn record_player_feedback(&self, feedback: PlayerFeedback) {
        self.engagement.write().record_feedback(feedback);
    }

    pub fn record_quest_completion(&self, completed: bool) {
        self.engagement.write().record_quest_completion(completed);
    }

    /// Push externally computed coherence scalars into the consistency
    /// tracker.
    pub fn set_consistency_scores(&self, scores: ConsistencyScores) {
        self.consistency.write().set_scores(scores);
    }

    /// Overall score from the most recent report; 1.0 before the first one.
    pub fn overall_quality_score(&self) -> f64 {
        self.assessment.read().overall
    }

    pub fn last_quality_assessment(&self) -> Grade {
        self.assessment.read().grade
    }

    /// Recompute every component fresh, combine with the fixed weights,
    /// bucket the grade, and evaluate thresholds. The only side effect is
    /// updating the engine's own last-assessment fields.
    pub fn generate_quality_report(&self) -> QualityReport {
        let snapshot = self.metrics.snapshot();
        let performance = performance_score(&snapshot, self.thresholds.max_generation_ms);

        let variety = self.variety.read().overall_uniqueness();
        let consistency = self.consistency.read().weighted_score();

        let (engagement, completion_rate, satisfaction) = {
            let engagement = self.engagement.read();
            (
                engagement.score(),
                engagement.completion_rate(),
                engagement.average_satisfaction(),
            )
        };

        let (system_health, critical_issues) = {
            let stability = self.stability.read();
            (stability.system_health(), stability.critical_errors().to_vec())
        };
        let stability_score = system_health;

        let overall =
            weighted_overall(performance, variety, consistency, engagement, stability_score);
        let grade = Grade::from_score(overall);

        let thresholds = ThresholdChecks {
            uniqueness_ok: variety >= self.thresholds.min_uniqueness,
            consistency_ok: consistency >= self.thresholds.min_consistency,
            // Missing signals pass: no resolved quests or ratings yet.
            completion_ok: completion_rate
                .is_none_or(|rate| rate >= self.thresholds.min_completion_rate),
            error_rate_ok: snapshot.error_ratio() <= self.thresholds.max_error_rate,
            generation_time_ok: snapshot.average_duration_ms()
                <= self.thresholds.max_generation_ms,
            satisfaction_ok: satisfaction
                .is_none_or(|s| s >= self.thresholds.min_satisfaction),
            system_health_ok: system_health >= self.thresholds.min_system_health,
        };

        let recommendations =
            recommendations_for(performance, variety, consistency, engagement, stability_score);

        let mut issues = critical_issues;
        if !thresholds.error_rate_ok {
            issues.push(format!(
                "error rate {:.3} exceeds maximum {:.3}",
                snapshot.error_ratio(),
                self.thresholds.max_error_rate
            ));
        }
        if !thresholds.system_health_ok {
            issues.push(format!(
                "system health {system_health:.3} below minimum {:.3}",
                self.thresholds.min_system_health
            ));
        }

        let mut assessment = self.assessment.write();
        assessment.overall = overall;
        assessment.grade = grade;

        QualityReport {
            performance,
            variety,
            consistency,
            engagement,
            stability: stability_score,
            overall,
            grade,
            trend: Trend::Stable,
            thresholds,
            recommendations,
            critical_issues: issues,
        }
    }
}

/// Performance component: mean of a latency score falling linearly to zero
/// at the generation-time budget and the success ratio of all attempts.
fn performance_score(snapshot: &MetricsSnapshot, max_generation_ms: f64) -> f64 {
    let latency_score = 1.0 - (snapshot.average_duration_ms() / max_generation_ms).min(1.0);
    let success_score = 1.0 - snapshot.error_ratio();
    (latency_score + success_score) / 2.0
}
