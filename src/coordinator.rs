use std::sync::Arc;
use std::time::Instant;

use crate::content::GeneratedContent;
use crate::context::GenerationContext;
use crate::error::GenError;
use crate::factory::GeneratorFactory;
use crate::params::GenerationParams;
use crate::quality::{ContentQualityMetrics, PlayerFeedback, QualityReport};
use crate::registry::{ContentGenerator, GeneratorRegistry};
use crate::seed::{SeedManager, SeedSnapshot};
use crate::validate::{ContentValidator, ValidationResult};

/// A produced artifact together with its structural findings. Validation
/// findings are data, never errors: an invalid artifact is still returned.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub content: GeneratedContent,
    pub validation: ValidationResult,
}

/// Per-session wiring of the generation core. Owns the seed manager;
/// created at session start and dropped at session end, so no state leaks
/// across sessions. Safe to share across request handlers behind an `Arc`.
pub struct GenerationCoordinator {
    seeds: Arc<SeedManager>,
    registry: Arc<GeneratorRegistry>,
    factory: GeneratorFactory,
    validator: ContentValidator,
    quality: Arc<ContentQualityMetrics>,
}

impl GenerationCoordinator {
    /// Build a coordinator with a fresh seed manager. A zero base seed
    /// falls back to a time-derived value for this run only.
    pub fn new(base_seed: i64, strict_validation: bool) -> Self {
        Self::with_seeds(Arc::new(SeedManager::new(base_seed)), strict_validation)
    }

    /// Build a coordinator whose seed manager was restored from a save.
    pub fn from_seed_snapshot(snapshot: SeedSnapshot, strict_validation: bool) -> Self {
        Self::with_seeds(Arc::new(SeedManager::restore(snapshot)), strict_validation)
    }

    fn with_seeds(seeds: Arc<SeedManager>, strict_validation: bool) -> Self {
        let registry = Arc::new(GeneratorRegistry::new());
        let metrics = Arc::new(crate::metrics::GenerationMetrics::new());
        Self {
            seeds,
            factory: GeneratorFactory::new(Arc::clone(&registry)),
            registry,
            validator: ContentValidator::new(strict_validation),
            quality: Arc::new(ContentQualityMetrics::new(metrics)),
        }
    }

    pub fn seeds(&self) -> &Arc<SeedManager> {
        &self.seeds
    }

    pub fn registry(&self) -> &Arc<GeneratorRegistry> {
        &self.registry
    }

    pub fn factory(&self) -> &GeneratorFactory {
        &self.factory
    }

    pub fn validator(&self) -> &ContentValidator {
        &self.validator
    }

    pub fn quality(&self) -> &Arc<ContentQualityMetrics> {
        &self.quality
    }

    pub fn register_generator(
        &self,
        namespace: &str,
        generator: Arc<dyn ContentGenerator>,
    ) -> Result<(), GenError> {
        self.registry.register(namespace, generator)
    }

    /// Run one generation request end to end: validate parameters, build a
    /// seeded context, dispatch through the factory, validate the artifact,
    /// and record the outcome.
    ///
    /// The caller's deadline is checked at call boundaries only; internal
    /// generator loops are not preempted. Observations already recorded
    /// when a deadline trips stay recorded.
    pub fn generate(
        &self,
        namespace: &str,
        name: &str,
        params: &GenerationParams,
    ) -> Result<GenerationOutcome, GenError> {
        let started = Instant::now();
        params.validate()?;
        let category = params.category();

        if self.seeds.is_derived(category, name) {
            self.quality.metrics().record_cache_hit();
        } else {
            self.quality.metrics().record_cache_miss();
        }
        let mut ctx = GenerationContext::new(Arc::clone(&self.seeds), category, name, params);
        tracing::debug!(namespace, generator = name, %category, "dispatching generation request");

        match self.factory.generate(namespace, name, &mut ctx, params) {
            Ok(content) => {
                let elapsed = started.elapsed();
                let validation = self.validator.validate(&content);
                // Best-effort observation; a failed validation is counted,
                // never escalated into the call path.
                self.quality
                    .record_content_generation(category, Ok(&content), elapsed);
                self.quality.record_validation(category, &validation);

                if started.elapsed() >= params.timeout {
                    return Err(GenError::DeadlineExceeded {
                        elapsed_ms: started.elapsed().as_millis() as u64,
                    });
                }
                Ok(GenerationOutcome {
                    content,
                    validation,
                })
            }
            Err(err) => {
                self.quality
                    .record_content_generation(category, Err(&err), started.elapsed());
                Err(err)
            }
        }
    }

    pub fn generate_quality_report(&self) -> QualityReport {
        self.quality.generate_quality_report()
    }

    pub fn record_player_feedback(&self, feedback: PlayerFeedback) {
        self.quality.record_player_feedback(feedback);
    }

    pub fn record_quest_completion(&self, completed: bool) {
        self.quality.record_quest_completion(completed);
    }

    /// Snapshot the seed tree for save-game persistence.
    pub fn save_seeds(&self) -> SeedSnapshot {
        self.seeds.snapshot()
    }

    pub fn save_seeds_json(&self) -> Result<String, GenError> {
        self.seeds.snapshot_json()
    }
}
