pub mod category;
pub mod content;
pub mod context;
pub mod coordinator;
pub mod error;
pub mod factory;
pub mod metrics;
pub mod params;
pub mod quality;
pub mod registry;
pub mod seed;
pub mod validate;

pub use category::ContentCategory;
pub use content::{
    CharacterArtifact, FactionArtifact, FactionRelation, GeneratedContent, GeneratedItem,
    ItemArtifact, MapArtifact, QuestArtifact, QuestStep, Rarity, SettlementArtifact, Tile,
};
pub use context::GenerationContext;
pub use coordinator::{GenerationCoordinator, GenerationOutcome};
pub use error::GenError;
pub use factory::GeneratorFactory;
pub use metrics::{CategoryStats, GenerationMetrics, MetricsSnapshot};
pub use params::{
    CategoryConstraints, CharacterConstraints, FactionConstraints, GenerationParams,
    ItemConstraints, MapConstraints, QuestConstraints, SettlementConstraints, WorldView,
};
pub use quality::{
    ConsistencyScores, ContentQualityMetrics, Grade, PlayerFeedback, QualityReport,
    QualityThresholds, Trend,
};
pub use registry::{ContentGenerator, GeneratorInfo, GeneratorRegistry};
pub use seed::{SeedManager, SeedSnapshot, create_sub_rng};
pub use validate::{ContentValidator, ValidationResult};
