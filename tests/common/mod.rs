use std::sync::Arc;

use procgen_core::{
    CategoryConstraints, ContentCategory, ContentGenerator, GenError, GeneratedContent,
    GenerationContext, GenerationCoordinator, GenerationParams, MapArtifact, MapConstraints,
    QuestArtifact, QuestConstraints, QuestStep, Tile,
};

/// Carves one rectangular room into a walled grid, door on the top edge.
/// Fully deterministic for a given context.
pub struct RoomCarver;

impl ContentGenerator for RoomCarver {
    fn name(&self) -> &str {
        "room-carver"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn category(&self) -> ContentCategory {
        ContentCategory::Map
    }

    fn validate_params(&self, params: &GenerationParams) -> Result<(), GenError> {
        match &params.constraints {
            CategoryConstraints::Map(c) if c.width >= 3 && c.height >= 3 => Ok(()),
            _ => Err(GenError::invalid_params(
                "room carver needs map constraints of at least 3x3",
            )),
        }
    }

    fn produce(
        &self,
        ctx: &mut GenerationContext,
        params: &GenerationParams,
    ) -> Result<GeneratedContent, GenError> {
        let CategoryConstraints::Map(constraints) = &params.constraints else {
            return Err(GenError::invalid_params("expected map constraints"));
        };
        let mut map = MapArtifact::filled(constraints.width, constraints.height, Tile::Wall);
        for y in 1..constraints.height - 1 {
            for x in 1..constraints.width - 1 {
                map.set_tile(x, y, Tile::Floor);
            }
        }
        let door_x = ctx.random_int_range(1, constraints.width as i64 - 2) as usize;
        map.set_tile(door_x, 0, Tile::Door);
        Ok(GeneratedContent::Map(map))
    }
}

pub const QUEST_VERBS: &[&str] = &["Recover", "Escort", "Scout", "Defend", "Deliver"];
pub const QUEST_TARGETS: &[&str] = &["the reliquary", "the caravan", "the pass", "the mill"];

/// Builds quests from fixed template tables, drawing the step count from a
/// separate phase stream.
pub struct QuestScribe;

impl ContentGenerator for QuestScribe {
    fn name(&self) -> &str {
        "quest-scribe"
    }

    fn version(&self) -> &str {
        "0.3.0"
    }

    fn category(&self) -> ContentCategory {
        ContentCategory::Quest
    }

    fn validate_params(&self, params: &GenerationParams) -> Result<(), GenError> {
        match &params.constraints {
            CategoryConstraints::Quest(_) => Ok(()),
            _ => Err(GenError::invalid_params("expected quest constraints")),
        }
    }

    fn produce(
        &self,
        ctx: &mut GenerationContext,
        params: &GenerationParams,
    ) -> Result<GeneratedContent, GenError> {
        let CategoryConstraints::Quest(constraints) = &params.constraints else {
            return Err(GenError::invalid_params("expected quest constraints"));
        };
        let verb = *ctx.random_choice(QUEST_VERBS).unwrap_or(&QUEST_VERBS[0]);
        let target = *ctx
            .random_choice(QUEST_TARGETS)
            .unwrap_or(&QUEST_TARGETS[0]);

        let min = constraints.min_steps as i64;
        let max = constraints.max_steps as i64;
        let step_count = {
            use rand::Rng;
            let steps_rng = ctx.sub_rng("steps");
            if min >= max { min } else { steps_rng.random_range(min..=max) }
        } as u32;
        let steps = (0..step_count)
            .map(|index| QuestStep {
                index,
                description: format!("{verb} stage {}", index + 1),
            })
            .collect();

        Ok(GeneratedContent::Quest(QuestArtifact {
            title: format!("{verb} {target}"),
            steps,
            reward_tier: params.difficulty / 4 + 1,
        }))
    }
}

/// A generator that lies about its category: registered as a map generator
/// but emits quests. Exercises the factory's type assertion.
pub struct Miscast;

impl ContentGenerator for Miscast {
    fn name(&self) -> &str {
        "miscast"
    }

    fn version(&self) -> &str {
        "0.0.1"
    }

    fn category(&self) -> ContentCategory {
        ContentCategory::Map
    }

    fn validate_params(&self, _params: &GenerationParams) -> Result<(), GenError> {
        Ok(())
    }

    fn produce(
        &self,
        _ctx: &mut GenerationContext,
        _params: &GenerationParams,
    ) -> Result<GeneratedContent, GenError> {
        Ok(GeneratedContent::Quest(QuestArtifact {
            title: "not a map".to_string(),
            steps: vec![QuestStep {
                index: 0,
                description: "oops".to_string(),
            }],
            reward_tier: 1,
        }))
    }
}

pub fn map_params(seed: i64) -> GenerationParams {
    GenerationParams::new(
        seed,
        CategoryConstraints::Map(MapConstraints {
            width: 10,
            height: 8,
            ..Default::default()
        }),
    )
}

pub fn quest_params(seed: i64) -> GenerationParams {
    GenerationParams::new(seed, CategoryConstraints::Quest(QuestConstraints::default()))
}

/// Coordinator with the stock test generators registered under "core".
pub fn build_coordinator(base_seed: i64) -> GenerationCoordinator {
    let coordinator = GenerationCoordinator::new(base_seed, true);
    coordinator
        .register_generator("core", Arc::new(RoomCarver))
        .unwrap();
    coordinator
        .register_generator("core", Arc::new(QuestScribe))
        .unwrap();
    coordinator
}
