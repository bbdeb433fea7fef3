use std::sync::Arc;

use crate::category::ContentCategory;
use crate::content::{
    CharacterArtifact, FactionArtifact, GeneratedContent, ItemArtifact, MapArtifact,
    QuestArtifact, SettlementArtifact,
};
use crate::context::GenerationContext;
use crate::error::GenError;
use crate::params::GenerationParams;
use crate::registry::GeneratorRegistry;

/// Stateless dispatch façade over a registry. Each typed entry point looks
/// up the generator, validates parameters, invokes it, and asserts the
/// returned artifact's category; a mismatch is a typed error naming expected
/// and actual kinds, never a silent nil.
pub struct GeneratorFactory {
    registry: Arc<GeneratorRegistry>,
}

impl GeneratorFactory {
    pub fn new(registry: Arc<GeneratorRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<GeneratorRegistry> {
        &self.registry
    }

    /// Category-agnostic dispatch: the expected category comes from the
    /// parameter block's constraint variant.
    pub fn generate(
        &self,
        namespace: &str,
        name: &str,
        ctx: &mut GenerationContext,
        params: &GenerationParams,
    ) -> Result<GeneratedContent, GenError> {
        let expected = params.category();
        let content = self.invoke(namespace, name, ctx, params)?;
        if content.category() != expected {
            return Err(GenError::CategoryMismatch {
                expected,
                actual: content.category(),
            });
        }
        Ok(content)
    }

    pub fn generate_map(
        &self,
        namespace: &str,
        name: &str,
        ctx: &mut GenerationContext,
        params: &GenerationParams,
    ) -> Result<MapArtifact, GenError> {
        match self.invoke(namespace, name, ctx, params)? {
            GeneratedContent::Map(map) => Ok(map),
            other => Err(mismatch(ContentCategory::Map, &other)),
        }
    }

    pub fn generate_settlement(
        &self,
        namespace: &str,
        name: &str,
        ctx: &mut GenerationContext,
        params: &GenerationParams,
    ) -> Result<SettlementArtifact, GenError> {
        match self.invoke(namespace, name, ctx, params)? {
            GeneratedContent::Settlement(settlement) => Ok(settlement),
            other => Err(mismatch(ContentCategory::Settlement, &other)),
        }
    }

    pub fn generate_faction(
        &self,
        namespace: &str,
        name: &str,
        ctx: &mut GenerationContext,
        params: &GenerationParams,
    ) -> Result<FactionArtifact, GenError> {
        match self.invoke(namespace, name, ctx, params)? {
            GeneratedContent::Faction(faction) => Ok(faction),
            other => Err(mismatch(ContentCategory::Faction, &other)),
        }
    }

    pub fn generate_quest(
        &self,
        namespace: &str,
        name: &str,
        ctx: &mut GenerationContext,
        params: &GenerationParams,
    ) -> Result<QuestArtifact, GenError> {
        match self.invoke(namespace, name, ctx, params)? {
            GeneratedContent::Quest(quest) => Ok(quest),
            other => Err(mismatch(ContentCategory::Quest, &other)),
        }
    }

    pub fn generate_items(
        &self,
        namespace: &str,
        name: &str,
        ctx: &mut GenerationContext,
        params: &GenerationParams,
    ) -> Result<ItemArtifact, GenError> {
        match self.invoke(namespace, name, ctx, params)? {
            GeneratedContent::Item(items) => Ok(items),
            other => Err(mismatch(ContentCategory::Item, &other)),
        }
    }

    pub fn generate_character(
        &self,
        namespace: &str,
        name: &str,
        ctx: &mut GenerationContext,
        params: &GenerationParams,
    ) -> Result<CharacterArtifact, GenError> {
        match self.invoke(namespace, name, ctx, params)? {
            GeneratedContent::Character(character) => Ok(character),
            other => Err(mismatch(ContentCategory::Character, &other)),
        }
    }

    /// Lookup, validate, invoke. Parameter validation runs before any
    /// generation work; generator failures are wrapped with the generator's
    /// name for context.
    fn invoke(
        &self,
        namespace: &str,
        name: &str,
        ctx: &mut GenerationContext,
        params: &GenerationParams,
    ) -> Result<GeneratedContent, GenError> {
        let generator = self.registry.get(namespace, name)?;
        params.validate()?;
        generator.validate_params(params)?;
        generator.produce(ctx, params).map_err(|err| match err {
            wrapped @ GenError::Produce { .. } => wrapped,
            other => GenError::Produce {
                generator: format!("{namespace}/{name}"),
                reason: other.to_string(),
            },
        })
    }
}

fn mismatch(expected: ContentCategory, actual: &GeneratedContent) -> GenError {
    GenError::CategoryMismatch {
        expected,
        actual: actual.category(),
    }
}
