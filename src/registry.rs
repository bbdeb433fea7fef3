use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::category::ContentCategory;
use crate::content::GeneratedContent;
use crate::context::GenerationContext;
use crate::error::GenError;
use crate::params::GenerationParams;

/// A pluggable content generator. Implementations must be deterministic
/// given identical parameters and keep no mutable state across calls; all
/// randomness comes from the provided context.
pub trait ContentGenerator: Send + Sync {
    /// Algorithm name, unique within a namespace.
    fn name(&self) -> &str;

    fn version(&self) -> &str;

    fn category(&self) -> ContentCategory;

    /// Generator-specific parameter checks, run after the core's range checks.
    fn validate_params(&self, params: &GenerationParams) -> Result<(), GenError>;

    fn produce(
        &self,
        ctx: &mut GenerationContext,
        params: &GenerationParams,
    ) -> Result<GeneratedContent, GenError>;
}

/// Descriptive entry in a registry listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorInfo {
    pub namespace: String,
    pub name: String,
    pub category: ContentCategory,
    pub version: String,
}

/// Thread-safe catalogue mapping (namespace, algorithm name) to generator
/// implementations. Concurrent-read-heavy, rare-write. Created per session
/// and injected where needed; never a process-wide global.
pub struct GeneratorRegistry {
    inner: RwLock<HashMap<String, HashMap<String, Arc<dyn ContentGenerator>>>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Register a generator under a namespace. A duplicate (namespace, name)
    /// pair is a reported error and leaves the registry unchanged.
    pub fn register(
        &self,
        namespace: &str,
        generator: Arc<dyn ContentGenerator>,
    ) -> Result<(), GenError> {
        let name = generator.name().to_string();
        let mut inner = self.inner.write();
        let entry = inner.entry(namespace.to_string()).or_default();
        if entry.contains_key(&name) {
            tracing::warn!(namespace, generator = %name, "rejected duplicate generator registration");
            return Err(GenError::DuplicateGenerator {
                namespace: namespace.to_string(),
                name,
            });
        }
        entry.insert(name, generator);
        Ok(())
    }

    pub fn get(&self, namespace: &str, name: &str) -> Result<Arc<dyn ContentGenerator>, GenError> {
        self.inner
            .read()
            .get(namespace)
            .and_then(|entries| entries.get(name))
            .cloned()
            .ok_or_else(|| GenError::GeneratorNotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }

    pub fn contains(&self, namespace: &str, name: &str) -> bool {
        self.inner
            .read()
            .get(namespace)
            .is_some_and(|entries| entries.contains_key(name))
    }

    /// Stable owned listing of every registered generator, sorted by
    /// (namespace, name). Safe against concurrent mutation.
    pub fn list_all(&self) -> Vec<GeneratorInfo> {
        let inner = self.inner.read();
        let mut infos: Vec<GeneratorInfo> = inner
            .iter()
            .flat_map(|(namespace, entries)| {
                entries.values().map(|generator| GeneratorInfo {
                    namespace: namespace.clone(),
                    name: generator.name().to_string(),
                    category: generator.category(),
                    version: generator.version().to_string(),
                })
            })
            .collect();
        infos.sort_by(|a, b| (&a.namespace, &a.name).cmp(&(&b.namespace, &b.name)));
        infos
    }

    pub fn len(&self) -> usize {
        self.inner.read().values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{CharacterArtifact, GeneratedContent};

    struct StubGenerator {
        name: &'static str,
        category: ContentCategory,
    }

    impl ContentGenerator for StubGenerator {
        fn name(&self) -> &str {
            self.name
        }

        fn version(&self) -> &str {
            "1.0.0"
        }

        fn category(&self) -> ContentCategory {
            self.category
        }

        fn validate_params(&self, _params: &GenerationParams) -> Result<(), GenError> {
            Ok(())
        }

        fn produce(
            &self,
            _ctx: &mut GenerationContext,
            _params: &GenerationParams,
        ) -> Result<GeneratedContent, GenError> {
            Ok(GeneratedContent::Character(CharacterArtifact {
                name: "stub".to_string(),
                level: 1,
                role: "npc".to_string(),
            }))
        }
    }

    fn stub(name: &'static str, category: ContentCategory) -> Arc<dyn ContentGenerator> {
        Arc::new(StubGenerator { name, category })
    }

    #[test]
    fn register_and_get() {
        let registry = GeneratorRegistry::new();
        registry
            .register("core", stub("rooms", ContentCategory::Map))
            .unwrap();
        let generator = registry.get("core", "rooms").unwrap();
        assert_eq!(generator.name(), "rooms");
    }

    #[test]
    fn duplicate_registration_errors_and_leaves_registry_unchanged() {
        let registry = GeneratorRegistry::new();
        registry
            .register("core", stub("rooms", ContentCategory::Map))
            .unwrap();
        let err = registry
            .register("core", stub("rooms", ContentCategory::Quest))
            .unwrap_err();
        assert_eq!(
            err,
            GenError::DuplicateGenerator {
                namespace: "core".to_string(),
                name: "rooms".to_string(),
            }
        );
        assert_eq!(registry.len(), 1);
        // The original registration survives.
        assert_eq!(
            registry.get("core", "rooms").unwrap().category(),
            ContentCategory::Map
        );
    }

    #[test]
    fn same_name_allowed_across_namespaces() {
        let registry = GeneratorRegistry::new();
        registry
            .register("core", stub("rooms", ContentCategory::Map))
            .unwrap();
        registry
            .register("mods", stub("rooms", ContentCategory::Map))
            .unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn missing_lookup_is_typed_error() {
        let registry = GeneratorRegistry::new();
        let err = registry.get("core", "nope").err().unwrap();
        assert!(matches!(err, GenError::GeneratorNotFound { .. }));
    }

    #[test]
    fn list_all_sorted_and_owned() {
        let registry = GeneratorRegistry::new();
        registry
            .register("mods", stub("caves", ContentCategory::Map))
            .unwrap();
        registry
            .register("core", stub("rooms", ContentCategory::Map))
            .unwrap();
        registry
            .register("core", stub("loot", ContentCategory::Item))
            .unwrap();

        let infos = registry.list_all();
        let keys: Vec<_> = infos
            .iter()
            .map(|i| (i.namespace.as_str(), i.name.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![("core", "loot"), ("core", "rooms"), ("mods", "caves")]
        );
    }

    #[test]
    fn concurrent_registration_and_listing() {
        let registry = Arc::new(GeneratorRegistry::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(std::thread::spawn(move || {
                let name: &'static str = ["a", "b", "c", "d", "e", "f", "g", "h"][i];
                registry
                    .register("core", stub(name, ContentCategory::Map))
                    .unwrap();
                registry.list_all()
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.len(), 8);
    }
}
