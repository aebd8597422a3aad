use dashmap::DashMap;

/// Store for learned symbol mappings: the user types `NVIDIA`, the feed
/// resolves `NVD.F`, and the mapping is kept so the next lookup skips the
/// variant search. Persistence, if any, belongs to the host application.
pub trait SymbolMappingRepositoryTrait: Send + Sync {
    fn get_mapping(&self, user_symbol: &str) -> Option<String>;
    fn save_mapping(&self, user_symbol: &str, resolved_symbol: &str);
}

/// Process-local mapping store backed by a concurrent map.
#[derive(Default)]
pub struct InMemorySymbolMappingRepository {
    mappings: DashMap<String, String>,
}

impl InMemorySymbolMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SymbolMappingRepositoryTrait for InMemorySymbolMappingRepository {
    fn get_mapping(&self, user_symbol: &str) -> Option<String> {
        self.mappings
            .get(&user_symbol.trim().to_uppercase())
            .map(|entry| entry.value().clone())
    }

    fn save_mapping(&self, user_symbol: &str, resolved_symbol: &str) {
        self.mappings.insert(
            user_symbol.trim().to_uppercase(),
            resolved_symbol.to_string(),
        );
    }
}
