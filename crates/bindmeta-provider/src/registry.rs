//! Host-side provider registration

use crate::{FunctionMetadataProvider, ProviderError, Result};
use bindmeta_ast::FunctionMetadata;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Well-known slot the host resolves its metadata provider from
pub const METADATA_PROVIDER_SLOT: &str = "function-metadata-provider";

/// Singleton providers keyed by slot
///
/// Each slot holds at most one provider for the lifetime of the registry.
#[derive(Default)]
pub struct ProviderRegistry {
    slots: HashMap<String, Arc<dyn FunctionMetadataProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `provider` under `slot`; a second registration is rejected
    pub fn register(&mut self, slot: &str, provider: Arc<dyn FunctionMetadataProvider>) -> Result<()> {
        if self.slots.contains_key(slot) {
            return Err(ProviderError::AlreadyRegistered(slot.to_string()));
        }
        info!(slot, "metadata provider registered");
        self.slots.insert(slot.to_string(), provider);
        Ok(())
    }

    /// Install the generated provider as the host's metadata provider
    pub fn configure_generated_provider(&mut self, provider: Arc<dyn FunctionMetadataProvider>) -> Result<()> {
        self.register(METADATA_PROVIDER_SLOT, provider)
    }

    pub fn get(&self, slot: &str) -> Option<Arc<dyn FunctionMetadataProvider>> {
        self.slots.get(slot).cloned()
    }

    pub fn metadata_provider(&self) -> Result<Arc<dyn FunctionMetadataProvider>> {
        self.get(METADATA_PROVIDER_SLOT)
            .ok_or_else(|| ProviderError::NotRegistered(METADATA_PROVIDER_SLOT.to_string()))
    }

    /// Resolve the metadata provider and ask it for the records
    pub fn function_metadata(&self, directory: &Path) -> Result<Vec<FunctionMetadata>> {
        self.metadata_provider()?.function_metadata(directory)
    }

    pub fn is_registered(&self, slot: &str) -> bool {
        self.slots.contains_key(slot)
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut slots: Vec<_> = self.slots.keys().collect();
        slots.sort();
        f.debug_struct("ProviderRegistry").field("slots", &slots).finish()
    }
}
