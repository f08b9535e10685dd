//! Metadata provider trait and the in-memory implementation

use crate::Result;
use bindmeta_ast::FunctionMetadata;
use std::path::Path;

/// Source of function metadata for a host
///
/// The host calls this once at startup with the directory it loads the
/// function app from. Implementations are shared across threads.
pub trait FunctionMetadataProvider: Send + Sync {
    /// All function records, in generation order
    fn function_metadata(&self, directory: &Path) -> Result<Vec<FunctionMetadata>>;
}

/// Provider over records already in memory
///
/// Ignores the directory. Used for generated providers and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadataProvider {
    records: Vec<FunctionMetadata>,
}

impl StaticMetadataProvider {
    pub fn new(records: Vec<FunctionMetadata>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FunctionMetadataProvider for StaticMetadataProvider {
    fn function_metadata(&self, _directory: &Path) -> Result<Vec<FunctionMetadata>> {
        Ok(self.records.clone())
    }
}
