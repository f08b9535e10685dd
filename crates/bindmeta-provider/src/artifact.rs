//! JSON metadata artifact on disk

use crate::{FunctionMetadataProvider, ProviderError, Result};
use bindmeta_ast::FunctionMetadata;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the artifact inside the function app directory
pub const METADATA_FILE_NAME: &str = "functions.metadata.json";

/// Provider reading the artifact written by the generator
#[derive(Debug, Clone)]
pub struct JsonArtifactProvider {
    file_name: String,
}

impl JsonArtifactProvider {
    pub fn new() -> Self {
        Self {
            file_name: METADATA_FILE_NAME.to_string(),
        }
    }

    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    pub fn artifact_path(&self, directory: &Path) -> PathBuf {
        directory.join(&self.file_name)
    }
}

impl Default for JsonArtifactProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionMetadataProvider for JsonArtifactProvider {
    fn function_metadata(&self, directory: &Path) -> Result<Vec<FunctionMetadata>> {
        let path = self.artifact_path(directory);
        let text = fs::read_to_string(&path).map_err(|source| ProviderError::Io {
            path: path.clone(),
            source,
        })?;
        let records: Vec<FunctionMetadata> =
            serde_json::from_str(&text).map_err(|source| ProviderError::Json {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), functions = records.len(), "metadata artifact loaded");
        Ok(records)
    }
}

/// Write records as the artifact into `directory`, returning its path
pub fn write_artifact(directory: &Path, records: &[FunctionMetadata], pretty: bool) -> Result<PathBuf> {
    let path = directory.join(METADATA_FILE_NAME);
    write_artifact_to(&path, records, pretty)?;
    Ok(path)
}

/// Write records as a JSON array to an explicit path
pub fn write_artifact_to(path: &Path, records: &[FunctionMetadata], pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    }
    .map_err(|source| ProviderError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, json).map_err(|source| ProviderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
