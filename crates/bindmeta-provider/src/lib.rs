//! Bindmeta Provider - how a host obtains function metadata
//!
//! Two providers are available:
//! - in-memory records (what generated provider modules build on)
//! - the JSON artifact written next to the compiled function app
//!
//! A host resolves its provider from a [`ProviderRegistry`] slot.

mod error;
mod provider;
mod artifact;
mod registry;

pub use error::{ProviderError, Result};
pub use provider::{FunctionMetadataProvider, StaticMetadataProvider};
pub use artifact::{write_artifact, write_artifact_to, JsonArtifactProvider, METADATA_FILE_NAME};
pub use registry::{ProviderRegistry, METADATA_PROVIDER_SLOT};

pub use bindmeta_ast::FunctionMetadata;
