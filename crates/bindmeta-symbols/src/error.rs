//! Error types for candidate scanning

use bindmeta_ast::Location;
use thiserror::Error;

/// Errors raised while resolving candidate functions
///
/// All of these mean the declaration model handed over by the front-end is
/// inconsistent, so they abort generation.
#[derive(Debug, Clone, Error)]
pub enum ScanError {
    /// E-SCAN-001: a signature type the front-end could not bind
    #[error("could not resolve type `{text}` of {target} in `{owner}.{method}`")]
    UnresolvedType {
        method: String,
        owner: String,
        /// `parameter 'x'` or `return type`
        target: String,
        text: String,
        location: Location,
    },

    /// E-SCAN-002: entry-point annotation without a function name
    #[error("entry-point annotation on `{owner}.{method}` has no function name")]
    MissingFunctionName {
        method: String,
        owner: String,
        location: Location,
    },

    /// E-SCAN-003: two entry points claim the same function name
    #[error("function name `{name}` on `{owner}.{method}` is already used by `{first_entry_point}`")]
    DuplicateFunctionName {
        name: String,
        method: String,
        owner: String,
        first_entry_point: String,
        location: Location,
    },
}

impl ScanError {
    pub fn location(&self) -> &Location {
        match self {
            ScanError::UnresolvedType { location, .. } => location,
            ScanError::MissingFunctionName { location, .. } => location,
            ScanError::DuplicateFunctionName { location, .. } => location,
        }
    }

    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            ScanError::UnresolvedType { .. } => "E-SCAN-001",
            ScanError::MissingFunctionName { .. } => "E-SCAN-002",
            ScanError::DuplicateFunctionName { .. } => "E-SCAN-003",
        }
    }

    /// `Owner.Method` of the offending declaration
    pub fn declaration(&self) -> String {
        match self {
            ScanError::UnresolvedType { method, owner, .. }
            | ScanError::MissingFunctionName { method, owner, .. }
            | ScanError::DuplicateFunctionName { method, owner, .. } => {
                format!("{}.{}", owner, method)
            }
        }
    }
}
