//! Bindmeta Checker
//!
//! Classifies the annotations of each candidate function into bindings and
//! enforces the per-function invariants.

mod catalog;
mod classifier;
mod validator;
mod diagnostics;

pub use catalog::*;
pub use classifier::*;
pub use validator::Validator;
pub use diagnostics::*;

use bindmeta_ast::{Conventions, Location};
use bindmeta_symbols::ResolvedFunction;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Error)]
pub enum CheckError {
    /// E-BIND-001
    #[error("function `{function}` has multiple output binding annotations on the method: {}", annotations.join(", "))]
    MultipleMethodOutputs {
        function: String,
        owner: String,
        annotations: Vec<String>,
        location: Location,
    },

    /// E-BIND-002
    #[error("function `{function}` declares more than one HTTP response binding: {}", bindings.join(", "))]
    MultipleHttpResponses {
        function: String,
        owner: String,
        bindings: Vec<String>,
        location: Location,
    },

    /// E-BIND-003
    #[error("malformed annotation `{annotation}` on `{target}` in function `{function}`: {reason}")]
    MalformedAnnotation {
        function: String,
        owner: String,
        annotation: String,
        target: String,
        reason: String,
        location: Location,
    },

    /// E-BIND-004
    #[error("return-type member `{member}` of function `{function}` has more than one binding annotation")]
    MultipleMemberOutputs {
        function: String,
        owner: String,
        member: String,
        location: Location,
    },

    /// E-BIND-005
    #[error("function `{function}` has more than one binding named `{name}`")]
    DuplicateBindingName {
        function: String,
        owner: String,
        name: String,
        location: Location,
    },

    /// W-BIND-001 (soft)
    #[error("`{annotation}` on `{target}` in function `{function}` is an in-process binding and is not supported")]
    LegacyBinding {
        function: String,
        owner: String,
        annotation: String,
        target: String,
        location: Location,
    },
}

impl CheckError {
    pub fn location(&self) -> &Location {
        match self {
            CheckError::MultipleMethodOutputs { location, .. }
            | CheckError::MultipleHttpResponses { location, .. }
            | CheckError::MalformedAnnotation { location, .. }
            | CheckError::MultipleMemberOutputs { location, .. }
            | CheckError::DuplicateBindingName { location, .. }
            | CheckError::LegacyBinding { location, .. } => location,
        }
    }

    /// Function name and owning type of the offending declaration
    pub fn function(&self) -> (&str, &str) {
        match self {
            CheckError::MultipleMethodOutputs { function, owner, .. }
            | CheckError::MultipleHttpResponses { function, owner, .. }
            | CheckError::MalformedAnnotation { function, owner, .. }
            | CheckError::MultipleMemberOutputs { function, owner, .. }
            | CheckError::DuplicateBindingName { function, owner, .. }
            | CheckError::LegacyBinding { function, owner, .. } => (function, owner),
        }
    }

    /// Whether this error blocks generation for the function
    pub fn is_hard_error(&self) -> bool {
        !matches!(self, CheckError::LegacyBinding { .. })
    }

    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            CheckError::MultipleMethodOutputs { .. } => "E-BIND-001",
            CheckError::MultipleHttpResponses { .. } => "E-BIND-002",
            CheckError::MalformedAnnotation { .. } => "E-BIND-003",
            CheckError::MultipleMemberOutputs { .. } => "E-BIND-004",
            CheckError::DuplicateBindingName { .. } => "E-BIND-005",
            CheckError::LegacyBinding { .. } => "W-BIND-001",
        }
    }
}

/// A candidate whose bindings passed validation
#[derive(Debug, Clone)]
pub struct CheckedFunction<'a> {
    pub function: ResolvedFunction<'a>,
    /// Bindings in pass order
    pub bindings: Vec<ClassifiedBinding<'a>>,
    /// Soft errors that did not block the function
    pub warnings: Vec<CheckError>,
}

/// Classify and validate one candidate
///
/// # Returns
/// * `Ok(CheckedFunction)` - bindings ready for assembly, plus warnings
/// * `Err(errors)` - at least one hard error; warnings are included
pub fn check_function<'a>(
    function: ResolvedFunction<'a>,
    catalog: &'a BindingCatalog,
    conventions: &'a Conventions,
) -> Result<CheckedFunction<'a>, Vec<CheckError>> {
    let classification = Classifier::new(catalog, conventions).classify(&function);
    let errors = Validator::new(&function).validate(&classification);

    if errors.iter().any(|e| e.is_hard_error()) {
        return Err(errors);
    }

    debug!(
        function = %function.name,
        bindings = classification.bindings.len(),
        "bindings classified"
    );
    Ok(CheckedFunction {
        function,
        bindings: classification.bindings,
        warnings: errors,
    })
}
