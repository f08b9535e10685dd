//! Diagnostic context and fix hints
//!
//! Flattens scan and check errors into one shape that reporters can render
//! without matching on every variant.

use bindmeta_ast::Location;
use bindmeta_symbols::ScanError;
use crate::CheckError;

/// A diagnostic with context and an optional hint
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Error code (e.g., "E-BIND-002")
    pub code: String,
    pub severity: Severity,
    /// One-line message, the error's Display output
    pub message: String,
    /// Declaration the diagnostic is about
    pub declaration: String,
    /// Primary source location
    pub location: Location,
    /// Suggested fix, if one is obvious
    pub help: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl Diagnostic {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        declaration: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            code: code.into(),
            severity: Severity::Error,
            message: message.into(),
            declaration: declaration.into(),
            location,
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Format the diagnostic as plain text
    pub fn format_simple(&self) -> String {
        let mut output = format!(
            "{}[{}]: {}\n  --> {} ({})\n",
            self.severity.as_str(),
            self.code,
            self.message,
            self.location,
            self.declaration
        );

        if let Some(help) = &self.help {
            output.push_str(&format!("  help: {}\n", help));
        }

        output
    }
}

impl From<&CheckError> for Diagnostic {
    fn from(error: &CheckError) -> Self {
        let (function, owner) = error.function();
        let diagnostic = Diagnostic::new(
            error.code(),
            error.to_string(),
            format!("{} ({})", function, owner),
            error.location().clone(),
        );

        let diagnostic = match error {
            CheckError::MultipleMethodOutputs { .. } => diagnostic.with_help(
                "return a type whose members carry the output annotations instead",
            ),
            CheckError::MultipleHttpResponses { .. } => {
                diagnostic.with_help("keep a single HTTP response value per function")
            }
            CheckError::MalformedAnnotation { .. } => {
                diagnostic.with_help("pass the arguments of one of the annotation's constructors")
            }
            CheckError::MultipleMemberOutputs { member, .. } => {
                diagnostic.with_help(format!("split `{}` into one member per output", member))
            }
            CheckError::DuplicateBindingName { name, .. } => {
                diagnostic.with_help(format!("rename one of the `{}` bindings", name))
            }
            CheckError::LegacyBinding { annotation, .. } => diagnostic
                .with_severity(Severity::Warning)
                .with_help(format!(
                    "replace `{}` with its Microsoft.Azure.Functions.Worker equivalent",
                    annotation
                )),
        };
        diagnostic
    }
}

impl From<&ScanError> for Diagnostic {
    fn from(error: &ScanError) -> Self {
        let diagnostic = Diagnostic::new(
            error.code(),
            error.to_string(),
            error.declaration(),
            error.location().clone(),
        );

        match error {
            ScanError::UnresolvedType { .. } => {
                diagnostic.with_help("fix the type so the program compiles before generating")
            }
            ScanError::MissingFunctionName { .. } => {
                diagnostic.with_help("pass the function name as the first argument")
            }
            ScanError::DuplicateFunctionName { first_entry_point, .. } => diagnostic
                .with_help(format!("rename this function or `{}`", first_entry_point)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindmeta_ast::Span;

    #[test]
    fn legacy_bindings_become_warnings() {
        let error = CheckError::LegacyBinding {
            function: "Run".to_string(),
            owner: "Functions".to_string(),
            annotation: "BlobTrigger".to_string(),
            target: "blob".to_string(),
            location: Location::new(Some("Functions.cs".to_string()), Span::new(10, 20)),
        };

        let diagnostic = Diagnostic::from(&error);
        assert_eq!(diagnostic.code, "W-BIND-001");
        assert!(!diagnostic.is_error());
        assert!(diagnostic.format_simple().starts_with("warning[W-BIND-001]"));
        assert!(diagnostic.format_simple().contains("Functions.cs:10..20"));
    }

    #[test]
    fn hard_errors_keep_error_severity() {
        let error = CheckError::DuplicateBindingName {
            function: "Run".to_string(),
            owner: "Functions".to_string(),
            name: "req".to_string(),
            location: Location::default(),
        };

        let diagnostic = Diagnostic::from(&error);
        assert!(diagnostic.is_error());
        assert_eq!(diagnostic.declaration, "Run (Functions)");
        assert!(diagnostic.help.as_deref().unwrap_or("").contains("req"));
    }
}
