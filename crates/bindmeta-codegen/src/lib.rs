//! Bindmeta Codegen - metadata assembly and serialization
//!
//! Drives the whole pipeline for a program: scan, classify and validate
//! each candidate, then assemble and serialize its metadata record.
//! Candidates are independent and are processed on a rayon pool; records
//! come back in scan order regardless of scheduling.

mod assembler;
mod serializer;
mod provider_source;

pub use assembler::*;
pub use serializer::*;
pub use provider_source::*;

use bindmeta_ast::{Conventions, FunctionMetadata, Location, Program};
use bindmeta_checker::{check_function, BindingCatalog, CheckError, Diagnostic};
use bindmeta_symbols::{scan, ResolvedFunction, ScanError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Check(#[from] CheckError),

    #[error("failed to serialize binding `{binding}` of function `{function}`: {source}")]
    Serialization {
        function: String,
        binding: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CodegenError {
    pub fn code(&self) -> &'static str {
        match self {
            CodegenError::Scan(e) => e.code(),
            CodegenError::Check(e) => e.code(),
            CodegenError::Serialization { .. } => "E-GEN-001",
        }
    }

    pub fn location(&self) -> Option<&Location> {
        match self {
            CodegenError::Scan(e) => Some(e.location()),
            CodegenError::Check(e) => Some(e.location()),
            CodegenError::Serialization { .. } => None,
        }
    }

    pub fn diagnostic(&self) -> Diagnostic {
        match self {
            CodegenError::Scan(e) => Diagnostic::from(e),
            CodegenError::Check(e) => Diagnostic::from(e),
            CodegenError::Serialization { function, .. } => Diagnostic::new(
                self.code(),
                self.to_string(),
                function.clone(),
                Location::default(),
            ),
        }
    }
}

/// Generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    pub conventions: Conventions,
    /// Process candidates on the rayon pool
    pub parallel: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            conventions: Conventions::default(),
            parallel: true,
        }
    }
}

/// Outcome of a generation pass
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Records of the functions that passed, in scan order
    pub functions: Vec<FunctionMetadata>,
    pub errors: Vec<CodegenError>,
    pub warnings: Vec<CheckError>,
}

impl GenerationReport {
    /// The pass fails as a whole if any function failed
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors
            .iter()
            .map(CodegenError::diagnostic)
            .chain(self.warnings.iter().map(Diagnostic::from))
            .collect()
    }

    pub fn into_result(self) -> Result<Vec<FunctionMetadata>, Vec<CodegenError>> {
        if self.errors.is_empty() {
            Ok(self.functions)
        } else {
            Err(self.errors)
        }
    }
}

/// Per-function result before merging into the report
struct FunctionOutcome {
    result: Result<FunctionMetadata, Vec<CodegenError>>,
    warnings: Vec<CheckError>,
}

pub struct Generator<'a> {
    program: &'a Program,
    options: &'a GeneratorOptions,
    catalog: BindingCatalog,
}

impl<'a> Generator<'a> {
    /// Generator using the built-in catalog plus the program's declared bindings
    pub fn new(program: &'a Program, options: &'a GeneratorOptions) -> Self {
        Self {
            program,
            options,
            catalog: BindingCatalog::for_program(program),
        }
    }

    pub fn run(&self) -> GenerationReport {
        let conventions = &self.options.conventions;
        let functions = match scan(self.program, conventions) {
            Ok(functions) => functions,
            Err(errors) => {
                return GenerationReport {
                    errors: errors.into_iter().map(CodegenError::Scan).collect(),
                    ..Default::default()
                }
            }
        };

        debug!(candidates = functions.len(), parallel = self.options.parallel, "scan complete");

        let outcomes: Vec<FunctionOutcome> = if self.options.parallel {
            functions.into_par_iter().map(|f| self.process(f)).collect()
        } else {
            functions.into_iter().map(|f| self.process(f)).collect()
        };

        let mut report = GenerationReport::default();
        for outcome in outcomes {
            report.warnings.extend(outcome.warnings);
            match outcome.result {
                Ok(metadata) => report.functions.push(metadata),
                Err(errors) => report.errors.extend(errors),
            }
        }

        info!(
            assembly = %self.program.assembly_name,
            functions = report.functions.len(),
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "generation pass finished"
        );
        report
    }

    fn process(&self, function: ResolvedFunction<'_>) -> FunctionOutcome {
        let conventions = &self.options.conventions;
        let name = function.name.clone();

        let checked = match check_function(function, &self.catalog, conventions) {
            Ok(checked) => checked,
            Err(errors) => {
                let (hard, warnings): (Vec<_>, Vec<_>) = errors.into_iter().partition(|e| e.is_hard_error());
                debug!(function = %name, errors = hard.len(), "function rejected");
                return FunctionOutcome {
                    result: Err(hard.into_iter().map(CodegenError::Check).collect()),
                    warnings,
                };
            }
        };

        let result = Assembler::new(self.program, conventions)
            .assemble(&checked)
            .map_err(|e| vec![e]);
        FunctionOutcome {
            result,
            warnings: checked.warnings,
        }
    }
}

/// Generate the metadata records of a program
///
/// # Returns
/// * `Ok(records)` - one record per candidate, in scan order
/// * `Err(errors)` - every error found; no partial output
pub fn generate(program: &Program, options: &GeneratorOptions) -> Result<Vec<FunctionMetadata>, Vec<CodegenError>> {
    Generator::new(program, options).run().into_result()
}
