//! bindmeta-symbols: Candidate Scanner
//!
//! Finds every method carrying the entry-point annotation and resolves
//! its declaration: parameters, return type (with members when the program
//! declares it) and owning type.
//!
//! # Example
//!
//! ```
//! use bindmeta_ast::{Annotation, Conventions, MethodDecl, Program, TypeDecl, TypeRef, TypedValue};
//! use bindmeta_symbols::scan;
//!
//! let program = Program::new("App").with_type(
//!     TypeDecl::new("Jobs").with_method(
//!         MethodDecl::new("Run", TypeRef::Void)
//!             .annotated(Annotation::new("Function").arg(TypedValue::string("Nightly"))),
//!     ),
//! );
//!
//! let conventions = Conventions::default();
//! let functions = scan(&program, &conventions).unwrap();
//! assert_eq!(functions[0].name, "Nightly");
//! assert_eq!(functions[0].entry_point, "App.Jobs.Run");
//! ```

mod error;
mod index;
mod resolved;
mod scanner;

pub use error::ScanError;
pub use index::TypeIndex;
pub use resolved::{ResolvedFunction, ResolvedReturn};
pub use scanner::CandidateScanner;

use bindmeta_ast::{Conventions, Program};

/// Resolve all candidate functions of a program
///
/// # Returns
/// * `Ok(functions)` - candidates in declaration order
/// * `Err(errors)` - the model is inconsistent; generation must stop
pub fn scan<'a>(
    program: &'a Program,
    conventions: &'a Conventions,
) -> Result<Vec<ResolvedFunction<'a>>, Vec<ScanError>> {
    let (functions, errors) = CandidateScanner::new(program, conventions).scan();
    if errors.is_empty() {
        Ok(functions)
    } else {
        Err(errors)
    }
}
