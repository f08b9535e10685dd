//! Bindmeta - build-time extraction of function binding metadata
//!
//! This is the root workspace crate that provides end-to-end tests.
//! The implementation lives in the workspace member crates.

// Re-export main crates for convenience
pub use bindmeta_ast as ast;
pub use bindmeta_symbols as symbols;
pub use bindmeta_checker as checker;
pub use bindmeta_codegen as codegen;
pub use bindmeta_provider as provider;
