//! Bindmeta AST - the declaration model and the metadata records
//!
//! This crate defines the read-only view of a scanned program (declaring
//! types, methods, parameters, return-type members and their annotations)
//! supplied by an external front-end, plus the binding descriptors and
//! function metadata records produced from it.

mod span;
mod types;
mod annotation;
mod decl;
mod metadata;
mod conventions;

pub use span::*;
pub use types::*;
pub use annotation::*;
pub use decl::*;
pub use metadata::*;
pub use conventions::*;

use serde::{Deserialize, Serialize};

/// A complete scanned program (one build unit)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Program {
    /// Name of the compiled unit, used for entry points and the script file
    pub assembly_name: String,

    /// Annotation types declared by the program or its referenced extensions
    #[serde(default)]
    pub annotation_types: Vec<AnnotationTypeDecl>,

    /// Declaring types in traversal order
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

impl Program {
    pub fn new(assembly_name: impl Into<String>) -> Self {
        Self {
            assembly_name: assembly_name.into(),
            annotation_types: Vec::new(),
            types: Vec::new(),
        }
    }

    pub fn with_type(mut self, ty: TypeDecl) -> Self {
        self.types.push(ty);
        self
    }

    pub fn with_annotation_type(mut self, decl: AnnotationTypeDecl) -> Self {
        self.annotation_types.push(decl);
        self
    }

    /// Iterate over every method in traversal order, paired with its owner
    pub fn methods(&self) -> impl Iterator<Item = (&TypeDecl, &MethodDecl)> {
        self.types
            .iter()
            .flat_map(|ty| ty.methods.iter().map(move |m| (ty, m)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn methods_follow_declaration_order() {
        let program = Program::new("App")
            .with_type(
                TypeDecl::new("First")
                    .with_method(MethodDecl::new("A", TypeRef::Void))
                    .with_method(MethodDecl::new("B", TypeRef::Void)),
            )
            .with_type(TypeDecl::new("Second").with_method(MethodDecl::new("C", TypeRef::Void)));

        let names: Vec<_> = program
            .methods()
            .map(|(ty, m)| format!("{}.{}", ty.name, m.name))
            .collect();
        assert_eq!(names, vec!["First.A", "First.B", "Second.C"]);
    }

    #[test]
    fn program_deserializes_with_defaults() {
        let json = r#"{
            "assembly_name": "TestProject",
            "types": [{
                "name": "Functions",
                "methods": [{
                    "name": "Run",
                    "return_type": { "kind": "void" }
                }]
            }]
        }"#;
        let program: Program = serde_json::from_str(json).expect("valid model");
        assert_eq!(program.assembly_name, "TestProject");
        assert!(program.annotation_types.is_empty());
        assert_eq!(program.types[0].methods[0].name, "Run");
        assert!(program.types[0].methods[0].return_type.is_void());
    }
}
