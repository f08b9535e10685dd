//! Declaration nodes: declaring types, methods, parameters, members

use serde::{Deserialize, Serialize};
use crate::{Annotation, Span, TypeRef};

/// A class, struct or record declared in the program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,

    #[serde(default)]
    pub namespace: Option<String>,

    /// Source file holding the declaration, for diagnostics
    #[serde(default)]
    pub file: Option<String>,

    /// Properties, in declaration order
    #[serde(default)]
    pub members: Vec<MemberDecl>,

    #[serde(default)]
    pub methods: Vec<MethodDecl>,

    #[serde(default)]
    pub span: Span,
}

/// A method declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,

    #[serde(default)]
    pub annotations: Vec<Annotation>,

    #[serde(default)]
    pub params: Vec<Parameter>,

    pub return_type: TypeRef,

    #[serde(default)]
    pub span: Span,
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeRef,

    #[serde(default)]
    pub annotations: Vec<Annotation>,

    #[serde(default)]
    pub span: Span,
}

/// A property of a declared type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDecl {
    pub name: String,
    pub ty: TypeRef,

    #[serde(default)]
    pub annotations: Vec<Annotation>,

    #[serde(default)]
    pub span: Span,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            file: None,
            members: Vec::new(),
            methods: Vec::new(),
            span: Span::dummy(),
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_member(mut self, member: MemberDecl) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    /// `Namespace.Name`, or just `Name` outside a namespace
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name),
            _ => self.name.clone(),
        }
    }
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
            params: Vec::new(),
            return_type,
            span: Span::dummy(),
        }
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            annotations: Vec::new(),
            span: Span::dummy(),
        }
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

impl MemberDecl {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            annotations: Vec::new(),
            span: Span::dummy(),
        }
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}
