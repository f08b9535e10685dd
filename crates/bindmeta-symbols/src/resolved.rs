//! Resolved candidate functions

use bindmeta_ast::{Location, MemberDecl, MethodDecl, Parameter, TypeDecl, TypeRef};

/// A method carrying the entry-point annotation, with its declaration resolved
#[derive(Debug, Clone)]
pub struct ResolvedFunction<'a> {
    /// Function name taken from the entry-point annotation
    pub name: String,

    /// `<assembly>.<owner>.<method>`
    pub entry_point: String,

    pub method: &'a MethodDecl,

    /// Declaring type that owns the method
    pub owner: &'a TypeDecl,

    pub return_type: ResolvedReturn<'a>,
}

/// The return type together with its declaration, when the program declares it
#[derive(Debug, Clone, Copy)]
pub struct ResolvedReturn<'a> {
    pub ty: &'a TypeRef,
    pub declaration: Option<&'a TypeDecl>,
}

impl<'a> ResolvedFunction<'a> {
    pub fn params(&self) -> &'a [Parameter] {
        &self.method.params
    }

    pub fn owner_name(&self) -> &'a str {
        &self.owner.name
    }

    pub fn method_name(&self) -> &'a str {
        &self.method.name
    }

    pub fn location(&self) -> Location {
        Location::new(self.owner.file.clone(), self.method.span)
    }

    /// Location of a span inside the owner's file
    pub fn locate(&self, span: bindmeta_ast::Span) -> Location {
        let span = if span.is_dummy() { self.method.span } else { span };
        Location::new(self.owner.file.clone(), span)
    }
}

impl<'a> ResolvedReturn<'a> {
    pub fn is_void(&self) -> bool {
        self.ty.is_void()
    }

    /// Members of a declared return type; empty for external types
    pub fn members(&self) -> &'a [MemberDecl] {
        self.declaration.map(|d| d.members.as_slice()).unwrap_or(&[])
    }
}
