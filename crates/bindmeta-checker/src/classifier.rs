//! Binding classification
//!
//! Turns the annotations of a resolved function into an ordered worklist of
//! bindings. Passes run in a fixed order: method outputs, parameters, then
//! the return type.

use crate::{BindingCatalog, BindingKind, BindingSpec};
use bindmeta_ast::{
    Annotation, Conventions, DataType, Direction, MemberDecl, Span, TypeRef, RETURN_BINDING_NAME,
};
use bindmeta_symbols::ResolvedFunction;
use tracing::{trace, warn};

/// Where a binding was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingSource {
    /// Output annotation on the method itself
    Method,
    Parameter,
    /// Property of the declared return type
    Member,
    /// Implied by the return type rather than written down
    Synthesized,
}

/// What produced a binding
#[derive(Debug, Clone, Copy)]
pub enum BindingOrigin<'a> {
    Annotation {
        annotation: &'a Annotation,
        spec: &'a BindingSpec,
    },
    /// HTTP response output implied by a response-typed return value or member
    HttpResponse,
}

#[derive(Debug, Clone)]
pub struct ClassifiedBinding<'a> {
    pub name: String,
    pub source: BindingSource,
    pub origin: BindingOrigin<'a>,
    pub direction: Direction,
    pub data_type: Option<DataType>,
    pub span: Span,
}

impl<'a> ClassifiedBinding<'a> {
    pub fn is_http_response(&self) -> bool {
        matches!(self.origin, BindingOrigin::HttpResponse)
    }

    pub fn annotation(&self) -> Option<&'a Annotation> {
        match self.origin {
            BindingOrigin::Annotation { annotation, .. } => Some(annotation),
            BindingOrigin::HttpResponse => None,
        }
    }
}

/// Bindings of one function plus what was skipped along the way
#[derive(Debug, Clone, Default)]
pub struct Classification<'a> {
    pub bindings: Vec<ClassifiedBinding<'a>>,
    pub has_http_trigger: bool,
    /// Annotations from the in-process binding model, with their owner name
    pub legacy: Vec<(&'a Annotation, String)>,
}

impl<'a> Classification<'a> {
    pub fn method_outputs(&self) -> impl Iterator<Item = &ClassifiedBinding<'a>> {
        self.bindings
            .iter()
            .filter(|b| b.source == BindingSource::Method)
    }

    pub fn http_responses(&self) -> impl Iterator<Item = &ClassifiedBinding<'a>> {
        self.bindings.iter().filter(|b| b.is_http_response())
    }
}

pub struct Classifier<'a> {
    catalog: &'a BindingCatalog,
    conventions: &'a Conventions,
}

impl<'a> Classifier<'a> {
    pub fn new(catalog: &'a BindingCatalog, conventions: &'a Conventions) -> Self {
        Self { catalog, conventions }
    }

    pub fn classify(&self, function: &ResolvedFunction<'a>) -> Classification<'a> {
        let mut out = Classification::default();
        self.method_outputs(function, &mut out);
        self.parameter_bindings(function, &mut out);
        self.return_bindings(function, &mut out);
        out
    }

    /// Pass (a): only output bindings are meaningful on the method
    fn method_outputs(&self, function: &ResolvedFunction<'a>, out: &mut Classification<'a>) {
        for annotation in &function.method.annotations {
            let Some(spec) = self.binding(annotation, function.method_name(), out) else {
                continue;
            };
            if spec.kind != BindingKind::Output {
                warn!(
                    function = %function.name,
                    annotation = %annotation.name,
                    "ignoring non-output binding on method"
                );
                continue;
            }
            out.bindings.push(ClassifiedBinding {
                name: RETURN_BINDING_NAME.to_string(),
                source: BindingSource::Method,
                origin: BindingOrigin::Annotation { annotation, spec },
                direction: spec.direction(),
                data_type: None,
                span: annotation.span,
            });
        }
    }

    /// Pass (b): trigger and input bindings on parameters, in order
    fn parameter_bindings(&self, function: &ResolvedFunction<'a>, out: &mut Classification<'a>) {
        for param in function.params() {
            for annotation in &param.annotations {
                let Some(spec) = self.binding(annotation, &param.name, out) else {
                    continue;
                };
                if spec.is_http_trigger() {
                    out.has_http_trigger = true;
                }
                out.bindings.push(ClassifiedBinding {
                    name: param.name.clone(),
                    source: BindingSource::Parameter,
                    origin: BindingOrigin::Annotation { annotation, spec },
                    direction: spec.direction(),
                    data_type: self.data_type(&param.ty),
                    span: annotation.span,
                });
            }
        }
    }

    /// Pass (c): bindings carried by a non-void return type
    fn return_bindings(&self, function: &ResolvedFunction<'a>, out: &mut Classification<'a>) {
        let ret = &function.return_type;
        if ret.is_void() {
            return;
        }

        if self.conventions.is_http_response(ret.ty) {
            out.bindings.push(synthesized_http(RETURN_BINDING_NAME, function.method.span));
            return;
        }

        let before = out.bindings.len();
        for member in ret.members() {
            self.member_bindings(member, out);
        }

        let member_outputs = out.bindings[before..]
            .iter()
            .any(|b| b.direction == Direction::Out);

        if !member_outputs && out.has_http_trigger {
            trace!(function = %function.name, "adding implicit http response");
            out.bindings.push(synthesized_http(RETURN_BINDING_NAME, function.method.span));
        }
    }

    fn member_bindings(&self, member: &'a MemberDecl, out: &mut Classification<'a>) {
        if self.conventions.is_http_response(&member.ty) {
            out.bindings.push(synthesized_http(&member.name, member.span));
            return;
        }

        for annotation in &member.annotations {
            let Some(spec) = self.binding(annotation, &member.name, out) else {
                continue;
            };
            out.bindings.push(ClassifiedBinding {
                name: member.name.clone(),
                source: BindingSource::Member,
                origin: BindingOrigin::Annotation { annotation, spec },
                direction: spec.direction(),
                data_type: self.data_type(&member.ty),
                span: annotation.span,
            });
        }
    }

    /// Catalog lookup; unrecognized annotations are skipped
    fn binding(
        &self,
        annotation: &'a Annotation,
        owner: &str,
        out: &mut Classification<'a>,
    ) -> Option<&'a BindingSpec> {
        if self.catalog.is_legacy(annotation) {
            out.legacy.push((annotation, owner.to_string()));
        }
        let spec = self.catalog.lookup(annotation);
        if spec.is_none() {
            trace!(annotation = %annotation.name, owner, "not a binding annotation");
        }
        spec
    }

    /// `String` for string types, `Binary` for byte buffers
    fn data_type(&self, ty: &TypeRef) -> Option<DataType> {
        if self.conventions.is_string(ty) {
            Some(DataType::String)
        } else if self.conventions.is_binary(ty) {
            Some(DataType::Binary)
        } else {
            None
        }
    }
}

fn synthesized_http<'a>(name: &str, span: Span) -> ClassifiedBinding<'a> {
    ClassifiedBinding {
        name: name.to_string(),
        source: BindingSource::Synthesized,
        origin: BindingOrigin::HttpResponse,
        direction: Direction::Out,
        data_type: None,
        span,
    }
}
