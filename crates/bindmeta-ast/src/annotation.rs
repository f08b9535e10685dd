//! Annotations and annotation type declarations

use serde::{Deserialize, Serialize};
use crate::Span;

/// An annotation applied to a method, parameter or member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Name as written or fully qualified: `QueueTrigger`, `QueueTriggerAttribute`,
    /// `Microsoft.Azure.Functions.Worker.QueueTriggerAttribute`
    pub name: String,

    /// Constructor arguments in source order
    #[serde(default)]
    pub positional_args: Vec<TypedValue>,

    /// Named property assignments in source order
    #[serde(default)]
    pub named_args: Vec<NamedArg>,

    #[serde(default)]
    pub span: Span,
}

/// A `Name = value` argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedArg {
    pub name: String,
    pub value: TypedValue,
}

/// A constant argument value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TypedValue {
    /// String, number, boolean or null literal
    Primitive(Primitive),
    /// Enum member, already rendered to its name: `Function`
    Enum(String),
    /// `typeof(...)` argument; carries no binding information
    Type(String),
    /// Array of constants
    Array(Vec<TypedValue>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Primitive {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Null,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positional_args: Vec::new(),
            named_args: Vec::new(),
            span: Span::dummy(),
        }
    }

    pub fn arg(mut self, value: TypedValue) -> Self {
        self.positional_args.push(value);
        self
    }

    pub fn named(mut self, name: impl Into<String>, value: TypedValue) -> Self {
        self.named_args.push(NamedArg {
            name: name.into(),
            value,
        });
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Last path segment with any `Attribute` suffix removed
    pub fn simple_name(&self) -> &str {
        simple_annotation_name(&self.name)
    }

    pub fn is(&self, simple_name: &str) -> bool {
        self.simple_name() == simple_annotation_name(simple_name)
    }
}

/// `Ns.QueueTriggerAttribute` -> `QueueTrigger`
pub fn simple_annotation_name(name: &str) -> &str {
    let last = name.rsplit('.').next().unwrap_or(name);
    match last.strip_suffix("Attribute") {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => last,
    }
}

impl TypedValue {
    pub fn string(s: impl Into<String>) -> Self {
        TypedValue::Primitive(Primitive::String(s.into()))
    }

    pub fn int(n: i64) -> Self {
        TypedValue::Primitive(Primitive::Int(n))
    }

    pub fn bool(b: bool) -> Self {
        TypedValue::Primitive(Primitive::Bool(b))
    }

    pub fn enum_value(name: impl Into<String>) -> Self {
        TypedValue::Enum(name.into())
    }

    pub fn array(values: Vec<TypedValue>) -> Self {
        TypedValue::Array(values)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::Primitive(Primitive::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TypedValue::Primitive(Primitive::Null))
    }
}

/// Declaration of an annotation type, supplied for extension bindings
/// that the built-in catalog does not know about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationTypeDecl {
    pub name: String,

    /// Immediate ancestor, e.g. `OutputBindingAttribute`
    #[serde(default)]
    pub base: Option<String>,

    /// Constructor overloads, each an ordered list of parameter names
    #[serde(default)]
    pub constructors: Vec<Vec<String>>,

    /// Marker annotations placed on the annotation type itself
    #[serde(default)]
    pub markers: Vec<String>,

    #[serde(default)]
    pub span: Span,
}

impl AnnotationTypeDecl {
    pub fn new(name: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: Some(base.into()),
            constructors: Vec::new(),
            markers: Vec::new(),
            span: Span::dummy(),
        }
    }

    pub fn with_constructor(mut self, params: &[&str]) -> Self {
        self.constructors
            .push(params.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.markers.push(marker.into());
        self
    }

    pub fn simple_name(&self) -> &str {
        simple_annotation_name(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_name_strips_namespace_and_suffix() {
        assert_eq!(simple_annotation_name("QueueTrigger"), "QueueTrigger");
        assert_eq!(simple_annotation_name("QueueTriggerAttribute"), "QueueTrigger");
        assert_eq!(
            simple_annotation_name("Microsoft.Azure.Functions.Worker.BlobOutputAttribute"),
            "BlobOutput"
        );
        assert_eq!(simple_annotation_name("Attribute"), "Attribute");
    }

    #[test]
    fn typed_values_use_tagged_json() {
        let value: TypedValue =
            serde_json::from_str(r#"{"kind":"array","value":[{"kind":"primitive","value":"get"},{"kind":"enum","value":"Function"}]}"#)
                .expect("valid value");
        assert_eq!(
            value,
            TypedValue::array(vec![TypedValue::string("get"), TypedValue::enum_value("Function")])
        );

        let null: TypedValue = serde_json::from_str(r#"{"kind":"primitive","value":null}"#).expect("valid null");
        assert!(null.is_null());
    }
}
