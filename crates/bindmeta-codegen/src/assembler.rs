//! Metadata assembly
//!
//! Turns checked bindings into descriptors and wraps them, in pass order,
//! with the identity fields of the function.

use crate::{serializer, CodegenError};
use bindmeta_ast::{
    Annotation, BindingDescriptor, Conventions, FunctionMetadata, Primitive, Program, PropertyValue,
    TypedValue,
};
use bindmeta_checker::{BindingOrigin, BindingSpec, CheckedFunction, ClassifiedBinding};
use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use tracing::{trace, warn};

/// Keys owned by the descriptor itself
const RESERVED_KEYS: &[&str] = &["name", "type", "direction", "dataType"];

pub struct Assembler<'a> {
    conventions: &'a Conventions,
    script_file: String,
}

impl<'a> Assembler<'a> {
    pub fn new(program: &Program, conventions: &'a Conventions) -> Self {
        Self {
            conventions,
            script_file: conventions.script_file_for(&program.assembly_name),
        }
    }

    pub fn assemble(&self, checked: &CheckedFunction<'_>) -> Result<FunctionMetadata, CodegenError> {
        let function = &checked.function;
        let mut raw_bindings = Vec::with_capacity(checked.bindings.len());

        for binding in &checked.bindings {
            let descriptor = self.descriptor(binding);
            let raw = serializer::serialize_descriptor(&descriptor).map_err(|source| {
                CodegenError::Serialization {
                    function: function.name.clone(),
                    binding: descriptor.name.clone(),
                    source,
                }
            })?;
            trace!(function = %function.name, binding = %raw, "binding assembled");
            raw_bindings.push(raw);
        }

        Ok(FunctionMetadata {
            function_id: function_id(&function.name, &function.entry_point),
            language: self.conventions.language.clone(),
            name: function.name.clone(),
            entry_point: function.entry_point.clone(),
            raw_bindings,
            script_file: self.script_file.clone(),
        })
    }

    pub fn descriptor(&self, binding: &ClassifiedBinding<'_>) -> BindingDescriptor {
        match binding.origin {
            BindingOrigin::HttpResponse => BindingDescriptor::http_response(binding.name.clone()),
            BindingOrigin::Annotation { annotation, spec } => {
                let mut descriptor =
                    BindingDescriptor::new(binding.name.clone(), spec.binding_type.clone(), binding.direction);
                descriptor.data_type = binding.data_type;
                descriptor.extra_properties = load_properties(annotation, spec);
                descriptor
            }
        }
    }
}

/// Stable function id: hex SHA-256 of `name`, NUL, `entry_point`
pub fn function_id(name: &str, entry_point: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update([0u8]);
    hasher.update(entry_point.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Collect the annotation's arguments as descriptor properties
///
/// Positional arguments are keyed by the matching constructor's parameter
/// names, in order. Named arguments follow in the order supplied; a named
/// argument that repeats a key replaces the value but keeps its position.
/// Null named arguments are skipped.
pub fn load_properties(annotation: &Annotation, spec: &BindingSpec) -> IndexMap<String, PropertyValue> {
    let mut properties = IndexMap::new();

    let params = spec
        .constructor_for_args(&annotation.positional_args)
        .unwrap_or(&[]);
    for (param, arg) in params.iter().zip(&annotation.positional_args) {
        insert_property(&mut properties, annotation, param, arg);
    }

    for named in &annotation.named_args {
        if named.value.is_null() {
            continue;
        }
        insert_property(&mut properties, annotation, &named.name, &named.value);
    }

    properties
}

fn insert_property(
    properties: &mut IndexMap<String, PropertyValue>,
    annotation: &Annotation,
    name: &str,
    value: &TypedValue,
) {
    let key = camel_case(name);
    if RESERVED_KEYS.contains(&key.as_str()) {
        warn!(annotation = %annotation.name, key = %key, "argument shadows a descriptor field, skipped");
        return;
    }
    if let Some(value) = property_value(value) {
        properties.insert(key, value);
    }
}

fn property_value(value: &TypedValue) -> Option<PropertyValue> {
    match value {
        TypedValue::Primitive(Primitive::String(s)) if is_quoted(s) => Some(PropertyValue::Literal(s.clone())),
        TypedValue::Array(items) => Some(PropertyValue::List(items.iter().filter_map(element_text).collect())),
        other => element_text(other).map(PropertyValue::Text),
    }
}

/// String form of a scalar argument; `None` for values that are dropped
fn element_text(value: &TypedValue) -> Option<String> {
    match value {
        TypedValue::Primitive(Primitive::String(s)) if is_quoted(s) => Some(s[1..s.len() - 1].to_string()),
        TypedValue::Primitive(Primitive::String(s)) => Some(s.clone()),
        TypedValue::Primitive(Primitive::Bool(b)) => Some(b.to_string()),
        TypedValue::Primitive(Primitive::Int(n)) => Some(n.to_string()),
        TypedValue::Primitive(Primitive::Float(f)) => Some(f.to_string()),
        TypedValue::Primitive(Primitive::Null) => None,
        TypedValue::Enum(name) => Some(enum_member(name).to_string()),
        TypedValue::Type(_) | TypedValue::Array(_) => None,
    }
}

fn is_quoted(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('"') && s.ends_with('"')
}

/// `AuthorizationLevel.Function` -> `Function`
fn enum_member(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// `QueueName` -> `queueName`; already camel-cased names pass through
fn camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
