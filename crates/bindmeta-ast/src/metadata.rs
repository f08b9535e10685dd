//! Binding descriptors and function metadata records
//!
//! These are produced by the generator and consumed by the host. They are
//! never mutated after assembly.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name reserved for bindings attached to the method's return value
pub const RETURN_BINDING_NAME: &str = "$return";

/// Binding type of a synthesized HTTP response
pub const HTTP_RESPONSE_BINDING_TYPE: &str = "http";

/// Direction of a binding relative to the function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "In",
            Direction::Out => "Out",
        }
    }
}

/// Payload hint letting the host skip reflection when marshalling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    String,
    Binary,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "String",
            DataType::Binary => "Binary",
        }
    }
}

/// A rendered annotation argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Plain string value, quoted on output
    Text(String),
    /// Value that is already a rendered literal and must not be quoted again
    Literal(String),
    /// Array argument, each element formatted as a string
    List(Vec<String>),
}

/// One binding of a function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDescriptor {
    pub name: String,
    pub binding_type: String,
    pub direction: Direction,
    pub data_type: Option<DataType>,
    /// Annotation arguments: constructor arguments first, then named ones
    pub extra_properties: IndexMap<String, PropertyValue>,
}

impl BindingDescriptor {
    pub fn new(name: impl Into<String>, binding_type: impl Into<String>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            binding_type: binding_type.into(),
            direction,
            data_type: None,
            extra_properties: IndexMap::new(),
        }
    }

    /// The `http` output synthesized for HTTP-response return values
    pub fn http_response(name: impl Into<String>) -> Self {
        Self::new(name, HTTP_RESPONSE_BINDING_TYPE, Direction::Out)
    }
}

/// Metadata for one function, in the shape the host expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionMetadata {
    /// Stable identifier derived from `name` and `entry_point`
    pub function_id: String,
    pub language: String,
    pub name: String,
    pub entry_point: String,
    /// Serialized binding descriptors, in assembly order
    pub raw_bindings: Vec<String>,
    pub script_file: String,
}
