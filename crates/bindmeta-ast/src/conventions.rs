//! Framework conventions the generator recognizes
//!
//! Defaults match the isolated worker model. Every field can be overridden
//! from configuration.

use serde::{Deserialize, Serialize};
use crate::{simple_annotation_name, TypeRef};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conventions {
    /// Language tag written into every metadata record
    pub language: String,

    /// Script file name; `<assembly>.dll` when unset
    pub script_file: Option<String>,

    /// Annotation that marks a method as a function entry point
    pub entry_point_annotation: String,

    /// Return or member type recognized as an HTTP response
    pub http_response_type: String,

    /// Types hinted as `String` payloads
    pub string_types: Vec<String>,

    /// Types hinted as `Binary` payloads
    pub binary_types: Vec<String>,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            language: "dotnet-isolated".to_string(),
            script_file: None,
            entry_point_annotation: "Function".to_string(),
            http_response_type: "Microsoft.Azure.Functions.Worker.Http.HttpResponseData".to_string(),
            string_types: vec!["System.String".to_string()],
            binary_types: vec![
                "System.Byte[]".to_string(),
                "System.ReadOnlyMemory<System.Byte>".to_string(),
            ],
        }
    }
}

impl Conventions {
    pub fn script_file_for(&self, assembly_name: &str) -> String {
        self.script_file
            .clone()
            .unwrap_or_else(|| format!("{}.dll", assembly_name))
    }

    pub fn is_entry_point(&self, annotation_name: &str) -> bool {
        simple_annotation_name(annotation_name) == simple_annotation_name(&self.entry_point_annotation)
    }

    /// Matches the configured response type by full name, or by simple name
    /// when the front-end did not qualify the reference
    pub fn is_http_response(&self, ty: &TypeRef) -> bool {
        let full = ty.full_name();
        if full == self.http_response_type {
            return true;
        }
        !full.contains('.')
            && ty.simple_name() == self.http_response_type.rsplit('.').next()
    }

    pub fn is_string(&self, ty: &TypeRef) -> bool {
        let full = ty.full_name();
        self.string_types.iter().any(|t| *t == full)
    }

    pub fn is_binary(&self, ty: &TypeRef) -> bool {
        let full = ty.full_name();
        self.binary_types.iter().any(|t| *t == full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_script_file_derives_from_assembly() {
        let conventions = Conventions::default();
        assert_eq!(conventions.script_file_for("TestProject"), "TestProject.dll");

        let custom = Conventions {
            script_file: Some("app.so".into()),
            ..Conventions::default()
        };
        assert_eq!(custom.script_file_for("TestProject"), "app.so");
    }

    #[test]
    fn payload_types_are_matched_after_alias_expansion() {
        let conventions = Conventions::default();
        assert!(conventions.is_string(&TypeRef::named("string")));
        assert!(conventions.is_binary(&TypeRef::array(TypeRef::named("byte"))));
        assert!(conventions.is_binary(&TypeRef::generic(
            "System.ReadOnlyMemory",
            vec![TypeRef::named("byte")]
        )));
        assert!(!conventions.is_string(&TypeRef::named("object")));
    }

    #[test]
    fn http_response_matches_simple_or_full_name() {
        let conventions = Conventions::default();
        assert!(conventions.is_http_response(&TypeRef::named("HttpResponseData")));
        assert!(conventions.is_http_response(&TypeRef::named(
            "Microsoft.Azure.Functions.Worker.Http.HttpResponseData"
        )));
        assert!(!conventions.is_http_response(&TypeRef::named("Other.HttpResponseData")));
    }

    #[test]
    fn entry_point_annotation_accepts_suffix() {
        let conventions = Conventions::default();
        assert!(conventions.is_entry_point("Function"));
        assert!(conventions.is_entry_point("Microsoft.Azure.Functions.Worker.FunctionAttribute"));
        assert!(!conventions.is_entry_point("FunctionName"));
    }
}
