//! Type references as seen by the front-end

use serde::{Deserialize, Serialize};

/// A reference to a type in a signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    /// No return value
    Void,

    /// Named type: `string`, `System.ReadOnlyMemory<byte>`, `MyOutputType`
    Named {
        path: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        generics: Vec<TypeRef>,
    },

    /// Single-dimension array: `byte[]`
    Array { element: Box<TypeRef> },

    /// The front-end could not bind this type
    Error {
        #[serde(default)]
        text: String,
    },
}

/// Keyword aliases normalized to their framework names
const ALIASES: &[(&str, &str)] = &[
    ("string", "System.String"),
    ("byte", "System.Byte"),
    ("object", "System.Object"),
    ("bool", "System.Boolean"),
    ("int", "System.Int32"),
    ("long", "System.Int64"),
    ("double", "System.Double"),
    ("void", "System.Void"),
];

impl TypeRef {
    pub fn named(path: impl Into<String>) -> Self {
        TypeRef::Named {
            path: path.into(),
            generics: Vec::new(),
        }
    }

    pub fn generic(path: impl Into<String>, generics: Vec<TypeRef>) -> Self {
        TypeRef::Named {
            path: path.into(),
            generics,
        }
    }

    pub fn array(element: TypeRef) -> Self {
        TypeRef::Array {
            element: Box::new(element),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        TypeRef::Error { text: text.into() }
    }

    /// Fully qualified display name with keyword aliases expanded,
    /// e.g. `System.ReadOnlyMemory<System.Byte>` or `System.Byte[]`
    pub fn full_name(&self) -> String {
        match self {
            TypeRef::Void => "System.Void".to_string(),
            TypeRef::Named { path, generics } => {
                let base = normalize_alias(path);
                if generics.is_empty() {
                    base.to_string()
                } else {
                    let args: Vec<_> = generics.iter().map(|g| g.full_name()).collect();
                    format!("{}<{}>", base, args.join(", "))
                }
            }
            TypeRef::Array { element } => format!("{}[]", element.full_name()),
            TypeRef::Error { text } => text.clone(),
        }
    }

    /// The last path segment, used to look up declared types by simple name
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            TypeRef::Named { path, .. } => path.rsplit('.').next(),
            _ => None,
        }
    }

    pub fn is_void(&self) -> bool {
        match self {
            TypeRef::Void => true,
            TypeRef::Named { path, .. } => normalize_alias(path) == "System.Void",
            _ => false,
        }
    }

    /// First unresolved type inside this reference, if any
    pub fn first_error(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Error { .. } => Some(self),
            TypeRef::Named { generics, .. } => generics.iter().find_map(|g| g.first_error()),
            TypeRef::Array { element } => element.first_error(),
            TypeRef::Void => None,
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name())
    }
}

fn normalize_alias(path: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == path)
        .map(|(_, full)| *full)
        .unwrap_or(path)
}
