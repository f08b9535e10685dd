//! Lookup of declared types by name

use bindmeta_ast::{TypeDecl, TypeRef};
use std::collections::HashMap;

/// Index over the program's declaring types
#[derive(Debug)]
pub struct TypeIndex<'a> {
    types: &'a [TypeDecl],

    /// Full name to position
    by_full_name: HashMap<String, usize>,

    /// Simple name to positions (may be ambiguous)
    by_simple_name: HashMap<&'a str, Vec<usize>>,
}

impl<'a> TypeIndex<'a> {
    pub fn new(types: &'a [TypeDecl]) -> Self {
        let mut by_full_name = HashMap::new();
        let mut by_simple_name: HashMap<&str, Vec<usize>> = HashMap::new();

        for (i, ty) in types.iter().enumerate() {
            by_full_name.entry(ty.full_name()).or_insert(i);
            by_simple_name.entry(ty.name.as_str()).or_default().push(i);
        }

        Self {
            types,
            by_full_name,
            by_simple_name,
        }
    }

    /// Find the declaration a type reference points to
    ///
    /// Qualified references must match exactly. Unqualified ones match a
    /// simple name only when it is unambiguous.
    pub fn lookup(&self, ty: &TypeRef) -> Option<&'a TypeDecl> {
        let TypeRef::Named { path, .. } = ty else {
            return None;
        };

        if let Some(&i) = self.by_full_name.get(path.as_str()) {
            return Some(&self.types[i]);
        }

        if path.contains('.') {
            return None;
        }

        match self.by_simple_name.get(path.as_str()) {
            Some(candidates) if candidates.len() == 1 => Some(&self.types[candidates[0]]),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
