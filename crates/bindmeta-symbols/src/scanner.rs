//! Candidate selection and declaration resolution

use crate::{ResolvedFunction, ResolvedReturn, ScanError, TypeIndex};
use bindmeta_ast::{Conventions, Location, MethodDecl, Program, TypeDecl};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Walks every method of a program and resolves the entry points
pub struct CandidateScanner<'a> {
    program: &'a Program,
    conventions: &'a Conventions,
    index: TypeIndex<'a>,
    errors: Vec<ScanError>,
}

impl<'a> CandidateScanner<'a> {
    pub fn new(program: &'a Program, conventions: &'a Conventions) -> Self {
        Self {
            program,
            conventions,
            index: TypeIndex::new(&program.types),
            errors: Vec::new(),
        }
    }

    /// Resolve all candidates in traversal order
    pub fn scan(mut self) -> (Vec<ResolvedFunction<'a>>, Vec<ScanError>) {
        let mut candidates = Vec::new();
        let mut seen: HashMap<String, String> = HashMap::new();
        let program = self.program;

        for (owner, method) in program.methods() {
            if !self.is_candidate(method) {
                trace!(method = %method.name, owner = %owner.name, "not an entry point");
                continue;
            }

            let Some(function) = self.resolve(owner, method) else {
                continue;
            };

            if let Some(first) = seen.get(&function.name) {
                self.errors.push(ScanError::DuplicateFunctionName {
                    name: function.name.clone(),
                    method: method.name.clone(),
                    owner: owner.name.clone(),
                    first_entry_point: first.clone(),
                    location: function.location(),
                });
                continue;
            }

            debug!(
                function = %function.name,
                entry_point = %function.entry_point,
                "resolved candidate"
            );
            seen.insert(function.name.clone(), function.entry_point.clone());
            candidates.push(function);
        }

        (candidates, self.errors)
    }

    fn is_candidate(&self, method: &MethodDecl) -> bool {
        method
            .annotations
            .iter()
            .any(|a| self.conventions.is_entry_point(&a.name))
    }

    /// Resolve one candidate, recording an error when the declaration is inconsistent
    fn resolve(&mut self, owner: &'a TypeDecl, method: &'a MethodDecl) -> Option<ResolvedFunction<'a>> {
        let location = Location::new(owner.file.clone(), method.span);

        let Some(name) = self.function_name(method) else {
            self.errors.push(ScanError::MissingFunctionName {
                method: method.name.clone(),
                owner: owner.name.clone(),
                location,
            });
            return None;
        };

        for param in &method.params {
            if let Some(bad) = param.ty.first_error() {
                self.errors.push(ScanError::UnresolvedType {
                    method: method.name.clone(),
                    owner: owner.name.clone(),
                    target: format!("parameter '{}'", param.name),
                    text: bad.full_name(),
                    location: Location::new(owner.file.clone(), param.span),
                });
                return None;
            }
        }

        if let Some(bad) = method.return_type.first_error() {
            self.errors.push(ScanError::UnresolvedType {
                method: method.name.clone(),
                owner: owner.name.clone(),
                target: "return type".to_string(),
                text: bad.full_name(),
                location,
            });
            return None;
        }

        let entry_point = format!("{}.{}.{}", self.program.assembly_name, owner.name, method.name);

        Some(ResolvedFunction {
            name,
            entry_point,
            method,
            owner,
            return_type: ResolvedReturn {
                ty: &method.return_type,
                declaration: self.index.lookup(&method.return_type),
            },
        })
    }

    /// First constructor argument of the entry-point annotation
    fn function_name(&self, method: &MethodDecl) -> Option<String> {
        method
            .annotations
            .iter()
            .find(|a| self.conventions.is_entry_point(&a.name))
            .and_then(|a| a.positional_args.first())
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.to_string())
    }
}
