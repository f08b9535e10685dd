//! Per-function invariant checks on a classification

use crate::{BindingOrigin, BindingSource, CheckError, Classification};
use bindmeta_ast::RETURN_BINDING_NAME;
use bindmeta_symbols::ResolvedFunction;
use std::collections::HashMap;

/// Validates the uniqueness and shape rules for one function
pub struct Validator<'f, 'a> {
    function: &'f ResolvedFunction<'a>,
    errors: Vec<CheckError>,
}

impl<'f, 'a> Validator<'f, 'a> {
    pub fn new(function: &'f ResolvedFunction<'a>) -> Self {
        Self {
            function,
            errors: Vec::new(),
        }
    }

    /// Run every rule; returns hard errors and warnings together
    pub fn validate(mut self, classification: &Classification<'a>) -> Vec<CheckError> {
        self.check_method_outputs(classification);
        self.check_member_outputs(classification);
        self.check_http_responses(classification);
        self.check_constructors(classification);

        // only reported when no other rule fired
        if self.errors.is_empty() {
            self.check_unique_names(classification);
        }

        self.check_legacy(classification);
        self.errors
    }

    fn function_name(&self) -> String {
        self.function.name.clone()
    }

    fn owner(&self) -> String {
        self.function.owner_name().to_string()
    }

    fn check_method_outputs(&mut self, classification: &Classification<'a>) {
        let outputs: Vec<_> = classification.method_outputs().collect();
        if outputs.len() > 1 {
            self.errors.push(CheckError::MultipleMethodOutputs {
                function: self.function_name(),
                owner: self.owner(),
                annotations: outputs
                    .iter()
                    .filter_map(|b| b.annotation().map(|a| a.name.clone()))
                    .collect(),
                location: self.function.locate(outputs[1].span),
            });
        }
    }

    fn check_member_outputs(&mut self, classification: &Classification<'a>) {
        let mut per_member: HashMap<&str, usize> = HashMap::new();
        for binding in classification
            .bindings
            .iter()
            .filter(|b| b.source == BindingSource::Member)
        {
            let count = per_member.entry(binding.name.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                self.errors.push(CheckError::MultipleMemberOutputs {
                    function: self.function_name(),
                    owner: self.owner(),
                    member: binding.name.clone(),
                    location: self.function.locate(binding.span),
                });
            }
        }
    }

    fn check_http_responses(&mut self, classification: &Classification<'a>) {
        let responses: Vec<_> = classification.http_responses().collect();
        if responses.len() > 1 {
            self.errors.push(CheckError::MultipleHttpResponses {
                function: self.function_name(),
                owner: self.owner(),
                bindings: responses.iter().map(|b| b.name.clone()).collect(),
                location: self.function.locate(responses[1].span),
            });
        }
    }

    fn check_constructors(&mut self, classification: &Classification<'a>) {
        for binding in &classification.bindings {
            let BindingOrigin::Annotation { annotation, spec } = binding.origin else {
                continue;
            };
            let count = annotation.positional_args.len();
            if spec.constructor_for(count).is_none() {
                let arities: Vec<_> = spec.constructors.iter().map(|c| c.len().to_string()).collect();
                self.errors.push(CheckError::MalformedAnnotation {
                    function: self.function_name(),
                    owner: self.owner(),
                    annotation: annotation.name.clone(),
                    target: binding.name.clone(),
                    reason: format!(
                        "{} positional argument(s) match no constructor (accepted: {})",
                        count,
                        if arities.is_empty() { "0".to_string() } else { arities.join(", ") }
                    ),
                    location: self.function.locate(annotation.span),
                });
            }
        }
    }

    /// `$return` may repeat: a method output and the implied HTTP response share it
    fn check_unique_names(&mut self, classification: &Classification<'a>) {
        let mut seen: HashMap<&str, BindingSource> = HashMap::new();
        for binding in classification
            .bindings
            .iter()
            .filter(|b| b.name != RETURN_BINDING_NAME)
        {
            if seen.insert(binding.name.as_str(), binding.source).is_some() {
                self.errors.push(CheckError::DuplicateBindingName {
                    function: self.function_name(),
                    owner: self.owner(),
                    name: binding.name.clone(),
                    location: self.function.locate(binding.span),
                });
            }
        }
    }

    fn check_legacy(&mut self, classification: &Classification<'a>) {
        for (annotation, target) in &classification.legacy {
            self.errors.push(CheckError::LegacyBinding {
                function: self.function_name(),
                owner: self.owner(),
                annotation: annotation.name.clone(),
                target: target.clone(),
                location: self.function.locate(annotation.span),
            });
        }
    }
}
