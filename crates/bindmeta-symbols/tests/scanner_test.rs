//! Integration tests for candidate scanning

use bindmeta_ast::*;
use bindmeta_symbols::{scan, ScanError};

fn function(name: &str) -> Annotation {
    Annotation::new("Function").arg(TypedValue::string(name))
}

fn scan_errors(program: &Program) -> Vec<ScanError> {
    let conventions = Conventions::default();
    match scan(program, &conventions) {
        Ok(_) => vec![],
        Err(errors) => errors,
    }
}

#[test]
fn selects_only_annotated_methods_in_order() {
    let program = Program::new("TestProject")
        .with_type(
            TypeDecl::new("Functions")
                .with_method(MethodDecl::new("Helper", TypeRef::Void))
                .with_method(MethodDecl::new("Second", TypeRef::Void).annotated(function("B")))
                .with_method(
                    MethodDecl::new("First", TypeRef::Void)
                        .annotated(Annotation::new("Obsolete"))
                        .annotated(function("A")),
                ),
        )
        .with_type(
            TypeDecl::new("More").with_method(
                MethodDecl::new("Third", TypeRef::Void)
                    .annotated(Annotation::new("Microsoft.Azure.Functions.Worker.FunctionAttribute").arg(TypedValue::string("C"))),
            ),
        );

    let conventions = Conventions::default();
    let functions = scan(&program, &conventions).expect("scan succeeds");
    let names: Vec<_> = functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["B", "A", "C"]);
    assert_eq!(functions[2].entry_point, "TestProject.More.Third");
    assert_eq!(functions[2].owner_name(), "More");
}

#[test]
fn resolves_declared_return_type_members() {
    let program = Program::new("App")
        .with_type(
            TypeDecl::new("MultiOutput")
                .in_namespace("App.Models")
                .with_member(MemberDecl::new("Message", TypeRef::named("string"))),
        )
        .with_type(
            TypeDecl::new("Functions")
                .with_method(MethodDecl::new("Run", TypeRef::named("MultiOutput")).annotated(function("Run")))
                .with_method(MethodDecl::new("Other", TypeRef::named("object")).annotated(function("Other"))),
        );

    let conventions = Conventions::default();
    let functions = scan(&program, &conventions).expect("scan succeeds");
    assert_eq!(functions[0].return_type.members().len(), 1);
    assert!(functions[0].return_type.declaration.is_some());
    assert!(functions[1].return_type.members().is_empty());
}

#[test]
fn unresolved_parameter_type_is_fatal() {
    let program = Program::new("App").with_type(
        TypeDecl::new("Functions").in_file("Functions.cs").with_method(
            MethodDecl::new("Run", TypeRef::Void)
                .annotated(function("Run"))
                .with_param(Parameter::new("input", TypeRef::error("MissingType"))),
        ),
    );

    let errors = scan_errors(&program);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code(), "E-SCAN-001");
    assert_eq!(errors[0].declaration(), "Functions.Run");
    assert_eq!(errors[0].location().file.as_deref(), Some("Functions.cs"));
}

#[test]
fn unresolved_return_type_is_fatal() {
    let program = Program::new("App").with_type(
        TypeDecl::new("Functions").with_method(
            MethodDecl::new("Run", TypeRef::generic("Task", vec![TypeRef::error("Broken")]))
                .annotated(function("Run")),
        ),
    );

    let errors = scan_errors(&program);
    assert!(matches!(&errors[0], ScanError::UnresolvedType { target, .. } if target == "return type"));
}

#[test]
fn entry_point_without_name_is_rejected() {
    let program = Program::new("App").with_type(
        TypeDecl::new("Functions")
            .with_method(MethodDecl::new("Run", TypeRef::Void).annotated(Annotation::new("Function"))),
    );

    let errors = scan_errors(&program);
    assert_eq!(errors[0].code(), "E-SCAN-002");
}

#[test]
fn duplicate_function_names_are_rejected() {
    let program = Program::new("App").with_type(
        TypeDecl::new("Functions")
            .with_method(MethodDecl::new("One", TypeRef::Void).annotated(function("Same")))
            .with_method(MethodDecl::new("Two", TypeRef::Void).annotated(function("Same"))),
    );

    let errors = scan_errors(&program);
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ScanError::DuplicateFunctionName { first_entry_point, method, .. } => {
            assert_eq!(first_entry_point, "App.Functions.One");
            assert_eq!(method, "Two");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn non_candidates_with_broken_types_are_ignored() {
    let program = Program::new("App").with_type(
        TypeDecl::new("Functions").with_method(MethodDecl::new("Helper", TypeRef::error("Nope"))),
    );

    let conventions = Conventions::default();
    let functions = scan(&program, &conventions).expect("non-candidates are not resolved");
    assert!(functions.is_empty());
}
