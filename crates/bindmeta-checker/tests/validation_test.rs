//! Integration tests for binding validation

use bindmeta_ast::*;
use bindmeta_checker::{check_function, BindingCatalog, CheckError, Diagnostic};
use bindmeta_symbols::scan;

fn entry(name: &str) -> Annotation {
    Annotation::new("Function").arg(TypedValue::string(name))
}

fn queue_output(queue: &str) -> Annotation {
    Annotation::new("QueueOutput").arg(TypedValue::string(queue))
}

fn queue_trigger(queue: &str) -> Annotation {
    Annotation::new("QueueTrigger").arg(TypedValue::string(queue))
}

fn http_trigger() -> Annotation {
    Annotation::new("HttpTrigger").arg(TypedValue::enum_value("AuthorizationLevel.Function"))
}

/// Check the first candidate of a program and return its errors
fn check_errors(program: &Program) -> Vec<CheckError> {
    let conventions = Conventions::default();
    let catalog = BindingCatalog::for_program(program);
    let functions = scan(program, &conventions).expect("scan succeeds");
    let function = functions.into_iter().next().expect("one candidate");
    match check_function(function, &catalog, &conventions) {
        Ok(_) => vec![],
        Err(errors) => errors,
    }
}

fn codes(errors: &[CheckError]) -> Vec<&'static str> {
    errors.iter().map(|e| e.code()).collect()
}

#[test]
fn two_method_outputs_are_rejected() {
    let program = Program::new("App").with_type(
        TypeDecl::new("Functions").in_file("Functions.cs").with_method(
            MethodDecl::new("Run", TypeRef::named("string"))
                .annotated(entry("QueueToBlob"))
                .annotated(queue_output("first"))
                .annotated(Annotation::new("BlobOutput").arg(TypedValue::string("c/out")).with_span(Span::new(40, 60)))
                .with_param(Parameter::new("message", TypeRef::named("string")).annotated(queue_trigger("in"))),
        ),
    );

    let errors = check_errors(&program);
    assert_eq!(codes(&errors), vec!["E-BIND-001"]);
    match &errors[0] {
        CheckError::MultipleMethodOutputs { annotations, location, function, .. } => {
            assert_eq!(function, "QueueToBlob");
            assert_eq!(annotations, &vec!["QueueOutput".to_string(), "BlobOutput".to_string()]);
            assert_eq!(location.span, Span::new(40, 60));
            assert_eq!(location.file.as_deref(), Some("Functions.cs"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn two_http_response_members_are_rejected() {
    let program = Program::new("App")
        .with_type(
            TypeDecl::new("Responses")
                .with_member(MemberDecl::new("First", TypeRef::named("HttpResponseData")))
                .with_member(MemberDecl::new("Second", TypeRef::named("HttpResponseData"))),
        )
        .with_type(
            TypeDecl::new("Functions").with_method(
                MethodDecl::new("Run", TypeRef::named("Responses"))
                    .annotated(entry("Fn"))
                    .with_param(Parameter::new("req", TypeRef::named("HttpRequestData")).annotated(http_trigger())),
            ),
        );

    let errors = check_errors(&program);
    assert_eq!(codes(&errors), vec!["E-BIND-002"]);
    assert!(matches!(
        &errors[0],
        CheckError::MultipleHttpResponses { bindings, .. } if bindings == &vec!["First".to_string(), "Second".to_string()]
    ));
}

#[test]
fn too_many_constructor_arguments_are_malformed() {
    let program = Program::new("App").with_type(
        TypeDecl::new("Functions").with_method(
            MethodDecl::new("Run", TypeRef::Void).annotated(entry("Fn")).with_param(
                Parameter::new("message", TypeRef::named("string")).annotated(
                    Annotation::new("QueueTrigger")
                        .arg(TypedValue::string("q"))
                        .arg(TypedValue::string("extra")),
                ),
            ),
        ),
    );

    let errors = check_errors(&program);
    assert_eq!(codes(&errors), vec!["E-BIND-003"]);
    assert!(errors[0].to_string().contains("QueueTrigger"));
}

#[test]
fn member_with_two_bindings_is_rejected() {
    let program = Program::new("App")
        .with_type(
            TypeDecl::new("Output").with_member(
                MemberDecl::new("Item", TypeRef::named("string"))
                    .annotated(queue_output("items"))
                    .annotated(Annotation::new("BlobOutput").arg(TypedValue::string("c/item"))),
            ),
        )
        .with_type(
            TypeDecl::new("Functions")
                .with_method(MethodDecl::new("Run", TypeRef::named("Output")).annotated(entry("Fn"))),
        );

    // the clashing name is a consequence, so only the member error is reported
    let errors = check_errors(&program);
    assert_eq!(codes(&errors), vec!["E-BIND-004"]);
}

#[test]
fn parameter_and_member_sharing_a_name_clash() {
    let program = Program::new("App")
        .with_type(
            TypeDecl::new("Output")
                .with_member(MemberDecl::new("item", TypeRef::named("string")).annotated(queue_output("out"))),
        )
        .with_type(
            TypeDecl::new("Functions").with_method(
                MethodDecl::new("Run", TypeRef::named("Output"))
                    .annotated(entry("Fn"))
                    .with_param(Parameter::new("item", TypeRef::named("string")).annotated(queue_trigger("in"))),
            ),
        );

    let errors = check_errors(&program);
    assert_eq!(codes(&errors), vec!["E-BIND-005"]);
}

#[test]
fn legacy_bindings_warn_without_failing() {
    let program = Program::new("App")
        .with_annotation_type(
            AnnotationTypeDecl::new("Microsoft.Azure.WebJobs.TableAttribute", "System.Attribute")
                .with_marker("Microsoft.Azure.WebJobs.Description.BindingAttribute"),
        )
        .with_type(
            TypeDecl::new("Functions").with_method(
                MethodDecl::new("Run", TypeRef::Void)
                    .annotated(entry("Fn"))
                    .with_param(Parameter::new("message", TypeRef::named("string")).annotated(queue_trigger("in")))
                    .with_param(
                        Parameter::new("table", TypeRef::named("object"))
                            .annotated(Annotation::new("Table").arg(TypedValue::string("t"))),
                    ),
            ),
        );

    let conventions = Conventions::default();
    let catalog = BindingCatalog::for_program(&program);
    let functions = scan(&program, &conventions).expect("scan succeeds");
    let checked = check_function(functions[0].clone(), &catalog, &conventions).expect("warnings only");

    assert_eq!(checked.bindings.len(), 1);
    assert_eq!(checked.warnings.len(), 1);
    assert!(!checked.warnings[0].is_hard_error());
    let diagnostic = Diagnostic::from(&checked.warnings[0]);
    assert!(!diagnostic.is_error());
}

#[test]
fn valid_function_keeps_pass_order() {
    let program = Program::new("App").with_type(
        TypeDecl::new("Functions").with_method(
            MethodDecl::new("Run", TypeRef::named("string"))
                .annotated(entry("Fn"))
                .annotated(queue_output("test-output"))
                .with_param(Parameter::new("message", TypeRef::named("string")).annotated(queue_trigger("test-input")))
                .with_param(Parameter::new("context", TypeRef::named("FunctionContext"))),
        ),
    );

    let conventions = Conventions::default();
    let catalog = BindingCatalog::for_program(&program);
    let functions = scan(&program, &conventions).expect("scan succeeds");
    let checked = check_function(functions[0].clone(), &catalog, &conventions).expect("valid function");

    let names: Vec<_> = checked.bindings.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec![RETURN_BINDING_NAME, "message"]);
    assert_eq!(checked.bindings[0].direction, Direction::Out);
    assert_eq!(checked.bindings[1].data_type, Some(DataType::String));
    assert!(checked.warnings.is_empty());
}

#[test]
fn return_bindings_are_exempt_from_name_uniqueness() {
    let program = Program::new("App").with_type(
        TypeDecl::new("Functions").with_method(
            MethodDecl::new("Run", TypeRef::named("HttpResponseData"))
                .annotated(entry("Fn"))
                .annotated(queue_output("q"))
                .with_param(Parameter::new("req", TypeRef::named("HttpRequestData")).annotated(http_trigger())),
        ),
    );

    let conventions = Conventions::default();
    let catalog = BindingCatalog::for_program(&program);
    let functions = scan(&program, &conventions).expect("scan succeeds");
    let checked = check_function(functions[0].clone(), &catalog, &conventions)
        .unwrap_or_else(|errors| panic!("rejected: {:?}", codes(&errors)));

    let names: Vec<_> = checked.bindings.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec![RETURN_BINDING_NAME, "req", RETURN_BINDING_NAME]);
    assert!(!checked.bindings[0].is_http_response());
    assert!(checked.bindings[2].is_http_response());
}

#[test]
fn method_output_does_not_suppress_implicit_http_response() {
    let program = Program::new("App").with_type(
        TypeDecl::new("Functions").with_method(
            MethodDecl::new("Run", TypeRef::named("string"))
                .annotated(entry("Fn"))
                .annotated(queue_output("q"))
                .with_param(Parameter::new("req", TypeRef::named("HttpRequestData")).annotated(http_trigger())),
        ),
    );

    let conventions = Conventions::default();
    let catalog = BindingCatalog::for_program(&program);
    let functions = scan(&program, &conventions).expect("scan succeeds");
    let checked = check_function(functions[0].clone(), &catalog, &conventions).expect("valid function");

    assert_eq!(checked.bindings.len(), 3);
    assert_eq!(checked.bindings[0].name, RETURN_BINDING_NAME);
    assert_eq!(checked.bindings[0].direction, Direction::Out);
    let last = checked.bindings.last().expect("response binding");
    assert!(last.is_http_response());
    assert_eq!(last.name, RETURN_BINDING_NAME);
}
