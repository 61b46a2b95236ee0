//! Tests for annotation extraction and the argument elision policy

use polygen_extract::error::ExtractError;
use polygen_extract::extract::{DefaultMatchPolicy, ExtractOptions};
use polygen_extract::ir::*;
use polygen_extract::{extract_units, extract_units_with, Document};
use polygen_syntax::ast::*;
use polygen_syntax::Span;

// ============================================================================
// Fixtures
// ============================================================================

fn arg_decl(name: &str, ty: TypeSyntax, default: Option<Expression>) -> MemberSyntax {
    MemberSyntax::AnnotationArg(AnnotationArgDeclSyntax {
        name: name.to_string(),
        ty,
        default,
        span: Span::synthetic(),
    })
}

fn field(name: &str, ty: TypeSyntax, annotations: Vec<AnnotationUseSyntax>) -> MemberSyntax {
    MemberSyntax::Field(FieldSyntax {
        name: name.to_string(),
        ty,
        modifiers: vec!["private".to_string()],
        annotations,
        initializer: None,
        span: Span::synthetic(),
    })
}

fn field_annotations(docs: &[Document], field_name: &str) -> Vec<AnnotationUse> {
    docs.iter()
        .find_map(|doc| match doc {
            Document::Field(f) if f.name == field_name => Some(f.annotations.clone()),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no field document named {field_name}"))
}

/// `@interface Tag { String value(); }`
fn tag_decl() -> TypeDeclSyntax {
    let mut decl = TypeDeclSyntax::annotation_type("Tag");
    decl.members = vec![arg_decl("value", TypeSyntax::named("String"), None)];
    decl
}

/// `@interface Timeout { int millis() default 9_000 * 545; }`
fn timeout_decl() -> TypeDeclSyntax {
    let mut decl = TypeDeclSyntax::annotation_type("Timeout");
    decl.members = vec![arg_decl(
        "millis",
        TypeSyntax::named("int"),
        Some(Expression::binary(
            BinaryOp::Mul,
            Expression::int("9_000"),
            Expression::int("545"),
        )),
    )];
    decl
}

// ============================================================================
// Name Elision
// ============================================================================

#[test]
fn test_elided_and_explicit_name_mean_the_same() {
    let mut class = TypeDeclSyntax::class("Holder");
    class.members = vec![
        field(
            "shorthand",
            TypeSyntax::named("String"),
            vec![AnnotationUseSyntax::new(
                "Tag",
                vec![AnnotationArgSyntax::positional(Expression::string("x"))],
            )],
        ),
        field(
            "spelled",
            TypeSyntax::named("String"),
            vec![AnnotationUseSyntax::new(
                "Tag",
                vec![AnnotationArgSyntax::named("value", Expression::string("x"))],
            )],
        ),
    ];
    let unit = CompilationUnit::new("holder.src", vec![tag_decl(), class]);

    let (docs, diags) = extract_units(&[unit]);
    assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");

    let shorthand = field_annotations(&docs, "shorthand");
    let spelled = field_annotations(&docs, "spelled");
    assert_eq!(shorthand.len(), 1);
    assert_eq!(spelled.len(), 1);

    // Formatting flags differ...
    assert!(shorthand[0].args[0].name_elided);
    assert!(!spelled[0].args[0].name_elided);
    // ...but both bind the reserved name with the same value.
    assert_eq!(shorthand[0].args[0].name, "value");
    assert!(shorthand[0].semantic_eq(&spelled[0]));
}

#[test]
fn test_positional_argument_against_multi_arg_decl_is_ambiguous() {
    let mut route = TypeDeclSyntax::annotation_type("Route");
    route.members = vec![
        arg_decl("path", TypeSyntax::named("String"), None),
        arg_decl("code", TypeSyntax::named("int"), None),
    ];
    let mut class = TypeDeclSyntax::class("Endpoint");
    class.members = vec![field(
        "handler",
        TypeSyntax::named("String"),
        vec![AnnotationUseSyntax::new(
            "Route",
            vec![AnnotationArgSyntax::positional(Expression::string("/x"))],
        )],
    )];
    let unit = CompilationUnit::new("endpoint.src", vec![route, class]);

    let (docs, diags) = extract_units(&[unit]);

    assert!(diags.iter().any(|d| matches!(
        &d.error,
        ExtractError::AmbiguousAnnotationArgument { annotation, .. } if annotation == "Route"
    )));
    // Best-effort binding by position keeps the use present in the IR.
    let anns = field_annotations(&docs, "handler");
    assert_eq!(anns[0].args[0].name, "path");
}

#[test]
fn test_positional_argument_against_non_reserved_single_arg_is_ambiguous() {
    let mut named = TypeDeclSyntax::annotation_type("Named");
    named.members = vec![arg_decl("label", TypeSyntax::named("String"), None)];
    let mut class = TypeDeclSyntax::class("Thing");
    class.members = vec![field(
        "it",
        TypeSyntax::named("String"),
        vec![AnnotationUseSyntax::new(
            "Named",
            vec![AnnotationArgSyntax::positional(Expression::string("t"))],
        )],
    )];
    let unit = CompilationUnit::new("thing.src", vec![named, class]);

    let (_docs, diags) = extract_units(&[unit]);
    assert!(diags.iter().any(|d| matches!(
        &d.error,
        ExtractError::AmbiguousAnnotationArgument { annotation, .. } if annotation == "Named"
    )));
}

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn test_explicit_value_equal_to_default_is_redundant() {
    let mut class = TypeDeclSyntax::class("Job");
    class.members = vec![field(
        "task",
        TypeSyntax::named("String"),
        vec![AnnotationUseSyntax::new(
            "Timeout",
            vec![AnnotationArgSyntax::named(
                "millis",
                Expression::binary(
                    BinaryOp::Mul,
                    Expression::int("9_000"),
                    Expression::int("545"),
                ),
            )],
        )],
    )];
    let unit = CompilationUnit::new("job.src", vec![timeout_decl(), class]);

    let (docs, diags) = extract_units(&[unit]);
    assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");

    let anns = field_annotations(&docs, "task");
    let arg = anns[0].arg("millis").expect("millis argument");
    assert!(arg.redundant_with_default);
    assert!(anns[0].defaulted.is_empty());
}

#[test]
fn test_different_value_is_not_redundant() {
    let mut class = TypeDeclSyntax::class("Job");
    class.members = vec![field(
        "task",
        TypeSyntax::named("String"),
        vec![AnnotationUseSyntax::new(
            "Timeout",
            vec![AnnotationArgSyntax::named("millis", Expression::int("10"))],
        )],
    )];
    let unit = CompilationUnit::new("job.src", vec![timeout_decl(), class]);

    let (docs, _diags) = extract_units(&[unit]);
    let anns = field_annotations(&docs, "task");
    assert!(!anns[0].arg("millis").unwrap().redundant_with_default);
}

#[test]
fn test_no_structural_folding_when_comparing_defaults() {
    // The default is `9_000 * 545`; a use writing the product is a
    // different expression tree and must not match.
    let mut class = TypeDeclSyntax::class("Job");
    class.members = vec![field(
        "task",
        TypeSyntax::named("String"),
        vec![AnnotationUseSyntax::new(
            "Timeout",
            vec![AnnotationArgSyntax::named(
                "millis",
                Expression::int("4905000"),
            )],
        )],
    )];
    let unit = CompilationUnit::new("job.src", vec![timeout_decl(), class]);

    let (docs, _diags) = extract_units(&[unit]);
    let anns = field_annotations(&docs, "task");
    assert!(!anns[0].arg("millis").unwrap().redundant_with_default);
}

#[test]
fn test_omitted_argument_with_default_is_recorded_as_defaulted() {
    let mut class = TypeDeclSyntax::class("Job");
    class.members = vec![field(
        "task",
        TypeSyntax::named("String"),
        vec![AnnotationUseSyntax::new("Timeout", vec![])],
    )];
    let unit = CompilationUnit::new("job.src", vec![timeout_decl(), class]);

    let (docs, diags) = extract_units(&[unit]);
    assert!(diags.is_empty());

    let anns = field_annotations(&docs, "task");
    assert!(anns[0].args.is_empty());
    assert_eq!(anns[0].defaulted, vec!["millis".to_string()]);
}

#[test]
fn test_never_policy_disables_redundancy_marking() {
    let mut class = TypeDeclSyntax::class("Job");
    class.members = vec![field(
        "task",
        TypeSyntax::named("String"),
        vec![AnnotationUseSyntax::new(
            "Timeout",
            vec![AnnotationArgSyntax::named(
                "millis",
                Expression::binary(
                    BinaryOp::Mul,
                    Expression::int("9_000"),
                    Expression::int("545"),
                ),
            )],
        )],
    )];
    let unit = CompilationUnit::new("job.src", vec![timeout_decl(), class]);

    let options = ExtractOptions {
        default_match: DefaultMatchPolicy::Never,
    };
    let (docs, _diags) = extract_units_with(&[unit], options);
    let anns = field_annotations(&docs, "task");
    assert!(!anns[0].arg("millis").unwrap().redundant_with_default);
}

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_retention_meta_annotation() {
    let mut decl = tag_decl();
    decl.annotations = vec![AnnotationUseSyntax::new(
        "Retention",
        vec![AnnotationArgSyntax::positional(Expression::member(
            Expression::ident("RetentionPolicy"),
            "RUNTIME",
        ))],
    )];
    let unit = CompilationUnit::new("tag.src", vec![decl]);

    let (docs, diags) = extract_units(&[unit]);
    assert!(diags.is_empty());
    match &docs[0] {
        Document::AnnotationType { decl, .. } => {
            assert_eq!(decl.retention, Retention::RuntimeVisible);
            assert_eq!(decl.args.len(), 1);
            assert_eq!(decl.args[0].name, "value");
        }
        other => panic!("expected annotation type document, got {}", other.kind()),
    }
}

#[test]
fn test_missing_retention_is_unspecified() {
    let unit = CompilationUnit::new("tag.src", vec![tag_decl()]);
    let (docs, _diags) = extract_units(&[unit]);
    match &docs[0] {
        Document::AnnotationType { decl, .. } => {
            assert_eq!(decl.retention, Retention::Unspecified);
        }
        other => panic!("expected annotation type document, got {}", other.kind()),
    }
}

#[test]
fn test_unknown_annotation_is_reported_and_kept() {
    let mut class = TypeDeclSyntax::class("Orphan");
    class.members = vec![field(
        "data",
        TypeSyntax::named("String"),
        vec![AnnotationUseSyntax::new("Nope", vec![])],
    )];
    let unit = CompilationUnit::new("orphan.src", vec![class]);

    let (docs, diags) = extract_units(&[unit]);
    assert!(diags.iter().any(|d| matches!(
        &d.error,
        ExtractError::UnknownType { name } if name == "Nope"
    )));
    // The use survives against a synthesized declaration.
    let anns = field_annotations(&docs, "data");
    assert_eq!(anns[0].decl.name, "Nope");
}

#[test]
fn test_annotation_declared_in_another_unit_resolves() {
    let mut class = TypeDeclSyntax::class("Holder");
    class.members = vec![field(
        "data",
        TypeSyntax::named("String"),
        vec![AnnotationUseSyntax::new(
            "Tag",
            vec![AnnotationArgSyntax::positional(Expression::string("x"))],
        )],
    )];
    // The using unit comes first; phase separation makes order irrelevant.
    let using = CompilationUnit::new("holder.src", vec![class]);
    let declaring = CompilationUnit::new("tag.src", vec![tag_decl()]);

    let (docs, diags) = extract_units(&[using, declaring]);
    assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
    let anns = field_annotations(&docs, "data");
    assert_eq!(anns[0].decl.name, "Tag");
}

#[test]
fn test_nested_annotations_sharing_a_simple_name_keep_their_qualified_paths() {
    // class First { @interface Tag { String value(); } }
    // class Second { @interface Tag { int level(); } }
    let mut first = TypeDeclSyntax::class("First");
    first.members = vec![MemberSyntax::Nested(tag_decl())];

    let mut second_tag = TypeDeclSyntax::annotation_type("Tag");
    second_tag.members = vec![arg_decl("level", TypeSyntax::named("int"), None)];
    let mut second = TypeDeclSyntax::class("Second");
    second.members = vec![MemberSyntax::Nested(second_tag)];

    let mut holder = TypeDeclSyntax::class("Holder");
    holder.members = vec![
        field(
            "ranked",
            TypeSyntax::named("String"),
            vec![AnnotationUseSyntax::new(
                "Second.Tag",
                vec![AnnotationArgSyntax::named("level", Expression::int("3"))],
            )],
        ),
        field(
            "plain",
            TypeSyntax::named("String"),
            vec![AnnotationUseSyntax::new(
                "Tag",
                vec![AnnotationArgSyntax::positional(Expression::string("x"))],
            )],
        ),
    ];
    let unit = CompilationUnit::new("tags.src", vec![first, second, holder]);

    let (docs, diags) = extract_units(&[unit]);
    assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");

    // The qualified use binds Second's declaration, not First's.
    let ranked = field_annotations(&docs, "ranked");
    assert!(ranked[0].decl.arg("level").is_some());
    assert!(ranked[0].arg("level").is_some());

    // The bare simple name keeps binding the first declaration seen.
    let plain = field_annotations(&docs, "plain");
    assert!(plain[0].decl.has_single_reserved_arg());
}
