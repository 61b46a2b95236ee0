//! Tests for constructor delegation resolution

use polygen_extract::error::ExtractError;
use polygen_extract::extract_units;
use polygen_extract::ir::*;
use polygen_extract::Document;
use polygen_syntax::ast::*;
use polygen_syntax::Span;

// ============================================================================
// Fixtures
// ============================================================================

fn ctor(params: Vec<ParamSyntax>, statements: Vec<Statement>) -> MemberSyntax {
    MemberSyntax::Constructor(ConstructorSyntax {
        params,
        modifiers: vec!["public".to_string()],
        annotations: Vec::new(),
        body: BlockStatement::of(statements),
        span: Span::synthetic(),
    })
}

fn int_field(name: &str) -> MemberSyntax {
    MemberSyntax::Field(FieldSyntax {
        name: name.to_string(),
        ty: TypeSyntax::named("int"),
        modifiers: Vec::new(),
        annotations: Vec::new(),
        initializer: None,
        span: Span::synthetic(),
    })
}

fn constructors(docs: &[Document]) -> Vec<&ConstructorIr> {
    docs.iter()
        .filter_map(|doc| match doc {
            Document::Constructor(c) => Some(c),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_sideways_delegation_is_classified_and_stripped() {
    // class Point { int x; int y;
    //   Point() { this(0, 0); }
    //   Point(int x, int y) { this.x = x; this.y = y; } }
    let mut point = TypeDeclSyntax::class("Point");
    point.members = vec![
        int_field("x"),
        int_field("y"),
        ctor(
            vec![],
            vec![Statement::expression(Expression::call(
                None,
                "this",
                vec![Expression::int("0"), Expression::int("0")],
            ))],
        ),
        ctor(
            vec![
                ParamSyntax::new("x", TypeSyntax::named("int")),
                ParamSyntax::new("y", TypeSyntax::named("int")),
            ],
            vec![
                Statement::expression(Expression::assign(
                    AssignOp::Assign,
                    Expression::member(Expression::ident("this"), "x"),
                    Expression::ident("x"),
                )),
                Statement::expression(Expression::assign(
                    AssignOp::Assign,
                    Expression::member(Expression::ident("this"), "y"),
                    Expression::ident("y"),
                )),
            ],
        ),
    ];
    let unit = CompilationUnit::new("point.src", vec![point]);

    let (docs, diags) = extract_units(&[unit]);
    assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");

    let ctors = constructors(&docs);
    assert_eq!(ctors.len(), 2);

    // The delegating constructor loses the call from its body.
    match &ctors[0].delegation {
        Delegation::Sideways(args) => assert_eq!(args.len(), 2),
        other => panic!("expected sideways delegation, got {other:?}"),
    }
    assert!(ctors[0].body.is_empty());

    // The designated constructor keeps its full body.
    assert!(matches!(ctors[1].delegation, Delegation::None));
    assert_eq!(ctors[1].body.len(), 2);
}

#[test]
fn test_upward_delegation_strips_only_the_first_statement() {
    let mut base = TypeDeclSyntax::class("Base");
    base.members = vec![ctor(
        vec![ParamSyntax::new("n", TypeSyntax::named("int"))],
        vec![],
    )];

    let mut derived = TypeDeclSyntax::class("Derived");
    derived.extends = Some(TypeSyntax::named("Base"));
    derived.members = vec![ctor(
        vec![],
        vec![
            Statement::expression(Expression::call(
                None,
                "super",
                vec![Expression::int("1")],
            )),
            Statement::var_decl(
                TypeSyntax::named("int"),
                vec![Declarator::new("z", Some(Expression::int("2")))],
            ),
        ],
    )];
    let unit = CompilationUnit::new("derived.src", vec![base, derived]);

    let (docs, diags) = extract_units(&[unit]);
    assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");

    let derived_ctor = constructors(&docs)
        .into_iter()
        .find(|c| c.owner == "Derived")
        .expect("Derived constructor");
    match &derived_ctor.delegation {
        Delegation::Upward(args) => assert_eq!(args.len(), 1),
        other => panic!("expected upward delegation, got {other:?}"),
    }
    assert_eq!(derived_ctor.body.len(), 1);
    assert!(matches!(
        derived_ctor.body.statements[0],
        StmtNode::VarDecl { .. }
    ));
}

#[test]
fn test_later_super_call_is_not_delegation() {
    let mut base = TypeDeclSyntax::class("Base");
    base.members = vec![ctor(vec![], vec![])];

    let mut derived = TypeDeclSyntax::class("Derived");
    derived.extends = Some(TypeSyntax::named("Base"));
    derived.members = vec![ctor(
        vec![],
        vec![
            Statement::var_decl(
                TypeSyntax::named("int"),
                vec![Declarator::new("z", Some(Expression::int("2")))],
            ),
            Statement::expression(Expression::call(None, "super", vec![])),
        ],
    )];
    let unit = CompilationUnit::new("derived.src", vec![base, derived]);

    let (docs, _diags) = extract_units(&[unit]);
    let derived_ctor = constructors(&docs)
        .into_iter()
        .find(|c| c.owner == "Derived")
        .expect("Derived constructor");
    assert!(matches!(derived_ctor.delegation, Delegation::None));
    assert_eq!(derived_ctor.body.len(), 2);
}

// ============================================================================
// Cycles
// ============================================================================

#[test]
fn test_mutual_delegation_cycle_voids_both_constructors() {
    // class A { A() { this(0); } A(int n) { this(); } }
    let mut a = TypeDeclSyntax::class("A");
    a.members = vec![
        ctor(
            vec![],
            vec![Statement::expression(Expression::call(
                None,
                "this",
                vec![Expression::int("0")],
            ))],
        ),
        ctor(
            vec![ParamSyntax::new("n", TypeSyntax::named("int"))],
            vec![Statement::expression(Expression::call(None, "this", vec![]))],
        ),
    ];
    let unit = CompilationUnit::new("a.src", vec![a]);

    let (docs, diags) = extract_units(&[unit]);

    let cycles: Vec<_> = diags
        .iter()
        .filter_map(|d| match &d.error {
            ExtractError::DelegationCycle { owner, cycle } => Some((owner, cycle)),
            _ => None,
        })
        .collect();
    assert_eq!(cycles.len(), 1, "exactly one cycle diagnostic: {diags:?}");
    let (owner, cycle) = cycles[0];
    assert_eq!(owner, "A");
    assert_eq!(cycle, &vec!["A()".to_string(), "A(int)".to_string()]);

    // Delegation info is voided for every constructor on the cycle.
    for c in constructors(&docs) {
        assert!(matches!(c.delegation, Delegation::None));
    }
}

#[test]
fn test_self_delegation_is_a_cycle_of_one() {
    let mut selfie = TypeDeclSyntax::class("Selfie");
    selfie.members = vec![ctor(
        vec![ParamSyntax::new("a", TypeSyntax::named("int"))],
        vec![Statement::expression(Expression::call(
            None,
            "this",
            vec![Expression::int("1")],
        ))],
    )];
    let unit = CompilationUnit::new("selfie.src", vec![selfie]);

    let (docs, diags) = extract_units(&[unit]);
    assert!(diags.iter().any(|d| matches!(
        &d.error,
        ExtractError::DelegationCycle { cycle, .. } if cycle == &vec!["Selfie(int)".to_string()]
    )));
    assert!(matches!(
        constructors(&docs)[0].delegation,
        Delegation::None
    ));
}

#[test]
fn test_chain_into_cycle_reports_only_the_cycle() {
    // C(long) -> C() -> C(int) -> C(): the entry constructor is on a path
    // into the cycle but not on the cycle itself.
    let mut c = TypeDeclSyntax::class("C");
    c.members = vec![
        ctor(
            vec![ParamSyntax::new("l", TypeSyntax::named("long"))],
            vec![Statement::expression(Expression::call(None, "this", vec![]))],
        ),
        ctor(
            vec![],
            vec![Statement::expression(Expression::call(
                None,
                "this",
                vec![Expression::int("0")],
            ))],
        ),
        ctor(
            vec![ParamSyntax::new("n", TypeSyntax::named("int"))],
            vec![Statement::expression(Expression::call(None, "this", vec![]))],
        ),
    ];
    let unit = CompilationUnit::new("c.src", vec![c]);

    let (docs, diags) = extract_units(&[unit]);
    let cycle = diags
        .iter()
        .find_map(|d| match &d.error {
            ExtractError::DelegationCycle { cycle, .. } => Some(cycle.clone()),
            _ => None,
        })
        .expect("cycle diagnostic");
    assert_eq!(cycle, vec!["C()".to_string(), "C(int)".to_string()]);

    let ctors = constructors(&docs);
    // The entry constructor keeps its (valid) sideways delegation.
    assert!(matches!(ctors[0].delegation, Delegation::Sideways(_)));
    assert!(matches!(ctors[1].delegation, Delegation::None));
    assert!(matches!(ctors[2].delegation, Delegation::None));
}

#[test]
fn test_overloads_with_equal_arity_are_told_apart_by_argument_type() {
    // class E {
    //   E(int n)    { this("s"); }
    //   E(String s) { this(1); }
    //   E(long l)   {} }
    // All three constructors take one argument, so only the static types of
    // the delegated arguments separate the cycle from the bystander.
    let mut e = TypeDeclSyntax::class("E");
    e.members = vec![
        ctor(
            vec![ParamSyntax::new("n", TypeSyntax::named("int"))],
            vec![Statement::expression(Expression::call(
                None,
                "this",
                vec![Expression::string("s")],
            ))],
        ),
        ctor(
            vec![ParamSyntax::new("s", TypeSyntax::named("String"))],
            vec![Statement::expression(Expression::call(
                None,
                "this",
                vec![Expression::int("1")],
            ))],
        ),
        ctor(vec![ParamSyntax::new("l", TypeSyntax::named("long"))], vec![]),
    ];
    let unit = CompilationUnit::new("e.src", vec![e]);

    let (docs, diags) = extract_units(&[unit]);
    let cycle = diags
        .iter()
        .find_map(|d| match &d.error {
            ExtractError::DelegationCycle { cycle, .. } => Some(cycle.clone()),
            _ => None,
        })
        .expect("cycle diagnostic");
    assert_eq!(cycle, vec!["E(int)".to_string(), "E(String)".to_string()]);

    let ctors = constructors(&docs);
    assert!(matches!(ctors[0].delegation, Delegation::None));
    assert!(matches!(ctors[1].delegation, Delegation::None));
    // The long overload delegates nowhere and stays intact.
    assert!(matches!(ctors[2].delegation, Delegation::None));
    assert_eq!(diags.len(), 1);
}

// ============================================================================
// Supertype Requirements
// ============================================================================

#[test]
fn test_missing_super_delegation_is_reported() {
    // Base has no default constructor, so Derived() must call super(...).
    let mut base = TypeDeclSyntax::class("Base");
    base.members = vec![ctor(
        vec![ParamSyntax::new("n", TypeSyntax::named("int"))],
        vec![],
    )];
    let mut derived = TypeDeclSyntax::class("Derived");
    derived.extends = Some(TypeSyntax::named("Base"));
    derived.members = vec![ctor(vec![], vec![])];
    let unit = CompilationUnit::new("derived.src", vec![base, derived]);

    let (docs, diags) = extract_units(&[unit]);
    assert!(diags.iter().any(|d| matches!(
        &d.error,
        ExtractError::MissingSuperDelegation { owner, supertype }
            if owner == "Derived" && supertype == "Base"
    )));
    // Degraded, not dropped.
    let derived_ctor = constructors(&docs)
        .into_iter()
        .find(|c| c.owner == "Derived")
        .expect("Derived constructor");
    assert!(matches!(derived_ctor.delegation, Delegation::None));
}

#[test]
fn test_explicit_super_call_satisfies_the_requirement() {
    let mut base = TypeDeclSyntax::class("Base");
    base.members = vec![ctor(
        vec![ParamSyntax::new("n", TypeSyntax::named("int"))],
        vec![],
    )];
    let mut derived = TypeDeclSyntax::class("Derived");
    derived.extends = Some(TypeSyntax::named("Base"));
    derived.members = vec![ctor(
        vec![],
        vec![Statement::expression(Expression::call(
            None,
            "super",
            vec![Expression::int("5")],
        ))],
    )];
    let unit = CompilationUnit::new("derived.src", vec![base, derived]);

    let (_docs, diags) = extract_units(&[unit]);
    assert!(
        !diags
            .iter()
            .any(|d| matches!(d.error, ExtractError::MissingSuperDelegation { .. })),
        "unexpected diagnostics: {diags:?}"
    );
}

#[test]
fn test_sideways_delegation_defers_the_super_obligation() {
    // Derived() -> this(5) -> Derived(int) -> super(n): the chain head
    // never calls super itself, and that is fine.
    let mut base = TypeDeclSyntax::class("Base");
    base.members = vec![ctor(
        vec![ParamSyntax::new("n", TypeSyntax::named("int"))],
        vec![],
    )];
    let mut derived = TypeDeclSyntax::class("Derived");
    derived.extends = Some(TypeSyntax::named("Base"));
    derived.members = vec![
        ctor(
            vec![],
            vec![Statement::expression(Expression::call(
                None,
                "this",
                vec![Expression::int("5")],
            ))],
        ),
        ctor(
            vec![ParamSyntax::new("n", TypeSyntax::named("int"))],
            vec![Statement::expression(Expression::call(
                None,
                "super",
                vec![Expression::ident("n")],
            ))],
        ),
    ];
    let unit = CompilationUnit::new("derived.src", vec![base, derived]);

    let (_docs, diags) = extract_units(&[unit]);
    assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
}

#[test]
fn test_supertype_with_default_constructor_needs_no_delegation() {
    let mut base = TypeDeclSyntax::class("Base");
    base.members = vec![ctor(vec![], vec![])];
    let mut derived = TypeDeclSyntax::class("Derived");
    derived.extends = Some(TypeSyntax::named("Base"));
    derived.members = vec![ctor(vec![], vec![])];
    let unit = CompilationUnit::new("derived.src", vec![base, derived]);

    let (_docs, diags) = extract_units(&[unit]);
    assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
}

#[test]
fn test_undeclared_supertype_is_exempt_from_the_check() {
    // Extending a library type we never saw declared: no arity knowledge,
    // no requirement.
    let mut derived = TypeDeclSyntax::class("Derived");
    derived.extends = Some(TypeSyntax::named("Exception"));
    derived.members = vec![ctor(vec![], vec![])];
    let unit = CompilationUnit::new("derived.src", vec![derived]);

    let (_docs, diags) = extract_units(&[unit]);
    assert!(
        !diags
            .iter()
            .any(|d| matches!(d.error, ExtractError::MissingSuperDelegation { .. })),
        "unexpected diagnostics: {diags:?}"
    );
}
