use pretty_assertions::assert_eq;
use tessera::{
    ast::{BinaryOperator, Expr, FunctionDef, Statement},
    error::ParseError,
    parse,
};

fn statements(source: &str) -> Vec<Statement> {
    parse(source).unwrap_or_else(|e| panic!("failed to parse {source:?}: {e}"))
                 .body
}

fn expr(source: &str) -> Expr {
    match statements(source).as_slice() {
        [Statement::Expression { expr, .. }] => expr.clone(),
        other => panic!("expected a single expression statement, got {other:?}"),
    }
}

fn ident(name: &str) -> Expr {
    Expr::Identifier { name: name.to_string(),
                       line: 1, }
}

fn num(value: f64) -> Expr {
    Expr::Number { value, line: 1 }
}

fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
    Expr::Binary { left: Box::new(left),
                   op,
                   right: Box::new(right),
                   line: 1 }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(expr("1 + 2 * 3"),
               binary(num(1.0), BinaryOperator::Add, binary(num(2.0), BinaryOperator::Mul, num(3.0))));
}

#[test]
fn comparisons_share_the_additive_level() {
    assert_eq!(expr("a + 1 < b"),
               binary(binary(ident("a"), BinaryOperator::Add, num(1.0)),
                      BinaryOperator::Less,
                      ident("b")));
}

#[test]
fn two_operand_logic_is_left_associative() {
    assert_eq!(expr("a && b | c"),
               binary(binary(ident("a"), BinaryOperator::And, ident("b")),
                      BinaryOperator::Bar,
                      ident("c")));
}

#[test]
fn longer_logic_chains_recurse_on_the_right() {
    assert_eq!(expr("a && b | c && d"),
               binary(binary(ident("a"), BinaryOperator::And, ident("b")),
                      BinaryOperator::Bar,
                      binary(ident("c"), BinaryOperator::And, ident("d"))));
}

#[test]
fn assignment_is_right_associative() {
    let Expr::Assignment { target, value, .. } = expr("a = b = 1") else {
        panic!("expected an assignment");
    };

    assert_eq!(*target, ident("a"));
    assert!(matches!(*value, Expr::Assignment { .. }));
}

#[test]
fn postfix_chains_mix_calls_and_members() {
    let Expr::Call { callee, arguments, .. } = expr("a.b()[0]()") else {
        panic!("expected a call");
    };
    assert!(arguments.is_empty());

    let Expr::Member { object, computed, .. } = *callee else {
        panic!("expected a computed member");
    };
    assert!(computed);
    assert!(matches!(*object, Expr::Call { .. }));
}

#[test]
fn ternary_desugars_to_an_immediately_invoked_function() {
    let Expr::Call { callee, arguments, .. } = expr("x -> 1 | 2") else {
        panic!("expected a call");
    };
    assert!(arguments.is_empty());

    let Expr::Function(def) = *callee else {
        panic!("expected a function expression");
    };
    assert_eq!(def.name, FunctionDef::ANONYMOUS);
    assert_eq!(def.body,
               [Statement::If { test:      ident("x"),
                                body:      vec![Statement::Expression { expr: num(1.0),
                                                                        line: 1, }],
                                alternate: Some(vec![Statement::Expression { expr: num(2.0),
                                                                             line: 1, }]),
                                line:      1, }]);
}

#[test]
fn newlines_and_semicolons_are_optional_separators() {
    let with_semicolons = statements("let a = 1; let b = 2;");
    let with_newlines = statements("let a = 1\nlet b = 2");
    let crammed = statements("let a = 1 let b = 2");

    assert_eq!(with_semicolons.len(), 2);
    assert_eq!(with_newlines.len(), 2);
    assert_eq!(crammed.len(), 2);
}

#[test]
fn let_without_value_declares_null() {
    assert_eq!(statements("let x"),
               [Statement::VarDeclaration { identifier: "x".to_string(),
                                            constant:   false,
                                            value:      None,
                                            line:       1, }]);
}

#[test]
fn for_header_needs_no_semicolons() {
    let plain = statements("for (let i = 0 i < 3 i = i + 1) { i }");
    let separated = statements("for (let i = 0; i < 3; i = i + 1) { i }");

    assert_eq!(plain, separated);
    assert!(matches!(plain.as_slice(), [Statement::For { .. }]));
}

#[test]
fn else_if_nests_an_if_as_the_alternate() {
    let parsed = statements("if (a) { 1 } else if (b) { 2 } else { 3 }");
    let [Statement::If { alternate: Some(alternate), .. }] = parsed.as_slice() else {
        panic!("expected an if statement");
    };

    assert!(matches!(alternate.as_slice(), [Statement::If { alternate: Some(_), .. }]));
}

#[test]
fn class_members_are_sorted_into_their_tables() {
    let source = "class Point {
        x; y
        static count = 0
        constructor(x, y) { this.x = x }
        static origin() { new Point(0, 0) }
    }";
    let parsed = statements(source);
    let [Statement::Class(def)] = parsed.as_slice() else {
        panic!("expected a class declaration");
    };

    assert_eq!(def.name, "Point");
    assert_eq!(def.fields, ["x", "y"]);
    assert_eq!(def.static_fields, [("count".to_string(), Expr::Number { value: 0.0, line: 3 })]);
    assert_eq!(def.methods.len(), 1);
    assert_eq!(def.methods[0].name, "constructor");
    assert_eq!(def.methods[0].params, ["x", "y"]);
    assert_eq!(def.static_methods[0].name, "origin");
}

#[test]
fn enum_members_keep_declaration_order() {
    assert_eq!(statements("enum Color { Red, Green, Blue, }"),
               [Statement::Enum { name:    "Color".to_string(),
                                  members: vec!["Red".to_string(),
                                                "Green".to_string(),
                                                "Blue".to_string()],
                                  line:    1, }]);
}

#[test]
fn match_arms_keep_order_and_default() {
    let Expr::Match { cases, default, .. } =
        expr("match x { 1, 2 => { \"low\" } E.A(v) => { v } default => { \"other\" } }")
    else {
        panic!("expected a match");
    };

    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0].patterns, [num(1.0), num(2.0)]);
    assert!(matches!(cases[1].patterns.as_slice(), [Expr::Call { .. }]));
    assert!(default.is_some());
}

#[test]
fn object_literal_supports_shorthand_and_string_keys() {
    let Expr::Object { properties, .. } = expr("{ a: 1, b, \"c d\": 2 }") else {
        panic!("expected an object");
    };
    let keys: Vec<_> = properties.iter().map(|p| p.key.as_str()).collect();

    assert_eq!(keys, ["a", "b", "c d"]);
    assert_eq!(properties[1].value, ident("b"));
}

#[test]
fn try_catch_is_an_expression() {
    let Expr::TryCatch { body, handler, .. } = expr("try { throw 1 } catch { error }") else {
        panic!("expected try/catch");
    };

    assert!(matches!(body.as_slice(), [Statement::Throw { .. }]));
    assert_eq!(handler.len(), 1);
}

#[test]
fn constant_requires_a_value() {
    assert_eq!(parse("const x").unwrap_err(),
               ParseError::ConstantWithoutValue { name:   "x".to_string(),
                                                  line:   1,
                                                  column: 7, });
}

#[test]
fn dot_must_be_followed_by_an_identifier() {
    assert_eq!(parse("a.1").unwrap_err(),
               ParseError::InvalidMemberProperty { line: 1, column: 3 });
}

#[test]
fn assignment_target_must_be_a_name_or_member() {
    assert_eq!(parse("1 = 2").unwrap_err(),
               ParseError::InvalidAssignmentTarget { line: 1, column: 3 });
}

#[test]
fn parameters_must_be_identifiers() {
    assert_eq!(parse("fn f(1) {}").unwrap_err(),
               ParseError::InvalidParameter { line: 1, column: 6 });
}

#[test]
fn only_one_default_per_match() {
    assert_eq!(parse("match x {\n default => { 1 }\n default => { 2 }\n}").unwrap_err(),
               ParseError::DuplicateDefault { line: 3, column: 2 });
}

#[test]
fn ternary_needs_two_branches() {
    assert_eq!(parse("x -> 1").unwrap_err(),
               ParseError::InvalidTernary { line: 1, column: 3 });
}

#[test]
fn ternary_test_must_be_a_name_or_binary_expression() {
    assert_eq!(parse("f() -> 1 | 2").unwrap_err(),
               ParseError::InvalidTernaryTest { line: 1, column: 5 });
    assert_eq!(parse("\"s\" -> 1 | 2").unwrap_err(),
               ParseError::InvalidTernaryTest { line: 1, column: 5 });
    assert!(parse("(a) -> 1 | 2").is_ok());
}

#[test]
fn new_target_cannot_be_an_arbitrary_expression() {
    assert!(matches!(parse("new (a + b)()").unwrap_err(),
                     ParseError::UnexpectedToken { line: 1, column: 5, .. }));
    assert!(parse("new a.b.C(1)").is_ok());
}

#[test]
fn unterminated_block_reports_end_of_input() {
    assert!(matches!(parse("fn f() {\n 1\n").unwrap_err(),
                     ParseError::UnexpectedEndOfInput { line: 3, .. }));
}

#[test]
fn errors_point_past_newlines_at_the_offending_token() {
    let err = parse("let x = 1\n\n  let = 2").unwrap_err();

    assert_eq!(err.position(), (3, 7));
    assert_eq!(err.to_string(),
               "Error on line 3, column 7: Expected a variable name, found '='.");
}
