//! Tests for expression parsing: precedence, literals, templates, cover grammar.
use super::*;
use esz_common::Spanned;
use esz_common::diagnostics::diagnostic_codes;

fn expression(source: &str) -> Expression {
    let program = parse(source, &ParseOptions::script())
        .unwrap_or_else(|d| panic!("{source:?}: {d}"));
    match program.body.into_iter().next() {
        Some(Statement::ExpressionStatement(stmt)) => stmt.expression,
        other => panic!("{source:?}: expected an expression statement, got {other:?}"),
    }
}

fn script_error(source: &str) -> u32 {
    match parse(source, &ParseOptions::script()) {
        Ok(_) => panic!("{source:?} should not parse"),
        Err(diagnostic) => diagnostic.code,
    }
}

fn binary(expr: &Expression) -> &BinaryExpression {
    match expr {
        Expression::BinaryExpression(b) => b,
        other => panic!("expected a binary expression, got {other:?}"),
    }
}

fn number(expr: &Expression) -> f64 {
    match expr {
        Expression::Literal(lit) => match lit.value {
            LiteralValue::Number(n) => n,
            ref other => panic!("expected a number, got {other:?}"),
        },
        other => panic!("expected a literal, got {other:?}"),
    }
}

// =============================================================================
// Operators
// =============================================================================

#[test]
fn multiplication_binds_tighter_than_addition() {
    let expr = expression("1 + 2 * 3");
    let add = binary(&expr);
    assert_eq!(add.operator, BinaryOperator::Add);
    assert_eq!(number(&add.left), 1.0);
    assert_eq!(binary(&add.right).operator, BinaryOperator::Multiply);
}

#[test]
fn same_precedence_is_left_associative() {
    let expr = expression("a - b - c");
    let outer = binary(&expr);
    assert_eq!(outer.operator, BinaryOperator::Subtract);
    assert!(matches!(outer.left, Expression::BinaryExpression(_)));
    assert!(matches!(outer.right, Expression::Identifier(_)));
}

#[test]
fn exponentiation_is_right_associative() {
    let expr = expression("2 ** 3 ** 2");
    let outer = binary(&expr);
    assert_eq!(outer.operator, BinaryOperator::Exponent);
    assert_eq!(number(&outer.left), 2.0);
    assert!(matches!(outer.right, Expression::BinaryExpression(_)));
}

#[test]
fn unary_operand_of_exponentiation_needs_parentheses() {
    assert_eq!(
        script_error("-1 ** 2"),
        diagnostic_codes::UNARY_BEFORE_EXPONENTIATION
    );
    let expr = expression("(-1) ** 2");
    assert_eq!(binary(&expr).operator, BinaryOperator::Exponent);
}

#[test]
fn logical_operators_build_logical_expressions() {
    let expr = expression("a || b && c");
    let Expression::LogicalExpression(or) = &expr else {
        panic!("expected a logical expression");
    };
    assert_eq!(or.operator, LogicalOperator::Or);
    let Expression::LogicalExpression(and) = &or.right else {
        panic!("expected a nested logical expression");
    };
    assert_eq!(and.operator, LogicalOperator::And);
}

#[test]
fn coalesce_cannot_mix_with_logical_without_parentheses() {
    assert_eq!(
        script_error("a ?? b || c"),
        diagnostic_codes::NULLISH_MIXED_WITH_LOGICAL
    );
    assert_eq!(
        script_error("a || b ?? c"),
        diagnostic_codes::NULLISH_MIXED_WITH_LOGICAL
    );
    let expr = expression("(a || b) ?? c");
    let Expression::LogicalExpression(coalesce) = &expr else {
        panic!("expected a logical expression");
    };
    assert_eq!(coalesce.operator, LogicalOperator::Coalesce);
}

#[test]
fn conditional_and_sequence() {
    let expr = expression("a ? b : c, d");
    let Expression::SequenceExpression(seq) = &expr else {
        panic!("expected a sequence expression");
    };
    assert_eq!(seq.expressions.len(), 2);
    assert!(matches!(seq.expressions[0], Expression::ConditionalExpression(_)));
}

#[test]
fn assignment_is_right_associative() {
    let expr = expression("a = b = c");
    let Expression::AssignmentExpression(outer) = &expr else {
        panic!("expected an assignment");
    };
    assert_eq!(outer.operator, AssignmentOperator::Assign);
    assert!(matches!(outer.right, Expression::AssignmentExpression(_)));
}

#[test]
fn compound_assignment_needs_a_simple_target() {
    assert!(matches!(expression("a.b **= 2"), Expression::AssignmentExpression(_)));
    assert_eq!(
        script_error("[a] += 1"),
        diagnostic_codes::INVALID_ASSIGNMENT_TARGET
    );
    assert_eq!(
        script_error("a + b = c"),
        diagnostic_codes::INVALID_ASSIGNMENT_TARGET
    );
}

#[test]
fn update_expressions() {
    let Expression::UpdateExpression(postfix) = expression("a++") else {
        panic!("expected an update expression");
    };
    assert!(!postfix.prefix);
    assert_eq!(postfix.operator, UpdateOperator::Increment);
    assert_eq!(
        script_error("a() ++"),
        diagnostic_codes::INVALID_POSTFIX_OPERAND
    );
}

#[test]
fn unary_keywords() {
    let Expression::UnaryExpression(unary) = expression("typeof void !x") else {
        panic!("expected a unary expression");
    };
    assert_eq!(unary.operator, UnaryOperator::Typeof);
    assert!(unary.prefix);
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn numeric_literal_forms() {
    assert_eq!(number(&expression("0x1F")), 31.0);
    assert_eq!(number(&expression("0b101")), 5.0);
    assert_eq!(number(&expression("0o17")), 15.0);
    assert_eq!(number(&expression("1_000")), 1000.0);
    assert_eq!(number(&expression(".5e1")), 5.0);
}

#[test]
fn legacy_octal_is_sloppy_only() {
    assert_eq!(number(&expression("010")), 8.0);
    assert_eq!(
        script_error("'use strict'; 010"),
        diagnostic_codes::OCTAL_LITERAL_IN_STRICT_MODE
    );
}

#[test]
fn bigint_literal_keeps_digits() {
    let Expression::Literal(lit) = expression("123n") else {
        panic!("expected a literal");
    };
    assert_eq!(lit.value, LiteralValue::Null);
    assert_eq!(lit.bigint.as_deref(), Some("123"));
}

#[test]
fn regex_literal_pattern_and_flags() {
    let Expression::Literal(lit) = expression("/a[/]b/gi") else {
        panic!("expected a literal");
    };
    let regex = lit.regex.expect("regex value");
    assert_eq!(regex.pattern, "a[/]b");
    assert_eq!(regex.flags, "gi");
}

#[test]
fn slash_after_expression_is_division() {
    let expr = expression("a / b / c");
    assert_eq!(binary(&expr).operator, BinaryOperator::Divide);
}

#[test]
fn raw_is_attached_only_when_requested() {
    let Expression::Literal(lit) = expression("'a\\x41'") else {
        panic!("expected a literal");
    };
    assert_eq!(lit.string_value(), Some("aA"));
    assert!(lit.raw.is_none());

    let options = ParseOptions::script().with_raw(true);
    let program = parse("'a\\x41'", &options).unwrap();
    let Statement::ExpressionStatement(stmt) = &program.body[0] else {
        panic!("expected an expression statement");
    };
    let Expression::Literal(lit) = &stmt.expression else {
        panic!("expected a literal");
    };
    assert_eq!(lit.raw.as_deref(), Some("'a\\x41'"));
}

// =============================================================================
// Templates
// =============================================================================

#[test]
fn template_quasis_and_expressions_alternate() {
    let Expression::TemplateLiteral(template) = expression("`a${b}c${d}e`") else {
        panic!("expected a template literal");
    };
    assert_eq!(template.quasis.len(), 3);
    assert_eq!(template.expressions.len(), 2);
    let raws: Vec<&str> = template.quasis.iter().map(|q| q.value.raw.as_str()).collect();
    assert_eq!(raws, ["a", "c", "e"]);
    assert!(template.quasis[2].tail);
    assert!(!template.quasis[0].tail);
}

#[test]
fn invalid_escape_is_allowed_only_in_tagged_templates() {
    let Expression::TaggedTemplateExpression(tagged) = expression("tag`\\unicode`") else {
        panic!("expected a tagged template");
    };
    assert!(tagged.quasi.quasis[0].value.cooked.is_none());
    assert_eq!(tagged.quasi.quasis[0].value.raw, "\\unicode");
    assert_eq!(
        script_error("`\\unicode`"),
        diagnostic_codes::INVALID_ESCAPE_IN_TEMPLATE
    );
}

// =============================================================================
// Member access, calls and optional chains
// =============================================================================

#[test]
fn member_and_call_chain() {
    let Expression::CallExpression(call) = expression("a.b[c](d, ...e)") else {
        panic!("expected a call");
    };
    assert_eq!(call.arguments.len(), 2);
    assert!(matches!(call.arguments[1], ArrayElement::SpreadElement(_)));
    let Expression::MemberExpression(member) = &call.callee else {
        panic!("expected a member expression");
    };
    assert!(member.computed);
}

#[test]
fn optional_chain_is_wrapped_once() {
    let Expression::ChainExpression(chain) = expression("a?.b.c?.(d)") else {
        panic!("expected a chain expression");
    };
    let Expression::CallExpression(call) = &chain.expression else {
        panic!("expected a call");
    };
    assert!(call.optional);
    let Expression::MemberExpression(member) = &call.callee else {
        panic!("expected a member expression");
    };
    assert!(!member.optional);
}

#[test]
fn optional_chain_restrictions() {
    assert_eq!(
        script_error("a?.b`c`"),
        diagnostic_codes::TAGGED_TEMPLATE_IN_OPTIONAL_CHAIN
    );
    assert_eq!(
        script_error("new a?.b()"),
        diagnostic_codes::OPTIONAL_CHAIN_IN_NEW
    );
    assert_eq!(
        script_error("a?.b = 1"),
        diagnostic_codes::OPTIONAL_CHAIN_ASSIGNMENT
    );
}

#[test]
fn new_binds_to_the_nearest_argument_list() {
    let Expression::CallExpression(call) = expression("new a.b()()") else {
        panic!("expected a call");
    };
    let Expression::NewExpression(new) = &call.callee else {
        panic!("expected a new expression");
    };
    assert!(matches!(new.callee, Expression::MemberExpression(_)));
    assert!(new.arguments.is_empty());
}

#[test]
fn new_target_needs_a_function() {
    assert_eq!(
        script_error("new.target"),
        diagnostic_codes::NEW_TARGET_OUTSIDE_FUNCTION
    );
    assert!(parse("function f() { return new.target; }", &ParseOptions::script()).is_ok());
    assert!(parse("function f() { return () => new.target; }", &ParseOptions::script()).is_ok());
}

#[test]
fn dynamic_import_is_an_expression() {
    let Expression::ImportExpression(import) = expression("import('./a.js')") else {
        panic!("expected an import expression");
    };
    assert!(matches!(import.source, Expression::Literal(_)));
}

// =============================================================================
// Objects, arrays and destructuring
// =============================================================================

#[test]
fn object_literal_property_forms() {
    let Expression::ObjectExpression(object) =
        expression("({ a, b: 1, [c]: 2, d() {}, get e() { return 1; }, set e(v) {}, ...f })")
    else {
        panic!("expected an object");
    };
    assert_eq!(object.properties.len(), 7);
    let ObjectMember::Property(shorthand) = &object.properties[0] else {
        panic!("expected a property");
    };
    assert!(shorthand.shorthand);
    let ObjectMember::Property(computed) = &object.properties[2] else {
        panic!("expected a property");
    };
    assert!(computed.computed);
    let ObjectMember::Property(method) = &object.properties[3] else {
        panic!("expected a property");
    };
    assert!(method.method);
    let ObjectMember::Property(getter) = &object.properties[4] else {
        panic!("expected a property");
    };
    assert_eq!(getter.kind, PropertyKind::Get);
    assert!(matches!(object.properties[6], ObjectMember::SpreadElement(_)));
}

#[test]
fn accessor_names_can_be_plain_keys() {
    let Expression::ObjectExpression(object) = expression("({ get: 1, set() {} })") else {
        panic!("expected an object");
    };
    let ObjectMember::Property(get) = &object.properties[0] else {
        panic!("expected a property");
    };
    assert_eq!(get.kind, PropertyKind::Init);
    let ObjectMember::Property(set) = &object.properties[1] else {
        panic!("expected a property");
    };
    assert!(set.method);
}

#[test]
fn shorthand_initializer_only_in_patterns() {
    assert_eq!(
        script_error("({ a = 1 })"),
        diagnostic_codes::INVALID_SHORTHAND_INITIALIZER
    );
    let Expression::AssignmentExpression(assign) = expression("({ a = 1 } = b)") else {
        panic!("expected an assignment");
    };
    assert!(matches!(assign.left, Pattern::ObjectPattern(_)));
}

#[test]
fn duplicate_proto_is_rejected_in_literals_only() {
    assert_eq!(
        script_error("({ __proto__: a, '__proto__': b })"),
        diagnostic_codes::DUPLICATE_PROTO
    );
    assert!(parse("({ __proto__: a, __proto__: b } = c)", &ParseOptions::script()).is_ok());
    assert!(parse("({ __proto__: a, __proto__ })", &ParseOptions::script()).is_ok());
}

#[test]
fn array_destructuring_assignment() {
    let Expression::AssignmentExpression(assign) = expression("[a, , b = 1, ...c] = d") else {
        panic!("expected an assignment");
    };
    let Pattern::ArrayPattern(array) = &assign.left else {
        panic!("expected an array pattern");
    };
    assert_eq!(array.elements.len(), 4);
    assert!(array.elements[1].is_none());
    assert!(matches!(array.elements[2], Some(Pattern::AssignmentPattern(_))));
    assert!(matches!(array.elements[3], Some(Pattern::RestElement(_))));
}

#[test]
fn rest_element_rules_in_assignment_patterns() {
    assert_eq!(
        script_error("[...a, b] = c"),
        diagnostic_codes::REST_ELEMENT_MUST_BE_LAST
    );
    assert_eq!(
        script_error("[...a,] = c"),
        diagnostic_codes::REST_TRAILING_COMMA
    );
    assert!(parse("[...a,]", &ParseOptions::script()).is_ok());
}

#[test]
fn parenthesized_patterns_are_not_destructuring_targets() {
    assert!(parse("[(a)] = b", &ParseOptions::script()).is_ok());
    assert!(parse("[({ a })] = b", &ParseOptions::script()).is_err());
    assert!(parse("({ a }) = b", &ParseOptions::script()).is_err());
}

#[test]
fn eval_is_not_assignable_in_strict_mode() {
    assert!(parse("eval = 1", &ParseOptions::script()).is_ok());
    assert_eq!(
        script_error("'use strict'; eval = 1"),
        diagnostic_codes::EVAL_OR_ARGUMENTS_IN_STRICT_MODE
    );
}

#[test]
fn strict_delete_of_identifier() {
    assert!(parse("delete x", &ParseOptions::script()).is_ok());
    assert_eq!(
        script_error("'use strict'; delete x"),
        diagnostic_codes::DELETE_IDENTIFIER_IN_STRICT_MODE
    );
}

#[test]
fn empty_parentheses_are_not_an_expression() {
    assert_eq!(script_error("()"), diagnostic_codes::EXPRESSION_EXPECTED);
    assert_eq!(
        script_error("(a, b,)"),
        diagnostic_codes::TRAILING_COMMA_NOT_ALLOWED
    );
}

// =============================================================================
// Spans
// =============================================================================

#[test]
fn parenthesized_expression_span_excludes_parentheses() {
    let expr = expression("(a + b)");
    assert_eq!(expr.span(), esz_common::Span::new(1, 6));
}

#[test]
fn member_span_starts_at_object() {
    let expr = expression("  foo.bar");
    assert_eq!(expr.span(), esz_common::Span::new(2, 9));
}

// =============================================================================
// Chain length
// =============================================================================

/// Runs `check` on a thread with room for debug-build frames.
fn with_large_stack<T: Send + 'static>(check: impl FnOnce() -> T + Send + 'static) -> T {
    std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(check)
        .unwrap()
        .join()
        .unwrap()
}

#[test]
fn long_left_nested_chains_fail_cleanly() {
    let codes = with_large_stack(|| {
        [
            "a".to_string() + &"+a".repeat(200_000),
            "a".to_string() + &" || a".repeat(200_000),
            "a".to_string() + &".b".repeat(200_000),
            "a".to_string() + &"()".repeat(200_000),
            "a".to_string() + &"[0]".repeat(200_000),
        ]
        .iter()
        .map(|source| script_error(source))
        .collect::<Vec<_>>()
    });
    assert!(codes.iter().all(|&code| code == diagnostic_codes::NESTING_TOO_DEEP), "{codes:?}");
}

#[test]
fn parenthesized_chain_heads_count_toward_the_limit() {
    let code = with_large_stack(|| {
        let inner = "a".to_string() + &"+a".repeat(600);
        script_error(&format!("({inner}){}", "+a".repeat(600)))
    });
    assert_eq!(code, diagnostic_codes::NESTING_TOO_DEEP);

    let code = with_large_stack(|| {
        let inner = "a".to_string() + &".b".repeat(600);
        script_error(&format!("({inner}){}", "+a".repeat(600)))
    });
    assert_eq!(code, diagnostic_codes::NESTING_TOO_DEEP);
}

#[test]
fn chains_within_the_limit_parse_and_serialize() {
    let json = with_large_stack(|| {
        let source = "a".to_string() + &"+a".repeat(500) + ";" + "b" + &".c".repeat(500);
        let program = parse(&source, &ParseOptions::script())
            .unwrap_or_else(|d| panic!("long chain: {d}"));
        serde_json::to_string(&program).unwrap()
    });
    assert!(json.starts_with("{\"type\":\"Program\""));

    // Sibling chains do not add up.
    let source = vec!["a".to_string() + &"+a".repeat(800); 4].join(", ");
    let expr = with_large_stack(move || format!("{:?}", expression(&source).span()));
    assert!(!expr.is_empty());
}
