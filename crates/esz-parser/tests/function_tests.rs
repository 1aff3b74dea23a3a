//! Tests for functions, arrows, generators, async functions and parameters.
use super::*;
use esz_common::diagnostics::diagnostic_codes;

fn script(source: &str) -> Program {
    parse(source, &ParseOptions::script()).unwrap_or_else(|d| panic!("{source:?}: {d}"))
}

fn script_error(source: &str) -> u32 {
    match parse(source, &ParseOptions::script()) {
        Ok(_) => panic!("{source:?} should not parse"),
        Err(diagnostic) => diagnostic.code,
    }
}

fn first_function(program: &Program) -> &Function {
    match &program.body[0] {
        Statement::FunctionDeclaration(function) => function,
        other => panic!("expected a function declaration, got {other:?}"),
    }
}

fn arrow(source: &str) -> ArrowFunctionExpression {
    let program = script(source);
    match program.body.into_iter().next() {
        Some(Statement::ExpressionStatement(stmt)) => match stmt.expression {
            Expression::ArrowFunctionExpression(arrow) => *arrow,
            other => panic!("expected an arrow, got {other:?}"),
        },
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

// =============================================================================
// Declarations and expressions
// =============================================================================

#[test]
fn function_declaration_shape() {
    let program = script("function add(a, b = 1, ...rest) { return a + b; }");
    let function = first_function(&program);
    assert_eq!(function.kind, FunctionKind::FunctionDeclaration);
    assert_eq!(function.id.as_ref().map(|id| id.name.as_str()), Some("add"));
    assert_eq!(function.params.len(), 3);
    assert!(matches!(function.params[1], Pattern::AssignmentPattern(_)));
    assert!(matches!(function.params[2], Pattern::RestElement(_)));
    assert!(!function.is_async);
    assert!(!function.generator);
    assert!(!function.expression);
}

#[test]
fn declaration_requires_a_name() {
    assert_eq!(
        script_error("function () {}"),
        diagnostic_codes::FUNCTION_NAME_EXPECTED
    );
}

#[test]
fn function_expression_name_is_optional() {
    let program = script("(function () {});");
    let Statement::ExpressionStatement(stmt) = &program.body[0] else {
        panic!("expected an expression statement");
    };
    let Expression::FunctionExpression(function) = &stmt.expression else {
        panic!("expected a function expression");
    };
    assert_eq!(function.kind, FunctionKind::FunctionExpression);
    assert!(function.id.is_none());
}

#[test]
fn expression_name_follows_its_own_function_kind() {
    assert!(parse("(function yield() {})", &ParseOptions::script()).is_ok());
    assert!(parse("(function* yield() {})", &ParseOptions::script()).is_err());
    assert!(parse("(async function await() {})", &ParseOptions::script()).is_err());
}

#[test]
fn sloppy_top_level_functions_may_repeat() {
    assert_eq!(script("function f() {} function f() {}").body.len(), 2);
    assert!(parse("{ function f() {} function f() {} }", &ParseOptions::script()).is_ok());
    assert_eq!(
        script_error("'use strict'; { function f() {} function f() {} }"),
        diagnostic_codes::DUPLICATE_DECLARATION
    );
    assert_eq!(
        script_error("let f; function f() {}"),
        diagnostic_codes::DUPLICATE_DECLARATION
    );
}

// =============================================================================
// Generators
// =============================================================================

#[test]
fn yield_forms() {
    let program = script("function* g() { yield; yield 1; yield* other; yield\n2 }");
    let function = first_function(&program);
    assert!(function.generator);
    let yields: Vec<(bool, bool)> = function
        .body
        .body
        .iter()
        .filter_map(|statement| match statement {
            Statement::ExpressionStatement(stmt) => match &stmt.expression {
                Expression::YieldExpression(y) => Some((y.argument.is_some(), y.delegate)),
                _ => None,
            },
            _ => None,
        })
        .collect();
    assert_eq!(
        yields,
        [(false, false), (true, false), (true, true), (false, false)]
    );
}

#[test]
fn yield_is_an_identifier_outside_generators() {
    assert!(parse("var yield = 1; yield + 1;", &ParseOptions::script()).is_ok());
    assert_eq!(
        script_error("'use strict'; var yield;"),
        diagnostic_codes::STRICT_RESERVED_WORD
    );
    assert_eq!(
        script_error("function* g() { var yield; }"),
        diagnostic_codes::YIELD_IDENTIFIER_IN_GENERATOR
    );
}

#[test]
fn yield_in_generator_parameters_is_rejected() {
    assert!(parse("function* g(a = yield) {}", &ParseOptions::script()).is_err());
}

// =============================================================================
// Async functions
// =============================================================================

#[test]
fn await_inside_async_function() {
    let program = script("async function f() { await x; }");
    let function = first_function(&program);
    assert!(function.is_async);
    let Statement::ExpressionStatement(stmt) = &function.body.body[0] else {
        panic!("expected an expression statement");
    };
    assert!(matches!(stmt.expression, Expression::AwaitExpression(_)));
}

#[test]
fn await_is_an_identifier_in_sloppy_scripts() {
    assert!(parse("var await; await = 1;", &ParseOptions::script()).is_ok());
    assert!(parse("function f() { await x; }", &ParseOptions::script()).is_err());
    assert_eq!(
        script_error("async function f() { var await; }"),
        diagnostic_codes::AWAIT_IDENTIFIER_IN_ASYNC
    );
}

#[test]
fn async_without_function_is_an_identifier() {
    let program = script("async\nfunction f() {}");
    assert_eq!(program.body.len(), 2);
    assert!(matches!(program.body[1], Statement::FunctionDeclaration(_)));
    assert!(parse("async(1, 2)", &ParseOptions::script()).is_ok());
}

// =============================================================================
// Arrows
// =============================================================================

#[test]
fn arrow_with_expression_body() {
    let arrow = arrow("(a, b) => a + b");
    assert_eq!(arrow.params.len(), 2);
    assert!(arrow.expression);
    assert!(arrow.id.is_none());
    assert!(!arrow.is_async);
    assert!(matches!(arrow.body, ArrowBody::Expression(_)));
}

#[test]
fn functions_and_arrows_emit_expression_and_id() {
    let json = serde_json::to_value(script("async function foo(){}")).unwrap();
    assert_eq!(json["body"][0]["expression"], false);
    assert_eq!(json["body"][0]["async"], true);

    let json = serde_json::to_value(script("o = { m() {} }")).unwrap();
    let method = &json["body"][0]["expression"]["right"]["properties"][0]["value"];
    assert_eq!(method["type"], "FunctionExpression");
    assert_eq!(method["expression"], false);
    assert!(method["id"].is_null());

    let json = serde_json::to_value(script("(await) => x")).unwrap();
    let arrow = json["body"][0]["expression"].as_object().unwrap();
    assert!(arrow.get("id").is_some_and(serde_json::Value::is_null));
    assert_eq!(arrow["expression"], true);
    assert!(!arrow.contains_key("generator"));
}

#[test]
fn arrow_with_block_body() {
    let arrow = arrow("x => { return x; }");
    assert_eq!(arrow.params.len(), 1);
    assert!(!arrow.expression);
    assert!(matches!(arrow.body, ArrowBody::Block(_)));
}

#[test]
fn arrow_with_destructured_parameters() {
    let arrow = arrow("({ a }, [b], c = 1, ...d) => a");
    assert!(matches!(arrow.params[0], Pattern::ObjectPattern(_)));
    assert!(matches!(arrow.params[1], Pattern::ArrayPattern(_)));
    assert!(matches!(arrow.params[2], Pattern::AssignmentPattern(_)));
    assert!(matches!(arrow.params[3], Pattern::RestElement(_)));
}

#[test]
fn async_arrows() {
    let single = arrow("async x => x");
    assert!(single.is_async);
    assert_eq!(single.params.len(), 1);

    let parenthesized = arrow("async (a, b) => await a");
    assert!(parenthesized.is_async);
    let ArrowBody::Expression(body) = &parenthesized.body else {
        panic!("expected an expression body");
    };
    assert!(matches!(body, Expression::AwaitExpression(_)));
}

#[test]
fn arrow_parameter_errors() {
    assert_eq!(
        script_error("(a, a) => 1"),
        diagnostic_codes::DUPLICATE_PARAMETER
    );
    assert_eq!(
        script_error("() \n => 1"),
        diagnostic_codes::LINE_TERMINATOR_BEFORE_ARROW
    );
    assert!(parse("(a + b) => 1", &ParseOptions::script()).is_err());
    assert!(parse("(...a, b) => 1", &ParseOptions::script()).is_err());
    assert!(parse("async\n(x) => x", &ParseOptions::script()).is_err());
}

#[test]
fn await_in_async_arrow_parameters() {
    assert_eq!(
        script_error("async function f() { async (a = await 1) => a; }"),
        diagnostic_codes::AWAIT_IN_PARAMETER
    );
}

#[test]
fn arrow_body_ends_the_expression() {
    assert!(parse("x => x\n(1)", &ParseOptions::script()).is_ok());
    assert!(parse("x => {} + 1", &ParseOptions::script()).is_err());
}

#[test]
fn super_is_not_available_in_top_level_arrows() {
    assert_eq!(
        script_error("() => { super.x; }"),
        diagnostic_codes::SUPER_PROPERTY_NOT_ALLOWED
    );
}

// =============================================================================
// Parameters and strictness
// =============================================================================

#[test]
fn duplicate_parameters() {
    assert!(parse("function f(a, a) {}", &ParseOptions::script()).is_ok());
    assert_eq!(
        script_error("'use strict'; function f(a, a) {}"),
        diagnostic_codes::DUPLICATE_PARAMETER
    );
    assert_eq!(
        script_error("function f(a, [a]) {}"),
        diagnostic_codes::DUPLICATE_PARAMETER
    );
    assert_eq!(
        script_error("function f(a, a) { 'use strict'; }"),
        diagnostic_codes::DUPLICATE_PARAMETER
    );
}

#[test]
fn use_strict_needs_simple_parameters() {
    assert_eq!(
        script_error("function f(a = 1) { 'use strict'; }"),
        diagnostic_codes::USE_STRICT_WITH_NON_SIMPLE_PARAMETERS
    );
}

#[test]
fn body_strictness_applies_to_the_name() {
    assert_eq!(
        script_error("function eval() { 'use strict'; }"),
        diagnostic_codes::EVAL_OR_ARGUMENTS_IN_STRICT_MODE
    );
    assert!(parse("function eval() {}", &ParseOptions::script()).is_ok());
}

#[test]
fn rest_parameter_rules() {
    assert_eq!(
        script_error("function f(...a, b) {}"),
        diagnostic_codes::REST_ELEMENT_MUST_BE_LAST
    );
    assert_eq!(
        script_error("function f(...a,) {}"),
        diagnostic_codes::REST_TRAILING_COMMA
    );
    assert_eq!(
        script_error("function f(...a = 1) {}"),
        diagnostic_codes::REST_INITIALIZER
    );
}

#[test]
fn accessor_parameter_counts() {
    assert_eq!(
        script_error("({ get x(a) {} })"),
        diagnostic_codes::GETTER_PARAMETERS
    );
    assert_eq!(
        script_error("({ set x() {} })"),
        diagnostic_codes::SETTER_PARAMETERS
    );
    assert_eq!(
        script_error("({ set x(...a) {} })"),
        diagnostic_codes::SETTER_REST_PARAMETER
    );
}

#[test]
fn object_methods_may_use_super_properties() {
    assert!(parse("({ m() { return super.x; } })", &ParseOptions::script()).is_ok());
    assert_eq!(
        script_error("({ m() { super(); } })"),
        diagnostic_codes::SUPER_CALL_NOT_ALLOWED
    );
}

#[test]
fn methods_reject_duplicate_parameters() {
    assert_eq!(
        script_error("({ m(a, a) {} })"),
        diagnostic_codes::DUPLICATE_PARAMETER
    );
}
