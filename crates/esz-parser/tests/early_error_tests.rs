//! Tests for diagnostics: their shape, location and the order they are
//! reported in, plus the identifier and strict-mode rules.
use super::*;
use esz_common::diagnostics::diagnostic_codes;
use esz_common::DiagnosticKind;

fn script_error(source: &str) -> Diagnostic {
    match parse(source, &ParseOptions::script()) {
        Ok(_) => panic!("{source:?} should not parse"),
        Err(diagnostic) => diagnostic,
    }
}

fn strict_error(source: &str) -> u32 {
    match parse(source, &ParseOptions::script().with_strict(true)) {
        Ok(_) => panic!("{source:?} should not parse in strict code"),
        Err(diagnostic) => diagnostic.code,
    }
}

// =============================================================================
// Diagnostic shape
// =============================================================================

#[test]
fn lexical_errors_surface_with_location() {
    let diagnostic = script_error("a;\n  'abc");
    assert_eq!(diagnostic.code, diagnostic_codes::UNTERMINATED_STRING_LITERAL);
    assert_eq!(diagnostic.kind, DiagnosticKind::Lexical);
    assert_eq!(diagnostic.start, 5);
    assert_eq!((diagnostic.line, diagnostic.column), (2, 2));
}

#[test]
fn syntax_errors_carry_their_kind() {
    let diagnostic = script_error("if (a b) {}");
    assert_eq!(diagnostic.code, diagnostic_codes::TOKEN_EXPECTED);
    assert_eq!(diagnostic.kind, DiagnosticKind::Syntax);
    assert_eq!((diagnostic.start, diagnostic.end), (6, 7));

    let diagnostic = script_error("if (a");
    assert_eq!(diagnostic.code, diagnostic_codes::UNEXPECTED_END_OF_INPUT);
    assert_eq!(diagnostic.start, 5);
}

#[test]
fn early_errors_render_with_position() {
    let diagnostic = script_error("let x;\nlet x;");
    assert_eq!(diagnostic.code, diagnostic_codes::DUPLICATE_DECLARATION);
    assert_eq!(diagnostic.kind, DiagnosticKind::Early);
    assert_eq!(
        diagnostic.to_string(),
        "EarlyError ES1214 (2:4): Identifier 'x' has already been declared."
    );
}

#[test]
fn first_error_in_source_order_wins() {
    let diagnostic = script_error("let a; let a; x; @");
    assert_eq!(diagnostic.code, diagnostic_codes::DUPLICATE_DECLARATION);
    let diagnostic = script_error("a @ b; let a; let a;");
    assert_eq!(diagnostic.code, diagnostic_codes::INVALID_CHARACTER);
}

#[test]
fn columns_are_byte_offsets_within_the_line() {
    let diagnostic = script_error("'😀'; @");
    assert_eq!(diagnostic.line, 1);
    assert_eq!(diagnostic.column, 8);
}

#[test]
fn lexical_errors_inside_expressions() {
    assert_eq!(
        script_error("x = 3in [];").code,
        diagnostic_codes::IDENTIFIER_DIRECTLY_AFTER_NUMBER
    );
    assert_eq!(
        script_error("x = /a/gg;").code,
        diagnostic_codes::DUPLICATE_REGULAR_EXPRESSION_FLAG
    );
    assert_eq!(
        script_error("x = `a${b}").code,
        diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL
    );
    assert_eq!(
        script_error("x = 07n;").code,
        diagnostic_codes::LEGACY_OCTAL_BIGINT
    );
}

// =============================================================================
// Identifiers and reserved words
// =============================================================================

#[test]
fn reserved_words_are_not_identifiers() {
    assert_eq!(script_error("var if;").code, diagnostic_codes::RESERVED_WORD);
    assert_eq!(script_error("var enum;").code, diagnostic_codes::RESERVED_WORD);
    assert!(parse("var implements, package, static;", &ParseOptions::script()).is_ok());
    assert_eq!(
        strict_error("var implements;"),
        diagnostic_codes::STRICT_RESERVED_WORD
    );
    assert_eq!(strict_error("let;"), diagnostic_codes::STRICT_RESERVED_WORD);
}

#[test]
fn escaped_keywords() {
    assert_eq!(
        script_error(r"var \u0069f;").code,
        diagnostic_codes::ESCAPED_KEYWORD
    );
    assert_eq!(
        script_error(r"v\u0061r x;").code,
        diagnostic_codes::ESCAPED_KEYWORD
    );
    assert!(parse(r"var \u0061sync;", &ParseOptions::script()).is_ok());
    assert!(parse(r"({ \u0069f: 1 }).\u0069f;", &ParseOptions::script()).is_ok());
    assert!(parse(r"\u0061sync function f() {}", &ParseOptions::script()).is_err());
    assert_eq!(
        script_error(r"function f() { new.t\u0061rget; }").code,
        diagnostic_codes::INVALID_META_PROPERTY
    );
}

#[test]
fn yield_in_generator_parameters() {
    assert_eq!(
        script_error("function* g(a = yield) {}").code,
        diagnostic_codes::YIELD_IN_PARAMETER
    );
}

#[test]
fn reserved_names_as_parameters_are_binding_errors() {
    let diagnostic = script_error("async function f(await) {}");
    assert_eq!(diagnostic.code, diagnostic_codes::AWAIT_IDENTIFIER_IN_ASYNC);
    assert_eq!(diagnostic.start, 17);
    assert!(!diagnostic.message.contains("expressions"));
    assert_eq!(
        script_error("async function f({ await }) {}").code,
        diagnostic_codes::AWAIT_IDENTIFIER_IN_ASYNC
    );
    assert_eq!(
        script_error("async (await) => 1").code,
        diagnostic_codes::AWAIT_IDENTIFIER_IN_ASYNC
    );
    assert_eq!(
        script_error("function* g(yield) {}").code,
        diagnostic_codes::YIELD_IDENTIFIER_IN_GENERATOR
    );
    assert_eq!(
        script_error("async function f(a = await 1) {}").code,
        diagnostic_codes::AWAIT_IN_PARAMETER
    );
}

#[test]
fn new_target_needs_a_function() {
    assert_eq!(
        script_error("new.target").code,
        diagnostic_codes::NEW_TARGET_OUTSIDE_FUNCTION
    );
    assert_eq!(
        script_error("() => new.target").code,
        diagnostic_codes::NEW_TARGET_OUTSIDE_FUNCTION
    );
    assert!(parse("function f() { return () => new.target; }", &ParseOptions::script()).is_ok());
}

// =============================================================================
// Strict mode
// =============================================================================

#[test]
fn strict_option_and_directive_agree() {
    for source in ["with (a) {}", "010", "'\\01'", "delete x", "eval = 1", "arguments++"] {
        let directive = format!("'use strict'; {source}");
        let from_option = strict_error(source);
        let from_directive = script_error(&directive).code;
        assert_eq!(from_option, from_directive, "{source}");
    }
}

#[test]
fn strict_code_rejects_legacy_forms() {
    assert_eq!(strict_error("with (a) {}"), diagnostic_codes::WITH_IN_STRICT_MODE);
    assert_eq!(strict_error("010"), diagnostic_codes::OCTAL_LITERAL_IN_STRICT_MODE);
    assert_eq!(strict_error("'\\01'"), diagnostic_codes::OCTAL_ESCAPE_IN_STRICT_MODE);
    assert_eq!(
        strict_error("eval = 1"),
        diagnostic_codes::EVAL_OR_ARGUMENTS_IN_STRICT_MODE
    );
    assert_eq!(
        strict_error("[arguments] = []"),
        diagnostic_codes::EVAL_OR_ARGUMENTS_IN_STRICT_MODE
    );
    assert_eq!(
        strict_error("function f(eval) {}"),
        diagnostic_codes::EVAL_OR_ARGUMENTS_IN_STRICT_MODE
    );
    assert!(parse("eval(x); arguments.length;", &ParseOptions::script().with_strict(true)).is_ok());
}

#[test]
fn strictness_is_scoped_to_the_function() {
    assert!(parse(
        "function f() { 'use strict'; } with (a) {}",
        &ParseOptions::script()
    )
    .is_ok());
    assert_eq!(
        script_error("function f() { 'use strict'; with (a) {} }").code,
        diagnostic_codes::WITH_IN_STRICT_MODE
    );
}

// =============================================================================
// Assignment and binding targets
// =============================================================================

#[test]
fn logical_assignment_needs_a_simple_target() {
    assert_eq!(
        script_error("a() &&= 1").code,
        diagnostic_codes::INVALID_COALESCE_ASSIGNMENT
    );
    assert_eq!(
        script_error("[a] ??= 1").code,
        diagnostic_codes::INVALID_COALESCE_ASSIGNMENT
    );
    assert!(parse("a.b ||= c; d ??= e;", &ParseOptions::script()).is_ok());
}

#[test]
fn nested_targets_must_be_assignable() {
    assert_eq!(
        script_error("[a + b] = c").code,
        diagnostic_codes::INVALID_DESTRUCTURING_TARGET
    );
    assert_eq!(
        script_error("({ a: 1 } = b)").code,
        diagnostic_codes::INVALID_DESTRUCTURING_TARGET
    );
    assert_eq!(
        script_error("({ m() {} } = b)").code,
        diagnostic_codes::INVALID_DESTRUCTURING_TARGET
    );
    assert!(parse("[a.b, c[0], ...d.e] = f;", &ParseOptions::script()).is_ok());
    assert!(parse("let [a.b] = c;", &ParseOptions::script()).is_err());
}

#[test]
fn parenthesized_arrow_parameters() {
    assert_eq!(
        script_error("((a), b) => 1").code,
        diagnostic_codes::INVALID_ARROW_PARAMETER
    );
}

#[test]
fn non_binding_arrow_parameters() {
    for source in [
        "(a.b) => 1",
        "(a, b[0]) => 1",
        "(a + b) => 1",
        "(a += 1) => 1",
        "(a.b = 1) => 1",
        "(...a.b) => 1",
        "async (f()) => 1",
    ] {
        let diagnostic = script_error(source);
        assert_eq!(diagnostic.code, diagnostic_codes::INVALID_ARROW_PARAMETER, "{source}");
        assert_eq!(diagnostic.message, "Invalid arrow function parameter.");
    }
    assert_eq!(script_error("(a.b) => 1").start, 1);
    assert_eq!(
        script_error("([a.b]) => 1").code,
        diagnostic_codes::INVALID_DESTRUCTURING_TARGET
    );
    assert!(parse("(a, [b], {c}, d = 1, ...e) => 1", &ParseOptions::script()).is_ok());
}
