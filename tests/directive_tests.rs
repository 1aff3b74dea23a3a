//! Directive prologues: detection, the `directive` field and strict mode.

use esz::{ParseOptions, diagnostic_codes, parse, to_estree_json};
use serde_json::Value;

fn with_directives() -> ParseOptions {
    ParseOptions::script().with_directives(true)
}

fn body(source: &str, options: &ParseOptions) -> Vec<Value> {
    let program = parse(source, options).unwrap_or_else(|d| panic!("{source:?}: {d}"));
    match to_estree_json(&program)["body"].take() {
        Value::Array(body) => body,
        other => panic!("body is not an array: {other}"),
    }
}

fn directives(source: &str) -> Vec<Option<String>> {
    body(source, &with_directives())
        .iter()
        .map(|statement| statement["directive"].as_str().map(str::to_string))
        .collect()
}

#[test]
fn leading_strings_are_directives() {
    assert_eq!(
        directives("'a'; \"b\"; c; 'd';"),
        [Some("a".to_string()), Some("b".to_string()), None, None]
    );
}

#[test]
fn directive_keeps_raw_escapes() {
    assert_eq!(directives(r"'\x61';"), [Some(r"\x61".to_string())]);
}

#[test]
fn expressions_starting_with_a_string_end_the_prologue() {
    assert_eq!(directives("'a' + 1; 'b';"), [None, None]);
    assert_eq!(directives("('a'); 'b';"), [None, None]);
    assert_eq!(directives("'a'.length; 'b';"), [None, None]);
}

#[test]
fn directive_field_is_opt_in() {
    let statements = body("'use strict'; x;", &ParseOptions::script());
    assert!(statements[0].get("directive").is_none());
}

#[test]
fn function_bodies_have_prologues() {
    let statements = body("function f() { 'a'; 'b'; g(); }", &with_directives());
    let inner = &statements[0]["body"]["body"];
    assert_eq!(inner[0]["directive"], "a");
    assert_eq!(inner[1]["directive"], "b");
    assert!(inner[2].get("directive").is_none());

    let statements = body("x = () => { 'a'; };", &with_directives());
    let arrow_body = &statements[0]["expression"]["right"]["body"]["body"];
    assert_eq!(arrow_body[0]["directive"], "a");
}

#[test]
fn blocks_do_not_have_prologues() {
    let statements = body("{ 'a'; }", &with_directives());
    assert!(statements[0]["body"][0].get("directive").is_none());
    assert!(parse("{ 'use strict'; } with (a) {}", &ParseOptions::script()).is_ok());
}

#[test]
fn use_strict_applies_to_the_rest_of_the_body() {
    let sloppy = ParseOptions::script();
    assert_eq!(
        parse("'use strict'; with (a) {}", &sloppy).unwrap_err().code,
        diagnostic_codes::WITH_IN_STRICT_MODE
    );
    assert_eq!(
        parse("'a'; 'use strict'; 010", &sloppy).unwrap_err().code,
        diagnostic_codes::OCTAL_LITERAL_IN_STRICT_MODE
    );
    assert_eq!(
        parse("'use strict'; '\\07';", &sloppy).unwrap_err().code,
        diagnostic_codes::OCTAL_ESCAPE_IN_STRICT_MODE
    );
}

#[test]
fn octal_escape_before_use_strict_is_rejected() {
    let diagnostic = parse("'\\07'; 'use strict';", &ParseOptions::script()).unwrap_err();
    assert_eq!(diagnostic.code, diagnostic_codes::OCTAL_ESCAPE_IN_STRICT_MODE);
    assert_eq!(diagnostic.start, 0);
    assert!(parse("'\\07'; 'not strict';", &ParseOptions::script()).is_ok());
}

#[test]
fn only_the_exact_spelling_enables_strict_mode() {
    let sloppy = ParseOptions::script();
    assert!(parse(r"'use\x20strict'; with (a) {}", &sloppy).is_ok());
    assert!(parse("'use strict' + 1; with (a) {}", &sloppy).is_ok());
    assert!(parse("('use strict'); with (a) {}", &sloppy).is_ok());
    assert!(parse("x; 'use strict'; with (a) {}", &sloppy).is_ok());
    assert!(parse("\"use strict\"\nwith (a) {}", &sloppy).is_err());
}

#[test]
fn module_code_is_already_strict() {
    let statements = body("'use strict'; x;", &ParseOptions::module().with_directives(true));
    assert_eq!(statements[0]["directive"], "use strict");
}
