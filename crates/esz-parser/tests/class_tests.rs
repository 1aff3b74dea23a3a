//! Tests for class declarations, class elements and private names.
use super::*;
use esz_common::diagnostics::diagnostic_codes;

fn next() -> ParseOptions {
    ParseOptions::script().with_next(true)
}

fn class(source: &str, options: &ParseOptions) -> Class {
    let program = parse(source, options).unwrap_or_else(|d| panic!("{source:?}: {d}"));
    match program.body.into_iter().next() {
        Some(Statement::ClassDeclaration(class)) => *class,
        other => panic!("expected a class declaration, got {other:?}"),
    }
}

fn error_code(source: &str, options: &ParseOptions) -> u32 {
    match parse(source, options) {
        Ok(_) => panic!("{source:?} should not parse"),
        Err(diagnostic) => diagnostic.code,
    }
}

fn method_kinds(class: &Class) -> Vec<(MethodKind, bool)> {
    class
        .body
        .body
        .iter()
        .filter_map(|element| match element {
            ClassElement::MethodDefinition(method) => Some((method.kind, method.is_static)),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Methods
// =============================================================================

#[test]
fn class_with_every_method_kind() {
    let source = "class A extends B {
        constructor() { super(); }
        m() { return super.m(); }
        static s() {}
        get x() { return 1; }
        set x(v) {}
        async *gen() {}
        static async am() {}
    }";
    let class = class(source, &ParseOptions::script());
    assert_eq!(class.id.as_ref().map(|id| id.name.as_str()), Some("A"));
    assert!(matches!(class.super_class, Some(Expression::Identifier(_))));
    assert_eq!(
        method_kinds(&class),
        [
            (MethodKind::Constructor, false),
            (MethodKind::Method, false),
            (MethodKind::Method, true),
            (MethodKind::Get, false),
            (MethodKind::Set, false),
            (MethodKind::Method, false),
            (MethodKind::Method, true),
        ]
    );
}

#[test]
fn modifier_words_can_be_method_names() {
    let class = class(
        "class A { static() {} get() {} set() {} async() {} static static() {} }",
        &ParseOptions::script(),
    );
    assert_eq!(
        method_kinds(&class),
        [
            (MethodKind::Method, false),
            (MethodKind::Method, false),
            (MethodKind::Method, false),
            (MethodKind::Method, false),
            (MethodKind::Method, true),
        ]
    );
}

#[test]
fn string_constructor_key_is_the_constructor() {
    let parsed = class("class A { 'constructor'() {} }", &ParseOptions::script());
    assert_eq!(method_kinds(&parsed), [(MethodKind::Constructor, false)]);
    let parsed = class("class A { ['constructor']() {} }", &ParseOptions::script());
    assert_eq!(method_kinds(&parsed), [(MethodKind::Method, false)]);
    let parsed = class("class A { static constructor() {} }", &ParseOptions::script());
    assert_eq!(method_kinds(&parsed), [(MethodKind::Method, true)]);
}

#[test]
fn constructor_rules() {
    let script = ParseOptions::script();
    assert_eq!(
        error_code("class A { constructor() {} constructor() {} }", &script),
        diagnostic_codes::DUPLICATE_CONSTRUCTOR
    );
    assert_eq!(
        error_code("class A { get constructor() {} }", &script),
        diagnostic_codes::SPECIAL_CONSTRUCTOR
    );
    assert_eq!(
        error_code("class A { *constructor() {} }", &script),
        diagnostic_codes::SPECIAL_CONSTRUCTOR
    );
    assert_eq!(
        error_code("class A { static prototype() {} }", &script),
        diagnostic_codes::STATIC_PROTOTYPE
    );
}

#[test]
fn super_call_only_in_derived_constructors() {
    let script = ParseOptions::script();
    assert_eq!(
        error_code("class A { constructor() { super(); } }", &script),
        diagnostic_codes::SUPER_CALL_NOT_ALLOWED
    );
    assert_eq!(
        error_code("class A extends B { m() { super(); } }", &script),
        diagnostic_codes::SUPER_CALL_NOT_ALLOWED
    );
    assert!(parse(
        "class A extends B { constructor() { (() => super())(); } }",
        &script
    )
    .is_ok());
}

#[test]
fn class_code_is_strict() {
    assert_eq!(
        error_code("class A { m() { with (x) {} } }", &ParseOptions::script()),
        diagnostic_codes::WITH_IN_STRICT_MODE
    );
    assert!(parse("class let {}", &ParseOptions::script()).is_err());
}

#[test]
fn declaration_needs_a_name() {
    assert_eq!(
        error_code("class {}", &ParseOptions::script()),
        diagnostic_codes::CLASS_NAME_EXPECTED
    );
    let program = parse("(class extends Base {})", &ParseOptions::script()).unwrap();
    let Statement::ExpressionStatement(stmt) = &program.body[0] else {
        panic!("expected an expression statement");
    };
    let Expression::ClassExpression(class) = &stmt.expression else {
        panic!("expected a class expression");
    };
    assert!(class.id.is_none());
    assert_eq!(class.kind, ClassKind::ClassExpression);
}

#[test]
fn class_names_are_lexical() {
    assert_eq!(
        error_code("class A {} class A {}", &ParseOptions::script()),
        diagnostic_codes::DUPLICATE_DECLARATION
    );
    assert!(parse("let A = class A {};", &ParseOptions::script()).is_ok());
}

// =============================================================================
// Fields and static blocks
// =============================================================================

#[test]
fn fields_are_staged_syntax() {
    assert!(parse("class A { x = 1; }", &ParseOptions::script()).is_err());
    let class = class("class A { x = 1; static y; 'z' = 2\n [w] }", &next());
    let fields: Vec<(bool, bool, bool)> = class
        .body
        .body
        .iter()
        .filter_map(|element| match element {
            ClassElement::PropertyDefinition(field) => {
                Some((field.is_static, field.computed, field.value.is_some()))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        fields,
        [
            (false, false, true),
            (true, false, false),
            (false, false, true),
            (false, true, false),
        ]
    );
}

#[test]
fn field_name_rules() {
    assert_eq!(
        error_code("class A { constructor = 1 }", &next()),
        diagnostic_codes::CONSTRUCTOR_FIELD
    );
    assert_eq!(
        error_code("class A { static prototype = 1 }", &next()),
        diagnostic_codes::STATIC_PROTOTYPE
    );
}

#[test]
fn field_initializer_context() {
    assert_eq!(
        error_code("class A { x = arguments; }", &next()),
        diagnostic_codes::ARGUMENTS_IN_CLASS_FIELD
    );
    assert_eq!(
        error_code("class A { x = () => arguments; }", &next()),
        diagnostic_codes::ARGUMENTS_IN_CLASS_FIELD
    );
    assert!(parse("class A { x = function () { return arguments; }; }", &next()).is_ok());
    assert!(parse("class A { x = super.y; z = new.target; }", &next()).is_ok());
    assert_eq!(
        error_code("class A extends B { x = super(); }", &next()),
        diagnostic_codes::SUPER_CALL_NOT_ALLOWED
    );
}

#[test]
fn static_blocks() {
    assert!(parse("class A { static { } }", &ParseOptions::script()).is_err());
    let class = class("class A { static { var x = 1; this.y = x; } }", &next());
    let ClassElement::StaticBlock(block) = &class.body.body[0] else {
        panic!("expected a static block");
    };
    assert_eq!(block.body.len(), 2);
    assert_eq!(
        error_code("class A { static { await; } }", &next()),
        diagnostic_codes::RESERVED_WORD
    );
    assert_eq!(
        error_code("class A { static { arguments; } }", &next()),
        diagnostic_codes::ARGUMENTS_IN_CLASS_FIELD
    );
}

#[test]
fn static_block_var_does_not_escape() {
    assert!(parse("let x; class A { static { var x; } }", &next()).is_ok());
}

// =============================================================================
// Private names
// =============================================================================

#[test]
fn private_members_resolve_within_the_class() {
    let source = "class A {
        #x = 1;
        #m() { return this.#x; }
        get #y() { return 1; }
        set #y(v) {}
        static #s;
        static is(o) { return #x in o; }
    }";
    let class = class(source, &next());
    assert_eq!(class.body.body.len(), 6);
    let ClassElement::PropertyDefinition(field) = &class.body.body[0] else {
        panic!("expected a field");
    };
    let Expression::PrivateIdentifier(name) = &field.key else {
        panic!("expected a private key");
    };
    assert_eq!(name.name, "x");
}

#[test]
fn private_names_need_staged_syntax() {
    assert!(parse("class A { #x() {} }", &ParseOptions::script()).is_err());
}

#[test]
fn references_may_precede_declarations() {
    assert!(parse("class A { m() { return this.#x; } #x = 1; }", &next()).is_ok());
}

#[test]
fn nested_classes_see_outer_private_names() {
    let source = "class A { #x; m() { return class { n(o) { return o.#x; } }; } }";
    assert!(parse(source, &next()).is_ok());
}

#[test]
fn private_name_errors() {
    assert_eq!(
        error_code("class A { m() { this.#y; } }", &next()),
        diagnostic_codes::UNDECLARED_PRIVATE_NAME
    );
    assert_eq!(
        error_code("this.#x", &next()),
        diagnostic_codes::UNDECLARED_PRIVATE_NAME
    );
    assert_eq!(
        error_code("class A { #x; #x; }", &next()),
        diagnostic_codes::DUPLICATE_PRIVATE_NAME
    );
    assert_eq!(
        error_code("class A { get #x() {} static set #x(v) {} }", &next()),
        diagnostic_codes::DUPLICATE_PRIVATE_NAME
    );
    assert_eq!(
        error_code("class A { #constructor; }", &next()),
        diagnostic_codes::PRIVATE_CONSTRUCTOR_NAME
    );
    assert_eq!(
        error_code("class A { #x; m() { delete this.#x; } }", &next()),
        diagnostic_codes::DELETE_PRIVATE_NAME
    );
}
