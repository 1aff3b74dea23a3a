//! Tests for the module goal: imports, exports and module-only rules.
use super::*;
use esz_common::diagnostics::diagnostic_codes;

fn module(source: &str) -> Program {
    parse(source, &ParseOptions::module()).unwrap_or_else(|d| panic!("{source:?}: {d}"))
}

fn module_error(source: &str) -> u32 {
    match parse(source, &ParseOptions::module()) {
        Ok(_) => panic!("{source:?} should not parse"),
        Err(diagnostic) => diagnostic.code,
    }
}

fn import(program: &Program, index: usize) -> &ImportDeclaration {
    match &program.body[index] {
        Statement::ImportDeclaration(import) => import,
        other => panic!("expected an import declaration, got {other:?}"),
    }
}

fn export_named(program: &Program, index: usize) -> &ExportNamedDeclaration {
    match &program.body[index] {
        Statement::ExportNamedDeclaration(export) => export,
        other => panic!("expected a named export, got {other:?}"),
    }
}

// =============================================================================
// Imports
// =============================================================================

#[test]
fn import_forms() {
    let program = module(
        "import 'side-effect';
         import a from 'a';
         import * as ns from 'ns';
         import b, { c, d as e, 'f g' as h } from 'b';
         import i, * as j from 'i';",
    );
    assert_eq!(program.source_type, SourceType::Module);
    assert!(import(&program, 0).specifiers.is_empty());
    assert_eq!(import(&program, 0).source.string_value(), Some("side-effect"));

    assert!(matches!(
        import(&program, 1).specifiers[..],
        [ImportDeclarationSpecifier::ImportDefaultSpecifier(_)]
    ));
    assert!(matches!(
        import(&program, 2).specifiers[..],
        [ImportDeclarationSpecifier::ImportNamespaceSpecifier(_)]
    ));

    let named = &import(&program, 3).specifiers;
    assert_eq!(named.len(), 4);
    let pairs: Vec<(String, String)> = named
        .iter()
        .filter_map(|specifier| match specifier {
            ImportDeclarationSpecifier::ImportSpecifier(s) => {
                Some((s.imported.name().to_string(), s.local.name.clone()))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        pairs,
        [
            ("c".to_string(), "c".to_string()),
            ("d".to_string(), "e".to_string()),
            ("f g".to_string(), "h".to_string()),
        ]
    );
    assert_eq!(import(&program, 4).specifiers.len(), 2);
}

#[test]
fn import_bindings_are_checked() {
    assert_eq!(
        module_error("import { default } from 'm';"),
        diagnostic_codes::RESERVED_WORD
    );
    assert!(parse("import { default as d } from 'm';", &ParseOptions::module()).is_ok());
    assert!(parse("import { 'a b' } from 'm';", &ParseOptions::module()).is_err());
    assert_eq!(
        module_error("import a from 'a'; import a from 'b';"),
        diagnostic_codes::DUPLICATE_DECLARATION
    );
    assert_eq!(
        module_error("import a from 'a'; var a;"),
        diagnostic_codes::DUPLICATE_DECLARATION
    );
    assert_eq!(
        module_error("import eval from 'm';"),
        diagnostic_codes::EVAL_OR_ARGUMENTS_IN_STRICT_MODE
    );
}

#[test]
fn import_needs_a_string_source() {
    assert!(parse("import a from b;", &ParseOptions::module()).is_err());
    assert!(parse("import { a } 'm';", &ParseOptions::module()).is_err());
}

// =============================================================================
// Exports
// =============================================================================

#[test]
fn export_declarations() {
    let program = module(
        "export var a = 1, { b } = {};
         export let c;
         export const d = 1;
         export function e() {}
         export async function f() {}
         export class G {}",
    );
    assert_eq!(program.body.len(), 6);
    for index in 0..6 {
        let export = export_named(&program, index);
        assert!(export.declaration.is_some());
        assert!(export.specifiers.is_empty());
        assert!(export.source.is_none());
    }
}

#[test]
fn export_specifiers() {
    let program = module("var a, b; export { a, b as c, a as 'd e' };");
    let export = export_named(&program, 1);
    let names: Vec<(&str, &str)> = export
        .specifiers
        .iter()
        .map(|s| (s.local.name(), s.exported.name()))
        .collect();
    assert_eq!(names, [("a", "a"), ("b", "c"), ("a", "d e")]);
    assert!(matches!(
        export.specifiers[2].exported,
        ModuleExportName::Literal(_)
    ));
}

#[test]
fn re_exports() {
    let program = module(
        "export { default, x as 'y z' } from 'm';
         export * from 'n';
         export * as ns from 'o';",
    );
    let named = export_named(&program, 0);
    assert!(named.source.is_some());
    assert_eq!(named.specifiers.len(), 2);

    let Statement::ExportAllDeclaration(all) = &program.body[1] else {
        panic!("expected export *");
    };
    assert!(all.exported.is_none());
    let Statement::ExportAllDeclaration(all) = &program.body[2] else {
        panic!("expected export * as");
    };
    assert_eq!(all.exported.as_ref().map(ModuleExportName::name), Some("ns"));
}

#[test]
fn export_default_forms() {
    let program = module("export default function () {}");
    let Statement::ExportDefaultDeclaration(export) = &program.body[0] else {
        panic!("expected export default");
    };
    let ExportDefaultKind::FunctionDeclaration(function) = &export.declaration else {
        panic!("expected a function declaration");
    };
    assert!(function.id.is_none());

    let program = module("export default class {}");
    let Statement::ExportDefaultDeclaration(export) = &program.body[0] else {
        panic!("expected export default");
    };
    assert!(matches!(
        export.declaration,
        ExportDefaultKind::ClassDeclaration(_)
    ));

    let program = module("export default 1 + 2;");
    let Statement::ExportDefaultDeclaration(export) = &program.body[0] else {
        panic!("expected export default");
    };
    assert!(matches!(
        export.declaration,
        ExportDefaultKind::Expression(Expression::BinaryExpression(_))
    ));
}

#[test]
fn named_default_function_is_declared() {
    assert_eq!(
        module_error("export default function f() {} let f;"),
        diagnostic_codes::DUPLICATE_DECLARATION
    );
}

#[test]
fn duplicate_exports() {
    assert_eq!(
        module_error("var a; export { a }; export { a };"),
        diagnostic_codes::DUPLICATE_EXPORT
    );
    assert_eq!(
        module_error("export default 1; export default 2;"),
        diagnostic_codes::DUPLICATE_EXPORT
    );
    assert_eq!(
        module_error("export var a; export { a };"),
        diagnostic_codes::DUPLICATE_EXPORT
    );
    assert_eq!(
        module_error("export * as x from 'a'; export { y as x } from 'b';"),
        diagnostic_codes::DUPLICATE_EXPORT
    );
    assert!(parse("export * from 'a'; export * from 'b';", &ParseOptions::module()).is_ok());
}

#[test]
fn local_exports_must_be_declared() {
    assert_eq!(
        module_error("export { missing };"),
        diagnostic_codes::UNDECLARED_EXPORT
    );
    assert!(parse("export { later }; function later() {}", &ParseOptions::module()).is_ok());
    assert!(parse("export { later }; var later;", &ParseOptions::module()).is_ok());
    assert_eq!(
        module_error("export { inner }; { let inner; }"),
        diagnostic_codes::UNDECLARED_EXPORT
    );
    assert!(parse("export { missing } from 'm';", &ParseOptions::module()).is_ok());
}

#[test]
fn earliest_undeclared_export_is_reported() {
    let diagnostic = parse("export { b }; export { a };", &ParseOptions::module()).unwrap_err();
    assert_eq!(diagnostic.code, diagnostic_codes::UNDECLARED_EXPORT);
    assert_eq!(diagnostic.start, 9);
}

#[test]
fn local_export_names_must_be_references() {
    assert!(parse("export { 'a' };", &ParseOptions::module()).is_err());
    assert_eq!(
        module_error("export { if };"),
        diagnostic_codes::RESERVED_WORD
    );
    assert!(parse("export { if } from 'm';", &ParseOptions::module()).is_ok());
}

#[test]
fn export_needs_a_declaration() {
    assert!(parse("export 1;", &ParseOptions::module()).is_err());
    assert!(parse("export async () => 1;", &ParseOptions::module()).is_err());
}

// =============================================================================
// Module-only rules
// =============================================================================

#[test]
fn import_and_export_only_at_module_top_level() {
    assert_eq!(
        parse("import a from 'a';", &ParseOptions::script()).unwrap_err().code,
        diagnostic_codes::IMPORT_EXPORT_ONLY_AT_TOP_LEVEL
    );
    assert_eq!(
        parse("export var a;", &ParseOptions::script()).unwrap_err().code,
        diagnostic_codes::IMPORT_EXPORT_ONLY_AT_TOP_LEVEL
    );
    assert_eq!(
        module_error("{ import a from 'a'; }"),
        diagnostic_codes::IMPORT_EXPORT_ONLY_AT_TOP_LEVEL
    );
    assert_eq!(
        module_error("function f() { export var a; }"),
        diagnostic_codes::IMPORT_EXPORT_ONLY_AT_TOP_LEVEL
    );
}

#[test]
fn import_call_and_meta() {
    assert!(parse("import('m').then(f);", &ParseOptions::script()).is_ok());
    assert!(parse("import.meta.url;", &ParseOptions::module()).is_ok());
    assert_eq!(
        parse("import.meta;", &ParseOptions::script()).unwrap_err().code,
        diagnostic_codes::IMPORT_META_OUTSIDE_MODULE
    );
    assert_eq!(
        module_error("import.other;"),
        diagnostic_codes::INVALID_META_PROPERTY
    );
}

#[test]
fn modules_are_strict() {
    assert_eq!(
        module_error("with (a) {}"),
        diagnostic_codes::WITH_IN_STRICT_MODE
    );
    assert!(parse("var let = 1;", &ParseOptions::module()).is_err());
}

#[test]
fn html_comments_are_script_only() {
    let web = ParseOptions::script().with_web_compat(true);
    assert!(parse("x = 1; <!-- comment\n", &web).is_ok());
    let module_web = ParseOptions::module().with_web_compat(true);
    assert!(parse("x = 1; <!-- comment\n", &module_web).is_err());
}

#[test]
fn await_is_reserved_in_modules() {
    assert_eq!(
        module_error("var await;"),
        diagnostic_codes::AWAIT_IN_MODULE
    );
    assert_eq!(
        module_error("await x;"),
        diagnostic_codes::AWAIT_IN_MODULE
    );
    assert!(parse("async function f() { await x; }", &ParseOptions::module()).is_ok());
}

#[test]
fn top_level_await_with_staged_syntax() {
    let options = ParseOptions::module().with_next(true);
    let program = parse("await x;", &options).unwrap();
    let Statement::ExpressionStatement(stmt) = &program.body[0] else {
        panic!("expected an expression statement");
    };
    assert!(matches!(stmt.expression, Expression::AwaitExpression(_)));
    assert!(parse("function f() { await x; }", &options).is_err());
    assert!(parse("await x;", &ParseOptions::script().with_next(true)).is_err());
}
