//! ECMAScript parser producing ESTree-shaped syntax trees.
//!
//! ```
//! use esz_parser::{parse, ParseOptions, Statement};
//!
//! let program = parse("let answer = 42;", &ParseOptions::default()).unwrap();
//! assert!(matches!(program.body[0], Statement::VariableDeclaration(_)));
//! ```
//!
//! Parsing is fail-fast: the result is either a complete [`Program`] or the
//! first [`Diagnostic`] in source order.

use esz_common::{Diagnostic, LineMap};
use tracing::debug;

pub mod parser;
pub use parser::*;

pub use esz_common::SourceType;

/// Parse `source` into a `Program`.
///
/// On failure the diagnostic carries a resolved line and column.
pub fn parse(source: &str, options: &ParseOptions) -> Result<Program, Diagnostic> {
    debug!(
        len = source.len(),
        source_type = ?options.source_type,
        strict = options.strict,
        "parse start"
    );
    let mut state = ParserState::new(source, options.clone());
    match state.parse_program() {
        Ok(program) => {
            debug!(statements = program.body.len(), "parse done");
            Ok(program)
        }
        Err(diagnostic) => {
            let diagnostic = diagnostic.with_location(&LineMap::build(source));
            debug!(code = diagnostic.code, start = diagnostic.start, "parse failed");
            Err(diagnostic)
        }
    }
}

/// Parse `source` with the script goal and otherwise default options.
pub fn parse_script(source: &str) -> Result<Program, Diagnostic> {
    parse(source, &ParseOptions::script())
}

/// Parse `source` with the module goal and otherwise default options.
pub fn parse_module(source: &str) -> Result<Program, Diagnostic> {
    parse(source, &ParseOptions::module())
}

#[cfg(test)]
#[path = "../tests/statement_tests.rs"]
mod statement_tests;

#[cfg(test)]
#[path = "../tests/expression_tests.rs"]
mod expression_tests;

#[cfg(test)]
#[path = "../tests/function_tests.rs"]
mod function_tests;

#[cfg(test)]
#[path = "../tests/class_tests.rs"]
mod class_tests;

#[cfg(test)]
#[path = "../tests/module_tests.rs"]
mod module_tests;

#[cfg(test)]
#[path = "../tests/early_error_tests.rs"]
mod early_error_tests;
