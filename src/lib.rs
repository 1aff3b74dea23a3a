//! esz: an ECMAScript parser producing ESTree-shaped syntax trees.
//!
//! This crate is the public face of the workspace. It re-exports the parser
//! entry points and AST types, and adds JSON helpers for callers that want
//! the ESTree output as `serde_json` values.
//!
//! ```
//! let program = esz::parse_module("export const answer = 42;").unwrap();
//! let json = esz::to_estree_json(&program);
//! assert_eq!(json["type"], "Program");
//! assert_eq!(json["sourceType"], "module");
//! assert_eq!(json["body"][0]["type"], "ExportNamedDeclaration");
//! ```

use serde_json::Value;
use tracing::error;

pub mod tracing_config;

// Shared types
pub use esz_common::diagnostics::diagnostic_codes;
pub use esz_common::{Diagnostic, DiagnosticKind, LineMap, Location, SourceType, Span, Spanned};

// Parser entry points and AST
pub use esz_parser::parser::node as ast;
pub use esz_parser::{ParseOptions, Program, parse, parse_module, parse_script};

/// Serialize a parsed `Program` to its ESTree JSON form.
///
/// Position fields (`start`, `end`, `range`, `loc`) appear only when the
/// options the program was parsed with asked for them.
#[must_use]
pub fn to_estree_json(program: &Program) -> Value {
    match serde_json::to_value(program) {
        Ok(value) => value,
        Err(err) => {
            // AST nodes only contain strings, numbers and booleans.
            error!(%err, "program did not serialize");
            Value::Null
        }
    }
}

/// Serialize a diagnostic to JSON (`kind`, `code`, `message`, `start`, `end`,
/// `line`, `column`).
#[must_use]
pub fn diagnostic_to_json(diagnostic: &Diagnostic) -> Value {
    match serde_json::to_value(diagnostic) {
        Ok(value) => value,
        Err(err) => {
            error!(%err, "diagnostic did not serialize");
            Value::Null
        }
    }
}

/// Parse `source` and return either the ESTree JSON of the program or the
/// diagnostic, both as JSON.
pub fn parse_to_json(source: &str, options: &ParseOptions) -> Result<Value, Value> {
    match parse(source, options) {
        Ok(program) => Ok(to_estree_json(&program)),
        Err(diagnostic) => Err(diagnostic_to_json(&diagnostic)),
    }
}
