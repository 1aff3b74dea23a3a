//! Structured diagnostics.
//!
//! Parsing is fail-fast: a parse call returns either a complete tree or exactly
//! one `Diagnostic`. Every diagnostic carries a stable numeric code (see
//! [`diagnostic_codes`]) whose message template lives in
//! [`DIAGNOSTIC_MESSAGES`]. Templates use `{0}`, `{1}`, ... placeholders filled
//! by [`format_message`].
//!
//! Codes are grouped by kind:
//! - `1000..1100`: lexical errors raised by the scanner
//! - `1100..1200`: syntax errors raised while matching productions
//! - `1200..1300`: early errors raised at validation checkpoints

use std::fmt;

use serde::Serialize;

use crate::position::LineMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    /// Malformed token.
    Lexical,
    /// Grammar mismatch.
    Syntax,
    /// Grammatically valid but statically forbidden.
    Early,
}

impl DiagnosticKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lexical => "LexicalError",
            Self::Syntax => "SyntaxError",
            Self::Early => "EarlyError",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub kind: DiagnosticKind,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    // Lexical
    pub const INVALID_CHARACTER: u32 = 1000;
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1001;
    pub const UNTERMINATED_TEMPLATE_LITERAL: u32 = 1002;
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: u32 = 1003;
    pub const UNTERMINATED_COMMENT: u32 = 1004;
    pub const INVALID_ESCAPE_SEQUENCE: u32 = 1005;
    pub const INVALID_UNICODE_ESCAPE_SEQUENCE: u32 = 1006;
    pub const INVALID_HEXADECIMAL_ESCAPE_SEQUENCE: u32 = 1007;
    pub const UNICODE_ESCAPE_OUT_OF_RANGE: u32 = 1008;
    pub const DIGIT_EXPECTED: u32 = 1009;
    pub const HEXADECIMAL_DIGIT_EXPECTED: u32 = 1010;
    pub const OCTAL_DIGIT_EXPECTED: u32 = 1011;
    pub const BINARY_DIGIT_EXPECTED: u32 = 1012;
    pub const IDENTIFIER_DIRECTLY_AFTER_NUMBER: u32 = 1013;
    pub const NUMERIC_SEPARATORS_NOT_ALLOWED_HERE: u32 = 1014;
    pub const MULTIPLE_CONSECUTIVE_NUMERIC_SEPARATORS: u32 = 1015;
    pub const INVALID_BIGINT_LITERAL: u32 = 1016;
    pub const INVALID_REGULAR_EXPRESSION_FLAG: u32 = 1017;
    pub const DUPLICATE_REGULAR_EXPRESSION_FLAG: u32 = 1018;
    pub const INVALID_PRIVATE_NAME: u32 = 1019;
    pub const INVALID_ESCAPE_IN_TEMPLATE: u32 = 1020;
    pub const SOURCE_TOO_LARGE: u32 = 1021;

    // Syntax
    pub const TOKEN_EXPECTED: u32 = 1100;
    pub const UNEXPECTED_TOKEN: u32 = 1101;
    pub const UNEXPECTED_END_OF_INPUT: u32 = 1102;
    pub const EXPRESSION_EXPECTED: u32 = 1103;
    pub const LINE_TERMINATOR_BEFORE_ARROW: u32 = 1105;
    pub const LINE_BREAK_AFTER_THROW: u32 = 1106;
    pub const INVALID_DESTRUCTURING_TARGET: u32 = 1107;
    pub const INVALID_ASSIGNMENT_TARGET: u32 = 1108;
    pub const INVALID_PREFIX_OPERAND: u32 = 1109;
    pub const INVALID_POSTFIX_OPERAND: u32 = 1110;
    pub const INVALID_FOR_IN_OF_TARGET: u32 = 1111;
    pub const INVALID_ARROW_PARAMETER: u32 = 1112;
    pub const REST_ELEMENT_MUST_BE_LAST: u32 = 1113;
    pub const REST_TRAILING_COMMA: u32 = 1114;
    pub const REST_INITIALIZER: u32 = 1115;
    pub const INVALID_SHORTHAND_INITIALIZER: u32 = 1116;
    pub const NULLISH_MIXED_WITH_LOGICAL: u32 = 1117;
    pub const UNARY_BEFORE_EXPONENTIATION: u32 = 1118;
    pub const CATCH_OR_FINALLY_EXPECTED: u32 = 1119;
    pub const FOR_IN_OF_SINGLE_DECLARATION: u32 = 1120;
    pub const FOR_IN_OF_INITIALIZER: u32 = 1121;
    pub const MISSING_INITIALIZER: u32 = 1122;
    pub const FUNCTION_NAME_EXPECTED: u32 = 1123;
    pub const CLASS_NAME_EXPECTED: u32 = 1124;
    pub const TAGGED_TEMPLATE_IN_OPTIONAL_CHAIN: u32 = 1125;
    pub const OPTIONAL_CHAIN_IN_NEW: u32 = 1126;
    pub const LEXICAL_DECLARATION_IN_SINGLE_STATEMENT: u32 = 1127;
    pub const DECLARATION_IN_SINGLE_STATEMENT: u32 = 1128;
    pub const IMPORT_EXPORT_ONLY_AT_TOP_LEVEL: u32 = 1129;
    pub const IMPORT_META_OUTSIDE_MODULE: u32 = 1130;
    pub const INVALID_META_PROPERTY: u32 = 1131;
    pub const INVALID_COALESCE_ASSIGNMENT: u32 = 1132;
    pub const TRAILING_COMMA_NOT_ALLOWED: u32 = 1133;
    pub const LET_BRACKET_IN_EXPRESSION_STATEMENT: u32 = 1135;
    pub const NESTING_TOO_DEEP: u32 = 1136;
    pub const OPTIONAL_CHAIN_ASSIGNMENT: u32 = 1137;

    // Early
    pub const STRICT_RESERVED_WORD: u32 = 1200;
    pub const RESERVED_WORD: u32 = 1201;
    pub const AWAIT_IN_PARAMETER: u32 = 1202;
    pub const YIELD_IN_PARAMETER: u32 = 1203;
    pub const AWAIT_IDENTIFIER_IN_ASYNC: u32 = 1204;
    pub const YIELD_IDENTIFIER_IN_GENERATOR: u32 = 1205;
    pub const AWAIT_IN_MODULE: u32 = 1206;
    pub const EVAL_OR_ARGUMENTS_IN_STRICT_MODE: u32 = 1207;
    pub const DUPLICATE_PARAMETER: u32 = 1208;
    pub const USE_STRICT_WITH_NON_SIMPLE_PARAMETERS: u32 = 1209;
    pub const OCTAL_LITERAL_IN_STRICT_MODE: u32 = 1210;
    pub const OCTAL_ESCAPE_IN_STRICT_MODE: u32 = 1211;
    pub const WITH_IN_STRICT_MODE: u32 = 1212;
    pub const DELETE_IDENTIFIER_IN_STRICT_MODE: u32 = 1213;
    pub const DUPLICATE_DECLARATION: u32 = 1214;
    pub const LET_IN_LEXICAL_BINDING: u32 = 1215;
    pub const DUPLICATE_LABEL: u32 = 1216;
    pub const UNDEFINED_LABEL: u32 = 1217;
    pub const ILLEGAL_BREAK: u32 = 1218;
    pub const ILLEGAL_CONTINUE: u32 = 1219;
    pub const CONTINUE_TARGET_NOT_ITERATION: u32 = 1220;
    pub const ILLEGAL_RETURN: u32 = 1221;
    pub const NEW_TARGET_OUTSIDE_FUNCTION: u32 = 1222;
    pub const SUPER_PROPERTY_NOT_ALLOWED: u32 = 1223;
    pub const SUPER_CALL_NOT_ALLOWED: u32 = 1224;
    pub const ESCAPED_KEYWORD: u32 = 1225;
    pub const DUPLICATE_EXPORT: u32 = 1226;
    pub const UNDECLARED_EXPORT: u32 = 1227;
    pub const DUPLICATE_CONSTRUCTOR: u32 = 1228;
    pub const SPECIAL_CONSTRUCTOR: u32 = 1229;
    pub const STATIC_PROTOTYPE: u32 = 1230;
    pub const CONSTRUCTOR_FIELD: u32 = 1231;
    pub const GETTER_PARAMETERS: u32 = 1232;
    pub const SETTER_PARAMETERS: u32 = 1233;
    pub const SETTER_REST_PARAMETER: u32 = 1234;
    pub const DUPLICATE_PROTO: u32 = 1235;
    pub const UNDECLARED_PRIVATE_NAME: u32 = 1236;
    pub const DUPLICATE_PRIVATE_NAME: u32 = 1237;
    pub const DELETE_PRIVATE_NAME: u32 = 1238;
    pub const ARGUMENTS_IN_CLASS_FIELD: u32 = 1239;
    pub const LABELLED_FUNCTION: u32 = 1240;
    pub const PRIVATE_CONSTRUCTOR_NAME: u32 = 1243;
    pub const FOR_AWAIT_OUTSIDE_ASYNC: u32 = 1244;
    pub const LEGACY_OCTAL_BIGINT: u32 = 1245;
}

use diagnostic_codes as c;

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    // Lexical
    msg(c::INVALID_CHARACTER, DiagnosticKind::Lexical, "Invalid character '{0}'."),
    msg(c::UNTERMINATED_STRING_LITERAL, DiagnosticKind::Lexical, "Unterminated string literal."),
    msg(c::UNTERMINATED_TEMPLATE_LITERAL, DiagnosticKind::Lexical, "Unterminated template literal."),
    msg(c::UNTERMINATED_REGULAR_EXPRESSION_LITERAL, DiagnosticKind::Lexical, "Unterminated regular expression literal."),
    msg(c::UNTERMINATED_COMMENT, DiagnosticKind::Lexical, "Multi-line comment is not terminated."),
    msg(c::INVALID_ESCAPE_SEQUENCE, DiagnosticKind::Lexical, "Invalid escape sequence."),
    msg(c::INVALID_UNICODE_ESCAPE_SEQUENCE, DiagnosticKind::Lexical, "Invalid Unicode escape sequence."),
    msg(c::INVALID_HEXADECIMAL_ESCAPE_SEQUENCE, DiagnosticKind::Lexical, "Invalid hexadecimal escape sequence."),
    msg(c::UNICODE_ESCAPE_OUT_OF_RANGE, DiagnosticKind::Lexical, "An extended Unicode escape value must be between 0x0 and 0x10FFFF inclusive."),
    msg(c::DIGIT_EXPECTED, DiagnosticKind::Lexical, "Digit expected."),
    msg(c::HEXADECIMAL_DIGIT_EXPECTED, DiagnosticKind::Lexical, "Hexadecimal digit expected."),
    msg(c::OCTAL_DIGIT_EXPECTED, DiagnosticKind::Lexical, "Octal digit expected."),
    msg(c::BINARY_DIGIT_EXPECTED, DiagnosticKind::Lexical, "Binary digit expected."),
    msg(c::IDENTIFIER_DIRECTLY_AFTER_NUMBER, DiagnosticKind::Lexical, "An identifier or keyword cannot immediately follow a numeric literal."),
    msg(c::NUMERIC_SEPARATORS_NOT_ALLOWED_HERE, DiagnosticKind::Lexical, "Numeric separators are not allowed here."),
    msg(c::MULTIPLE_CONSECUTIVE_NUMERIC_SEPARATORS, DiagnosticKind::Lexical, "Multiple consecutive numeric separators are not permitted."),
    msg(c::INVALID_BIGINT_LITERAL, DiagnosticKind::Lexical, "Invalid BigInt literal."),
    msg(c::INVALID_REGULAR_EXPRESSION_FLAG, DiagnosticKind::Lexical, "Invalid regular expression flag '{0}'."),
    msg(c::DUPLICATE_REGULAR_EXPRESSION_FLAG, DiagnosticKind::Lexical, "Duplicate regular expression flag '{0}'."),
    msg(c::INVALID_PRIVATE_NAME, DiagnosticKind::Lexical, "Invalid private name."),
    msg(c::INVALID_ESCAPE_IN_TEMPLATE, DiagnosticKind::Lexical, "Invalid escape sequence in template literal."),
    msg(c::SOURCE_TOO_LARGE, DiagnosticKind::Lexical, "Source text exceeds the maximum supported size."),
    // Syntax
    msg(c::TOKEN_EXPECTED, DiagnosticKind::Syntax, "'{0}' expected."),
    msg(c::UNEXPECTED_TOKEN, DiagnosticKind::Syntax, "Unexpected token '{0}'."),
    msg(c::UNEXPECTED_END_OF_INPUT, DiagnosticKind::Syntax, "Unexpected end of input."),
    msg(c::EXPRESSION_EXPECTED, DiagnosticKind::Syntax, "Expression expected."),
    msg(c::LINE_TERMINATOR_BEFORE_ARROW, DiagnosticKind::Syntax, "Line terminator not permitted before arrow."),
    msg(c::LINE_BREAK_AFTER_THROW, DiagnosticKind::Syntax, "Line break not permitted after 'throw'."),
    msg(c::INVALID_DESTRUCTURING_TARGET, DiagnosticKind::Syntax, "Invalid destructuring assignment target."),
    msg(c::INVALID_ASSIGNMENT_TARGET, DiagnosticKind::Syntax, "Invalid left-hand side in assignment."),
    msg(c::INVALID_PREFIX_OPERAND, DiagnosticKind::Syntax, "Invalid left-hand side expression in prefix operation."),
    msg(c::INVALID_POSTFIX_OPERAND, DiagnosticKind::Syntax, "Invalid left-hand side expression in postfix operation."),
    msg(c::INVALID_FOR_IN_OF_TARGET, DiagnosticKind::Syntax, "Invalid left-hand side in 'for...{0}' loop."),
    msg(c::INVALID_ARROW_PARAMETER, DiagnosticKind::Syntax, "Invalid arrow function parameter."),
    msg(c::REST_ELEMENT_MUST_BE_LAST, DiagnosticKind::Syntax, "A rest element must be last in a parameter list or destructuring pattern."),
    msg(c::REST_TRAILING_COMMA, DiagnosticKind::Syntax, "A rest element may not have a trailing comma."),
    msg(c::REST_INITIALIZER, DiagnosticKind::Syntax, "A rest element cannot have an initializer."),
    msg(c::INVALID_SHORTHAND_INITIALIZER, DiagnosticKind::Syntax, "Invalid shorthand property initializer."),
    msg(c::NULLISH_MIXED_WITH_LOGICAL, DiagnosticKind::Syntax, "'??' cannot be mixed with '||' or '&&' without parentheses."),
    msg(c::UNARY_BEFORE_EXPONENTIATION, DiagnosticKind::Syntax, "Unary operator used immediately before exponentiation expression; parentheses are required."),
    msg(c::CATCH_OR_FINALLY_EXPECTED, DiagnosticKind::Syntax, "'catch' or 'finally' expected."),
    msg(c::FOR_IN_OF_SINGLE_DECLARATION, DiagnosticKind::Syntax, "Only a single variable declaration is allowed in a 'for...{0}' statement."),
    msg(c::FOR_IN_OF_INITIALIZER, DiagnosticKind::Syntax, "The variable declaration of a 'for...{0}' statement cannot have an initializer."),
    msg(c::MISSING_INITIALIZER, DiagnosticKind::Syntax, "Missing initializer in {0}."),
    msg(c::FUNCTION_NAME_EXPECTED, DiagnosticKind::Syntax, "Function name expected."),
    msg(c::CLASS_NAME_EXPECTED, DiagnosticKind::Syntax, "Class name expected."),
    msg(c::TAGGED_TEMPLATE_IN_OPTIONAL_CHAIN, DiagnosticKind::Syntax, "Tagged template cannot be used in optional chain."),
    msg(c::OPTIONAL_CHAIN_IN_NEW, DiagnosticKind::Syntax, "Invalid optional chain from new expression."),
    msg(c::LEXICAL_DECLARATION_IN_SINGLE_STATEMENT, DiagnosticKind::Syntax, "Lexical declaration cannot appear in a single-statement context."),
    msg(c::DECLARATION_IN_SINGLE_STATEMENT, DiagnosticKind::Syntax, "{0} declarations can only be declared at top level or inside a block."),
    msg(c::IMPORT_EXPORT_ONLY_AT_TOP_LEVEL, DiagnosticKind::Syntax, "'import' and 'export' may only appear at the top level of a module."),
    msg(c::IMPORT_META_OUTSIDE_MODULE, DiagnosticKind::Syntax, "Cannot use 'import.meta' outside a module."),
    msg(c::INVALID_META_PROPERTY, DiagnosticKind::Syntax, "'{0}.{1}' is not a valid meta-property."),
    msg(c::INVALID_COALESCE_ASSIGNMENT, DiagnosticKind::Syntax, "Invalid left-hand side in logical assignment."),
    msg(c::TRAILING_COMMA_NOT_ALLOWED, DiagnosticKind::Syntax, "Trailing comma is not allowed here."),
    msg(c::LET_BRACKET_IN_EXPRESSION_STATEMENT, DiagnosticKind::Syntax, "An expression statement cannot start with 'let ['."),
    msg(c::NESTING_TOO_DEEP, DiagnosticKind::Syntax, "Source is nested too deeply."),
    msg(c::OPTIONAL_CHAIN_ASSIGNMENT, DiagnosticKind::Syntax, "An optional chain cannot be an assignment target."),
    // Early
    msg(c::STRICT_RESERVED_WORD, DiagnosticKind::Early, "'{0}' is a reserved word in strict mode."),
    msg(c::RESERVED_WORD, DiagnosticKind::Early, "'{0}' is a reserved word and cannot be used as an identifier."),
    msg(c::AWAIT_IN_PARAMETER, DiagnosticKind::Early, "'await' expressions cannot be used in a parameter list."),
    msg(c::YIELD_IN_PARAMETER, DiagnosticKind::Early, "'yield' expressions cannot be used in a parameter list."),
    msg(c::AWAIT_IDENTIFIER_IN_ASYNC, DiagnosticKind::Early, "'await' cannot be used as an identifier within an async function."),
    msg(c::YIELD_IDENTIFIER_IN_GENERATOR, DiagnosticKind::Early, "'yield' cannot be used as an identifier within a generator."),
    msg(c::AWAIT_IN_MODULE, DiagnosticKind::Early, "'await' is a reserved word in module code."),
    msg(c::EVAL_OR_ARGUMENTS_IN_STRICT_MODE, DiagnosticKind::Early, "Invalid use of '{0}' in strict mode."),
    msg(c::DUPLICATE_PARAMETER, DiagnosticKind::Early, "Duplicate parameter name '{0}' is not allowed in this context."),
    msg(c::USE_STRICT_WITH_NON_SIMPLE_PARAMETERS, DiagnosticKind::Early, "'use strict' directive cannot be used with a non-simple parameter list."),
    msg(c::OCTAL_LITERAL_IN_STRICT_MODE, DiagnosticKind::Early, "Octal literals are not allowed in strict mode."),
    msg(c::OCTAL_ESCAPE_IN_STRICT_MODE, DiagnosticKind::Early, "Octal escape sequences are not allowed in strict mode."),
    msg(c::WITH_IN_STRICT_MODE, DiagnosticKind::Early, "'with' statements are not allowed in strict mode."),
    msg(c::DELETE_IDENTIFIER_IN_STRICT_MODE, DiagnosticKind::Early, "'delete' cannot be applied to an unqualified identifier in strict mode."),
    msg(c::DUPLICATE_DECLARATION, DiagnosticKind::Early, "Identifier '{0}' has already been declared."),
    msg(c::LET_IN_LEXICAL_BINDING, DiagnosticKind::Early, "'let' cannot be used as a lexically bound name."),
    msg(c::DUPLICATE_LABEL, DiagnosticKind::Early, "Label '{0}' has already been declared."),
    msg(c::UNDEFINED_LABEL, DiagnosticKind::Early, "Undefined label '{0}'."),
    msg(c::ILLEGAL_BREAK, DiagnosticKind::Early, "Illegal 'break' statement."),
    msg(c::ILLEGAL_CONTINUE, DiagnosticKind::Early, "Illegal 'continue' statement: no surrounding iteration statement."),
    msg(c::CONTINUE_TARGET_NOT_ITERATION, DiagnosticKind::Early, "Illegal 'continue' statement: '{0}' does not denote an iteration statement."),
    msg(c::ILLEGAL_RETURN, DiagnosticKind::Early, "Illegal 'return' statement."),
    msg(c::NEW_TARGET_OUTSIDE_FUNCTION, DiagnosticKind::Early, "'new.target' can only be used in functions and class static blocks."),
    msg(c::SUPER_PROPERTY_NOT_ALLOWED, DiagnosticKind::Early, "'super' keyword unexpected here."),
    msg(c::SUPER_CALL_NOT_ALLOWED, DiagnosticKind::Early, "'super()' is only valid in a derived class constructor."),
    msg(c::ESCAPED_KEYWORD, DiagnosticKind::Early, "Keywords cannot contain escape characters."),
    msg(c::DUPLICATE_EXPORT, DiagnosticKind::Early, "Duplicate export of '{0}'."),
    msg(c::UNDECLARED_EXPORT, DiagnosticKind::Early, "Export '{0}' is not defined in module."),
    msg(c::DUPLICATE_CONSTRUCTOR, DiagnosticKind::Early, "A class may only have one constructor."),
    msg(c::SPECIAL_CONSTRUCTOR, DiagnosticKind::Early, "Class constructor may not be {0}."),
    msg(c::STATIC_PROTOTYPE, DiagnosticKind::Early, "Classes may not have a static property named 'prototype'."),
    msg(c::CONSTRUCTOR_FIELD, DiagnosticKind::Early, "Classes may not have a field named 'constructor'."),
    msg(c::GETTER_PARAMETERS, DiagnosticKind::Early, "A 'get' accessor cannot have parameters."),
    msg(c::SETTER_PARAMETERS, DiagnosticKind::Early, "A 'set' accessor must have exactly one parameter."),
    msg(c::SETTER_REST_PARAMETER, DiagnosticKind::Early, "A 'set' accessor cannot have a rest parameter."),
    msg(c::DUPLICATE_PROTO, DiagnosticKind::Early, "Duplicate '__proto__' fields are not allowed in object literals."),
    msg(c::UNDECLARED_PRIVATE_NAME, DiagnosticKind::Early, "Private field '#{0}' must be declared in an enclosing class."),
    msg(c::DUPLICATE_PRIVATE_NAME, DiagnosticKind::Early, "Private name '#{0}' has already been declared."),
    msg(c::DELETE_PRIVATE_NAME, DiagnosticKind::Early, "Private fields cannot be deleted."),
    msg(c::ARGUMENTS_IN_CLASS_FIELD, DiagnosticKind::Early, "'arguments' is not allowed in class field initializer or static initialization block."),
    msg(c::LABELLED_FUNCTION, DiagnosticKind::Early, "Labelled function declarations are not allowed here."),
    msg(c::PRIVATE_CONSTRUCTOR_NAME, DiagnosticKind::Early, "Classes may not have a private element named '#constructor'."),
    msg(c::FOR_AWAIT_OUTSIDE_ASYNC, DiagnosticKind::Early, "'for await' loops are only valid in async functions and the top level bodies of modules."),
    msg(c::LEGACY_OCTAL_BIGINT, DiagnosticKind::Early, "Legacy octal literals cannot be BigInts."),
];

const fn msg(code: u32, kind: DiagnosticKind, message: &'static str) -> DiagnosticMessage {
    DiagnosticMessage {
        code,
        kind,
        message,
    }
}

#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

#[must_use]
pub fn get_message_kind(code: u32) -> DiagnosticKind {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map_or(DiagnosticKind::Syntax, |m| m.kind)
}

#[must_use]
pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// The single failure reported by a parse call.
///
/// `line` is 1-based and `column` is a 0-based byte offset from the line start.
/// Both are zero until [`Diagnostic::with_location`] resolves them against the
/// source's line map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub code: u32,
    pub message: String,
    pub start: u32,
    pub end: u32,
    pub line: u32,
    pub column: u32,
}

impl Diagnostic {
    /// Build a diagnostic from its code, filling the message template with `args`.
    #[must_use]
    pub fn new(code: u32, start: u32, end: u32, args: &[&str]) -> Self {
        let template = get_message_template(code).unwrap_or("Unknown error.");
        Self {
            kind: get_message_kind(code),
            code,
            message: format_message(template, args),
            start,
            end: end.max(start),
            line: 0,
            column: 0,
        }
    }

    #[must_use]
    pub fn with_location(mut self, line_map: &LineMap) -> Self {
        let location = line_map.location(self.start);
        self.line = location.line;
        self.column = location.column;
        self
    }

    #[must_use]
    pub const fn is_lexical(&self) -> bool {
        matches!(self.kind, DiagnosticKind::Lexical)
    }

    #[must_use]
    pub const fn is_early(&self) -> bool {
        matches!(self.kind, DiagnosticKind::Early)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ES{} ({}:{}): {}",
            self.kind.as_str(),
            self.code,
            self.line,
            self.column,
            self.message
        )
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_has_exactly_one_template() {
        for entry in DIAGNOSTIC_MESSAGES {
            let count = DIAGNOSTIC_MESSAGES
                .iter()
                .filter(|m| m.code == entry.code)
                .count();
            assert_eq!(count, 1, "code {} registered {count} times", entry.code);
        }
    }

    #[test]
    fn code_ranges_match_kinds() {
        for entry in DIAGNOSTIC_MESSAGES {
            let expected = match entry.code {
                1000..=1099 => DiagnosticKind::Lexical,
                1100..=1199 => DiagnosticKind::Syntax,
                _ => DiagnosticKind::Early,
            };
            assert_eq!(entry.kind, expected, "code {}", entry.code);
        }
    }

    #[test]
    fn new_formats_arguments_and_resolves_location() {
        let map = LineMap::build("let x;\nlet x;");
        let diag = Diagnostic::new(diagnostic_codes::DUPLICATE_DECLARATION, 11, 12, &["x"])
            .with_location(&map);
        assert_eq!(diag.message, "Identifier 'x' has already been declared.");
        assert_eq!(diag.kind, DiagnosticKind::Early);
        assert_eq!((diag.line, diag.column), (2, 4));
        assert_eq!(
            diag.to_string(),
            "EarlyError ES1214 (2:4): Identifier 'x' has already been declared."
        );
    }
}
