//! Per-token flags recorded by the scanner.

use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u16 {
        /// A line terminator appeared between the previous token and this one.
        const PRECEDING_LINE_BREAK = 1 << 0;
        /// The identifier or keyword was written with `\u` escapes.
        const UNICODE_ESCAPE = 1 << 1;
        /// Legacy octal (`017`) or leading-zero decimal (`08`) numeric literal.
        const LEGACY_OCTAL = 1 << 2;
        /// String contains a legacy octal escape (`\1`) or `\8` / `\9`.
        const OCTAL_ESCAPE = 1 << 3;
        /// Template part contains an escape that has no cooked value.
        const INVALID_TEMPLATE_ESCAPE = 1 << 4;
        /// Numeric literal contains `_` separators.
        const CONTAINS_SEPARATOR = 1 << 5;
        /// Numeric literal is written in hex, octal or binary notation.
        const NON_DECIMAL = 1 << 6;
    }
}
