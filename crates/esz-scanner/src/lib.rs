//! ECMAScript scanner/tokenizer for the esz parser.
//!
//! The scanner produces one token at a time on demand. It never decides
//! whether `/` starts a regular expression or whether `}` resumes a template:
//! the parser asks for a re-scan at the points where the grammar knows.

pub mod char_codes;

pub mod syntax_kind;
pub use syntax_kind::{SyntaxKind, text_to_keyword};

pub mod token_flags;
pub use token_flags::TokenFlags;

pub mod scanner;
pub use scanner::{ScanOptions, ScannerSnapshot, ScannerState};
