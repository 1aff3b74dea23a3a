//! Centralized limits and thresholds for the scanner and parser.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum depth for parser recursion.
///
/// Prevents stack overflow when parsing deeply nested source code. The parser
/// counts nested statements and expressions and returns a `NESTING_TOO_DEEP`
/// diagnostic when this limit is exceeded. Used in `parser/state.rs`.
///
/// # JavaScript example
///
/// ```javascript
/// // Deeply nested parenthesized expressions:
/// const x = ((((((((((((((((((((((((((((((1)))))))))))))))))))))))))))))));
///
/// // Deeply nested arrays and calls:
/// f([[[[[[[[[[[[[[[[[/* ... */]]]]]]]]]]]]]]]]]);
///
/// // Deeply nested blocks:
/// {{{{{{{{{{{{{{{{{{{{ /* ... */ }}}}}}}}}}}}}}}}}}}}
/// ```
///
/// Each nesting level costs several frames (assignment, conditional, binary,
/// unary, call, primary), so the limit is kept well below what a default 8 MiB
/// main-thread stack can sustain.
pub const MAX_PARSER_RECURSION_DEPTH: u32 = 256;

/// Maximum length of a left-nested expression chain.
///
/// Operator and member chains are folded in a loop, so parsing them costs no
/// stack, but the tree they produce is as deep as the chain is long and is
/// dropped and serialized recursively. The parser counts the links of a chain,
/// including those of a parenthesized head, and returns `NESTING_TOO_DEEP`
/// past this limit.
///
/// ```javascript
/// x = a + a + a + a + /* ... */ a;
/// x = a.b.c.d /* ... */ .z;
/// ```
pub const MAX_EXPRESSION_CHAIN_DEPTH: u32 = 1024;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Largest source accepted by the scanner, in bytes.
///
/// Spans store `u32` byte offsets; anything larger cannot be addressed.
pub const MAX_SOURCE_LENGTH: usize = u32::MAX as usize;

/// Initial capacity of the statement list of a `Program` body.
///
/// Most inputs are short snippets; this avoids a handful of reallocations
/// for typical modules without over-allocating for one-liners.
pub const INITIAL_PROGRAM_STATEMENT_CAPACITY: usize = 16;

/// Depth of label nesting pre-allocated for the label stack.
pub const INITIAL_LABEL_STACK_CAPACITY: usize = 4;
