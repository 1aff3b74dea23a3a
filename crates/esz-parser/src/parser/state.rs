//! Parser state and token plumbing.
//!
//! `ParserState` owns the scanner and the bookkeeping that has to survive
//! across productions (labels, declared names, cover-grammar positions).
//! Grammatical modes are *not* stored here: they travel as a [`Context`]
//! argument through every production.
//!
//! Productions live in sibling modules as further `impl ParserState` blocks:
//! - `state_statements.rs`: statements, declarations, directive prologues
//! - `state_expressions.rs`: expressions and literals
//! - `state_functions.rs`: functions, arrows, parameters
//! - `state_classes.rs`: classes and private names
//! - `state_modules.rs`: `import` / `export`
//! - `cover.rs`: expression-to-pattern promotion
//! - `validate.rs`: identifier and reserved-word checks

use esz_common::diagnostics::diagnostic_codes;
use esz_common::limits::{
    INITIAL_LABEL_STACK_CAPACITY, MAX_EXPRESSION_CHAIN_DEPTH, MAX_PARSER_RECURSION_DEPTH,
};
use esz_common::{Diagnostic, Span};
use esz_scanner::{ScanOptions, ScannerState, SyntaxKind, TokenFlags};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use super::builder::AstBuilder;
use super::node::{Expression, NodeMeta};
use super::options::ParseOptions;
use super::scope::ScopeTracker;

pub type ParseResult<T> = Result<T, Diagnostic>;

// =============================================================================
// Bookkeeping types
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelKind {
    Loop,
    Switch,
    Other,
}

#[derive(Clone, Debug)]
pub struct Label {
    pub name: String,
    pub kind: LabelKind,
    /// Start of the statement the label applies to; consecutive labels on
    /// one statement share it.
    pub statement_start: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrivateNameKind {
    Field,
    Method,
    Getter,
    Setter,
}

#[derive(Clone, Copy, Debug)]
pub struct PrivateNameEntry {
    pub kind: PrivateNameKind,
    pub is_static: bool,
}

/// Private names declared by one class body, plus references waiting for a
/// declaration that may still appear later in the body.
#[derive(Debug, Default)]
pub struct PrivateNameScope {
    pub declared: FxHashMap<String, PrivateNameEntry>,
    pub unresolved: Vec<(String, Span)>,
}

/// Saved cover-grammar positions; see [`ParserState::take_cover_positions`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CoverPositions {
    pub await_pos: Option<u32>,
    pub yield_pos: Option<u32>,
    pub await_ident_pos: Option<u32>,
}

/// Links on the left spine of `expr`: operands, objects, callees and tags.
fn chain_length(mut expr: &Expression) -> u32 {
    let mut length = 0u32;
    loop {
        expr = match expr {
            Expression::BinaryExpression(binary) => &binary.left,
            Expression::LogicalExpression(logical) => &logical.left,
            Expression::MemberExpression(member) => &member.object,
            Expression::CallExpression(call) => &call.callee,
            Expression::TaggedTemplateExpression(tagged) => &tagged.tag,
            Expression::ChainExpression(chain) => &chain.expression,
            _ => return length,
        };
        length += 1;
    }
}

// =============================================================================
// ParserState
// =============================================================================

pub struct ParserState<'a> {
    pub(crate) scanner: ScannerState<'a>,
    pub(crate) source: &'a str,
    pub(crate) options: ParseOptions,
    pub(crate) builder: AstBuilder,
    token: SyntaxKind,
    prev_token_end: u32,
    depth: u32,
    /// Links of the left-nested expression chains currently being folded.
    chain_depth: u32,
    pub(crate) labels: Vec<Label>,
    pub(crate) scopes: ScopeTracker,
    pub(crate) private_names: Vec<PrivateNameScope>,
    /// Spans of expressions that were written inside parentheses.
    pub(crate) parenthesized: FxHashSet<Span>,
    /// Starts of spread elements that were followed by a comma.
    pub(crate) spread_trailing_comma: FxHashSet<u32>,
    /// First `await` expression since the last cover checkpoint.
    pub(crate) await_pos: Option<u32>,
    /// First `yield` expression since the last cover checkpoint.
    pub(crate) yield_pos: Option<u32>,
    /// First `await` used as an identifier since the last cover checkpoint.
    pub(crate) await_ident_pos: Option<u32>,
    /// Start of the token where an arrow function head may begin.
    pub(crate) potential_arrow_at: Option<u32>,
}

impl<'a> ParserState<'a> {
    #[must_use]
    pub fn new(source: &'a str, options: ParseOptions) -> Self {
        let scan_options = ScanOptions {
            html_comments: options.web_compat && !options.source_type.is_module(),
        };
        ParserState {
            scanner: ScannerState::new(source, scan_options),
            source,
            builder: AstBuilder::new(source, &options),
            scopes: ScopeTracker::new(options.source_type.is_module()),
            options,
            token: SyntaxKind::Unknown,
            prev_token_end: 0,
            depth: 0,
            chain_depth: 0,
            labels: Vec::with_capacity(INITIAL_LABEL_STACK_CAPACITY),
            private_names: Vec::new(),
            parenthesized: FxHashSet::default(),
            spread_trailing_comma: FxHashSet::default(),
            await_pos: None,
            yield_pos: None,
            await_ident_pos: None,
            potential_arrow_at: None,
        }
    }

    // =========================================================================
    // Current token
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.token == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_start()
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.token_end()
    }

    #[inline]
    pub(crate) fn token_span(&self) -> Span {
        Span::new(self.token_pos(), self.token_end())
    }

    #[inline]
    pub(crate) fn token_value(&self) -> &str {
        self.scanner.token_value()
    }

    #[inline]
    pub(crate) fn token_flags(&self) -> TokenFlags {
        self.scanner.token_flags()
    }

    /// End of the last consumed token.
    #[inline]
    pub(crate) fn prev_end(&self) -> u32 {
        self.prev_token_end
    }

    #[inline]
    pub(crate) fn has_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    #[inline]
    pub(crate) fn has_escape(&self) -> bool {
        self.scanner.has_unicode_escape()
    }

    #[inline]
    pub(crate) fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.prev_token_end)
    }

    #[inline]
    pub(crate) fn meta(&self, span: Span) -> NodeMeta {
        self.builder.meta(span)
    }

    // =========================================================================
    // Advancing
    // =========================================================================

    pub(crate) fn next_token(&mut self) -> ParseResult<()> {
        self.prev_token_end = self.scanner.token_end();
        self.token = self.scanner.scan()?;
        trace!(token = ?self.token, pos = self.scanner.token_start(), "next_token");
        Ok(())
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> ParseResult<bool> {
        if self.token == kind {
            self.next_token()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> ParseResult<()> {
        if self.token == kind {
            return self.next_token();
        }
        Err(self.expected(kind))
    }

    /// Look at the next token without consuming the current one.
    ///
    /// Returns the kind and whether a line terminator precedes it.
    pub(crate) fn peek(&mut self) -> ParseResult<(SyntaxKind, bool)> {
        let snapshot = self.scanner.save_state();
        let result = self
            .scanner
            .scan()
            .map(|kind| (kind, self.scanner.has_preceding_line_break()));
        self.scanner.restore_state(snapshot);
        result
    }

    /// Re-scan the current `/` or `/=` as a regular expression literal.
    pub(crate) fn re_scan_slash(&mut self) -> ParseResult<()> {
        self.token = self.scanner.re_scan_slash_token()?;
        Ok(())
    }

    /// Re-scan the current `}` as a template continuation.
    pub(crate) fn re_scan_template(&mut self) -> ParseResult<()> {
        self.token = self.scanner.re_scan_template_token()?;
        Ok(())
    }

    // =========================================================================
    // Automatic semicolon insertion
    // =========================================================================

    pub(crate) fn can_insert_semicolon(&self) -> bool {
        matches!(
            self.token,
            SyntaxKind::EndOfFileToken | SyntaxKind::CloseBraceToken
        ) || self.has_line_break()
    }

    /// Consume a `;`, or accept an automatically inserted one.
    pub(crate) fn parse_semicolon(&mut self) -> ParseResult<()> {
        if self.eat(SyntaxKind::SemicolonToken)? || self.can_insert_semicolon() {
            return Ok(());
        }
        Err(self.unexpected())
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn error(&self, code: u32, span: Span, args: &[&str]) -> Diagnostic {
        Diagnostic::new(code, span.start, span.end, args)
    }

    pub(crate) fn unexpected(&self) -> Diagnostic {
        if self.token == SyntaxKind::EndOfFileToken {
            return self.error(
                diagnostic_codes::UNEXPECTED_END_OF_INPUT,
                self.token_span(),
                &[],
            );
        }
        self.error(
            diagnostic_codes::UNEXPECTED_TOKEN,
            self.token_span(),
            &[self.scanner.token_text()],
        )
    }

    pub(crate) fn expected(&self, kind: SyntaxKind) -> Diagnostic {
        if self.token == SyntaxKind::EndOfFileToken {
            return self.unexpected();
        }
        self.error(
            diagnostic_codes::TOKEN_EXPECTED,
            self.token_span(),
            &[kind.text()],
        )
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    pub(crate) fn enter_recursion(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > MAX_PARSER_RECURSION_DEPTH {
            return Err(self.error(diagnostic_codes::NESTING_TOO_DEEP, self.token_span(), &[]));
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Starts folding a chain onto `head`, counting the links `head` already
    /// has. Returns the count to hand back to [`Self::leave_chain`].
    pub(crate) fn enter_chain(&mut self, head: &Expression) -> ParseResult<u32> {
        let saved = self.chain_depth;
        self.chain_depth = saved.saturating_add(chain_length(head));
        self.check_chain_depth()?;
        Ok(saved)
    }

    pub(crate) fn extend_chain(&mut self) -> ParseResult<()> {
        self.chain_depth += 1;
        self.check_chain_depth()
    }

    #[inline]
    pub(crate) fn leave_chain(&mut self, saved: u32) {
        self.chain_depth = saved;
    }

    fn check_chain_depth(&self) -> ParseResult<()> {
        if self.chain_depth > MAX_EXPRESSION_CHAIN_DEPTH {
            return Err(self.error(diagnostic_codes::NESTING_TOO_DEEP, self.token_span(), &[]));
        }
        Ok(())
    }

    // =========================================================================
    // Cover-grammar positions
    // =========================================================================

    /// Reset the `await`/`yield` positions, returning the previous values.
    ///
    /// Called before parsing anything that may turn out to be a parameter
    /// list, so that positions seen inside it can be attributed to it.
    pub(crate) fn take_cover_positions(&mut self) -> CoverPositions {
        CoverPositions {
            await_pos: self.await_pos.take(),
            yield_pos: self.yield_pos.take(),
            await_ident_pos: self.await_ident_pos.take(),
        }
    }

    /// Restore saved positions, discarding those recorded since.
    pub(crate) fn restore_cover_positions(&mut self, saved: CoverPositions) {
        self.await_pos = saved.await_pos;
        self.yield_pos = saved.yield_pos;
        self.await_ident_pos = saved.await_ident_pos;
    }

    /// Restore saved positions, keeping the earliest of old and new.
    pub(crate) fn merge_cover_positions(&mut self, saved: CoverPositions) {
        self.await_pos = saved.await_pos.or(self.await_pos);
        self.yield_pos = saved.yield_pos.or(self.yield_pos);
        self.await_ident_pos = saved.await_ident_pos.or(self.await_ident_pos);
    }

    #[inline]
    pub(crate) fn is_parenthesized(&self, span: Span) -> bool {
        self.parenthesized.contains(&span)
    }
}
