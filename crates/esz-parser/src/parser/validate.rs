//! Identifier validation.
//!
//! Every place that turns a token into an `IdentifierReference`,
//! `BindingIdentifier` or `LabelIdentifier` goes through
//! [`ParserState::check_identifier`], so reserved-word rules for `yield`,
//! `await`, `let`, strict-mode future reserved words and escaped keywords
//! live in one table lookup.

use esz_common::diagnostics::diagnostic_codes;
use esz_common::Span;
use esz_scanner::text_to_keyword;

use super::context::Context;
use super::node::Identifier;
use super::state::{ParseResult, ParserState};

/// How an identifier is being used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentifierUse {
    Reference,
    Binding,
    Label,
}

impl<'a> ParserState<'a> {
    /// `IdentifierName`: any identifier or keyword, as after `.` or in a
    /// property key. Not validated.
    pub(crate) fn parse_identifier_name(&mut self) -> ParseResult<Identifier> {
        if !self.token().is_identifier_or_keyword() {
            return Err(self.unexpected());
        }
        let span = self.token_span();
        let name = self.token_value().to_string();
        self.next_token()?;
        Ok(Identifier {
            span,
            meta: self.meta(span),
            name,
        })
    }

    pub(crate) fn parse_identifier_reference(&mut self, ctx: Context) -> ParseResult<Identifier> {
        self.parse_checked_identifier(ctx, IdentifierUse::Reference)
    }

    pub(crate) fn parse_binding_identifier(&mut self, ctx: Context) -> ParseResult<Identifier> {
        self.parse_checked_identifier(ctx, IdentifierUse::Binding)
    }

    pub(crate) fn parse_label_identifier(&mut self, ctx: Context) -> ParseResult<Identifier> {
        self.parse_checked_identifier(ctx, IdentifierUse::Label)
    }

    fn parse_checked_identifier(
        &mut self,
        ctx: Context,
        usage: IdentifierUse,
    ) -> ParseResult<Identifier> {
        let kind = self.token();
        if !kind.is_identifier_like() {
            if kind.is_reserved_word() {
                let name = self.token_value().to_string();
                return Err(self.error(
                    diagnostic_codes::RESERVED_WORD,
                    self.token_span(),
                    &[&name],
                ));
            }
            return Err(self.unexpected());
        }
        let span = self.token_span();
        let name = self.token_value().to_string();
        let escaped = self.has_escape();
        self.check_identifier(&name, span, escaped, ctx, usage)?;
        self.next_token()?;
        Ok(Identifier {
            span,
            meta: self.meta(span),
            name,
        })
    }

    /// Validate `name` against the reserved words of `ctx`.
    pub(crate) fn check_identifier(
        &mut self,
        name: &str,
        span: Span,
        escaped: bool,
        ctx: Context,
        usage: IdentifierUse,
    ) -> ParseResult<()> {
        if let Some(keyword) = text_to_keyword(name) {
            if keyword.is_reserved_word() {
                let code = if escaped {
                    diagnostic_codes::ESCAPED_KEYWORD
                } else {
                    diagnostic_codes::RESERVED_WORD
                };
                return Err(self.error(code, span, &[name]));
            }
            if ctx.is_strict() && keyword.is_strict_mode_reserved_word() {
                return Err(self.error(diagnostic_codes::STRICT_RESERVED_WORD, span, &[name]));
            }
        }

        match name {
            "yield" if ctx.yield_is_keyword() => {
                return Err(self.error(
                    diagnostic_codes::YIELD_IDENTIFIER_IN_GENERATOR,
                    span,
                    &[],
                ));
            }
            "await" => {
                if ctx.intersects(Context::IN_ASYNC | Context::TOP_LEVEL_AWAIT) {
                    return Err(self.error(
                        diagnostic_codes::AWAIT_IDENTIFIER_IN_ASYNC,
                        span,
                        &[],
                    ));
                }
                if ctx.is_module() {
                    return Err(self.error(diagnostic_codes::AWAIT_IN_MODULE, span, &[]));
                }
                if ctx.contains(Context::IN_STATIC_BLOCK) {
                    return Err(self.error(diagnostic_codes::RESERVED_WORD, span, &[name]));
                }
                self.await_ident_pos.get_or_insert(span.start);
            }
            "arguments"
                if usage == IdentifierUse::Reference && ctx.contains(Context::IN_CLASS_FIELD) =>
            {
                return Err(self.error(diagnostic_codes::ARGUMENTS_IN_CLASS_FIELD, span, &[]));
            }
            "eval" | "arguments" if usage == IdentifierUse::Binding && ctx.is_strict() => {
                return Err(self.error(
                    diagnostic_codes::EVAL_OR_ARGUMENTS_IN_STRICT_MODE,
                    span,
                    &[name],
                ));
            }
            _ => {}
        }
        Ok(())
    }

    /// Assignment to `eval` or `arguments` is a strict-mode error.
    pub(crate) fn check_simple_assignment_name(
        &self,
        id: &Identifier,
        ctx: Context,
    ) -> ParseResult<()> {
        if ctx.is_strict() && matches!(id.name.as_str(), "eval" | "arguments") {
            return Err(self.error(
                diagnostic_codes::EVAL_OR_ARGUMENTS_IN_STRICT_MODE,
                id.span,
                &[&id.name],
            ));
        }
        Ok(())
    }

    /// `let` is never a valid lexically bound name.
    pub(crate) fn check_lexical_name(&self, id: &Identifier) -> ParseResult<()> {
        if id.name == "let" {
            return Err(self.error(diagnostic_codes::LET_IN_LEXICAL_BINDING, id.span, &[]));
        }
        Ok(())
    }
}
