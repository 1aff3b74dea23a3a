//! Parser state - functions, arrows, parameters and binding patterns

use esz_common::diagnostics::diagnostic_codes;
use esz_common::{Diagnostic, Span, Spanned};
use esz_scanner::SyntaxKind;
use rustc_hash::FxHashSet;
use tracing::trace;

use super::context::Context;
use super::node::{
    ArrayPattern, ArrowBody, ArrowFunctionExpression, AssignmentPattern, AssignmentProperty,
    BlockStatement, Expression, Function, FunctionKind, Identifier, ObjectPattern,
    ObjectPatternMember, Pattern, PropertyKind, RestElement,
};
use super::scope::{BindingKind, ScopeFlags};
use super::state::{CoverPositions, Label, ParseResult, ParserState};
use super::validate::IdentifierUse;

/// What kind of method an object literal or class body is declaring.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MethodShape {
    pub kind: PropertyKind,
    pub is_async: bool,
    pub generator: bool,
    /// Constructor of a class with `extends`: `super()` is allowed.
    pub derived_constructor: bool,
}

/// Parameter rules differ between plain functions, methods and arrows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FunctionFlavor {
    Plain,
    Method,
    Arrow,
}

/// Parser bookkeeping that does not cross a function boundary.
struct SavedFunctionState {
    labels: Vec<Label>,
    positions: CoverPositions,
}

impl<'a> ParserState<'a> {
    // =========================================================================
    // Function boundaries
    // =========================================================================

    fn enter_function(&mut self) -> SavedFunctionState {
        self.scopes.enter(ScopeFlags::FUNCTION);
        SavedFunctionState {
            labels: std::mem::take(&mut self.labels),
            positions: self.take_cover_positions(),
        }
    }

    fn exit_function(&mut self, saved: SavedFunctionState) {
        self.scopes.exit();
        self.labels = saved.labels;
        self.restore_cover_positions(saved.positions);
    }

    // =========================================================================
    // Parse Methods - Function declarations and expressions
    // =========================================================================

    /// Parse a function declaration starting at `function` (or `async`).
    ///
    /// The name is optional only for `export default function () {}`.
    pub(crate) fn parse_function_declaration(
        &mut self,
        ctx: Context,
        is_async: bool,
        name_required: bool,
    ) -> ParseResult<Function> {
        let start = self.token_pos();
        if is_async {
            self.next_token()?;
        }
        self.expect(SyntaxKind::FunctionKeyword)?;
        let generator = self.eat(SyntaxKind::AsteriskToken)?;

        let id = if self.token().is_identifier_or_keyword() {
            let id = self.parse_binding_identifier(ctx)?;
            let sloppy_plain = !ctx.is_strict() && !is_async && !generator;
            self.scopes.declare_function(&id.name, sloppy_plain, id.span)?;
            Some(id)
        } else if name_required {
            return Err(self.error(
                diagnostic_codes::FUNCTION_NAME_EXPECTED,
                self.token_span(),
                &[],
            ));
        } else {
            None
        };

        self.parse_function_rest(
            ctx,
            start,
            id,
            is_async,
            generator,
            FunctionKind::FunctionDeclaration,
        )
    }

    /// Parse a function expression starting at `function` (or `async`).
    pub(crate) fn parse_function_expression(
        &mut self,
        ctx: Context,
        start: u32,
        is_async: bool,
    ) -> ParseResult<Expression> {
        if is_async {
            self.next_token()?;
        }
        self.expect(SyntaxKind::FunctionKeyword)?;
        let generator = self.eat(SyntaxKind::AsteriskToken)?;

        // The name of a function expression is bound inside the function, so
        // `yield`/`await` rules come from the function itself.
        let id = if self.token().is_identifier_or_keyword() {
            Some(self.parse_binding_identifier(ctx.for_function(is_async, generator))?)
        } else {
            None
        };

        let function = self.parse_function_rest(
            ctx,
            start,
            id,
            is_async,
            generator,
            FunctionKind::FunctionExpression,
        )?;
        Ok(Expression::FunctionExpression(Box::new(function)))
    }

    fn parse_function_rest(
        &mut self,
        ctx: Context,
        start: u32,
        id: Option<Identifier>,
        is_async: bool,
        generator: bool,
        kind: FunctionKind,
    ) -> ParseResult<Function> {
        let fn_ctx = ctx.for_function(is_async, generator);
        let saved = self.enter_function();
        let params = self.parse_formal_parameters(fn_ctx | Context::IN_PARAMETERS)?;
        let body = self.parse_function_body(fn_ctx, id.as_ref(), &params, FunctionFlavor::Plain)?;
        self.exit_function(saved);

        let span = self.span_from(start);
        Ok(Function {
            kind,
            span,
            meta: self.meta(span),
            id,
            params,
            body,
            is_async,
            generator,
            expression: false,
        })
    }

    /// Parse the parameters and body of an object or class method, starting
    /// at `(`.
    pub(crate) fn parse_method(&mut self, ctx: Context, shape: MethodShape) -> ParseResult<Function> {
        let start = self.token_pos();
        let mut fn_ctx =
            ctx.for_function(shape.is_async, shape.generator) | Context::ALLOW_SUPER_PROPERTY;
        if shape.derived_constructor {
            fn_ctx |= Context::ALLOW_SUPER_CALL;
        }

        let saved = self.enter_function();
        let params = self.parse_formal_parameters(fn_ctx | Context::IN_PARAMETERS)?;
        let list_span = self.span_from(start);
        match shape.kind {
            PropertyKind::Get => {
                if !params.is_empty() {
                    return Err(self.error(diagnostic_codes::GETTER_PARAMETERS, list_span, &[]));
                }
            }
            PropertyKind::Set => {
                if params.len() != 1 {
                    return Err(self.error(diagnostic_codes::SETTER_PARAMETERS, list_span, &[]));
                }
                if let Some(Pattern::RestElement(rest)) = params.first() {
                    return Err(self.error(
                        diagnostic_codes::SETTER_REST_PARAMETER,
                        rest.span,
                        &[],
                    ));
                }
            }
            PropertyKind::Init => {}
        }
        let body = self.parse_function_body(fn_ctx, None, &params, FunctionFlavor::Method)?;
        self.exit_function(saved);

        let span = self.span_from(start);
        Ok(Function {
            kind: FunctionKind::FunctionExpression,
            span,
            meta: self.meta(span),
            id: None,
            params,
            body,
            is_async: shape.is_async,
            generator: shape.generator,
            expression: false,
        })
    }

    // =========================================================================
    // Parse Methods - Arrow functions
    // =========================================================================

    /// Parse `=> body` for parameters already converted from a cover list.
    pub(crate) fn parse_arrow_function(
        &mut self,
        ctx: Context,
        start: u32,
        params: Vec<Pattern>,
        is_async: bool,
    ) -> ParseResult<Expression> {
        let arrow_ctx = ctx.for_arrow(is_async);
        self.expect(SyntaxKind::EqualsGreaterThanToken)?;

        let saved = self.enter_function();
        let (body, expression) = if self.is_token(SyntaxKind::OpenBraceToken) {
            let block =
                self.parse_function_body(arrow_ctx.and_in(true), None, &params, FunctionFlavor::Arrow)?;
            (ArrowBody::Block(Box::new(block)), false)
        } else {
            self.declare_parameters(arrow_ctx, None, &params, FunctionFlavor::Arrow, None)?;
            let body = self.parse_assignment_expression(arrow_ctx.and_in(ctx.has_in()))?;
            (ArrowBody::Expression(body), true)
        };
        self.exit_function(saved);

        let span = self.span_from(start);
        Ok(Expression::ArrowFunctionExpression(Box::new(
            ArrowFunctionExpression {
                span,
                meta: self.meta(span),
                id: None,
                params,
                body,
                is_async,
                expression,
            },
        )))
    }

    /// `x => body` or `async x => body` after the identifier was parsed as a
    /// reference.
    pub(crate) fn parse_arrow_from_identifier(
        &mut self,
        ctx: Context,
        start: u32,
        id: Identifier,
        is_async: bool,
    ) -> ParseResult<Expression> {
        let param =
            self.to_arrow_param_identifier(id, ctx.for_arrow(is_async) | Context::IN_PARAMETERS)?;
        self.parse_arrow_function(ctx, start, vec![param], is_async)
    }

    // =========================================================================
    // Parse Methods - Parameters and bodies
    // =========================================================================

    /// `( FormalParameters )`. `ctx` already has `IN_PARAMETERS` set.
    fn parse_formal_parameters(&mut self, ctx: Context) -> ParseResult<Vec<Pattern>> {
        self.expect(SyntaxKind::OpenParenToken)?;
        let mut params = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken) {
            if self.is_token(SyntaxKind::DotDotDotToken) {
                let rest = self.parse_rest_binding(ctx)?;
                if self.is_token(SyntaxKind::CommaToken) {
                    return Err(self.misplaced_rest(rest.span(), SyntaxKind::CloseParenToken)?);
                }
                params.push(rest);
                break;
            }
            params.push(self.parse_binding_element(ctx)?);
            if !self.is_token(SyntaxKind::CloseParenToken) {
                self.expect(SyntaxKind::CommaToken)?;
            }
        }
        self.expect(SyntaxKind::CloseParenToken)?;
        Ok(params)
    }

    /// Diagnostic for a rest element followed by a comma: a trailing comma if
    /// `close` comes next, otherwise a rest element that is not last.
    fn misplaced_rest(
        &mut self,
        rest: Span,
        close: SyntaxKind,
    ) -> ParseResult<Diagnostic> {
        let (next, _) = self.peek()?;
        let code = if next == close {
            diagnostic_codes::REST_TRAILING_COMMA
        } else {
            diagnostic_codes::REST_ELEMENT_MUST_BE_LAST
        };
        Ok(self.error(code, rest, &[]))
    }

    /// `{ FunctionBody }` of a function, method or block-bodied arrow.
    ///
    /// Parameters are declared in the function scope here, after the
    /// directive prologue has decided whether the body is strict.
    fn parse_function_body(
        &mut self,
        fn_ctx: Context,
        id: Option<&Identifier>,
        params: &[Pattern],
        flavor: FunctionFlavor,
    ) -> ParseResult<BlockStatement> {
        let start = self.token_pos();
        self.expect(SyntaxKind::OpenBraceToken)?;
        let prologue = self.parse_directive_prologue(fn_ctx)?;
        let body_ctx = prologue.ctx;
        self.declare_parameters(body_ctx, id, params, flavor, prologue.use_strict)?;
        if body_ctx.is_strict() && !fn_ctx.is_strict() {
            trace!(start, "function body switched to strict mode");
        }

        let mut body = prologue.statements;
        self.parse_statement_list(body_ctx, &mut body, SyntaxKind::CloseBraceToken)?;
        self.expect(SyntaxKind::CloseBraceToken)?;
        let span = self.span_from(start);
        Ok(BlockStatement {
            span,
            meta: self.meta(span),
            body,
        })
    }

    /// Declare parameter names and apply the checks that depend on the body:
    /// duplicates, `"use strict"` with non-simple parameters, and reserved
    /// names once the body turned out strict.
    fn declare_parameters(
        &mut self,
        body_ctx: Context,
        id: Option<&Identifier>,
        params: &[Pattern],
        flavor: FunctionFlavor,
        use_strict: Option<Span>,
    ) -> ParseResult<()> {
        let simple = params.iter().all(Pattern::is_simple_parameter);
        if let Some(directive) = use_strict {
            if !simple {
                return Err(self.error(
                    diagnostic_codes::USE_STRICT_WITH_NON_SIMPLE_PARAMETERS,
                    directive,
                    &[],
                ));
            }
        }

        // Names were validated against the enclosing strictness while
        // parsing; a body-level "use strict" applies to them retroactively.
        let recheck = use_strict.is_some();
        if recheck {
            if let Some(id) = id {
                // The name's own `await`/`yield` rules were applied when it
                // was parsed; only strictness is new here.
                let name_ctx = body_ctx - (Context::IN_ASYNC | Context::IN_GENERATOR);
                self.check_identifier(&id.name, id.span, false, name_ctx, IdentifierUse::Binding)?;
            }
        }

        let allow_duplicates =
            flavor == FunctionFlavor::Plain && simple && !body_ctx.is_strict();
        let mut names = Vec::new();
        for param in params {
            param.bound_names(&mut names);
        }
        let mut seen = FxHashSet::default();
        for name in names {
            if recheck {
                self.check_identifier(
                    &name.name,
                    name.span,
                    false,
                    body_ctx,
                    IdentifierUse::Binding,
                )?;
            }
            if !seen.insert(name.name.as_str()) && !allow_duplicates {
                return Err(self.error(
                    diagnostic_codes::DUPLICATE_PARAMETER,
                    name.span,
                    &[&name.name],
                ));
            }
            self.scopes.declare(&name.name, BindingKind::Var, name.span)?;
        }
        Ok(())
    }

    // =========================================================================
    // Parse Methods - Binding patterns
    // =========================================================================

    /// `BindingIdentifier`, `ArrayBindingPattern` or `ObjectBindingPattern`.
    pub(crate) fn parse_binding_target(&mut self, ctx: Context) -> ParseResult<Pattern> {
        self.enter_recursion()?;
        let result = match self.token() {
            SyntaxKind::OpenBracketToken => self.parse_array_binding(ctx),
            SyntaxKind::OpenBraceToken => self.parse_object_binding(ctx),
            _ => self
                .parse_binding_identifier(ctx)
                .map(|id| Pattern::Identifier(Box::new(id))),
        };
        self.exit_recursion();
        result
    }

    /// Binding target with an optional `= default`.
    pub(crate) fn parse_binding_element(&mut self, ctx: Context) -> ParseResult<Pattern> {
        let start = self.token_pos();
        let target = self.parse_binding_target(ctx)?;
        if !self.eat(SyntaxKind::EqualsToken)? {
            return Ok(target);
        }
        let right = self.parse_assignment_expression(ctx.and_in(true))?;
        let span = self.span_from(start);
        Ok(Pattern::AssignmentPattern(Box::new(AssignmentPattern {
            span,
            meta: self.meta(span),
            left: target,
            right,
        })))
    }

    fn parse_rest_binding(&mut self, ctx: Context) -> ParseResult<Pattern> {
        let start = self.token_pos();
        self.expect(SyntaxKind::DotDotDotToken)?;
        let argument = self.parse_binding_target(ctx)?;
        if self.is_token(SyntaxKind::EqualsToken) {
            return Err(self.error(diagnostic_codes::REST_INITIALIZER, self.token_span(), &[]));
        }
        let span = self.span_from(start);
        Ok(Pattern::RestElement(Box::new(RestElement {
            span,
            meta: self.meta(span),
            argument,
        })))
    }

    fn parse_array_binding(&mut self, ctx: Context) -> ParseResult<Pattern> {
        let start = self.token_pos();
        self.expect(SyntaxKind::OpenBracketToken)?;
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken) {
            if self.eat(SyntaxKind::CommaToken)? {
                elements.push(None);
                continue;
            }
            if self.is_token(SyntaxKind::DotDotDotToken) {
                let rest = self.parse_rest_binding(ctx)?;
                if self.is_token(SyntaxKind::CommaToken) {
                    return Err(self.misplaced_rest(rest.span(), SyntaxKind::CloseBracketToken)?);
                }
                elements.push(Some(rest));
                break;
            }
            elements.push(Some(self.parse_binding_element(ctx)?));
            if !self.is_token(SyntaxKind::CloseBracketToken) {
                self.expect(SyntaxKind::CommaToken)?;
            }
        }
        self.expect(SyntaxKind::CloseBracketToken)?;
        let span = self.span_from(start);
        Ok(Pattern::ArrayPattern(Box::new(ArrayPattern {
            span,
            meta: self.meta(span),
            elements,
        })))
    }

    fn parse_object_binding(&mut self, ctx: Context) -> ParseResult<Pattern> {
        let start = self.token_pos();
        self.expect(SyntaxKind::OpenBraceToken)?;
        let mut properties = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            if self.is_token(SyntaxKind::DotDotDotToken) {
                let rest_start = self.token_pos();
                self.next_token()?;
                let id = self.parse_binding_identifier(ctx)?;
                let span = self.span_from(rest_start);
                if self.is_token(SyntaxKind::CommaToken) {
                    return Err(self.misplaced_rest(span, SyntaxKind::CloseBraceToken)?);
                }
                properties.push(ObjectPatternMember::RestElement(Box::new(RestElement {
                    span,
                    meta: self.meta(span),
                    argument: Pattern::Identifier(Box::new(id)),
                })));
                break;
            }
            properties.push(ObjectPatternMember::Property(Box::new(
                self.parse_binding_property(ctx)?,
            )));
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                self.expect(SyntaxKind::CommaToken)?;
            }
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        let span = self.span_from(start);
        Ok(Pattern::ObjectPattern(Box::new(ObjectPattern {
            span,
            meta: self.meta(span),
            properties,
        })))
    }

    fn parse_binding_property(&mut self, ctx: Context) -> ParseResult<AssignmentProperty> {
        let start = self.token_pos();
        let escaped = self.has_escape();
        let (key, computed) = self.parse_property_key(ctx)?;

        if self.eat(SyntaxKind::ColonToken)? {
            let value = self.parse_binding_element(ctx)?;
            let span = self.span_from(start);
            return Ok(AssignmentProperty {
                span,
                meta: self.meta(span),
                key,
                value,
                kind: PropertyKind::Init,
                computed,
                method: false,
                shorthand: false,
            });
        }

        let id = match &key {
            Expression::Identifier(id) if !computed => (**id).clone(),
            _ => return Err(self.unexpected()),
        };
        self.check_identifier(&id.name, id.span, escaped, ctx, IdentifierUse::Binding)?;
        let value = if self.eat(SyntaxKind::EqualsToken)? {
            let right = self.parse_assignment_expression(ctx.and_in(true))?;
            let span = self.span_from(id.span.start);
            Pattern::AssignmentPattern(Box::new(AssignmentPattern {
                span,
                meta: self.meta(span),
                left: Pattern::Identifier(Box::new(id)),
                right,
            }))
        } else {
            Pattern::Identifier(Box::new(id))
        };
        let span = self.span_from(start);
        Ok(AssignmentProperty {
            span,
            meta: self.meta(span),
            key,
            value,
            kind: PropertyKind::Init,
            computed: false,
            method: false,
            shorthand: true,
        })
    }
}
