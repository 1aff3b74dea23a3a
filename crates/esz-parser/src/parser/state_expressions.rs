//! Parser state - expression parsing methods

use esz_common::diagnostics::diagnostic_codes;
use esz_common::{Span, Spanned};
use esz_scanner::{SyntaxKind, TokenFlags};

use super::context::Context;
use super::cover::CoverGrammar;
use super::node::{
    ArrayElement, ArrayExpression, AssignmentExpression, AssignmentOperator, AwaitExpression,
    BinaryExpression, BinaryOperator, CallExpression, ChainExpression, ClassKind,
    ConditionalExpression, Expression, Identifier, ImportExpression, Literal, LiteralValue,
    LogicalExpression, LogicalOperator, MemberExpression, MetaProperty, NewExpression,
    ObjectExpression, ObjectMember, PrivateIdentifier, Property, PropertyKind, RegExpValue,
    SequenceExpression, SpreadElement, Super, TaggedTemplateExpression, TemplateElement,
    TemplateElementValue, TemplateLiteral, ThisExpression, UnaryExpression, UnaryOperator,
    UpdateExpression, UpdateOperator, YieldExpression,
};
use super::state::{ParseResult, ParserState};
use super::state_functions::MethodShape;
use super::validate::IdentifierUse;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BinaryOp {
    Binary(BinaryOperator),
    Logical(LogicalOperator),
}

/// Precedence and operator of a binary token; higher binds tighter.
fn binary_operator(kind: SyntaxKind, ctx: Context) -> Option<(u8, BinaryOp)> {
    use BinaryOp::{Binary, Logical};
    let entry = match kind {
        SyntaxKind::QuestionQuestionToken => (1, Logical(LogicalOperator::Coalesce)),
        SyntaxKind::BarBarToken => (1, Logical(LogicalOperator::Or)),
        SyntaxKind::AmpersandAmpersandToken => (2, Logical(LogicalOperator::And)),
        SyntaxKind::BarToken => (3, Binary(BinaryOperator::BitwiseOr)),
        SyntaxKind::CaretToken => (4, Binary(BinaryOperator::BitwiseXor)),
        SyntaxKind::AmpersandToken => (5, Binary(BinaryOperator::BitwiseAnd)),
        SyntaxKind::EqualsEqualsToken => (6, Binary(BinaryOperator::Equal)),
        SyntaxKind::ExclamationEqualsToken => (6, Binary(BinaryOperator::NotEqual)),
        SyntaxKind::EqualsEqualsEqualsToken => (6, Binary(BinaryOperator::StrictEqual)),
        SyntaxKind::ExclamationEqualsEqualsToken => (6, Binary(BinaryOperator::StrictNotEqual)),
        SyntaxKind::LessThanToken => (7, Binary(BinaryOperator::LessThan)),
        SyntaxKind::GreaterThanToken => (7, Binary(BinaryOperator::GreaterThan)),
        SyntaxKind::LessThanEqualsToken => (7, Binary(BinaryOperator::LessThanOrEqual)),
        SyntaxKind::GreaterThanEqualsToken => (7, Binary(BinaryOperator::GreaterThanOrEqual)),
        SyntaxKind::InstanceOfKeyword => (7, Binary(BinaryOperator::Instanceof)),
        SyntaxKind::InKeyword if ctx.has_in() => (7, Binary(BinaryOperator::In)),
        SyntaxKind::LessThanLessThanToken => (8, Binary(BinaryOperator::ShiftLeft)),
        SyntaxKind::GreaterThanGreaterThanToken => (8, Binary(BinaryOperator::ShiftRight)),
        SyntaxKind::GreaterThanGreaterThanGreaterThanToken => {
            (8, Binary(BinaryOperator::ShiftRightUnsigned))
        }
        SyntaxKind::PlusToken => (9, Binary(BinaryOperator::Add)),
        SyntaxKind::MinusToken => (9, Binary(BinaryOperator::Subtract)),
        SyntaxKind::AsteriskToken => (10, Binary(BinaryOperator::Multiply)),
        SyntaxKind::SlashToken => (10, Binary(BinaryOperator::Divide)),
        SyntaxKind::PercentToken => (10, Binary(BinaryOperator::Remainder)),
        _ => return None,
    };
    Some(entry)
}

fn assignment_operator(kind: SyntaxKind) -> Option<AssignmentOperator> {
    Some(match kind {
        SyntaxKind::EqualsToken => AssignmentOperator::Assign,
        SyntaxKind::PlusEqualsToken => AssignmentOperator::Add,
        SyntaxKind::MinusEqualsToken => AssignmentOperator::Subtract,
        SyntaxKind::AsteriskEqualsToken => AssignmentOperator::Multiply,
        SyntaxKind::SlashEqualsToken => AssignmentOperator::Divide,
        SyntaxKind::PercentEqualsToken => AssignmentOperator::Remainder,
        SyntaxKind::AsteriskAsteriskEqualsToken => AssignmentOperator::Exponent,
        SyntaxKind::LessThanLessThanEqualsToken => AssignmentOperator::ShiftLeft,
        SyntaxKind::GreaterThanGreaterThanEqualsToken => AssignmentOperator::ShiftRight,
        SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => {
            AssignmentOperator::ShiftRightUnsigned
        }
        SyntaxKind::BarEqualsToken => AssignmentOperator::BitwiseOr,
        SyntaxKind::CaretEqualsToken => AssignmentOperator::BitwiseXor,
        SyntaxKind::AmpersandEqualsToken => AssignmentOperator::BitwiseAnd,
        SyntaxKind::BarBarEqualsToken => AssignmentOperator::LogicalOr,
        SyntaxKind::AmpersandAmpersandEqualsToken => AssignmentOperator::LogicalAnd,
        SyntaxKind::QuestionQuestionEqualsToken => AssignmentOperator::LogicalNullish,
        _ => return None,
    })
}

fn unary_operator(kind: SyntaxKind) -> Option<UnaryOperator> {
    Some(match kind {
        SyntaxKind::MinusToken => UnaryOperator::Minus,
        SyntaxKind::PlusToken => UnaryOperator::Plus,
        SyntaxKind::ExclamationToken => UnaryOperator::Not,
        SyntaxKind::TildeToken => UnaryOperator::BitwiseNot,
        SyntaxKind::TypeOfKeyword => UnaryOperator::Typeof,
        SyntaxKind::VoidKeyword => UnaryOperator::Void,
        SyntaxKind::DeleteKeyword => UnaryOperator::Delete,
        _ => return None,
    })
}

/// Token after `get`, `set` or `async` that makes it a modifier rather than
/// a property named `get`/`set`/`async`.
pub(crate) fn starts_property_name(kind: SyntaxKind) -> bool {
    kind.is_identifier_or_keyword()
        || matches!(
            kind,
            SyntaxKind::StringLiteral
                | SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::PrivateIdentifier
        )
}

fn is_private_member(expr: &Expression) -> bool {
    match expr {
        Expression::MemberExpression(member) => {
            matches!(member.property, Expression::PrivateIdentifier(_))
        }
        Expression::ChainExpression(chain) => is_private_member(&chain.expression),
        _ => false,
    }
}

impl<'a> ParserState<'a> {
    // =========================================================================
    // Parse Methods - Comma and assignment
    // =========================================================================

    /// `Expression`: one or more assignment expressions separated by commas.
    pub(crate) fn parse_expression(&mut self, ctx: Context) -> ParseResult<Expression> {
        let start = self.token_pos();
        let first = self.parse_assignment_expression(ctx)?;
        self.parse_sequence_rest(ctx, start, first, None)
    }

    /// `Expression` whose pattern-only constructs are left in `cover` for
    /// the caller to claim or report (used by `for` heads).
    pub(crate) fn parse_expression_cover(
        &mut self,
        ctx: Context,
        cover: &mut CoverGrammar,
    ) -> ParseResult<Expression> {
        let start = self.token_pos();
        let first = self.parse_assignment_cover(ctx, Some(&mut *cover))?;
        self.parse_sequence_rest(ctx, start, first, Some(cover))
    }

    fn parse_sequence_rest(
        &mut self,
        ctx: Context,
        start: u32,
        first: Expression,
        mut cover: Option<&mut CoverGrammar>,
    ) -> ParseResult<Expression> {
        if !self.is_token(SyntaxKind::CommaToken) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat(SyntaxKind::CommaToken)? {
            expressions.push(self.parse_assignment_cover(ctx, cover.as_deref_mut())?);
        }
        let span = self.span_from(start);
        Ok(Expression::SequenceExpression(Box::new(SequenceExpression {
            span,
            meta: self.meta(span),
            expressions,
        })))
    }

    pub(crate) fn parse_assignment_expression(&mut self, ctx: Context) -> ParseResult<Expression> {
        self.parse_assignment_cover(ctx, None)
    }

    /// `AssignmentExpression`. With `cover` given, pattern-only constructs
    /// that do not end up on the left of `=` stay recorded there; without
    /// it they are reported before returning.
    pub(crate) fn parse_assignment_cover(
        &mut self,
        ctx: Context,
        cover: Option<&mut CoverGrammar>,
    ) -> ParseResult<Expression> {
        self.enter_recursion()?;
        let result = self.parse_assignment_inner(ctx, cover);
        self.exit_recursion();
        result
    }

    fn parse_assignment_inner(
        &mut self,
        ctx: Context,
        outer: Option<&mut CoverGrammar>,
    ) -> ParseResult<Expression> {
        if self.is_token(SyntaxKind::YieldKeyword) && ctx.yield_is_keyword() {
            return self.parse_yield_expression(ctx);
        }

        let mut own = CoverGrammar::default();
        let owns = outer.is_none();
        let cover = match outer {
            Some(cover) => cover,
            None => &mut own,
        };

        let start = self.token_pos();
        if self.is_token(SyntaxKind::OpenParenToken) || self.token().is_identifier_like() {
            self.potential_arrow_at = Some(start);
        }

        let left = self.parse_conditional_expression(ctx, cover)?;
        let Some(operator) = assignment_operator(self.token()) else {
            if owns {
                self.check_cover_errors(cover)?;
            }
            return Ok(left);
        };

        let left = if operator == AssignmentOperator::Assign {
            let target = self.to_assignment_target(left, ctx)?;
            cover.claim_from(start);
            target
        } else {
            let code = if self.token().is_logical_assignment_operator() {
                diagnostic_codes::INVALID_COALESCE_ASSIGNMENT
            } else {
                diagnostic_codes::INVALID_ASSIGNMENT_TARGET
            };
            self.to_simple_assignment_target(left, ctx, code)?
        };
        if owns {
            self.check_cover_errors(cover)?;
        }

        self.next_token()?;
        let right = self.parse_assignment_expression(ctx)?;
        let span = self.span_from(start);
        Ok(Expression::AssignmentExpression(Box::new(AssignmentExpression {
            span,
            meta: self.meta(span),
            operator,
            left,
            right,
        })))
    }

    /// An arrow function not wrapped in parentheses ends its expression:
    /// no operator or subscript may follow it.
    pub(crate) fn is_bare_arrow(&self, expr: &Expression) -> bool {
        matches!(expr, Expression::ArrowFunctionExpression(arrow) if !self.is_parenthesized(arrow.span))
    }

    // =========================================================================
    // Parse Methods - Conditional and binary
    // =========================================================================

    fn parse_conditional_expression(
        &mut self,
        ctx: Context,
        cover: &mut CoverGrammar,
    ) -> ParseResult<Expression> {
        let start = self.token_pos();
        let test = self.parse_binary_expression(ctx, cover)?;
        if self.is_bare_arrow(&test) || !self.is_token(SyntaxKind::QuestionToken) {
            return Ok(test);
        }
        self.next_token()?;
        let consequent = self.parse_assignment_expression(ctx.and_in(true))?;
        self.expect(SyntaxKind::ColonToken)?;
        let alternate = self.parse_assignment_expression(ctx)?;
        let span = self.span_from(start);
        Ok(Expression::ConditionalExpression(Box::new(ConditionalExpression {
            span,
            meta: self.meta(span),
            test,
            consequent,
            alternate,
        })))
    }

    fn parse_binary_expression(
        &mut self,
        ctx: Context,
        cover: &mut CoverGrammar,
    ) -> ParseResult<Expression> {
        let start = self.token_pos();
        let left = self.parse_unary_expression(ctx, cover, false, false)?;
        if self.is_bare_arrow(&left) {
            return Ok(left);
        }
        self.parse_binary_rest(ctx, left, start, 0)
    }

    /// Operator-precedence loop: folds operators binding tighter than
    /// `min_prec` into `left`.
    fn parse_binary_rest(
        &mut self,
        ctx: Context,
        left: Expression,
        left_start: u32,
        min_prec: u8,
    ) -> ParseResult<Expression> {
        let saved = self.enter_chain(&left)?;
        let folded = self.fold_binary_operators(ctx, left, left_start, min_prec);
        self.leave_chain(saved);
        folded
    }

    fn fold_binary_operators(
        &mut self,
        ctx: Context,
        mut left: Expression,
        left_start: u32,
        min_prec: u8,
    ) -> ParseResult<Expression> {
        loop {
            let Some((mut prec, op)) = binary_operator(self.token(), ctx) else {
                return Ok(left);
            };
            if prec <= min_prec {
                return Ok(left);
            }
            let logical = matches!(
                op,
                BinaryOp::Logical(LogicalOperator::Or | LogicalOperator::And)
            );
            let coalesce = op == BinaryOp::Logical(LogicalOperator::Coalesce);
            if coalesce {
                // `??` binds like `&&` so that mixing is detected below.
                prec = 2;
            }
            self.next_token()?;
            self.extend_chain()?;

            let right_start = self.token_pos();
            let mut right_cover = CoverGrammar::default();
            let right = self.parse_unary_expression(ctx, &mut right_cover, false, false)?;
            self.check_cover_errors(&right_cover)?;
            let right = self.parse_binary_rest(ctx, right, right_start, prec)?;

            let span = self.span_from(left_start);
            let meta = self.meta(span);
            left = match op {
                BinaryOp::Binary(operator) => {
                    Expression::BinaryExpression(Box::new(BinaryExpression {
                        span,
                        meta,
                        left,
                        operator,
                        right,
                    }))
                }
                BinaryOp::Logical(operator) => {
                    Expression::LogicalExpression(Box::new(LogicalExpression {
                        span,
                        meta,
                        left,
                        operator,
                        right,
                    }))
                }
            };

            let next = self.token();
            if (logical && next == SyntaxKind::QuestionQuestionToken)
                || (coalesce
                    && matches!(
                        next,
                        SyntaxKind::BarBarToken | SyntaxKind::AmpersandAmpersandToken
                    ))
            {
                return Err(self.error(
                    diagnostic_codes::NULLISH_MIXED_WITH_LOGICAL,
                    self.token_span(),
                    &[],
                ));
            }
        }
    }

    // =========================================================================
    // Parse Methods - Unary, update, exponentiation
    // =========================================================================

    /// `UnaryExpression`, `UpdateExpression` and the right-associative `**`.
    ///
    /// `saw_unary` marks the operand of a unary operator, where `**` may not
    /// follow; `in_update` marks the operand of a prefix `++`/`--`, which
    /// leaves `**` to the caller.
    pub(crate) fn parse_unary_expression(
        &mut self,
        ctx: Context,
        cover: &mut CoverGrammar,
        saw_unary: bool,
        in_update: bool,
    ) -> ParseResult<Expression> {
        self.enter_recursion()?;
        let result = self.parse_unary_inner(ctx, cover, saw_unary, in_update);
        self.exit_recursion();
        result
    }

    fn parse_unary_inner(
        &mut self,
        ctx: Context,
        cover: &mut CoverGrammar,
        mut saw_unary: bool,
        in_update: bool,
    ) -> ParseResult<Expression> {
        let start = self.token_pos();
        let kind = self.token();
        let expr = if kind == SyntaxKind::AwaitKeyword && ctx.await_is_keyword() {
            saw_unary = true;
            self.parse_await_expression(ctx, cover)?
        } else if matches!(kind, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken) {
            let operator = if kind == SyntaxKind::PlusPlusToken {
                UpdateOperator::Increment
            } else {
                UpdateOperator::Decrement
            };
            self.next_token()?;
            let argument = self.parse_unary_expression(ctx, cover, true, true)?;
            self.check_update_operand(&argument, ctx, diagnostic_codes::INVALID_PREFIX_OPERAND)?;
            let span = self.span_from(start);
            Expression::UpdateExpression(Box::new(UpdateExpression {
                span,
                meta: self.meta(span),
                operator,
                prefix: true,
                argument,
            }))
        } else if let Some(operator) = unary_operator(kind) {
            self.next_token()?;
            let argument = self.parse_unary_expression(ctx, cover, true, false)?;
            if operator == UnaryOperator::Delete {
                if ctx.is_strict() && matches!(argument, Expression::Identifier(_)) {
                    return Err(self.error(
                        diagnostic_codes::DELETE_IDENTIFIER_IN_STRICT_MODE,
                        argument.span(),
                        &[],
                    ));
                }
                if is_private_member(&argument) {
                    return Err(self.error(
                        diagnostic_codes::DELETE_PRIVATE_NAME,
                        argument.span(),
                        &[],
                    ));
                }
            }
            saw_unary = true;
            let span = self.span_from(start);
            Expression::UnaryExpression(Box::new(UnaryExpression {
                span,
                meta: self.meta(span),
                operator,
                prefix: true,
                argument,
            }))
        } else {
            let expr = self.parse_lhs_expression(ctx, cover)?;
            if self.is_bare_arrow(&expr) {
                return Ok(expr);
            }
            let postfix = self.token();
            if matches!(postfix, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
                && !self.has_line_break()
            {
                self.check_update_operand(&expr, ctx, diagnostic_codes::INVALID_POSTFIX_OPERAND)?;
                self.next_token()?;
                let span = self.span_from(start);
                Expression::UpdateExpression(Box::new(UpdateExpression {
                    span,
                    meta: self.meta(span),
                    operator: if postfix == SyntaxKind::PlusPlusToken {
                        UpdateOperator::Increment
                    } else {
                        UpdateOperator::Decrement
                    },
                    prefix: false,
                    argument: expr,
                }))
            } else {
                expr
            }
        };

        if in_update || !self.is_token(SyntaxKind::AsteriskAsteriskToken) {
            return Ok(expr);
        }
        if saw_unary {
            return Err(self.error(
                diagnostic_codes::UNARY_BEFORE_EXPONENTIATION,
                self.token_span(),
                &[],
            ));
        }
        self.next_token()?;
        let mut right_cover = CoverGrammar::default();
        let right = self.parse_unary_expression(ctx, &mut right_cover, false, false)?;
        self.check_cover_errors(&right_cover)?;
        let span = self.span_from(start);
        Ok(Expression::BinaryExpression(Box::new(BinaryExpression {
            span,
            meta: self.meta(span),
            left: expr,
            operator: BinaryOperator::Exponent,
            right,
        })))
    }

    fn check_update_operand(&self, expr: &Expression, ctx: Context, code: u32) -> ParseResult<()> {
        match expr {
            Expression::Identifier(id) => self.check_simple_assignment_name(id, ctx),
            Expression::MemberExpression(_) => Ok(()),
            other => Err(self.error(code, other.span(), &[])),
        }
    }

    fn parse_await_expression(
        &mut self,
        ctx: Context,
        cover: &mut CoverGrammar,
    ) -> ParseResult<Expression> {
        let start = self.token_pos();
        if ctx.contains(Context::IN_PARAMETERS) {
            return Err(self.error(diagnostic_codes::AWAIT_IN_PARAMETER, self.token_span(), &[]));
        }
        self.await_pos.get_or_insert(start);
        self.next_token()?;
        let argument = self.parse_unary_expression(ctx, cover, true, false)?;
        let span = self.span_from(start);
        Ok(Expression::AwaitExpression(Box::new(AwaitExpression {
            span,
            meta: self.meta(span),
            argument,
        })))
    }

    fn parse_yield_expression(&mut self, ctx: Context) -> ParseResult<Expression> {
        let start = self.token_pos();
        if ctx.contains(Context::IN_PARAMETERS) {
            return Err(self.error(diagnostic_codes::YIELD_IN_PARAMETER, self.token_span(), &[]));
        }
        self.yield_pos.get_or_insert(start);
        self.next_token()?;
        let (argument, delegate) = if self.has_line_break()
            || !(self.is_token(SyntaxKind::AsteriskToken) || self.starts_expression())
        {
            (None, false)
        } else {
            let delegate = self.eat(SyntaxKind::AsteriskToken)?;
            (Some(self.parse_assignment_expression(ctx)?), delegate)
        };
        let span = self.span_from(start);
        Ok(Expression::YieldExpression(Box::new(YieldExpression {
            span,
            meta: self.meta(span),
            argument,
            delegate,
        })))
    }

    /// Whether the current token can begin an expression.
    pub(crate) fn starts_expression(&self) -> bool {
        let kind = self.token();
        kind.is_identifier_like()
            || kind.is_template_start()
            || matches!(
                kind,
                SyntaxKind::NumericLiteral
                    | SyntaxKind::BigIntLiteral
                    | SyntaxKind::StringLiteral
                    | SyntaxKind::PrivateIdentifier
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::OpenBraceToken
                    | SyntaxKind::PlusToken
                    | SyntaxKind::MinusToken
                    | SyntaxKind::ExclamationToken
                    | SyntaxKind::TildeToken
                    | SyntaxKind::PlusPlusToken
                    | SyntaxKind::MinusMinusToken
                    | SyntaxKind::SlashToken
                    | SyntaxKind::SlashEqualsToken
                    | SyntaxKind::ThisKeyword
                    | SyntaxKind::NullKeyword
                    | SyntaxKind::TrueKeyword
                    | SyntaxKind::FalseKeyword
                    | SyntaxKind::FunctionKeyword
                    | SyntaxKind::ClassKeyword
                    | SyntaxKind::NewKeyword
                    | SyntaxKind::SuperKeyword
                    | SyntaxKind::ImportKeyword
                    | SyntaxKind::TypeOfKeyword
                    | SyntaxKind::VoidKeyword
                    | SyntaxKind::DeleteKeyword
            )
    }

    // =========================================================================
    // Parse Methods - Left-hand side and subscripts
    // =========================================================================

    fn parse_lhs_expression(
        &mut self,
        ctx: Context,
        cover: &mut CoverGrammar,
    ) -> ParseResult<Expression> {
        let start = self.token_pos();
        let base = self.parse_primary_expression(ctx, cover)?;
        if self.is_bare_arrow(&base) {
            return Ok(base);
        }
        // `({ a = 1 }).b` can never become a pattern.
        if cover.shorthand_assign.is_some_and(|pos| pos >= start) && self.starts_subscript() {
            return Err(self.error(
                diagnostic_codes::INVALID_SHORTHAND_INITIALIZER,
                Span::at(cover.shorthand_assign.unwrap_or(start)),
                &[],
            ));
        }
        self.parse_subscripts(ctx, base, start, false)
    }

    /// `LeftHandSideExpression` with its cover errors reported, as used by
    /// class heritage.
    pub(crate) fn parse_lhs_expression_checked(&mut self, ctx: Context) -> ParseResult<Expression> {
        let mut cover = CoverGrammar::default();
        let expr = self.parse_lhs_expression(ctx, &mut cover)?;
        self.check_cover_errors(&cover)?;
        Ok(expr)
    }

    fn starts_subscript(&self) -> bool {
        let kind = self.token();
        kind.is_template_start()
            || matches!(
                kind,
                SyntaxKind::DotToken
                    | SyntaxKind::QuestionDotToken
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::OpenParenToken
            )
    }

    /// Member accesses, calls, optional chains and tagged templates after
    /// `base`. `no_call` is set for the callee of `new`.
    fn parse_subscripts(
        &mut self,
        ctx: Context,
        base: Expression,
        start: u32,
        no_call: bool,
    ) -> ParseResult<Expression> {
        let saved = self.enter_chain(&base)?;
        let chain = self.parse_subscript_chain(ctx, base, start, no_call);
        self.leave_chain(saved);
        chain
    }

    fn parse_subscript_chain(
        &mut self,
        ctx: Context,
        base: Expression,
        start: u32,
        no_call: bool,
    ) -> ParseResult<Expression> {
        let mut maybe_async_arrow = !no_call
            && self.potential_arrow_at == Some(start)
            && !self.has_line_break()
            && matches!(&base, Expression::Identifier(id)
                if id.name == "async" && id.span.len() == 5 && id.span.end == self.prev_end());
        let mut expr = base;
        let mut chained = false;
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token()?;
                    let property = self.parse_member_name()?;
                    expr = self.finish_member(expr, property, start, false, false);
                }
                SyntaxKind::QuestionDotToken => {
                    if no_call {
                        return Err(self.error(
                            diagnostic_codes::OPTIONAL_CHAIN_IN_NEW,
                            self.token_span(),
                            &[],
                        ));
                    }
                    chained = true;
                    self.next_token()?;
                    match self.token() {
                        SyntaxKind::OpenParenToken => {
                            let arguments = self.parse_argument_list(ctx, None)?;
                            expr = self.finish_call(expr, arguments, start, true);
                        }
                        SyntaxKind::OpenBracketToken => {
                            self.next_token()?;
                            let property = self.parse_expression(ctx.and_in(true))?;
                            self.expect(SyntaxKind::CloseBracketToken)?;
                            expr = self.finish_member(expr, property, start, true, true);
                        }
                        kind if kind.is_template_start() => {
                            return Err(self.error(
                                diagnostic_codes::TAGGED_TEMPLATE_IN_OPTIONAL_CHAIN,
                                self.token_span(),
                                &[],
                            ));
                        }
                        _ => {
                            let property = self.parse_member_name()?;
                            expr = self.finish_member(expr, property, start, false, true);
                        }
                    }
                }
                SyntaxKind::OpenBracketToken => {
                    self.next_token()?;
                    let property = self.parse_expression(ctx.and_in(true))?;
                    self.expect(SyntaxKind::CloseBracketToken)?;
                    expr = self.finish_member(expr, property, start, true, false);
                }
                SyntaxKind::OpenParenToken if !no_call => {
                    if maybe_async_arrow {
                        maybe_async_arrow = false;
                        expr = self.parse_async_arrow_or_call(ctx, start, expr)?;
                        if self.is_bare_arrow(&expr) {
                            return Ok(expr);
                        }
                        continue;
                    }
                    let arguments = self.parse_argument_list(ctx, None)?;
                    expr = self.finish_call(expr, arguments, start, false);
                }
                kind if kind.is_template_start() => {
                    if chained {
                        return Err(self.error(
                            diagnostic_codes::TAGGED_TEMPLATE_IN_OPTIONAL_CHAIN,
                            self.token_span(),
                            &[],
                        ));
                    }
                    let quasi = self.parse_template_literal(ctx, true)?;
                    let span = self.span_from(start);
                    expr = Expression::TaggedTemplateExpression(Box::new(
                        TaggedTemplateExpression {
                            span,
                            meta: self.meta(span),
                            tag: expr,
                            quasi,
                        },
                    ));
                }
                _ => break,
            }
            maybe_async_arrow = false;
            self.extend_chain()?;
        }
        if chained {
            let span = expr.span();
            expr = Expression::ChainExpression(Box::new(ChainExpression {
                span,
                meta: self.meta(span),
                expression: expr,
            }));
        }
        Ok(expr)
    }

    fn finish_member(
        &self,
        object: Expression,
        property: Expression,
        start: u32,
        computed: bool,
        optional: bool,
    ) -> Expression {
        let span = self.span_from(start);
        Expression::MemberExpression(Box::new(MemberExpression {
            span,
            meta: self.meta(span),
            object,
            computed,
            property,
            optional,
        }))
    }

    fn finish_call(
        &self,
        callee: Expression,
        arguments: Vec<ArrayElement>,
        start: u32,
        optional: bool,
    ) -> Expression {
        let span = self.span_from(start);
        Expression::CallExpression(Box::new(CallExpression {
            span,
            meta: self.meta(span),
            callee,
            arguments,
            optional,
        }))
    }

    /// Name after `.` or `?.`: any identifier name, or a private name.
    fn parse_member_name(&mut self) -> ParseResult<Expression> {
        if self.is_token(SyntaxKind::PrivateIdentifier) {
            return Ok(Expression::PrivateIdentifier(Box::new(
                self.parse_private_reference()?,
            )));
        }
        Ok(Expression::Identifier(Box::new(self.parse_identifier_name()?)))
    }

    /// `( args )`. With `cover` given, pattern-only constructs are recorded
    /// there so the list can still become async arrow parameters.
    pub(crate) fn parse_argument_list(
        &mut self,
        ctx: Context,
        mut cover: Option<&mut CoverGrammar>,
    ) -> ParseResult<Vec<ArrayElement>> {
        let ctx = ctx.and_in(true);
        self.expect(SyntaxKind::OpenParenToken)?;
        let mut arguments = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken) {
            if self.is_token(SyntaxKind::DotDotDotToken) {
                let spread_start = self.token_pos();
                self.next_token()?;
                let argument = self.parse_assignment_cover(ctx, cover.as_deref_mut())?;
                let span = self.span_from(spread_start);
                if self.is_token(SyntaxKind::CommaToken) {
                    self.spread_trailing_comma.insert(spread_start);
                }
                arguments.push(ArrayElement::SpreadElement(Box::new(SpreadElement {
                    span,
                    meta: self.meta(span),
                    argument,
                })));
            } else {
                arguments.push(ArrayElement::Expression(
                    self.parse_assignment_cover(ctx, cover.as_deref_mut())?,
                ));
            }
            if self.is_token(SyntaxKind::CloseParenToken) {
                break;
            }
            self.expect(SyntaxKind::CommaToken)?;
        }
        self.expect(SyntaxKind::CloseParenToken)?;
        Ok(arguments)
    }

    /// `async(...)`: a call, or the head of an async arrow if `=>` follows.
    fn parse_async_arrow_or_call(
        &mut self,
        ctx: Context,
        start: u32,
        callee: Expression,
    ) -> ParseResult<Expression> {
        let saved = self.take_cover_positions();
        let mut cover = CoverGrammar::default();
        let arguments = self.parse_argument_list(ctx, Some(&mut cover))?;

        if self.is_token(SyntaxKind::EqualsGreaterThanToken) {
            if self.has_line_break() {
                return Err(self.error(
                    diagnostic_codes::LINE_TERMINATOR_BEFORE_ARROW,
                    self.token_span(),
                    &[],
                ));
            }
            if let Some(pos) = self.await_pos {
                return Err(self.error(
                    diagnostic_codes::AWAIT_IN_PARAMETER,
                    Span::new(pos, pos + 5),
                    &[],
                ));
            }
            if let Some(pos) = self.await_ident_pos {
                return Err(self.error(
                    diagnostic_codes::AWAIT_IDENTIFIER_IN_ASYNC,
                    Span::new(pos, pos + 5),
                    &[],
                ));
            }
            if let Some(pos) = self.yield_pos {
                return Err(self.error(
                    diagnostic_codes::YIELD_IN_PARAMETER,
                    Span::new(pos, pos + 5),
                    &[],
                ));
            }
            let params =
                self.to_arrow_params(arguments, ctx.for_arrow(true) | Context::IN_PARAMETERS)?;
            self.restore_cover_positions(saved);
            return self.parse_arrow_function(ctx, start, params, true);
        }

        self.check_cover_errors(&cover)?;
        self.merge_cover_positions(saved);
        Ok(self.finish_call(callee, arguments, start, false))
    }

    // =========================================================================
    // Parse Methods - Primary expressions
    // =========================================================================

    fn parse_primary_expression(
        &mut self,
        ctx: Context,
        cover: &mut CoverGrammar,
    ) -> ParseResult<Expression> {
        let start = self.token_pos();
        let can_be_arrow = self.potential_arrow_at == Some(start);
        match self.token() {
            SyntaxKind::ThisKeyword => {
                let span = self.token_span();
                self.next_token()?;
                Ok(Expression::ThisExpression(Box::new(ThisExpression {
                    span,
                    meta: self.meta(span),
                })))
            }
            SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral => {
                Ok(Expression::Literal(Box::new(self.parse_literal(ctx)?)))
            }
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                Ok(Expression::Literal(Box::new(self.parse_regex_literal()?)))
            }
            kind if kind.is_template_start() => Ok(Expression::TemplateLiteral(Box::new(
                self.parse_template_literal(ctx, false)?,
            ))),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_or_arrow(ctx, can_be_arrow),
            SyntaxKind::OpenBracketToken => self.parse_array_literal(ctx, cover),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(ctx, cover),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(ctx, start, false),
            SyntaxKind::ClassKeyword => Ok(Expression::ClassExpression(Box::new(
                self.parse_class(ctx, ClassKind::ClassExpression, false)?,
            ))),
            SyntaxKind::NewKeyword => self.parse_new_expression(ctx),
            SyntaxKind::SuperKeyword => self.parse_super(ctx, false),
            SyntaxKind::ImportKeyword => self.parse_import_expression(ctx),
            SyntaxKind::PrivateIdentifier => self.parse_private_in(ctx),
            SyntaxKind::AsyncKeyword => self.parse_async_primary(ctx, start, can_be_arrow),
            kind if kind.is_identifier_like() => {
                let id = self.parse_identifier_reference(ctx)?;
                if can_be_arrow
                    && self.is_token(SyntaxKind::EqualsGreaterThanToken)
                    && !self.has_line_break()
                {
                    return self.parse_arrow_from_identifier(ctx, start, id, false);
                }
                Ok(Expression::Identifier(Box::new(id)))
            }
            _ => Err(self.unexpected()),
        }
    }

    /// `async` at the start of a primary expression: async function, async
    /// arrow with an identifier parameter, or the identifier `async`.
    fn parse_async_primary(
        &mut self,
        ctx: Context,
        start: u32,
        can_be_arrow: bool,
    ) -> ParseResult<Expression> {
        let (next, line_break) = self.peek()?;
        if next == SyntaxKind::FunctionKeyword && !line_break {
            return self.parse_function_expression(ctx, start, true);
        }
        if can_be_arrow && !line_break && next.is_identifier_like() {
            self.next_token()?;
            let saved = self.take_cover_positions();
            let param = self.parse_binding_identifier(ctx.for_arrow(true) | Context::IN_PARAMETERS)?;
            self.restore_cover_positions(saved);
            if !self.is_token(SyntaxKind::EqualsGreaterThanToken) {
                return Err(self.expected(SyntaxKind::EqualsGreaterThanToken));
            }
            if self.has_line_break() {
                return Err(self.error(
                    diagnostic_codes::LINE_TERMINATOR_BEFORE_ARROW,
                    self.token_span(),
                    &[],
                ));
            }
            let params = vec![super::node::Pattern::Identifier(Box::new(param))];
            return self.parse_arrow_function(ctx, start, params, true);
        }
        let id = self.parse_identifier_reference(ctx)?;
        if can_be_arrow && self.is_token(SyntaxKind::EqualsGreaterThanToken) && !self.has_line_break()
        {
            return self.parse_arrow_from_identifier(ctx, start, id, false);
        }
        Ok(Expression::Identifier(Box::new(id)))
    }

    /// `( ... )`: a parenthesized expression, or the parameters of an arrow
    /// function if `=>` follows.
    fn parse_parenthesized_or_arrow(
        &mut self,
        ctx: Context,
        can_be_arrow: bool,
    ) -> ParseResult<Expression> {
        let start = self.token_pos();
        self.next_token()?;
        let saved = self.take_cover_positions();
        let mut cover = CoverGrammar::default();
        let inner_ctx = ctx.and_in(true);
        let inner_start = self.token_pos();

        let mut elements = Vec::new();
        let mut first_spread: Option<Span> = None;
        let mut trailing_comma: Option<Span> = None;
        while !self.is_token(SyntaxKind::CloseParenToken) {
            if self.is_token(SyntaxKind::DotDotDotToken) {
                let spread_start = self.token_pos();
                first_spread.get_or_insert(self.token_span());
                self.next_token()?;
                let argument = self.parse_assignment_cover(inner_ctx, Some(&mut cover))?;
                let span = self.span_from(spread_start);
                if self.is_token(SyntaxKind::CommaToken) {
                    self.spread_trailing_comma.insert(spread_start);
                }
                elements.push(ArrayElement::SpreadElement(Box::new(SpreadElement {
                    span,
                    meta: self.meta(span),
                    argument,
                })));
            } else {
                elements.push(ArrayElement::Expression(
                    self.parse_assignment_cover(inner_ctx, Some(&mut cover))?,
                ));
            }
            if self.is_token(SyntaxKind::CloseParenToken) {
                break;
            }
            let comma = self.token_span();
            self.expect(SyntaxKind::CommaToken)?;
            if self.is_token(SyntaxKind::CloseParenToken) {
                trailing_comma = Some(comma);
            }
        }
        let inner_end = self.prev_end();
        let close = self.token_span();
        self.expect(SyntaxKind::CloseParenToken)?;

        if can_be_arrow && self.is_token(SyntaxKind::EqualsGreaterThanToken) {
            if self.has_line_break() {
                return Err(self.error(
                    diagnostic_codes::LINE_TERMINATOR_BEFORE_ARROW,
                    self.token_span(),
                    &[],
                ));
            }
            if let Some(pos) = self.await_pos {
                return Err(self.error(
                    diagnostic_codes::AWAIT_IN_PARAMETER,
                    Span::new(pos, pos + 5),
                    &[],
                ));
            }
            if let Some(pos) = self.yield_pos {
                return Err(self.error(
                    diagnostic_codes::YIELD_IN_PARAMETER,
                    Span::new(pos, pos + 5),
                    &[],
                ));
            }
            let params =
                self.to_arrow_params(elements, ctx.for_arrow(false) | Context::IN_PARAMETERS)?;
            self.restore_cover_positions(saved);
            return self.parse_arrow_function(ctx, start, params, false);
        }

        if elements.is_empty() {
            return Err(self.error(diagnostic_codes::EXPRESSION_EXPECTED, close, &[]));
        }
        if let Some(span) = first_spread {
            return Err(self.error(diagnostic_codes::UNEXPECTED_TOKEN, span, &["..."]));
        }
        if let Some(span) = trailing_comma {
            return Err(self.error(diagnostic_codes::TRAILING_COMMA_NOT_ALLOWED, span, &[]));
        }
        self.check_cover_errors(&cover)?;
        self.merge_cover_positions(saved);

        let mut expressions: Vec<Expression> = elements
            .into_iter()
            .filter_map(|element| match element {
                ArrayElement::Expression(expr) => Some(expr),
                ArrayElement::SpreadElement(_) => None,
            })
            .collect();
        let expr = if expressions.len() == 1 {
            expressions.swap_remove(0)
        } else {
            let span = Span::new(inner_start, inner_end);
            Expression::SequenceExpression(Box::new(SequenceExpression {
                span,
                meta: self.meta(span),
                expressions,
            }))
        };
        self.parenthesized.insert(expr.span());
        Ok(expr)
    }

    // =========================================================================
    // Parse Methods - Literals
    // =========================================================================

    /// String, numeric, BigInt, boolean or `null` literal.
    pub(crate) fn parse_literal(&mut self, ctx: Context) -> ParseResult<Literal> {
        let span = self.token_span();
        let flags = self.token_flags();
        let mut bigint = None;
        let value = match self.token() {
            SyntaxKind::NumericLiteral => {
                if flags.contains(TokenFlags::LEGACY_OCTAL) && ctx.is_strict() {
                    return Err(self.error(
                        diagnostic_codes::OCTAL_LITERAL_IN_STRICT_MODE,
                        span,
                        &[],
                    ));
                }
                LiteralValue::Number(self.scanner.number_value())
            }
            SyntaxKind::BigIntLiteral => {
                if flags.contains(TokenFlags::LEGACY_OCTAL) {
                    return Err(self.error(diagnostic_codes::LEGACY_OCTAL_BIGINT, span, &[]));
                }
                bigint = Some(self.token_value().to_string());
                LiteralValue::Null
            }
            SyntaxKind::StringLiteral => {
                if flags.contains(TokenFlags::OCTAL_ESCAPE) && ctx.is_strict() {
                    return Err(self.error(
                        diagnostic_codes::OCTAL_ESCAPE_IN_STRICT_MODE,
                        span,
                        &[],
                    ));
                }
                LiteralValue::String(self.token_value().to_string())
            }
            SyntaxKind::NullKeyword => LiteralValue::Null,
            SyntaxKind::TrueKeyword => LiteralValue::Boolean(true),
            SyntaxKind::FalseKeyword => LiteralValue::Boolean(false),
            _ => return Err(self.unexpected()),
        };
        let raw = self.builder.raw(self.source, span);
        self.next_token()?;
        Ok(Literal {
            span,
            meta: self.meta(span),
            value,
            raw,
            regex: None,
            bigint,
        })
    }

    fn parse_regex_literal(&mut self) -> ParseResult<Literal> {
        self.re_scan_slash()?;
        let span = self.token_span();
        let regex = RegExpValue {
            pattern: self.scanner.regex_pattern().to_string(),
            flags: self.scanner.regex_flags().to_string(),
        };
        let raw = self.builder.raw(self.source, span);
        self.next_token()?;
        Ok(Literal {
            span,
            meta: self.meta(span),
            value: LiteralValue::Null,
            raw,
            regex: Some(regex),
            bigint: None,
        })
    }

    /// Template literal starting at the current template token. Invalid
    /// escapes are only an error when the template is not tagged.
    pub(crate) fn parse_template_literal(
        &mut self,
        ctx: Context,
        tagged: bool,
    ) -> ParseResult<TemplateLiteral> {
        let start = self.token_pos();
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();
        loop {
            let tail = matches!(
                self.token(),
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateTail
            );
            let cooked = self.scanner.template_cooked().map(str::to_string);
            if cooked.is_none() && !tagged {
                let pos = self.scanner.invalid_escape_pos().unwrap_or(self.token_pos());
                return Err(self.error(
                    diagnostic_codes::INVALID_ESCAPE_IN_TEMPLATE,
                    Span::new(pos, pos + 1),
                    &[],
                ));
            }
            let raw = self.scanner.template_raw().to_string();
            // Element spans cover the characters between the delimiters.
            let content_start = self.token_pos() + 1;
            let closer = if tail { 1 } else { 2 };
            let content_end = self.token_end().saturating_sub(closer).max(content_start);
            let span = Span::new(content_start, content_end);
            quasis.push(TemplateElement {
                span,
                meta: self.meta(span),
                value: TemplateElementValue { raw, cooked },
                tail,
            });
            self.next_token()?;
            if tail {
                break;
            }
            expressions.push(self.parse_expression(ctx.and_in(true))?);
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                return Err(self.expected(SyntaxKind::CloseBraceToken));
            }
            self.re_scan_template()?;
        }
        let span = self.span_from(start);
        Ok(TemplateLiteral {
            span,
            meta: self.meta(span),
            quasis,
            expressions,
        })
    }

    fn parse_array_literal(
        &mut self,
        ctx: Context,
        cover: &mut CoverGrammar,
    ) -> ParseResult<Expression> {
        let start = self.token_pos();
        let ctx = ctx.and_in(true);
        self.next_token()?;
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken) {
            if self.eat(SyntaxKind::CommaToken)? {
                elements.push(None);
                continue;
            }
            if self.is_token(SyntaxKind::DotDotDotToken) {
                let spread_start = self.token_pos();
                self.next_token()?;
                let argument = self.parse_assignment_cover(ctx, Some(&mut *cover))?;
                let span = self.span_from(spread_start);
                if self.is_token(SyntaxKind::CommaToken) {
                    self.spread_trailing_comma.insert(spread_start);
                }
                elements.push(Some(ArrayElement::SpreadElement(Box::new(SpreadElement {
                    span,
                    meta: self.meta(span),
                    argument,
                }))));
            } else {
                elements.push(Some(ArrayElement::Expression(
                    self.parse_assignment_cover(ctx, Some(&mut *cover))?,
                )));
            }
            if !self.is_token(SyntaxKind::CloseBracketToken) {
                self.expect(SyntaxKind::CommaToken)?;
            }
        }
        self.expect(SyntaxKind::CloseBracketToken)?;
        let span = self.span_from(start);
        Ok(Expression::ArrayExpression(Box::new(ArrayExpression {
            span,
            meta: self.meta(span),
            elements,
        })))
    }

    fn parse_object_literal(
        &mut self,
        ctx: Context,
        cover: &mut CoverGrammar,
    ) -> ParseResult<Expression> {
        let start = self.token_pos();
        let ctx = ctx.and_in(true);
        self.next_token()?;
        let mut properties = Vec::new();
        let mut has_proto = false;
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            if self.is_token(SyntaxKind::DotDotDotToken) {
                let spread_start = self.token_pos();
                self.next_token()?;
                let argument = self.parse_assignment_cover(ctx, Some(&mut *cover))?;
                let span = self.span_from(spread_start);
                if self.is_token(SyntaxKind::CommaToken) {
                    self.spread_trailing_comma.insert(spread_start);
                }
                properties.push(ObjectMember::SpreadElement(Box::new(SpreadElement {
                    span,
                    meta: self.meta(span),
                    argument,
                })));
            } else {
                let property = self.parse_object_property(ctx, cover)?;
                if is_proto_init(&property) {
                    if has_proto {
                        cover.double_proto.get_or_insert(property.key.span().start);
                    }
                    has_proto = true;
                }
                properties.push(ObjectMember::Property(Box::new(property)));
            }
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                self.expect(SyntaxKind::CommaToken)?;
            }
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        let span = self.span_from(start);
        Ok(Expression::ObjectExpression(Box::new(ObjectExpression {
            span,
            meta: self.meta(span),
            properties,
        })))
    }

    fn parse_object_property(
        &mut self,
        ctx: Context,
        cover: &mut CoverGrammar,
    ) -> ParseResult<Property> {
        let start = self.token_pos();
        let mut is_async = false;
        let mut generator = false;
        let mut kind = PropertyKind::Init;

        if self.is_token(SyntaxKind::AsyncKeyword) {
            let (next, line_break) = self.peek()?;
            if !line_break && (starts_property_name(next) || next == SyntaxKind::AsteriskToken) {
                is_async = true;
                self.next_token()?;
            }
        }
        if self.eat(SyntaxKind::AsteriskToken)? {
            generator = true;
        }
        if !is_async && !generator {
            let accessor = match self.token() {
                SyntaxKind::GetKeyword => Some(PropertyKind::Get),
                SyntaxKind::SetKeyword => Some(PropertyKind::Set),
                _ => None,
            };
            if let Some(accessor) = accessor {
                let (next, _) = self.peek()?;
                if starts_property_name(next) {
                    kind = accessor;
                    self.next_token()?;
                }
            }
        }

        let key_token = self.token();
        let key_escaped = self.has_escape();
        let (key, computed) = self.parse_property_key(ctx)?;

        if kind != PropertyKind::Init
            || is_async
            || generator
            || self.is_token(SyntaxKind::OpenParenToken)
        {
            let shape = MethodShape {
                kind,
                is_async,
                generator,
                derived_constructor: false,
            };
            let value = self.parse_method(ctx, shape)?;
            let span = self.span_from(start);
            return Ok(Property {
                span,
                meta: self.meta(span),
                key,
                value: Expression::FunctionExpression(Box::new(value)),
                kind,
                computed,
                method: kind == PropertyKind::Init,
                shorthand: false,
                shorthand_init: None,
            });
        }

        if self.eat(SyntaxKind::ColonToken)? {
            let value = self.parse_assignment_cover(ctx, Some(cover))?;
            let span = self.span_from(start);
            return Ok(Property {
                span,
                meta: self.meta(span),
                key,
                value,
                kind,
                computed,
                method: false,
                shorthand: false,
                shorthand_init: None,
            });
        }

        // Shorthand `{ a }` / `{ a = 1 }`.
        let Expression::Identifier(id) = &key else {
            return Err(self.unexpected());
        };
        if computed || !key_token.is_identifier_like() {
            return Err(self.error(
                diagnostic_codes::RESERVED_WORD,
                id.span,
                &[&id.name],
            ));
        }
        self.check_identifier(&id.name, id.span, key_escaped, ctx, IdentifierUse::Reference)?;
        let value = key.clone();
        let shorthand_init = if self.is_token(SyntaxKind::EqualsToken) {
            cover.shorthand_assign.get_or_insert(self.token_pos());
            self.next_token()?;
            Some(self.parse_assignment_expression(ctx)?)
        } else {
            None
        };
        let span = self.span_from(start);
        Ok(Property {
            span,
            meta: self.meta(span),
            key,
            value,
            kind,
            computed: false,
            method: false,
            shorthand: true,
            shorthand_init,
        })
    }

    /// Property name in an object literal, class body or object pattern.
    ///
    /// Returns the key and whether it was computed (`[expr]`).
    pub(crate) fn parse_property_key(&mut self, ctx: Context) -> ParseResult<(Expression, bool)> {
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                Ok((Expression::Literal(Box::new(self.parse_literal(ctx)?)), false))
            }
            SyntaxKind::OpenBracketToken => {
                self.next_token()?;
                let key = self.parse_assignment_expression(ctx.and_in(true))?;
                self.expect(SyntaxKind::CloseBracketToken)?;
                Ok((key, true))
            }
            kind if kind.is_identifier_or_keyword() => Ok((
                Expression::Identifier(Box::new(self.parse_identifier_name()?)),
                false,
            )),
            _ => Err(self.unexpected()),
        }
    }

    // =========================================================================
    // Parse Methods - new, super, import, private names
    // =========================================================================

    fn parse_new_expression(&mut self, ctx: Context) -> ParseResult<Expression> {
        self.enter_recursion()?;
        let result = self.parse_new_inner(ctx);
        self.exit_recursion();
        result
    }

    fn parse_new_inner(&mut self, ctx: Context) -> ParseResult<Expression> {
        let start = self.token_pos();
        let new_span = self.token_span();
        self.next_token()?;

        if self.is_token(SyntaxKind::DotToken) {
            self.next_token()?;
            let escaped = self.has_escape();
            let property = self.parse_identifier_name()?;
            if property.name != "target" || escaped {
                return Err(self.error(
                    diagnostic_codes::INVALID_META_PROPERTY,
                    property.span,
                    &["new", &property.name],
                ));
            }
            let span = self.span_from(start);
            if !ctx.contains(Context::ALLOW_NEW_TARGET) {
                return Err(self.error(diagnostic_codes::NEW_TARGET_OUTSIDE_FUNCTION, span, &[]));
            }
            return Ok(self.finish_meta_property("new", new_span, property, span));
        }

        let callee_start = self.token_pos();
        let callee = match self.token() {
            SyntaxKind::NewKeyword => self.parse_new_expression(ctx)?,
            SyntaxKind::SuperKeyword => self.parse_super(ctx, true)?,
            SyntaxKind::ImportKeyword => return Err(self.unexpected()),
            _ => {
                let mut cover = CoverGrammar::default();
                let callee = self.parse_primary_expression(ctx, &mut cover)?;
                self.check_cover_errors(&cover)?;
                callee
            }
        };
        let callee = self.parse_subscripts(ctx, callee, callee_start, true)?;
        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_argument_list(ctx, None)?
        } else {
            Vec::new()
        };
        let span = self.span_from(start);
        Ok(Expression::NewExpression(Box::new(NewExpression {
            span,
            meta: self.meta(span),
            callee,
            arguments,
        })))
    }

    fn finish_meta_property(
        &self,
        name: &str,
        name_span: Span,
        property: Identifier,
        span: Span,
    ) -> Expression {
        Expression::MetaProperty(Box::new(MetaProperty {
            span,
            meta: self.meta(span),
            meta_name: Identifier {
                span: name_span,
                meta: self.meta(name_span),
                name: name.to_string(),
            },
            property,
        }))
    }

    /// `super` must be followed by a call (in a derived constructor) or a
    /// property access (in a method).
    fn parse_super(&mut self, ctx: Context, in_new: bool) -> ParseResult<Expression> {
        let span = self.token_span();
        self.next_token()?;
        match self.token() {
            SyntaxKind::OpenParenToken if !in_new => {
                if !ctx.contains(Context::ALLOW_SUPER_CALL) {
                    return Err(self.error(diagnostic_codes::SUPER_CALL_NOT_ALLOWED, span, &[]));
                }
            }
            SyntaxKind::DotToken | SyntaxKind::OpenBracketToken => {
                if !ctx.contains(Context::ALLOW_SUPER_PROPERTY) {
                    return Err(self.error(
                        diagnostic_codes::SUPER_PROPERTY_NOT_ALLOWED,
                        span,
                        &[],
                    ));
                }
            }
            _ => {
                return Err(self.error(diagnostic_codes::SUPER_PROPERTY_NOT_ALLOWED, span, &[]));
            }
        }
        Ok(Expression::Super(Box::new(Super {
            span,
            meta: self.meta(span),
        })))
    }

    /// `import(source)` or `import.meta`.
    fn parse_import_expression(&mut self, ctx: Context) -> ParseResult<Expression> {
        let start = self.token_pos();
        let import_span = self.token_span();
        self.next_token()?;
        match self.token() {
            SyntaxKind::DotToken => {
                self.next_token()?;
                let escaped = self.has_escape();
                let property = self.parse_identifier_name()?;
                if property.name != "meta" || escaped {
                    return Err(self.error(
                        diagnostic_codes::INVALID_META_PROPERTY,
                        property.span,
                        &["import", &property.name],
                    ));
                }
                let span = self.span_from(start);
                if !ctx.is_module() {
                    return Err(self.error(diagnostic_codes::IMPORT_META_OUTSIDE_MODULE, span, &[]));
                }
                Ok(self.finish_meta_property("import", import_span, property, span))
            }
            SyntaxKind::OpenParenToken => {
                self.next_token()?;
                let source = self.parse_assignment_expression(ctx.and_in(true))?;
                self.expect(SyntaxKind::CloseParenToken)?;
                let span = self.span_from(start);
                Ok(Expression::ImportExpression(Box::new(ImportExpression {
                    span,
                    meta: self.meta(span),
                    source,
                })))
            }
            _ => Err(self.unexpected()),
        }
    }

    /// `#name in object`: the only place a private name stands alone.
    fn parse_private_in(&mut self, ctx: Context) -> ParseResult<Expression> {
        if !self.options.next || !ctx.has_in() {
            return Err(self.unexpected());
        }
        let (next, _) = self.peek()?;
        if next != SyntaxKind::InKeyword {
            return Err(self.unexpected());
        }
        Ok(Expression::PrivateIdentifier(Box::new(
            self.parse_private_reference()?,
        )))
    }

    /// A private name used (not declared) at the current token.
    fn parse_private_reference(&mut self) -> ParseResult<PrivateIdentifier> {
        if !self.options.next {
            return Err(self.unexpected());
        }
        let span = self.token_span();
        let name = self.token_value().to_string();
        self.use_private_name(&name, span)?;
        self.next_token()?;
        Ok(PrivateIdentifier {
            span,
            meta: self.meta(span),
            name,
        })
    }
}

/// Non-shorthand, non-method `__proto__: value` property.
fn is_proto_init(property: &Property) -> bool {
    if property.computed
        || property.shorthand
        || property.method
        || property.kind != PropertyKind::Init
    {
        return false;
    }
    match &property.key {
        Expression::Identifier(id) => id.name == "__proto__",
        Expression::Literal(literal) => literal.string_value() == Some("__proto__"),
        _ => false,
    }
}
