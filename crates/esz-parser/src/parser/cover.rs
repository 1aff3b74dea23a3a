//! Cover grammar: reinterpreting expressions as patterns.
//!
//! `(a, {b = 1}) => ...`, `[x, y] = pair` and `for ({a} of list)` are all
//! parsed as expressions first, because the parser cannot know it is looking
//! at a pattern until it reaches `=>`, `=` or `of`. The expression tree is
//! then converted here. Constructs that are only legal inside a pattern
//! (`{ a = 1 }` shorthand initializers, repeated `__proto__`) are recorded in
//! a [`CoverGrammar`] while parsing and reported unless a conversion claims
//! them first.

use esz_common::diagnostics::diagnostic_codes;
use esz_common::{Span, Spanned};
use tracing::trace;

use super::context::Context;
use super::node::{
    ArrayElement, ArrayPattern, AssignmentExpression, AssignmentOperator, AssignmentPattern,
    AssignmentProperty, Expression, Identifier, ObjectMember, ObjectPattern, ObjectPatternMember,
    Pattern, PropertyKind, RestElement, SpreadElement,
};
use super::state::{ParseResult, ParserState};
use super::validate::IdentifierUse;

/// Pattern-only constructs seen while parsing an expression that may still
/// turn out to be a pattern.
#[derive(Clone, Copy, Debug, Default)]
pub struct CoverGrammar {
    /// `=` of the first `{ a = 1 }` shorthand initializer.
    pub shorthand_assign: Option<u32>,
    /// Key of the first repeated `__proto__: value` property.
    pub double_proto: Option<u32>,
}

impl CoverGrammar {
    /// Forget facts recorded at or after `start`: the expression starting
    /// there has been converted to a pattern.
    pub fn claim_from(&mut self, start: u32) {
        if self.shorthand_assign.is_some_and(|pos| pos >= start) {
            self.shorthand_assign = None;
        }
        if self.double_proto.is_some_and(|pos| pos >= start) {
            self.double_proto = None;
        }
    }
}

/// Where a destructuring target appears; picks the diagnostic for a bad one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TargetPosition {
    /// Left of `=` or in a `for-in/of` head.
    Root,
    /// Inside an object or array pattern.
    Nested,
}

/// A name or a destructuring pattern, optionally with a default.
fn is_arrow_param_shape(expr: &Expression) -> bool {
    match expr {
        Expression::Identifier(_)
        | Expression::ObjectExpression(_)
        | Expression::ArrayExpression(_) => true,
        Expression::AssignmentExpression(assign) => {
            assign.operator == AssignmentOperator::Assign
                && !matches!(assign.left, Pattern::MemberExpression(_))
        }
        _ => false,
    }
}

impl<'a> ParserState<'a> {
    pub(crate) fn check_cover_errors(&self, cover: &CoverGrammar) -> ParseResult<()> {
        if let Some(pos) = cover.shorthand_assign {
            return Err(self.error(
                diagnostic_codes::INVALID_SHORTHAND_INITIALIZER,
                Span::new(pos, pos + 1),
                &[],
            ));
        }
        if let Some(pos) = cover.double_proto {
            return Err(self.error(
                diagnostic_codes::DUPLICATE_PROTO,
                Span::new(pos, pos + "__proto__".len() as u32),
                &[],
            ));
        }
        Ok(())
    }

    // =========================================================================
    // Assignment targets
    // =========================================================================

    /// Reinterpret the left side of `=` (or a `for-in/of` head) as a pattern.
    pub(crate) fn to_assignment_target(
        &mut self,
        expr: Expression,
        ctx: Context,
    ) -> ParseResult<Pattern> {
        self.convert_assignment_target(expr, ctx, TargetPosition::Root)
    }

    /// Target of a compound assignment or update: identifier or member only.
    pub(crate) fn to_simple_assignment_target(
        &mut self,
        expr: Expression,
        ctx: Context,
        code: u32,
    ) -> ParseResult<Pattern> {
        match expr {
            Expression::Identifier(id) => {
                self.check_simple_assignment_name(&id, ctx)?;
                Ok(Pattern::Identifier(id))
            }
            Expression::MemberExpression(member) => Ok(Pattern::MemberExpression(member)),
            Expression::ChainExpression(chain) => Err(self.error(
                diagnostic_codes::OPTIONAL_CHAIN_ASSIGNMENT,
                chain.span,
                &[],
            )),
            other => Err(self.error(code, other.span(), &[])),
        }
    }

    fn convert_assignment_target(
        &mut self,
        expr: Expression,
        ctx: Context,
        position: TargetPosition,
    ) -> ParseResult<Pattern> {
        let invalid = match position {
            TargetPosition::Root => diagnostic_codes::INVALID_ASSIGNMENT_TARGET,
            TargetPosition::Nested => diagnostic_codes::INVALID_DESTRUCTURING_TARGET,
        };
        match expr {
            Expression::Identifier(id) => {
                self.check_simple_assignment_name(&id, ctx)?;
                Ok(Pattern::Identifier(id))
            }
            Expression::MemberExpression(member) => Ok(Pattern::MemberExpression(member)),
            Expression::ChainExpression(chain) => Err(self.error(
                diagnostic_codes::OPTIONAL_CHAIN_ASSIGNMENT,
                chain.span,
                &[],
            )),
            Expression::ObjectExpression(object) => {
                if self.is_parenthesized(object.span) {
                    return Err(self.error(invalid, object.span, &[]));
                }
                let object = *object;
                let count = object.properties.len();
                let mut properties = Vec::with_capacity(count);
                for (index, member) in object.properties.into_iter().enumerate() {
                    match member {
                        ObjectMember::Property(prop) => {
                            let prop = *prop;
                            if prop.kind != PropertyKind::Init || prop.method {
                                return Err(self.error(
                                    diagnostic_codes::INVALID_DESTRUCTURING_TARGET,
                                    prop.span,
                                    &[],
                                ));
                            }
                            let value = if prop.shorthand {
                                self.shorthand_target(prop.value, prop.shorthand_init, ctx, false)?
                            } else {
                                self.assignment_element(prop.value, ctx)?
                            };
                            properties.push(ObjectPatternMember::Property(Box::new(
                                AssignmentProperty {
                                    span: prop.span,
                                    meta: prop.meta,
                                    key: prop.key,
                                    value,
                                    kind: PropertyKind::Init,
                                    computed: prop.computed,
                                    method: false,
                                    shorthand: prop.shorthand,
                                },
                            )));
                        }
                        ObjectMember::SpreadElement(spread) => {
                            self.check_rest_position(&spread, index + 1 == count)?;
                            let argument = match spread.argument {
                                Expression::Identifier(id) => {
                                    self.check_simple_assignment_name(&id, ctx)?;
                                    Pattern::Identifier(id)
                                }
                                Expression::MemberExpression(member) => {
                                    Pattern::MemberExpression(member)
                                }
                                other => {
                                    return Err(self.error(
                                        diagnostic_codes::INVALID_DESTRUCTURING_TARGET,
                                        other.span(),
                                        &[],
                                    ));
                                }
                            };
                            properties.push(ObjectPatternMember::RestElement(Box::new(
                                RestElement {
                                    span: spread.span,
                                    meta: spread.meta,
                                    argument,
                                },
                            )));
                        }
                    }
                }
                Ok(Pattern::ObjectPattern(Box::new(ObjectPattern {
                    span: object.span,
                    meta: object.meta,
                    properties,
                })))
            }
            Expression::ArrayExpression(array) => {
                if self.is_parenthesized(array.span) {
                    return Err(self.error(invalid, array.span, &[]));
                }
                let array = *array;
                let count = array.elements.len();
                let mut elements = Vec::with_capacity(count);
                for (index, element) in array.elements.into_iter().enumerate() {
                    let pattern = match element {
                        None => None,
                        Some(ArrayElement::Expression(expr)) => {
                            Some(self.assignment_element(expr, ctx)?)
                        }
                        Some(ArrayElement::SpreadElement(spread)) => {
                            self.check_rest_position(&spread, index + 1 == count)?;
                            let spread = *spread;
                            if let Expression::AssignmentExpression(assign) = &spread.argument {
                                return Err(self.error(
                                    diagnostic_codes::REST_INITIALIZER,
                                    assign.span,
                                    &[],
                                ));
                            }
                            let argument = self.convert_assignment_target(
                                spread.argument,
                                ctx,
                                TargetPosition::Nested,
                            )?;
                            Some(Pattern::RestElement(Box::new(RestElement {
                                span: spread.span,
                                meta: spread.meta,
                                argument,
                            })))
                        }
                    };
                    elements.push(pattern);
                }
                Ok(Pattern::ArrayPattern(Box::new(ArrayPattern {
                    span: array.span,
                    meta: array.meta,
                    elements,
                })))
            }
            other => Err(self.error(invalid, other.span(), &[])),
        }
    }

    /// Element of a destructuring assignment: a target with an optional
    /// `= default`.
    fn assignment_element(&mut self, expr: Expression, ctx: Context) -> ParseResult<Pattern> {
        match expr {
            Expression::AssignmentExpression(assign)
                if assign.operator == AssignmentOperator::Assign
                    && !self.is_parenthesized(assign.span) =>
            {
                let AssignmentExpression {
                    span,
                    meta,
                    left,
                    right,
                    ..
                } = *assign;
                Ok(Pattern::AssignmentPattern(Box::new(AssignmentPattern {
                    span,
                    meta,
                    left,
                    right,
                })))
            }
            other => self.convert_assignment_target(other, ctx, TargetPosition::Nested),
        }
    }

    /// `{ a }` or `{ a = 1 }` in a pattern.
    fn shorthand_target(
        &mut self,
        value: Expression,
        init: Option<Expression>,
        ctx: Context,
        binding: bool,
    ) -> ParseResult<Pattern> {
        let Expression::Identifier(id) = value else {
            return Err(self.error(
                diagnostic_codes::INVALID_DESTRUCTURING_TARGET,
                value.span(),
                &[],
            ));
        };
        if binding {
            self.check_identifier(&id.name, id.span, false, ctx, IdentifierUse::Binding)?;
        } else {
            self.check_simple_assignment_name(&id, ctx)?;
        }
        Ok(match init {
            Some(right) => {
                let span = Span::new(id.span.start, right.span().end);
                Pattern::AssignmentPattern(Box::new(AssignmentPattern {
                    span,
                    meta: self.meta(span),
                    left: Pattern::Identifier(id),
                    right,
                }))
            }
            None => Pattern::Identifier(id),
        })
    }

    fn check_rest_position(&self, spread: &SpreadElement, is_last: bool) -> ParseResult<()> {
        if !is_last {
            return Err(self.error(
                diagnostic_codes::REST_ELEMENT_MUST_BE_LAST,
                spread.span,
                &[],
            ));
        }
        if self.spread_trailing_comma.contains(&spread.span.start) {
            return Err(self.error(diagnostic_codes::REST_TRAILING_COMMA, spread.span, &[]));
        }
        Ok(())
    }

    // =========================================================================
    // Binding patterns (arrow parameters)
    // =========================================================================

    /// Reinterpret a parenthesized expression list as arrow parameters.
    ///
    /// `ctx` is the context of the arrow's parameter list.
    pub(crate) fn to_arrow_params(
        &mut self,
        elements: Vec<ArrayElement>,
        ctx: Context,
    ) -> ParseResult<Vec<Pattern>> {
        let count = elements.len();
        trace!(count, "cover list promoted to arrow parameters");
        let mut params = Vec::with_capacity(count);
        for (index, element) in elements.into_iter().enumerate() {
            match element {
                ArrayElement::Expression(expr) => {
                    if self.is_parenthesized(expr.span()) || !is_arrow_param_shape(&expr) {
                        return Err(self.error(
                            diagnostic_codes::INVALID_ARROW_PARAMETER,
                            expr.span(),
                            &[],
                        ));
                    }
                    params.push(self.to_binding_element(expr, ctx)?);
                }
                ArrayElement::SpreadElement(spread) => {
                    self.check_rest_position(&spread, index + 1 == count)?;
                    let spread = *spread;
                    if let Expression::AssignmentExpression(assign) = &spread.argument {
                        return Err(self.error(diagnostic_codes::REST_INITIALIZER, assign.span, &[]));
                    }
                    if !is_arrow_param_shape(&spread.argument) {
                        return Err(self.error(
                            diagnostic_codes::INVALID_ARROW_PARAMETER,
                            spread.argument.span(),
                            &[],
                        ));
                    }
                    let argument = self.to_binding_pattern(spread.argument, ctx)?;
                    params.push(Pattern::RestElement(Box::new(RestElement {
                        span: spread.span,
                        meta: spread.meta,
                        argument,
                    })));
                }
            }
        }
        Ok(params)
    }

    /// Binding element: a binding target with an optional `= default`.
    fn to_binding_element(&mut self, expr: Expression, ctx: Context) -> ParseResult<Pattern> {
        match expr {
            Expression::AssignmentExpression(assign)
                if assign.operator == AssignmentOperator::Assign
                    && !self.is_parenthesized(assign.span) =>
            {
                let AssignmentExpression {
                    span,
                    meta,
                    left,
                    right,
                    ..
                } = *assign;
                self.check_binding_pattern(&left, ctx)?;
                Ok(Pattern::AssignmentPattern(Box::new(AssignmentPattern {
                    span,
                    meta,
                    left,
                    right,
                })))
            }
            other => self.to_binding_pattern(other, ctx),
        }
    }

    fn to_binding_pattern(&mut self, expr: Expression, ctx: Context) -> ParseResult<Pattern> {
        let span = expr.span();
        if self.is_parenthesized(span) {
            return Err(self.error(diagnostic_codes::INVALID_DESTRUCTURING_TARGET, span, &[]));
        }
        match expr {
            Expression::Identifier(id) => {
                self.check_identifier(&id.name, id.span, false, ctx, IdentifierUse::Binding)?;
                Ok(Pattern::Identifier(id))
            }
            Expression::ObjectExpression(object) => {
                let object = *object;
                let count = object.properties.len();
                let mut properties = Vec::with_capacity(count);
                for (index, member) in object.properties.into_iter().enumerate() {
                    match member {
                        ObjectMember::Property(prop) => {
                            let prop = *prop;
                            if prop.kind != PropertyKind::Init || prop.method {
                                return Err(self.error(
                                    diagnostic_codes::INVALID_DESTRUCTURING_TARGET,
                                    prop.span,
                                    &[],
                                ));
                            }
                            let value = if prop.shorthand {
                                self.shorthand_target(prop.value, prop.shorthand_init, ctx, true)?
                            } else {
                                self.to_binding_element(prop.value, ctx)?
                            };
                            properties.push(ObjectPatternMember::Property(Box::new(
                                AssignmentProperty {
                                    span: prop.span,
                                    meta: prop.meta,
                                    key: prop.key,
                                    value,
                                    kind: PropertyKind::Init,
                                    computed: prop.computed,
                                    method: false,
                                    shorthand: prop.shorthand,
                                },
                            )));
                        }
                        ObjectMember::SpreadElement(spread) => {
                            self.check_rest_position(&spread, index + 1 == count)?;
                            let spread = *spread;
                            let Expression::Identifier(id) = spread.argument else {
                                return Err(self.error(
                                    diagnostic_codes::INVALID_DESTRUCTURING_TARGET,
                                    spread.argument.span(),
                                    &[],
                                ));
                            };
                            let argument = self.to_binding_pattern(Expression::Identifier(id), ctx)?;
                            properties.push(ObjectPatternMember::RestElement(Box::new(
                                RestElement {
                                    span: spread.span,
                                    meta: spread.meta,
                                    argument,
                                },
                            )));
                        }
                    }
                }
                Ok(Pattern::ObjectPattern(Box::new(ObjectPattern {
                    span: object.span,
                    meta: object.meta,
                    properties,
                })))
            }
            Expression::ArrayExpression(array) => {
                let array = *array;
                let count = array.elements.len();
                let mut elements = Vec::with_capacity(count);
                for (index, element) in array.elements.into_iter().enumerate() {
                    let pattern = match element {
                        None => None,
                        Some(ArrayElement::Expression(expr)) => {
                            Some(self.to_binding_element(expr, ctx)?)
                        }
                        Some(ArrayElement::SpreadElement(spread)) => {
                            self.check_rest_position(&spread, index + 1 == count)?;
                            let spread = *spread;
                            if let Expression::AssignmentExpression(assign) = &spread.argument {
                                return Err(self.error(
                                    diagnostic_codes::REST_INITIALIZER,
                                    assign.span,
                                    &[],
                                ));
                            }
                            let argument = self.to_binding_pattern(spread.argument, ctx)?;
                            Some(Pattern::RestElement(Box::new(RestElement {
                                span: spread.span,
                                meta: spread.meta,
                                argument,
                            })))
                        }
                    };
                    elements.push(pattern);
                }
                Ok(Pattern::ArrayPattern(Box::new(ArrayPattern {
                    span: array.span,
                    meta: array.meta,
                    elements,
                })))
            }
            other => Err(self.error(
                diagnostic_codes::INVALID_DESTRUCTURING_TARGET,
                other.span(),
                &[],
            )),
        }
    }

    /// Validate a pattern that was already converted as an assignment target
    /// (the left of a `=` default) for use as a binding.
    fn check_binding_pattern(&mut self, pattern: &Pattern, ctx: Context) -> ParseResult<()> {
        let span = pattern.span();
        if self.is_parenthesized(span) {
            return Err(self.error(diagnostic_codes::INVALID_DESTRUCTURING_TARGET, span, &[]));
        }
        match pattern {
            Pattern::Identifier(id) => {
                self.check_identifier(&id.name, id.span, false, ctx, IdentifierUse::Binding)
            }
            Pattern::ObjectPattern(object) => {
                for member in &object.properties {
                    match member {
                        ObjectPatternMember::Property(prop) => {
                            self.check_binding_pattern(&prop.value, ctx)?;
                        }
                        ObjectPatternMember::RestElement(rest) => {
                            if !matches!(rest.argument, Pattern::Identifier(_)) {
                                return Err(self.error(
                                    diagnostic_codes::INVALID_DESTRUCTURING_TARGET,
                                    rest.argument.span(),
                                    &[],
                                ));
                            }
                            self.check_binding_pattern(&rest.argument, ctx)?;
                        }
                    }
                }
                Ok(())
            }
            Pattern::ArrayPattern(array) => {
                for element in array.elements.iter().flatten() {
                    self.check_binding_pattern(element, ctx)?;
                }
                Ok(())
            }
            Pattern::RestElement(rest) => self.check_binding_pattern(&rest.argument, ctx),
            Pattern::AssignmentPattern(assign) => self.check_binding_pattern(&assign.left, ctx),
            Pattern::MemberExpression(member) => Err(self.error(
                diagnostic_codes::INVALID_DESTRUCTURING_TARGET,
                member.span,
                &[],
            )),
        }
    }

    /// Identifier arrow parameter: `x => ...`.
    pub(crate) fn to_arrow_param_identifier(
        &mut self,
        id: Identifier,
        ctx: Context,
    ) -> ParseResult<Pattern> {
        self.check_identifier(&id.name, id.span, false, ctx, IdentifierUse::Binding)?;
        Ok(Pattern::Identifier(Box::new(id)))
    }
}
