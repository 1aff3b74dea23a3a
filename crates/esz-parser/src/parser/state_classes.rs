//! Parser state - class declarations, class bodies and private names

use esz_common::diagnostics::diagnostic_codes;
use esz_common::{Span, Spanned};
use esz_scanner::SyntaxKind;
use tracing::trace;

use super::context::Context;
use super::node::{
    Class, ClassBody, ClassElement, ClassKind, Expression, MethodDefinition, MethodKind,
    PrivateIdentifier, PropertyDefinition, PropertyKind, StaticBlock,
};
use super::scope::{BindingKind, ScopeFlags};
use super::state::{
    ParseResult, ParserState, PrivateNameEntry, PrivateNameKind, PrivateNameScope,
};
use super::state_expressions::starts_property_name;
use super::state_functions::MethodShape;

/// Modifiers seen before a class element's key.
#[derive(Clone, Copy, Debug, Default)]
struct ElementModifiers {
    is_static: bool,
    is_async: bool,
    generator: bool,
    accessor: Option<MethodKind>,
}

impl ElementModifiers {
    fn is_method(self) -> bool {
        self.is_async || self.generator || self.accessor.is_some()
    }
}

/// Per-body state needed to check constructors.
struct ClassBodyState {
    derived: bool,
    has_constructor: bool,
}

/// Name of a non-computed key, as seen by the `constructor` and `prototype`
/// rules.
fn static_key_name(key: &Expression, computed: bool) -> Option<&str> {
    if computed {
        return None;
    }
    match key {
        Expression::Identifier(id) => Some(&id.name),
        Expression::Literal(literal) => literal.string_value(),
        _ => None,
    }
}

impl<'a> ParserState<'a> {
    // =========================================================================
    // Parse Methods - Classes
    // =========================================================================

    /// Parse a class declaration or expression starting at `class`.
    ///
    /// Class code is always strict, including the name and the heritage.
    pub(crate) fn parse_class(
        &mut self,
        ctx: Context,
        kind: ClassKind,
        name_required: bool,
    ) -> ParseResult<Class> {
        let start = self.token_pos();
        self.next_token()?;
        let class_ctx = ctx | Context::STRICT;

        let id = if self.token().is_identifier_like()
            && !self.is_token(SyntaxKind::ExtendsKeyword)
        {
            let id = self.parse_binding_identifier(class_ctx)?;
            if kind == ClassKind::ClassDeclaration {
                self.check_lexical_name(&id)?;
                self.scopes.declare(&id.name, BindingKind::Lexical, id.span)?;
            }
            Some(id)
        } else {
            if name_required {
                return Err(self.error(
                    diagnostic_codes::CLASS_NAME_EXPECTED,
                    self.token_span(),
                    &[],
                ));
            }
            None
        };

        let super_class = if self.eat(SyntaxKind::ExtendsKeyword)? {
            Some(self.parse_lhs_expression_checked(class_ctx)?)
        } else {
            None
        };

        let body = self.parse_class_body(class_ctx | Context::IN_CLASS, super_class.is_some())?;
        let span = self.span_from(start);
        Ok(Class {
            kind,
            span,
            meta: self.meta(span),
            id,
            super_class,
            body,
        })
    }

    fn parse_class_body(&mut self, ctx: Context, derived: bool) -> ParseResult<ClassBody> {
        let start = self.token_pos();
        self.expect(SyntaxKind::OpenBraceToken)?;
        self.private_names.push(PrivateNameScope::default());

        let mut state = ClassBodyState {
            derived,
            has_constructor: false,
        };
        let mut body = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            if self.eat(SyntaxKind::SemicolonToken)? {
                continue;
            }
            if self.is_token(SyntaxKind::EndOfFileToken) {
                return Err(self.expected(SyntaxKind::CloseBraceToken));
            }
            body.push(self.parse_class_element(ctx, &mut state)?);
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        self.exit_private_name_scope()?;

        let span = self.span_from(start);
        Ok(ClassBody {
            span,
            meta: self.meta(span),
            body,
        })
    }

    fn parse_class_element(
        &mut self,
        ctx: Context,
        state: &mut ClassBodyState,
    ) -> ParseResult<ClassElement> {
        let start = self.token_pos();
        let mut modifiers = ElementModifiers::default();

        if self.is_token(SyntaxKind::StaticKeyword) {
            let (next, _) = self.peek()?;
            if next == SyntaxKind::OpenBraceToken && self.options.next {
                return self.parse_static_block(ctx, start);
            }
            if starts_property_name(next) || next == SyntaxKind::AsteriskToken {
                modifiers.is_static = true;
                self.next_token()?;
            }
        }
        if self.is_token(SyntaxKind::AsyncKeyword) {
            let (next, line_break) = self.peek()?;
            if !line_break && (starts_property_name(next) || next == SyntaxKind::AsteriskToken) {
                modifiers.is_async = true;
                self.next_token()?;
            }
        }
        if self.eat(SyntaxKind::AsteriskToken)? {
            modifiers.generator = true;
        }
        if !modifiers.is_async && !modifiers.generator {
            let accessor = match self.token() {
                SyntaxKind::GetKeyword => Some(MethodKind::Get),
                SyntaxKind::SetKeyword => Some(MethodKind::Set),
                _ => None,
            };
            if let Some(accessor) = accessor {
                let (next, _) = self.peek()?;
                if starts_property_name(next) {
                    modifiers.accessor = Some(accessor);
                    self.next_token()?;
                }
            }
        }

        let (key, computed) = if self.is_token(SyntaxKind::PrivateIdentifier) {
            (self.parse_private_key()?, false)
        } else {
            self.parse_property_key(ctx)?
        };

        if modifiers.is_method() || self.is_token(SyntaxKind::OpenParenToken) {
            return self.parse_class_method(ctx, state, start, modifiers, key, computed);
        }
        self.parse_class_field(ctx, start, modifiers.is_static, key, computed)
    }

    /// `#name` in key position.
    fn parse_private_key(&mut self) -> ParseResult<Expression> {
        let span = self.token_span();
        if !self.options.next {
            return Err(self.unexpected());
        }
        let name = self.token_value().to_string();
        if name == "constructor" {
            return Err(self.error(diagnostic_codes::PRIVATE_CONSTRUCTOR_NAME, span, &[]));
        }
        self.next_token()?;
        Ok(Expression::PrivateIdentifier(Box::new(PrivateIdentifier {
            span,
            meta: self.meta(span),
            name,
        })))
    }

    fn parse_class_method(
        &mut self,
        ctx: Context,
        state: &mut ClassBodyState,
        start: u32,
        modifiers: ElementModifiers,
        key: Expression,
        computed: bool,
    ) -> ParseResult<ClassElement> {
        let key_span = key.span();
        let key_name = static_key_name(&key, computed);
        let mut kind = modifiers.accessor.unwrap_or(MethodKind::Method);

        if !modifiers.is_static && key_name == Some("constructor") {
            let special = if modifiers.accessor.is_some() {
                Some("an accessor")
            } else if modifiers.generator {
                Some("a generator")
            } else if modifiers.is_async {
                Some("an async method")
            } else {
                None
            };
            if let Some(special) = special {
                return Err(self.error(
                    diagnostic_codes::SPECIAL_CONSTRUCTOR,
                    key_span,
                    &[special],
                ));
            }
            if state.has_constructor {
                return Err(self.error(diagnostic_codes::DUPLICATE_CONSTRUCTOR, key_span, &[]));
            }
            state.has_constructor = true;
            kind = MethodKind::Constructor;
        }
        if modifiers.is_static && key_name == Some("prototype") {
            return Err(self.error(diagnostic_codes::STATIC_PROTOTYPE, key_span, &[]));
        }
        if let Expression::PrivateIdentifier(private) = &key {
            let private_kind = match kind {
                MethodKind::Get => PrivateNameKind::Getter,
                MethodKind::Set => PrivateNameKind::Setter,
                _ => PrivateNameKind::Method,
            };
            self.declare_private_name(&private.name, private.span, private_kind, modifiers.is_static)?;
        }

        let shape = MethodShape {
            kind: match kind {
                MethodKind::Get => PropertyKind::Get,
                MethodKind::Set => PropertyKind::Set,
                MethodKind::Constructor | MethodKind::Method => PropertyKind::Init,
            },
            is_async: modifiers.is_async,
            generator: modifiers.generator,
            derived_constructor: kind == MethodKind::Constructor && state.derived,
        };
        let value = self.parse_method(ctx, shape)?;

        let span = self.span_from(start);
        Ok(ClassElement::MethodDefinition(Box::new(MethodDefinition {
            span,
            meta: self.meta(span),
            kind,
            is_static: modifiers.is_static,
            computed,
            key,
            value,
        })))
    }

    fn parse_class_field(
        &mut self,
        ctx: Context,
        start: u32,
        is_static: bool,
        key: Expression,
        computed: bool,
    ) -> ParseResult<ClassElement> {
        if !self.options.next {
            return Err(self.unexpected());
        }
        let key_span = key.span();
        match static_key_name(&key, computed) {
            Some("constructor") => {
                return Err(self.error(diagnostic_codes::CONSTRUCTOR_FIELD, key_span, &[]));
            }
            Some("prototype") if is_static => {
                return Err(self.error(diagnostic_codes::STATIC_PROTOTYPE, key_span, &[]));
            }
            _ => {}
        }
        if let Expression::PrivateIdentifier(private) = &key {
            self.declare_private_name(&private.name, private.span, PrivateNameKind::Field, is_static)?;
        }

        let value = if self.eat(SyntaxKind::EqualsToken)? {
            let saved = self.take_cover_positions();
            let value = self.parse_assignment_expression(Self::initializer_context(ctx));
            self.restore_cover_positions(saved);
            Some(value?)
        } else {
            None
        };
        self.parse_semicolon()?;

        let span = self.span_from(start);
        Ok(ClassElement::PropertyDefinition(Box::new(PropertyDefinition {
            span,
            meta: self.meta(span),
            is_static,
            computed,
            key,
            value,
        })))
    }

    /// Context for field initializers and static blocks: `this`, `super.x`
    /// and `new.target` are allowed, `arguments` is not.
    fn initializer_context(ctx: Context) -> Context {
        (ctx & (Context::STRICT | Context::MODULE | Context::IN_CLASS))
            | Context::ALLOW_IN
            | Context::ALLOW_NEW_TARGET
            | Context::ALLOW_SUPER_PROPERTY
            | Context::IN_CLASS_FIELD
    }

    /// `static { ... }`, at `static`.
    fn parse_static_block(&mut self, ctx: Context, start: u32) -> ParseResult<ClassElement> {
        self.next_token()?;
        self.expect(SyntaxKind::OpenBraceToken)?;
        let block_ctx = Self::initializer_context(ctx) | Context::IN_STATIC_BLOCK;

        self.scopes.enter(ScopeFlags::STATIC_BLOCK);
        let labels = std::mem::take(&mut self.labels);
        let positions = self.take_cover_positions();
        let mut body = Vec::new();
        let result = self.parse_statement_list(block_ctx, &mut body, SyntaxKind::CloseBraceToken);
        self.restore_cover_positions(positions);
        self.labels = labels;
        self.scopes.exit();
        result?;

        self.expect(SyntaxKind::CloseBraceToken)?;
        let span = self.span_from(start);
        Ok(ClassElement::StaticBlock(Box::new(StaticBlock {
            span,
            meta: self.meta(span),
            body,
        })))
    }

    // =========================================================================
    // Private names
    // =========================================================================

    fn declare_private_name(
        &mut self,
        name: &str,
        span: Span,
        kind: PrivateNameKind,
        is_static: bool,
    ) -> ParseResult<()> {
        let Some(scope) = self.private_names.last_mut() else {
            return Ok(());
        };
        let Some(existing) = scope.declared.get_mut(name) else {
            scope
                .declared
                .insert(name.to_string(), PrivateNameEntry { kind, is_static });
            return Ok(());
        };
        // A getter and a setter with the same placement form one accessor pair.
        let pairs = matches!(
            (existing.kind, kind),
            (PrivateNameKind::Getter, PrivateNameKind::Setter)
                | (PrivateNameKind::Setter, PrivateNameKind::Getter)
        );
        if pairs && existing.is_static == is_static {
            existing.kind = PrivateNameKind::Method;
            return Ok(());
        }
        Err(self.error(diagnostic_codes::DUPLICATE_PRIVATE_NAME, span, &[name]))
    }

    /// Record a reference to `#name`; it is resolved when the enclosing class
    /// body ends.
    pub(crate) fn use_private_name(&mut self, name: &str, span: Span) -> ParseResult<()> {
        match self.private_names.last_mut() {
            Some(scope) => {
                scope.unresolved.push((name.to_string(), span));
                Ok(())
            }
            None => Err(self.error(diagnostic_codes::UNDECLARED_PRIVATE_NAME, span, &[name])),
        }
    }

    /// Pop the innermost class's private names, handing references it does
    /// not declare to the enclosing class.
    fn exit_private_name_scope(&mut self) -> ParseResult<()> {
        let Some(scope) = self.private_names.pop() else {
            return Ok(());
        };
        let mut pending: Vec<(String, Span)> = scope
            .unresolved
            .into_iter()
            .filter(|(name, _)| !scope.declared.contains_key(name))
            .collect();
        if pending.is_empty() {
            return Ok(());
        }
        match self.private_names.last_mut() {
            Some(parent) => {
                trace!(count = pending.len(), "private names deferred to enclosing class");
                parent.unresolved.append(&mut pending);
                Ok(())
            }
            None => {
                let Some((name, span)) = pending.into_iter().min_by_key(|(_, span)| span.start)
                else {
                    return Ok(());
                };
                Err(self.error(diagnostic_codes::UNDECLARED_PRIVATE_NAME, span, &[&name]))
            }
        }
    }
}
