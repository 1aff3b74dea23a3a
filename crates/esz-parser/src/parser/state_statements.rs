//! Parser state - statement and declaration parsing methods

use esz_common::diagnostics::diagnostic_codes;
use esz_common::limits::INITIAL_PROGRAM_STATEMENT_CAPACITY;
use esz_common::{Span, Spanned};
use esz_scanner::{SyntaxKind, TokenFlags};
use tracing::trace;

use super::context::Context;
use super::cover::CoverGrammar;
use super::node::{
    BlockStatement, BreakStatement, CatchClause, ClassKind, ContinueStatement, DebuggerStatement,
    DoWhileStatement, EmptyStatement, Expression, ExpressionStatement, ForHead, ForInStatement,
    ForInit, ForOfStatement, ForStatement, IfStatement, LabeledStatement, Pattern, Program,
    ReturnStatement, Statement, SwitchCase, SwitchStatement, ThrowStatement, TryStatement,
    VariableDeclaration, VariableDeclarator, VariableKind, WhileStatement, WithStatement,
};
use super::scope::{BindingKind, ScopeFlags};
use super::state::{Label, LabelKind, ParseResult, ParserState};

/// Result of scanning a body's directive prologue.
pub(crate) struct Prologue {
    pub statements: Vec<Statement>,
    /// Context for the rest of the body; strict if a `"use strict"`
    /// directive was found.
    pub ctx: Context,
    /// The first `"use strict"` directive.
    pub use_strict: Option<Span>,
}

impl<'a> ParserState<'a> {
    // =========================================================================
    // Parse Methods - Program and directive prologues
    // =========================================================================

    /// Parse the whole source as a `Program`.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        self.next_token()?;
        self.scopes.enter(ScopeFlags::TOP);

        let ctx = self.options.initial_context();
        let prologue = self.parse_directive_prologue(ctx)?;
        let mut body = prologue.statements;
        body.reserve(INITIAL_PROGRAM_STATEMENT_CAPACITY);
        self.parse_statement_list(prologue.ctx, &mut body, SyntaxKind::EndOfFileToken)?;

        if ctx.is_module() {
            self.scopes.finish_module()?;
        }
        self.scopes.exit();

        let span = Span::new(0, self.source.len() as u32);
        Ok(Program {
            span,
            meta: self.meta(span),
            source_type: self.options.source_type,
            body,
        })
    }

    /// Parse the leading string-literal statements of a function or program
    /// body.
    ///
    /// A `"use strict"` directive makes the rest of the body strict, and
    /// retroactively rejects octal escapes in the directives before it.
    pub(crate) fn parse_directive_prologue(&mut self, ctx: Context) -> ParseResult<Prologue> {
        let mut statements = Vec::new();
        let mut ctx = ctx;
        let mut use_strict = None;
        let mut first_octal: Option<Span> = None;

        while self.is_token(SyntaxKind::StringLiteral) {
            let literal_span = self.token_span();
            let octal = self.token_flags().contains(TokenFlags::OCTAL_ESCAPE);
            let mut statement = self.parse_statement_list_item(ctx)?;

            let is_directive = matches!(
                &statement,
                Statement::ExpressionStatement(stmt)
                    if matches!(&stmt.expression, Expression::Literal(lit) if lit.span == literal_span)
            );
            if !is_directive {
                statements.push(statement);
                break;
            }

            // Directive text is the raw source between the quotes.
            let text = Span::new(literal_span.start + 1, literal_span.end - 1).slice(self.source);
            if octal && first_octal.is_none() {
                first_octal = Some(literal_span);
            }
            if text == "use strict" {
                if let Some(span) = first_octal {
                    return Err(self.error(
                        diagnostic_codes::OCTAL_ESCAPE_IN_STRICT_MODE,
                        span,
                        &[],
                    ));
                }
                if use_strict.is_none() {
                    use_strict = Some(literal_span);
                }
                if !ctx.is_strict() {
                    trace!(pos = literal_span.start, "directive prologue enables strict mode");
                }
                ctx |= Context::STRICT;
            }
            if self.builder.directives {
                if let Statement::ExpressionStatement(stmt) = &mut statement {
                    stmt.directive = Some(text.to_string());
                }
            }
            statements.push(statement);
        }

        Ok(Prologue {
            statements,
            ctx,
            use_strict,
        })
    }

    /// Parse `StatementListItem`s until `end` (not consumed).
    pub(crate) fn parse_statement_list(
        &mut self,
        ctx: Context,
        body: &mut Vec<Statement>,
        end: SyntaxKind,
    ) -> ParseResult<()> {
        while !self.is_token(end) {
            if self.is_token(SyntaxKind::EndOfFileToken) {
                return Err(self.expected(end));
            }
            body.push(self.parse_statement_list_item(ctx)?);
        }
        Ok(())
    }

    // =========================================================================
    // Parse Methods - Statement list items
    // =========================================================================

    /// `StatementListItem`: a statement or a declaration.
    pub(crate) fn parse_statement_list_item(&mut self, ctx: Context) -> ParseResult<Statement> {
        match self.token() {
            SyntaxKind::FunctionKeyword => Ok(Statement::FunctionDeclaration(Box::new(
                self.parse_function_declaration(ctx, false, true)?,
            ))),
            SyntaxKind::AsyncKeyword if self.is_async_function()? => Ok(
                Statement::FunctionDeclaration(Box::new(
                    self.parse_function_declaration(ctx, true, true)?,
                )),
            ),
            SyntaxKind::ClassKeyword => Ok(Statement::ClassDeclaration(Box::new(
                self.parse_class(ctx, ClassKind::ClassDeclaration, true)?,
            ))),
            SyntaxKind::ConstKeyword => self.parse_variable_statement(ctx, VariableKind::Const),
            SyntaxKind::LetKeyword if self.is_let_declaration(true)? => {
                self.parse_variable_statement(ctx, VariableKind::Let)
            }
            SyntaxKind::ImportKeyword if !self.is_import_call()? => {
                self.check_module_item(ctx)?;
                self.parse_import_declaration(ctx)
            }
            SyntaxKind::ExportKeyword => {
                self.check_module_item(ctx)?;
                self.parse_export_declaration(ctx)
            }
            _ => self.parse_statement(ctx),
        }
    }

    fn check_module_item(&self, ctx: Context) -> ParseResult<()> {
        if !ctx.is_module() || !self.scopes.at_top_level() {
            return Err(self.error(
                diagnostic_codes::IMPORT_EXPORT_ONLY_AT_TOP_LEVEL,
                self.token_span(),
                &[],
            ));
        }
        Ok(())
    }

    /// `async function` with no line break in between.
    pub(crate) fn is_async_function(&mut self) -> ParseResult<bool> {
        let (next, line_break) = self.peek()?;
        Ok(next == SyntaxKind::FunctionKeyword && !line_break)
    }

    /// `import(` and `import.` start expressions, not declarations.
    fn is_import_call(&mut self) -> ParseResult<bool> {
        let (next, _) = self.peek()?;
        Ok(matches!(
            next,
            SyntaxKind::OpenParenToken | SyntaxKind::DotToken
        ))
    }

    /// Whether `let` at the current token starts a lexical declaration.
    ///
    /// `let [` always does. In statement-list and `for`-head position `let {`
    /// and `let name` do too; elsewhere `let` is an identifier.
    fn is_let_declaration(&mut self, declaration_allowed: bool) -> ParseResult<bool> {
        if !self.is_token(SyntaxKind::LetKeyword) {
            return Ok(false);
        }
        let (next, _) = self.peek()?;
        Ok(match next {
            SyntaxKind::OpenBracketToken => true,
            SyntaxKind::OpenBraceToken => declaration_allowed,
            kind if kind.is_identifier_like() => declaration_allowed,
            _ => false,
        })
    }

    // =========================================================================
    // Parse Methods - Statements
    // =========================================================================

    /// `Statement`: anything allowed as the body of `if`, loops and labels.
    pub(crate) fn parse_statement(&mut self, ctx: Context) -> ParseResult<Statement> {
        self.enter_recursion()?;
        let result = self.parse_statement_inner(ctx);
        self.exit_recursion();
        result
    }

    fn parse_statement_inner(&mut self, ctx: Context) -> ParseResult<Statement> {
        match self.token() {
            SyntaxKind::OpenBraceToken => Ok(Statement::BlockStatement(Box::new(
                self.parse_block(ctx)?,
            ))),
            SyntaxKind::SemicolonToken => {
                let span = self.token_span();
                self.next_token()?;
                Ok(Statement::EmptyStatement(Box::new(EmptyStatement {
                    span,
                    meta: self.meta(span),
                })))
            }
            SyntaxKind::VarKeyword => self.parse_variable_statement(ctx, VariableKind::Var),
            SyntaxKind::IfKeyword => self.parse_if_statement(ctx),
            SyntaxKind::ForKeyword => self.parse_for_statement(ctx),
            SyntaxKind::WhileKeyword => self.parse_while_statement(ctx),
            SyntaxKind::DoKeyword => self.parse_do_statement(ctx),
            SyntaxKind::ContinueKeyword => self.parse_break_or_continue(ctx, false),
            SyntaxKind::BreakKeyword => self.parse_break_or_continue(ctx, true),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(ctx),
            SyntaxKind::WithKeyword => self.parse_with_statement(ctx),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(ctx),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(ctx),
            SyntaxKind::TryKeyword => self.parse_try_statement(ctx),
            SyntaxKind::DebuggerKeyword => {
                let start = self.token_pos();
                self.next_token()?;
                self.parse_semicolon()?;
                let span = self.span_from(start);
                Ok(Statement::DebuggerStatement(Box::new(DebuggerStatement {
                    span,
                    meta: self.meta(span),
                })))
            }
            SyntaxKind::FunctionKeyword => Err(self.error(
                diagnostic_codes::DECLARATION_IN_SINGLE_STATEMENT,
                self.token_span(),
                &["Function"],
            )),
            SyntaxKind::AsyncKeyword if self.is_async_function()? => Err(self.error(
                diagnostic_codes::DECLARATION_IN_SINGLE_STATEMENT,
                self.token_span(),
                &["Async function"],
            )),
            SyntaxKind::ClassKeyword => Err(self.error(
                diagnostic_codes::DECLARATION_IN_SINGLE_STATEMENT,
                self.token_span(),
                &["Class"],
            )),
            SyntaxKind::ConstKeyword => Err(self.error(
                diagnostic_codes::LEXICAL_DECLARATION_IN_SINGLE_STATEMENT,
                self.token_span(),
                &[],
            )),
            SyntaxKind::LetKeyword if self.is_let_declaration(false)? => Err(self.error(
                diagnostic_codes::LET_BRACKET_IN_EXPRESSION_STATEMENT,
                self.token_span(),
                &[],
            )),
            SyntaxKind::ImportKeyword if !self.is_import_call()? => Err(self.error(
                diagnostic_codes::IMPORT_EXPORT_ONLY_AT_TOP_LEVEL,
                self.token_span(),
                &[],
            )),
            SyntaxKind::ExportKeyword => Err(self.error(
                diagnostic_codes::IMPORT_EXPORT_ONLY_AT_TOP_LEVEL,
                self.token_span(),
                &[],
            )),
            _ => self.parse_expression_or_labeled_statement(ctx),
        }
    }

    fn parse_expression_or_labeled_statement(&mut self, ctx: Context) -> ParseResult<Statement> {
        let start = self.token_pos();
        let starts_with_identifier = self.token().is_identifier_like();
        let expression = self.parse_expression(ctx.and_in(true))?;

        if starts_with_identifier && self.is_token(SyntaxKind::ColonToken) {
            if let Expression::Identifier(label) = expression {
                self.next_token()?;
                return self.parse_labeled_statement(ctx, start, *label);
            }
        }

        self.parse_semicolon()?;
        let span = self.span_from(start);
        Ok(Statement::ExpressionStatement(Box::new(ExpressionStatement {
            span,
            meta: self.meta(span),
            expression,
            directive: None,
        })))
    }

    /// `label: body`, after the colon.
    fn parse_labeled_statement(
        &mut self,
        ctx: Context,
        start: u32,
        label: super::node::Identifier,
    ) -> ParseResult<Statement> {
        if self.labels.iter().any(|existing| existing.name == label.name) {
            return Err(self.error(
                diagnostic_codes::DUPLICATE_LABEL,
                label.span,
                &[&label.name],
            ));
        }
        let kind = match self.token() {
            SyntaxKind::ForKeyword | SyntaxKind::WhileKeyword | SyntaxKind::DoKeyword => {
                LabelKind::Loop
            }
            SyntaxKind::SwitchKeyword => LabelKind::Switch,
            _ => LabelKind::Other,
        };
        // `a: b: while (...)` - both labels name the loop.
        let statement_start = self.token_pos();
        for existing in self.labels.iter_mut().rev() {
            if existing.statement_start != start {
                break;
            }
            existing.statement_start = statement_start;
            existing.kind = kind;
        }
        self.labels.push(Label {
            name: label.name.clone(),
            kind,
            statement_start,
        });

        let body = if self.is_token(SyntaxKind::FunctionKeyword) {
            self.parse_annex_b_function(ctx, diagnostic_codes::LABELLED_FUNCTION, &[])?
        } else {
            self.parse_statement(ctx)?
        };
        self.labels.pop();

        let span = self.span_from(start);
        Ok(Statement::LabeledStatement(Box::new(LabeledStatement {
            span,
            meta: self.meta(span),
            label,
            body,
        })))
    }

    /// Plain function declaration in a position only web-compatible sloppy
    /// code allows: a labelled statement or an `if` branch.
    fn parse_annex_b_function(
        &mut self,
        ctx: Context,
        code: u32,
        args: &[&str],
    ) -> ParseResult<Statement> {
        let start_span = self.token_span();
        if ctx.is_strict() || !self.options.web_compat {
            return Err(self.error(code, start_span, args));
        }
        let function = self.parse_function_declaration(ctx, false, true)?;
        if function.generator {
            return Err(self.error(code, start_span, args));
        }
        Ok(Statement::FunctionDeclaration(Box::new(function)))
    }

    /// `{ StatementList }` in its own block scope.
    pub(crate) fn parse_block(&mut self, ctx: Context) -> ParseResult<BlockStatement> {
        self.scopes.enter(ScopeFlags::empty());
        let block = self.parse_block_in_current_scope(ctx)?;
        self.scopes.exit();
        Ok(block)
    }

    fn parse_block_in_current_scope(&mut self, ctx: Context) -> ParseResult<BlockStatement> {
        let start = self.token_pos();
        self.expect(SyntaxKind::OpenBraceToken)?;
        let mut body = Vec::new();
        self.parse_statement_list(ctx, &mut body, SyntaxKind::CloseBraceToken)?;
        self.expect(SyntaxKind::CloseBraceToken)?;
        let span = self.span_from(start);
        Ok(BlockStatement {
            span,
            meta: self.meta(span),
            body,
        })
    }

    // =========================================================================
    // Parse Methods - Variable declarations
    // =========================================================================

    fn parse_variable_statement(
        &mut self,
        ctx: Context,
        kind: VariableKind,
    ) -> ParseResult<Statement> {
        let declaration = self.parse_variable_declaration(ctx.and_in(true), kind, false)?;
        self.parse_semicolon()?;
        let span = self.span_from(declaration.span.start);
        Ok(Statement::VariableDeclaration(Box::new(VariableDeclaration {
            span,
            meta: self.meta(span),
            ..declaration
        })))
    }

    /// `var`/`let`/`const` and its declarator list, without the terminating
    /// semicolon.
    ///
    /// In a `for` head (`in_for`), a missing initializer is left for the
    /// caller to judge: `for (const x of y)` needs none.
    pub(crate) fn parse_variable_declaration(
        &mut self,
        ctx: Context,
        kind: VariableKind,
        in_for: bool,
    ) -> ParseResult<VariableDeclaration> {
        let start = self.token_pos();
        self.next_token()?;
        let binding = if kind.is_lexical() {
            BindingKind::Lexical
        } else {
            BindingKind::Var
        };

        let mut declarations = Vec::new();
        loop {
            let declarator_start = self.token_pos();
            let id = self.parse_binding_target(ctx)?;
            self.declare_pattern(&id, binding, kind.is_lexical())?;

            let init = if self.eat(SyntaxKind::EqualsToken)? {
                Some(self.parse_assignment_expression(ctx)?)
            } else {
                if !in_for {
                    self.check_declarator_initializer(&id, kind)?;
                }
                None
            };
            let span = self.span_from(declarator_start);
            declarations.push(VariableDeclarator {
                span,
                meta: self.meta(span),
                id,
                init,
            });
            if !self.eat(SyntaxKind::CommaToken)? {
                break;
            }
        }

        let span = self.span_from(start);
        Ok(VariableDeclaration {
            span,
            meta: self.meta(span),
            declarations,
            kind,
        })
    }

    /// `const` and destructuring declarators need an initializer outside
    /// `for-in/of` heads.
    fn check_declarator_initializer(&self, id: &Pattern, kind: VariableKind) -> ParseResult<()> {
        if kind == VariableKind::Const {
            return Err(self.error(
                diagnostic_codes::MISSING_INITIALIZER,
                id.span(),
                &["const declaration"],
            ));
        }
        if !matches!(id, Pattern::Identifier(_)) {
            return Err(self.error(
                diagnostic_codes::MISSING_INITIALIZER,
                id.span(),
                &["destructuring declaration"],
            ));
        }
        Ok(())
    }

    /// Declare every name bound by `pattern` in the current scope.
    pub(crate) fn declare_pattern(
        &mut self,
        pattern: &Pattern,
        kind: BindingKind,
        lexical: bool,
    ) -> ParseResult<()> {
        let mut names = Vec::new();
        pattern.bound_names(&mut names);
        for name in names {
            if lexical {
                self.check_lexical_name(name)?;
            }
            self.scopes.declare(&name.name, kind, name.span)?;
        }
        Ok(())
    }

    // =========================================================================
    // Parse Methods - Control flow
    // =========================================================================

    fn parse_paren_expression(&mut self, ctx: Context) -> ParseResult<Expression> {
        self.expect(SyntaxKind::OpenParenToken)?;
        let expression = self.parse_expression(ctx.and_in(true))?;
        self.expect(SyntaxKind::CloseParenToken)?;
        Ok(expression)
    }

    fn parse_if_statement(&mut self, ctx: Context) -> ParseResult<Statement> {
        let start = self.token_pos();
        self.next_token()?;
        let test = self.parse_paren_expression(ctx)?;
        let consequent = self.parse_if_branch(ctx)?;
        let alternate = if self.eat(SyntaxKind::ElseKeyword)? {
            Some(self.parse_if_branch(ctx)?)
        } else {
            None
        };
        let span = self.span_from(start);
        Ok(Statement::IfStatement(Box::new(IfStatement {
            span,
            meta: self.meta(span),
            test,
            consequent,
            alternate,
        })))
    }

    /// Branch of an `if`. A function declaration there behaves as if it
    /// were wrapped in a block.
    fn parse_if_branch(&mut self, ctx: Context) -> ParseResult<Statement> {
        if !self.is_token(SyntaxKind::FunctionKeyword) {
            return self.parse_statement(ctx);
        }
        self.scopes.enter(ScopeFlags::empty());
        let function = self.parse_annex_b_function(
            ctx,
            diagnostic_codes::DECLARATION_IN_SINGLE_STATEMENT,
            &["Function"],
        );
        self.scopes.exit();
        function
    }

    fn parse_while_statement(&mut self, ctx: Context) -> ParseResult<Statement> {
        let start = self.token_pos();
        self.next_token()?;
        let test = self.parse_paren_expression(ctx)?;
        let body = self.parse_statement(ctx | Context::IN_ITERATION)?;
        let span = self.span_from(start);
        Ok(Statement::WhileStatement(Box::new(WhileStatement {
            span,
            meta: self.meta(span),
            test,
            body,
        })))
    }

    fn parse_do_statement(&mut self, ctx: Context) -> ParseResult<Statement> {
        let start = self.token_pos();
        self.next_token()?;
        let body = self.parse_statement(ctx | Context::IN_ITERATION)?;
        self.expect(SyntaxKind::WhileKeyword)?;
        let test = self.parse_paren_expression(ctx)?;
        // The semicolon after `do ... while (x)` is always optional.
        self.eat(SyntaxKind::SemicolonToken)?;
        let span = self.span_from(start);
        Ok(Statement::DoWhileStatement(Box::new(DoWhileStatement {
            span,
            meta: self.meta(span),
            body,
            test,
        })))
    }

    fn parse_for_statement(&mut self, ctx: Context) -> ParseResult<Statement> {
        let start = self.token_pos();
        self.next_token()?;

        let is_await = if self.is_token(SyntaxKind::AwaitKeyword) {
            if !ctx.await_is_keyword() {
                return Err(self.error(
                    diagnostic_codes::FOR_AWAIT_OUTSIDE_ASYNC,
                    self.token_span(),
                    &[],
                ));
            }
            self.await_pos.get_or_insert(self.token_pos());
            self.next_token()?;
            true
        } else {
            false
        };
        self.expect(SyntaxKind::OpenParenToken)?;
        self.scopes.enter(ScopeFlags::empty());
        let result = self.parse_for_rest(ctx, start, is_await);
        self.scopes.exit();
        result
    }

    fn parse_for_rest(&mut self, ctx: Context, start: u32, is_await: bool) -> ParseResult<Statement> {
        let head_ctx = ctx.and_in(false);

        if self.is_token(SyntaxKind::SemicolonToken) {
            if is_await {
                return Err(self.expected(SyntaxKind::OfKeyword));
            }
            return self.parse_for_loop(ctx, start, None);
        }

        let declaration_kind = match self.token() {
            SyntaxKind::VarKeyword => Some(VariableKind::Var),
            SyntaxKind::ConstKeyword => Some(VariableKind::Const),
            SyntaxKind::LetKeyword if self.is_let_declaration(true)? => Some(VariableKind::Let),
            _ => None,
        };

        if let Some(kind) = declaration_kind {
            let declaration = self.parse_variable_declaration(head_ctx, kind, true)?;
            let is_of = self.is_token(SyntaxKind::OfKeyword);
            if is_of || self.is_token(SyntaxKind::InKeyword) {
                let keyword = if is_of { "of" } else { "in" };
                if declaration.declarations.len() != 1 {
                    return Err(self.error(
                        diagnostic_codes::FOR_IN_OF_SINGLE_DECLARATION,
                        declaration.span,
                        &[keyword],
                    ));
                }
                if let Some(declarator) = declaration.declarations.first() {
                    // Annex B: `for (var x = 1 in obj)` in sloppy web code.
                    let legacy_initializer = !is_of
                        && self.options.web_compat
                        && !ctx.is_strict()
                        && kind == VariableKind::Var
                        && matches!(declarator.id, Pattern::Identifier(_));
                    if declarator.init.is_some() && !legacy_initializer {
                        return Err(self.error(
                            diagnostic_codes::FOR_IN_OF_INITIALIZER,
                            declarator.span,
                            &[keyword],
                        ));
                    }
                }
                let head = ForHead::VariableDeclaration(Box::new(declaration));
                return self.parse_for_in_of(ctx, start, head, is_of, is_await);
            }

            if is_await {
                return Err(self.expected(SyntaxKind::OfKeyword));
            }
            for declarator in &declaration.declarations {
                if declarator.init.is_none() {
                    self.check_declarator_initializer(&declarator.id, kind)?;
                }
            }
            let init = ForInit::VariableDeclaration(Box::new(declaration));
            return self.parse_for_loop(ctx, start, Some(init));
        }

        let init_start = self.token_pos();
        let starts_with_let = self.is_token(SyntaxKind::LetKeyword);
        let starts_with_async = self.is_token(SyntaxKind::AsyncKeyword);
        let mut cover = CoverGrammar::default();
        let expression = self.parse_expression_cover(head_ctx, &mut cover)?;

        let is_of = self.is_token(SyntaxKind::OfKeyword);
        if is_of || self.is_token(SyntaxKind::InKeyword) {
            let keyword = if is_of { "of" } else { "in" };
            // `for (let of x)` and `for (async of x)` are not valid heads.
            let bare_async = starts_with_async
                && matches!(&expression, Expression::Identifier(id) if id.span.start == init_start);
            if is_of && (starts_with_let || (bare_async && !is_await)) {
                return Err(self.error(
                    diagnostic_codes::INVALID_FOR_IN_OF_TARGET,
                    Span::new(init_start, expression.span().end),
                    &[keyword],
                ));
            }
            if !is_of && is_await {
                return Err(self.expected(SyntaxKind::OfKeyword));
            }
            if !matches!(
                expression,
                Expression::Identifier(_)
                    | Expression::MemberExpression(_)
                    | Expression::ChainExpression(_)
                    | Expression::ObjectExpression(_)
                    | Expression::ArrayExpression(_)
            ) {
                return Err(self.error(
                    diagnostic_codes::INVALID_FOR_IN_OF_TARGET,
                    expression.span(),
                    &[keyword],
                ));
            }
            let target = self.to_assignment_target(expression, ctx)?;
            cover.claim_from(init_start);
            self.check_cover_errors(&cover)?;
            return self.parse_for_in_of(ctx, start, ForHead::Pattern(target), is_of, is_await);
        }

        self.check_cover_errors(&cover)?;
        if is_await {
            return Err(self.expected(SyntaxKind::OfKeyword));
        }
        self.parse_for_loop(ctx, start, Some(ForInit::Expression(expression)))
    }

    /// `for (init; test; update) body`, after the init.
    fn parse_for_loop(
        &mut self,
        ctx: Context,
        start: u32,
        init: Option<ForInit>,
    ) -> ParseResult<Statement> {
        self.expect(SyntaxKind::SemicolonToken)?;
        let test = if self.is_token(SyntaxKind::SemicolonToken) {
            None
        } else {
            Some(self.parse_expression(ctx.and_in(true))?)
        };
        self.expect(SyntaxKind::SemicolonToken)?;
        let update = if self.is_token(SyntaxKind::CloseParenToken) {
            None
        } else {
            Some(self.parse_expression(ctx.and_in(true))?)
        };
        self.expect(SyntaxKind::CloseParenToken)?;
        let body = self.parse_statement(ctx | Context::IN_ITERATION)?;
        let span = self.span_from(start);
        Ok(Statement::ForStatement(Box::new(ForStatement {
            span,
            meta: self.meta(span),
            init,
            test,
            update,
            body,
        })))
    }

    /// `for (head in/of right) body`, at `in`/`of`.
    fn parse_for_in_of(
        &mut self,
        ctx: Context,
        start: u32,
        left: ForHead,
        is_of: bool,
        is_await: bool,
    ) -> ParseResult<Statement> {
        self.next_token()?;
        let right = if is_of {
            self.parse_assignment_expression(ctx.and_in(true))?
        } else {
            self.parse_expression(ctx.and_in(true))?
        };
        self.expect(SyntaxKind::CloseParenToken)?;
        let body = self.parse_statement(ctx | Context::IN_ITERATION)?;
        let span = self.span_from(start);
        let meta = self.meta(span);
        Ok(if is_of {
            Statement::ForOfStatement(Box::new(ForOfStatement {
                span,
                meta,
                left,
                right,
                body,
                is_await,
            }))
        } else {
            Statement::ForInStatement(Box::new(ForInStatement {
                span,
                meta,
                left,
                right,
                body,
            }))
        })
    }

    fn parse_break_or_continue(&mut self, ctx: Context, is_break: bool) -> ParseResult<Statement> {
        let start = self.token_pos();
        let keyword_span = self.token_span();
        self.next_token()?;

        let label = if !self.can_insert_semicolon() && self.token().is_identifier_like() {
            Some(self.parse_label_identifier(ctx)?)
        } else {
            None
        };

        match &label {
            None => {
                if is_break && !ctx.intersects(Context::IN_ITERATION | Context::IN_SWITCH) {
                    return Err(self.error(diagnostic_codes::ILLEGAL_BREAK, keyword_span, &[]));
                }
                if !is_break && !ctx.contains(Context::IN_ITERATION) {
                    return Err(self.error(diagnostic_codes::ILLEGAL_CONTINUE, keyword_span, &[]));
                }
            }
            Some(label) => {
                let target = self.labels.iter().rev().find(|l| l.name == label.name);
                match target {
                    None => {
                        return Err(self.error(
                            diagnostic_codes::UNDEFINED_LABEL,
                            label.span,
                            &[&label.name],
                        ));
                    }
                    Some(target) if !is_break && target.kind != LabelKind::Loop => {
                        return Err(self.error(
                            diagnostic_codes::CONTINUE_TARGET_NOT_ITERATION,
                            label.span,
                            &[&label.name],
                        ));
                    }
                    Some(_) => {}
                }
            }
        }

        self.parse_semicolon()?;
        let span = self.span_from(start);
        let meta = self.meta(span);
        Ok(if is_break {
            Statement::BreakStatement(Box::new(BreakStatement { span, meta, label }))
        } else {
            Statement::ContinueStatement(Box::new(ContinueStatement { span, meta, label }))
        })
    }

    fn parse_return_statement(&mut self, ctx: Context) -> ParseResult<Statement> {
        let start = self.token_pos();
        if !ctx.contains(Context::IN_FUNCTION_BODY) {
            return Err(self.error(diagnostic_codes::ILLEGAL_RETURN, self.token_span(), &[]));
        }
        self.next_token()?;
        let argument = if self.is_token(SyntaxKind::SemicolonToken) || self.can_insert_semicolon() {
            None
        } else {
            Some(self.parse_expression(ctx.and_in(true))?)
        };
        self.parse_semicolon()?;
        let span = self.span_from(start);
        Ok(Statement::ReturnStatement(Box::new(ReturnStatement {
            span,
            meta: self.meta(span),
            argument,
        })))
    }

    fn parse_with_statement(&mut self, ctx: Context) -> ParseResult<Statement> {
        let start = self.token_pos();
        if ctx.is_strict() {
            return Err(self.error(diagnostic_codes::WITH_IN_STRICT_MODE, self.token_span(), &[]));
        }
        self.next_token()?;
        let object = self.parse_paren_expression(ctx)?;
        let body = self.parse_statement(ctx)?;
        let span = self.span_from(start);
        Ok(Statement::WithStatement(Box::new(WithStatement {
            span,
            meta: self.meta(span),
            object,
            body,
        })))
    }

    fn parse_switch_statement(&mut self, ctx: Context) -> ParseResult<Statement> {
        let start = self.token_pos();
        self.next_token()?;
        let discriminant = self.parse_paren_expression(ctx)?;
        self.expect(SyntaxKind::OpenBraceToken)?;
        self.scopes.enter(ScopeFlags::empty());
        let cases = self.parse_switch_cases(ctx | Context::IN_SWITCH);
        self.scopes.exit();
        let cases = cases?;
        self.expect(SyntaxKind::CloseBraceToken)?;
        let span = self.span_from(start);
        Ok(Statement::SwitchStatement(Box::new(SwitchStatement {
            span,
            meta: self.meta(span),
            discriminant,
            cases,
        })))
    }

    fn parse_switch_cases(&mut self, ctx: Context) -> ParseResult<Vec<SwitchCase>> {
        let mut cases = Vec::new();
        let mut seen_default = false;
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            let start = self.token_pos();
            let test = match self.token() {
                SyntaxKind::CaseKeyword => {
                    self.next_token()?;
                    Some(self.parse_expression(ctx.and_in(true))?)
                }
                SyntaxKind::DefaultKeyword if !seen_default => {
                    seen_default = true;
                    self.next_token()?;
                    None
                }
                _ => return Err(self.unexpected()),
            };
            self.expect(SyntaxKind::ColonToken)?;
            let mut consequent = Vec::new();
            while !matches!(
                self.token(),
                SyntaxKind::CaseKeyword
                    | SyntaxKind::DefaultKeyword
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::EndOfFileToken
            ) {
                consequent.push(self.parse_statement_list_item(ctx)?);
            }
            let span = self.span_from(start);
            cases.push(SwitchCase {
                span,
                meta: self.meta(span),
                test,
                consequent,
            });
        }
        Ok(cases)
    }

    fn parse_throw_statement(&mut self, ctx: Context) -> ParseResult<Statement> {
        let start = self.token_pos();
        self.next_token()?;
        if self.has_line_break() {
            return Err(self.error(
                diagnostic_codes::LINE_BREAK_AFTER_THROW,
                self.token_span(),
                &[],
            ));
        }
        let argument = self.parse_expression(ctx.and_in(true))?;
        self.parse_semicolon()?;
        let span = self.span_from(start);
        Ok(Statement::ThrowStatement(Box::new(ThrowStatement {
            span,
            meta: self.meta(span),
            argument,
        })))
    }

    fn parse_try_statement(&mut self, ctx: Context) -> ParseResult<Statement> {
        let start = self.token_pos();
        self.next_token()?;
        let block = self.parse_block(ctx)?;

        let handler = if self.is_token(SyntaxKind::CatchKeyword) {
            Some(self.parse_catch_clause(ctx)?)
        } else {
            None
        };
        let finalizer = if self.eat(SyntaxKind::FinallyKeyword)? {
            Some(self.parse_block(ctx)?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.error(
                diagnostic_codes::CATCH_OR_FINALLY_EXPECTED,
                self.token_span(),
                &[],
            ));
        }

        let span = self.span_from(start);
        Ok(Statement::TryStatement(Box::new(TryStatement {
            span,
            meta: self.meta(span),
            block,
            handler,
            finalizer,
        })))
    }

    /// `catch (param) { body }`: the parameter and the body share one scope.
    fn parse_catch_clause(&mut self, ctx: Context) -> ParseResult<CatchClause> {
        let start = self.token_pos();
        self.next_token()?;

        if !self.eat(SyntaxKind::OpenParenToken)? {
            let body = self.parse_block(ctx)?;
            let span = self.span_from(start);
            return Ok(CatchClause {
                span,
                meta: self.meta(span),
                param: None,
                body,
            });
        }

        let simple = self.token().is_identifier_like();
        self.scopes.enter(if simple {
            ScopeFlags::SIMPLE_CATCH
        } else {
            ScopeFlags::empty()
        });
        let result = self.parse_catch_rest(ctx, simple);
        self.scopes.exit();
        let (param, body) = result?;

        let span = self.span_from(start);
        Ok(CatchClause {
            span,
            meta: self.meta(span),
            param: Some(param),
            body,
        })
    }

    fn parse_catch_rest(
        &mut self,
        ctx: Context,
        simple: bool,
    ) -> ParseResult<(Pattern, BlockStatement)> {
        let param = self.parse_binding_target(ctx)?;
        let kind = if simple {
            BindingKind::SimpleCatch
        } else {
            BindingKind::Lexical
        };
        self.declare_pattern(&param, kind, false)?;
        self.expect(SyntaxKind::CloseParenToken)?;
        let body = self.parse_block_in_current_scope(ctx)?;
        Ok((param, body))
    }
}
