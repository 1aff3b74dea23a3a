//! Parser state - import and export declarations

use esz_common::diagnostics::diagnostic_codes;
use esz_common::Span;
use esz_scanner::SyntaxKind;

use super::context::Context;
use super::node::{
    ClassKind, ExportAllDeclaration, ExportDefaultDeclaration, ExportDefaultKind,
    ExportNamedDeclaration, ExportSpecifier, Identifier, ImportDeclaration,
    ImportDeclarationSpecifier, ImportDefaultSpecifier, ImportNamespaceSpecifier, ImportSpecifier,
    Literal, ModuleExportName, Statement,
};
use super::scope::BindingKind;
use super::state::{ParseResult, ParserState};
use super::validate::IdentifierUse;

/// A `ModuleExportName` together with what is needed to validate it later
/// as a local binding reference.
struct ExportNameToken {
    name: ModuleExportName,
    escaped: bool,
    reserved: bool,
}

impl<'a> ParserState<'a> {
    // =========================================================================
    // Parse Methods - import
    // =========================================================================

    /// `import ...;` at `import`. Only called at the top level of a module.
    pub(crate) fn parse_import_declaration(&mut self, ctx: Context) -> ParseResult<Statement> {
        let start = self.token_pos();
        self.next_token()?;

        let mut specifiers = Vec::new();
        if !self.is_token(SyntaxKind::StringLiteral) {
            if self.token().is_identifier_like() {
                let local = self.parse_import_binding(ctx)?;
                let span = local.span;
                specifiers.push(ImportDeclarationSpecifier::ImportDefaultSpecifier(Box::new(
                    ImportDefaultSpecifier {
                        span,
                        meta: self.meta(span),
                        local,
                    },
                )));
                if self.eat(SyntaxKind::CommaToken)? {
                    self.parse_import_clause_tail(ctx, &mut specifiers)?;
                }
            } else {
                self.parse_import_clause_tail(ctx, &mut specifiers)?;
            }
            self.expect(SyntaxKind::FromKeyword)?;
        }

        let source = self.parse_module_specifier(ctx)?;
        self.parse_semicolon()?;
        let span = self.span_from(start);
        Ok(Statement::ImportDeclaration(Box::new(ImportDeclaration {
            span,
            meta: self.meta(span),
            specifiers,
            source,
        })))
    }

    /// `* as ns` or `{ ... }`.
    fn parse_import_clause_tail(
        &mut self,
        ctx: Context,
        specifiers: &mut Vec<ImportDeclarationSpecifier>,
    ) -> ParseResult<()> {
        match self.token() {
            SyntaxKind::AsteriskToken => {
                let start = self.token_pos();
                self.next_token()?;
                self.expect(SyntaxKind::AsKeyword)?;
                let local = self.parse_import_binding(ctx)?;
                let span = self.span_from(start);
                specifiers.push(ImportDeclarationSpecifier::ImportNamespaceSpecifier(Box::new(
                    ImportNamespaceSpecifier {
                        span,
                        meta: self.meta(span),
                        local,
                    },
                )));
                Ok(())
            }
            SyntaxKind::OpenBraceToken => self.parse_named_imports(ctx, specifiers),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_named_imports(
        &mut self,
        ctx: Context,
        specifiers: &mut Vec<ImportDeclarationSpecifier>,
    ) -> ParseResult<()> {
        self.next_token()?;
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            let start = self.token_pos();
            let imported = self.parse_module_export_name(ctx)?;
            let local = if self.eat(SyntaxKind::AsKeyword)? {
                self.parse_import_binding(ctx)?
            } else {
                // `import { a }`: the imported name is also the local binding.
                let ModuleExportName::Identifier(id) = &imported.name else {
                    return Err(self.expected(SyntaxKind::AsKeyword));
                };
                if imported.reserved {
                    return Err(self.error(
                        diagnostic_codes::RESERVED_WORD,
                        id.span,
                        &[&id.name],
                    ));
                }
                self.check_identifier(&id.name, id.span, imported.escaped, ctx, IdentifierUse::Binding)?;
                let local = id.clone();
                self.declare_import(&local)?;
                local
            };
            let span = self.span_from(start);
            specifiers.push(ImportDeclarationSpecifier::ImportSpecifier(Box::new(
                ImportSpecifier {
                    span,
                    meta: self.meta(span),
                    imported: imported.name,
                    local,
                },
            )));
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                self.expect(SyntaxKind::CommaToken)?;
            }
        }
        self.next_token()
    }

    fn parse_import_binding(&mut self, ctx: Context) -> ParseResult<Identifier> {
        let local = self.parse_binding_identifier(ctx)?;
        self.declare_import(&local)?;
        Ok(local)
    }

    fn declare_import(&mut self, local: &Identifier) -> ParseResult<()> {
        self.check_lexical_name(local)?;
        self.scopes.declare(&local.name, BindingKind::Lexical, local.span)
    }

    /// `'specifier'` after `from` or `import`.
    fn parse_module_specifier(&mut self, ctx: Context) -> ParseResult<Literal> {
        if !self.is_token(SyntaxKind::StringLiteral) {
            return Err(self.unexpected());
        }
        self.parse_literal(ctx)
    }

    /// `IdentifierName` or string literal naming an import or export.
    fn parse_module_export_name(&mut self, ctx: Context) -> ParseResult<ExportNameToken> {
        if self.is_token(SyntaxKind::StringLiteral) {
            let literal = self.parse_literal(ctx)?;
            return Ok(ExportNameToken {
                name: ModuleExportName::Literal(literal),
                escaped: false,
                reserved: false,
            });
        }
        let reserved = self.token().is_reserved_word();
        let escaped = self.has_escape();
        let id = self.parse_identifier_name()?;
        Ok(ExportNameToken {
            name: ModuleExportName::Identifier(id),
            escaped,
            reserved,
        })
    }

    // =========================================================================
    // Parse Methods - export
    // =========================================================================

    /// `export ...` at `export`. Only called at the top level of a module.
    pub(crate) fn parse_export_declaration(&mut self, ctx: Context) -> ParseResult<Statement> {
        let start = self.token_pos();
        self.next_token()?;

        match self.token() {
            SyntaxKind::AsteriskToken => self.parse_export_all(ctx, start),
            SyntaxKind::DefaultKeyword => self.parse_export_default(ctx, start),
            SyntaxKind::OpenBraceToken => self.parse_export_named(ctx, start),
            _ => self.parse_export_declaration_statement(ctx, start),
        }
    }

    /// `export * from 'm'` / `export * as ns from 'm'`.
    fn parse_export_all(&mut self, ctx: Context, start: u32) -> ParseResult<Statement> {
        self.next_token()?;
        let exported = if self.eat(SyntaxKind::AsKeyword)? {
            let exported = self.parse_module_export_name(ctx)?.name;
            self.add_export_name(&exported)?;
            Some(exported)
        } else {
            None
        };
        self.expect(SyntaxKind::FromKeyword)?;
        let source = self.parse_module_specifier(ctx)?;
        self.parse_semicolon()?;
        let span = self.span_from(start);
        Ok(Statement::ExportAllDeclaration(Box::new(ExportAllDeclaration {
            span,
            meta: self.meta(span),
            source,
            exported,
        })))
    }

    fn parse_export_default(&mut self, ctx: Context, start: u32) -> ParseResult<Statement> {
        let default_span = self.token_span();
        self.next_token()?;

        let declaration = match self.token() {
            SyntaxKind::FunctionKeyword => ExportDefaultKind::FunctionDeclaration(Box::new(
                self.parse_function_declaration(ctx, false, false)?,
            )),
            SyntaxKind::AsyncKeyword if self.is_async_function()? => {
                ExportDefaultKind::FunctionDeclaration(Box::new(
                    self.parse_function_declaration(ctx, true, false)?,
                ))
            }
            SyntaxKind::ClassKeyword => ExportDefaultKind::ClassDeclaration(Box::new(
                self.parse_class(ctx, ClassKind::ClassDeclaration, false)?,
            )),
            _ => {
                let expression = self.parse_assignment_expression(ctx.and_in(true))?;
                self.parse_semicolon()?;
                ExportDefaultKind::Expression(expression)
            }
        };
        self.scopes.add_export("default", default_span)?;

        let span = self.span_from(start);
        Ok(Statement::ExportDefaultDeclaration(Box::new(
            ExportDefaultDeclaration {
                span,
                meta: self.meta(span),
                declaration,
            },
        )))
    }

    /// `export { a, b as c }` with an optional `from 'm'`.
    fn parse_export_named(&mut self, ctx: Context, start: u32) -> ParseResult<Statement> {
        self.next_token()?;
        let mut entries = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            let entry_start = self.token_pos();
            let local = self.parse_module_export_name(ctx)?;
            let exported = if self.eat(SyntaxKind::AsKeyword)? {
                self.parse_module_export_name(ctx)?.name
            } else {
                local.name.clone()
            };
            self.add_export_name(&exported)?;
            entries.push((entry_start, local, exported));
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                self.expect(SyntaxKind::CommaToken)?;
            }
        }
        self.next_token()?;

        let source = if self.eat(SyntaxKind::FromKeyword)? {
            Some(self.parse_module_specifier(ctx)?)
        } else {
            None
        };

        let mut specifiers = Vec::with_capacity(entries.len());
        for (entry_start, local, exported) in entries {
            if source.is_none() {
                self.check_local_export(&local, ctx)?;
            }
            let end = match &exported {
                ModuleExportName::Identifier(id) => id.span.end,
                ModuleExportName::Literal(literal) => literal.span.end,
            };
            let span = Span::new(entry_start, end);
            specifiers.push(ExportSpecifier {
                span,
                meta: self.meta(span),
                local: local.name,
                exported,
            });
        }
        self.parse_semicolon()?;

        let span = self.span_from(start);
        Ok(Statement::ExportNamedDeclaration(Box::new(
            ExportNamedDeclaration {
                span,
                meta: self.meta(span),
                declaration: None,
                specifiers,
                source,
            },
        )))
    }

    /// Without `from`, each local name must be a plain identifier reference
    /// that the module declares somewhere at its top level.
    fn check_local_export(&mut self, local: &ExportNameToken, ctx: Context) -> ParseResult<()> {
        let id = match &local.name {
            ModuleExportName::Identifier(id) => id,
            ModuleExportName::Literal(literal) => {
                return Err(self.error(
                    diagnostic_codes::UNEXPECTED_TOKEN,
                    literal.span,
                    &[literal.span.slice(self.source)],
                ));
            }
        };
        if local.reserved {
            return Err(self.error(diagnostic_codes::RESERVED_WORD, id.span, &[&id.name]));
        }
        self.check_identifier(&id.name, id.span, local.escaped, ctx, IdentifierUse::Reference)?;
        self.scopes.check_local_export(&id.name, id.span);
        Ok(())
    }

    /// `export var|let|const|function|class ...`.
    fn parse_export_declaration_statement(
        &mut self,
        ctx: Context,
        start: u32,
    ) -> ParseResult<Statement> {
        let is_declaration = match self.token() {
            SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword => true,
            SyntaxKind::AsyncKeyword => self.is_async_function()?,
            _ => false,
        };
        if !is_declaration {
            return Err(self.unexpected());
        }

        let declaration = self.parse_statement_list_item(ctx)?;
        match &declaration {
            Statement::VariableDeclaration(variables) => {
                let mut names = Vec::new();
                for declarator in &variables.declarations {
                    declarator.id.bound_names(&mut names);
                }
                for name in names {
                    self.scopes.add_export(&name.name, name.span)?;
                }
            }
            Statement::FunctionDeclaration(function) => {
                if let Some(id) = &function.id {
                    self.scopes.add_export(&id.name, id.span)?;
                }
            }
            Statement::ClassDeclaration(class) => {
                if let Some(id) = &class.id {
                    self.scopes.add_export(&id.name, id.span)?;
                }
            }
            _ => return Err(self.unexpected()),
        }

        let span = self.span_from(start);
        Ok(Statement::ExportNamedDeclaration(Box::new(
            ExportNamedDeclaration {
                span,
                meta: self.meta(span),
                declaration: Some(declaration),
                specifiers: Vec::new(),
                source: None,
            },
        )))
    }

    fn add_export_name(&mut self, name: &ModuleExportName) -> ParseResult<()> {
        let span = match name {
            ModuleExportName::Identifier(id) => id.span,
            ModuleExportName::Literal(literal) => literal.span,
        };
        self.scopes.add_export(name.name(), span)
    }
}
