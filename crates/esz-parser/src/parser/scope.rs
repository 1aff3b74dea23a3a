//! Declaration tracking for redeclaration and export early errors.
//!
//! This is not name resolution: each scope only remembers which names were
//! declared and how, which is enough to reject conflicting declarations and
//! exports of undeclared bindings.

use bitflags::bitflags;
use esz_common::diagnostics::diagnostic_codes;
use esz_common::{Diagnostic, Span};
use rustc_hash::{FxHashMap, FxHashSet};

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ScopeFlags: u8 {
        /// Program body.
        const TOP = 1 << 0;
        /// Function, arrow or method body; `var` stops here.
        const FUNCTION = 1 << 1;
        /// `catch (e)` with a plain identifier parameter.
        const SIMPLE_CATCH = 1 << 2;
        /// Class static block; `var` stops here.
        const STATIC_BLOCK = 1 << 3;
    }
}

impl ScopeFlags {
    #[inline]
    fn is_var_boundary(self) -> bool {
        self.intersects(Self::TOP | Self::FUNCTION | Self::STATIC_BLOCK)
    }
}

/// How a name is introduced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingKind {
    /// `var` declarations and function parameters.
    Var,
    /// `let`, `const`, `class`, and block-level functions in strict code.
    Lexical,
    /// Sloppy function declarations.
    Function,
    /// Identifier parameter of a `catch` clause.
    SimpleCatch,
}

#[derive(Debug, Default)]
struct Scope {
    flags: ScopeFlags,
    var: FxHashSet<String>,
    lexical: FxHashSet<String>,
    functions: FxHashSet<String>,
    catch_param: Option<String>,
}

#[derive(Debug, Default)]
pub struct ScopeTracker {
    scopes: Vec<Scope>,
    module: bool,
    exported: FxHashSet<String>,
    /// `export { x }` names not (yet) declared at the top level, with the
    /// first span that exported them.
    undefined_exports: FxHashMap<String, Span>,
}

impl ScopeTracker {
    #[must_use]
    pub fn new(module: bool) -> Self {
        ScopeTracker {
            scopes: Vec::with_capacity(8),
            module,
            exported: FxHashSet::default(),
            undefined_exports: FxHashMap::default(),
        }
    }

    pub fn enter(&mut self, flags: ScopeFlags) {
        self.scopes.push(Scope {
            flags,
            ..Scope::default()
        });
    }

    pub fn exit(&mut self) {
        self.scopes.pop();
    }

    /// Whether the innermost scope is the program body.
    #[must_use]
    pub fn at_top_level(&self) -> bool {
        self.scopes
            .last()
            .is_some_and(|scope| scope.flags.contains(ScopeFlags::TOP))
    }

    fn treat_functions_as_var(&self, flags: ScopeFlags) -> bool {
        flags.contains(ScopeFlags::FUNCTION) || (!self.module && flags.contains(ScopeFlags::TOP))
    }

    /// Record `name` in the current scope, failing on a conflicting declaration.
    pub fn declare(&mut self, name: &str, kind: BindingKind, span: Span) -> Result<(), Diagnostic> {
        let redeclared = match kind {
            BindingKind::Lexical => {
                let Some(scope) = self.scopes.last_mut() else {
                    return Ok(());
                };
                let clash = scope.lexical.contains(name)
                    || scope.functions.contains(name)
                    || scope.var.contains(name);
                scope.lexical.insert(name.to_string());
                clash
            }
            BindingKind::SimpleCatch => {
                if let Some(scope) = self.scopes.last_mut() {
                    scope.lexical.insert(name.to_string());
                    scope.catch_param = Some(name.to_string());
                }
                false
            }
            BindingKind::Function => {
                let Some(flags) = self.scopes.last().map(|scope| scope.flags) else {
                    return Ok(());
                };
                let as_var = self.treat_functions_as_var(flags);
                let Some(scope) = self.scopes.last_mut() else {
                    return Ok(());
                };
                let clash = if as_var {
                    scope.lexical.contains(name)
                } else {
                    scope.lexical.contains(name) || scope.var.contains(name)
                };
                scope.functions.insert(name.to_string());
                clash
            }
            BindingKind::Var => {
                let mut clash = false;
                for index in (0..self.scopes.len()).rev() {
                    let flags = self.scopes[index].flags;
                    let as_var = self.treat_functions_as_var(flags);
                    let scope = &mut self.scopes[index];
                    let catch_exempt = scope.flags.contains(ScopeFlags::SIMPLE_CATCH)
                        && scope.catch_param.as_deref() == Some(name);
                    if (scope.lexical.contains(name) && !catch_exempt)
                        || (!as_var && scope.functions.contains(name))
                    {
                        clash = true;
                    }
                    scope.var.insert(name.to_string());
                    if flags.contains(ScopeFlags::TOP) {
                        self.undefined_exports.remove(name);
                    }
                    if flags.is_var_boundary() {
                        break;
                    }
                }
                clash
            }
        };
        if self.module && self.at_top_level() {
            self.undefined_exports.remove(name);
        }
        if redeclared {
            return Err(Diagnostic::new(
                diagnostic_codes::DUPLICATE_DECLARATION,
                span.start,
                span.end,
                &[name],
            ));
        }
        Ok(())
    }

    /// Declare the name of a function declaration.
    ///
    /// Plain functions in sloppy code get the web-compatible function binding;
    /// generators, async functions and strict-mode functions bind like `var`
    /// where the scope hoists functions and lexically elsewhere.
    pub fn declare_function(
        &mut self,
        name: &str,
        sloppy_plain: bool,
        span: Span,
    ) -> Result<(), Diagnostic> {
        let kind = if sloppy_plain {
            BindingKind::Function
        } else if self
            .scopes
            .last()
            .is_some_and(|scope| self.treat_functions_as_var(scope.flags))
        {
            BindingKind::Var
        } else {
            BindingKind::Lexical
        };
        self.declare(name, kind, span)
    }

    /// Record an exported name, failing if it was already exported.
    pub fn add_export(&mut self, name: &str, span: Span) -> Result<(), Diagnostic> {
        if !self.exported.insert(name.to_string()) {
            return Err(Diagnostic::new(
                diagnostic_codes::DUPLICATE_EXPORT,
                span.start,
                span.end,
                &[name],
            ));
        }
        Ok(())
    }

    /// `export { name }` without `from`: `name` must be declared at the top level
    /// by the end of the module.
    pub fn check_local_export(&mut self, name: &str, span: Span) {
        let Some(top) = self.scopes.first() else {
            return;
        };
        if !top.lexical.contains(name) && !top.var.contains(name) && !top.functions.contains(name) {
            self.undefined_exports.entry(name.to_string()).or_insert(span);
        }
    }

    /// Fail on the earliest export that never got a top-level declaration.
    pub fn finish_module(&self) -> Result<(), Diagnostic> {
        let first = self
            .undefined_exports
            .iter()
            .min_by_key(|(_, span)| span.start);
        match first {
            Some((name, span)) => Err(Diagnostic::new(
                diagnostic_codes::UNDECLARED_EXPORT,
                span.start,
                span.end,
                &[name],
            )),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/scope_tests.rs"]
mod tests;
