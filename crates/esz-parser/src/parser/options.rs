//! Parse options.

use esz_common::SourceType;
use serde::Deserialize;

use super::context::Context;

/// Options accepted by [`crate::parse`].
///
/// Deserializes from camelCase JSON so test harnesses can load option sets
/// next to their fixtures:
///
/// ```
/// use esz_parser::ParseOptions;
///
/// let options: ParseOptions =
///     serde_json::from_str(r#"{ "sourceType": "module", "ranges": true }"#).unwrap();
/// assert!(options.source_type.is_module());
/// assert!(options.ranges);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    pub source_type: SourceType,
    /// Parse script code as if it started with `"use strict"`.
    pub strict: bool,
    /// Annex B relaxations: HTML-like comments, function declarations as
    /// `if` bodies.
    #[serde(alias = "webCompatibility")]
    pub web_compat: bool,
    /// Staged syntax: class fields, private names, static blocks and module
    /// top-level `await`.
    #[serde(alias = "nextSyntax")]
    pub next: bool,
    /// Attach `start`, `end` and `range` to every node.
    pub ranges: bool,
    /// Attach `loc` line/column positions to every node.
    pub loc: bool,
    /// Attach `raw` source text to literals.
    pub raw: bool,
    /// Attach `directive` to directive prologue statements.
    pub directives: bool,
    /// Allow `return` at the top level of a script.
    pub global_return: bool,
}

impl ParseOptions {
    #[must_use]
    pub fn script() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn module() -> Self {
        Self {
            source_type: SourceType::Module,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_web_compat(mut self, web_compat: bool) -> Self {
        self.web_compat = web_compat;
        self
    }

    #[must_use]
    pub fn with_next(mut self, next: bool) -> Self {
        self.next = next;
        self
    }

    #[must_use]
    pub fn with_ranges(mut self, ranges: bool) -> Self {
        self.ranges = ranges;
        self
    }

    #[must_use]
    pub fn with_loc(mut self, loc: bool) -> Self {
        self.loc = loc;
        self
    }

    #[must_use]
    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    #[must_use]
    pub fn with_directives(mut self, directives: bool) -> Self {
        self.directives = directives;
        self
    }

    #[must_use]
    pub fn with_global_return(mut self, global_return: bool) -> Self {
        self.global_return = global_return;
        self
    }

    /// Context the program body starts in.
    pub(crate) fn initial_context(&self) -> Context {
        let mut ctx = Context::ALLOW_IN;
        if self.source_type.is_module() {
            ctx |= Context::MODULE | Context::STRICT;
            if self.next {
                ctx |= Context::TOP_LEVEL_AWAIT;
            }
        } else if self.strict {
            ctx |= Context::STRICT;
        }
        if self.global_return && !self.source_type.is_module() {
            ctx |= Context::IN_FUNCTION_BODY;
        }
        ctx
    }
}
