//! Shared enums used by both the scanner and the parser.

use serde::{Deserialize, Serialize};

/// The goal symbol a source text is parsed with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Script,
    Module,
}

impl SourceType {
    #[must_use]
    pub const fn is_module(self) -> bool {
        matches!(self, Self::Module)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Module => "module",
        }
    }
}
