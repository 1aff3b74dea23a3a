//! Recursive-descent parser producing ESTree nodes.
//!
//! `ParserState` carries the scanner and cross-production bookkeeping;
//! the productions themselves are spread over the `state_*` modules as
//! `impl ParserState` blocks.

pub mod builder;
pub mod context;
pub mod cover;
pub mod node;
pub mod options;
pub mod scope;
pub mod state;

mod state_classes;
mod state_expressions;
mod state_functions;
mod state_modules;
mod state_statements;
mod validate;

pub use context::Context;
pub use node::*;
pub use options::ParseOptions;
pub use state::{ParseResult, ParserState};
