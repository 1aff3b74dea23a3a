//! Common types and utilities for the esz ECMAScript parser.
//!
//! This crate provides foundational types used across all esz crates:
//! - Source spans (`Span`, `Spanned`)
//! - Line/column mapping (`LineMap`, `Location`, `SourceLocation`)
//! - Structured diagnostics with stable codes
//! - Parser limits and thresholds
//! - Shared enums (`SourceType`)

// Common types - shared between scanner and parser
pub mod common;
pub use common::SourceType;

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::{Span, Spanned};

// Centralized limits and thresholds
pub mod limits;

// Line/column source locations
pub mod position;
pub use position::{LineMap, Location, SourceLocation};

// Diagnostics (lexical, syntax and early errors)
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticKind};
