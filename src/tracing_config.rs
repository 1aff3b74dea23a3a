//! Tracing configuration for debugging parses.
//!
//! Supports three output formats controlled by `ESZ_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` flat output
//! - `tree`: hierarchical indented output via `tracing-tree`
//! - `json`: one JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Parse entry/exit only
//! ESZ_LOG=debug cargo test -p esz --test asi_tests
//!
//! # Every token and strict-mode switch, as a tree
//! ESZ_LOG=esz_parser=trace ESZ_LOG_FORMAT=tree cargo bench
//!
//! # JSON lines for tooling
//! ESZ_LOG=debug ESZ_LOG_FORMAT=json cargo test
//! ```
//!
//! The subscriber is only initialised when `ESZ_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name; unknown names fall back to `Text`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::from_name(&std::env::var("ESZ_LOG_FORMAT").unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `ESZ_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("ESZ_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `ESZ_LOG` nor `RUST_LOG` is set, or when a
/// global subscriber is already installed. All output goes to stderr.
pub fn init_tracing() {
    let has_esz_log = std::env::var("ESZ_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_esz_log && !has_rust_log {
        return;
    }

    let filter = build_filter();
    // Ignored when a subscriber is already installed.
    let _ = match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => {
            let text_layer = fmt::layer().with_writer(std::io::stderr);
            Registry::default().with(filter).with(text_layer).try_init()
        }
    };
}
