//! Position metadata for AST nodes.

use esz_common::{LineMap, Span};

use super::node::NodeMeta;
use super::options::ParseOptions;

/// Decides which position fields each node carries.
///
/// The line map is only built when `loc` output is requested.
#[derive(Debug)]
pub struct AstBuilder {
    ranges: bool,
    line_map: Option<LineMap>,
    pub(crate) raw: bool,
    pub(crate) directives: bool,
}

impl AstBuilder {
    #[must_use]
    pub fn new(source: &str, options: &ParseOptions) -> Self {
        AstBuilder {
            ranges: options.ranges,
            line_map: options.loc.then(|| LineMap::build(source)),
            raw: options.raw,
            directives: options.directives,
        }
    }

    #[must_use]
    pub fn meta(&self, span: Span) -> NodeMeta {
        let mut meta = NodeMeta::default();
        if self.ranges {
            meta.start = Some(span.start);
            meta.end = Some(span.end);
            meta.range = Some([span.start, span.end]);
        }
        if let Some(line_map) = &self.line_map {
            meta.loc = Some(line_map.source_location(span.start, span.end));
        }
        meta
    }

    /// `raw` text for a literal, when requested.
    #[must_use]
    pub fn raw(&self, source: &str, span: Span) -> Option<String> {
        self.raw.then(|| span.slice(source).to_string())
    }
}
