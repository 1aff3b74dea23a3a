//! Line/column mapping.
//!
//! `LineMap` records the byte offset of every line start once, then answers
//! offset → (line, column) queries with a binary search. Lines are 1-based and
//! columns are 0-based byte offsets from the line start, matching the ESTree
//! `loc` convention.
//!
//! ECMAScript line terminators are LF, CR, CRLF (one terminator), U+2028 and
//! U+2029.

use memchr::memchr3_iter;
use serde::Serialize;

/// A single point in the source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

/// A `start`/`end` pair of locations, serialized as ESTree `loc`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SourceLocation {
    pub start: Location,
    pub end: Location,
}

#[derive(Clone, Debug, Default)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    #[must_use]
    pub fn build(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0u32];
        let mut skip_lf_at = usize::MAX;

        for idx in memchr3_iter(b'\n', b'\r', 0xE2, bytes) {
            match bytes[idx] {
                b'\n' => {
                    if idx != skip_lf_at {
                        line_starts.push(idx as u32 + 1);
                    }
                }
                b'\r' => {
                    if bytes.get(idx + 1) == Some(&b'\n') {
                        skip_lf_at = idx + 1;
                        line_starts.push(idx as u32 + 2);
                    } else {
                        line_starts.push(idx as u32 + 1);
                    }
                }
                _ => {
                    // U+2028 / U+2029 encode as E2 80 A8 / E2 80 A9.
                    if bytes.get(idx + 1) == Some(&0x80)
                        && matches!(bytes.get(idx + 2), Some(&0xA8) | Some(&0xA9))
                    {
                        line_starts.push(idx as u32 + 3);
                    }
                }
            }
        }

        Self { line_starts }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where the 1-based `line` begins.
    #[must_use]
    pub fn line_start(&self, line: u32) -> Option<u32> {
        let index = (line as usize).checked_sub(1)?;
        self.line_starts.get(index).copied()
    }

    #[must_use]
    pub fn location(&self, offset: u32) -> Location {
        let index = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        let line_start = self.line_starts.get(index).copied().unwrap_or(0);
        Location {
            line: index as u32 + 1,
            column: offset.saturating_sub(line_start),
        }
    }

    #[must_use]
    pub fn source_location(&self, start: u32, end: u32) -> SourceLocation {
        SourceLocation {
            start: self.location(start),
            end: self.location(end),
        }
    }
}

#[cfg(test)]
#[path = "../tests/position_tests.rs"]
mod tests;
