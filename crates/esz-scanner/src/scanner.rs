//! Scanner state machine.
//!
//! `ScannerState` borrows the source text and materializes exactly one token
//! at a time. Lookahead is done by taking a [`ScannerSnapshot`], scanning
//! ahead, and restoring the snapshot.
//!
//! Regular expressions and template continuations are context dependent, so
//! the scanner always produces `/`, `/=` and `}` as punctuators. The parser
//! calls [`ScannerState::re_scan_slash_token`] or
//! [`ScannerState::re_scan_template_token`] where the grammar expects one.

use esz_common::diagnostics::{Diagnostic, diagnostic_codes};
use esz_common::limits::MAX_SOURCE_LENGTH;
use memchr::memchr2;

use crate::char_codes::{
    CharacterCodes, digit_value, is_digit, is_identifier_part, is_identifier_start,
    is_line_break, is_octal_digit, is_white_space_single_line,
};
use crate::syntax_kind::{SyntaxKind, text_to_keyword};
use crate::token_flags::TokenFlags;

/// Scanner switches derived from the parse options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Recognize `<!--` and `-->` HTML-like comments (script goal only).
    pub html_comments: bool,
}

/// Everything needed to rewind the scanner to a token boundary.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_flags: TokenFlags,
    token_value: String,
    number_value: f64,
    template_cooked: Option<String>,
    template_raw: String,
    invalid_escape_pos: Option<u32>,
    regex_flags_start: usize,
    at_first_token: bool,
}

pub struct ScannerState<'a> {
    source: &'a str,
    bytes: &'a [u8],
    options: ScanOptions,
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_flags: TokenFlags,
    /// Identifier name, keyword text, cooked string, private name or BigInt digits.
    token_value: String,
    number_value: f64,
    template_cooked: Option<String>,
    template_raw: String,
    invalid_escape_pos: Option<u32>,
    regex_flags_start: usize,
    at_first_token: bool,
}

type ScanResult<T> = Result<T, Diagnostic>;

/// Outcome of scanning an escape sequence.
enum Escape {
    Char(u32),
    LineContinuation,
}

impl<'a> ScannerState<'a> {
    #[must_use]
    pub fn new(source: &'a str, options: ScanOptions) -> Self {
        let mut scanner = ScannerState {
            source,
            bytes: source.as_bytes(),
            options,
            pos: 0,
            token: SyntaxKind::Unknown,
            token_start: 0,
            token_flags: TokenFlags::empty(),
            token_value: String::new(),
            number_value: 0.0,
            template_cooked: None,
            template_raw: String::new(),
            invalid_escape_pos: None,
            regex_flags_start: 0,
            at_first_token: true,
        };
        scanner.skip_hashbang();
        scanner
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.source
    }

    #[inline]
    #[must_use]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    #[must_use]
    pub fn token_start(&self) -> u32 {
        self.token_start as u32
    }

    #[inline]
    #[must_use]
    pub fn token_end(&self) -> u32 {
        self.pos as u32
    }

    #[inline]
    #[must_use]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    #[inline]
    #[must_use]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    #[inline]
    #[must_use]
    pub fn has_unicode_escape(&self) -> bool {
        self.token_flags.contains(TokenFlags::UNICODE_ESCAPE)
    }

    /// Decoded value of the current identifier, keyword, string, private name
    /// (without `#`) or BigInt (digits without `n` or separators).
    #[inline]
    #[must_use]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    #[inline]
    #[must_use]
    pub fn token_text(&self) -> &'a str {
        self.source
            .get(self.token_start..self.pos)
            .unwrap_or_default()
    }

    #[inline]
    #[must_use]
    pub fn number_value(&self) -> f64 {
        self.number_value
    }

    /// Cooked value of the current template part; `None` when it contains an
    /// invalid escape.
    #[inline]
    #[must_use]
    pub fn template_cooked(&self) -> Option<&str> {
        self.template_cooked.as_deref()
    }

    /// Raw value of the current template part with line terminators normalized.
    #[inline]
    #[must_use]
    pub fn template_raw(&self) -> &str {
        &self.template_raw
    }

    /// Offset of the first invalid escape in the current template part.
    #[inline]
    #[must_use]
    pub fn invalid_escape_pos(&self) -> Option<u32> {
        self.invalid_escape_pos
    }

    /// Pattern text of the current regular expression literal.
    #[must_use]
    pub fn regex_pattern(&self) -> &'a str {
        let end = self.regex_flags_start.saturating_sub(1);
        self.source
            .get(self.token_start + 1..end)
            .unwrap_or_default()
    }

    /// Flags of the current regular expression literal.
    #[must_use]
    pub fn regex_flags(&self) -> &'a str {
        self.source
            .get(self.regex_flags_start..self.pos)
            .unwrap_or_default()
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    #[must_use]
    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token: self.token,
            token_start: self.token_start,
            token_flags: self.token_flags,
            token_value: self.token_value.clone(),
            number_value: self.number_value,
            template_cooked: self.template_cooked.clone(),
            template_raw: self.template_raw.clone(),
            invalid_escape_pos: self.invalid_escape_pos,
            regex_flags_start: self.regex_flags_start,
            at_first_token: self.at_first_token,
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token = snapshot.token;
        self.token_start = snapshot.token_start;
        self.token_flags = snapshot.token_flags;
        self.token_value = snapshot.token_value;
        self.number_value = snapshot.number_value;
        self.template_cooked = snapshot.template_cooked;
        self.template_raw = snapshot.template_raw;
        self.invalid_escape_pos = snapshot.invalid_escape_pos;
        self.regex_flags_start = snapshot.regex_flags_start;
        self.at_first_token = snapshot.at_first_token;
    }

    // =========================================================================
    // Low-level cursor helpers
    // =========================================================================

    #[inline]
    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.bytes.get(pos).copied()
    }

    /// Code point at the cursor.
    #[inline]
    fn peek_char(&self) -> Option<u32> {
        let b = self.peek_byte()?;
        if b < 0x80 {
            return Some(u32::from(b));
        }
        self.source[self.pos..].chars().next().map(|c| c as u32)
    }

    #[inline]
    fn advance_char(&mut self, ch: u32) {
        self.pos += char::from_u32(ch).map_or(1, char::len_utf8);
    }

    fn error(&self, code: u32, start: usize, end: usize, args: &[&str]) -> Diagnostic {
        Diagnostic::new(code, start as u32, end as u32, args)
    }

    fn skip_hashbang(&mut self) {
        if self.bytes.starts_with(b"#!") {
            self.pos = 2;
            self.skip_line_comment_body();
        }
    }

    // =========================================================================
    // Trivia
    // =========================================================================

    /// Advance to the next line terminator without consuming it.
    fn skip_line_comment_body(&mut self) {
        while let Some(ch) = self.peek_char() {
            if is_line_break(ch) {
                break;
            }
            self.advance_char(ch);
        }
    }

    fn skip_block_comment(&mut self) -> ScanResult<()> {
        let start = self.pos;
        self.pos += 2;
        loop {
            let Some(offset) = memchr2(b'*', b'\n', &self.bytes[self.pos..]).map(|o| self.pos + o)
            else {
                return Err(self.error(
                    diagnostic_codes::UNTERMINATED_COMMENT,
                    start,
                    self.bytes.len(),
                    &[],
                ));
            };
            if self.contains_line_break(self.pos, offset) {
                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
            }
            if self.bytes[offset] == b'\n' {
                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                self.pos = offset + 1;
                continue;
            }
            if self.byte_at(offset + 1) == Some(b'/') {
                self.pos = offset + 2;
                return Ok(());
            }
            self.pos = offset + 1;
        }
    }

    /// Whether `[from, to)` contains CR, LS or PS. LF is found by the caller.
    fn contains_line_break(&self, from: usize, to: usize) -> bool {
        let slice = &self.bytes[from..to];
        slice.contains(&b'\r')
            || slice
                .windows(3)
                .any(|w| w[0] == 0xE2 && w[1] == 0x80 && (w[2] == 0xA8 || w[2] == 0xA9))
    }

    fn skip_trivia(&mut self) -> ScanResult<()> {
        while let Some(b) = self.peek_byte() {
            match b {
                b' ' | b'\t' | 0x0B | 0x0C => self.pos += 1,
                b'\n' | b'\r' => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += 1;
                }
                b'/' => match self.byte_at(self.pos + 1) {
                    Some(b'/') => {
                        self.pos += 2;
                        self.skip_line_comment_body();
                    }
                    Some(b'*') => self.skip_block_comment()?,
                    _ => break,
                },
                b'<' if self.options.html_comments
                    && self.bytes[self.pos..].starts_with(b"<!--") =>
                {
                    self.pos += 4;
                    self.skip_line_comment_body();
                }
                b'-' if self.options.html_comments
                    && (self.at_first_token
                        || self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK))
                    && self.bytes[self.pos..].starts_with(b"-->") =>
                {
                    self.pos += 3;
                    self.skip_line_comment_body();
                }
                _ if b >= 0x80 => {
                    let Some(ch) = self.peek_char() else { break };
                    if is_line_break(ch) {
                        self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    } else if !is_white_space_single_line(ch) {
                        break;
                    }
                    self.advance_char(ch);
                }
                _ => break,
            }
        }
        Ok(())
    }

    // =========================================================================
    // Main entry point
    // =========================================================================

    /// Scan the next token.
    pub fn scan(&mut self) -> ScanResult<SyntaxKind> {
        if self.bytes.len() > MAX_SOURCE_LENGTH {
            return Err(self.error(diagnostic_codes::SOURCE_TOO_LARGE, 0, 0, &[]));
        }
        self.token_flags = TokenFlags::empty();
        self.token_value.clear();
        self.skip_trivia()?;
        self.at_first_token = false;
        self.token_start = self.pos;

        let Some(b) = self.peek_byte() else {
            self.token = SyntaxKind::EndOfFileToken;
            return Ok(self.token);
        };

        let kind = match b {
            b'{' => self.single(SyntaxKind::OpenBraceToken),
            b'}' => self.single(SyntaxKind::CloseBraceToken),
            b'(' => self.single(SyntaxKind::OpenParenToken),
            b')' => self.single(SyntaxKind::CloseParenToken),
            b'[' => self.single(SyntaxKind::OpenBracketToken),
            b']' => self.single(SyntaxKind::CloseBracketToken),
            b';' => self.single(SyntaxKind::SemicolonToken),
            b',' => self.single(SyntaxKind::CommaToken),
            b':' => self.single(SyntaxKind::ColonToken),
            b'~' => self.single(SyntaxKind::TildeToken),
            b'.' => {
                if self.byte_at(self.pos + 1).is_some_and(|d| d.is_ascii_digit()) {
                    self.scan_number()?
                } else if self.bytes[self.pos..].starts_with(b"...") {
                    self.pos += 3;
                    SyntaxKind::DotDotDotToken
                } else {
                    self.single(SyntaxKind::DotToken)
                }
            }
            b'?' => match self.byte_at(self.pos + 1) {
                Some(b'?') => {
                    if self.byte_at(self.pos + 2) == Some(b'=') {
                        self.pos += 3;
                        SyntaxKind::QuestionQuestionEqualsToken
                    } else {
                        self.pos += 2;
                        SyntaxKind::QuestionQuestionToken
                    }
                }
                // `a?.5:b` is a conditional, not optional chaining.
                Some(b'.') if !self.byte_at(self.pos + 2).is_some_and(|d| d.is_ascii_digit()) => {
                    self.pos += 2;
                    SyntaxKind::QuestionDotToken
                }
                _ => self.single(SyntaxKind::QuestionToken),
            },
            b'=' => match self.byte_at(self.pos + 1) {
                Some(b'=') => {
                    if self.byte_at(self.pos + 2) == Some(b'=') {
                        self.pos += 3;
                        SyntaxKind::EqualsEqualsEqualsToken
                    } else {
                        self.pos += 2;
                        SyntaxKind::EqualsEqualsToken
                    }
                }
                Some(b'>') => {
                    self.pos += 2;
                    SyntaxKind::EqualsGreaterThanToken
                }
                _ => self.single(SyntaxKind::EqualsToken),
            },
            b'!' => {
                if self.byte_at(self.pos + 1) == Some(b'=') {
                    if self.byte_at(self.pos + 2) == Some(b'=') {
                        self.pos += 3;
                        SyntaxKind::ExclamationEqualsEqualsToken
                    } else {
                        self.pos += 2;
                        SyntaxKind::ExclamationEqualsToken
                    }
                } else {
                    self.single(SyntaxKind::ExclamationToken)
                }
            }
            b'+' => match self.byte_at(self.pos + 1) {
                Some(b'+') => self.double(SyntaxKind::PlusPlusToken),
                Some(b'=') => self.double(SyntaxKind::PlusEqualsToken),
                _ => self.single(SyntaxKind::PlusToken),
            },
            b'-' => match self.byte_at(self.pos + 1) {
                Some(b'-') => self.double(SyntaxKind::MinusMinusToken),
                Some(b'=') => self.double(SyntaxKind::MinusEqualsToken),
                _ => self.single(SyntaxKind::MinusToken),
            },
            b'*' => match (self.byte_at(self.pos + 1), self.byte_at(self.pos + 2)) {
                (Some(b'*'), Some(b'=')) => {
                    self.pos += 3;
                    SyntaxKind::AsteriskAsteriskEqualsToken
                }
                (Some(b'*'), _) => self.double(SyntaxKind::AsteriskAsteriskToken),
                (Some(b'='), _) => self.double(SyntaxKind::AsteriskEqualsToken),
                _ => self.single(SyntaxKind::AsteriskToken),
            },
            b'/' => {
                if self.byte_at(self.pos + 1) == Some(b'=') {
                    self.double(SyntaxKind::SlashEqualsToken)
                } else {
                    self.single(SyntaxKind::SlashToken)
                }
            }
            b'%' => {
                if self.byte_at(self.pos + 1) == Some(b'=') {
                    self.double(SyntaxKind::PercentEqualsToken)
                } else {
                    self.single(SyntaxKind::PercentToken)
                }
            }
            b'^' => {
                if self.byte_at(self.pos + 1) == Some(b'=') {
                    self.double(SyntaxKind::CaretEqualsToken)
                } else {
                    self.single(SyntaxKind::CaretToken)
                }
            }
            b'&' => match (self.byte_at(self.pos + 1), self.byte_at(self.pos + 2)) {
                (Some(b'&'), Some(b'=')) => {
                    self.pos += 3;
                    SyntaxKind::AmpersandAmpersandEqualsToken
                }
                (Some(b'&'), _) => self.double(SyntaxKind::AmpersandAmpersandToken),
                (Some(b'='), _) => self.double(SyntaxKind::AmpersandEqualsToken),
                _ => self.single(SyntaxKind::AmpersandToken),
            },
            b'|' => match (self.byte_at(self.pos + 1), self.byte_at(self.pos + 2)) {
                (Some(b'|'), Some(b'=')) => {
                    self.pos += 3;
                    SyntaxKind::BarBarEqualsToken
                }
                (Some(b'|'), _) => self.double(SyntaxKind::BarBarToken),
                (Some(b'='), _) => self.double(SyntaxKind::BarEqualsToken),
                _ => self.single(SyntaxKind::BarToken),
            },
            b'<' => match (self.byte_at(self.pos + 1), self.byte_at(self.pos + 2)) {
                (Some(b'<'), Some(b'=')) => {
                    self.pos += 3;
                    SyntaxKind::LessThanLessThanEqualsToken
                }
                (Some(b'<'), _) => self.double(SyntaxKind::LessThanLessThanToken),
                (Some(b'='), _) => self.double(SyntaxKind::LessThanEqualsToken),
                _ => self.single(SyntaxKind::LessThanToken),
            },
            b'>' => self.scan_greater_than(),
            b'`' => {
                self.pos += 1;
                self.scan_template(true)?
            }
            b'"' | b'\'' => self.scan_string(b)?,
            b'0'..=b'9' => self.scan_number()?,
            b'#' => self.scan_private_identifier()?,
            b'\\' => self.scan_identifier()?,
            _ => {
                let ch = self.peek_char().unwrap_or(u32::from(b));
                if is_identifier_start(ch) {
                    self.scan_identifier()?
                } else {
                    let text = char::from_u32(ch).map(String::from).unwrap_or_default();
                    return Err(self.error(
                        diagnostic_codes::INVALID_CHARACTER,
                        self.pos,
                        self.pos + text.len().max(1),
                        &[&text],
                    ));
                }
            }
        };

        self.token = kind;
        Ok(kind)
    }

    #[inline]
    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    #[inline]
    fn double(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 2;
        kind
    }

    fn scan_greater_than(&mut self) -> SyntaxKind {
        let rest = &self.bytes[self.pos..];
        let (kind, len) = if rest.starts_with(b">>>=") {
            (SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken, 4)
        } else if rest.starts_with(b">>>") {
            (SyntaxKind::GreaterThanGreaterThanGreaterThanToken, 3)
        } else if rest.starts_with(b">>=") {
            (SyntaxKind::GreaterThanGreaterThanEqualsToken, 3)
        } else if rest.starts_with(b">>") {
            (SyntaxKind::GreaterThanGreaterThanToken, 2)
        } else if rest.starts_with(b">=") {
            (SyntaxKind::GreaterThanEqualsToken, 2)
        } else {
            (SyntaxKind::GreaterThanToken, 1)
        };
        self.pos += len;
        kind
    }

    // =========================================================================
    // Re-scanning
    // =========================================================================

    /// Re-scan the current `/` or `/=` token as a regular expression literal.
    pub fn re_scan_slash_token(&mut self) -> ScanResult<SyntaxKind> {
        if !matches!(self.token, SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken) {
            return Ok(self.token);
        }
        let start = self.token_start;
        self.pos = start + 1;
        let mut in_class = false;
        loop {
            let Some(ch) = self.peek_char() else {
                return Err(self.unterminated_regex(start));
            };
            if is_line_break(ch) {
                return Err(self.unterminated_regex(start));
            }
            match ch {
                0x5C => {
                    // `\`
                    self.pos += 1;
                    match self.peek_char() {
                        Some(next) if !is_line_break(next) => self.advance_char(next),
                        _ => return Err(self.unterminated_regex(start)),
                    }
                    continue;
                }
                0x5B => in_class = true,
                0x5D => in_class = false,
                0x2F if !in_class => break,
                _ => {}
            }
            self.advance_char(ch);
        }
        self.pos += 1;
        self.regex_flags_start = self.pos;

        let mut seen = String::new();
        while let Some(ch) = self.peek_char() {
            if ch == CharacterCodes::BACKSLASH {
                return Err(self.error(
                    diagnostic_codes::INVALID_REGULAR_EXPRESSION_FLAG,
                    self.pos,
                    self.pos + 1,
                    &["\\"],
                ));
            }
            if !is_identifier_part(ch) {
                break;
            }
            let flag = char::from_u32(ch).unwrap_or('?');
            let flag_text = flag.to_string();
            if !"dgimsuyv".contains(flag) {
                return Err(self.error(
                    diagnostic_codes::INVALID_REGULAR_EXPRESSION_FLAG,
                    self.pos,
                    self.pos + flag.len_utf8(),
                    &[&flag_text],
                ));
            }
            if seen.contains(flag) || (flag == 'u' && seen.contains('v')) || (flag == 'v' && seen.contains('u')) {
                return Err(self.error(
                    diagnostic_codes::DUPLICATE_REGULAR_EXPRESSION_FLAG,
                    self.pos,
                    self.pos + 1,
                    &[&flag_text],
                ));
            }
            seen.push(flag);
            self.pos += 1;
        }

        self.token = SyntaxKind::RegularExpressionLiteral;
        Ok(self.token)
    }

    fn unterminated_regex(&self, start: usize) -> Diagnostic {
        self.error(
            diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
            start,
            self.pos,
            &[],
        )
    }

    /// Re-scan the current `}` token as the continuation of a template literal.
    pub fn re_scan_template_token(&mut self) -> ScanResult<SyntaxKind> {
        if self.token != SyntaxKind::CloseBraceToken {
            return Ok(self.token);
        }
        self.pos = self.token_start + 1;
        let kind = self.scan_template(false)?;
        self.token = kind;
        Ok(kind)
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    fn scan_identifier(&mut self) -> ScanResult<SyntaxKind> {
        let mut value = String::new();
        let mut chunk_start = self.pos;
        let mut first = true;
        while let Some(ch) = self.peek_char() {
            if ch == CharacterCodes::BACKSLASH {
                value.push_str(&self.source[chunk_start..self.pos]);
                let escape_start = self.pos;
                self.pos += 1;
                if self.peek_byte() != Some(b'u') {
                    return Err(self.error(
                        diagnostic_codes::INVALID_UNICODE_ESCAPE_SEQUENCE,
                        escape_start,
                        self.pos,
                        &[],
                    ));
                }
                self.pos += 1;
                let code_point = self.scan_unicode_escape_value(escape_start)?;
                let valid = if first {
                    is_identifier_start(code_point)
                } else {
                    is_identifier_part(code_point)
                };
                let Some(decoded) = char::from_u32(code_point).filter(|_| valid) else {
                    return Err(self.error(
                        diagnostic_codes::INVALID_UNICODE_ESCAPE_SEQUENCE,
                        escape_start,
                        self.pos,
                        &[],
                    ));
                };
                value.push(decoded);
                self.token_flags |= TokenFlags::UNICODE_ESCAPE;
                chunk_start = self.pos;
            } else if (first && is_identifier_start(ch)) || (!first && is_identifier_part(ch)) {
                self.advance_char(ch);
            } else {
                break;
            }
            first = false;
        }
        value.push_str(&self.source[chunk_start..self.pos]);
        // Escaped keywords stay identifiers; the parser rejects them by name.
        let kind = if self.token_flags.contains(TokenFlags::UNICODE_ESCAPE) {
            SyntaxKind::Identifier
        } else {
            text_to_keyword(&value).unwrap_or(SyntaxKind::Identifier)
        };
        self.token_value = value;
        Ok(kind)
    }

    fn scan_private_identifier(&mut self) -> ScanResult<SyntaxKind> {
        let hash = self.pos;
        self.pos += 1;
        let starts_name = match self.peek_char() {
            Some(ch) => ch == CharacterCodes::BACKSLASH || is_identifier_start(ch),
            None => false,
        };
        if !starts_name {
            return Err(self.error(diagnostic_codes::INVALID_PRIVATE_NAME, hash, self.pos, &[]));
        }
        self.scan_identifier()?;
        Ok(SyntaxKind::PrivateIdentifier)
    }

    // =========================================================================
    // Escapes
    // =========================================================================

    /// Read the value of `\u` escape; the cursor is just past the `u`.
    fn scan_unicode_escape_value(&mut self, escape_start: usize) -> ScanResult<u32> {
        if self.peek_byte() == Some(b'{') {
            self.pos += 1;
            let digits_start = self.pos;
            let mut value: u32 = 0;
            while let Some(b) = self.peek_byte() {
                let Some(digit) = digit_value(u32::from(b), 16) else {
                    break;
                };
                value = value.saturating_mul(16).saturating_add(digit);
                if value > CharacterCodes::MAX_CODE_POINT {
                    return Err(self.error(
                        diagnostic_codes::UNICODE_ESCAPE_OUT_OF_RANGE,
                        escape_start,
                        self.pos + 1,
                        &[],
                    ));
                }
                self.pos += 1;
            }
            if self.pos == digits_start || self.peek_byte() != Some(b'}') {
                return Err(self.error(
                    diagnostic_codes::INVALID_UNICODE_ESCAPE_SEQUENCE,
                    escape_start,
                    self.pos,
                    &[],
                ));
            }
            self.pos += 1;
            return Ok(value);
        }

        self.scan_hex_digits(4).ok_or_else(|| {
            self.error(
                diagnostic_codes::INVALID_UNICODE_ESCAPE_SEQUENCE,
                escape_start,
                self.pos,
                &[],
            )
        })
    }

    /// Consume exactly `count` hex digits.
    fn scan_hex_digits(&mut self, count: usize) -> Option<u32> {
        let digits = self.bytes.get(self.pos..self.pos + count)?;
        let mut value = 0u32;
        for &b in digits {
            value = value * 16 + digit_value(u32::from(b), 16)?;
        }
        self.pos += count;
        Some(value)
    }

    /// Scan an escape sequence in a string or template; the cursor is just
    /// past the backslash.
    fn scan_escape(&mut self, in_template: bool) -> ScanResult<Escape> {
        let escape_start = self.pos - 1;
        let Some(ch) = self.peek_char() else {
            return Err(self.error(
                diagnostic_codes::INVALID_ESCAPE_SEQUENCE,
                escape_start,
                self.pos,
                &[],
            ));
        };
        self.advance_char(ch);
        let value = match char::from_u32(ch).unwrap_or('\u{FFFD}') {
            'n' => 0x0A,
            't' => 0x09,
            'r' => 0x0D,
            'b' => 0x08,
            'f' => 0x0C,
            'v' => 0x0B,
            '\r' => {
                if self.peek_byte() == Some(b'\n') {
                    self.pos += 1;
                }
                return Ok(Escape::LineContinuation);
            }
            '\n' | '\u{2028}' | '\u{2029}' => return Ok(Escape::LineContinuation),
            '0' if !self.peek_byte().is_some_and(|b| b.is_ascii_digit()) => 0,
            '0'..='7' => {
                if in_template {
                    return Err(self.error(
                        diagnostic_codes::INVALID_ESCAPE_IN_TEMPLATE,
                        escape_start,
                        self.pos,
                        &[],
                    ));
                }
                self.token_flags |= TokenFlags::OCTAL_ESCAPE;
                let mut value = ch - u32::from(b'0');
                let max_digits = if value <= 3 { 2 } else { 1 };
                for _ in 0..max_digits {
                    match self.peek_byte() {
                        Some(b) if is_octal_digit(u32::from(b)) => {
                            value = value * 8 + u32::from(b - b'0');
                            self.pos += 1;
                        }
                        _ => break,
                    }
                }
                value
            }
            '8' | '9' => {
                if in_template {
                    return Err(self.error(
                        diagnostic_codes::INVALID_ESCAPE_IN_TEMPLATE,
                        escape_start,
                        self.pos,
                        &[],
                    ));
                }
                self.token_flags |= TokenFlags::OCTAL_ESCAPE;
                ch
            }
            'x' => self.scan_hex_digits(2).ok_or_else(|| {
                self.error(
                    diagnostic_codes::INVALID_HEXADECIMAL_ESCAPE_SEQUENCE,
                    escape_start,
                    self.pos,
                    &[],
                )
            })?,
            'u' => {
                let value = self.scan_unicode_escape_value(escape_start)?;
                return Ok(Escape::Char(value));
            }
            _ => ch,
        };
        Ok(Escape::Char(value))
    }

    // =========================================================================
    // Strings and templates
    // =========================================================================

    fn scan_string(&mut self, quote: u8) -> ScanResult<SyntaxKind> {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        let mut chunk_start = self.pos;
        // Pending high surrogate from a `\uD8xx` escape.
        let mut high_surrogate: Option<u32> = None;
        loop {
            let Some(b) = self.peek_byte() else {
                return Err(self.error(
                    diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                    start,
                    self.pos,
                    &[],
                ));
            };
            if b == quote {
                push_chunk(&mut value, &mut high_surrogate, &self.source[chunk_start..self.pos]);
                flush_surrogate(&mut value, &mut high_surrogate);
                self.pos += 1;
                break;
            }
            match b {
                b'\\' => {
                    push_chunk(&mut value, &mut high_surrogate, &self.source[chunk_start..self.pos]);
                    self.pos += 1;
                    match self.scan_escape(false)? {
                        Escape::Char(code) => push_code_point(&mut value, &mut high_surrogate, code),
                        Escape::LineContinuation => {
                            flush_surrogate(&mut value, &mut high_surrogate);
                        }
                    }
                    chunk_start = self.pos;
                }
                b'\n' | b'\r' => {
                    return Err(self.error(
                        diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                        start,
                        self.pos,
                        &[],
                    ));
                }
                _ => self.pos += 1,
            }
        }
        self.token_value = value;
        Ok(SyntaxKind::StringLiteral)
    }

    /// Scan a template part. The cursor is just past the opening `` ` `` or `}`.
    fn scan_template(&mut self, starts_with_backtick: bool) -> ScanResult<SyntaxKind> {
        let start = self.token_start;
        let content_start = self.pos;
        let mut cooked = Some(String::new());
        let mut high_surrogate: Option<u32> = None;
        let mut invalid_escape_pos = None;

        let (content_end, kind) = loop {
            let Some(ch) = self.peek_char() else {
                return Err(self.error(
                    diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL,
                    start,
                    self.pos,
                    &[],
                ));
            };
            match ch {
                0x60 => {
                    // `
                    let end = self.pos;
                    self.pos += 1;
                    let kind = if starts_with_backtick {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                    break (end, kind);
                }
                0x24 if self.byte_at(self.pos + 1) == Some(b'{') => {
                    let end = self.pos;
                    self.pos += 2;
                    let kind = if starts_with_backtick {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                    break (end, kind);
                }
                0x5C => {
                    let escape_start = self.pos;
                    self.pos += 1;
                    match self.scan_escape(true) {
                        Ok(Escape::Char(code)) => {
                            if let Some(text) = cooked.as_mut() {
                                push_code_point(text, &mut high_surrogate, code);
                            }
                        }
                        Ok(Escape::LineContinuation) => {}
                        Err(_) => {
                            cooked = None;
                            invalid_escape_pos.get_or_insert(escape_start as u32);
                        }
                    }
                }
                0x0D => {
                    self.pos += 1;
                    if self.peek_byte() == Some(b'\n') {
                        self.pos += 1;
                    }
                    if let Some(text) = cooked.as_mut() {
                        flush_surrogate(text, &mut high_surrogate);
                        text.push('\n');
                    }
                }
                _ => {
                    self.advance_char(ch);
                    if let Some(text) = cooked.as_mut() {
                        flush_surrogate(text, &mut high_surrogate);
                        text.push(char::from_u32(ch).unwrap_or('\u{FFFD}'));
                    }
                }
            }
        };

        if let Some(text) = cooked.as_mut() {
            flush_surrogate(text, &mut high_surrogate);
        }
        let raw = &self.source[content_start..content_end];
        self.template_raw = if raw.contains('\r') {
            raw.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            raw.to_string()
        };
        if invalid_escape_pos.is_some() {
            self.token_flags |= TokenFlags::INVALID_TEMPLATE_ESCAPE;
        }
        self.template_cooked = cooked;
        self.invalid_escape_pos = invalid_escape_pos;
        Ok(kind)
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    fn scan_number(&mut self) -> ScanResult<SyntaxKind> {
        let start = self.pos;
        let first = self.peek_byte().unwrap_or(b'0');
        let second = self.byte_at(self.pos + 1);

        if first == b'0' {
            let radix = match second {
                Some(b'x' | b'X') => Some(16),
                Some(b'o' | b'O') => Some(8),
                Some(b'b' | b'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                return self.scan_radix_number(start, radix);
            }
            if second.is_some_and(|b| b.is_ascii_digit() || b == b'_') {
                return self.scan_legacy_octal_like(start);
            }
        }

        let mut is_integer = true;
        if first != b'.' {
            self.scan_digits(10, true)?;
        }
        if self.peek_byte() == Some(b'.') {
            is_integer = false;
            self.pos += 1;
            if self.peek_byte() == Some(b'_') {
                return Err(self.separator_error(self.pos, false));
            }
            self.scan_digits(10, true)?;
        }
        self.scan_exponent(&mut is_integer)?;

        if self.peek_byte() == Some(b'n') {
            if !is_integer {
                return Err(self.error(
                    diagnostic_codes::INVALID_BIGINT_LITERAL,
                    start,
                    self.pos + 1,
                    &[],
                ));
            }
            let digits = self.strip_separators(start, self.pos);
            self.pos += 1;
            self.check_after_numeric()?;
            self.token_value = digits;
            return Ok(SyntaxKind::BigIntLiteral);
        }

        let text = self.strip_separators(start, self.pos);
        self.number_value = text.parse::<f64>().unwrap_or(f64::NAN);
        self.check_after_numeric()?;
        Ok(SyntaxKind::NumericLiteral)
    }

    fn scan_exponent(&mut self, is_integer: &mut bool) -> ScanResult<()> {
        if !matches!(self.peek_byte(), Some(b'e' | b'E')) {
            return Ok(());
        }
        *is_integer = false;
        self.pos += 1;
        if matches!(self.peek_byte(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        if self.scan_digits(10, true)? == 0 {
            return Err(self.error(diagnostic_codes::DIGIT_EXPECTED, self.pos, self.pos, &[]));
        }
        Ok(())
    }

    fn scan_radix_number(&mut self, start: usize, radix: u32) -> ScanResult<SyntaxKind> {
        self.pos += 2;
        self.token_flags |= TokenFlags::NON_DECIMAL;
        let digits_start = self.pos;
        if self.scan_digits(radix, true)? == 0 {
            let code = match radix {
                16 => diagnostic_codes::HEXADECIMAL_DIGIT_EXPECTED,
                8 => diagnostic_codes::OCTAL_DIGIT_EXPECTED,
                _ => diagnostic_codes::BINARY_DIGIT_EXPECTED,
            };
            return Err(self.error(code, self.pos, self.pos, &[]));
        }
        let digits = self.strip_separators(digits_start, self.pos);

        if self.peek_byte() == Some(b'n') {
            let text = self.strip_separators(start, self.pos);
            self.pos += 1;
            self.check_after_numeric()?;
            self.token_value = text;
            return Ok(SyntaxKind::BigIntLiteral);
        }

        self.number_value = digits.bytes().fold(0.0, |acc, b| {
            acc * f64::from(radix) + f64::from(digit_value(u32::from(b), radix).unwrap_or(0))
        });
        self.check_after_numeric()?;
        Ok(SyntaxKind::NumericLiteral)
    }

    /// `017` (legacy octal) or `089` (decimal with a leading zero).
    fn scan_legacy_octal_like(&mut self, start: usize) -> ScanResult<SyntaxKind> {
        self.token_flags |= TokenFlags::LEGACY_OCTAL;
        self.pos += 1;
        let mut all_octal = true;
        while let Some(b) = self.peek_byte() {
            if b == b'_' {
                return Err(self.separator_error(self.pos, false));
            }
            if !b.is_ascii_digit() {
                break;
            }
            all_octal &= is_octal_digit(u32::from(b));
            self.pos += 1;
        }

        if all_octal {
            if self.peek_byte() == Some(b'n') {
                return Err(self.error(
                    diagnostic_codes::LEGACY_OCTAL_BIGINT,
                    start,
                    self.pos + 1,
                    &[],
                ));
            }
            self.number_value = self.source[start..self.pos]
                .bytes()
                .fold(0.0, |acc, b| acc * 8.0 + f64::from(b - b'0'));
            self.check_after_numeric()?;
            return Ok(SyntaxKind::NumericLiteral);
        }

        let mut is_integer = true;
        if self.peek_byte() == Some(b'.') {
            is_integer = false;
            self.pos += 1;
            self.scan_digits(10, false)?;
        }
        self.scan_exponent(&mut is_integer)?;
        if self.peek_byte() == Some(b'n') {
            return Err(self.error(
                diagnostic_codes::INVALID_BIGINT_LITERAL,
                start,
                self.pos + 1,
                &[],
            ));
        }
        self.number_value = self.source[start..self.pos].parse::<f64>().unwrap_or(f64::NAN);
        self.check_after_numeric()?;
        Ok(SyntaxKind::NumericLiteral)
    }

    /// Consume digits of `radix`, validating `_` separators. Returns the
    /// number of digits consumed.
    fn scan_digits(&mut self, radix: u32, allow_separators: bool) -> ScanResult<usize> {
        let mut count = 0;
        let mut previous_was_digit = false;
        while let Some(b) = self.peek_byte() {
            if b == b'_' {
                if !allow_separators || !previous_was_digit {
                    return Err(self.separator_error(self.pos, false));
                }
                let next = self.byte_at(self.pos + 1);
                if next == Some(b'_') {
                    return Err(self.separator_error(self.pos + 1, true));
                }
                if !next.is_some_and(|n| digit_value(u32::from(n), radix).is_some()) {
                    return Err(self.separator_error(self.pos, false));
                }
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
                previous_was_digit = false;
                self.pos += 1;
                continue;
            }
            if digit_value(u32::from(b), radix).is_none() {
                break;
            }
            previous_was_digit = true;
            count += 1;
            self.pos += 1;
        }
        Ok(count)
    }

    fn separator_error(&self, pos: usize, consecutive: bool) -> Diagnostic {
        let code = if consecutive {
            diagnostic_codes::MULTIPLE_CONSECUTIVE_NUMERIC_SEPARATORS
        } else {
            diagnostic_codes::NUMERIC_SEPARATORS_NOT_ALLOWED_HERE
        };
        self.error(code, pos, pos + 1, &[])
    }

    fn strip_separators(&self, start: usize, end: usize) -> String {
        let text = &self.source[start..end];
        if self.token_flags.contains(TokenFlags::CONTAINS_SEPARATOR) {
            text.replace('_', "")
        } else {
            text.to_string()
        }
    }

    /// `3in x` and `1a` are errors: no IdentifierStart or digit may follow.
    fn check_after_numeric(&self) -> ScanResult<()> {
        match self.peek_char() {
            Some(ch) if is_identifier_start(ch) || is_digit(ch) || ch == CharacterCodes::BACKSLASH => {
                Err(self.error(
                    diagnostic_codes::IDENTIFIER_DIRECTLY_AFTER_NUMBER,
                    self.pos,
                    self.pos + 1,
                    &[],
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Append a code point to `out`, pairing UTF-16 surrogate escapes.
///
/// Lone surrogates cannot live in a Rust `String`; they decode to U+FFFD.
fn push_code_point(out: &mut String, high_surrogate: &mut Option<u32>, code: u32) {
    if (0xDC00..=0xDFFF).contains(&code) {
        if let Some(high) = high_surrogate.take() {
            let combined = 0x10000 + ((high - 0xD800) << 10) + (code - 0xDC00);
            out.push(char::from_u32(combined).unwrap_or('\u{FFFD}'));
            return;
        }
        out.push('\u{FFFD}');
        return;
    }
    flush_surrogate(out, high_surrogate);
    if (0xD800..=0xDBFF).contains(&code) {
        *high_surrogate = Some(code);
        return;
    }
    out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
}

/// Append literal source text, closing any pending surrogate first.
fn push_chunk(out: &mut String, high_surrogate: &mut Option<u32>, chunk: &str) {
    if chunk.is_empty() {
        return;
    }
    flush_surrogate(out, high_surrogate);
    out.push_str(chunk);
}

fn flush_surrogate(out: &mut String, high_surrogate: &mut Option<u32>) {
    if high_surrogate.take().is_some() {
        out.push('\u{FFFD}');
    }
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod tests;
