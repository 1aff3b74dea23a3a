//! Tests for the scanner state machine.
use super::*;

fn scan_all(source: &str) -> Vec<SyntaxKind> {
    let mut scanner = ScannerState::new(source, ScanOptions::default());
    let mut kinds = Vec::new();
    loop {
        let kind = scanner.scan().expect("scan failed");
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        kinds.push(kind);
    }
    kinds
}

fn scan_one(source: &str) -> ScannerState<'_> {
    let mut scanner = ScannerState::new(source, ScanOptions::default());
    scanner.scan().expect("scan failed");
    scanner
}

fn scan_error(source: &str) -> u32 {
    let mut scanner = ScannerState::new(source, ScanOptions::default());
    loop {
        match scanner.scan() {
            Ok(SyntaxKind::EndOfFileToken) => panic!("expected a lexical error for {source:?}"),
            Ok(_) => {}
            Err(diag) => return diag.code,
        }
    }
}

#[test]
fn scans_longest_punctuators() {
    assert_eq!(
        scan_all("a >>>= b ?? c ??= d ?. e ... **="),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionQuestionToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionQuestionEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionDotToken,
            SyntaxKind::Identifier,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::AsteriskAsteriskEqualsToken,
        ]
    );
}

#[test]
fn question_dot_before_digit_is_conditional() {
    assert_eq!(
        scan_all("a?.5:b"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::QuestionToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::ColonToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn contextual_keywords_scan_as_keywords_with_their_text() {
    let scanner = scan_one("await");
    assert_eq!(scanner.token(), SyntaxKind::AwaitKeyword);
    assert_eq!(scanner.token_value(), "await");
}

#[test]
fn escaped_keywords_scan_as_identifiers() {
    let scanner = scan_one("\\u0061sync");
    assert_eq!(scanner.token(), SyntaxKind::Identifier);
    assert!(scanner.has_unicode_escape());
    assert_eq!(scanner.token_value(), "async");

    let scanner = scan_one("v\\u{61}r");
    assert_eq!(scanner.token(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "var");
    assert!(scanner.has_unicode_escape());
}

#[test]
fn escaped_identifier_must_be_identifier_char() {
    assert_eq!(
        scan_error("\\u0030abc"),
        diagnostic_codes::INVALID_UNICODE_ESCAPE_SEQUENCE
    );
}

#[test]
fn unicode_identifiers_and_private_names() {
    let scanner = scan_one("ünïcödé");
    assert_eq!(scanner.token(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "ünïcödé");

    let scanner = scan_one("#secret");
    assert_eq!(scanner.token(), SyntaxKind::PrivateIdentifier);
    assert_eq!(scanner.token_value(), "secret");
    assert_eq!(scanner.token_text(), "#secret");
}

#[test]
fn tracks_preceding_line_breaks_through_comments() {
    let mut scanner = ScannerState::new("a /* \n */ b // c\n d /* e */ f", ScanOptions::default());
    scanner.scan().unwrap();
    assert!(!scanner.has_preceding_line_break());
    scanner.scan().unwrap();
    assert_eq!(scanner.token_value(), "b");
    assert!(scanner.has_preceding_line_break());
    scanner.scan().unwrap();
    assert_eq!(scanner.token_value(), "d");
    assert!(scanner.has_preceding_line_break());
    scanner.scan().unwrap();
    assert_eq!(scanner.token_value(), "f");
    assert!(!scanner.has_preceding_line_break());
}

#[test]
fn paragraph_separator_is_a_line_break() {
    let mut scanner = ScannerState::new("a\u{2029}b", ScanOptions::default());
    scanner.scan().unwrap();
    scanner.scan().unwrap();
    assert!(scanner.has_preceding_line_break());
}

#[test]
fn unterminated_block_comment_is_lexical_error() {
    assert_eq!(scan_error("a /* b"), diagnostic_codes::UNTERMINATED_COMMENT);
}

#[test]
fn hashbang_is_skipped() {
    assert_eq!(scan_all("#!/usr/bin/env node\nx"), vec![SyntaxKind::Identifier]);
}

#[test]
fn html_comments_only_when_enabled() {
    let options = ScanOptions {
        html_comments: true,
    };
    let mut scanner = ScannerState::new("x <!-- y\n--> z\nw", options);
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "w");

    assert_eq!(
        scan_all("x <!-- y"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::LessThanToken,
            SyntaxKind::ExclamationToken,
            SyntaxKind::MinusMinusToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn html_close_comment_requires_line_start() {
    let options = ScanOptions {
        html_comments: true,
    };
    let mut scanner = ScannerState::new("x --> y", options);
    scanner.scan().unwrap();
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::MinusMinusToken);
}

#[test]
fn scans_numeric_literals() {
    let cases: &[(&str, f64)] = &[
        ("0", 0.0),
        ("42", 42.0),
        ("1_000_000", 1_000_000.0),
        ("0x1F", 31.0),
        ("0o17", 15.0),
        ("0b101", 5.0),
        (".5", 0.5),
        ("1.", 1.0),
        ("2e3", 2000.0),
        ("1.5E-1", 0.15),
    ];
    for (source, expected) in cases {
        let scanner = scan_one(source);
        assert_eq!(scanner.token(), SyntaxKind::NumericLiteral, "{source}");
        assert!(
            (scanner.number_value() - expected).abs() < f64::EPSILON,
            "{source}: got {}",
            scanner.number_value()
        );
    }
}

#[test]
fn legacy_octal_literals_are_flagged() {
    let scanner = scan_one("017");
    assert_eq!(scanner.number_value(), 15.0);
    assert!(scanner.token_flags().contains(TokenFlags::LEGACY_OCTAL));

    let scanner = scan_one("089");
    assert_eq!(scanner.number_value(), 89.0);
    assert!(scanner.token_flags().contains(TokenFlags::LEGACY_OCTAL));

    let scanner = scan_one("0");
    assert!(!scanner.token_flags().contains(TokenFlags::LEGACY_OCTAL));
}

#[test]
fn bigint_literals_keep_their_digits() {
    let scanner = scan_one("123n");
    assert_eq!(scanner.token(), SyntaxKind::BigIntLiteral);
    assert_eq!(scanner.token_value(), "123");

    let scanner = scan_one("0xF_Fn");
    assert_eq!(scanner.token(), SyntaxKind::BigIntLiteral);
    assert_eq!(scanner.token_value(), "0xFF");
}

#[test]
fn rejects_malformed_numbers() {
    assert_eq!(scan_error("1__0"), diagnostic_codes::MULTIPLE_CONSECUTIVE_NUMERIC_SEPARATORS);
    assert_eq!(scan_error("1_"), diagnostic_codes::NUMERIC_SEPARATORS_NOT_ALLOWED_HERE);
    assert_eq!(scan_error("0_1"), diagnostic_codes::NUMERIC_SEPARATORS_NOT_ALLOWED_HERE);
    assert_eq!(scan_error("0x"), diagnostic_codes::HEXADECIMAL_DIGIT_EXPECTED);
    assert_eq!(scan_error("1e"), diagnostic_codes::DIGIT_EXPECTED);
    assert_eq!(scan_error("3in x"), diagnostic_codes::IDENTIFIER_DIRECTLY_AFTER_NUMBER);
    assert_eq!(scan_error("1.5n"), diagnostic_codes::INVALID_BIGINT_LITERAL);
    assert_eq!(scan_error("07n"), diagnostic_codes::LEGACY_OCTAL_BIGINT);
}

#[test]
fn cooks_string_escapes() {
    let scanner = scan_one(r#""a\tb\x41B\u{1F600}\
c""#);
    assert_eq!(scanner.token(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.token_value(), "a\tbAB\u{1F600}c");
}

#[test]
fn pairs_surrogate_escapes() {
    let scanner = scan_one(r#"'😀'"#);
    assert_eq!(scanner.token_value(), "\u{1F600}");

    let scanner = scan_one(r#"'\uD83Dx'"#);
    assert_eq!(scanner.token_value(), "\u{FFFD}x");
}

#[test]
fn octal_escapes_are_flagged() {
    let scanner = scan_one(r"'\101'");
    assert_eq!(scanner.token_value(), "A");
    assert!(scanner.token_flags().contains(TokenFlags::OCTAL_ESCAPE));

    let scanner = scan_one(r"'\8'");
    assert_eq!(scanner.token_value(), "8");
    assert!(scanner.token_flags().contains(TokenFlags::OCTAL_ESCAPE));

    let scanner = scan_one(r"'\0'");
    assert!(!scanner.token_flags().contains(TokenFlags::OCTAL_ESCAPE));
}

#[test]
fn rejects_malformed_strings() {
    assert_eq!(scan_error("'abc"), diagnostic_codes::UNTERMINATED_STRING_LITERAL);
    assert_eq!(scan_error("'a\nb'"), diagnostic_codes::UNTERMINATED_STRING_LITERAL);
    assert_eq!(scan_error(r"'\x4'"), diagnostic_codes::INVALID_HEXADECIMAL_ESCAPE_SEQUENCE);
    assert_eq!(scan_error(r"'\u{110000}'"), diagnostic_codes::UNICODE_ESCAPE_OUT_OF_RANGE);
}

#[test]
fn line_separator_is_allowed_inside_strings() {
    let scanner = scan_one("'a\u{2028}b'");
    assert_eq!(scanner.token_value(), "a\u{2028}b");
}

#[test]
fn scans_template_parts_with_rescan() {
    let mut scanner = ScannerState::new("`a${x}b${y}c`", ScanOptions::default());
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::TemplateHead);
    assert_eq!(scanner.template_cooked(), Some("a"));
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::CloseBraceToken);
    assert_eq!(scanner.re_scan_template_token().unwrap(), SyntaxKind::TemplateMiddle);
    assert_eq!(scanner.template_raw(), "b");
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::CloseBraceToken);
    assert_eq!(scanner.re_scan_template_token().unwrap(), SyntaxKind::TemplateTail);
    assert_eq!(scanner.template_cooked(), Some("c"));
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::EndOfFileToken);
}

#[test]
fn template_normalizes_carriage_returns() {
    let scanner = scan_one("`a\r\nb\rc`");
    assert_eq!(scanner.token(), SyntaxKind::NoSubstitutionTemplateLiteral);
    assert_eq!(scanner.template_raw(), "a\nb\nc");
    assert_eq!(scanner.template_cooked(), Some("a\nb\nc"));
}

#[test]
fn invalid_template_escape_has_no_cooked_value() {
    let scanner = scan_one(r"`\unicode and \u{55}`");
    assert_eq!(scanner.token(), SyntaxKind::NoSubstitutionTemplateLiteral);
    assert_eq!(scanner.template_cooked(), None);
    assert_eq!(scanner.template_raw(), r"\unicode and \u{55}");
    assert_eq!(scanner.invalid_escape_pos(), Some(1));
    assert!(scanner.token_flags().contains(TokenFlags::INVALID_TEMPLATE_ESCAPE));
}

#[test]
fn unterminated_template_is_lexical_error() {
    assert_eq!(scan_error("`abc"), diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL);
}

#[test]
fn rescans_slash_as_regular_expression() {
    let mut scanner = ScannerState::new("/[/]\\/x/gi.source", ScanOptions::default());
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::SlashToken);
    assert_eq!(
        scanner.re_scan_slash_token().unwrap(),
        SyntaxKind::RegularExpressionLiteral
    );
    assert_eq!(scanner.regex_pattern(), "[/]\\/x");
    assert_eq!(scanner.regex_flags(), "gi");
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::DotToken);
}

#[test]
fn rescans_slash_equals_as_regular_expression() {
    let mut scanner = ScannerState::new("/=a/", ScanOptions::default());
    assert_eq!(scanner.scan().unwrap(), SyntaxKind::SlashEqualsToken);
    scanner.re_scan_slash_token().unwrap();
    assert_eq!(scanner.regex_pattern(), "=a");
    assert_eq!(scanner.regex_flags(), "");
}

#[test]
fn rejects_bad_regular_expressions() {
    let mut scanner = ScannerState::new("/abc\n/", ScanOptions::default());
    scanner.scan().unwrap();
    assert_eq!(
        scanner.re_scan_slash_token().unwrap_err().code,
        diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION_LITERAL
    );

    let mut scanner = ScannerState::new("/a/gg", ScanOptions::default());
    scanner.scan().unwrap();
    assert_eq!(
        scanner.re_scan_slash_token().unwrap_err().code,
        diagnostic_codes::DUPLICATE_REGULAR_EXPRESSION_FLAG
    );

    let mut scanner = ScannerState::new("/a/x", ScanOptions::default());
    scanner.scan().unwrap();
    assert_eq!(
        scanner.re_scan_slash_token().unwrap_err().code,
        diagnostic_codes::INVALID_REGULAR_EXPRESSION_FLAG
    );
}

#[test]
fn snapshot_restores_token_and_position() {
    let mut scanner = ScannerState::new("a b c", ScanOptions::default());
    scanner.scan().unwrap();
    let snapshot = scanner.save_state();
    scanner.scan().unwrap();
    scanner.scan().unwrap();
    assert_eq!(scanner.token_value(), "c");
    scanner.restore_state(snapshot);
    assert_eq!(scanner.token_value(), "a");
    assert_eq!(scanner.token_start(), 0);
    scanner.scan().unwrap();
    assert_eq!(scanner.token_value(), "b");
}

#[test]
fn invalid_character_is_lexical_error() {
    assert_eq!(scan_error("a @ b"), diagnostic_codes::INVALID_CHARACTER);
    assert_eq!(scan_error("# x"), diagnostic_codes::INVALID_PRIVATE_NAME);
}
