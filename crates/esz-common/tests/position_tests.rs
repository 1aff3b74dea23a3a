//! Tests for `LineMap` offset → line/column mapping.
use super::*;

#[test]
fn single_line_columns_are_byte_offsets() {
    let map = LineMap::build("let x = 1;");
    assert_eq!(map.line_count(), 1);
    assert_eq!(map.location(0), Location { line: 1, column: 0 });
    assert_eq!(map.location(4), Location { line: 1, column: 4 });
}

#[test]
fn every_line_terminator_starts_a_line() {
    let source = "a\nb\rc\r\nd\u{2028}e\u{2029}f";
    let map = LineMap::build(source);
    assert_eq!(map.line_count(), 6);

    let f = source.find('f').unwrap() as u32;
    assert_eq!(map.location(f), Location { line: 6, column: 0 });

    let d = source.find('d').unwrap() as u32;
    assert_eq!(map.location(d), Location { line: 4, column: 0 });
}

#[test]
fn crlf_counts_as_one_terminator() {
    let map = LineMap::build("x\r\n\r\ny");
    assert_eq!(map.line_count(), 3);
    assert_eq!(map.location(5), Location { line: 3, column: 0 });
}

#[test]
fn other_e2_sequences_are_not_terminators() {
    // U+2026 HORIZONTAL ELLIPSIS also starts with 0xE2.
    let map = LineMap::build("a\u{2026}b");
    assert_eq!(map.line_count(), 1);
}

#[test]
fn offsets_inside_a_line_resolve_to_that_line() {
    let map = LineMap::build("first\nsecond\nthird");
    assert_eq!(map.location(8), Location { line: 2, column: 2 });
    assert_eq!(map.line_start(3), Some(13));
    assert_eq!(map.line_start(0), None);
}

#[test]
fn source_location_serializes_as_estree_loc() {
    let map = LineMap::build("a\nbc");
    let loc = map.source_location(0, 4);
    let json = serde_json::to_value(loc).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "start": { "line": 1, "column": 0 },
            "end": { "line": 2, "column": 2 }
        })
    );
}
