//! Character codes and classification helpers.
//!
//! Classification works on Unicode scalar values (`u32`). ASCII fast paths come
//! first; everything else defers to `unicode-ident` for `ID_Start` /
//! `ID_Continue`.

pub struct CharacterCodes;

impl CharacterCodes {
    pub const NULL: u32 = 0x00;
    pub const BACKSPACE: u32 = 0x08;
    pub const TAB: u32 = 0x09;
    pub const LINE_FEED: u32 = 0x0A;
    pub const VERTICAL_TAB: u32 = 0x0B;
    pub const FORM_FEED: u32 = 0x0C;
    pub const CARRIAGE_RETURN: u32 = 0x0D;
    pub const SPACE: u32 = 0x20;
    pub const NON_BREAKING_SPACE: u32 = 0xA0;
    pub const OGHAM: u32 = 0x1680;
    pub const EN_QUAD: u32 = 0x2000;
    pub const HAIR_SPACE: u32 = 0x200A;
    pub const ZERO_WIDTH_NON_JOINER: u32 = 0x200C;
    pub const ZERO_WIDTH_JOINER: u32 = 0x200D;
    pub const LINE_SEPARATOR: u32 = 0x2028;
    pub const PARAGRAPH_SEPARATOR: u32 = 0x2029;
    pub const NARROW_NO_BREAK_SPACE: u32 = 0x202F;
    pub const MATHEMATICAL_SPACE: u32 = 0x205F;
    pub const IDEOGRAPHIC_SPACE: u32 = 0x3000;
    pub const BYTE_ORDER_MARK: u32 = 0xFEFF;
    pub const REPLACEMENT_CHARACTER: u32 = 0xFFFD;
    pub const MAX_CODE_POINT: u32 = 0x10_FFFF;

    pub const _0: u32 = 0x30;
    pub const _7: u32 = 0x37;
    pub const _9: u32 = 0x39;
    pub const UPPER_A: u32 = 0x41;
    pub const UPPER_F: u32 = 0x46;
    pub const UPPER_Z: u32 = 0x5A;
    pub const LOWER_A: u32 = 0x61;
    pub const LOWER_F: u32 = 0x66;
    pub const LOWER_Z: u32 = 0x7A;

    pub const DOLLAR: u32 = 0x24;
    pub const UNDERSCORE: u32 = 0x5F;
    pub const BACKSLASH: u32 = 0x5C;
}

/// LF, CR, LS or PS.
#[inline]
#[must_use]
pub fn is_line_break(ch: u32) -> bool {
    ch == CharacterCodes::LINE_FEED
        || ch == CharacterCodes::CARRIAGE_RETURN
        || ch == CharacterCodes::LINE_SEPARATOR
        || ch == CharacterCodes::PARAGRAPH_SEPARATOR
}

/// ECMAScript `WhiteSpace`: TAB, VT, FF, ZWNBSP and every `Zs` code point.
#[must_use]
pub fn is_white_space_single_line(ch: u32) -> bool {
    ch == CharacterCodes::SPACE
        || ch == CharacterCodes::TAB
        || ch == CharacterCodes::VERTICAL_TAB
        || ch == CharacterCodes::FORM_FEED
        || ch == CharacterCodes::NON_BREAKING_SPACE
        || ch == CharacterCodes::OGHAM
        || (CharacterCodes::EN_QUAD..=CharacterCodes::HAIR_SPACE).contains(&ch)
        || ch == CharacterCodes::NARROW_NO_BREAK_SPACE
        || ch == CharacterCodes::MATHEMATICAL_SPACE
        || ch == CharacterCodes::IDEOGRAPHIC_SPACE
        || ch == CharacterCodes::BYTE_ORDER_MARK
}

#[inline]
#[must_use]
pub fn is_digit(ch: u32) -> bool {
    (CharacterCodes::_0..=CharacterCodes::_9).contains(&ch)
}

#[inline]
#[must_use]
pub fn is_octal_digit(ch: u32) -> bool {
    (CharacterCodes::_0..=CharacterCodes::_7).contains(&ch)
}

#[inline]
#[must_use]
pub fn is_hex_digit(ch: u32) -> bool {
    is_digit(ch)
        || (CharacterCodes::UPPER_A..=CharacterCodes::UPPER_F).contains(&ch)
        || (CharacterCodes::LOWER_A..=CharacterCodes::LOWER_F).contains(&ch)
}

/// Digit value of `ch` in `radix` (2, 8, 10 or 16).
#[inline]
#[must_use]
pub fn digit_value(ch: u32, radix: u32) -> Option<u32> {
    char::from_u32(ch)?.to_digit(radix)
}

/// `IdentifierStartChar :: UnicodeIDStart | $ | _`
#[must_use]
pub fn is_identifier_start(ch: u32) -> bool {
    if ch < 0x80 {
        return (CharacterCodes::UPPER_A..=CharacterCodes::UPPER_Z).contains(&ch)
            || (CharacterCodes::LOWER_A..=CharacterCodes::LOWER_Z).contains(&ch)
            || ch == CharacterCodes::DOLLAR
            || ch == CharacterCodes::UNDERSCORE;
    }
    // U+309B and U+309C are Other_ID_Start but not XID_Start.
    ch == 0x309B || ch == 0x309C || char::from_u32(ch).is_some_and(unicode_ident::is_xid_start)
}

/// `IdentifierPartChar :: UnicodeIDContinue | $ | <ZWNJ> | <ZWJ>`
#[must_use]
pub fn is_identifier_part(ch: u32) -> bool {
    if ch < 0x80 {
        return is_identifier_start(ch) || is_digit(ch);
    }
    ch == CharacterCodes::ZERO_WIDTH_NON_JOINER
        || ch == CharacterCodes::ZERO_WIDTH_JOINER
        || ch == 0x309B
        || ch == 0x309C
        || char::from_u32(ch).is_some_and(unicode_ident::is_xid_continue)
}
