pub const KEYWORDS: &[&str] = &["null", "true", "false"];

pub const DEFAULT_INDENT: usize = 2;

pub const MAX_DEPTH: usize = 512;

/// Initial slot count of a member table. Always a power of two.
pub const TABLE_INITIAL_CAPACITY: usize = 8;

pub const ARRAY_INITIAL_CAPACITY: usize = 8;

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Significant digits written by `NumberFormat::General`.
pub const GENERAL_PRECISION: usize = 6;

#[inline]
pub fn is_structural_byte(byte: u8) -> bool {
    matches!(byte, b'{' | b'}' | b'[' | b']' | b':' | b',')
}

#[inline]
pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

#[inline]
pub(crate) fn is_json_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}
