/// Escape `value` for use inside a JSON string literal, appending to `out`.
///
/// Quote, backslash, solidus and the five short control escapes use their
/// two-byte forms; every other byte is copied. With `ascii_only` the remaining
/// control bytes and every non-ASCII char are written as `\uXXXX`, chars
/// above U+FFFF as a surrogate pair.
pub fn escape_string_into(out: &mut String, value: &str, ascii_only: bool) {
    if is_plain(value, ascii_only) {
        out.push_str(value);
        return;
    }
    let bytes = value.as_bytes();
    let mut start = 0;
    for (idx, &byte) in bytes.iter().enumerate() {
        let escaped = match byte {
            b'"' => "\\\"",
            b'\\' => "\\\\",
            b'/' => "\\/",
            0x08 => "\\b",
            0x0C => "\\f",
            b'\n' => "\\n",
            b'\r' => "\\r",
            b'\t' => "\\t",
            0x00..=0x1F if ascii_only => {
                flush(out, value, start, idx);
                push_unicode_escape(out, u16::from(byte));
                start = idx + 1;
                continue;
            }
            0x80..=0xFF if ascii_only => {
                // Only lead bytes start a char; continuation bytes fall
                // inside the range already consumed.
                if idx < start || !value.is_char_boundary(idx) {
                    continue;
                }
                flush(out, value, start, idx);
                let ch = value[idx..].chars().next().unwrap_or('\u{FFFD}');
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    push_unicode_escape(out, *unit);
                }
                start = idx + ch.len_utf8();
                continue;
            }
            _ => continue,
        };
        flush(out, value, start, idx);
        out.push_str(escaped);
        start = idx + 1;
    }
    flush(out, value, start, value.len());
}

fn flush(out: &mut String, value: &str, start: usize, end: usize) {
    if start < end {
        out.push_str(&value[start..end]);
    }
}

fn push_unicode_escape(out: &mut String, unit: u16) {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    out.push_str("\\u");
    for shift in [12, 8, 4, 0] {
        out.push(HEX[usize::from((unit >> shift) & 0xF)] as char);
    }
}

/// True when `value` can be written between quotes without any escape.
pub fn is_plain(value: &str, ascii_only: bool) -> bool {
    value.bytes().all(|b| {
        let short_escape = matches!(b, b'"' | b'\\' | b'/' | 0x08 | 0x0C | b'\n' | b'\r' | b'\t');
        !short_escape && (!ascii_only || (0x20..0x80).contains(&b))
    })
}

/// Combine a UTF-16 surrogate pair into a scalar value.
pub fn combine_surrogates(high: u16, low: u16) -> Option<char> {
    if !(0xD800..=0xDBFF).contains(&high) || !(0xDC00..=0xDFFF).contains(&low) {
        return None;
    }
    let code = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
    char::from_u32(code)
}
