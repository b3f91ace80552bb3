//! Debug renderings of byte content: escaped literals and hex.

use std::fmt::Write;

/// Renders bytes as an escaped byte-string literal, `b'...'`.
///
/// Printable ASCII is kept as is, `\t`, `\n` and `\r` use their short
/// escapes, everything else becomes `\xNN`. Double quotes delimit the
/// literal when the content holds a `'` but no `"`.
///
/// # Example
///
/// ```
/// use octets::bytes_repr;
///
/// assert_eq!(bytes_repr(b"abc"), "b'abc'");
/// assert_eq!(bytes_repr(&[0x00, b'\n', 0xff]), "b'\\x00\\n\\xff'");
/// assert_eq!(bytes_repr(b"it's"), "b\"it's\"");
/// ```
pub fn bytes_repr(octets: &[u8]) -> String {
    let quote = quote_for(octets.contains(&b'\''), octets.contains(&b'"')) as u8;
    let mut result = String::with_capacity(octets.len() + 3);
    result.push('b');
    result.push(quote as char);
    for &byte in octets {
        match byte {
            b'\\' => result.push_str("\\\\"),
            b'\t' => result.push_str("\\t"),
            b'\n' => result.push_str("\\n"),
            b'\r' => result.push_str("\\r"),
            _ if byte == quote => {
                result.push('\\');
                result.push(byte as char);
            }
            0x20..=0x7e => result.push(byte as char),
            _ => {
                let _ = write!(result, "\\x{byte:02x}");
            }
        }
    }
    result.push(quote as char);
    result
}

/// Single quotes, unless only double quotes avoid an escape.
fn quote_for(has_single: bool, has_double: bool) -> char {
    if has_single && !has_double {
        '"'
    } else {
        '\''
    }
}

/// Renders text as a quoted literal with the same quoting and escapes as
/// [`bytes_repr`]. Printable non-ASCII characters are kept.
pub(crate) fn text_repr(text: &str) -> String {
    let quote = quote_for(text.contains('\''), text.contains('"'));
    let mut result = String::with_capacity(text.len() + 2);
    result.push(quote);
    for c in text.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\t' => result.push_str("\\t"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            _ if c == quote => {
                result.push('\\');
                result.push(c);
            }
            _ if c.is_control() => {
                let code = u32::from(c);
                let _ = if code <= 0xff {
                    write!(result, "\\x{code:02x}")
                } else {
                    write!(result, "\\u{code:04x}")
                };
            }
            _ => result.push(c),
        }
    }
    result.push(quote);
    result
}

/// Contiguous lowercase hex, two digits per byte.
pub fn hex(octets: &[u8]) -> String {
    let mut result = String::with_capacity(octets.len() * 2);
    for &byte in octets {
        let _ = write!(result, "{byte:02x}");
    }
    result
}
