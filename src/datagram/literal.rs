use std::fmt::Write;

/// Renders bytes as a byte-string literal, e.g. `b'Hello, World!'`.
///
/// Printable ASCII is kept as is. Backslash, tab, newline and carriage return get their
/// short escapes and every other byte is written as `\xNN`. The literal is quoted with `'`
/// unless the bytes contain a `'` and no `"`, in which case `"` is used instead.
///
/// # Examples
/// ```
/// use udpprobe::datagram::literal::bytes_literal;
/// assert_eq!(bytes_literal(b"Hello, World!"), "b'Hello, World!'");
/// assert_eq!(bytes_literal(b"it's"), "b\"it's\"");
/// ```
#[must_use]
pub fn bytes_literal(bytes: &[u8]) -> String {
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') {
        '"'
    } else {
        '\''
    };

    let mut literal = String::with_capacity(bytes.len() + 3);
    literal.push('b');
    literal.push(quote);
    for &byte in bytes {
        match byte {
            b'\\' => literal.push_str("\\\\"),
            b'\t' => literal.push_str("\\t"),
            b'\n' => literal.push_str("\\n"),
            b'\r' => literal.push_str("\\r"),
            _ if char::from(byte) == quote => {
                literal.push('\\');
                literal.push(quote);
            }
            0x20..=0x7e => literal.push(char::from(byte)),
            // Writing to a String cannot fail
            _ => {
                let _ = write!(literal, "\\x{byte:02x}");
            }
        }
    }
    literal.push(quote);
    literal
}
