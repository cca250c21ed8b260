//! Syntax checks for the request line, header lines and HTTP dates.
//!
//! Each check is a small hand-written scanner over ASCII classes:
//!
//! - *space*: exactly one of `' '`, `'\t'`, `'\n'`, `'\x0B'`, `'\x0C'`, `'\r'`
//! - *letter*, *digit*: ASCII only
//! - *punct*: ASCII punctuation, ``!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~``
//!
//! Lines are checked without their terminator.

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

fn is_token_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b.is_ascii_punctuation()
}

/// Consumes the longest prefix whose bytes satisfy `pred`, returning its length.
fn span(bytes: &[u8], pred: impl Fn(u8) -> bool) -> usize {
    bytes.iter().take_while(|&&b| pred(b)).count()
}

/// `<letters>+ SP <target>+ SP HTTP/<digits>.<digits>`
pub fn is_request_line(line: &str) -> bool {
    let b = line.as_bytes();

    let method = span(b, |c| c.is_ascii_alphabetic());
    if method == 0 || b.len() <= method || !is_space(b[method]) {
        return false;
    }

    let rest = &b[method + 1..];
    let target = span(rest, is_token_char);
    if target == 0 || rest.len() <= target || !is_space(rest[target]) {
        return false;
    }

    is_http_version(&rest[target + 1..])
}

fn is_http_version(b: &[u8]) -> bool {
    let Some(rest) = b.strip_prefix(b"HTTP/") else {
        return false;
    };

    let major = span(rest, |c| c.is_ascii_digit());
    if major == 0 || rest.get(major) != Some(&b'.') {
        return false;
    }

    let minor = &rest[major + 1..];
    !minor.is_empty() && minor.iter().all(u8::is_ascii_digit)
}

/// `<field-name> ":" <field-value>`
///
/// The field name may not contain a colon; the value may, and may also carry
/// whitespace anywhere.
pub fn is_header_line(line: &str) -> bool {
    let b = line.as_bytes();

    let Some(colon) = b.iter().position(|&c| c == b':') else {
        return false;
    };

    let (name, value) = (&b[..colon], &b[colon + 1..]);
    !name.is_empty()
        && name.iter().all(|&c| is_token_char(c))
        && value.iter().all(|&c| is_token_char(c) || is_space(c))
}

/// RFC 1123 full date, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn is_http_date(value: &str) -> bool {
    // 'A' upper, 'a' lower, '0' digit, '_' space, anything else is literal.
    const TEMPLATE: &[u8] = b"Aaa,_00_Aaa_0000_00:00:00_GMT";

    let b = value.as_bytes();
    b.len() == TEMPLATE.len()
        && b.iter().zip(TEMPLATE).all(|(&c, &t)| match t {
            b'A' => c.is_ascii_uppercase(),
            b'a' => c.is_ascii_lowercase(),
            b'0' => c.is_ascii_digit(),
            b'_' => is_space(c),
            literal => c == literal,
        })
}
