//! Cooking of literal text: numeric values and string escapes.

/// Parse a decimal literal (`12`, `1.5`, `.5`, `3.`, `1e-3`).
pub(crate) fn parse_decimal(text: &str) -> Option<f64> {
    // Rust's float grammar rejects a trailing `.` before an exponent.
    let normalized;
    let text = if text.contains(".e") || text.contains(".E") || text.ends_with('.') {
        normalized = text.replacen(".e", "e", 1).replacen(".E", "E", 1);
        normalized.trim_end_matches('.')
    } else {
        text
    };
    text.parse::<f64>().ok()
}

/// Parse the digits of a `0x` / `0o` / `0b` literal.
///
/// Accumulates in `f64` so literals wider than 64 bits round instead of
/// failing.
pub(crate) fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    let mut value = 0.0_f64;
    for ch in digits.chars() {
        let digit = ch.to_digit(radix)?;
        value = value * f64::from(radix) + f64::from(digit);
    }
    Some(value)
}

/// Problem found while cooking a string literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct EscapeProblem {
    /// Byte offset of the backslash, relative to the literal body.
    pub offset: usize,
    pub sequence: String,
}

/// Resolve escape sequences in a string literal body (quotes stripped).
///
/// Unknown escapes stand for the escaped character itself; a backslash
/// before a line terminator is a line continuation and contributes
/// nothing. Malformed `\x` / `\u` escapes are reported and kept verbatim.
pub(crate) fn unescape(body: &str) -> (String, Vec<EscapeProblem>) {
    let mut out = String::with_capacity(body.len());
    let mut problems = Vec::new();
    let mut chars = body.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some((_, esc)) = chars.next() else {
            out.push('\\');
            break;
        };
        match esc {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'v' => out.push('\u{000B}'),
            '0' if !matches!(chars.peek(), Some((_, '0'..='9'))) => out.push('\0'),
            '\n' | '\u{2028}' | '\u{2029}' => {}
            '\r' => {
                if matches!(chars.peek(), Some((_, '\n'))) {
                    chars.next();
                }
            }
            'x' => {
                let hex: String = take_hex(&mut chars, 2);
                match decode_hex(&hex, 2) {
                    Some(ch) => out.push(ch),
                    None => {
                        problems.push(EscapeProblem {
                            offset,
                            sequence: format!("\\x{hex}"),
                        });
                        out.push_str("\\x");
                        out.push_str(&hex);
                    }
                }
            }
            'u' => {
                let (text, decoded) = if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    let mut hex = String::new();
                    let mut closed = false;
                    while let Some(&(_, h)) = chars.peek() {
                        chars.next();
                        if h == '}' {
                            closed = true;
                            break;
                        }
                        hex.push(h);
                        if hex.len() > 6 {
                            break;
                        }
                    }
                    let decoded = if closed {
                        u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
                    } else {
                        None
                    };
                    (format!("{{{hex}}}"), decoded)
                } else {
                    let hex = take_hex(&mut chars, 4);
                    let decoded = decode_hex(&hex, 4);
                    (hex, decoded)
                };
                match decoded {
                    Some(ch) => out.push(ch),
                    None => {
                        problems.push(EscapeProblem {
                            offset,
                            sequence: format!("\\u{text}"),
                        });
                        out.push_str("\\u");
                        out.push_str(&text);
                    }
                }
            }
            other => out.push(other),
        }
    }

    (out, problems)
}

fn take_hex(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>, max: usize) -> String {
    let mut hex = String::with_capacity(max);
    while hex.len() < max {
        match chars.peek() {
            Some(&(_, h)) if h.is_ascii_hexdigit() => {
                hex.push(h);
                chars.next();
            }
            _ => break,
        }
    }
    hex
}

fn decode_hex(hex: &str, width: usize) -> Option<char> {
    if hex.len() != width {
        return None;
    }
    // Lone surrogates have no `char`; substitute the replacement character.
    u32::from_str_radix(hex, 16)
        .ok()
        .map(|code| char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decimal_forms() {
        assert_eq!(parse_decimal("42"), Some(42.0));
        assert_eq!(parse_decimal("1.5"), Some(1.5));
        assert_eq!(parse_decimal(".5"), Some(0.5));
        assert_eq!(parse_decimal("3."), Some(3.0));
        assert_eq!(parse_decimal("1e3"), Some(1000.0));
        assert_eq!(parse_decimal("2.E2"), Some(200.0));
        assert_eq!(parse_decimal("1.5e-1"), Some(0.15));
    }

    #[test]
    fn radix_forms() {
        assert_eq!(parse_radix("ff", 16), Some(255.0));
        assert_eq!(parse_radix("17", 8), Some(15.0));
        assert_eq!(parse_radix("101", 2), Some(5.0));
        assert_eq!(parse_radix("12", 2), None);
    }

    #[test]
    fn simple_escapes() {
        let (s, problems) = unescape(r"a\nb\t\\\'\q");
        assert_eq!(s, "a\nb\t\\'q");
        assert!(problems.is_empty());
    }

    #[test]
    fn unicode_escapes() {
        let (s, problems) = unescape(r"\x41B\u{1F600}");
        assert_eq!(s, "AB\u{1F600}");
        assert!(problems.is_empty());
    }

    #[test]
    fn line_continuation_is_dropped() {
        let (s, _) = unescape("ab\\\ncd");
        assert_eq!(s, "abcd");
    }

    #[test]
    fn malformed_hex_escape_is_reported() {
        let (s, problems) = unescape(r"\xZ1");
        assert_eq!(s, r"\xZ1");
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].sequence, r"\x");
    }
}
