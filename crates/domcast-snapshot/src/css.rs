//! Stylesheet URL rewriting
//!
//! Quote-aware scan over `url(...)` tokens, resolving relative payloads
//! against a base href so a reconstructed page fetches the same
//! resources. Malformed tokens pass through untouched; this never fails.

use url::Url;

/// Check for a data-scheme payload
pub fn is_data_url(payload: &str) -> bool {
    let trimmed = payload.trim_start();
    trimmed.len() >= 5 && trimmed[..5].eq_ignore_ascii_case("data:")
}

fn is_css_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0c)
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// Resolve a single payload, None when it must pass through unchanged
fn resolve(payload: &str, base_href: &str) -> Option<String> {
    if payload.is_empty() || is_data_url(payload) {
        return None;
    }
    let base = Url::parse(base_href).ok()?;
    let resolved = base.join(payload).ok()?;
    Some(resolved.into())
}

/// Rewrite every `url(...)` token in `css_text` against `base_href`
///
/// Payload handling:
/// - unquoted, single-quoted, and double-quoted payloads are recognized;
///   a quoted payload only terminates at its own quote kind, so embedded
///   opposite quotes survive byte-for-byte
/// - data-scheme and empty payloads pass through unchanged
/// - unresolvable payloads (bad base, bad reference) pass through
/// - quoting style and all surrounding text are preserved exactly
pub fn absolutize_urls(css_text: &str, base_href: &str) -> String {
    let bytes = css_text.as_bytes();
    let mut out = String::with_capacity(css_text.len());
    let mut copied = 0;
    let mut i = 0;

    while i + 4 <= bytes.len() {
        if !bytes[i..i + 4].eq_ignore_ascii_case(b"url(")
            || (i > 0 && is_ident_byte(bytes[i - 1]))
        {
            i += 1;
            continue;
        }

        let mut j = i + 4;
        while j < bytes.len() && is_css_ws(bytes[j]) {
            j += 1;
        }
        if j >= bytes.len() {
            break;
        }

        let span = if bytes[j] == b'\'' || bytes[j] == b'"' {
            let quote = bytes[j];
            let start = j + 1;
            let close = bytes[start..].iter().position(|&b| b == quote);
            match close {
                Some(off) => {
                    let end = start + off;
                    // the token still needs a closing paren after the quote
                    let mut k = end + 1;
                    while k < bytes.len() && is_css_ws(bytes[k]) {
                        k += 1;
                    }
                    if k < bytes.len() && bytes[k] == b')' {
                        Some((start, end))
                    } else {
                        None
                    }
                }
                None => None,
            }
        } else {
            match bytes[j..].iter().position(|&b| b == b')') {
                Some(off) => {
                    let mut end = j + off;
                    while end > j && is_css_ws(bytes[end - 1]) {
                        end -= 1;
                    }
                    Some((j, end))
                }
                None => None,
            }
        };

        let Some((start, end)) = span else {
            // malformed token: leave it alone and keep scanning
            i += 4;
            continue;
        };

        let payload = &css_text[start..end];
        if let Some(resolved) = resolve(payload, base_href) {
            out.push_str(&css_text[copied..start]);
            out.push_str(&resolved);
            copied = end;
        }
        // skip past the payload so its content is never rescanned
        i = end.max(i + 4);
    }

    out.push_str(&css_text[copied..]);
    out
}
