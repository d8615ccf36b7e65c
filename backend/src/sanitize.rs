//! Input sanitization for free text submitted through listing and enquiry forms

use regex::Regex;
use std::sync::LazyLock;

/// HTML/XML tags, including unterminated ones at the end of input
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>?").expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Anything a location/keyword search never needs
static SEARCH_DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s,.\-]").expect("valid regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("valid regex")
});

const SEARCH_QUERY_MAX_CHARS: usize = 100;

/// Strip tags and control characters, collapse whitespace, cap length
pub fn sanitize_text(input: &str, max_chars: usize) -> String {
    let without_tags = TAG_RE.replace_all(input, " ");
    let printable: String = without_tags
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let collapsed = WHITESPACE_RE.replace_all(printable.trim(), " ");

    truncate_chars(&collapsed, max_chars).trim_end().to_string()
}

/// Sanitize a search box value: letters, digits, spaces and `, - .` only
pub fn sanitize_search_query(input: &str) -> String {
    let cleaned = sanitize_text(input, usize::MAX);
    let allowed = SEARCH_DISALLOWED_RE.replace_all(&cleaned, "");
    sanitize_text(&allowed, SEARCH_QUERY_MAX_CHARS)
}

/// Normalize an Indian mobile number to its 10 digits.
/// Accepts an optional `+91`, `91` or `0` prefix and common separators.
pub fn sanitize_phone(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();

    let local = match digits.len() {
        10 => digits.as_str(),
        11 if digits.starts_with('0') => &digits[1..],
        12 if digits.starts_with("91") => &digits[2..],
        _ => return None,
    };

    match local.as_bytes().first().copied() {
        Some(b'6'..=b'9') => Some(local.to_string()),
        _ => None,
    }
}

pub fn is_valid_email(input: &str) -> bool {
    EMAIL_RE.is_match(input.trim())
}

fn truncate_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_text_strips_tags() {
        assert_eq!(
            sanitize_text("<b>Sea view</b> flat<script>alert(1)</script>", 200),
            "Sea view flat alert(1)"
        );
        assert_eq!(sanitize_text("Corner plot <img src=x", 200), "Corner plot");
    }

    #[test]
    fn test_sanitize_text_collapses_whitespace() {
        assert_eq!(sanitize_text("  2BHK\n\n\tnear   metro \u{7}", 200), "2BHK near metro");
    }

    #[test]
    fn test_sanitize_text_truncates_on_char_boundary() {
        assert_eq!(sanitize_text("बेंगलुरु flat", 4), "बेंग");
        assert_eq!(sanitize_text("abc def", 4), "abc");
    }

    #[test]
    fn test_sanitize_search_query() {
        assert_eq!(
            sanitize_search_query("Koramangala, Bangalore'; DROP TABLE--"),
            "Koramangala, Bangalore DROP TABLE--"
        );

        let long = "a".repeat(150);
        assert_eq!(sanitize_search_query(&long).chars().count(), 100);
    }

    #[test]
    fn test_sanitize_phone() {
        assert_eq!(sanitize_phone("98450 12345"), Some("9845012345".to_string()));
        assert_eq!(sanitize_phone("+91-98450-12345"), Some("9845012345".to_string()));
        assert_eq!(sanitize_phone("098450 12345"), Some("9845012345".to_string()));
        assert_eq!(sanitize_phone("1800 425 1234"), None); // toll-free
        assert_eq!(sanitize_phone("12345"), None);
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("owner@example.in"));
        assert!(is_valid_email(" first.last+pg@mail.co.in "));
        assert!(!is_valid_email("owner@"));
        assert!(!is_valid_email("owner example.com"));
    }
}
