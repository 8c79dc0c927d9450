//! Window-title helpers.
//!
//! Titles arrive as raw bytes and usually look like
//! `~/path/document - Application`. These helpers reduce them to the
//! document part for sorting and display.

use std::borrow::Cow;
use std::fmt::Write;

/// Shown when stripping leaves nothing.
pub const EMPTY_DOCUMENT: &str = "Document";

/// Separators between document and application name, most specific first.
pub const TITLE_SEPARATORS: &[&str] = &[
    " \u{2014} ", // em dash
    " \u{2013} ", // en dash
    " - ",
    " \u{2015} ", // horizontal bar
    " \u{2012} ", // figure dash
    " \u{2E3A} ", // two-em dash
    " \u{2E3B} ", // three-em dash
    "\u{2014}",
    "\u{2013}",
    "-",
];

// Reserved characters left alone in a path component.
const PATH_ALLOWED: &[u8] = b"!$&'()*+,;=:@/";

/// Borrow valid UTF-8 unchanged; otherwise percent-escape the title.
///
/// Escaping keeps valid multi-byte characters, unreserved ASCII and the
/// reserved characters allowed in a path. Every other byte becomes `%XX`.
pub fn ensure_valid_utf8(input: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(input) {
        Ok(valid) => Cow::Borrowed(valid),
        Err(_) => Cow::Owned(percent_escape(input)),
    }
}

fn percent_escape(mut input: &[u8]) -> String {
    let mut out = String::with_capacity(input.len() * 3);

    while !input.is_empty() {
        let (valid, invalid) = match std::str::from_utf8(input) {
            Ok(valid) => (valid, &[][..]),
            Err(e) => {
                let (valid, rest) = input.split_at(e.valid_up_to());
                // Validated just above
                let valid = std::str::from_utf8(valid).unwrap_or_default();
                let bad_len = e.error_len().unwrap_or(rest.len());
                (valid, &rest[..bad_len])
            }
        };

        for c in valid.chars() {
            if !c.is_ascii()
                || c.is_ascii_alphanumeric()
                || "-._~".contains(c)
                || PATH_ALLOWED.contains(&(c as u8))
            {
                out.push(c);
            } else {
                let _ = write!(out, "%{:02X}", c as u8);
            }
        }
        for byte in invalid {
            let _ = write!(out, "%{byte:02X}");
        }

        input = &input[valid.len() + invalid.len()..];
    }

    out
}

/// The document part of a window title, used as its sort key.
///
/// Drops everything up to the last `/`, then cuts at the last `" - "`.
pub fn extract_sortable_document_name(window_title: &[u8]) -> String {
    let title = ensure_valid_utf8(window_title);

    let filename = match title.rfind('/') {
        Some(slash) => &title[slash + 1..],
        None => &title[..],
    };

    let document = match filename.rfind(" - ") {
        Some(separator) => &filename[..separator],
        None => filename,
    };

    document.to_string()
}

/// Remove a trailing `<separator><app name>` from a title.
///
/// Separators are tried in [`TITLE_SEPARATORS`] order, each at its rightmost
/// occurrence. What follows must be the app name or end with it after a
/// space (`Mozilla Firefox` for `Firefox`), compared ASCII case-insensitively.
pub fn strip_application_suffix(window_title: &str, app_name: &str) -> String {
    let mut title = window_title;

    for separator in TITLE_SEPARATORS {
        let Some(pos) = title.rfind(separator) else {
            continue;
        };
        let after = &title[pos + separator.len()..];

        if after.eq_ignore_ascii_case(app_name) || ends_with_word(after, app_name) {
            title = &title[..pos];
            break;
        }
    }

    let trimmed = title.trim_matches(|c: char| c.is_ascii_whitespace());
    if trimmed.is_empty() {
        EMPTY_DOCUMENT.to_string()
    } else {
        trimmed.to_string()
    }
}

fn ends_with_word(text: &str, word: &str) -> bool {
    let Some(start) = text.len().checked_sub(word.len()) else {
        return false;
    };
    let Some(tail) = text.get(start..) else {
        return false;
    };
    tail.eq_ignore_ascii_case(word) && (start == 0 || text.as_bytes()[start - 1] == b' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_utf8_is_borrowed() {
        assert!(matches!(ensure_valid_utf8("naïve - ok".as_bytes()), Cow::Borrowed("naïve - ok")));
    }

    #[test]
    fn test_invalid_utf8_is_escaped() {
        assert_eq!(ensure_valid_utf8(b"caf\xe9 menu"), "caf%E9%20menu");
        assert_eq!(ensure_valid_utf8(b"\xff/a:b?c"), "%FF/a:b%3Fc");
        assert_eq!(ensure_valid_utf8("ü\u{0}".as_bytes()), "ü\u{0}");
        assert_eq!(ensure_valid_utf8(b"\xc3\xbc\xc3"), "ü%C3");
    }

    #[test]
    fn test_extract_sortable_document_name() {
        assert_eq!(extract_sortable_document_name(b"/home/u/report.odt - Writer"), "report.odt");
        assert_eq!(
            extract_sortable_document_name(b"~/src/main.rs - Project - Editor"),
            "main.rs - Project"
        );
        assert_eq!(extract_sortable_document_name(b"Inbox - Mail"), "Inbox");
        assert_eq!(extract_sortable_document_name(b"Terminal"), "Terminal");
        assert_eq!(extract_sortable_document_name(b"a - b/notes"), "notes");
        assert_eq!(extract_sortable_document_name(b""), "");
    }

    #[test]
    fn test_strip_em_dash_suffix() {
        assert_eq!(strip_application_suffix("My Doc — Firefox", "Firefox"), "My Doc");
        assert_eq!(strip_application_suffix("Page – Mozilla Firefox", "firefox"), "Page");
        assert_eq!(strip_application_suffix("notes.txt - Mousepad", "Mousepad"), "notes.txt");
    }

    #[test]
    fn test_strip_requires_word_boundary() {
        assert_eq!(strip_application_suffix("report.odt", "LibreOffice"), "report.odt");
        assert_eq!(strip_application_suffix("Doc - NotFirefox", "Firefox"), "Doc - NotFirefox");
    }

    #[test]
    fn test_strip_uses_rightmost_occurrence() {
        assert_eq!(strip_application_suffix("a - b - Editor", "Editor"), "a - b");
        assert_eq!(strip_application_suffix("x-y-Editor", "Editor"), "x-y");
    }

    #[test]
    fn test_strip_separator_priority() {
        // " - " is tried before the bare dash, so the spaced form is removed
        assert_eq!(strip_application_suffix("draft-2 - Writer", "Writer"), "draft-2");
        // The em dash is tried first and its remainder already ends with the name
        assert_eq!(strip_application_suffix("A — B - App", "App"), "A");
    }

    #[test]
    fn test_strip_empty_result_is_document() {
        assert_eq!(strip_application_suffix(" - Firefox", "Firefox"), EMPTY_DOCUMENT);
        assert_eq!(strip_application_suffix("   ", "Firefox"), EMPTY_DOCUMENT);
    }

    #[test]
    fn test_strip_handles_multibyte_tail() {
        assert_eq!(strip_application_suffix("Doc - éditeur", "aditeur"), "Doc - éditeur");
    }
}
