//! File-manager-aware ordering of names and window titles.

use crate::collate::filename_cmp;
use crate::locale::{LocaleType, SortStyle};
use crate::title::extract_sortable_document_name;
use std::cmp::Ordering;

/// 0 sorts before 1.
///
/// Caja puts names starting with `.` or `#` last. Thunar puts only
/// dot-names first and everything else after them.
pub fn special_char_priority(name: &str, style: SortStyle) -> u8 {
    let Some(first) = name.bytes().next() else {
        return 1;
    };

    match style {
        SortStyle::ThunarStyle => u8::from(first != b'.'),
        SortStyle::CajaStyle | SortStyle::UnknownDefaultsToCaja => {
            u8::from(first == b'.' || first == b'#')
        }
    }
}

/// Order two optional names. `None` sorts first.
///
/// Special-character priority decides first. Caja in a POSIX locale then
/// compares bytes; every other combination uses locale-aware natural
/// filename collation.
pub fn compare(a: Option<&str>, b: Option<&str>, style: SortStyle, locale: LocaleType) -> Ordering {
    let (a, b) = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Less,
        (Some(_), None) => return Ordering::Greater,
        (Some(a), Some(b)) => (a, b),
    };

    special_char_priority(a, style)
        .cmp(&special_char_priority(b, style))
        .then_with(|| {
            if style == SortStyle::CajaStyle && locale == LocaleType::Posix {
                a.as_bytes().cmp(b.as_bytes())
            } else {
                filename_cmp(a, b)
            }
        })
}

/// Order window titles by their document part.
pub fn compare_window_titles(
    a: Option<&[u8]>,
    b: Option<&[u8]>,
    style: SortStyle,
    locale: LocaleType,
) -> Ordering {
    let a = a.map(extract_sortable_document_name);
    let b = b.map(extract_sortable_document_name);
    compare(a.as_deref(), b.as_deref(), style, locale)
}
