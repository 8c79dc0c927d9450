//! Locale-aware natural collation for file and window names.
//!
//! Names split into digit runs and text runs. Digit runs compare by numeric
//! value, so `file2` sorts before `file10`. Text runs go through a Unicode
//! collator for the session's collation locale at secondary strength:
//! accents count, case does not. Equal names fall back to plain byte order,
//! which keeps the order total.

use crate::locale::collation_locale_name;
use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::Locale;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct NumberRun<'a> {
    /// Significant digit count
    len: usize,
    /// Digits without leading zeros
    digits: &'a str,
    /// Leading zero count; `07` sorts after `7`
    zeros: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Chunk<'a> {
    Number(NumberRun<'a>),
    Text(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut chunks = Vec::new();
    let mut rest = s;

    while let Some(first) = rest.chars().next() {
        let is_digit = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != is_digit)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);

        chunks.push(if is_digit {
            let significant = run.trim_start_matches('0');
            Chunk::Number(NumberRun {
                len: significant.len(),
                digits: significant,
                zeros: run.len() - significant.len(),
            })
        } else {
            Chunk::Text(run)
        });
        rest = tail;
    }

    chunks
}

/// Converts a POSIX locale name (`sv_SE.UTF-8@euro`) to a BCP 47 locale.
/// `C`, `POSIX` and unparsable names map to the root locale.
fn posix_to_locale(name: &str) -> Locale {
    let base = name.split(['.', '@']).next().unwrap_or_default();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return Locale::UND;
    }

    base.replace('_', "-").parse().unwrap_or_else(|e| {
        tracing::debug!(name, error = ?e, "unrecognized locale name, using root collation");
        Locale::UND
    })
}

fn build_collator(locale: &Locale) -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Secondary);

    match Collator::try_new(&locale.clone().into(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            tracing::warn!(%locale, error = ?e, "no collation data for locale");
            None
        }
    }
}

/// Filename comparison for one collation locale.
pub struct FilenameCollator {
    locale: Locale,
    collator: Option<Collator>,
}

impl FilenameCollator {
    /// Collator for a POSIX locale name such as `de_DE.UTF-8`.
    pub fn for_locale(name: &str) -> Self {
        let mut locale = posix_to_locale(name);
        let mut collator = build_collator(&locale);
        if collator.is_none() && locale != Locale::UND {
            locale = Locale::UND;
            collator = build_collator(&locale);
        }
        Self { locale, collator }
    }

    /// Collator for the locale named by `LC_ALL`, `LC_COLLATE` or `LANG`.
    pub fn from_env() -> Self {
        Self::for_locale(&collation_locale_name())
    }

    /// BCP 47 tag of the locale in use; `und` for root collation.
    pub fn locale(&self) -> String {
        self.locale.to_string()
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let left = chunks(a);
        let right = chunks(b);

        for (x, y) in left.iter().zip(&right) {
            let ord = match (x, y) {
                (Chunk::Number(x), Chunk::Number(y)) => x.cmp(y),
                (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
                (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
                (Chunk::Text(x), Chunk::Text(y)) => self.compare_text(x, y),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }

        left.len().cmp(&right.len()).then_with(|| a.cmp(b))
    }

    fn compare_text(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        }
    }
}

impl fmt::Debug for FilenameCollator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilenameCollator")
            .field("locale", &self.locale.to_string())
            .field("collator", &self.collator.is_some())
            .finish()
    }
}

thread_local! {
    static ENV_COLLATOR: FilenameCollator = FilenameCollator::from_env();
}

/// Natural comparison for file and window names in the environment's
/// collation locale.
pub fn filename_cmp(a: &str, b: &str) -> Ordering {
    ENV_COLLATOR.with(|collator| collator.compare(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut names: Vec<&str>) -> Vec<&str> {
        names.sort_by(|a, b| filename_cmp(a, b));
        names
    }

    fn sorted_in<'a>(collator: &FilenameCollator, mut names: Vec<&'a str>) -> Vec<&'a str> {
        names.sort_by(|a, b| collator.compare(a, b));
        names
    }

    #[test]
    fn test_numbers_compare_numerically() {
        assert_eq!(filename_cmp("file2", "file10"), Ordering::Less);
        assert_eq!(filename_cmp("file10", "file2"), Ordering::Greater);
        assert_eq!(
            sorted(vec!["img12.png", "img1.png", "img2.png", "img100.png"]),
            vec!["img1.png", "img2.png", "img12.png", "img100.png"]
        );
    }

    #[test]
    fn test_case_folded_with_stable_tiebreak() {
        assert_eq!(
            sorted(vec!["beta", "Alpha", "alpha", "Beta"]),
            vec!["Alpha", "alpha", "Beta", "beta"]
        );
        assert_eq!(filename_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(filename_cmp("track7", "track07"), Ordering::Less);
        assert_eq!(filename_cmp("track07", "track8"), Ordering::Less);
        assert_eq!(filename_cmp("0", "00"), Ordering::Less);
    }

    #[test]
    fn test_digits_sort_before_letters() {
        assert_eq!(sorted(vec!["notes", "2024 plan", "a"]), vec!["2024 plan", "a", "notes"]);
    }

    #[test]
    fn test_non_ascii_text() {
        assert_eq!(filename_cmp("Ärger", "ärger"), Ordering::Less);
        assert_eq!(filename_cmp("日本2", "日本10"), Ordering::Less);
    }

    #[test]
    fn test_accented_initials_sort_with_base_letter() {
        let root = FilenameCollator::for_locale("C");
        assert_eq!(root.compare("Émile", "Zoe"), Ordering::Less);
        assert_eq!(root.compare("Écran", "Firefox"), Ordering::Less);
        assert_eq!(
            sorted_in(&root, vec!["Zoe", "Émile", "Firefox", "Eva", "Écran", "ant"]),
            vec!["ant", "Écran", "Émile", "Eva", "Firefox", "Zoe"]
        );
    }

    #[test]
    fn test_accent_decides_before_case() {
        let root = FilenameCollator::for_locale("en_US.UTF-8");
        assert_eq!(root.compare("resume", "Résumé"), Ordering::Less);
        assert_eq!(root.compare("Resume", "résumé"), Ordering::Less);
    }

    #[test]
    fn test_mixed_scripts_follow_script_order() {
        let root = FilenameCollator::for_locale("C.UTF-8");
        assert_eq!(
            sorted_in(&root, vec!["日本", "Жук", "Ωmega", "Alpha"]),
            vec!["Alpha", "Ωmega", "Жук", "日本"]
        );
    }

    #[test]
    fn test_locale_tailoring() {
        let german = FilenameCollator::for_locale("de_DE.UTF-8");
        let swedish = FilenameCollator::for_locale("sv_SE.UTF-8");
        assert_eq!(german.compare("Ärlig", "Zebra"), Ordering::Less);
        assert_eq!(swedish.compare("Ärlig", "Zebra"), Ordering::Greater);
    }

    #[test]
    fn test_posix_names_map_to_locales() {
        assert_eq!(FilenameCollator::for_locale("sv_SE.UTF-8@euro").locale(), "sv-SE");
        assert_eq!(FilenameCollator::for_locale("de_DE").locale(), "de-DE");
        assert_eq!(FilenameCollator::for_locale("C").locale(), "und");
        assert_eq!(FilenameCollator::for_locale("POSIX").locale(), "und");
        assert_eq!(FilenameCollator::for_locale("").locale(), "und");
        assert_eq!(FilenameCollator::for_locale("not a locale!").locale(), "und");
    }

    #[test]
    fn test_order_is_total_across_scripts() {
        let root = FilenameCollator::for_locale("C");
        let samples = ["é", "e", "E", "É", "ё", "е", "file2", "file02", "ﬁle2"];
        for a in samples {
            assert_eq!(root.compare(a, a), Ordering::Equal);
            for b in samples {
                assert_eq!(root.compare(a, b), root.compare(b, a).reverse(), "{a} vs {b}");
                if a != b {
                    assert_ne!(root.compare(a, b), Ordering::Equal, "{a} vs {b}");
                }
            }
        }
    }
}
