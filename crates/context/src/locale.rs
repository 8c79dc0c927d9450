//! Locale and sort-style detection.
//!
//! Both values are computed once per session and passed to every
//! comparison through [`SortConfig`].

use crate::compare::{compare, compare_window_titles};
use crate::discovery::discover_desktop_shell_instances;
use crate::provider::ProcessSource;
use crate::state::{DesktopManagerInfo, ScreenSnapshot};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Environment variables consulted, highest precedence first.
pub const LOCALE_VARS: &[&str] = &["LC_ALL", "LC_COLLATE", "LANG"];

/// Collation environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocaleType {
    /// `C` or `POSIX`: byte order
    Posix,

    #[default]
    UnicodeAware,
}

/// Whose sorting rules to imitate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortStyle {
    #[default]
    CajaStyle,
    ThunarStyle,
    /// No recognized shell; ranks special characters the way Caja does
    UnknownDefaultsToCaja,
}

pub fn detect_locale() -> LocaleType {
    detect_locale_with(|name| std::env::var(name).ok())
}

/// The collation locale name from the environment, such as `de_DE.UTF-8`.
/// Defaults to `C`.
pub fn collation_locale_name() -> String {
    collation_locale_name_with(|name| std::env::var(name).ok())
}

pub fn collation_locale_name_with<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    LOCALE_VARS
        .iter()
        .find_map(|name| lookup(name).filter(|value| !value.is_empty()))
        .unwrap_or_else(|| "C".to_string())
}

/// Locale detection over an arbitrary variable lookup.
pub fn detect_locale_with<F>(lookup: F) -> LocaleType
where
    F: Fn(&str) -> Option<String>,
{
    let value = collation_locale_name_with(lookup);

    let locale = if value == "C" || value == "POSIX" {
        LocaleType::Posix
    } else {
        LocaleType::UnicodeAware
    };
    tracing::debug!(value = %value, ?locale, "detected collation locale");
    locale
}

/// Pick the sort style from the running desktop shells.
///
/// The first `caja` or `xfdesktop` in the list decides; anything else
/// falls back to Caja rules.
pub fn detect_sort_style(shells: &[DesktopManagerInfo]) -> SortStyle {
    shells
        .iter()
        .find_map(|shell| match shell.process_name.as_str() {
            "caja" => Some(SortStyle::CajaStyle),
            "xfdesktop" => Some(SortStyle::ThunarStyle),
            _ => None,
        })
        .unwrap_or(SortStyle::CajaStyle)
}

/// Session-scoped collation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortConfig {
    pub locale: LocaleType,
    pub style: SortStyle,
}

impl SortConfig {
    pub fn new(locale: LocaleType, style: SortStyle) -> Self {
        Self { locale, style }
    }

    /// Detect both values from the environment and the running shells.
    pub fn detect(processes: &dyn ProcessSource, screen: &ScreenSnapshot) -> Self {
        let shells = discover_desktop_shell_instances(processes, screen);
        let config = Self::new(detect_locale(), detect_sort_style(&shells));
        tracing::info!(
            locale = ?config.locale,
            style = ?config.style,
            "sort configuration detected"
        );
        config
    }

    pub fn compare(&self, a: Option<&str>, b: Option<&str>) -> Ordering {
        compare(a, b, self.style, self.locale)
    }

    pub fn compare_window_titles(&self, a: Option<&[u8]>, b: Option<&[u8]>) -> Ordering {
        compare_window_titles(a, b, self.style, self.locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn shell(process_name: &str, pid: u32) -> DesktopManagerInfo {
        DesktopManagerInfo {
            pid,
            process_name: process_name.to_string(),
            display_name: process_name.to_string(),
            is_active: false,
        }
    }

    #[test]
    fn test_locale_precedence() {
        assert_eq!(
            detect_locale_with(env(&[("LC_ALL", "C"), ("LANG", "en_US.UTF-8")])),
            LocaleType::Posix
        );
        assert_eq!(
            detect_locale_with(env(&[
                ("LC_ALL", ""),
                ("LC_COLLATE", "de_DE.UTF-8"),
                ("LANG", "C")
            ])),
            LocaleType::UnicodeAware
        );
        assert_eq!(detect_locale_with(env(&[("LANG", "POSIX")])), LocaleType::Posix);
    }

    #[test]
    fn test_locale_defaults_to_c() {
        assert_eq!(detect_locale_with(env(&[])), LocaleType::Posix);
        assert_eq!(collation_locale_name_with(env(&[])), "C");
    }

    #[test]
    fn test_collation_locale_name_precedence() {
        assert_eq!(
            collation_locale_name_with(env(&[
                ("LC_COLLATE", "sv_SE.UTF-8"),
                ("LANG", "en_US.UTF-8")
            ])),
            "sv_SE.UTF-8"
        );
        assert_eq!(
            collation_locale_name_with(env(&[("LC_ALL", ""), ("LANG", "fr_FR.UTF-8")])),
            "fr_FR.UTF-8"
        );
    }

    #[test]
    fn test_sort_style_from_shells() {
        assert_eq!(detect_sort_style(&[shell("caja", 10)]), SortStyle::CajaStyle);
        assert_eq!(detect_sort_style(&[shell("xfdesktop", 10)]), SortStyle::ThunarStyle);
        assert_eq!(
            detect_sort_style(&[
                shell("nemo-desktop", 5),
                shell("xfdesktop", 10),
                shell("caja", 11)
            ]),
            SortStyle::ThunarStyle
        );
        assert_eq!(detect_sort_style(&[shell("nemo-desktop", 5)]), SortStyle::CajaStyle);
        assert_eq!(detect_sort_style(&[]), SortStyle::CajaStyle);
    }

    #[test]
    fn test_config_serde_names() {
        let config: SortConfig =
            serde_json::from_str(r#"{"locale": "posix", "style": "thunar-style"}"#).unwrap();
        assert_eq!(config, SortConfig::new(LocaleType::Posix, SortStyle::ThunarStyle));
    }
}
