//! Session settings.
//!
//! Everything defaults to the live system, so an empty JSON object is a
//! valid settings file.

use crate::error::{ContextError, ContextResult};
use crate::locale::{LocaleType, SortStyle};
use appident_detect::DESKTOP_ENTRY_DIRS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Read processes from a procfs-style tree here instead of the
    /// running system
    pub proc_root: Option<PathBuf>,

    /// Launcher directories, searched in order
    pub desktop_dirs: Vec<PathBuf>,

    /// Skip environment detection and use this locale
    pub locale: Option<LocaleType>,

    /// Skip shell detection and use this style
    pub sort_style: Option<SortStyle>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            proc_root: None,
            desktop_dirs: DESKTOP_ENTRY_DIRS.iter().map(PathBuf::from).collect(),
            locale: None,
            sort_style: None,
        }
    }
}

impl SessionSettings {
    pub fn load(path: &Path) -> ContextResult<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| ContextError::ReadSettings {
                path: path.to_path_buf(),
                source,
            })?;

        let settings: Self =
            serde_json::from_str(&contents).map_err(|source| ContextError::ParseSettings {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            path = %path.display(),
            proc_root = ?settings.proc_root,
            desktop_dirs = settings.desktop_dirs.len(),
            "loaded session settings"
        );
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let settings: SessionSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, SessionSettings::default());
        assert_eq!(settings.proc_root, None);
        assert_eq!(settings.desktop_dirs.len(), 2);
    }

    #[test]
    fn test_overrides_parse() {
        let settings: SessionSettings = serde_json::from_str(
            r#"{"locale": "unicodeaware", "sort_style": "unknown-defaults-to-caja"}"#,
        )
        .unwrap();
        assert_eq!(settings.locale, Some(LocaleType::UnicodeAware));
        assert_eq!(settings.sort_style, Some(SortStyle::UnknownDefaultsToCaja));
    }

    #[test]
    fn test_proc_root_parses() {
        let settings: SessionSettings =
            serde_json::from_str(r#"{"proc_root": "/srv/chroot/proc"}"#).unwrap();
        assert_eq!(settings.proc_root, Some(PathBuf::from("/srv/chroot/proc")));
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        match SessionSettings::load(&path) {
            Err(ContextError::ParseSettings { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected parse error, got {other:?}"),
        }

        assert!(matches!(
            SessionSettings::load(&dir.path().join("missing.json")),
            Err(ContextError::ReadSettings { .. })
        ));
    }
}
