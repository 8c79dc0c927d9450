//! `.desktop` launcher files: parsing and lookup.

use crate::error::{DetectError, DetectResult};
use crate::proc::{ProcessSource, UNKNOWN_PROCESS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Standard launcher directories, searched in this order.
pub const DESKTOP_ENTRY_DIRS: &[&str] = &[
    "/usr/share/applications",
    "/usr/local/share/applications",
];

const DESKTOP_ENTRY_GROUP: &str = "Desktop Entry";

/// The keys of a launcher file this crate cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopEntry {
    pub path: PathBuf,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub exec: Option<String>,
}

impl DesktopEntry {
    pub fn load(path: &Path) -> DetectResult<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| DetectError::ReadDesktopEntry {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(path, &contents)
    }

    /// Parse key file contents. Only unlocalized keys in the
    /// `[Desktop Entry]` group are kept.
    pub fn parse(path: &Path, contents: &str) -> DetectResult<Self> {
        let mut entry = Self {
            path: path.to_path_buf(),
            name: None,
            icon: None,
            exec: None,
        };
        let mut in_main_group = false;

        for (idx, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(group) = line.strip_prefix('[') {
                let group = group.strip_suffix(']').ok_or_else(|| malformed(path, idx))?;
                in_main_group = group == DESKTOP_ENTRY_GROUP;
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| malformed(path, idx))?;
            let key = key.trim_end();
            if key.is_empty() {
                return Err(malformed(path, idx));
            }
            if !in_main_group {
                continue;
            }

            let slot = match key {
                "Name" => &mut entry.name,
                "Icon" => &mut entry.icon,
                "Exec" => &mut entry.exec,
                _ => continue,
            };
            // First occurrence wins, like GKeyFile lookups on duplicate keys
            if slot.is_none() {
                *slot = Some(unescape_value(value.trim_start()));
            }
        }

        Ok(entry)
    }

    pub fn name_matches(&self, wanted: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.eq_ignore_ascii_case(wanted))
    }

    pub fn exec_mentions(&self, executable: &str) -> bool {
        self.exec.as_deref().is_some_and(|exec| exec.contains(executable))
    }
}

fn malformed(path: &Path, idx: usize) -> DetectError {
    DetectError::MalformedDesktopEntry {
        path: path.to_path_buf(),
        line: idx + 1,
    }
}

fn unescape_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => out.push(' '),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Name variants tried against `Name=`, in order.
pub fn search_variants(app_name: &str) -> Vec<String> {
    let lowered = app_name.to_ascii_lowercase();
    let dashed = lowered.replace(' ', "-");

    let mut variants = vec![app_name.to_string()];
    for variant in [lowered, dashed] {
        if !variants.contains(&variant) {
            variants.push(variant);
        }
    }
    variants
}

/// Parsed launcher files of one directory, in file-name order.
fn read_directory(dir: &Path) -> Vec<DesktopEntry> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        tracing::trace!(dir = %dir.display(), "launcher directory not readable");
        return Vec::new();
    };

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("desktop"))
        .collect();
    paths.sort();

    paths
        .into_iter()
        .filter_map(|path| match DesktopEntry::load(&path) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping desktop entry");
                None
            }
        })
        .collect()
}

/// Launcher files of several directories, read once.
#[derive(Debug, Clone, Default)]
pub struct DesktopEntryIndex {
    dirs: Vec<(PathBuf, Vec<DesktopEntry>)>,
}

impl DesktopEntryIndex {
    pub fn scan<P: AsRef<Path>>(dirs: &[P]) -> Self {
        let dirs = dirs
            .iter()
            .map(|dir| (dir.as_ref().to_path_buf(), read_directory(dir.as_ref())))
            .collect();
        Self { dirs }
    }

    pub fn entries(&self) -> impl Iterator<Item = &DesktopEntry> {
        self.dirs.iter().flat_map(|(_, entries)| entries.iter())
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }

    /// First entry whose `Name` matches `wanted`, searching one directory.
    fn by_name_in(entries: &[DesktopEntry], wanted: &str) -> Option<PathBuf> {
        entries
            .iter()
            .find(|entry| entry.name_matches(wanted))
            .map(|entry| entry.path.clone())
    }

    /// First entry anywhere whose `Exec` mentions `executable`.
    pub fn find_by_executable(&self, executable: &str) -> Option<PathBuf> {
        self.entries()
            .find(|entry| entry.exec_mentions(executable))
            .map(|entry| entry.path.clone())
    }

    /// First entry whose `Name` matches one of the search variants of
    /// `app_name`. Directories are the outer loop.
    pub fn find_by_name(&self, app_name: &str) -> Option<PathBuf> {
        let variants = search_variants(app_name);
        self.dirs.iter().find_map(|(_, entries)| {
            variants
                .iter()
                .find_map(|variant| Self::by_name_in(entries, variant))
        })
    }

    /// Full lookup: name variants first, then the executable of `pid`.
    pub fn find(
        &self,
        app_name: &str,
        pid: Option<u32>,
        processes: &dyn ProcessSource,
    ) -> Option<PathBuf> {
        if let Some(path) = self.find_by_name(app_name) {
            tracing::debug!(app_name, path = %path.display(), "desktop entry matched by name");
            return Some(path);
        }

        let pid = pid.filter(|&pid| pid > 0)?;
        let executable = processes.process_name(pid);
        if executable.is_empty() || executable == UNKNOWN_PROCESS {
            return None;
        }

        let found = self.find_by_executable(&executable);
        if let Some(path) = &found {
            tracing::debug!(
                app_name,
                executable,
                path = %path.display(),
                "desktop entry matched by executable"
            );
        }
        found
    }
}

/// Locates the launcher file for a running application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntryLocator {
    dirs: Vec<PathBuf>,
}

impl Default for DesktopEntryLocator {
    fn default() -> Self {
        Self::system()
    }
}

impl DesktopEntryLocator {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn system() -> Self {
        Self::new(DESKTOP_ENTRY_DIRS.iter().copied())
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Read every directory once for a batch of lookups.
    pub fn index(&self) -> DesktopEntryIndex {
        DesktopEntryIndex::scan(&self.dirs)
    }

    pub fn find_desktop_entry(
        &self,
        app_name: &str,
        pid: Option<u32>,
        processes: &dyn ProcessSource,
    ) -> Option<PathBuf> {
        self.index().find(app_name, pid, processes)
    }
}
