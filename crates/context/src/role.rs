//! Role classification for running applications.
//!
//! Pure domain logic apart from the command-line lookups that go through a
//! [`ProcessSource`].

use crate::provider::ProcessSource;
use appident_detect::{contains_flag, has_standalone_arg, BookmarkMetadata};
use serde::{Deserialize, Serialize};

/// What a process is used for, as far as the switcher cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RoleTag {
    #[default]
    Ordinary,

    /// A file manager window (browser mode)
    FileManager,

    /// Draws the desktop background and icons
    DesktopShell,

    /// Documents opened by it stay out of the recent list
    BlacklistedForHistory,
}

impl RoleTag {
    pub fn label(&self) -> &'static str {
        match self {
            RoleTag::Ordinary => "Ordinary",
            RoleTag::FileManager => "File Manager",
            RoleTag::DesktopShell => "Desktop Shell",
            RoleTag::BlacklistedForHistory => "Blacklisted For History",
        }
    }
}

impl std::fmt::Display for RoleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Process names that can act as the desktop.
pub const DESKTOP_SHELLS: &[&str] = &[
    "xfdesktop",
    "caja",
    "nemo-desktop",
    "nautilus-desktop",
    "pcmanfm",
];

/// Process names of file managers.
pub const FILE_MANAGERS: &[&str] = &[
    "caja",
    "thunar",
    "nemo",
    "nautilus",
    "pcmanfm",
    "dolphin",
    "konqueror",
];

/// Applications whose documents are downloads or transient files.
pub const HISTORY_BLACKLIST: &[&str] = &[
    "Firefox",
    "Mozilla Firefox",
    "Chrome",
    "Google Chrome",
    "Chromium",
    "wget",
    "curl",
    "Thunderbird",
    "Transmission",
    "qBittorrent",
    "aria2c",
    "yt-dlp",
    "youtube-dl",
];

fn in_table(table: &[&str], name: &str) -> bool {
    table.iter().any(|entry| entry.eq_ignore_ascii_case(name))
}

/// Name-only check against [`DESKTOP_SHELLS`].
pub fn looks_like_shell_name(name: &str) -> bool {
    in_table(DESKTOP_SHELLS, name)
}

/// Whether a running instance is actually drawing the desktop.
///
/// File managers that double as shells only count when started in desktop
/// mode, which is read from their command line.
pub fn is_shell_instance(app_name: &str, pid: u32, processes: &dyn ProcessSource) -> bool {
    if !needs_flag_proof(app_name) {
        return looks_like_shell_name(app_name);
    }

    match processes.raw_cmdline(pid) {
        Some(raw) => is_shell_cmdline(app_name, &raw),
        None => {
            tracing::trace!(pid, app = app_name, "no command line to verify desktop mode");
            false
        }
    }
}

fn needs_flag_proof(name: &str) -> bool {
    is_caja(name) || name.eq_ignore_ascii_case("pcmanfm")
}

fn is_caja(name: &str) -> bool {
    name.eq_ignore_ascii_case("caja") || name.starts_with("Caja")
}

/// Decide from a raw NUL-separated command line.
pub fn is_shell_cmdline(name: &str, raw: &[u8]) -> bool {
    if is_caja(name) {
        let forced = contains_flag(raw, "--force-desktop");
        if !forced && has_standalone_arg(raw, "-n") {
            // `-n` alone only suppresses the initial window
            tracing::trace!(app = name, "caja started with -n but without a desktop flag");
        }
        return forced || contains_flag(raw, "--desktop");
    }
    if name.eq_ignore_ascii_case("pcmanfm") {
        return contains_flag(raw, "--desktop");
    }
    looks_like_shell_name(name)
}

pub fn is_file_manager(app_name: &str) -> bool {
    in_table(FILE_MANAGERS, app_name) || looks_like_shell_name(app_name)
}

/// True if any application that opened the file is a browser or downloader.
pub fn should_blacklist_for_history(metadata: Option<&BookmarkMetadata>) -> bool {
    let Some(metadata) = metadata else {
        return false;
    };
    metadata.application_names().any(|name| in_table(HISTORY_BLACKLIST, name))
}

/// Classify a running application. Shell instance wins over file manager.
pub fn classify(app_name: &str, pid: Option<u32>, processes: &dyn ProcessSource) -> RoleTag {
    if let Some(pid) = pid.filter(|&pid| pid > 0) {
        if is_shell_instance(app_name, pid, processes) {
            return RoleTag::DesktopShell;
        }
    }
    if is_file_manager(app_name) {
        return RoleTag::FileManager;
    }
    RoleTag::Ordinary
}

pub fn classify_bookmark(metadata: &BookmarkMetadata) -> RoleTag {
    if should_blacklist_for_history(Some(metadata)) {
        RoleTag::BlacklistedForHistory
    } else {
        RoleTag::Ordinary
    }
}

/// Recent documents worth showing, in input order.
pub fn filter_history(bookmarks: Vec<BookmarkMetadata>) -> Vec<BookmarkMetadata> {
    let before = bookmarks.len();
    let kept: Vec<BookmarkMetadata> = bookmarks
        .into_iter()
        .filter(|bookmark| !should_blacklist_for_history(Some(bookmark)))
        .collect();
    tracing::debug!(before, after = kept.len(), "filtered recent documents");
    kept
}
