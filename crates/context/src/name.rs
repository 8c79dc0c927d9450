//! Display-name resolution.
//!
//! Raw names from the window tracker range from reverse-DNS ids to whole
//! window titles. They are cleaned up by an ordered cascade of tiers; the
//! first tier that produces a name wins.

use crate::provider::{NullProvider, ProcessSource};
use appident_detect::UNKNOWN_PROCESS;
use serde::Serialize;
use std::borrow::Cow;

/// Returned when neither a name nor a fallback title is available.
pub const UNTITLED_PROGRAM: &str = "Untitled Program";

/// Returned when the raw name is not valid UTF-8.
pub const INVALID_APP_NAME: &str = "Invalid App Name";

/// Longest raw name still considered an application name.
const MAX_APP_NAME_LEN: usize = 20;

/// Raw input to the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawIdentity {
    /// Application name as reported; may be empty or invalid UTF-8
    pub source_name: Vec<u8>,

    pub pid: Option<u32>,

    /// Title of the application's first window
    pub fallback_window_title: Option<Vec<u8>>,
}

impl RawIdentity {
    pub fn new(source_name: impl Into<Vec<u8>>) -> Self {
        Self {
            source_name: source_name.into(),
            ..Self::default()
        }
    }

    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = Some(pid);
        self
    }

    pub fn with_fallback_title(mut self, title: impl Into<Vec<u8>>) -> Self {
        self.fallback_window_title = Some(title.into());
        self
    }
}

/// A presentable application name. Never empty, always UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResolvedName(String);

impl ResolvedName {
    fn untitled() -> Self {
        Self(UNTITLED_PROGRAM.to_string())
    }

    fn invalid() -> Self {
        Self(INVALID_APP_NAME.to_string())
    }

    fn derived(name: String) -> Self {
        if name.is_empty() {
            Self::untitled()
        } else {
            Self(name)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ResolvedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResolvedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for ResolvedName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// True if `name` is probably a window title rather than an application name.
pub fn looks_like_window_title(name: &str) -> bool {
    name.len() > MAX_APP_NAME_LEN
        || name.contains(" — ")
        || name.contains(" - ")
        || name.contains(':')
        || name.contains('/')
}

#[derive(Debug, Clone, Copy)]
enum Pattern {
    Exact(&'static str),
    Prefix(&'static str),
    Suffix(&'static str),
}

impl Pattern {
    fn matches(self, name: &str) -> bool {
        let name = name.as_bytes();
        match self {
            Pattern::Exact(p) => name.eq_ignore_ascii_case(p.as_bytes()),
            Pattern::Prefix(p) => {
                name.len() >= p.len() && name[..p.len()].eq_ignore_ascii_case(p.as_bytes())
            }
            Pattern::Suffix(p) => {
                name.len() >= p.len()
                    && name[name.len() - p.len()..].eq_ignore_ascii_case(p.as_bytes())
            }
        }
    }
}

/// Names that need exact control, matched ASCII case-insensitively.
const MANUAL_OVERRIDES: &[(Pattern, &str)] = &[
    (Pattern::Exact("org.mozilla.firefox"), "Firefox"),
    (Pattern::Exact("google-chrome"), "Google Chrome"),
    (Pattern::Exact("code"), "Visual Studio Code"),
    (Pattern::Exact("vlc"), "VLC Media Player"),
    (Pattern::Exact("VLC media player"), "VLC Media Player"),
    (Pattern::Exact("xfce4-about"), "About Xfce"),
    (Pattern::Exact("xfce4-appfinder"), "App Finder"),
    (Pattern::Prefix("soffice"), "LibreOffice"),
    (Pattern::Suffix("- Audacious"), "Audacious"),
];

type Tier = (&'static str, fn(&str) -> Option<String>);

/// The cascade, in priority order. Anything unmatched is used as is.
const TIERS: &[Tier] = &[
    ("manual-override", manual_override),
    ("settings-app", settings_app),
    ("reverse-domain", reverse_domain),
    ("single-word", single_lowercase_word),
    ("dash-expansion", dash_expansion),
];

fn manual_override(name: &str) -> Option<String> {
    MANUAL_OVERRIDES
        .iter()
        .find(|(pattern, _)| pattern.matches(name))
        .map(|(_, display)| display.to_string())
}

/// `Xfce4-<mid>-settings` -> `<Mid>`
fn settings_app(name: &str) -> Option<String> {
    const PREFIX: &str = "Xfce4-";
    const SUFFIX: &str = "-settings";

    if !Pattern::Prefix(PREFIX).matches(name) {
        return None;
    }
    let middle = name.strip_suffix(SUFFIX)?.get(PREFIX.len()..)?;
    if middle.is_empty() {
        return None;
    }
    Some(expand_dashes(middle))
}

/// `org.gnome.Calculator` -> `Calculator`
fn reverse_domain(name: &str) -> Option<String> {
    if !(name.starts_with("org.") || name.starts_with("Org.")) {
        return None;
    }
    let (_, last) = name.rsplit_once('.')?;
    if last.is_empty() {
        return None;
    }
    Some(expand_dashes(last))
}

fn single_lowercase_word(name: &str) -> Option<String> {
    if name.is_empty()
        || name.contains([' ', '.', '-'])
        || name.bytes().any(|b| b.is_ascii_uppercase())
    {
        return None;
    }
    Some(capitalize_first(name))
}

fn dash_expansion(name: &str) -> Option<String> {
    name.contains('-').then(|| expand_dashes(name))
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            let mut out = String::with_capacity(s.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        _ => s.to_string(),
    }
}

/// Dashes become spaces; the first letter and every letter after a dash
/// are upper-cased.
fn expand_dashes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '-' {
            out.push(' ');
            capitalize_next = true;
            continue;
        }
        if capitalize_next && c.is_ascii_lowercase() {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        capitalize_next = false;
    }
    out
}

/// Resolve a presentable name. Total: every input yields a name.
pub fn resolve_display_name(identity: &RawIdentity, processes: &dyn ProcessSource) -> ResolvedName {
    if identity.source_name.is_empty() {
        return match identity.fallback_window_title.as_deref() {
            Some(title) if !title.is_empty() => match std::str::from_utf8(title) {
                Ok(title) => ResolvedName::derived(title.to_string()),
                Err(_) => ResolvedName::invalid(),
            },
            _ => ResolvedName::untitled(),
        };
    }

    let Ok(name) = std::str::from_utf8(&identity.source_name) else {
        return ResolvedName::invalid();
    };

    let name = unmask_window_title(name, identity.pid, processes);

    let resolved = TIERS.iter().find_map(|(tier, rule)| {
        let result = rule(&name)?;
        tracing::trace!(tier, raw = %name, resolved = %result, "name tier matched");
        Some(result)
    });

    ResolvedName::derived(resolved.unwrap_or_else(|| name.into_owned()))
}

/// Swap a title-like name for the owning process's name when one is known.
fn unmask_window_title<'a>(
    name: &'a str,
    pid: Option<u32>,
    processes: &dyn ProcessSource,
) -> Cow<'a, str> {
    let Some(pid) = pid.filter(|&pid| pid > 0) else {
        return Cow::Borrowed(name);
    };
    if !looks_like_window_title(name) {
        return Cow::Borrowed(name);
    }

    let process_name = processes.process_name(pid);
    if process_name.is_empty() || process_name == UNKNOWN_PROCESS {
        return Cow::Borrowed(name);
    }

    tracing::debug!(
        pid,
        title = name,
        process = %process_name,
        "using process name for title-like app name"
    );
    Cow::Owned(process_name)
}

/// Resolve a bare name with no process or window context.
pub fn resolve_name(name: &str) -> ResolvedName {
    resolve_display_name(&RawIdentity::new(name), &NullProvider)
}
