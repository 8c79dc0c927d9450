//! Application identity and ordering for window switchers.
//!
//! Given the raw names, titles and pids a window-tracking toolkit reports,
//! this crate derives presentable application names, classifies desktop
//! shells and file managers, finds launcher files and orders applications
//! and windows the way the running file manager would.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                             │
//! │  name.rs     - Tier cascade for display names (pure)        │
//! │  role.rs     - Shell / file manager / history roles         │
//! │  collate.rs  - Locale-aware natural filename collation      │
//! │  compare.rs  - Special-character priority + collation       │
//! │  title.rs    - Window title clean-up                        │
//! │  state.rs    - Window and application snapshots             │
//! │  provider.rs - Traits for process and window state          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Infrastructure Layer                        │
//! │  appident-detect - sysinfo, .desktop, xdg-mime, XBEL        │
//! │  discovery.rs    - Desktop shells found in the proc table   │
//! │  locale.rs       - Locale and sort style detection          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Application Layer                          │
//! │  arrange.rs  - Ordered switcher entries                     │
//! │  session.rs  - Session-scoped sort config and lookups       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use appident_context::{NullProvider, Session, SessionSettings};
//!
//! let session = Session::from_settings(&SessionSettings::default(), &NullProvider);
//! for entry in session.arrange(&NullProvider) {
//!     println!("{}", entry.label());
//! }
//! ```

mod arrange;
mod collate;
mod compare;
mod discovery;
mod error;
mod locale;
mod name;
mod provider;
mod role;
mod session;
mod settings;
mod state;
mod title;

pub use arrange::{
    arrange, has_hideable_windows, has_minimized_windows, is_desktop_window,
    others_have_hideable_windows, switchable_windows, SwitcherEntry,
};
pub use collate::{filename_cmp, FilenameCollator};
pub use compare::{compare, compare_window_titles, special_char_priority};
pub use discovery::discover_desktop_shell_instances;
pub use error::{ContextError, ContextResult};
pub use locale::{
    collation_locale_name, collation_locale_name_with, detect_locale, detect_locale_with,
    detect_sort_style, LocaleType, SortConfig, SortStyle, LOCALE_VARS,
};
pub use name::{
    looks_like_window_title, resolve_display_name, resolve_name, RawIdentity, ResolvedName,
    INVALID_APP_NAME, UNTITLED_PROGRAM,
};
pub use provider::{NullProvider, ProcessSource, WindowSource};
pub use role::{
    classify, classify_bookmark, filter_history, is_file_manager, is_shell_cmdline,
    is_shell_instance, looks_like_shell_name, should_blacklist_for_history, RoleTag,
    DESKTOP_SHELLS, FILE_MANAGERS, HISTORY_BLACKLIST,
};
pub use session::Session;
pub use settings::SessionSettings;
pub use state::{
    ActiveWindow, AppSnapshot, DesktopManagerInfo, ScreenSnapshot, WindowKind, WindowSnapshot,
};
pub use title::{
    ensure_valid_utf8, extract_sortable_document_name, strip_application_suffix, EMPTY_DOCUMENT,
    TITLE_SEPARATORS,
};

// Re-export detect crate types that appear in this crate's API
pub use appident_detect::{
    BookmarkMetadata, DesktopEntryLocator, ProcTable, ProcessBackend, ProcessFacts,
    ProcessSnapshot, SystemProcesses,
};
