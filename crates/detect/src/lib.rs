//! OS probing for appident.
//!
//! Everything here touches the filesystem or spawns a process:
//! - `proc`: process facts, command-line records under a procfs root
//! - `system`: the running system's processes through `sysinfo`
//! - `desktop`: `.desktop` launcher parsing and lookup
//! - `handler`: the default directory handler (`xdg-mime`, `PATH` fallback)
//! - `bookmarks`: the XBEL recently-used file
//!
//! Fallible primitives return [`DetectResult`]; the lookups built on them
//! degrade to sentinels (`"unknown"`, `None`, empty lists) instead.

mod bookmarks;
mod desktop;
mod error;
mod handler;
mod proc;
mod system;

pub use bookmarks::{
    load_xbel, parse_xbel, recently_used_path, BookmarkApplication, BookmarkMetadata,
};
pub use desktop::{
    search_variants, DesktopEntry, DesktopEntryIndex, DesktopEntryLocator, DESKTOP_ENTRY_DIRS,
};
pub use error::{DetectError, DetectResult};
pub use handler::{
    default_file_manager, fallback_file_manager, find_program_in_path, parse_xdg_mime_output,
    FALLBACK_FILE_MANAGERS,
};
pub use proc::{
    contains_flag, has_standalone_arg, ProcTable, ProcessFacts, ProcessSnapshot, ProcessSource,
    UNKNOWN_PROCESS,
};
pub use system::{ProcessBackend, SystemProcesses};
