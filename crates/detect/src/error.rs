//! Error types for OS probing.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for probing operations.
pub type DetectResult<T> = Result<T, DetectError>;

/// Errors raised by the fallible probing primitives.
///
/// The total lookups built on top of them (process names, launcher search,
/// history filtering) never surface these; they log and fall back instead.
#[derive(Debug, Error)]
pub enum DetectError {
    /// Failed to read a process command-line record.
    #[error("failed to read command line of pid {pid}: {source}")]
    ReadCmdline {
        pid: u32,
        #[source]
        source: std::io::Error,
    },

    /// The command-line record exists but is empty (kernel threads, zombies).
    #[error("command line of pid {pid} is empty")]
    EmptyCmdline { pid: u32 },

    /// Failed to read a launcher file.
    #[error("failed to read desktop entry '{path}': {source}")]
    ReadDesktopEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Launcher file is not valid key file syntax.
    #[error("malformed desktop entry '{path}' at line {line}")]
    MalformedDesktopEntry { path: PathBuf, line: usize },

    /// Failed to read the recently-used bookmark file.
    #[error("failed to read bookmark file '{path}': {source}")]
    ReadBookmarks {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bookmark file is not well-formed XML.
    #[error("invalid bookmark file: {0}")]
    Bookmarks(#[from] quick_xml::Error),
}
