//! Process facts and the procfs-style table reader.
//!
//! [`ProcTable`] reads NUL-separated command-line records from a fixed root,
//! for fake tables and mounted trees. The running system is read through
//! [`SystemProcesses`](crate::SystemProcesses).

use crate::error::{DetectError, DetectResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Sentinel returned when a process name cannot be determined.
pub const UNKNOWN_PROCESS: &str = "unknown";

/// OS-level facts about one running process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessFacts {
    pub pid: u32,

    /// Arguments in order; the first one is the program path.
    pub command_line: Vec<String>,

    /// Base file name of the first argument.
    pub basename: String,
}

impl ProcessFacts {
    /// Build facts from a raw `cmdline` record.
    ///
    /// Returns `None` for pid 0 or when the record holds no program path.
    pub fn from_cmdline(pid: u32, raw: &[u8]) -> Option<Self> {
        if pid == 0 {
            return None;
        }

        let raw = raw.strip_suffix(&[0]).unwrap_or(raw);
        if raw.is_empty() {
            return None;
        }

        let command_line: Vec<String> = raw
            .split(|&b| b == 0)
            .map(|arg| String::from_utf8_lossy(arg).into_owned())
            .collect();

        let basename = command_line.first().and_then(|program| basename(program))?;

        Some(Self {
            pid,
            command_line,
            basename,
        })
    }

    /// Convenience constructor from already-split arguments.
    pub fn from_args<S: AsRef<str>>(pid: u32, args: &[S]) -> Option<Self> {
        let joined = args
            .iter()
            .map(|arg| arg.as_ref())
            .collect::<Vec<_>>()
            .join("\0");
        Self::from_cmdline(pid, joined.as_bytes())
    }

    /// Re-joins the arguments with NUL separators, matching the on-disk
    /// record minus its trailing terminator.
    pub fn raw_cmdline(&self) -> Vec<u8> {
        self.command_line.join("\0").into_bytes()
    }
}

/// Source of process facts.
///
/// Implemented by [`SystemProcesses`](crate::SystemProcesses), by
/// [`ProcTable`] and by [`ProcessSnapshot`], which answers from a single
/// captured scan.
pub trait ProcessSource: Send + Sync {
    /// Base name of the process's program, or [`UNKNOWN_PROCESS`].
    fn process_name(&self, pid: u32) -> String;

    /// Raw command-line record, if readable and non-empty.
    fn raw_cmdline(&self, pid: u32) -> Option<Vec<u8>>;

    /// Every readable process, ordered by pid.
    fn processes(&self) -> Vec<ProcessFacts>;
}

/// A procfs-style process table under a fixed root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcTable {
    root: PathBuf,
}

impl ProcTable {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read the raw command-line record for `pid`.
    pub fn read_cmdline(&self, pid: u32) -> DetectResult<Vec<u8>> {
        let path = self.root.join(pid.to_string()).join("cmdline");
        let raw = fs::read(&path).map_err(|source| DetectError::ReadCmdline { pid, source })?;

        if raw.is_empty() {
            return Err(DetectError::EmptyCmdline { pid });
        }

        Ok(raw)
    }

    pub fn facts(&self, pid: u32) -> Option<ProcessFacts> {
        match self.read_cmdline(pid) {
            Ok(raw) => ProcessFacts::from_cmdline(pid, &raw),
            Err(e) => {
                tracing::trace!(pid, error = %e, "process record unavailable");
                None
            }
        }
    }

    /// Base name of the process's first argument, or `"unknown"`.
    pub fn process_name(&self, pid: u32) -> String {
        self.facts(pid)
            .map(|facts| facts.basename)
            .unwrap_or_else(|| UNKNOWN_PROCESS.to_string())
    }

    /// Enumerate every numeric entry under the root.
    ///
    /// Entries that vanish or cannot be read are skipped.
    pub fn scan_all_processes(&self) -> Vec<ProcessFacts> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    root = %self.root.display(),
                    error = %e,
                    "could not open process table"
                );
                return Vec::new();
            }
        };

        let mut processes: Vec<ProcessFacts> = entries
            .flatten()
            .filter_map(|entry| entry.file_name().to_str()?.parse::<u32>().ok())
            .filter_map(|pid| self.facts(pid))
            .collect();

        processes.sort_by_key(|facts| facts.pid);
        tracing::debug!(count = processes.len(), "scanned process table");
        processes
    }
}

impl ProcessSource for ProcTable {
    fn process_name(&self, pid: u32) -> String {
        ProcTable::process_name(self, pid)
    }

    fn raw_cmdline(&self, pid: u32) -> Option<Vec<u8>> {
        self.read_cmdline(pid).ok()
    }

    fn processes(&self) -> Vec<ProcessFacts> {
        self.scan_all_processes()
    }
}

/// One captured scan of a process table.
///
/// Use this when resolving a batch of items so the table is read once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessSnapshot {
    processes: Vec<ProcessFacts>,
}

impl ProcessSnapshot {
    pub fn capture(source: &dyn ProcessSource) -> Self {
        Self::from_processes(source.processes())
    }

    pub fn from_processes(mut processes: Vec<ProcessFacts>) -> Self {
        processes.sort_by_key(|facts| facts.pid);
        processes.dedup_by_key(|facts| facts.pid);
        Self { processes }
    }

    pub fn get(&self, pid: u32) -> Option<&ProcessFacts> {
        self.processes
            .binary_search_by_key(&pid, |facts| facts.pid)
            .ok()
            .map(|idx| &self.processes[idx])
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

impl ProcessSource for ProcessSnapshot {
    fn process_name(&self, pid: u32) -> String {
        self.get(pid)
            .map(|facts| facts.basename.clone())
            .unwrap_or_else(|| UNKNOWN_PROCESS.to_string())
    }

    fn raw_cmdline(&self, pid: u32) -> Option<Vec<u8>> {
        self.get(pid).map(ProcessFacts::raw_cmdline)
    }

    fn processes(&self) -> Vec<ProcessFacts> {
        self.processes.clone()
    }
}

/// Byte-level substring search over a raw command line.
///
/// Not argument aware: `--desktop` also matches inside
/// `--force-desktop` or a path.
pub fn contains_flag(raw: &[u8], flag: &str) -> bool {
    let needle = flag.as_bytes();
    !needle.is_empty() && raw.windows(needle.len()).any(|window| window == needle)
}

/// True if `arg` appears as a whole argument: preceded by the start of the
/// record or a NUL, followed by the end, a NUL or a space.
pub fn has_standalone_arg(raw: &[u8], arg: &str) -> bool {
    let needle = arg.as_bytes();
    if needle.is_empty() || raw.len() < needle.len() {
        return false;
    }

    (0..=raw.len() - needle.len()).any(|i| {
        let end = i + needle.len();
        &raw[i..end] == needle
            && (i == 0 || raw[i - 1] == 0)
            && (end >= raw.len() || raw[end] == 0 || raw[end] == b' ')
    })
}

fn basename(program: &str) -> Option<String> {
    let trimmed = program.trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }

    let name = trimmed
        .rsplit_once('/')
        .map(|(_, name)| name)
        .unwrap_or(trimmed);
    Some(name.to_string())
}
