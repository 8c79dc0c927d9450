//! Live process source backed by `sysinfo`.

use crate::proc::{ProcTable, ProcessFacts, ProcessSource, UNKNOWN_PROCESS};
use std::ffi::OsString;
use std::path::PathBuf;
use sysinfo::{Pid, Process, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};

/// The running system's processes, read through `sysinfo`.
///
/// Each query refreshes only what it needs: one pid for name and command
/// line lookups, the whole table for [`ProcessSource::processes`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemProcesses;

impl SystemProcesses {
    pub fn new() -> Self {
        Self
    }

    fn refresh_kind() -> ProcessRefreshKind {
        ProcessRefreshKind::nothing().with_cmd(UpdateKind::OnlyIfNotSet)
    }

    pub fn facts(&self, pid: u32) -> Option<ProcessFacts> {
        if pid == 0 {
            return None;
        }

        let mut system = System::new();
        let sys_pid = Pid::from_u32(pid);
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[sys_pid]),
            true,
            Self::refresh_kind(),
        );

        match system.process(sys_pid) {
            Some(process) => facts_from_process(pid, process),
            None => {
                tracing::trace!(pid, "process not found");
                None
            }
        }
    }

    pub fn scan_all_processes(&self) -> Vec<ProcessFacts> {
        let mut system = System::new();
        system.refresh_processes_specifics(ProcessesToUpdate::All, true, Self::refresh_kind());

        let mut processes: Vec<ProcessFacts> = system
            .processes()
            .iter()
            .filter(|(_, process)| process.thread_kind().is_none())
            .filter_map(|(pid, process)| facts_from_process(pid.as_u32(), process))
            .collect();

        processes.sort_by_key(|facts| facts.pid);
        tracing::debug!(count = processes.len(), "scanned running processes");
        processes
    }
}

/// Kernel threads have no command line and are skipped.
fn facts_from_process(pid: u32, process: &Process) -> Option<ProcessFacts> {
    ProcessFacts::from_os_args(pid, process.cmd())
}

impl ProcessSource for SystemProcesses {
    fn process_name(&self, pid: u32) -> String {
        self.facts(pid)
            .map(|facts| facts.basename)
            .unwrap_or_else(|| UNKNOWN_PROCESS.to_string())
    }

    fn raw_cmdline(&self, pid: u32) -> Option<Vec<u8>> {
        self.facts(pid).map(|facts| facts.raw_cmdline())
    }

    fn processes(&self) -> Vec<ProcessFacts> {
        self.scan_all_processes()
    }
}

/// Where a session reads processes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessBackend {
    /// The running system
    System(SystemProcesses),

    /// A procfs-style tree under a fixed root
    Table(ProcTable),
}

impl ProcessBackend {
    /// `None` selects the running system.
    pub fn from_root(root: Option<PathBuf>) -> Self {
        match root {
            Some(root) => ProcessBackend::Table(ProcTable::new(root)),
            None => ProcessBackend::System(SystemProcesses::new()),
        }
    }

    fn source(&self) -> &dyn ProcessSource {
        match self {
            ProcessBackend::System(system) => system,
            ProcessBackend::Table(table) => table,
        }
    }
}

impl Default for ProcessBackend {
    fn default() -> Self {
        ProcessBackend::System(SystemProcesses::new())
    }
}

impl ProcessSource for ProcessBackend {
    fn process_name(&self, pid: u32) -> String {
        self.source().process_name(pid)
    }

    fn raw_cmdline(&self, pid: u32) -> Option<Vec<u8>> {
        self.source().raw_cmdline(pid)
    }

    fn processes(&self) -> Vec<ProcessFacts> {
        self.source().processes()
    }
}

impl ProcessFacts {
    /// Build facts from OS-encoded arguments, replacing invalid UTF-8.
    pub fn from_os_args(pid: u32, args: &[OsString]) -> Option<Self> {
        let args: Vec<String> = args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        Self::from_args(pid, &args[..])
    }
}
