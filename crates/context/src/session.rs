//! Resolver session.
//!
//! A [`Session`] owns the process source, the launcher locator and the
//! [`SortConfig`] decided when it was created. Batch operations capture the
//! process table once and answer every item from that capture.

use crate::arrange::{arrange, SwitcherEntry};
use crate::discovery::discover_desktop_shell_instances;
use crate::locale::{detect_locale, detect_sort_style, SortConfig};
use crate::name::{resolve_display_name, RawIdentity, ResolvedName};
use crate::provider::{ProcessSource, WindowSource};
use crate::role::{classify, filter_history, RoleTag};
use crate::settings::SessionSettings;
use crate::state::{DesktopManagerInfo, ScreenSnapshot};
use appident_detect::{
    default_file_manager, load_xbel, BookmarkMetadata, DesktopEntryLocator, DetectResult,
    ProcessBackend, ProcessSnapshot,
};
use std::path::{Path, PathBuf};

pub struct Session<P: ProcessSource> {
    processes: P,
    locator: DesktopEntryLocator,
    sort: SortConfig,
}

impl Session<ProcessBackend> {
    /// Build a session over the processes described by `settings`: the
    /// running system, or a procfs-style tree when `proc_root` is set.
    ///
    /// Locale and sort style come from the overrides when present and are
    /// detected otherwise, using the current window state.
    pub fn from_settings(settings: &SessionSettings, windows: &dyn WindowSource) -> Self {
        let processes = ProcessBackend::from_root(settings.proc_root.clone());
        let locator = DesktopEntryLocator::new(settings.desktop_dirs.iter().cloned());

        let locale = settings.locale.unwrap_or_else(detect_locale);
        let style = match settings.sort_style {
            Some(style) => style,
            None => {
                let batch = ProcessSnapshot::capture(&processes);
                detect_sort_style(&discover_desktop_shell_instances(&batch, &windows.screen()))
            }
        };

        Self::new(processes, locator, SortConfig::new(locale, style))
    }
}

impl<P: ProcessSource> Session<P> {
    pub fn new(processes: P, locator: DesktopEntryLocator, sort: SortConfig) -> Self {
        tracing::info!(
            locale = ?sort.locale,
            style = ?sort.style,
            dirs = locator.dirs().len(),
            "resolver session created"
        );
        Self {
            processes,
            locator,
            sort,
        }
    }

    pub fn sort_config(&self) -> SortConfig {
        self.sort
    }

    pub fn processes(&self) -> &P {
        &self.processes
    }

    pub fn display_name(&self, identity: &RawIdentity) -> ResolvedName {
        resolve_display_name(identity, &self.processes)
    }

    pub fn classify(&self, app_name: &str, pid: Option<u32>) -> RoleTag {
        classify(app_name, pid, &self.processes)
    }

    pub fn desktop_entry(&self, app_name: &str, pid: Option<u32>) -> Option<PathBuf> {
        self.locator.find_desktop_entry(app_name, pid, &self.processes)
    }

    /// Launcher files for several applications with one directory scan.
    pub fn desktop_entries<'a, I>(&self, apps: I) -> Vec<Option<PathBuf>>
    where
        I: IntoIterator<Item = (&'a str, Option<u32>)>,
    {
        let index = self.locator.index();
        apps.into_iter()
            .map(|(app_name, pid)| index.find(app_name, pid, &self.processes))
            .collect()
    }

    pub fn discover_shells(&self, screen: &ScreenSnapshot) -> Vec<DesktopManagerInfo> {
        discover_desktop_shell_instances(&self.capture(), screen)
    }

    /// The ordered switcher list for the current window state.
    pub fn arrange(&self, windows: &dyn WindowSource) -> Vec<SwitcherEntry> {
        let screen = windows.screen();
        let batch = self.capture();
        let shells = discover_desktop_shell_instances(&batch, &screen);
        arrange(&screen, &shells, &self.sort, &batch)
    }

    /// Recent documents from an XBEL file, minus downloads and mail attachments.
    pub fn recent_documents(&self, path: &Path) -> DetectResult<Vec<BookmarkMetadata>> {
        Ok(filter_history(load_xbel(path)?))
    }

    pub fn default_file_manager(&self) -> Option<String> {
        default_file_manager()
    }

    fn capture(&self) -> ProcessSnapshot {
        ProcessSnapshot::from_processes(self.processes.processes())
    }
}
