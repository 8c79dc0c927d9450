//! Desktop-shell discovery.
//!
//! Shells often own no visible window, so they are found by scanning the
//! process table rather than the window list.

use crate::name::resolve_display_name;
use crate::provider::ProcessSource;
use crate::role::is_shell_cmdline;
use crate::state::{DesktopManagerInfo, ScreenSnapshot};

/// Label used when no windowed application matches the shell's pid.
fn default_label(process_name: &str) -> String {
    let label = match process_name.to_ascii_lowercase().as_str() {
        "xfdesktop" => "Xfdesktop",
        "nemo-desktop" => "Nemo",
        "caja" => "Caja",
        "nautilus-desktop" => "Nautilus",
        "pcmanfm" => "PCManFM",
        _ => process_name,
    };
    label.to_string()
}

/// Find every running desktop shell, ordered by pid.
///
/// A shell is active when nothing has focus (the desktop does) or when the
/// focused window belongs to its process.
pub fn discover_desktop_shell_instances(
    processes: &dyn ProcessSource,
    screen: &ScreenSnapshot,
) -> Vec<DesktopManagerInfo> {
    let mut shells: Vec<DesktopManagerInfo> = processes
        .processes()
        .into_iter()
        .filter(|facts| is_shell_cmdline(&facts.basename, &facts.raw_cmdline()))
        .map(|facts| {
            let display_name = match screen.application_by_pid(facts.pid) {
                Some(app) => resolve_display_name(&app.identity(), processes).into_string(),
                None => default_label(&facts.basename),
            };

            let is_active = match screen.active_window {
                None => true,
                Some(active) => active.owner_pid == Some(facts.pid),
            };

            DesktopManagerInfo {
                pid: facts.pid,
                process_name: facts.basename,
                display_name,
                is_active,
            }
        })
        .collect();

    shells.sort_by_key(|shell| shell.pid);

    tracing::info!(
        count = shells.len(),
        names = ?shells.iter().map(|s| s.process_name.as_str()).collect::<Vec<_>>(),
        "discovered desktop shells"
    );
    shells
}
