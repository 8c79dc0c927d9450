//! Switcher arrangement.
//!
//! Turns a [`ScreenSnapshot`] into the ordered list a window switcher would
//! show: desktop shells without a listed application first, then the
//! applications by display name, each with its windows in document order.

use crate::locale::SortConfig;
use crate::name::{resolve_display_name, ResolvedName};
use crate::provider::ProcessSource;
use crate::role::{classify, RoleTag};
use crate::state::{AppSnapshot, DesktopManagerInfo, ScreenSnapshot, WindowKind, WindowSnapshot};
use serde::Serialize;

/// One row of the switcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SwitcherEntry {
    /// A desktop shell with no application of its own in the list
    Shell(DesktopManagerInfo),

    Application {
        display_name: ResolvedName,
        pid: Option<u32>,
        role: RoleTag,
        /// Owns the focused window
        is_active: bool,
        /// Switchable windows in document order
        windows: Vec<WindowSnapshot>,
    },
}

impl SwitcherEntry {
    pub fn label(&self) -> &str {
        match self {
            SwitcherEntry::Shell(info) => &info.display_name,
            SwitcherEntry::Application { display_name, .. } => display_name.as_str(),
        }
    }

    pub fn pid(&self) -> Option<u32> {
        match self {
            SwitcherEntry::Shell(info) => Some(info.pid),
            SwitcherEntry::Application { pid, .. } => *pid,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            SwitcherEntry::Shell(info) => info.is_active,
            SwitcherEntry::Application { is_active, .. } => *is_active,
        }
    }
}

/// Windows that must never be hidden: anything but a normal window, or a
/// window whose title ends with `Desktop`.
pub fn is_desktop_window(window: &WindowSnapshot) -> bool {
    window.kind != WindowKind::Normal
        || window
            .title
            .as_deref()
            .is_some_and(|title| title.ends_with(b"Desktop"))
}

/// Normal windows on the active workspace, plus minimized ones anywhere.
pub fn switchable_windows(app: &AppSnapshot) -> Vec<&WindowSnapshot> {
    app.windows
        .iter()
        .filter(|w| w.kind == WindowKind::Normal && (w.on_active_workspace || w.minimized))
        .collect()
}

/// True if the application shows at least one window that "hide" would affect.
pub fn has_hideable_windows(app: &AppSnapshot) -> bool {
    app.windows
        .iter()
        .any(|w| w.on_active_workspace && !w.minimized && !is_desktop_window(w))
}

/// True if any application other than the focused one has a window that
/// "hide others" would affect. With nothing focused every application counts.
pub fn others_have_hideable_windows(screen: &ScreenSnapshot) -> bool {
    screen
        .applications
        .iter()
        .filter(|app| !screen.is_active_app(app))
        .any(has_hideable_windows)
}

/// True if "show all" has anything to restore.
pub fn has_minimized_windows(screen: &ScreenSnapshot) -> bool {
    screen
        .applications
        .iter()
        .flat_map(|app| &app.windows)
        .any(|w| w.kind == WindowKind::Normal && w.minimized)
}

/// Build the switcher list.
pub fn arrange(
    screen: &ScreenSnapshot,
    shells: &[DesktopManagerInfo],
    config: &SortConfig,
    processes: &dyn ProcessSource,
) -> Vec<SwitcherEntry> {
    let mut listed: Vec<(&AppSnapshot, ResolvedName, Vec<WindowSnapshot>)> = screen
        .applications
        .iter()
        .filter_map(|app| {
            let mut windows: Vec<WindowSnapshot> =
                switchable_windows(app).into_iter().cloned().collect();
            if windows.is_empty() {
                return None;
            }
            windows.sort_by(|a, b| {
                config.compare_window_titles(a.title.as_deref(), b.title.as_deref())
            });
            Some((app, resolve_display_name(&app.identity(), processes), windows))
        })
        .collect();

    listed.sort_by(|(_, a, _), (_, b, _)| config.compare(Some(a.as_str()), Some(b.as_str())));

    let mut entries: Vec<SwitcherEntry> = shells
        .iter()
        .filter(|shell| !shell_is_listed(shell, &listed))
        .cloned()
        .map(SwitcherEntry::Shell)
        .collect();

    let shell_count = entries.len();

    entries.extend(listed.into_iter().map(|(app, display_name, windows)| {
        let role = match app.name_str() {
            Some(name) => classify(name, app.pid, processes),
            None => RoleTag::Ordinary,
        };
        SwitcherEntry::Application {
            display_name,
            pid: app.pid,
            role,
            is_active: screen.is_active_app(app),
            windows,
        }
    }));

    tracing::debug!(
        shells = shell_count,
        applications = entries.len() - shell_count,
        "arranged switcher entries"
    );
    entries
}

fn shell_is_listed(
    shell: &DesktopManagerInfo,
    listed: &[(&AppSnapshot, ResolvedName, Vec<WindowSnapshot>)],
) -> bool {
    listed.iter().any(|(app, _, _)| {
        app.pid == Some(shell.pid)
            || (shell.process_name == "xfdesktop" && app.name.eq_ignore_ascii_case(b"thunar"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{LocaleType, SortStyle};
    use crate::provider::NullProvider;
    use crate::state::ActiveWindow;

    fn shell(process_name: &str, pid: u32, display_name: &str) -> DesktopManagerInfo {
        DesktopManagerInfo {
            pid,
            process_name: process_name.to_string(),
            display_name: display_name.to_string(),
            is_active: false,
        }
    }

    fn config() -> SortConfig {
        SortConfig::new(LocaleType::UnicodeAware, SortStyle::CajaStyle)
    }

    fn labels(entries: &[SwitcherEntry]) -> Vec<&str> {
        entries.iter().map(SwitcherEntry::label).collect()
    }

    #[test]
    fn test_desktop_window_detection() {
        assert!(is_desktop_window(&WindowSnapshot::new(1, "x").with_kind(WindowKind::Dock)));
        assert!(is_desktop_window(&WindowSnapshot::new(1, "Desktop")));
        assert!(is_desktop_window(&WindowSnapshot::new(1, "Caja Desktop")));
        assert!(!is_desktop_window(&WindowSnapshot::new(1, "Desktop notes")));
        assert!(!is_desktop_window(&WindowSnapshot {
            title: None,
            ..WindowSnapshot::new(1, "")
        }));
    }

    #[test]
    fn test_switchable_windows() {
        let app = AppSnapshot::new("mousepad", Some(1))
            .with_window(WindowSnapshot::new(1, "here"))
            .with_window(WindowSnapshot::new(2, "elsewhere").on_other_workspace())
            .with_window(WindowSnapshot::new(3, "min elsewhere").on_other_workspace().minimized())
            .with_window(WindowSnapshot::new(4, "dialog").with_kind(WindowKind::Dialog));

        let ids: Vec<u64> = switchable_windows(&app).iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_hideable_windows() {
        let minimized =
            AppSnapshot::new("a", None).with_window(WindowSnapshot::new(1, "x").minimized());
        assert!(!has_hideable_windows(&minimized));

        let desktop =
            AppSnapshot::new("xfdesktop", None).with_window(WindowSnapshot::new(1, "Desktop"));
        assert!(!has_hideable_windows(&desktop));

        let visible = AppSnapshot::new("a", None).with_window(WindowSnapshot::new(1, "notes.txt"));
        assert!(has_hideable_windows(&visible));
    }

    #[test]
    fn test_hide_others_ignores_focused_app() {
        let editor = AppSnapshot::new("mousepad", Some(10))
            .with_window(WindowSnapshot::new(1, "a.txt"))
            .with_window(WindowSnapshot::new(2, "b.txt"));
        let mut screen = ScreenSnapshot {
            applications: vec![editor],
            active_window: Some(ActiveWindow {
                window_id: 1,
                owner_pid: Some(10),
            }),
        };
        assert!(!others_have_hideable_windows(&screen));

        screen.applications.push(
            AppSnapshot::new("xfdesktop", Some(5)).with_window(WindowSnapshot::new(3, "Desktop")),
        );
        screen.applications.push(
            AppSnapshot::new("ristretto", Some(20))
                .with_window(WindowSnapshot::new(4, "cat.png").minimized()),
        );
        assert!(!others_have_hideable_windows(&screen));

        screen
            .applications
            .push(AppSnapshot::new("thunar", Some(30)).with_window(WindowSnapshot::new(5, "Home")));
        assert!(others_have_hideable_windows(&screen));

        screen.active_window = None;
        screen.applications.truncate(1);
        assert!(others_have_hideable_windows(&screen));
    }

    #[test]
    fn test_show_all_needs_minimized_normal_window() {
        let mut screen = ScreenSnapshot {
            applications: vec![
                AppSnapshot::new("mousepad", Some(10)).with_window(WindowSnapshot::new(1, "a.txt"))
            ],
            active_window: None,
        };
        assert!(!has_minimized_windows(&screen));

        screen.applications.push(
            AppSnapshot::new("panel", Some(11)).with_window(
                WindowSnapshot::new(2, "tray")
                    .with_kind(WindowKind::Dock)
                    .minimized(),
            ),
        );
        assert!(!has_minimized_windows(&screen));

        screen.applications.push(
            AppSnapshot::new("ristretto", Some(20))
                .with_window(WindowSnapshot::new(3, "cat.png").on_other_workspace().minimized()),
        );
        assert!(has_minimized_windows(&screen));
    }

    #[test]
    fn test_arrange_orders_apps_and_windows() {
        let screen = ScreenSnapshot {
            applications: vec![
                AppSnapshot::new("xfce4-terminal", Some(30))
                    .with_window(WindowSnapshot::new(300, "~")),
                AppSnapshot::new("mousepad", Some(10))
                    .with_window(WindowSnapshot::new(101, "file10.txt - Mousepad"))
                    .with_window(WindowSnapshot::new(100, "file2.txt - Mousepad")),
                AppSnapshot::new("org.gnome.Calculator", Some(20))
                    .with_window(WindowSnapshot::new(200, "Calculator").on_other_workspace()),
            ],
            active_window: Some(ActiveWindow {
                window_id: 300,
                owner_pid: Some(30),
            }),
        };

        let entries = arrange(&screen, &[], &config(), &NullProvider);
        assert_eq!(labels(&entries), vec!["Mousepad", "Xfce4 Terminal"]);

        match &entries[0] {
            SwitcherEntry::Application { windows, is_active, .. } => {
                let ids: Vec<u64> = windows.iter().map(|w| w.id).collect();
                assert_eq!(ids, vec![100, 101]);
                assert!(!is_active);
            }
            other => panic!("expected application, got {other:?}"),
        }
        assert!(entries[1].is_active());
    }

    #[test]
    fn test_shells_without_apps_come_first() {
        let screen = ScreenSnapshot {
            applications: vec![
                AppSnapshot::new("caja", Some(50)).with_window(WindowSnapshot::new(1, "Home")),
                AppSnapshot::new("mousepad", Some(10)).with_window(WindowSnapshot::new(2, "a.txt")),
            ],
            active_window: None,
        };
        let shells = vec![shell("caja", 50, "Caja"), shell("nemo-desktop", 60, "Nemo")];

        let entries = arrange(&screen, &shells, &config(), &NullProvider);
        assert_eq!(labels(&entries), vec!["Nemo", "Caja", "Mousepad"]);
        assert!(matches!(&entries[0], SwitcherEntry::Shell(info) if info.pid == 60));
        assert!(matches!(
            &entries[1],
            SwitcherEntry::Application {
                role: RoleTag::FileManager,
                ..
            }
        ));
    }

    #[test]
    fn test_xfdesktop_hidden_when_thunar_listed() {
        let screen = ScreenSnapshot {
            applications: vec![
                AppSnapshot::new("Thunar", Some(70)).with_window(WindowSnapshot::new(1, "Home"))
            ],
            active_window: None,
        };
        let shells = [shell("xfdesktop", 40, "Xfdesktop")];
        let entries = arrange(&screen, &shells, &config(), &NullProvider);
        assert_eq!(labels(&entries), vec!["Thunar"]);

        let entries = arrange(&ScreenSnapshot::default(), &shells, &config(), &NullProvider);
        assert_eq!(labels(&entries), vec!["Xfdesktop"]);
    }

    #[test]
    fn test_entries_serialize_with_type_tag() {
        let shells = [shell("caja", 1, "Caja")];
        let entries = arrange(&ScreenSnapshot::default(), &shells, &config(), &NullProvider);
        let json = serde_json::to_value(&entries).unwrap();
        assert_eq!(json[0]["type"], "shell");
        assert_eq!(json[0]["display_name"], "Caja");
    }
}
