//! Snapshot structures exchanged with the window-tracking collaborator.

use crate::name::RawIdentity;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Window type as reported by the window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    #[default]
    Normal,
    Desktop,
    Dock,
    Dialog,
    Other,
}

/// One top-level window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSnapshot {
    /// Window manager id (e.g. the X11 window id)
    pub id: u64,

    /// Raw title bytes; not guaranteed to be UTF-8
    pub title: Option<Vec<u8>>,

    #[serde(default)]
    pub kind: WindowKind,

    #[serde(default)]
    pub minimized: bool,

    /// Visible on the currently active workspace
    #[serde(default = "default_true")]
    pub on_active_workspace: bool,
}

fn default_true() -> bool {
    true
}

impl WindowSnapshot {
    /// A normal, visible window on the active workspace.
    pub fn new(id: u64, title: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            title: Some(title.into()),
            kind: WindowKind::Normal,
            minimized: false,
            on_active_workspace: true,
        }
    }

    pub fn with_kind(mut self, kind: WindowKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn minimized(mut self) -> Self {
        self.minimized = true;
        self
    }

    pub fn on_other_workspace(mut self) -> Self {
        self.on_active_workspace = false;
        self
    }

    pub fn title_lossy(&self) -> Option<Cow<'_, str>> {
        self.title.as_deref().map(String::from_utf8_lossy)
    }
}

/// An application and the windows it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSnapshot {
    /// Raw application name from the window tracker
    pub name: Vec<u8>,

    pub pid: Option<u32>,

    #[serde(default)]
    pub windows: Vec<WindowSnapshot>,
}

impl AppSnapshot {
    pub fn new(name: impl Into<Vec<u8>>, pid: Option<u32>) -> Self {
        Self {
            name: name.into(),
            pid,
            windows: Vec::new(),
        }
    }

    pub fn with_window(mut self, window: WindowSnapshot) -> Self {
        self.windows.push(window);
        self
    }

    /// Name as UTF-8, if it is valid.
    pub fn name_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.name).ok()
    }

    /// Input for the name resolver; the first window title is the fallback.
    pub fn identity(&self) -> RawIdentity {
        RawIdentity {
            source_name: self.name.clone(),
            pid: self.pid,
            fallback_window_title: self.windows.first().and_then(|w| w.title.clone()),
        }
    }

    pub fn owns_window(&self, window_id: u64) -> bool {
        self.windows.iter().any(|w| w.id == window_id)
    }
}

/// The focused window and the process that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveWindow {
    pub window_id: u64,
    pub owner_pid: Option<u32>,
}

/// Everything the window tracker knows at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSnapshot {
    pub applications: Vec<AppSnapshot>,
    pub active_window: Option<ActiveWindow>,
}

impl ScreenSnapshot {
    pub fn application_by_pid(&self, pid: u32) -> Option<&AppSnapshot> {
        self.applications.iter().find(|app| app.pid == Some(pid))
    }

    pub fn active_owner_pid(&self) -> Option<u32> {
        self.active_window.and_then(|active| active.owner_pid)
    }

    /// Whether `app` owns the focused window.
    pub fn is_active_app(&self, app: &AppSnapshot) -> bool {
        let Some(active) = self.active_window else {
            return false;
        };
        app.owns_window(active.window_id) || (app.pid.is_some() && app.pid == active.owner_pid)
    }
}

/// A running desktop-shell process, possibly without any window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopManagerInfo {
    pub pid: u32,

    /// Process base name, e.g. `"xfdesktop"`
    pub process_name: String,

    /// Label to show for it, e.g. `"Xfdesktop"`
    pub display_name: String,

    /// True when the desktop itself has focus
    pub is_active: bool,
}
