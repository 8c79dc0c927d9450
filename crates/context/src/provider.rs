//! Provider traits for the collaborators this crate depends on.
//!
//! Process facts come from `appident-detect`; window state comes from
//! whatever window-tracking toolkit the caller uses.

use crate::state::ScreenSnapshot;
use appident_detect::{ProcessFacts, UNKNOWN_PROCESS};

pub use appident_detect::ProcessSource;

/// Provider for the current window state.
pub trait WindowSource: Send + Sync {
    /// Capture the applications, their windows and the focused window.
    fn screen(&self) -> ScreenSnapshot;
}

/// A captured snapshot is its own source.
impl WindowSource for ScreenSnapshot {
    fn screen(&self) -> ScreenSnapshot {
        self.clone()
    }
}

/// Null implementation for testing or when nothing can be probed.
pub struct NullProvider;

impl ProcessSource for NullProvider {
    fn process_name(&self, _pid: u32) -> String {
        UNKNOWN_PROCESS.to_string()
    }

    fn raw_cmdline(&self, _pid: u32) -> Option<Vec<u8>> {
        None
    }

    fn processes(&self) -> Vec<ProcessFacts> {
        Vec::new()
    }
}

impl WindowSource for NullProvider {
    fn screen(&self) -> ScreenSnapshot {
        ScreenSnapshot::default()
    }
}
