//! Example: resolve and order a window list against the live system.
//!
//! Run with: cargo run -p appident-context --example resolve_windows [screen.json] [settings.json]
//!
//! Without a screen file a small built-in snapshot is used.

use appident_context::{
    has_minimized_windows, others_have_hideable_windows, strip_application_suffix, AppSnapshot,
    ScreenSnapshot, Session, SessionSettings, SwitcherEntry, WindowSnapshot,
};
use std::path::Path;

fn sample_screen() -> ScreenSnapshot {
    ScreenSnapshot {
        applications: vec![
            AppSnapshot::new("org.mozilla.firefox", Some(0))
                .with_window(WindowSnapshot::new(1, "Release notes — Mozilla Firefox")),
            AppSnapshot::new("mousepad", None)
                .with_window(WindowSnapshot::new(2, "~/notes/todo10.txt - Mousepad"))
                .with_window(WindowSnapshot::new(3, "~/notes/todo2.txt - Mousepad")),
            AppSnapshot::new("xfce4-power-settings", None)
                .with_window(WindowSnapshot::new(4, "Power Manager")),
        ],
        active_window: None,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_env_filter("appident_context=debug,appident_detect=info")
        .init();

    let mut args = std::env::args().skip(1);

    let screen = match args.next() {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => sample_screen(),
    };

    let settings = match args.next() {
        Some(path) => SessionSettings::load(Path::new(&path))?,
        None => SessionSettings::default(),
    };

    let session = Session::from_settings(&settings, &screen);
    let config = session.sort_config();

    println!("=== Window Switcher ===");
    println!("Locale: {:?} | Style: {:?}\n", config.locale, config.style);

    for entry in session.arrange(&screen) {
        let marker = if entry.is_active() { "*" } else { " " };
        match entry {
            SwitcherEntry::Shell(info) => {
                println!(
                    "{marker} [{}] {} (pid {})",
                    info.process_name, info.display_name, info.pid
                );
            }
            SwitcherEntry::Application {
                display_name,
                role,
                windows,
                ..
            } => {
                println!("{marker} {display_name} ({role})");
                for window in windows {
                    let title = window.title_lossy().unwrap_or_default();
                    let document = strip_application_suffix(&title, display_name.as_str());
                    println!("      {document}");
                }
            }
        }
    }

    println!(
        "\nHide Others: {} | Show All: {}",
        if others_have_hideable_windows(&screen) { "enabled" } else { "disabled" },
        if has_minimized_windows(&screen) { "enabled" } else { "disabled" },
    );

    if let Some(manager) = session.default_file_manager() {
        println!("\nDefault file manager: {manager}");
    }

    Ok(())
}
