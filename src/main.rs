mod common;
mod config;
mod constants;
mod editor;
mod paths;
pub mod theme;
mod ui;
mod zones;

use bevy::asset::UnapprovedPathMode;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};

#[cfg_attr(not(debug_assertions), allow(dead_code))]
const LOG_FILE: &str = "zoneforge.log";

/// Header written between runs in the shared log file
#[cfg_attr(not(debug_assertions), allow(dead_code))]
fn session_banner(started: impl std::fmt::Display) -> String {
    let rule = "=".repeat(80);
    format!("\n\n{rule}\n=== Zoneforge session started at {started} ===\n{rule}\n")
}

/// Log to `logs/zoneforge.log` and stdout in debug builds. The returned
/// guard flushes the file writer when dropped.
#[cfg(debug_assertions)]
fn setup_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use std::io::Write;
    use tracing_subscriber::prelude::*;

    let logs_dir = paths::logs_dir();
    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!("Failed to create logs directory {}: {}", logs_dir.display(), e);
        return None;
    }

    let banner = session_banner(chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    if let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(logs_dir.join(LOG_FILE))
    {
        let _ = write!(file, "{banner}");
    }

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&logs_dir, LOG_FILE));

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,zoneforge=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(true),
        )
        .init();

    Some(guard)
}

#[cfg(not(debug_assertions))]
fn setup_logging() -> Option<()> {
    None
}

fn main() {
    let log_guard = setup_logging();

    if let Err(e) = paths::ensure_directories() {
        eprintln!("Failed to create data directories: {}", e);
    }

    let mut plugins = DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(Window {
                title: "Zoneforge".into(),
                resolution: (DEFAULT_WINDOW_WIDTH as u32, DEFAULT_WINDOW_HEIGHT as u32).into(),
                ..default()
            }),
            // Closing is confirmed first when zones are unsaved
            close_when_requested: false,
            ..default()
        })
        .set(AssetPlugin {
            // Snapshot frames may live anywhere on disk
            unapproved_path_mode: UnapprovedPathMode::Allow,
            ..default()
        });
    // Our subscriber is already global
    if log_guard.is_some() {
        plugins = plugins.disable::<LogPlugin>();
    }

    App::new()
        .add_plugins(plugins)
        .add_plugins(EguiPlugin::default())
        .add_plugins(config::ConfigPlugin)
        .add_plugins(zones::ZonesPlugin)
        .add_plugins(editor::EditorPlugin)
        .add_plugins(ui::UiPlugin)
        .run();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_banner_names_start_time() {
        let banner = session_banner("2026-10-19 08:30:00");
        assert!(banner.contains("Zoneforge session started at 2026-10-19 08:30:00"));
        assert_eq!(banner.matches(&"=".repeat(80)).count(), 2);
    }
}
