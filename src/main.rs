/*
 *  main.rs
 *
 *  klokka - configurable terminal clock
 *
 *  Application shell: owns the settings store, the terminal surface,
 *  and the cooperative event loop that drives the 1 Hz tick, key
 *  handling, and settings-change propagation.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use anyhow::Result;
use chrono::Local;
use clap::{ArgAction, Parser, ValueHint};
use crossterm::event::{self, Event, KeyEventKind};
use env_logger::Env;
use log::{error, info};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use klokka::input::{self, KeyAction};
use klokka::panel::{Panel, PanelOutcome};
use klokka::refresh::RefreshLoop;
use klokka::settings::{LaunchMode, SettingChange, SettingsStore};
use klokka::surface::TermSurface;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Cadence of the cooperative loop; the tick itself fires at 1 Hz when
/// the wall-clock second advances.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Parser)]
#[command(name = "klokka", about = "Configurable terminal clock", version)]
struct Cli {
    /// Path to a YAML settings file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Directory holding the downloaded .ttf fonts
    #[arg(long, default_value = "fonts")]
    fonts_dir: PathBuf,

    /// Launch fullscreen regardless of the stored launch mode
    #[arg(long, action = ArgAction::SetTrue)]
    fullscreen: bool,

    /// Enable debug log level
    #[arg(long, short = 'v', alias = "verbose", action = ArgAction::SetTrue)]
    debug: bool,
}

/// Waits for SIGINT, SIGTERM, or SIGHUP so shutdown restores the
/// terminal cleanly.
#[cfg(unix)]
async fn signal_handler() -> Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

#[cfg(not(unix))]
async fn signal_handler() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    info!("Ctrl+C received. Initiating graceful shutdown.");
    Ok(())
}

async fn run_loop(
    store: &mut SettingsStore,
    mut changes: mpsc::UnboundedReceiver<SettingChange>,
    refresh: &RefreshLoop,
    surface: &mut TermSurface,
) -> Result<()> {
    let mut panel: Option<Panel> = None;
    let mut last_tick = Local::now().timestamp();

    loop {
        let mut dirty = false;

        // Drain pending key events.
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let Some(name) = input::key_name(key.code) else {
                        continue;
                    };

                    if let Some(open_panel) = panel.as_mut() {
                        match open_panel.handle_key(&name) {
                            PanelOutcome::Close => panel = None,
                            PanelOutcome::Commit(change) => {
                                if let Err(e) =
                                    store.apply_change(&change.section, &change.key, &change.value)
                                {
                                    error!(
                                        "failed to commit {}.{}: {}",
                                        change.section, change.key, e
                                    );
                                }
                            }
                            PanelOutcome::Handled | PanelOutcome::Ignored => {}
                        }
                    } else {
                        match input::handle_key(&name) {
                            KeyAction::Quit => return Ok(()),
                            KeyAction::OpenSettings => {
                                panel = Some(Panel::from_settings(store.settings()));
                            }
                            KeyAction::Unhandled => {}
                        }
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }

        // Drain committed settings edits; each one rederives its slice
        // of presentation state from current settings.
        while let Ok(change) = changes.try_recv() {
            refresh.on_setting_changed(&change, store.settings(), surface);
            dirty = true;
        }

        // 1 Hz tick on wall-clock second boundaries.
        let now = Local::now();
        if now.timestamp() != last_tick {
            last_tick = now.timestamp();
            refresh.tick(now, surface);
            dirty = true;
        }

        if dirty {
            let overlay = panel.as_ref().map(|p| p.lines());
            surface.render(overlay.as_deref())?;
        }

        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        Env::default().default_filter_or(if cli.debug { "debug" } else { "info" }),
    )
    .format_timestamp_secs()
    .init();

    info!("klokka v{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let mut store = SettingsStore::load(cli.config)?;
    info!("settings loaded from {}", store.path().display());

    // Launch mode is read exactly once, before the surface exists;
    // later edits only advise a restart.
    let launch_mode = if cli.fullscreen {
        LaunchMode::Fullscreen
    } else {
        store.settings().display.launch_mode
    };

    let changes = store.subscribe();
    let refresh = RefreshLoop::new(cli.fonts_dir);

    let mut surface = TermSurface::new(launch_mode)?;
    refresh.apply_all(store.settings(), &mut surface);
    // Immediate first update; don't make the user wait a second.
    refresh.tick(Local::now(), &mut surface);
    surface.render(None)?;

    let result = tokio::select! {
        r = signal_handler() => r,
        r = run_loop(&mut store, changes, &refresh, &mut surface) => r,
    };

    // Leave the alternate screen before the final log line.
    drop(surface);
    info!("klokka exiting");
    result
}
