// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! The Quake Explorer desktop app
//!

use clap::Parser;
use eframe::egui::ViewportBuilder;
use quake_explorer_gui::{DEFAULT_WINDOW_SIZES, QuakeExplorerApp};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode,
};
use std::path::PathBuf;

#[macro_use]
extern crate log;
extern crate simplelog;

/// Explore earthquake data on a map, a magnitude chart, and a timeline
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// CSV file of quakes to load (overrides the path in the config)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,
}

/// Entry point for the native GUI desktop application
fn main() -> Result<(), eframe::Error> {
    let args = Args::parse();

    // Setup logging
    let config_log = ConfigBuilder::new()
        .add_filter_allow_str("quake_explorer")
        .build();

    if let Err(error) = CombinedLogger::init(vec![TermLogger::new(
        args.log_level,
        config_log,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]) {
        eprintln!("Unable to set up logging: {error}");
    }

    // Create a new tokio runtime so that `tokio::task::spawn_blocking` can be
    // used without making the GUI code `async`
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(error) => {
            error!("Unable to create the tokio runtime: {error}");
            return Err(eframe::Error::AppCreation(Box::new(error)));
        }
    };

    // Enter the runtime so that tasks can be spawned immediately
    let _enter = rt.enter();

    // Move the runtime into its own thread and don't let it finish/exit
    std::thread::spawn(move || {
        rt.block_on(async {
            loop {
                tokio::time::sleep(std::time::Duration::MAX).await;
            }
        })
    });

    let quake_explorer_app = QuakeExplorerApp::new(args.data);

    // Setup the main window's default options
    let main_viewport_options = ViewportBuilder::default()
        .with_title("Quake Explorer")
        .with_inner_size([
            DEFAULT_WINDOW_SIZES.main_window.width,
            DEFAULT_WINDOW_SIZES.main_window.height,
        ]);

    let options = eframe::NativeOptions {
        viewport: main_viewport_options,
        ..Default::default()
    };

    info!("Launching application");

    eframe::run_native(
        "Quake Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(quake_explorer_app))),
    )
}
