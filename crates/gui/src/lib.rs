// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider Quake Explorer project*
//!
//! This library crate provides the GUI parts of the desktop dashboard: the
//! map of quakes, the magnitude chart, and the timeline that filters both.
//!

mod app;
mod app_colours;
mod config;
mod consts;
mod magnitude_chart;
mod map_view;
mod shortcuts;

pub use app::QuakeExplorerApp;
pub use config::Config;
pub use consts::DEFAULT_WINDOW_SIZES;

#[macro_use]
extern crate log;
