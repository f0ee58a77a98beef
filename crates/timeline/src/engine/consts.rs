// SPDX-License-Identifier: MIT

//!
//! Engine constants
//!

/// Default width (px) of the track the window moves along
pub const DEFAULT_TRACK_WIDTH: f64 = 700.0;

/// Default margin (px) either side of the track
pub const DEFAULT_PADDING: f64 = 50.0;

/// Default width (px) of each resize handle.  Also the window's minimum width.
pub const DEFAULT_HANDLE_WIDTH: f64 = 10.0;

/// Default width (px) of the window when a timeline is created
pub const DEFAULT_WINDOW_WIDTH: f64 = 200.0;

/// Default time (ms) a 1x playback takes to cross the whole track
pub const DEFAULT_PLAYBACK_DURATION_MS: u64 = 20_000;

/// Playback ticks are never scheduled more often than this (ms)
pub const MIN_TICK_INTERVAL_MS: u64 = 4;

/// The minimum horizontal space (px) between auto-generated axis ticks
pub const MIN_AXIS_TICK_SPACING: f64 = 80.0;

/// The `chrono` format used for axis tick labels (month/year)
pub const AXIS_TICK_FORMAT: &str = "%m/%Y";
