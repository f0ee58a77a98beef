// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Some configuration consts
//!

pub struct WindowSizes {
    pub main_window: WindowSize,
}

pub struct WindowSize {
    pub width: f32,
    pub height: f32,
}

pub const DEFAULT_WINDOW_SIZES: WindowSizes = WindowSizes {
    main_window: WindowSize {
        width: 1200.0,
        height: 900.0,
    },
};

pub const SIDE_PANEL_WIDTH: f32 = 220.0;

/// Degrees between the map's graticule lines
pub const GRATICULE_STEP_DEGREES: f64 = 30.0;

pub const MARKER_RADIUS: f32 = 3.0;
pub const HOVERED_MARKER_RADIUS: f32 = 4.0;

pub const CHART_HEIGHT: f32 = 200.0;

/// Space around the chart's plot area for the axes and their labels
pub const CHART_MARGIN: f32 = 30.0;

/// How often to repaint while idle (e.g. to pick up a finished CSV load)
pub const IDLE_REPAINT_MILLIS: u64 = 300;
