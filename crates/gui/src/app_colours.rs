// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Themes and colours for the Quake Explorer desktop app
//!

use eframe::egui::{Color32, Context, Theme, Visuals};
use quake_explorer_timeline::{BoxStyle, Colour, LineStyle, TimelineColours};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColourTheme {
    #[default]
    System,
    Light,
    Dark,
}

impl ColourTheme {
    pub const ALL: [ColourTheme; 3] = [ColourTheme::System, ColourTheme::Light, ColourTheme::Dark];

    pub fn label(&self) -> &'static str {
        match self {
            ColourTheme::System => "System",
            ColourTheme::Light => "Light",
            ColourTheme::Dark => "Dark",
        }
    }

    /// Apply the theme to the egui context
    pub fn use_theme(&self, ctx: &Context) {
        match self {
            ColourTheme::System => match ctx.system_theme() {
                Some(Theme::Dark) => ctx.style_mut(|style| style.visuals = Visuals::dark()),
                Some(Theme::Light) | None => ctx.style_mut(|style| style.visuals = Visuals::light()),
            },
            ColourTheme::Light => ctx.style_mut(|style| style.visuals = Visuals::light()),
            ColourTheme::Dark => ctx.style_mut(|style| style.visuals = Visuals::dark()),
        }
    }

    fn is_dark(&self, ctx: &Context) -> bool {
        match self {
            ColourTheme::Light => false,
            ColourTheme::Dark => true,
            ColourTheme::System => ctx.style().visuals.dark_mode,
        }
    }

    pub fn timeline_colours(&self, ctx: &Context) -> TimelineColours {
        if !self.is_dark(ctx) {
            return TimelineColours::default();
        }
        TimelineColours {
            track: BoxStyle {
                fill_colour: Colour::from_rgb(50, 50, 50),
                border: None,
            },
            window: BoxStyle {
                fill_colour: Colour::from_rgb(44, 78, 89),
                border: Some(LineStyle {
                    colour: Colour::from_rgb(134, 189, 213),
                    thickness: 1.0,
                }),
            },
            handle: BoxStyle {
                fill_colour: Colour::from_rgb(134, 189, 213),
                border: None,
            },
            axis: LineStyle {
                colour: Colour::from_rgb(200, 200, 200),
                thickness: 1.0,
            },
            text_colour: Colour::from_rgb(200, 200, 200),
        }
    }

    /// Colours for the map view and the magnitude chart
    pub fn view_colours(&self, ctx: &Context) -> ViewColours {
        if self.is_dark(ctx) {
            ViewColours {
                background: Color32::from_rgb(30, 30, 30),
                grid: Color32::from_rgb(70, 70, 70),
                line: Color32::from_rgb(134, 189, 213),
                marker_stroke: Color32::from_rgb(200, 200, 200),
                highlight: Color32::RED,
            }
        } else {
            ViewColours::default()
        }
    }
}

/// Colours shared by the map view and magnitude chart
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewColours {
    pub background: Color32,
    pub grid: Color32,
    pub line: Color32,
    pub marker_stroke: Color32,
    pub highlight: Color32,
}

impl Default for ViewColours {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(0xfe, 0xfc, 0xf6),
            grid: Color32::from_rgb(210, 210, 210),
            line: Color32::from_rgb(0x00, 0x00, 0xaa),
            marker_stroke: Color32::BLACK,
            highlight: Color32::RED,
        }
    }
}
