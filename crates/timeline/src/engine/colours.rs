// SPDX-License-Identifier: MIT

//!
//! Colours
//!

use crate::colour::Colour;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub colour: Colour,
    pub thickness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    pub fill_colour: Colour,
    pub border: Option<LineStyle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineColours {
    /// The track the window slides along
    pub track: BoxStyle,

    /// The window's body
    pub window: BoxStyle,

    /// The resize handles at either end of the window
    pub handle: BoxStyle,

    /// The axis line and its ticks
    pub axis: LineStyle,

    pub text_colour: Colour,
}

impl Default for TimelineColours {
    fn default() -> Self {
        Self {
            track: BoxStyle {
                fill_colour: Colour::from_rgb(0xe6, 0xe5, 0xea),
                border: None,
            },
            window: BoxStyle {
                fill_colour: Colour::from_rgb(0xa8, 0xc8, 0xe8),
                border: Some(LineStyle {
                    colour: Colour::from_rgb(0x00, 0x00, 0xaa),
                    thickness: 1.0,
                }),
            },
            handle: BoxStyle {
                fill_colour: Colour::from_rgb(0x00, 0x00, 0xaa),
                border: None,
            },
            axis: LineStyle {
                colour: Colour::BLACK,
                thickness: 1.0,
            },
            text_colour: Colour::BLACK,
        }
    }
}
