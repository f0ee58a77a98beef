// SPDX-License-Identifier: MIT

//!
//! *Part of the wider Quake Explorer project*
//!
//! This crate provides the timeline range filter: a track with a draggable,
//! resizable window whose position selects a range of dates, and a playback
//! control that sweeps the window along the track.  It can be compiled for
//! native use as well as to WASM for use in the browser.
//!
//! The core of the crate is a platform independent engine ([`Timeline`])
//! responsible for:
//!
//! - Mapping the window's pixel geometry onto the dataset's time extent
//! - Drag gestures on the window's body and its two resize handles
//! - Playback (including the single timer frontends run on its behalf)
//! - Calling the filter with the selected range whenever it changes
//! - Emitting interaction events for frontends
//!
//! The rest of the crate holds the frontends:
//!
//! - HTML DOM for browser rendering
//! - `egui` for native desktop rendering
//!
//! ## Usage
//!
//! To use in a native `egui` desktop application the crate can simply be
//! included like any other crate.
//!
//! To use in a browser one can use the following to compile to WASM:
//!
//! ```sh
//! wasm-pack build --target web
//! ```
//!

extern crate console_error_panic_hook;

pub mod colour;
pub mod engine;
pub mod frontends;

pub use colour::*;
pub use engine::*;
pub use frontends::desktop_egui::QuakeTimelineEgui;
pub use frontends::html_dom::QuakeTimelineHtml;
