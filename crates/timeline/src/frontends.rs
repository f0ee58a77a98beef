// SPDX-License-Identifier: MIT

//!
//! Frontends that draw a [`crate::Timeline`] and feed it input
//!

pub mod desktop_egui;
pub mod html_dom;
