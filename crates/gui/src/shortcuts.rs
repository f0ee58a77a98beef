// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Keyboard shortcuts
//!

use crate::app::ActionRequest;
use eframe::egui::{Context, Key, KeyboardShortcut, Modifiers};
use tokio::sync::mpsc::UnboundedSender;

/// Helpers for handling Quake Explorer keyboard shortcuts
pub struct QuakeExplorerShortcut {}

impl QuakeExplorerShortcut {
    /// Shortcut for starting/stopping playback (Space)
    pub fn toggle_playback(ctx: &Context) -> bool {
        let shortcut = KeyboardShortcut::new(Modifiers::NONE, Key::Space);
        let shortcut_used = ctx.input_mut(|i| i.consume_shortcut(&shortcut));
        if shortcut_used {
            debug!("Toggle playback shortcut");
        }
        shortcut_used
    }

    /// Shortcut for cycling the playback speed (S)
    pub fn cycle_speed(ctx: &Context) -> bool {
        let shortcut = KeyboardShortcut::new(Modifiers::NONE, Key::S);
        let shortcut_used = ctx.input_mut(|i| i.consume_shortcut(&shortcut));
        if shortcut_used {
            debug!("Cycle speed shortcut");
        }
        shortcut_used
    }

    /// Shortcut for reloading the CSV file (Cmd + R)
    pub fn reload_data(ctx: &Context) -> bool {
        let shortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::R);
        let shortcut_used = ctx.input_mut(|i| i.consume_shortcut(&shortcut));
        if shortcut_used {
            debug!("Reload data shortcut");
        }
        shortcut_used
    }
}

/// Check for use of a global shortcut.  Ignored while a text field has focus
/// so that typing a path doesn't start playback.
pub fn global_shortcuts(ctx: &Context, tx_action_request: &UnboundedSender<ActionRequest>) {
    if ctx.wants_keyboard_input() {
        return;
    }

    if QuakeExplorerShortcut::toggle_playback(ctx) {
        let _ = tx_action_request.send(ActionRequest::TogglePlayback);
    }

    if QuakeExplorerShortcut::cycle_speed(ctx) {
        let _ = tx_action_request.send(ActionRequest::CycleSpeed);
    }

    if QuakeExplorerShortcut::reload_data(ctx) {
        let _ = tx_action_request.send(ActionRequest::ReloadData);
    }
}
