// SPDX-License-Identifier: MIT

//!
//! Events
//!

use crate::{PlaybackSpeed, SelectedDateRange};
use serde::Serialize;
use std::fmt::Debug;

/// Interaction events, queued for frontends to drain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TimelineInteractionEvent {
    /// The selected range was recomputed (the filter has already been called)
    RangeChanged(SelectedDateRange),

    /// The play/pause control should now read "pause"
    PlaybackStarted,

    /// The play/pause control should now read "play"
    PlaybackStopped,

    SpeedChanged(PlaybackSpeed),
}
