// SPDX-License-Identifier: MIT

//!
//! Timeline settings
//!

use crate::{DEFAULT_PLAYBACK_DURATION_MS, DEFAULT_WINDOW_WIDTH, TrackLayout};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;

/// The tunables a [`crate::Timeline`] is created with.  Missing fields take
/// their default when deserialised, so a partial config file is fine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    pub layout: TrackLayout,

    /// How long (ms) a 1x playback takes to cross the whole track
    pub playback_duration_ms: u64,

    /// The window's width (px) when the timeline is created.  Clamped to the
    /// layout.
    pub initial_window_width: f64,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            layout: TrackLayout::default(),
            playback_duration_ms: DEFAULT_PLAYBACK_DURATION_MS,
            initial_window_width: DEFAULT_WINDOW_WIDTH,
        }
    }
}

impl TimelineSettings {
    pub fn playback_duration(&self) -> Duration {
        Duration::from_millis(self.playback_duration_ms)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn partial_json() {
        let settings: TimelineSettings =
            serde_json::from_str(r#"{"playback_duration_ms": 5000}"#).unwrap();
        assert_eq!(settings.playback_duration(), Duration::from_secs(5));
        assert_eq!(settings.layout, TrackLayout::default());
        assert_eq!(settings.initial_window_width, DEFAULT_WINDOW_WIDTH);
    }

    #[test]
    fn invalid_layout() {
        let json = r#"{"layout": {"track_width": 700.0, "padding": 50.0, "handle_width": 0.0}}"#;
        assert!(serde_json::from_str::<TimelineSettings>(json).is_err());
    }
}
