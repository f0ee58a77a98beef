// SPDX-License-Identifier: MIT

//!
//! Automatic playback
//!

use crate::{DEFAULT_PLAYBACK_DURATION_MS, MIN_TICK_INTERVAL_MS, TrackLayout, WindowGeometry};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;

/// The playback speed multiplier, cycled `1x -> 2x -> 3x -> 1x`
#[rustfmt::skip]
#[derive(derive_more::Display, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackSpeed {
    #[default]
    #[display("1x")]
    X1,
    #[display("2x")]
    X2,
    #[display("3x")]
    X3,
}

impl PlaybackSpeed {
    /// Pixels the window advances per tick
    pub fn multiplier(&self) -> f64 {
        match self {
            PlaybackSpeed::X1 => 1.0,
            PlaybackSpeed::X2 => 2.0,
            PlaybackSpeed::X3 => 3.0,
        }
    }

    /// The next speed in the cycle
    pub fn next(&self) -> Self {
        match self {
            PlaybackSpeed::X1 => PlaybackSpeed::X2,
            PlaybackSpeed::X2 => PlaybackSpeed::X3,
            PlaybackSpeed::X3 => PlaybackSpeed::X1,
        }
    }
}

/// The engine's record of the one repeating timer a frontend should be
/// running.  Frontends own the real timer; every tick they pass back the `id`
/// of the timer that fired, so ticks from a timer that has since been stopped
/// are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PlaybackTimer {
    id: u64,
    interval_ms: u64,
}

impl PlaybackTimer {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Running,
}

/// What a tick did to the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Stale or unexpected tick, nothing changed
    Ignored,

    /// The window moved
    Advanced(WindowGeometry),

    /// The window reached the end of the track and playback stopped
    Finished(WindowGeometry),
}

/// Moves the window along the track, left to right.
///
/// Each tick advances the window by [`PlaybackSpeed::multiplier()`] pixels.
/// Ticks are `total_duration / track_width` apart, so at 1x a window starting
/// at the beginning of the track takes `total_duration` to sweep the whole
/// track, at 2x half of that, and so on.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    /// The running timer.  Only ever set in [`PlaybackController::start()`] and
    /// only ever cleared in [`PlaybackController::stop()`], so there can never
    /// be more than one.
    timer: Option<PlaybackTimer>,

    /// The ID the next timer will be given
    next_timer_id: u64,

    speed: PlaybackSpeed,

    /// How long a full 1x sweep of the track takes
    total_duration: Duration,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_PLAYBACK_DURATION_MS))
    }
}

impl PlaybackController {
    pub fn new(total_duration: Duration) -> Self {
        Self {
            timer: None,
            next_timer_id: 1,
            speed: PlaybackSpeed::default(),
            total_duration,
        }
    }

    pub fn state(&self) -> PlaybackState {
        if self.timer.is_some() {
            PlaybackState::Running
        } else {
            PlaybackState::Stopped
        }
    }

    pub fn is_playing(&self) -> bool {
        self.timer.is_some()
    }

    /// The timer the frontend should be running (if any)
    pub fn timer(&self) -> Option<PlaybackTimer> {
        self.timer
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    /// Move on to the next speed and return it
    pub fn cycle_speed(&mut self) -> PlaybackSpeed {
        self.speed = self.speed.next();
        self.speed
    }

    /// Time between ticks for the layout
    pub fn tick_interval(&self, layout: &TrackLayout) -> Duration {
        let interval_ms = (self.total_duration.as_millis() as f64 / layout.track_width()).round();
        Duration::from_millis((interval_ms as u64).max(MIN_TICK_INTERVAL_MS))
    }

    /// Start playing.  Returns the geometry to play from, or `None` if already
    /// playing (in which case nothing changes).  A window that has already
    /// reached the end of the track is sent back to the start.
    pub fn start(&mut self, geometry: &WindowGeometry, layout: &TrackLayout) -> Option<WindowGeometry> {
        if self.timer.is_some() {
            return None;
        }

        let from = if geometry.is_at_end_of(layout) {
            WindowGeometry::clamped(layout.min_x(), geometry.width(), layout)
        } else {
            *geometry
        };

        self.timer = Some(PlaybackTimer {
            id: self.next_timer_id,
            interval_ms: self.tick_interval(layout).as_millis() as u64,
        });
        self.next_timer_id += 1;
        Some(from)
    }

    /// Stop playing.  Returns whether playback was running.
    pub fn stop(&mut self) -> bool {
        self.timer.take().is_some()
    }

    /// Advance the window for a tick from the timer with the given ID
    pub fn tick(&mut self, timer_id: u64, geometry: &WindowGeometry, layout: &TrackLayout) -> TickOutcome {
        match self.timer {
            Some(timer) if timer.id == timer_id => (),
            _ => return TickOutcome::Ignored,
        }

        let left = geometry.left() + self.speed.multiplier();
        let advanced = WindowGeometry::clamped(left, geometry.width(), layout);
        if advanced.is_at_end_of(layout) {
            self.stop();
            TickOutcome::Finished(advanced)
        } else {
            TickOutcome::Advanced(advanced)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn layout() -> TrackLayout {
        TrackLayout::from(700.0, 50.0, 10.0).unwrap()
    }

    #[test]
    fn speed_cycles() {
        let mut playback = PlaybackController::default();
        assert_eq!(playback.speed(), PlaybackSpeed::X1);
        assert_eq!(playback.cycle_speed(), PlaybackSpeed::X2);
        assert_eq!(playback.cycle_speed(), PlaybackSpeed::X3);
        assert_eq!(playback.cycle_speed(), PlaybackSpeed::X1);
        assert_eq!(PlaybackSpeed::X3.to_string(), "3x");
    }

    #[test]
    fn single_timer() {
        let layout = layout();
        let geometry = WindowGeometry::from(50.0, 200.0, &layout).unwrap();
        let mut playback = PlaybackController::default();
        assert_eq!(playback.state(), PlaybackState::Stopped);

        assert!(playback.start(&geometry, &layout).is_some());
        let timer = playback.timer().unwrap();
        assert_eq!(playback.state(), PlaybackState::Running);

        // Starting again is a no-op (same timer)
        assert!(playback.start(&geometry, &layout).is_none());
        assert_eq!(playback.timer(), Some(timer));

        assert!(playback.stop());
        assert!(!playback.stop());
        assert_eq!(playback.timer(), None);

        // A new start gets a new timer, and the old timer's ticks are ignored
        playback.start(&geometry, &layout);
        assert_ne!(playback.timer().unwrap().id(), timer.id());
        assert_eq!(playback.tick(timer.id(), &geometry, &layout), TickOutcome::Ignored);
    }

    #[test]
    fn tick_interval() {
        let layout = layout();
        let playback = PlaybackController::new(Duration::from_millis(7000));
        assert_eq!(playback.tick_interval(&layout), Duration::from_millis(10));

        let playback = PlaybackController::new(Duration::from_millis(70));
        assert_eq!(
            playback.tick_interval(&layout),
            Duration::from_millis(MIN_TICK_INTERVAL_MS)
        );
    }

    #[test]
    fn tick_when_stopped_is_ignored() {
        let layout = layout();
        let geometry = WindowGeometry::from(50.0, 200.0, &layout).unwrap();
        let mut playback = PlaybackController::default();
        assert_eq!(playback.tick(1, &geometry, &layout), TickOutcome::Ignored);
    }

    #[test]
    fn plays_to_the_end_and_stops() {
        let layout = layout();
        for speed in [PlaybackSpeed::X1, PlaybackSpeed::X2, PlaybackSpeed::X3] {
            let mut playback = PlaybackController::default();
            while playback.speed() != speed {
                playback.cycle_speed();
            }
            let mut geometry = WindowGeometry::from(50.0, 180.0, &layout).unwrap();
            geometry = playback.start(&geometry, &layout).unwrap();
            let timer_id = playback.timer().unwrap().id();

            // 520px to travel
            let max_ticks = (520.0 / speed.multiplier()).ceil() as usize;
            let mut ticks = 0;
            loop {
                ticks += 1;
                assert!(ticks <= max_ticks, "{speed} took too long");
                match playback.tick(timer_id, &geometry, &layout) {
                    TickOutcome::Advanced(next) => {
                        assert_eq!(next.left(), geometry.left() + speed.multiplier());
                        geometry = next;
                    }
                    TickOutcome::Finished(last) => {
                        geometry = last;
                        break;
                    }
                    TickOutcome::Ignored => panic!("tick ignored"),
                }
            }
            assert_eq!(geometry.right(), layout.max_x());
            assert_eq!(geometry.width(), 180.0);
            assert!(!playback.is_playing());
        }
    }

    #[test]
    fn restart_from_the_end() {
        let layout = layout();
        let at_end = WindowGeometry::from(550.0, 200.0, &layout).unwrap();
        let mut playback = PlaybackController::default();
        let from = playback.start(&at_end, &layout).unwrap();
        assert_eq!((from.left(), from.width()), (50.0, 200.0));

        playback.stop();
        let midway = WindowGeometry::from(300.0, 200.0, &layout).unwrap();
        assert_eq!(playback.start(&midway, &layout), Some(midway));
    }
}
