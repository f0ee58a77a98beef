// SPDX-License-Identifier: MIT

//!
//! The `quake-explorer-timeline` engine
//!

mod axis;
mod colours;
mod consts;
mod date_range;
mod drag;
mod events;
mod filter;
mod geometry;
mod layout_params;
mod playback;
mod settings;

pub use axis::*;
pub use colours::*;
pub use consts::*;
pub use date_range::*;
pub use drag::*;
pub use events::*;
pub use filter::*;
pub use geometry::*;
pub use layout_params::*;
pub use playback::*;
pub use settings::*;

use chrono::{DateTime, Utc};
use log::{debug, trace};
use quake_explorer_core::TimeExtent;

/// The core `quake-explorer-timeline` engine.  This owns the window's
/// geometry, the drag and playback state machines, and the filter, and is
/// common to all frontends (e.g. the desktop and browser frontends).
///
/// Every change to the window's geometry recomputes the selected range and
/// passes it to the filter (if there's an extent to select from).
pub struct Timeline {
    /// The fixed dimensions of the track
    layout: TrackLayout,

    /// Where the window currently sits on the track
    geometry: WindowGeometry,

    /// The full time extent of the dataset (`None` for an empty dataset)
    extent: Option<TimeExtent>,

    /// The range most recently passed to the filter
    range: Option<SelectedDateRange>,

    drag: DragController,

    playback: PlaybackController,

    /// Called with the selected range every time it changes
    filter: Box<dyn RangeFilter>,

    /// All interaction events that an external programme might be interested in
    interaction_events: Vec<TimelineInteractionEvent>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(TimelineSettings::default())
    }
}

impl Timeline {
    /// Create a new timeline.  It has no extent (so selects nothing) until
    /// [`Timeline::set_extent()`] is called.
    pub fn new(settings: TimelineSettings) -> Self {
        let layout = settings.layout;
        Self {
            layout,
            geometry: WindowGeometry::clamped(
                layout.min_x(),
                settings.initial_window_width,
                &layout,
            ),
            extent: None,
            range: None,
            drag: DragController::default(),
            playback: PlaybackController::new(settings.playback_duration()),
            filter: Box::new(LogRangeFilter),
            interaction_events: Vec::new(),
        }
    }

    /// Replace the filter
    pub fn set_filter<F>(&mut self, filter: F)
    where
        F: 'static + RangeFilter,
    {
        self.filter = Box::new(filter);
    }

    pub fn extent(&self) -> Option<TimeExtent> {
        self.extent
    }

    /// Set the extent the window selects from (e.g. when a dataset is loaded)
    /// and publish the resulting range
    pub fn set_extent(&mut self, extent: Option<TimeExtent>) {
        debug!("timeline set extent: {extent:?}");
        self.extent = extent;
        self.publish_range();
    }

    pub fn layout(&self) -> TrackLayout {
        self.layout
    }

    /// Change the track's dimensions.  The window keeps the same fractions of
    /// the track, so the selected range barely moves.  Any drag in progress is
    /// abandoned, and a running playback carries on with a timer suited to the
    /// new track.
    pub fn set_layout(&mut self, layout: TrackLayout) {
        if layout == self.layout {
            return;
        }
        debug!("timeline set layout: {layout:?}");
        self.drag.end();
        self.geometry = self.geometry.rescaled(&self.layout, &layout);
        self.layout = layout;
        if self.playback.stop() {
            if let Some(from) = self.playback.start(&self.geometry, &self.layout) {
                self.geometry = from;
            }
        }
        self.publish_range();
    }

    pub fn geometry(&self) -> WindowGeometry {
        self.geometry
    }

    pub fn selected_range(&self) -> Option<SelectedDateRange> {
        self.range
    }

    pub fn min_date(&self) -> Option<DateTime<Utc>> {
        self.range.map(|range| range.min_date())
    }

    pub fn max_date(&self) -> Option<DateTime<Utc>> {
        self.range.map(|range| range.max_date())
    }

    /// Ticks for the time axis (none without an extent)
    pub fn axis_ticks(&self) -> Vec<AxisTick> {
        match &self.extent {
            Some(extent) => axis_ticks(extent, &self.layout),
            None => Vec::new(),
        }
    }

    /// What a pointer pressed at `x` would drag.  The handles sit inside the
    /// window at either end; where they overlap (a minimum width window) the
    /// left handle wins.
    pub fn hit_test(&self, x: f64) -> Option<DragKind> {
        let handle_width = self.layout.handle_width();
        let left = self.geometry.left();
        let right = self.geometry.right();
        if !x.is_finite() || x < left || x > right {
            None
        } else if x <= left + handle_width {
            Some(DragKind::Left)
        } else if x >= right - handle_width {
            Some(DragKind::Right)
        } else {
            Some(DragKind::Move)
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Begin a drag gesture at `pointer_x`.  Playback is stopped first.
    /// Returns `false` if a gesture is already in progress.
    pub fn start_drag(&mut self, kind: DragKind, pointer_x: f64) -> bool {
        if self.drag.is_dragging() {
            trace!("drag already in progress, ignoring {kind:?}");
            return false;
        }
        self.stop_playback();
        let started = self.drag.start(kind, pointer_x, &self.geometry);
        if started {
            debug!("start drag {kind:?} at {pointer_x}");
        }
        started
    }

    /// Move the current gesture's pointer to `pointer_x`.  Updates that would
    /// not leave a valid window are dropped.
    pub fn update_drag(&mut self, pointer_x: f64) {
        if let Some(geometry) = self.drag.update(pointer_x, &self.layout) {
            trace!("drag to {geometry:?}");
            self.geometry = geometry;
            self.publish_range();
        }
    }

    /// End the current gesture (no-op if there isn't one)
    pub fn end_drag(&mut self) {
        if self.drag.end() {
            debug!("end drag at {:?}", self.geometry);
            self.publish_range();
        }
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    /// The timer the frontend should be running, if playing
    pub fn playback_timer(&self) -> Option<PlaybackTimer> {
        self.playback.timer()
    }

    /// Play if paused, pause if playing
    pub fn toggle_play(&mut self) {
        if self.playback.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Start playback (no-op if already playing, or while a drag gesture owns
    /// the window).  A window at the end of the track jumps back to the start
    /// first.
    pub fn play(&mut self) {
        if self.drag.is_dragging() {
            trace!("dragging, not starting playback");
            return;
        }
        let Some(from) = self.playback.start(&self.geometry, &self.layout) else {
            return;
        };
        debug!("play from {from:?} at {}", self.playback.speed());
        self.interaction_events
            .push(TimelineInteractionEvent::PlaybackStarted);
        if from != self.geometry {
            self.geometry = from;
            self.publish_range();
        }
    }

    /// Stop playback (no-op if not playing)
    pub fn pause(&mut self) {
        self.stop_playback();
    }

    fn stop_playback(&mut self) {
        if self.playback.stop() {
            debug!("playback stopped at {:?}", self.geometry);
            self.interaction_events
                .push(TimelineInteractionEvent::PlaybackStopped);
        }
    }

    /// Advance playback for a tick of the timer with the given ID.  Returns
    /// whether the window moved.
    pub fn tick(&mut self, timer_id: u64) -> bool {
        match self.playback.tick(timer_id, &self.geometry, &self.layout) {
            TickOutcome::Ignored => {
                trace!("ignoring tick from timer {timer_id}");
                false
            }
            TickOutcome::Advanced(geometry) => {
                self.geometry = geometry;
                self.publish_range();
                true
            }
            TickOutcome::Finished(geometry) => {
                self.geometry = geometry;
                self.publish_range();
                debug!("playback reached the end of the track");
                self.interaction_events
                    .push(TimelineInteractionEvent::PlaybackStopped);
                true
            }
        }
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.playback.speed()
    }

    /// Move on to the next playback speed
    pub fn cycle_speed(&mut self) -> PlaybackSpeed {
        let speed = self.playback.cycle_speed();
        debug!("speed set to {speed}");
        self.interaction_events
            .push(TimelineInteractionEvent::SpeedChanged(speed));
        speed
    }

    pub fn drain_interaction_events(&mut self) -> std::vec::Drain<'_, TimelineInteractionEvent> {
        self.interaction_events.drain(..)
    }

    /// Recompute the selected range and pass it to the filter
    fn publish_range(&mut self) {
        let Some(extent) = &self.extent else {
            self.range = None;
            return;
        };
        let range = compute_range(&self.geometry, extent, &self.layout);
        self.range = Some(range);
        self.filter.filter(&range);
        self.interaction_events
            .push(TimelineInteractionEvent::RangeChanged(range));
    }
}
