// SPDX-License-Identifier: MIT

//!
//! The egui frontend
//!

use crate::{
    BoxStyle, DragKind, PlaybackState, RangeFilter, Timeline, TimelineColours,
    TimelineInteractionEvent, TimelineSettings, TrackLayout,
};
use eframe::egui::{
    Align2, Color32, CursorIcon, FontId, Pos2, Rect, Response, Sense, Stroke, StrokeKind, Ui,
    Vec2,
};
use log::{debug, info};
use quake_explorer_core::TimeExtent;
use std::time::Duration;

/// Height (px) of the track
const TRACK_HEIGHT: f32 = 30.0;

/// Height (px) set aside below the track for the axis
const AXIS_HEIGHT: f32 = 24.0;

/// Length (px) of an axis tick mark
const TICK_LENGTH: f32 = 5.0;

/// If frames stall, don't try to catch up on more than this many ticks at once
const MAX_TICKS_PER_FRAME: u32 = 64;

/// The timeline drawn in an `egui` application
pub struct QuakeTimelineEgui {
    /// The underlying [`Timeline`] engine.
    timeline: Timeline,

    colours: TimelineColours,

    /// The engine timer the accumulated frame time is counting towards
    timer_id: Option<u64>,

    /// Frame time not yet spent on playback ticks
    accumulated: Duration,
}

impl QuakeTimelineEgui {
    pub fn new(settings: TimelineSettings) -> Self {
        info!("Constructing a new QuakeTimelineEgui");
        Self {
            timeline: Timeline::new(settings),
            colours: TimelineColours::default(),
            timer_id: None,
            accumulated: Duration::ZERO,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    pub fn set_filter<F>(&mut self, filter: F)
    where
        F: 'static + RangeFilter,
    {
        self.timeline.set_filter(filter);
    }

    pub fn set_extent(&mut self, extent: Option<TimeExtent>) {
        self.timeline.set_extent(extent);
    }

    pub fn colours(&self) -> TimelineColours {
        self.colours
    }

    pub fn set_colours(&mut self, colours: TimelineColours) {
        if colours != self.colours {
            debug!("egui timeline set colours");
            self.colours = colours;
        }
    }

    pub fn drain_interaction_events(&mut self) -> std::vec::Drain<'_, TimelineInteractionEvent> {
        self.timeline.drain_interaction_events()
    }

    /// Draw the controls and the timeline, handling any input and advancing
    /// playback by the time since the last frame
    pub fn draw(&mut self, ui: &mut Ui) {
        self.draw_controls(ui);
        self.fit_to_width(ui.available_width());

        let layout = self.timeline.layout();
        let size = Vec2::new(layout.total_width() as f32, TRACK_HEIGHT + AXIS_HEIGHT);
        let (response, painter) = ui.allocate_painter(size, Sense::drag());
        let origin = response.rect.min;

        self.handle_pointer(ui, &response, origin);
        self.advance_playback(ui);

        // Track
        let track = Rect::from_min_size(
            origin + Vec2::new(layout.min_x() as f32, 0.0),
            Vec2::new(layout.track_width() as f32, TRACK_HEIGHT),
        );
        draw_box(&painter, track, &self.colours.track);

        // Window and handles
        let geometry = self.timeline.geometry();
        let window = Rect::from_min_size(
            origin + Vec2::new(geometry.left() as f32, 0.0),
            Vec2::new(geometry.width() as f32, TRACK_HEIGHT),
        );
        let handle_size = Vec2::new(layout.handle_width() as f32, TRACK_HEIGHT);
        draw_box(&painter, window, &self.colours.window);
        draw_box(
            &painter,
            Rect::from_min_size(window.min, handle_size),
            &self.colours.handle,
        );
        draw_box(
            &painter,
            Rect::from_min_size(Pos2::new(window.max.x - handle_size.x, window.min.y), handle_size),
            &self.colours.handle,
        );

        // Axis
        let axis_stroke = Stroke::new(
            self.colours.axis.thickness as f32,
            Color32::from(self.colours.axis.colour),
        );
        let axis_y = track.max.y;
        painter.hline(track.x_range(), axis_y, axis_stroke);
        for tick in self.timeline.axis_ticks() {
            let x = origin.x + tick.x as f32;
            painter.vline(x, axis_y..=axis_y + TICK_LENGTH, axis_stroke);
            painter.text(
                Pos2::new(x, axis_y + TICK_LENGTH),
                Align2::CENTER_TOP,
                &tick.label,
                FontId::proportional(11.0),
                Color32::from(self.colours.text_colour),
            );
        }
    }

    fn draw_controls(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let play_text = match self.timeline.playback_state() {
                PlaybackState::Running => "⏸ Pause",
                PlaybackState::Stopped => "▶ Play",
            };
            if ui.button(play_text).clicked() {
                self.timeline.toggle_play();
            }
            if ui
                .button(self.timeline.speed().to_string())
                .on_hover_text("Playback speed")
                .clicked()
            {
                self.timeline.cycle_speed();
            }
            if let Some(range) = self.timeline.selected_range() {
                ui.label(range.to_string());
            }
        });
    }

    /// Stretch the track to fill the available width
    fn fit_to_width(&mut self, available_width: f32) {
        let layout = self.timeline.layout();
        let track_width = available_width as f64 - (2.0 * layout.padding());
        if (track_width - layout.track_width()).abs() < 0.5 {
            return;
        }
        if let Ok(layout) = TrackLayout::from(track_width, layout.padding(), layout.handle_width()) {
            self.timeline.set_layout(layout);
        }
    }

    /// Map egui's drag gestures onto the engine's
    fn handle_pointer(&mut self, ui: &Ui, response: &Response, origin: Pos2) {
        let x_of = |pos: Pos2| (pos.x - origin.x) as f64;

        if let Some(pos) = response.hover_pos() {
            let icon = match self.timeline.hit_test(x_of(pos)) {
                Some(DragKind::Left | DragKind::Right) => Some(CursorIcon::ResizeHorizontal),
                Some(DragKind::Move) => Some(CursorIcon::Grab),
                None => None,
            };
            if let Some(icon) = icon {
                ui.ctx().set_cursor_icon(icon);
            }
        }

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                let x = x_of(pos);
                if let Some(kind) = self.timeline.hit_test(x) {
                    self.timeline.start_drag(kind, x);
                }
            }
        }
        if response.dragged() {
            if self.timeline.drag_state().is_dragging() {
                ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
            }
            if let Some(pos) = response.interact_pointer_pos() {
                self.timeline.update_drag(x_of(pos));
            }
        }
        if response.drag_stopped() {
            self.timeline.end_drag();
        }
    }

    /// Turn frame time into ticks of the engine's playback timer
    fn advance_playback(&mut self, ui: &Ui) {
        let Some(timer) = self.timeline.playback_timer() else {
            self.timer_id = None;
            self.accumulated = Duration::ZERO;
            return;
        };
        if self.timer_id != Some(timer.id()) {
            self.timer_id = Some(timer.id());
            self.accumulated = Duration::ZERO;
        }

        let frame_time = ui.input(|input| input.stable_dt);
        self.accumulated += Duration::from_secs_f32(frame_time.max(0.0));

        let interval = timer.interval();
        let mut ticks = 0;
        while self.accumulated >= interval && ticks < MAX_TICKS_PER_FRAME {
            self.accumulated -= interval;
            ticks += 1;
            if !self.timeline.tick(timer.id()) {
                break;
            }
        }
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulated = Duration::ZERO;
        }
        ui.ctx().request_repaint_after(interval);
    }
}

fn draw_box(painter: &eframe::egui::Painter, rect: Rect, style: &BoxStyle) {
    let stroke = match style.border {
        Some(border) => Stroke::new(border.thickness as f32, Color32::from(border.colour)),
        None => Stroke::NONE,
    };
    painter.rect(
        rect,
        0.0,
        Color32::from(style.fill_colour),
        stroke,
        StrokeKind::Inside,
    );
}
