// SPDX-License-Identifier: MIT

//!
//! The HTML DOM frontend
//!
//! ```sh
//! wasm-pack build --target web
//! python3 -m http.server 8000 --bind 0.0.0.0
//! ```
//!
//! The timeline is built from plain `div`s and `button`s inside a container
//! element.  Each element is positioned absolutely from the engine's
//! [`WindowGeometry`], so the page's stylesheet can restyle everything but the
//! geometry.
//!

use crate::{
    AxisTick, BoxStyle, DragKind, PlaybackTimer, Timeline, TimelineColours,
    TimelineInteractionEvent, TimelineSettings, TrackLayout, WindowGeometry,
};
use chrono::DateTime;
use gloo_timers::callback::{Interval, Timeout};
use log::{debug, error, info, warn};
use quake_explorer_core::{Dataset, Quake, TimeExtent};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::{Closure, wasm_bindgen};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlButtonElement, HtmlElement, MouseEvent, TouchEvent};

/// Height (px) of the track
const TRACK_HEIGHT_PX: f64 = 30.0;

/// Height (px) set aside below the track for the axis
const AXIS_HEIGHT_PX: f64 = 24.0;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        return Err(JsValue::from_str(&err.to_string()));
    }
    info!("Start Quake Explorer timeline");
    Ok(())
}

/// Whether the event is to target the window element or the browser window
#[derive(Debug, Copy, Clone)]
enum EventListenTarget {
    SelectionWindow,
    PlayButton,
    SpeedButton,
    Window,
}

/// The elements making up the timeline
#[derive(Debug, Clone)]
struct DomElements {
    /// Holds everything below the controls, and is what pointer positions are
    /// measured against
    surface: HtmlElement,
    track: HtmlElement,
    window: HtmlElement,
    left_handle: HtmlElement,
    right_handle: HtmlElement,
    axis: HtmlElement,
    play_button: HtmlButtonElement,
    speed_button: HtmlButtonElement,
}

impl DomElements {
    /// Build the elements inside the container matching the CSS selector
    fn build(selector: &str, colours: &TimelineColours) -> Result<Self, JsValue> {
        let document = document()?;
        let container = document
            .query_selector(selector)?
            .ok_or_else(|| JsValue::from_str(&format!("no element matches `{selector}`")))?;

        let controls: HtmlElement = create_element(&document, "div", "quake-timeline-controls")?;
        let play_button: HtmlButtonElement = create_element(&document, "button", "quake-timeline-play")?;
        play_button.set_text_content(Some("Play"));
        let speed_button: HtmlButtonElement =
            create_element(&document, "button", "quake-timeline-speed")?;
        controls.append_child(&play_button)?;
        controls.append_child(&speed_button)?;

        let surface: HtmlElement = create_element(&document, "div", "quake-timeline-surface")?;
        let track: HtmlElement = create_element(&document, "div", "quake-timeline-track")?;
        let window: HtmlElement = create_element(&document, "div", "quake-timeline-window")?;
        let left_handle: HtmlElement = create_element(&document, "div", "quake-timeline-handle-left")?;
        let right_handle: HtmlElement =
            create_element(&document, "div", "quake-timeline-handle-right")?;
        let axis: HtmlElement = create_element(&document, "div", "quake-timeline-axis")?;

        window.append_child(&left_handle)?;
        window.append_child(&right_handle)?;
        surface.append_child(&track)?;
        surface.append_child(&window)?;
        surface.append_child(&axis)?;
        container.append_child(&controls)?;
        container.append_child(&surface)?;

        set_styles(&surface, &[
            ("position", "relative"),
            ("user-select", "none"),
            ("height", px(TRACK_HEIGHT_PX + AXIS_HEIGHT_PX).as_str()),
        ])?;
        set_box_styles(&track, &colours.track)?;
        set_box_styles(&window, &colours.window)?;
        set_box_styles(&left_handle, &colours.handle)?;
        set_box_styles(&right_handle, &colours.handle)?;
        for element in [&track, &window] {
            set_styles(element, &[
                ("position", "absolute"),
                ("top", "0px"),
                ("height", px(TRACK_HEIGHT_PX).as_str()),
                ("box-sizing", "border-box"),
            ])?;
        }
        set_styles(&window, &[("cursor", "grab")])?;
        for (element, side) in [(&left_handle, "left"), (&right_handle, "right")] {
            set_styles(element, &[
                ("position", "absolute"),
                ("top", "0px"),
                (side, "0px"),
                ("height", "100%"),
                ("cursor", "ew-resize"),
            ])?;
        }
        set_styles(&axis, &[
            ("position", "absolute"),
            ("left", "0px"),
            ("top", px(TRACK_HEIGHT_PX).as_str()),
            ("width", "100%"),
            ("height", px(AXIS_HEIGHT_PX).as_str()),
            ("color", colours.text_colour.as_hex().as_str()),
            ("font-size", "11px"),
        ])?;

        Ok(Self {
            surface,
            track,
            window,
            left_handle,
            right_handle,
            axis,
            play_button,
            speed_button,
        })
    }

    /// Size the track (and handles) for the layout
    fn render_layout(&self, layout: &TrackLayout) -> Result<(), JsValue> {
        set_styles(&self.surface, &[("width", px(layout.total_width()).as_str())])?;
        set_styles(&self.track, &[
            ("left", px(layout.min_x()).as_str()),
            ("width", px(layout.track_width()).as_str()),
        ])?;
        for handle in [&self.left_handle, &self.right_handle] {
            set_styles(handle, &[("width", px(layout.handle_width()).as_str())])?;
        }
        Ok(())
    }

    fn render_geometry(&self, geometry: &WindowGeometry) -> Result<(), JsValue> {
        set_styles(&self.window, &[
            ("left", px(geometry.left()).as_str()),
            ("width", px(geometry.width()).as_str()),
        ])
    }

    /// Replace the axis labels
    fn render_axis(&self, ticks: &[AxisTick]) -> Result<(), JsValue> {
        let document = document()?;
        self.axis.set_inner_html("");
        for tick in ticks {
            let label: HtmlElement = create_element(&document, "span", "quake-timeline-tick")?;
            label.set_text_content(Some(&tick.label));
            set_styles(&label, &[
                ("position", "absolute"),
                ("left", px(tick.x).as_str()),
                ("transform", "translateX(-50%)"),
                ("white-space", "nowrap"),
            ])?;
            self.axis.append_child(&label)?;
        }
        Ok(())
    }

    fn render_controls(&self, is_playing: bool, speed: &str) {
        let play_text = if is_playing { "Pause" } else { "Play" };
        self.play_button.set_text_content(Some(play_text));
        self.speed_button.set_text_content(Some(speed));
    }
}

/// The running playback timer
struct RunningTimer {
    id: u64,
    interval: Interval,
}

#[derive(Default)]
struct State {
    /// The real timer backing the engine's [`PlaybackTimer`] (if any)
    timer: Option<RunningTimer>,

    /// Called (with no arguments) whenever the selected range changes
    filter: Option<js_sys::Function>,
}

/// Everything the event listeners and the timer need to share
struct Shared {
    timeline: RefCell<Timeline>,
    elements: DomElements,
    state: RefCell<State>,
}

/// The HTML DOM timeline for use on the web
#[wasm_bindgen]
pub struct QuakeTimelineHtml {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl QuakeTimelineHtml {
    /// Build a timeline inside the element matching the CSS selector
    #[wasm_bindgen(constructor)]
    pub fn new(selector: &str) -> Result<QuakeTimelineHtml, JsValue> {
        info!("Constructing a new QuakeTimelineHtml in Rust");
        let timeline = Timeline::new(TimelineSettings::default());
        let elements = DomElements::build(selector, &TimelineColours::default())?;
        elements.render_layout(&timeline.layout())?;

        let html = Self {
            shared: Rc::new(Shared {
                timeline: RefCell::new(timeline),
                elements,
                state: RefCell::new(State::default()),
            }),
        };

        info!("Setting up listeners");
        html.listen_for_mousedown();
        html.listen_for_mousemove();
        html.listen_for_mouseup();
        html.listen_for_touchstart();
        html.listen_for_touchmove();
        html.listen_for_touchend();
        html.listen_for_play_click();
        html.listen_for_speed_click();
        sync(&html.shared);
        Ok(html)
    }

    /// Set the hook called (with no arguments) every time the selected range
    /// changes.  Read the range with `min_date()` and `max_date()`.
    #[wasm_bindgen]
    pub fn set_filter(&self, filter: js_sys::Function) {
        self.shared.state.borrow_mut().filter = Some(filter);
    }

    /// Set the extent from an array of quake objects (as parsed from the USGS
    /// CSV, e.g. `{time, latitude, longitude, mag, depth, place, id}`)
    #[wasm_bindgen]
    pub fn set_quakes(&self, quakes: JsValue) -> Result<(), JsValue> {
        let quakes: Vec<Quake> = serde_wasm_bindgen::from_value(quakes)?;
        let dataset = Dataset::from(quakes);
        info!("number of items: {}", dataset.len());
        self.set_extent(dataset.time_extent())
    }

    /// Set the extent from two epoch millisecond timestamps
    #[wasm_bindgen]
    pub fn set_extent_millis(&self, min_ms: f64, max_ms: f64) -> Result<(), JsValue> {
        let instant = |ms: f64| {
            DateTime::from_timestamp_millis(ms as i64)
                .filter(|_| ms.is_finite())
                .ok_or_else(|| JsValue::from_str(&format!("`{ms}` is not a valid timestamp")))
        };
        let extent = TimeExtent::from(instant(min_ms)?, instant(max_ms)?);
        self.set_extent(Some(extent))
    }

    /// Change the track's dimensions (px)
    #[wasm_bindgen]
    pub fn set_layout(
        &self,
        track_width: f64,
        padding: f64,
        handle_width: f64,
    ) -> Result<(), JsValue> {
        let layout = TrackLayout::from(track_width, padding, handle_width)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        self.shared.timeline.borrow_mut().set_layout(layout);
        self.shared.elements.render_layout(&layout)?;
        self.render_axis()?;
        sync(&self.shared);
        Ok(())
    }

    /// The start of the selected range (epoch ms), if there is one
    #[wasm_bindgen]
    pub fn min_date(&self) -> Option<f64> {
        self.shared
            .timeline
            .borrow()
            .min_date()
            .map(|date| date.timestamp_millis() as f64)
    }

    /// The end of the selected range (epoch ms), if there is one
    #[wasm_bindgen]
    pub fn max_date(&self) -> Option<f64> {
        self.shared
            .timeline
            .borrow()
            .max_date()
            .map(|date| date.timestamp_millis() as f64)
    }

    #[wasm_bindgen]
    pub fn is_playing(&self) -> bool {
        self.shared.timeline.borrow().is_playing()
    }

    #[wasm_bindgen]
    pub fn toggle_play(&self) {
        self.shared.timeline.borrow_mut().toggle_play();
        sync(&self.shared);
    }

    /// Move on to the next speed and return its label (e.g. `"2x"`)
    #[wasm_bindgen]
    pub fn cycle_speed(&self) -> String {
        let speed = self.shared.timeline.borrow_mut().cycle_speed();
        sync(&self.shared);
        speed.to_string()
    }

    //--------------------------------------------------------------------------
    // Non WASM bindgen functions
    //--------------------------------------------------------------------------

    fn set_extent(&self, extent: Option<TimeExtent>) -> Result<(), JsValue> {
        self.shared.timeline.borrow_mut().set_extent(extent);
        self.render_axis()?;
        sync(&self.shared);
        Ok(())
    }

    fn render_axis(&self) -> Result<(), JsValue> {
        let ticks = self.shared.timeline.borrow().axis_ticks();
        self.shared.elements.render_axis(&ticks)
    }

    // Closures are forgotten so that they live as long as the page
    fn add_listener<E, F>(&self, target: EventListenTarget, event_name: &str, mut listener: F)
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Ok(event) = event.dyn_into::<E>() {
                listener(event);
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        let elements = &self.shared.elements;
        let result = match target {
            EventListenTarget::SelectionWindow => elements
                .window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref()),
            EventListenTarget::PlayButton => elements
                .play_button
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref()),
            EventListenTarget::SpeedButton => elements
                .speed_button
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref()),
            EventListenTarget::Window => match web_sys::window() {
                Some(window) => window
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref()),
                None => Err(JsValue::from_str("no window")),
            },
        };
        if let Err(err) = result {
            error!("failed to listen for {event_name}: {err:?}");
        }

        closure.forget();
    }

    /// Mousedown on the window starts a drag of whatever part is under the
    /// pointer
    fn listen_for_mousedown(&self) {
        let shared = self.shared.clone();
        self.add_listener::<MouseEvent, _>(
            EventListenTarget::SelectionWindow,
            "mousedown",
            move |event: MouseEvent| {
                event.prevent_default();
                start_drag(&shared, event.client_x() as f64);
            },
        );
    }

    /// Listen on the browser window so a drag carries on when the pointer
    /// leaves the timeline
    fn listen_for_mousemove(&self) {
        let shared = self.shared.clone();
        self.add_listener::<MouseEvent, _>(
            EventListenTarget::Window,
            "mousemove",
            move |event: MouseEvent| update_drag(&shared, event.client_x() as f64),
        );
    }

    fn listen_for_mouseup(&self) {
        let shared = self.shared.clone();
        self.add_listener::<MouseEvent, _>(
            EventListenTarget::Window,
            "mouseup",
            move |_event: MouseEvent| end_drag(&shared),
        );
    }

    fn listen_for_touchstart(&self) {
        let shared = self.shared.clone();
        self.add_listener::<TouchEvent, _>(
            EventListenTarget::SelectionWindow,
            "touchstart",
            move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    event.prevent_default();
                    start_drag(&shared, touch.client_x() as f64);
                }
            },
        );
    }

    fn listen_for_touchmove(&self) {
        let shared = self.shared.clone();
        self.add_listener::<TouchEvent, _>(
            EventListenTarget::Window,
            "touchmove",
            move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    update_drag(&shared, touch.client_x() as f64);
                }
            },
        );
    }

    fn listen_for_touchend(&self) {
        let shared = self.shared.clone();
        self.add_listener::<TouchEvent, _>(
            EventListenTarget::Window,
            "touchend",
            move |_event: TouchEvent| end_drag(&shared),
        );
    }

    fn listen_for_play_click(&self) {
        let shared = self.shared.clone();
        self.add_listener::<MouseEvent, _>(
            EventListenTarget::PlayButton,
            "click",
            move |_event: MouseEvent| {
                shared.timeline.borrow_mut().toggle_play();
                sync(&shared);
            },
        );
    }

    fn listen_for_speed_click(&self) {
        let shared = self.shared.clone();
        self.add_listener::<MouseEvent, _>(
            EventListenTarget::SpeedButton,
            "click",
            move |_event: MouseEvent| {
                shared.timeline.borrow_mut().cycle_speed();
                sync(&shared);
            },
        );
    }
}

/// Convert a viewport x coordinate into track coordinates
fn surface_x(shared: &Shared, client_x: f64) -> f64 {
    client_x - shared.elements.surface.get_bounding_client_rect().left()
}

fn start_drag(shared: &Rc<Shared>, client_x: f64) {
    let x = surface_x(shared, client_x);
    {
        let mut timeline = shared.timeline.borrow_mut();
        let Some(kind) = timeline.hit_test(x) else {
            return;
        };
        timeline.start_drag(kind, x);
        if kind == DragKind::Move {
            set_window_cursor(shared, "grabbing");
        }
    }
    sync(shared);
}

fn update_drag(shared: &Rc<Shared>, client_x: f64) {
    if !shared.timeline.borrow().drag_state().is_dragging() {
        return;
    }
    let x = surface_x(shared, client_x);
    shared.timeline.borrow_mut().update_drag(x);
    sync(shared);
}

fn end_drag(shared: &Rc<Shared>) {
    shared.timeline.borrow_mut().end_drag();
    set_window_cursor(shared, "grab");
    sync(shared);
}

/// Bring the DOM, the real timer and the JS filter hook in line with the
/// engine.  Called after anything that may have changed the engine.
fn sync(shared: &Rc<Shared>) {
    let (events, geometry, is_playing, speed, timer) = {
        let mut timeline = shared.timeline.borrow_mut();
        let events: Vec<TimelineInteractionEvent> = timeline.drain_interaction_events().collect();
        (
            events,
            timeline.geometry(),
            timeline.is_playing(),
            timeline.speed(),
            timeline.playback_timer(),
        )
    };

    if let Err(err) = shared.elements.render_geometry(&geometry) {
        warn!("failed to position window: {err:?}");
    }
    shared
        .elements
        .render_controls(is_playing, &speed.to_string());
    reconcile_timer(shared, timer);

    // Neither the engine nor the JS wrapper (every binding takes `&self`) is
    // borrowed, so the hook may call back in
    let range_changed = events
        .iter()
        .any(|event| matches!(event, TimelineInteractionEvent::RangeChanged(_)));
    if range_changed {
        let filter = shared.state.borrow().filter.clone();
        if let Some(filter) = filter {
            if let Err(err) = filter.call0(&JsValue::NULL) {
                error!("filter hook failed: {err:?}");
            }
        }
    }
}

/// Make sure the one real timer running is the one the engine expects
fn reconcile_timer(shared: &Rc<Shared>, wanted: Option<PlaybackTimer>) {
    let mut state = shared.state.borrow_mut();
    let running_id = state.timer.as_ref().map(|timer| timer.id);
    if running_id == wanted.map(|timer| timer.id()) {
        return;
    }

    // This may run inside the old timer's own callback, so its closure is
    // dropped once the callback has returned rather than now
    if let Some(old) = state.timer.take() {
        debug!("cancelling timer {}", old.id);
        let closure = old.interval.cancel();
        Timeout::new(0, move || drop(closure)).forget();
    }

    if let Some(timer) = wanted {
        debug!("starting timer {} every {:?}", timer.id(), timer.interval());
        let id = timer.id();
        let weak = Rc::downgrade(shared);
        let interval = Interval::new(interval_millis(timer.interval()), move || {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let moved = shared.timeline.borrow_mut().tick(id);
            if moved {
                sync(&shared);
            }
        });
        state.timer = Some(RunningTimer { id, interval });
    }
}

fn set_window_cursor(shared: &Shared, cursor: &str) {
    if let Err(err) = shared.elements.window.style().set_property("cursor", cursor) {
        warn!("failed to set cursor: {err:?}");
    }
}

/// Interval length for `gloo_timers` (saturating rather than wrapping)
fn interval_millis(interval: Duration) -> u32 {
    u32::try_from(interval.as_millis()).unwrap_or(u32::MAX)
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Create an element with a class name
fn create_element<T: JsCast>(document: &Document, tag: &str, class: &str) -> Result<T, JsValue> {
    let element = document.create_element(tag)?;
    element.set_class_name(class);
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("`{tag}` is not the expected element type")))
}

fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) -> Result<(), JsValue> {
    let style = element.style();
    for (property, value) in styles {
        style.set_property(property, value)?;
    }
    Ok(())
}

fn set_box_styles(element: &HtmlElement, box_style: &BoxStyle) -> Result<(), JsValue> {
    set_styles(element, &[("background-color", box_style.fill_colour.as_hex().as_str())])?;
    if let Some(border) = box_style.border {
        let border = format!("{}px solid {}", border.thickness, border.colour.as_hex());
        set_styles(element, &[("border", border.as_str())])?;
    }
    Ok(())
}

fn px(value: f64) -> String {
    format!("{value}px")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn interval_saturates() {
        assert_eq!(interval_millis(Duration::from_millis(10)), 10);
        assert_eq!(interval_millis(Duration::from_millis(u64::MAX)), u32::MAX);
    }

    #[test]
    fn bindings_take_shared_references() {
        // wasm-bindgen holds a mutable borrow of the JS object for the whole of
        // a `&mut self` call, which would stop the filter hook reading the range
        let _: fn(&QuakeTimelineHtml, JsValue) -> Result<(), JsValue> =
            QuakeTimelineHtml::set_quakes;
        let _: fn(&QuakeTimelineHtml, f64, f64) -> Result<(), JsValue> =
            QuakeTimelineHtml::set_extent_millis;
        let _: fn(&QuakeTimelineHtml, f64, f64, f64) -> Result<(), JsValue> =
            QuakeTimelineHtml::set_layout;
        let _: fn(&QuakeTimelineHtml, js_sys::Function) = QuakeTimelineHtml::set_filter;
        let _: fn(&QuakeTimelineHtml) = QuakeTimelineHtml::toggle_play;
        let _: fn(&QuakeTimelineHtml) -> String = QuakeTimelineHtml::cycle_speed;
        let _: fn(&QuakeTimelineHtml) -> Option<f64> = QuakeTimelineHtml::min_date;
    }
}
