// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Quake Explorer egui desktop app
//!

use crate::Config;
use crate::app_colours::ColourTheme;
use crate::consts::{IDLE_REPAINT_MILLIS, SIDE_PANEL_WIDTH};
use crate::magnitude_chart::draw_magnitude_chart;
use crate::map_view::MapView;
use crate::shortcuts::global_shortcuts;
use eframe::App;
use eframe::egui::{
    Button, CentralPanel, Context, ScrollArea, SidePanel, Spinner, TextEdit, Ui, Vec2,
};
use quake_explorer_core::{Dataset, DatasetError, MagnitudeHistogram};
use quake_explorer_timeline::{QuakeTimelineEgui, SelectedDateRange};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// All possible action requests (e.g. from keyboard shortcuts)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRequest {
    TogglePlayback,
    CycleSpeed,
    ReloadData,
}

/// Holds both the `tx` and `rx` ends of an unbounded channel.
#[derive(Debug)]
pub struct UnboundedChannel<T> {
    pub tx: UnboundedSender<T>,
    pub rx: UnboundedReceiver<T>,
}

impl<T> From<(UnboundedSender<T>, UnboundedReceiver<T>)> for UnboundedChannel<T> {
    fn from(value: (UnboundedSender<T>, UnboundedReceiver<T>)) -> Self {
        UnboundedChannel {
            tx: value.0,
            rx: value.1,
        }
    }
}

/// All data needed for the Quake Explorer (egui) desktop app
pub struct QuakeExplorerApp {
    config: Config,

    /// The text in the data path input
    data_path_input: String,

    /// The loaded quakes (empty until a CSV has been loaded)
    dataset: Dataset,

    /// Whether a CSV is being loaded in the background
    loading: bool,

    /// Shown in the side panel (e.g. load errors)
    status: Option<String>,

    timeline: QuakeTimelineEgui,

    map_view: MapView,

    /// Magnitude counts of the quakes in the selected range
    histogram: MagnitudeHistogram,

    /// The timeline's latest range (`None` until a dataset has been loaded)
    selected_range: Option<SelectedDateRange>,

    /// Requests from keyboard shortcuts
    channel_action_request: UnboundedChannel<ActionRequest>,

    /// Datasets loaded by background tasks
    channel_dataset: UnboundedChannel<Result<Dataset, DatasetError>>,

    /// Ranges sent by the timeline's filter
    channel_range: UnboundedChannel<SelectedDateRange>,
}

impl QuakeExplorerApp {
    /// Create a new `QuakeExplorerApp`.  `data_path` overrides the CSV path
    /// in the config (without saving it).
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(data_path: Option<PathBuf>) -> Self {
        let config = match Config::ensure_setup().and_then(|_| Config::load()) {
            Ok(config) => config,
            Err(error) => {
                warn!("Unable to load config ({error}), using the default");
                Config::default()
            }
        };
        Self::with_config(config, data_path)
    }

    fn with_config(config: Config, data_path: Option<PathBuf>) -> Self {

        let channel_action_request: UnboundedChannel<ActionRequest> =
            tokio::sync::mpsc::unbounded_channel().into();
        let channel_dataset: UnboundedChannel<Result<Dataset, DatasetError>> =
            tokio::sync::mpsc::unbounded_channel().into();
        let channel_range: UnboundedChannel<SelectedDateRange> =
            tokio::sync::mpsc::unbounded_channel().into();

        let mut timeline = QuakeTimelineEgui::new(config.timeline);
        let tx_range = channel_range.tx.clone();
        timeline.set_filter(move |range: &SelectedDateRange| {
            let _ = tx_range.send(*range);
        });

        let data_path = data_path.or_else(|| config.data_path().map(PathBuf::from));
        let mut app = Self {
            config,
            data_path_input: String::new(),
            dataset: Dataset::default(),
            loading: false,
            status: None,
            timeline,
            map_view: MapView::default(),
            histogram: MagnitudeHistogram::default(),
            selected_range: None,
            channel_action_request,
            channel_dataset,
            channel_range,
        };
        if let Some(path) = data_path {
            app.data_path_input = path.display().to_string();
            app.load_dataset(path);
        }
        app
    }

    /// Load the CSV on a blocking task.  The result arrives on
    /// `channel_dataset`.
    fn load_dataset(&mut self, path: PathBuf) {
        info!("Loading quakes from {path:?}");
        self.loading = true;
        self.status = None;
        let tx = self.channel_dataset.tx.clone();
        tokio::task::spawn_blocking(move || {
            let result = Dataset::from_csv_path(&path);
            let _ = tx.send(result);
        });
    }

    /// Load the CSV named in the path input.  Ignored while a load is still
    /// running, so an older load can't replace a newer one.
    fn reload_dataset(&mut self) {
        if self.loading {
            debug!("Already loading, ignoring reload");
            return;
        }
        let path = self.data_path_input.trim();
        if path.is_empty() {
            self.status = Some(String::from("No CSV file given"));
            return;
        }
        let path = PathBuf::from(path);
        self.config.set_data_path(Some(path.clone()));
        self.load_dataset(path);
    }

    /// Swap in a dataset if one has finished loading
    fn check_for_loaded_dataset(&mut self) {
        let Ok(result) = self.channel_dataset.rx.try_recv() else {
            return;
        };
        self.loading = false;
        match result {
            Ok(dataset) => {
                info!("Dataset loaded ({} quakes)", dataset.len());
                if dataset.is_empty() {
                    self.status = Some(String::from("The CSV file has no quakes"));
                }
                self.map_view.set_dataset(&dataset);
                self.histogram = MagnitudeHistogram::from_magnitudes(
                    dataset.quakes().iter().map(|quake| quake.magnitude()),
                );
                self.selected_range = None;
                self.dataset = dataset;
                // Publishes the first range (if there are any quakes)
                self.timeline.set_extent(self.dataset.time_extent());
            }
            Err(error) => {
                warn!("Unable to load dataset: {error}");
                self.status = Some(format!("Unable to load the CSV file: {error}"));
            }
        }
    }

    /// Recompute the filtered views from the timeline's latest range
    fn check_for_range_change(&mut self, ctx: &Context) {
        let mut latest = None;
        while let Ok(range) = self.channel_range.rx.try_recv() {
            latest = Some(range);
        }
        if let Some(range) = latest {
            trace!("Range changed: {range}");
            self.histogram = self.dataset.magnitude_histogram_in_range(&range);
            self.selected_range = Some(range);
            ctx.request_repaint();
        }
    }

    fn handle_action_requests(&mut self) {
        while let Ok(request) = self.channel_action_request.rx.try_recv() {
            debug!("recv {request:?}");
            match request {
                ActionRequest::TogglePlayback => self.timeline.timeline_mut().toggle_play(),
                ActionRequest::CycleSpeed => {
                    self.timeline.timeline_mut().cycle_speed();
                }
                ActionRequest::ReloadData => self.reload_dataset(),
            }
        }
    }

    fn draw_side_panel(&mut self, ui: &mut Ui) {
        ui.add_space(8.0);
        ui.heading("Quake Explorer");
        ui.separator();

        // Data
        ui.label("CSV file");
        ui.add(TextEdit::singleline(&mut self.data_path_input).desired_width(f32::INFINITY));
        ui.horizontal(|ui| {
            let button = Button::new("Load");
            if ui.add_enabled(!self.loading, button).clicked() {
                self.reload_dataset();
            }
            if self.loading {
                ui.add(Spinner::new());
            }
        });
        if let Some(status) = &self.status {
            ui.colored_label(ui.visuals().warn_fg_color, status);
        }
        ui.separator();

        // Counts
        let in_range = match &self.selected_range {
            Some(range) => self.dataset.in_range(range).count(),
            None => self.dataset.len(),
        };
        ui.label(format!("Quakes loaded: {}", self.dataset.len()));
        ui.label(format!("Quakes in range: {in_range}"));
        ui.separator();

        // Settings
        ui.label("Theme");
        ui.horizontal(|ui| {
            for theme in ColourTheme::ALL {
                let selected = self.config.colour_theme() == theme;
                if ui.selectable_label(selected, theme.label()).clicked() {
                    self.config.set_colour_theme(theme);
                }
            }
        });
        ui.add_space(4.0);
        let size = Vec2::new(ui.available_width(), 0.0);
        if ui.add_sized(size, Button::new("Save settings")).clicked() {
            self.config.timeline.layout = self.timeline.timeline().layout();
            match self.config.save() {
                Ok(()) => self.status = None,
                Err(error) => {
                    warn!("Unable to save config: {error}");
                    self.status = Some(format!("Unable to save settings: {error}"));
                }
            }
        }
        ui.separator();

        ui.small("Space: play/pause");
        ui.small("S: playback speed");
    }

    fn draw_central_panel(&mut self, ctx: &Context, ui: &mut Ui) {
        let theme = self.config.colour_theme();
        let view_colours = theme.view_colours(ctx);
        self.timeline.set_colours(theme.timeline_colours(ctx));

        ScrollArea::vertical().show(ui, |ui| {
            self.map_view
                .draw(ui, &self.dataset, self.selected_range.as_ref(), &view_colours);
            ui.add_space(8.0);

            ui.label("Magnitudes");
            draw_magnitude_chart(ui, &self.histogram, &view_colours);
            ui.add_space(8.0);

            self.timeline.draw(ui);
        });
    }
}

impl App for QuakeExplorerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint_after(Duration::from_millis(IDLE_REPAINT_MILLIS));

        self.config.colour_theme().use_theme(ctx);

        self.check_for_loaded_dataset();

        global_shortcuts(ctx, &self.channel_action_request.tx);
        self.handle_action_requests();

        SidePanel::left("sidebar")
            .exact_width(SIDE_PANEL_WIDTH)
            .show(ctx, |ui| {
                self.draw_side_panel(ui);
            });

        CentralPanel::default().show(ctx, |ui| {
            self.draw_central_panel(ctx, ui);
        });

        // The timeline only reports to the filter, so drop the queued events
        self.timeline.drain_interaction_events().for_each(drop);

        self.check_for_range_change(ctx);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use quake_explorer_timeline::TimelineSettings;

    #[test]
    fn channel_from_tuple() {
        let mut channel: UnboundedChannel<ActionRequest> =
            tokio::sync::mpsc::unbounded_channel().into();
        channel.tx.send(ActionRequest::CycleSpeed).unwrap();
        assert_eq!(channel.rx.try_recv().unwrap(), ActionRequest::CycleSpeed);
        assert!(channel.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn one_load_at_a_time() {
        let path = PathBuf::from(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../core/test-data/quakes.csv"
        ));
        let mut app = QuakeExplorerApp::with_config(Config::default(), Some(path.clone()));
        assert!(app.loading);

        app.data_path_input = String::from("/elsewhere/other.csv");
        app.reload_dataset();
        assert_eq!(app.config.data_path(), None);

        let loaded = app.channel_dataset.rx.recv().await.unwrap().unwrap();
        assert_eq!(loaded.len(), 8);
        app.channel_dataset.tx.send(Ok(loaded)).unwrap();
        app.check_for_loaded_dataset();
        assert!(!app.loading);
        assert_eq!(app.dataset.len(), 8);

        // Once the first load is in, reloading is allowed again
        app.data_path_input = path.display().to_string();
        app.reload_dataset();
        assert!(app.loading);
        assert_eq!(app.config.data_path(), Some(path.as_path()));
    }

    #[test]
    fn timeline_filter_feeds_the_channel() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../core/test-data/quakes.csv");
        let dataset = Dataset::from_csv_path(path).unwrap();

        let mut channel: UnboundedChannel<SelectedDateRange> =
            tokio::sync::mpsc::unbounded_channel().into();
        let mut timeline = QuakeTimelineEgui::new(TimelineSettings::default());
        let tx = channel.tx.clone();
        timeline.set_filter(move |range: &SelectedDateRange| {
            let _ = tx.send(*range);
        });

        timeline.set_extent(dataset.time_extent());
        let range = channel.rx.try_recv().unwrap();
        let extent = dataset.time_extent().unwrap();
        assert_eq!(range.min_date(), extent.min());
        assert!(range.max_date() <= extent.max());

        let histogram = dataset.magnitude_histogram_in_range(&range);
        assert_eq!(histogram.total(), dataset.in_range(&range).count());
    }
}
