// src/gui.rs
use std::fs;
use std::path::Path;

use eframe::egui;
use egui::{Color32, Painter, Pos2, Rect, Sense, Shape, Stroke, Vec2};
use log::{info, warn};

use crate::analysis::{
    load_response_file, parse_path_list, validate_record_files, AnalysisResponse,
    AnalysisService, ReplayService,
};
use crate::config::ViewerConfig;
use crate::demo;
use crate::types::{Redraw, ViewerEvent};
use crate::viewer::controller::IndicatorGeometry;
use crate::viewer::{render_png, Canvas, DrawList, Recording, ViewerController, ViewerError};

const MAIN_CANVAS_INSET: f32 = 30.0;
const LOG_LINES: usize = 8;

/// Canvas adapter over a region of an egui painter.
struct EguiCanvas<'a> {
    painter: &'a Painter,
    rect: Rect,
    background: Color32,
}

impl EguiCanvas<'_> {
    fn at(&self, point: Pos2) -> Pos2 {
        self.rect.min + point.to_vec2()
    }
}

impl Canvas for EguiCanvas<'_> {
    fn size(&self) -> Vec2 {
        self.rect.size()
    }

    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, self.background);
    }

    fn stroke_path(&mut self, points: &[Pos2], stroke: Stroke) {
        let points = points.iter().map(|p| self.at(*p)).collect();
        self.painter.add(Shape::line(points, stroke));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.painter
            .rect_filled(rect.translate(self.rect.min.to_vec2()), 0.0, color);
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.painter.circle_filled(self.at(center), radius, color);
    }
}

/// Last rendered surfaces, replayed every frame and rebuilt only when flagged.
struct FrameCache {
    main: DrawList,
    minimap: DrawList,
    indicator: Option<IndicatorGeometry>,
}

impl Default for FrameCache {
    fn default() -> Self {
        Self {
            main: DrawList::new(Vec2::ZERO),
            minimap: DrawList::new(Vec2::ZERO),
            indicator: None,
        }
    }
}

fn indicator_rect(minimap: Rect, indicator: IndicatorGeometry) -> Rect {
    Rect::from_min_size(
        Pos2::new(minimap.left() + indicator.left, minimap.top()),
        Vec2::new(indicator.width, minimap.height()),
    )
}

pub struct EcgViewerApp {
    config: ViewerConfig,
    controller: ViewerController,
    service: Box<dyn AnalysisService>,

    frames: FrameCache,
    pending: Redraw,

    // load inputs
    record_input: String,
    response_input: String,

    // blocking error dialog
    alert: Option<String>,
    log_messages: Vec<String>,
}

impl EcgViewerApp {
    pub fn new(config: ViewerConfig) -> Self {
        let controller = ViewerController::new(&config);
        let mut app = Self {
            config,
            controller,
            service: Box::new(ReplayService::new()),
            frames: FrameCache::default(),
            pending: Redraw::ALL,
            record_input: String::new(),
            response_input: String::new(),
            alert: None,
            log_messages: vec!["ECG viewer ready.".to_owned()],
        };
        app.load_demo();
        app
    }

    pub fn with_service(mut self, service: Box<dyn AnalysisService>) -> Self {
        self.service = service;
        self
    }

    fn log(&mut self, msg: &str) {
        self.log_messages.push(format!("> {}", msg));
        if self.log_messages.len() > LOG_LINES {
            self.log_messages.remove(0);
        }
    }

    fn fail(&mut self, context: &str, err: ViewerError) {
        warn!("{context}: {err}");
        self.log(&format!("{context}: {err}"));
        self.alert = Some(err.to_string());
    }

    fn dispatch(&mut self, event: ViewerEvent) {
        let redraw = self.controller.dispatch(event);
        self.pending = self.pending.merge(redraw);
    }

    /// Rebuild the cached surfaces flagged since the last frame.
    fn refresh_frames(&mut self) {
        if self.pending.main {
            self.frames.main = self.controller.main_snapshot();
        }
        if self.pending.minimap {
            self.frames.minimap = self.controller.minimap_snapshot();
        }
        if self.pending.indicator {
            self.frames.indicator = self.controller.indicator();
        }
        self.pending = Redraw::NONE;
    }

    fn apply(&mut self, recording: Recording, source: &str) {
        let peaks = recording.peaks().len();
        let samples = recording.len();
        self.dispatch(ViewerEvent::DataLoaded(recording));
        self.log(&format!("{source}: {samples} samples, {peaks} peaks"));
    }

    pub fn load_demo(&mut self) {
        match demo::synthetic_recording(&self.config.demo) {
            Ok(recording) => self.apply(recording, "Demo"),
            Err(err) => self.fail("Demo", err),
        }
    }

    pub fn open_response(&mut self, path: &Path) {
        info!("opening analysis response {}", path.display());
        match load_response_file(path).and_then(AnalysisResponse::into_recording) {
            Ok(recording) => self.apply(recording, &path.display().to_string()),
            Err(err) => self.fail("Open", err),
        }
    }

    fn analyze_records(&mut self) {
        let paths = parse_path_list(&self.record_input);
        let result = validate_record_files(&paths)
            .map_err(ViewerError::from)
            .and_then(|selection| self.service.analyze(&selection))
            .and_then(AnalysisResponse::into_recording);
        match result {
            Ok(recording) => self.apply(recording, "Analysis"),
            Err(err) => self.fail("Analysis", err),
        }
    }

    fn export_png(&mut self) {
        let position = self.controller.viewport().position();
        let path = format!("ecg_view_{position}.png");
        let written = render_png(&self.controller.main_snapshot())
            .and_then(|png| fs::write(&path, png).map_err(ViewerError::from));
        match written {
            Ok(()) => {
                info!("exported {path}");
                self.log(&format!("Saved {path}"));
            }
            Err(err) => self.fail("Export", err),
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let step = self.config.pan_step();
        let (left, right) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
            )
        });
        if left {
            self.dispatch(ViewerEvent::Pan(-step));
        }
        if right {
            self.dispatch(ViewerEvent::Pan(step));
        }
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Record files:");
            ui.add(
                egui::TextEdit::singleline(&mut self.record_input)
                    .hint_text("100.dat 100.hea 100.atr"),
            );
            if ui.button("Analyze").clicked() {
                self.analyze_records();
            }
            ui.separator();
            ui.label("Response:");
            ui.add(egui::TextEdit::singleline(&mut self.response_input).hint_text("100.json"));
            if ui.button("Open").clicked() {
                let path = self.response_input.trim().to_owned();
                self.open_response(Path::new(&path));
            }
            ui.separator();
            if ui.button("Demo").clicked() {
                self.load_demo();
            }
            if ui.button("Export PNG").clicked() {
                self.export_png();
            }
        });
    }

    fn draw_legend(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("■ true class   ● predicted class");
            for (class, color) in self.controller.palette().legend() {
                ui.label(egui::RichText::new(format!("■ {}", class.tag())).color(color));
            }
        });
    }

    fn draw_views(&mut self, ui: &mut egui::Ui) {
        let main_size = Vec2::new(
            (ui.available_width() - MAIN_CANVAS_INSET).max(1.0),
            self.config.main_height,
        );
        let minimap_size = Vec2::new(ui.available_width().max(1.0), self.config.minimap_height);
        let resized = main_size != self.controller.main_size()
            || minimap_size != self.controller.minimap_size();
        if resized {
            self.dispatch(ViewerEvent::Resize {
                main: main_size,
                minimap: minimap_size,
            });
        }
        self.refresh_frames();

        let (main_response, main_painter) = ui.allocate_painter(main_size, Sense::hover());
        self.frames.main.replay(&mut EguiCanvas {
            painter: &main_painter,
            rect: main_response.rect,
            background: Color32::WHITE,
        });

        ui.add_space(8.0);
        let (minimap_response, minimap_painter) = ui.allocate_painter(minimap_size, Sense::click());
        let minimap_rect = minimap_response.rect;
        self.frames.minimap.replay(&mut EguiCanvas {
            painter: &minimap_painter,
            rect: minimap_rect,
            background: Color32::from_rgb(248, 248, 248),
        });

        if minimap_response.clicked() {
            if let Some(pos) = minimap_response.interact_pointer_pos() {
                let x = pos.x - minimap_rect.left();
                self.dispatch(ViewerEvent::MinimapClick { x });
            }
        }

        if let Some(indicator) = self.frames.indicator {
            let rect = indicator_rect(minimap_rect, indicator);
            let response = ui.interact(rect, ui.id().with("viewport-indicator"), Sense::drag());
            let pointer_x = response.interact_pointer_pos().map(|p| p.x);
            if response.drag_started() {
                if let Some(x) = pointer_x {
                    self.dispatch(ViewerEvent::DragStart { x });
                }
            } else if response.dragged() {
                if let Some(x) = pointer_x {
                    self.dispatch(ViewerEvent::DragMove { x });
                }
            }
            if response.drag_released() {
                self.dispatch(ViewerEvent::DragEnd);
            }
            if response.hovered() || self.controller.is_dragging() {
                let icon = if self.controller.is_dragging() {
                    egui::CursorIcon::Grabbing
                } else {
                    egui::CursorIcon::Move
                };
                ui.ctx().set_cursor_icon(icon);
            }
        }

        // gestures above may already have moved the viewport
        if self.pending.indicator {
            self.frames.indicator = self.controller.indicator();
            self.pending.indicator = false;
        }
        if let Some(indicator) = self.frames.indicator {
            let rect = indicator_rect(minimap_rect, indicator);
            let fill = Color32::from_rgba_unmultiplied(0, 123, 255, 40);
            let outline = Stroke::new(1.5, Color32::from_rgb(0, 123, 255));
            minimap_painter.rect_filled(rect, 2.0, fill);
            minimap_painter.rect_stroke(rect, 2.0, outline);
        }
    }

    fn draw_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.clone() else {
            return;
        };
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    self.alert = None;
                }
            });
    }
}

impl eframe::App for EcgViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut visuals = egui::Visuals::light();
        visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(245, 245, 250);
        ctx.set_visuals(visuals);

        if self.alert.is_none() && !ctx.wants_keyboard_input() {
            self.handle_keys(ctx);
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("ECG Viewer");
            self.draw_toolbar(ui);
            ui.add_space(4.0);
        });

        egui::SidePanel::right("analysis").min_width(180.0).show(ctx, |ui| {
            ui.label("PREDICTIONS");
            ui.separator();
            let lines = self.controller.recording().prediction_lines();
            let row_height = ui.text_style_height(&egui::TextStyle::Body);
            egui::ScrollArea::vertical()
                .max_height((ui.available_height() - 140.0).max(60.0))
                .show_rows(ui, row_height, lines.len(), |ui, rows| {
                    for line in &lines[rows] {
                        ui.monospace(line);
                    }
                });
            ui.separator();
            egui::ScrollArea::vertical()
                .id_source("log")
                .max_height(120.0)
                .show(ui, |ui| {
                    for m in &self.log_messages {
                        ui.monospace(m);
                    }
                });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let viewport = self.controller.viewport();
            let visible = viewport.visible_range(self.controller.recording().len());
            ui.label(format!(
                "Samples {}–{} of {}",
                visible.start,
                visible.end,
                self.controller.recording().len()
            ));
            self.draw_views(ui);
            self.draw_legend(ui);
        });

        self.draw_alert(ctx);

        if self.pending.any() || self.controller.is_dragging() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::service::ManualService;
    use eframe::egui::vec2;

    fn sized_app() -> EcgViewerApp {
        let mut app = EcgViewerApp::new(ViewerConfig::default());
        app.dispatch(ViewerEvent::Resize {
            main: vec2(900.0, 300.0),
            minimap: vec2(1000.0, 60.0),
        });
        app.refresh_frames();
        app
    }

    #[test]
    fn rejected_responses_keep_the_current_recording() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = sized_app();
        app.dispatch(ViewerEvent::Pan(1200));
        let before = app.controller.recording().clone();
        let position = app.controller.viewport().position();

        let server = dir.path().join("server.json");
        fs::write(&server, r#"{"error": "Record 100 could not be processed"}"#).unwrap();
        app.open_response(&server);
        assert_eq!(app.alert.as_deref(), Some("Record 100 could not be processed"));

        let bad_peaks = dir.path().join("peaks.json");
        fs::write(&bad_peaks, r#"{"signal": [0.0, 1.0], "peaks": [7]}"#).unwrap();
        app.open_response(&bad_peaks);
        assert!(app.alert.as_deref().unwrap().contains("sample 7"));

        let malformed = dir.path().join("broken.json");
        fs::write(&malformed, r#"{"signal": [0.0, "#).unwrap();
        app.open_response(&malformed);
        assert!(app.alert.as_deref().unwrap().starts_with("malformed"));

        app.open_response(&dir.path().join("missing.json"));
        assert!(app.alert.as_deref().unwrap().starts_with("failed to read"));

        assert_eq!(app.controller.recording(), &before);
        assert_eq!(app.controller.viewport().position(), position);
    }

    #[test]
    fn rejected_record_selection_never_reaches_the_service() {
        let mut app = sized_app().with_service(Box::new(ManualService::new([])));
        let before = app.controller.recording().clone();
        app.record_input = "100.dat".into();
        app.analyze_records();
        assert_eq!(
            app.alert.as_deref(),
            Some(
                "Please select at least 2 files (.dat, .hea) with the same base name. \
                 Consider providing .atr file with true annotations."
            )
        );
        app.record_input = "100.dat 101.hea".into();
        app.analyze_records();
        assert_eq!(
            app.alert.as_deref(),
            Some("All files must have the same base name (e.g., 100.dat, 100.hea, 100.atr)")
        );
        assert_eq!(app.controller.recording(), &before);
    }

    #[test]
    fn service_error_is_shown_verbatim() {
        let response = AnalysisResponse {
            error: Some("bad header".into()),
            ..AnalysisResponse::default()
        };
        let mut app = sized_app().with_service(Box::new(ManualService::new([Ok(response)])));
        let before = app.controller.recording().clone();
        app.record_input = "100.dat 100.hea".into();
        app.analyze_records();
        assert_eq!(app.alert.as_deref(), Some("bad header"));
        assert_eq!(app.controller.recording(), &before);
    }

    #[test]
    fn accepted_response_replaces_the_recording() {
        let response = AnalysisResponse {
            signal: vec![0.0, 1.0, 0.0, 0.5],
            peaks: vec![1],
            annotations: vec!["N".into()],
            predictions: vec!["V".into()],
            ..AnalysisResponse::default()
        };
        let mut app = sized_app().with_service(Box::new(ManualService::new([Ok(response)])));
        app.dispatch(ViewerEvent::Pan(900));
        app.record_input = "100.dat, 100.hea; 100.atr".into();
        app.analyze_records();
        assert!(app.alert.is_none());
        assert_eq!(app.controller.recording().len(), 4);
        assert_eq!(app.controller.viewport().position(), 0);
        assert_eq!(app.pending, Redraw::ALL);
    }

    #[test]
    fn panning_reuses_the_minimap_frame() {
        let mut app = sized_app();
        let main = app.frames.main.clone();
        let indicator = app.frames.indicator;
        // marker list: survives only if the minimap is not rebuilt
        let marker = DrawList::new(vec2(1.0, 1.0));
        app.frames.minimap = marker.clone();

        app.dispatch(ViewerEvent::Pan(app.config.pan_step()));
        assert_eq!(app.pending, Redraw::VIEWPORT);
        app.refresh_frames();

        assert_eq!(app.frames.minimap, marker);
        assert_ne!(app.frames.main, main);
        assert_ne!(app.frames.indicator, indicator);
        assert!(!app.pending.any());
    }

    #[test]
    fn new_data_rebuilds_every_frame() {
        let mut app = sized_app();
        let marker = DrawList::new(vec2(1.0, 1.0));
        app.frames.minimap = marker.clone();
        app.load_demo();
        app.refresh_frames();
        assert_ne!(app.frames.minimap, marker);
        assert_eq!(app.frames.minimap, app.controller.minimap_snapshot());
    }
}
