use eframe::egui::Vec2;
use log::{debug, info};

use crate::config::ViewerConfig;
use crate::types::{Redraw, ViewerEvent};
use crate::viewer::canvas::{Canvas, DrawList};
use crate::viewer::interaction::InteractionHandler;
use crate::viewer::minimap::{render_minimap, MinimapStyle};
use crate::viewer::overlay::{render_overlay, MarkerStyle, PeakLabels};
use crate::viewer::palette::ClassColorMap;
use crate::viewer::viewport::Viewport;
use crate::viewer::waveform::{render_waveform, WaveformStyle, WindowProjection};
use crate::viewer::Recording;

/// Placement of the viewport indicator over the minimap, in minimap pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorGeometry {
    pub left: f32,
    pub width: f32,
}

/// Owns the loaded recording and the viewport. Renderers only borrow from it.
pub struct ViewerController {
    recording: Recording,
    viewport: Viewport,
    interaction: InteractionHandler,
    main_size: Vec2,
    minimap_size: Vec2,
    show_minimap_peaks: bool,
    palette: ClassColorMap,
    waveform_style: WaveformStyle,
    marker_style: MarkerStyle,
    minimap_style: MinimapStyle,
}

impl ViewerController {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            recording: Recording::default(),
            viewport: Viewport::new(config.window_size),
            interaction: InteractionHandler::default(),
            main_size: Vec2::ZERO,
            minimap_size: Vec2::ZERO,
            show_minimap_peaks: config.show_minimap_peaks,
            palette: ClassColorMap::default(),
            waveform_style: WaveformStyle::default(),
            marker_style: MarkerStyle::default(),
            minimap_style: MinimapStyle::default(),
        }
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn palette(&self) -> &ClassColorMap {
        &self.palette
    }

    pub fn is_dragging(&self) -> bool {
        self.interaction.is_dragging()
    }

    pub fn main_size(&self) -> Vec2 {
        self.main_size
    }

    pub fn minimap_size(&self) -> Vec2 {
        self.minimap_size
    }

    pub fn dispatch(&mut self, event: ViewerEvent) -> Redraw {
        match event {
            ViewerEvent::DataLoaded(recording) => {
                info!(
                    "loaded recording: {} samples, {} peaks",
                    recording.len(),
                    recording.peaks().len()
                );
                self.recording = recording;
                self.viewport.reset();
                self.interaction.cancel();
                Redraw::ALL
            }
            ViewerEvent::Resize { main, minimap } => {
                self.main_size = main;
                self.minimap_size = minimap;
                Redraw::ALL
            }
            ViewerEvent::DragStart { x } => {
                self.interaction.press(x, self.viewport.position());
                Redraw::NONE
            }
            ViewerEvent::DragMove { x } => {
                match self
                    .interaction
                    .drag_to(x, self.minimap_size.x, self.recording.len())
                {
                    Some(target) => self.set_position(target),
                    None => Redraw::NONE,
                }
            }
            ViewerEvent::DragEnd => {
                self.interaction.release();
                Redraw::NONE
            }
            ViewerEvent::MinimapClick { x } => {
                match self.interaction.click(
                    x,
                    self.minimap_size.x,
                    self.recording.len(),
                    self.viewport.window_size(),
                ) {
                    Some(target) => self.set_position(target),
                    None => Redraw::NONE,
                }
            }
            ViewerEvent::Pan(delta) => {
                if self.recording.is_empty() {
                    return Redraw::NONE;
                }
                let current = self.viewport.position() as i64;
                self.set_position(current.saturating_add(delta))
            }
        }
    }

    /// Clamp and apply a requested position. Main view and indicator need repainting.
    pub fn set_position(&mut self, requested: i64) -> Redraw {
        if self.recording.is_empty() {
            return Redraw::NONE;
        }
        if self.viewport.set_position(requested, self.recording.len()) {
            debug!(
                "viewport at {} (requested {requested}) of {}",
                self.viewport.position(),
                self.recording.len()
            );
        }
        Redraw::VIEWPORT
    }

    pub fn render_main(&self, canvas: &mut impl Canvas) -> Option<WindowProjection> {
        let signal = self.recording.signal();
        let visible = self.viewport.visible_range(signal.len());
        let projection = render_waveform(
            canvas,
            signal,
            visible.start,
            visible.end,
            &self.waveform_style,
        )?;
        render_overlay(
            canvas,
            &projection,
            signal,
            self.recording.peaks(),
            PeakLabels {
                truth: self.recording.annotations(),
                predicted: self.recording.predictions(),
            },
            &self.palette,
            &self.marker_style,
        );
        Some(projection)
    }

    pub fn render_minimap(&self, canvas: &mut impl Canvas) {
        let peaks = self
            .show_minimap_peaks
            .then(|| self.recording.peaks());
        render_minimap(canvas, self.recording.signal(), peaks, &self.minimap_style);
    }

    pub fn indicator(&self) -> Option<IndicatorGeometry> {
        let len = self.recording.len();
        let width = self.minimap_size.x;
        if len == 0 || width <= 0.0 {
            return None;
        }
        let len = len as f32;
        let window = (self.viewport.window_size() as f32 / len).min(1.0);
        Some(IndicatorGeometry {
            left: self.viewport.position() as f32 / len * width,
            width: window * width,
        })
    }

    /// Main view rendered off-screen at the current canvas size.
    pub fn main_snapshot(&self) -> DrawList {
        let mut list = DrawList::new(self.main_size);
        self.render_main(&mut list);
        list
    }

    pub fn minimap_snapshot(&self) -> DrawList {
        let mut list = DrawList::new(self.minimap_size);
        self.render_minimap(&mut list);
        list
    }
}
