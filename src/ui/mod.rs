//! # padscope user interface
//!
//! The window is a single immediate-mode frame: every repaint clears the
//! surface and redraws the panel, the per-device visuals and the status text
//! from the live device state.
//!
//! ## Frame cycle
//!
//! ```text
//! raw input ──► ViewerApp::update ──► InputSource::poll_events ──► ViewerSession::handle_event
//!                      │
//!                      ├──► primary click ──► ViewerSession::handle_click (invert Y)
//!                      └──► ViewerSession::render_frame ──► EguiCanvas ──► egui::Painter
//! ```
//!
//! Repaints are requested at the configured frame rate so the sticks keep
//! moving even when the window receives no OS events.
//!
//! ## Modules
//! - [`canvas`] - drawing primitives and the egui binding
//! - [`session`] - session state, event dispatch and frame layout
//! - [`status`] - status text and the indentation-scoped text cursor
//! - [`toggle`] - the debounced invert-Y checkbox
//! - [`widgets`] - stick plot, trigger gauge and button row
//! - [`common`] - fixed colors

pub mod canvas;
pub mod common;
pub mod session;
pub mod status;
pub mod toggle;
pub mod widgets;

use chrono::Local;
use eframe::egui::{self, Frame};
use tracing::debug;

use crate::controller::InputSource;
use crate::mapping::ScreenPoint;

use self::canvas::EguiCanvas;
use self::session::ViewerSession;

/// eframe application owning the input source and the viewer session.
pub struct ViewerApp<S: InputSource> {
    source: S,
    session: ViewerSession,
}

impl<S: InputSource> ViewerApp<S> {
    pub fn new(_cc: &eframe::CreationContext<'_>, source: S, session: ViewerSession) -> Self {
        Self { source, session }
    }

    fn primary_click(ctx: &egui::Context) -> Option<ScreenPoint> {
        ctx.input(|input| {
            if input.pointer.primary_pressed() {
                input
                    .pointer
                    .interact_pos()
                    .map(|pos| ScreenPoint::new(pos.x.round() as i32, pos.y.round() as i32))
            } else {
                None
            }
        })
    }
}

impl<S: InputSource> eframe::App for ViewerApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint_after(self.session.config().repaint_interval());

        self.session.pump(&mut self.source);

        if let Some(point) = Self::primary_click(ctx) {
            debug!("Primary click at ({}, {})", point.x, point.y);
            self.session.handle_click(point, Local::now());
        }

        egui::CentralPanel::default()
            .frame(Frame::NONE)
            .show(ctx, |ui| {
                let mut canvas = EguiCanvas::new(ui.painter());
                self.session.render_frame(&self.source, &mut canvas);
            });
    }
}
