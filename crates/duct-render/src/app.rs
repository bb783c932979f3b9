// ApplicationHandler, event loop and frame orchestration.

use duct_core::Analysis;
use egui_winit_vulkano::{Gui, GuiConfig};
use tracing::{debug, error};
use vulkano::sync::GpuFuture;
use winit::{
    application::ApplicationHandler, event::WindowEvent, event_loop::ActiveEventLoop,
    window::WindowId,
};

use crate::{geometry_view, plot_view, renderer::Renderer, ui, ui::UiState, RenderError};

pub struct App {
    renderer: Option<Renderer>,
    gui: Option<Gui>,
    analysis: Analysis,
    ui_state: UiState,
    /// Set when window or GPU setup fails; the event loop exits right after.
    failure: Option<RenderError>,
}

impl App {
    pub fn new(analysis: Analysis) -> Self {
        let ui_state = UiState::for_analysis(&analysis);
        Self {
            renderer: None,
            gui: None,
            analysis,
            ui_state,
            failure: None,
        }
    }

    /// Consume the app after the event loop returns.
    pub fn finish(self) -> Result<(), RenderError> {
        match self.failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        let renderer = match Renderer::new(event_loop) {
            Ok(r) => r,
            Err(e) => {
                error!("viewer setup failed: {e}");
                self.failure = Some(e);
                event_loop.exit();
                return;
            }
        };

        let gui = Gui::new(
            event_loop,
            renderer.surface.clone(),
            renderer.queue.clone(),
            renderer.swapchain_format(),
            GuiConfig {
                is_overlay: false,
                ..Default::default()
            },
        );

        renderer.window.request_redraw();
        self.renderer = Some(renderer);
        self.gui = Some(gui);
        debug!("viewer ready");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gui) = self.gui.as_mut() {
            gui.update(&event);
        }

        match event {
            WindowEvent::CloseRequested => {
                debug!("viewer closed");
                event_loop.exit();
            }
            WindowEvent::Resized(_) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.invalidate_swapchain();
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
                return;
            }
            _ => {}
        }

        // Input may have changed egui state.
        if let Some(renderer) = self.renderer.as_ref() {
            renderer.window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Only repaint on window events so the loop sleeps when idle.
    }
}

impl App {
    fn render_frame(&mut self) {
        let (Some(renderer), Some(gui)) = (self.renderer.as_mut(), self.gui.as_mut()) else {
            return;
        };

        let Some((image_index, acquire_future)) = renderer.begin_frame() else {
            // Skipped frame: repaint as soon as the swapchain can be rebuilt.
            if renderer.needs_retry() {
                renderer.window.request_redraw();
            }
            return;
        };
        let before_future = renderer.take_previous_frame_end().join(acquire_future);

        let analysis = &self.analysis;
        let ui_state = &mut self.ui_state;
        gui.immediate_ui(|gui| {
            let ctx = gui.context();
            geometry_view::draw_duct(&ctx, &analysis.ports);
            ui::draw_panel(&ctx, analysis, ui_state);
            plot_view::draw_velocity_plot(&ctx, analysis, ui_state);
        });

        let image_view = renderer.image_views[image_index as usize].clone();
        let after_future = gui.draw_on_image(before_future, image_view);
        let final_future = renderer.present(after_future, image_index);
        renderer.end_frame(final_future);
        if renderer.needs_retry() {
            renderer.window.request_redraw();
        }
    }
}
