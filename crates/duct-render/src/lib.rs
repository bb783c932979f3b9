pub mod app;
pub mod error;
pub mod geometry_view;
pub mod plot_view;
pub mod renderer;
pub mod ui;

use app::App;
use duct_core::Analysis;
use winit::event_loop::EventLoop;

pub use error::RenderError;

/// Open the chart window and block until it is closed.
pub fn run(analysis: Analysis) -> Result<(), RenderError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(analysis);
    event_loop.run_app(&mut app)?;
    app.finish()
}
