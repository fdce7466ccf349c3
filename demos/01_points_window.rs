//! 01 - Points Window
//!
//! The simplest Whorl demo: open a window and run the accelerated backend on
//! a small point cloud, without the backend cycling or config layering of
//! the full binary.
//!
//! Run with: `cargo run --example 01_points_window`

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use whorl_points::{PointCloud, Viewport};
use whorl_render::{create_backend, BackendSettings, RenderBackend, RenderContext, ViewMode};

/// Application state
struct App {
    cloud: PointCloud,
    viewport: Option<Viewport>,
    window: Option<std::sync::Arc<Window>>,
    render_context: Option<RenderContext>,
    backend: Option<Box<dyn RenderBackend>>,
}

impl App {
    fn new() -> Self {
        Self {
            cloud: PointCloud::new(10_000),
            viewport: None,
            window: None,
            render_context: None,
            backend: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = std::sync::Arc::new(
                event_loop
                    .create_window(
                        Window::default_attributes()
                            .with_title("Whorl demo - GPU points")
                            .with_inner_size(winit::dpi::LogicalSize::new(800, 600)),
                    )
                    .expect("Failed to create window"),
            );

            let render_context = pollster::block_on(RenderContext::new(window.clone()));
            let size = window.inner_size();
            let viewport = Viewport::from_window(size.width, size.height);
            let backend = create_backend(
                ViewMode::Accelerated,
                &render_context,
                &BackendSettings::default(),
            );

            self.viewport = Some(viewport);
            self.render_context = Some(render_context);
            self.backend = Some(backend);
            self.window = Some(window);

            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(physical_size) => {
                if let Some(ctx) = &mut self.render_context {
                    ctx.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.cloud.advance();
                if let (Some(ctx), Some(backend), Some(viewport)) =
                    (&self.render_context, &mut self.backend, &self.viewport)
                {
                    if let Err(e) = backend.draw(ctx, self.cloud.points(), viewport) {
                        log::warn!("Draw failed: {}", e);
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn main() {
    env_logger::init();

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
