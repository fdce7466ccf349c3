//! Whorl - animated polar point cloud with swappable render backends
//!
//! 100,000 points spin around the viewport center; a mouse click cycles the
//! renderer between an SVG, a CPU raster, and a GPU instanced backend so the
//! three strategies can be compared on the same dataset.

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use whorl::config::AppConfig;
use whorl::input::{InputAction, InputMapper};
use whorl::systems::{FrameScheduler, SimulationSystem, WindowSystem};
use whorl_points::{PointCloud, Viewport};
use whorl_render::{
    create_backend, BackendSettings, RenderBackend, RenderContext, RenderError, ViewMode,
};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    /// Backend appearance settings resolved from config
    settings: BackendSettings,
    /// Active rendering mode
    mode: ViewMode,
    /// The animated dataset
    cloud: PointCloud,
    /// Viewport derived once from the startup window size
    viewport: Option<Viewport>,
    window: Option<WindowSystem>,
    render_context: Option<RenderContext>,
    backend: Option<Box<dyn RenderBackend>>,
    simulation: SimulationSystem,
    scheduler: FrameScheduler,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let cloud = PointCloud::new(config.simulation.point_count);
        log::info!("Initialized {} points", cloud.len());

        let settings = config.rendering.to_backend_settings();

        Self {
            config,
            settings,
            mode: ViewMode::Vector,
            cloud,
            viewport: None,
            window: None,
            render_context: None,
            backend: None,
            simulation: SimulationSystem::new(),
            scheduler: FrameScheduler::new(),
        }
    }

    /// Advance to the next backend, tearing the current one down first.
    fn cycle_backend(&mut self) {
        if let Some(ctx) = &self.render_context {
            self.mode = self.mode.next();

            // Drop the old backend before constructing the next so its GPU
            // resources are released first.
            self.backend = None;
            self.backend = Some(create_backend(self.mode, ctx, &self.settings));

            if let Some(window) = &self.window {
                window.update_title(self.mode.label(), self.cloud.len());
            }
            log::info!("Switched to {} backend", self.mode.label());
        }
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::CycleBackend => self.cycle_backend(),
            InputAction::Exit => {
                self.scheduler.token().cancel();
                event_loop.exit();
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::ReseedPoints => {
                self.cloud = PointCloud::new(self.config.simulation.point_count);
                log::info!("Reseeded {} points", self.cloud.len());
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match WindowSystem::create(event_loop, &self.config.window) {
                Ok(window) => window,
                Err(e) => {
                    log::error!("{}", e);
                    event_loop.exit();
                    return;
                }
            };

            let render_context = pollster::block_on(RenderContext::with_vsync(
                window.window().clone(),
                self.config.window.vsync,
            ));

            // The viewport is derived once from the startup size and kept
            // through resizes.
            let size = window.window().inner_size();
            let viewport = Viewport::from_window(size.width, size.height);
            log::info!(
                "Viewport {}x{} (radial scale {})",
                viewport.width,
                viewport.height,
                viewport.size
            );

            let backend = create_backend(self.mode, &render_context, &self.settings);
            window.update_title(self.mode.label(), self.cloud.len());

            self.viewport = Some(viewport);
            self.render_context = Some(render_context);
            self.backend = Some(backend);
            self.window = Some(window);

            if let Some(window) = &self.window {
                self.scheduler.schedule(window.window());
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.scheduler.token().cancel();
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                // The surface follows the window; the viewport mapping stays
                // at its startup dimensions.
                if let Some(ctx) = &mut self.render_context {
                    ctx.resize(physical_size);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        self.handle_action(action, event_loop);
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(action) = InputMapper::map_mouse_button(button, state) {
                    self.handle_action(action, event_loop);
                }
            }

            WindowEvent::RedrawRequested => {
                if !self.scheduler.is_active() {
                    return;
                }

                let result = self.simulation.update(&mut self.cloud);
                if self.config.debug.log_frame_stats
                    && result.frame_index % self.config.debug.frame_stats_interval.max(1) as u64
                        == 0
                {
                    log::info!(
                        "frame {}: {:.2} ms ({})",
                        result.frame_index,
                        result.frame_time * 1000.0,
                        self.mode.label()
                    );
                }

                if let (Some(ctx), Some(backend), Some(viewport)) =
                    (&self.render_context, &mut self.backend, &self.viewport)
                {
                    match backend.draw(ctx, self.cloud.points(), viewport) {
                        Ok(()) => {}
                        Err(RenderError::SurfaceLost) => {
                            if let Some(ctx) = &mut self.render_context {
                                ctx.resize(ctx.size);
                            }
                        }
                        Err(RenderError::OutOfMemory) => {
                            log::error!("GPU out of memory, exiting");
                            event_loop.exit();
                            return;
                        }
                        Err(e) => {
                            log::warn!("Draw failed: {}", e);
                        }
                    }
                }

                // Schedule the next frame unless teardown cancelled the loop
                if let Some(window) = &self.window {
                    self.scheduler.schedule(window.window());
                }
            }

            _ => {}
        }
    }
}

fn main() {
    // Load configuration before logger init so the log level can come from it
    let (config, config_err) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    env_logger::Builder::new()
        .parse_filters(&config.debug.log_level)
        .init();

    if let Some(e) = config_err {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    log::info!("Starting Whorl");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app).expect("Event loop error");
}
