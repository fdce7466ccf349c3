//! Render backend abstraction
//!
//! Every backend consumes the same point set and viewport and positions
//! points with the shared polar mapping ([`whorl_points::PolarPoint::to_cartesian`]).
//! Backends differ only in how the frame is produced: declarative SVG
//! markup, imperative pixel painting, or an instanced GPU layer.

mod accelerated;
mod raster;
mod vector;

pub use accelerated::AcceleratedBackend;
pub use raster::RasterBackend;
pub use vector::VectorBackend;

use whorl_points::{PolarPoint, Viewport};

use crate::context::RenderContext;
use crate::mode::ViewMode;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window moved, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// SVG build or rasterization failed
    Svg(String),
    /// Other surface or pipeline error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Svg(msg) => write!(f, "SVG error: {}", msg),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Per-variant appearance settings, resolved from application config.
#[derive(Clone, Debug)]
pub struct BackendSettings {
    /// Clear color, RGBA in [0, 1], shared by every variant
    pub background: [f32; 4],
    /// Fill color for the vector variant (RGBA8)
    pub vector_color: [u8; 4],
    /// Fill color for the raster variant (RGBA8)
    pub raster_color: [u8; 4],
    /// Fill color for the accelerated variant (RGBA8)
    pub accelerated_color: [u8; 4],
    /// Circle radius in pixels for the CPU variants
    pub point_radius: f32,
    /// Accelerated variant: multiplier applied to the base point radius
    pub radius_scale: f32,
    /// Accelerated variant: lower clamp on the on-screen radius in pixels
    pub radius_min_pixels: f32,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            background: [1.0, 1.0, 1.0, 1.0],
            vector_color: [0xed, 0x3e, 0x15, 0xff],
            raster_color: [0xfc, 0xa1, 0x06, 0xff],
            accelerated_color: [26, 142, 156, 255],
            point_radius: 2.0,
            radius_scale: 2.0,
            radius_min_pixels: 0.25,
        }
    }
}

/// A renderer for the animated point set.
///
/// `draw` presents one frame to the window surface. An empty point set is a
/// no-op: nothing is cleared, drawn, or presented.
pub trait RenderBackend {
    /// The mode this backend implements.
    fn mode(&self) -> ViewMode;

    /// Draw the current point set.
    fn draw(
        &mut self,
        ctx: &RenderContext,
        points: &[PolarPoint],
        viewport: &Viewport,
    ) -> Result<(), RenderError>;
}

/// Create the backend for `mode`, setting up its GPU resources.
///
/// Backends are constructed on activation and dropped on switch, so each
/// variant's resources live only while it is the active one.
pub fn create_backend(
    mode: ViewMode,
    ctx: &RenderContext,
    settings: &BackendSettings,
) -> Box<dyn RenderBackend> {
    log::info!("Creating {} backend", mode.label());
    match mode {
        ViewMode::Vector => Box::new(VectorBackend::new(ctx, settings.clone())),
        ViewMode::Raster => Box::new(RasterBackend::new(ctx, settings.clone())),
        ViewMode::Accelerated => Box::new(AcceleratedBackend::new(ctx, settings.clone())),
    }
}

/// Map a surface acquire failure onto [`RenderError`].
pub(crate) fn acquire_frame(ctx: &RenderContext) -> Result<wgpu::SurfaceTexture, RenderError> {
    match ctx.surface.get_current_texture() {
        Ok(frame) => Ok(frame),
        Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
            Err(RenderError::SurfaceLost)
        }
        Err(wgpu::SurfaceError::OutOfMemory) => Err(RenderError::OutOfMemory),
        Err(e) => Err(RenderError::Other(format!("{:?}", e))),
    }
}

/// Background color as a wgpu clear color.
pub(crate) fn wgpu_clear_color(rgba: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: rgba[0] as f64,
        g: rgba[1] as f64,
        b: rgba[2] as f64,
        a: rgba[3] as f64,
    }
}

/// Background color for CPU pixel buffers.
pub(crate) fn pixmap_clear_color(rgba: [f32; 4]) -> resvg::tiny_skia::Color {
    resvg::tiny_skia::Color::from_rgba(
        rgba[0].clamp(0.0, 1.0),
        rgba[1].clamp(0.0, 1.0),
        rgba[2].clamp(0.0, 1.0),
        rgba[3].clamp(0.0, 1.0),
    )
    .unwrap_or(resvg::tiny_skia::Color::WHITE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use whorl_points::Viewport;

    // The three backends must agree on where a point lands. The reference
    // point (radius 0.5, theta 0, size 100) maps to (50, 0) from center.
    #[test]
    fn test_position_mapping_consistent_across_backends() {
        let viewport = Viewport::from_window(200, 200);
        let points = [PolarPoint::new(0.5, 0.0)];
        let [cx, cy] = viewport.center();

        // Accelerated: instance positions are center-relative
        let instances = accelerated::build_instances(&points, &viewport);
        assert_eq!(instances.len(), 1);
        let [ix, iy] = instances[0].position;
        assert!((ix - 50.0).abs() < 1e-4);
        assert!(iy.abs() < 1e-4);

        // Vector: the circle element carries the same center-relative offsets
        let markup = vector::svg_document(&points, &viewport, [255, 0, 0, 255], 2.0);
        assert!(markup.contains("cx=\"50\""), "markup was: {}", markup);
        assert!(markup.contains("cy=\"0\""), "markup was: {}", markup);

        // Raster: the painted pixel sits at center + (50, 0)
        let mut pixmap = resvg::tiny_skia::Pixmap::new(200, 200).unwrap();
        raster::paint_points(&mut pixmap, &points, &viewport, [0, 0, 255, 255], 2.0);
        let px = pixmap.pixel((cx + 50.0) as u32, cy as u32).unwrap();
        assert_eq!(px.blue(), 255);
    }

    #[test]
    fn test_settings_defaults() {
        let settings = BackendSettings::default();
        assert_eq!(settings.radius_scale, 2.0);
        assert_eq!(settings.radius_min_pixels, 0.25);
        assert_eq!(settings.point_radius, 2.0);
        assert_eq!(settings.accelerated_color, [26, 142, 156, 255]);
    }
}
