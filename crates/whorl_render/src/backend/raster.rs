//! Raster (canvas) backend
//!
//! Clears a CPU pixel buffer to the background color and imperatively paints
//! one anti-aliased filled circle per point, then presents the buffer.

use resvg::tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};
use whorl_points::{PolarPoint, Viewport};

use crate::backend::{pixmap_clear_color, wgpu_clear_color, BackendSettings, RenderBackend, RenderError};
use crate::blit::BlitPipeline;
use crate::context::RenderContext;
use crate::mode::ViewMode;

pub struct RasterBackend {
    blit: BlitPipeline,
    settings: BackendSettings,
    // Reused between frames; reallocated only if the viewport ever differs.
    pixmap: Option<Pixmap>,
}

impl RasterBackend {
    pub fn new(ctx: &RenderContext, settings: BackendSettings) -> Self {
        Self {
            blit: BlitPipeline::new(&ctx.device, ctx.config.format),
            settings,
            pixmap: None,
        }
    }
}

/// Paint the point set into `pixmap` with the shared polar mapping.
pub fn paint_points(
    pixmap: &mut Pixmap,
    points: &[PolarPoint],
    viewport: &Viewport,
    fill: [u8; 4],
    radius: f32,
) {
    let [cx, cy] = viewport.center();
    let mut paint = Paint::default();
    paint.set_color_rgba8(fill[0], fill[1], fill[2], fill[3]);
    paint.anti_alias = true;

    for point in points {
        let [x, y] = point.to_cartesian(viewport.size);
        if let Some(path) = PathBuilder::from_circle(cx + x, cy + y, radius) {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }
}

impl RenderBackend for RasterBackend {
    fn mode(&self) -> ViewMode {
        ViewMode::Raster
    }

    fn draw(
        &mut self,
        ctx: &RenderContext,
        points: &[PolarPoint],
        viewport: &Viewport,
    ) -> Result<(), RenderError> {
        if points.is_empty() {
            return Ok(());
        }

        let (width, height) = (viewport.width, viewport.height);
        let pixmap = match &mut self.pixmap {
            Some(p) if p.width() == width && p.height() == height => p,
            slot => {
                let p = Pixmap::new(width, height).ok_or_else(|| {
                    RenderError::Other("failed to allocate pixel buffer".to_string())
                })?;
                slot.insert(p)
            }
        };

        pixmap.fill(pixmap_clear_color(self.settings.background));
        paint_points(
            pixmap,
            points,
            viewport,
            self.settings.raster_color,
            self.settings.point_radius,
        );

        self.blit.present(
            ctx,
            width,
            height,
            pixmap.data(),
            wgpu_clear_color(self.settings.background),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_point_set_paints_nothing() {
        let viewport = Viewport::from_window(50, 50);
        let mut pixmap = Pixmap::new(50, 50).unwrap();
        let before = pixmap.data().to_vec();

        paint_points(&mut pixmap, &[], &viewport, [255, 0, 0, 255], 2.0);

        assert_eq!(pixmap.data(), &before[..]);
    }

    #[test]
    fn test_point_is_painted_at_projected_position() {
        let viewport = Viewport::from_window(200, 200);
        let mut pixmap = Pixmap::new(200, 200).unwrap();

        // radius 0.5, theta 0, size 100 -> (50, 0) from center (100, 100)
        paint_points(
            &mut pixmap,
            &[PolarPoint::new(0.5, 0.0)],
            &viewport,
            [255, 0, 0, 255],
            2.0,
        );

        let hit = pixmap.pixel(150, 100).unwrap();
        assert_eq!(hit.red(), 255);

        // Far corner stays untouched
        let miss = pixmap.pixel(10, 190).unwrap();
        assert_eq!(miss.alpha(), 0);
    }

    #[test]
    fn test_zero_radius_is_skipped() {
        let viewport = Viewport::from_window(50, 50);
        let mut pixmap = Pixmap::new(50, 50).unwrap();
        let before = pixmap.data().to_vec();

        paint_points(
            &mut pixmap,
            &[PolarPoint::new(0.5, 0.0)],
            &viewport,
            [255, 0, 0, 255],
            0.0,
        );

        assert_eq!(pixmap.data(), &before[..]);
    }
}
