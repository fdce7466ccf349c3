//! Vector (SVG) backend
//!
//! Rebuilds the full SVG document every frame, one `<circle>` element per
//! point, then rasterizes it for presentation. Deliberately naive: the point
//! of this variant is to show what per-frame declarative markup costs
//! against the raster and GPU variants.

use std::fmt::Write as _;

use whorl_points::{PolarPoint, Viewport};

use crate::backend::{pixmap_clear_color, wgpu_clear_color, BackendSettings, RenderBackend, RenderError};
use crate::blit::BlitPipeline;
use crate::context::RenderContext;
use crate::mode::ViewMode;

pub struct VectorBackend {
    blit: BlitPipeline,
    settings: BackendSettings,
    options: usvg::Options<'static>,
}

impl VectorBackend {
    pub fn new(ctx: &RenderContext, settings: BackendSettings) -> Self {
        Self {
            blit: BlitPipeline::new(&ctx.device, ctx.config.format),
            settings,
            options: usvg::Options::default(),
        }
    }
}

/// Build the SVG markup for one frame.
///
/// One circle element per point, positioned with the shared polar mapping,
/// grouped under a translation to the viewport center.
pub fn svg_document(
    points: &[PolarPoint],
    viewport: &Viewport,
    fill: [u8; 4],
    radius: f32,
) -> String {
    let [cx, cy] = viewport.center();
    let mut doc = String::with_capacity(128 + points.len() * 48);

    let _ = write!(
        doc,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = viewport.width,
        h = viewport.height,
    );
    let _ = write!(doc, "<g transform=\"translate({cx} {cy})\" fill=\"#{:02x}{:02x}{:02x}\">", fill[0], fill[1], fill[2]);

    for point in points {
        let [x, y] = point.to_cartesian(viewport.size);
        let _ = write!(doc, "<circle cx=\"{x}\" cy=\"{y}\" r=\"{radius}\"/>");
    }

    doc.push_str("</g></svg>");
    doc
}

impl RenderBackend for VectorBackend {
    fn mode(&self) -> ViewMode {
        ViewMode::Vector
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

        let markup = svg_document(
            points,
            viewport,
            self.settings.vector_color,
            self.settings.point_radius,
        );
        let tree = usvg::Tree::from_str(&markup, &self.options)
            .map_err(|e| RenderError::Svg(e.to_string()))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(viewport.width, viewport.height)
            .ok_or_else(|| RenderError::Svg("failed to allocate pixmap".to_string()))?;
        pixmap.fill(pixmap_clear_color(self.settings.background));
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        self.blit.present(
            ctx,
            viewport.width,
            viewport.height,
            pixmap.data(),
            wgpu_clear_color(self.settings.background),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_point_set_yields_no_circles() {
        let viewport = Viewport::from_window(100, 100);
        let markup = svg_document(&[], &viewport, [255, 0, 0, 255], 2.0);
        assert!(!markup.contains("<circle"));
    }

    #[test]
    fn test_one_circle_per_point() {
        let viewport = Viewport::from_window(100, 100);
        let points = vec![
            PolarPoint::new(0.1, 0.0),
            PolarPoint::new(0.5, 120.0),
            PolarPoint::new(0.9, 240.0),
        ];
        let markup = svg_document(&points, &viewport, [255, 0, 0, 255], 2.0);
        assert_eq!(markup.matches("<circle").count(), 3);
    }

    #[test]
    fn test_fill_color_is_hex_encoded() {
        let viewport = Viewport::from_window(100, 100);
        let markup = svg_document(
            &[PolarPoint::new(0.5, 0.0)],
            &viewport,
            [0xed, 0x3e, 0x15, 0xff],
            2.0,
        );
        assert!(markup.contains("fill=\"#ed3e15\""));
    }

    #[test]
    fn test_markup_parses_as_svg() {
        let viewport = Viewport::from_window(100, 100);
        let markup = svg_document(
            &[PolarPoint::new(0.5, 45.0), PolarPoint::new(0.25, 300.0)],
            &viewport,
            [252, 161, 6, 255],
            2.0,
        );
        let options = usvg::Options::default();
        assert!(usvg::Tree::from_str(&markup, &options).is_ok());
    }

    #[test]
    fn test_group_is_translated_to_viewport_center() {
        let viewport = Viewport::from_window(300, 200);
        let markup = svg_document(&[PolarPoint::new(0.5, 0.0)], &viewport, [0, 0, 0, 255], 2.0);
        assert!(markup.contains("translate(150 100)"));
    }
}
