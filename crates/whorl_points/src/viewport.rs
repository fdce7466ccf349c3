//! Viewport mapping

/// Drawing region derived once from the window's inner size at startup.
///
/// Resizing the window does not re-derive the viewport; the mapping stays at
/// its startup dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Radial scale: half the smaller window dimension
    pub size: f32,
}

impl Viewport {
    /// Derive the viewport from window dimensions.
    pub fn from_window(width: u32, height: u32) -> Self {
        let size = width.min(height) as f32 / 2.0;
        Self {
            width,
            height,
            size,
        }
    }

    /// Center of the point disc in pixel coordinates.
    ///
    /// Horizontally centered; vertically the disc hugs the top edge on wide
    /// windows, so the center sits `size` pixels from the top.
    pub fn center(&self) -> [f32; 2] {
        [self.width as f32 / 2.0, self.size]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_is_half_smaller_dimension() {
        let v = Viewport::from_window(1280, 720);
        assert_eq!(v.size, 360.0);

        let v = Viewport::from_window(600, 800);
        assert_eq!(v.size, 300.0);
    }

    #[test]
    fn test_center_for_wide_window() {
        let v = Viewport::from_window(1280, 720);
        assert_eq!(v.center(), [640.0, 360.0]);
    }

    #[test]
    fn test_center_for_square_window() {
        let v = Viewport::from_window(500, 500);
        assert_eq!(v.center(), [250.0, 250.0]);
    }
}
