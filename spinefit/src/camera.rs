use crate::Error;
use crate::bounds::{Bounds, Point2};

/// Viewport size in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Rejects zero, negative and non-finite sizes.
    pub fn validated(width: f32, height: f32) -> Result<Self, Error> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Error::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width and height floored at one pixel. Used by every fit computation so that a
    /// collapsed canvas never yields a division by zero.
    pub(crate) fn sanitized(self) -> (f32, f32) {
        let w = if self.width.is_finite() { self.width.max(1.0) } else { 1.0 };
        let h = if self.height.is_finite() { self.height.max(1.0) } else { 1.0 };
        (w, h)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomRange {
    pub min: f32,
    pub max: f32,
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self {
            min: 0.05,
            max: 20.0,
        }
    }
}

impl ZoomRange {
    pub fn new(min: f32, max: f32) -> Result<Self, Error> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min <= self.max)
        {
            return Err(Error::InvalidZoomRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Clamps `zoom` into the range. NaN maps to `max` (the most zoomed-out camera); an
    /// inverted range collapses to `max`.
    pub fn clamp(&self, zoom: f32) -> f32 {
        if zoom.is_nan() || !(self.min <= self.max) {
            return self.max;
        }
        zoom.clamp(self.min, self.max)
    }
}

/// Camera framing for a single set of bounds.
///
/// `zoom` is world units per pixel: larger values show more of the world.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct CameraFit {
    pub zoom: f32,
    pub center_x: f32,
    pub center_y: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

/// Frames `bounds` inside `viewport`.
///
/// `zoom = clamp(max(w * pad / vw, h * pad / vh))`, so the larger relative extent decides.
pub fn fit_camera(
    bounds: Bounds,
    viewport: Viewport,
    padding_ratio: f32,
    zoom_range: ZoomRange,
) -> CameraFit {
    let (vw, vh) = viewport.sanitized();
    let pad = sanitize_padding(padding_ratio);

    let raw = (bounds.width() * pad / vw).max(bounds.height() * pad / vh);
    let zoom = zoom_range.clamp(raw);

    let center = bounds.center();
    CameraFit {
        zoom,
        center_x: center.x,
        center_y: center.y,
        viewport_width: vw,
        viewport_height: vh,
    }
}

/// Non-positive or non-finite padding ratios become 1.
pub(crate) fn sanitize_padding(padding_ratio: f32) -> f32 {
    if padding_ratio.is_finite() && padding_ratio > 0.0 {
        padding_ratio
    } else {
        1.0
    }
}

impl CameraFit {
    /// Pixels per world unit.
    pub fn pixels_per_unit(&self) -> f32 {
        1.0 / self.zoom
    }

    /// Column-major orthographic matrix from world space to clip space (y up).
    pub fn clip_from_world(&self) -> [[f32; 4]; 4] {
        let scale_px = self.pixels_per_unit();
        let sx = 2.0 * scale_px / self.viewport_width;
        let sy = 2.0 * scale_px / self.viewport_height;
        [
            [sx, 0.0, 0.0, 0.0],
            [0.0, sy, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [-self.center_x * sx, -self.center_y * sy, 0.0, 1.0],
        ]
    }

    #[cfg(feature = "glam")]
    pub fn clip_from_world_mat4(&self) -> glam::Mat4 {
        glam::Mat4::from_cols_array_2d(&self.clip_from_world())
    }

    /// World (y up) to screen pixels (origin top-left, y down).
    pub fn world_to_screen(&self, p: Point2) -> Point2 {
        let s = self.pixels_per_unit();
        Point2::new(
            (p.x - self.center_x) * s + 0.5 * self.viewport_width,
            0.5 * self.viewport_height - (p.y - self.center_y) * s,
        )
    }

    pub fn screen_to_world(&self, p: Point2) -> Point2 {
        let z = self.zoom;
        Point2::new(
            (p.x - 0.5 * self.viewport_width) * z + self.center_x,
            (0.5 * self.viewport_height - p.y) * z + self.center_y,
        )
    }

    /// World-space rectangle visible through this camera.
    pub fn visible_bounds(&self) -> Bounds {
        let hw = 0.5 * self.viewport_width * self.zoom;
        let hh = 0.5 * self.viewport_height * self.zoom;
        Bounds::new(
            self.center_x - hw,
            self.center_y - hh,
            self.center_x + hw,
            self.center_y + hh,
        )
    }
}
