/// Smallest width/height a [`Bounds`] may report.
pub const MIN_EXTENT: f32 = 1.0e-3;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f32; 2]> for Point2 {
    fn from(p: [f32; 2]) -> Self {
        Self::new(p[0], p[1])
    }
}

impl From<(f32, f32)> for Point2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(feature = "glam")]
impl From<glam::Vec2> for Point2 {
    fn from(v: glam::Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

#[cfg(feature = "glam")]
impl From<Point2> for glam::Vec2 {
    fn from(p: Point2) -> Self {
        glam::Vec2::new(p.x, p.y)
    }
}

/// Axis-aligned bounding box in world space.
///
/// Values produced by [`compute_bounds`] and [`BoundsBuilder::build`] are always finite and
/// never narrower than [`MIN_EXTENT`] on either axis.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Bounds {
    /// Substituted when no finite point is available.
    pub const DEFAULT: Bounds = Bounds {
        min_x: -100.0,
        min_y: -100.0,
        max_x: 100.0,
        max_y: 100.0,
    };

    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f32 {
        (self.max_x - self.min_x).max(MIN_EXTENT)
    }

    pub fn height(&self) -> f32 {
        (self.max_y - self.min_y).max(MIN_EXTENT)
    }

    pub fn center(&self) -> Point2 {
        // Halve first: `min + max` overflows near f32::MAX.
        Point2::new(
            0.5 * self.min_x + 0.5 * self.max_x,
            0.5 * self.min_y + 0.5 * self.max_y,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }

    /// Finite with `min <= max` on both axes.
    pub fn is_well_formed(&self) -> bool {
        self.is_finite() && self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn contains(&self, p: Point2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Grows every side by `margin` world units. Negative margins shrink, but never past the
    /// center.
    pub fn expanded(&self, margin: f32) -> Bounds {
        let c = self.center();
        let hw = (0.5 * (self.max_x - self.min_x) + margin).max(0.5 * MIN_EXTENT);
        let hh = (0.5 * (self.max_y - self.min_y) + margin).max(0.5 * MIN_EXTENT);
        Bounds::new(c.x - hw, c.y - hh, c.x + hw, c.y + hh)
    }

    /// Widens a zero-area box around its center so both extents are at least [`MIN_EXTENT`].
    ///
    /// Far from the origin the half extent grows to one ulp of the center, so the stored
    /// corners always differ.
    fn clamped(self) -> Bounds {
        let c = self.center();
        let mut out = self;
        if out.max_x - out.min_x < MIN_EXTENT {
            (out.min_x, out.max_x) = widen_around(c.x);
        }
        if out.max_y - out.min_y < MIN_EXTENT {
            (out.min_y, out.max_y) = widen_around(c.y);
        }
        out
    }
}

fn widen_around(c: f32) -> (f32, f32) {
    let half = (0.5 * MIN_EXTENT).max(c.abs() * f32::EPSILON);
    let (lo, hi) = (c - half, c + half);
    if !hi.is_finite() {
        (c - 2.0 * half, c)
    } else if !lo.is_finite() {
        (c, c + 2.0 * half)
    } else {
        (lo, hi)
    }
}

/// Incremental min/max accumulator that skips non-finite points.
#[derive(Copy, Clone, Debug)]
pub struct BoundsBuilder {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
    count: usize,
}

impl Default for BoundsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundsBuilder {
    pub fn new() -> Self {
        Self {
            min_x: f32::INFINITY,
            min_y: f32::INFINITY,
            max_x: f32::NEG_INFINITY,
            max_y: f32::NEG_INFINITY,
            count: 0,
        }
    }

    pub fn include(&mut self, p: Point2) {
        if !p.is_finite() {
            return;
        }
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
        self.count += 1;
    }

    pub fn include_points(&mut self, points: &[Point2]) {
        for p in points {
            self.include(*p);
        }
    }

    /// Accepts an interleaved `x0, y0, x1, y1, ...` buffer. A trailing odd value is ignored.
    pub fn include_flat(&mut self, vertices: &[f32]) {
        for xy in vertices.chunks_exact(2) {
            self.include(Point2::new(xy[0], xy[1]));
        }
    }

    /// Number of finite points accepted so far.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn try_build(&self) -> Option<Bounds> {
        if self.count == 0 {
            return None;
        }
        Some(Bounds::new(self.min_x, self.min_y, self.max_x, self.max_y).clamped())
    }

    /// Bounds of the accepted points, or `default` when there are none.
    ///
    /// A non-finite or inverted `default` is replaced by [`Bounds::DEFAULT`]; a zero-area one
    /// is widened.
    pub fn build_or(&self, default: Bounds) -> Bounds {
        match self.try_build() {
            Some(b) => b,
            None => {
                let default = sanitize_default(default);
                log::debug!("no finite vertices; substituting default bounds {default:?}");
                default
            }
        }
    }

    pub fn build(&self) -> Bounds {
        self.build_or(Bounds::DEFAULT)
    }
}

/// Union bounding box over every finite point of every vertex set.
///
/// Returns [`Bounds::DEFAULT`] when there is no finite point at all.
pub fn compute_bounds<S: AsRef<[Point2]>>(vertex_sets: &[S]) -> Bounds {
    compute_bounds_or(vertex_sets, Bounds::DEFAULT)
}

/// Like [`compute_bounds`], with a caller-chosen fallback box (see [`BoundsBuilder::build_or`]).
pub fn compute_bounds_or<S: AsRef<[Point2]>>(vertex_sets: &[S], default: Bounds) -> Bounds {
    let mut builder = BoundsBuilder::new();
    for set in vertex_sets {
        builder.include_points(set.as_ref());
    }
    builder.build_or(default)
}

/// Bounds over interleaved `x, y` world-vertex buffers, one per drawable.
pub fn compute_bounds_flat<S: AsRef<[f32]>>(vertex_buffers: &[S]) -> Bounds {
    let mut builder = BoundsBuilder::new();
    for buf in vertex_buffers {
        builder.include_flat(buf.as_ref());
    }
    builder.build()
}

pub(crate) fn sanitize_default(default: Bounds) -> Bounds {
    if !default.is_well_formed() {
        return Bounds::DEFAULT;
    }
    default.clamped()
}
