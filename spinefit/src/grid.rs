use crate::bounds::{Bounds, Point2};
use crate::camera::{Viewport, sanitize_padding};

/// Column/row counts of a near-square grid, derived from the item count only.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDims {
    pub cols: usize,
    pub rows: usize,
}

impl GridDims {
    /// `cols = ceil(sqrt(n))`, `rows = ceil(n / cols)`. Zero items yield a 0x0 grid.
    pub fn for_count(n: usize) -> Self {
        if n == 0 {
            return Self { cols: 0, rows: 0 };
        }
        let mut cols = (n as f64).sqrt().ceil() as usize;
        // f64 sqrt may land one off for large n.
        while cols > 1 && (cols - 1) * (cols - 1) >= n {
            cols -= 1;
        }
        while cols * cols < n {
            cols += 1;
        }
        let rows = n.div_ceil(cols);
        Self { cols, rows }
    }

    /// Row-major cell for item `index`.
    pub fn cell_of(&self, index: usize) -> (usize, usize) {
        if self.cols == 0 {
            return (0, 0);
        }
        (index % self.cols, index / self.cols)
    }
}

/// Per-shape transform into viewport space: `screen = world * scale + translate`.
///
/// Viewport space has its origin at the top-left corner; the y axis is not flipped.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct GridPlacement {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl GridPlacement {
    pub fn apply(&self, p: Point2) -> Point2 {
        Point2::new(
            p.x * self.scale + self.translate_x,
            p.y * self.scale + self.translate_y,
        )
    }
}

/// Anything that carries its own bounds can be laid out.
pub trait HasBounds {
    fn bounds(&self) -> Bounds;
}

impl HasBounds for Bounds {
    fn bounds(&self) -> Bounds {
        *self
    }
}

/// Full grid layout result.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    pub dims: GridDims,
    pub cell_width: f32,
    pub cell_height: f32,
    pub placements: Vec<GridPlacement>,
}

/// Tiles `shapes` row-major into a `cols x rows` grid over `viewport`.
///
/// `placements[i]` belongs to `shapes[i]`, and depends only on that shape's bounds and the
/// shared item count.
pub fn layout_grid<S: HasBounds>(
    shapes: &[S],
    viewport: Viewport,
    padding_ratio: f32,
) -> Vec<GridPlacement> {
    layout_grid_full(shapes, viewport, padding_ratio).placements
}

pub fn layout_grid_full<S: HasBounds>(
    shapes: &[S],
    viewport: Viewport,
    padding_ratio: f32,
) -> GridLayout {
    let dims = GridDims::for_count(shapes.len());
    if shapes.is_empty() {
        return GridLayout {
            dims,
            cell_width: 0.0,
            cell_height: 0.0,
            placements: Vec::new(),
        };
    }

    let (vw, vh) = viewport.sanitized();
    let pad = sanitize_padding(padding_ratio);
    let cell_w = vw / dims.cols as f32;
    let cell_h = vh / dims.rows as f32;

    let placements = shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| place_in_cell(shape.bounds(), dims.cell_of(i), cell_w, cell_h, pad))
        .collect();

    GridLayout {
        dims,
        cell_width: cell_w,
        cell_height: cell_h,
        placements,
    }
}

fn place_in_cell(
    bounds: Bounds,
    (col, row): (usize, usize),
    cell_w: f32,
    cell_h: f32,
    pad: f32,
) -> GridPlacement {
    let scale = (cell_w / bounds.width()).min(cell_h / bounds.height()) * pad;
    let cell_cx = (col as f32 + 0.5) * cell_w;
    let cell_cy = (row as f32 + 0.5) * cell_h;
    let c = bounds.center();
    GridPlacement {
        scale,
        translate_x: cell_cx - c.x * scale,
        translate_y: cell_cy - c.y * scale,
    }
}
