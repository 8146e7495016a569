//! Posed drawables that can report their world-space vertices.
//!
//! The skeletal runtime owns bones and attachments; this module only needs the affine world
//! transform of each bone and the attachment geometry, so callers copy those out of whatever
//! runtime they drive.

use crate::bounds::{Bounds, BoundsBuilder, Point2};

/// Affine bone world transform: `world = [a b; c d] * local + (world_x, world_y)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct BoneTransform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub world_x: f32,
    pub world_y: f32,
}

impl Default for BoneTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl BoneTransform {
    pub const IDENTITY: BoneTransform = BoneTransform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        world_x: 0.0,
        world_y: 0.0,
    };

    pub fn from_translation(x: f32, y: f32) -> Self {
        Self {
            world_x: x,
            world_y: y,
            ..Self::IDENTITY
        }
    }

    /// Rotation in degrees (counter-clockwise) followed by a non-uniform scale.
    pub fn from_rotation_scale(x: f32, y: f32, rotation: f32, scale_x: f32, scale_y: f32) -> Self {
        let r = rotation.to_radians();
        let (sin, cos) = r.sin_cos();
        Self {
            a: cos * scale_x,
            b: -sin * scale_y,
            c: sin * scale_x,
            d: cos * scale_y,
            world_x: x,
            world_y: y,
        }
    }

    pub fn apply(&self, x: f32, y: f32) -> Point2 {
        Point2::new(
            self.a * x + self.b * y + self.world_x,
            self.c * x + self.d * y + self.world_y,
        )
    }
}

/// Capability shared by every posed drawable: write the current world-space vertices.
pub trait HasWorldVertices {
    /// Appends this shape's world vertices to `out`.
    fn world_vertices(&self, out: &mut Vec<Point2>);

    fn world_bounds(&self) -> Bounds {
        let mut scratch = Vec::new();
        self.world_vertices(&mut scratch);
        let mut builder = BoundsBuilder::new();
        builder.include_points(&scratch);
        builder.build()
    }
}

/// A textured quad attachment placed relative to its bone.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionShape {
    pub bone: BoneTransform,
    pub x: f32,
    pub y: f32,
    /// Degrees.
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub width: f32,
    pub height: f32,
}

impl RegionShape {
    /// Quad corners in bone space, ordered BR, BL, UL, UR.
    pub fn local_corners(&self) -> [Point2; 4] {
        let lx = -self.width * 0.5 * self.scale_x;
        let ly = -self.height * 0.5 * self.scale_y;
        let lx2 = self.width * 0.5 * self.scale_x;
        let ly2 = self.height * 0.5 * self.scale_y;

        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let corner = |px: f32, py: f32| {
            Point2::new(px * cos - py * sin + self.x, px * sin + py * cos + self.y)
        };

        [
            corner(lx2, ly),
            corner(lx, ly),
            corner(lx, ly2),
            corner(lx2, ly2),
        ]
    }
}

impl HasWorldVertices for RegionShape {
    fn world_vertices(&self, out: &mut Vec<Point2>) {
        out.extend(
            self.local_corners()
                .iter()
                .map(|p| self.bone.apply(p.x, p.y)),
        );
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexWeight {
    /// Index into [`MeshShape::bones`].
    pub bone: usize,
    pub x: f32,
    pub y: f32,
    pub weight: f32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub enum MeshVertices {
    /// Bone-space positions relative to the slot bone (`bones[0]`).
    Unweighted(Vec<[f32; 2]>),
    Weighted(Vec<Vec<VertexWeight>>),
}

/// A mesh attachment with its current deform offsets.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshShape {
    /// Unweighted meshes use `bones[0]`; weighted meshes index into this list.
    pub bones: Vec<BoneTransform>,
    pub vertices: MeshVertices,
    /// Deform timeline output. Replaces unweighted positions, offsets weighted ones.
    pub deform: Vec<f32>,
}

impl HasWorldVertices for MeshShape {
    fn world_vertices(&self, out: &mut Vec<Point2>) {
        let deform = self.deform.as_slice();
        match &self.vertices {
            MeshVertices::Unweighted(points) => {
                let Some(bone) = self.bones.first() else {
                    return;
                };
                let use_deform = !deform.is_empty() && deform.len() >= points.len() * 2;
                out.extend(points.iter().enumerate().map(|(i, p)| {
                    let (x, y) = if use_deform {
                        (deform[i * 2], deform[i * 2 + 1])
                    } else {
                        (p[0], p[1])
                    };
                    bone.apply(x, y)
                }));
            }
            MeshVertices::Weighted(points) => {
                let mut f = 0usize;
                out.extend(points.iter().map(|weights| {
                    let mut wx = 0.0;
                    let mut wy = 0.0;
                    for w in weights {
                        let dx = deform.get(f).copied().unwrap_or(0.0);
                        let dy = deform.get(f + 1).copied().unwrap_or(0.0);
                        f += 2;
                        let Some(b) = self.bones.get(w.bone) else {
                            continue;
                        };
                        let p = b.apply(w.x + dx, w.y + dy);
                        wx += p.x * w.weight;
                        wy += p.y * w.weight;
                    }
                    Point2::new(wx, wy)
                }));
            }
        }
    }
}

/// Already-posed vertices in an interleaved `x0, y0, x1, y1, ...` buffer, as written by a
/// runtime's `computeWorldVertices`.
#[derive(Copy, Clone, Debug)]
pub struct FlatVertices<'a>(pub &'a [f32]);

impl HasWorldVertices for FlatVertices<'_> {
    fn world_vertices(&self, out: &mut Vec<Point2>) {
        out.extend(
            self.0
                .chunks_exact(2)
                .map(|xy| Point2::new(xy[0], xy[1])),
        );
    }
}

/// The drawable kinds that contribute to skeleton bounds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub enum PosedShape {
    Region(RegionShape),
    Mesh(MeshShape),
}

impl HasWorldVertices for PosedShape {
    fn world_vertices(&self, out: &mut Vec<Point2>) {
        match self {
            PosedShape::Region(r) => r.world_vertices(out),
            PosedShape::Mesh(m) => m.world_vertices(out),
        }
    }
}

impl From<RegionShape> for PosedShape {
    fn from(r: RegionShape) -> Self {
        PosedShape::Region(r)
    }
}

impl From<MeshShape> for PosedShape {
    fn from(m: MeshShape) -> Self {
        PosedShape::Mesh(m)
    }
}

/// Union bounds of all shapes; [`Bounds::DEFAULT`] if none has a finite vertex.
pub fn compute_shape_bounds<S: HasWorldVertices>(shapes: &[S]) -> Bounds {
    compute_shape_bounds_or(shapes, Bounds::DEFAULT)
}

pub fn compute_shape_bounds_or<S: HasWorldVertices>(shapes: &[S], default: Bounds) -> Bounds {
    let mut scratch = Vec::new();
    let mut builder = BoundsBuilder::new();
    for shape in shapes {
        scratch.clear();
        shape.world_vertices(&mut scratch);
        builder.include_points(&scratch);
    }
    builder.build_or(default)
}
