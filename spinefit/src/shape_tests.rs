use crate::{
    BoneTransform, Bounds, FlatVertices, HasWorldVertices, MeshShape, MeshVertices, Point2,
    PosedShape, RegionShape, VertexWeight, compute_shape_bounds,
    compute_shape_bounds_or,
};

fn assert_approx(actual: f32, expected: f32) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= 1.0e-4,
        "expected {expected}, got {actual} (diff {diff})"
    );
}

fn assert_point(actual: Point2, x: f32, y: f32) {
    assert_approx(actual.x, x);
    assert_approx(actual.y, y);
}

fn region(bone: BoneTransform, rotation: f32) -> RegionShape {
    RegionShape {
        bone,
        x: 0.0,
        y: 0.0,
        rotation,
        scale_x: 1.0,
        scale_y: 1.0,
        width: 20.0,
        height: 10.0,
    }
}

#[test]
fn region_corners_follow_br_bl_ul_ur_order() {
    let shape = region(BoneTransform::from_translation(100.0, 50.0), 0.0);
    let mut out = Vec::new();
    shape.world_vertices(&mut out);
    assert_eq!(out.len(), 4);
    assert_point(out[0], 110.0, 45.0);
    assert_point(out[1], 90.0, 45.0);
    assert_point(out[2], 90.0, 55.0);
    assert_point(out[3], 110.0, 55.0);
}

#[test]
fn region_rotation_swaps_extents() {
    let shape = region(BoneTransform::IDENTITY, 90.0);
    let b = shape.world_bounds();
    assert_approx(b.width(), 10.0);
    assert_approx(b.height(), 20.0);
}

#[test]
fn region_uses_bone_rotation_and_scale() {
    let bone = BoneTransform::from_rotation_scale(0.0, 0.0, 90.0, 2.0, 1.0);
    let shape = region(bone, 0.0);
    let b = shape.world_bounds();
    // Local x (width 20) is scaled by 2 and then rotated onto the y axis.
    assert_approx(b.height(), 40.0);
    assert_approx(b.width(), 10.0);
}

#[test]
fn unweighted_mesh_applies_slot_bone() {
    let mesh = MeshShape {
        bones: vec![BoneTransform::from_translation(5.0, -5.0)],
        vertices: MeshVertices::Unweighted(vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]]),
        deform: Vec::new(),
    };
    let mut out = Vec::new();
    mesh.world_vertices(&mut out);
    assert_point(out[0], 5.0, -5.0);
    assert_point(out[2], 15.0, 5.0);
}

#[test]
fn unweighted_mesh_deform_replaces_positions() {
    let mesh = MeshShape {
        bones: vec![BoneTransform::IDENTITY],
        vertices: MeshVertices::Unweighted(vec![[0.0, 0.0], [1.0, 1.0]]),
        deform: vec![-3.0, -3.0, 7.0, 2.0],
    };
    let b = mesh.world_bounds();
    assert_eq!(b, Bounds::new(-3.0, -3.0, 7.0, 2.0));
}

#[test]
fn short_deform_buffer_is_ignored_for_unweighted_meshes() {
    let mesh = MeshShape {
        bones: vec![BoneTransform::IDENTITY],
        vertices: MeshVertices::Unweighted(vec![[0.0, 0.0], [4.0, 4.0]]),
        deform: vec![100.0],
    };
    assert_eq!(mesh.world_bounds(), Bounds::new(0.0, 0.0, 4.0, 4.0));
}

#[test]
fn weighted_mesh_blends_bones() {
    let mesh = MeshShape {
        bones: vec![
            BoneTransform::from_translation(0.0, 0.0),
            BoneTransform::from_translation(10.0, 0.0),
        ],
        vertices: MeshVertices::Weighted(vec![vec![
            VertexWeight {
                bone: 0,
                x: 0.0,
                y: 2.0,
                weight: 0.5,
            },
            VertexWeight {
                bone: 1,
                x: 0.0,
                y: 2.0,
                weight: 0.5,
            },
        ]]),
        deform: vec![0.0, 0.0, 0.0, 2.0],
    };
    let mut out = Vec::new();
    mesh.world_vertices(&mut out);
    assert_eq!(out.len(), 1);
    // (0,2)*0.5 + (10,4)*0.5
    assert_point(out[0], 5.0, 3.0);
}

#[test]
fn weighted_mesh_skips_missing_bones() {
    let mesh = MeshShape {
        bones: vec![BoneTransform::IDENTITY],
        vertices: MeshVertices::Weighted(vec![vec![
            VertexWeight {
                bone: 7,
                x: 50.0,
                y: 50.0,
                weight: 0.5,
            },
            VertexWeight {
                bone: 0,
                x: 2.0,
                y: 4.0,
                weight: 0.5,
            },
        ]]),
        deform: Vec::new(),
    };
    let mut out = Vec::new();
    mesh.world_vertices(&mut out);
    assert_point(out[0], 1.0, 2.0);
}

#[test]
fn mesh_without_bones_contributes_nothing() {
    let mesh = MeshShape {
        bones: Vec::new(),
        vertices: MeshVertices::Unweighted(vec![[1.0, 1.0]]),
        deform: Vec::new(),
    };
    assert_eq!(mesh.world_bounds(), Bounds::DEFAULT);
}

#[test]
fn mixed_shapes_union_and_skip_nan() {
    let shapes: Vec<PosedShape> = vec![
        region(BoneTransform::from_translation(0.0, 0.0), 0.0).into(),
        MeshShape {
            bones: vec![BoneTransform::IDENTITY],
            vertices: MeshVertices::Unweighted(vec![[30.0, 30.0], [f32::NAN, 0.0]]),
            deform: Vec::new(),
        }
        .into(),
    ];
    let b = compute_shape_bounds(&shapes);
    assert_eq!(b, Bounds::new(-10.0, -5.0, 30.0, 30.0));
}

#[test]
fn nan_bone_falls_back_to_default() {
    let bone = BoneTransform {
        world_x: f32::NAN,
        ..BoneTransform::IDENTITY
    };
    let shapes = [PosedShape::Region(region(bone, 0.0))];
    assert_eq!(compute_shape_bounds(&shapes), Bounds::DEFAULT);
}

#[test]
fn malformed_default_is_replaced() {
    let none: [PosedShape; 0] = [];
    let inverted = Bounds::new(10.0, 10.0, -10.0, -10.0);
    assert_eq!(compute_shape_bounds_or(&none, inverted), Bounds::DEFAULT);

    let infinite = Bounds::new(0.0, 0.0, f32::INFINITY, 1.0);
    assert_eq!(compute_shape_bounds_or(&none, infinite), Bounds::DEFAULT);

    let custom = Bounds::new(-4.0, 0.0, 4.0, 9.0);
    assert_eq!(compute_shape_bounds_or(&none, custom), custom);
}

#[test]
fn flat_vertices_read_pairs() {
    let buf = [1.0, 2.0, -3.0, 8.0, 5.0];
    let shapes = [FlatVertices(&buf[..4]), FlatVertices(&buf)];
    assert_eq!(compute_shape_bounds(&shapes), Bounds::new(-3.0, 2.0, 1.0, 8.0));
}
