use voxmesh::{
    columns::OpaqueColumns,
    constants::{CS, CS_P, voxel_index},
    mesh,
    voxel::{VoxelId, empty_grid},
};

fn set(voxels: &mut [VoxelId], columns: &mut OpaqueColumns, x: usize, y: usize, z: usize, ty: u8) {
    voxels[voxel_index(x, y, z)] = VoxelId(ty);
    columns.set(x, y, z);
}

#[test]
fn empty_chunk_produces_no_quads() {
    let voxels = empty_grid();
    let columns = OpaqueColumns::empty();
    let data = mesh(&voxels, columns);

    assert_eq!(data.quads.len(), 0);
    for span in &data.face_spans {
        assert_eq!(span.len, 0);
    }
}

#[test]
fn single_cube_produces_six_unit_quads() {
    let mut voxels = empty_grid();
    let mut columns = OpaqueColumns::empty();
    set(&mut voxels, &mut columns, 1, 1, 1, 9);

    let data = mesh(&voxels, columns);

    assert_eq!(data.quads.len(), 6);
    for span in &data.face_spans {
        assert_eq!(span.len, 1);
    }
    for quad in &data.quads {
        assert_eq!(quad.w(), 1);
        assert_eq!(quad.h(), 1);
        assert_eq!(quad.voxel_type(), 9);
    }
}

#[test]
fn unit_column_has_two_end_caps_and_four_merged_sides() {
    // A 1x1x4 column along the real X axis, which under this crate's
    // axis/face assignment is faces 2 and 3 (see src/mesh/merge.rs's module
    // doc table: axis 1 <-> faces 2,3 <-> real x is the bit_pos/depth axis).
    let mut voxels = empty_grid();
    let mut columns = OpaqueColumns::empty();
    for x in 1..=4 {
        set(&mut voxels, &mut columns, x, 1, 1, 7);
    }

    let data = mesh(&voxels, columns);

    assert_eq!(data.quads.len(), 6);

    for face in [2usize, 3] {
        let span = data.face_spans[face];
        assert_eq!(span.len, 1, "face {face} should have exactly one end-cap quad");
        let quad = data.quads[span.start as usize];
        assert_eq!(quad.w(), 1);
        assert_eq!(quad.h(), 1);
    }

    for face in [0usize, 1, 4, 5] {
        let span = data.face_spans[face];
        assert_eq!(span.len, 1, "face {face} should merge into one strip");
        let quad = data.quads[span.start as usize];
        let (lo, hi) = (quad.w().min(quad.h()), quad.w().max(quad.h()));
        assert_eq!((lo, hi), (1, 4), "face {face} strip should be 1x4");
    }
}

#[test]
fn solid_block_merges_each_face_into_one_quad() {
    let mut voxels = empty_grid();
    let mut columns = OpaqueColumns::empty();
    for x in 1..=2 {
        for y in 1..=2 {
            for z in 1..=2 {
                set(&mut voxels, &mut columns, x, y, z, 3);
            }
        }
    }

    let data = mesh(&voxels, columns);

    assert_eq!(data.quads.len(), 6);
    for quad in &data.quads {
        assert_eq!(quad.w(), 2);
        assert_eq!(quad.h(), 2);
        assert_eq!(quad.voxel_type(), 3);
    }
}

#[test]
fn checkerboard_pattern_never_merges() {
    let mut voxels = empty_grid();
    let mut columns = OpaqueColumns::empty();

    let mut cubes = 0usize;
    let mut coord = 2usize;
    let mut coords = Vec::new();
    while coord < CS {
        coords.push(coord);
        coord += 2;
    }

    for &x in &coords {
        for &y in &coords {
            for &z in &coords {
                set(&mut voxels, &mut columns, x, y, z, 1);
                cubes += 1;
            }
        }
    }

    let data = mesh(&voxels, columns);

    assert_eq!(data.quads.len(), 6 * cubes);
    for quad in &data.quads {
        assert_eq!(quad.w(), 1);
        assert_eq!(quad.h(), 1);
    }
}

#[test]
fn full_plane_has_one_quad_top_and_bottom_and_four_side_strips() {
    let mut voxels = empty_grid();
    let mut columns = OpaqueColumns::empty();
    for x in 1..=CS {
        for z in 1..=CS {
            set(&mut voxels, &mut columns, x, 10, z, 5);
        }
    }

    let data = mesh(&voxels, columns);

    assert_eq!(data.quads.len(), 6);
    for span in &data.face_spans {
        assert_eq!(span.len, 1);
    }

    // The two faces normal to Y (this crate's faces 0,1) each merge the
    // entire plane into one CSxCS quad; the other four merge into CSx1 or
    // 1xCS edge strips.
    for face in [0usize, 1] {
        let quad = data.quads[data.face_spans[face].start as usize];
        assert_eq!(quad.w() as usize, CS);
        assert_eq!(quad.h() as usize, CS);
    }
    for face in [2usize, 3, 4, 5] {
        let quad = data.quads[data.face_spans[face].start as usize];
        let (lo, hi) = (quad.w().min(quad.h()) as usize, quad.w().max(quad.h()) as usize);
        assert_eq!((lo, hi), (1, CS));
    }
}

#[test]
fn differing_types_do_not_merge() {
    let mut voxels = empty_grid();
    let mut columns = OpaqueColumns::empty();
    set(&mut voxels, &mut columns, 1, 1, 1, 1);
    set(&mut voxels, &mut columns, 2, 1, 1, 2);

    let data = mesh(&voxels, columns);

    // Two adjacent cells of different type can never produce a merged quad
    // wider than 1 in the direction they're adjacent.
    for quad in &data.quads {
        assert!(quad.w() == 1 || quad.h() == 1);
    }
    // Every quad's type matches one of the two voxels, never a blend.
    for quad in &data.quads {
        assert!(quad.voxel_type() == 1 || quad.voxel_type() == 2);
    }
}

#[test]
fn fully_enclosed_solid_region_has_no_exposed_faces() {
    let mut voxels = empty_grid();
    let mut columns = OpaqueColumns::empty();
    for x in 0..CS_P {
        for y in 0..CS_P {
            for z in 0..CS_P {
                voxels[voxel_index(x, y, z)] = VoxelId(4);
                columns.set(x, y, z);
            }
        }
    }

    let data = mesh(&voxels, columns);
    assert_eq!(data.quads.len(), 0);
}

#[test]
fn meshing_is_deterministic() {
    let mut voxels = empty_grid();
    let mut columns = OpaqueColumns::empty();
    for x in 1..=10 {
        for y in 1..=5 {
            set(&mut voxels, &mut columns, x, y, 3, ((x + y) % 4) as u8 + 1);
        }
    }

    let first = mesh(&voxels, columns.clone());
    let second = mesh(&voxels, columns);

    assert_eq!(first.quads, second.quads);
    assert_eq!(first.face_spans.map(|s| s.len), second.face_spans.map(|s| s.len));
}

#[test]
fn no_quad_touches_the_padding_border() {
    let mut voxels = empty_grid();
    let mut columns = OpaqueColumns::empty();
    // Fill the entire visible interior so every boundary cell is exposed.
    for x in 1..=CS {
        for y in 1..=CS {
            for z in 1..=CS {
                set(&mut voxels, &mut columns, x, y, z, 2);
            }
        }
    }

    let data = mesh(&voxels, columns);
    for quad in &data.quads {
        assert_ne!(quad.x() as usize, 0);
        assert_ne!(quad.y() as usize, 0);
        assert_ne!(quad.z() as usize, 0);
        assert_ne!(quad.x() as usize, CS_P - 1);
        assert_ne!(quad.y() as usize, CS_P - 1);
        assert_ne!(quad.z() as usize, CS_P - 1);
    }
}
