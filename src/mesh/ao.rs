//! Ambient occlusion variant of the greedy merger, gated behind the `ao`
//! feature.
//!
//! Structurally this is [`crate::mesh::merge::merge_face`] with two changes:
//! the forward/right merge predicates additionally require the two
//! candidate cells' 8-neighbour solidity pattern (sampled one step into the
//! air at the exposed layer) to match exactly, and each emitted quad carries
//! a 2-bit AO value per corner packed into the word's upper reserved bits.
//!
//! `compareAo` is intentionally a raw bitmask comparison rather than a
//! comparison of the four reduced `{0,1,2,3}` AO values: two different
//! solidity patterns can reduce to the same AO number, and merging those
//! would visibly flatten a corner that should stay sharp.

use crate::{
    bits::{clear_lowest, ctz},
    constants::{CS, CS_LAST_BIT, CS_P, CS_P2, P_MASK, voxel_index},
    mesh::{face_mask::FaceMasks, quad::PackedQuad},
    voxel::{VoxelGrid, VoxelId},
};

#[inline]
fn real_xyz(axis: usize, forward: isize, right: isize, bit_pos: isize) -> Option<(usize, usize, usize)> {
    if forward < 0 || right < 0 || bit_pos < 0 {
        return None;
    }
    if forward as usize >= CS_P || right as usize >= CS_P || bit_pos as usize >= CS_P {
        return None;
    }
    let (x, y, z) = match axis {
        0 => (right, bit_pos, forward),
        1 => (bit_pos, forward, right),
        _ => (forward, right, bit_pos),
    };
    Some((x as usize, y as usize, z as usize))
}

#[inline]
fn voxel_type(voxels: &VoxelGrid, axis: usize, forward: usize, right: usize, bit_pos: usize) -> VoxelId {
    let (x, y, z) = real_xyz(axis, forward as isize, right as isize, bit_pos as isize).expect("in range");
    voxels[voxel_index(x, y, z)]
}

#[inline]
fn is_solid(voxels: &VoxelGrid, axis: usize, forward: isize, right: isize, layer: isize) -> bool {
    match real_xyz(axis, forward, right, layer) {
        Some((x, y, z)) => !voxels[voxel_index(x, y, z)].is_air(),
        // Outside the padded grid reads as air; this only happens for the
        // outermost forward/right=0/CS_P-1 cells, which never emit a quad.
        None => false,
    }
}

/// `AO(side1, side2, corner) = (side1 && side2) ? 0 : 3 - (side1+side2+corner)`.
#[inline]
fn ao_value(side1: bool, side2: bool, corner: bool) -> u8 {
    if side1 && side2 {
        0
    } else {
        3 - (side1 as u8 + side2 as u8 + corner as u8)
    }
}

/// The 8-neighbour solidity pattern at the outer layer `c = bit_pos + airDir`,
/// packed one bit per neighbour so two cells' patterns can be compared for
/// equality with a single `==`. Bit order: nw, n, ne, w, e, sw, s, se (where
/// "n"/"s" is the forward axis and "w"/"e" is the right axis).
#[inline]
fn neighbor_mask(voxels: &VoxelGrid, axis: usize, forward: usize, right: usize, layer: usize) -> u8 {
    let f = forward as isize;
    let r = right as isize;
    let c = layer as isize;
    let bit = |df: isize, dr: isize, i: u32| (is_solid(voxels, axis, f + df, r + dr, c) as u8) << i;
    bit(-1, -1, 0)
        | bit(-1, 0, 1)
        | bit(-1, 1, 2)
        | bit(0, -1, 3)
        | bit(0, 1, 4)
        | bit(1, -1, 5)
        | bit(1, 0, 6)
        | bit(1, 1, 7)
}

fn corner_ao(mask: u8, df: isize, dr: isize) -> u8 {
    let bit_of = |dfi: isize, dri: isize| -> bool {
        let idx = match (dfi, dri) {
            (-1, -1) => 0,
            (-1, 0) => 1,
            (-1, 1) => 2,
            (0, -1) => 3,
            (0, 1) => 4,
            (1, -1) => 5,
            (1, 0) => 6,
            (1, 1) => 7,
            _ => unreachable!(),
        };
        (mask >> idx) & 1 != 0
    };
    let side1 = bit_of(df, 0);
    let side2 = bit_of(0, dr);
    let corner = bit_of(df, dr);
    ao_value(side1, side2, corner)
}

/// Packs a quad plus its four corner AO values (back-left, front-left,
/// back-right, front-right — matching the `right`/`forward` axes) into bits
/// 40-47 of the word, two bits each.
#[inline]
#[allow(clippy::too_many_arguments)]
fn pack_corner_ao(
    axis: usize,
    face_even: bool,
    mesh_left: usize,
    mesh_right: usize,
    mesh_front: usize,
    mesh_back: usize,
    bit_pos: usize,
    voxel_type: u8,
    mask: u8,
) -> PackedQuad {
    let mesh_up = bit_pos + if face_even { 1 } else { 0 };
    let w = (mesh_right - mesh_left) as u8;
    let h = (mesh_back - mesh_front) as u8;

    let (x, y, z) = match axis {
        0 => (mesh_left as u8, mesh_up as u8, mesh_front as u8),
        1 => (mesh_up as u8, mesh_front as u8, mesh_left as u8),
        _ => (mesh_front as u8, mesh_left as u8, mesh_up as u8),
    };

    let ao_lb = corner_ao(mask, -1, -1);
    let ao_lf = corner_ao(mask, 1, -1);
    let ao_rb = corner_ao(mask, -1, 1);
    let ao_rf = corner_ao(mask, 1, 1);

    let quad = PackedQuad::pack(x, y, z, w, h, voxel_type);
    let ao_bits = (ao_lb as u64) | (ao_lf as u64) << 2 | (ao_rb as u64) << 4 | (ao_rf as u64) << 6;
    // Prefer the diagonal that connects the two corners with the larger
    // combined AO, so the darker triangle doesn't visibly pinch.
    let flip_bit = ((ao_lb as u32 + ao_rf as u32) > (ao_rb as u32 + ao_lf as u32)) as u64;
    PackedQuad(quad.0 | (ao_bits << 40) | (flip_bit << 48))
}

/// AO-aware counterpart to [`crate::mesh::merge::merge_face`]. See the
/// module docs for how it differs.
pub fn merge_face_ao(
    voxels: &VoxelGrid,
    masks: &FaceMasks,
    face: usize,
    forward_merged: &mut [u32],
    out: &mut Vec<PackedQuad>,
) {
    debug_assert_eq!(forward_merged.len(), CS_P2);
    forward_merged.fill(0);

    let axis = face / 2;
    let face_even = face % 2 == 0;
    let air_dir: isize = if face_even { 1 } else { -1 };
    let mask_arr = &masks.masks[face];

    for forward in 1..CS_LAST_BIT as usize {
        let forward_row = forward * CS_P;
        let mut bits_walking_right: u64 = 0u64;
        let mut right_merged = [0u32; CS_P];
        let forward_at_last = forward >= CS;

        for right in 1..CS_LAST_BIT as usize {
            let here_idx = right + forward_row;
            let bits_here = mask_arr[here_idx] & P_MASK;

            let forward_candidate = if forward_at_last {
                0
            } else {
                bits_here & !bits_walking_right & mask_arr[here_idx + CS_P]
            };

            let mut bits_merging_forward = 0u64;
            let mut scan = forward_candidate;
            while scan != 0 {
                let bit_pos = ctz(scan) as usize;
                scan = clear_lowest(scan);
                let layer = bit_pos as isize + air_dir;
                let same_type = voxel_type(voxels, axis, forward, right, bit_pos)
                    == voxel_type(voxels, axis, forward + 1, right, bit_pos);
                let same_ao = layer >= 0
                    && neighbor_mask(voxels, axis, forward, right, layer as usize)
                        == neighbor_mask(voxels, axis, forward + 1, right, layer as usize);
                if same_type && same_ao {
                    bits_merging_forward |= 1u64 << bit_pos;
                }
            }

            let mut copy_front = bits_merging_forward;
            while copy_front != 0 {
                let bit_pos = ctz(copy_front) as usize;
                copy_front = clear_lowest(copy_front);
                forward_merged[right * CS_P + bit_pos] += 1;
            }

            let bits_merging_right = if right >= CS {
                0
            } else {
                bits_here & mask_arr[here_idx + 1]
            };

            let mut bits_stopped_forward = bits_here & !bits_merging_forward;
            while bits_stopped_forward != 0 {
                let bit_pos = ctz(bits_stopped_forward) as usize;
                bits_stopped_forward = clear_lowest(bits_stopped_forward);
                let layer = bit_pos as isize + air_dir;

                let forward_count_here = forward_merged[right * CS_P + bit_pos];
                let same_type_right = voxel_type(voxels, axis, forward, right, bit_pos)
                    == voxel_type(voxels, axis, forward, right + 1, bit_pos);
                let same_ao_right = layer >= 0
                    && neighbor_mask(voxels, axis, forward, right, layer as usize)
                        == neighbor_mask(voxels, axis, forward, right + 1, layer as usize);
                let can_extend_right = (bits_merging_right & (1u64 << bit_pos)) != 0
                    && forward_count_here == forward_merged[(right + 1) * CS_P + bit_pos]
                    && same_type_right
                    && same_ao_right;

                if can_extend_right {
                    bits_walking_right |= 1u64 << bit_pos;
                    right_merged[bit_pos] += 1;
                    forward_merged[right * CS_P + bit_pos] = 0;
                    continue;
                }
                bits_walking_right &= !(1u64 << bit_pos);

                let mesh_left = right - right_merged[bit_pos] as usize;
                let mesh_right = right + 1;
                let mesh_front = forward - forward_count_here as usize;
                let mesh_back = forward + 1;

                let ty = voxel_type(voxels, axis, forward, right, bit_pos).0;
                let mask = if layer >= 0 {
                    neighbor_mask(voxels, axis, forward, right, layer as usize)
                } else {
                    0
                };

                forward_merged[right * CS_P + bit_pos] = 0;
                right_merged[bit_pos] = 0;

                out.push(pack_corner_ao(
                    axis, face_even, mesh_left, mesh_right, mesh_front, mesh_back, bit_pos, ty, mask,
                ));
            }
        }
    }
}
