//! The greedy 2D rectangle merger — the biggest single piece of the mesher.
//!
//! For each face, the outer `forward` loop and the middle `right` loop walk
//! the in-plane coordinates of the column-pair array; the inner loop walks
//! set bits of the visibility word at `(forward, right)` via CTZ, where each
//! bit is the third, depth coordinate. A bit set means that voxel has a
//! visible face; `forward_merged`/`right_merged` track how many consecutive
//! steps have already matched (same exposure, same type) so a rectangle only
//! gets emitted once it stops growing in both directions.
//!
//! Face numbering and axis roles (forward/right/bit_pos -> real x,y,z) match
//! [`crate::columns::AxisColumns`] and [`crate::mesh::face_mask::FaceMasks`]:
//!
//! | face | axis | real (x,y,z) from (forward,right,bit_pos) |
//! |---|---|---|
//! | 0,1 | Y | (right, bit_pos, forward) |
//! | 2,3 | X | (bit_pos, forward, right) |
//! | 4,5 | Z | (forward, right, bit_pos) |

use crate::{
    bits::{clear_lowest, ctz},
    constants::{CS, CS_LAST_BIT, CS_P, CS_P2, P_MASK, voxel_index},
    mesh::{face_mask::FaceMasks, quad::PackedQuad},
    voxel::{VoxelGrid, VoxelId},
};

#[inline]
fn real_xyz(axis: usize, forward: usize, right: usize, bit_pos: usize) -> (usize, usize, usize) {
    match axis {
        0 => (right, bit_pos, forward),
        1 => (bit_pos, forward, right),
        _ => (forward, right, bit_pos),
    }
}

#[inline]
fn voxel_type(voxels: &VoxelGrid, axis: usize, forward: usize, right: usize, bit_pos: usize) -> VoxelId {
    let (x, y, z) = real_xyz(axis, forward, right, bit_pos);
    voxels[voxel_index(x, y, z)]
}

/// Packs a quad's real-world `(x, y, z, w, h)` given the face's axis and the
/// merge's resolved corner coordinates.
#[inline]
fn pack_corner(
    axis: usize,
    face_even: bool,
    mesh_left: usize,
    mesh_right: usize,
    mesh_front: usize,
    mesh_back: usize,
    bit_pos: usize,
    voxel_type: u8,
) -> PackedQuad {
    let mesh_up = bit_pos + if face_even { 1 } else { 0 };
    let w = (mesh_right - mesh_left) as u8;
    let h = (mesh_back - mesh_front) as u8;

    let (x, y, z) = match axis {
        0 => (mesh_left as u8, mesh_up as u8, mesh_front as u8),
        1 => (mesh_up as u8, mesh_front as u8, mesh_left as u8),
        _ => (mesh_front as u8, mesh_left as u8, mesh_up as u8),
    };

    PackedQuad::pack(x, y, z, w, h, voxel_type)
}

/// Runs the greedy merge for a single face, appending emitted quads to
/// `out`. `forward_merged` is face-scoped scratch reused by the caller
/// across faces (zeroed at the top of each call); `right_merged` is
/// allocated fresh per `forward` step since it never needs to survive past
/// it.
pub fn merge_face(
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
    let mask = &masks.masks[face];

    for forward in 1..CS_LAST_BIT as usize {
        let forward_row = forward * CS_P;
        let mut bits_walking_right: u64 = 0u64;
        let mut right_merged = [0u32; CS_P];
        let forward_at_last = forward >= CS;

        for right in 1..CS_LAST_BIT as usize {
            let here_idx = right + forward_row;
            let bits_here = mask[here_idx] & P_MASK;

            let forward_candidate = if forward_at_last {
                0
            } else {
                bits_here & !bits_walking_right & mask[here_idx + CS_P]
            };

            // Only bits whose neighbor in `forward+1` is the same voxel type
            // actually continue merging; the rest fall through unchanged.
            let mut bits_merging_forward = 0u64;
            let mut scan = forward_candidate;
            while scan != 0 {
                let bit_pos = ctz(scan) as usize;
                scan = clear_lowest(scan);
                if voxel_type(voxels, axis, forward, right, bit_pos)
                    == voxel_type(voxels, axis, forward + 1, right, bit_pos)
                {
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
                bits_here & mask[here_idx + 1]
            };

            let mut bits_stopped_forward = bits_here & !bits_merging_forward;
            while bits_stopped_forward != 0 {
                let bit_pos = ctz(bits_stopped_forward) as usize;
                bits_stopped_forward = clear_lowest(bits_stopped_forward);

                let forward_count_here = forward_merged[right * CS_P + bit_pos];
                let can_extend_right = (bits_merging_right & (1u64 << bit_pos)) != 0
                    && forward_count_here == forward_merged[(right + 1) * CS_P + bit_pos]
                    && voxel_type(voxels, axis, forward, right, bit_pos)
                        == voxel_type(voxels, axis, forward, right + 1, bit_pos);

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

                forward_merged[right * CS_P + bit_pos] = 0;
                right_merged[bit_pos] = 0;

                out.push(pack_corner(
                    axis, face_even, mesh_left, mesh_right, mesh_front, mesh_back, bit_pos, ty,
                ));
            }
        }
    }
}
