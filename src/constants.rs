//! Grid geometry shared by every module that touches a chunk's voxel data.
//!
//! `CS` is the edge length a caller actually sees; `CS_P` adds a one-voxel
//! border on every side so the mesher can test face visibility against
//! neighbor chunks without a special-cased "am I on the edge" branch. The
//! border voxels are never themselves the subject of an emitted quad.

/// Visible edge length of a chunk.
pub const CS: usize = 62;

/// Padded edge length (`CS` plus a one-voxel border on each side).
pub const CS_P: usize = CS + 2;

/// `CS_P` squared, the size of one column-bitmap plane.
pub const CS_P2: usize = CS_P * CS_P;

/// `CS_P` cubed, the size of the full padded voxel grid.
pub const CS_P3: usize = CS_P2 * CS_P;

/// Index of the last bit in a `CS_P`-wide column word (`CS_P - 1`).
pub const CS_LAST_BIT: u32 = (CS_P - 1) as u32;

/// Mask that clears the two border bits (0 and `CS_P - 1`), keeping bits
/// `1..=CS_P-2` — the visible layer a quad is allowed to reference.
pub const P_MASK: u64 = !(1u64 | (1u64 << 63));

/// Linear index into a `CS_P^3` voxel array using YXZ ordering.
///
/// `z` is fastest-varying so that a run of voxels at fixed `(x, y)` is
/// contiguous, which is what lets a single `u64` describe an entire column.
#[inline]
pub const fn voxel_index(x: usize, y: usize, z: usize) -> usize {
    z + x * CS_P + y * CS_P2
}
