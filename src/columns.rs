//! Opaque column bitmaps: one `u64` per `(a, b)` pair of the grid, with a bit
//! set per solid voxel along the third axis. These are the intermediate
//! representation the face mask builder scans — a chunk's visibility along
//! any axis collapses to 64 bits instead of 64 byte comparisons.

use derive_more::{Deref, DerefMut};

use crate::{
    constants::{CS_P, CS_P2},
    voxel::{VoxelGrid, VoxelId},
};

/// The opaque column bitmap along the Z axis: bit `z` of `columns[y*CS_P+x]`
/// is set iff `voxel(x, y, z)` is non-air.
///
/// This is the one column array that crosses the public boundary (§6):
/// a chunk producer that already knows which cells it just wrote can fill
/// this incrementally instead of paying for a second full scan, and the RLE
/// decoder fills it the same way while decompressing a stored chunk.
#[derive(Clone, Deref, DerefMut)]
pub struct OpaqueColumns(pub Box<[u64; CS_P2]>);

impl OpaqueColumns {
    pub fn empty() -> Self {
        Self(Box::new([0u64; CS_P2]))
    }

    #[inline]
    pub const fn index(x: usize, y: usize) -> usize {
        y * CS_P + x
    }

    /// Sets the bit for a solid voxel at `(x, y, z)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize) {
        self.0[Self::index(x, y)] |= 1u64 << z;
    }

    /// Scans a full voxel grid and builds the column bitmap from scratch.
    /// Prefer filling it incrementally while writing voxels (§6); this is
    /// for producers (tests, RLE round-trips) that don't track it themselves.
    pub fn from_grid(voxels: &VoxelGrid) -> Self {
        let mut columns = Self::empty();
        for y in 0..CS_P {
            for x in 0..CS_P {
                for z in 0..CS_P {
                    if !voxels[crate::constants::voxel_index(x, y, z)].is_air() {
                        columns.set(x, y, z);
                    }
                }
            }
        }
        columns
    }
}

/// The three per-axis column projections the greedy merger needs.
///
/// `z` is exactly the caller-supplied [`OpaqueColumns`] (the public
/// contract); `x` and `y` are derived here since no external component
/// depends on their layout.
pub struct AxisColumns {
    /// bit `x` of `x[y*CS_P+z]` set iff `voxel(x, y, z)` is solid.
    pub x: Box<[u64; CS_P2]>,
    /// bit `y` of `y[z*CS_P+x]` set iff `voxel(x, y, z)` is solid.
    pub y: Box<[u64; CS_P2]>,
    /// bit `z` of `z[y*CS_P+x]` set iff `voxel(x, y, z)` is solid — the
    /// caller-supplied opaque column bitmap, reused verbatim.
    pub z: OpaqueColumns,
}

impl AxisColumns {
    /// Builds `x` and `y` from the voxel grid in a single pass; `z` is taken
    /// from the caller-supplied bitmap rather than recomputed.
    pub fn build(voxels: &VoxelGrid, opaque: OpaqueColumns) -> Self {
        let _span = tracing::trace_span!("axis_columns_build").entered();

        let mut x = Box::new([0u64; CS_P2]);
        let mut y = Box::new([0u64; CS_P2]);

        for oy in 0..CS_P {
            for ox in 0..CS_P {
                for oz in 0..CS_P {
                    if voxels[crate::constants::voxel_index(ox, oy, oz)] != VoxelId::AIR {
                        y[oz * CS_P + ox] |= 1u64 << oy;
                        x[oy * CS_P + oz] |= 1u64 << ox;
                    }
                }
            }
        }

        Self { x, y, z: opaque }
    }
}
