//! The voxel grid the mesher core reads from.
//!
//! The mesher itself is material-agnostic: it only ever asks "is this zero"
//! and "are these two the same nonzero value". `VoxelId` exists so the public
//! API isn't a bag of raw `u8`s, not to carry a material registry — that
//! belongs to whatever owns the renderer, well outside this crate.

use crate::constants::CS_P3;

/// A single voxel's material id. `0` means air.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct VoxelId(pub u8);

impl VoxelId {
    pub const AIR: VoxelId = VoxelId(0);

    #[inline]
    pub const fn is_air(self) -> bool {
        self.0 == 0
    }
}

impl From<u8> for VoxelId {
    fn from(value: u8) -> Self {
        VoxelId(value)
    }
}

/// A padded `CS_P^3` voxel grid, YXZ-ordered per [`crate::constants::voxel_index`].
///
/// Border cells (any coordinate `0` or `CS_P - 1`) participate in face
/// visibility tests against neighboring chunks but are never themselves the
/// subject of an emitted quad.
pub type VoxelGrid = [VoxelId; CS_P3];

/// A freshly zeroed (all-air) padded voxel grid, allocated directly on the
/// heap so debug builds don't have to materialize 256 KiB on the stack first.
pub fn empty_grid() -> Box<VoxelGrid> {
    vec![VoxelId::AIR; CS_P3]
        .into_boxed_slice()
        .try_into()
        .unwrap_or_else(|_| unreachable!("vec length matches CS_P3 by construction"))
}
