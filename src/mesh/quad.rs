//! The packed 64-bit quad word emitted by the greedy merger.
//!
//! Layout: bits 0-5 `x`, 6-11 `y`, 12-17 `z` (the quad's minimum corner,
//! padded-grid coordinates, each fits `0..=63` in 6 bits), 18-23 `w`, 24-29
//! `h` (the two in-plane extents), 32-39 `type`. Bits 30-31 and 40-63 are
//! reserved for a renderer-side payload (atlas index, AO packing) this crate
//! doesn't define.
///
/// Which real-world axes `w`/`h` extend along depends on the face — exactly
/// as [`crate::mesh::merge`] assigns them; see that module's doc comment.
#[derive(Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct PackedQuad(pub u64);

const FIELD_MASK: u64 = 0b11_1111; // 6 bits, 0..=63

impl PackedQuad {
    #[inline]
    pub fn pack(x: u8, y: u8, z: u8, w: u8, h: u8, voxel_type: u8) -> Self {
        debug_assert!(x <= 63 && y <= 63 && z <= 63 && w <= 63 && h <= 63);
        Self(
            (x as u64)
                | (y as u64) << 6
                | (z as u64) << 12
                | (w as u64) << 18
                | (h as u64) << 24
                | (voxel_type as u64) << 32,
        )
    }

    #[inline]
    pub fn x(self) -> u8 {
        (self.0 & FIELD_MASK) as u8
    }

    #[inline]
    pub fn y(self) -> u8 {
        ((self.0 >> 6) & FIELD_MASK) as u8
    }

    #[inline]
    pub fn z(self) -> u8 {
        ((self.0 >> 12) & FIELD_MASK) as u8
    }

    #[inline]
    pub fn w(self) -> u8 {
        ((self.0 >> 18) & FIELD_MASK) as u8
    }

    #[inline]
    pub fn h(self) -> u8 {
        ((self.0 >> 24) & FIELD_MASK) as u8
    }

    #[inline]
    pub fn voxel_type(self) -> u8 {
        ((self.0 >> 32) & 0xff) as u8
    }
}

impl std::fmt::Debug for PackedQuad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackedQuad")
            .field("x", &self.x())
            .field("y", &self.y())
            .field("z", &self.z())
            .field("w", &self.w())
            .field("h", &self.h())
            .field("voxel_type", &self.voxel_type())
            .finish()
    }
}
