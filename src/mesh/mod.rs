//! Binary greedy meshing: turn a padded `CS_P^3` voxel grid into a minimal
//! set of axis-aligned quads.
//!
//! The pipeline, one pass each:
//! 1. [`columns::AxisColumns::build`] — project the voxel grid onto three
//!    64-bit-per-column bitmaps, one per axis.
//! 2. [`face_mask::FaceMasks::build`] — turn those into six visibility masks
//!    (one per face) via shift-and-mask.
//! 3. [`merge::merge_face`] — greedily merge each face's visible cells into
//!    rectangles and pack them into `MeshData::quads`.
//!
//! Optionally, with the `ao` feature, step 3 is replaced by
//! [`ao::merge_face_ao`], which additionally samples corner/edge solidity for
//! ambient occlusion and tightens the merge predicate to keep AO values
//! uniform across a quad.

#[cfg(feature = "ao")]
pub mod ao;
pub mod face_mask;
pub mod merge;
pub mod quad;

use crate::{
    columns::{AxisColumns, OpaqueColumns},
    constants::CS_P2,
    voxel::VoxelGrid,
};
pub use quad::PackedQuad;

/// The start/length (in [`MeshData::quads`]) of one face's emitted quads.
#[derive(Clone, Copy, Debug, Default)]
pub struct FaceSpan {
    pub start: u32,
    pub len: u32,
}

/// Scratch arena reused across `mesh()` calls so a worker meshing many
/// chunks in sequence doesn't pay for a fresh allocation each time.
///
/// Only arrays that are *read* before being fully overwritten need zeroing
/// between calls (`forward_merged`); `quads` is cleared (`Vec::clear`, which
/// keeps its allocation) and `face_spans` is fully overwritten every call.
pub struct MeshData {
    forward_merged: Box<[u32; CS_P2]>,
    pub quads: Vec<PackedQuad>,
    pub face_spans: [FaceSpan; 6],
}

impl Default for MeshData {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshData {
    pub fn new() -> Self {
        Self {
            forward_merged: Box::new([0u32; CS_P2]),
            quads: Vec::new(),
            face_spans: [FaceSpan::default(); 6],
        }
    }

    /// Meshes `voxels` given its opaque column bitmap, writing quads into
    /// `self.quads` (cleared at the start of the call) and recording per-face
    /// spans into `self.face_spans`.
    pub fn mesh(&mut self, voxels: &VoxelGrid, opaque_columns: OpaqueColumns) {
        let _span = tracing::debug_span!("mesh").entered();

        self.quads.clear();

        let columns = AxisColumns::build(voxels, opaque_columns);
        let masks = face_mask::FaceMasks::build(&columns);

        for face in 0..6 {
            let start = self.quads.len() as u32;
            merge::merge_face(
                voxels,
                &masks,
                face,
                self.forward_merged.as_mut_slice(),
                &mut self.quads,
            );
            let len = self.quads.len() as u32 - start;
            self.face_spans[face] = FaceSpan { start, len };
        }

        tracing::trace!(quad_count = self.quads.len(), "mesh complete");
    }

    /// Same as [`Self::mesh`] but with ambient occlusion sampling; only
    /// available with the `ao` feature.
    #[cfg(feature = "ao")]
    pub fn mesh_with_ao(&mut self, voxels: &VoxelGrid, opaque_columns: OpaqueColumns) {
        let _span = tracing::debug_span!("mesh_with_ao").entered();

        self.quads.clear();

        let columns = AxisColumns::build(voxels, opaque_columns);
        let masks = face_mask::FaceMasks::build(&columns);

        for face in 0..6 {
            let start = self.quads.len() as u32;
            ao::merge_face_ao(
                voxels,
                &masks,
                face,
                self.forward_merged.as_mut_slice(),
                &mut self.quads,
            );
            let len = self.quads.len() as u32 - start;
            self.face_spans[face] = FaceSpan { start, len };
        }

        tracing::trace!(quad_count = self.quads.len(), "mesh_with_ao complete");
    }
}

/// One-shot convenience wrapper around [`MeshData`] for callers that don't
/// need to reuse scratch space across calls.
pub fn mesh(voxels: &VoxelGrid, opaque_columns: OpaqueColumns) -> MeshData {
    let mut data = MeshData::new();
    data.mesh(voxels, opaque_columns);
    data
}
