//! Per-face visibility masks: for each of the 6 faces, a `CS_P^2`-sized array
//! of 64-bit words where a set bit means "this voxel has a visible face in
//! this direction". Built once per chunk from the three axis column arrays;
//! the greedy merger in [`crate::mesh::merge`] only ever reads these.

use crate::{columns::AxisColumns, constants::CS_P2};

/// `masks[face]` is indexed the same way as the axis column array that face
/// pair derives from — see [`AxisColumns`] for the exact index formulas.
/// Face numbering: 0/1 = ±Y, 2/3 = ±X, 4/5 = ±Z (the axis ordering the
/// reference mesher's column layout falls out of; any bijection is valid,
/// this one is simplest to port directly).
pub struct FaceMasks {
    pub masks: [Box<[u64; CS_P2]>; 6],
}

impl FaceMasks {
    pub fn build(columns: &AxisColumns) -> Self {
        let _span = tracing::trace_span!("face_mask_build").entered();

        let axes: [&[u64; CS_P2]; 3] = [&columns.y, &columns.x, &columns.z];
        let mut masks: [Box<[u64; CS_P2]>; 6] = std::array::from_fn(|_| Box::new([0u64; CS_P2]));

        for (axis, col) in axes.iter().enumerate() {
            let (plus, minus) = masks.split_at_mut(axis * 2 + 1);
            let plus = &mut plus[axis * 2];
            let minus = &mut minus[0];
            for i in 0..CS_P2 {
                let word = col[i];
                // exposed in the positive direction: solid here, air one step up
                plus[i] = word & !((word >> 1) | (1u64 << 63));
                // exposed in the negative direction: solid here, air one step down
                minus[i] = word & !((word << 1) | 1u64);
            }
        }

        Self { masks }
    }
}
