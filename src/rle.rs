//! Run-length encoding for stored voxel chunks.
//!
//! The wire format is a flat stream of `(type: u8, length: u8)` pairs, runs
//! longer than 255 voxels split across consecutive pairs of the same type.
//! Decoding fills the voxel grid and the opaque column bitmap in the same
//! pass: because [`crate::constants::CS_P`] is exactly 64, one column's 64
//! `z` values always live in a single `u64` word of [`OpaqueColumns`], so a
//! run's bit range can be OR'd in directly without re-deriving `(x, y)` for
//! each voxel.

use crate::{
    columns::OpaqueColumns,
    constants::CS_P3,
    error::RleError,
    voxel::{VoxelGrid, VoxelId, empty_grid},
};

/// Compresses a full voxel grid into its RLE byte stream.
pub fn compress(voxels: &VoxelGrid) -> Vec<u8> {
    let mut out = Vec::new();
    let mut run_type = voxels[0].0;
    let mut run_len: u32 = 0;

    for voxel in voxels.iter() {
        if voxel.0 == run_type {
            run_len += 1;
        }
        else {
            push_run(&mut out, run_type, run_len);
            run_type = voxel.0;
            run_len = 1;
        }
    }
    push_run(&mut out, run_type, run_len);

    out
}

fn push_run(out: &mut Vec<u8>, ty: u8, mut len: u32) {
    loop {
        if len <= 255 {
            out.push(ty);
            out.push(len as u8);
            return;
        }
        out.push(ty);
        out.push(255);
        len -= 255;
    }
}

/// Decodes an RLE byte stream into a fresh voxel grid and its opaque column
/// bitmap. Errors if the stream is truncated or doesn't decode to exactly
/// one chunk's worth of voxels.
pub fn decompress(rle: &[u8]) -> Result<(Box<VoxelGrid>, OpaqueColumns), RleError> {
    if rle.len() % 2 != 0 {
        return Err(RleError::Truncated {
            remaining: rle.len() % 2,
        });
    }

    let mut voxels = empty_grid();
    let mut columns = OpaqueColumns::empty();
    let mut pos = 0usize;

    for pair in rle.chunks_exact(2) {
        let ty = pair[0];
        let len = pair[1] as usize;
        if len == 0 {
            continue;
        }

        let end = pos + len;
        if end > CS_P3 {
            return Err(RleError::LengthMismatch {
                decoded: end,
                expected: CS_P3,
            });
        }

        voxels[pos..end].fill(VoxelId(ty));
        if ty != 0 {
            set_bit_range(&mut columns, pos, len);
        }

        pos = end;
    }

    if pos != CS_P3 {
        return Err(RleError::LengthMismatch {
            decoded: pos,
            expected: CS_P3,
        });
    }

    Ok((voxels, columns))
}

/// Sets bits `[start, start+len)` of the flat bit-space backing `columns`,
/// spanning as many `u64` words as needed.
fn set_bit_range(columns: &mut OpaqueColumns, start: usize, mut len: usize) {
    let mut word_idx = start / 64;
    let mut bit_idx = start % 64;

    while len > 0 {
        let available = 64 - bit_idx;
        let take = len.min(available);
        let mask = if take == 64 {
            u64::MAX
        }
        else {
            ((1u64 << take) - 1) << bit_idx
        };
        columns[word_idx] |= mask;

        len -= take;
        word_idx += 1;
        bit_idx = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::voxel_index;

    #[test]
    fn roundtrip_empty_chunk() {
        let voxels = empty_grid();
        let rle = compress(&voxels);
        let (decoded, columns) = decompress(&rle).unwrap();
        assert_eq!(*decoded, *voxels);
        assert!(columns.iter().all(|&word| word == 0));
    }

    #[test]
    fn roundtrip_single_run_boundary_crossing() {
        let mut voxels = empty_grid();
        // A run that starts mid-word and crosses into the next one.
        for i in 40..150 {
            voxels[i] = VoxelId(7);
        }
        let rle = compress(&voxels);
        let (decoded, columns) = decompress(&rle).unwrap();
        assert_eq!(*decoded, *voxels);

        // Every solid voxel's column bit must be set.
        assert!(!voxels.iter().enumerate().any(|(i, v)| {
            if v.is_air() {
                return false;
            }
            let word = i / 64;
            let bit = i % 64;
            (columns[word] >> bit) & 1 == 0
        }));
    }

    #[test]
    fn roundtrip_run_longer_than_255() {
        let mut voxels = empty_grid();
        for i in 0..600 {
            voxels[i] = VoxelId(3);
        }
        let rle = compress(&voxels);
        assert!(rle.len() >= 6); // split across at least 3 pairs
        let (decoded, _) = decompress(&rle).unwrap();
        assert_eq!(*decoded, *voxels);
    }

    #[test]
    fn truncated_stream_is_rejected() {
        let voxels = empty_grid();
        let mut rle = compress(&voxels);
        rle.pop();
        assert!(matches!(decompress(&rle), Err(RleError::Truncated { .. })));
    }

    #[test]
    fn voxel_index_is_consistent_with_flat_layout() {
        // Sanity check that the flat position used by RLE lines up with the
        // grid's own linear index.
        assert_eq!(voxel_index(0, 0, 0), 0);
        assert_eq!(voxel_index(0, 1, 0), crate::constants::CS_P2);
    }
}
