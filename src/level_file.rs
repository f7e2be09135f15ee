//! Level file format: a lookup table of RLE-compressed chunks behind a
//! single-byte world size.
//!
//! ```text
//! byte 0                    : world side length, in chunks (0..=255)
//! side*side * 12 bytes      : chunk table, one (key, begin, size) per slot
//! remainder                 : RLE payloads, referenced by the table
//! ```
//! `key = (z << 16) | (y << 8) | x`, matching the columnar key used to look
//! a chunk up by its position. `begin`/`size` point into the payload region,
//! offset from byte 0 of the file (not from the end of the table).

use std::io::{Read, Write};

use crate::{error::LevelFileError, rle, voxel::VoxelGrid};

const TABLE_ENTRY_SIZE: usize = 12; // key: u32, begin: u32, size: u32

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkTableEntry {
    pub key: u32,
    pub rle_begin: u32,
    pub rle_size: u32,
}

/// Packs a chunk position into its table key.
pub fn chunk_key(x: u8, y: u8, z: u8) -> u32 {
    (z as u32) << 16 | (y as u32) << 8 | x as u32
}

pub struct LevelFile {
    pub world_side: u8,
    table: Vec<ChunkTableEntry>,
    payload: Vec<u8>,
}

impl LevelFile {
    pub fn new(world_side: u8) -> Self {
        Self {
            world_side,
            table: Vec::new(),
            payload: Vec::new(),
        }
    }

    /// Compresses `voxels` and appends it to the file under `key`.
    ///
    /// The world is square in `x`/`z` (per the original format, height `y`
    /// is unbounded); `key`'s `x` and `z` components must each be less than
    /// `world_side`.
    pub fn add_chunk(&mut self, key: u32, voxels: &VoxelGrid) -> Result<(), LevelFileError> {
        let x = (key & 0xff) as u8;
        let y = ((key >> 8) & 0xff) as u8;
        let z = ((key >> 16) & 0xff) as u8;
        if x >= self.world_side || z >= self.world_side {
            return Err(LevelFileError::ChunkOutOfRange {
                x,
                y,
                z,
                world_side: self.world_side,
            });
        }

        let rle_begin = self.header_size() as u32 + self.payload.len() as u32;
        let compressed = rle::compress(voxels);
        let rle_size = compressed.len() as u32;

        self.payload.extend_from_slice(&compressed);
        self.table.push(ChunkTableEntry {
            key,
            rle_begin,
            rle_size,
        });

        Ok(())
    }

    /// Looks up and decompresses the chunk stored under `key`, if present.
    pub fn chunk(&self, key: u32) -> Result<Option<(Box<VoxelGrid>, crate::columns::OpaqueColumns)>, LevelFileError> {
        let Some(entry) = self.table.iter().find(|entry| entry.key == key)
        else {
            return Ok(None);
        };

        let header_size = self.header_size();
        let begin = entry.rle_begin as usize;
        let size = entry.rle_size as usize;
        if begin < header_size {
            return Err(LevelFileError::EntryOutOfBounds {
                key,
                begin: entry.rle_begin,
                size: entry.rle_size,
                file_size: header_size + self.payload.len(),
            });
        }
        let payload_begin = begin - header_size;
        let payload_end = payload_begin
            .checked_add(size)
            .filter(|&end| end <= self.payload.len())
            .ok_or(LevelFileError::EntryOutOfBounds {
                key,
                begin: entry.rle_begin,
                size: entry.rle_size,
                file_size: header_size + self.payload.len(),
            })?;

        let (voxels, columns) = rle::decompress(&self.payload[payload_begin..payload_end])?;
        Ok(Some((voxels, columns)))
    }

    fn header_size(&self) -> usize {
        1 + self.table.len() * TABLE_ENTRY_SIZE
    }

    pub fn write(&self, mut writer: impl Write) -> Result<(), LevelFileError> {
        writer.write_all(&[self.world_side])?;
        for entry in &self.table {
            writer.write_all(&entry.key.to_le_bytes())?;
            writer.write_all(&entry.rle_begin.to_le_bytes())?;
            writer.write_all(&entry.rle_size.to_le_bytes())?;
        }
        writer.write_all(&self.payload)?;
        Ok(())
    }

    pub fn read(mut reader: impl Read) -> Result<Self, LevelFileError> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;

        let world_side = *buf.first().ok_or(LevelFileError::EmptyFile)?;
        let table_len = world_side as usize * world_side as usize;
        let table_bytes = table_len * TABLE_ENTRY_SIZE;

        if buf.len() < 1 + table_bytes {
            return Err(LevelFileError::TruncatedTable {
                expected: table_bytes,
                actual: buf.len().saturating_sub(1),
            });
        }

        let mut table = Vec::with_capacity(table_len);
        let mut cursor = 1;
        for _ in 0..table_len {
            let key = u32::from_le_bytes(buf[cursor..cursor + 4].try_into().unwrap());
            let rle_begin = u32::from_le_bytes(buf[cursor + 4..cursor + 8].try_into().unwrap());
            let rle_size = u32::from_le_bytes(buf[cursor + 8..cursor + 12].try_into().unwrap());
            table.push(ChunkTableEntry {
                key,
                rle_begin,
                rle_size,
            });
            cursor += TABLE_ENTRY_SIZE;
        }

        let payload = buf[cursor..].to_vec();

        Ok(Self {
            world_side,
            table,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::{VoxelId, empty_grid};

    #[test]
    fn roundtrip_through_bytes() {
        let mut voxels = empty_grid();
        voxels[100] = VoxelId(5);

        let mut file = LevelFile::new(4);
        file.add_chunk(chunk_key(1, 0, 2), &voxels).unwrap();

        let mut bytes = Vec::new();
        file.write(&mut bytes).unwrap();

        let read_back = LevelFile::read(bytes.as_slice()).unwrap();
        assert_eq!(read_back.world_side, 4);

        let (decoded, _) = read_back.chunk(chunk_key(1, 0, 2)).unwrap().unwrap();
        assert_eq!(*decoded, *voxels);
    }

    #[test]
    fn missing_chunk_is_none() {
        let file = LevelFile::new(2);
        assert!(file.chunk(chunk_key(0, 0, 0)).unwrap().is_none());
    }

    #[test]
    fn chunk_key_matches_layout() {
        assert_eq!(chunk_key(1, 2, 3), (3u32 << 16) | (2u32 << 8) | 1u32);
    }

    #[test]
    fn chunk_outside_world_side_is_rejected() {
        let voxels = empty_grid();
        let mut file = LevelFile::new(4);

        let err = file.add_chunk(chunk_key(4, 0, 0), &voxels).unwrap_err();
        assert!(matches!(err, LevelFileError::ChunkOutOfRange { x: 4, world_side: 4, .. }));

        let err = file.add_chunk(chunk_key(0, 0, 4), &voxels).unwrap_err();
        assert!(matches!(err, LevelFileError::ChunkOutOfRange { z: 4, world_side: 4, .. }));

        // y is unbounded: the world is only square in x/z.
        file.add_chunk(chunk_key(0, 200, 0), &voxels).unwrap();
    }
}
