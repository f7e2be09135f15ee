//! Error types for the persistence and configuration layers. The mesher
//! core itself has a total contract and never returns an error (§7).

#[derive(Debug, thiserror::Error)]
pub enum RleError {
    #[error("truncated RLE stream: expected a (type, length) pair, found {remaining} trailing byte(s)")]
    Truncated { remaining: usize },

    #[error("RLE payload decodes to {decoded} voxels, expected exactly {expected}")]
    LengthMismatch { decoded: usize, expected: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum LevelFileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Rle(#[from] RleError),

    #[error("level file is empty")]
    EmptyFile,

    #[error("level file's chunk table claims {expected} entries but only {actual} byte(s) remain")]
    TruncatedTable { expected: usize, actual: usize },

    #[error("chunk table entry for key {key:#08x} points past the end of the file (begin={begin}, size={size}, file size={file_size})")]
    EntryOutOfBounds {
        key: u32,
        begin: u32,
        size: u32,
        file_size: usize,
    },

    #[error("chunk key {x},{y},{z} doesn't fit in a {world_side}x{world_side} world")]
    ChunkOutOfRange { x: u8, y: u8, z: u8, world_side: u8 },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Deserialize(#[from] toml::de::Error),

    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),
}
