//! Demo/test-only terrain producer: fills a padded chunk from a Perlin
//! height field. Not part of the mesher's public contract — it exists so
//! the CLI driver and tests have something to mesh that isn't hand-authored.

use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro128PlusPlus;

use crate::{
    columns::OpaqueColumns,
    constants::{CS_P, voxel_index},
    noise::{FractalNoise, Noise2},
    voxel::{VoxelGrid, VoxelId, empty_grid},
};

/// A world seed, hashed from either a `u64` or an arbitrary string so
/// players can type a memorable name instead of a number.
#[derive(Clone, Copy, PartialEq, Eq, Hash, derive_more::Debug, serde::Serialize, serde::Deserialize)]
#[debug("0x{:016x}", self.0)]
#[serde(transparent)]
pub struct WorldSeed(pub u64);

impl From<u64> for WorldSeed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for WorldSeed {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<u64>() {
            Ok(Self(n))
        }
        else {
            Ok(Self(seahash::hash(s.as_bytes())))
        }
    }
}

/// One chunk's position in chunk-grid coordinates, independent of the
/// mesher's own `CS`-sized padded coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

pub struct DemoTerrain {
    height: FractalNoise,
    dirt_depth_rng_seed: u64,
    surface_block: VoxelId,
    dirt_block: VoxelId,
    stone_block: VoxelId,
}

impl DemoTerrain {
    pub fn new(seed: WorldSeed) -> Self {
        Self {
            height: FractalNoise::new(seed.0 as u32, 4, 0.5, 1.0 / 96.0),
            dirt_depth_rng_seed: seed.0,
            surface_block: VoxelId(1),
            dirt_block: VoxelId(2),
            stone_block: VoxelId(3),
        }
    }

    fn surface_height(&self, world_x: f64, world_z: f64) -> i32 {
        (self.height.get(world_x, world_z) * 24.0 + 32.0) as i32
    }

    fn dirt_depth(&self, world_x: i32, world_z: i32) -> i32 {
        let mut rng = Xoroshiro128PlusPlus::seed_from_u64(
            self.dirt_depth_rng_seed ^ ((world_x as u64) << 32) ^ (world_z as u64),
        );
        rng.random_range(2..=5)
    }

    /// Fills a padded `CS_P^3` grid for `chunk` in one pass, ORing solid
    /// voxels into the returned opaque-column bitmap as it writes them
    /// (the §6 contract the mesher expects its caller to uphold).
    pub fn generate(&self, chunk: ChunkPos) -> (Box<VoxelGrid>, OpaqueColumns) {
        let _span = tracing::debug_span!("terrain_generate", x = chunk.x, y = chunk.y, z = chunk.z).entered();

        let mut voxels = empty_grid();
        let mut columns = OpaqueColumns::empty();

        // CS (not CS_P) visible voxels per chunk; the one-voxel padding
        // border is filled by sampling one step past it so neighbor chunks
        // agree on shared-face visibility without needing to be resident.
        let cs = crate::constants::CS as i32;

        for px in 0..CS_P {
            for pz in 0..CS_P {
                let world_x = (chunk.x * cs + px as i32 - 1) as f64;
                let world_z = (chunk.z * cs + pz as i32 - 1) as f64;
                let surface = self.surface_height(world_x, world_z);
                let dirt_depth = self.dirt_depth(world_x as i32, world_z as i32);

                for py in 0..CS_P {
                    let world_y = chunk.y * cs + py as i32 - 1;
                    let voxel = if world_y > surface {
                        VoxelId::AIR
                    }
                    else if world_y == surface {
                        self.surface_block
                    }
                    else if world_y > surface - dirt_depth {
                        self.dirt_block
                    }
                    else {
                        self.stone_block
                    };

                    voxels[voxel_index(px, py, pz)] = voxel;
                    if !voxel.is_air() {
                        columns.set(px, py, pz);
                    }
                }
            }
        }

        (voxels, columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_seed_hashing_is_stable() {
        let a: WorldSeed = "hello".parse().unwrap();
        let b: WorldSeed = "hello".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn numeric_seed_strings_parse_as_numbers() {
        let seed: WorldSeed = "1234".parse().unwrap();
        assert_eq!(seed, WorldSeed(1234));
    }

    #[test]
    fn generated_columns_agree_with_voxel_grid() {
        let terrain = DemoTerrain::new(WorldSeed(7));
        let (voxels, columns) = terrain.generate(ChunkPos { x: 0, y: 0, z: 0 });
        let expected = OpaqueColumns::from_grid(&voxels);
        assert_eq!(columns.0, expected.0);
    }
}
