//! On-disk configuration, loaded/saved the way `sandvox::config::Config`
//! does: read TOML if the file exists, otherwise write out defaults.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, terrain::WorldSeed};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MesherConfig {
    /// Whether to bake ambient occlusion into emitted quads. Only has an
    /// effect when the crate is built with the `ao` feature.
    pub ao_enabled: bool,

    pub world_seed: WorldSeed,

    /// How many chunks out from the origin the demo driver generates, in
    /// each direction.
    pub chunk_range: i32,
}

impl Default for MesherConfig {
    fn default() -> Self {
        Self {
            ao_enabled: false,
            world_seed: WorldSeed(0),
            chunk_range: 4,
        }
    }
}

impl MesherConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = if !path.as_ref().exists() {
            let config = Self::default();
            config.save(&path)?;
            config
        }
        else {
            tracing::debug!(path = %path.as_ref().display(), "reading config file");
            let toml = std::fs::read_to_string(path)?;
            toml::from_str(&toml)?
        };

        tracing::debug!(?config);

        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        tracing::debug!(path = %path.as_ref().display(), "writing config file");

        let mut writer = BufWriter::new(File::create(&path)?);
        writer.write_all(
            b"# This file will be overwritten with defaults if deleted.\n\n",
        )?;
        writer.write_all(toml::to_string_pretty(self)?.as_bytes())?;

        Ok(())
    }
}
