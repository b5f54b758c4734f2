// Copyright (C) 2025 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, Source};
use serde::Deserialize;

use super::error::LoadError;
use crate::fixtures::FixtureRegistry;
use crate::ticker::{validate_tick_rate, DEFAULT_TICK_RATE_HZ};

/// Prefix of the environment variables that override engine settings.
pub const ENV_PREFIX: &str = "LOOPFX";

fn default_tick_rate_hz() -> u32 {
    DEFAULT_TICK_RATE_HZ
}

/// The configuration for the engine host.
#[derive(Deserialize, Clone, Debug)]
pub struct EngineConfig {
    /// How often frames are produced.
    #[serde(default = "default_tick_rate_hz")]
    tick_rate_hz: u32,

    /// Every patched fixture.
    #[serde(default)]
    fixtures: Vec<String>,

    /// Named fixture groups. Members are kept in the order given.
    #[serde(default)]
    groups: HashMap<String, Vec<String>>,

    /// Palette files to load, relative to the config file.
    #[serde(default)]
    palette_files: Vec<PathBuf>,

    #[serde(skip)]
    base_dir: PathBuf,
}

impl EngineConfig {
    /// Parse the engine configuration from a YAML file, applying any
    /// `LOOPFX_` environment overrides.
    pub fn deserialize(path: &Path) -> Result<EngineConfig, LoadError> {
        let environment = Environment::with_prefix(ENV_PREFIX).try_parsing(true);
        let mut config = Self::from_sources(File::from(path), environment)?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    /// Builds the configuration from a file source and an environment source.
    pub fn from_sources<F, E>(file: F, environment: E) -> Result<EngineConfig, LoadError>
    where
        F: Source + Send + Sync + 'static,
        E: Source + Send + Sync + 'static,
    {
        let config = Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()?
            .try_deserialize::<EngineConfig>()?;
        validate_tick_rate(config.tick_rate_hz)?;
        Ok(config)
    }

    pub fn tick_rate_hz(&self) -> u32 {
        self.tick_rate_hz
    }

    pub fn fixtures(&self) -> &[String] {
        &self.fixtures
    }

    pub fn groups(&self) -> &HashMap<String, Vec<String>> {
        &self.groups
    }

    /// Palette file paths resolved against the config file's directory.
    pub fn palette_files(&self) -> Vec<PathBuf> {
        self.palette_files
            .iter()
            .map(|path| self.base_dir.join(path))
            .collect()
    }

    /// The fixture registry described by this configuration.
    pub fn registry(&self) -> FixtureRegistry {
        let mut registry = FixtureRegistry::new();
        for fixture in &self.fixtures {
            registry.register_fixture(fixture.clone());
        }
        for (name, members) in &self.groups {
            registry.register_group(name.clone(), members.clone());
        }
        registry
    }
}
