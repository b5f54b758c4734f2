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
use std::path::{Path, PathBuf};

use tracing::info;

use crate::palette::PaletteStore;

mod engine;
mod error;
pub mod legacy;
mod palette;

pub use self::engine::{EngineConfig, ENV_PREFIX};
pub use self::error::LoadError;
pub use self::palette::{EffectRecord, PaletteFile, PaletteRecord};

/// Parses a palette file. JSON files may hold legacy records; anything else
/// is read as YAML.
pub fn parse_palette_file(path: &Path) -> Result<PaletteFile, LoadError> {
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    if is_json {
        legacy::deserialize(path)
    } else {
        PaletteFile::deserialize(path)
    }
}

/// Loads every palette of the given files into one store. Names must be
/// unique across all files.
pub fn load_palettes(paths: &[PathBuf]) -> Result<PaletteStore, LoadError> {
    let mut store = PaletteStore::new();
    for path in paths {
        parse_palette_file(path)?.load_into(&mut store)?;
        info!(path = path.display().to_string(), "Loaded palette file.");
    }
    Ok(store)
}
