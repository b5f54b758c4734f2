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
use crate::effects::ConfigurationError;

/// Typed error for loading and saving palette and engine files, so callers can
/// tell a missing file from a parse error or an invalid palette.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Config load/parse error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),
    #[error("unrecognized legacy effect record: {0}")]
    Legacy(String),
    #[error("palette '{name}': {source}")]
    Palette {
        name: String,
        #[source]
        source: ConfigurationError,
    },
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
