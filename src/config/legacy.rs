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

//! Older palette records stored one untagged effect object per palette, and its
//! shape was guessed from which keys it had. These are upgraded into tagged
//! effect lists here and nowhere else.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::error::LoadError;
use super::palette::{EffectRecord, PaletteFile, PaletteRecord};
use crate::effects::{
    BallyConfig, CircleConfig, EffectConfig, EffectKind, EffectSpec, Figure8Config,
    SineWaveConfig, StaggerConfig, TargetParameter, UShapeConfig,
};

#[derive(Deserialize)]
struct LegacyPalette {
    name: String,
    #[serde(alias = "effect")]
    effects: Value,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LegacyFile {
    Wrapped { palettes: Vec<LegacyPalette> },
    Bare(Vec<LegacyPalette>),
}

/// Guess the kind of an untagged effect object from its keys.
pub fn infer_kind(object: &Map<String, Value>) -> EffectKind {
    let has = |key: &str| object.contains_key(key);
    if has("radius_pan") {
        EffectKind::Circle
    } else if has("orientation") {
        EffectKind::UShape
    } else if has("rate") {
        EffectKind::Stagger
    } else if has("width") && has("height") {
        EffectKind::Figure8
    } else if has("width") {
        EffectKind::Bally
    } else {
        EffectKind::SineWave
    }
}

fn upgrade_object(mut object: Map<String, Value>) -> Result<EffectSpec, LoadError> {
    let kind = infer_kind(&object);
    let target = match object.remove("target") {
        Some(target) => serde_json::from_value::<TargetParameter>(target)?,
        None => kind.default_target(),
    };
    let enabled = match object.remove("enabled") {
        Some(Value::Bool(enabled)) => enabled,
        Some(other) => {
            return Err(LoadError::Legacy(format!(
                "enabled must be a bool, got {}",
                other
            )))
        }
        None => true,
    };

    let fields = Value::Object(object);
    let config = match kind {
        EffectKind::SineWave => {
            EffectConfig::SineWave(serde_json::from_value::<SineWaveConfig>(fields)?)
        }
        EffectKind::Circle => {
            EffectConfig::Circle(serde_json::from_value::<CircleConfig>(fields)?)
        }
        EffectKind::UShape => {
            EffectConfig::UShape(serde_json::from_value::<UShapeConfig>(fields)?)
        }
        EffectKind::Figure8 => {
            EffectConfig::Figure8(serde_json::from_value::<Figure8Config>(fields)?)
        }
        EffectKind::Bally => EffectConfig::Bally(serde_json::from_value::<BallyConfig>(fields)?),
        EffectKind::Stagger => {
            EffectConfig::Stagger(serde_json::from_value::<StaggerConfig>(fields)?)
        }
    };

    debug!(%kind, %target, "Upgraded legacy effect record.");
    Ok(EffectSpec {
        target,
        enabled,
        config,
    })
}

/// Upgrade a stored effect value into an effect list. A list of tagged
/// effects is taken as-is, a single tagged effect becomes a one element list,
/// and an untagged object is upgraded by key presence.
pub fn upgrade(value: Value) -> Result<Vec<EffectSpec>, LoadError> {
    match value {
        Value::Array(_) => Ok(serde_json::from_value::<Vec<EffectRecord>>(value)?
            .iter()
            .map(EffectRecord::to_spec)
            .collect()),
        Value::Object(object) if object.contains_key("kind") => {
            let record: EffectRecord = serde_json::from_value(Value::Object(object))?;
            Ok(vec![record.to_spec()])
        }
        Value::Object(object) => Ok(vec![upgrade_object(object)?]),
        other => Err(LoadError::Legacy(format!(
            "expected an effect object or list, got {}",
            other
        ))),
    }
}

/// Parse a JSON palette file, upgrading any legacy records.
pub fn parse(json: &str) -> Result<PaletteFile, LoadError> {
    let palettes = match serde_json::from_str::<LegacyFile>(json)? {
        LegacyFile::Wrapped { palettes } => palettes,
        LegacyFile::Bare(palettes) => palettes,
    };

    let records = palettes
        .into_iter()
        .map(|palette| {
            let effects = upgrade(palette.effects)?;
            Ok(PaletteRecord::new(
                palette.name,
                effects.iter().map(EffectRecord::from).collect(),
            ))
        })
        .collect::<Result<Vec<PaletteRecord>, LoadError>>()?;

    Ok(PaletteFile::new(records))
}

/// Read a JSON palette file from disk.
pub fn deserialize(path: &Path) -> Result<PaletteFile, LoadError> {
    parse(&fs::read_to_string(path)?)
}
