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
use std::fs;
use std::path::Path;

use config::{Config, File};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::LoadError;
use crate::effects::{EffectConfig, EffectSpec, TargetParameter};
use crate::palette::PaletteStore;

/// A single effect as written in a palette file. The target may be left out,
/// in which case the effect kind's default target is used.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct EffectRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<TargetParameter>,
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(flatten)]
    config: EffectConfig,
}

fn default_enabled() -> bool {
    true
}

impl EffectRecord {
    pub fn to_spec(&self) -> EffectSpec {
        let target = self
            .target
            .unwrap_or_else(|| self.config.kind().default_target());
        EffectSpec {
            target,
            enabled: self.enabled,
            config: self.config.clone(),
        }
    }
}

impl From<&EffectSpec> for EffectRecord {
    fn from(spec: &EffectSpec) -> Self {
        EffectRecord {
            target: Some(spec.target),
            enabled: spec.enabled,
            config: spec.config.clone(),
        }
    }
}

/// A named palette as written in a palette file.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct PaletteRecord {
    name: String,
    #[serde(default)]
    effects: Vec<EffectRecord>,
}

impl PaletteRecord {
    pub fn new(name: impl Into<String>, effects: Vec<EffectRecord>) -> PaletteRecord {
        PaletteRecord {
            name: name.into(),
            effects,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specs(&self) -> Vec<EffectSpec> {
        self.effects.iter().map(EffectRecord::to_spec).collect()
    }
}

/// The configuration for a palette file.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct PaletteFile {
    #[serde(default)]
    palettes: Vec<PaletteRecord>,
}

impl PaletteFile {
    pub fn new(palettes: Vec<PaletteRecord>) -> PaletteFile {
        PaletteFile { palettes }
    }

    /// Parse a palette file from YAML.
    pub fn deserialize(path: &Path) -> Result<PaletteFile, LoadError> {
        Ok(Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize::<PaletteFile>()?)
    }

    pub fn palettes(&self) -> &[PaletteRecord] {
        &self.palettes
    }

    /// Snapshot of a store, ordered by palette id.
    pub fn from_store(store: &PaletteStore) -> PaletteFile {
        PaletteFile {
            palettes: store
                .sorted_list()
                .into_iter()
                .map(|palette| {
                    PaletteRecord::new(
                        palette.name(),
                        palette.effects().iter().map(EffectRecord::from).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Validates every record into the given store. Stored records are not
    /// held to the authoring bounds; out of range output is clamped when
    /// evaluated.
    pub fn load_into(&self, store: &mut PaletteStore) -> Result<(), LoadError> {
        for record in &self.palettes {
            store
                .insert(record.name(), record.specs())
                .map_err(|source| LoadError::Palette {
                    name: record.name().to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Write the file as YAML.
    pub fn save(&self, path: &Path) -> Result<(), LoadError> {
        fs::write(path, serde_yml::to_string(self)?)?;
        info!(
            path = path.display().to_string(),
            palettes = self.palettes.len(),
            "Saved palettes."
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use config::{Config, File, FileFormat};

    use super::*;
    use crate::effects::{
        CircleConfig, ConfigurationError, Conflict, EffectKind, SineWaveConfig, StaggerConfig,
    };

    fn parse(yaml: &str) -> PaletteFile {
        Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_palette_file_deserialize() {
        let file = parse(
            r#"
            palettes:
              - name: Sweep
                effects:
                  - kind: sine_wave
                    target: pan
                    speed: 0.2
                    size: 45
              - name: Orbit
                effects:
                  - kind: circle
                    radius_pan: 40
                  - kind: sine_wave
                    target: dimmer
                    center: 50
                    size: 50
                    enabled: false
            "#,
        );

        assert_eq!(file.palettes().len(), 2);
        let sweep = file.palettes()[0].specs();
        assert_eq!(sweep.len(), 1);
        assert_eq!(sweep[0].target, TargetParameter::Pan);
        assert_eq!(
            sweep[0].config,
            EffectConfig::SineWave(SineWaveConfig {
                speed: 0.2,
                size: 45.0,
                ..Default::default()
            })
        );

        let orbit = file.palettes()[1].specs();
        assert_eq!(orbit[0].target, TargetParameter::PanTiltCircle);
        assert_eq!(
            orbit[0].config,
            EffectConfig::Circle(CircleConfig {
                radius_pan: 40.0,
                ..Default::default()
            })
        );
        assert_eq!(orbit[1].kind(), EffectKind::SineWave);
        assert!(!orbit[1].enabled);
    }

    #[test]
    fn test_load_into_store() {
        let file = parse(
            r#"
            palettes:
              - name: Chase
                effects:
                  - kind: stagger
                    rate: 12
              - name: Fan
                effects:
                  - kind: bally
                    width: 120
            "#,
        );

        let mut store = PaletteStore::new();
        file.load_into(&mut store).unwrap();
        assert_eq!(store.names(), vec!["Chase", "Fan"]);

        let chase = store.get("Chase").unwrap();
        assert_eq!(chase.primary().target, TargetParameter::DimmerStagger);
        assert_eq!(
            chase.primary().config,
            EffectConfig::Stagger(StaggerConfig {
                rate: 12.0,
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_invalid_palette_names_the_palette() {
        let file = parse(
            r#"
            palettes:
              - name: Clash
                effects:
                  - kind: circle
                  - kind: sine_wave
                    target: tilt
            "#,
        );

        let mut store = PaletteStore::new();
        let err = file.load_into(&mut store).unwrap_err();
        match err {
            LoadError::Palette { name, source } => {
                assert_eq!(name, "Clash");
                assert_eq!(
                    source,
                    ConfigurationError::Incompatible(Conflict::SineConflictsWithShape)
                );
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_out_of_range_values_are_loaded() {
        // loaded values are clamped at evaluation rather than rejected
        let file = parse(
            r#"
            palettes:
              - name: Hot
                effects:
                  - kind: sine_wave
                    target: dimmer
                    center: 90
                    size: 50
            "#,
        );
        let mut store = PaletteStore::new();
        assert!(file.load_into(&mut store).is_ok());
    }

    #[test]
    fn test_missing_palettes_key() {
        let file = parse("other: 1");
        assert!(file.palettes().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let mut store = PaletteStore::new();
        store
            .insert(
                "Sweep",
                vec![
                    EffectSpec::circle(CircleConfig {
                        radius_pan: 25.0,
                        ..Default::default()
                    }),
                    EffectSpec::stagger(StaggerConfig::default()).disabled(),
                ],
            )
            .unwrap();
        store
            .insert(
                "Breathe",
                vec![EffectSpec::sine_wave(
                    TargetParameter::Focus,
                    SineWaveConfig {
                        center: 50.0,
                        ..Default::default()
                    },
                )],
            )
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("palettes.yaml");
        PaletteFile::from_store(&store).save(&path).unwrap();

        let mut loaded = PaletteStore::new();
        PaletteFile::deserialize(&path)
            .unwrap()
            .load_into(&mut loaded)
            .unwrap();

        assert_eq!(loaded.names(), store.names());
        for name in store.names() {
            assert_eq!(
                loaded.get(name).unwrap().effects(),
                store.get(name).unwrap().effects()
            );
        }
    }
}
