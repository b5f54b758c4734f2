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
use std::fmt;

use tracing::info;

use crate::effects::{ConfigurationError, EffectSpec};
use crate::engine::validation::{check_bounds, validate_palette};

/// A named set of one or two effects. A `LoopPalette` can only be built from
/// a definition that passes validation, so every palette the engine sees is
/// evaluable.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopPalette {
    id: u64,
    name: String,
    effects: Vec<EffectSpec>,
}

impl LoopPalette {
    /// Creates a palette, validating the name, effect count, targets and the
    /// compatibility rule.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        effects: Vec<EffectSpec>,
    ) -> Result<LoopPalette, ConfigurationError> {
        let name = name.into();
        validate_palette(&name, &effects)?;
        Ok(LoopPalette { id, name, effects })
    }

    /// Creates a palette from authored values, additionally enforcing the
    /// authoring bounds on every effect parameter.
    pub fn authored(
        id: u64,
        name: impl Into<String>,
        effects: Vec<EffectSpec>,
    ) -> Result<LoopPalette, ConfigurationError> {
        for effect in &effects {
            check_bounds(effect)?;
        }
        Self::new(id, name, effects)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All effects in palette order, including disabled ones.
    pub fn effects(&self) -> &[EffectSpec] {
        &self.effects
    }

    pub fn primary(&self) -> &EffectSpec {
        &self.effects[0]
    }

    pub fn secondary(&self) -> Option<&EffectSpec> {
        self.effects.get(1)
    }

    /// Effects that take part in evaluation.
    pub fn active_effects(&self) -> impl Iterator<Item = &EffectSpec> {
        self.effects.iter().filter(|effect| effect.enabled)
    }
}

impl fmt::Display for LoopPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let effects = self
            .effects
            .iter()
            .map(|effect| effect.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        write!(f, "{} (#{}): {}", self.name, self.id, effects)
    }
}

/// In-memory palette repository keyed by case-sensitive, unique name.
#[derive(Debug, Default)]
pub struct PaletteStore {
    palettes: HashMap<String, LoopPalette>,
    next_id: u64,
}

impl PaletteStore {
    pub fn new() -> PaletteStore {
        PaletteStore {
            palettes: HashMap::new(),
            next_id: 1,
        }
    }

    /// Validates and stores a new palette, returning its assigned id.
    pub fn insert(
        &mut self,
        name: &str,
        effects: Vec<EffectSpec>,
    ) -> Result<u64, ConfigurationError> {
        if self.palettes.contains_key(name) {
            return Err(ConfigurationError::DuplicateName(name.to_string()));
        }

        let id = self.next_id.max(1);
        let palette = LoopPalette::new(id, name, effects)?;
        self.next_id = id + 1;

        info!(palette = name, id, "Stored loop palette.");
        self.palettes.insert(name.to_string(), palette);
        Ok(id)
    }

    /// Replaces the effects of an existing palette. The old definition stays
    /// in place if the new one fails validation.
    pub fn replace(
        &mut self,
        name: &str,
        effects: Vec<EffectSpec>,
    ) -> Result<(), ConfigurationError> {
        let existing = self
            .palettes
            .get(name)
            .ok_or_else(|| ConfigurationError::UnknownPalette(name.to_string()))?;

        let palette = LoopPalette::new(existing.id(), name, effects)?;
        self.palettes.insert(name.to_string(), palette);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<LoopPalette> {
        self.palettes.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&LoopPalette> {
        self.palettes.get(name)
    }

    /// Palette names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.palettes.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    /// Palettes sorted by id.
    pub fn sorted_list(&self) -> Vec<&LoopPalette> {
        let mut palettes: Vec<&LoopPalette> = self.palettes.values().collect();
        palettes.sort_by_key(|palette| palette.id());
        palettes
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}
