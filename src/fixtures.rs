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
use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::effects::MissingDataError;

/// A fixture position within the ordered target set of a palette application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub name: String,
    pub index: usize,
    /// False if the fixture is no longer patched. The slot keeps its index so
    /// the phases of the other fixtures don't shift.
    pub available: bool,
}

/// The resolved, ordered fixture set of a palette application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    slots: Vec<Slot>,
    unresolved: Vec<MissingDataError>,
}

impl Membership {
    /// Builds a membership where every named fixture is available.
    pub fn from_names<I, S>(names: I) -> Membership
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slots = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| Slot {
                name: name.into(),
                index,
                available: true,
            })
            .collect();
        Membership {
            slots,
            unresolved: Vec::new(),
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of fixtures phase is distributed over, missing ones included.
    pub fn fixture_count(&self) -> usize {
        self.slots.len()
    }

    /// Targets that could not be resolved at all.
    pub fn unresolved(&self) -> &[MissingDataError] {
        &self.unresolved
    }

    /// Every missing fixture or target, in order.
    pub fn missing(&self) -> Vec<MissingDataError> {
        self.unresolved
            .iter()
            .cloned()
            .chain(
                self.slots
                    .iter()
                    .filter(|slot| !slot.available)
                    .map(|slot| MissingDataError::Fixture(slot.name.clone())),
            )
            .collect()
    }
}

/// Supplies the deterministic, ordered fixture set a palette is applied to.
pub trait MembershipProvider {
    /// Resolves fixture and group names into an ordered membership.
    fn resolve(&self, targets: &[String]) -> Membership;
}

/// Fixtures and groups known to the engine host.
#[derive(Debug, Clone, Default)]
pub struct FixtureRegistry {
    fixtures: HashSet<String>,
    groups: HashMap<String, Vec<String>>,
}

impl FixtureRegistry {
    pub fn new() -> FixtureRegistry {
        FixtureRegistry::default()
    }

    pub fn register_fixture(&mut self, name: impl Into<String>) {
        self.fixtures.insert(name.into());
    }

    pub fn unregister_fixture(&mut self, name: &str) -> bool {
        self.fixtures.remove(name)
    }

    /// Registers a group. Members are kept in the given order.
    pub fn register_group(&mut self, name: impl Into<String>, members: Vec<String>) {
        self.groups.insert(name.into(), members);
    }

    pub fn has_fixture(&self, name: &str) -> bool {
        self.fixtures.contains(name)
    }

    pub fn group(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn fixture_count(&self) -> usize {
        self.fixtures.len()
    }
}

impl MembershipProvider for FixtureRegistry {
    fn resolve(&self, targets: &[String]) -> Membership {
        let mut candidates: Vec<&str> = Vec::new();
        let mut unresolved = Vec::new();

        for target in targets {
            if let Some(members) = self.groups.get(target) {
                candidates.extend(members.iter().map(String::as_str));
            } else if self.fixtures.contains(target) {
                candidates.push(target);
            } else {
                warn!(target = target.as_str(), "Palette target not found.");
                unresolved.push(MissingDataError::Target(target.clone()));
            }
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let slots = candidates
            .into_iter()
            .filter(|name| seen.insert(*name))
            .enumerate()
            .map(|(index, name)| Slot {
                name: name.to_string(),
                index,
                available: self.fixtures.contains(name),
            })
            .collect();

        Membership { slots, unresolved }
    }
}
