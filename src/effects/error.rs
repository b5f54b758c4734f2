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
use std::fmt;

use super::target::{PhysicalParameter, TargetParameter};
use super::types::EffectKind;

/// Why two effects may not share a palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    TwoShapeEffects,
    SineConflictsWithShape,
    DuplicateTarget(TargetParameter),
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::TwoShapeEffects => write!(f, "two pan/tilt shape effects"),
            Conflict::SineConflictsWithShape => {
                write!(f, "sine wave on pan/tilt conflicts with shape effect")
            }
            Conflict::DuplicateTarget(target) => {
                write!(f, "duplicate target parameter ({})", target)
            }
        }
    }
}

/// Errors raised while authoring or validating a palette. Never raised during
/// evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("palette name must not be empty")]
    EmptyName,
    #[error("a palette named '{0}' already exists")]
    DuplicateName(String),
    #[error("palette '{0}' not found")]
    UnknownPalette(String),
    #[error("palette '{0}' has no effects")]
    NoEffects(String),
    #[error("palette '{name}' has {count} effects, at most 2 are allowed")]
    TooManyEffects { name: String, count: usize },
    #[error("{kind} effect cannot target {target}")]
    TargetMismatch {
        kind: EffectKind,
        target: TargetParameter,
    },
    #[error("incompatible effects: {0}")]
    Incompatible(Conflict),
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// A palette application references something that no longer exists. The
/// affected fixture is skipped for the tick.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MissingDataError {
    #[error("fixture '{0}' not found")]
    Fixture(String),
    #[error("group or fixture '{0}' not found")]
    Target(String),
}

/// A computed value left its parameter's physical domain and was clamped.
/// Non-fatal: evaluation continues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainClampWarning {
    pub parameter: PhysicalParameter,
    pub raw: f64,
    pub clamped: f64,
}

impl fmt::Display for DomainClampWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} value {:.3} clamped to {:.3}",
            self.parameter, self.raw, self.clamped
        )
    }
}
