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
//! The loop palette data model: effect kinds, their configuration, the
//! parameters they target and the errors raised while authoring them.

mod error;
mod target;
mod types;

#[cfg(test)]
mod tests;

pub use error::{Conflict, ConfigurationError, DomainClampWarning, MissingDataError};
pub use target::{parameter_range, ParameterRange, PhysicalParameter, TargetParameter, Unit};
pub use types::{
    BallyConfig, CircleConfig, Direction, EffectConfig, EffectKind, EffectSpec, Figure8Config,
    GroupMode, SineWaveConfig, StaggerConfig, UOrientation, UShapeConfig, WingStyle,
};
