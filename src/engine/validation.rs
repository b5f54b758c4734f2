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
use super::super::effects::{
    parameter_range, Conflict, ConfigurationError, EffectConfig, EffectSpec, TargetParameter,
};

/// Slowest and fastest authorable effect speed, in Hz.
pub const SPEED_MIN: f64 = 0.01;
pub const SPEED_MAX: f64 = 10.0;

/// Stagger toggles faster than a sine moves.
pub const STAGGER_RATE_MAX: f64 = 50.0;
/// A stagger needs at least an on slot and an off slot per cycle.
pub const STAGGER_SPACING_MIN: u32 = 2;
pub const STAGGER_SPACING_MAX: u32 = 16;

fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ConfigurationError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ConfigurationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Validate a single effect: its target must be legal for its kind.
pub fn validate_spec(spec: &EffectSpec) -> Result<(), ConfigurationError> {
    let kind = spec.kind();
    if !kind.allowed_targets().contains(&spec.target) {
        return Err(ConfigurationError::TargetMismatch {
            kind,
            target: spec.target,
        });
    }
    Ok(())
}

/// Check an effect's parameters against the authoring bounds. Loaded records
/// skip this; the evaluator clamps whatever they produce.
pub fn check_bounds(spec: &EffectSpec) -> Result<(), ConfigurationError> {
    let pan = parameter_range(TargetParameter::Pan);
    let tilt = parameter_range(TargetParameter::Tilt);

    match &spec.config {
        EffectConfig::SineWave(config) => {
            let range = parameter_range(spec.target);
            check_range("speed", config.speed, SPEED_MIN, SPEED_MAX)?;
            check_range("size", config.size, 0.0, range.span())?;
            check_range("center", config.center, range.min, range.max)?;
            check_range("phase_degrees", config.phase_degrees, -360.0, 360.0)?;
            check_range("wing_center_percent", config.wing_center_percent, 0.0, 100.0)?;
        }
        EffectConfig::Circle(config) => {
            check_range("speed", config.speed, SPEED_MIN, SPEED_MAX)?;
            check_range("radius_pan", config.radius_pan, 0.0, pan.span() / 2.0)?;
            check_range("radius_tilt", config.radius_tilt, 0.0, tilt.span() / 2.0)?;
            check_range("center_pan", config.center_pan, pan.min, pan.max)?;
            check_range("center_tilt", config.center_tilt, tilt.min, tilt.max)?;
            check_range("phase_degrees", config.phase_degrees, -360.0, 360.0)?;
        }
        EffectConfig::UShape(config) => {
            check_range("speed", config.speed, SPEED_MIN, SPEED_MAX)?;
            check_range("width", config.width, 0.0, pan.span())?;
            check_range("height", config.height, 0.0, tilt.span())?;
        }
        EffectConfig::Figure8(config) => {
            check_range("speed", config.speed, SPEED_MIN, SPEED_MAX)?;
            check_range("width", config.width, 0.0, pan.span())?;
            check_range("height", config.height, 0.0, tilt.span())?;
        }
        EffectConfig::Bally(config) => {
            check_range("speed", config.speed, SPEED_MIN, SPEED_MAX)?;
            check_range("width", config.width, 0.0, pan.span())?;
        }
        EffectConfig::Stagger(config) => {
            let dimmer = parameter_range(TargetParameter::DimmerStagger);
            check_range("rate", config.rate, SPEED_MIN, STAGGER_RATE_MAX)?;
            check_range(
                "spacing",
                config.spacing as f64,
                STAGGER_SPACING_MIN as f64,
                STAGGER_SPACING_MAX as f64,
            )?;
            check_range("level", config.level, dimmer.min, dimmer.max)?;
        }
    }

    Ok(())
}

/// Check whether two effects may share a palette. Rules are applied in order
/// and the first one broken is reported.
pub fn check_compatibility(primary: &EffectSpec, secondary: &EffectSpec) -> Result<(), Conflict> {
    let a = primary.target;
    let b = secondary.target;

    if a.is_pan_tilt_composite() && b.is_pan_tilt_composite() {
        return Err(Conflict::TwoShapeEffects);
    }

    let sine_on_pan_tilt = |spec: &EffectSpec| {
        matches!(spec.config, EffectConfig::SineWave(_)) && spec.target.is_single_pan_or_tilt()
    };
    if (a.is_pan_tilt_composite() && sine_on_pan_tilt(secondary))
        || (b.is_pan_tilt_composite() && sine_on_pan_tilt(primary))
    {
        return Err(Conflict::SineConflictsWithShape);
    }

    if !a.is_composite() && !b.is_composite() && a == b {
        return Err(Conflict::DuplicateTarget(a));
    }

    Ok(())
}

/// Validate a primary effect and an optional secondary one, returning the
/// ordered effect list ready for evaluation.
pub fn validate_pair(
    primary: &EffectSpec,
    secondary: Option<&EffectSpec>,
) -> Result<Vec<EffectSpec>, ConfigurationError> {
    validate_spec(primary)?;

    let Some(secondary) = secondary else {
        return Ok(vec![primary.clone()]);
    };

    validate_spec(secondary)?;
    check_compatibility(primary, secondary).map_err(ConfigurationError::Incompatible)?;

    Ok(vec![primary.clone(), secondary.clone()])
}

/// Validate a complete palette definition.
pub fn validate_palette(name: &str, effects: &[EffectSpec]) -> Result<(), ConfigurationError> {
    if name.trim().is_empty() {
        return Err(ConfigurationError::EmptyName);
    }

    match effects {
        [] => Err(ConfigurationError::NoEffects(name.to_string())),
        [primary] => validate_pair(primary, None).map(|_| ()),
        [primary, secondary] => validate_pair(primary, Some(secondary)).map(|_| ()),
        _ => Err(ConfigurationError::TooManyEffects {
            name: name.to_string(),
            count: effects.len(),
        }),
    }
}
