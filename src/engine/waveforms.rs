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
//! Waveform evaluators. Each is a pure function of its configuration and a
//! phase in cycles; callers fold time, group offsets and static phase bias
//! into that phase before calling.

use std::f64::consts::TAU;

use super::super::effects::{
    BallyConfig, CircleConfig, Figure8Config, SineWaveConfig, StaggerConfig, UOrientation,
    UShapeConfig,
};
use super::validation::STAGGER_SPACING_MIN;

/// Sine wave value. `sign` is the wing modulation (+1 or -1).
#[inline]
pub fn sine_wave(config: &SineWaveConfig, phase: f64, sign: f64) -> f64 {
    config.center + sign * config.size * (TAU * phase).sin()
}

/// Point on the ellipse as (pan, tilt).
#[inline]
pub fn circle(config: &CircleConfig, phase: f64) -> (f64, f64) {
    let theta = TAU * phase;
    (
        config.center_pan + config.radius_pan * theta.cos(),
        config.center_tilt + config.radius_tilt * theta.sin(),
    )
}

/// Point on a U traced as a folded parabola: the sweep runs out along one arm,
/// back through the bottom and up the other arm, then returns along the same
/// path, so the path is closed and continuous over one period.
pub fn u_shape(config: &UShapeConfig, phase: f64) -> (f64, f64) {
    let sweep = (TAU * phase).sin();
    // 0.5 at the tips of the arms, -0.5 at the bottom of the U
    let depth = sweep * sweep - 0.5;

    match config.orientation {
        UOrientation::Up => (config.width / 2.0 * sweep, config.height * depth),
        UOrientation::Down => (config.width / 2.0 * sweep, -config.height * depth),
        UOrientation::Right => (config.width * depth, config.height / 2.0 * sweep),
        UOrientation::Left => (-config.width * depth, config.height / 2.0 * sweep),
    }
}

/// Lissajous figure-8 as (pan, tilt).
#[inline]
pub fn figure8(config: &Figure8Config, phase: f64) -> (f64, f64) {
    let theta = TAU * phase;
    (
        config.width / 2.0 * theta.sin(),
        config.height / 2.0 * (2.0 * theta).sin(),
    )
}

/// Triangle wave in [-1, 1], rising from 0 at phase 0.
#[inline]
pub fn triangle(phase: f64) -> f64 {
    1.0 - 4.0 * ((phase + 0.25).rem_euclid(1.0) - 0.5).abs()
}

/// Pan position of a bally sweep. Tilt is left alone.
#[inline]
pub fn bally(config: &BallyConfig, phase: f64) -> f64 {
    config.width / 2.0 * triangle(phase)
}

/// Slots per stagger cycle. Loaded records may carry less than the minimum.
#[inline]
pub fn stagger_spacing(config: &StaggerConfig) -> u32 {
    config.spacing.max(STAGGER_SPACING_MIN)
}

/// Dimmer level of a stagger toggle: on for the first `1 / spacing` of each
/// cycle, off for the rest.
#[inline]
pub fn stagger(config: &StaggerConfig, phase: f64) -> f64 {
    let spacing = stagger_spacing(config) as f64;
    if phase.rem_euclid(1.0) < 1.0 / spacing {
        config.level
    } else {
        0.0
    }
}
