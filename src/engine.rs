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
//! The motion effect engine. Evaluation is a pure function of the palette,
//! the fixture's ordinal within its group, the group size and elapsed time,
//! so it can run on any number of threads at once.

pub mod phase;
pub mod validation;
pub mod waveforms;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use rayon::prelude::*;
use tracing::debug;

use crate::effects::{
    DomainClampWarning, EffectConfig, EffectKind, EffectSpec, MissingDataError,
    PhysicalParameter,
};
use crate::fixtures::Membership;
use crate::output::{FixtureOutput, Frame};
use crate::palette::LoopPalette;

use self::phase::{cycles, degrees_to_cycles, group_phase_offset, normalize, wing_sign};

/// Output values keyed by physical parameter.
pub type ParameterValues = BTreeMap<PhysicalParameter, f64>;

/// The result of evaluating a palette for one fixture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub values: ParameterValues,
    pub clamps: Vec<DomainClampWarning>,
}

impl Evaluation {
    /// Clamps a raw value to the parameter's domain, noting any clamp.
    fn clamp(&mut self, parameter: PhysicalParameter, raw: f64) -> f64 {
        let clamped = parameter.range().clamp(raw);
        if clamped != raw {
            self.clamps.push(DomainClampWarning {
                parameter,
                raw,
                clamped,
            });
        }
        clamped
    }

    /// Records a raw value, clamping it to the parameter's domain.
    fn set(&mut self, parameter: PhysicalParameter, raw: f64) {
        let clamped = self.clamp(parameter, raw);
        self.values.insert(parameter, clamped);
    }

    /// Records a level that scales whatever an earlier effect wrote to the
    /// same parameter, as a fraction of the parameter's span. With nothing
    /// written yet the level is recorded as is.
    fn multiply(&mut self, parameter: PhysicalParameter, raw: f64) {
        let level = self.clamp(parameter, raw);
        let range = parameter.range();
        let fraction = (level - range.min) / range.span();
        let value = match self.values.get(&parameter) {
            Some(existing) => range.min + (existing - range.min) * fraction,
            None => level,
        };
        self.values.insert(parameter, value);
    }

    pub fn get(&self, parameter: PhysicalParameter) -> Option<f64> {
        self.values.get(&parameter).copied()
    }
}

/// Evaluate one effect for the fixture at `index` of `count`.
pub fn evaluate_effect(
    spec: &EffectSpec,
    index: usize,
    count: usize,
    elapsed: Duration,
    evaluation: &mut Evaluation,
) {
    match &spec.config {
        EffectConfig::SineWave(config) => {
            let phase = normalize(
                cycles(elapsed, config.speed) * config.direction.sign()
                    + degrees_to_cycles(config.phase_degrees)
                    + group_phase_offset(config.group_mode, index, count),
            );
            let sign = wing_sign(config.wing_style, config.wing_center_percent, index, count);
            let value = waveforms::sine_wave(config, phase, sign);
            for parameter in spec.target.physical() {
                evaluation.set(*parameter, value);
            }
        }
        EffectConfig::Circle(config) => {
            let phase = normalize(
                cycles(elapsed, config.speed)
                    + degrees_to_cycles(config.phase_degrees)
                    + group_phase_offset(config.group_mode, index, count),
            );
            let (pan, tilt) = waveforms::circle(config, phase);
            evaluation.set(PhysicalParameter::Pan, pan);
            evaluation.set(PhysicalParameter::Tilt, tilt);
        }
        EffectConfig::UShape(config) => {
            let (pan, tilt) = waveforms::u_shape(config, normalize(cycles(elapsed, config.speed)));
            evaluation.set(PhysicalParameter::Pan, pan);
            evaluation.set(PhysicalParameter::Tilt, tilt);
        }
        EffectConfig::Figure8(config) => {
            let (pan, tilt) = waveforms::figure8(config, normalize(cycles(elapsed, config.speed)));
            evaluation.set(PhysicalParameter::Pan, pan);
            evaluation.set(PhysicalParameter::Tilt, tilt);
        }
        EffectConfig::Bally(config) => {
            let pan = waveforms::bally(config, normalize(cycles(elapsed, config.speed)));
            evaluation.set(PhysicalParameter::Pan, pan);
        }
        EffectConfig::Stagger(config) => {
            // one slot per 1/rate seconds, a cycle is `spacing` slots and each
            // fixture starts one slot after its neighbour
            let spacing = waveforms::stagger_spacing(config) as f64;
            let phase = normalize((cycles(elapsed, config.rate) + index as f64) / spacing);
            let level = waveforms::stagger(config, phase);
            // gates any dimmer already written
            evaluation.multiply(PhysicalParameter::Dimmer, level);
        }
    }
}

/// Evaluate every enabled effect of a palette for one fixture. Composite
/// effects write their physical parameters, never the composite tag.
/// Staggers run last so they gate a dimmer written by the other effect in
/// either palette order.
pub fn evaluate(
    palette: &LoopPalette,
    fixture_index: usize,
    fixture_count: usize,
    elapsed: Duration,
) -> Evaluation {
    let is_gate = |spec: &&EffectSpec| spec.kind() == EffectKind::Stagger;
    let others = palette.active_effects().filter(|spec| !is_gate(spec));
    let gates = palette.active_effects().filter(is_gate);

    let mut evaluation = Evaluation::default();
    for spec in others.chain(gates) {
        evaluate_effect(spec, fixture_index, fixture_count, elapsed, &mut evaluation);
    }
    evaluation
}

/// Outputs of every available fixture of a membership for one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutput {
    pub fixtures: Vec<FixtureOutput>,
    pub skipped: Vec<MissingDataError>,
    pub clamp_count: usize,
}

/// Evaluate a palette for every fixture of a membership. Missing fixtures are
/// skipped and reported; they never stop the others from being evaluated.
pub fn evaluate_batch(
    palette: &LoopPalette,
    membership: &Membership,
    elapsed: Duration,
) -> BatchOutput {
    let count = membership.fixture_count();

    let evaluated: Vec<(FixtureOutput, Vec<DomainClampWarning>)> = membership
        .slots()
        .par_iter()
        .filter(|slot| slot.available)
        .map(|slot| {
            let evaluation = evaluate(palette, slot.index, count, elapsed);
            (
                FixtureOutput {
                    name: slot.name.clone(),
                    index: slot.index,
                    values: evaluation.values,
                },
                evaluation.clamps,
            )
        })
        .collect();

    let mut clamp_count = 0;
    let mut fixtures = Vec::with_capacity(evaluated.len());
    for (output, clamps) in evaluated {
        for clamp in &clamps {
            debug!(
                palette = palette.name(),
                fixture = output.name.as_str(),
                "{}",
                clamp
            );
        }
        clamp_count += clamps.len();
        fixtures.push(output);
    }

    BatchOutput {
        fixtures,
        skipped: membership.missing(),
        clamp_count,
    }
}

/// Binds an immutable palette to the fixtures it is applied to and produces
/// frames for a tick source.
#[derive(Debug, Clone)]
pub struct MotionEffectEngine {
    palette: Arc<LoopPalette>,
    membership: Membership,
    clamp_total: u64,
}

impl MotionEffectEngine {
    pub fn new(palette: Arc<LoopPalette>, membership: Membership) -> MotionEffectEngine {
        MotionEffectEngine {
            palette,
            membership,
            clamp_total: 0,
        }
    }

    pub fn palette(&self) -> &LoopPalette {
        &self.palette
    }

    pub fn membership(&self) -> &Membership {
        &self.membership
    }

    /// Swaps the palette between ticks.
    pub fn reconfigure(&mut self, palette: Arc<LoopPalette>) {
        self.palette = palette;
    }

    /// Clamp warnings counted across every frame produced so far.
    pub fn clamp_total(&self) -> u64 {
        self.clamp_total
    }

    /// Produce the frame for the given tick.
    pub fn frame(&mut self, tick: u64, elapsed: Duration) -> Frame {
        let output = evaluate_batch(&self.palette, &self.membership, elapsed);
        self.clamp_total += output.clamp_count as u64;
        for missing in &output.skipped {
            debug!(palette = self.palette.name(), tick, "Skipped: {}", missing);
        }
        Frame {
            tick,
            elapsed,
            palette: self.palette.name().to_string(),
            fixtures: output.fixtures,
            skipped: output.skipped,
        }
    }
}
