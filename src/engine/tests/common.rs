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
use std::time::Duration;

use crate::effects::{EffectSpec, SineWaveConfig, TargetParameter};
use crate::palette::LoopPalette;

pub(crate) const TOLERANCE: f64 = 1e-6;

pub(crate) fn assert_close(actual: f64, expected: f64, context: &str) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "{}: expected {}, got {}",
        context,
        expected,
        actual
    );
}

pub(crate) fn secs(seconds: f64) -> Duration {
    Duration::from_secs_f64(seconds)
}

pub(crate) fn palette(effects: Vec<EffectSpec>) -> LoopPalette {
    LoopPalette::new(1, "test_palette", effects).unwrap()
}

pub(crate) fn sine_palette(target: TargetParameter, config: SineWaveConfig) -> LoopPalette {
    palette(vec![EffectSpec::sine_wave(target, config)])
}
