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
//! Phase math shared by every evaluator. Phase is measured in cycles and
//! normalized to [0, 1); angles are `TAU * phase`.

use std::time::Duration;

use super::super::effects::{GroupMode, WingStyle};

/// Wrap a phase into [0, 1).
#[inline]
pub fn normalize(phase: f64) -> f64 {
    let wrapped = phase.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Cycles elapsed at the given frequency.
#[inline]
pub fn cycles(elapsed: Duration, frequency: f64) -> f64 {
    elapsed.as_secs_f64() * frequency
}

/// Convert a static phase bias in degrees to cycles.
#[inline]
pub fn degrees_to_cycles(degrees: f64) -> f64 {
    degrees / 360.0
}

/// Phase offset, in cycles, of the fixture at `index` out of `count`.
pub fn group_phase_offset(mode: GroupMode, index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }

    match mode {
        GroupMode::AllSamePhase => 0.0,
        GroupMode::SpreadPhaseEvenly => index as f64 / count as f64,
        GroupMode::Block2 | GroupMode::Block3 | GroupMode::Block4 => {
            let size = mode.block_size().unwrap_or(1);
            let blocks = count.div_ceil(size);
            let block = index / size;
            block as f64 / blocks as f64
        }
    }
}

/// Which wing the fixture at `index` belongs to, and how many wings there are.
pub fn wing_of(
    style: WingStyle,
    wing_center_percent: f64,
    index: usize,
    count: usize,
) -> (usize, usize) {
    if count == 0 {
        return (0, 1);
    }

    match style {
        WingStyle::None => (0, 1),
        WingStyle::Symmetrical2Wings => ((index * 2 / count).min(1), 2),
        WingStyle::Symmetrical3Wings => ((index * 3 / count).min(2), 3),
        WingStyle::Asymmetrical2Wings => {
            let split = asymmetric_split(wing_center_percent, count);
            (usize::from(index >= split), 2)
        }
    }
}

/// Index where the second asymmetric wing starts.
fn asymmetric_split(wing_center_percent: f64, count: usize) -> usize {
    let percent = if wing_center_percent.is_finite() {
        wing_center_percent.clamp(0.0, 100.0)
    } else {
        50.0
    };
    ((count as f64 * percent / 100.0).round() as usize).min(count)
}

/// Sign applied to the sine output of the fixture at `index`. Wings are
/// computed over the whole group after the group mode has set the phase, so
/// this never feeds back into the phase itself.
pub fn wing_sign(style: WingStyle, wing_center_percent: f64, index: usize, count: usize) -> f64 {
    let (wing, _) = wing_of(style, wing_center_percent, index, count);

    let inverted = match style {
        WingStyle::None => false,
        WingStyle::Symmetrical2Wings => wing == 1,
        // outer wings run together, the middle one mirrors them
        WingStyle::Symmetrical3Wings => wing == 1,
        WingStyle::Asymmetrical2Wings => {
            let split = asymmetric_split(wing_center_percent, count);
            let first = split;
            let second = count - split;
            if first < second {
                wing == 0
            } else {
                wing == 1
            }
        }
    };

    if inverted {
        -1.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(0.25), 0.25);
        assert_eq!(normalize(1.25), 0.25);
        assert_eq!(normalize(-0.25), 0.75);
        assert_eq!(normalize(3.0), 0.0);
        assert!(normalize(-1e-18) < 1.0);
    }

    #[test]
    fn test_all_same_phase() {
        for i in 0..8 {
            assert_eq!(group_phase_offset(GroupMode::AllSamePhase, i, 8), 0.0);
        }
    }

    #[test]
    fn test_spread_phase_evenly() {
        let offsets: Vec<f64> = (0..4)
            .map(|i| group_phase_offset(GroupMode::SpreadPhaseEvenly, i, 4))
            .collect();
        assert_eq!(offsets, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_block_offsets() {
        // 5 fixtures in blocks of 2: [0,1] [2,3] [4], three blocks
        let offsets: Vec<f64> = (0..5)
            .map(|i| group_phase_offset(GroupMode::Block2, i, 5))
            .collect();
        assert_eq!(offsets[0], offsets[1]);
        assert_eq!(offsets[2], offsets[3]);
        assert!((offsets[2] - 1.0 / 3.0).abs() < 1e-12);
        assert!((offsets[4] - 2.0 / 3.0).abs() < 1e-12);

        // 8 fixtures in blocks of 4: two blocks
        assert_eq!(group_phase_offset(GroupMode::Block4, 3, 8), 0.0);
        assert_eq!(group_phase_offset(GroupMode::Block4, 4, 8), 0.5);

        assert_eq!(group_phase_offset(GroupMode::Block3, 2, 3), 0.0);
    }

    #[test]
    fn test_empty_group() {
        assert_eq!(group_phase_offset(GroupMode::SpreadPhaseEvenly, 0, 0), 0.0);
        assert_eq!(wing_sign(WingStyle::Symmetrical2Wings, 50.0, 0, 0), 1.0);
    }

    #[test]
    fn test_symmetrical_two_wings() {
        let signs: Vec<f64> = (0..6)
            .map(|i| wing_sign(WingStyle::Symmetrical2Wings, 50.0, i, 6))
            .collect();
        assert_eq!(signs, vec![1.0, 1.0, 1.0, -1.0, -1.0, -1.0]);
    }

    #[test]
    fn test_symmetrical_three_wings() {
        let signs: Vec<f64> = (0..6)
            .map(|i| wing_sign(WingStyle::Symmetrical3Wings, 50.0, i, 6))
            .collect();
        assert_eq!(signs, vec![1.0, 1.0, -1.0, -1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_asymmetrical_wings_invert_shorter() {
        // split at 25% of 8 -> first wing is 2 fixtures and shorter
        let signs: Vec<f64> = (0..8)
            .map(|i| wing_sign(WingStyle::Asymmetrical2Wings, 25.0, i, 8))
            .collect();
        assert_eq!(signs, vec![-1.0, -1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);

        // split at 75% -> second wing is shorter
        let signs: Vec<f64> = (0..8)
            .map(|i| wing_sign(WingStyle::Asymmetrical2Wings, 75.0, i, 8))
            .collect();
        assert_eq!(signs, vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, -1.0, -1.0]);

        // equal wings match the symmetric case
        for i in 0..8 {
            assert_eq!(
                wing_sign(WingStyle::Asymmetrical2Wings, 50.0, i, 8),
                wing_sign(WingStyle::Symmetrical2Wings, 50.0, i, 8)
            );
        }
    }

    #[test]
    fn test_wing_of_counts() {
        assert_eq!(wing_of(WingStyle::None, 50.0, 3, 4), (0, 1));
        assert_eq!(wing_of(WingStyle::Symmetrical3Wings, 50.0, 8, 9), (2, 3));
        assert_eq!(wing_of(WingStyle::Asymmetrical2Wings, 150.0, 3, 4), (0, 2));
    }
}
