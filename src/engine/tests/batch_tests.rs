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
use std::sync::Arc;
use std::thread;

use crate::effects::*;
use crate::engine::tests::common::{palette, secs, sine_palette};
use crate::engine::{evaluate, evaluate_batch, MotionEffectEngine};
use crate::fixtures::{FixtureRegistry, Membership, MembershipProvider};

fn registry() -> FixtureRegistry {
    let mut registry = FixtureRegistry::new();
    let members: Vec<String> = (1..=4).map(|n| format!("spot{}", n)).collect();
    for name in &members {
        registry.register_fixture(name.clone());
    }
    registry.register_group("spots", members);
    registry
}

#[test]
fn test_batch_matches_single_evaluation() {
    let palette = sine_palette(
        TargetParameter::Pan,
        SineWaveConfig {
            group_mode: GroupMode::SpreadPhaseEvenly,
            ..Default::default()
        },
    );
    let membership = registry().resolve(&["spots".to_string()]);
    let elapsed = secs(1.3);

    let output = evaluate_batch(&palette, &membership, elapsed);
    assert_eq!(output.fixtures.len(), 4);
    assert!(output.skipped.is_empty());
    for fixture in &output.fixtures {
        assert_eq!(
            fixture.values,
            evaluate(&palette, fixture.index, 4, elapsed).values
        );
    }
    // order follows membership
    let names: Vec<&str> = output.fixtures.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["spot1", "spot2", "spot3", "spot4"]);
}

#[test]
fn test_missing_fixture_is_skipped_without_shifting_phase() {
    let palette = sine_palette(
        TargetParameter::Tilt,
        SineWaveConfig {
            size: 20.0,
            group_mode: GroupMode::SpreadPhaseEvenly,
            ..Default::default()
        },
    );
    let mut registry = registry();
    registry.unregister_fixture("spot2");
    let membership = registry.resolve(&["spots".to_string(), "lasers".to_string()]);
    let elapsed = secs(0.4);

    let output = evaluate_batch(&palette, &membership, elapsed);
    assert_eq!(output.fixtures.len(), 3);
    assert_eq!(
        output.skipped,
        vec![
            MissingDataError::Target("lasers".to_string()),
            MissingDataError::Fixture("spot2".to_string()),
        ]
    );

    let spot3 = output
        .fixtures
        .iter()
        .find(|f| f.name == "spot3")
        .unwrap();
    assert_eq!(spot3.index, 2);
    assert_eq!(spot3.values, evaluate(&palette, 2, 4, elapsed).values);
}

#[test]
fn test_batch_counts_clamps() {
    let palette = sine_palette(
        TargetParameter::Dimmer,
        SineWaveConfig {
            speed: 1.0,
            size: 50.0,
            center: 90.0,
            ..Default::default()
        },
    );
    let membership = Membership::from_names(["a", "b", "c"]);
    let output = evaluate_batch(&palette, &membership, secs(0.25));
    assert_eq!(output.clamp_count, 3);
}

#[test]
fn test_disabled_effect_is_not_evaluated() {
    let palette = palette(vec![
        EffectSpec::circle(CircleConfig::default()),
        EffectSpec::sine_wave(TargetParameter::Dimmer, SineWaveConfig::default()).disabled(),
    ]);
    let evaluation = evaluate(&palette, 0, 1, secs(0.5));
    assert!(evaluation.get(PhysicalParameter::Dimmer).is_none());
    assert!(evaluation.get(PhysicalParameter::Pan).is_some());
}

#[test]
fn test_empty_membership() {
    let palette = sine_palette(TargetParameter::Pan, SineWaveConfig::default());
    let output = evaluate_batch(&palette, &Membership::default(), secs(1.0));
    assert!(output.fixtures.is_empty());
    assert!(output.skipped.is_empty());
}

#[test]
fn test_concurrent_evaluation_is_consistent() {
    let palette = Arc::new(palette(vec![
        EffectSpec::u_shape(UShapeConfig::default()),
        EffectSpec::stagger(StaggerConfig::default()),
    ]));
    let expected: Vec<_> = (0..50)
        .map(|step| evaluate(&palette, step % 6, 6, secs(step as f64 * 0.02)))
        .collect();

    thread::scope(|scope| {
        for _ in 0..4 {
            let palette = palette.clone();
            let expected = &expected;
            scope.spawn(move || {
                for (step, expected) in expected.iter().enumerate() {
                    let actual = evaluate(&palette, step % 6, 6, secs(step as f64 * 0.02));
                    assert_eq!(&actual, expected);
                }
            });
        }
    });
}

#[test]
fn test_engine_frames_and_reconfigure() {
    let membership = registry().resolve(&["spots".to_string()]);
    let mut engine = MotionEffectEngine::new(
        Arc::new(sine_palette(
            TargetParameter::Dimmer,
            SineWaveConfig {
                speed: 1.0,
                size: 50.0,
                center: 90.0,
                ..Default::default()
            },
        )),
        membership,
    );

    let frame = engine.frame(7, secs(0.25));
    assert_eq!(frame.tick, 7);
    assert_eq!(frame.palette, "test_palette");
    assert_eq!(frame.fixtures.len(), 4);
    assert_eq!(engine.clamp_total(), 4);

    let replacement = crate::palette::LoopPalette::new(
        2,
        "Circle",
        vec![EffectSpec::circle(CircleConfig::default())],
    )
    .unwrap();
    engine.reconfigure(Arc::new(replacement));
    let frame = engine.frame(8, secs(0.5));
    assert_eq!(frame.palette, "Circle");
    assert_eq!(engine.palette().id(), 2);
    assert_eq!(engine.membership().fixture_count(), 4);
    for fixture in &frame.fixtures {
        let parameters: Vec<_> = fixture.values.keys().copied().collect();
        assert_eq!(parameters, vec![PhysicalParameter::Pan, PhysicalParameter::Tilt]);
    }
    assert_eq!(engine.clamp_total(), 4);
}

#[test]
fn test_engine_frame_reports_missing_fixtures() {
    let mut registry = registry();
    registry.unregister_fixture("spot4");
    let membership = registry.resolve(&["spots".to_string()]);
    let mut engine = MotionEffectEngine::new(
        Arc::new(sine_palette(TargetParameter::Pan, SineWaveConfig::default())),
        membership,
    );

    for tick in 0..3 {
        let frame = engine.frame(tick, secs(tick as f64 * 0.1));
        assert_eq!(frame.fixtures.len(), 3);
        assert_eq!(
            frame.skipped,
            vec![MissingDataError::Fixture("spot4".to_string())]
        );
    }
}
