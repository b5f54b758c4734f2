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
use super::*;

#[test]
fn test_effect_spec_from_yaml() {
    let yaml = r#"
        kind: sine_wave
        target: pan
        speed: 0.2
        size: 45
        group_mode: spread_phase_evenly
        wing_style: asymmetrical2
        wing_center_percent: 30
    "#;

    let spec: EffectSpec = serde_yml::from_str(yaml).unwrap();
    assert_eq!(spec.kind(), EffectKind::SineWave);
    assert_eq!(spec.target, TargetParameter::Pan);
    assert!(spec.enabled);

    let EffectConfig::SineWave(config) = &spec.config else {
        panic!("expected sine wave config, got {:?}", spec.config);
    };
    assert_eq!(config.speed, 0.2);
    assert_eq!(config.size, 45.0);
    assert_eq!(config.center, 0.0);
    assert_eq!(config.direction, Direction::Forward);
    assert_eq!(config.group_mode, GroupMode::SpreadPhaseEvenly);
    assert_eq!(config.wing_style, WingStyle::Asymmetrical2Wings);
    assert_eq!(config.wing_center_percent, 30.0);
}

#[test]
fn test_effect_spec_defaults() {
    let yaml = r#"
        kind: circle
        target: pan_tilt_circle
        enabled: false
    "#;

    let spec: EffectSpec = serde_yml::from_str(yaml).unwrap();
    assert!(!spec.enabled);
    assert_eq!(spec.config, EffectConfig::Circle(CircleConfig::default()));
}

#[test]
fn test_composite_target_names() {
    let yaml = r#"
        kind: u_shape
        target: pan_tilt_u_shape
        orientation: left
    "#;
    let spec: EffectSpec = serde_yml::from_str(yaml).unwrap();
    assert_eq!(spec.target, TargetParameter::PanTiltUShape);
    assert_eq!(
        spec.config,
        EffectConfig::UShape(UShapeConfig {
            orientation: UOrientation::Left,
            ..Default::default()
        })
    );

    let yaml = r#"
        kind: figure8
        target: pan_tilt_figure8
    "#;
    let spec: EffectSpec = serde_yml::from_str(yaml).unwrap();
    assert_eq!(spec.kind(), EffectKind::Figure8);
}

#[test]
fn test_unknown_kind_rejected() {
    let yaml = r#"
        kind: spiral
        target: pan
    "#;
    assert!(serde_yml::from_str::<EffectSpec>(yaml).is_err());
}

#[test]
fn test_serialized_form_is_tagged() {
    let spec = EffectSpec::stagger(StaggerConfig {
        rate: 8.0,
        spacing: 3,
        level: 75.0,
    });

    let value = serde_json::to_value(&spec).unwrap();
    assert_eq!(value["kind"], "stagger");
    assert_eq!(value["target"], "dimmer_stagger");
    assert_eq!(value["spacing"], 3);

    let back: EffectSpec = serde_json::from_value(value).unwrap();
    assert_eq!(back, spec);
}

#[test]
fn test_default_targets() {
    assert_eq!(EffectKind::SineWave.default_target(), TargetParameter::Pan);
    assert_eq!(
        EffectKind::Bally.default_target(),
        TargetParameter::PanTiltBally
    );
    assert_eq!(
        EffectKind::Stagger.default_target(),
        TargetParameter::DimmerStagger
    );
}

#[test]
fn test_display() {
    let spec = EffectSpec::sine_wave(TargetParameter::Dimmer, SineWaveConfig::default());
    assert_eq!(spec.to_string(), "sine wave on dimmer");
    assert_eq!(
        spec.disabled().to_string(),
        "sine wave on dimmer (disabled)"
    );

    let error = ConfigurationError::Incompatible(Conflict::TwoShapeEffects);
    assert_eq!(
        error.to_string(),
        "incompatible effects: two pan/tilt shape effects"
    );
}
