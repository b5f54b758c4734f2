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

use serde::{Deserialize, Serialize};

use super::target::TargetParameter;

/// The procedural pattern an effect runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    SineWave,
    Circle,
    UShape,
    Figure8,
    Bally,
    Stagger,
}

impl EffectKind {
    /// The targets an effect of this kind may be authored against.
    pub fn allowed_targets(&self) -> &'static [TargetParameter] {
        match self {
            EffectKind::SineWave => &[
                TargetParameter::Pan,
                TargetParameter::Tilt,
                TargetParameter::Dimmer,
                TargetParameter::Zoom,
                TargetParameter::Focus,
            ],
            EffectKind::Circle => &[TargetParameter::PanTiltCircle],
            EffectKind::UShape => &[TargetParameter::PanTiltUShape],
            EffectKind::Figure8 => &[TargetParameter::PanTiltFigure8],
            EffectKind::Bally => &[TargetParameter::PanTiltBally],
            EffectKind::Stagger => &[TargetParameter::DimmerStagger],
        }
    }

    /// The target an effect of this kind gets when none is authored.
    pub fn default_target(&self) -> TargetParameter {
        self.allowed_targets()[0]
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EffectKind::SineWave => "sine wave",
            EffectKind::Circle => "circle",
            EffectKind::UShape => "u-shape",
            EffectKind::Figure8 => "figure-8",
            EffectKind::Bally => "bally",
            EffectKind::Stagger => "stagger",
        };
        write!(f, "{}", name)
    }
}

/// How phase is distributed across the fixtures of an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupMode {
    #[default]
    AllSamePhase,
    SpreadPhaseEvenly,
    Block2,
    Block3,
    Block4,
}

impl GroupMode {
    /// Block size for the block modes.
    pub fn block_size(&self) -> Option<usize> {
        match self {
            GroupMode::Block2 => Some(2),
            GroupMode::Block3 => Some(3),
            GroupMode::Block4 => Some(4),
            GroupMode::AllSamePhase | GroupMode::SpreadPhaseEvenly => None,
        }
    }
}

/// Sub-partitioning of a sine wave group into mirrored wings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WingStyle {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "symmetrical2")]
    Symmetrical2Wings,
    #[serde(rename = "symmetrical3")]
    Symmetrical3Wings,
    #[serde(rename = "asymmetrical2")]
    Asymmetrical2Wings,
}

/// Direction of travel for a sine wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// Sign applied to the angular velocity.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// Which way the opening of a U-shape faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UOrientation {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SineWaveConfig {
    pub speed: f64, // Hz
    pub size: f64,
    pub center: f64,
    pub phase_degrees: f64,
    pub direction: Direction,
    pub group_mode: GroupMode,
    pub wing_style: WingStyle,
    pub wing_center_percent: f64, // only read for asymmetrical wings
}

impl Default for SineWaveConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            size: 45.0,
            center: 0.0,
            phase_degrees: 0.0,
            direction: Direction::Forward,
            group_mode: GroupMode::AllSamePhase,
            wing_style: WingStyle::None,
            wing_center_percent: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleConfig {
    pub speed: f64, // Hz
    pub radius_pan: f64,
    pub radius_tilt: f64,
    pub center_pan: f64,
    pub center_tilt: f64,
    pub phase_degrees: f64,
    pub group_mode: GroupMode,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            speed: 0.5,
            radius_pan: 30.0,
            radius_tilt: 30.0,
            center_pan: 0.0,
            center_tilt: 0.0,
            phase_degrees: 0.0,
            group_mode: GroupMode::AllSamePhase,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UShapeConfig {
    pub speed: f64, // Hz
    pub width: f64,
    pub height: f64,
    pub orientation: UOrientation,
}

impl Default for UShapeConfig {
    fn default() -> Self {
        Self {
            speed: 0.5,
            width: 60.0,
            height: 30.0,
            orientation: UOrientation::Up,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Figure8Config {
    pub speed: f64, // Hz
    pub width: f64,
    pub height: f64,
}

impl Default for Figure8Config {
    fn default() -> Self {
        Self {
            speed: 0.5,
            width: 60.0,
            height: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallyConfig {
    pub speed: f64, // Hz
    pub width: f64,
}

impl Default for BallyConfig {
    fn default() -> Self {
        Self {
            speed: 0.5,
            width: 90.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaggerConfig {
    pub rate: f64, // Hz, one slot per tick of the rate
    /// One fixture in every `spacing` is on at a time. Never less than two.
    pub spacing: u32,
    /// Dimmer level of an "on" fixture, in percent.
    pub level: f64,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self {
            rate: 10.0,
            spacing: 2,
            level: 100.0,
        }
    }
}

/// Kind-specific parameters of an effect. The variant is the effect kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectConfig {
    SineWave(SineWaveConfig),
    Circle(CircleConfig),
    UShape(UShapeConfig),
    Figure8(Figure8Config),
    Bally(BallyConfig),
    Stagger(StaggerConfig),
}

impl EffectConfig {
    pub fn kind(&self) -> EffectKind {
        match self {
            EffectConfig::SineWave(_) => EffectKind::SineWave,
            EffectConfig::Circle(_) => EffectKind::Circle,
            EffectConfig::UShape(_) => EffectKind::UShape,
            EffectConfig::Figure8(_) => EffectKind::Figure8,
            EffectConfig::Bally(_) => EffectKind::Bally,
            EffectConfig::Stagger(_) => EffectKind::Stagger,
        }
    }

    /// Cycles per second of the effect.
    pub fn frequency(&self) -> f64 {
        match self {
            EffectConfig::SineWave(c) => c.speed,
            EffectConfig::Circle(c) => c.speed,
            EffectConfig::UShape(c) => c.speed,
            EffectConfig::Figure8(c) => c.speed,
            EffectConfig::Bally(c) => c.speed,
            EffectConfig::Stagger(c) => c.rate,
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// One effect of a loop palette: what it runs and which parameter it drives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectSpec {
    pub target: TargetParameter,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(flatten)]
    pub config: EffectConfig,
}

impl EffectSpec {
    pub fn new(target: TargetParameter, config: EffectConfig) -> Self {
        Self {
            target,
            enabled: true,
            config,
        }
    }

    pub fn kind(&self) -> EffectKind {
        self.config.kind()
    }

    pub fn sine_wave(target: TargetParameter, config: SineWaveConfig) -> Self {
        Self::new(target, EffectConfig::SineWave(config))
    }

    pub fn circle(config: CircleConfig) -> Self {
        Self::new(TargetParameter::PanTiltCircle, EffectConfig::Circle(config))
    }

    pub fn u_shape(config: UShapeConfig) -> Self {
        Self::new(TargetParameter::PanTiltUShape, EffectConfig::UShape(config))
    }

    pub fn figure8(config: Figure8Config) -> Self {
        Self::new(TargetParameter::PanTiltFigure8, EffectConfig::Figure8(config))
    }

    pub fn bally(config: BallyConfig) -> Self {
        Self::new(TargetParameter::PanTiltBally, EffectConfig::Bally(config))
    }

    pub fn stagger(config: StaggerConfig) -> Self {
        Self::new(TargetParameter::DimmerStagger, EffectConfig::Stagger(config))
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl fmt::Display for EffectSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.kind(), self.target)?;
        if !self.enabled {
            write!(f, " (disabled)")?;
        }
        Ok(())
    }
}
