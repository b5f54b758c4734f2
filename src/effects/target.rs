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

/// A physical output channel of a moving-light fixture. These are the only
/// parameters an output sink ever receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalParameter {
    Pan,
    Tilt,
    Dimmer,
    Zoom,
    Focus,
}

impl PhysicalParameter {
    pub const ALL: [PhysicalParameter; 5] = [
        PhysicalParameter::Pan,
        PhysicalParameter::Tilt,
        PhysicalParameter::Dimmer,
        PhysicalParameter::Zoom,
        PhysicalParameter::Focus,
    ];

    /// The output domain of this parameter.
    pub fn range(&self) -> ParameterRange {
        parameter_range(TargetParameter::from(*self))
    }
}

impl fmt::Display for PhysicalParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        TargetParameter::from(*self).fmt(f)
    }
}

/// The parameter an effect is authored against. The composite targets tag a
/// single effect instance that drives a pair of physical parameters (or, for
/// stagger, the dimmer) so the validator can treat it as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetParameter {
    Pan,
    Tilt,
    Dimmer,
    Zoom,
    Focus,
    PanTiltCircle,
    #[serde(rename = "pan_tilt_u_shape")]
    PanTiltUShape,
    #[serde(rename = "pan_tilt_figure8")]
    PanTiltFigure8,
    PanTiltBally,
    DimmerStagger,
}

impl TargetParameter {
    /// True for the shape targets that occupy the pan/tilt pair.
    pub fn is_pan_tilt_composite(&self) -> bool {
        matches!(
            self,
            TargetParameter::PanTiltCircle
                | TargetParameter::PanTiltUShape
                | TargetParameter::PanTiltFigure8
                | TargetParameter::PanTiltBally
        )
    }

    /// True for any composite target, including the dimmer stagger.
    pub fn is_composite(&self) -> bool {
        self.is_pan_tilt_composite() || *self == TargetParameter::DimmerStagger
    }

    /// True if this target is pan or tilt on its own.
    pub fn is_single_pan_or_tilt(&self) -> bool {
        matches!(self, TargetParameter::Pan | TargetParameter::Tilt)
    }

    /// The physical parameters written by an effect with this target.
    pub fn physical(&self) -> &'static [PhysicalParameter] {
        match self {
            TargetParameter::Pan => &[PhysicalParameter::Pan],
            TargetParameter::Tilt => &[PhysicalParameter::Tilt],
            TargetParameter::Dimmer | TargetParameter::DimmerStagger => {
                &[PhysicalParameter::Dimmer]
            }
            TargetParameter::Zoom => &[PhysicalParameter::Zoom],
            TargetParameter::Focus => &[PhysicalParameter::Focus],
            TargetParameter::PanTiltCircle
            | TargetParameter::PanTiltUShape
            | TargetParameter::PanTiltFigure8
            | TargetParameter::PanTiltBally => &[PhysicalParameter::Pan, PhysicalParameter::Tilt],
        }
    }
}

impl From<PhysicalParameter> for TargetParameter {
    fn from(parameter: PhysicalParameter) -> Self {
        match parameter {
            PhysicalParameter::Pan => TargetParameter::Pan,
            PhysicalParameter::Tilt => TargetParameter::Tilt,
            PhysicalParameter::Dimmer => TargetParameter::Dimmer,
            PhysicalParameter::Zoom => TargetParameter::Zoom,
            PhysicalParameter::Focus => TargetParameter::Focus,
        }
    }
}

impl fmt::Display for TargetParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetParameter::Pan => "pan",
            TargetParameter::Tilt => "tilt",
            TargetParameter::Dimmer => "dimmer",
            TargetParameter::Zoom => "zoom",
            TargetParameter::Focus => "focus",
            TargetParameter::PanTiltCircle => "pan/tilt circle",
            TargetParameter::PanTiltUShape => "pan/tilt u-shape",
            TargetParameter::PanTiltFigure8 => "pan/tilt figure-8",
            TargetParameter::PanTiltBally => "pan/tilt bally",
            TargetParameter::DimmerStagger => "dimmer stagger",
        };
        write!(f, "{}", name)
    }
}

/// Unit of a parameter's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Degrees,
    Percent,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Degrees => write!(f, "deg"),
            Unit::Percent => write!(f, "%"),
        }
    }
}

/// Bounds, input step and unit for a parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub unit: Unit,
}

impl ParameterRange {
    /// Clamp a value into the range. Non-finite values land on the minimum.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Distance between min and max.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

const PAN: ParameterRange = ParameterRange {
    min: -270.0,
    max: 270.0,
    step: 0.5,
    unit: Unit::Degrees,
};

const TILT: ParameterRange = ParameterRange {
    min: -135.0,
    max: 135.0,
    step: 0.5,
    unit: Unit::Degrees,
};

const PERCENT: ParameterRange = ParameterRange {
    min: 0.0,
    max: 100.0,
    step: 1.0,
    unit: Unit::Percent,
};

const ZOOM: ParameterRange = ParameterRange {
    min: 0.0,
    max: 60.0,
    step: 0.5,
    unit: Unit::Degrees,
};

/// The single lookup table for parameter bounds. Authoring checks use it to
/// bound input values, the evaluator uses it to clamp output. Pan/tilt
/// composites report the pan range; their tilt output clamps with the tilt
/// range through [`PhysicalParameter::range`].
pub fn parameter_range(target: TargetParameter) -> ParameterRange {
    match target {
        TargetParameter::Pan
        | TargetParameter::PanTiltCircle
        | TargetParameter::PanTiltUShape
        | TargetParameter::PanTiltFigure8
        | TargetParameter::PanTiltBally => PAN,
        TargetParameter::Tilt => TILT,
        TargetParameter::Dimmer | TargetParameter::Focus | TargetParameter::DimmerStagger => {
            PERCENT
        }
        TargetParameter::Zoom => ZOOM,
    }
}
