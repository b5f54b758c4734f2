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

//! Loop palettes for moving-light fixtures: one or two procedural effects
//! (sine waves, pan/tilt shapes, dimmer staggers) evaluated per fixture from
//! elapsed time, with phase distributed across a fixture group.

pub mod config;
pub mod effects;
pub mod engine;
pub mod fixtures;
pub mod output;
pub mod palette;
pub mod playsync;
pub mod ticker;

pub use crate::engine::{evaluate, evaluate_batch, Evaluation, MotionEffectEngine};
pub use crate::palette::{LoopPalette, PaletteStore};
