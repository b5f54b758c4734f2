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
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TrySendError};
use tracing::{debug, warn};

use crate::effects::MissingDataError;
use crate::engine::ParameterValues;

/// Evaluated parameter values of one fixture for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureOutput {
    pub name: String,
    pub index: usize,
    pub values: ParameterValues,
}

impl fmt::Display for FixtureOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3} {}:", self.index, self.name)?;
        for (parameter, value) in &self.values {
            write!(f, " {}={:.2}", parameter, value)?;
        }
        Ok(())
    }
}

/// Everything produced by one tick of a palette.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub elapsed: Duration,
    pub palette: String,
    pub fixtures: Vec<FixtureOutput>,
    /// Members that could not be evaluated this tick.
    pub skipped: Vec<MissingDataError>,
}

/// Consumes frames for downstream conversion to device signals or previews.
pub trait OutputSink: Send {
    fn write(&mut self, frame: Frame);
}

/// Forwards frames over a channel. Frames are dropped rather than blocking the
/// tick loop if the receiver falls behind.
pub struct ChannelSink {
    sender: Sender<Frame>,
    dropped: u64,
}

impl ChannelSink {
    /// Creates a sink and the receiver for its frames. `capacity` bounds how
    /// many unread frames may queue up.
    pub fn bounded(capacity: usize) -> (ChannelSink, Receiver<Frame>) {
        let (sender, receiver) = crossbeam_channel::bounded(capacity);
        (ChannelSink { sender, dropped: 0 }, receiver)
    }

    /// Frames dropped because the receiver was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl OutputSink for ChannelSink {
    fn write(&mut self, frame: Frame) {
        match self.sender.try_send(frame) {
            Ok(()) => {}
            Err(TrySendError::Full(frame)) => {
                self.dropped += 1;
                debug!(tick = frame.tick, "Output receiver full, dropping frame.");
            }
            Err(TrySendError::Disconnected(frame)) => {
                self.dropped += 1;
                warn!(tick = frame.tick, "Output receiver disconnected.");
            }
        }
    }
}

/// Logs every fixture of every frame at debug level.
#[derive(Default)]
pub struct LogSink;

impl OutputSink for LogSink {
    fn write(&mut self, frame: Frame) {
        for fixture in &frame.fixtures {
            debug!(
                palette = frame.palette.as_str(),
                tick = frame.tick,
                "{}",
                fixture
            );
        }
    }
}

/// Keeps every frame in memory.
#[derive(Default)]
pub struct CollectingSink {
    pub frames: Vec<Frame>,
}

impl OutputSink for CollectingSink {
    fn write(&mut self, frame: Frame) {
        self.frames.push(frame);
    }
}
