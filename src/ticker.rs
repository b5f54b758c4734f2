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
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, error, info, span, Level};

use crate::effects::ConfigurationError;
use crate::engine::MotionEffectEngine;
use crate::output::OutputSink;
use crate::playsync::CancelHandle;

/// The default tick rate, matching a DMX universe refresh.
pub const DEFAULT_TICK_RATE_HZ: u32 = 44;
pub const MIN_TICK_RATE_HZ: u32 = 1;
pub const MAX_TICK_RATE_HZ: u32 = 200;

/// Checks that a tick rate is within the supported range.
pub fn validate_tick_rate(rate_hz: u32) -> Result<(), ConfigurationError> {
    if !(MIN_TICK_RATE_HZ..=MAX_TICK_RATE_HZ).contains(&rate_hz) {
        return Err(ConfigurationError::OutOfRange {
            field: "tick_rate_hz",
            value: f64::from(rate_hz),
            min: f64::from(MIN_TICK_RATE_HZ),
            max: f64::from(MAX_TICK_RATE_HZ),
        });
    }
    Ok(())
}

/// What a finished tick loop hands back.
pub struct TickReport<S> {
    pub sink: S,
    pub ticks: u64,
    pub clamp_total: u64,
}

/// A running tick loop.
pub struct Ticker<S> {
    cancel_handle: CancelHandle,
    finished: Arc<AtomicBool>,
    join: JoinHandle<TickReport<S>>,
}

impl<S: OutputSink + 'static> Ticker<S> {
    /// Starts the tick loop on its own thread. The loop runs until the cancel
    /// handle is cancelled or, if given, `duration` has elapsed.
    pub fn start(
        mut engine: MotionEffectEngine,
        rate_hz: u32,
        mut sink: S,
        duration: Option<Duration>,
        cancel_handle: CancelHandle,
    ) -> Result<Ticker<S>, ConfigurationError> {
        validate_tick_rate(rate_hz)?;

        let period = Duration::from_secs_f64(1.0 / f64::from(rate_hz));
        let finished = Arc::new(AtomicBool::new(false));

        let join = {
            let cancel_handle = cancel_handle.clone();
            let finished = finished.clone();
            thread::spawn(move || {
                let span = span!(Level::INFO, "ticker", palette = engine.palette().name());
                let _enter = span.enter();
                info!(rate_hz, "Starting tick loop.");

                let start = Instant::now();
                let mut tick: u64 = 0;
                while !cancel_handle.is_cancelled() {
                    let elapsed = start.elapsed();
                    if duration.is_some_and(|duration| elapsed >= duration) {
                        break;
                    }

                    sink.write(engine.frame(tick, elapsed));
                    tick += 1;

                    let next = start + period.mul_f64(tick as f64);
                    let now = Instant::now();
                    if next > now {
                        spin_sleep::sleep(next - now);
                    } else {
                        debug!(tick, behind = ?(now - next), "Tick overran its period.");
                    }
                }

                info!(
                    ticks = tick,
                    clamps = engine.clamp_total(),
                    "Tick loop stopped."
                );
                finished.store(true, Ordering::Relaxed);
                cancel_handle.notify();

                TickReport {
                    sink,
                    ticks: tick,
                    clamp_total: engine.clamp_total(),
                }
            })
        };

        Ok(Ticker {
            cancel_handle,
            finished,
            join,
        })
    }

    /// Waits for the loop to finish on its own or be cancelled elsewhere.
    pub fn wait(self) -> Option<TickReport<S>> {
        self.cancel_handle.wait(self.finished.clone());
        self.join()
    }

    /// Cancels the loop and waits for it to stop.
    pub fn stop(self) -> Option<TickReport<S>> {
        self.cancel_handle.cancel();
        self.join()
    }

    fn join(self) -> Option<TickReport<S>> {
        match self.join.join() {
            Ok(report) => Some(report),
            Err(_) => {
                error!("Tick loop panicked.");
                None
            }
        }
    }
}
