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
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{crate_version, Parser, Subcommand};
use duration_string::DurationString;
use tracing::warn;

use loopfx::config::{load_palettes, parse_palette_file, EngineConfig};
use loopfx::effects::PhysicalParameter;
use loopfx::engine::{evaluate_batch, MotionEffectEngine};
use loopfx::fixtures::{Membership, MembershipProvider};
use loopfx::output::LogSink;
use loopfx::palette::PaletteStore;
use loopfx::playsync::CancelHandle;
use loopfx::ticker::Ticker;

#[derive(Parser)]
#[clap(
    author = "Michael Wilson",
    version = crate_version!(),
    about = "A loop palette motion-effect engine."
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Loads and validates a palette file, then lists its palettes.
    Validate {
        /// The path to the palette file (YAML, or JSON for legacy records).
        path: String,
    },
    /// Prints the range of every output parameter.
    Ranges {},
    /// Evaluates a palette at sampled times and prints the values per fixture.
    Render {
        /// The path to the palette file.
        path: String,
        /// The name of the palette to render.
        palette: String,
        /// The number of fixtures the palette is applied to.
        #[arg[short, long, default_value_t = 4]]
        fixtures: usize,
        /// The elapsed time of the first sample, e.g. 1s or 250ms.
        #[arg[short, long, default_value = "0s"]]
        at: String,
        /// The time between samples.
        #[arg[short, long, default_value = "100ms"]]
        step: String,
        /// The number of samples.
        #[arg[short, long, default_value_t = 1]]
        count: usize,
    },
    /// Runs a palette against configured fixtures, logging every frame.
    Run {
        /// The path to the engine config.
        config_path: String,
        /// The name of the palette to run.
        palette: String,
        /// The fixtures and groups to apply the palette to.
        #[arg(required = true)]
        targets: Vec<String>,
        /// Stop after this long. Runs until killed if not given.
        #[arg[short, long]]
        duration: Option<String>,
    },
}

fn parse_duration(value: &str) -> Result<Duration, Box<dyn Error>> {
    Ok(DurationString::from_string(value.to_string())?.into())
}

/// Elapsed time of the given render sample.
fn sample_time(at: Duration, step: Duration, sample: usize) -> Result<Duration, Box<dyn Error>> {
    step.checked_mul(u32::try_from(sample)?)
        .and_then(|offset| at.checked_add(offset))
        .ok_or_else(|| format!("sample {} is past the end of time", sample).into())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path } => {
            let mut store = PaletteStore::new();
            parse_palette_file(&PathBuf::from(&path))?.load_into(&mut store)?;

            if store.is_empty() {
                println!("No palettes found in {}.", path);
                return Ok(());
            }

            println!("Palettes (count: {}):", store.len());
            for palette in store.sorted_list() {
                println!("- {}", palette);
            }
        }
        Commands::Ranges {} => {
            println!("Parameter ranges:");
            for parameter in PhysicalParameter::ALL {
                let range = parameter.range();
                println!(
                    "- {}: {} to {} {} (step {})",
                    parameter, range.min, range.max, range.unit, range.step
                );
            }
        }
        Commands::Render {
            path,
            palette,
            fixtures,
            at,
            step,
            count,
        } => {
            let mut store = PaletteStore::new();
            parse_palette_file(&PathBuf::from(&path))?.load_into(&mut store)?;
            let palette = store
                .get(&palette)
                .ok_or_else(|| format!("palette '{}' not found in {}", palette, path))?;

            let at = parse_duration(&at)?;
            let step = parse_duration(&step)?;
            let membership =
                Membership::from_names((1..=fixtures).map(|n| format!("fixture{}", n)));

            for sample in 0..count {
                let elapsed = sample_time(at, step, sample)?;
                let output = evaluate_batch(palette, &membership, elapsed);
                println!("t={:.3}s", elapsed.as_secs_f64());
                for fixture in &output.fixtures {
                    println!("{}", fixture);
                }
                if output.clamp_count > 0 {
                    println!("  ({} values clamped)", output.clamp_count);
                }
            }
        }
        Commands::Run {
            config_path,
            palette,
            targets,
            duration,
        } => {
            let config = EngineConfig::deserialize(&PathBuf::from(&config_path))?;
            let store = load_palettes(&config.palette_files())?;
            let palette = store
                .get(&palette)
                .ok_or_else(|| format!("palette '{}' not found", palette))?;

            let membership = config.registry().resolve(&targets);
            for missing in membership.missing() {
                warn!(err = %missing, "Fixture will be skipped.");
            }
            if membership.fixture_count() == 0 {
                return Err("no fixtures to run the palette on".into());
            }

            let duration = duration
                .map(|duration| parse_duration(&duration))
                .transpose()?;
            let engine = MotionEffectEngine::new(Arc::new(palette.clone()), membership);
            let ticker = Ticker::start(
                engine,
                config.tick_rate_hz(),
                LogSink,
                duration,
                CancelHandle::new(),
            )?;

            if let Some(report) = ticker.wait() {
                println!(
                    "Ran {} ticks ({} values clamped).",
                    report.ticks, report.clamp_total
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::sample_time;

    #[test]
    fn test_sample_time() {
        let at = Duration::from_secs(1);
        let step = Duration::from_millis(250);
        assert_eq!(sample_time(at, step, 0).unwrap(), at);
        assert_eq!(sample_time(at, step, 4).unwrap(), Duration::from_secs(2));
    }

    #[test]
    fn test_sample_time_overflow() {
        assert!(sample_time(Duration::ZERO, Duration::MAX, 2).is_err());
        assert!(sample_time(Duration::MAX, Duration::from_secs(1), 1).is_err());
    }
}
