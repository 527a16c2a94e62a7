use backdrop_config::{load_config, Config};
use backdrop_runner::{build_output, load_script, spawn_replay, App, FrameStats, RunnerError};
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless interactive page backdrop", long_about = None)]
struct Args {
    /// Path to a JSON or TOML configuration file; built-in defaults when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(short, long)]
    frames: Option<u64>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Input script to replay
    #[arg(long)]
    script: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!("{}", e);
        process::exit(1);
    }
}

fn load(args: &Args) -> Result<Config, RunnerError> {
    let mut config = match &args.config {
        Some(path) => {
            let config = load_config(path)?;
            info!("Using configuration from {}", path.display());
            config
        }
        None => {
            info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if args.frames.is_some() {
        config.run.max_frames = args.frames;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.script.is_some() {
        config.run.input_script = args.script.clone();
    }
    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> Result<(), RunnerError> {
    let config = load(&args)?;

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = running.clone();
    ctrlc::set_handler(move || {
        handler_flag.store(false, Ordering::SeqCst);
    })?;

    let mut output = build_output(&config.output)?;
    let script = config.run.input_script.as_deref().map(load_script).transpose()?;

    let start = Instant::now();
    let mut app = App::from_config(&config, 0.0)?;
    let replay = script.map(|entries| spawn_replay(entries, start, running.clone()));

    let frame_duration = Duration::from_secs_f64(1.0 / config.framerate as f64);
    let mut stats = FrameStats::new(frame_duration)?;

    info!("Running backdrop at {} FPS...", config.framerate);
    while running.load(Ordering::SeqCst) {
        if config.run.max_frames.map_or(false, |max| app.frames() >= max) {
            break;
        }
        let frame_start = Instant::now();
        let now = start.elapsed().as_secs_f64() * 1000.0;

        if let Some((events, _)) = &replay {
            for event in events.try_iter() {
                app.handle(&event, now);
            }
        }

        let summary = app.frame(now);
        if let Some(output) = output.as_mut() {
            output.submit(&summary, now, app.raster())?;
        }

        let elapsed = frame_start.elapsed();
        let overran = stats.record(elapsed);
        if !overran {
            spin_sleep::sleep(frame_duration - elapsed);
        } else if config.framerate > 10 {
            // Only worth reporting when the target rate is high enough to matter
            warn!("Frame time exceeded budget: {:?} > {:?}", elapsed, frame_duration);
        }
    }

    running.store(false, Ordering::SeqCst);
    if let Some((_, handle)) = replay {
        let _ = handle.join();
    }
    if let Some(output) = &output {
        info!("Wrote {} frames", output.frames_written());
    }
    stats.log_summary();
    Ok(())
}
