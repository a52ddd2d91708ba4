//! Walkabout - headless runner
//!
//! Replays held keys against a level for a fixed number of frames and logs
//! where the avatar ends up. Set `RUST_LOG=debug` to watch ground transitions.

use std::path::PathBuf;

use anyhow::{ensure, Context};
use clap::Parser;
use walkabout_game::{KeyboardInput, Level, Session};
use walkabout_physics::ControllerConfig;

/// Walk a capsule avatar through a level
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Controller configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Level description (JSON); defaults to the built-in car park
    #[arg(short, long)]
    level: Option<PathBuf>,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Key codes held for the whole run, e.g. KeyW,Space
    #[arg(long, value_delimiter = ',')]
    hold: Vec<String>,

    /// Horizontal pointer motion per frame in pixels
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    turn: f32,

    /// Log the pose every N frames (0 disables)
    #[arg(long, default_value_t = 60)]
    report_every: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    ensure!(
        args.fps.is_finite() && args.fps > 0.0,
        "fps must be positive, got {}",
        args.fps
    );

    let config = match &args.config {
        Some(path) => ControllerConfig::load(path)
            .with_context(|| format!("loading controller config {}", path.display()))?,
        None => ControllerConfig::default(),
    };

    let level = match &args.level {
        Some(path) => Level::load_or_empty(path),
        None => Level::car_park(),
    };

    let mut input = KeyboardInput::new();
    input.pointer_locked = true;
    for code in &args.hold {
        if !input.handle_key(code, true) {
            log::warn!("ignoring unknown key code '{code}'");
        }
    }

    let frame_dt = 1.0 / args.fps;
    let mut session = Session::new(config, level);

    for _ in 0..args.frames {
        if args.turn != 0.0 {
            input.handle_pointer_motion(args.turn, 0.0);
        }
        let pose = session.frame(&mut input, frame_dt);

        if args.report_every > 0 && session.frame % args.report_every == 0 {
            log::info!(
                "frame {}: head={:.3} yaw={:.3} pitch={:.3} {:?}",
                session.frame,
                pose.head,
                pose.orientation.yaw,
                pose.orientation.pitch,
                session.controller().ground()
            );
        }
    }

    let pose = session.pose();
    let controller = session.controller();
    log::info!(
        "finished {} frames in '{}': head={:.3} velocity={:.3} {:?}, {} respawns",
        session.frame,
        session.level.name,
        pose.head,
        controller.velocity(),
        controller.ground(),
        controller.recoveries()
    );
    println!("{:.3} {:.3} {:.3}", pose.head.x, pose.head.y, pose.head.z);

    Ok(())
}
