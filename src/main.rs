//! vista360 - headless 360-degree photo viewer driver
//!
//! Runs the viewer against the headless backend: sweeps the head pose over
//! the mode menu, pulls the trigger whenever a button is under the gaze,
//! and logs the resulting projection-mode changes.

use anyhow::Result;
use std::{env, path::PathBuf};
use tracing::info;
use vista360::config::ViewerConfig;
use vista360::stereo::{StereoFrame, StereoRenderLoop};
use vista360::viewer::Viewer;
use vista360_scene::HeadlessBackend;

/// Interpupillary distance used for the synthesized stereo frames, meters.
const DEFAULT_IPD: f32 = 0.064;

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting vista360 v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    if cli.help {
        print_usage();
        return Ok(());
    }

    let config = match cli.config.as_deref() {
        Some(path) => ViewerConfig::load_from_path(path),
        None => ViewerConfig::load(),
    };

    let mut viewer = Viewer::new(HeadlessBackend::new(), &config);
    let mut render_loop = StereoRenderLoop::new();

    // Sweep the head pitch across the menu column. The buttons sit above
    // the horizon, so the gaze crosses each of them once on the way up.
    let top_pitch = (6.0f32 / config.menu_distance).atan();
    let mut triggers = 0u32;
    for frame_index in 0..cli.frames {
        let t = frame_index as f32 / cli.frames.max(1) as f32;
        let frame = StereoFrame::from_head_pose(0.0, t * top_pitch, DEFAULT_IPD);
        render_loop.render_frame(&mut viewer, &frame);

        if viewer.menu().hovered_index().is_some() && viewer.on_trigger() {
            triggers += 1;
            info!(frame = frame_index, mode = viewer.mode().label(), "mode switched");
        }
    }

    info!(
        frames = render_loop.frames(),
        draws = viewer.backend().draw_count(),
        triggers,
        mode = viewer.mode().label(),
        "headless run complete"
    );
    Ok(())
}

fn print_usage() {
    println!("vista360 - headless 360-degree photo viewer driver");
    println!();
    println!("USAGE:");
    println!("    vista360 [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --frames <N>     Number of stereo frames to render (default 120)");
    println!("    --config <PATH>  Viewer configuration file (default config/viewer.toml)");
    println!("    --help           Print this message");
}

struct CliOptions {
    frames: u64,
    config: Option<PathBuf>,
    help: bool,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions {
            frames: 120,
            config: None,
            help: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--frames" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.frames = value,
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--frames must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--frames requires an integer");
                    }
                }
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--help" | "-h" => opts.help = true,
                other => {
                    tracing::warn!(argument = %other, "ignoring unknown argument");
                }
            }
        }

        opts
    }
}
