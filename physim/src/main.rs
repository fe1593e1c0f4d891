// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! physim terminal playground
//!
//! # Usage
//!
//! ```bash
//! # Default playground sized to the terminal
//! physim
//!
//! # Load a scene file and log to a file
//! physim --scene level.json --log-file physim.log --log-level debug
//!
//! # Print the default scene as JSON
//! physim --dump-scene > level.json
//!
//! # Run 300 frames without a terminal and print the last one
//! physim --frames 300 --width 60 --height 20
//! ```
//!
//! Controls: `a`/Left and `d`/Right move, Space jumps, `q`/Esc quits.

use anyhow::Context;
use clap::Parser;
use crossterm::{cursor, execute, terminal};
use physim::input::{spawn_keyboard_listener, CommandQueue};
use physim::render::TerminalRenderer;
use physim::runner::{run_frames, run_loop};
use physim::scene::Scene;
use physim::world::{NonSolidPolicy, PushOut};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Keyboard-driven rigid-body playground
#[derive(Parser, Debug)]
#[command(name = "physim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scene file (JSON); defaults to the built-in playground
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Frame rate, also scales jump height and friction
    #[arg(long)]
    fps: Option<f64>,

    /// Vertical gravity in cells per frame squared
    #[arg(short, long)]
    gravity: Option<f64>,

    /// Grid width (default: terminal width)
    #[arg(long)]
    width: Option<u16>,

    /// Grid height (default: terminal height minus one)
    #[arg(long)]
    height: Option<u16>,

    /// Stop the collision scan at the first non-solid body
    #[arg(long)]
    strict_scan: bool,

    /// Push colliding bodies out in whole cells only
    #[arg(long)]
    whole_cell: bool,

    /// Run this many frames headless and print the final frame
    #[arg(long)]
    frames: Option<u64>,

    /// Print the scene as JSON and exit
    #[arg(long)]
    dump_scene: bool,

    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Write logs to this file (the terminal is used for drawing)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let scene = build_scene(&cli)?;
    if cli.dump_scene {
        println!("{}", scene.to_json()?);
        return Ok(());
    }

    let mut world = scene.build().context("failed to build scene")?;
    info!(
        bodies = world.len(),
        fps = world.fps(),
        "starting physim v{}",
        env!("CARGO_PKG_VERSION")
    );

    if let Some(frames) = cli.frames {
        run_frames(&mut world, frames);
        println!("{}", world.rasterize());
        return Ok(());
    }

    let queue = CommandQueue::new();
    let _terminal = TerminalGuard::enter()?;
    spawn_keyboard_listener(queue.sender()).context("failed to start input listener")?;

    let mut renderer = TerminalRenderer::new(io::stdout());
    let stats = run_loop(&mut world, &mut renderer, &queue)?;
    info!(frames = stats.frames, overruns = stats.overruns, "exited cleanly");
    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn build_scene(cli: &Cli) -> anyhow::Result<Scene> {
    let mut scene = match &cli.scene {
        Some(path) => Scene::load(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => {
            let (width, height) = grid_size(cli);
            Scene::default_for(width, height)
        }
    };

    if let Some(fps) = cli.fps {
        scene.world.fps = fps;
    }
    if let Some(gravity) = cli.gravity {
        scene.world.gravity.y = gravity;
    }
    if cli.strict_scan {
        scene.world.resolution.non_solid = NonSolidPolicy::StopScan;
    }
    if cli.whole_cell {
        scene.world.resolution.push_out = PushOut::WholeCell;
    }
    Ok(scene)
}

/// Grid size from flags, falling back to the terminal size
fn grid_size(cli: &Cli) -> (i32, i32) {
    let (columns, rows) = terminal::size().unwrap_or((80, 25));
    let width = cli.width.unwrap_or(columns);
    let height = cli.height.unwrap_or(rows.saturating_sub(1));
    (i32::from(width), i32::from(height))
}

/// Raw mode and alternate screen for the lifetime of the guard
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let mut out = io::stdout();
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = execute!(out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = out.flush();
    }
}
