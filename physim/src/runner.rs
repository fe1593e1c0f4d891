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
//! Real-time simulation loop
//!
//! One thread renders, drains input, steps the world and sleeps, in that
//! order, once per frame. Pacing is sleep based: the clock sleeps for what
//! is left of the frame budget and does not catch up after overruns, so
//! drift accumulates under load.

use crate::input::CommandQueue;
use crate::render::Renderer;
use crate::world::World;
use std::io;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Sleeps until the next frame boundary
#[derive(Debug)]
pub struct FrameClock {
    frame: Duration,
    last_tick: Instant,
}

impl FrameClock {
    /// Create a clock ticking `fps` times per second
    ///
    /// # Panics
    ///
    /// Panics if `fps` is not positive and finite.
    pub fn new(fps: f64) -> Self {
        assert!(fps > 0.0 && fps.is_finite(), "Frame rate must be positive and finite");
        FrameClock {
            frame: Duration::from_secs_f64(1.0 / fps),
            last_tick: Instant::now(),
        }
    }

    /// Length of one frame
    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Sleep out the remainder of the current frame
    ///
    /// Returns how long the clock slept.
    pub fn tick(&mut self) -> Duration {
        let elapsed = self.last_tick.elapsed();
        let remaining = self.frame.saturating_sub(elapsed);
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
        self.last_tick = Instant::now();
        remaining
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames rendered and stepped
    pub frames: u64,
    /// Commands dispatched to the world
    pub commands: u64,
    /// Frames whose work exceeded the frame budget
    pub overruns: u64,
}

/// Run until the world stops
///
/// Each frame renders the current state, dispatches queued commands, steps
/// the world and waits for the next frame boundary. The renderer is always
/// finished on exit. A rendering error stops the world and is returned.
pub fn run_loop<R: Renderer>(
    world: &mut World,
    renderer: &mut R,
    queue: &CommandQueue,
) -> io::Result<RunStats> {
    let mut clock = FrameClock::new(world.fps());
    let mut stats = RunStats::default();
    let mut failure = None;

    while world.is_running() {
        if let Err(err) = renderer.present(&world.rasterize()) {
            warn!(%err, "render failed, stopping");
            world.stop();
            failure = Some(err);
            break;
        }

        for command in queue.drain() {
            world.dispatch_command(command);
            stats.commands += 1;
        }
        // Quit takes effect before the next step
        if !world.is_running() {
            stats.frames += 1;
            break;
        }

        world.step();
        stats.frames += 1;

        if clock.tick().is_zero() {
            stats.overruns += 1;
        }
    }

    debug!(frames = stats.frames, commands = stats.commands, "simulation loop finished");
    let finished = renderer.finish();
    match failure {
        Some(err) => Err(err),
        None => finished.map(|_| stats),
    }
}

/// Step the world `frames` times without rendering or pacing
pub fn run_frames(world: &mut World, frames: u64) {
    for _ in 0..frames {
        if !world.is_running() {
            break;
        }
        world.step();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyDescriptor;
    use crate::input::Command;
    use crate::render::{Frame, MemoryRenderer};
    use crate::world::WorldConfig;

    struct QuitAfter {
        frames: usize,
        seen: usize,
        queue: crate::input::CommandSender,
    }

    impl Renderer for QuitAfter {
        fn present(&mut self, _frame: &Frame) -> io::Result<()> {
            self.seen += 1;
            if self.seen == self.frames {
                self.queue.send(Command::Quit);
            }
            Ok(())
        }
    }

    struct Broken;

    impl Renderer for Broken {
        fn present(&mut self, _frame: &Frame) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    fn fast_world() -> World {
        World::new(WorldConfig::new(4, 2).with_fps(1000.0)).unwrap()
    }

    #[test]
    #[should_panic(expected = "Frame rate must be positive and finite")]
    fn test_clock_rejects_zero_fps() {
        FrameClock::new(0.0);
    }

    #[test]
    fn test_clock_frame_duration() {
        let clock = FrameClock::new(20.0);
        assert_eq!(clock.frame_duration(), Duration::from_millis(50));
    }

    #[test]
    fn test_loop_stops_on_quit() {
        let mut world = fast_world();
        let queue = CommandQueue::new();
        let mut renderer = QuitAfter {
            frames: 3,
            seen: 0,
            queue: queue.sender(),
        };
        let stats = run_loop(&mut world, &mut renderer, &queue).unwrap();
        assert!(!world.is_running());
        assert_eq!(stats.frames, 3);
        assert_eq!(stats.commands, 1);
    }

    #[test]
    fn test_loop_surfaces_render_errors() {
        let mut world = fast_world();
        let queue = CommandQueue::new();
        let err = run_loop(&mut world, &mut Broken, &queue).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(!world.is_running());
    }

    #[test]
    fn test_loop_finishes_renderer() {
        let mut world = fast_world();
        let queue = CommandQueue::new();
        queue.sender().send(Command::Quit);
        let mut renderer = MemoryRenderer::new();
        let stats = run_loop(&mut world, &mut renderer, &queue).unwrap();
        assert_eq!(stats.frames, 1);
        assert_eq!(renderer.frames().len(), 1);
        assert!(renderer.is_finished());
    }

    #[test]
    fn test_run_frames_steps_world() {
        let mut world = fast_world();
        let id = world.add_body(
            BodyDescriptor::new("drifter")
                .with_velocity(0.5, 0.0)
                .movable()
                .build()
                .unwrap(),
        );
        run_frames(&mut world, 4);
        assert_eq!(world.body(id).unwrap().position.x, 2.0);
    }
}
