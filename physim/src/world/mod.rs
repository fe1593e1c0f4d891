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
//! Simulation world
//!
//! The [`World`] owns every body in an arena indexed by [`BodyId`]. Storage
//! order is evaluation order: [`World::step`] updates bodies one after the
//! other, and each body sees its siblings exactly as they are at that
//! moment, including positions already advanced earlier in the same step.
//! Nothing is snapshotted or double-buffered. Storage order is also paint
//! priority when rasterizing.

mod config;
mod view;

pub use config::{
    NonSolidPolicy, PushOut, ResolutionConfig, WorldConfig, DEFAULT_FPS, DEFAULT_GRAVITY,
    JUMP_FACTOR, SIDEWAYS_ACCELERATION,
};
pub use view::WorldView;

use crate::body::{Body, BodyId, Direction};
use crate::error::Result;
use crate::geometry::{Rect, Vec2};
use crate::input::Command;
use crate::render::{Frame, BLANK};
use std::fmt;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Container for bodies and global simulation state
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    bodies: Vec<Body>,
    running: bool,
}

impl World {
    /// Create an empty world
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            width = config.width,
            height = config.height,
            fps = config.fps,
            "created world"
        );
        Ok(World {
            config,
            bodies: Vec::new(),
            running: true,
        })
    }

    /// Append one body, returning its id
    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = BodyId::new(self.bodies.len());
        debug!(%id, name = body.name(), "added body");
        self.bodies.push(body);
        id
    }

    /// Append bodies in the given order
    pub fn add_bodies<I>(&mut self, bodies: I) -> Vec<BodyId>
    where
        I: IntoIterator<Item = Body>,
    {
        bodies.into_iter().map(|body| self.add_body(body)).collect()
    }

    /// Advance every body by one frame, in storage order
    pub fn step(&mut self) {
        for index in 0..self.bodies.len() {
            if let Some((body, view)) = self.split_at(index) {
                body.update(&view);
            }
        }
    }

    /// Apply an input command
    ///
    /// Movement commands reach every user-controlled body; `Quit` stops the
    /// world.
    pub fn dispatch_command(&mut self, command: Command) {
        trace!(?command, "dispatching command");
        if command == Command::Quit {
            self.stop();
            return;
        }

        for index in 0..self.bodies.len() {
            let Some((body, view)) = self.split_at(index) else {
                continue;
            };
            if !body.is_user_controlled() {
                continue;
            }
            match command {
                Command::MoveLeft => body.move_sideways(Direction::Left, &view),
                Command::MoveRight => body.move_sideways(Direction::Right, &view),
                Command::Jump => body.jump(&view),
                Command::Quit => {}
            }
        }
    }

    /// Rasterize the grid: each cell shows the texture of the first body
    /// covering it, or a blank
    pub fn rasterize(&self) -> Frame {
        let width = self.config.width.max(0) as usize;
        let height = self.config.height.max(0) as usize;

        #[cfg(feature = "parallel")]
        let rows: Vec<Vec<char>> = (0..height)
            .into_par_iter()
            .map(|y| self.rasterize_row(y, width))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let rows: Vec<Vec<char>> = (0..height).map(|y| self.rasterize_row(y, width)).collect();

        Frame::from_rows(width, rows)
    }

    fn rasterize_row(&self, y: usize, width: usize) -> Vec<char> {
        (0..width)
            .map(|x| {
                let cell = Rect::cell(x as f64, y as f64);
                self.bodies
                    .iter()
                    .find(|body| body.rect().overlaps(&cell))
                    .map_or(BLANK, Body::texture)
            })
            .collect()
    }

    /// Borrow body `index` mutably together with a view of its siblings
    fn split_at(&mut self, index: usize) -> Option<(&mut Body, WorldView<'_>)> {
        if index >= self.bodies.len() {
            return None;
        }
        let (before, rest) = self.bodies.split_at_mut(index);
        let (body, after) = rest.split_first_mut()?;
        Some((body, WorldView::new(&self.config, before, after)))
    }

    /// View of every body except `id`
    pub fn view_for(&self, id: BodyId) -> Option<WorldView<'_>> {
        let index = id.index();
        if index >= self.bodies.len() {
            return None;
        }
        let (before, rest) = self.bodies.split_at(index);
        Some(WorldView::new(&self.config, before, &rest[1..]))
    }

    /// Run `f` on body `id` with a view of its siblings
    pub fn with_body_mut<R>(
        &mut self,
        id: BodyId,
        f: impl FnOnce(&mut Body, &WorldView<'_>) -> R,
    ) -> Option<R> {
        let (body, view) = self.split_at(id.index())?;
        Some(f(body, &view))
    }

    /// Look up a body
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    /// Look up a body mutably
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.index())
    }

    /// Id of the first body with the given name
    pub fn find_by_name(&self, name: &str) -> Option<BodyId> {
        self.bodies
            .iter()
            .position(|body| body.name() == name)
            .map(BodyId::new)
    }

    /// All bodies in storage order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Number of bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the world has no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Configuration
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Gravity vector
    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    /// Frame rate
    pub fn fps(&self) -> f64 {
        self.config.fps
    }

    /// Whether the simulation loop should keep going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Clear the running flag
    pub fn stop(&mut self) {
        if self.running {
            debug!("world stopped");
        }
        self.running = false;
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<World: width={}, height={}, bodies=[",
            self.config.width, self.config.height
        )?;
        for (i, body) in self.bodies.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", body)?;
        }
        write!(f, "]>")
    }
}
