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
//! World configuration
//!
//! Grid extents, frame rate, gravity and the collision-resolution policies.
//! Several physics constants are expressed per frame and therefore scale
//! with `fps`; they are gathered here so the coupling lives in one place.

use crate::error::{PhysimError, Result};
use crate::geometry::Vec2;
use serde::{Deserialize, Serialize};

/// Default frame rate, frames per second
pub const DEFAULT_FPS: f64 = 20.0;

/// Default gravity, cells per frame squared
pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, 0.1);

/// Multiplier applied to `fps * gravity.y` for the jump impulse
pub const JUMP_FACTOR: f64 = -1.2;

/// Horizontal acceleration per `move_sideways` call, cells per frame
pub const SIDEWAYS_ACCELERATION: f64 = 1.1;

/// How the blocking-collision scan treats bodies that are not solid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonSolidPolicy {
    /// Continue past non-solid bodies
    #[default]
    Skip,
    /// End the scan with "no collision" at the first non-solid body seen
    ///
    /// Earlier releases behaved this way; a non-solid body stored before a
    /// real obstacle hides that obstacle.
    StopScan,
}

/// Step size used when pushing a body out of an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PushOut {
    /// Move whole cells, then settle flush against the obstacle face
    #[default]
    Flush,
    /// Move exactly one cell per iteration
    WholeCell,
}

/// Collision-resolution policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Treatment of non-solid bodies during the blocking scan
    #[serde(default)]
    pub non_solid: NonSolidPolicy,
    /// Push-out step size
    #[serde(default)]
    pub push_out: PushOut,
}

/// Global simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Grid width in cells
    pub width: i32,
    /// Grid height in cells
    pub height: i32,
    /// Frame rate; also scales jump, friction and speed limits
    #[serde(default = "default_fps")]
    pub fps: f64,
    /// Gravity added to unsupported bodies each step
    #[serde(default = "default_gravity")]
    pub gravity: Vec2,
    /// Collision-resolution policies
    #[serde(default)]
    pub resolution: ResolutionConfig,
}

fn default_fps() -> f64 {
    DEFAULT_FPS
}

fn default_gravity() -> Vec2 {
    DEFAULT_GRAVITY
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            width: 80,
            height: 24,
            fps: DEFAULT_FPS,
            gravity: DEFAULT_GRAVITY,
            resolution: ResolutionConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Create a configuration with the given grid size and default physics
    pub fn new(width: i32, height: i32) -> Self {
        WorldConfig {
            width,
            height,
            ..WorldConfig::default()
        }
    }

    /// Set the frame rate
    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }

    /// Set the gravity vector
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the collision-resolution policies
    pub fn with_resolution(mut self, resolution: ResolutionConfig) -> Self {
        self.resolution = resolution;
        self
    }

    /// Check that the configuration can drive a simulation
    pub fn validate(&self) -> Result<()> {
        if !(self.fps > 0.0 && self.fps.is_finite()) {
            return Err(PhysimError::InvalidWorld(format!(
                "fps must be positive and finite, got {}",
                self.fps
            )));
        }
        if !self.gravity.is_valid() {
            return Err(PhysimError::InvalidWorld(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        if self.width < 0 || self.height < 0 {
            return Err(PhysimError::InvalidWorld(format!(
                "grid size must not be negative, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Seconds per frame
    pub fn dt(&self) -> f64 {
        1.0 / self.fps
    }

    /// Vertical velocity given to a jumping body
    pub fn jump_impulse(&self) -> f64 {
        JUMP_FACTOR * self.fps * self.gravity.y
    }

    /// Multiplier applied to tangential velocity on contact with a body of
    /// the given friction coefficient
    pub fn friction_factor(&self, friction_coeff: f64) -> f64 {
        1.0 - friction_coeff / self.fps
    }

    /// Horizontal speed up to which `move_sideways` keeps accelerating
    pub fn ramp_limit(&self) -> f64 {
        self.fps / 5.0
    }

    /// Horizontal speed a body snaps to once past the ramp limit
    pub fn snap_speed(&self) -> f64 {
        self.fps / 10.0
    }
}
