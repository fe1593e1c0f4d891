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
//! Rectangular rigid bodies
//!
//! A [`Body`] is an axis-aligned rectangle with a velocity and a handful of
//! behavior flags. Bodies are built from a [`BodyDescriptor`], which is also
//! the on-disk form used by scene files.
//!
//! Falling, resting and user-driven motion are not explicit states; they
//! emerge from `has_gravity`, the current blocking collision and the
//! velocity.

mod collision;
mod motion;

pub use collision::Side;
pub use motion::{Direction, MAX_RESOLUTION_ITERATIONS};

use crate::error::{PhysimError, Result};
use crate::geometry::{Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default texture for rendered bodies
pub const DEFAULT_TEXTURE: char = '█';

/// Stable index of a body inside its world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(usize);

impl BodyId {
    /// Create an id from a raw arena index
    pub fn new(index: usize) -> Self {
        BodyId(index)
    }

    /// Raw arena index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Body({})", self.0)
    }
}

/// Construction parameters for a [`Body`]
///
/// Field defaults describe a 1x1 immovable solid block.
///
/// # Examples
///
/// ```
/// use physim::body::BodyDescriptor;
///
/// let player = BodyDescriptor::new("Player")
///     .with_size(3.0, 2.0)
///     .with_position(10.0, 1.0)
///     .movable()
///     .with_gravity()
///     .user_controlled()
///     .build()
///     .unwrap();
/// assert!(player.is_movable());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyDescriptor {
    /// Diagnostic name
    pub name: String,
    /// Mass, kept for identity only
    pub mass: f64,
    /// Horizontal extent in cells
    pub width: f64,
    /// Vertical extent in cells
    pub height: f64,
    /// Top-left corner
    pub position: Vec2,
    /// Initial velocity in cells per frame
    pub velocity: Vec2,
    /// Drag applied to bodies sliding along this one
    pub friction_coeff: f64,
    /// Whether gravity accelerates this body
    #[serde(alias = "gravity")]
    pub has_gravity: bool,
    /// Whether this body blocks others
    #[serde(alias = "collisions")]
    pub solid: bool,
    /// Whether the body moves at all
    pub movable: bool,
    /// Whether keyboard commands drive this body
    #[serde(alias = "user_input")]
    pub user_controlled: bool,
    /// Character drawn for covered cells
    pub texture: char,
}

impl Default for BodyDescriptor {
    fn default() -> Self {
        BodyDescriptor {
            name: "Object".to_string(),
            mass: 1.0,
            width: 1.0,
            height: 1.0,
            position: Vec2::zero(),
            velocity: Vec2::zero(),
            friction_coeff: 0.0,
            has_gravity: false,
            solid: true,
            movable: false,
            user_controlled: false,
            texture: DEFAULT_TEXTURE,
        }
    }
}

impl BodyDescriptor {
    /// Start a descriptor with the given name and default fields
    pub fn new(name: impl Into<String>) -> Self {
        BodyDescriptor {
            name: name.into(),
            ..BodyDescriptor::default()
        }
    }

    /// Set width and height
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the top-left corner
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, dx: f64, dy: f64) -> Self {
        self.velocity = Vec2::new(dx, dy);
        self
    }

    /// Set the mass
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Set the friction coefficient
    pub fn with_friction(mut self, friction_coeff: f64) -> Self {
        self.friction_coeff = friction_coeff;
        self
    }

    /// Set the texture character
    pub fn with_texture(mut self, texture: char) -> Self {
        self.texture = texture;
        self
    }

    /// Let the body move
    pub fn movable(mut self) -> Self {
        self.movable = true;
        self
    }

    /// Subject the body to gravity
    pub fn with_gravity(mut self) -> Self {
        self.has_gravity = true;
        self
    }

    /// Exclude the body from collision blocking
    pub fn non_solid(mut self) -> Self {
        self.solid = false;
        self
    }

    /// Route keyboard commands to the body
    pub fn user_controlled(mut self) -> Self {
        self.user_controlled = true;
        self
    }

    /// Validate and build the body
    pub fn build(self) -> Result<Body> {
        Body::new(self)
    }
}

/// A rectangular physical entity
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    name: String,
    mass: f64,
    width: f64,
    height: f64,
    /// Top-left corner in grid cells
    pub position: Vec2,
    /// Velocity in cells per frame
    pub velocity: Vec2,
    friction_coeff: f64,
    movable: bool,
    has_gravity: bool,
    solid: bool,
    user_controlled: bool,
    texture: char,
}

impl Body {
    /// Build a body from its descriptor
    ///
    /// Width and height must be positive and finite: the side classifier
    /// draws lines through opposite corners, which is undefined for a
    /// zero-width rectangle.
    pub fn new(descriptor: BodyDescriptor) -> Result<Body> {
        let invalid = |reason: String| PhysimError::InvalidBody {
            name: descriptor.name.clone(),
            reason,
        };

        if !(descriptor.width > 0.0 && descriptor.width.is_finite()) {
            return Err(invalid(format!(
                "width must be positive and finite, got {}",
                descriptor.width
            )));
        }
        if !(descriptor.height > 0.0 && descriptor.height.is_finite()) {
            return Err(invalid(format!(
                "height must be positive and finite, got {}",
                descriptor.height
            )));
        }
        if !descriptor.position.is_valid() {
            return Err(invalid(format!("position {} is not finite", descriptor.position)));
        }
        if !descriptor.velocity.is_valid() {
            return Err(invalid(format!("velocity {} is not finite", descriptor.velocity)));
        }
        if !descriptor.friction_coeff.is_finite() {
            return Err(invalid("friction coefficient must be finite".to_string()));
        }

        Ok(Body {
            name: descriptor.name,
            mass: descriptor.mass,
            width: descriptor.width,
            height: descriptor.height,
            position: descriptor.position,
            velocity: descriptor.velocity,
            friction_coeff: descriptor.friction_coeff,
            movable: descriptor.movable,
            has_gravity: descriptor.has_gravity,
            solid: descriptor.solid,
            user_controlled: descriptor.user_controlled,
            texture: descriptor.texture,
        })
    }

    /// Descriptor reproducing this body's current state
    pub fn descriptor(&self) -> BodyDescriptor {
        BodyDescriptor {
            name: self.name.clone(),
            mass: self.mass,
            width: self.width,
            height: self.height,
            position: self.position,
            velocity: self.velocity,
            friction_coeff: self.friction_coeff,
            has_gravity: self.has_gravity,
            solid: self.solid,
            movable: self.movable,
            user_controlled: self.user_controlled,
            texture: self.texture,
        }
    }

    /// Diagnostic name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mass
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Horizontal extent
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Vertical extent
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Friction coefficient applied to bodies touching this one
    pub fn friction_coeff(&self) -> f64 {
        self.friction_coeff
    }

    /// Whether `update` moves this body
    pub fn is_movable(&self) -> bool {
        self.movable
    }

    /// Whether gravity applies
    pub fn has_gravity(&self) -> bool {
        self.has_gravity
    }

    /// Whether this body blocks others
    pub fn is_solid(&self) -> bool {
        self.solid
    }

    /// Whether keyboard commands apply
    pub fn is_user_controlled(&self) -> bool {
        self.user_controlled
    }

    /// Render character
    pub fn texture(&self) -> char {
        self.texture
    }

    /// Current rectangle
    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.width, self.height)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Body '{}': mass={}, position={}, velocity={}>",
            self.name, self.mass, self.position, self.velocity
        )
    }
}
