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
//! # physim
//!
//! Axis-aligned rigid-body physics on a character grid, driven by the
//! keyboard and drawn in the terminal.
//!
//! ## Features
//!
//! - **Bodies**: rectangles with velocity, gravity, friction and behavior flags
//! - **Collision**: strict AABB overlap, diagonal side classification and
//!   cell-wise push-out with tangential friction
//! - **World**: ordered body arena stepped sequentially at a fixed frame rate
//! - **Input**: key presses mapped to commands and queued between frames
//! - **Rendering**: first-body-wins rasterization to a character frame,
//!   optionally row-parallel with Rayon
//! - **Scenes**: JSON scene files with versioned format
//!
//! ## Example
//!
//! ```rust
//! use physim::body::BodyDescriptor;
//! use physim::geometry::Vec2;
//! use physim::world::{World, WorldConfig};
//!
//! let config = WorldConfig::new(50, 20)
//!     .with_fps(20.0)
//!     .with_gravity(Vec2::new(0.0, 0.03));
//! let mut world = World::new(config).unwrap();
//!
//! world.add_body(
//!     BodyDescriptor::new("Ground")
//!         .with_size(50.0, 2.0)
//!         .with_position(0.0, 18.0)
//!         .build()
//!         .unwrap(),
//! );
//! let player = world.add_body(
//!     BodyDescriptor::new("Player")
//!         .with_size(3.0, 2.0)
//!         .with_position(10.0, 1.0)
//!         .movable()
//!         .with_gravity()
//!         .build()
//!         .unwrap(),
//! );
//!
//! for _ in 0..200 {
//!     world.step();
//! }
//! assert_eq!(world.body(player).unwrap().position.y, 16.0);
//! ```

#![warn(missing_docs)]

/// Vectors, rectangles and lines
pub mod geometry;

/// Rigid bodies and collision resolution
pub mod body;

/// Body arena and stepping
pub mod world;

/// Keyboard commands and the input queue
pub mod input;

/// Frames and renderers
pub mod render;

/// Frame pacing and the main loop
pub mod runner;

/// Scene descriptions and loading
pub mod scene;

/// Error types
pub mod error;

pub use body::{Body, BodyDescriptor, BodyId};
pub use error::{PhysimError, Result};
pub use world::{World, WorldConfig};
