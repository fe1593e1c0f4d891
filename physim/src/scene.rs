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
//! Scene descriptions
//!
//! A scene is the world configuration plus an ordered list of body
//! descriptors. Scenes can be built in code, loaded from JSON, or taken
//! from [`Scene::default_for`], the platformer playground sized to the
//! terminal.
//!
//! # Format versioning
//!
//! Scene files carry a `format_version`. A file is accepted when its major
//! version matches [`SCENE_FORMAT_VERSION`] and its minor version is not
//! newer. For `0.x` versions the minor version must match exactly.

use crate::body::{Body, BodyDescriptor};
use crate::error::{PhysimError, Result};
use crate::geometry::Vec2;
use crate::world::{World, WorldConfig};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Scene file format understood by this build
pub const SCENE_FORMAT_VERSION: &str = "1.0.0";

/// Gravity used by the default scene
pub const PLAYGROUND_GRAVITY: Vec2 = Vec2::new(0.0, 0.03);

/// Height of the default scene's ground strip
pub const GROUND_HEIGHT: f64 = 2.0;

/// World configuration and bodies, in storage order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene file format version
    #[serde(default = "default_format_version")]
    pub format_version: String,
    /// Global settings
    pub world: WorldConfig,
    /// Bodies in evaluation and paint order
    #[serde(default)]
    pub bodies: Vec<BodyDescriptor>,
}

fn default_format_version() -> String {
    SCENE_FORMAT_VERSION.to_string()
}

impl Scene {
    /// Empty scene with the given configuration
    pub fn new(world: WorldConfig) -> Self {
        Scene {
            format_version: default_format_version(),
            world,
            bodies: Vec::new(),
        }
    }

    /// Append a body descriptor
    pub fn with_body(mut self, body: BodyDescriptor) -> Self {
        self.bodies.push(body);
        self
    }

    /// The platformer playground for a `width` x `height` grid
    ///
    /// A floating obstacle, the ground, invisible barriers just outside the
    /// left and right edges, and a user-controlled player falling from the
    /// top-left.
    pub fn default_for(width: i32, height: i32) -> Self {
        let w = f64::from(width);
        let h = f64::from(height);
        let config = WorldConfig::new(width, height).with_gravity(PLAYGROUND_GRAVITY);

        Scene::new(config)
            .with_body(
                BodyDescriptor::new("Obstacle")
                    .with_size(30.0, 4.0)
                    .with_position(w - 50.0, h - GROUND_HEIGHT - 8.0)
                    .with_friction(20.0)
                    .with_texture('▚'),
            )
            .with_body(
                BodyDescriptor::new("Ground")
                    .with_size(w.max(1.0), GROUND_HEIGHT)
                    .with_position(0.0, h - GROUND_HEIGHT)
                    .with_friction(7.0),
            )
            .with_body(
                BodyDescriptor::new("Barrier left")
                    .with_size(5.0, h.max(1.0))
                    .with_position(-5.0, 0.0)
                    .with_texture(' '),
            )
            .with_body(
                BodyDescriptor::new("Barrier right")
                    .with_size(5.0, h.max(1.0))
                    .with_position(w, 0.0)
                    .with_texture(' '),
            )
            .with_body(
                BodyDescriptor::new("Player")
                    .with_size(3.0, 2.0)
                    .with_position(10.0, 1.0)
                    .movable()
                    .with_gravity()
                    .user_controlled(),
            )
    }

    /// Parse a scene from JSON, checking its format version
    pub fn from_json(json: &str) -> Result<Self> {
        let scene: Scene = serde_json::from_str(json)?;
        scene.check_version()?;
        Ok(scene)
    }

    /// Load a scene file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let scene = Self::from_json(&json)?;
        debug!(path = %path.display(), bodies = scene.bodies.len(), "loaded scene");
        Ok(scene)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check `format_version` against [`SCENE_FORMAT_VERSION`]
    pub fn check_version(&self) -> Result<()> {
        if is_format_compatible(&self.format_version, SCENE_FORMAT_VERSION) {
            Ok(())
        } else {
            Err(PhysimError::UnsupportedSceneVersion {
                found: self.format_version.clone(),
                supported: SCENE_FORMAT_VERSION.to_string(),
            })
        }
    }

    /// Build the world, validating configuration and every body
    pub fn build(&self) -> Result<World> {
        self.check_version()?;
        let bodies = self
            .bodies
            .iter()
            .cloned()
            .map(|descriptor| {
                Body::new(descriptor).map_err(|err| {
                    warn!(%err, "rejected scene body");
                    err
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let mut world = World::new(self.world.clone())?;
        world.add_bodies(bodies);
        Ok(world)
    }
}

fn is_format_compatible(found: &str, supported: &str) -> bool {
    let (Ok(found), Ok(supported)) = (Version::parse(found), Version::parse(supported)) else {
        return false;
    };

    if found.major != supported.major {
        return false;
    }
    if found.major != 0 {
        found.minor <= supported.minor
    } else {
        found.minor == supported.minor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_layout() {
        let scene = Scene::default_for(120, 30);
        let names: Vec<&str> = scene.bodies.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Obstacle", "Ground", "Barrier left", "Barrier right", "Player"]
        );
        assert_eq!(scene.world.gravity, PLAYGROUND_GRAVITY);
        assert_eq!(scene.bodies[1].position, Vec2::new(0.0, 28.0));
        assert_eq!(scene.bodies[0].position, Vec2::new(70.0, 20.0));
        assert_eq!(scene.bodies[3].position, Vec2::new(120.0, 0.0));
        assert!(scene.bodies[4].user_controlled);
    }

    #[test]
    fn test_default_scene_builds() {
        let world = Scene::default_for(80, 24).build().unwrap();
        assert_eq!(world.len(), 5);
        assert!(world.is_running());
    }

    #[test]
    fn test_version_compatibility() {
        assert!(is_format_compatible("1.0.0", "1.0.0"));
        assert!(is_format_compatible("1.0.7", "1.2.0"));
        assert!(!is_format_compatible("1.3.0", "1.2.0"));
        assert!(!is_format_compatible("2.0.0", "1.0.0"));
        assert!(is_format_compatible("0.2.1", "0.2.0"));
        assert!(!is_format_compatible("0.1.0", "0.2.0"));
        assert!(!is_format_compatible("not-a-version", "1.0.0"));
    }

    #[test]
    fn test_json_round_trip() {
        let scene = Scene::default_for(60, 20);
        let json = scene.to_json().unwrap();
        let parsed = Scene::from_json(&json).unwrap();
        assert_eq!(parsed, scene);
    }

    #[test]
    fn test_rejects_future_format() {
        let json = r#"{"format_version": "2.0.0", "world": {"width": 10, "height": 5}}"#;
        match Scene::from_json(json) {
            Err(PhysimError::UnsupportedSceneVersion { found, .. }) => assert_eq!(found, "2.0.0"),
            other => panic!("expected version error, got {:?}", other),
        }
    }

    #[test]
    fn test_build_reports_bad_body() {
        let scene = Scene::new(WorldConfig::new(10, 5))
            .with_body(BodyDescriptor::new("Line").with_size(0.0, 5.0));
        let err = scene.build().unwrap_err();
        assert!(matches!(err, PhysimError::InvalidBody { ref name, .. } if name == "Line"));
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let json = r#"{
            "world": {"width": 20, "height": 10},
            "bodies": [{"name": "Crate", "width": 2, "height": 2, "movable": true, "gravity": true}]
        }"#;
        let scene = Scene::from_json(json).unwrap();
        assert_eq!(scene.format_version, SCENE_FORMAT_VERSION);
        let world = scene.build().unwrap();
        let crate_body = &world.bodies()[0];
        assert!(crate_body.has_gravity());
        assert!(crate_body.is_solid());
    }
}
