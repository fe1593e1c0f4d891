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
//! Scene files
//!
//! Writes a small custom scene to JSON, reads it back, and compares a few
//! frames from the original and reloaded worlds.
//!
//! Run with: `cargo run --example scene_roundtrip`

use physim::body::BodyDescriptor;
use physim::geometry::Vec2;
use physim::scene::Scene;
use physim::world::{PushOut, ResolutionConfig, WorldConfig};

fn main() -> physim::Result<()> {
    let config = WorldConfig::new(30, 10)
        .with_fps(30.0)
        .with_gravity(Vec2::new(0.0, 0.05))
        .with_resolution(ResolutionConfig {
            push_out: PushOut::WholeCell,
            ..ResolutionConfig::default()
        });

    let scene = Scene::new(config)
        .with_body(
            BodyDescriptor::new("Floor")
                .with_size(30.0, 1.0)
                .with_position(0.0, 9.0)
                .with_friction(4.0)
                .with_texture('='),
        )
        .with_body(
            BodyDescriptor::new("Box")
                .with_size(2.0, 2.0)
                .with_position(14.0, 0.0)
                .movable()
                .with_gravity()
                .with_texture('#'),
        );

    let json = scene.to_json()?;
    println!("{}\n", json);

    let path = std::env::temp_dir().join("physim-roundtrip.json");
    std::fs::write(&path, &json)?;
    let reloaded = Scene::load(&path)?;
    std::fs::remove_file(&path)?;

    let mut a = scene.build()?;
    let mut b = reloaded.build()?;
    for _ in 0..60 {
        a.step();
        b.step();
    }

    println!("{}", a.rasterize());
    println!(
        "\nworlds agree after 60 frames: {}",
        a.bodies() == b.bodies()
    );
    Ok(())
}
