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
//! Headless playground run
//!
//! Builds the default playground, scripts a few player inputs, and prints
//! a handful of rasterized frames to stdout without touching the terminal.
//!
//! Run with: `cargo run --example headless`

use physim::input::Command;
use physim::scene::Scene;

const WIDTH: i32 = 72;
const HEIGHT: i32 = 18;
const FRAMES: usize = 120;
const PRINT_EVERY: usize = 30;

/// Inputs applied at specific frames
const SCRIPT: &[(usize, Command)] = &[
    (40, Command::MoveRight),
    (41, Command::MoveRight),
    (60, Command::Jump),
    (62, Command::MoveRight),
];

fn main() -> physim::Result<()> {
    println!("physim - headless playground");
    println!("============================\n");

    let mut world = Scene::default_for(WIDTH, HEIGHT).build()?;
    println!("{}\n", world);

    for frame in 0..FRAMES {
        for (_, command) in SCRIPT.iter().filter(|(at, _)| *at == frame) {
            world.dispatch_command(*command);
        }
        world.step();

        if frame % PRINT_EVERY == PRINT_EVERY - 1 {
            println!("frame {}:", frame + 1);
            println!("{}", world.rasterize());
            println!("{}", "-".repeat(WIDTH as usize));
        }
    }

    if let Some(player) = world.find_by_name("Player").and_then(|id| world.body(id)) {
        println!("\nfinal {}", player);
    }

    Ok(())
}
