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
//! Background keyboard listener

use super::{Command, CommandSender, KeyMapper};
use crossterm::event::{self, Event};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// How long the listener waits for an event before re-checking the queue
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Spawn a thread forwarding key presses to `sender`
///
/// The thread exits after forwarding `Quit`, when the queue's receiving side
/// is dropped, or after a terminal read error (which is forwarded as `Quit`
/// so the loop shuts down cleanly).
pub fn spawn_keyboard_listener(sender: CommandSender) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("physim-input".to_string())
        .spawn(move || listen(sender, KeyMapper::new()))
}

fn listen(sender: CommandSender, mapper: KeyMapper) {
    loop {
        let ready = match event::poll(POLL_INTERVAL) {
            Ok(ready) => ready,
            Err(err) => {
                warn!(%err, "failed to poll terminal input, quitting");
                sender.send(Command::Quit);
                return;
            }
        };
        if !ready {
            continue;
        }

        let command = match event::read() {
            Ok(Event::Key(key)) => mapper.map(&key),
            Ok(_) => None,
            Err(err) => {
                warn!(%err, "failed to read terminal input, quitting");
                sender.send(Command::Quit);
                return;
            }
        };

        if let Some(command) = command {
            if !sender.send(command) {
                debug!("command queue closed, stopping input listener");
                return;
            }
            if command == Command::Quit {
                return;
            }
        }
    }
}
