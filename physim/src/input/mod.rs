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
//! Keyboard input
//!
//! Raw key events are translated into [`Command`]s on a listener thread and
//! handed to the simulation loop through a bounded [`CommandQueue`]. The
//! loop drains the queue once per frame, so physics state is only ever
//! touched by the loop thread and input latency stays within one frame.

mod keymap;
mod listener;

pub use keymap::KeyMapper;
pub use listener::spawn_keyboard_listener;

use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use tracing::trace;

/// Default number of commands buffered between frames
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Abstract input command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Accelerate user-controlled bodies toward -x
    MoveLeft,
    /// Accelerate user-controlled bodies toward +x
    MoveRight,
    /// Make supported user-controlled bodies jump
    Jump,
    /// Stop the simulation
    Quit,
}

/// Producer half of a [`CommandQueue`]
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: SyncSender<Command>,
}

impl CommandSender {
    /// Enqueue a command without blocking
    ///
    /// When the queue is full the command is dropped. Returns false once the
    /// receiving side is gone.
    pub fn send(&self, command: Command) -> bool {
        match self.tx.try_send(command) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                trace!(?dropped, "command queue full, dropping command");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Bounded queue of commands drained once per simulation step
#[derive(Debug)]
pub struct CommandQueue {
    rx: Receiver<Command>,
    tx: SyncSender<Command>,
}

impl CommandQueue {
    /// Create a queue with [`DEFAULT_QUEUE_CAPACITY`]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    /// Create a queue holding at most `capacity` pending commands
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "Command queue capacity must be positive");
        let (tx, rx) = mpsc::sync_channel(capacity);
        CommandQueue { rx, tx }
    }

    /// Create a producer handle
    pub fn sender(&self) -> CommandSender {
        CommandSender { tx: self.tx.clone() }
    }

    /// Take every pending command, oldest first
    pub fn drain(&self) -> Vec<Command> {
        self.rx.try_iter().collect()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_returns_commands_in_order() {
        let queue = CommandQueue::new();
        let sender = queue.sender();
        assert!(sender.send(Command::MoveLeft));
        assert!(sender.send(Command::Jump));
        assert_eq!(queue.drain(), vec![Command::MoveLeft, Command::Jump]);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_full_queue_drops_newest() {
        let queue = CommandQueue::with_capacity(2);
        let sender = queue.sender();
        sender.send(Command::MoveLeft);
        sender.send(Command::MoveRight);
        assert!(sender.send(Command::Jump));
        assert_eq!(queue.drain(), vec![Command::MoveLeft, Command::MoveRight]);
    }

    #[test]
    fn test_sender_from_another_thread() {
        let queue = CommandQueue::new();
        let sender = queue.sender();
        std::thread::spawn(move || {
            sender.send(Command::Quit);
        })
        .join()
        .unwrap();
        assert_eq!(queue.drain(), vec![Command::Quit]);
    }

    #[test]
    #[should_panic(expected = "Command queue capacity must be positive")]
    fn test_zero_capacity_panics() {
        CommandQueue::with_capacity(0);
    }
}
