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
//! Key event to command mapping

use super::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Translates key presses into commands
///
/// `a` / Left move left, `d` / Right move right, Space jumps, and `q`,
/// Esc or Ctrl-C quit. Key releases are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyMapper;

impl KeyMapper {
    /// Create the default mapping
    pub fn new() -> Self {
        KeyMapper
    }

    /// Command for a key event, if any
    pub fn map(&self, event: &KeyEvent) -> Option<Command> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Command::MoveLeft),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Command::MoveRight),
            KeyCode::Char(' ') => Some(Command::Jump),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_movement_keys() {
        let mapper = KeyMapper::new();
        assert_eq!(mapper.map(&press(KeyCode::Char('a'))), Some(Command::MoveLeft));
        assert_eq!(mapper.map(&press(KeyCode::Left)), Some(Command::MoveLeft));
        assert_eq!(mapper.map(&press(KeyCode::Char('d'))), Some(Command::MoveRight));
        assert_eq!(mapper.map(&press(KeyCode::Right)), Some(Command::MoveRight));
        assert_eq!(mapper.map(&press(KeyCode::Char(' '))), Some(Command::Jump));
    }

    #[test]
    fn test_quit_keys() {
        let mapper = KeyMapper::new();
        assert_eq!(mapper.map(&press(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(mapper.map(&press(KeyCode::Esc)), Some(Command::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(mapper.map(&ctrl_c), Some(Command::Quit));
        assert_eq!(mapper.map(&press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let mapper = KeyMapper::new();
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(mapper.map(&release), None);
    }
}
