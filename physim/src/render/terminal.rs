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
//! Terminal output via crossterm

use super::{Frame, Renderer};
use crossterm::{
    cursor, queue,
    style::Print,
    terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate},
};
use std::io::{self, Write};

/// Draws frames to a terminal-like writer
///
/// Each frame starts from the home position and overwrites every cell, so
/// the previous frame is fully replaced. The terminal mode (raw mode,
/// alternate screen) is owned by the caller.
pub struct TerminalRenderer<W: Write> {
    out: W,
    line: String,
}

impl<W: Write> TerminalRenderer<W> {
    /// Wrap a writer
    pub fn new(out: W) -> Self {
        TerminalRenderer {
            out,
            line: String::new(),
        }
    }

    /// Give back the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate, cursor::MoveTo(0, 0))?;
        for (y, row) in frame.rows().enumerate() {
            self.line.clear();
            self.line.extend(row.iter());
            let y = u16::try_from(y).unwrap_or(u16::MAX);
            queue!(self.out, cursor::MoveTo(0, y), Print(&self.line))?;
        }
        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()
    }

    fn finish(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_writes_every_row() {
        let frame = Frame::from_rows(3, vec![vec!['#', ' ', '#'], vec!['=', '=', '=']]);
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.present(&frame).unwrap();
        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(output.contains("# #"));
        assert!(output.contains("==="));
    }

    #[test]
    fn test_finish_clears_screen() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.finish().unwrap();
        let output = String::from_utf8(renderer.into_inner()).unwrap();
        // ESC [ 2 J
        assert!(output.contains("\u{1b}[2J"));
    }
}
