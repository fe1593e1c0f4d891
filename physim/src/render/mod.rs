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
//! Character-grid rendering
//!
//! The physics core hands the renderer a [`Frame`]: one character per grid
//! cell, produced by [`World::rasterize`](crate::world::World::rasterize).
//! Renderers only read frames and never touch simulation state.

mod terminal;

pub use terminal::TerminalRenderer;

use std::fmt;
use std::io;

/// Character used for cells no body covers
pub const BLANK: char = ' ';

/// Immutable snapshot of the grid for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Frame {
    /// A frame filled with [`BLANK`]
    pub fn blank(width: usize, height: usize) -> Self {
        Frame {
            width,
            height,
            cells: vec![BLANK; width * height],
        }
    }

    /// Build a frame from rows of exactly `width` characters
    ///
    /// Short rows are padded with [`BLANK`] and long rows truncated.
    pub fn from_rows(width: usize, rows: Vec<Vec<char>>) -> Self {
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for mut row in rows {
            row.resize(width, BLANK);
            cells.extend(row);
        }
        Frame { width, height, cells }
    }

    /// Width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Character at `(x, y)`, if inside the frame
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x).copied()
        } else {
            None
        }
    }

    /// Row `y` as a slice
    pub fn row(&self, y: usize) -> &[char] {
        let start = (y * self.width).min(self.cells.len());
        let end = (start + self.width).min(self.cells.len());
        &self.cells[start..end]
    }

    /// Row `y` as a string
    pub fn row_string(&self, y: usize) -> String {
        self.row(y).iter().collect()
    }

    /// Iterate over rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        // chunks() rejects a zero chunk size
        self.cells.chunks(self.width.max(1)).take(self.height)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for ch in row {
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}

/// Sink for rendered frames
pub trait Renderer {
    /// Draw a frame, replacing whatever was shown before
    fn present(&mut self, frame: &Frame) -> io::Result<()>;

    /// Clean up the display surface after the last frame
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Renderer that keeps frames in memory
///
/// Used by headless runs and tests.
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    frames: Vec<Frame>,
    finished: bool,
}

impl MemoryRenderer {
    /// Create an empty renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Most recent frame
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Whether [`Renderer::finish`] was called
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Renderer for MemoryRenderer {
    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.finished = true;
        Ok(())
    }
}
