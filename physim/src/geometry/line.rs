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
//! Affine lines through two points

use super::Vec2;

/// Non-vertical line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    slope: f64,
    intercept: f64,
}

impl Line {
    /// Evaluate the line at `x`
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Slope of the line
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Value at `x = 0`
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

/// Build the line passing through `p1` and `p2`
///
/// The points must differ in x. Callers only pass rectangle corners of
/// bodies whose width was validated at construction, so a vertical line is
/// a programmer error rather than a runtime condition.
///
/// # Examples
///
/// ```
/// use physim::geometry::{make_line, Vec2};
///
/// let line = make_line(Vec2::new(0.0, 1.0), Vec2::new(2.0, 5.0));
/// assert_eq!(line.at(1.0), 3.0);
/// ```
pub fn make_line(p1: Vec2, p2: Vec2) -> Line {
    debug_assert!(p1.x != p2.x, "make_line requires a non-vertical line");
    let slope = (p2.y - p1.y) / (p2.x - p1.x);
    Line {
        slope,
        intercept: p1.y - slope * p1.x,
    }
}
