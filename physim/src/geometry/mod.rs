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
//! Planar geometry primitives
//!
//! Grid-space vectors, axis-aligned rectangles and the affine lines used to
//! split a rectangle along its diagonals. The y axis grows downward, matching
//! terminal row order.

mod line;

pub use line::{make_line, Line};

use std::fmt;
use std::ops::{Add, AddAssign};

/// Index of a coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis (columns)
    X,
    /// Vertical axis (rows, growing downward)
    Y,
}

impl Axis {
    /// The other axis
    pub fn orthogonal(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// 2D vector with double-precision components
///
/// Used for positions (grid cells) and velocities (cells per frame).
///
/// # Examples
///
/// ```
/// use physim::geometry::Vec2;
///
/// let mut v = Vec2::new(1.0, 2.0);
/// v += Vec2::new(0.5, -1.0);
/// assert_eq!(v, Vec2::new(1.5, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Vec2 {
    /// Horizontal component
    pub x: f64,
    /// Vertical component
    pub y: f64,
}

impl Vec2 {
    /// Create a new vector
    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    /// The zero vector
    pub const fn zero() -> Self {
        Vec2::new(0.0, 0.0)
    }

    /// Component along `axis`
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Set the component along `axis`
    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }

    /// Check if both components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Get the vector as an array
    pub fn as_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from(arr: [f64; 2]) -> Self {
        Vec2::new(arr[0], arr[1])
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Axis-aligned rectangle covering `[x, x + width) × [y, y + height)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub origin: Vec2,
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its top-left corner and extents
    pub fn new(origin: Vec2, width: f64, height: f64) -> Self {
        Rect { origin, width, height }
    }

    /// The single grid cell whose top-left corner is `(x, y)`
    pub fn cell(x: f64, y: f64) -> Self {
        Rect::new(Vec2::new(x, y), 1.0, 1.0)
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> f64 {
        self.origin.x + self.width
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> f64 {
        self.origin.y + self.height
    }

    /// Strict overlap test on both axes
    ///
    /// Rectangles sharing only an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() > other.origin.x
            && other.right() > self.origin.x
            && self.bottom() > other.origin.y
            && other.bottom() > self.origin.y
    }

    /// Geometric center
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (2.0 * self.origin.x + self.width) / 2.0,
            (2.0 * self.origin.y + self.height) / 2.0,
        )
    }

    /// The two diagonals: top-left to bottom-right, then bottom-left to top-right
    ///
    /// Requires `width > 0`; a zero-width rectangle has vertical diagonals.
    pub fn diagonals(&self) -> (Line, Line) {
        let top_left = self.origin;
        let bottom_right = Vec2::new(self.right(), self.bottom());
        let bottom_left = Vec2::new(self.origin.x, self.bottom());
        let top_right = Vec2::new(self.right(), self.origin.y);
        (make_line(top_left, bottom_right), make_line(bottom_left, top_right))
    }

    /// This rectangle moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Rect {
        Rect::new(self.origin + offset, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_requires_both_axes() {
        let a = Rect::new(Vec2::new(0.0, 0.0), 5.0, 5.0);
        let b = Rect::new(Vec2::new(3.0, 10.0), 5.0, 5.0);
        assert!(!a.overlaps(&b));
        let c = Rect::new(Vec2::new(3.0, 4.0), 5.0, 5.0);
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), 5.0, 2.0);
        let b = Rect::new(Vec2::new(5.0, 0.0), 5.0, 2.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        let below = Rect::new(Vec2::new(0.0, 2.0), 5.0, 2.0);
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_center() {
        let r = Rect::new(Vec2::new(2.0, 4.0), 3.0, 2.0);
        assert_eq!(r.center(), Vec2::new(3.5, 5.0));
    }

    #[test]
    fn test_diagonals_pass_through_corners() {
        let r = Rect::new(Vec2::new(0.0, 18.0), 50.0, 2.0);
        let (down, up) = r.diagonals();
        assert!((down.at(0.0) - 18.0).abs() < 1e-12);
        assert!((down.at(50.0) - 20.0).abs() < 1e-12);
        assert!((up.at(0.0) - 20.0).abs() < 1e-12);
        assert!((up.at(50.0) - 18.0).abs() < 1e-12);
    }

    #[test]
    fn test_axis_access() {
        let mut v = Vec2::new(1.0, 2.0);
        assert_eq!(v.get(Axis::X), 1.0);
        v.set(Axis::Y, -3.0);
        assert_eq!(v.y, -3.0);
        assert_eq!(Axis::X.orthogonal(), Axis::Y);
    }

    #[test]
    fn test_array_conversion() {
        let v = Vec2::from([3.0, -0.5]);
        assert_eq!(v, Vec2::new(3.0, -0.5));
        assert_eq!(v.as_array(), [3.0, -0.5]);
    }
}
