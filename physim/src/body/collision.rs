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
//! Collision detection and impact-side classification

use super::{Body, BodyId};
use crate::geometry::{Axis, Rect, Vec2};
use crate::world::{NonSolidPolicy, WorldView};

/// Quadrant of another body's rectangle in which a body's center lies
///
/// The other rectangle is split by its two diagonals. `Up` is the quadrant
/// on the +y side (below it on screen), `Down` the -y side (above it on
/// screen), `Left` and `Right` the horizontal sides. The variant names the
/// direction a colliding body is pushed along its resolution axis: `Up` and
/// `Right` push toward +y and +x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// +y quadrant
    Up,
    /// -y quadrant
    Down,
    /// -x quadrant
    Left,
    /// +x quadrant
    Right,
}

impl Side {
    /// Axis along which a body on this side is pushed out
    pub fn axis(self) -> Axis {
        match self {
            Side::Up | Side::Down => Axis::Y,
            Side::Left | Side::Right => Axis::X,
        }
    }

    /// Sign of the push-out direction along [`Side::axis`]
    pub fn sign(self) -> f64 {
        match self {
            Side::Up | Side::Right => 1.0,
            Side::Down | Side::Left => -1.0,
        }
    }

    fn from_diagonals(below_falling: bool, below_rising: bool) -> Side {
        match (below_falling, below_rising) {
            (false, false) => Side::Down,
            (false, true) => Side::Right,
            (true, false) => Side::Left,
            (true, true) => Side::Up,
        }
    }
}

impl Body {
    /// Strict AABB overlap test against another body
    ///
    /// Symmetric; bodies that only touch along an edge do not collide.
    pub fn check_collision(&self, other: &Body) -> bool {
        self.rect().overlaps(&other.rect())
    }

    /// Geometric center
    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Classify which side of `other` this body's center lies on
    pub fn collision_side(&self, other: &Body) -> Side {
        let center = self.center();
        let (falling, rising) = other.rect().diagonals();
        Side::from_diagonals(center.y > falling.at(center.x), center.y > rising.at(center.x))
    }

    /// First solid sibling, in storage order, overlapping this body
    pub fn find_blocking_collision(&self, view: &WorldView<'_>) -> Option<BodyId> {
        first_blocking(&self.rect(), view)
    }
}

/// First solid sibling overlapping `rect`, honoring the view's
/// [`NonSolidPolicy`]
pub(crate) fn first_blocking(rect: &Rect, view: &WorldView<'_>) -> Option<BodyId> {
    let policy = view.resolution().non_solid;
    for (id, other) in view.siblings() {
        if !other.is_solid() {
            match policy {
                NonSolidPolicy::Skip => continue,
                NonSolidPolicy::StopScan => return None,
            }
        }
        if rect.overlaps(&other.rect()) {
            return Some(id);
        }
    }
    None
}
