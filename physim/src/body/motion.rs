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
//! Per-step motion: gravity, integration and push-out resolution
//!
//! # Resolution
//!
//! After integrating, a solid body that overlaps a solid sibling is pushed
//! back out along one axis. The axis and direction come from
//! [`Body::collision_side`]; friction from the obstacle damps the velocity
//! component along the other (tangential) axis. The push itself is a
//! discrete loop moving at most one cell per iteration, so deep penetration
//! takes several iterations and fast bodies can tunnel through thin ones.

use super::collision::first_blocking;
use super::{Body, Side};
use crate::geometry::{Axis, Vec2};
use crate::world::{PushOut, WorldView, SIDEWAYS_ACCELERATION};
use tracing::{debug, warn};

/// Upper bound on push-out iterations per body per step
///
/// Each iteration moves the body at least partway out of its obstacle, so
/// the bound is only reached when bodies are wedged between obstacles.
pub const MAX_RESOLUTION_ITERATIONS: usize = 10_000;

/// Upper bound on nudges taken to clear a rounding overlap after a snap
const MAX_ROUNDING_NUDGES: usize = 32;

/// Horizontal movement direction for [`Body::move_sideways`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward -x
    Left,
    /// Toward +x
    Right,
}

impl Direction {
    /// -1 for left, +1 for right
    pub fn sign(self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

impl Body {
    /// Give the body an upward impulse if it is standing on something
    ///
    /// Support is probed with a copy of the body's rectangle shifted one cell
    /// toward +y; the body itself is not moved. Airborne or immovable bodies
    /// are left untouched.
    pub fn jump(&mut self, view: &WorldView<'_>) {
        if !self.movable {
            return;
        }
        let probe = self.rect().translated(Vec2::new(0.0, 1.0));
        if first_blocking(&probe, view).is_some() {
            self.velocity.y = view.config().jump_impulse();
        }
    }

    /// Accelerate horizontally, bounded by the frame-rate speed limits
    ///
    /// Below the ramp limit (`fps / 5`) each call adds
    /// [`SIDEWAYS_ACCELERATION`](crate::world::SIDEWAYS_ACCELERATION) in
    /// `direction`. Past it, the horizontal speed snaps to `fps / 10` keeping
    /// its current sign.
    pub fn move_sideways(&mut self, direction: Direction, view: &WorldView<'_>) {
        let config = view.config();
        if self.velocity.x.abs() <= config.ramp_limit() {
            self.velocity.x += SIDEWAYS_ACCELERATION * direction.sign();
        } else {
            self.velocity.x = self.velocity.x.signum() * config.snap_speed();
        }
    }

    /// Advance the body by one frame
    pub fn update(&mut self, view: &WorldView<'_>) {
        if !self.movable {
            return;
        }

        if self.has_gravity && self.find_blocking_collision(view).is_none() {
            self.velocity += view.gravity();
        }

        self.position += self.velocity;

        if self.solid {
            self.resolve_collisions(view);
        }
    }

    fn resolve_collisions(&mut self, view: &WorldView<'_>) {
        let push_out = view.resolution().push_out;
        let mut rounds = 0;

        while let Some(id) = self.find_blocking_collision(view) {
            rounds += 1;
            if rounds > MAX_RESOLUTION_ITERATIONS {
                warn!(
                    body = %self.name,
                    "collision resolution did not settle, giving up this step"
                );
                return;
            }

            let Some(other) = view.get(id) else {
                return;
            };

            let side = self.collision_side(other);
            let tangential = side.axis().orthogonal();
            let factor = view.config().friction_factor(other.friction_coeff);
            self.velocity.set(tangential, self.velocity.get(tangential) * factor);

            let landing = side == Side::Down && self.velocity.y > view.gravity().y;

            if !self.push_out_of(other, side, push_out) {
                warn!(
                    body = %self.name,
                    obstacle = %other.name,
                    "push-out did not separate bodies, giving up this step"
                );
                return;
            }
            if landing {
                debug!(body = %self.name, on = %other.name, y = self.position.y, "landed");
            }
        }
    }

    /// Push along `side` until this body no longer overlaps `other`
    ///
    /// Returns false if the iteration bound was hit first.
    fn push_out_of(&mut self, other: &Body, side: Side, mode: PushOut) -> bool {
        let axis = side.axis();
        let sign = side.sign();
        let mut settled = false;

        for _ in 0..MAX_RESOLUTION_ITERATIONS {
            if !self.check_collision(other) {
                return true;
            }

            let depth = self.penetration(other, side);
            let flush = mode == PushOut::Flush && !settled && depth <= 1.0;

            self.velocity.set(axis, if flush { sign * depth } else { sign });
            self.position += self.velocity;
            self.velocity.set(axis, 0.0);

            if flush {
                self.position.set(axis, self.flush_coordinate(other, side));
                self.clear_rounding(other, axis, sign);
                settled = true;
            }
        }

        !self.check_collision(other)
    }

    /// Distance to travel along `side` before the rectangles separate
    fn penetration(&self, other: &Body, side: Side) -> f64 {
        let me = self.rect();
        let them = other.rect();
        match side {
            Side::Up => them.bottom() - me.origin.y,
            Side::Down => me.bottom() - them.origin.y,
            Side::Right => them.right() - me.origin.x,
            Side::Left => me.right() - them.origin.x,
        }
    }

    /// Nudge the position along `axis`, away from `other`, until the
    /// rectangles no longer overlap
    ///
    /// `face - extent + extent` can round one ulp past `face`, which would
    /// leave a flush-snapped body still overlapping its obstacle. The nudge
    /// starts at one ulp of the larger of the near and far edge coordinates
    /// and doubles each round.
    fn clear_rounding(&mut self, other: &Body, axis: Axis, sign: f64) {
        let extent = match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        };
        let near = self.position.get(axis);
        let magnitude = near.abs().max((near + extent).abs());
        let mut nudge = (magnitude * f64::EPSILON).max(f64::MIN_POSITIVE);

        for _ in 0..MAX_ROUNDING_NUDGES {
            if !self.check_collision(other) {
                return;
            }
            self.position.set(axis, self.position.get(axis) + sign * nudge);
            nudge *= 2.0;
        }
    }

    /// Coordinate that places this body flush against the face of `other`
    fn flush_coordinate(&self, other: &Body, side: Side) -> f64 {
        let them = other.rect();
        match side {
            Side::Up => them.bottom(),
            Side::Down => them.origin.y - self.height,
            Side::Right => them.right(),
            Side::Left => them.origin.x - self.width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyDescriptor;
    use crate::world::{ResolutionConfig, WorldConfig};

    fn config() -> WorldConfig {
        WorldConfig::new(50, 20)
            .with_fps(20.0)
            .with_gravity(Vec2::new(0.0, 0.03))
    }

    fn ground() -> Body {
        BodyDescriptor::new("Ground")
            .with_size(50.0, 2.0)
            .with_position(0.0, 18.0)
            .build()
            .unwrap()
    }

    fn player(x: f64, y: f64) -> Body {
        BodyDescriptor::new("Player")
            .with_size(3.0, 2.0)
            .with_position(x, y)
            .movable()
            .with_gravity()
            .user_controlled()
            .build()
            .unwrap()
    }

    #[test]
    fn test_immovable_body_does_not_update() {
        let config = config();
        let mut wall = ground();
        wall.velocity = Vec2::new(1.0, 1.0);
        let view = WorldView::new(&config, &[], &[]);
        wall.update(&view);
        assert_eq!(wall.position, Vec2::new(0.0, 18.0));
    }

    #[test]
    fn test_free_fall_accumulates_gravity() {
        let config = config();
        let mut body = player(10.0, 1.0);
        let view = WorldView::new(&config, &[], &[]);
        for _ in 0..5 {
            body.update(&view);
        }
        assert!((body.velocity.y - 5.0 * 0.03).abs() < 1e-12);
        // 0.03 * (1 + 2 + 3 + 4 + 5)
        assert!((body.position.y - (1.0 + 0.45)).abs() < 1e-12);
    }

    #[test]
    fn test_landing_settles_flush() {
        let config = config();
        let floor = vec![ground()];
        let view = WorldView::new(&config, &floor, &[]);
        let mut body = player(10.0, 15.9);
        body.velocity.y = 0.5;
        body.update(&view);
        assert_eq!(body.position.y, 16.0);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_fractional_floor_rests_flush() {
        let config = config();
        let floor_y = 10.411;
        let height = 1.713;
        let floor = vec![BodyDescriptor::new("Ledge")
            .with_size(50.0, 2.0)
            .with_position(0.0, floor_y)
            .build()
            .unwrap()];
        let view = WorldView::new(&config, &floor, &[]);
        let mut body = BodyDescriptor::new("Crate")
            .with_size(3.0, height)
            .with_position(10.0, 0.0)
            .movable()
            .with_gravity()
            .build()
            .unwrap();

        for _ in 0..300 {
            body.update(&view);
        }
        let rest = body.position.y;
        assert!((rest - (floor_y - height)).abs() < 1e-9);
        assert!(!body.check_collision(&floor[0]));

        for _ in 0..40 {
            body.update(&view);
            assert_eq!(body.position.y, rest);
            assert!(!body.check_collision(&floor[0]));
        }
    }

    #[test]
    fn test_clear_rounding_with_tiny_coordinate() {
        let floor = ground().descriptor().with_position(0.0, 10.0).build().unwrap();
        let mut body = BodyDescriptor::new("Pillar")
            .with_size(1.0, 10.0)
            .with_position(5.0, 1e-12)
            .build()
            .unwrap();
        assert!(body.check_collision(&floor));

        body.clear_rounding(&floor, Axis::Y, -1.0);
        assert!(!body.check_collision(&floor));
        assert!(body.position.y.abs() < 1e-11);
        assert_eq!(body.position.x, 5.0);
    }

    #[test]
    fn test_whole_cell_push_out() {
        let config = config().with_resolution(ResolutionConfig {
            push_out: PushOut::WholeCell,
            ..ResolutionConfig::default()
        });
        let floor = vec![ground()];
        let view = WorldView::new(&config, &floor, &[]);
        let mut body = player(10.0, 15.75);
        body.velocity.y = 0.5;
        body.update(&view);
        // 15.75 + 0.03 + 0.5 = 16.28, one cell up
        assert!((body.position.y - 15.28).abs() < 1e-9);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_friction_damps_tangential_velocity() {
        let config = config();
        let floor = vec![ground().descriptor().with_friction(7.0).build().unwrap()];
        let view = WorldView::new(&config, &floor, &[]);
        let mut body = player(10.0, 16.0);
        body.velocity.x = 2.0;
        body.update(&view);
        // gravity pulls it into the floor, contact damps vx by 1 - 7/20
        assert!((body.velocity.x - 1.3).abs() < 1e-9);
        assert_eq!(body.position.y, 16.0);
    }

    #[test]
    fn test_wall_push_out_is_horizontal() {
        let config = config();
        let wall = BodyDescriptor::new("Wall")
            .with_size(5.0, 20.0)
            .with_position(50.0, 0.0)
            .build()
            .unwrap();
        let obstacles = vec![wall];
        let view = WorldView::new(&config, &obstacles, &[]);
        let mut body = BodyDescriptor::new("Slider")
            .with_size(3.0, 2.0)
            .with_position(46.5, 10.0)
            .with_velocity(1.0, 0.0)
            .movable()
            .build()
            .unwrap();
        body.update(&view);
        assert_eq!(body.position.x, 47.0);
        assert_eq!(body.velocity.x, 0.0);
        assert_eq!(body.position.y, 10.0);
    }

    #[test]
    fn test_jump_requires_support() {
        let config = config();
        let view = WorldView::new(&config, &[], &[]);
        let mut airborne = player(10.0, 5.0);
        airborne.jump(&view);
        assert_eq!(airborne.velocity.y, 0.0);

        let floor = vec![ground()];
        let view = WorldView::new(&config, &floor, &[]);
        let mut resting = player(10.0, 16.0);
        resting.jump(&view);
        assert!((resting.velocity.y - (-1.2 * 20.0 * 0.03)).abs() < 1e-12);
        assert_eq!(resting.position.y, 16.0);
    }

    #[test]
    fn test_immovable_body_cannot_jump() {
        let config = config();
        let floor = vec![ground()];
        let view = WorldView::new(&config, &floor, &[]);
        let mut statue = BodyDescriptor::new("Statue")
            .with_size(3.0, 2.0)
            .with_position(10.0, 16.0)
            .build()
            .unwrap();
        statue.jump(&view);
        assert_eq!(statue.velocity.y, 0.0);
    }

    #[test]
    fn test_move_sideways_ramp_and_snap() {
        let config = config();
        let view = WorldView::new(&config, &[], &[]);
        let mut body = player(10.0, 1.0);
        let mut expected = 0.0;
        while expected <= config.ramp_limit() {
            body.move_sideways(Direction::Right, &view);
            expected += 1.1;
            assert!((body.velocity.x - expected).abs() < 1e-9);
        }
        body.move_sideways(Direction::Right, &view);
        assert_eq!(body.velocity.x, config.snap_speed());
    }

    #[test]
    fn test_move_sideways_snap_keeps_sign() {
        let config = config();
        let view = WorldView::new(&config, &[], &[]);
        let mut body = player(10.0, 1.0);
        body.velocity.x = -5.0;
        body.move_sideways(Direction::Right, &view);
        assert_eq!(body.velocity.x, -2.0);
    }
}
