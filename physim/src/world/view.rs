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
//! Read-only step context handed to a body
//!
//! A body never stores a reference to its world. Whenever it needs gravity,
//! the frame rate or its siblings it receives a `WorldView` covering every
//! other body in the arena, split around its own slot.

use crate::body::{Body, BodyId};
use crate::geometry::Vec2;
use crate::world::config::{ResolutionConfig, WorldConfig};

/// Everything a body may observe while it updates
#[derive(Debug, Clone, Copy)]
pub struct WorldView<'a> {
    config: &'a WorldConfig,
    before: &'a [Body],
    after: &'a [Body],
}

impl<'a> WorldView<'a> {
    /// Create a view for the body stored at index `before.len()`
    ///
    /// `before` holds the bodies stored ahead of it and `after` the bodies
    /// stored behind it.
    pub fn new(config: &'a WorldConfig, before: &'a [Body], after: &'a [Body]) -> Self {
        WorldView { config, before, after }
    }

    /// Id of the body this view was built for
    pub fn own_id(&self) -> BodyId {
        BodyId::new(self.before.len())
    }

    /// Sibling bodies with their ids, in storage order
    pub fn siblings(&self) -> impl Iterator<Item = (BodyId, &'a Body)> + 'a {
        let offset = self.before.len() + 1;
        self.before
            .iter()
            .enumerate()
            .map(|(i, body)| (BodyId::new(i), body))
            .chain(
                self.after
                    .iter()
                    .enumerate()
                    .map(move |(i, body)| (BodyId::new(offset + i), body)),
            )
    }

    /// Look up a sibling by id
    ///
    /// Returns `None` for the viewing body itself and for unknown ids.
    pub fn get(&self, id: BodyId) -> Option<&'a Body> {
        let index = id.index();
        let own = self.before.len();
        if index < own {
            self.before.get(index)
        } else if index == own {
            None
        } else {
            self.after.get(index - own - 1)
        }
    }

    /// Number of siblings visible through this view
    pub fn sibling_count(&self) -> usize {
        self.before.len() + self.after.len()
    }

    /// World configuration
    pub fn config(&self) -> &'a WorldConfig {
        self.config
    }

    /// Gravity vector
    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    /// Frame rate
    pub fn fps(&self) -> f64 {
        self.config.fps
    }

    /// Collision-resolution policies
    pub fn resolution(&self) -> ResolutionConfig {
        self.config.resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyDescriptor;

    fn named(name: &str) -> Body {
        BodyDescriptor::new(name).build().unwrap()
    }

    #[test]
    fn test_siblings_skip_own_slot() {
        let config = WorldConfig::default();
        let before = vec![named("a"), named("b")];
        let after = vec![named("d")];
        let view = WorldView::new(&config, &before, &after);

        assert_eq!(view.own_id(), BodyId::new(2));
        let seen: Vec<(usize, &str)> = view
            .siblings()
            .map(|(id, body)| (id.index(), body.name()))
            .collect();
        assert_eq!(seen, vec![(0, "a"), (1, "b"), (3, "d")]);
        assert_eq!(view.sibling_count(), 3);
    }

    #[test]
    fn test_get_by_id() {
        let config = WorldConfig::default();
        let before = vec![named("a")];
        let after = vec![named("c"), named("d")];
        let view = WorldView::new(&config, &before, &after);

        assert_eq!(view.get(BodyId::new(0)).map(Body::name), Some("a"));
        assert!(view.get(BodyId::new(1)).is_none());
        assert_eq!(view.get(BodyId::new(3)).map(Body::name), Some("d"));
        assert!(view.get(BodyId::new(4)).is_none());
    }
}
