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
//! Actor collision against box-shaped entities
//!
//! One system serves both actor setups: a first-person camera moving on the
//! XZ plane (Y up) and a side-on actor moving on the XY plane (Z up). Each
//! frame the actor's movement since the last good position is tested against
//! every side face of every collidable entity.
//!
//! A face is hit when the actor crossed the face plane (pushed out by the
//! clip margin) and the last good position lies within the face's lateral
//! extent. Rigid hits snap the actor back; trigger hits are recorded for the
//! host to poll.

use crate::ecs::components::SharedPosition;
use crate::ecs::{ComponentMask, ComponentType, Entity, EntityManager, System};
use crate::resources::GeometryData;
use glam::Vec3;
use log::{debug, trace};
use std::any::Any;

/// World axis that points up for the actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpAxis {
    /// Actor moves on the XZ plane
    Y,
    /// Actor moves on the XY plane
    Z,
}

impl UpAxis {
    fn index(self) -> usize {
        match self {
            UpAxis::Y => 1,
            UpAxis::Z => 2,
        }
    }

    /// In-plane axis tested first
    fn primary(self) -> usize {
        match self {
            UpAxis::Y => 2,
            UpAxis::Z => 1,
        }
    }
}

/// In-plane axis shared by both setups
const X: usize = 0;

/// Collision settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionConfig {
    /// Plane the actor moves on
    pub up_axis: UpAxis,
    /// Extra distance kept between the actor and every face
    pub clip_margin: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        CollisionConfig::xz_camera()
    }
}

impl CollisionConfig {
    /// First-person camera on the XZ plane, kept 0.6 units from walls so the
    /// near plane does not clip through them
    pub fn xz_camera() -> Self {
        CollisionConfig {
            up_axis: UpAxis::Y,
            clip_margin: 0.6,
        }
    }

    /// Side-on actor on the XY plane with no margin
    pub fn xy_actor() -> Self {
        CollisionConfig {
            up_axis: UpAxis::Z,
            clip_margin: 0.0,
        }
    }

    /// Set the clip margin
    pub fn with_clip_margin(mut self, margin: f32) -> Self {
        assert!(margin.is_finite() && margin >= 0.0, "Clip margin must be finite and non-negative");
        self.clip_margin = margin;
        self
    }
}

/// Keeps one actor out of rigid entities and reports triggers
#[derive(Debug)]
pub struct CollisionSystem {
    config: CollisionConfig,
    actor: SharedPosition,
    last_position: Vec3,
    tracked: Vec<String>,
    last_to_check: Option<String>,
    last_trigger: Option<String>,
}

impl CollisionSystem {
    /// Components an entity needs to be collidable
    pub const MASK: ComponentMask = ComponentMask::of(&[
        ComponentType::Geometry,
        ComponentType::Transform,
        ComponentType::Collider,
        ComponentType::Position,
    ]);

    /// Track `actor` against the collidable entities currently in `entities`
    ///
    /// The actor's current position becomes the first last-good position.
    pub fn new(config: CollisionConfig, actor: SharedPosition, entities: &EntityManager) -> Self {
        let tracked: Vec<String> = entities
            .find_all_with_mask(Self::MASK)
            .into_iter()
            .map(|e| e.name().to_string())
            .collect();
        debug!(
            "collision tracking {} entities on the {:?}-up plane",
            tracked.len(),
            config.up_axis
        );
        CollisionSystem {
            config,
            last_position: actor.get(),
            actor,
            last_to_check: tracked.last().cloned(),
            tracked,
            last_trigger: None,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Handle to the actor's live position
    pub fn actor(&self) -> &SharedPosition {
        &self.actor
    }

    /// Names of the tracked collidable entities, in manager order
    pub fn tracked_names(&self) -> &[String] {
        &self.tracked
    }

    /// Entity after which the last good position is refreshed
    pub fn last_to_check(&self) -> Option<&str> {
        self.last_to_check.as_deref()
    }

    /// Position the actor is snapped back to on a rigid hit
    pub fn last_position(&self) -> Vec3 {
        self.last_position
    }

    /// Most recent trigger the actor touched
    pub fn last_trigger(&self) -> Option<&str> {
        self.last_trigger.as_deref()
    }

    /// Forget the most recent trigger
    pub fn clear_last_trigger(&mut self) {
        self.last_trigger = None;
    }

    /// Forget the most recent trigger and stop tracking it
    ///
    /// Used once a pickup has been consumed and removed from the scene.
    pub fn clear_last_trigger_and_prune(&mut self) {
        if let Some(trigger) = self.last_trigger.take() {
            self.tracked.retain(|name| *name != trigger);
            self.refresh_marker();
        }
    }

    /// Stop tracking the named entities
    pub fn remove_destructibles(&mut self, names: &[&str]) {
        let before = self.tracked.len();
        self.tracked.retain(|name| !names.contains(&name.as_str()));
        self.refresh_marker();
        debug!("collision stopped tracking {} entities", before - self.tracked.len());
    }

    /// Move the actor, e.g. when the host teleports it
    pub fn set_actor_position(&mut self, position: Vec3) {
        self.actor.set(position);
    }

    /// Override the last good position
    pub fn set_last_position(&mut self, position: Vec3) {
        self.last_position = position;
    }

    fn refresh_marker(&mut self) {
        self.last_to_check = self.tracked.last().cloned();
    }

    /// Face normals of the mesh except the two facing up and down
    fn side_normals(&self, geometry: &GeometryData) -> Vec<Vec3> {
        let up = self.config.up_axis.index();
        geometry
            .face_normals()
            .into_iter()
            .filter(|n| n[up] != 1.0 && n[up] != -1.0)
            .collect()
    }

    /// Plane sign change along `axis`, then lateral overlap along `lateral`
    fn crosses_face(&self, centre: Vec3, scale: Vec3, normal: Vec3, axis: usize, lateral: usize) -> bool {
        let margin = self.config.clip_margin;

        let mut plane = centre;
        plane[axis] += (margin + scale[axis]) * normal[axis];
        let before = (self.last_position - plane).dot(normal);
        let after = (self.actor.get() - plane).dot(normal);
        if before * after >= 0.0 {
            return false;
        }

        let reach = margin + scale[lateral];
        let last = self.last_position[lateral];
        (centre[lateral] + reach - last) * (centre[lateral] - reach - last) < 0.0
    }

    fn on_hit(&mut self, name: &str, rigid: bool) {
        if rigid {
            trace!("actor blocked by {}", name);
            self.actor.set(self.last_position);
        } else {
            trace!("actor triggered {}", name);
            self.last_trigger = Some(name.to_string());
        }
    }
}

impl System for CollisionSystem {
    fn on_action(&mut self, entity: &mut Entity) {
        if !entity.matches(Self::MASK) {
            return;
        }
        let (Some(geometry), Some(transform), Some(collider), Some(position)) = (
            entity.geometry(),
            entity.transform(),
            entity.collider(),
            entity.position(),
        ) else {
            return;
        };

        let normals = self.side_normals(geometry.data());
        let centre = position.get();
        let scale = transform.scale();
        let rigid = collider.is_collidable;
        let primary = self.config.up_axis.primary();

        for normal in &normals {
            if normal[X] == 1.0 || normal[X] == -1.0 {
                continue;
            }
            if self.crosses_face(centre, scale, *normal, primary, X) {
                self.on_hit(entity.name(), rigid);
            }
        }
        for normal in &normals {
            if normal[primary] == 1.0 || normal[primary] == -1.0 {
                continue;
            }
            if self.crosses_face(centre, scale, *normal, X, primary) {
                self.on_hit(entity.name(), rigid);
            }
        }

        if self.last_to_check.as_deref() == Some(entity.name()) {
            self.last_position = self.actor.get();
        }
    }

    fn required_mask(&self) -> ComponentMask {
        Self::MASK
    }

    fn name(&self) -> &str {
        "collision"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
