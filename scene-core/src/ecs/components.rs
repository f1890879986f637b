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
//! Component data types
//!
//! Plain data carried by entities. Components are constructed once when an
//! entity is assembled; systems then mutate the few mutable ones (position,
//! transform, AI state) in place every frame.

use crate::resources::{AudioSettings, AudioVoice, GeometryData, GeometryHandle, TextureHandle};
use glam::{Mat4, Vec3};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Shared handle to a live 3D position
///
/// Cloning the handle aliases the same value, so a collision system and the
/// host camera can observe and correct one position without owning it.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use scene_core::ecs::components::SharedPosition;
///
/// let camera = SharedPosition::new(Vec3::ZERO);
/// let tracked = camera.clone();
/// tracked.set(Vec3::X);
/// assert_eq!(camera.get(), Vec3::X);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedPosition(Rc<Cell<Vec3>>);

impl SharedPosition {
    /// Create a new handle holding `value`
    pub fn new(value: Vec3) -> Self {
        SharedPosition(Rc::new(Cell::new(value)))
    }

    /// Current value
    pub fn get(&self) -> Vec3 {
        self.0.get()
    }

    /// Overwrite the value
    pub fn set(&self, value: Vec3) {
        self.0.set(value);
    }

    /// True when both handles alias the same value
    pub fn ptr_eq(&self, other: &SharedPosition) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// World position of an entity
///
/// Systems write it every frame. The value lives behind a [`SharedPosition`]
/// so it can be handed out to systems that track one specific actor.
#[derive(Debug, Default)]
pub struct Position {
    value: SharedPosition,
}

impl Position {
    /// Create a position owning a fresh handle
    pub fn new(value: Vec3) -> Self {
        Position {
            value: SharedPosition::new(value),
        }
    }

    /// Wrap an existing handle, e.g. one also held by the host
    pub fn from_shared(value: SharedPosition) -> Self {
        Position { value }
    }

    /// Current coordinates
    pub fn get(&self) -> Vec3 {
        self.value.get()
    }

    /// Overwrite the coordinates
    pub fn set(&self, value: Vec3) {
        self.value.set(value);
    }

    /// Move by `delta`
    pub fn translate(&self, delta: Vec3) {
        self.value.set(self.value.get() + delta);
    }

    /// Handle aliasing this position
    pub fn handle(&self) -> SharedPosition {
        self.value.clone()
    }
}

/// Linear velocity in units per second
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    value: Vec3,
}

impl Velocity {
    /// Create a velocity from its components
    pub fn new(dx: f32, dy: f32, dz: f32) -> Self {
        Velocity {
            value: Vec3::new(dx, dy, dz),
        }
    }

    /// Create a velocity from a vector
    pub fn from_vec(value: Vec3) -> Self {
        Velocity { value }
    }

    /// The velocity vector
    pub fn value(&self) -> Vec3 {
        self.value
    }
}

/// Affine scale and rotation of an entity
///
/// Rotation increments applied with [`Transform::rotate`] accumulate; the
/// matrix is never reset to an absolute angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    /// Scale first, then rotate about X, Y and Z (radians) in that order
    pub fn new(scale: Vec3, rotation: Vec3) -> Self {
        Transform {
            matrix: euler_rotation(rotation) * Mat4::from_scale(scale),
        }
    }

    /// Wrap an existing matrix
    pub fn from_matrix(matrix: Mat4) -> Self {
        Transform { matrix }
    }

    /// The current matrix
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Per-axis scale baked into the matrix
    pub fn scale(&self) -> Vec3 {
        self.matrix.to_scale_rotation_translation().0
    }

    /// Apply a further rotation on top of the current one
    pub fn rotate(&mut self, rotation: Vec3) {
        self.matrix = euler_rotation(rotation) * self.matrix;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::from_matrix(Mat4::IDENTITY)
    }
}

/// X, then Y, then Z rotation as one matrix
fn euler_rotation(angles: Vec3) -> Mat4 {
    Mat4::from_rotation_z(angles.z) * Mat4::from_rotation_y(angles.y) * Mat4::from_rotation_x(angles.x)
}

/// Collision behaviour of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collider {
    /// `true` blocks the actor, `false` only reports a trigger
    pub is_collidable: bool,
}

impl Collider {
    /// A blocking collider
    pub fn rigid() -> Self {
        Collider { is_collidable: true }
    }

    /// An event-only collider
    pub fn trigger() -> Self {
        Collider {
            is_collidable: false,
        }
    }
}

/// Pathfinding state of an autonomous agent
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AiAgent {
    target: Vec3,
    original_target: Vec3,
    path: Vec<Vec3>,
}

impl AiAgent {
    /// Agent heading for `target` with no path computed yet
    pub fn new(target: Vec3) -> Self {
        AiAgent {
            target,
            original_target: target,
            path: Vec::new(),
        }
    }

    /// Where the agent wants to go
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Retarget the agent; the current path is dropped on the next frame
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Target the current path was computed for
    pub fn original_target(&self) -> Vec3 {
        self.original_target
    }

    /// Remaining waypoints, nearest first
    pub fn path(&self) -> &[Vec3] {
        &self.path
    }

    pub(crate) fn set_original_target(&mut self, target: Vec3) {
        self.original_target = target;
    }

    pub(crate) fn set_path(&mut self, path: Vec<Vec3>) {
        self.path = path;
    }

    pub(crate) fn pop_waypoint(&mut self) -> Option<Vec3> {
        if self.path.is_empty() {
            None
        } else {
            Some(self.path.remove(0))
        }
    }
}

/// Continuous rotation applied by the animator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    /// Rotation axis weights
    pub axis: Vec3,
    /// Radians per frame along each weighted axis
    pub speed: f32,
}

impl Animation {
    /// Create animation parameters
    pub fn new(axis: Vec3, speed: f32) -> Self {
        Animation { axis, speed }
    }

    /// Rotation increment for one frame
    pub fn increment(&self) -> Vec3 {
        self.axis * self.speed
    }
}

/// Mesh handle plus its baked vertex buffer
#[derive(Debug, Clone)]
pub struct Geometry {
    handle: GeometryHandle,
    data: Rc<GeometryData>,
}

impl Geometry {
    /// Wrap a loaded mesh
    pub fn new(handle: GeometryHandle, data: Rc<GeometryData>) -> Self {
        Geometry { handle, data }
    }

    /// Renderer handle
    pub fn handle(&self) -> GeometryHandle {
        self.handle
    }

    /// Baked interleaved vertex data
    pub fn data(&self) -> &GeometryData {
        &self.data
    }
}

/// Texture handle and texture coordinate scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Texture {
    /// Renderer handle
    pub handle: TextureHandle,
    /// Texture coordinate multiplier
    pub scale: f32,
}

impl Texture {
    /// Texture with unit scale
    pub fn new(handle: TextureHandle) -> Self {
        Texture { handle, scale: 1.0 }
    }

    /// Texture with an explicit coordinate scale
    pub fn with_scale(handle: TextureHandle, scale: f32) -> Self {
        Texture { handle, scale }
    }
}

/// Cube-map handle used for the sky
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Skybox {
    /// Renderer handle
    pub handle: TextureHandle,
}

/// Light point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightEmitter {
    /// Position of the light
    pub point: Vec3,
}

/// Positional audio voice
///
/// The voice belongs to the audio backend and must be released exactly once,
/// either when the entity is removed or when the scene is torn down.
pub struct Audio {
    voice: Box<dyn AudioVoice>,
    settings: AudioSettings,
    released: bool,
}

impl Audio {
    /// Wrap an opened voice
    pub fn new(voice: Box<dyn AudioVoice>, settings: AudioSettings) -> Self {
        Audio {
            voice,
            settings,
            released: false,
        }
    }

    /// Playback settings
    pub fn settings(&self) -> AudioSettings {
        self.settings
    }

    /// Start playback if the settings ask for it
    pub fn start(&mut self) {
        if self.settings.autoplay && !self.released {
            self.voice.play(&self.settings);
        }
    }

    /// Move the emitter
    pub fn set_emitter_position(&mut self, position: Vec3) {
        if !self.released {
            self.voice.set_emitter_position(position);
        }
    }

    /// Stop and free the voice
    ///
    /// Returns `false` when it had already been released.
    pub fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.voice.close();
        self.released = true;
        true
    }

    /// Whether [`Audio::release`] has run
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl fmt::Debug for Audio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Audio")
            .field("settings", &self.settings)
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}
