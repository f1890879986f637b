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
//! Component kinds and the type mask
//!
//! Every component kind owns exactly one bit of a [`ComponentMask`]. An
//! entity's mask is the OR of the bits of the components it carries, which
//! gives systems an O(1) "does this entity have X" check without downcasting.

use crate::ecs::components::{
    AiAgent, Animation, Audio, Collider, Geometry, LightEmitter, Position, Skybox, Texture,
    Transform, Velocity,
};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Fixed enumeration of component kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// World position.
    Position,
    /// Geometry handle with its baked vertex buffer.
    Geometry,
    /// Texture handle.
    Texture,
    /// Linear velocity.
    Velocity,
    /// Audio voice.
    Audio,
    /// Scale/rotation matrix.
    Transform,
    /// Cube-map handle.
    Skybox,
    /// Rigid or trigger collider flag.
    Collider,
    /// Pathfinding agent state.
    Ai,
    /// Continuous rotation parameters.
    Animation,
    /// Light point.
    LightEmitter,
}

impl ComponentType {
    /// Every kind, in bit order
    pub const ALL: [ComponentType; 11] = [
        ComponentType::Position,
        ComponentType::Geometry,
        ComponentType::Texture,
        ComponentType::Velocity,
        ComponentType::Audio,
        ComponentType::Transform,
        ComponentType::Skybox,
        ComponentType::Collider,
        ComponentType::Ai,
        ComponentType::Animation,
        ComponentType::LightEmitter,
    ];

    /// Bit index of this kind inside a mask
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-bit mask for this kind
    pub const fn mask(self) -> ComponentMask {
        ComponentMask(1 << self.index())
    }

    /// Lowercase name used in logs and error messages
    pub const fn as_str(self) -> &'static str {
        match self {
            ComponentType::Position => "position",
            ComponentType::Geometry => "geometry",
            ComponentType::Texture => "texture",
            ComponentType::Velocity => "velocity",
            ComponentType::Audio => "audio",
            ComponentType::Transform => "transform",
            ComponentType::Skybox => "skybox",
            ComponentType::Collider => "collider",
            ComponentType::Ai => "ai",
            ComponentType::Animation => "animation",
            ComponentType::LightEmitter => "light",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bit-set over [`ComponentType`]
///
/// # Examples
///
/// ```
/// use scene_core::ecs::{ComponentMask, ComponentType};
///
/// let mask = ComponentMask::of(&[ComponentType::Position, ComponentType::Velocity]);
/// assert!(mask.contains(ComponentType::Position.mask()));
/// assert!(!mask.contains(ComponentType::Ai.mask()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ComponentMask(u32);

impl ComponentMask {
    /// Mask with no bits set
    pub const NONE: ComponentMask = ComponentMask(0);

    /// Build a mask from a list of kinds
    pub const fn of(kinds: &[ComponentType]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < kinds.len() {
            bits |= 1 << kinds[i].index();
            i += 1;
        }
        ComponentMask(bits)
    }

    /// Raw bit value
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True when every bit of `required` is also set here
    pub const fn contains(self, required: ComponentMask) -> bool {
        self.0 & required.0 == required.0
    }

    /// True when the kind's bit is set
    pub const fn has(self, kind: ComponentType) -> bool {
        self.contains(kind.mask())
    }

    /// True when no bit is set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ComponentMask {
    type Output = ComponentMask;

    fn bitor(self, rhs: ComponentMask) -> ComponentMask {
        ComponentMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for ComponentMask {
    fn bitor_assign(&mut self, rhs: ComponentMask) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ComponentMask {
    type Output = ComponentMask;

    fn bitand(self, rhs: ComponentMask) -> ComponentMask {
        ComponentMask(self.0 & rhs.0)
    }
}

impl From<ComponentType> for ComponentMask {
    fn from(kind: ComponentType) -> Self {
        kind.mask()
    }
}

/// A component of any kind
///
/// Entities store components as this tagged union; [`Component::kind`] maps
/// each variant to its mask bit.
#[derive(Debug)]
pub enum Component {
    /// See [`Position`].
    Position(Position),
    /// See [`Geometry`].
    Geometry(Geometry),
    /// See [`Texture`].
    Texture(Texture),
    /// See [`Velocity`].
    Velocity(Velocity),
    /// See [`Audio`].
    Audio(Audio),
    /// See [`Transform`].
    Transform(Transform),
    /// See [`Skybox`].
    Skybox(Skybox),
    /// See [`Collider`].
    Collider(Collider),
    /// See [`AiAgent`].
    Ai(AiAgent),
    /// See [`Animation`].
    Animation(Animation),
    /// See [`LightEmitter`].
    LightEmitter(LightEmitter),
}

impl Component {
    /// Kind tag of this component
    pub fn kind(&self) -> ComponentType {
        match self {
            Component::Position(_) => ComponentType::Position,
            Component::Geometry(_) => ComponentType::Geometry,
            Component::Texture(_) => ComponentType::Texture,
            Component::Velocity(_) => ComponentType::Velocity,
            Component::Audio(_) => ComponentType::Audio,
            Component::Transform(_) => ComponentType::Transform,
            Component::Skybox(_) => ComponentType::Skybox,
            Component::Collider(_) => ComponentType::Collider,
            Component::Ai(_) => ComponentType::Ai,
            Component::Animation(_) => ComponentType::Animation,
            Component::LightEmitter(_) => ComponentType::LightEmitter,
        }
    }
}

macro_rules! impl_from_component {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Component {
                fn from(value: $ty) -> Self {
                    Component::$variant(value)
                }
            }
        )*
    };
}

impl_from_component! {
    Position => Position,
    Geometry => Geometry,
    Texture => Texture,
    Velocity => Velocity,
    Audio => Audio,
    Transform => Transform,
    Skybox => Skybox,
    Collider => Collider,
    AiAgent => Ai,
    Animation => Animation,
    LightEmitter => LightEmitter,
}
