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
//! Entity management
//!
//! An entity is a named bag of components. Its mask is kept equal to the OR
//! of the type bits of the components it carries; components can be added
//! but never detached.

use crate::ecs::components::{
    AiAgent, Animation, Audio, Collider, Geometry, LightEmitter, Position, Skybox, Texture,
    Transform, Velocity,
};
use crate::ecs::{Component, ComponentMask, ComponentType};
use crate::error::EcsError;
use std::fmt;

const SLOT_COUNT: usize = ComponentType::ALL.len();

/// A named game object
pub struct Entity {
    name: String,
    mask: ComponentMask,
    slots: [Option<Component>; SLOT_COUNT],
    order: Vec<ComponentType>,
}

/// Simultaneous mutable access to every component of one entity
///
/// Systems destructure this to borrow several components at once. Fields are
/// `None` for kinds the entity does not carry.
#[derive(Default)]
pub struct ComponentsMut<'a> {
    /// Position, if attached.
    pub position: Option<&'a mut Position>,
    /// Geometry, if attached.
    pub geometry: Option<&'a mut Geometry>,
    /// Texture, if attached.
    pub texture: Option<&'a mut Texture>,
    /// Velocity, if attached.
    pub velocity: Option<&'a mut Velocity>,
    /// Audio, if attached.
    pub audio: Option<&'a mut Audio>,
    /// Transform, if attached.
    pub transform: Option<&'a mut Transform>,
    /// Skybox, if attached.
    pub skybox: Option<&'a mut Skybox>,
    /// Collider, if attached.
    pub collider: Option<&'a mut Collider>,
    /// AI state, if attached.
    pub ai: Option<&'a mut AiAgent>,
    /// Animation, if attached.
    pub animation: Option<&'a mut Animation>,
    /// Light, if attached.
    pub light_emitter: Option<&'a mut LightEmitter>,
}

macro_rules! component_getters {
    ($($get:ident, $get_mut:ident => $variant:ident($ty:ty)),* $(,)?) => {
        $(
            #[doc = concat!("The attached `", stringify!($ty), "`, if any")]
            pub fn $get(&self) -> Option<&$ty> {
                match self.slots[ComponentType::$variant.index()].as_ref() {
                    Some(Component::$variant(component)) => Some(component),
                    _ => None,
                }
            }

            #[doc = concat!("Mutable access to the attached `", stringify!($ty), "`")]
            pub fn $get_mut(&mut self) -> Option<&mut $ty> {
                match self.slots[ComponentType::$variant.index()].as_mut() {
                    Some(Component::$variant(component)) => Some(component),
                    _ => None,
                }
            }
        )*
    };
}

impl Entity {
    /// Create an entity with no components
    pub fn new(name: impl Into<String>) -> Self {
        Entity {
            name: name.into(),
            mask: ComponentMask::NONE,
            slots: std::array::from_fn(|_| None),
            order: Vec::new(),
        }
    }

    /// Attach a component and set its mask bit
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::DuplicateComponent`] if a component of the same
    /// kind is already attached; the entity is left unchanged.
    pub fn add_component(&mut self, component: impl Into<Component>) -> Result<(), EcsError> {
        let component = component.into();
        let kind = component.kind();
        if self.mask.has(kind) {
            return Err(EcsError::DuplicateComponent {
                entity: self.name.clone(),
                kind,
            });
        }

        self.slots[kind.index()] = Some(component);
        self.order.push(kind);
        self.mask |= kind.mask();
        Ok(())
    }

    /// Builder form of [`Entity::add_component`]
    ///
    /// # Errors
    ///
    /// Same as [`Entity::add_component`].
    pub fn with(mut self, component: impl Into<Component>) -> Result<Self, EcsError> {
        self.add_component(component)?;
        Ok(self)
    }

    /// Entity name, unique within an [`EntityManager`](crate::ecs::EntityManager)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// OR of the attached components' type bits
    pub fn mask(&self) -> ComponentMask {
        self.mask
    }

    /// True when the entity carries at least the bits of `required`
    pub fn matches(&self, required: ComponentMask) -> bool {
        self.mask.contains(required)
    }

    /// Attached components in the order they were added
    pub fn components(&self) -> impl Iterator<Item = &Component> + '_ {
        self.order
            .iter()
            .filter_map(move |kind| self.slots[kind.index()].as_ref())
    }

    /// The component of the given kind, if attached
    pub fn component(&self, kind: ComponentType) -> Option<&Component> {
        self.slots[kind.index()].as_ref()
    }

    /// Borrow every attached component mutably at once
    pub fn components_mut(&mut self) -> ComponentsMut<'_> {
        let mut view = ComponentsMut::default();
        for component in self.slots.iter_mut().flatten() {
            match component {
                Component::Position(c) => view.position = Some(c),
                Component::Geometry(c) => view.geometry = Some(c),
                Component::Texture(c) => view.texture = Some(c),
                Component::Velocity(c) => view.velocity = Some(c),
                Component::Audio(c) => view.audio = Some(c),
                Component::Transform(c) => view.transform = Some(c),
                Component::Skybox(c) => view.skybox = Some(c),
                Component::Collider(c) => view.collider = Some(c),
                Component::Ai(c) => view.ai = Some(c),
                Component::Animation(c) => view.animation = Some(c),
                Component::LightEmitter(c) => view.light_emitter = Some(c),
            }
        }
        view
    }

    component_getters! {
        position, position_mut => Position(Position),
        geometry, geometry_mut => Geometry(Geometry),
        texture, texture_mut => Texture(Texture),
        velocity, velocity_mut => Velocity(Velocity),
        audio, audio_mut => Audio(Audio),
        transform, transform_mut => Transform(Transform),
        skybox, skybox_mut => Skybox(Skybox),
        collider, collider_mut => Collider(Collider),
        ai, ai_mut => Ai(AiAgent),
        animation, animation_mut => Animation(Animation),
        light_emitter, light_emitter_mut => LightEmitter(LightEmitter),
    }

    /// Release resources the entity holds outside the process heap
    ///
    /// Only audio voices need this today. Returns the number of resources
    /// released by this call.
    pub fn release_resources(&mut self) -> usize {
        let Some(audio) = self.audio_mut() else {
            return 0;
        };
        usize::from(audio.release())
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("name", &self.name)
            .field("mask", &self.mask)
            .field("components", &self.order)
            .finish()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}, mask: {:#b})", self.name, self.mask.bits())
    }
}
