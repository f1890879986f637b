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
//! Scene assembly
//!
//! Scenes are described as an ordered list of entity declarations, each with
//! component declarations whose values are comma separated and positional:
//!
//! | kind        | value                                    |
//! |-------------|------------------------------------------|
//! | `position`  | `x, y, z`                                |
//! | `velocity`  | `x, y, z`                                |
//! | `transform` | `sx, sy, sz, rx, ry, rz` (radians)       |
//! | `texture`   | `name [, scale]`                         |
//! | `geometry`  | `name`                                   |
//! | `audio`     | `name, volume [, autoplay [, loop]]`     |
//! | `skybox`    | face names in cube-map order             |
//! | `collision` | `true` for rigid, `false` for a trigger  |
//! | `ai`        | `x, y, z` target, or empty for the origin |
//! | `animator`  | `ax, ay, az, speed`                      |
//! | `light`     | `x, y, z`                                |
//!
//! Assembly either yields complete entities or an error; voices opened for a
//! failed batch are closed again before the error is returned.

use crate::ecs::components::{
    AiAgent, Animation, Audio, Collider, Geometry, LightEmitter, Position, Skybox, Texture,
    Transform, Velocity,
};
use crate::ecs::{Component, ComponentType, Entity};
use crate::error::{EcsError, SceneError};
use crate::resources::{AudioSettings, ResourceProvider};
use glam::Vec3;
use log::debug;

/// One component of a declared entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDecl {
    /// Component tag, e.g. `position`
    pub kind: String,
    /// Raw comma separated value
    pub value: String,
}

impl ComponentDecl {
    /// Create a declaration
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        ComponentDecl {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// A named entity and its component declarations, in order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SceneEntityDecl {
    /// Unique entity name
    pub name: String,
    /// Components to attach
    pub components: Vec<ComponentDecl>,
}

impl SceneEntityDecl {
    /// Declare an entity with no components
    pub fn new(name: impl Into<String>) -> Self {
        SceneEntityDecl {
            name: name.into(),
            components: Vec::new(),
        }
    }

    /// Append a component declaration
    pub fn with(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
        self.components.push(ComponentDecl::new(kind, value));
        self
    }
}

/// Map a component tag to its kind
pub fn component_kind(tag: &str) -> Option<ComponentType> {
    let kind = match tag {
        "position" => ComponentType::Position,
        "velocity" => ComponentType::Velocity,
        "transform" => ComponentType::Transform,
        "texture" => ComponentType::Texture,
        "geometry" => ComponentType::Geometry,
        "audio" => ComponentType::Audio,
        "skybox" => ComponentType::Skybox,
        "collision" => ComponentType::Collider,
        "ai" => ComponentType::Ai,
        "animator" => ComponentType::Animation,
        "light" => ComponentType::LightEmitter,
        _ => return None,
    };
    Some(kind)
}

/// Build every declared entity
///
/// # Errors
///
/// Returns the first [`SceneError`] met. Entities built before the failure
/// release their resources first.
pub fn assemble_entities(
    declarations: &[SceneEntityDecl],
    resources: &mut dyn ResourceProvider,
) -> Result<Vec<Entity>, SceneError> {
    let mut entities = Vec::with_capacity(declarations.len());
    for declaration in declarations {
        match assemble_entity(declaration, resources) {
            Ok(entity) => entities.push(entity),
            Err(err) => {
                for entity in &mut entities {
                    entity.release_resources();
                }
                return Err(err);
            }
        }
    }
    debug!("assembled {} entities", entities.len());
    Ok(entities)
}

/// Build one declared entity
///
/// # Errors
///
/// Fails on an unknown tag, a repeated component kind, a malformed value or
/// a resource the provider cannot supply.
pub fn assemble_entity(
    declaration: &SceneEntityDecl,
    resources: &mut dyn ResourceProvider,
) -> Result<Entity, SceneError> {
    let mut entity = Entity::new(declaration.name.as_str());
    for component in &declaration.components {
        if let Err(err) = attach(&mut entity, component, resources) {
            entity.release_resources();
            return Err(err);
        }
    }
    Ok(entity)
}

fn attach(
    entity: &mut Entity,
    declaration: &ComponentDecl,
    resources: &mut dyn ResourceProvider,
) -> Result<(), SceneError> {
    let tag = declaration.kind.trim();
    let field = Field {
        entity: entity.name(),
        kind: tag,
    };
    let kind = component_kind(tag).ok_or_else(|| SceneError::UnknownComponent {
        entity: field.entity.to_string(),
        kind: tag.to_string(),
    })?;

    // Checked up front so no resource is acquired for a rejected component
    if entity.mask().has(kind) {
        return Err(EcsError::DuplicateComponent {
            entity: field.entity.to_string(),
            kind,
        }
        .into());
    }

    let parts = split_values(&declaration.value);
    let component = build(&field, kind, &parts, resources)?;
    entity.add_component(component)?;
    Ok(())
}

fn split_values(value: &str) -> Vec<&str> {
    if value.trim().is_empty() {
        Vec::new()
    } else {
        value.split(',').map(str::trim).collect()
    }
}

/// Entity and tag a value belongs to, for error reporting
struct Field<'a> {
    entity: &'a str,
    kind: &'a str,
}

impl Field<'_> {
    fn arity(&self, expected: &'static str, found: usize) -> SceneError {
        SceneError::Arity {
            entity: self.entity.to_string(),
            kind: self.kind.to_string(),
            expected,
            found,
        }
    }

    fn invalid(&self, value: &str) -> SceneError {
        SceneError::InvalidValue {
            entity: self.entity.to_string(),
            kind: self.kind.to_string(),
            value: value.to_string(),
        }
    }

    fn float(&self, raw: &str) -> Result<f32, SceneError> {
        raw.parse::<f32>().map_err(|_| self.invalid(raw))
    }

    /// Case-insensitive `true` / `false`
    fn flag(&self, raw: &str) -> Result<bool, SceneError> {
        if raw.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(self.invalid(raw))
        }
    }

    fn vec3(&self, parts: &[&str]) -> Result<Vec3, SceneError> {
        match parts {
            [x, y, z] => Ok(Vec3::new(self.float(x)?, self.float(y)?, self.float(z)?)),
            _ => Err(self.arity("3", parts.len())),
        }
    }

    fn name<'p>(&self, raw: &'p str) -> Result<&'p str, SceneError> {
        if raw.is_empty() {
            Err(self.invalid(raw))
        } else {
            Ok(raw)
        }
    }
}

fn build(
    field: &Field<'_>,
    kind: ComponentType,
    parts: &[&str],
    resources: &mut dyn ResourceProvider,
) -> Result<Component, SceneError> {
    let component: Component = match kind {
        ComponentType::Position => Position::new(field.vec3(parts)?).into(),
        ComponentType::Velocity => Velocity::from_vec(field.vec3(parts)?).into(),
        ComponentType::Transform => match parts {
            [sx, sy, sz, rx, ry, rz] => {
                let scale = field.vec3(&[*sx, *sy, *sz])?;
                let rotation = field.vec3(&[*rx, *ry, *rz])?;
                Transform::new(scale, rotation).into()
            }
            _ => return Err(field.arity("6", parts.len())),
        },
        ComponentType::Texture => match parts {
            [name] => Texture::new(resources.texture(field.name(name)?)?).into(),
            [name, scale] => {
                let scale = field.float(scale)?;
                Texture::with_scale(resources.texture(field.name(name)?)?, scale).into()
            }
            _ => return Err(field.arity("1 or 2", parts.len())),
        },
        ComponentType::Geometry => match parts {
            [name] => {
                let (handle, data) = resources.geometry(field.name(name)?)?;
                Geometry::new(handle, data).into()
            }
            _ => return Err(field.arity("1", parts.len())),
        },
        ComponentType::Audio => {
            let (name, settings) = match parts {
                [name, volume, rest @ ..] if rest.len() <= 2 => {
                    let mut settings = AudioSettings {
                        volume: field.float(volume)?,
                        ..AudioSettings::default()
                    };
                    if let Some(autoplay) = rest.first() {
                        settings.autoplay = field.flag(autoplay)?;
                    }
                    if let Some(looping) = rest.get(1) {
                        settings.looping = field.flag(looping)?;
                    }
                    (field.name(name)?, settings)
                }
                _ => return Err(field.arity("2 to 4", parts.len())),
            };
            let mut audio = Audio::new(resources.audio(name)?, settings);
            audio.start();
            audio.into()
        }
        ComponentType::Skybox => {
            if parts.is_empty() {
                return Err(field.arity("at least 1", 0));
            }
            Skybox {
                handle: resources.cube_map(parts)?,
            }
            .into()
        }
        ComponentType::Collider => match parts {
            [rigid] => Collider {
                is_collidable: field.flag(rigid)?,
            }
            .into(),
            _ => return Err(field.arity("1", parts.len())),
        },
        ComponentType::Ai => match parts {
            [] => AiAgent::new(Vec3::ZERO).into(),
            _ => AiAgent::new(field.vec3(parts)?).into(),
        },
        ComponentType::Animation => match parts {
            [x, y, z, speed] => {
                let axis = field.vec3(&[*x, *y, *z])?;
                Animation::new(axis, field.float(speed)?).into()
            }
            _ => return Err(field.arity("4", parts.len())),
        },
        ComponentType::LightEmitter => LightEmitter {
            point: field.vec3(parts)?,
        }
        .into(),
    };
    Ok(component)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::ComponentMask;
    use crate::resources::test_support::MemoryProvider;

    fn pacman() -> SceneEntityDecl {
        SceneEntityDecl::new("pacman")
            .with("position", "1.5, 0, -2")
            .with("velocity", "0,0,0")
            .with("geometry", "cube.obj")
            .with("texture", "pac.png, 2")
            .with("transform", "1,1,1, 0,1.57,0")
            .with("collision", "True")
    }

    #[test]
    fn test_assembles_components_in_order() {
        let mut provider = MemoryProvider::with_cube("cube.obj");
        let entity = assemble_entity(&pacman(), &mut provider).unwrap();

        assert_eq!(entity.name(), "pacman");
        assert_eq!(entity.position().unwrap().get(), Vec3::new(1.5, 0.0, -2.0));
        assert_eq!(entity.texture().unwrap().scale, 2.0);
        assert!(entity.collider().unwrap().is_collidable);
        assert!(entity
            .transform()
            .unwrap()
            .scale()
            .abs_diff_eq(Vec3::ONE, 1e-5));
        assert_eq!(
            entity.mask(),
            ComponentMask::of(&[
                ComponentType::Position,
                ComponentType::Velocity,
                ComponentType::Geometry,
                ComponentType::Texture,
                ComponentType::Transform,
                ComponentType::Collider,
            ])
        );
        let kinds: Vec<ComponentType> = entity.components().map(Component::kind).collect();
        assert_eq!(kinds[0], ComponentType::Position);
        assert_eq!(kinds[5], ComponentType::Collider);
    }

    #[test]
    fn test_ai_defaults_to_origin() {
        let mut provider = MemoryProvider::default();
        let decl = SceneEntityDecl::new("ghost").with("ai", "  ");
        let entity = assemble_entity(&decl, &mut provider).unwrap();
        assert_eq!(entity.ai().unwrap().target(), Vec3::ZERO);

        let decl = SceneEntityDecl::new("ghost").with("ai", "3,0,-4");
        let entity = assemble_entity(&decl, &mut provider).unwrap();
        assert_eq!(entity.ai().unwrap().target(), Vec3::new(3.0, 0.0, -4.0));
        assert_eq!(entity.ai().unwrap().original_target(), Vec3::new(3.0, 0.0, -4.0));
    }

    #[test]
    fn test_audio_flags() {
        let mut provider = MemoryProvider::default();
        let decls = [
            SceneEntityDecl::new("quiet").with("audio", "hum.wav, 0.5"),
            SceneEntityDecl::new("loud").with("audio", "siren.wav, 1, true, true"),
            SceneEntityDecl::new("once").with("audio", "ping.wav, 1, false"),
        ];
        let entities = assemble_entities(&decls, &mut provider).unwrap();

        let quiet = entities[0].audio().unwrap().settings();
        assert_eq!(quiet.volume, 0.5);
        assert!(!quiet.autoplay);
        let loud = entities[1].audio().unwrap().settings();
        assert!(loud.autoplay && loud.looping);
        assert!(!entities[2].audio().unwrap().settings().autoplay);

        let plays: Vec<usize> = provider.voices.iter().map(|v| v.plays()).collect();
        assert_eq!(plays, vec![0, 1, 0]);
    }

    #[test]
    fn test_skybox_and_light() {
        let mut provider = MemoryProvider::default();
        let decl = SceneEntityDecl::new("sky")
            .with("skybox", "rt.png,lf.png,up.png,dn.png,bk.png,ft.png")
            .with("light", "0, 10, 0");
        let entity = assemble_entity(&decl, &mut provider).unwrap();
        assert!(entity.skybox().is_some());
        assert_eq!(entity.light_emitter().unwrap().point, Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn test_unknown_component() {
        let mut provider = MemoryProvider::default();
        let decl = SceneEntityDecl::new("odd").with("sparkles", "1");
        assert_eq!(
            assemble_entity(&decl, &mut provider).unwrap_err(),
            SceneError::UnknownComponent {
                entity: "odd".to_string(),
                kind: "sparkles".to_string(),
            }
        );
    }

    #[test]
    fn test_bad_values() {
        let mut provider = MemoryProvider::default();
        let short = SceneEntityDecl::new("p").with("position", "1,2");
        assert!(matches!(
            assemble_entity(&short, &mut provider),
            Err(SceneError::Arity { found: 2, .. })
        ));

        let nan = SceneEntityDecl::new("p").with("velocity", "1,two,3");
        assert!(matches!(
            assemble_entity(&nan, &mut provider),
            Err(SceneError::InvalidValue { value, .. }) if value == "two"
        ));

        let flag = SceneEntityDecl::new("c").with("collision", "yes");
        assert!(matches!(
            assemble_entity(&flag, &mut provider),
            Err(SceneError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_missing_resource() {
        let mut provider = MemoryProvider::default();
        let decl = SceneEntityDecl::new("wall").with("geometry", "wall.obj");
        assert_eq!(
            assemble_entity(&decl, &mut provider).unwrap_err(),
            SceneError::MissingResource("wall.obj".to_string())
        );
    }

    #[test]
    fn test_repeated_kind_is_rejected_before_loading() {
        let mut provider = MemoryProvider::default();
        let decl = SceneEntityDecl::new("radio")
            .with("audio", "a.wav, 1")
            .with("audio", "b.wav, 1");
        assert!(matches!(
            assemble_entity(&decl, &mut provider),
            Err(SceneError::Ecs(EcsError::DuplicateComponent { .. }))
        ));
        // Only the first voice was opened, and it was closed again
        assert_eq!(provider.voices.len(), 1);
        assert_eq!(provider.voices[0].closes(), 1);
    }

    #[test]
    fn test_failed_batch_releases_earlier_voices() {
        let mut provider = MemoryProvider::default();
        let decls = [
            SceneEntityDecl::new("radio").with("audio", "a.wav, 1, true"),
            SceneEntityDecl::new("broken").with("position", "x"),
        ];
        assert!(assemble_entities(&decls, &mut provider).is_err());
        assert_eq!(provider.voices[0].plays(), 1);
        assert_eq!(provider.voices[0].closes(), 1);
    }
}
