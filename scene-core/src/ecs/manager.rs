//! Entity registry
//!
//! The EntityManager owns the authoritative, ordered list of entities for a
//! scene. Names are unique within a manager; systems see entities in list
//! order every frame.

use crate::ecs::{ComponentMask, Entity};
use crate::error::{EcsError, SceneError};
use crate::resources::ResourceProvider;
use crate::scene::{assemble_entities, SceneEntityDecl};
use log::{debug, error};
use std::collections::HashSet;

/// The scene's entity container
///
/// Resources held outside the heap (audio voices) are only released by
/// [`EntityManager::remove`] and [`EntityManager::delete_all`];
/// [`EntityManager::clear`] just forgets the entities.
#[derive(Debug, Default)]
pub struct EntityManager {
    entities: Vec<Entity>,
}

impl EntityManager {
    /// Create an empty manager
    pub fn new() -> Self {
        EntityManager {
            entities: Vec::new(),
        }
    }

    /// Register an entity
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::DuplicateEntity`] without touching the list when
    /// the name is already taken. This is a programming error in the scene
    /// setup, so it is also logged at error level. The rejected entity's
    /// resources are released before it is dropped.
    pub fn add(&mut self, mut entity: Entity) -> Result<(), EcsError> {
        if self.find(entity.name()).is_some() {
            error!("entity '{}' already exists", entity.name());
            entity.release_resources();
            return Err(EcsError::DuplicateEntity(entity.name().to_string()));
        }
        debug!("adding {}", entity);
        self.entities.push(entity);
        Ok(())
    }

    /// Register a batch of entities, all or nothing
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::DuplicateEntity`] for the first name that clashes
    /// with the manager or with an earlier entity in the batch. Nothing is
    /// added in that case and every entity of the batch has its resources
    /// released.
    pub fn load_entities(&mut self, mut entities: Vec<Entity>) -> Result<(), EcsError> {
        if let Some(name) = self.first_clash(&entities) {
            error!("entity '{}' already exists", name);
            for entity in &mut entities {
                entity.release_resources();
            }
            return Err(EcsError::DuplicateEntity(name));
        }

        debug!("loading {} entities", entities.len());
        self.entities.extend(entities);
        Ok(())
    }

    /// Assemble scene declarations and register the result
    ///
    /// # Errors
    ///
    /// Fails on any assembly error or name clash; the manager is unchanged.
    /// Voices opened for a batch that fails to register are released again.
    pub fn load_scene(
        &mut self,
        declarations: &[SceneEntityDecl],
        resources: &mut dyn ResourceProvider,
    ) -> Result<(), SceneError> {
        let entities = assemble_entities(declarations, resources)?;
        self.load_entities(entities)?;
        Ok(())
    }

    fn first_clash(&self, batch: &[Entity]) -> Option<String> {
        let mut seen: HashSet<&str> = self.entities.iter().map(Entity::name).collect();
        batch
            .iter()
            .find(|entity| !seen.insert(entity.name()))
            .map(|entity| entity.name().to_string())
    }

    /// Release an entity's resources and drop it from the list
    pub fn remove(&mut self, name: &str) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.name() == name)?;
        let mut entity = self.entities.remove(index);
        let released = entity.release_resources();
        debug!("removed {} ({} resources released)", entity, released);
        Some(entity)
    }

    /// First entity with this name
    pub fn find(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name() == name)
    }

    /// Mutable access to the first entity with this name
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.name() == name)
    }

    /// Every entity carrying at least the bits of `mask`, in list order
    pub fn find_all_with_mask(&self, mask: ComponentMask) -> Vec<&Entity> {
        self.entities.iter().filter(|e| e.matches(mask)).collect()
    }

    /// Names of all entities in list order
    pub fn entity_names(&self) -> Vec<&str> {
        self.entities.iter().map(Entity::name).collect()
    }

    /// All entities in list order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Mutable view of the entity list, used by the system dispatcher
    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True when no entity is registered
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Release every audio voice ahead of a scene teardown
    ///
    /// Entities stay registered; call [`EntityManager::clear`] afterwards.
    /// Returns the number of voices released by this call.
    pub fn delete_all(&mut self) -> usize {
        let released: usize = self
            .entities
            .iter_mut()
            .map(Entity::release_resources)
            .sum();
        debug!("released {} resources for {} entities", released, self.entities.len());
        released
    }

    /// Forget every entity without releasing resources
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}
