//! Entity Component System (ECS) core implementation
//!
//! This module provides the foundational ECS architecture including:
//! - Component kinds and their bit mask
//! - Named entities owning one component per kind
//! - The scene's entity registry with mask queries
//! - The ordered per-frame system dispatcher

mod component;
pub mod components;
mod entity;
mod manager;
mod system;

pub use component::{Component, ComponentMask, ComponentType};
pub use entity::{ComponentsMut, Entity};
pub use manager::EntityManager;
pub use system::{checked_delta_time, System, SystemManager};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{Position, Velocity};
    use glam::Vec3;

    #[test]
    fn test_manager_creation() {
        let manager = EntityManager::new();
        assert!(manager.is_empty());
    }

    #[test]
    fn test_entity_registration() {
        let mut manager = EntityManager::new();
        let entity = Entity::new("ball")
            .with(Position::new(Vec3::ZERO))
            .unwrap()
            .with(Velocity::new(0.0, 1.0, 0.0))
            .unwrap();
        manager.add(entity).unwrap();
        assert_eq!(manager.len(), 1);
        assert!(manager.find("ball").unwrap().matches(ComponentMask::of(&[
            ComponentType::Position,
            ComponentType::Velocity
        ])));
    }
}
