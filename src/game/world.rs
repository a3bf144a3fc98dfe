//! World Registry
//!
//! Owns every entity, keyed by unique name, in spawn order:
//! - `spawn` allocates a generational id and appends the entity
//! - `perform_calls` runs one phase across all entities, spawn order first,
//!   then each entity's registration order
//! - `despawn` runs cleanup hooks, then removes the entity
//!
//! A failing callable aborts the pass immediately; entities after it do not
//! run for that phase.

use std::collections::HashMap;

use super::component::{DispatchError, Phase};
use super::entity::{Entity, EntityAllocator, EntityId};
use super::runtime::Frame;

/// Insertion-ordered, name-keyed entity registry.
#[derive(Debug, Default)]
pub struct World {
    ids: EntityAllocator,
    /// Spawn order
    entities: Vec<Entity>,
    /// Name -> position in `entities`
    by_name: HashMap<String, usize>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Entity Management
    // =========================================================================

    /// Spawn an empty entity called `name`.
    pub fn spawn(&mut self, name: impl Into<String>) -> Result<&mut Entity, DispatchError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(DispatchError::DuplicateEntity(name));
        }

        let id = self.ids.allocate();
        let slot = self.entities.len();
        self.by_name.insert(name.clone(), slot);
        log::debug!("spawned '{}' ({}v{})", name, id.index(), id.generation());
        self.entities.push(Entity::new(id, name));
        Ok(&mut self.entities[slot])
    }

    /// Remove `name`, running its components' cleanup hooks first.
    /// Remaining entities keep their relative spawn order.
    pub fn despawn(&mut self, name: &str) -> Result<(), DispatchError> {
        let slot = self
            .by_name
            .remove(name)
            .ok_or_else(|| DispatchError::UnknownEntity(name.to_string()))?;

        let mut entity = self.entities.remove(slot);
        let Entity { header, components, .. } = &mut entity;
        for component in components.iter_mut() {
            component.run_cleanup(header);
        }
        self.ids.free(entity.id());
        debug_assert_eq!(self.ids.alive_count() as usize, self.entities.len());

        for index in self.by_name.values_mut() {
            if *index > slot {
                *index -= 1;
            }
        }

        log::debug!("despawned '{}'", name);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.by_name.get(name).map(|&slot| &self.entities[slot])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.by_name.get(name).map(|&slot| &mut self.entities[slot])
    }

    /// Whether `id` still refers to a live entity.
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.ids.is_alive(id)
    }

    /// Entity names in spawn order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(Entity::name)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Invoke every callable registered under `phase`: entities in spawn
    /// order, callables in registration order.
    pub fn perform_calls(
        &mut self,
        phase: Phase,
        frame: &mut Frame<'_>,
    ) -> Result<(), DispatchError> {
        for entity in &mut self.entities {
            let Entity { header, components, calls } = entity;
            let Some(refs) = calls.get(&phase) else {
                continue;
            };

            for call in refs {
                let component = &mut components[call.component];
                component
                    .invoke(call.binding, header, frame)
                    .map_err(|source| DispatchError::Call {
                        entity: header.name.clone(),
                        phase,
                        component: component.component_name(),
                        handler: component.binding_name(call.binding),
                        source,
                    })?;
            }
        }
        Ok(())
    }
}
