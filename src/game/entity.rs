//! Entities
//!
//! An entity is a named thing in the scene: a generational id, a name, an
//! iso-space position, and the components attached to it. Each attached
//! component appends its phase bindings to the entity's call table, so the
//! table is fully built by the time `attach` returns and never changes
//! afterwards.
//!
//! Ids follow the generational index pattern:
//! - Each slot has a generation counter
//! - When an entity is removed, its slot can be reused
//! - The generation increments on reuse, invalidating old ids

use std::collections::HashMap;

use macroquad::math::Vec2;

use super::component::{AnyComponent, Component, DispatchError, Phase};

/// A unique identifier for an entity.
///
/// Consists of an index (which slot) and a generation (which version of
/// that slot). Same index with different generations are different entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

impl EntityId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Allocates and tracks entity id lifetimes.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    /// Generation counter for each slot
    generations: Vec<u32>,
    /// Free slots available for reuse (LIFO)
    free_indices: Vec<u32>,
    /// Number of currently alive ids
    alive_count: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new id.
    pub fn allocate(&mut self) -> EntityId {
        self.alive_count += 1;

        if let Some(index) = self.free_indices.pop() {
            // Generation was already bumped on free
            EntityId::new(index, self.generations[index as usize])
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            EntityId::new(index, 0)
        }
    }

    /// Free an id, making its slot available for reuse.
    /// Returns true if the id was alive and is now freed.
    pub fn free(&mut self, id: EntityId) -> bool {
        if !self.is_alive(id) {
            return false;
        }

        self.generations[id.index as usize] += 1;
        self.free_indices.push(id.index);
        self.alive_count -= 1;
        true
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        let idx = id.index as usize;
        idx < self.generations.len() && self.generations[idx] == id.generation
    }

    pub fn alive_count(&self) -> u32 {
        self.alive_count
    }
}

/// The parts of an entity that its components may read and write while
/// one of their phase callables runs.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityHeader {
    pub id: EntityId,
    pub name: String,
    /// Position in iso space
    pub position: Vec2,
}

/// Reference to one binding of one attached component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CallRef {
    pub component: usize,
    pub binding: usize,
}

/// A named entity with its components and per-phase call table.
pub struct Entity {
    pub(crate) header: EntityHeader,
    pub(crate) components: Vec<Box<dyn AnyComponent>>,
    pub(crate) calls: HashMap<Phase, Vec<CallRef>>,
}

impl Entity {
    pub(crate) fn new(id: EntityId, name: String) -> Self {
        Self {
            header: EntityHeader {
                id,
                name,
                position: Vec2::ZERO,
            },
            components: Vec::new(),
            calls: HashMap::new(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.header.id
    }

    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn position(&self) -> Vec2 {
        self.header.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.header.position = position;
    }

    /// Attach a component, appending its bindings to this entity's call
    /// table in declaration order.
    ///
    /// Fails without attaching anything when the component declares the
    /// same callable twice, whether under one name or two.
    pub fn attach<C: Component>(&mut self, component: C) -> Result<(), DispatchError> {
        let bindings = C::BINDINGS;
        for (i, binding) in bindings.iter().enumerate() {
            let handler = binding.handler as usize;
            if bindings[..i]
                .iter()
                .any(|b| b.name == binding.name || b.handler as usize == handler)
            {
                return Err(DispatchError::DuplicateBinding {
                    component: C::NAME,
                    handler: binding.name,
                });
            }
        }

        let slot = self.components.len();
        for (i, binding) in bindings.iter().enumerate() {
            self.calls
                .entry(binding.phase)
                .or_default()
                .push(CallRef { component: slot, binding: i });
        }
        self.components.push(Box::new(component));

        log::debug!(
            "attached {} to '{}' ({} bindings)",
            C::NAME,
            self.header.name,
            bindings.len()
        );
        Ok(())
    }

    /// First attached component of type `C`.
    pub fn component<C: Component>(&self) -> Option<&C> {
        self.components.iter().find_map(|c| c.as_any().downcast_ref::<C>())
    }

    pub fn component_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.components.iter_mut().find_map(|c| c.as_any_mut().downcast_mut::<C>())
    }

    /// Number of callables registered under `phase`.
    pub fn call_count(&self, phase: Phase) -> usize {
        self.calls.get(&phase).map_or(0, Vec::len)
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("header", &self.header)
            .field(
                "components",
                &self.components.iter().map(|c| c.component_name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_free() {
        let mut alloc = EntityAllocator::new();

        let e1 = alloc.allocate();
        let e2 = alloc.allocate();
        assert_eq!(alloc.alive_count(), 2);
        assert!(alloc.is_alive(e1));
        assert!(alloc.is_alive(e2));

        alloc.free(e1);
        assert_eq!(alloc.alive_count(), 1);
        assert!(!alloc.is_alive(e1));
        assert!(alloc.is_alive(e2));
        assert!(!alloc.free(e1));
    }

    #[test]
    fn test_generation_prevents_reuse_collision() {
        let mut alloc = EntityAllocator::new();

        let e1 = alloc.allocate();
        alloc.free(e1);

        // Same slot, new generation
        let e2 = alloc.allocate();
        assert_eq!(e2.index(), e1.index());
        assert_ne!(e2.generation(), e1.generation());
        assert_ne!(e1, e2);

        assert!(!alloc.is_alive(e1));
        assert!(alloc.is_alive(e2));
    }
}
