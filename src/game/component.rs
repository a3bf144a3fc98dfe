//! Components and Phase Dispatch
//!
//! A component is a behavior unit attached to an entity. Each component
//! type declares, as an associated constant, the callables it wants run and
//! the phase each one belongs to:
//!
//! ```ignore
//! impl Component for Camera {
//!     const NAME: &'static str = "Camera";
//!     const BINDINGS: &'static [Binding<Self>] = &[
//!         Binding { phase: Phase::UPDATE, name: "follow_input", handler: Camera::follow_input },
//!     ];
//! }
//! ```
//!
//! `Entity::attach` copies these into the entity's call table once, in
//! declaration order; `World::perform_calls` walks the table. No runtime
//! introspection, and the world never needs the concrete component types.

use std::any::Any;
use std::fmt;

use super::entity::EntityHeader;
use super::runtime::Frame;

/// A named dispatch pass over every entity's registered callables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Phase(&'static str);

impl Phase {
    /// Simulation step, runs to completion for every entity before `DRAW`
    pub const UPDATE: Phase = Phase("update");
    /// Drawables push themselves into the render queue
    pub const DRAW: Phase = Phase("draw");

    pub const fn named(name: &'static str) -> Self {
        Phase(name)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Signature of a phase callable on component `C`.
pub type Handler<C> = fn(&mut C, &mut EntityHeader, &mut Frame<'_>) -> Result<(), ComponentError>;

/// One (phase, callable) declaration.
pub struct Binding<C: ?Sized + 'static> {
    pub phase: Phase,
    /// Identifies the callable; must be unique within a component type
    pub name: &'static str,
    pub handler: Handler<C>,
}

/// A behavior unit that can be attached to an entity.
pub trait Component: Any {
    /// Type name used in logs and errors
    const NAME: &'static str;

    /// Phase bindings, in the order they should run.
    const BINDINGS: &'static [Binding<Self>];

    /// Runs when the owning entity is removed from the world.
    fn cleanup(&mut self, _entity: &mut EntityHeader) {}
}

/// Type-erased component, as stored on an entity.
pub(crate) trait AnyComponent {
    fn component_name(&self) -> &'static str;
    fn binding_name(&self, binding: usize) -> &'static str;
    fn invoke(
        &mut self,
        binding: usize,
        entity: &mut EntityHeader,
        frame: &mut Frame<'_>,
    ) -> Result<(), ComponentError>;
    fn run_cleanup(&mut self, entity: &mut EntityHeader);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: Component> AnyComponent for C {
    fn component_name(&self) -> &'static str {
        C::NAME
    }

    fn binding_name(&self, binding: usize) -> &'static str {
        C::BINDINGS[binding].name
    }

    fn invoke(
        &mut self,
        binding: usize,
        entity: &mut EntityHeader,
        frame: &mut Frame<'_>,
    ) -> Result<(), ComponentError> {
        (C::BINDINGS[binding].handler)(self, entity, frame)
    }

    fn run_cleanup(&mut self, entity: &mut EntityHeader) {
        Component::cleanup(self, entity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Failure raised inside a component callable.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    #[error("{0} is not finite")]
    NonFinite(&'static str),

    #[error("{0}")]
    Other(String),
}

/// Errors from entity registration and phase dispatch.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("{component} binds '{handler}' more than once")]
    DuplicateBinding {
        component: &'static str,
        handler: &'static str,
    },

    #[error("an entity named '{0}' already exists")]
    DuplicateEntity(String),

    #[error("no entity named '{0}'")]
    UnknownEntity(String),

    #[error("{phase} call {component}::{handler} on '{entity}' failed")]
    Call {
        entity: String,
        phase: Phase,
        component: &'static str,
        handler: &'static str,
        #[source]
        source: ComponentError,
    },
}
