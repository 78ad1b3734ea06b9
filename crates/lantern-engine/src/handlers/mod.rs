//! The standard action handlers, grouped by the registries that use them.

use lantern_core::{ArtifactId, GameState};

use crate::registry::Invocation;

/// Area-only handlers: movement and `use`.
pub mod area;
/// Fixture-only handlers.
pub mod fixture;
/// Game-level handlers.
pub mod game;
/// Item-only handlers.
pub mod item;
/// Handlers shared by several registries.
pub mod shared;

/// The artifact a handler acts on: the direct object if given, else the
/// context.
fn target<'a>(invocation: &Invocation<'a>) -> &'a ArtifactId {
    invocation
        .action
        .object
        .as_ref()
        .unwrap_or(invocation.context)
}

/// Display name of an artifact, falling back to its id.
fn name_of(state: &GameState, id: &ArtifactId) -> String {
    state
        .get(id)
        .map(|a| a.name.clone())
        .unwrap_or_else(|| id.to_string())
}
