//! Core types for Lantern: artifacts, properties, triggers, and the game state.
//!
//! This crate defines the data model the rule engine operates on. It is
//! independent of command handling: you can construct a [`GameState`]
//! programmatically with the artifact builders or load one from a JSON
//! [`WorldDocument`].

/// Artifacts (areas, fixtures, items), their identifiers, and exits.
pub mod artifact;
/// Declarative state-event conditions evaluated against the game state.
pub mod condition;
/// Start/end description text and trigger-driven overrides.
pub mod description;
/// The load-time world document and its validation into a game state.
pub mod document;
/// Error types used throughout the crate.
pub mod error;
/// Scripted interaction templates keyed by verb and objects.
pub mod interaction;
/// Boolean artifact properties and their kind-specific defaults.
pub mod property;
/// The game state: the single owning registry of artifacts plus world flags.
pub mod state;
/// Event flags, trigger keys, and trigger effects.
pub mod trigger;

/// Re-export artifact types.
pub use artifact::{Artifact, ArtifactId, ArtifactKind, DEFAULT_CAPACITY, Direction, Exits};
/// Re-export condition types.
pub use condition::{
    ArtifactExpectation, Attribute, AttributeValue, Expectation, StateCondition, StateEvent,
};
/// Re-export description types.
pub use description::{Description, DescriptionOverride};
/// Re-export the load-time document types.
pub use document::{LoadedWorld, WorldDocument};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export interaction types.
pub use interaction::{Interaction, InteractionKey, InteractionTable};
/// Re-export property types.
pub use property::{Properties, Property};
/// Re-export the game state.
pub use state::GameState;
/// Re-export trigger types.
pub use trigger::{EventFlags, TriggerEffect, TriggerKey, TriggerTable};
