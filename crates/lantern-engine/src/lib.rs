//! Rule engine for Lantern.
//!
//! Turns player commands into state changes over a [`lantern_core::GameState`]:
//! per-kind action registries, delegation from an area down to nested
//! artifacts, scripted interactions, state events recomputed every turn, and
//! the [`Session`] turn loop that ties them together.

/// Actions and responses.
pub mod action;
/// Engine configuration.
pub mod config;
/// Delegation from areas to the artifacts they hold.
pub mod delegate;
/// Error types for the engine.
pub mod error;
/// State-event evaluation.
pub mod events;
/// The standard action handlers.
pub mod handlers;
/// Interaction lookup and one-shot removal.
pub mod interaction;
/// Command parsing and name resolution.
pub mod parser;
/// Per-kind action registries.
pub mod registry;
/// The turn loop.
pub mod session;
/// The verb vocabulary.
pub mod verb;

pub use action::{Action, Response, ResponsePatch};
pub use config::EngineConfig;
pub use delegate::Dispatcher;
pub use error::{EngineError, EngineResult};
pub use events::evaluate_state_events;
pub use parser::{CommandParser, ParsedCommand, WordParser};
pub use registry::{ActionRegistry, Handler, Invocation, Registries};
pub use session::Session;
pub use verb::Verb;
