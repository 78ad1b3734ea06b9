//! Per-kind action registries and the dispatcher.

use std::collections::HashMap;
use std::fmt;

use lantern_core::{ArtifactId, ArtifactKind, Direction, GameState};
use tracing::debug;

use crate::action::{Action, Response};
use crate::config::EngineConfig;
use crate::handlers::{area, fixture, game, item, shared};
use crate::verb::Verb;

/// Everything a handler needs besides the mutable state.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    /// The artifact the handler runs on.
    pub context: &'a ArtifactId,
    /// The action being performed.
    pub action: &'a Action,
    /// Session configuration.
    pub config: &'a EngineConfig,
}

/// An action handler.
pub type Handler = fn(&mut GameState, &Invocation<'_>) -> Response;

/// A verb to handler table for one artifact kind.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    handlers: HashMap<Verb, Handler>,
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut verbs: Vec<&str> = self.handlers.keys().map(Verb::canonical).collect();
        verbs.sort_unstable();
        f.debug_struct("ActionRegistry").field("verbs", &verbs).finish()
    }
}

impl ActionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under each of `verbs`.
    pub fn register(&mut self, verbs: &[Verb], handler: Handler) -> &mut Self {
        for verb in verbs {
            self.handlers.insert(*verb, handler);
        }
        self
    }

    /// The handler for `verb`, if any.
    pub fn get(&self, verb: Verb) -> Option<Handler> {
        self.handlers.get(&verb).copied()
    }

    /// Whether `verb` has a handler.
    pub fn handles(&self, verb: Verb) -> bool {
        self.handlers.contains_key(&verb)
    }

    /// Run the handler for the invocation's verb.
    ///
    /// Unknown verbs fail with the configured "can't do that" message.
    pub fn dispatch(&self, state: &mut GameState, invocation: &Invocation<'_>) -> Response {
        match self.get(invocation.action.verb) {
            Some(handler) => {
                debug!(
                    verb = %invocation.action.verb,
                    context = %invocation.context,
                    "dispatching"
                );
                handler(state, invocation)
            }
            None => {
                debug!(verb = %invocation.action.verb, context = %invocation.context, "no handler");
                Response::fail(invocation.config.cannot_do.clone())
            }
        }
    }
}

/// The four registries a session dispatches through.
#[derive(Debug, Clone, Default)]
pub struct Registries {
    /// Area handlers.
    pub area: ActionRegistry,
    /// Fixture handlers.
    pub fixture: ActionRegistry,
    /// Item handlers.
    pub item: ActionRegistry,
    /// Game-level handlers that need no context.
    pub game: ActionRegistry,
}

impl Registries {
    /// The standard handler set.
    pub fn standard() -> Self {
        let mut registries = Self::default();

        registries
            .area
            .register(&[Verb::Look], shared::look)
            .register(&[Verb::Take], shared::take)
            .register(&[Verb::Drop], shared::drop)
            .register(&[Verb::Move(Direction::North)], area::north)
            .register(&[Verb::Move(Direction::South)], area::south)
            .register(&[Verb::Move(Direction::East)], area::east)
            .register(&[Verb::Move(Direction::West)], area::west)
            .register(&[Verb::Go], area::go)
            .register(&[Verb::Use], area::use_item);

        registries
            .fixture
            .register(&[Verb::Look], shared::look)
            .register(&[Verb::Take], shared::take)
            .register(&[Verb::Drop], shared::drop)
            .register(&[Verb::Light], shared::light)
            .register(&[Verb::Cut], shared::cut)
            .register(&[Verb::Open], fixture::open)
            .register(&[Verb::Close], fixture::close)
            .register(&[Verb::Turn], fixture::turn);

        registries
            .item
            .register(&[Verb::Look], shared::look)
            .register(&[Verb::Take], shared::take)
            .register(&[Verb::Light], shared::light)
            .register(&[Verb::Cut], shared::cut)
            .register(&[Verb::Open], item::open)
            .register(&[Verb::Close], item::close);

        registries
            .game
            .register(&[Verb::Inventory], game::inventory)
            .register(&[Verb::Help], game::help)
            .register(&[Verb::Quit], game::quit);

        registries
    }

    /// The registry for an artifact kind.
    pub fn for_kind(&self, kind: ArtifactKind) -> &ActionRegistry {
        match kind {
            ArtifactKind::Area => &self.area,
            ArtifactKind::Fixture => &self.fixture,
            ArtifactKind::Item => &self.item,
        }
    }
}
