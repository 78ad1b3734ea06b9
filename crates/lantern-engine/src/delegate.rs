//! Delegation: routing an action from the current area down to the artifact
//! that should handle it.

use lantern_core::{ArtifactId, ArtifactKind, GameState};
use tracing::{debug, warn};

use crate::action::{Action, Response};
use crate::config::EngineConfig;
use crate::registry::{ActionRegistry, Invocation, Registries};

/// Routes actions through the per-kind registries.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a> {
    registries: &'a Registries,
    config: &'a EngineConfig,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher over a set of registries.
    pub fn new(registries: &'a Registries, config: &'a EngineConfig) -> Self {
        Self { registries, config }
    }

    /// Handle `action` with `context` as the acting artifact.
    pub fn handle(&self, state: &mut GameState, context: &ArtifactId, action: &Action) -> Response {
        let Some(kind) = state.get(context).map(|a| a.kind) else {
            warn!(context = %context, "dispatch to unknown artifact");
            return Response::fail(self.config.cannot_do.clone());
        };
        match kind {
            ArtifactKind::Area => self.handle_area(state, context, action),
            ArtifactKind::Fixture => self.handle_fixture(state, context, action),
            ArtifactKind::Item => self.handle_item(state, context, action),
        }
    }

    /// Scan every other artifact in registry order. The object itself, or a
    /// container holding it for a delegatable verb, gets a chance to handle
    /// the action; the first success wins. Otherwise the area handles it.
    fn handle_area(&self, state: &mut GameState, context: &ArtifactId, action: &Action) -> Response {
        if let Some(object) = &action.object {
            let verb = action.verb;
            let candidates: Vec<ArtifactId> = state.ids().filter(|id| *id != context).cloned().collect();
            for id in candidates {
                let is_target = id == *object;
                let holds_target = !is_target
                    && verb.is_delegatable()
                    && verb.requires_object()
                    && state.get(&id).is_some_and(|a| a.contains(object));
                if !is_target && !holds_target {
                    continue;
                }

                debug!(from = %context, to = %id, verb = %verb, "forwarding");
                let response = self.handle(state, &id, &action.forwarded());
                if response.success {
                    return response;
                }
            }
        } else if action.verb.is_game() {
            return self.run(&self.registries.game, state, context, action);
        }
        self.run(&self.registries.area, state, context, action)
    }

    /// A fixture hands actions aimed at a fixture it holds one level down.
    fn handle_fixture(&self, state: &mut GameState, context: &ArtifactId, action: &Action) -> Response {
        if let Some(object) = &action.object {
            let holds = state
                .get(context)
                .is_some_and(|f| f.fixtures.contains(object));
            if holds {
                debug!(from = %context, to = %object, "forwarding to nested fixture");
                return self.handle(state, object, &action.without_object());
            }
        }
        self.run(&self.registries.fixture, state, context, action)
    }

    /// An item forwards to its contents only if no area has dispatched the
    /// action yet.
    fn handle_item(&self, state: &mut GameState, context: &ArtifactId, action: &Action) -> Response {
        if let Some(object) = &action.object {
            let forward = !action.dispatched
                && action.verb.is_delegatable()
                && action.verb.requires_object()
                && state.get(context).is_some_and(|i| i.contains(object));
            if forward {
                debug!(from = %context, to = %object, "forwarding to contents");
                return self.handle(state, object, &action.without_object());
            }
        }
        self.run(&self.registries.item, state, context, action)
    }

    fn run(
        &self,
        registry: &ActionRegistry,
        state: &mut GameState,
        context: &ArtifactId,
        action: &Action,
    ) -> Response {
        registry.dispatch(
            state,
            &Invocation {
                context,
                action,
                config: self.config,
            },
        )
    }
}
