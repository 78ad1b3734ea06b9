//! Interaction lookup: replaces a handler's default response with a scripted
//! one when the world defines it.

use lantern_core::{ArtifactId, GameState, Interaction, InteractionKey};
use tracing::{debug, info};

use crate::action::{Response, ResponsePatch};
use crate::verb::Verb;

/// Build the key for `verb` acting on `object`.
///
/// The indirect object is part of the key only for three-place verbs.
pub fn interaction_key(
    verb: &str,
    object: &ArtifactId,
    iobject: Option<&ArtifactId>,
) -> InteractionKey {
    let key = InteractionKey::new(verb, object.clone());
    let three_place = Verb::parse(verb).is_some_and(|v| v.is_three_place());
    match iobject {
        Some(iobject) if three_place => key.with_iobject(iobject.clone()),
        _ => key,
    }
}

/// Where a matched interaction was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Locus {
    Local,
    Global,
}

/// Look up `key` in the acting artifact's table, then the global table.
///
/// Without a match the default response is returned untouched. A match
/// replaces it, succeeds, takes the patch, and is removed from its table if
/// it is not repeatable.
pub fn dispatch_interaction(
    state: &mut GameState,
    context: &ArtifactId,
    key: &InteractionKey,
    default: Response,
    patch: ResponsePatch,
) -> Response {
    let local = state
        .get(context)
        .and_then(|a| a.interactions.get(key))
        .cloned();
    let (template, locus): (Interaction, Locus) = match local {
        Some(t) => (t, Locus::Local),
        None => match state.interactions.get(key) {
            Some(t) => (t.clone(), Locus::Global),
            None => {
                debug!(interaction = %key, "no interaction; keeping default response");
                return default;
            }
        },
    };

    info!(interaction = %key, ?locus, "interaction matched");
    let mut response = Response::from(&template);
    patch.apply(&mut response);

    if !template.repeatable {
        debug!(interaction = %key, ?locus, "removing one-shot interaction");
        match locus {
            Locus::Local => {
                if let Some(artifact) = state.get_mut(context) {
                    artifact.interactions.remove(key);
                }
            }
            Locus::Global => {
                state.interactions.remove(key);
            }
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_core::Artifact;

    fn id(s: &str) -> ArtifactId {
        ArtifactId::from(s)
    }

    fn world() -> GameState {
        let mut state = GameState::new();
        state
            .insert(
                Artifact::fixture("lever", "Lever").with_interaction(
                    InteractionKey::new("turn", "lever"),
                    Interaction::new("Local clunk."),
                ),
            )
            .unwrap();
        state.insert(Artifact::fixture("wheel", "Wheel")).unwrap();
        state.interactions.insert(
            InteractionKey::new("turn", "lever"),
            Interaction::new("Global clunk."),
        );
        state.interactions.insert(
            InteractionKey::new("turn", "wheel"),
            Interaction::new("It spins.").with_event("wheel_turned", true).once(),
        );
        state
    }

    #[test]
    fn iobject_only_keys_three_place_verbs() {
        let key = interaction_key("use", &id("key"), Some(&id("box")));
        assert_eq!(key.to_string(), "use__key__box");
        let key = interaction_key("open", &id("box"), Some(&id("crowbar")));
        assert_eq!(key.to_string(), "open__box");
        let key = interaction_key("burn", &id("rope"), Some(&id("torch")));
        assert_eq!(key.to_string(), "burn__rope__torch");
    }

    #[test]
    fn local_shadows_global() {
        let mut state = world();
        let key = InteractionKey::new("turn", "lever");
        let response = dispatch_interaction(
            &mut state,
            &id("lever"),
            &key,
            Response::fail("You can't turn that."),
            ResponsePatch::none(),
        );
        assert!(response.success);
        assert_eq!(response.message, "Local clunk.");
    }

    #[test]
    fn no_match_keeps_default() {
        let mut state = world();
        let key = InteractionKey::new("cut", "lever");
        let response = dispatch_interaction(
            &mut state,
            &id("lever"),
            &key,
            Response::fail("You can't cut that."),
            ResponsePatch::none(),
        );
        assert!(!response.success);
        assert_eq!(response.message, "You can't cut that.");
    }

    #[test]
    fn one_shot_is_removed_from_where_it_was_found() {
        let mut state = world();
        let key = InteractionKey::new("turn", "wheel");
        let first = dispatch_interaction(
            &mut state,
            &id("wheel"),
            &key,
            Response::fail("You can't turn that."),
            ResponsePatch::none(),
        );
        assert_eq!(first.message, "It spins.");
        assert_eq!(first.events.get("wheel_turned"), Some(true));
        assert!(state.interactions.get(&key).is_none());

        let second = dispatch_interaction(
            &mut state,
            &id("wheel"),
            &key,
            Response::fail("You can't turn that."),
            ResponsePatch::none(),
        );
        assert!(!second.success);
    }

    #[test]
    fn patch_overrides_template_item() {
        let mut state = world();
        state.interactions.insert(
            InteractionKey::new("use", "key").with_iobject("chest"),
            Interaction::new("Click.").consuming("key"),
        );
        let key = interaction_key("use", &id("key"), Some(&id("chest")));
        let response = dispatch_interaction(
            &mut state,
            &id("hall"),
            &key,
            Response::fail("You can't do that here."),
            ResponsePatch::item(id("chest")),
        );
        assert!(response.consumed);
        assert_eq!(response.item, Some(id("chest")));
    }
}
