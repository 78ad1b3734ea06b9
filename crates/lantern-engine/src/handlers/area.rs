use lantern_core::{Direction, GameState};
use tracing::debug;

use super::name_of;
use crate::action::{Response, ResponsePatch};
use crate::interaction::{dispatch_interaction, interaction_key};
use crate::registry::Invocation;

fn walk(state: &mut GameState, invocation: &Invocation<'_>, direction: Direction) -> Response {
    let destination = state
        .get(invocation.context)
        .and_then(|area| area.exits.get(direction))
        .and_then(|id| state.get(id));

    match destination {
        Some(area) if area.is_accessible() => {
            debug!(from = %invocation.context, to = %area.id, "moving {}", direction.name());
            Response::ok(area.describe(state)).with_new_area(area.id.clone())
        }
        _ => Response::fail("You can't go that way."),
    }
}

/// Leave through the north exit.
pub fn north(state: &mut GameState, invocation: &Invocation<'_>) -> Response {
    walk(state, invocation, Direction::North)
}

/// Leave through the south exit.
pub fn south(state: &mut GameState, invocation: &Invocation<'_>) -> Response {
    walk(state, invocation, Direction::South)
}

/// Leave through the east exit.
pub fn east(state: &mut GameState, invocation: &Invocation<'_>) -> Response {
    walk(state, invocation, Direction::East)
}

/// Leave through the west exit.
pub fn west(state: &mut GameState, invocation: &Invocation<'_>) -> Response {
    walk(state, invocation, Direction::West)
}

/// `go` reaches a handler only without a recognisable direction.
pub fn go(_state: &mut GameState, _invocation: &Invocation<'_>) -> Response {
    Response::fail("You can't go that way.")
}

/// Use a held item, optionally on something held or in the area.
///
/// Only scripted interactions make this succeed. A match consumes the
/// indirect object if the interaction marks itself as consuming.
pub fn use_item(state: &mut GameState, invocation: &Invocation<'_>) -> Response {
    let cannot_do = || Response::fail(invocation.config.cannot_do.clone());
    let Some(object) = invocation.action.object.as_ref() else {
        return cannot_do();
    };
    if !state.holds(object.as_str()) {
        return Response::fail(format!("You don't have a {}", name_of(state, object)));
    }

    let iobject = invocation.action.iobject.as_ref();
    if let Some(iobject) = iobject {
        let nearby = state
            .get(invocation.context)
            .is_some_and(|area| area.contains(iobject));
        if !nearby && !state.holds(iobject.as_str()) {
            return Response::fail(format!("You don't have a {}", name_of(state, iobject)));
        }
    }

    let key = interaction_key("use", object, iobject);
    let patch = iobject
        .cloned()
        .map(ResponsePatch::item)
        .unwrap_or_default();
    dispatch_interaction(state, invocation.context, &key, cannot_do(), patch)
}
