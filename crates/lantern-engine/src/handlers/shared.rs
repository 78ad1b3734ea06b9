use lantern_core::{Artifact, ArtifactId, GameState, Property};
use tracing::debug;

use super::{name_of, target};
use crate::action::{Response, ResponsePatch};
use crate::interaction::{dispatch_interaction, interaction_key};
use crate::registry::Invocation;

/// Describe the context, unless it is dark and nothing nearby is lit.
pub fn look(state: &mut GameState, invocation: &Invocation<'_>) -> Response {
    let Some(context) = state.get(invocation.context) else {
        return Response::fail(invocation.config.cannot_do.clone());
    };
    let has_light = state
        .inventory
        .iter()
        .chain(context.fixtures.iter())
        .chain(context.items.iter())
        .filter_map(|id| state.get(id))
        .any(Artifact::is_lit);

    if context.is_dark() && !has_light {
        return Response::fail("It's too dark to see.");
    }
    Response::ok(context.describe(state))
}

/// Move the object from the context's items into the inventory.
pub fn take(state: &mut GameState, invocation: &Invocation<'_>) -> Response {
    let cannot = || Response::fail("You can't take that.");
    let Some(object_id) = invocation.action.object.as_ref() else {
        return cannot();
    };
    let (Some(object), Some(context)) = (state.get(object_id), state.get(invocation.context))
    else {
        return cannot();
    };

    if state.holds(object_id.as_str()) {
        return Response::fail(format!("You already have the {}", object.name));
    }
    let closed = context.is_openable() && !context.is_open();
    if !object.is_accessible() || !context.items.contains(object_id) || closed {
        debug!(object = %object_id, context = %context.id, "cannot take from here");
        return cannot();
    }

    let response = Response::ok(format!("You took the {}", object.name));
    state.take_into_inventory(object_id);

    let key = interaction_key("take", object_id, None);
    dispatch_interaction(state, invocation.context, &key, response, ResponsePatch::none())
}

/// Move the object from the inventory into the indirect object, or into the
/// context when there is none.
pub fn drop(state: &mut GameState, invocation: &Invocation<'_>) -> Response {
    let Some(object_id) = invocation.action.object.as_ref() else {
        return Response::fail(invocation.config.cannot_do.clone());
    };
    let name = name_of(state, object_id);
    if !state.holds(object_id.as_str()) {
        return Response::fail(format!("You don't have a {name}"));
    }

    let iobject = invocation.action.iobject.as_ref();
    let destination_id = iobject.unwrap_or(invocation.context);
    let Some(destination) = state.get(destination_id) else {
        return Response::fail(invocation.config.cannot_do.clone());
    };
    if destination.is_openable() && !destination.is_open() {
        return Response::fail(format!("{} is closed.", destination.name));
    }
    if destination.items.len() >= destination.capacity || encloses(state, object_id, destination_id) {
        return Response::fail("There's no space to put that.");
    }

    state.place_into(object_id, destination_id);
    let response = Response::ok(format!("You dropped the {name}"));

    let key = interaction_key("drop", object_id, iobject);
    dispatch_interaction(state, destination_id, &key, response, ResponsePatch::none())
}

/// Whether `outer` is `inner` or one of the containers around it.
fn encloses(state: &GameState, outer: &ArtifactId, inner: &ArtifactId) -> bool {
    std::iter::successors(Some(inner), |id| state.get(*id).and_then(|a| a.container.as_ref()))
        .take(state.len() + 1)
        .any(|id| id == outer)
}

/// Set the target on fire with a lit indirect object.
pub fn light(state: &mut GameState, invocation: &Invocation<'_>) -> Response {
    let target_id = target(invocation);
    let Some(target) = state.get(target_id) else {
        return Response::fail(invocation.config.cannot_do.clone());
    };
    if !target.is_flammable() {
        return Response::ok("It doesn't burn.");
    }
    if target.is_lit() {
        return Response::ok("It's already on fire.");
    }

    let iobject = invocation.action.iobject.as_ref();
    let has_flame = iobject
        .and_then(|id| state.get(id))
        .is_some_and(Artifact::is_lit);
    if !has_flame {
        return Response::ok("There's no light to light it with.");
    }

    let response = Response::ok(format!("You lit the {} on fire", target.name));
    if let Some(target) = state.get_mut(target_id) {
        target.set_property(Property::Lit, true);
    }

    let key = interaction_key("burn", target_id, iobject);
    dispatch_interaction(state, invocation.context, &key, response, ResponsePatch::none())
}

/// Cutting only ever succeeds through a scripted interaction.
pub fn cut(state: &mut GameState, invocation: &Invocation<'_>) -> Response {
    let key = interaction_key("cut", target(invocation), invocation.action.iobject.as_ref());
    dispatch_interaction(
        state,
        invocation.context,
        &key,
        Response::fail("You can't cut that."),
        ResponsePatch::none(),
    )
}

/// Open the target.
pub(crate) fn open_target(
    state: &mut GameState,
    invocation: &Invocation<'_>,
    patch: ResponsePatch,
) -> Response {
    let target_id = target(invocation);
    let Some(target) = state.get(target_id) else {
        return Response::fail(invocation.config.cannot_do.clone());
    };
    let name = target.name.clone();

    if target.is_open() {
        return Response::fail(format!("{name} is already open."));
    }
    if target.is_locked() {
        return Response::fail(format!("{name} is locked."));
    }
    if !target.is_openable() {
        return Response::fail("You can't open that.");
    }

    if let Some(target) = state.get_mut(target_id) {
        target.set_open(true);
    }
    let key = interaction_key("open", target_id, None);
    dispatch_interaction(
        state,
        invocation.context,
        &key,
        Response::ok(format!("You opened the {name}")),
        patch,
    )
}

/// Close the target.
pub(crate) fn close_target(
    state: &mut GameState,
    invocation: &Invocation<'_>,
    patch: ResponsePatch,
) -> Response {
    let target_id = target(invocation);
    let Some(target) = state.get(target_id) else {
        return Response::fail(invocation.config.cannot_do.clone());
    };
    let name = target.name.clone();

    if !target.is_openable() {
        return Response::fail("You can't close that.");
    }
    if !target.is_open() {
        return Response::fail(format!("{name} is already closed."));
    }

    if let Some(target) = state.get_mut(target_id) {
        target.set_open(false);
    }
    let key = interaction_key("close", target_id, None);
    dispatch_interaction(
        state,
        invocation.context,
        &key,
        Response::ok(format!("You closed the {name}")),
        patch,
    )
}
