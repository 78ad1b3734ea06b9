use lantern_core::GameState;

use super::shared::{close_target, open_target};
use super::target;
use crate::action::{Response, ResponsePatch};
use crate::interaction::{dispatch_interaction, interaction_key};
use crate::registry::Invocation;

/// Open the fixture, or the fixture named as object.
pub fn open(state: &mut GameState, invocation: &Invocation<'_>) -> Response {
    open_target(state, invocation, ResponsePatch::none())
}

/// Close the fixture, or the fixture named as object.
pub fn close(state: &mut GameState, invocation: &Invocation<'_>) -> Response {
    close_target(state, invocation, ResponsePatch::none())
}

/// Turning only ever succeeds through a scripted interaction.
pub fn turn(state: &mut GameState, invocation: &Invocation<'_>) -> Response {
    let key = interaction_key("turn", target(invocation), None);
    dispatch_interaction(
        state,
        invocation.context,
        &key,
        Response::fail("You can't turn that."),
        ResponsePatch::none(),
    )
}
