use lantern_core::GameState;

use super::shared::{close_target, open_target};
use super::target;
use crate::action::{Response, ResponsePatch};
use crate::registry::Invocation;

/// Open the item. A matched interaction names the item as consumed.
pub fn open(state: &mut GameState, invocation: &Invocation<'_>) -> Response {
    let patch = ResponsePatch::item(target(invocation).clone());
    open_target(state, invocation, patch)
}

/// Close the item. A matched interaction names the item as consumed.
pub fn close(state: &mut GameState, invocation: &Invocation<'_>) -> Response {
    let patch = ResponsePatch::item(target(invocation).clone());
    close_target(state, invocation, patch)
}
