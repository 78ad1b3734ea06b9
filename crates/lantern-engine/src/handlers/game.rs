use lantern_core::GameState;

use super::name_of;
use crate::action::Response;
use crate::registry::Invocation;

/// List the inventory, one name per line.
pub fn inventory(state: &mut GameState, _invocation: &Invocation<'_>) -> Response {
    let mut listing = String::from("You have:\n");
    for id in &state.inventory {
        listing.push_str(&name_of(state, id));
        listing.push('\n');
    }
    Response::ok(listing)
}

/// Show the configured help text.
pub fn help(_state: &mut GameState, invocation: &Invocation<'_>) -> Response {
    Response::ok(invocation.config.help_text.clone())
}

/// Raise the quit flag.
pub fn quit(_state: &mut GameState, invocation: &Invocation<'_>) -> Response {
    Response::ok("Quitting...").with_event(invocation.config.quit_flag.clone(), true)
}
