//! State-event evaluation: derived flags recomputed after every turn.

use lantern_core::GameState;
use tracing::debug;

/// Recompute every state event and write the results as flags.
///
/// All conditions are evaluated against the state as it was before the
/// pass, then every result is written, each write propagating triggers.
/// Flags therefore follow their conditions in both directions.
pub fn evaluate_state_events(state: &mut GameState) {
    let results: Vec<(String, bool)> = state
        .state_events
        .iter()
        .map(|event| (event.name.clone(), event.condition.holds(state)))
        .collect();

    for (name, value) in results {
        debug!(event = %name, value, "state event evaluated");
        state.set_flag(&name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_core::{
        Artifact, ArtifactId, Attribute, Expectation, Property, StateCondition, StateEvent,
        TriggerEffect, TriggerKey,
    };

    fn world() -> GameState {
        let mut state = GameState::new();
        state
            .insert(
                Artifact::fixture("chest", "Chest")
                    .with_property(Property::Openable, true)
                    .with_item("gem"),
            )
            .unwrap();
        state.insert(Artifact::item("gem", "Gem")).unwrap();
        state
            .insert(
                Artifact::fixture("beam", "Beam")
                    .with_property(Property::Visible, false)
                    .with_trigger(
                        TriggerKey::new("chest_open", true),
                        TriggerEffect::new(Property::Visible, true),
                    ),
            )
            .unwrap();
        state.link_containers();
        state.state_events.push(StateEvent::new(
            "chest_open",
            StateCondition::new().expect_property("chest", Property::Open, true),
        ));
        state
    }

    #[test]
    fn flags_follow_conditions_both_ways() {
        let mut state = world();
        evaluate_state_events(&mut state);
        assert_eq!(state.flag("chest_open"), Some(false));

        state.get_mut("chest").unwrap().set_open(true);
        evaluate_state_events(&mut state);
        assert_eq!(state.flag("chest_open"), Some(true));
        assert!(state.get("beam").unwrap().is_visible());

        state.get_mut("chest").unwrap().set_open(false);
        evaluate_state_events(&mut state);
        assert_eq!(state.flag("chest_open"), Some(false));
    }

    #[test]
    fn evaluation_reads_the_state_before_the_pass() {
        let mut state = world();
        state.state_events.insert(
            0,
            StateEvent::new("saw_chest_open", StateCondition::new().expect_flag("chest_open", true)),
        );
        state.get_mut("chest").unwrap().set_open(true);

        evaluate_state_events(&mut state);
        assert_eq!(state.flag("chest_open"), Some(true));
        assert_eq!(state.flag("saw_chest_open"), Some(false));

        evaluate_state_events(&mut state);
        assert_eq!(state.flag("saw_chest_open"), Some(true));
    }

    #[test]
    fn containment_expectations() {
        let mut state = world();
        state.state_events.push(StateEvent::new(
            "gem_in_chest",
            StateCondition::new().expect(
                "chest",
                Attribute::Items,
                Expectation::ContainsAll(vec![ArtifactId::from("gem")]),
            ),
        ));
        evaluate_state_events(&mut state);
        assert_eq!(state.flag("gem_in_chest"), Some(true));

        state.take_into_inventory(&ArtifactId::from("gem"));
        evaluate_state_events(&mut state);
        assert_eq!(state.flag("gem_in_chest"), Some(false));
    }
}
