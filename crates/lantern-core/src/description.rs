use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::artifact::{Artifact, ArtifactId};
use crate::state::GameState;
use crate::trigger::TriggerKey;

/// Replacement text installed when a trigger fires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DescriptionOverride {
    /// New start text, if any.
    #[serde(default)]
    pub start: Option<String>,
    /// New end text, if any.
    #[serde(default)]
    pub end: Option<String>,
}

/// The description of an artifact.
///
/// The rendered text is `start`, then the container descriptions of visible
/// contents, then `end`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    /// Opening text.
    pub start: String,
    /// Closing text.
    pub end: String,
    /// Text overrides keyed by the trigger that installs them.
    pub overrides: HashMap<TriggerKey, DescriptionOverride>,
}

impl Description {
    /// A description with only start text.
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            ..Self::default()
        }
    }

    /// Set the closing text.
    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = end.into();
        self
    }

    /// Register an override for a trigger key.
    pub fn with_override(mut self, key: TriggerKey, patch: DescriptionOverride) -> Self {
        self.overrides.insert(key, patch);
        self
    }

    /// Install the override registered under `key`, if there is one.
    ///
    /// Empty replacement strings leave the current text alone.
    pub fn install_override(&mut self, key: &TriggerKey) {
        let Some(patch) = self.overrides.get(key) else {
            return;
        };
        if let Some(start) = patch.start.as_deref().filter(|s| !s.is_empty()) {
            debug!(trigger = %key, "replacing description start");
            self.start = start.to_string();
        }
        if let Some(end) = patch.end.as_deref().filter(|s| !s.is_empty()) {
            debug!(trigger = %key, "replacing description end");
            self.end = end.to_string();
        }
    }

    /// Render the description of `context` against the current state.
    pub fn render(&self, context: &Artifact, state: &GameState) -> String {
        let middle = middle_text(context, state);
        format!("{} {} {}", self.start, middle, self.end)
            .trim()
            .to_string()
    }
}

fn middle_text(context: &Artifact, state: &GameState) -> String {
    let visible_blurb = |id: &ArtifactId| {
        state
            .get(id)
            .filter(|a| a.is_visible())
            .map(|a| a.container_description.as_str())
    };

    let parts: Vec<&str> = if context.display_order.is_empty() {
        context
            .fixtures
            .iter()
            .chain(context.items.iter())
            .filter_map(visible_blurb)
            .collect()
    } else {
        context
            .display_order
            .iter()
            .filter(|id| context.fixtures.contains(*id) || context.items.contains(*id))
            .filter_map(visible_blurb)
            .collect()
    };

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Property;

    fn world() -> GameState {
        let mut state = GameState::new();
        state
            .insert(
                Artifact::area("cellar", "Cellar")
                    .with_description(Description::new("A damp cellar.").with_end("Exits: NORTH."))
                    .with_fixture("shelf")
                    .with_item("lamp")
                    .with_item("coin"),
            )
            .unwrap();
        state
            .insert(Artifact::fixture("shelf", "Shelf").with_container_description("A shelf leans on the wall."))
            .unwrap();
        state
            .insert(Artifact::item("lamp", "Lamp").with_container_description("A LAMP sits here."))
            .unwrap();
        state
            .insert(
                Artifact::item("coin", "Coin")
                    .with_container_description("A COIN glints.")
                    .with_property(Property::Visible, false),
            )
            .unwrap();
        state.link_containers();
        state
    }

    #[test]
    fn renders_fixtures_then_visible_items() {
        let state = world();
        let cellar = state.get("cellar").unwrap();
        insta::assert_snapshot!(
            cellar.describe(&state),
            @"A damp cellar. A shelf leans on the wall. A LAMP sits here. Exits: NORTH."
        );
    }

    #[test]
    fn display_order_controls_sequence() {
        let mut state = world();
        state.get_mut("cellar").unwrap().display_order =
            vec![ArtifactId::from("lamp"), ArtifactId::from("shelf")];
        let cellar = state.get("cellar").unwrap();
        assert_eq!(
            cellar.describe(&state),
            "A damp cellar. A LAMP sits here. A shelf leans on the wall. Exits: NORTH."
        );
    }

    #[test]
    fn rendering_is_idempotent() {
        let state = world();
        let cellar = state.get("cellar").unwrap();
        assert_eq!(cellar.describe(&state), cellar.describe(&state));
    }

    #[test]
    fn empty_contents_keep_spacing_of_parts() {
        let mut state = GameState::new();
        state
            .insert(
                Artifact::area("hall", "Hall")
                    .with_description(Description::new("A hall.").with_end("Exits are WEST.")),
            )
            .unwrap();
        let hall = state.get("hall").unwrap();
        assert_eq!(hall.describe(&state), "A hall.  Exits are WEST.");
    }

    #[test]
    fn overrides_replace_start_and_end() {
        let key = TriggerKey::new("lamp_lit", true);
        let mut desc = Description::new("Dark.").with_override(
            key.clone(),
            DescriptionOverride {
                start: Some("Bright.".to_string()),
                end: Some(String::new()),
            },
        );
        desc.end = "Still here.".to_string();

        desc.install_override(&TriggerKey::new("lamp_lit", false));
        assert_eq!(desc.start, "Dark.");

        desc.install_override(&key);
        assert_eq!(desc.start, "Bright.");
        assert_eq!(desc.end, "Still here.");
    }
}
