//! Game sessions: the turn loop from player input to response text.

use std::fmt;
use std::path::Path;

use lantern_core::{ArtifactId, ArtifactKind, Direction, GameState, LoadedWorld, WorldDocument};
use tracing::{debug, info, warn};

use crate::action::{Action, Response};
use crate::config::EngineConfig;
use crate::delegate::Dispatcher;
use crate::error::{EngineError, EngineResult};
use crate::events::evaluate_state_events;
use crate::parser::{CommandParser, WordParser, resolve_name, suggest_names};
use crate::registry::Registries;
use crate::verb::Verb;

/// A single-player game session over a loaded world.
pub struct Session {
    state: GameState,
    current_area: ArtifactId,
    registries: Registries,
    parser: Box<dyn CommandParser>,
    config: EngineConfig,
    won: bool,
    last_unresolved: Option<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("current_area", &self.current_area)
            .field("artifacts", &self.state.len())
            .field("won", &self.won)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Start a session in the world's start area with the standard
    /// registries, the word parser and the default config.
    pub fn new(world: LoadedWorld) -> Self {
        let LoadedWorld { state, start_area } = world;
        Self {
            state,
            current_area: start_area,
            registries: Registries::standard(),
            parser: Box::new(WordParser),
            config: EngineConfig::default(),
            won: false,
            last_unresolved: None,
        }
    }

    /// Load a world from JSON text and start a session in it.
    pub fn from_json(text: &str) -> EngineResult<Self> {
        let world = WorldDocument::from_json(text)?.into_state()?;
        Ok(Self::new(world))
    }

    /// Load a world from a JSON file and start a session in it.
    pub fn from_path(path: &Path) -> EngineResult<Self> {
        let world = WorldDocument::from_path(path)?.into_state()?;
        Ok(Self::new(world))
    }

    /// Use a custom configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom parser.
    pub fn with_parser(mut self, parser: impl CommandParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Use custom registries.
    pub fn with_registries(mut self, registries: Registries) -> Self {
        self.registries = registries;
        self
    }

    /// Move the player to `area` before the first command.
    pub fn starting_in(mut self, area: impl Into<ArtifactId>) -> EngineResult<Self> {
        let area = area.into();
        match self.state.get(&area) {
            Some(a) if a.kind == ArtifactKind::Area => {
                self.state.visit(&area);
                self.current_area = area;
                Ok(self)
            }
            _ => Err(EngineError::InvalidStart(area)),
        }
    }

    /// The game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The area the player is in.
    pub fn current_area(&self) -> &ArtifactId {
        &self.current_area
    }

    /// The session configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether the victory flag has been raised.
    pub fn has_won(&self) -> bool {
        self.won
    }

    /// Whether the player asked to quit.
    pub fn has_quit(&self) -> bool {
        self.state.flag(&self.config.quit_flag) == Some(true)
    }

    /// The name that failed to resolve on the last turn, if any.
    pub fn last_unresolved(&self) -> Option<&str> {
        self.last_unresolved.as_deref()
    }

    /// Names in reach that look like `partial`, best match first.
    pub fn suggest(&self, partial: &str, limit: usize) -> Vec<String> {
        suggest_names(&self.state, &self.current_area, partial, limit)
    }

    /// The current area's description, without taking a turn.
    pub fn describe_current_area(&self) -> String {
        self.state
            .get(&self.current_area)
            .map(|area| area.describe(&self.state))
            .unwrap_or_default()
    }

    /// Run one command and return the text to show the player.
    pub fn run_command(&mut self, input: &str) -> String {
        self.last_unresolved = None;
        if self.won {
            return self.config.victory_message.clone();
        }

        let action = match self.build_action(input) {
            Ok(action) => action,
            Err(message) => return message,
        };

        let dispatcher = Dispatcher::new(&self.registries, &self.config);
        let response = dispatcher.handle(&mut self.state, &self.current_area, &action);
        info!(
            command = input.trim(),
            verb = %action.verb,
            success = response.success,
            "turn"
        );

        self.apply(&response);
        evaluate_state_events(&mut self.state);

        if self.state.flag(&self.config.victory_flag) == Some(true) {
            info!("victory");
            self.won = true;
            return self.config.victory_message.clone();
        }
        response.message
    }

    /// Turn raw input into an action with resolved ids, or the message to
    /// return instead.
    fn build_action(&mut self, input: &str) -> Result<Action, String> {
        let unknown = || self.config.unknown_command.clone();

        let first_word = input.split_whitespace().next().ok_or_else(unknown)?;
        if let Some(verb) = Verb::parse(first_word).filter(Verb::is_game) {
            return Ok(Action::new(verb));
        }

        let parsed = self.parser.parse(input);
        let Some(verb) = Verb::parse(&parsed.verb) else {
            debug!(verb = %parsed.verb, "unknown verb");
            return Err(unknown());
        };

        if verb == Verb::Go {
            let action = match Direction::parse(&parsed.object.to_lowercase()) {
                Some(direction) => Action::new(Verb::Move(direction)),
                None => Action::new(Verb::Go),
            };
            return Ok(action);
        }

        let mut action = Action::new(verb);
        action.object = self.resolve(&parsed.object)?;
        action.iobject = self.resolve(&parsed.iobject)?;
        Ok(action)
    }

    fn resolve(&mut self, name: &str) -> Result<Option<ArtifactId>, String> {
        if name.is_empty() {
            return Ok(None);
        }
        match resolve_name(&self.state, &self.current_area, name) {
            Some(id) => Ok(Some(id)),
            None => {
                self.last_unresolved = Some(name.to_string());
                Err(format!("I don't see any {name} here."))
            }
        }
    }

    /// Post-dispatch effects: flags, consumption, then movement.
    fn apply(&mut self, response: &Response) {
        self.state.record_events(&response.events);

        if response.consumed {
            match &response.item {
                Some(item) => self.consume(item),
                None => warn!("consuming response names no item"),
            }
        }

        if let Some(area) = &response.new_area {
            let is_area = self
                .state
                .get(area)
                .is_some_and(|a| a.kind == ArtifactKind::Area);
            if !is_area {
                warn!(to = %area, "response moves to something that is not an area; staying put");
                return;
            }
            debug!(from = %self.current_area, to = %area, "moving");
            self.current_area = area.clone();
            self.state.visit(area);
        }
    }

    /// Remove a consumed item from the inventory, else from the current
    /// area's items.
    fn consume(&mut self, item: &ArtifactId) {
        if self.state.holds(item.as_str()) {
            self.state.inventory.retain(|held| held != item);
        } else if let Some(area) = self
            .state
            .get_mut(&self.current_area)
            .filter(|area| area.items.contains(item))
        {
            area.items.retain(|child| child != item);
        } else {
            warn!(item = %item, "consumed item is neither held nor in the area");
            return;
        }
        if let Some(artifact) = self.state.get_mut(item) {
            artifact.container = None;
        }
        debug!(item = %item, "consumed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_core::{Artifact, Description, Interaction, InteractionKey};

    const WORLD: &str = r#"{
        "start_area": "cellar",
        "artifacts": [
            {"type": "area", "id": "cellar", "name": "Cellar",
             "description": "A cold cellar.",
             "fixtures": ["box", "chest"], "items": ["rope"],
             "exits": {"hall": "n"}},
            {"type": "area", "id": "hall", "name": "Hall",
             "description": "A bright hall.", "exits": {"cellar": "s"}},
            {"type": "fixture", "id": "box", "name": "Box",
             "description": "A wooden box.",
             "container_description": "A box sits in the corner.",
             "items": ["key"], "properties": {"openable": true},
             "interactions": {"turn__box": {"message": "The box spins."}}},
            {"type": "item", "id": "key", "name": "Key",
             "container_description": "A key lies inside."},
            {"type": "fixture", "id": "chest", "name": "Chest",
             "description": "A heavy chest.", "items": ["pouch"]},
            {"type": "item", "id": "pouch", "name": "Pouch", "items": ["coin"]},
            {"type": "item", "id": "coin", "name": "Coin"},
            {"type": "item", "id": "rope", "name": "Rope"}
        ],
        "game_state": {
            "interactions": {
                "turn__box": {"message": "Global spin."},
                "cut__chest": {"message": "You carve your initials.", "is_repeatable": false},
                "use__key__rope": {"message": "The rope frays away.", "consumed": true},
                "turn__chest": {"message": "A latch clicks.", "events": {"game_victory": true}}
            },
            "state_events": {
                "box_open": {"artifacts": {"box": {"is_open": true}}}
            }
        }
    }"#;

    fn session() -> Session {
        Session::from_json(WORLD).unwrap()
    }

    #[test]
    fn take_from_closed_box_then_open() {
        let mut session = session();
        let responses: Vec<String> = ["take key", "open box", "take key", "look box"]
            .into_iter()
            .map(|cmd| session.run_command(cmd))
            .collect();

        assert_eq!(responses[0], "You can't take that.");
        assert_eq!(responses[1], "You opened the Box");
        assert_eq!(responses[2], "You took the Key");
        assert_eq!(responses[3], "A wooden box.");
        assert!(session.state().holds("key"));
    }

    #[test]
    fn take_nested_two_levels_down() {
        let mut session = session();
        assert_eq!(session.run_command("take coin"), "You took the Coin");
        assert!(session.state().holds("coin"));
        assert!(session.state().get("pouch").unwrap().items.is_empty());
        assert_eq!(session.state().get("coin").unwrap().container, None);

        assert_eq!(session.run_command("take coin"), "You already have the Coin");
    }

    #[test]
    fn one_shot_interaction_falls_back_to_default() {
        let mut session = session();
        assert_eq!(session.run_command("cut chest"), "You carve your initials.");
        // The chest declines, so the area answers.
        assert_eq!(session.run_command("cut chest"), "You can't do that here.");
    }

    #[test]
    fn local_interaction_shadows_global() {
        let mut session = session();
        assert_eq!(session.run_command("rotate box"), "The box spins.");
    }

    #[test]
    fn state_events_follow_their_condition() {
        let mut session = session();
        session.run_command("open box");
        assert_eq!(session.state().flag("box_open"), Some(true));
        session.run_command("close box");
        assert_eq!(session.state().flag("box_open"), Some(false));
    }

    #[test]
    fn victory_is_final() {
        let mut session = session();
        assert_eq!(session.run_command("turn chest"), "You have won the game!");
        assert!(session.has_won());
        assert_eq!(session.run_command("look"), "You have won the game!");
        assert_eq!(session.run_command("dance"), "You have won the game!");
    }

    #[test]
    fn consumed_item_leaves_the_area() {
        let mut session = session();
        session.run_command("open box");
        session.run_command("take key");
        assert_eq!(session.run_command("use key on rope"), "The rope frays away.");
        assert!(!session.state().get("cellar").unwrap().items.contains(&ArtifactId::from("rope")));
        assert!(session.state().holds("key"));
    }

    #[test]
    fn movement() {
        let mut session = session();
        assert_eq!(session.run_command("go north"), "A bright hall.");
        assert_eq!(session.current_area().as_str(), "hall");
        assert_eq!(
            session.state().visited_areas,
            [ArtifactId::from("cellar"), ArtifactId::from("hall")]
        );
        assert_eq!(session.run_command("n"), "You can't go that way.");
        assert_eq!(session.run_command("go"), "You can't go that way.");
        assert_eq!(session.run_command("s"), "A cold cellar. A box sits in the corner.");
        assert_eq!(session.state().visited_areas.len(), 2);
    }

    #[test]
    fn unknown_input() {
        let mut session = session();
        assert_eq!(session.run_command(""), "I don't understand that command");
        assert_eq!(session.run_command("dance wildly"), "I don't understand that command");
        assert_eq!(session.run_command("take ghost"), "I don't see any ghost here.");
        assert_eq!(session.last_unresolved(), Some("ghost"));
        session.run_command("look");
        assert_eq!(session.last_unresolved(), None);
    }

    #[test]
    fn game_verbs_ignore_arguments() {
        let mut session = session();
        assert_eq!(session.run_command("inventory please"), "You have:\n");
        assert!(!session.has_quit());
        assert_eq!(session.run_command("quit now"), "Quitting...");
        assert!(session.has_quit());
    }

    #[test]
    fn inventory_item_wins_a_name_clash() {
        let world = r#"{
            "start_area": "hall",
            "artifacts": [
                {"type": "area", "id": "hall", "description": "Hall.", "items": ["floor-key"]},
                {"type": "item", "id": "floor-key", "name": "Key"},
                {"type": "item", "id": "pocket-key", "name": "Key"}
            ],
            "game_state": {"inventory": ["pocket-key"]}
        }"#;
        let mut session = Session::from_json(world).unwrap();
        assert_eq!(session.run_command("take key"), "You already have the Key");
        assert_eq!(session.run_command("drop key"), "You dropped the Key");
        assert!(!session.state().holds("pocket-key"));
    }

    #[test]
    fn moves_to_non_areas_leave_the_player_in_place() {
        let mut state = GameState::new();
        state
            .insert(
                Artifact::area("cellar", "Cellar")
                    .with_description(Description::new("A cold cellar."))
                    .with_fixture("lever"),
            )
            .unwrap();
        state.insert(Artifact::fixture("lever", "Lever")).unwrap();
        state.link_containers();
        state.visit(&ArtifactId::from("cellar"));
        state.interactions.insert(
            InteractionKey::new("turn", "lever"),
            Interaction::new("The floor tilts.").with_new_area("atlantis"),
        );
        state.interactions.insert(
            InteractionKey::new("cut", "lever"),
            Interaction::new("The lever snaps.").with_new_area("lever"),
        );
        let mut session = Session::new(LoadedWorld {
            state,
            start_area: ArtifactId::from("cellar"),
        });

        assert_eq!(session.run_command("turn lever"), "The floor tilts.");
        assert_eq!(session.run_command("cut lever"), "The lever snaps.");
        assert_eq!(session.current_area().as_str(), "cellar");
        assert_eq!(session.state().visited_areas, [ArtifactId::from("cellar")]);
        assert_eq!(session.run_command("look"), "A cold cellar.");
        assert_eq!(session.run_command("inventory"), "You have:\n");
    }

    #[test]
    fn starting_in_requires_an_area() {
        let session = session().starting_in("hall").unwrap();
        assert_eq!(session.current_area().as_str(), "hall");
        assert!(matches!(
            session.starting_in("key"),
            Err(EngineError::InvalidStart(id)) if id.as_str() == "key"
        ));
    }

    #[test]
    fn custom_config_changes_victory() {
        let mut session = session().with_config(
            EngineConfig::new()
                .with_victory_flag("box_open")
                .with_victory_message("Opened!"),
        );
        assert_eq!(session.run_command("open box"), "Opened!");
    }
}
