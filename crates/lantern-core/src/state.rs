use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use tracing::{info, warn};

use crate::artifact::{Artifact, ArtifactId, ArtifactKind, Direction};
use crate::condition::StateEvent;
use crate::error::{CoreError, CoreResult};
use crate::interaction::{Interaction, InteractionKey, InteractionTable};
use crate::trigger::EventFlags;

/// The whole mutable world: every artifact plus player-level state.
///
/// Artifacts live in a single owning registry kept in load order; all other
/// references (containment, exits, inventory) are [`ArtifactId`]s resolved
/// through it.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    /// Item ids held by the player, in pickup order.
    pub inventory: Vec<ArtifactId>,
    /// Global interaction overrides, consulted after local tables.
    pub interactions: InteractionTable,
    /// Derived flags, evaluated in declaration order.
    pub state_events: Vec<StateEvent>,
    /// Areas the player has been in, oldest first, without repeats.
    pub visited_areas: Vec<ArtifactId>,
    artifacts: Vec<Artifact>,
    index: HashMap<ArtifactId, usize>,
    flags: EventFlags,
}

impl GameState {
    /// An empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an artifact. Ids must be unique.
    pub fn insert(&mut self, artifact: Artifact) -> CoreResult<()> {
        if self.index.contains_key(&artifact.id) {
            return Err(CoreError::DuplicateId(artifact.id));
        }
        self.index.insert(artifact.id.clone(), self.artifacts.len());
        self.artifacts.push(artifact);
        Ok(())
    }

    /// Look up an artifact.
    pub fn get<Q>(&self, id: &Q) -> Option<&Artifact>
    where
        ArtifactId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(id).map(|&i| &self.artifacts[i])
    }

    /// Look up an artifact for mutation.
    pub fn get_mut<Q>(&mut self, id: &Q) -> Option<&mut Artifact>
    where
        ArtifactId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(id).map(|&i| &mut self.artifacts[i])
    }

    /// Whether an artifact with this id exists.
    pub fn contains<Q>(&self, id: &Q) -> bool
    where
        ArtifactId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(id)
    }

    /// Iterate artifacts in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    /// Iterate ids in registry order.
    pub fn ids(&self) -> impl Iterator<Item = &ArtifactId> {
        self.artifacts.iter().map(|a| &a.id)
    }

    /// Number of artifacts.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Whether the world has no artifacts.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    // -----------------------------------------------------------------------
    // Flags
    // -----------------------------------------------------------------------

    /// Current value of a flag, if it was ever set.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flags.get(name)
    }

    /// Every flag set so far.
    pub fn flags(&self) -> &EventFlags {
        &self.flags
    }

    /// Write flags and propagate them as triggers over every artifact.
    pub fn record_events(&mut self, events: &EventFlags) {
        if events.is_empty() {
            return;
        }
        for (name, value) in events.iter() {
            if self.flags.set(name, value) != Some(value) {
                info!(flag = name, value, "flag changed");
            }
        }
        for artifact in &mut self.artifacts {
            artifact.apply_triggers(events);
        }
    }

    /// Write a single flag with trigger propagation.
    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.record_events(&EventFlags::single(name, value));
    }

    // -----------------------------------------------------------------------
    // Containment
    // -----------------------------------------------------------------------

    /// Validate references and rebuild every `container` back-reference.
    ///
    /// Unresolved ids in inventory, containment lists and exits are dropped.
    /// An artifact listed in more than one place keeps its first listing,
    /// with the inventory counted first. Exits and interaction moves that do
    /// not lead to an area are dropped too.
    pub fn link_containers(&mut self) {
        let index = &self.index;
        let areas: HashSet<ArtifactId> = self
            .artifacts
            .iter()
            .filter(|a| a.kind == ArtifactKind::Area)
            .map(|a| a.id.clone())
            .collect();
        let mut seen: HashSet<ArtifactId> = HashSet::new();

        self.inventory.retain(|id| {
            if !index.contains_key(id) {
                warn!(artifact = %id, "inventory names an unknown artifact; dropping");
                return false;
            }
            seen.insert(id.clone())
        });

        let mut links: Vec<(usize, ArtifactId)> = Vec::new();
        for artifact in &mut self.artifacts {
            let parent = artifact.id.clone();
            for list in [&mut artifact.fixtures, &mut artifact.items] {
                list.retain(|child| match index.get(child) {
                    None => {
                        warn!(container = %parent, artifact = %child, "unknown artifact; dropping");
                        false
                    }
                    Some(_) if *child == parent || !seen.insert(child.clone()) => {
                        warn!(container = %parent, artifact = %child, "artifact already placed; dropping");
                        false
                    }
                    Some(&i) => {
                        links.push((i, parent.clone()));
                        true
                    }
                });
            }
            for direction in Direction::ALL {
                let unresolved = artifact
                    .exits
                    .get(direction)
                    .is_some_and(|dest| !areas.contains(dest));
                if unresolved {
                    warn!(area = %parent, direction = direction.name(), "exit leads nowhere; dropping");
                    artifact.exits.clear(direction);
                }
            }
            for (key, interaction) in artifact.interactions.iter_mut() {
                drop_stray_move(&areas, key, interaction);
            }
        }
        for (key, interaction) in self.interactions.iter_mut() {
            drop_stray_move(&areas, key, interaction);
        }

        for artifact in &mut self.artifacts {
            artifact.container = None;
        }
        for (i, parent) in links {
            self.artifacts[i].container = Some(parent);
        }
    }

    /// Whether the player holds `id`.
    pub fn holds(&self, id: &str) -> bool {
        self.inventory.iter().any(|held| held.as_str() == id)
    }

    /// Remove `id` from wherever it sits: the inventory or its container's
    /// item list. Returns whether it was found.
    pub fn detach(&mut self, id: &ArtifactId) -> bool {
        let before = self.inventory.len();
        self.inventory.retain(|held| held != id);
        let mut found = self.inventory.len() != before;

        let container = self.get(id).and_then(|a| a.container.clone());
        if let Some(container) = container {
            if let Some(parent) = self.get_mut(&container) {
                let before = parent.items.len();
                parent.items.retain(|child| child != id);
                found |= parent.items.len() != before;
            }
        }
        if let Some(artifact) = self.get_mut(id) {
            artifact.container = None;
        }
        found
    }

    /// Move an item into the inventory.
    pub fn take_into_inventory(&mut self, id: &ArtifactId) {
        self.detach(id);
        self.inventory.push(id.clone());
    }

    /// Move an item into `destination`'s item list.
    pub fn place_into(&mut self, id: &ArtifactId, destination: &ArtifactId) {
        self.detach(id);
        if let Some(dest) = self.get_mut(destination) {
            dest.items.push(id.clone());
        }
        if let Some(artifact) = self.get_mut(id) {
            artifact.container = Some(destination.clone());
        }
    }

    /// Record a visit, ignoring repeats.
    pub fn visit(&mut self, area: &ArtifactId) {
        if !self.visited_areas.contains(area) {
            self.visited_areas.push(area.clone());
        }
    }
}

fn drop_stray_move(areas: &HashSet<ArtifactId>, key: &InteractionKey, interaction: &mut Interaction) {
    let stray = interaction
        .new_area
        .as_ref()
        .is_some_and(|area| !areas.contains(area));
    if stray {
        warn!(interaction = %key, area = ?interaction.new_area, "interaction moves to something that is not an area; dropping the move");
        interaction.new_area = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Property;
    use crate::trigger::{TriggerEffect, TriggerKey};

    fn id(s: &str) -> ArtifactId {
        ArtifactId::from(s)
    }

    fn world() -> GameState {
        let mut state = GameState::new();
        state
            .insert(Artifact::area("hall", "Hall").with_fixture("desk").with_item("pen"))
            .unwrap();
        state
            .insert(Artifact::fixture("desk", "Desk").with_item("note"))
            .unwrap();
        state.insert(Artifact::item("pen", "Pen")).unwrap();
        state.insert(Artifact::item("note", "Note")).unwrap();
        state.link_containers();
        state
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut state = GameState::new();
        state.insert(Artifact::item("pen", "Pen")).unwrap();
        let err = state.insert(Artifact::item("pen", "Other pen")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId(ref d) if d.as_str() == "pen"));
    }

    #[test]
    fn link_sets_back_references() {
        let state = world();
        assert_eq!(state.get("note").unwrap().container, Some(id("desk")));
        assert_eq!(state.get("desk").unwrap().container, Some(id("hall")));
        assert_eq!(state.get("hall").unwrap().container, None);
    }

    #[test]
    fn link_drops_unknown_and_repeated_ids() {
        let mut state = GameState::new();
        state
            .insert(
                Artifact::area("hall", "Hall")
                    .with_item("pen")
                    .with_item("ghost")
                    .with_exit(Direction::North, "nowhere"),
            )
            .unwrap();
        state
            .insert(Artifact::fixture("desk", "Desk").with_item("pen"))
            .unwrap();
        state.insert(Artifact::item("pen", "Pen")).unwrap();
        state.link_containers();

        assert_eq!(state.get("hall").unwrap().items, [id("pen")]);
        assert!(state.get("desk").unwrap().items.is_empty());
        assert!(state.get("hall").unwrap().exits.is_empty());
        assert_eq!(state.get("pen").unwrap().container, Some(id("hall")));
    }

    #[test]
    fn link_drops_moves_that_lead_nowhere() {
        let mut state = GameState::new();
        state
            .insert(
                Artifact::area("hall", "Hall")
                    .with_fixture("lever")
                    .with_exit(Direction::South, "lever"),
            )
            .unwrap();
        state
            .insert(Artifact::area("vault", "Vault"))
            .unwrap();
        state
            .insert(Artifact::fixture("lever", "Lever").with_interaction(
                InteractionKey::new("turn", "lever"),
                Interaction::new("Whoosh.").with_new_area("atlantis"),
            ))
            .unwrap();
        state.interactions.insert(
            InteractionKey::new("cut", "lever"),
            Interaction::new("Snap.").with_new_area("lever"),
        );
        state.interactions.insert(
            InteractionKey::new("use", "lever"),
            Interaction::new("Down you go.").with_new_area("vault"),
        );
        state.link_containers();

        let lever = state.get("lever").unwrap();
        let turn = lever.interactions.get(&InteractionKey::new("turn", "lever")).unwrap();
        assert_eq!(turn.message, "Whoosh.");
        assert_eq!(turn.new_area, None);
        let cut = state.interactions.get(&InteractionKey::new("cut", "lever")).unwrap();
        assert_eq!(cut.new_area, None);
        let used = state.interactions.get(&InteractionKey::new("use", "lever")).unwrap();
        assert_eq!(used.new_area, Some(id("vault")));
        assert!(state.get("hall").unwrap().exits.is_empty());
    }

    #[test]
    fn take_and_place_keep_single_location() {
        let mut state = world();
        state.take_into_inventory(&id("note"));
        assert!(state.holds("note"));
        assert!(state.get("desk").unwrap().items.is_empty());
        assert_eq!(state.get("note").unwrap().container, None);

        state.place_into(&id("note"), &id("hall"));
        assert!(!state.holds("note"));
        assert_eq!(state.get("hall").unwrap().items, [id("pen"), id("note")]);
        assert_eq!(state.get("note").unwrap().container, Some(id("hall")));
    }

    #[test]
    fn record_events_propagates_triggers() {
        let mut state = GameState::new();
        state
            .insert(
                Artifact::area("vault", "Vault")
                    .with_property(Property::Accessible, false)
                    .with_trigger(
                        TriggerKey::new("door_open", true),
                        TriggerEffect::new(Property::Accessible, true),
                    ),
            )
            .unwrap();

        state.set_flag("door_open", true);
        assert_eq!(state.flag("door_open"), Some(true));
        assert!(state.get("vault").unwrap().is_accessible());
    }

    #[test]
    fn visits_are_not_repeated() {
        let mut state = world();
        state.visit(&id("hall"));
        state.visit(&id("hall"));
        assert_eq!(state.visited_areas, [id("hall")]);
    }
}
