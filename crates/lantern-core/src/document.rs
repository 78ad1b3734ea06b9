//! The JSON world document and its conversion into a [`GameState`].
//!
//! Only structural problems abort loading: duplicate ids and a missing or
//! mistyped start area. Anything that affects a single key, property or
//! reference is logged with `warn!` and skipped.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::{info, warn};

use crate::artifact::{Artifact, ArtifactId, ArtifactKind, Direction};
use crate::condition::{Attribute, Expectation, StateCondition, StateEvent};
use crate::description::{Description, DescriptionOverride};
use crate::error::{CoreError, CoreResult};
use crate::interaction::{Interaction, InteractionKey, InteractionTable};
use crate::property::Property;
use crate::state::GameState;
use crate::trigger::{EventFlags, TriggerEffect, TriggerKey};

/// A parsed world document, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct WorldDocument {
    /// The area the player starts in.
    pub start_area: ArtifactId,
    /// Every artifact, in registry order. Records that do not parse are
    /// skipped with a warning.
    #[serde(default, deserialize_with = "lenient_records")]
    pub artifacts: Vec<ArtifactRecord>,
    /// Initial player-level state.
    #[serde(default)]
    pub game_state: GameStateRecord,
}

/// One artifact as written in the document.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactRecord {
    /// Artifact kind.
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    /// Unique id.
    pub id: ArtifactId,
    /// Display name; the id is used when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Description text.
    #[serde(default, alias = "description_")]
    pub description: DescriptionRecord,
    /// Directly contained items.
    #[serde(default, alias = "items_")]
    pub items: Vec<ArtifactId>,
    /// Directly contained fixtures.
    #[serde(default, alias = "fixtures_")]
    pub fixtures: Vec<ArtifactId>,
    /// Exits, as destination id to direction.
    #[serde(default, alias = "exits_")]
    pub exits: BTreeMap<ArtifactId, String>,
    /// Initial property values.
    #[serde(default)]
    pub properties: BTreeMap<String, bool>,
    /// Trigger table.
    #[serde(default)]
    pub triggers: BTreeMap<String, EffectsRecord>,
    /// Local interactions.
    #[serde(default)]
    pub interactions: BTreeMap<String, Interaction>,
    /// Rendering order of contents.
    #[serde(default)]
    pub display_order: Vec<ArtifactId>,
    /// Sentence shown in the container's description.
    #[serde(default)]
    pub container_description: String,
    /// Item capacity.
    #[serde(default)]
    pub capacity: Option<usize>,
}

/// A description, either plain text or a full record.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DescriptionRecord {
    /// Start text only.
    Text(String),
    /// Start, end, and trigger overrides.
    Full {
        /// Opening text.
        #[serde(default)]
        start: String,
        /// Closing text.
        #[serde(default)]
        end: String,
        /// Overrides keyed by trigger key.
        #[serde(default)]
        triggers: BTreeMap<String, DescriptionOverride>,
    },
}

impl Default for DescriptionRecord {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// Trigger effects, either as a map or as `[attribute, value]` pairs.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EffectsRecord {
    /// `{"is_accessible": true}`
    Map(BTreeMap<String, bool>),
    /// `[["is_accessible", true]]`
    Pairs(Vec<(String, bool)>),
}

/// Player-level state as written in the document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameStateRecord {
    /// Items held at the start.
    #[serde(default)]
    pub inventory: Vec<ArtifactId>,
    /// Flags set at the start.
    #[serde(default)]
    pub events: EventFlags,
    /// Global interactions.
    #[serde(default)]
    pub interactions: BTreeMap<String, Interaction>,
    /// Derived flags, in document order.
    #[serde(default, deserialize_with = "ordered_map")]
    pub state_events: Vec<(String, ConditionRecord)>,
}

/// A state-event condition as written in the document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConditionRecord {
    /// Artifact id to attribute name to expectation.
    #[serde(default)]
    pub artifacts: BTreeMap<ArtifactId, BTreeMap<String, Expectation>>,
    /// Flag expectations.
    #[serde(default)]
    pub events: EventFlags,
}

/// A validated world, ready to play.
#[derive(Debug, Clone)]
pub struct LoadedWorld {
    /// The game state.
    pub state: GameState,
    /// The starting area.
    pub start_area: ArtifactId,
}

impl WorldDocument {
    /// Parse a document from JSON text.
    pub fn from_json(text: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a document from disk.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Validate the document and build the game state.
    pub fn into_state(self) -> CoreResult<LoadedWorld> {
        let mut state = GameState::new();
        for record in self.artifacts {
            state.insert(record.into_artifact())?;
        }

        match state.get(&self.start_area) {
            None => return Err(CoreError::MissingStartArea(self.start_area)),
            Some(a) if a.kind != ArtifactKind::Area => {
                return Err(CoreError::NotAnArea {
                    id: self.start_area,
                    found: a.kind,
                });
            }
            Some(_) => {}
        }

        let record = self.game_state;
        state.inventory = record.inventory;
        state.interactions = interaction_table(record.interactions);
        state.state_events = record
            .state_events
            .into_iter()
            .map(|(name, condition)| StateEvent::new(name, condition.into_condition()))
            .collect();
        state.link_containers();
        state.record_events(&record.events);
        state.visit(&self.start_area);

        info!(
            artifacts = state.len(),
            start = %self.start_area,
            "world loaded"
        );
        Ok(LoadedWorld {
            state,
            start_area: self.start_area,
        })
    }
}

impl ArtifactRecord {
    fn into_artifact(self) -> Artifact {
        let name = self.name.unwrap_or_else(|| self.id.to_string());
        let mut artifact = Artifact::new(self.kind, self.id, name);

        artifact.description = match self.description {
            DescriptionRecord::Text(start) => Description::new(start),
            DescriptionRecord::Full {
                start,
                end,
                triggers,
            } => {
                let mut description = Description::new(start).with_end(end);
                for (raw, patch) in triggers {
                    match raw.parse::<TriggerKey>() {
                        Ok(key) => description = description.with_override(key, patch),
                        Err(e) => warn!(artifact = %artifact.id, "skipping description override: {e}"),
                    }
                }
                description
            }
        };

        artifact.items = self.items;
        artifact.fixtures = self.fixtures;
        artifact.display_order = self.display_order;
        artifact.container_description = self.container_description;
        if let Some(capacity) = self.capacity {
            artifact.capacity = capacity;
        }

        for (destination, raw) in self.exits {
            match Direction::parse(&raw) {
                Some(direction) if artifact.kind == ArtifactKind::Area => {
                    if let Some(previous) = artifact.exits.get(direction) {
                        warn!(
                            area = %artifact.id,
                            direction = direction.name(),
                            replaced = %previous,
                            by = %destination,
                            "two exits share a direction; the later one wins"
                        );
                    }
                    artifact.exits.set(direction, destination)
                }
                Some(_) => warn!(artifact = %artifact.id, "only areas have exits; skipping"),
                None => warn!(artifact = %artifact.id, direction = %raw, "unknown direction; skipping exit"),
            }
        }

        for (raw, value) in self.properties {
            match raw.parse::<Property>() {
                Ok(property) => artifact.load_property(property, value),
                Err(e) => warn!(artifact = %artifact.id, "skipping property: {e}"),
            }
        }

        for (raw, effects) in self.triggers {
            let key = match raw.parse::<TriggerKey>() {
                Ok(key) => key,
                Err(e) => {
                    warn!(artifact = %artifact.id, "skipping trigger: {e}");
                    continue;
                }
            };
            let pairs: Vec<(String, bool)> = match effects {
                EffectsRecord::Map(map) => map.into_iter().collect(),
                EffectsRecord::Pairs(pairs) => pairs,
            };
            for (attribute, value) in pairs {
                match attribute.parse::<Property>() {
                    Ok(property) => {
                        artifact
                            .triggers
                            .entry(key.clone())
                            .or_default()
                            .push(TriggerEffect::new(property, value));
                    }
                    Err(e) => warn!(artifact = %artifact.id, trigger = %key, "skipping effect: {e}"),
                }
            }
        }

        artifact.interactions = interaction_table(self.interactions);
        artifact
    }
}

impl ConditionRecord {
    fn into_condition(self) -> StateCondition {
        let mut condition = StateCondition::new();
        for (artifact, checks) in self.artifacts {
            for (raw, expected) in checks {
                match raw.parse::<Attribute>() {
                    Ok(attribute) => {
                        condition = condition.expect(artifact.clone(), attribute, expected);
                    }
                    Err(e) => warn!(artifact = %artifact, "skipping condition: {e}"),
                }
            }
        }
        condition.events = self.events;
        condition
    }
}

fn interaction_table(raw: BTreeMap<String, Interaction>) -> InteractionTable {
    let mut table = InteractionTable::new();
    for (key, interaction) in raw {
        match key.parse::<InteractionKey>() {
            Ok(key) => table.insert(key, interaction),
            Err(e) => warn!("skipping interaction: {e}"),
        }
    }
    table
}

/// Deserialize the artifact list one record at a time, skipping the ones
/// that do not parse.
fn lenient_records<'de, D>(deserializer: D) -> Result<Vec<ArtifactRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    let records = raw
        .into_iter()
        .enumerate()
        .filter_map(|(position, value)| {
            let id = value
                .get("id")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("<no id>")
                .to_string();
            match serde_json::from_value::<ArtifactRecord>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(position, artifact = %id, "skipping artifact record: {e}");
                    None
                }
            }
        })
        .collect();
    Ok(records)
}

/// Deserialize a JSON object into key/value pairs, keeping document order.
fn ordered_map<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct OrderedVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::new();
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(OrderedVisitor(PhantomData))
}
