use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::condition::{Attribute, AttributeValue};
use crate::description::Description;
use crate::interaction::{Interaction, InteractionKey, InteractionTable};
use crate::property::{Properties, Property};
use crate::state::GameState;
use crate::trigger::{EventFlags, TriggerEffect, TriggerKey, TriggerTable};

/// Globally unique identifier of an artifact, as written in the world document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// Wrap an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ArtifactId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ArtifactId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ArtifactId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The kind of an artifact. Each kind has its own action registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// A location with directional exits.
    Area,
    /// A non-portable object: furniture, doors, pedestals.
    Fixture,
    /// A portable object that can be taken into the inventory.
    Item,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Area => write!(f, "area"),
            Self::Fixture => write!(f, "fixture"),
            Self::Item => write!(f, "item"),
        }
    }
}

/// A compass direction an area can be left by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// North.
    North,
    /// South.
    South,
    /// East.
    East,
    /// West.
    West,
}

impl Direction {
    /// All directions, in exit slot order.
    pub const ALL: [Direction; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Parse a direction from its full name or its initial.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "n" | "north" => Some(Self::North),
            "s" | "south" => Some(Self::South),
            "e" | "east" => Some(Self::East),
            "w" | "west" => Some(Self::West),
            _ => None,
        }
    }

    /// The display name of this direction.
    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

/// The four exit slots of an area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exits {
    slots: [Option<ArtifactId>; 4],
}

impl Exits {
    /// The destination in `direction`, if any.
    pub fn get(&self, direction: Direction) -> Option<&ArtifactId> {
        self.slots[direction as usize].as_ref()
    }

    /// Point the exit in `direction` at `destination`.
    pub fn set(&mut self, direction: Direction, destination: ArtifactId) {
        self.slots[direction as usize] = Some(destination);
    }

    /// Empty the exit in `direction`.
    pub fn clear(&mut self, direction: Direction) {
        self.slots[direction as usize] = None;
    }

    /// Iterate the occupied exits.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &ArtifactId)> {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.get(d).map(|id| (d, id)))
    }

    /// Whether no exit is set.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// Any addressable world entity: an area, a fixture, or an item.
///
/// Artifacts refer to each other only by [`ArtifactId`]; the [`GameState`]
/// owns every artifact.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Unique identifier.
    pub id: ArtifactId,
    /// The kind, which selects the action registry.
    pub kind: ArtifactKind,
    /// Display name, matched case-insensitively against player input.
    pub name: String,
    /// Description text.
    pub description: Description,
    /// Items directly contained, in containment order.
    pub items: Vec<ArtifactId>,
    /// Fixtures directly contained, in containment order.
    pub fixtures: Vec<ArtifactId>,
    /// The artifact directly containing this one.
    pub container: Option<ArtifactId>,
    /// Optional rendering order for contents.
    pub display_order: Vec<ArtifactId>,
    /// The sentence this artifact contributes to its container's description.
    pub container_description: String,
    /// Maximum number of items held at once.
    pub capacity: usize,
    /// Trigger table keyed by flag and value.
    pub triggers: TriggerTable,
    /// Local interaction overrides.
    pub interactions: InteractionTable,
    /// Exit slots; only areas use them.
    pub exits: Exits,
    properties: Properties,
}

/// Capacity used when a document does not declare one.
pub const DEFAULT_CAPACITY: usize = 100;

impl Artifact {
    /// Create an artifact with kind defaults and empty text.
    pub fn new(kind: ArtifactKind, id: impl Into<ArtifactId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            description: Description::default(),
            items: Vec::new(),
            fixtures: Vec::new(),
            container: None,
            display_order: Vec::new(),
            container_description: String::new(),
            capacity: DEFAULT_CAPACITY,
            triggers: TriggerTable::new(),
            interactions: InteractionTable::new(),
            exits: Exits::default(),
            properties: Properties::for_kind(kind),
        }
    }

    /// Create an area.
    pub fn area(id: impl Into<ArtifactId>, name: impl Into<String>) -> Self {
        Self::new(ArtifactKind::Area, id, name)
    }

    /// Create a fixture.
    pub fn fixture(id: impl Into<ArtifactId>, name: impl Into<String>) -> Self {
        Self::new(ArtifactKind::Fixture, id, name)
    }

    /// Create an item.
    pub fn item(id: impl Into<ArtifactId>, name: impl Into<String>) -> Self {
        Self::new(ArtifactKind::Item, id, name)
    }

    // -----------------------------------------------------------------------
    // Construction helpers
    // -----------------------------------------------------------------------

    /// Set the description.
    pub fn with_description(mut self, description: Description) -> Self {
        self.description = description;
        self
    }

    /// Set the sentence shown inside the container's description.
    pub fn with_container_description(mut self, text: impl Into<String>) -> Self {
        self.container_description = text.into();
        self
    }

    /// Append a contained item.
    pub fn with_item(mut self, id: impl Into<ArtifactId>) -> Self {
        self.items.push(id.into());
        self
    }

    /// Append a contained fixture.
    pub fn with_fixture(mut self, id: impl Into<ArtifactId>) -> Self {
        self.fixtures.push(id.into());
        self
    }

    /// Set the capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the initial value of a property, bypassing the play-time setters.
    ///
    /// Fixture accessibility stays fixed at `false`.
    pub fn with_property(mut self, property: Property, value: bool) -> Self {
        self.load_property(property, value);
        self
    }

    /// Register a trigger effect.
    pub fn with_trigger(mut self, key: TriggerKey, effect: TriggerEffect) -> Self {
        self.triggers.entry(key).or_default().push(effect);
        self
    }

    /// Register a local interaction.
    pub fn with_interaction(mut self, key: InteractionKey, interaction: Interaction) -> Self {
        self.interactions.insert(key, interaction);
        self
    }

    /// Point an exit at another area.
    pub fn with_exit(mut self, direction: Direction, destination: impl Into<ArtifactId>) -> Self {
        self.exits.set(direction, destination.into());
        self
    }

    /// Locked wins over open whichever is loaded first.
    pub(crate) fn load_property(&mut self, property: Property, value: bool) {
        if property == Property::Accessible && self.kind == ArtifactKind::Fixture && value {
            warn!(artifact = %self.id, "fixtures are never accessible; ignoring");
            return;
        }
        if property == Property::Open && value && self.is_locked() {
            warn!(artifact = %self.id, "cannot start open while locked; keeping it closed");
            return;
        }
        if property == Property::Locked && value && self.is_open() {
            warn!(artifact = %self.id, "cannot start open while locked; closing it");
            self.properties.put(Property::Open, false);
        }
        self.properties.put(property, value);
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    /// The full property bag.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Read one property.
    pub fn is(&self, property: Property) -> bool {
        self.properties.get(property)
    }

    /// Whether the artifact can be opened in principle.
    pub fn is_openable(&self) -> bool {
        self.is(Property::Openable)
    }

    /// Whether the artifact is open.
    pub fn is_open(&self) -> bool {
        self.is(Property::Open)
    }

    /// Whether the artifact is locked.
    pub fn is_locked(&self) -> bool {
        self.is(Property::Locked)
    }

    /// Whether the artifact is visible.
    pub fn is_visible(&self) -> bool {
        self.is(Property::Visible)
    }

    /// Whether the artifact is accessible.
    pub fn is_accessible(&self) -> bool {
        self.is(Property::Accessible)
    }

    /// Whether the artifact is dark.
    pub fn is_dark(&self) -> bool {
        self.is(Property::Dark)
    }

    /// Whether the artifact burns.
    pub fn is_flammable(&self) -> bool {
        self.is(Property::Flammable)
    }

    /// Whether the artifact is lit.
    pub fn is_lit(&self) -> bool {
        self.is(Property::Lit)
    }

    /// Whether the artifact is broken.
    pub fn is_broken(&self) -> bool {
        self.is(Property::Broken)
    }

    /// Open or close the artifact. Returns whether anything changed.
    ///
    /// Setting the current value is a no-op, and a locked artifact stays shut.
    pub fn set_open(&mut self, value: bool) -> bool {
        if self.is_open() == value {
            return false;
        }
        if value && self.is_locked() {
            warn!(artifact = %self.id, "refusing to open a locked artifact");
            return false;
        }
        self.properties.put(Property::Open, value);
        true
    }

    /// Unlock the artifact. Returns whether anything changed.
    ///
    /// Only clears the lock when the artifact is openable, closed, and
    /// locked. Locking is not supported.
    pub fn set_locked(&mut self, value: bool) -> bool {
        if value {
            debug!(artifact = %self.id, "lock requests are ignored");
            return false;
        }
        if self.is_openable() && !self.is_open() && self.is_locked() {
            self.properties.put(Property::Locked, false);
            return true;
        }
        false
    }

    /// Write a property through its setter. Returns whether anything changed.
    pub fn set_property(&mut self, property: Property, value: bool) -> bool {
        match property {
            Property::Open => self.set_open(value),
            Property::Locked => self.set_locked(value),
            Property::Accessible if self.kind == ArtifactKind::Fixture => {
                warn!(artifact = %self.id, "fixture accessibility is not settable");
                false
            }
            _ => {
                let changed = self.is(property) != value;
                self.properties.put(property, value);
                changed
            }
        }
    }

    // -----------------------------------------------------------------------
    // Containment and rendering
    // -----------------------------------------------------------------------

    /// Whether `id` is directly contained, as an item or a fixture.
    pub fn contains<Q>(&self, id: &Q) -> bool
    where
        ArtifactId: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.items
            .iter()
            .chain(self.fixtures.iter())
            .any(|c| Borrow::<Q>::borrow(c) == id)
    }

    /// Directly contained fixtures then items.
    pub fn contents(&self) -> impl Iterator<Item = &ArtifactId> {
        self.fixtures.iter().chain(self.items.iter())
    }

    /// Render the description against the current state.
    pub fn describe(&self, state: &GameState) -> String {
        self.description.render(self, state)
    }

    /// Current value of a condition attribute.
    pub fn attribute(&self, attribute: &Attribute) -> AttributeValue {
        match attribute {
            Attribute::Property(p) => AttributeValue::Flag(self.is(*p)),
            Attribute::Items => AttributeValue::Ids(self.items.clone()),
            Attribute::Fixtures => AttributeValue::Ids(self.fixtures.clone()),
        }
    }

    // -----------------------------------------------------------------------
    // Triggers
    // -----------------------------------------------------------------------

    /// Fire every trigger matching the given flags.
    ///
    /// Effects are written through the property setters, and only where the
    /// current value differs. Description overrides registered under the same
    /// key are installed as well.
    pub fn apply_triggers(&mut self, flags: &EventFlags) {
        for (name, value) in flags.iter() {
            let key = TriggerKey::new(name, value);
            if let Some(effects) = self.triggers.get(&key).cloned() {
                for effect in effects {
                    if self.is(effect.attribute) != effect.value {
                        debug!(
                            artifact = %self.id,
                            trigger = %key,
                            attribute = %effect.attribute,
                            value = effect.value,
                            "applying trigger"
                        );
                        self.set_property(effect.attribute, effect.value);
                    }
                }
            }
            self.description.install_override(&key);
        }
    }
}
