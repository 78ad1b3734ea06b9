use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::artifact::ArtifactId;
use crate::error::CoreError;
use crate::trigger::EventFlags;

/// Structural key of an interaction: verb, object, and an optional indirect
/// object.
///
/// Documents spell it `"verb__object"` or `"verb__object__iobject"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InteractionKey {
    /// Canonical verb.
    pub verb: String,
    /// Direct object id.
    pub object: ArtifactId,
    /// Indirect object id, for three-place verbs.
    pub iobject: Option<ArtifactId>,
}

impl InteractionKey {
    /// A two-place key.
    pub fn new(verb: impl Into<String>, object: impl Into<ArtifactId>) -> Self {
        Self {
            verb: verb.into(),
            object: object.into(),
            iobject: None,
        }
    }

    /// Attach an indirect object.
    pub fn with_iobject(mut self, iobject: impl Into<ArtifactId>) -> Self {
        self.iobject = Some(iobject.into());
        self
    }
}

impl FromStr for InteractionKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &str| CoreError::MalformedKey {
            key: s.to_string(),
            reason: reason.to_string(),
        };
        let parts: Vec<&str> = s.split("__").collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(malformed("empty key segment"));
        }
        match parts.as_slice() {
            [verb, object] => Ok(Self::new(verb.to_lowercase(), *object)),
            [verb, object, iobject] => {
                Ok(Self::new(verb.to_lowercase(), *object).with_iobject(*iobject))
            }
            _ => Err(malformed("expected verb__object or verb__object__iobject")),
        }
    }
}

impl fmt::Display for InteractionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}__{}", self.verb, self.object)?;
        if let Some(iobject) = &self.iobject {
            write!(f, "__{iobject}")?;
        }
        Ok(())
    }
}

fn default_repeatable() -> bool {
    true
}

/// A response template that replaces a handler's default outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Interaction {
    /// Message shown to the player.
    #[serde(default)]
    pub message: String,
    /// Flags written when the interaction fires.
    #[serde(default)]
    pub events: EventFlags,
    /// Area the player moves to.
    #[serde(default, alias = "new_state")]
    pub new_area: Option<ArtifactId>,
    /// Whether an item is consumed.
    #[serde(default)]
    pub consumed: bool,
    /// The consumed item.
    #[serde(default)]
    pub item: Option<ArtifactId>,
    /// Whether the interaction survives being matched.
    #[serde(default = "default_repeatable", alias = "is_repeatable")]
    pub repeatable: bool,
}

impl Interaction {
    /// A repeatable interaction with a message and nothing else.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            repeatable: true,
            ..Self::default()
        }
    }

    /// Set a flag when fired.
    pub fn with_event(mut self, name: impl Into<String>, value: bool) -> Self {
        self.events.set(name, value);
        self
    }

    /// Move the player when fired.
    pub fn with_new_area(mut self, area: impl Into<ArtifactId>) -> Self {
        self.new_area = Some(area.into());
        self
    }

    /// Consume `item` when fired.
    pub fn consuming(mut self, item: impl Into<ArtifactId>) -> Self {
        self.consumed = true;
        self.item = Some(item.into());
        self
    }

    /// Fire at most once.
    pub fn once(mut self) -> Self {
        self.repeatable = false;
        self
    }
}

/// A table of interactions, either local to an artifact or global.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionTable {
    entries: HashMap<InteractionKey, Interaction>,
}

impl InteractionTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an interaction.
    pub fn get(&self, key: &InteractionKey) -> Option<&Interaction> {
        self.entries.get(key)
    }

    /// Register an interaction, replacing any previous one under the key.
    pub fn insert(&mut self, key: InteractionKey, interaction: Interaction) {
        self.entries.insert(key, interaction);
    }

    /// Remove an interaction.
    pub fn remove(&mut self, key: &InteractionKey) -> Option<Interaction> {
        self.entries.remove(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&InteractionKey, &Interaction)> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&InteractionKey, &mut Interaction)> {
        self.entries.iter_mut()
    }
}
