use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::property::Property;

/// Named boolean world flags (`box_open -> true`).
///
/// Ordered by name so that trigger propagation is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventFlags(BTreeMap<String, bool>);

impl EventFlags {
    /// An empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A flag set holding a single entry.
    pub fn single(name: impl Into<String>, value: bool) -> Self {
        let mut flags = Self::new();
        flags.set(name, value);
        flags
    }

    /// Look up a flag.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    /// Set a flag, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: bool) -> Option<bool> {
        self.0.insert(name.into(), value)
    }

    /// Whether no flags are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of flags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for EventFlags {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// The key a trigger fires on: a flag name together with the value it took.
///
/// Documents spell it `"<flag>__<value>"`, e.g. `"door_open__True"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerKey {
    /// The flag name.
    pub flag: String,
    /// The value the flag must take.
    pub value: bool,
}

impl TriggerKey {
    /// Build a key from its parts.
    pub fn new(flag: impl Into<String>, value: bool) -> Self {
        Self {
            flag: flag.into(),
            value,
        }
    }
}

impl FromStr for TriggerKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &str| CoreError::MalformedKey {
            key: s.to_string(),
            reason: reason.to_string(),
        };
        let (flag, value) = s
            .rsplit_once("__")
            .ok_or_else(|| malformed("expected <flag>__<value>"))?;
        if flag.is_empty() {
            return Err(malformed("empty flag name"));
        }
        let value = match value.to_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => return Err(malformed("value must be True or False")),
        };
        Ok(Self::new(flag, value))
    }
}

impl fmt::Display for TriggerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = if self.value { "True" } else { "False" };
        write!(f, "{}__{value}", self.flag)
    }
}

/// One attribute rewrite performed when a trigger fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEffect {
    /// The property to rewrite.
    pub attribute: Property,
    /// The value to write.
    pub value: bool,
}

impl TriggerEffect {
    /// Build an effect.
    pub fn new(attribute: Property, value: bool) -> Self {
        Self { attribute, value }
    }
}

/// An artifact's trigger table.
pub type TriggerTable = HashMap<TriggerKey, Vec<TriggerEffect>>;
