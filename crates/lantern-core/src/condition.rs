use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::artifact::ArtifactId;
use crate::error::CoreError;
use crate::property::Property;
use crate::state::GameState;
use crate::trigger::EventFlags;

/// An artifact attribute a state condition can inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// A boolean property.
    Property(Property),
    /// The directly contained items.
    Items,
    /// The directly contained fixtures.
    Fixtures,
}

impl FromStr for Attribute {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches('_').to_lowercase().as_str() {
            "items" => Ok(Self::Items),
            "fixtures" => Ok(Self::Fixtures),
            _ => s.parse().map(Self::Property),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(p) => write!(f, "{p}"),
            Self::Items => write!(f, "items"),
            Self::Fixtures => write!(f, "fixtures"),
        }
    }
}

/// The current or expected value of an [`Attribute`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A property value.
    Flag(bool),
    /// A containment list.
    Ids(Vec<ArtifactId>),
}

/// How an attribute is compared against an expected value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ExpectationRepr")]
pub enum Expectation {
    /// The attribute equals the value exactly.
    Equals(AttributeValue),
    /// The containment list holds every listed id.
    ContainsAll(Vec<ArtifactId>),
    /// The containment list holds at least one listed id.
    ContainsAny(Vec<ArtifactId>),
}

impl Expectation {
    /// Whether `actual` satisfies this expectation.
    pub fn holds(&self, actual: &AttributeValue) -> bool {
        match (self, actual) {
            (Self::Equals(expected), _) => expected == actual,
            (Self::ContainsAll(ids), AttributeValue::Ids(held)) => {
                ids.iter().all(|id| held.contains(id))
            }
            (Self::ContainsAny(ids), AttributeValue::Ids(held)) => {
                ids.iter().any(|id| held.contains(id))
            }
            _ => false,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExpectationRepr {
    Bare(bool),
    Tagged(TaggedExpectation),
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum TaggedExpectation {
    Equals(AttributeValue),
    ContainsAll(Vec<ArtifactId>),
    ContainsAny(Vec<ArtifactId>),
}

impl From<ExpectationRepr> for Expectation {
    fn from(repr: ExpectationRepr) -> Self {
        match repr {
            ExpectationRepr::Bare(value) => Self::Equals(AttributeValue::Flag(value)),
            ExpectationRepr::Tagged(TaggedExpectation::Equals(v)) => Self::Equals(v),
            ExpectationRepr::Tagged(TaggedExpectation::ContainsAll(ids)) => Self::ContainsAll(ids),
            ExpectationRepr::Tagged(TaggedExpectation::ContainsAny(ids)) => Self::ContainsAny(ids),
        }
    }
}

/// One per-artifact check inside a [`StateCondition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactExpectation {
    /// The artifact inspected.
    pub artifact: ArtifactId,
    /// The attribute read from it.
    pub attribute: Attribute,
    /// The comparison applied.
    pub expected: Expectation,
}

/// A conjunction of artifact attribute checks and flag checks.
///
/// An empty condition holds. Missing flags read as `false`; missing artifacts
/// fail the condition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateCondition {
    /// Attribute checks.
    pub artifacts: Vec<ArtifactExpectation>,
    /// Flag checks.
    pub events: EventFlags,
}

impl StateCondition {
    /// A condition that always holds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute check.
    pub fn expect(
        mut self,
        artifact: impl Into<ArtifactId>,
        attribute: Attribute,
        expected: Expectation,
    ) -> Self {
        self.artifacts.push(ArtifactExpectation {
            artifact: artifact.into(),
            attribute,
            expected,
        });
        self
    }

    /// Add a property equality check.
    pub fn expect_property(
        self,
        artifact: impl Into<ArtifactId>,
        property: Property,
        value: bool,
    ) -> Self {
        self.expect(
            artifact,
            Attribute::Property(property),
            Expectation::Equals(AttributeValue::Flag(value)),
        )
    }

    /// Add a flag check.
    pub fn expect_flag(mut self, name: impl Into<String>, value: bool) -> Self {
        self.events.set(name, value);
        self
    }

    /// Evaluate against the current state.
    pub fn holds(&self, state: &GameState) -> bool {
        let artifacts_hold = self.artifacts.iter().all(|check| {
            let Some(artifact) = state.get(&check.artifact) else {
                debug!(artifact = %check.artifact, "condition names an unknown artifact");
                return false;
            };
            check.expected.holds(&artifact.attribute(&check.attribute))
        });
        artifacts_hold
            && self
                .events
                .iter()
                .all(|(name, value)| state.flag(name).unwrap_or(false) == value)
    }
}

/// A named derived flag, recomputed from its condition after every turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEvent {
    /// The flag written.
    pub name: String,
    /// The condition it mirrors.
    pub condition: StateCondition,
}

impl StateEvent {
    /// Build a state event.
    pub fn new(name: impl Into<String>, condition: StateCondition) -> Self {
        Self {
            name: name.into(),
            condition,
        }
    }
}
