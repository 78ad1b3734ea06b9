use std::fmt;
use std::str::FromStr;

use crate::artifact::ArtifactKind;
use crate::error::CoreError;

/// A boolean property an artifact can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    /// Can be opened in principle.
    Openable,
    /// Currently open.
    Open,
    /// Currently locked. Never true while open.
    Locked,
    /// Shown in the containing artifact's description and resolvable by name.
    Visible,
    /// Can be reached (taken, entered).
    Accessible,
    /// Needs a light source to be looked at.
    Dark,
    /// Can be set on fire.
    Flammable,
    /// Currently burning; acts as a light source.
    Lit,
    /// Broken.
    Broken,
}

impl Property {
    /// Every property, in declaration order.
    pub const ALL: [Property; 9] = [
        Self::Openable,
        Self::Open,
        Self::Locked,
        Self::Visible,
        Self::Accessible,
        Self::Dark,
        Self::Flammable,
        Self::Lit,
        Self::Broken,
    ];

    /// The canonical snake_case name of the property.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Openable => "openable",
            Self::Open => "open",
            Self::Locked => "locked",
            Self::Visible => "visible",
            Self::Accessible => "accessible",
            Self::Dark => "dark",
            Self::Flammable => "flammable",
            Self::Lit => "lit",
            Self::Broken => "broken",
        }
    }
}

impl FromStr for Property {
    type Err = CoreError;

    /// Accepts both `open` and the document spelling `is_open`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let name = lower.strip_prefix("is_").unwrap_or(&lower);
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| CoreError::UnknownProperty(s.to_string()))
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The property bag of one artifact.
///
/// Values are read freely but only written through [`Artifact`] setters,
/// which enforce the open/locked invariants.
///
/// [`Artifact`]: crate::artifact::Artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Properties {
    values: [bool; 9],
}

impl Properties {
    /// Defaults for a freshly loaded artifact of the given kind.
    pub fn for_kind(kind: ArtifactKind) -> Self {
        let mut props = Self { values: [false; 9] };
        props.put(Property::Visible, true);
        props.put(Property::Accessible, kind != ArtifactKind::Fixture);
        props
    }

    /// Read a property.
    pub fn get(&self, property: Property) -> bool {
        self.values[property as usize]
    }

    pub(crate) fn put(&mut self, property: Property, value: bool) {
        self.values[property as usize] = value;
    }

    /// Iterate `(property, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Property, bool)> + '_ {
        Property::ALL.into_iter().map(|p| (p, self.get(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_is_prefix() {
        assert_eq!("is_open".parse::<Property>().unwrap(), Property::Open);
        assert_eq!("locked".parse::<Property>().unwrap(), Property::Locked);
        assert_eq!("IS_LIT".parse::<Property>().unwrap(), Property::Lit);
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!("is_haunted".parse::<Property>().is_err());
    }

    #[test]
    fn fixture_defaults_are_inaccessible() {
        let fixture = Properties::for_kind(ArtifactKind::Fixture);
        assert!(fixture.get(Property::Visible));
        assert!(!fixture.get(Property::Accessible));

        let item = Properties::for_kind(ArtifactKind::Item);
        assert!(item.get(Property::Accessible));
        assert!(!item.get(Property::Open));
    }
}
