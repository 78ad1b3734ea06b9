//! Actions handed to handlers and the responses they return.

use lantern_core::{ArtifactId, EventFlags, Interaction};

use crate::verb::Verb;

/// A resolved player action: a verb plus resolved artifact ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The canonical verb.
    pub verb: Verb,
    /// Direct object.
    pub object: Option<ArtifactId>,
    /// Indirect object.
    pub iobject: Option<ArtifactId>,
    /// Set once an area has forwarded the action to a specific artifact.
    pub dispatched: bool,
}

impl Action {
    /// An action without objects.
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            object: None,
            iobject: None,
            dispatched: false,
        }
    }

    /// Set the direct object.
    pub fn with_object(mut self, object: impl Into<ArtifactId>) -> Self {
        self.object = Some(object.into());
        self
    }

    /// Set the indirect object.
    pub fn with_iobject(mut self, iobject: impl Into<ArtifactId>) -> Self {
        self.iobject = Some(iobject.into());
        self
    }

    pub(crate) fn forwarded(&self) -> Self {
        Self {
            dispatched: true,
            ..self.clone()
        }
    }

    pub(crate) fn without_object(&self) -> Self {
        Self {
            object: None,
            ..self.clone()
        }
    }
}

/// The outcome of an action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// Text shown to the player.
    pub message: String,
    /// Whether the action took effect. Delegation stops at the first success.
    pub success: bool,
    /// Flags to write once the turn's dispatch finishes.
    pub events: EventFlags,
    /// Area to move the player to.
    pub new_area: Option<ArtifactId>,
    /// Whether `item` is used up.
    pub consumed: bool,
    /// The consumed item.
    pub item: Option<ArtifactId>,
}

impl Response {
    /// A successful response.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
            ..Self::default()
        }
    }

    /// A failed response.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Move the player.
    pub fn with_new_area(mut self, area: ArtifactId) -> Self {
        self.new_area = Some(area);
        self
    }

    /// Raise a flag.
    pub fn with_event(mut self, name: impl Into<String>, value: bool) -> Self {
        self.events.set(name, value);
        self
    }
}

impl From<&Interaction> for Response {
    /// A matched interaction always succeeds.
    fn from(template: &Interaction) -> Self {
        Self {
            message: template.message.clone(),
            success: true,
            events: template.events.clone(),
            new_area: template.new_area.clone(),
            consumed: template.consumed,
            item: template.item.clone(),
        }
    }
}

/// Fields a handler forces onto a matched interaction's response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponsePatch {
    /// Replaces the template's consumed item.
    pub item: Option<ArtifactId>,
}

impl ResponsePatch {
    /// A patch that changes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// A patch naming the consumed item.
    pub fn item(item: ArtifactId) -> Self {
        Self { item: Some(item) }
    }

    /// Apply to a response.
    pub fn apply(self, response: &mut Response) {
        if let Some(item) = self.item {
            response.item = Some(item);
        }
    }
}
