//! The verb vocabulary and its classes.

use std::fmt;

use lantern_core::Direction;

/// A canonical verb. Aliases such as `get` or `ignite` parse to their
/// canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Describe the context.
    Look,
    /// Pick up an item.
    Take,
    /// Put an item down or into something.
    Drop,
    /// Use an item on something.
    Use,
    /// Open something.
    Open,
    /// Close something.
    Close,
    /// Set something on fire.
    Light,
    /// Cut something.
    Cut,
    /// Turn something.
    Turn,
    /// Walk in a direction.
    Move(Direction),
    /// `go` without a usable direction.
    Go,
    /// List the inventory.
    Inventory,
    /// Show help.
    Help,
    /// Leave the game.
    Quit,
}

const ALIASES: &[(&str, Verb)] = &[
    ("look", Verb::Look),
    ("take", Verb::Take),
    ("get", Verb::Take),
    ("drop", Verb::Drop),
    ("put", Verb::Drop),
    ("use", Verb::Use),
    ("open", Verb::Open),
    ("close", Verb::Close),
    ("light", Verb::Light),
    ("burn", Verb::Light),
    ("ignite", Verb::Light),
    ("cut", Verb::Cut),
    ("slice", Verb::Cut),
    ("saw", Verb::Cut),
    ("turn", Verb::Turn),
    ("rotate", Verb::Turn),
    ("go", Verb::Go),
    ("inventory", Verb::Inventory),
    ("help", Verb::Help),
    ("quit", Verb::Quit),
];

impl Verb {
    /// Every canonical verb.
    pub const ALL: [Verb; 17] = [
        Self::Look,
        Self::Take,
        Self::Drop,
        Self::Use,
        Self::Open,
        Self::Close,
        Self::Light,
        Self::Cut,
        Self::Turn,
        Self::Move(Direction::North),
        Self::Move(Direction::South),
        Self::Move(Direction::East),
        Self::Move(Direction::West),
        Self::Go,
        Self::Inventory,
        Self::Help,
        Self::Quit,
    ];

    /// Parse a verb or one of its aliases, case-insensitively.
    pub fn parse(word: &str) -> Option<Self> {
        let word = word.trim().to_lowercase();
        if let Some(direction) = Direction::parse(&word) {
            return Some(Self::Move(direction));
        }
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == word)
            .map(|(_, verb)| *verb)
    }

    /// The canonical spelling, as used in interaction keys.
    pub fn canonical(&self) -> &'static str {
        match self {
            Self::Look => "look",
            Self::Take => "take",
            Self::Drop => "drop",
            Self::Use => "use",
            Self::Open => "open",
            Self::Close => "close",
            Self::Light => "light",
            Self::Cut => "cut",
            Self::Turn => "turn",
            Self::Move(Direction::North) => "n",
            Self::Move(Direction::South) => "s",
            Self::Move(Direction::East) => "e",
            Self::Move(Direction::West) => "w",
            Self::Go => "go",
            Self::Inventory => "inventory",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }

    /// Verbs handled by the game registry rather than any artifact.
    pub fn is_game(&self) -> bool {
        matches!(self, Self::Inventory | Self::Help | Self::Quit)
    }

    /// Verbs the item registry implements for delegation purposes.
    pub fn is_item_verb(&self) -> bool {
        matches!(
            self,
            Self::Look | Self::Open | Self::Close | Self::Take | Self::Cut
        )
    }

    /// Verbs the fixture registry implements for delegation purposes.
    pub fn is_fixture_verb(&self) -> bool {
        matches!(
            self,
            Self::Look | Self::Open | Self::Close | Self::Light | Self::Cut | Self::Turn
        )
    }

    /// Whether a container may forward this verb to something it holds.
    pub fn is_delegatable(&self) -> bool {
        self.is_item_verb() || self.is_fixture_verb()
    }

    /// Verbs that take no direct object.
    pub fn is_intransitive(&self) -> bool {
        matches!(
            self,
            Self::Look | Self::Move(_) | Self::Go | Self::Quit | Self::Inventory | Self::Help
        )
    }

    /// Whether the verb needs a direct object.
    pub fn requires_object(&self) -> bool {
        !self.is_intransitive()
    }

    /// Verbs whose interaction key includes the indirect object.
    pub fn is_three_place(&self) -> bool {
        matches!(self, Self::Use | Self::Light | Self::Cut | Self::Drop)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}
