//! Engine configuration.

/// Text shown by the `help` command.
pub const DEFAULT_HELP: &str = "Here are some commands you can use:\n\
go [direction]\n\
look\n\
take [item]\n\
drop [item]\n\
use [item] on/with etc. [thing/item]\n\
open [thing/item]\n\
close [thing/item]\n";

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Flag that ends the game in victory.
    pub victory_flag: String,
    /// Response returned once the victory flag is set.
    pub victory_message: String,
    /// Flag raised by the `quit` command.
    pub quit_flag: String,
    /// Response for input the parser cannot use.
    pub unknown_command: String,
    /// Response when no handler exists for a verb.
    pub cannot_do: String,
    /// Text shown by `help`.
    pub help_text: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            victory_flag: "game_victory".to_string(),
            victory_message: "You have won the game!".to_string(),
            quit_flag: "quit_game".to_string(),
            unknown_command: "I don't understand that command".to_string(),
            cannot_do: "You can't do that here.".to_string(),
            help_text: DEFAULT_HELP.to_string(),
        }
    }
}

impl EngineConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the victory flag name.
    pub fn with_victory_flag(mut self, flag: impl Into<String>) -> Self {
        self.victory_flag = flag.into();
        self
    }

    /// Set the victory message.
    pub fn with_victory_message(mut self, message: impl Into<String>) -> Self {
        self.victory_message = message.into();
        self
    }

    /// Set the quit flag name.
    pub fn with_quit_flag(mut self, flag: impl Into<String>) -> Self {
        self.quit_flag = flag.into();
        self
    }

    /// Set the unknown-command response.
    pub fn with_unknown_command(mut self, message: impl Into<String>) -> Self {
        self.unknown_command = message.into();
        self
    }

    /// Set the help text.
    pub fn with_help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }
}
