pub mod check;
pub mod list;
pub mod play;
pub mod run;

use std::path::Path;

use lantern_core::{LoadedWorld, WorldDocument};
use lantern_engine::{EngineConfig, Session};

/// Load and validate a world document.
fn load_world(path: &Path) -> Result<LoadedWorld, String> {
    WorldDocument::from_path(path)
        .and_then(WorldDocument::into_state)
        .map_err(|e| e.to_string())
}

/// Start a session, applying the command-line overrides to the config.
fn start_session(path: &Path, victory_flag: Option<&str>) -> Result<Session, String> {
    let mut config = EngineConfig::new();
    if let Some(flag) = victory_flag {
        config = config.with_victory_flag(flag);
    }
    Ok(Session::new(load_world(path)?).with_config(config))
}

/// Whether the session has reached an end state.
fn is_over(session: &Session) -> bool {
    session.has_won() || session.has_quit()
}
