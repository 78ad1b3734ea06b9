use std::fs;
use std::path::Path;

use tracing::info;

pub fn run(world: &Path, script: &Path, victory_flag: Option<&str>) -> Result<(), String> {
    let mut session = super::start_session(world, victory_flag)?;
    let text = fs::read_to_string(script)
        .map_err(|e| format!("cannot read script {}: {e}", script.display()))?;

    let commands: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    info!(script = %script.display(), commands = commands.len(), "running script");

    for command in commands {
        println!("> {command}");
        println!("{}", session.run_command(command));
        if super::is_over(&session) {
            break;
        }
    }
    Ok(())
}
