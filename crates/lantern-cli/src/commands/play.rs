use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use lantern_engine::Session;

const SUGGESTIONS: usize = 3;

pub fn run(world: &Path, victory_flag: Option<&str>) -> Result<(), String> {
    let mut session = super::start_session(world, victory_flag)?;

    println!("{}", session.describe_current_area());
    println!("{}", "(type \"help\" for commands, Ctrl-D to leave)".dimmed());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} ", ">".cyan().bold());
        io::stdout().flush().map_err(|e| e.to_string())?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.map_err(|e| format!("failed to read input: {e}"))?;
        let command = line.trim();
        if command.is_empty() {
            continue;
        }

        println!("{}", session.run_command(command));
        print_hint(&session);

        if super::is_over(&session) {
            break;
        }
    }

    if session.has_won() {
        println!("{}", "Thanks for playing!".green().bold());
    }
    Ok(())
}

fn print_hint(session: &Session) {
    let Some(name) = session.last_unresolved() else {
        return;
    };
    let suggestions = session.suggest(name, SUGGESTIONS);
    if !suggestions.is_empty() {
        println!("{}", format!("Did you mean: {}?", suggestions.join(", ")).dimmed());
    }
}
