use std::path::Path;

use lantern_core::ArtifactKind;

pub fn run(world: &Path) -> Result<(), String> {
    let loaded = super::load_world(world)?;
    let state = &loaded.state;

    let count = |kind: ArtifactKind| state.iter().filter(|a| a.kind == kind).count();

    println!("  All checks passed for '{}'.", world.display());
    println!(
        "  {} areas, {} fixtures, {} items",
        count(ArtifactKind::Area),
        count(ArtifactKind::Fixture),
        count(ArtifactKind::Item)
    );
    println!(
        "  {} global interactions, {} state events, start area '{}'",
        state.interactions.len(),
        state.state_events.len(),
        loaded.start_area
    );

    Ok(())
}
