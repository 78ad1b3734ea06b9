use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use lantern_core::ArtifactKind;

const KINDS: [ArtifactKind; 3] = [ArtifactKind::Area, ArtifactKind::Fixture, ArtifactKind::Item];

pub fn run(world: &Path, kind: Option<&str>) -> Result<(), String> {
    let kind = kind
        .map(|name| {
            KINDS
                .into_iter()
                .find(|k| k.to_string().eq_ignore_ascii_case(name))
                .ok_or_else(|| format!("unknown kind '{name}' (expected area, fixture or item)"))
        })
        .transpose()?;

    let loaded = super::load_world(world)?;
    let state = &loaded.state;
    let artifacts: Vec<_> = state
        .iter()
        .filter(|a| kind.is_none_or(|k| a.kind == k))
        .collect();

    if artifacts.is_empty() {
        println!("  No artifacts found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Kind", "Container"]);

    for artifact in &artifacts {
        let container = match &artifact.container {
            Some(id) => id.to_string(),
            None if state.holds(artifact.id.as_str()) => "(inventory)".to_string(),
            None => "—".to_string(),
        };
        table.add_row(vec![
            artifact.id.to_string(),
            artifact.name.clone(),
            artifact.kind.to_string(),
            container,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} artifacts", artifacts.len());

    Ok(())
}
