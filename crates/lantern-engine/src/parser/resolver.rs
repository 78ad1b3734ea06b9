//! Name resolution over what the player can currently reach.

use std::collections::VecDeque;

use lantern_core::{ArtifactId, GameState};
use strsim::jaro_winkler;
use tracing::debug;

use super::command::strip_article;

/// Minimum similarity for a name to be offered as a suggestion (0.0-1.0).
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Everything reachable from `area` in search order: the inventory, the
/// area's items, the area's fixtures, then their contents breadth-first.
pub fn scope(state: &GameState, area: &ArtifactId) -> Vec<ArtifactId> {
    let mut queue: VecDeque<ArtifactId> = state.inventory.iter().cloned().collect();
    if let Some(area) = state.get(area) {
        queue.extend(area.items.iter().cloned());
        queue.extend(area.fixtures.iter().cloned());
    }

    let mut order = Vec::new();
    while let Some(id) = queue.pop_front() {
        if order.contains(&id) {
            continue;
        }
        if let Some(artifact) = state.get(&id) {
            queue.extend(artifact.items.iter().cloned());
            queue.extend(artifact.fixtures.iter().cloned());
        }
        order.push(id);
    }
    order
}

fn normalize(name: &str) -> String {
    strip_article(name).to_lowercase()
}

/// Resolve a player-typed name to the first visible artifact in scope whose
/// name matches case-insensitively, ignoring a leading article.
pub fn resolve_name(state: &GameState, area: &ArtifactId, name: &str) -> Option<ArtifactId> {
    let wanted = normalize(name);
    if wanted.is_empty() {
        return None;
    }
    let found = scope(state, area).into_iter().find(|id| {
        state
            .get(id)
            .is_some_and(|a| a.is_visible() && normalize(&a.name) == wanted)
    });
    debug!(name, found = ?found, "resolved name");
    found
}

/// Names of visible artifacts in scope that look like `partial`, best first.
pub fn suggest_names(
    state: &GameState,
    area: &ArtifactId,
    partial: &str,
    limit: usize,
) -> Vec<String> {
    let wanted = normalize(partial);
    let mut suggestions: Vec<(String, f64)> = scope(state, area)
        .iter()
        .filter_map(|id| state.get(id))
        .filter(|a| a.is_visible())
        .filter_map(|a| {
            let name = normalize(&a.name);
            let score = if name.starts_with(&wanted) {
                2.0
            } else if name.contains(&wanted) {
                1.0
            } else {
                jaro_winkler(&wanted, &name)
            };
            (score >= SUGGESTION_THRESHOLD).then(|| (a.name.clone(), score))
        })
        .collect();

    suggestions.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    suggestions.dedup_by(|a, b| a.0 == b.0);
    suggestions
        .into_iter()
        .take(limit)
        .map(|(name, _)| name)
        .collect()
}


#[cfg(test)]
mod props {
    use super::*;
    use lantern_core::Artifact;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn held_copy_always_resolves_first(on_floor in 0usize..6, in_chest in 0usize..6) {
            let mut state = GameState::new();
            let mut hall = Artifact::area("hall", "Hall").with_fixture("chest");
            let mut chest = Artifact::fixture("chest", "Chest");
            for i in 0..on_floor {
                let id = format!("floor-{i}");
                hall = hall.with_item(id.as_str());
                state.insert(Artifact::item(id.as_str(), "Lamp")).unwrap();
            }
            for i in 0..in_chest {
                let id = format!("chest-{i}");
                chest = chest.with_item(id.as_str());
                state.insert(Artifact::item(id.as_str(), "lamp")).unwrap();
            }
            state.insert(hall).unwrap();
            state.insert(chest).unwrap();
            state.insert(Artifact::item("held", "LAMP")).unwrap();
            state.inventory.push(ArtifactId::from("held"));
            state.link_containers();

            let hall = ArtifactId::from("hall");
            prop_assert_eq!(resolve_name(&state, &hall, "a lamp"), Some(ArtifactId::from("held")));

            state.inventory.clear();
            let expected = if on_floor > 0 {
                Some(ArtifactId::from("floor-0"))
            } else if in_chest > 0 {
                Some(ArtifactId::from("chest-0"))
            } else {
                None
            };
            prop_assert_eq!(resolve_name(&state, &hall, "lamp"), expected);
        }
    }
}
