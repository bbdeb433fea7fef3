use std::collections::VecDeque;

use crate::content::MapArtifact;

use super::ValidationResult;

/// Strict-mode connectivity check: every walkable tile must be reachable
/// from every other through 4-connected walkable neighbors. Runs a
/// breadth-first flood-fill from one arbitrary walkable tile and compares
/// the reachable count against the total. A map with zero walkable tiles is
/// a hard failure, never vacuously valid.
pub fn check_connectivity(map: &MapArtifact, result: &mut ValidationResult) {
    let walkable: Vec<usize> = map
        .tiles
        .iter()
        .enumerate()
        .filter(|(_, tile)| tile.is_walkable())
        .map(|(index, _)| index)
        .collect();

    if walkable.is_empty() {
        result.add_error("map has no walkable tiles");
        return;
    }

    let mut visited = vec![false; map.tiles.len()];
    let mut queue = VecDeque::new();
    let start = walkable[0];
    visited[start] = true;
    queue.push_back(start);
    let mut reachable = 1usize;

    while let Some(index) = queue.pop_front() {
        let x = index % map.width;
        let y = index / map.width;
        let mut neighbors = [None; 4];
        if x > 0 {
            neighbors[0] = Some(index - 1);
        }
        if x + 1 < map.width {
            neighbors[1] = Some(index + 1);
        }
        if y > 0 {
            neighbors[2] = Some(index - map.width);
        }
        if y + 1 < map.height {
            neighbors[3] = Some(index + map.width);
        }
        for neighbor in neighbors.into_iter().flatten() {
            if !visited[neighbor] && map.tiles[neighbor].is_walkable() {
                visited[neighbor] = true;
                reachable += 1;
                queue.push_back(neighbor);
            }
        }
    }

    if reachable != walkable.len() {
        result.add_error(format!(
            "map is not fully connected: {reachable} of {} walkable tiles reachable",
            walkable.len()
        ));
    }
}
