mod common;

use common::{build_coordinator, map_params, quest_params};

use procgen_core::{ContentCategory, SeedManager, create_sub_rng};
use rand::RngCore;

#[test]
fn same_session_seed_same_artifacts() {
    let a = build_coordinator(42)
        .generate("core", "room-carver", &map_params(7))
        .unwrap();
    let b = build_coordinator(42)
        .generate("core", "room-carver", &map_params(7))
        .unwrap();
    assert_eq!(a.content, b.content);
}

#[test]
fn different_session_seeds_diverge() {
    // Door placement is the only random draw; sample a few request seeds so
    // a single coincidental match cannot fail the test.
    let diverged = (0..10).any(|seed| {
        let a = build_coordinator(1)
            .generate("core", "room-carver", &map_params(seed))
            .unwrap();
        let b = build_coordinator(2)
            .generate("core", "room-carver", &map_params(seed))
            .unwrap();
        a.content != b.content
    });
    assert!(diverged);
}

#[test]
fn generation_order_does_not_change_results() {
    let forward = build_coordinator(42);
    let map_first = forward
        .generate("core", "room-carver", &map_params(7))
        .unwrap();
    let quest_second = forward
        .generate("core", "quest-scribe", &quest_params(7))
        .unwrap();

    let reversed = build_coordinator(42);
    let quest_first = reversed
        .generate("core", "quest-scribe", &quest_params(7))
        .unwrap();
    let map_second = reversed
        .generate("core", "room-carver", &map_params(7))
        .unwrap();

    assert_eq!(map_first.content, map_second.content);
    assert_eq!(quest_second.content, quest_first.content);
}

#[test]
fn snapshot_restores_bit_identical_derivations() {
    let manager = SeedManager::new(42);
    let original = manager.derive_context_seed(ContentCategory::Map, "overworld");
    manager.derive_context_seed(ContentCategory::Quest, "intro");

    let json = manager.snapshot_json().unwrap();
    let restored = SeedManager::restore_json(&json).unwrap();
    assert_eq!(
        restored.derive_context_seed(ContentCategory::Map, "overworld"),
        original
    );
    assert_eq!(restored.snapshot(), manager.snapshot());
}

#[test]
fn snapshot_survives_a_file_round_trip() {
    let manager = SeedManager::new(99);
    manager.derive_context_seed(ContentCategory::Faction, "ironpact");
    manager.derive_context_seed(ContentCategory::Item, "reward-loot");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seeds.json");
    std::fs::write(&path, manager.snapshot_json().unwrap()).unwrap();

    let loaded = std::fs::read_to_string(&path).unwrap();
    let restored = SeedManager::restore_json(&loaded).unwrap();
    assert_eq!(restored.snapshot(), manager.snapshot());
    assert_eq!(
        restored.derive_context_seed(ContentCategory::Faction, "ironpact"),
        manager.derive_context_seed(ContentCategory::Faction, "ironpact")
    );
}

#[test]
fn restored_coordinator_reproduces_content() {
    let original = build_coordinator(42);
    let first = original
        .generate("core", "room-carver", &map_params(7))
        .unwrap();

    let restored =
        procgen_core::GenerationCoordinator::from_seed_snapshot(original.save_seeds(), true);
    restored
        .register_generator("core", std::sync::Arc::new(common::RoomCarver))
        .unwrap();
    let second = restored
        .generate("core", "room-carver", &map_params(7))
        .unwrap();
    assert_eq!(first.content, second.content);
}

#[test]
fn sub_streams_fork_deterministically() {
    let manager = SeedManager::new(42);
    let parent = manager.create_rng(ContentCategory::Map, "overworld", &map_params(7));

    let mut left = parent.clone();
    let mut right = parent.clone();
    let mut child_a = create_sub_rng(&mut left, "layout");
    let mut child_b = create_sub_rng(&mut right, "layout");
    // Same parent state, same label: identical streams.
    let draws_a: Vec<u64> = (0..5).map(|_| child_a.next_u64()).collect();
    let draws_b: Vec<u64> = (0..5).map(|_| child_b.next_u64()).collect();
    assert_eq!(draws_a, draws_b);

    let mut other = parent.clone();
    let mut child_c = create_sub_rng(&mut other, "decor");
    // Same parent state, different label: diverges on the first draw.
    assert_ne!(draws_a[0], child_c.next_u64());
}
