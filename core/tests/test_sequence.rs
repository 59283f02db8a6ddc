//! Sequence algorithm tests
//!
//! Critical invariants tested:
//! - Shuffle is a deterministic bijection of the input multiset
//! - Without-replacement selection returns distinct items
//! - Partitioning depends only on sequence position, never the RNG
//! - Stable ordering keeps original order on ties
//! - The algorithms run against any DeterministicRandom implementation,
//!   including a scripted test double

use roguelike_sim_core_rs::{
    order_by_stable, order_by_stable_with, partition_deterministic, select_random,
    select_random_many, shuffle, DeterministicRandom, RandomError, RngManager,
};

// ============================================================================
// Shuffle
// ============================================================================

#[test]
fn test_scenario_shuffle_is_reproducible_bijection() {
    let original: Vec<i32> = (1..=8).collect();

    let mut first = original.clone();
    shuffle(&mut first, &mut RngManager::new(7), "x").unwrap();

    let mut second = original.clone();
    shuffle(&mut second, &mut RngManager::new(7), "x").unwrap();

    assert_eq!(first, second, "fresh generators with seed 7 must agree");

    let mut sorted = first.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, original, "shuffle must permute the input multiset");
}

#[test]
fn test_shuffle_differs_across_seeds() {
    let original: Vec<i32> = (1..=20).collect();
    let mut a = original.clone();
    let mut b = original.clone();
    shuffle(&mut a, &mut RngManager::new(1), "deck").unwrap();
    shuffle(&mut b, &mut RngManager::new(2), "deck").unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_shuffle_rejects_blank_context() {
    let mut items = [1, 2, 3];
    let result = shuffle(&mut items, &mut RngManager::new(1), "  ");
    assert!(matches!(result, Err(RandomError::InvalidArgument { .. })));
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_select_random_is_deterministic_and_in_bounds() {
    let items = ["goblin", "orc", "troll", "wraith"];
    let first = *select_random(&items, &mut RngManager::new(11), "spawn").unwrap();
    let second = *select_random(&items, &mut RngManager::new(11), "spawn").unwrap();
    assert_eq!(first, second);
    assert!(items.contains(&first));
}

#[test]
fn test_select_random_empty_source_fails() {
    let items: [i32; 0] = [];
    assert_eq!(
        select_random(&items, &mut RngManager::new(1), "spawn"),
        Err(RandomError::EmptyCollection)
    );
}

#[test]
fn test_select_random_many_returns_distinct_items() {
    let items: Vec<i32> = (0..50).collect();
    let mut rng = RngManager::new(23);
    let picked = select_random_many(&items, 10, &mut rng, "reward").unwrap();

    assert_eq!(picked.len(), 10);
    let mut deduped = picked.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(deduped.len(), 10, "selection must be without replacement");
    for item in &picked {
        assert!(items.contains(item));
    }
}

#[test]
fn test_select_random_many_full_count_is_permutation() {
    let items: Vec<i32> = (0..12).collect();
    let mut rng = RngManager::new(5);
    let mut picked = select_random_many(&items, 12, &mut rng, "all").unwrap();
    picked.sort_unstable();
    assert_eq!(picked, items);
}

#[test]
fn test_select_random_many_is_deterministic() {
    let items: Vec<i32> = (0..30).collect();
    let first = select_random_many(&items, 5, &mut RngManager::new(3), "m").unwrap();
    let second = select_random_many(&items, 5, &mut RngManager::new(3), "m").unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Partition
// ============================================================================

#[test]
fn test_partition_preserves_every_item() {
    let items: Vec<i32> = (0..17).collect();
    let partitions = partition_deterministic(&items, 4, |n| *n).unwrap();

    assert_eq!(partitions.len(), 4);
    let mut recombined: Vec<i32> = partitions.into_iter().flatten().collect();
    recombined.sort_unstable();
    assert_eq!(recombined, items);
}

#[test]
fn test_partition_ignores_rng_state() {
    // No RNG parameter exists; identical input must partition identically
    let items = ["a", "b", "c", "d", "e"];
    let first = partition_deterministic(&items, 2, |s| s.to_string()).unwrap();
    let second = partition_deterministic(&items, 2, |s| s.to_string()).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Stable ordering
// ============================================================================

#[test]
fn test_order_by_stable_uses_original_index_on_ties() {
    let encounters = [("wolf", 3), ("bat", 1), ("rat", 1), ("bear", 3)];
    let ordered = order_by_stable(&encounters, |(_, threat)| *threat);
    assert_eq!(
        ordered,
        vec![("bat", 1), ("rat", 1), ("wolf", 3), ("bear", 3)]
    );
}

#[test]
fn test_order_by_stable_with_secondary_key() {
    let units = [("c", 1, 9), ("a", 1, 2), ("b", 0, 5), ("d", 1, 2)];
    let ordered = order_by_stable_with(&units, |u| u.1, |u| u.2);
    // Secondary breaks the 1-threat tie; ("a") and ("d") tie fully and keep
    // original order
    assert_eq!(
        ordered,
        vec![("b", 0, 5), ("a", 1, 2), ("d", 1, 2), ("c", 1, 9)]
    );
}

// ============================================================================
// Trait substitution
// ============================================================================

/// Scripted double: replays a fixed list of draw values and records the
/// contexts it was asked for
struct ScriptedRandom {
    draws: Vec<i32>,
    cursor: usize,
    contexts: Vec<String>,
}

impl ScriptedRandom {
    fn new(draws: Vec<i32>) -> Self {
        Self {
            draws,
            cursor: 0,
            contexts: Vec::new(),
        }
    }
}

impl DeterministicRandom for ScriptedRandom {
    fn next(&mut self, max_exclusive: i32, context: &str) -> Result<i32, RandomError> {
        self.contexts.push(context.to_string());
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        Ok(value % max_exclusive)
    }

    fn range(&mut self, min: i32, max_exclusive: i32, context: &str) -> Result<i32, RandomError> {
        Ok(min + self.next(max_exclusive - min, context)?)
    }

    fn roll(
        &mut self,
        count: i32,
        sides: i32,
        modifier: i32,
        context: &str,
    ) -> Result<i32, RandomError> {
        let mut total = modifier;
        for die in 0..count {
            total += self.next(sides, &format!("{}:{}", context, die))? + 1;
        }
        Ok(total)
    }

    fn check(&mut self, percent: i32, context: &str) -> Result<bool, RandomError> {
        Ok(self.next(100, context)? < percent)
    }

    fn choose<T: Clone>(&mut self, weighted: &[(T, i32)], context: &str) -> Result<T, RandomError> {
        if weighted.is_empty() {
            return Err(RandomError::EmptyCollection);
        }
        let index = self.next(weighted.len() as i32, context)?;
        Ok(weighted[index as usize].0.clone())
    }

    fn fork(&self, _name: &str) -> Result<Self, RandomError> {
        Ok(Self::new(self.draws.clone()))
    }

    fn state(&self) -> u64 {
        self.cursor as u64
    }

    fn set_state(&mut self, state: u64) {
        self.cursor = state as usize;
    }

    fn root_seed(&self) -> u64 {
        0
    }

    fn stream(&self) -> u64 {
        1
    }
}

#[test]
fn test_shuffle_against_scripted_double() {
    // Every drawn swap index is 0: each step swaps position i with 0
    let mut scripted = ScriptedRandom::new(vec![0]);
    let mut items = ["a", "b", "c", "d"];
    shuffle(&mut items, &mut scripted, "x").unwrap();

    assert_eq!(items, ["b", "c", "d", "a"]);
    assert_eq!(scripted.contexts, vec!["x:3", "x:2", "x:1"]);
}

#[test]
fn test_select_random_many_against_scripted_double() {
    // Offset 0 every time selects the items in original order
    let mut scripted = ScriptedRandom::new(vec![0]);
    let items = [10, 20, 30];
    let picked = select_random_many(&items, 2, &mut scripted, "pick").unwrap();

    assert_eq!(picked, vec![10, 20]);
    assert_eq!(scripted.contexts, vec!["pick:0", "pick:1"]);
}
