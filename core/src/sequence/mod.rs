//! Deterministic sequence algorithms
//!
//! Stateless algorithms layered on the [`DeterministicRandom`] trait:
//! stable ordering, Fisher-Yates shuffling, uniform and without-replacement
//! selection, and RNG-free partitioning. Everything here is generic over the
//! trait, so tests can drive these functions with a scripted double.
//!
//! Iteration-order warning: callers must hand these functions sequences
//! whose order is itself deterministic (a Vec, never a HashMap iterator),
//! or replay breaks upstream of this module.

use crate::rng::{DeterministicRandom, RandomError};

/// Stable ordering by a derived key
///
/// Ties keep their original relative order (the sort is stable, so the
/// original index acts as the final tiebreaker). No RNG involvement.
///
/// # Example
/// ```
/// use roguelike_sim_core_rs::order_by_stable;
///
/// let sorted = order_by_stable(&[3, 1, 2], |n| *n);
/// assert_eq!(sorted, vec![1, 2, 3]);
/// ```
pub fn order_by_stable<T, K, F>(items: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| key(a).cmp(&key(b)));
    sorted
}

/// Stable ordering by a primary key, then a secondary key
///
/// Items equal under both keys keep their original relative order.
pub fn order_by_stable_with<T, K1, K2, F1, F2>(items: &[T], key: F1, secondary: F2) -> Vec<T>
where
    T: Clone,
    K1: Ord,
    K2: Ord,
    F1: Fn(&T) -> K1,
    F2: Fn(&T) -> K2,
{
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| key(a).cmp(&key(b)).then_with(|| secondary(a).cmp(&secondary(b))));
    sorted
}

/// Deterministic in-place Fisher-Yates shuffle
///
/// Walks from the end; the swap index for position `i` is drawn via
/// `next(i + 1, "{context}:{i}")`, so the permutation is fully determined
/// by the generator state and the context.
///
/// # Example
/// ```
/// use roguelike_sim_core_rs::{shuffle, RngManager};
///
/// let mut deck = vec![1, 2, 3, 4, 5, 6, 7, 8];
/// shuffle(&mut deck, &mut RngManager::new(7), "x").unwrap();
/// ```
pub fn shuffle<T, R>(items: &mut [T], random: &mut R, context: &str) -> Result<(), RandomError>
where
    R: DeterministicRandom,
{
    if context.trim().is_empty() {
        return Err(RandomError::InvalidArgument {
            reason: "context must not be empty or whitespace".to_string(),
        });
    }
    if items.len() > i32::MAX as usize {
        return Err(RandomError::InvalidArgument {
            reason: format!("sequence length {} exceeds i32::MAX", items.len()),
        });
    }
    for i in (1..items.len()).rev() {
        let j = random.next(i as i32 + 1, &format!("{}:{}", context, i))?;
        items.swap(i, j as usize);
    }
    Ok(())
}

/// Pick one item uniformly
///
/// Fails with [`RandomError::EmptyCollection`] on an empty source.
pub fn select_random<'a, T, R>(
    items: &'a [T],
    random: &mut R,
    context: &str,
) -> Result<&'a T, RandomError>
where
    R: DeterministicRandom,
{
    if items.is_empty() {
        return Err(RandomError::EmptyCollection);
    }
    if items.len() > i32::MAX as usize {
        return Err(RandomError::InvalidArgument {
            reason: format!("sequence length {} exceeds i32::MAX", items.len()),
        });
    }
    let index = random.next(items.len() as i32, context)?;
    Ok(&items[index as usize])
}

/// Pick `count` distinct items without replacement
///
/// Partial Fisher-Yates over an index buffer: only the first `count`
/// positions are settled, each via `next(remaining, "{context}:{i}")`.
/// Fails if `count < 0` or `count > items.len()`.
pub fn select_random_many<T, R>(
    items: &[T],
    count: i32,
    random: &mut R,
    context: &str,
) -> Result<Vec<T>, RandomError>
where
    T: Clone,
    R: DeterministicRandom,
{
    if context.trim().is_empty() {
        return Err(RandomError::InvalidArgument {
            reason: "context must not be empty or whitespace".to_string(),
        });
    }
    if count < 0 {
        return Err(RandomError::InvalidArgument {
            reason: format!("count must be non-negative, got {}", count),
        });
    }
    if count as usize > items.len() {
        return Err(RandomError::InvalidArgument {
            reason: format!(
                "cannot select {} items from a sequence of {}",
                count,
                items.len()
            ),
        });
    }
    if items.len() > i32::MAX as usize {
        return Err(RandomError::InvalidArgument {
            reason: format!("sequence length {} exceeds i32::MAX", items.len()),
        });
    }

    let mut indices: Vec<usize> = (0..items.len()).collect();
    let mut selected = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let remaining = (items.len() - i) as i32;
        let offset = random.next(remaining, &format!("{}:{}", context, i))?;
        indices.swap(i, i + offset as usize);
        selected.push(items[indices[i]].clone());
    }
    Ok(selected)
}

/// Split into `partition_count` buckets by original position
///
/// Bucket assignment is `index % partition_count` — purely a function of
/// sequence position, never the RNG — so partitioning is identical for
/// identical input regardless of generator state.
pub fn partition_deterministic<T, F, K>(
    items: &[T],
    partition_count: i32,
    key: F,
) -> Result<Vec<Vec<K>>, RandomError>
where
    F: Fn(&T) -> K,
{
    if partition_count <= 0 {
        return Err(RandomError::InvalidArgument {
            reason: format!("partition count must be positive, got {}", partition_count),
        });
    }
    let mut buckets: Vec<Vec<K>> = (0..partition_count).map(|_| Vec::new()).collect();
    for (index, item) in items.iter().enumerate() {
        buckets[index % partition_count as usize].push(key(item));
    }
    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngManager;

    #[test]
    fn test_order_by_stable_preserves_tie_order() {
        let items = [("b", 1), ("a", 1), ("c", 0)];
        let sorted = order_by_stable(&items, |(_, priority)| *priority);
        assert_eq!(sorted, vec![("c", 0), ("b", 1), ("a", 1)]);
    }

    #[test]
    fn test_shuffle_of_single_item_draws_nothing() {
        let mut rng = RngManager::new(1);
        let mut items = [42];
        shuffle(&mut items, &mut rng, "x").unwrap();
        assert_eq!(items, [42]);
        assert_eq!(rng.state(), 0);
    }

    #[test]
    fn test_select_random_many_bounds() {
        let mut rng = RngManager::new(1);
        let items = [1, 2, 3];
        assert!(select_random_many(&items, -1, &mut rng, "x").is_err());
        assert!(select_random_many(&items, 4, &mut rng, "x").is_err());
        assert_eq!(select_random_many(&items, 0, &mut rng, "x"), Ok(vec![]));
    }

    #[test]
    fn test_partition_round_robin() {
        let partitions = partition_deterministic(&[10, 20, 30, 40, 50], 2, |n| *n).unwrap();
        assert_eq!(partitions, vec![vec![10, 30, 50], vec![20, 40]]);
    }

    #[test]
    fn test_partition_rejects_non_positive_count() {
        assert!(partition_deterministic(&[1, 2], 0, |n| *n).is_err());
        assert!(partition_deterministic(&[1, 2], -3, |n| *n).is_err());
    }
}
