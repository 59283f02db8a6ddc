//! Stateful deterministic draw API
//!
//! [`RngManager`] is the concrete generator: `(root_seed, stream, counter)`
//! plus nothing else. Each draw advances the counter and runs the stateless
//! [`mix`] function over the triple and the hashed call-site context, so a
//! generator's entire future is determined by its three fields.
//!
//! Consumers (combat resolution, world generation, loot tables) depend on
//! the [`DeterministicRandom`] trait, never on `RngManager` directly, so
//! tests can substitute a recording or scripted double.

use serde::{Deserialize, Serialize};

use super::error::RandomError;
use super::hash::{context_hash, mix};

/// Contract for every consumer of simulation randomness
///
/// All fallible operations return a typed [`RandomError`], never panic.
/// A generator instance is not thread-safe; concurrency is achieved
/// exclusively through [`fork`](DeterministicRandom::fork), which yields an
/// independent child whose draws never perturb the parent.
pub trait DeterministicRandom: Sized {
    /// Uniform draw in `[0, max_exclusive)`
    fn next(&mut self, max_exclusive: i32, context: &str) -> Result<i32, RandomError>;

    /// Uniform draw in `[min, max_exclusive)`
    fn range(&mut self, min: i32, max_exclusive: i32, context: &str) -> Result<i32, RandomError>;

    /// Sum of `count` dice with `sides` faces, plus `modifier`
    fn roll(
        &mut self,
        count: i32,
        sides: i32,
        modifier: i32,
        context: &str,
    ) -> Result<i32, RandomError>;

    /// Percentage check: true with probability `percent / 100`
    fn check(&mut self, percent: i32, context: &str) -> Result<bool, RandomError>;

    /// Weighted pick: selection probability proportional to weight
    fn choose<T: Clone>(&mut self, weighted: &[(T, i32)], context: &str) -> Result<T, RandomError>;

    /// Derive an independent child generator from `(root_seed, name)`
    fn fork(&self, name: &str) -> Result<Self, RandomError>;

    /// Current draw counter, for save/replay
    fn state(&self) -> u64;

    /// Rewind or advance the draw counter; root seed and stream are unchanged
    fn set_state(&mut self, state: u64);

    /// Master seed shared by this generator and everything forked from it
    fn root_seed(&self) -> u64;

    /// Odd stream id selecting this generator's parallel sequence
    fn stream(&self) -> u64;
}

/// Counter-based deterministic random number generator
///
/// # Example
/// ```
/// use roguelike_sim_core_rs::{DeterministicRandom, RngManager};
///
/// let mut rng = RngManager::new(12345);
/// let value = rng.next(100, "loot").unwrap();
/// assert!((0..100).contains(&value));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Master seed, fixed at construction
    root_seed: u64,
    /// Stream id, fixed at construction, always odd
    stream: u64,
    /// Draws consumed so far; the only mutable field
    counter: u64,
}

impl RngManager {
    /// Create a generator on the default stream (1)
    ///
    /// # Example
    /// ```
    /// use roguelike_sim_core_rs::RngManager;
    ///
    /// let rng = RngManager::new(12345);
    /// ```
    pub fn new(root_seed: u64) -> Self {
        Self::with_stream(root_seed, 1)
    }

    /// Create a generator on a specific stream
    ///
    /// The stream is forced odd (and therefore nonzero) via `stream | 1`,
    /// the PCG multi-stream convention.
    pub fn with_stream(root_seed: u64, stream: u64) -> Self {
        Self {
            root_seed,
            stream: stream | 1,
            counter: 0,
        }
    }
}

/// Reject `context` values that carry no information
fn validated_context_hash(context: &str) -> Result<u64, RandomError> {
    if context.trim().is_empty() {
        return Err(RandomError::invalid("context must not be empty or whitespace"));
    }
    Ok(context_hash(context))
}

impl DeterministicRandom for RngManager {
    /// Uniform draw in `[0, max_exclusive)` via rejection sampling
    ///
    /// Draws at or above the largest multiple of `max_exclusive` that fits
    /// in a u64 are discarded, eliminating modulo bias. Each attempt,
    /// accepted or rejected, advances the counter once; expected attempts
    /// per draw are below 2.
    ///
    /// # Example
    /// ```
    /// use roguelike_sim_core_rs::{DeterministicRandom, RngManager};
    ///
    /// let mut rng = RngManager::new(42);
    /// let roll = rng.next(6, "initiative").unwrap();
    /// assert!((0..6).contains(&roll));
    /// ```
    fn next(&mut self, max_exclusive: i32, context: &str) -> Result<i32, RandomError> {
        if max_exclusive <= 0 {
            return Err(RandomError::invalid(format!(
                "max_exclusive must be positive, got {}",
                max_exclusive
            )));
        }
        let ctx = validated_context_hash(context)?;

        let bound = max_exclusive as u64;
        let limit = u64::MAX - (u64::MAX % bound);
        loop {
            self.counter = self.counter.wrapping_add(1);
            let raw = mix(self.root_seed, self.stream, self.counter, ctx);
            if raw < limit {
                return Ok((raw % bound) as i32);
            }
        }
    }

    /// Uniform draw in `[min, max_exclusive)`
    ///
    /// Fails if `min >= max_exclusive`, or if the span exceeds `i32::MAX`.
    fn range(&mut self, min: i32, max_exclusive: i32, context: &str) -> Result<i32, RandomError> {
        let span = i64::from(max_exclusive) - i64::from(min);
        if span <= 0 {
            return Err(RandomError::invalid(format!(
                "range requires min < max_exclusive, got [{}, {})",
                min, max_exclusive
            )));
        }
        if span > i64::from(i32::MAX) {
            return Err(RandomError::invalid(format!(
                "range span {} exceeds i32::MAX",
                span
            )));
        }
        Ok(min + self.next(span as i32, context)?)
    }

    /// Dice roll: sum of `count` draws of `[1, sides]` plus `modifier`
    ///
    /// Each die uses the sub-context `"{context}:{i}"`, keeping dice
    /// independent of each other while the whole call stays reproducible
    /// from `(state, context)`.
    ///
    /// The total accumulates in i64; a total outside i32 range is an
    /// `InvalidArgument`, never an overflow.
    ///
    /// # Example
    /// ```
    /// use roguelike_sim_core_rs::{DeterministicRandom, RngManager};
    ///
    /// let mut rng = RngManager::new(42);
    /// let total = rng.roll(3, 6, 2, "atk").unwrap(); // 3d6+2
    /// assert!((5..=20).contains(&total));
    /// ```
    fn roll(
        &mut self,
        count: i32,
        sides: i32,
        modifier: i32,
        context: &str,
    ) -> Result<i32, RandomError> {
        if count < 0 {
            return Err(RandomError::invalid(format!(
                "dice count must be non-negative, got {}",
                count
            )));
        }
        if sides <= 0 {
            return Err(RandomError::invalid(format!(
                "dice must have at least one side, got {}",
                sides
            )));
        }
        validated_context_hash(context)?;

        // Worst case is count * sides + modifier, about 2^62; i64 holds it
        let mut total = i64::from(modifier);
        for die in 0..count {
            total += i64::from(self.next(sides, &format!("{}:{}", context, die))?) + 1;
        }
        i32::try_from(total).map_err(|_| {
            RandomError::invalid(format!("roll total {} does not fit in i32", total))
        })
    }

    /// Percentage check
    ///
    /// `percent` must be in `[0, 100]`. The endpoints are unconditional and
    /// consume no draw: 0 never succeeds, 100 always succeeds.
    fn check(&mut self, percent: i32, context: &str) -> Result<bool, RandomError> {
        if !(0..=100).contains(&percent) {
            return Err(RandomError::invalid(format!(
                "percent must be in [0, 100], got {}",
                percent
            )));
        }
        validated_context_hash(context)?;

        match percent {
            0 => Ok(false),
            100 => Ok(true),
            _ => Ok(self.next(100, context)? < percent),
        }
    }

    /// Weighted pick over `(item, weight)` pairs
    ///
    /// # Example
    /// ```
    /// use roguelike_sim_core_rs::{DeterministicRandom, RngManager};
    ///
    /// let loot = [("sword", 1), ("potion", 3)];
    /// let mut rng = RngManager::new(7);
    /// let drop = rng.choose(&loot, "drop").unwrap();
    /// assert!(drop == "sword" || drop == "potion");
    /// ```
    fn choose<T: Clone>(&mut self, weighted: &[(T, i32)], context: &str) -> Result<T, RandomError> {
        if weighted.is_empty() {
            return Err(RandomError::EmptyCollection);
        }
        let mut total: i64 = 0;
        for (index, (_, weight)) in weighted.iter().enumerate() {
            if *weight <= 0 {
                return Err(RandomError::invalid(format!(
                    "weight at index {} must be positive, got {}",
                    index, weight
                )));
            }
            total += i64::from(*weight);
        }
        if total > i64::from(i32::MAX) {
            return Err(RandomError::invalid(format!(
                "total weight {} exceeds i32::MAX",
                total
            )));
        }

        let draw = i64::from(self.next(total as i32, context)?);
        let mut cumulative: i64 = 0;
        for (item, weight) in weighted {
            cumulative += i64::from(*weight);
            if draw < cumulative {
                return Ok(item.clone());
            }
        }
        // draw < total and the cumulative sum reaches total
        unreachable!("weighted draw exceeded total weight")
    }

    /// Derive an independent child generator
    ///
    /// The child's stream depends only on `(root_seed, name)` — not on the
    /// parent's own stream or counter — so the same fork name from the same
    /// master seed always yields the identical child, anywhere in the run.
    /// Child and parent counters are disjoint; drawing from one never
    /// advances the other.
    ///
    /// # Example
    /// ```
    /// use roguelike_sim_core_rs::{DeterministicRandom, RngManager};
    ///
    /// let combat = RngManager::new(1).fork("combat").unwrap();
    /// let again = RngManager::new(1).fork("combat").unwrap();
    /// assert_eq!(combat.stream(), again.stream());
    /// ```
    fn fork(&self, name: &str) -> Result<Self, RandomError> {
        if name.trim().is_empty() {
            return Err(RandomError::invalid("fork name must not be empty or whitespace"));
        }
        let derived = mix(self.root_seed, context_hash(&format!("fork:{}", name)), 0, 0);
        Ok(Self {
            root_seed: self.root_seed,
            stream: derived | 1,
            counter: 0,
        })
    }

    fn state(&self) -> u64 {
        self.counter
    }

    /// Overwrite the counter only, enabling exact replay of subsequent
    /// draws that use identical contexts
    fn set_state(&mut self, state: u64) {
        self.counter = state;
    }

    fn root_seed(&self) -> u64 {
        self.root_seed
    }

    fn stream(&self) -> u64 {
        self.stream
    }
}
