//! Roguelike Simulation Core - Deterministic Primitives
//!
//! Deterministic simulation primitives for a tactical roguelike: a
//! splittable counter-based pseudo-random generator and a binary fixed-point
//! numeric type. Both guarantee bit-identical results across CPU
//! architectures, compilers, and platforms, which is required for save-game
//! replay and lockstep multiplayer.
//!
//! # Architecture
//!
//! - **fixed**: Binary fixed-point arithmetic (no floating point in the hot path)
//! - **rng**: Counter-based deterministic random number generation
//! - **sequence**: Deterministic sequence algorithms (shuffle, weighted select, partition)
//!
//! # Critical Invariants
//!
//! 1. Same root seed + same call sequence → same outputs, on every platform
//! 2. All randomness flows through the counter-based mixing function
//! 3. Forked generators never perturb their parent, and vice versa

// Module declarations
pub mod fixed;
pub mod rng;
pub mod sequence;

// Re-exports for convenience
pub use fixed::FixedPoint;
pub use rng::{
    context_hash, mix, DeterministicRandom, RandomError, RngManager, RngSnapshot, SnapshotError,
};
pub use sequence::{
    order_by_stable, order_by_stable_with, partition_deterministic, select_random,
    select_random_many, shuffle,
};
