//! Counter-based deterministic random number generation
//!
//! CRITICAL: All randomness in the simulation MUST go through this module.
//! Every draw mixes (root_seed, stream, counter, hashed context) through a
//! stateless avalanche function, so the whole run replays bit-identically
//! from one master seed.

mod deterministic;
mod error;
mod hash;
mod snapshot;

pub use deterministic::{DeterministicRandom, RngManager};
pub use error::RandomError;
pub use hash::{context_hash, mix};
pub use snapshot::{RngSnapshot, SnapshotError, SNAPSHOT_LEN};
