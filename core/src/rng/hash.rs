//! Counter-based mixing primitive
//!
//! Stateless 64-bit avalanche hash in the SplitMix64 family. The generator
//! never keeps evolving hidden state; each draw is `mix(root_seed, stream,
//! counter, context_hash)`, which is what makes replay from a saved counter
//! trivial and makes the functions safe to call from any thread.
//!
//! # Determinism
//!
//! Pure integer arithmetic with fixed constants. Same inputs → same output
//! on every CPU architecture, compiler, and platform. This is CRITICAL for:
//! - Save-game replay (reproduce the exact simulation)
//! - Lockstep multiplayer (all peers compute identical draws)
//! - Testing (verify behavior)

/// Weyl increment, 2^64 / phi (SplitMix64 stream constant)
const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 finalizer multipliers
const MIX_MUL_1: u64 = 0xBF58_476D_1CE4_E5B9;
const MIX_MUL_2: u64 = 0x94D0_49BB_1331_11EB;

/// FNV-1a 64-bit parameters
const FNV_OFFSET_BASIS: u64 = 0xCBF2_9CE4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;

/// Mix `(root_seed, stream, counter, context_hash)` into a uniform u64
///
/// Combines the four inputs with odd-constant multiplies, then runs the
/// SplitMix64 finalizer. Flipping any single input bit changes roughly half
/// the output bits.
///
/// # Example
/// ```
/// use roguelike_sim_core_rs::mix;
///
/// let a = mix(1, 1, 0, 0);
/// let b = mix(1, 1, 1, 0);
/// assert_ne!(a, b);
/// assert_eq!(a, mix(1, 1, 0, 0));
/// ```
#[inline]
pub fn mix(root_seed: u64, stream: u64, counter: u64, context_hash: u64) -> u64 {
    let mut x = root_seed;
    x = x.wrapping_add(stream.wrapping_mul(GOLDEN_GAMMA));
    x = x.wrapping_add(counter.wrapping_mul(MIX_MUL_1));
    x ^= context_hash.wrapping_mul(MIX_MUL_2);

    // SplitMix64 finalizer
    x ^= x >> 30;
    x = x.wrapping_mul(MIX_MUL_1);
    x ^= x >> 27;
    x = x.wrapping_mul(MIX_MUL_2);
    x ^= x >> 31;
    x
}

/// FNV-1a 64-bit hash over the UTF-8 bytes of `context`
///
/// Identical on every platform; used as the domain-separation input to
/// [`mix`], never merely logged.
#[inline]
pub fn context_hash(context: &str) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in context.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_is_pure() {
        for counter in 0..100 {
            assert_eq!(
                mix(12345, 1, counter, 777),
                mix(12345, 1, counter, 777),
                "mix must be a pure function"
            );
        }
    }

    #[test]
    fn test_context_hash_known_vectors() {
        // Published FNV-1a 64 test vectors
        assert_eq!(context_hash(""), 0xCBF2_9CE4_8422_2325);
        assert_eq!(context_hash("a"), 0xAF63_DC4C_8601_EC8C);
    }

    #[test]
    fn test_context_hash_distinguishes_contexts() {
        assert_ne!(context_hash("attack"), context_hash("defend"));
        assert_ne!(context_hash("loot:0"), context_hash("loot:1"));
    }

    #[test]
    fn test_avalanche_on_every_counter_bit() {
        // Flipping any single counter bit should flip ~32 of 64 output bits
        // on average. Averaged over 64 bit positions x 128 base counters,
        // the mean is tightly concentrated around 32.
        let mut total_flipped = 0u64;
        let mut samples = 0u64;
        for base in 0..128u64 {
            let reference = mix(42, 1, base, 0);
            for bit in 0..64 {
                let perturbed = mix(42, 1, base ^ (1 << bit), 0);
                total_flipped += (reference ^ perturbed).count_ones() as u64;
                samples += 1;
            }
        }
        let mean = total_flipped as f64 / samples as f64;
        assert!(
            (30.0..=34.0).contains(&mean),
            "avalanche mean {} outside [30, 34]",
            mean
        );
    }

    #[test]
    fn test_uniformity_chi_square_small_moduli() {
        // Enumerate counters and bucket mix() mod m; the chi-square statistic
        // should stay well below the 99.9% critical value for m-1 degrees of
        // freedom.
        for m in [3u64, 5, 7, 11] {
            let draws = 20_000u64;
            let mut buckets = vec![0u64; m as usize];
            for counter in 0..draws {
                buckets[(mix(9001, 1, counter, 0) % m) as usize] += 1;
            }
            let expected = draws as f64 / m as f64;
            let chi2: f64 = buckets
                .iter()
                .map(|&observed| {
                    let delta = observed as f64 - expected;
                    delta * delta / expected
                })
                .sum();
            let df = (m - 1) as f64;
            let threshold = df + 4.0 * (2.0 * df).sqrt() + 10.0;
            assert!(
                chi2 < threshold,
                "chi-square {} >= {} for modulus {}",
                chi2,
                threshold,
                m
            );
        }
    }
}
