//! Deterministic RNG derivation: every actor (agent or scheduler) gets
//! its own `ChaCha8Rng` stream, split off a single run-level seed so a
//! run is fully reproducible yet no actor's draws perturb another's.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Reserved stream index for the scheduler's own shuffle RNG, kept
/// apart from every agent's index so reordering the agent population
/// never changes the shuffle sequence.
pub const SCHEDULER_STREAM: u64 = u64::MAX;

/// Derive the RNG stream for actor `stream_index` under `master_seed`.
///
/// Each stream gets a distinct 64-bit seed built by mixing the master
/// seed with the stream index through splitmix64 — cheap, and with no
/// cross-stream correlation for the small stream counts this simulator
/// uses (a few dozen agents plus the scheduler).
pub fn derive_rng(master_seed: u64, stream_index: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_seed(master_seed, stream_index))
}

/// The raw 64-bit seed [`derive_rng`] feeds to `ChaCha8Rng::seed_from_u64`.
/// Exposed separately so the driver can derive a fresh per-run master
/// seed with the same mixing function, rather than reaching for its own.
pub fn derive_seed(master_seed: u64, stream_index: u64) -> u64 {
    splitmix64(master_seed ^ stream_index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_and_index_reproduce_the_same_stream() {
        let mut a = derive_rng(42, 3);
        let mut b = derive_rng(42, 3);
        use rand::Rng;
        let draws_a: Vec<u32> = (0..10).map(|_| a.r#gen()).collect();
        let draws_b: Vec<u32> = (0..10).map(|_| b.r#gen()).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn distinct_stream_indices_diverge() {
        use rand::Rng;
        let mut a = derive_rng(42, 1);
        let mut b = derive_rng(42, 2);
        let draw_a: u64 = a.r#gen();
        let draw_b: u64 = b.r#gen();
        assert_ne!(draw_a, draw_b);
    }

    #[test]
    fn scheduler_stream_never_collides_with_a_small_agent_index() {
        assert_ne!(SCHEDULER_STREAM, 0);
        assert_ne!(SCHEDULER_STREAM, 1);
    }
}
