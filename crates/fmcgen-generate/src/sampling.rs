//! Randomization helpers shared by the generators.

use std::net::Ipv4Addr;

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use fmcgen_core::Ipv4Prefix;

const MIN_PREFIX_LEN: u8 = 16;
const MAX_PREFIX_LEN: u8 = 28;

/// Independent RNG for one pipeline stage, derived from the run seed.
pub fn stage_rng(seed: u64, stage: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(hash_seed(seed, stage))
}

fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

/// `<kind>_<index>`, the naming scheme of every generated record.
pub fn sequential_name(kind: &str, index: usize) -> String {
    format!("{kind}_{index}")
}

/// Uniform pick from a non-empty constant table.
pub fn pick<T: Copy>(values: &[T], rng: &mut impl Rng) -> T {
    values[rng.random_range(0..values.len())]
}

/// `amount` distinct names, or the whole pool (in order) when it is smaller.
pub fn sample_or_all(pool: &[String], amount: usize, rng: &mut impl Rng) -> Vec<String> {
    if pool.len() < amount {
        return pool.to_vec();
    }
    pool.choose_multiple(rng, amount).cloned().collect()
}

/// With probability `probability`, between 1 and `max` distinct names from
/// `pool`. An empty pool never draws from the RNG.
pub fn maybe_sample(
    pool: &[String],
    probability: f64,
    max: usize,
    rng: &mut impl Rng,
) -> Option<Vec<String>> {
    if pool.is_empty() || !rng.random_bool(probability) {
        return None;
    }
    let amount = rng.random_range(1..=max.min(pool.len()));
    Some(pool.choose_multiple(rng, amount).cloned().collect())
}

/// A host address in `10.0.0.0/8`, never `.0` or `.255` in the last octet.
pub fn random_host_ip(rng: &mut impl Rng) -> Ipv4Addr {
    Ipv4Addr::new(
        10,
        rng.random_range(0..=255),
        rng.random_range(0..=255),
        rng.random_range(1..=254),
    )
}

/// A network prefix in `10.0.0.0/8` with a /16../28 mask.
pub fn random_prefix(rng: &mut impl Rng) -> Ipv4Prefix {
    let prefix_len = rng.random_range(MIN_PREFIX_LEN..=MAX_PREFIX_LEN);
    let address = Ipv4Addr::new(
        10,
        rng.random_range(0..=255),
        rng.random_range(0..=255),
        rng.random_range(0..=255),
    );
    Ipv4Prefix::masked(address, prefix_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(count: usize) -> Vec<String> {
        (1..=count).map(|i| sequential_name("host", i)).collect()
    }

    #[test]
    fn stage_rngs_differ_per_stage_and_repeat_per_seed() {
        let a: u64 = stage_rng(7, "hosts").random();
        let b: u64 = stage_rng(7, "hosts").random();
        let c: u64 = stage_rng(7, "networks").random();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn small_pools_are_used_whole() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let pool = names(2);
        assert_eq!(sample_or_all(&pool, 5, &mut rng), pool);
    }

    #[test]
    fn samples_are_distinct_members() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let pool = names(10);
        for _ in 0..100 {
            let mut sample = sample_or_all(&pool, 4, &mut rng);
            assert!(sample.iter().all(|name| pool.contains(name)));
            sample.sort();
            sample.dedup();
            assert_eq!(sample.len(), 4);
        }
    }

    #[test]
    fn maybe_sample_respects_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let pool = names(2);
        assert_eq!(maybe_sample(&[], 1.0, 3, &mut rng), None);
        assert_eq!(maybe_sample(&pool, 0.0, 3, &mut rng), None);
        for _ in 0..50 {
            let sample = maybe_sample(&pool, 1.0, 3, &mut rng).expect("always drawn");
            assert!((1..=2).contains(&sample.len()));
        }
    }

    #[test]
    fn prefixes_stay_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..500 {
            let prefix = random_prefix(&mut rng);
            assert!((16..=28).contains(&prefix.prefix_len()));
            assert_eq!(prefix.host_bits(), 0);
            assert_eq!(prefix.address().octets()[0], 10);
        }
    }
}
