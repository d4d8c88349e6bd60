//! Edge rank derivation
//!
//! The estimator only needs a deterministic edge -> `[0, 1)` mapping where a
//! smaller rank means "keep". Because the rank is a pure function of the
//! edge, every duplicate of a pair sees the rank of its first arrival.

use crate::graph::{Edge, Rank};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of sampling ranks
pub trait RankSource {
    fn rank(&self, edge: &Edge) -> Rank;
}

impl<F> RankSource for F
where
    F: Fn(&Edge) -> Rank,
{
    fn rank(&self, edge: &Edge) -> Rank {
        self(edge)
    }
}

const SEED_MASKS: [u64; 8] = [
    0xFC13C8E7, 0xA2A9FFD4, 0x597ECDDC, 0x8AF8DA7E, 0xAF531D42, 0x842A21DD, 0x1DEE299F, 0xBFEC63E9,
];

const PRIME_MODULUS: u64 = 3_584_999_771;
const PRIME_COEFFICIENT_BOUND: u64 = 4_294_967_291;
const PRIME_BUCKETS: u64 = 8_532_401;

/// Integer mixing of a 32-bit value
fn mix32(mut a: u32) -> u32 {
    a = a.wrapping_add(0x479a_b41d).wrapping_add(a << 8);
    a = (a ^ 0xe4aa_10ce) ^ (a >> 5);
    a = a.wrapping_add(0x9942_f0a6).wrapping_sub(a << 14);
    a = (a ^ 0x5aed_d67d) ^ (a >> 3);
    a = a.wrapping_add(0x17be_a992).wrapping_add(a << 7);
    a
}

/// Seeded universal hash from edges to ranks
///
/// Each endpoint is mixed with a seed-selected mask, the two halves are
/// packed into 64 bits, and the result goes through
/// `((a * (x mod P1) + b) mod P1) mod P4 / P4`.
#[derive(Debug, Clone)]
pub struct EdgeHasher {
    seed: u64,
    a: u64,
    b: u64,
}

impl EdgeHasher {
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let low = PRIME_COEFFICIENT_BOUND / 3;
        let a = rng.gen_range(low..=PRIME_COEFFICIENT_BOUND);
        let b = rng.gen_range(low..=PRIME_COEFFICIENT_BOUND);
        EdgeHasher { seed, a, b }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn packed(&self, edge: &Edge) -> u64 {
        let lo_mask = SEED_MASKS[(self.seed % 8) as usize] as u32;
        let hi_mask = SEED_MASKS[((self.seed + 3) % 8) as usize] as u32;
        let lo = mix32(edge.lo() ^ lo_mask) as u64;
        let hi = mix32(edge.hi() ^ hi_mask) as u64;
        (lo << 32) | hi
    }

    /// Raw rank value in `[0, 1)`
    pub fn hash(&self, edge: &Edge) -> f64 {
        let x = u128::from(self.packed(edge) % PRIME_MODULUS);
        let y = (u128::from(self.a) * x + u128::from(self.b)) % u128::from(PRIME_MODULUS);
        (y % u128::from(PRIME_BUCKETS)) as f64 / PRIME_BUCKETS as f64
    }
}

impl RankSource for EdgeHasher {
    fn rank(&self, edge: &Edge) -> Rank {
        // y mod P4 < P4, so the quotient is strictly below 1
        Rank::from_unit(self.hash(edge))
    }
}
