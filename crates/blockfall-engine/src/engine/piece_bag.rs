use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// 7-bag randomizer.
///
/// The bag starts with one of each of the 7 piece kinds. Every draw removes a
/// uniformly chosen kind from the bag; once the bag is empty it is refilled
/// with a full set. Any 7 consecutive draws starting from a fresh bag
/// therefore yield every kind exactly once.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
///
/// use blockfall_engine::{PieceBag, PieceKind};
///
/// let mut bag = PieceBag::new();
/// let cycle: HashSet<_> = (0..PieceKind::LEN).map(|_| bag.draw()).collect();
/// assert_eq!(cycle.len(), PieceKind::LEN);
/// ```
#[derive(Debug, Clone)]
pub struct PieceBag {
    rng: Pcg32,
    remaining: ArrayVec<PieceKind, { PieceKind::LEN }>,
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the bag's random number generator. Using the same seed
/// produces the same sequence of pieces. Seeds are written as 32 hexadecimal
/// characters.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceBag, PieceSeed};
///
/// let seed: PieceSeed = "0123456789abcdeffedcba9876543210".parse().unwrap();
/// let mut a = PieceBag::with_seed(seed);
/// let mut b = PieceBag::with_seed(seed);
/// assert_eq!(a.draw(), b.draw());
/// assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: expected 32 hexadecimal characters")]
pub struct ParsePieceSeedError {
    input: String,
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePieceSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceBag {
    /// Creates a full bag with a random seed.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut this = Self {
            rng: Pcg32::from_seed(seed.0),
            remaining: ArrayVec::new(),
        };
        this.refill();
        this
    }

    /// Discards the remaining kinds and starts a new full cycle.
    ///
    /// The random number generator keeps its state.
    pub fn refill(&mut self) {
        self.remaining.clear();
        self.remaining.extend(PieceKind::ALL);
    }

    /// Removes and returns a uniformly chosen kind from the bag.
    ///
    /// Refills the bag first if it is empty.
    pub fn draw(&mut self) -> PieceKind {
        if self.remaining.is_empty() {
            self.refill();
        }
        let index = self.rng.random_range(0..self.remaining.len());
        self.remaining.remove(index)
    }

    /// Returns the kinds not yet drawn in the current cycle.
    #[must_use]
    pub fn remaining(&self) -> &[PieceKind] {
        &self.remaining
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn seed_from_bytes(bytes: [u8; 16]) -> PieceSeed {
        PieceSeed::from_bytes(bytes)
    }

    #[test]
    fn test_fresh_bag_yields_each_kind_once() {
        let mut bag = PieceBag::with_seed(seed_from_bytes([7; 16]));
        for _ in 0..10 {
            let cycle: HashSet<_> = (0..PieceKind::LEN).map(|_| bag.draw()).collect();
            assert_eq!(cycle.len(), PieceKind::LEN);
            assert!(bag.remaining().is_empty());
        }
    }

    #[test]
    fn test_remaining_never_has_duplicates() {
        let mut bag = PieceBag::with_seed(seed_from_bytes([1; 16]));
        for _ in 0..30 {
            bag.draw();
            let remaining: HashSet<_> = bag.remaining().iter().collect();
            assert_eq!(remaining.len(), bag.remaining().len());
        }
    }

    #[test]
    fn test_refill_restores_full_cycle() {
        let mut bag = PieceBag::with_seed(seed_from_bytes([2; 16]));
        bag.draw();
        bag.draw();
        bag.refill();
        assert_eq!(bag.remaining().len(), PieceKind::LEN);
    }

    #[test]
    fn test_deterministic_piece_generation() {
        let seed = seed_from_bytes([
            0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66,
            0x77, 0x88,
        ]);
        let mut bag1 = PieceBag::with_seed(seed);
        let mut bag2 = PieceBag::with_seed(seed);
        for _ in 0..20 {
            assert_eq!(bag1.draw(), bag2.draw());
        }
    }

    #[test]
    fn test_seed_hex_format() {
        let seed = seed_from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        assert_eq!(
            serde_json::to_string(&seed).unwrap(),
            "\"0123456789abcdeffedcba9876543210\""
        );
        assert_eq!(seed_from_bytes([0; 16]).to_string(), "0".repeat(32));
    }

    #[test]
    fn test_seed_accepts_uppercase_hex() {
        let seed: PieceSeed = serde_json::from_str("\"0123456789ABCDEFFEDCBA9876543210\"").unwrap();
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
    }

    #[test]
    fn test_seed_rejects_malformed_input() {
        for input in [
            "",
            "0123456789abcdef0123456789abcde",
            "0123456789abcdef0123456789abcdef0",
            "ghijklmnopqrstuvwxyzghijklmnopqr",
            "+123456789abcdef0123456789abcdef",
        ] {
            let err = input.parse::<PieceSeed>().unwrap_err();
            assert!(err.to_string().contains("invalid hex seed"));
        }
        assert!(serde_json::from_str::<PieceSeed>("\"xyz\"").is_err());
    }
}
