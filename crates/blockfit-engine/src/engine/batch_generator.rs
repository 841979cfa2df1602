use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Shape, ShapeBatch};

/// Number of shapes dealt per batch.
pub const BATCH_SIZE: usize = 3;

const SEED_HEX_DIGITS: usize = 32;

/// Deals batches of shapes, drawing every kind and orientation uniformly.
///
/// The generator is deterministic for a given [`BatchSeed`], so recorded games can be
/// replayed.
///
/// # Example
///
/// ```
/// use blockfit_engine::{BATCH_SIZE, BatchGenerator};
///
/// let mut generator = BatchGenerator::new();
/// let batch = generator.next_batch();
/// assert_eq!(batch.len(), BATCH_SIZE);
/// ```
#[derive(Debug, Clone)]
pub struct BatchGenerator {
    rng: Pcg32,
    seed: BatchSeed,
}

/// 128-bit seed for deterministic batch generation.
///
/// Serialized (and parsed) as 32 hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid batch seed {seed:?}: expected {SEED_HEX_DIGITS} hex digits")]
pub struct ParseBatchSeedError {
    seed: String,
}

impl BatchSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for BatchSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for BatchSeed {
    type Err = ParseBatchSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseBatchSeedError { seed: s.to_owned() };
        if s.len() != SEED_HEX_DIGITS {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for BatchSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BatchSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        hex.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<BatchSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BatchSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BatchSeed(seed)
    }
}

impl Default for BatchGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchGenerator {
    /// Creates a generator with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: BatchSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> BatchSeed {
        self.seed
    }

    /// Deals the next batch, with shape ids `1..=BATCH_SIZE`.
    pub fn next_batch(&mut self) -> ShapeBatch {
        let rng = &mut self.rng;
        ShapeBatch::from_shapes((0..BATCH_SIZE).map(|_| rng.random::<Shape>()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: BatchSeed = BatchSeed([
        0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
        0x88,
    ]);

    #[test]
    fn test_seed_format() {
        assert_eq!(SEED.to_string(), "123456789abcdef01122334455667788");
        assert_eq!(
            serde_json::to_string(&SEED).unwrap(),
            "\"123456789abcdef01122334455667788\""
        );
        assert_eq!(
            "123456789ABCDEF01122334455667788".parse::<BatchSeed>(),
            Ok(SEED)
        );
    }

    #[test]
    fn test_seed_parse_errors() {
        for input in [
            "",
            "123456789abcdef0112233445566778",
            "123456789abcdef011223344556677880",
            "ghijklmnopqrstuvwxyzghijklmnopqr",
        ] {
            assert!(input.parse::<BatchSeed>().is_err(), "{input:?}");
            let json = format!("\"{input}\"");
            let err = serde_json::from_str::<BatchSeed>(&json).unwrap_err();
            assert!(err.to_string().contains("invalid batch seed"), "{err}");
        }
    }

    #[test]
    fn test_seed_round_trip() {
        let seed: BatchSeed = rand::rng().random();
        let serialized = serde_json::to_string(&seed).unwrap();
        let deserialized: BatchSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);
    }

    #[test]
    fn test_deterministic_batches() {
        let mut generator1 = BatchGenerator::with_seed(SEED);
        let mut generator2 = BatchGenerator::with_seed(SEED);
        for _ in 0..20 {
            let batch = generator1.next_batch();
            assert_eq!(batch.len(), BATCH_SIZE);
            assert_eq!(batch, generator2.next_batch());
        }
        assert_eq!(generator1.seed(), SEED);
    }
}
