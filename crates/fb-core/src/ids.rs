//! Behavior identifiers and the generator that mints them.
//!
//! Every behavior gets a version-4 style identifier at construction:
//! 122 random bits laid out as `xxxxxxxx-xxxx-4xxx-Vxxx-xxxxxxxxxxxx`, where
//! `V` is one of the RFC-4122 variant digits (`8`, `9`, `a`, `b`).
//!
//! Uniqueness is statistical only.  At the instance counts of a single
//! running process the collision probability is negligible, so the registry
//! treats ids as unique without checking.
//!
//! # Determinism
//!
//! [`IdGenerator::seeded`] produces the same id sequence for the same seed,
//! which keeps trace output reproducible across runs.  Production code uses
//! [`IdGenerator::from_entropy`] (or the free [`generate`] function).

use std::fmt;
use std::str::FromStr;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use uuid::{Builder, Uuid, Variant};

use crate::{FbError, FbResult};

// ── BehaviorId ────────────────────────────────────────────────────────────────

/// Opaque, immutable identity of one behavior instance.
///
/// `Copy + Ord + Hash` so it can key maps and sets without ceremony.  The
/// canonical string form (36 chars, lowercase, hyphenated) is available via
/// `Display` / `to_string()`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorId(Uuid);

impl BehaviorId {
    /// Length of the canonical string form.
    pub const STR_LEN: usize = 36;

    /// Build an id from 16 random bytes, forcing the version and variant bits.
    #[inline]
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        BehaviorId(Builder::from_random_bytes(bytes).into_uuid())
    }

    /// The wrapped UUID value.
    #[inline]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for BehaviorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for BehaviorId {
    type Err = FbError;

    /// Parse the canonical hyphenated form.  Only version-4, RFC-4122 ids
    /// are accepted; anything else was not minted by this crate.
    fn from_str(s: &str) -> FbResult<Self> {
        if s.len() != Self::STR_LEN {
            return Err(FbError::Parse(format!("behavior id must be {} chars: {s:?}", Self::STR_LEN)));
        }
        let uuid = Uuid::parse_str(s).map_err(|e| FbError::Parse(format!("{s:?}: {e}")))?;
        if uuid.get_version_num() != 4 || uuid.get_variant() != Variant::RFC4122 {
            return Err(FbError::Parse(format!("{s:?} is not a version-4 identifier")));
        }
        Ok(BehaviorId(uuid))
    }
}

// ── IdGenerator ───────────────────────────────────────────────────────────────

/// Stateful identifier generator.
///
/// Owned by the scheduler; one per process in practice.  `!Sync` by virtue of
/// the inner `SmallRng` being used through `&mut self` only.
pub struct IdGenerator(SmallRng);

impl IdGenerator {
    /// Seed from OS entropy.
    pub fn from_entropy() -> Self {
        IdGenerator(SmallRng::from_entropy())
    }

    /// Seed deterministically.  The same seed always yields the same ids.
    pub fn seeded(seed: u64) -> Self {
        IdGenerator(SmallRng::seed_from_u64(seed))
    }

    /// Build from an optional seed: `Some` is deterministic, `None` uses entropy.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None    => Self::from_entropy(),
        }
    }

    /// Mint the next identifier.
    #[inline]
    pub fn generate(&mut self) -> BehaviorId {
        BehaviorId::from_random_bytes(self.0.r#gen::<[u8; 16]>())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Mint one identifier from the thread-local RNG.
///
/// Convenience for callers that do not own an [`IdGenerator`].
pub fn generate() -> BehaviorId {
    BehaviorId::from_random_bytes(rand::thread_rng().r#gen::<[u8; 16]>())
}
