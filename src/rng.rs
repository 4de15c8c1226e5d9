//! Entropy abstraction.
//!
//! Production code always uses [`OsEntropy`] (the OS CSPRNG via `getrandom`).
//! The trait exists so tests can inject a deterministic source and obtain
//! reproducible ciphertexts.

use crate::error::RandomnessError;

/// Source of cryptographically secure random bytes.
pub trait EntropySource {
    /// Fill `dest` with random bytes, or fail if the source is unavailable.
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandomnessError>;
}

/// OS-provided secure generator. The only implementation suitable for
/// production use.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandomnessError> {
        getrandom::getrandom(dest).map_err(|_| RandomnessError)
    }
}
