//! Error types for the envelope codec.
//!
//! Two independent taxonomies:
//! - [`EncodeError`] — everything that can go wrong while producing a token
//! - [`ParseError`] — structural failures in the diagnostic decoder
//!
//! None of these are retried internally: retrying a failed encryption with
//! the same inputs would either fail identically or risk key/nonce reuse.

use std::fmt;

// ---------------------------------------------------------------------------
// Encode-side errors
// ---------------------------------------------------------------------------

/// Failure while encoding a password into a transport token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// Recipient public key is not exactly 64 hex characters.
    InvalidKeyLength(usize),
    /// Recipient public key has the right length but is not valid hex.
    InvalidKeyEncoding,
    /// AEAD primitive rejected the operation. Should not occur with
    /// validated inputs.
    EncryptionFailure,
    /// The crypto_box primitive rejected the operation. Should not occur
    /// with a validated 32-byte recipient key.
    SealingFailure,
    /// The secure RNG is unavailable. Signals a degraded host environment.
    RandomnessError,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKeyLength(n) => {
                write!(f, "public key must be 64 hex characters, got {}", n)
            }
            Self::InvalidKeyEncoding => write!(f, "public key is not valid hex"),
            Self::EncryptionFailure => write!(f, "encryption failed"),
            Self::SealingFailure => write!(f, "sealing failed"),
            Self::RandomnessError => write!(f, "secure randomness unavailable"),
        }
    }
}

impl std::error::Error for EncodeError {}

// ---------------------------------------------------------------------------
// Randomness
// ---------------------------------------------------------------------------

/// The entropy source could not produce bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomnessError;

impl fmt::Display for RandomnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "secure randomness unavailable")
    }
}

impl std::error::Error for RandomnessError {}

impl From<RandomnessError> for EncodeError {
    fn from(_: RandomnessError) -> Self {
        EncodeError::RandomnessError
    }
}

// ---------------------------------------------------------------------------
// Decoder-side errors
// ---------------------------------------------------------------------------

/// Structural failure while parsing a transport token.
///
/// The decoder never panics on malformed input; every failure is one of
/// these typed variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Token does not split into exactly 4 colon-delimited parts.
    MalformedToken,
    /// The payload part is not valid standard base64.
    InvalidBase64,
    /// Fewer than 4 envelope bytes; the fixed header cannot be read.
    EnvelopeTooShort,
    /// Declared encrypted-key length (plus the 16-byte tag) exceeds the
    /// remaining envelope bytes.
    InvalidKeyLength,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedToken => write!(f, "malformed token: expected 4 colon-delimited parts"),
            Self::InvalidBase64 => write!(f, "envelope payload is not valid base64"),
            Self::EnvelopeTooShort => write!(f, "envelope too short for header"),
            Self::InvalidKeyLength => write!(f, "declared encrypted key length exceeds envelope"),
        }
    }
}

impl std::error::Error for ParseError {}
