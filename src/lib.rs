//! # pwd-envelope
//!
//! Instagram-compatible password envelope codec.
//!
//! Serializes a password into a byte-exact, versioned binary envelope:
//! AES-256-GCM under a fresh one-time key, with that key sealed anonymously
//! to the recipient's static Curve25519 key (NaCl crypto_box, BLAKE2b-derived
//! nonce), then framed as a `#PWD_INSTAGRAM_BROWSER` transport token.
//!
//! ## Quick Start
//!
//! ```rust
//! use pwd_envelope::{encode_password, parse_token};
//!
//! let public_key_hex = "ab".repeat(32);
//! let token = encode_password(81, &public_key_hex, "hunter2", "1700000000").unwrap();
//!
//! assert!(token.starts_with("#PWD_INSTAGRAM_BROWSER:10:1700000000:"));
//!
//! let fields = parse_token(&token).unwrap();
//! assert_eq!(fields.key_id, 81);
//! assert_eq!(fields.version, 1);
//! assert_eq!(fields.encrypted_key.len(), 80);
//! assert_eq!(fields.ciphertext.len(), 7);
//! ```
//!
//! ## Format Properties
//!
//! - **Byte-exact**: layout, primitive composition, and constants match the
//!   upstream browser client — including choices (fixed-zero GCM IV) that
//!   would be unsafe outside this single-use-key scheme
//! - **Non-deterministic**: every encode draws a fresh symmetric key and
//!   ephemeral keypair; identical inputs produce different tokens
//! - **One-way**: the diagnostic decoder recovers structure, never plaintext
//!
//! ## What's NOT Provided
//!
//! - Recipient key discovery or rotation
//! - The HTTP login flow that transmits the token
//! - Decryption (only the recipient key holder can open the sealed box)

#![deny(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/pwd-envelope/0.1.0")]

// ---------------------------------------------------------------------------
// Internal modules (not part of public API)
// ---------------------------------------------------------------------------

mod encoder;
mod error;

// Primitive wrappers are exposed for conformance testing but are not
// considered stable API
#[doc(hidden)]
pub mod aead;
#[doc(hidden)]
pub mod sealed;

// ---------------------------------------------------------------------------
// Public interface
// ---------------------------------------------------------------------------

pub mod rng;
pub mod token;
pub mod wire;

pub use encoder::{encode_password, PasswordEncoder};
pub use error::{EncodeError, ParseError, RandomnessError};
pub use rng::{EntropySource, OsEntropy};
pub use token::{format_token, parse_token, ParsedToken, TOKEN_TAG, TRANSPORT_VERSION};
pub use wire::{ENVELOPE_VERSION, MIN_ENVELOPE_BYTES, SEALED_KEY_BYTES};
