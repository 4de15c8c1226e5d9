//! AEAD: AES-256-GCM with a fixed all-zero nonce.
//!
//! The zero nonce is mandated by the upstream format. It is sound only
//! because every key passed here is generated fresh and used for exactly one
//! encryption; the encoder owns that invariant. Reusing a key across calls
//! would compromise both confidentiality and authentication.

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Nonce,
};

use crate::error::EncodeError;
use crate::wire::AEAD_TAG_BYTES;

/// GCM nonce size
pub const NONCE_BYTES: usize = 12;

const ZERO_NONCE: [u8; NONCE_BYTES] = [0u8; NONCE_BYTES];

/// Encrypt `plaintext` under a one-time key, authenticating `aad` verbatim.
///
/// Returns ciphertext (same length as the plaintext, no padding) and the
/// 128-bit tag separately; the envelope places them in non-adjacent fields.
pub fn aead_seal_detached(
    key: &[u8; 32],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<(Vec<u8>, [u8; AEAD_TAG_BYTES]), EncodeError> {
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| EncodeError::EncryptionFailure)?;
    let nonce = Nonce::from_slice(&ZERO_NONCE);
    let payload = Payload { msg: plaintext, aad };

    // aes-gcm appends the tag; split it back off.
    let mut combined = cipher
        .encrypt(nonce, payload)
        .map_err(|_| EncodeError::EncryptionFailure)?;
    if combined.len() < AEAD_TAG_BYTES {
        return Err(EncodeError::EncryptionFailure);
    }
    let tag_start = combined.len() - AEAD_TAG_BYTES;
    let tag_bytes = combined.split_off(tag_start);
    let tag: [u8; AEAD_TAG_BYTES] = tag_bytes
        .as_slice()
        .try_into()
        .map_err(|_| EncodeError::EncryptionFailure)?;

    Ok((combined, tag))
}
