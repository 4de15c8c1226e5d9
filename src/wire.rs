//! Binary envelope layout (v1)
//!
//! Format:
//!   key_id[1] || version[1] || encrypted_key_len[2, LE]
//!   || encrypted_key[encrypted_key_len] || auth_tag[16] || ciphertext
//!
//! encrypted_key = x25519_ephemeral_pk[32] || box_ciphertext[48]
//!
//! Canonical field order is key_id then version. A variant of the upstream
//! scheme swaps the two; that ordering is non-conformant here.

use crate::error::{EncodeError, ParseError};

/// Envelope version byte. Distinct from the outer transport-format version.
pub const ENVELOPE_VERSION: u8 = 1;

// ---------------------------------------------------------------------------
// Component sizes
// ---------------------------------------------------------------------------

/// Curve25519 public key size
pub const PUBLIC_KEY_BYTES: usize = 32;

/// Hex characters in an encoded recipient public key
pub const PUBLIC_KEY_HEX_CHARS: usize = PUBLIC_KEY_BYTES * 2;

/// One-time symmetric key size (AES-256)
pub const SYMMETRIC_KEY_BYTES: usize = 32;

/// AES-GCM authentication tag size
pub const AEAD_TAG_BYTES: usize = 16;

/// Sealed-box overhead: ephemeral public key + Poly1305 tag
pub const SEALED_OVERHEAD_BYTES: usize = PUBLIC_KEY_BYTES + 16; // 48

/// Sealed symmetric key: ephemeral_pk[32] || box_ct[32 + 16]
pub const SEALED_KEY_BYTES: usize = SYMMETRIC_KEY_BYTES + SEALED_OVERHEAD_BYTES; // 80

/// Header size: key_id + version + encrypted_key_len(u16)
pub const HEADER_BYTES: usize = 1 + 1 + 2; // 4

/// Minimum envelope size when sealing a 32-byte symmetric key
pub const MIN_ENVELOPE_BYTES: usize = HEADER_BYTES + SEALED_KEY_BYTES + AEAD_TAG_BYTES; // 100

/// Borrowed view of a parsed envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeComponents<'a> {
    pub key_id: u8,
    pub version: u8,
    pub encrypted_key_len: u16,
    pub encrypted_key: &'a [u8],
    pub auth_tag: &'a [u8; AEAD_TAG_BYTES],
    pub ciphertext: &'a [u8],
}

/// Structural decode. Reads field boundaries only; never decrypts and never
/// checks the version byte (the decoder is diagnostic, not a verifier).
pub fn decode_envelope(data: &[u8]) -> Result<EnvelopeComponents<'_>, ParseError> {
    if data.len() < HEADER_BYTES {
        return Err(ParseError::EnvelopeTooShort);
    }

    let key_id = data[0];
    let version = data[1];
    let encrypted_key_len = u16::from_le_bytes([data[2], data[3]]);

    let key_end = HEADER_BYTES + encrypted_key_len as usize;
    let tag_end = key_end + AEAD_TAG_BYTES;
    if tag_end > data.len() {
        return Err(ParseError::InvalidKeyLength);
    }

    let encrypted_key = &data[HEADER_BYTES..key_end];
    let auth_tag: &[u8; AEAD_TAG_BYTES] = data[key_end..tag_end]
        .try_into()
        .map_err(|_| ParseError::InvalidKeyLength)?;
    let ciphertext = &data[tag_end..];

    Ok(EnvelopeComponents {
        key_id,
        version,
        encrypted_key_len,
        encrypted_key,
        auth_tag,
        ciphertext,
    })
}

/// Assemble envelope bytes in canonical field order.
pub fn encode_envelope(
    key_id: u8,
    encrypted_key: &[u8],
    auth_tag: &[u8; AEAD_TAG_BYTES],
    ciphertext: &[u8],
) -> Result<Vec<u8>, EncodeError> {
    let encrypted_key_len =
        u16::try_from(encrypted_key.len()).map_err(|_| EncodeError::SealingFailure)?;

    let mut out =
        Vec::with_capacity(HEADER_BYTES + encrypted_key.len() + AEAD_TAG_BYTES + ciphertext.len());

    out.push(key_id);
    out.push(ENVELOPE_VERSION);
    out.extend_from_slice(&encrypted_key_len.to_le_bytes());
    out.extend_from_slice(encrypted_key);
    out.extend_from_slice(auth_tag);
    out.extend_from_slice(ciphertext);

    Ok(out)
}
