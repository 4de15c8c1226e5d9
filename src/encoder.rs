//! Envelope encoder — the full encode pipeline.
//!
//! generate one-time key -> AES-256-GCM over the password (timestamp as AAD)
//! -> seal the key to the recipient -> envelope bytes -> base64 -> token.
//!
//! The fixed-zero AEAD nonce is only sound because this pipeline generates a
//! fresh symmetric key inside every `encode` call and never caches or reuses
//! it. That coupling is the load-bearing safety assumption of the scheme.

use std::time::{SystemTime, UNIX_EPOCH};

use zeroize::Zeroizing;

use crate::aead;
use crate::error::EncodeError;
use crate::rng::{EntropySource, OsEntropy};
use crate::sealed;
use crate::token;
use crate::wire::{self, PUBLIC_KEY_BYTES, PUBLIC_KEY_HEX_CHARS, SYMMETRIC_KEY_BYTES};

/// Password envelope encoder.
///
/// Stateless apart from its entropy source; calls are independent, and each
/// call consumes fresh entropy for the symmetric key and the ephemeral
/// keypair. Cheap to construct and to clone per thread.
#[derive(Clone, Debug)]
pub struct PasswordEncoder<R: EntropySource = OsEntropy> {
    entropy: R,
}

impl PasswordEncoder<OsEntropy> {
    /// Encoder backed by the OS CSPRNG.
    pub fn new() -> Self {
        Self { entropy: OsEntropy }
    }
}

impl Default for PasswordEncoder<OsEntropy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: EntropySource> PasswordEncoder<R> {
    /// Encoder with an injected entropy source. Deterministic sources are
    /// for tests only.
    pub fn with_entropy(entropy: R) -> Self {
        Self { entropy }
    }

    /// Encode `password` into a transport token.
    ///
    /// `public_key_hex` must be exactly 64 hex characters (validated before
    /// any cryptographic work). `timestamp` is authenticated byte-for-byte
    /// as AAD and carried verbatim in the token.
    pub fn encode(
        &mut self,
        key_id: u8,
        public_key_hex: &str,
        password: &str,
        timestamp: &str,
    ) -> Result<String, EncodeError> {
        let recipient_pk = decode_public_key(public_key_hex)?;
        tracing::debug!(key_id, "recipient key validated");

        // Fresh one-time key, exactly once per call. Never reused.
        let mut symmetric_key = Zeroizing::new([0u8; SYMMETRIC_KEY_BYTES]);
        self.entropy.fill_bytes(symmetric_key.as_mut_slice())?;

        let (ciphertext, auth_tag) =
            aead::aead_seal_detached(&symmetric_key, password.as_bytes(), timestamp.as_bytes())?;
        tracing::trace!(ciphertext_len = ciphertext.len(), "password encrypted");

        let encrypted_key = sealed::seal(symmetric_key.as_slice(), &recipient_pk, &mut self.entropy)?;
        tracing::trace!(encrypted_key_len = encrypted_key.len(), "symmetric key sealed");

        let envelope = wire::encode_envelope(key_id, &encrypted_key, &auth_tag, &ciphertext)?;
        let token = token::format_token(timestamp, &envelope);
        tracing::debug!(envelope_len = envelope.len(), "token assembled");
        Ok(token)
    }

    /// Encode with the current Unix time as the timestamp.
    ///
    /// Returns the token together with the timestamp used, since the login
    /// flow must submit the same value alongside the token.
    ///
    /// The timestamp is always a decimal seconds-since-epoch string. On a
    /// host whose clock reads before the Unix epoch this falls back to `"0"`
    /// rather than failing: the timestamp is transport metadata, not a
    /// security input, and the upstream endpoint rejects stale values
    /// itself. Callers that need to control the value use [`encode`].
    ///
    /// [`encode`]: Self::encode
    pub fn encode_now(
        &mut self,
        key_id: u8,
        public_key_hex: &str,
        password: &str,
    ) -> Result<(String, String), EncodeError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let timestamp = now.as_secs().to_string();
        let token = self.encode(key_id, public_key_hex, password, &timestamp)?;
        Ok((token, timestamp))
    }
}

/// One-shot encode with the OS CSPRNG.
pub fn encode_password(
    key_id: u8,
    public_key_hex: &str,
    password: &str,
    timestamp: &str,
) -> Result<String, EncodeError> {
    PasswordEncoder::new().encode(key_id, public_key_hex, password, timestamp)
}

fn decode_public_key(public_key_hex: &str) -> Result<[u8; PUBLIC_KEY_BYTES], EncodeError> {
    if public_key_hex.len() != PUBLIC_KEY_HEX_CHARS {
        return Err(EncodeError::InvalidKeyLength(public_key_hex.len()));
    }

    let bytes = hex::decode(public_key_hex).map_err(|_| EncodeError::InvalidKeyEncoding)?;
    let mut pk = [0u8; PUBLIC_KEY_BYTES];
    pk.copy_from_slice(&bytes);
    Ok(pk)
}
