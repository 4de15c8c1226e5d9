//! Sealed box: anonymous public-key encryption of the one-time key.
//!
//! Construction (must match the upstream scheme exactly):
//!   1. fresh ephemeral X25519 keypair
//!   2. nonce = BLAKE2b(ephemeral_pk || recipient_pk, outlen=24)
//!   3. box_ct = crypto_box(message, nonce, recipient_pk, ephemeral_sk)
//!   4. output = ephemeral_pk || box_ct
//!
//! The nonce derivation is deliberate: the upstream client hashes the two
//! public keys with BLAKE2b, so the generic libsodium `crypto_box_seal`
//! helper cannot be substituted blindly — the derivation is reproduced here
//! explicitly and is part of the format contract.

use blake2::{
    digest::{Update, VariableOutput},
    Blake2bVar,
};
use crypto_box::{aead::Aead, Nonce, PublicKey, SalsaBox, SecretKey};
use zeroize::Zeroizing;

use crate::error::EncodeError;
use crate::rng::EntropySource;
use crate::wire::PUBLIC_KEY_BYTES;

/// XSalsa20 nonce size
pub const BOX_NONCE_BYTES: usize = 24;

/// Derive the box nonce from the two public keys.
///
/// `nonce = BLAKE2b(ephemeral_pk || recipient_pk, outlen=24)`
pub fn derive_nonce(
    ephemeral_pk: &[u8; PUBLIC_KEY_BYTES],
    recipient_pk: &[u8; PUBLIC_KEY_BYTES],
) -> Result<[u8; BOX_NONCE_BYTES], EncodeError> {
    let mut hasher = Blake2bVar::new(BOX_NONCE_BYTES).map_err(|_| EncodeError::SealingFailure)?;
    hasher.update(ephemeral_pk);
    hasher.update(recipient_pk);

    let mut nonce = [0u8; BOX_NONCE_BYTES];
    hasher
        .finalize_variable(&mut nonce)
        .map_err(|_| EncodeError::SealingFailure)?;
    Ok(nonce)
}

/// Seal `message` to the recipient's static public key.
///
/// Anonymous and one-way: the sender is not authenticated, and only the
/// holder of the matching secret key can open the result. Output is
/// `ephemeral_pk[32] || box_ct[len(message)+16]`.
pub fn seal(
    message: &[u8],
    recipient_pk: &[u8; PUBLIC_KEY_BYTES],
    entropy: &mut dyn EntropySource,
) -> Result<Vec<u8>, EncodeError> {
    let mut ephemeral_bytes = Zeroizing::new([0u8; PUBLIC_KEY_BYTES]);
    entropy.fill_bytes(ephemeral_bytes.as_mut_slice())?;

    // SecretKey zeroizes on drop; the ephemeral pair never leaves this call.
    let ephemeral_sk = SecretKey::from(*ephemeral_bytes);
    let ephemeral_pk = ephemeral_sk.public_key();

    let nonce = derive_nonce(ephemeral_pk.as_bytes(), recipient_pk)?;

    let salsa_box = SalsaBox::new(&PublicKey::from(*recipient_pk), &ephemeral_sk);
    let box_ct = salsa_box
        .encrypt(Nonce::from_slice(&nonce), message)
        .map_err(|_| EncodeError::SealingFailure)?;

    let mut out = Vec::with_capacity(PUBLIC_KEY_BYTES + box_ct.len());
    out.extend_from_slice(ephemeral_pk.as_bytes());
    out.extend_from_slice(&box_ct);
    Ok(out)
}
