//! End-to-end tests: encode a token, then recover the password with the
//! recipient secret key by reversing each primitive manually.
//!
//! The library itself never decrypts; these tests stand in for the upstream
//! server side to verify exact primitive composition (zero GCM IV, verbatim
//! timestamp AAD, BLAKE2b box nonce).

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Nonce as GcmNonce,
};
use crypto_box::{aead::Aead as _, Nonce as BoxNonce, SalsaBox, SecretKey};

use pwd_envelope::sealed::derive_nonce;
use pwd_envelope::wire::{AEAD_TAG_BYTES, PUBLIC_KEY_BYTES, SEALED_KEY_BYTES, SYMMETRIC_KEY_BYTES};
use pwd_envelope::{
    encode_password, parse_token, EntropySource, ParsedToken, PasswordEncoder, RandomnessError,
};

fn recipient_keypair() -> (SecretKey, String) {
    let mut sk_bytes = [0u8; 32];
    getrandom::getrandom(&mut sk_bytes).unwrap();
    let sk = SecretKey::from(sk_bytes);
    let pk_hex = hex::encode(sk.public_key().as_bytes());
    (sk, pk_hex)
}

/// Server-side inverse of the encode pipeline.
fn open_token(recipient_sk: &SecretKey, fields: &ParsedToken) -> Result<Vec<u8>, ()> {
    // Split the sealed box: ephemeral_pk[32] || box_ct
    let ephemeral_pk: [u8; PUBLIC_KEY_BYTES] =
        fields.encrypted_key[..PUBLIC_KEY_BYTES].try_into().unwrap();
    let box_ct = &fields.encrypted_key[PUBLIC_KEY_BYTES..];

    let nonce = derive_nonce(&ephemeral_pk, recipient_sk.public_key().as_bytes()).unwrap();
    let salsa_box = SalsaBox::new(&crypto_box::PublicKey::from(ephemeral_pk), recipient_sk);
    let symmetric_key = salsa_box
        .decrypt(BoxNonce::from_slice(&nonce), box_ct)
        .map_err(|_| ())?;
    assert_eq!(symmetric_key.len(), SYMMETRIC_KEY_BYTES);

    // AES-256-GCM with the fixed zero nonce and the timestamp as AAD.
    let cipher = Aes256Gcm::new_from_slice(&symmetric_key).unwrap();
    let mut combined = fields.ciphertext.clone();
    combined.extend_from_slice(&fields.auth_tag);
    cipher
        .decrypt(
            GcmNonce::from_slice(&[0u8; 12]),
            Payload {
                msg: &combined,
                aad: fields.timestamp.as_bytes(),
            },
        )
        .map_err(|_| ())
}

#[test]
fn roundtrip_recovers_password() {
    let (sk, pk_hex) = recipient_keypair();
    let token = encode_password(81, &pk_hex, "hunter2", "1700000000").unwrap();

    let fields = parse_token(&token).unwrap();
    let plaintext = open_token(&sk, &fields).unwrap();
    assert_eq!(plaintext, b"hunter2");
}

#[test]
fn roundtrip_empty_password() {
    let (sk, pk_hex) = recipient_keypair();
    let token = encode_password(0, &pk_hex, "", "123").unwrap();

    let fields = parse_token(&token).unwrap();
    assert!(fields.ciphertext.is_empty());
    assert_eq!(open_token(&sk, &fields).unwrap(), b"");
}

#[test]
fn roundtrip_unicode_password() {
    let (sk, pk_hex) = recipient_keypair();
    let password = "pässwörd\u{1F512}";
    let token = encode_password(200, &pk_hex, password, "1700000000").unwrap();

    let fields = parse_token(&token).unwrap();
    assert_eq!(fields.ciphertext.len(), password.len());
    assert_eq!(open_token(&sk, &fields).unwrap(), password.as_bytes());
}

#[test]
fn mismatched_timestamp_aad_fails_authentication() {
    let (sk, pk_hex) = recipient_keypair();
    let token = encode_password(81, &pk_hex, "hunter2", "1700000000").unwrap();

    let mut fields = parse_token(&token).unwrap();
    fields.timestamp = "1700000001".to_owned();
    assert!(open_token(&sk, &fields).is_err());
}

#[test]
fn wrong_recipient_key_fails() {
    let (_, pk_hex) = recipient_keypair();
    let (other_sk, _) = recipient_keypair();
    let token = encode_password(81, &pk_hex, "hunter2", "1700000000").unwrap();

    let fields = parse_token(&token).unwrap();
    assert!(open_token(&other_sk, &fields).is_err());
}

#[test]
fn encode_is_nondeterministic() {
    let (_, pk_hex) = recipient_keypair();
    let a = encode_password(81, &pk_hex, "hunter2", "1700000000").unwrap();
    let b = encode_password(81, &pk_hex, "hunter2", "1700000000").unwrap();

    // Fresh randomness each call: identical inputs, different tokens.
    assert_ne!(a, b);
    let fa = parse_token(&a).unwrap();
    let fb = parse_token(&b).unwrap();
    assert_ne!(fa.encrypted_key, fb.encrypted_key);
    assert_ne!(fa.ciphertext, fb.ciphertext);
}

// ---------------------------------------------------------------------------
// Deterministic entropy injection
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
struct CountingEntropy(u8);

impl EntropySource for CountingEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandomnessError> {
        for b in dest.iter_mut() {
            *b = self.0;
            self.0 = self.0.wrapping_add(1);
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
struct BrokenEntropy;

impl EntropySource for BrokenEntropy {
    fn fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), RandomnessError> {
        Err(RandomnessError)
    }
}

#[test]
fn injected_entropy_is_reproducible() {
    let (_, pk_hex) = recipient_keypair();

    let a = PasswordEncoder::with_entropy(CountingEntropy(0))
        .encode(81, &pk_hex, "hunter2", "1700000000")
        .unwrap();
    let b = PasswordEncoder::with_entropy(CountingEntropy(0))
        .encode(81, &pk_hex, "hunter2", "1700000000")
        .unwrap();
    assert_eq!(a, b);

    // And it still opens correctly.
    let (sk, pk_hex) = recipient_keypair();
    let token = PasswordEncoder::with_entropy(CountingEntropy(7))
        .encode(81, &pk_hex, "hunter2", "1700000000")
        .unwrap();
    let plaintext = open_token(&sk, &parse_token(&token).unwrap()).unwrap();
    assert_eq!(plaintext, b"hunter2");
}

#[test]
fn entropy_failure_surfaces_as_randomness_error() {
    let (_, pk_hex) = recipient_keypair();
    let err = PasswordEncoder::with_entropy(BrokenEntropy)
        .encode(81, &pk_hex, "hunter2", "1700000000")
        .unwrap_err();
    assert_eq!(err, pwd_envelope::EncodeError::RandomnessError);
}

// ---------------------------------------------------------------------------
// Structural properties
// ---------------------------------------------------------------------------

proptest::proptest! {
    #[test]
    fn structural_invariants_hold(
        key_id: u8,
        password in "\\PC{0,64}",
        timestamp in "[0-9]{1,12}",
    ) {
        let pk_hex = "ab".repeat(32);
        let token = encode_password(key_id, &pk_hex, &password, &timestamp).unwrap();

        let fields = parse_token(&token).unwrap();
        proptest::prop_assert_eq!(fields.tag, "#PWD_INSTAGRAM_BROWSER");
        proptest::prop_assert_eq!(fields.transport_version, "10");
        proptest::prop_assert_eq!(fields.timestamp, timestamp);
        proptest::prop_assert_eq!(fields.key_id, key_id);
        proptest::prop_assert_eq!(fields.version, 1);
        proptest::prop_assert_eq!(fields.encrypted_key.len(), SEALED_KEY_BYTES);
        proptest::prop_assert_eq!(fields.auth_tag.len(), AEAD_TAG_BYTES);
        proptest::prop_assert_eq!(fields.ciphertext.len(), password.len());
    }
}
