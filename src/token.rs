//! Transport token format.
//!
//! `#PWD_INSTAGRAM_BROWSER:<transportVersion>:<timestamp>:<base64(envelope)>`
//!
//! The transport version is the literal `10` and is distinct from the
//! envelope's internal version byte. The timestamp passes through verbatim.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::ParseError;
use crate::wire::{self, AEAD_TAG_BYTES};

/// Leading tag of every token.
pub const TOKEN_TAG: &str = "#PWD_INSTAGRAM_BROWSER";

/// Outer transport-format version.
pub const TRANSPORT_VERSION: &str = "10";

/// Wrap envelope bytes in the delimited text format.
pub fn format_token(timestamp: &str, envelope: &[u8]) -> String {
    format!(
        "{}:{}:{}:{}",
        TOKEN_TAG,
        TRANSPORT_VERSION,
        timestamp,
        STANDARD.encode(envelope)
    )
}

/// Structural fields recovered from a token, without decryption.
///
/// Only the holder of the recipient secret key can decrypt the sealed box;
/// this type exists for conformance testing and introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedToken {
    pub tag: String,
    pub transport_version: String,
    pub timestamp: String,
    pub key_id: u8,
    pub version: u8,
    pub encrypted_key: Vec<u8>,
    pub auth_tag: [u8; AEAD_TAG_BYTES],
    pub ciphertext: Vec<u8>,
}

/// Parse a transport token back into its structural fields.
pub fn parse_token(encoded: &str) -> Result<ParsedToken, ParseError> {
    let parts: Vec<&str> = encoded.split(':').collect();
    if parts.len() != 4 {
        return Err(ParseError::MalformedToken);
    }

    let envelope = STANDARD
        .decode(parts[3])
        .map_err(|_| ParseError::InvalidBase64)?;
    let components = wire::decode_envelope(&envelope)?;

    Ok(ParsedToken {
        tag: parts[0].to_owned(),
        transport_version: parts[1].to_owned(),
        timestamp: parts[2].to_owned(),
        key_id: components.key_id,
        version: components.version,
        encrypted_key: components.encrypted_key.to_vec(),
        auth_tag: *components.auth_tag,
        ciphertext: components.ciphertext.to_vec(),
    })
}
