//! Share tokens for reveal links.
//!
//! A token only keeps a participant's details from being human-readable in
//! a URL. It is an obfuscation, not encryption: anyone holding the key (which
//! ships with the service) can read it.
//!
//! Layout before base64url: `checksum[4] || payload`, where `payload` is the
//! cleaned JSON XOR'ed with a SHA-256 keystream and `checksum` is the first
//! four bytes of SHA-256 over the cleaned JSON.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;

pub const DEFAULT_SHARE_KEY: &str = "not a real key";

/// Query parameter carrying the token
pub const SECRET_PARAM: &str = "secret";

const CHECKSUM_LEN: usize = 4;

/// Errors that can occur when reading a share token
#[derive(Debug, Error)]
pub enum ShareTokenError {
    #[error("Token is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Token is too short")]
    Truncated,

    #[error("Token checksum does not match")]
    ChecksumMismatch,

    #[error("Token payload is not valid JSON: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Secret is not valid percent-encoding: {0}")]
    PercentEncoding(#[from] std::string::FromUtf8Error),
}

/// Copy of `data` without null-valued object members. Applying it twice
/// gives the same result as applying it once.
pub fn cleaned_object(data: &Value) -> Value {
    match data {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Reversible encoding of a single record for use in a link
#[derive(Debug, Clone)]
pub struct ShareTokenCodec {
    key: Vec<u8>,
}

impl Default for ShareTokenCodec {
    fn default() -> Self {
        Self::new(DEFAULT_SHARE_KEY)
    }
}

impl ShareTokenCodec {
    pub fn new(key: impl AsRef<[u8]>) -> Self {
        Self {
            key: key.as_ref().to_vec(),
        }
    }

    /// Clean `data` and turn it into an opaque token
    pub fn encode<T: Serialize>(&self, data: &T) -> Result<String, ShareTokenError> {
        let cleaned = cleaned_object(&serde_json::to_value(data)?);
        let plain = serde_json::to_vec(&cleaned)?;

        let mut bytes = Vec::with_capacity(CHECKSUM_LEN + plain.len());
        bytes.extend_from_slice(&checksum(&plain));
        bytes.extend(self.apply_keystream(&plain));

        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Inverse of [`ShareTokenCodec::encode`]
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, ShareTokenError> {
        let bytes = URL_SAFE_NO_PAD.decode(token.trim())?;
        if bytes.len() < CHECKSUM_LEN {
            return Err(ShareTokenError::Truncated);
        }

        let (expected, payload) = bytes.split_at(CHECKSUM_LEN);
        let plain = self.apply_keystream(payload);
        if checksum(&plain) != expected {
            return Err(ShareTokenError::ChecksumMismatch);
        }

        Ok(serde_json::from_slice(&plain)?)
    }

    /// `base_url` with the encoded token in the `secret` query parameter
    pub fn build_share_link<T: Serialize>(&self, base_url: &str, data: &T) -> Result<String, ShareTokenError> {
        let token = self.encode(data)?;
        let separator = if base_url.contains('?') { '&' } else { '?' };
        Ok(format!(
            "{}{}{}={}",
            base_url,
            separator,
            SECRET_PARAM,
            urlencoding::encode(&token)
        ))
    }

    /// Decode the raw, still percent-encoded `secret` value of a link
    pub fn decode_share_secret<T: DeserializeOwned>(&self, secret: &str) -> Result<T, ShareTokenError> {
        let token = urlencoding::decode(secret)?;
        self.decode(&token)
    }

    fn apply_keystream(&self, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(data.len());
        for (counter, chunk) in data.chunks(32).enumerate() {
            let block = Sha256::new()
                .chain_update(&self.key)
                .chain_update((counter as u64).to_le_bytes())
                .finalize();
            out.extend(chunk.iter().zip(block.iter()).map(|(byte, mask)| byte ^ mask));
        }
        out
    }
}

fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha256::digest(data);
    let mut sum = [0u8; CHECKSUM_LEN];
    sum.copy_from_slice(&digest[..CHECKSUM_LEN]);
    sum
}
