//! Text encoding of secrets and hashes.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

/// URL-safe base64 that emits no padding and accepts input with or without it.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Text encoding for the secret and hash components of tokens and indices.
///
/// The output must never contain the configured field separator.
pub trait TokenEncoding: Send + Sync + std::fmt::Debug + 'static {
    /// Encode raw bytes.
    fn encode(&self, bytes: &[u8]) -> String;

    /// Decode text produced by [`TokenEncoding::encode`]. `None` if malformed.
    fn decode(&self, text: &str) -> Option<Vec<u8>>;
}

/// RFC 4648 §5 base64url without padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64UrlEncoding;

impl TokenEncoding for Base64UrlEncoding {
    fn encode(&self, bytes: &[u8]) -> String {
        URL_SAFE_LENIENT.encode(bytes)
    }

    fn decode(&self, text: &str) -> Option<Vec<u8>> {
        URL_SAFE_LENIENT.decode(text).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_safe_alphabet_without_padding() {
        let encoded = Base64UrlEncoding.encode(&[0xfb, 0xff, 0xfe]);
        assert_eq!(encoded, "-__-");

        let encoded = Base64UrlEncoding.encode(&[0x01]);
        assert_eq!(encoded, "AQ");
    }

    #[test]
    fn test_decode_accepts_padding() {
        assert_eq!(Base64UrlEncoding.decode("AQ"), Some(vec![0x01]));
        assert_eq!(Base64UrlEncoding.decode("AQ=="), Some(vec![0x01]));
    }

    #[test]
    fn test_decode_rejects_standard_alphabet() {
        assert_eq!(Base64UrlEncoding.decode("+/+/"), None);
        assert_eq!(Base64UrlEncoding.decode("not base64!"), None);
    }

    #[test]
    fn test_secret_length_encodes_without_remainder() {
        let encoded = Base64UrlEncoding.encode(&[7u8; crate::crypto::SECRET_LENGTH]);
        assert_eq!(encoded.len(), 128);
    }
}
