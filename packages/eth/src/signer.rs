use std::str::FromStr;

use alloy::signers::local::PrivateKeySigner;

use crate::{Error, Result};

/// Parses a hex-encoded secp256k1 private key, with or without a `0x`
/// prefix. The key material never appears in the error.
pub fn signer_from_hex(key: &str) -> Result<PrivateKeySigner> {
    let trimmed = key.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);

    PrivateKeySigner::from_str(digits)
        .map_err(|_| Error::Wallet("private key is not a valid secp256k1 scalar".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn accepts_a_key_with_and_without_prefix() {
        // given
        let prefixed = format!("0x{KEY}");

        // when
        let bare_signer = signer_from_hex(KEY).unwrap();
        let prefixed_signer = signer_from_hex(&prefixed).unwrap();

        // then
        assert_eq!(bare_signer.address(), prefixed_signer.address());
    }

    #[test]
    fn rejects_garbage_without_echoing_it() {
        // given
        let not_a_key = "deadbeef";

        // when
        let err = signer_from_hex(not_a_key).unwrap_err();

        // then
        assert!(!err.to_string().contains(not_a_key));
    }
}
