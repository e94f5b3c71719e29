//! Cache-busting placeholder signatures.
//!
//! Rendered output can embed placeholder markers that a caller
//! post-processes (for example, swapping in late-bound page fragments).
//! The marker token is derived from a secret salt so stale markers from
//! an earlier salt are recognizably invalid. Rotating the salt is the
//! caller's concern; this module only guarantees that the token is a
//! stable, fixed-width function of the salt.

use sha2::{Digest, Sha256};

/// Width of a placeholder signature, in hex characters.
pub const SIGNATURE_WIDTH: usize = 8;

/// Derives the placeholder signature for a salt.
///
/// Deterministic: the same salt always yields the same token. The token
/// is always [`SIGNATURE_WIDTH`] lowercase hex characters, for any input
/// including the empty string.
pub fn signature(salt: &str) -> String {
    let digest = Sha256::digest(salt.as_bytes());
    digest[..SIGNATURE_WIDTH / 2]
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_signature_is_deterministic() {
        assert_eq!(signature("apple"), signature("apple"));
    }

    #[test]
    fn test_distinct_salts_yield_distinct_signatures() {
        assert_ne!(signature("apple"), signature("orange"));
        assert_ne!(signature(""), signature("apple"));
    }

    #[test]
    fn test_signature_width_is_fixed() {
        for salt in ["", "a", "apple", "a much longer salt value", "füße"] {
            assert_eq!(signature(salt).len(), SIGNATURE_WIDTH);
        }
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let token = signature("apple");
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    proptest! {
        #[test]
        fn prop_signature_is_stable_and_fixed_width(salt in ".*") {
            let first = signature(&salt);
            let second = signature(&salt);

            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), SIGNATURE_WIDTH);
        }
    }
}
