//! Content fingerprinting for cache-busted filenames.
//!
//! The fingerprint is a pure function of the input bytes, so identical
//! content always maps to the identical output filename and re-running a
//! build overwrites an artifact with the same bytes.

use sha2::{Digest, Sha256};

/// Compute an 8-hex-char content fingerprint.
///
/// Truncated sha256, e.g. `styles-a1b2c3d4.css`.
pub fn fingerprint<T: AsRef<[u8]> + ?Sized>(data: &T) -> String {
    let digest = Sha256::digest(data.as_ref());
    digest[..4].iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_deterministic() {
        assert_eq!(fingerprint("body {}"), fingerprint("body {}"));
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        assert_ne!(fingerprint("body {}"), fingerprint("body { color: red }"));
    }

    #[test]
    fn test_fingerprint_is_eight_hex_chars() {
        let fp = fingerprint("anything");
        assert_eq!(fp.len(), 8);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
