//! SHA-256 digests used to derive stable configuration names

use sha2::{Digest, Sha256};

/// Hex SHA-256 digest over the given parts, fed in order.
///
/// Each part is followed by a NUL byte so `["ab", "c"]` and `["a", "bc"]`
/// produce different digests.
pub fn digest_hex(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    format!("{:x}", hasher.finalize())
}
