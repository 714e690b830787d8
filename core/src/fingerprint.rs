//! Fingerprint derivation.
//!
//! Encodes a parsed ClientHello into a fixed-format string identifier: a
//! readable prefix (version tag, SNI flag, cipher and extension counts, ALPN
//! flag) followed by two truncated SHA-256 digests of the sorted cipher-suite
//! and extension-type lists.

use crate::protocols::tls::ClientHelloInfo;

use std::cmp;
use std::fmt;

use itertools::Itertools;
use ring::digest;
use serde::Serialize;

/// Number of hex characters kept from each digest.
const HASH_LEN: usize = 12;

/// Largest count representable in the two-digit prefix fields.
const MAX_COUNT: usize = 99;

/// A TLS client fingerprint.
///
/// Immutable once derived. Two fingerprints are equal iff their string
/// representations are byte-equal; ordering is lexicographic on the string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Derives the fingerprint of `info`.
    ///
    /// Pure, with no failure path: any successfully parsed ClientHello is
    /// encodable. Cipher suites and extension types are sorted before
    /// hashing, making the fingerprint invariant to wire-order jitter across
    /// repeated handshakes from the same client while staying sensitive to
    /// the offered set.
    pub fn encode(info: &ClientHelloInfo) -> Fingerprint {
        let version = match info.version {
            0x0301 => "t10",
            0x0302 => "t11",
            0x0303 => "t12",
            // TLS 1.3, and unknown or future versions aliased to the latest
            // known generation.
            _ => "t13",
        };
        let sni = if info.has_sni { "d" } else { "i" };
        let alpn = if info.has_alpn { "h2" } else { "00" };

        Fingerprint(format!(
            "{}{}{:02}{:02}{}_{}_{}",
            version,
            sni,
            cmp::min(info.cipher_count(), MAX_COUNT),
            cmp::min(info.extension_count(), MAX_COUNT),
            alpn,
            sorted_hash(&info.cipher_suites),
            sorted_hash(&info.extension_types),
        ))
    }

    /// Returns the fingerprint as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Fingerprint {
    fn from(s: String) -> Self {
        Fingerprint(s)
    }
}

impl From<&str> for Fingerprint {
    fn from(s: &str) -> Self {
        Fingerprint(s.to_string())
    }
}

/// Sorts a copy of `values`, renders each as 4 lowercase hex digits joined
/// with commas, and returns the first 12 hex characters of the SHA-256
/// digest of the result.
fn sorted_hash(values: &[u16]) -> String {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let joined = sorted.iter().map(|v| format!("{:04x}", v)).join(",");
    let hash = digest::digest(&digest::SHA256, joined.as_bytes());
    hex::encode(hash.as_ref())[..HASH_LEN].to_string()
}
