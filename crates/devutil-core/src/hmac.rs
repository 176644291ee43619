//! Keyed hashing (RFC 2104 HMAC) over the SHA family, backed by `ring::hmac`.

use ring::hmac;

use crate::hash::HashAlgorithm;

/// Constant-time byte comparison.
///
/// Returns `true` iff both slices have equal length and identical contents.
/// Uses bitwise OR accumulation to avoid short-circuit timing leaks.
///
/// The early return on length mismatch is acceptable: code and signature
/// lengths are fixed by the algorithm and are public. The constant-time
/// property protects the *value*, not its length.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Hash function underlying an HMAC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MacAlgorithm {
    /// HMAC-SHA1 (legacy, still the authenticator-app default).
    Sha1,
    /// HMAC-SHA256.
    Sha256,
    /// HMAC-SHA384.
    Sha384,
    /// HMAC-SHA512.
    Sha512,
}

impl MacAlgorithm {
    /// Map to the corresponding `ring::hmac::Algorithm`.
    fn to_ring_algorithm(self) -> hmac::Algorithm {
        match self {
            Self::Sha1 => hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
            Self::Sha256 => hmac::HMAC_SHA256,
            Self::Sha384 => hmac::HMAC_SHA384,
            Self::Sha512 => hmac::HMAC_SHA512,
        }
    }

    /// The hash primitive this MAC is built on.
    #[must_use]
    pub const fn hash_algorithm(self) -> HashAlgorithm {
        match self {
            Self::Sha1 => HashAlgorithm::Sha1,
            Self::Sha256 => HashAlgorithm::Sha256,
            Self::Sha384 => HashAlgorithm::Sha384,
            Self::Sha512 => HashAlgorithm::Sha512,
        }
    }

    /// Tag length in bytes (equal to the hash output size).
    #[must_use]
    pub fn output_size(self) -> usize {
        self.hash_algorithm().output_size()
    }
}

/// Compute `HMAC(key, message)`.
#[must_use]
pub fn sign(algorithm: MacAlgorithm, key: &[u8], message: &[u8]) -> Vec<u8> {
    let key = hmac::Key::new(algorithm.to_ring_algorithm(), key);
    hmac::sign(&key, message).as_ref().to_vec()
}

/// Check `tag` against `HMAC(key, message)` in constant time.
#[must_use]
pub fn verify(algorithm: MacAlgorithm, key: &[u8], message: &[u8], tag: &[u8]) -> bool {
    constant_time_eq(&sign(algorithm, key, message), tag)
}
