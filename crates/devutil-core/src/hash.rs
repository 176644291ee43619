//! Multi-algorithm hash engine.
//!
//! Each supported algorithm is exposed through the same capability
//! ([`HashFunction`]: block size, output size, one-shot digest), selected
//! from [`HashAlgorithm`] by a lookup table rather than by trait objects
//! spread across call sites.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use digest::core_api::BlockSizeUser;
use digest::Digest;
use serde::{Deserialize, Serialize};

use crate::codec::encode_hex;
use crate::UtilityError;

// ── Algorithms ──────────────────────────────────────────────────────

/// Hash algorithms supported by [`generate_hashes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    Md2,
    Md4,
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    #[serde(rename = "sha3_256")]
    Sha3_256,
    Keccak256,
}

/// Every supported algorithm, in display order.
pub const ALL_ALGORITHMS: [HashAlgorithm; 10] = [
    HashAlgorithm::Md2,
    HashAlgorithm::Md4,
    HashAlgorithm::Md5,
    HashAlgorithm::Sha1,
    HashAlgorithm::Sha224,
    HashAlgorithm::Sha256,
    HashAlgorithm::Sha384,
    HashAlgorithm::Sha512,
    HashAlgorithm::Sha3_256,
    HashAlgorithm::Keccak256,
];

/// Capability record for a single hash primitive.
#[derive(Clone, Copy)]
pub struct HashFunction {
    block_size: fn() -> usize,
    output_size: fn() -> usize,
    digest: fn(&[u8]) -> Vec<u8>,
}

impl HashFunction {
    fn of<D: Digest + BlockSizeUser>() -> Self {
        Self {
            block_size: <D as BlockSizeUser>::block_size,
            output_size: <D as Digest>::output_size,
            digest: digest_with::<D>,
        }
    }

    /// Internal block size in bytes (the HMAC padding width).
    #[must_use]
    pub fn block_size(&self) -> usize {
        (self.block_size)()
    }

    /// Digest length in bytes.
    #[must_use]
    pub fn output_size(&self) -> usize {
        (self.output_size)()
    }

    /// One-shot digest of `data`.
    #[must_use]
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        (self.digest)(data)
    }
}

fn digest_with<D: Digest>(data: &[u8]) -> Vec<u8> {
    D::digest(data).to_vec()
}

impl HashAlgorithm {
    /// Look up the implementation for this algorithm.
    #[must_use]
    pub fn function(self) -> HashFunction {
        match self {
            Self::Md2 => HashFunction::of::<md2::Md2>(),
            Self::Md4 => HashFunction::of::<md4::Md4>(),
            Self::Md5 => HashFunction::of::<md5::Md5>(),
            Self::Sha1 => HashFunction::of::<sha1::Sha1>(),
            Self::Sha224 => HashFunction::of::<sha2::Sha224>(),
            Self::Sha256 => HashFunction::of::<sha2::Sha256>(),
            Self::Sha384 => HashFunction::of::<sha2::Sha384>(),
            Self::Sha512 => HashFunction::of::<sha2::Sha512>(),
            Self::Sha3_256 => HashFunction::of::<sha3::Sha3_256>(),
            Self::Keccak256 => HashFunction::of::<sha3::Keccak256>(),
        }
    }

    /// Human-readable algorithm name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Md2 => "MD2",
            Self::Md4 => "MD4",
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha224 => "SHA-224",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
            Self::Sha3_256 => "SHA3-256",
            Self::Keccak256 => "Keccak-256",
        }
    }

    /// Block size in bytes.
    #[must_use]
    pub fn block_size(self) -> usize {
        self.function().block_size()
    }

    /// Digest length in bytes.
    #[must_use]
    pub fn output_size(self) -> usize {
        self.function().output_size()
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = UtilityError;

    /// Parse loosely: case-insensitive, `-` and `_` ignored (`sha3-256`,
    /// `SHA3_256`, `keccak256` all work).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "md2" => Ok(Self::Md2),
            "md4" => Ok(Self::Md4),
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "sha224" => Ok(Self::Sha224),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            "sha3256" => Ok(Self::Sha3_256),
            "keccak256" => Ok(Self::Keccak256),
            _ => Err(UtilityError::UnsupportedAlgorithm(format!("unknown hash algorithm '{s}'"))),
        }
    }
}

// ── Digest set ──────────────────────────────────────────────────────

/// Hex digests of one input under every supported algorithm.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HashDigestSet {
    digests: BTreeMap<HashAlgorithm, String>,
}

impl HashDigestSet {
    /// Lowercase hex digest for `algorithm`.
    #[must_use]
    pub fn get(&self, algorithm: HashAlgorithm) -> Option<&str> {
        self.digests.get(&algorithm).map(String::as_str)
    }

    /// Iterate `(algorithm, hex digest)` pairs in [`ALL_ALGORITHMS`] order.
    pub fn iter(&self) -> impl Iterator<Item = (HashAlgorithm, &str)> {
        self.digests.iter().map(|(a, d)| (*a, d.as_str()))
    }

    /// Number of digests (always [`ALL_ALGORITHMS`]`.len()`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}

/// Digest `data` with a single algorithm.
#[must_use]
pub fn digest(algorithm: HashAlgorithm, data: &[u8]) -> Vec<u8> {
    algorithm.function().digest(data)
}

/// Hash the UTF-8 bytes of `input` under every supported algorithm.
///
/// Never fails; the empty string yields each algorithm's well-known empty digest.
#[must_use]
pub fn generate_hashes(input: &str) -> HashDigestSet {
    let data = input.as_bytes();
    let digests = ALL_ALGORITHMS
        .iter()
        .map(|algorithm| (*algorithm, encode_hex(&digest(*algorithm, data))))
        .collect();
    HashDigestSet { digests }
}

// ── Tests ───────────────────────────────────────────────────────────
