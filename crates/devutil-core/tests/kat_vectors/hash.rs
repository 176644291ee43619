//! Well-known digests of the empty string and "abc".

use devutil_core::hash::{generate_hashes, HashAlgorithm, ALL_ALGORITHMS};

const EMPTY_DIGESTS: [(HashAlgorithm, &str); 10] = [
    (HashAlgorithm::Md2, "8350e5a3e24c153df2275c9f80692773"),
    (HashAlgorithm::Md4, "31d6cfe0d16ae931b73c59d7e0c089c0"),
    (HashAlgorithm::Md5, "d41d8cd98f00b204e9800998ecf8427e"),
    (HashAlgorithm::Sha1, "da39a3ee5e6b4b0d3255bfef95601890afd80709"),
    (
        HashAlgorithm::Sha224,
        "d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f",
    ),
    (
        HashAlgorithm::Sha256,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
    ),
    (
        HashAlgorithm::Sha384,
        "38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da\
         274edebfe76f65fbd51ad2f14898b95b",
    ),
    (
        HashAlgorithm::Sha512,
        "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
         47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e",
    ),
    (
        HashAlgorithm::Sha3_256,
        "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a",
    ),
    (
        HashAlgorithm::Keccak256,
        "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470",
    ),
];

#[test]
fn empty_input_digests() {
    let set = generate_hashes("");
    assert_eq!(set.len(), ALL_ALGORITHMS.len());
    for (algorithm, expected) in EMPTY_DIGESTS {
        assert_eq!(set.get(algorithm), Some(expected), "{algorithm} of empty input");
    }
}

#[test]
fn abc_digests_from_fips_and_rfc() {
    let set = generate_hashes("abc");
    assert_eq!(set.get(HashAlgorithm::Md2), Some("da853b0d3f88d99b30283a69e6ded6bb"));
    assert_eq!(set.get(HashAlgorithm::Md4), Some("a448017aaf21d8525fc10ae87aa6729d"));
    assert_eq!(
        set.get(HashAlgorithm::Sha224),
        Some("23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7")
    );
}
