use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng, RngCore};
use ulid::Ulid;
use uuid::{Builder, Uuid, Variant, Version};

use super::{parse_namespace, BatchSize};
use crate::clock::Clock;
use crate::hash::{digest, HashAlgorithm};
use crate::UtilityError;

/// Default Nano ID length (126 bits of entropy over the URL-safe alphabet).
pub const DEFAULT_NANOID_SIZE: usize = 21;

/// Longest Nano ID a caller may request.
pub const MAX_NANOID_SIZE: usize = 256;

/// 100-ns ticks between 1582-10-15 (Gregorian reform) and 1970-01-01.
pub(super) const GREGORIAN_OFFSET_TICKS: u64 = 0x01B2_1DD2_1381_4000;

/// v1 timestamps are 60 bits wide.
const MAX_V1_TICKS: u64 = 0x0FFF_FFFF_FFFF_FFFF;

/// Largest millisecond count the 48-bit v7 timestamp field holds.
const MAX_V7_MILLIS: u64 = 0xFFFF_FFFF_FFFF;

/// ULIDs carry 80 random bits after the timestamp.
const ULID_RANDOM_MASK: u128 = 0xFFFF_FFFF_FFFF_FFFF_FFFF;

/// Random UUIDs (RFC 4122 §4.4).
pub fn generate_uuid_v4<R: RngCore + CryptoRng>(count: BatchSize, rng: &mut R) -> Vec<String> {
    (0..count.get())
        .map(|_| {
            let mut bytes = [0u8; 16];
            rng.fill_bytes(&mut bytes);
            Builder::from_random_bytes(bytes).into_uuid().to_string()
        })
        .collect()
}

/// Unix-time-ordered UUIDs: 48-bit millisecond timestamp, then 74 random bits.
///
/// `timestamp` is in seconds; without it the clock is read once for the batch.
///
/// # Errors
/// Returns `InvalidParameters` if `timestamp` does not fit the 48-bit
/// millisecond field.
pub fn generate_uuid_v7<R: RngCore + CryptoRng>(
    count: BatchSize,
    timestamp: Option<u64>,
    clock: &impl Clock,
    rng: &mut R,
) -> Result<Vec<String>, UtilityError> {
    let millis = match timestamp {
        Some(seconds) => seconds
            .checked_mul(1000)
            .filter(|ms| *ms <= MAX_V7_MILLIS)
            .ok_or_else(|| {
                UtilityError::InvalidParameters(format!("timestamp {seconds} is out of range"))
            })?,
        None => clock.unix_millis(),
    };

    Ok((0..count.get())
        .map(|_| {
            let mut random = [0u8; 10];
            rng.fill_bytes(&mut random);
            Builder::from_unix_timestamp_millis(millis, &random)
                .into_uuid()
                .to_string()
        })
        .collect())
}

/// Gregorian-time UUIDs (RFC 4122 §4.2).
///
/// One random 14-bit clock sequence is drawn per batch and each successive
/// UUID advances the timestamp by one 100-ns tick. Without `mac_address` the
/// node is random with the multicast bit set (RFC 4122 §4.5).
///
/// # Errors
/// Returns `InvalidParameters` for a malformed MAC address or a timestamp
/// outside the 60-bit v1 range.
pub fn generate_uuid_v1<R: RngCore + CryptoRng>(
    count: BatchSize,
    timestamp: Option<u64>,
    mac_address: Option<&str>,
    clock: &impl Clock,
    rng: &mut R,
) -> Result<Vec<String>, UtilityError> {
    let node = match mac_address {
        Some(mac) => parse_mac_address(mac)?,
        None => {
            let mut node = [0u8; 6];
            rng.fill_bytes(&mut node);
            node[0] |= 0x01;
            node
        }
    };
    let clock_sequence: u16 = rng.gen::<u16>() & 0x3FFF;

    let unix_ticks = match timestamp {
        Some(seconds) => seconds.checked_mul(10_000_000),
        None => u64::try_from(clock.now().as_nanos() / 100).ok(),
    };
    let start = unix_ticks
        .and_then(|t| t.checked_add(GREGORIAN_OFFSET_TICKS))
        .filter(|t| *t <= MAX_V1_TICKS)
        .ok_or_else(|| {
            UtilityError::InvalidParameters("timestamp is outside the UUID v1 range".to_owned())
        })?;

    (0..count.get())
        .map(|i| {
            let ticks = u64::try_from(i)
                .ok()
                .and_then(|i| start.checked_add(i))
                .filter(|t| *t <= MAX_V1_TICKS)
                .ok_or_else(|| {
                    UtilityError::InvalidParameters(
                        "timestamp is outside the UUID v1 range".to_owned(),
                    )
                })?;
            Ok(time_based_uuid(ticks, clock_sequence, node).to_string())
        })
        .collect()
}

/// Lay out a 60-bit tick count, clock sequence and node as a version-1 UUID.
#[allow(clippy::arithmetic_side_effects)] // fixed-width bit packing
fn time_based_uuid(ticks: u64, clock_sequence: u16, node: [u8; 6]) -> Uuid {
    let time_low = (ticks & 0xFFFF_FFFF) as u32;
    let time_mid = ((ticks >> 32) & 0xFFFF) as u16;
    let time_high = ((ticks >> 48) & 0x0FFF) as u16;
    let [seq_high, seq_low] = clock_sequence.to_be_bytes();
    let tail = [
        seq_high,
        seq_low,
        node[0],
        node[1],
        node[2],
        node[3],
        node[4],
        node[5],
    ];
    Builder::from_fields(time_low, time_mid, time_high, &tail)
        .with_version(Version::Mac)
        .with_variant(Variant::RFC4122)
        .into_uuid()
}

/// Parse `AA:BB:CC:DD:EE:FF` (or `-`-separated) into node bytes.
fn parse_mac_address(mac: &str) -> Result<[u8; 6], UtilityError> {
    let invalid = || {
        UtilityError::InvalidParameters(format!("MAC address must be six hex octets, got '{mac}'"))
    };

    let octets: Vec<u8> = mac
        .trim()
        .split([':', '-'])
        .map(|part| {
            if part.len() == 2 {
                u8::from_str_radix(part, 16).map_err(|_| invalid())
            } else {
                Err(invalid())
            }
        })
        .collect::<Result<_, _>>()?;
    octets.try_into().map_err(|_| invalid())
}

/// MD5 name-based UUIDs (RFC 4122 §4.3). Every entry of the batch is identical.
///
/// # Errors
/// Returns `InvalidParameters` for an unknown namespace.
pub fn generate_uuid_v3(
    count: BatchSize,
    namespace: &str,
    name: &str,
) -> Result<Vec<String>, UtilityError> {
    let id = name_based_uuid(HashAlgorithm::Md5, namespace, name)?;
    Ok(vec![id.to_string(); count.get()])
}

/// SHA-1 name-based UUIDs (RFC 4122 §4.3). Every entry of the batch is identical.
///
/// # Errors
/// Returns `InvalidParameters` for an unknown namespace.
pub fn generate_uuid_v5(
    count: BatchSize,
    namespace: &str,
    name: &str,
) -> Result<Vec<String>, UtilityError> {
    let id = name_based_uuid(HashAlgorithm::Sha1, namespace, name)?;
    Ok(vec![id.to_string(); count.get()])
}

fn name_based_uuid(
    algorithm: HashAlgorithm,
    namespace: &str,
    name: &str,
) -> Result<Uuid, UtilityError> {
    let namespace = parse_namespace(namespace)?;
    let mut input = Vec::with_capacity(16usize.saturating_add(name.len()));
    input.extend_from_slice(namespace.as_bytes());
    input.extend_from_slice(name.as_bytes());

    let hash = digest(algorithm, &input);
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(hash.get(..16).ok_or_else(|| {
        UtilityError::UnsupportedAlgorithm(format!("{algorithm} digest is shorter than a UUID"))
    })?);

    let builder = match algorithm {
        HashAlgorithm::Md5 => Builder::from_md5_bytes(bytes),
        _ => Builder::from_sha1_bytes(bytes),
    };
    Ok(builder.into_uuid())
}

/// ULIDs: 48-bit millisecond timestamp and 80 random bits, Crockford Base32.
///
/// The clock is read once; ULIDs of one batch share the timestamp.
pub fn generate_ulid<R: RngCore + CryptoRng>(
    count: BatchSize,
    clock: &impl Clock,
    rng: &mut R,
) -> Vec<String> {
    let millis = clock.unix_millis();
    (0..count.get())
        .map(|_| Ulid::from_parts(millis, rng.gen::<u128>() & ULID_RANDOM_MASK).to_string())
        .collect()
}

/// Nano IDs over the URL-safe alphabet or a caller-supplied one.
///
/// Each symbol is drawn uniformly from the alphabet with `rng`.
///
/// # Errors
/// Returns `InvalidParameters` if `size` is outside `1..=MAX_NANOID_SIZE`, or
/// if `alphabet` has fewer than 2 or more than 255 symbols, or repeats one.
pub fn generate_nanoid<R: RngCore + CryptoRng>(
    count: BatchSize,
    size: usize,
    alphabet: Option<&str>,
    rng: &mut R,
) -> Result<Vec<String>, UtilityError> {
    if !(1..=MAX_NANOID_SIZE).contains(&size) {
        return Err(UtilityError::InvalidParameters(format!(
            "Nano ID size must be between 1 and {MAX_NANOID_SIZE}, got {size}"
        )));
    }

    let symbols: Vec<char> = match alphabet {
        None => nanoid::alphabet::SAFE.to_vec(),
        Some(alphabet) => {
            let symbols: Vec<char> = alphabet.chars().collect();
            let mut unique = symbols.clone();
            unique.sort_unstable();
            unique.dedup();
            if unique.len() != symbols.len() || !(2..=255).contains(&symbols.len()) {
                return Err(UtilityError::InvalidParameters(
                    "alphabet must have 2 to 255 distinct symbols".to_owned(),
                ));
            }
            symbols
        }
    };

    Ok((0..count.get())
        .map(|_| {
            (0..size)
                .filter_map(|_| symbols.choose(rng).copied())
                .collect::<String>()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::identifier::MAX_BATCH;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn batch(n: u64) -> BatchSize {
        BatchSize::new(n, MAX_BATCH).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn v4_has_version_and_variant() {
        for id in generate_uuid_v4(batch(50), &mut rng()) {
            let uuid = Uuid::parse_str(&id).unwrap();
            assert_eq!(uuid.get_version_num(), 4);
            assert_eq!(uuid.get_variant(), Variant::RFC4122);
        }
    }

    #[test]
    fn v7_embeds_clock_millis() {
        let clock = FixedClock::from_unix_millis(1_700_000_000_123);
        let ids = generate_uuid_v7(batch(3), None, &clock, &mut rng()).unwrap();
        for id in &ids {
            let uuid = Uuid::parse_str(id).unwrap();
            assert_eq!(uuid.get_version_num(), 7);
            let b = uuid.as_bytes();
            let millis = u64::from_be_bytes([0, 0, b[0], b[1], b[2], b[3], b[4], b[5]]);
            assert_eq!(millis, 1_700_000_000_123);
        }
        assert!(id_prefixes_equal(&ids, 13));
    }

    #[test]
    fn v7_explicit_timestamp_is_seconds() {
        let clock = FixedClock::from_unix_seconds(0);
        let ids = generate_uuid_v7(batch(1), Some(1_700_000_000), &clock, &mut rng()).unwrap();
        assert!(ids[0].starts_with("018bcfe5-6800-7"));
    }

    #[test]
    fn v7_rejects_timestamps_beyond_48_bits() {
        let clock = FixedClock::from_unix_seconds(0);
        let ids = generate_uuid_v7(batch(1), Some(281_474_976_710), &clock, &mut rng()).unwrap();
        let b = *Uuid::parse_str(&ids[0]).unwrap().as_bytes();
        let millis = u64::from_be_bytes([0, 0, b[0], b[1], b[2], b[3], b[4], b[5]]);
        assert_eq!(millis, 281_474_976_710_000);

        for seconds in [281_474_976_711, 300_000_000_000, u64::MAX] {
            let result = generate_uuid_v7(batch(1), Some(seconds), &clock, &mut rng());
            assert!(matches!(result, Err(UtilityError::InvalidParameters(_))), "{seconds}");
        }
    }

    fn id_prefixes_equal(ids: &[String], len: usize) -> bool {
        ids.windows(2).all(|w| w[0][..len] == w[1][..len])
    }

    #[test]
    fn v1_with_mac_and_timestamp() {
        let clock = FixedClock::from_unix_seconds(0);
        let ids = generate_uuid_v1(
            batch(2),
            Some(1_700_000_000),
            Some("aa:bb:cc:dd:ee:ff"),
            &clock,
            &mut rng(),
        )
        .unwrap();
        let first = Uuid::parse_str(&ids[0]).unwrap();
        let second = Uuid::parse_str(&ids[1]).unwrap();
        assert_eq!(first.get_version_num(), 1);
        assert_eq!(first.get_variant(), Variant::RFC4122);
        assert!(ids[0].ends_with("-aabbccddeeff"));
        let t1 = ticks_of(&first);
        assert_eq!(t1, 1_700_000_000 * 10_000_000 + GREGORIAN_OFFSET_TICKS);
        assert_eq!(ticks_of(&second), t1 + 1);
    }

    fn ticks_of(uuid: &Uuid) -> u64 {
        let (low, mid, high, _) = uuid.as_fields();
        (u64::from(high & 0x0FFF) << 48) | (u64::from(mid) << 32) | u64::from(low)
    }

    #[test]
    fn v1_random_node_is_multicast() {
        let clock = FixedClock::from_unix_seconds(1_700_000_000);
        let ids = generate_uuid_v1(batch(1), None, None, &clock, &mut rng()).unwrap();
        let uuid = Uuid::parse_str(&ids[0]).unwrap();
        assert_eq!(uuid.as_bytes()[10] & 0x01, 0x01);
    }

    #[test]
    fn v1_rejects_bad_mac() {
        let clock = FixedClock::from_unix_seconds(0);
        for mac in ["aa:bb:cc", "zz:bb:cc:dd:ee:ff", "aabbccddeeff", "aa:bb:cc:dd:ee:ff:00"] {
            let result = generate_uuid_v1(batch(1), None, Some(mac), &clock, &mut rng());
            assert!(matches!(result, Err(UtilityError::InvalidParameters(_))), "{mac}");
        }
    }

    #[test]
    fn v1_rejects_out_of_range_timestamp() {
        let clock = FixedClock::from_unix_seconds(0);
        let result = generate_uuid_v1(batch(1), Some(u64::MAX / 10), None, &clock, &mut rng());
        assert!(matches!(result, Err(UtilityError::InvalidParameters(_))));
    }

    #[test]
    fn v3_v5_known_vectors() {
        assert_eq!(
            generate_uuid_v3(batch(1), "dns", "python.org").unwrap(),
            vec!["6fa459ea-ee8a-3ca4-894e-db77e160355e"]
        );
        assert_eq!(
            generate_uuid_v5(batch(2), "dns", "python.org").unwrap(),
            vec![
                "886313e1-3b8a-5372-9b90-0c9aee199e5d",
                "886313e1-3b8a-5372-9b90-0c9aee199e5d"
            ]
        );
    }

    #[test]
    fn ulid_layout() {
        let clock = FixedClock::from_unix_millis(1_700_000_000_123);
        let ids = generate_ulid(batch(5), &clock, &mut rng());
        for id in &ids {
            assert_eq!(id.len(), 26);
            let ulid = Ulid::from_string(id).unwrap();
            assert_eq!(ulid.timestamp_ms(), 1_700_000_000_123);
        }
        assert!(id_prefixes_equal(&ids, 10));
    }

    #[test]
    fn nanoid_default_alphabet_and_size() {
        let ids = generate_nanoid(batch(20), DEFAULT_NANOID_SIZE, None, &mut rng()).unwrap();
        for id in ids {
            assert_eq!(id.chars().count(), 21);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        }
    }

    #[test]
    fn nanoid_is_reproducible_with_seeded_rng() {
        let first = generate_nanoid(batch(3), 12, None, &mut rng()).unwrap();
        let second = generate_nanoid(batch(3), 12, None, &mut rng()).unwrap();
        assert_eq!(first, second);
        assert_ne!(first[0], first[1]);
    }

    #[test]
    fn nanoid_custom_alphabet() {
        let ids = generate_nanoid(batch(10), 8, Some("01"), &mut rng()).unwrap();
        for id in ids {
            assert_eq!(id.len(), 8);
            assert!(id.chars().all(|c| c == '0' || c == '1'));
        }
    }

    #[test]
    fn nanoid_rejects_bad_parameters() {
        let cases = [
            (0, None),
            (MAX_NANOID_SIZE + 1, None),
            (8, Some("a")),
            (8, Some("abca")),
        ];
        for (size, alphabet) in cases {
            let result = generate_nanoid(batch(1), size, alphabet, &mut rng());
            assert!(matches!(result, Err(UtilityError::InvalidParameters(_))));
        }
    }
}
