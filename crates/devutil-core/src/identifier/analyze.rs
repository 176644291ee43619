use serde::{Serialize, Serializer};
use uuid::{Uuid, Variant};

use super::generate::GREGORIAN_OFFSET_TICKS;
use super::parse_uuid_text;
use crate::codec::encode_hex;
use crate::UtilityError;

const TICKS_PER_SECOND: u64 = 10_000_000;

/// Decomposition of one UUID string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UuidRecord {
    /// Lowercase hyphenated form.
    pub canonical_string: String,
    pub version: UuidVersion,
    pub version_name: String,
    pub variant: String,
    pub version_specific_fields: VersionFields,
}

/// RFC 4122 / RFC 9562 version number, or unknown for Nil, Max, non-RFC
/// variants and unassigned version nibbles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UuidVersion {
    Known(u8),
    Unknown,
}

impl Serialize for UuidVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(n) => serializer.serialize_u8(*n),
            Self::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

/// Fields that only make sense for one version; exactly one variant per record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum VersionFields {
    V1(TimeBasedFields),
    /// v3 (MD5) and v5 (SHA-1).
    NameBased(NameBasedFields),
    #[serde(rename_all = "camelCase")]
    V4 {
        /// Hex of all 16 bytes with version and variant bits cleared.
        random_bits: String,
    },
    V6(TimeBasedFields),
    V7(UnixTimeFields),
    #[serde(rename_all = "camelCase")]
    V8 {
        /// Hex of all 16 bytes with version and variant bits cleared.
        custom_bits: String,
    },
    None,
}

/// Gregorian timestamp, clock sequence and node of a v1 or v6 UUID.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBasedFields {
    /// 100-ns intervals since 1582-10-15.
    pub timestamp_raw: u64,
    /// Only present for instants at or after the Unix epoch.
    pub unix_seconds: Option<u64>,
    pub unix_nanos: Option<u32>,
    pub clock_sequence: u16,
    pub node_id: String,
    /// Node as `AA:BB:CC:DD:EE:FF`.
    pub mac_address: String,
    pub is_multicast: bool,
    pub is_locally_administered: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameBasedFields {
    pub hash_algorithm: String,
    pub description: String,
}

/// Millisecond timestamp and random payload of a v7 UUID.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnixTimeFields {
    pub unix_millis: u64,
    /// 12 bits after the version nibble.
    pub rand_a: String,
    /// 62 bits after the variant.
    pub rand_b: String,
}

/// Parse and decompose a UUID.
///
/// Accepts the 36-character hyphenated or 32-character plain hex form,
/// any case, with surrounding whitespace trimmed.
///
/// # Errors
/// Returns `UtilityError::MalformedInput` for a syntactically invalid UUID or
/// for the reserved `111` variant (the Max UUID excepted).
pub fn analyze_uuid(input: &str) -> Result<UuidRecord, UtilityError> {
    let uuid = parse_uuid_text(input.trim())?;
    let is_max = uuid.as_bytes() == &[0xFF; 16];
    let variant = uuid.get_variant();

    if variant == Variant::Future && !is_max {
        return Err(UtilityError::MalformedInput(
            "UUID uses the reserved variant bits 111".to_owned(),
        ));
    }

    let (version, version_name, fields) = if uuid.is_nil() {
        (UuidVersion::Unknown, "Nil", VersionFields::None)
    } else if is_max {
        (UuidVersion::Unknown, "Max", VersionFields::None)
    } else if variant == Variant::RFC4122 {
        decompose(&uuid)
    } else {
        (UuidVersion::Unknown, "Unknown", VersionFields::None)
    };

    Ok(UuidRecord {
        canonical_string: uuid.hyphenated().to_string(),
        version,
        version_name: version_name.to_owned(),
        variant: variant_name(variant).to_owned(),
        version_specific_fields: fields,
    })
}

fn variant_name(variant: Variant) -> &'static str {
    match variant {
        Variant::NCS => "NCS",
        Variant::RFC4122 => "RFC4122",
        Variant::Microsoft => "Microsoft",
        _ => "Future",
    }
}

fn decompose(uuid: &Uuid) -> (UuidVersion, &'static str, VersionFields) {
    match uuid.get_version_num() {
        1 => (
            UuidVersion::Known(1),
            "V1 (Time-based)",
            VersionFields::V1(time_based(uuid, v1_ticks(uuid))),
        ),
        2 => (UuidVersion::Known(2), "V2 (DCE Security)", VersionFields::None),
        3 => (
            UuidVersion::Known(3),
            "V3 (MD5 Name-based)",
            VersionFields::NameBased(NameBasedFields {
                hash_algorithm: "MD5".to_owned(),
                description: "MD5 hash of namespace and name".to_owned(),
            }),
        ),
        4 => (
            UuidVersion::Known(4),
            "V4 (Random)",
            VersionFields::V4 {
                random_bits: payload_hex(uuid),
            },
        ),
        5 => (
            UuidVersion::Known(5),
            "V5 (SHA-1 Name-based)",
            VersionFields::NameBased(NameBasedFields {
                hash_algorithm: "SHA-1".to_owned(),
                description: "SHA-1 hash of namespace and name, truncated to 128 bits".to_owned(),
            }),
        ),
        6 => (
            UuidVersion::Known(6),
            "V6 (Sortable Time-based)",
            VersionFields::V6(time_based(uuid, v6_ticks(uuid))),
        ),
        7 => (
            UuidVersion::Known(7),
            "V7 (Sortable Random)",
            VersionFields::V7(unix_time(uuid)),
        ),
        8 => (
            UuidVersion::Known(8),
            "V8 (Custom)",
            VersionFields::V8 {
                custom_bits: payload_hex(uuid),
            },
        ),
        _ => (UuidVersion::Unknown, "Unknown", VersionFields::None),
    }
}

/// `time_hi(12) | time_mid(16) | time_low(32)`.
#[allow(clippy::arithmetic_side_effects)] // fixed-width bit unpacking
fn v1_ticks(uuid: &Uuid) -> u64 {
    let (low, mid, high, _) = uuid.as_fields();
    (u64::from(high & 0x0FFF) << 48) | (u64::from(mid) << 32) | u64::from(low)
}

/// `time_high(32) | time_mid(16) | time_low(12)`.
#[allow(clippy::arithmetic_side_effects)] // fixed-width bit unpacking
fn v6_ticks(uuid: &Uuid) -> u64 {
    let (high, mid, low, _) = uuid.as_fields();
    (u64::from(high) << 28) | (u64::from(mid) << 12) | u64::from(low & 0x0FFF)
}

fn time_based(uuid: &Uuid, ticks: u64) -> TimeBasedFields {
    let b = uuid.as_bytes();
    let clock_sequence = u16::from_be_bytes([b[8] & 0x3F, b[9]]);
    let node = &b[10..16];

    let since_epoch = ticks.checked_sub(GREGORIAN_OFFSET_TICKS);
    let unix_seconds = since_epoch.and_then(|t| t.checked_div(TICKS_PER_SECOND));
    let unix_nanos = since_epoch
        .and_then(|t| t.checked_rem(TICKS_PER_SECOND))
        .and_then(|t| u32::try_from(t).ok())
        .and_then(|t| t.checked_mul(100));

    TimeBasedFields {
        timestamp_raw: ticks,
        unix_seconds,
        unix_nanos,
        clock_sequence,
        node_id: encode_hex(node),
        mac_address: node
            .iter()
            .map(|octet| format!("{octet:02X}"))
            .collect::<Vec<_>>()
            .join(":"),
        is_multicast: node[0] & 0x01 != 0,
        is_locally_administered: node[0] & 0x02 != 0,
    }
}

fn unix_time(uuid: &Uuid) -> UnixTimeFields {
    let b = uuid.as_bytes();
    let unix_millis = u64::from_be_bytes([0, 0, b[0], b[1], b[2], b[3], b[4], b[5]]);
    let rand_a = u16::from_be_bytes([b[6] & 0x0F, b[7]]);
    let rand_b = u64::from_be_bytes([b[8] & 0x3F, b[9], b[10], b[11], b[12], b[13], b[14], b[15]]);
    UnixTimeFields {
        unix_millis,
        rand_a: format!("{rand_a:03x}"),
        rand_b: format!("{rand_b:016x}"),
    }
}

fn payload_hex(uuid: &Uuid) -> String {
    let mut bytes = *uuid.as_bytes();
    bytes[6] &= 0x0F;
    bytes[8] &= 0x3F;
    encode_hex(&bytes)
}
