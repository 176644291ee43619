//! Generate → analyze flows for the identifier family.

use std::collections::HashSet;

use devutil_core::clock::FixedClock;
use devutil_core::identifier::{
    analyze_uuid, generate_nanoid, generate_ulid, generate_uuid_v1, generate_uuid_v4,
    generate_uuid_v5, generate_uuid_v7, BatchSize, UuidVersion, VersionFields,
    DEFAULT_NANOID_SIZE, MAX_BATCH,
};
use rand::rngs::OsRng;

fn batch(n: u64) -> BatchSize {
    BatchSize::new(n, MAX_BATCH).unwrap()
}

/// 10 000 v4 UUIDs: no duplicates, version 4, variant `10`.
#[test]
fn ten_thousand_v4_are_unique_and_well_formed() {
    let ids = generate_uuid_v4(batch(10_000), &mut OsRng);
    assert_eq!(ids.len(), 10_000);
    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());

    for id in &ids {
        let record = analyze_uuid(id).unwrap();
        assert_eq!(record.version, UuidVersion::Known(4));
        assert_eq!(record.variant, "RFC4122");
        let variant_nibble = id.as_bytes()[19];
        assert!(matches!(variant_nibble, b'8' | b'9' | b'a' | b'b'), "{id}");
    }
}

#[test]
fn v1_analysis_recovers_inputs() {
    let clock = FixedClock::from_unix_seconds(0);
    let ids = generate_uuid_v1(
        batch(1),
        Some(1_600_000_000),
        Some("02-00-5E-10-00-01"),
        &clock,
        &mut OsRng,
    )
    .unwrap();
    let record = analyze_uuid(&ids[0]).unwrap();
    let VersionFields::V1(fields) = record.version_specific_fields else {
        panic!("expected v1 fields");
    };
    assert_eq!(fields.unix_seconds, Some(1_600_000_000));
    assert_eq!(fields.unix_nanos, Some(0));
    assert_eq!(fields.mac_address, "02:00:5E:10:00:01");
    assert!(fields.is_locally_administered);
    assert!(!fields.is_multicast);
}

#[test]
fn v7_analysis_recovers_clock() {
    let clock = FixedClock::from_unix_millis(1_712_345_678_901);
    let ids = generate_uuid_v7(batch(4), None, &clock, &mut OsRng).unwrap();
    for id in ids {
        let record = analyze_uuid(&id).unwrap();
        let VersionFields::V7(fields) = record.version_specific_fields else {
            panic!("expected v7 fields");
        };
        assert_eq!(fields.unix_millis, 1_712_345_678_901);
    }
}

#[test]
fn v5_is_deterministic_and_name_sensitive() {
    let a = generate_uuid_v5(batch(1), "url", "https://example.com/a").unwrap();
    let again = generate_uuid_v5(batch(1), "url", "https://example.com/a").unwrap();
    let b = generate_uuid_v5(batch(1), "url", "https://example.com/b").unwrap();
    assert_eq!(a, again);
    assert_ne!(a, b);
    assert_eq!(analyze_uuid(&a[0]).unwrap().version, UuidVersion::Known(5));
}

#[test]
fn ulids_from_later_clock_sort_later() {
    let earlier = generate_ulid(batch(1), &FixedClock::from_unix_millis(1_000), &mut OsRng);
    let later = generate_ulid(batch(1), &FixedClock::from_unix_millis(2_000), &mut OsRng);
    assert!(earlier[0] < later[0]);
}

#[test]
fn nanoids_are_distinct() {
    let ids = generate_nanoid(batch(1_000), DEFAULT_NANOID_SIZE, None, &mut OsRng).unwrap();
    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), 1_000);
}
