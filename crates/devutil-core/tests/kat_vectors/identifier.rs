//! Name-based UUID vectors (RFC 4122 appendix B, Python `uuid` docs) and
//! RFC 9562 appendix A examples.

use devutil_core::identifier::{
    analyze_uuid, generate_uuid_v3, generate_uuid_v5, BatchSize, UuidVersion, VersionFields,
    MAX_BATCH,
};

fn one() -> BatchSize {
    BatchSize::new(1, MAX_BATCH).unwrap()
}

#[test]
fn v3_dns_python_org() {
    assert_eq!(
        generate_uuid_v3(one(), "dns", "python.org").unwrap()[0],
        "6fa459ea-ee8a-3ca4-894e-db77e160355e"
    );
}

#[test]
fn v5_dns_python_org() {
    assert_eq!(
        generate_uuid_v5(one(), "dns", "python.org").unwrap()[0],
        "886313e1-3b8a-5372-9b90-0c9aee199e5d"
    );
}

#[test]
fn v5_url_namespace() {
    assert_eq!(
        generate_uuid_v5(one(), "url", "https://example.com").unwrap()[0],
        "4fd35a71-71ef-5a55-a9d9-aa75c889a6d0"
    );
}

#[test]
fn explicit_namespace_uuid_matches_named_one() {
    let named = generate_uuid_v5(one(), "dns", "python.org").unwrap();
    let explicit =
        generate_uuid_v5(one(), "6ba7b810-9dad-11d1-80b4-00c04fd430c8", "python.org").unwrap();
    assert_eq!(named, explicit);
}

#[test]
fn rfc9562_examples_decompose() {
    let v1 = analyze_uuid("C232AB00-9414-11EC-B3C8-9F6BDECED846").unwrap();
    assert_eq!(v1.version, UuidVersion::Known(1));
    let v6 = analyze_uuid("1EC9414C-232A-6B00-B3C8-9F6BDECED846").unwrap();
    assert_eq!(v6.version, UuidVersion::Known(6));

    let (VersionFields::V1(a), VersionFields::V6(b)) =
        (v1.version_specific_fields, v6.version_specific_fields)
    else {
        panic!("expected time-based fields");
    };
    assert_eq!(a, b);

    let v7 = analyze_uuid("017F22E2-79B0-7CC3-98C4-DC0C0C07398F").unwrap();
    let VersionFields::V7(fields) = v7.version_specific_fields else {
        panic!("expected v7 fields");
    };
    assert_eq!(fields.unix_millis, 1_645_557_742_000);
}
