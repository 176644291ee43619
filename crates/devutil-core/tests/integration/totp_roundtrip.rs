//! Integration tests for the TOTP engine.
//!
//! Tests the full OTP lifecycle: provision → generate → validate,
//! cross-algorithm differentiation, and time-window boundary behavior.

use devutil_core::clock::{Clock, FixedClock};
use devutil_core::totp::{
    generate_code, generate_secret, validate_code, OtpAlgorithm, ProvisioningRequest,
    TotpParameters, DEFAULT_QR_ENDPOINT, DEFAULT_WINDOW,
};
use rand::rngs::OsRng;

fn request(algorithm: OtpAlgorithm, digits: u32, period: u32) -> ProvisioningRequest {
    ProvisioningRequest {
        issuer: "Example".to_owned(),
        account: "dev@example.com".to_owned(),
        algorithm,
        digits,
        period,
        image: None,
        add_issuer_prefix: true,
    }
}

/// Provision → generate → validate at the same instant succeeds.
#[test]
fn provision_generate_validate() {
    let clock = FixedClock::from_unix_seconds(1_700_000_000);
    for algorithm in [OtpAlgorithm::Sha1, OtpAlgorithm::Sha256, OtpAlgorithm::Sha512] {
        let bundle =
            generate_secret(&request(algorithm, 6, 30), DEFAULT_QR_ENDPOINT, &mut OsRng).unwrap();
        assert!(bundle.provisioning_uri.contains(&bundle.secret));
        assert!(bundle.qr_code_url.starts_with(DEFAULT_QR_ENDPOINT));

        let code = generate_code(&bundle.secret, algorithm, 6, 30, clock.unix_seconds()).unwrap();
        let outcome = validate_code(
            &bundle.secret,
            &code.code,
            algorithm,
            6,
            30,
            DEFAULT_WINDOW,
            clock.unix_seconds(),
        )
        .unwrap();
        assert!(outcome.is_valid, "{algorithm} round trip");
        assert_eq!(outcome.matched_window_offset, 0);
    }
}

/// A code from the previous step is accepted one period later with offset -1.
#[test]
fn previous_step_accepted_with_negative_offset() {
    let params = TotpParameters::new("JBSWY3DPEHPK3PXP", OtpAlgorithm::Sha1, 6, 30).unwrap();
    let time = 1_700_000_000u64;
    let code = params.code_at(time).unwrap();
    let outcome = params.validate_at(&code.code, 1, time + 30).unwrap();
    assert!(outcome.is_valid);
    assert_eq!(outcome.matched_window_offset, -1);
    assert_eq!(outcome.used_time_window, code.time_window);
}

/// Two periods of drift fall outside the default window.
#[test]
fn drift_beyond_window_rejected() {
    let params = TotpParameters::new("JBSWY3DPEHPK3PXP", OtpAlgorithm::Sha1, 6, 30).unwrap();
    let time = 1_700_000_000u64;
    let code = params.code_at(time).unwrap();
    let outcome = params.validate_at(&code.code, 1, time + 60).unwrap();
    assert!(!outcome.is_valid);
    assert!(outcome.message.contains("±1"));
}

/// Same secret, different algorithms → different codes.
#[test]
fn algorithms_produce_different_codes() {
    let secret = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";
    let time = 1_234_567_890;
    let sha1 = generate_code(secret, OtpAlgorithm::Sha1, 8, 30, time).unwrap();
    let sha256 = generate_code(secret, OtpAlgorithm::Sha256, 8, 30, time).unwrap();
    let sha512 = generate_code(secret, OtpAlgorithm::Sha512, 8, 30, time).unwrap();
    assert_ne!(sha1.code, sha256.code);
    assert_ne!(sha256.code, sha512.code);
    assert_ne!(sha1.code, sha512.code);
}

/// Codes are stable inside a window and change across its boundary.
#[test]
fn window_boundary() {
    let params = TotpParameters::new("JBSWY3DPEHPK3PXP", OtpAlgorithm::Sha1, 6, 60).unwrap();
    let start = params.code_at(1_700_000_040).unwrap();
    let end = params.code_at(1_700_000_099).unwrap();
    let next = params.code_at(1_700_000_100).unwrap();
    assert_eq!(start.code, end.code);
    assert_eq!(end.time_remaining, 1);
    assert_ne!(end.time_window, next.time_window);
    assert_eq!(next.time_remaining, 60);
}

/// Secrets in authenticator-app display form still work.
#[test]
fn grouped_lowercase_secret() {
    let canonical = generate_code("JBSWY3DPEHPK3PXP", OtpAlgorithm::Sha1, 6, 30, 59).unwrap();
    let grouped = generate_code("jbsw y3dp ehpk 3pxp", OtpAlgorithm::Sha1, 6, 30, 59).unwrap();
    assert_eq!(canonical, grouped);
}
