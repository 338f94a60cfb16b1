use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde_json::{json, Value};
use vitalseal::{open, seal, Demographics, Identity};

// A token produced by the reference producer of this format: same
// derivation parameters (fixed salt, 100,000 PBKDF2-HMAC-SHA256
// iterations), AES-128-CBC + HMAC-SHA256 framing, padded base64. Sealed
// for ("Jane", "Doe", "2000-01-01") over the demographics payload below.
const FOREIGN_TOKEN: &str = "gAAAAABqdS-n3QdmNvlCxpTywkTjlWzwMxoAcTY6kLKdnCXZd7YjLkRjYBWTHyyA4n6_kjSfFo0nwrEXHPMZa_oXsLB7xd4qxHXFI5hoqf9BcbR1jWl-mwZblTKKx3RaM5yfwZFwhSshyilJGpd1L0eH81fpD2ceH8ooanMYKhXyhfDNkYat_OQ=";

fn jane() -> Identity {
    Identity::new("Jane", "Doe", "2000-01-01")
}

#[test]
fn foreign_token_opens_as_dynamic_payload() {
    // Goal: records sealed by the previous generation of the system stay
    // readable. The foreign token carries base64 padding and no schema
    // version field; both must be tolerated.
    let token = vitalseal::SealedToken::from(FOREIGN_TOKEN.to_string());
    let opened: Value = open(&token, &jane()).expect("foreign token must open");
    assert_eq!(
        opened,
        json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "dob": "2000-01-01",
            "sex": "F"
        })
    );
}

#[test]
fn foreign_token_opens_as_typed_demographics() {
    let token = vitalseal::SealedToken::from(FOREIGN_TOKEN.to_string());
    let opened: Demographics = open(&token, &jane()).expect("foreign token must open");
    // No version field in the payload: defaults to 1.
    assert_eq!(opened, Demographics::new("Jane", "Doe", "2000-01-01", "F"));
}

#[test]
fn foreign_token_stays_sealed_for_swapped_fields() {
    let token = vitalseal::SealedToken::from(FOREIGN_TOKEN.to_string());
    let swapped = Identity::new("Doe", "Jane", "2000-01-01");
    assert_eq!(open::<Value>(&token, &swapped), None);
}

#[test]
fn foreign_token_has_the_documented_layout() {
    let raw = URL_SAFE_NO_PAD
        .decode(FOREIGN_TOKEN.trim_end_matches('='))
        .unwrap();
    assert_eq!(raw[0], 0x80);
    // version (1) + timestamp (8) + IV (16) + ciphertext + tag (32)
    let ciphertext_len = raw.len() - 1 - 8 - 16 - 32;
    assert!(ciphertext_len > 0);
    assert_eq!(ciphertext_len % 16, 0);
}

#[test]
fn sealed_tokens_match_the_wire_format() {
    // Goal: what we write is what the format section promises — version
    // byte 0x80, big-endian epoch seconds, 16-byte IV, block-aligned
    // ciphertext, 32-byte tag, no base64 padding.
    let token = seal(&json!({"x": 1}), &jane()).unwrap();
    assert!(!token.as_str().contains('='));

    let raw = URL_SAFE_NO_PAD.decode(token.as_str()).unwrap();
    assert_eq!(raw[0], 0x80);

    let ts = u64::from_be_bytes(raw[1..9].try_into().unwrap());
    // Sealed just now: epoch seconds must be in a plausible window.
    assert!(ts > 1_600_000_000, "timestamp {ts} is before 2020");
    assert!(ts < 4_000_000_000, "timestamp {ts} is after 2096");

    let ciphertext_len = raw.len() - 1 - 8 - 16 - 32;
    assert!(ciphertext_len >= 16);
    assert_eq!(ciphertext_len % 16, 0);
}

#[test]
fn lookup_wire_format_is_64_lowercase_hex() {
    let index = vitalseal::lookup_index(&jane());
    let hex = index.to_hex();
    assert_eq!(hex.len(), 64);
    assert!(hex
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
}
