use cardgate_core::card::{ContentSnapshot, SignatureSet, SignedCard};
use cardgate_core::content::{CardContent, CardScope, ContentError, RevocationContent, RevocationReason};

#[test]
fn signed_card_decodes_base64_fields() {
    // "Test" / [1, 2, 3]
    let json = r#"{"content_snapshot":"VGVzdA==","meta":{"signs":{"alice":"AQID"}}}"#;
    let card: SignedCard = serde_json::from_str(json).unwrap();
    assert_eq!(card.content_snapshot.as_bytes(), b"Test");
    assert_eq!(card.signatures().get("alice"), Some([1u8, 2, 3].as_slice()));
    assert_eq!(card.signatures().get("bob"), None);
}

#[test]
fn signed_card_without_meta_has_no_signatures() {
    let card: SignedCard = serde_json::from_str(r#"{"content_snapshot":"VGVzdA=="}"#).unwrap();
    assert!(card.signatures().is_empty());
}

#[test]
fn signed_card_rejects_bad_base64_signature() {
    let json = r#"{"content_snapshot":"VGVzdA==","meta":{"signs":{"alice":"not base64!"}}}"#;
    let err = serde_json::from_str::<SignedCard>(json).unwrap_err();
    assert!(err.to_string().contains("alice"), "{err}");
}

#[test]
fn signed_card_serialises_to_wire_form() {
    let mut card = SignedCard::unsigned(b"Test".as_slice());
    card.meta.signs.insert("alice", vec![1, 2, 3]);
    let value = serde_json::to_value(&card).unwrap();
    assert_eq!(value["content_snapshot"], "VGVzdA==");
    assert_eq!(value["meta"]["signs"]["alice"], "AQID");
}

#[test]
fn signature_set_collects_from_pairs() {
    let set: SignatureSet = [("a", vec![1u8]), ("b", vec![2u8])].into_iter().collect();
    let labels: Vec<&str> = set.iter().map(|(l, _)| l).collect();
    assert_eq!(labels, ["a", "b"]);
}

#[test]
fn card_content_parses_with_defaults() {
    let snapshot = ContentSnapshot::new(
        br#"{"identity":"alice@example.com","identity_type":"email","public_key":"AQID"}"#.to_vec(),
    );
    let content = CardContent::from_snapshot(&snapshot).unwrap();
    assert_eq!(content.identity, "alice@example.com");
    assert_eq!(content.scope, CardScope::Application);
    assert!(content.data.is_none());
}

#[test]
fn card_content_rejects_empty_identity() {
    let snapshot = ContentSnapshot::new(
        br#"{"identity":"","identity_type":"email","public_key":"AQID"}"#.to_vec(),
    );
    assert!(matches!(
        CardContent::from_snapshot(&snapshot),
        Err(ContentError::EmptyField("identity"))
    ));
}

#[test]
fn card_content_rejects_too_much_data() {
    let data: serde_json::Map<String, serde_json::Value> = (0..17)
        .map(|i| (format!("k{i}"), serde_json::Value::from("v")))
        .collect();
    let json = serde_json::json!({
        "identity": "alice",
        "identity_type": "username",
        "public_key": "AQID",
        "data": data,
    });
    let snapshot = ContentSnapshot::new(serde_json::to_vec(&json).unwrap());
    assert!(matches!(
        CardContent::from_snapshot(&snapshot),
        Err(ContentError::TooManyDataEntries { max: 16, got: 17 })
    ));
}

fn content_with_note(note: &str) -> ContentSnapshot {
    let json = serde_json::json!({
        "identity": "alice",
        "identity_type": "username",
        "public_key": "AQID",
        "data": { "note": note },
    });
    ContentSnapshot::new(serde_json::to_vec(&json).unwrap())
}

#[test]
fn card_content_accepts_data_value_at_the_limit() {
    let content = CardContent::from_snapshot(&content_with_note(&"x".repeat(256))).unwrap();
    assert_eq!(content.data.unwrap()["note"].len(), 256);
}

#[test]
fn card_content_rejects_data_value_over_the_limit() {
    let err = CardContent::from_snapshot(&content_with_note(&"x".repeat(257))).unwrap_err();
    assert!(matches!(
        &err,
        ContentError::DataEntryTooLong { key, max: 256 } if key == "note"
    ));
    assert_eq!(err.to_string(), "data entry 'note' exceeds 256 characters");
}

#[test]
fn card_content_rejects_non_json_snapshot() {
    let snapshot = ContentSnapshot::new(b"Test".to_vec());
    assert!(matches!(
        CardContent::from_snapshot(&snapshot),
        Err(ContentError::Json(_))
    ));
}

#[test]
fn revocation_content_parses() {
    let json = format!(r#"{{"card_id":"{}","revocation_reason":"compromised"}}"#, "0f".repeat(32));
    let content = RevocationContent::from_snapshot(&ContentSnapshot::new(json.into_bytes())).unwrap();
    assert_eq!(content.card_id.as_hex(), "0f".repeat(32));
    assert_eq!(content.revocation_reason, RevocationReason::Compromised);
}

#[test]
fn revocation_content_rejects_short_card_id() {
    let snapshot = ContentSnapshot::new(br#"{"card_id":"abc"}"#.to_vec());
    assert!(RevocationContent::from_snapshot(&snapshot).is_err());
}
