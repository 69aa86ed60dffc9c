//! External representation of the account records

use chrono::{TimeZone, Utc};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::{User, VerificationData, VerificationDataType};

fn sample_user() -> User {
    let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    User {
        id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap(),
        email: "ada@example.com".to_string(),
        password: "$2b$12$hash".to_string(),
        username: "ada".to_string(),
        token_hash: "abc123".to_string(),
        is_verified: true,
        created_at: created,
        updated_at: created,
    }
}

#[test]
fn test_user_serializes_lowercase_keys() {
    let value = serde_json::to_value(sample_user()).unwrap();
    let object = value.as_object().unwrap();

    for key in ["id", "email", "username", "tokenhash", "isverified", "createdat", "updatedat"] {
        assert!(object.contains_key(key), "missing key {}", key);
    }
    assert_eq!(object.len(), 7);
    assert_eq!(value["isverified"], json!(true));
}

#[test]
fn test_user_password_is_never_serialized() {
    let value = serde_json::to_value(sample_user()).unwrap();
    assert!(value.get("password").is_none());
    assert!(!value.to_string().contains("$2b$12$hash"));
}

#[test]
fn test_user_json_round_trip_drops_only_password() {
    let user = sample_user();
    let json = serde_json::to_string(&user).unwrap();
    let decoded: User = serde_json::from_str(&json).unwrap();

    assert!(decoded.password.is_empty());
    assert_eq!(
        decoded,
        User {
            password: String::new(),
            ..user
        }
    );
}

#[test]
fn test_user_deserializes_signup_payload() {
    let user: User = serde_json::from_value(json!({
        "email": "ada@example.com",
        "username": "ada",
        "password": "hunter2"
    }))
    .unwrap();

    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.password, "hunter2");
    assert!(user.id.is_nil());
    assert!(!user.is_verified);
}

#[test]
fn test_verification_data_keys_and_type_discriminator() {
    let data = VerificationData {
        email: "ada@example.com".to_string(),
        code: "042817".to_string(),
        expires_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 15, 0).unwrap(),
        kind: VerificationDataType::PasswordReset,
    };

    let value = serde_json::to_value(&data).unwrap();
    assert_eq!(value["type"], json!(2));
    assert_eq!(value["code"], json!("042817"));
    assert!(value.get("expiresat").is_some());

    let back: VerificationData = serde_json::from_value(value).unwrap();
    assert_eq!(back, data);
}

#[test]
fn test_unknown_verification_type_is_rejected() {
    let result: Result<VerificationData, _> = serde_json::from_value(json!({
        "email": "ada@example.com",
        "code": "000000",
        "expiresat": "2024-03-01T12:15:00Z",
        "type": 7
    }));
    assert!(result.is_err());
    assert!(VerificationDataType::try_from(0).is_err());
    assert_eq!(
        VerificationDataType::try_from(1).unwrap(),
        VerificationDataType::MailConfirmation
    );
}

#[test]
fn test_email_presence_validation() {
    let mut data = VerificationData::new("ada@example.com", VerificationDataType::MailConfirmation);
    assert!(data.validate().is_ok());

    data.email.clear();
    let errors = data.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("email"));
}
