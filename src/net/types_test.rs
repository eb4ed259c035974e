use super::*;
use serde_json::json;

fn wire_user(roles: serde_json::Value) -> serde_json::Value {
    json!({
        "id": "u-1",
        "email": "ayesha@campus.edu",
        "username": "ayesha",
        "firstName": "Ayesha",
        "lastName": "Rahman",
        "credits": 12.5,
        "roles": roles,
        "university": "Campus University",
        "createdAt": "2024-05-01T00:00:00Z"
    })
}

// =============================================================
// User deserialization — role normalization
// =============================================================

#[test]
fn user_roles_accept_array() {
    let user: User = serde_json::from_value(wire_user(json!(["user", "admin"]))).unwrap();
    assert_eq!(user.roles, vec![Role::User, Role::Admin]);
}

#[test]
fn user_roles_accept_single_string() {
    let user: User = serde_json::from_value(wire_user(json!("printer_owner"))).unwrap();
    assert_eq!(user.roles, vec![Role::PrinterOwner]);
}

#[test]
fn user_roles_default_when_missing() {
    let mut value = wire_user(json!([]));
    value.as_object_mut().unwrap().remove("roles");
    let user: User = serde_json::from_value(value).unwrap();
    assert_eq!(user.roles, vec![Role::User]);
}

#[test]
fn user_roles_never_empty() {
    let user: User = serde_json::from_value(wire_user(json!([]))).unwrap();
    assert_eq!(user.roles, vec![Role::User]);
}

#[test]
fn user_roles_fold_legacy_spelling_and_dedupe() {
    let user: User =
        serde_json::from_value(wire_user(json!(["printer-owner", "printer_owner", "user"]))).unwrap();
    assert_eq!(user.roles, vec![Role::PrinterOwner, Role::User]);
}

#[test]
fn user_roles_unknown_names_fold_to_user() {
    let user: User = serde_json::from_value(wire_user(json!(["moderator"]))).unwrap();
    assert_eq!(user.roles, vec![Role::User]);
}

// =============================================================
// User field mapping
// =============================================================

#[test]
fn user_maps_camel_case_fields() {
    let user: User = serde_json::from_value(wire_user(json!(["user"]))).unwrap();
    assert_eq!(user.first_name, "Ayesha");
    assert_eq!(user.last_name, "Rahman");
    assert_eq!(user.created_at, "2024-05-01T00:00:00Z");
    assert!(user.phone_number.is_none());
    assert!(user.hall.is_none());
}

#[test]
fn user_serializes_back_to_camel_case() {
    let user: User = serde_json::from_value(wire_user(json!(["user"]))).unwrap();
    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(value["firstName"], "Ayesha");
    assert_eq!(value["roles"], json!(["user"]));
    // Absent optionals are omitted, not nulled.
    assert!(value.get("phoneNumber").is_none());
}

#[test]
fn user_round_trips_through_json() {
    let user: User = serde_json::from_value(wire_user(json!(["admin", "user"]))).unwrap();
    let restored: User = serde_json::from_str(&serde_json::to_string(&user).unwrap()).unwrap();
    assert_eq!(restored, user);
}

// =============================================================
// User::merge
// =============================================================

#[test]
fn merge_applies_only_provided_fields() {
    let mut user: User = serde_json::from_value(wire_user(json!(["user"]))).unwrap();
    user.merge(UserPatch {
        first_name: Some("Nadia".to_owned()),
        credits: Some(40.0),
        ..UserPatch::default()
    });
    assert_eq!(user.first_name, "Nadia");
    assert_eq!(user.last_name, "Rahman");
    assert!((user.credits - 40.0).abs() < f64::EPSILON);
}

#[test]
fn merge_empty_patch_is_identity() {
    let mut user: User = serde_json::from_value(wire_user(json!(["user"]))).unwrap();
    let before = user.clone();
    user.merge(UserPatch::default());
    assert_eq!(user, before);
}

// =============================================================
// Request payload serialization
// =============================================================

#[test]
fn signup_data_omits_absent_optionals() {
    let data = SignupData {
        email: "new@campus.edu".to_owned(),
        password: "secret".to_owned(),
        username: "newbie".to_owned(),
        first_name: "New".to_owned(),
        last_name: "Student".to_owned(),
        phone_number: None,
        university: "Campus University".to_owned(),
        hall: None,
    };
    let value = serde_json::to_value(&data).unwrap();
    assert_eq!(value["email"], "new@campus.edu");
    assert!(value.get("phoneNumber").is_none());
    assert!(value.get("hall").is_none());
}

#[test]
fn profile_update_sends_only_provided_fields() {
    let update = ProfileUpdate {
        phone_number: Some("01700000000".to_owned()),
        ..ProfileUpdate::default()
    };
    let value = serde_json::to_value(&update).unwrap();
    assert_eq!(value, json!({ "phoneNumber": "01700000000" }));
}

// =============================================================
// Response payloads
// =============================================================

#[test]
fn auth_payload_requires_user_and_token() {
    let value = json!({ "user": wire_user(json!(["user"])), "token": "tok-1" });
    let payload: AuthPayload = serde_json::from_value(value).unwrap();
    assert_eq!(payload.token, "tok-1");
    assert!(serde_json::from_value::<AuthPayload>(json!({ "token": "tok-1" })).is_err());
}

#[test]
fn upload_payload_fields_are_all_optional() {
    let payload: UploadPayload = serde_json::from_value(json!({ "url": "/files/a.png" })).unwrap();
    assert_eq!(payload.url.as_deref(), Some("/files/a.png"));
    assert!(payload.user.is_none());
    assert!(payload.message.is_none());
}
