use super::*;
use serde_json::json;

// =============================================================
// url / bearer helpers
// =============================================================

#[test]
fn url_joins_leading_slash_path() {
    assert_eq!(url("/api/auth/login"), format!("{}/api/auth/login", api_base()));
}

#[test]
fn url_inserts_missing_slash() {
    assert_eq!(url("api/auth/login"), format!("{}/api/auth/login", api_base()));
}

#[test]
fn api_base_has_no_trailing_slash() {
    assert!(!api_base().ends_with('/'));
}

#[test]
fn bearer_prefixes_raw_tokens() {
    assert_eq!(bearer("tok-1"), "Bearer tok-1");
}

#[test]
fn bearer_keeps_prefixed_tokens() {
    assert_eq!(bearer("Bearer tok-1"), "Bearer tok-1");
}

// =============================================================
// make_absolute_file_url
// =============================================================

#[test]
fn absolute_urls_pass_through() {
    assert_eq!(
        make_absolute_file_url("https://cdn.example.com/a.png"),
        "https://cdn.example.com/a.png"
    );
    assert_eq!(make_absolute_file_url("HTTP://x/a.png"), "HTTP://x/a.png");
}

#[test]
fn protocol_relative_and_data_urls_pass_through() {
    assert_eq!(make_absolute_file_url("//cdn.example.com/a.png"), "//cdn.example.com/a.png");
    assert_eq!(make_absolute_file_url("data:image/png;base64,AA=="), "data:image/png;base64,AA==");
}

#[test]
fn server_relative_paths_get_the_base() {
    assert_eq!(
        make_absolute_file_url("/files/profile-pics/a.png"),
        format!("{}/files/profile-pics/a.png", api_base())
    );
    assert_eq!(
        make_absolute_file_url("files/a.png"),
        format!("{}/files/a.png", api_base())
    );
}

#[test]
fn empty_path_stays_empty() {
    assert_eq!(make_absolute_file_url(""), "");
}

// =============================================================
// normalize_response
// =============================================================

#[test]
fn success_with_json_body_yields_the_body() {
    let value = normalize_response(200, true, r#"{"user":{"id":"u-1"}}"#).unwrap();
    assert_eq!(value["user"]["id"], "u-1");
}

#[test]
fn success_with_unparseable_body_is_empty_data() {
    assert_eq!(normalize_response(200, true, "<!doctype html>").unwrap(), json!(null));
    assert_eq!(normalize_response(204, true, "").unwrap(), json!(null));
}

#[test]
fn rejection_prefers_message_field() {
    let err = normalize_response(401, false, r#"{"message":"bad credentials","error":"x"}"#)
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected { status: 401, message: "bad credentials".to_owned() }
    );
}

#[test]
fn rejection_falls_back_to_error_field_then_string_body() {
    let err = normalize_response(500, false, r#"{"error":"boom"}"#).unwrap_err();
    assert_eq!(err, ApiError::Rejected { status: 500, message: "boom".to_owned() });

    let err = normalize_response(403, false, r#""forbidden""#).unwrap_err();
    assert_eq!(err, ApiError::Rejected { status: 403, message: "forbidden".to_owned() });
}

#[test]
fn rejection_without_a_usable_body_is_generic() {
    let err = normalize_response(502, false, "<html>Bad Gateway</html>").unwrap_err();
    assert_eq!(err, ApiError::Rejected { status: 502, message: "Request failed".to_owned() });
}

#[test]
fn error_display_is_the_bare_message() {
    let err = ApiError::Rejected { status: 401, message: "bad credentials".to_owned() };
    assert_eq!(err.to_string(), "bad credentials");
    let err = ApiError::Network("connection refused".to_owned());
    assert_eq!(err.to_string(), "network error: connection refused");
}

// =============================================================
// SSR stubs
// =============================================================

#[test]
fn http_api_stubs_fail_closed_off_wasm() {
    let result = futures::executor::block_on(HttpApi.login("a@b.edu", "pw"));
    assert!(matches!(result, Err(ApiError::Network(_))));
}
