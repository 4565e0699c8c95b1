//! Response assertions

use axum::http::StatusCode;
use axum_test::TestResponse;
use serde_json::Value;

/// Assert an error response: status code plus the `{error, status}` body
///
/// Returns the error message.
pub fn assert_error(response: &TestResponse, expected: StatusCode) -> String {
    assert_eq!(
        response.status_code(),
        expected,
        "unexpected status, body: {}",
        response.text()
    );
    let body: Value = response.json();
    assert_eq!(body["status"], expected.as_u16());
    body["error"]
        .as_str()
        .unwrap_or_else(|| panic!("error body without message: {body}"))
        .to_string()
}

/// Assert that a JSON user object never exposes password material
pub fn assert_no_password(user: &Value) {
    let object = user.as_object().expect("user is a JSON object");
    assert!(!object.contains_key("password"));
    assert!(!object.contains_key("passwordHash"));
    assert!(!object.contains_key("password_hash"));
}
