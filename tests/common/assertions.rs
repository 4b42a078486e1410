//! Custom assertion macros for API responses
//!
//! On failure these print the response body, which is usually the
//! quickest way to see why a request was rejected.

/// Assert a response status
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "unexpected status, body: {}",
            $response.text
        );
    };
}

/// Assert a `{ "msg": ... }` response with the given status
#[macro_export]
macro_rules! assert_msg {
    ($response:expr, $status:expr, $msg:expr) => {
        $crate::assert_status!($response, $status);
        assert_eq!($response.json()["msg"], $msg, "body: {}", $response.text);
    };
}

/// Assert an `{ "errors": [...] }` response whose first message is `$msg`
#[macro_export]
macro_rules! assert_first_error {
    ($response:expr, $msg:expr) => {
        $crate::assert_status!($response, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(
            $response.json()["errors"][0]["msg"], $msg,
            "body: {}",
            $response.text
        );
    };
}
