//! User-facing messages for failed requests.

use tracing::error;

use crate::error::GrowPodError;

pub const CANNOT_CONNECT: &str = "Cannot connect to GrowPod Server";
pub const LOADING: &str = "Loading...";
pub const CANNOT_FETCH_NAME: &str = "Cannot fetch name";
pub const CANCELLED: &str = "Cancelled";

/// Message for a failed request. `not_found` is the page's message for a
/// 404; pages without one show the generic status message.
pub fn describe(err: &GrowPodError, not_found: Option<String>) -> String {
    match (err, not_found) {
        (GrowPodError::Network(_), _) => CANNOT_CONNECT.to_string(),
        (GrowPodError::Cancelled, _) => CANCELLED.to_string(),
        (GrowPodError::Status { status: 404, .. }, Some(message)) => message,
        (
            GrowPodError::Status {
                status,
                status_text,
            },
            _,
        ) => format!("Unexpected error {status}: {status_text}"),
        (other, _) => format!("Unexpected error: {other}"),
    }
}

/// Log the failure and return its message.
pub fn report(err: &GrowPodError, not_found: Option<String>) -> String {
    log_failure(err);
    describe(err, not_found)
}

pub fn log_failure(err: &GrowPodError) {
    match err {
        GrowPodError::Network(msg) => error!("Network error: {msg}"),
        GrowPodError::Status {
            status: 404,
            status_text,
        } => error!("Error 404: {status_text}"),
        GrowPodError::Status { status_text, .. } => error!("Unexpected error: {status_text}"),
        other => error!("{other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16, text: &str) -> GrowPodError {
        GrowPodError::Status {
            status,
            status_text: text.into(),
        }
    }

    #[test]
    fn network_failure() {
        let err = GrowPodError::Network("refused".into());
        assert_eq!(describe(&err, Some("unused".into())), CANNOT_CONNECT);
    }

    #[test]
    fn not_found_uses_page_message() {
        let msg = describe(&status(404, "Not Found"), Some("Cannot see garden 3".into()));
        assert_eq!(msg, "Cannot see garden 3");
    }

    #[test]
    fn not_found_without_page_message_is_generic() {
        assert_eq!(
            describe(&status(404, "Not Found"), None),
            "Unexpected error 404: Not Found"
        );
    }

    #[test]
    fn cancelled_request() {
        assert_eq!(describe(&GrowPodError::Cancelled, None), CANCELLED);
    }

    #[test]
    fn other_status() {
        assert_eq!(
            describe(&status(500, "Internal Server Error"), Some("x".into())),
            "Unexpected error 500: Internal Server Error"
        );
    }
}
