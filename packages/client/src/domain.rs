//! Domain logic for client-side operations.
//!
//! Pure functions without side effects, so they are easy to test.

use crate::error::ClientError;

/// Check if the client should exit immediately based on the error type.
///
/// A rejected handshake or a malformed URL will not get better by retrying.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::Rejected(_) | ClientError::InvalidUrl(_)
    )
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - Number of failed attempts so far
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}

/// Build the WebSocket endpoint URL for `username`.
///
/// The username is percent-encoded into a single path segment.
///
/// # Errors
///
/// Returns [`ClientError::InvalidUrl`] when the base URL is not `ws://` or
/// `wss://`, or when the username is empty.
pub fn build_ws_url(base_url: &str, username: &str) -> Result<String, ClientError> {
    let base_url = base_url.trim().trim_end_matches('/');
    if !(base_url.starts_with("ws://") || base_url.starts_with("wss://")) {
        return Err(ClientError::InvalidUrl(format!(
            "'{}' must start with ws:// or wss://",
            base_url
        )));
    }
    if username.is_empty() {
        return Err(ClientError::InvalidUrl(
            "username must not be empty".to_string(),
        ));
    }

    Ok(format!("{}/ws/{}", base_url, urlencoding::encode(username)))
}
