//! Log-safe rendering of untrusted text.
//!
//! Panic payloads can carry listener-provided text, so anything written to a
//! log line goes through here first.

use std::any::Any;

/// Flattens newlines and caps `value` at `max_chars` characters.
pub(crate) fn sanitize_message(value: &str, max_chars: usize) -> String {
    let normalized = value.replace(['\n', '\r'], " ");
    let mut truncated = normalized.chars().take(max_chars).collect::<String>();
    if normalized.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}

/// Extracts a sanitized message from a `catch_unwind` payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send), max_chars: usize) -> String {
    let message = if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };
    sanitize_message(&message, max_chars)
}
