//! HTTP plumbing shared by the hosted provider adapters.

use reqwest::Response;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::AIError;

/// Converts a transport failure into an `AIError`.
pub(crate) fn map_send_error(err: reqwest::Error, timeout: Duration) -> AIError {
    if err.is_timeout() {
        AIError::Timeout {
            timeout_secs: timeout.as_secs() as u32,
        }
    } else if err.is_connect() {
        AIError::network(format!("Connection failed: {}", err))
    } else {
        AIError::network(err.to_string())
    }
}

/// Runs `op`, retrying retryable failures up to `max_retries` times.
///
/// Waits 1s, 2s, 4s, ... between attempts.
pub(crate) async fn with_retries<T, F, Fut>(
    provider: &'static str,
    max_retries: u32,
    mut op: F,
) -> Result<T, AIError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AIError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < max_retries => {
                tracing::warn!(provider, attempt, error = %err, "Provider request failed, retrying");
                sleep(Duration::from_secs(1 << attempt.min(6))).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Passes successful responses through and maps error statuses.
///
/// `context_markers` are substrings of a 400 body that mean the prompt was
/// too long for the model.
pub(crate) async fn check_status(
    response: Response,
    context_markers: &[&str],
    default_retry_after: u32,
) -> Result<Response, AIError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(status_error(status.as_u16(), &body, context_markers, default_retry_after))
}

pub(crate) fn status_error(
    status: u16,
    body: &str,
    context_markers: &[&str],
    default_retry_after: u32,
) -> AIError {
    match status {
        401 | 403 => AIError::AuthenticationFailed,
        429 => AIError::rate_limited(parse_retry_after(body).unwrap_or(default_retry_after)),
        400 if context_markers.iter().any(|m| body.contains(m)) => AIError::ContextTooLong,
        400 | 404 | 422 => AIError::InvalidRequest(error_message(body)),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, error_message(body))),
        _ => AIError::network(format!("Unexpected status {}: {}", status, error_message(body))),
    }
}

/// Pulls `error.message` out of a JSON error body, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

/// Finds "try again in Ns" in a rate-limit message.
fn parse_retry_after(body: &str) -> Option<u32> {
    let message = error_message(body);
    let idx = message.find("try again in ")?;
    let rest = &message[idx + "try again in ".len()..];
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    rest[..end].parse().ok()
}
