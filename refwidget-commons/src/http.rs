//! HTTP client utilities

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Create an HTTP client with an optional overall request timeout.
///
/// `None` leaves the request unbounded so the platform defaults apply; only
/// connection setup is capped.
pub fn create_client(request_timeout: Option<Duration>) -> Client {
    let mut builder = ClientBuilder::new().connect_timeout(CONNECT_TIMEOUT);
    if let Some(timeout) = request_timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "failed to build configured HTTP client; using defaults");
        Client::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_client_with_and_without_timeout() {
        let _unbounded = create_client(None);
        let _bounded = create_client(Some(Duration::from_secs(5)));
    }
}
