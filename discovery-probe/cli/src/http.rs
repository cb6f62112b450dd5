use std::time::Duration;

use reqwest::{blocking::Client, StatusCode};
use thiserror::Error;
use tracing::trace;

/// Why an HTTP GET did not produce a body.
#[derive(Debug, Error)]
pub(crate) enum FetchError {
    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("server responded with `{0}`")]
    Status(StatusCode),

    #[error("request failed")]
    Request(#[source] reqwest::Error),
}

/// Plain HTTP GET that returns the whole response body.
///
/// Implementations must not retry, a failed attempt is reported as is.
pub(crate) trait HttpGet {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// [`HttpGet`] backed by a blocking [`reqwest`] client.
pub(crate) struct ReqwestGet {
    client: Client,
    timeout: Duration,
}

impl ReqwestGet {
    /// The `timeout` covers the whole request, from connecting until the body is read.
    ///
    /// Proxies from the environment are ignored, names must resolve in the local network
    /// namespace.
    pub(crate) fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).no_proxy().build()?;

        Ok(Self { client, timeout })
    }

    fn classify(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Request(error)
        }
    }
}

impl HttpGet for ReqwestGet {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|error| self.classify(error))?;

        let status = response.status();
        trace!(url, %status, "received response");
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().map_err(|error| self.classify(error))?;

        Ok(body.to_vec())
    }
}
