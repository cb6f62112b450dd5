use std::{fmt, string::FromUtf8Error};

use miette::Diagnostic;
use thiserror::Error;

use crate::http::FetchError;

pub(crate) type ProbeResult<T, E = ProbeError> = core::result::Result<T, E>;

const PLATFORM_HELP: &str = "The platform did not inject the service environment as expected. \
Check that the service exists in the namespace and that the workload was started after it.";

const REACHABILITY_HELP: &str = "The service could not be reached through this address. \
Check DNS resolution inside the local process and that the service has ready endpoints.";

/// Top level error, anything that stops the probe before all checks pass.
#[derive(Debug, Error, Diagnostic)]
pub(crate) enum ProbeError {
    #[error("failed to build the HTTP client: {0}")]
    #[diagnostic(code(discovery_probe::http_client))]
    HttpClient(#[source] reqwest::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    CheckFailed(#[from] CheckFailed),
}

/// The check group that produced a [`VerifyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Urls,
    ServiceEnv,
    CustomEnv,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Urls => write!(f, "urls"),
            Stage::ServiceEnv => write!(f, "service env"),
            Stage::CustomEnv => write!(f, "custom env"),
        }
    }
}

impl Stage {
    /// Attaches this stage to an error, for use with [`Result::map_err`].
    pub(crate) fn failed(self) -> impl FnOnce(VerifyError) -> CheckFailed {
        move |error| CheckFailed { stage: self, error }
    }
}

/// A [`VerifyError`], together with the point of failure.
#[derive(Debug, Error, Diagnostic)]
#[error("`{stage}` check failed with {}", .error.kind())]
pub(crate) struct CheckFailed {
    pub(crate) stage: Stage,

    #[source]
    #[diagnostic_source]
    pub(crate) error: VerifyError,
}

/// Value of an environment variable, as seen or as expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EnvValue {
    Set(String),
    Unset,
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvValue::Set(value) => write!(f, "`{value}`"),
            EnvValue::Unset => write!(f, "unset"),
        }
    }
}

/// What was wrong with a response that did arrive.
#[derive(Debug, Error)]
pub(crate) enum ContentProblem {
    #[error("body does not contain `{marker}`")]
    MarkerMissing { marker: String },

    #[error("body is not valid UTF-8")]
    NotUtf8(#[source] FromUtf8Error),
}

/// A single failed assertion.
#[derive(Debug, Error, Diagnostic)]
pub(crate) enum VerifyError {
    #[error("environment variable `{name}` is not set")]
    #[diagnostic(code(discovery_probe::missing_env), help("{PLATFORM_HELP}"))]
    MissingEnvironmentVariable { name: String },

    #[error("environment variable `{name}` is {actual}, expected {expected}")]
    #[diagnostic(code(discovery_probe::env_mismatch))]
    EnvironmentMismatch {
        name: String,
        expected: EnvValue,
        actual: EnvValue,
    },

    #[error("request to `{url}` (built from {how}) failed")]
    #[diagnostic(code(discovery_probe::network), help("{REACHABILITY_HELP}"))]
    NetworkFailure {
        url: String,
        how: &'static str,
        #[source]
        source: FetchError,
    },

    #[error("response from `{url}` (built from {how}) does not identify the service")]
    #[diagnostic(code(discovery_probe::content))]
    ContentMismatch {
        url: String,
        how: &'static str,
        #[source]
        problem: ContentProblem,
    },
}

impl VerifyError {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            VerifyError::MissingEnvironmentVariable { .. } => "MissingEnvironmentVariable",
            VerifyError::EnvironmentMismatch { .. } => "EnvironmentMismatch",
            VerifyError::NetworkFailure { .. } => "NetworkFailure",
            VerifyError::ContentMismatch { .. } => "ContentMismatch",
        }
    }
}
