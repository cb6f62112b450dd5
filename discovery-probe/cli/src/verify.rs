//! The verification protocol.
//!
//! Checks run in a fixed order and the first failure stops the run:
//!
//! 1. [`Verifier::check_urls`]: the service answers through its env variables, its short name,
//!    its fully-qualified name, and the hardcoded port;
//! 2. [`Verifier::check_service_env`]: the rest of the service-link variables agree with the
//!    endpoint discovered in 1, and no internal marker leaked into the environment;
//! 3. [`Verifier::check_custom_env`]: caller supplied `KEY=VALUE` pairs were propagated.

use std::time::Duration;

use discovery_probe_env::{
    checked_env::EnvSource,
    custom::CustomEnvAssertion,
    service::{ServiceEnv, ServiceIdentity, DEFAULT_CLUSTER_DOMAIN},
};

use crate::{
    error::{CheckFailed, EnvValue, Stage, VerifyError},
    http::HttpGet,
};

mod custom_env;
mod service_env;
mod urls;

/// Name of the web server expected to answer, found somewhere in its default page.
pub(crate) const DEFAULT_MARKER: &str = "nginx";

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Default HTTP port, must route to the service even when it declares another one.
pub(crate) const DEFAULT_HARDCODED_PORT: u16 = 80;

/// Knobs of the protocol, defaults reproduce the fixed contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProbeSettings {
    /// Substring every response body must contain.
    pub(crate) marker: String,
    pub(crate) timeout: Duration,
    pub(crate) cluster_domain: String,
    pub(crate) hardcoded_port: u16,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cluster_domain: DEFAULT_CLUSTER_DOMAIN.to_owned(),
            hardcoded_port: DEFAULT_HARDCODED_PORT,
        }
    }
}

/// Host and port read from `<PREFIX>_SERVICE_HOST` and `<PREFIX>_SERVICE_PORT`.
///
/// Kept as the exact strings from the environment, later checks compare them byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DiscoveredEndpoint {
    pub(crate) host: String,
    pub(crate) port: String,
}

/// Runs every check against one service, reading from `env` and reaching out through `http`.
pub(crate) struct Verifier<E, H> {
    service: ServiceIdentity,
    service_env: ServiceEnv,
    env: E,
    http: H,
    settings: ProbeSettings,
}

impl<E, H> Verifier<E, H>
where
    E: EnvSource,
    H: HttpGet,
{
    pub(crate) fn new(service: ServiceIdentity, env: E, http: H, settings: ProbeSettings) -> Self {
        Self {
            service_env: service.env(),
            service,
            env,
            http,
            settings,
        }
    }

    /// Runs all check groups in order, returns the endpoint they were checked against.
    #[tracing::instrument(level = "debug", skip_all, fields(service = %self.service))]
    pub(crate) fn run(
        &self,
        custom_env: &[CustomEnvAssertion],
    ) -> Result<DiscoveredEndpoint, CheckFailed> {
        let endpoint = self.check_urls().map_err(Stage::Urls.failed())?;
        self.check_service_env(&endpoint)
            .map_err(Stage::ServiceEnv.failed())?;
        self.check_custom_env(custom_env)
            .map_err(Stage::CustomEnv.failed())?;

        Ok(endpoint)
    }

    fn required(&self, name: &str) -> Result<String, VerifyError> {
        self.env
            .var(name)
            .ok_or_else(|| VerifyError::MissingEnvironmentVariable {
                name: name.to_owned(),
            })
    }

    /// `name` must be set to exactly `expected`.
    fn expect_value(&self, name: &str, expected: &str) -> Result<(), VerifyError> {
        let actual = self.required(name)?;

        if actual == expected {
            Ok(())
        } else {
            Err(VerifyError::EnvironmentMismatch {
                name: name.to_owned(),
                expected: EnvValue::Set(expected.to_owned()),
                actual: EnvValue::Set(actual),
            })
        }
    }

    fn expect_unset(&self, name: &str) -> Result<(), VerifyError> {
        match self.env.var(name) {
            None => Ok(()),
            Some(actual) => Err(VerifyError::EnvironmentMismatch {
                name: name.to_owned(),
                expected: EnvValue::Unset,
                actual: EnvValue::Set(actual),
            }),
        }
    }
}
