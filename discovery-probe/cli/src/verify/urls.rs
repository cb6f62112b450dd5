use std::net::Ipv6Addr;

use discovery_probe_env::checked_env::EnvSource;
use tracing::debug;

use super::{DiscoveredEndpoint, Verifier};
use crate::{
    error::{ContentProblem, VerifyError},
    http::HttpGet,
};

/// `http://<host>:<port>/`, with IPv6 literals in brackets.
fn http_url(host: &str, port: impl std::fmt::Display) -> String {
    if host.parse::<Ipv6Addr>().is_ok() {
        format!("http://[{host}]:{port}/")
    } else {
        format!("http://{host}:{port}/")
    }
}

impl<E, H> Verifier<E, H>
where
    E: EnvSource,
    H: HttpGet,
{
    /// Reaches the service through every discovery path, the first one also tells us the endpoint
    /// for the rest.
    #[tracing::instrument(level = "debug", skip(self), err(level = "debug"))]
    pub(super) fn check_urls(&self) -> Result<DiscoveredEndpoint, VerifyError> {
        let host = self.required(&self.service_env.service_host())?;
        let port = self.required(&self.service_env.service_port())?;

        self.check_url(&http_url(&host, &port), "env variables")?;
        self.check_url(&http_url(&self.service.name, &port), "service name")?;
        self.check_url(
            &http_url(&self.service.fqdn(&self.settings.cluster_domain), &port),
            "full service name",
        )?;
        self.check_url(
            &http_url(&self.service.name, self.settings.hardcoded_port),
            "hardcoded port",
        )?;

        Ok(DiscoveredEndpoint { host, port })
    }

    /// GETs `url` once, the body must be text containing the marker.
    ///
    /// `how` only describes the URL in progress output and errors.
    fn check_url(&self, url: &str, how: &'static str) -> Result<(), VerifyError> {
        println!("Retrieving URL created with {how}: {url}");

        let body = self
            .http
            .get(url)
            .map_err(|source| VerifyError::NetworkFailure {
                url: url.to_owned(),
                how,
                source,
            })?;

        let content_mismatch = |problem: ContentProblem| VerifyError::ContentMismatch {
            url: url.to_owned(),
            how,
            problem,
        };

        let text = String::from_utf8(body)
            .map_err(|fail| content_mismatch(ContentProblem::NotUtf8(fail)))?;

        // Plain substring match, not a protocol check.
        if !text.contains(&self.settings.marker) {
            return Err(content_mismatch(ContentProblem::MarkerMissing {
                marker: self.settings.marker.clone(),
            }));
        }

        debug!(url, how, "service answered");
        Ok(())
    }
}
