use std::time::Duration;

use clap::Parser;
use discovery_probe_env::{custom::CustomEnvAssertion, envs, service::DEFAULT_CLUSTER_DOMAIN};

use crate::verify::{ProbeSettings, DEFAULT_HARDCODED_PORT, DEFAULT_MARKER, DEFAULT_TIMEOUT_SECS};

/// Verifies that a cluster service is reachable and advertised correctly from inside the local
/// process: through its injected environment variables, its short and fully-qualified DNS names,
/// and the default HTTP port.
///
/// Exits with `0` when every check passes, and with `3` on the first failed check.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Short DNS name of the service, also the source of its environment variable prefix.
    pub service_name: String,

    /// Namespace of the service, used in its fully-qualified DNS name.
    pub namespace: String,

    /// `KEY=VALUE` pairs that must be present, unchanged, in the local environment.
    pub custom_env: Vec<CustomEnvAssertion>,

    /// Text every response body must contain.
    #[arg(long, default_value = DEFAULT_MARKER, env = envs::MARKER)]
    pub marker: String,

    /// Timeout of each HTTP request, in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, env = envs::TIMEOUT)]
    pub timeout_secs: u64,

    /// Cluster DNS domain, the fully-qualified name is `<service>.<namespace>.svc.<domain>`.
    #[arg(long, default_value = DEFAULT_CLUSTER_DOMAIN, env = envs::CLUSTER_DOMAIN)]
    pub cluster_domain: String,

    /// Port that must route to the service regardless of its declared port.
    #[arg(long, default_value_t = DEFAULT_HARDCODED_PORT, env = envs::HARDCODED_PORT)]
    pub hardcoded_port: u16,
}

impl Args {
    pub fn settings(&self) -> ProbeSettings {
        ProbeSettings {
            marker: self.marker.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            cluster_domain: self.cluster_domain.clone(),
            hardcoded_port: self.hardcoded_port,
        }
    }
}

/// Usage errors exit with clap's own status (`2`), never with the verification failure status.
pub fn parse_args() -> Args {
    Args::try_parse().unwrap_or_else(|err| err.exit())
}
