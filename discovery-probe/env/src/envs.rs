//! Definitions of the fixed-name environment variables the probe reads.
//!
//! Names derived from a service live in [`crate::service::ServiceEnv`] instead.

use crate::checked_env::{CheckedEnv, FlagRepr};

/// Set by the remote execution environment on the backing pod itself.
///
/// Must never reach the local process unless the workload declares it explicitly.
pub const TELEPRESENCE_PROXY: &str = "TELEPRESENCE_PROXY";

/// Instructs the probe to produce logs in JSON format.
pub const JSON_LOG: CheckedEnv<FlagRepr> = CheckedEnv::new("DISCOVERY_PROBE_JSON_LOG");

/// Overrides the text expected in every response body.
pub const MARKER: &str = "DISCOVERY_PROBE_MARKER";

/// Overrides the per-request timeout, in seconds.
pub const TIMEOUT: &str = "DISCOVERY_PROBE_TIMEOUT";

/// Overrides the cluster DNS domain used to build fully-qualified service names.
pub const CLUSTER_DOMAIN: &str = "DISCOVERY_PROBE_CLUSTER_DOMAIN";

/// Overrides the port used by the hardcoded-port reachability check.
pub const HARDCODED_PORT: &str = "DISCOVERY_PROBE_HARDCODED_PORT";

/// Sets the probe log level.
///
/// Should follow `tracing` format, e.g `discovery_probe=debug`.
pub const LOG_LEVEL: &str = "RUST_LOG";
