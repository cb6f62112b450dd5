use std::fmt;

/// Cluster DNS domain used when none is configured.
pub const DEFAULT_CLUSTER_DOMAIN: &str = "cluster.local";

/// Name and namespace of the service under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    /// Short DNS name of the service, e.g `nginx-demo`.
    pub name: String,
    pub namespace: String,
}

impl ServiceIdentity {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    /// Stem of every service-link variable: the name uppercased, with `-` replaced by `_`.
    ///
    /// `nginx-demo` becomes `NGINX_DEMO`.
    pub fn env_prefix(&self) -> String {
        self.name.to_uppercase().replace('-', "_")
    }

    /// `<name>.<namespace>.svc.<cluster_domain>`.
    pub fn fqdn(&self, cluster_domain: &str) -> String {
        format!("{}.{}.svc.{cluster_domain}", self.name, self.namespace)
    }

    /// Names of the service-link variables for this service.
    pub fn env(&self) -> ServiceEnv {
        ServiceEnv {
            prefix: self.env_prefix(),
        }
    }
}

impl fmt::Display for ServiceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Docker-links style variable names the platform injects for a service.
///
/// Only built through [`ServiceIdentity::env`], so every name shares one prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEnv {
    prefix: String,
}

impl ServiceEnv {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `<PREFIX>_SERVICE_HOST`
    pub fn service_host(&self) -> String {
        format!("{}_SERVICE_HOST", self.prefix)
    }

    /// `<PREFIX>_SERVICE_PORT`
    pub fn service_port(&self) -> String {
        format!("{}_SERVICE_PORT", self.prefix)
    }

    /// `<PREFIX>_PORT`, expected to hold `tcp://<host>:<port>`.
    pub fn port(&self) -> String {
        format!("{}_PORT", self.prefix)
    }

    /// `<PREFIX>_PORT_<port>_TCP`, an alias of [`Self::port`].
    pub fn port_tcp(&self, port: &str) -> String {
        format!("{}_PORT_{port}_TCP", self.prefix)
    }

    /// `<PREFIX>_PORT_<port>_TCP_PROTO`
    pub fn port_tcp_proto(&self, port: &str) -> String {
        format!("{}_PROTO", self.port_tcp(port))
    }

    /// `<PREFIX>_PORT_<port>_TCP_PORT`
    pub fn port_tcp_port(&self, port: &str) -> String {
        format!("{}_PORT", self.port_tcp(port))
    }

    /// `<PREFIX>_PORT_<port>_TCP_ADDR`
    pub fn port_tcp_addr(&self, port: &str) -> String {
        format!("{}_ADDR", self.port_tcp(port))
    }
}

/// Value of `<PREFIX>_PORT` for the given endpoint.
pub fn tcp_url(host: &str, port: &str) -> String {
    format!("tcp://{host}:{port}")
}
