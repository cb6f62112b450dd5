use discovery_probe_env::{checked_env::EnvSource, envs, service::tcp_url};

use super::{DiscoveredEndpoint, Verifier};
use crate::{error::VerifyError, http::HttpGet};

impl<E, H> Verifier<E, H>
where
    E: EnvSource,
    H: HttpGet,
{
    /// The remaining service-link variables must describe the same endpoint the URL checks used.
    #[tracing::instrument(level = "debug", skip(self), err(level = "debug"))]
    pub(super) fn check_service_env(
        &self,
        endpoint: &DiscoveredEndpoint,
    ) -> Result<(), VerifyError> {
        let DiscoveredEndpoint { host, port } = endpoint;
        let names = &self.service_env;

        let port_url = tcp_url(host, port);
        self.expect_value(&names.port(), &port_url)?;
        // Byte-identical alias of `<PREFIX>_PORT`, already known to hold `port_url`.
        self.expect_value(&names.port_tcp(port), &port_url)?;
        self.expect_value(&names.port_tcp_proto(port), "tcp")?;
        self.expect_value(&names.port_tcp_port(port), port)?;
        self.expect_value(&names.port_tcp_addr(port), host)?;

        // Set on the backing pod, not declared on the workload.
        self.expect_unset(envs::TELEPRESENCE_PROXY)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::{super::tests::*, *};
    use crate::error::EnvValue;

    fn endpoint() -> DiscoveredEndpoint {
        DiscoveredEndpoint {
            host: "10.0.0.5".into(),
            port: "8080".into(),
        }
    }

    #[rstest]
    fn consistent_env_passes(env: HashMap<String, String>) {
        let cluster = FakeCluster::default();

        verifier(env, &cluster)
            .check_service_env(&endpoint())
            .unwrap();

        assert!(cluster.requests.borrow().is_empty());
    }

    #[rstest]
    #[case::alias("NGINX_DEMO_PORT_8080_TCP", "tcp://10.0.0.5:8080/", "tcp://10.0.0.5:8080")]
    #[case::proto("NGINX_DEMO_PORT_8080_TCP_PROTO", "udp", "tcp")]
    #[case::port("NGINX_DEMO_PORT_8080_TCP_PORT", "08080", "8080")]
    #[case::addr("NGINX_DEMO_PORT_8080_TCP_ADDR", "10.0.0.6", "10.0.0.5")]
    fn mismatch_names_variable_and_values(
        mut env: HashMap<String, String>,
        #[case] name: &str,
        #[case] actual: &str,
        #[case] expected: &str,
    ) {
        env.insert(name.into(), actual.into());
        let cluster = FakeCluster::default();

        let error = verifier(env, &cluster)
            .check_service_env(&endpoint())
            .unwrap_err();

        match error {
            VerifyError::EnvironmentMismatch {
                name: failed,
                expected: expected_value,
                actual: actual_value,
            } => {
                assert_eq!(failed, name);
                assert_eq!(expected_value, EnvValue::Set(expected.into()));
                assert_eq!(actual_value, EnvValue::Set(actual.into()));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[rstest]
    #[case("NGINX_DEMO_PORT")]
    #[case("NGINX_DEMO_PORT_8080_TCP")]
    #[case("NGINX_DEMO_PORT_8080_TCP_PROTO")]
    #[case("NGINX_DEMO_PORT_8080_TCP_PORT")]
    #[case("NGINX_DEMO_PORT_8080_TCP_ADDR")]
    fn every_variant_is_required(mut env: HashMap<String, String>, #[case] missing: &str) {
        env.remove(missing);
        let cluster = FakeCluster::default();

        let error = verifier(env, &cluster)
            .check_service_env(&endpoint())
            .unwrap_err();

        assert!(matches!(
            error,
            VerifyError::MissingEnvironmentVariable { ref name } if name == missing
        ));
    }

    #[rstest]
    fn port_qualified_names_follow_discovered_port(mut env: HashMap<String, String>) {
        for suffix in ["", "_PROTO", "_PORT", "_ADDR"] {
            let value = env
                .remove(&format!("NGINX_DEMO_PORT_8080_TCP{suffix}"))
                .unwrap();
            env.insert(format!("NGINX_DEMO_PORT_9000_TCP{suffix}"), value);
        }
        env.insert("NGINX_DEMO_PORT".into(), "tcp://10.0.0.5:9000".into());
        env.insert("NGINX_DEMO_PORT_9000_TCP".into(), "tcp://10.0.0.5:9000".into());
        env.insert("NGINX_DEMO_PORT_9000_TCP_PORT".into(), "9000".into());
        let cluster = FakeCluster::default();

        let endpoint = DiscoveredEndpoint {
            host: "10.0.0.5".into(),
            port: "9000".into(),
        };

        verifier(env, &cluster)
            .check_service_env(&endpoint)
            .unwrap();
    }

    #[rstest]
    #[case("1")]
    #[case("")]
    fn internal_marker_must_be_absent(mut env: HashMap<String, String>, #[case] value: &str) {
        env.insert("TELEPRESENCE_PROXY".into(), value.into());
        let cluster = FakeCluster::default();

        let error = verifier(env, &cluster)
            .check_service_env(&endpoint())
            .unwrap_err();

        assert!(matches!(
            error,
            VerifyError::EnvironmentMismatch {
                expected: EnvValue::Unset,
                actual: EnvValue::Set(ref actual),
                ..
            } if actual == value
        ));
    }
}
