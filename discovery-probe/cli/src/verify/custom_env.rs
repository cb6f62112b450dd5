use discovery_probe_env::{checked_env::EnvSource, custom::CustomEnvAssertion};

use super::Verifier;
use crate::{error::VerifyError, http::HttpGet};

impl<E, H> Verifier<E, H>
where
    E: EnvSource,
    H: HttpGet,
{
    /// Each pair is checked on its own, the first one that does not hold stops the run.
    #[tracing::instrument(level = "debug", skip(self), err(level = "debug"))]
    pub(super) fn check_custom_env(
        &self,
        custom_env: &[CustomEnvAssertion],
    ) -> Result<(), VerifyError> {
        custom_env
            .iter()
            .try_for_each(|CustomEnvAssertion { key, value }| self.expect_value(key, value))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::{super::tests::*, *};

    fn assertions(tokens: &[&str]) -> Vec<CustomEnvAssertion> {
        tokens.iter().map(|token| token.parse().unwrap()).collect()
    }

    #[rstest]
    #[case::none(&[])]
    #[case::value_with_separator(&["FOO=bar=baz"])]
    #[case::service_link_variable(&["FOO=bar=baz", "NGINX_DEMO_PORT_8080_TCP_PROTO=tcp"])]
    fn propagated_values_pass(env: HashMap<String, String>, #[case] tokens: &[&str]) {
        let cluster = FakeCluster::default();

        verifier(env, &cluster)
            .check_custom_env(&assertions(tokens))
            .unwrap();
    }

    #[rstest]
    fn value_must_match_exactly(env: HashMap<String, String>) {
        let cluster = FakeCluster::default();

        let error = verifier(env, &cluster)
            .check_custom_env(&assertions(&["FOO=bar"]))
            .unwrap_err();

        assert!(matches!(
            error,
            VerifyError::EnvironmentMismatch { ref name, .. } if name == "FOO"
        ));
    }

    #[rstest]
    fn first_failure_is_reported(env: HashMap<String, String>) {
        let cluster = FakeCluster::default();

        let error = verifier(env, &cluster)
            .check_custom_env(&assertions(&["FOO=bar=baz", "MISSING=1", "ALSO_MISSING=2"]))
            .unwrap_err();

        assert!(matches!(
            error,
            VerifyError::MissingEnvironmentVariable { ref name } if name == "MISSING"
        ));
    }
}
