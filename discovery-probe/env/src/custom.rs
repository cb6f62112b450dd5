use std::{fmt, str::FromStr};

use thiserror::Error;

/// A `KEY=VALUE` pair that must be present, unchanged, in the local environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomEnvAssertion {
    pub key: String,
    /// Everything after the first `=`, may itself contain `=`.
    pub value: String,
}

/// Error when parsing a [`CustomEnvAssertion`] from a command line token.
#[derive(Debug, PartialEq, Clone, Eq, Error)]
pub enum InvalidCustomEnv {
    #[error("`{0}` is not a `KEY=VALUE` pair")]
    MissingSeparator(String),

    #[error("`{0}` has an empty key")]
    EmptyKey(String),
}

impl FromStr for CustomEnvAssertion {
    type Err = InvalidCustomEnv;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| InvalidCustomEnv::MissingSeparator(s.to_owned()))?;

        if key.is_empty() {
            return Err(InvalidCustomEnv::EmptyKey(s.to_owned()));
        }

        Ok(Self {
            key: key.to_owned(),
            value: value.to_owned(),
        })
    }
}

impl fmt::Display for CustomEnvAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
