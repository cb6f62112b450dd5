use std::{collections::HashMap, fmt, marker::PhantomData};

use thiserror::Error;

/// Read-only view of an environment.
///
/// The probe never reads [`std::env`] directly, it goes through this trait so that checks can be
/// driven by a fake mapping in tests.
pub trait EnvSource {
    /// Returns the value of `name`, or [`None`] when the variable is not set.
    fn var(&self, name: &str) -> Option<String>;
}

/// The environment of the current process.
///
/// Values that are not valid UTF-8 are read through their lossy rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// A representation of an environment variable value.
pub trait EnvRepr {
    /// Type of the value, e.g `bool`.
    type Value;
    /// Error that can occur when reading the value from the representation.
    type FromReprError;

    /// Reads a value from the given representation.
    fn from_repr(repr: &str) -> Result<Self::Value, Self::FromReprError>;
}

/// On/off switch, accepts `true`/`false`, `1`/`0`, `yes`/`no` and `on`/`off` in any case.
///
/// An empty value reads as off.
pub struct FlagRepr;

/// Error when a [`FlagRepr`] variable holds something else.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[error("`{0}` is not a switch value, expected one of `true`, `false`, `1`, `0`")]
pub struct ParseFlagError(pub String);

impl EnvRepr for FlagRepr {
    type Value = bool;
    type FromReprError = ParseFlagError;

    fn from_repr(repr: &str) -> Result<bool, Self::FromReprError> {
        match repr.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" | "" => Ok(false),
            _ => Err(ParseFlagError(repr.to_owned())),
        }
    }
}

/// An environment variable with a fixed name and strict value type checking.
pub struct CheckedEnv<R: EnvRepr> {
    /// Name of the variable.
    pub name: &'static str,
    repr: PhantomData<fn() -> R>,
}

impl<R: EnvRepr> CheckedEnv<R> {
    /// Creates a new instance.
    ///
    /// All instances should be kept together in [`super::envs`].
    pub(crate) const fn new(name: &'static str) -> Self {
        Self {
            name,
            repr: PhantomData,
        }
    }

    /// Reads this variable's value from the given [`EnvSource`].
    pub fn try_from_source<E: EnvSource>(
        &self,
        source: &E,
    ) -> Result<Option<R::Value>, R::FromReprError> {
        source.var(self.name).as_deref().map(R::from_repr).transpose()
    }

    /// Reads this variable's value from the process environment.
    pub fn try_from_env(&self) -> Result<Option<R::Value>, R::FromReprError> {
        self.try_from_source(&ProcessEnv)
    }
}

impl<R: EnvRepr> fmt::Debug for CheckedEnv<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl<R: EnvRepr> fmt::Display for CheckedEnv<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
