//! This crate contains the environment contract a cluster service exposes to the processes that
//! run next to it: the service-link variables the platform synthesizes from the service name, and
//! the read-only lookup the probe uses to observe them.
//!
//! Be aware that variable names derived here must match what the platform generates, so every
//! name is built from [`service::ServiceIdentity::env_prefix`].

pub mod checked_env;
pub mod custom;
pub mod envs;
pub mod service;
