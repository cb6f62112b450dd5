#![warn(clippy::indexing_slicing)]

use std::process::ExitCode;

use discovery_probe_env::{checked_env::ProcessEnv, service::ServiceIdentity};
use tracing::debug;

mod cli;
mod error;
mod http;
mod logging;
mod verify;

use error::{ProbeError, ProbeResult};
use http::ReqwestGet;
use verify::Verifier;

/// Exit status of a run where a check failed, clap keeps `2` for usage errors.
const VERIFICATION_FAILED: u8 = 3;

fn run(args: cli::Args) -> ProbeResult<()> {
    let settings = args.settings();
    let http = ReqwestGet::new(settings.timeout).map_err(ProbeError::HttpClient)?;
    let service = ServiceIdentity::new(args.service_name, args.namespace);

    let endpoint = Verifier::new(service, ProcessEnv, http, settings).run(&args.custom_env)?;
    debug!(?endpoint, "all checks passed");

    Ok(())
}

fn main() -> ExitCode {
    let args = cli::parse_args();
    logging::init_tracing_registry();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            debug!(?error, "verification failed");
            eprintln!("{:?}", miette::Report::new(error));
            ExitCode::from(VERIFICATION_FAILED)
        }
    }
}
