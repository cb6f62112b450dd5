use std::process::{Command, Output};

use test_bin::get_test_bin;
use tokio::runtime::Runtime;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const NGINX_PAGE: &str = "<html><head><title>Welcome to nginx!</title></head></html>";

/// Mock server answering `GET /` with [`NGINX_PAGE`].
///
/// Fields drop in order, the server goes before the runtime it was started on.
pub struct NginxMock {
    pub server: MockServer,
    _runtime: Runtime,
}

pub fn nginx_mock() -> NginxMock {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("mock server runtime");

    let server = runtime.block_on(async {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(NGINX_PAGE))
            .mount(&mock_server)
            .await;

        mock_server
    });

    NginxMock {
        server,
        _runtime: runtime,
    }
}

/// The probe binary with an empty environment.
pub fn probe() -> Command {
    let mut command = get_test_bin("discovery-probe");
    command.env_clear();
    command
}

pub fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(ToOwned::to_owned)
        .collect()
}
