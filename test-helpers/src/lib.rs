pub mod mock;
mod routes;
pub mod telemetry;

use std::{
    net::TcpListener,
    sync::{Arc, Mutex, PoisonError},
};

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    dev::{Server, Service},
    http::StatusCode,
    web,
};
use anyhow::Context;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub use mock::MockDataset;

pub struct Config {
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
}

impl Config {
    /// Read `IP_ADDRESS` and `PORT`, defaulting to `127.0.0.1:8000`.
    pub fn from_env() -> anyhow::Result<Self> {
        use std::env::var;

        let ip = var("IP_ADDRESS").unwrap_or_else(|_| "127.0.0.1".into());
        let port = match var("PORT") {
            Ok(port) => port
                .parse()
                .with_context(|| format!("Invalid PORT {port:?}"))?,
            Err(_) => 8000,
        };
        Ok(Config { ip, port })
    }

    /// Loopback address on an os-assigned port.
    pub fn ephemeral() -> Self {
        Config {
            ip: "127.0.0.1".into(),
            port: 0,
        }
    }
}

/// Data served by the mock backend and the failure it should answer with,
/// if any.
pub struct MockState {
    pub dataset: MockDataset,
    failure: Mutex<Option<(StatusCode, serde_json::Value)>>,
}

impl MockState {
    pub fn new(dataset: MockDataset) -> Self {
        Self {
            dataset,
            failure: Mutex::new(None),
        }
    }

    fn failure(&self) -> Option<(StatusCode, serde_json::Value)> {
        self.failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_failure(&self, failure: Option<(StatusCode, serde_json::Value)>) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = failure;
    }
}

/// Every request URI (path and query) the mock backend has received, in
/// arrival order.
#[derive(Clone, Default, Debug)]
pub struct RequestLog(Arc<Mutex<Vec<String>>>);

impl RequestLog {
    fn record(&self, uri: String) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(uri);
    }

    pub fn all(&self) -> Vec<String> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests for `path`, given relative to the api root as it
    /// is passed to `APIClient::get`.
    pub fn hits(&self, path: &str) -> usize {
        let uri = format!("/api/{}", path.trim_start_matches('/'));
        self.all().iter().filter(|logged| **logged == uri).count()
    }

    /// Number of requests for a resource, whatever their query string.
    pub fn hits_resource(&self, resource: &str) -> usize {
        let prefix = format!("/api/{}", resource.trim_start_matches('/'));
        self.all()
            .iter()
            .filter(|logged| logged.split('?').next() == Some(prefix.as_str()))
            .count()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

/// Build the mock backend, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub fn build(
    config: &mut Config,
    state: web::Data<MockState>,
    requests: RequestLog,
) -> std::io::Result<Server> {
    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let server = HttpServer::new(move || {
        let requests = requests.clone();
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials(),
            )
            .wrap_fn(move |req, srv| {
                requests.record(req.uri().to_string());
                srv.call(req)
            })
            .service(routes::api_services())
            .app_data(state.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

pub struct TestApp {
    pub port: u16,
    pub client: payloads::APIClient,
    pub requests: RequestLog,
    state: web::Data<MockState>,
}

impl TestApp {
    pub fn address(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn dataset(&self) -> &MockDataset {
        &self.state.dataset
    }

    /// Make every data endpoint answer with `status` and `body` until
    /// [`TestApp::recover`] is called.
    pub fn fail_with(&self, status: u16, body: serde_json::Value) {
        let status = StatusCode::from_u16(status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.state.set_failure(Some((status, body)));
    }

    pub fn recover(&self) {
        self.state.set_failure(None);
    }
}

/// Start the mock backend on `config`, serving the fixture dataset.
pub async fn spawn_app_on(mut config: Config) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let state = web::Data::new(MockState::new(MockDataset::create()));
    let requests = RequestLog::default();
    let server = build(&mut config, state.clone(), requests.clone()).unwrap();
    tokio::spawn(server);

    TestApp {
        port: config.port,
        client: payloads::APIClient::new(format!(
            "http://127.0.0.1:{}",
            config.port
        )),
        requests,
        state,
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_on(Config::ephemeral()).await
}

/// A client pointed at a port nothing listens on.
pub fn unreachable_client() -> payloads::APIClient {
    let port = TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .unwrap();
    payloads::APIClient::new(format!("http://127.0.0.1:{port}"))
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: u16,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code.as_u16(), expected)
        }
        _ => panic!("Expected APIError"),
    };
}
