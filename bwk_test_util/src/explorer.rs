use std::{
    net::TcpListener,
    sync::{Arc, Mutex},
    thread::{self, JoinHandle},
};

use tiny_http::{Response, Server};

/// A request received by a [`MockExplorer`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path and query, eg. `/api.dws?q=unspent`
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of the header `name`, compared case insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Decoded query parameters in order
    pub fn query(&self) -> Vec<(String, String)> {
        let url = url::Url::parse(&format!("http://localhost{}", self.url)).expect("valid url");
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

/// An HTTP server on localhost answering every request with the same status and body.
///
/// The server stops when dropped.
pub struct MockExplorer {
    server: Arc<Server>,
    handle: Option<JoinHandle<()>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    port: u16,
}

impl MockExplorer {
    pub fn start(status: u16, body: &str) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind mock explorer"));
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .expect("ip listener");
        let requests = Arc::new(Mutex::new(vec![]));

        let handle = {
            let server = server.clone();
            let requests = requests.clone();
            let body = body.to_string();
            thread::spawn(move || {
                for request in server.incoming_requests() {
                    let recorded = RecordedRequest {
                        method: request.method().to_string(),
                        url: request.url().to_string(),
                        headers: request
                            .headers()
                            .iter()
                            .map(|h| (h.field.as_str().as_str().to_string(), h.value.to_string()))
                            .collect(),
                    };
                    log::debug!("mock explorer received {recorded:?}");
                    requests.lock().expect("not poisoned").push(recorded);

                    let response = Response::from_string(body.as_str()).with_status_code(status);
                    if let Err(e) = request.respond(response) {
                        log::error!("mock explorer cannot respond: {e}");
                    }
                }
            })
        };

        Self {
            server,
            handle: Some(handle),
            requests,
            port,
        }
    }

    /// Base url of the mocked `api.dws` endpoint
    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}/api.dws", self.port)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("not poisoned").clone()
    }
}

impl Drop for MockExplorer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// A url on localhost where nothing is listening
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api.dws")
}
