#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::thread;

use tiny_http::{Header, Response, Server, StatusCode};

/// One request as seen by the mock GitHub server
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("json body")
    }
}

pub struct MockGitHub {
    pub host: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
    handle: thread::JoinHandle<()>,
}

impl MockGitHub {
    /// Wait until the expected number of requests was served
    pub fn finish(self) -> Vec<Recorded> {
        self.handle.join().expect("join server");
        let requests = self.requests.lock().expect("lock").clone();
        requests
    }
}

/// Serve `expected_requests` requests, answering each with `respond`
pub fn spawn_github<F>(expected_requests: usize, respond: F) -> MockGitHub
where
    F: Fn(&Recorded) -> (u16, String) + Send + 'static,
{
    let server = Server::http("127.0.0.1:0").expect("server");
    let host = server.server_addr().to_string();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();

    let handle = thread::spawn(move || {
        for _ in 0..expected_requests {
            let mut req = server.recv().expect("request");
            let mut body = Vec::new();
            req.as_reader().read_to_end(&mut body).expect("body");

            let record = Recorded {
                method: req.method().to_string(),
                url: req.url().to_string(),
                headers: req
                    .headers()
                    .iter()
                    .map(|h| (h.field.to_string(), h.value.to_string()))
                    .collect(),
                body,
            };

            let (status, payload) = respond(&record);
            recorded.lock().expect("lock").push(record);

            let resp = Response::from_string(payload)
                .with_status_code(StatusCode(status))
                .with_header(
                    Header::from_bytes("Content-Type", "application/json").expect("header"),
                );
            req.respond(resp).expect("respond");
        }
    });

    MockGitHub {
        host,
        requests,
        handle,
    }
}

/// Default answers: create returns release 42, uploads and deletes succeed
pub fn github_ok(req: &Recorded) -> (u16, String) {
    match (req.method.as_str(), req.url.as_str()) {
        ("POST", "/repos/acme/app/releases") => (
            201,
            r#"{"id": 42, "upload_url": "https://uploads.example/repos/acme/app/releases/42/assets{?name,label}"}"#
                .to_string(),
        ),
        ("DELETE", _) => (204, String::new()),
        _ => (201, r#"{"state": "uploaded"}"#.to_string()),
    }
}
