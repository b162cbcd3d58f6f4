//! Minimal HTTP/1.1 server with fixed per-path routes for integration tests.
//!
//! Serves share-page HTML and file payloads from memory. Each connection is
//! handled on its own thread; unknown paths get 404.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

/// One canned response, matched by exact request path.
#[derive(Debug, Clone)]
pub struct Route {
    pub path: String,
    pub status: u16,
    /// Extra headers beyond Content-Length (e.g. Content-Disposition).
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Route {
    pub fn html(path: &str, body: &str) -> Route {
        Route {
            path: path.to_string(),
            status: 200,
            headers: vec![("Content-Type".to_string(), "text/html".to_string())],
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn payload(path: &str, body: Vec<u8>) -> Route {
        Route {
            path: path.to_string(),
            status: 200,
            headers: vec![(
                "Content-Type".to_string(),
                "application/octet-stream".to_string(),
            )],
            body,
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Route {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_status(mut self, status: u16) -> Route {
        self.status = status;
        self
    }
}

/// Starts the server in background threads, serving `routes` until the
/// process exits. Returns the base URL, e.g. `http://127.0.0.1:41523`.
pub fn start(routes: Vec<Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: std::net::TcpStream, routes: &[Route]) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));

    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = match request_path(request) {
        Some(p) => p,
        None => return,
    };

    match routes.iter().find(|r| r.path == path) {
        Some(route) => {
            let mut response = format!(
                "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
                route.status,
                reason(route.status),
                route.body.len()
            );
            for (name, value) in &route.headers {
                response.push_str(&format!("{}: {}\r\n", name, value));
            }
            response.push_str("\r\n");
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.write_all(&route.body);
        }
        None => {
            let _ = stream.write_all(
                b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
        }
    }
}

/// Path of `GET <path> HTTP/1.1`; only GET is served.
fn request_path(request: &str) -> Option<&str> {
    let mut parts = request.lines().next()?.split_whitespace();
    if !parts.next()?.eq_ignore_ascii_case("GET") {
        return None;
    }
    parts.next()
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        410 => "Gone",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
