//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves canned responses chosen by path prefix (longest match wins) and
//! records every request path so tests can assert which endpoints were hit.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Route {
    pub prefix: String,
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Route {
    pub fn json(prefix: &str, body: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            status: 200,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn html(prefix: &str, body: &str) -> Self {
        Self {
            content_type: "text/html",
            ..Self::json(prefix, body)
        }
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }
}

pub struct JsonServer {
    pub base: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl JsonServer {
    /// Request paths (with query) in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn hits_with_prefix(&self, prefix: &str) -> usize {
        self.hits().iter().filter(|p| p.starts_with(prefix)).count()
    }
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start(routes: Vec<Route>) -> JsonServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let hits = Arc::new(Mutex::new(Vec::new()));
    let server_hits = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let hits = Arc::clone(&server_hits);
            thread::spawn(move || handle(stream, &routes, &hits));
        }
    });
    JsonServer {
        base: format!("http://127.0.0.1:{}", port),
        hits,
    }
}

fn handle(mut stream: std::net::TcpStream, routes: &[Route], hits: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/").to_string();
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        return;
    }
    hits.lock().unwrap().push(path.clone());

    let route = routes
        .iter()
        .filter(|r| path.starts_with(&r.prefix))
        .max_by_key(|r| r.prefix.len());
    let response = match route {
        Some(r) => format!(
            "HTTP/1.1 {} X\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            r.status,
            r.content_type,
            r.body.len(),
            r.body
        ),
        None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string(),
    };
    let _ = stream.write_all(response.as_bytes());
}
