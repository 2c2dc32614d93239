//! Test fixtures shared by the unit tests and, through `#[path]`, by the
//! integration tests in `tests/common`. Only std is used here.
//!
//! - [`TestServer`]: a throwaway HTTP server on 127.0.0.1 serving canned replies
//! - [`fake_merge_tool`] / [`failing_merge_tool`]: shell scripts standing in
//!   for dxvk-cache-tool (Unix only)
//!
//! Writing a script while another test thread forks can make the later exec
//! fail with ETXTBSY, so tests that create or spawn a merge tool run under
//! `#[serial]`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

/// A canned HTTP response
#[derive(Debug, Clone)]
pub struct Reply {
    status: u16,
    body: Vec<u8>,
    send_length: bool,
}

impl Reply {
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            body,
            send_length: true,
        }
    }

    /// 200 response whose size is only known by reading to EOF
    pub fn without_length(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            body,
            send_length: false,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
            send_length: true,
        }
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut head = format!("HTTP/1.1 {} X\r\nConnection: close\r\n", self.status);
        if self.send_length {
            head.push_str(&format!("Content-Length: {}\r\n", self.body.len()));
        }
        head.push_str("\r\n");
        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }
}

/// HTTP server answering from a route table tests can change while it runs
///
/// Unknown paths get a 404. Every request path is recorded so tests can
/// assert how often a file was requested.
pub struct TestServer {
    addr: SocketAddr,
    routes: Arc<Mutex<HashMap<String, Reply>>>,
    hits: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub fn start(routes: Vec<(&str, Reply)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
        let addr = listener.local_addr().expect("test server address");
        let routes: Arc<Mutex<HashMap<String, Reply>>> = Arc::new(Mutex::new(
            routes
                .into_iter()
                .map(|(path, reply)| (path.to_string(), reply))
                .collect(),
        ));
        let hits: Arc<Mutex<Vec<String>>> = Arc::default();

        let served = Arc::clone(&routes);
        let recorded = Arc::clone(&hits);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let Some(path) = read_request_path(&stream) else {
                    continue;
                };
                recorded.lock().unwrap().push(path.clone());
                let reply = served
                    .lock()
                    .unwrap()
                    .get(&path)
                    .cloned()
                    .unwrap_or_else(|| Reply::status(404));
                let _ = (&stream).write_all(&reply.to_bytes());
            }
        });

        Self { addr, routes, hits }
    }

    /// Serve `body` at `path` from now on, returning the full URL
    pub fn serve(&self, path: &str, body: Vec<u8>) -> String {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Reply::ok(body));
        self.url(path)
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Number of requests received for `path`
    pub fn hits(&self, path: &str) -> usize {
        self.hits
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.as_str() == path)
            .count()
    }
}

fn read_request_path(stream: &TcpStream) -> Option<String> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let path = request_line.split_whitespace().nth(1)?.to_string();

    // Drain headers
    loop {
        let mut line = String::new();
        let n = reader.read_line(&mut line).ok()?;
        if n == 0 || line == "\r\n" || line == "\n" {
            break;
        }
    }
    Some(path)
}

/// URL on a local port nothing listens on
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let port = listener.local_addr().expect("probe address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}/cacheB.bin")
}

#[cfg(unix)]
fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    std::fs::write(path, format!("#!/bin/sh\n{body}")).expect("write script");
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod script");
}

/// Merge tool that concatenates its inputs into the `-o` path
///
/// Each run appends its arguments as one line to `args.txt` next to the script.
#[cfg(unix)]
pub fn fake_merge_tool(dir: &Path) -> PathBuf {
    let path = dir.join("fake-cache-tool");
    let args = dir.join("args.txt");
    write_script(
        &path,
        &format!(
            "echo \"$@\" >> '{}'\nout=\"$2\"\nshift 2\ncat \"$@\" > \"$out\"\necho merged $# files\n",
            args.display()
        ),
    );
    path
}

/// Merge tool that always fails with exit code 3
#[cfg(unix)]
pub fn failing_merge_tool(dir: &Path) -> PathBuf {
    let path = dir.join("failing-cache-tool");
    write_script(&path, "echo 'Invalid cache header' >&2\nexit 3\n");
    path
}
