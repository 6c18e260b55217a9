// Shared canned-response HTTP server for exercising the client offline.
#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;

/// Canned HTTP response returned for requests matching a route needle.
pub struct CannedResponse {
    pub status: u16,
    pub reason: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl CannedResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            reason: "OK",
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn text(body: &str) -> Self {
        Self {
            status: 200,
            reason: "OK",
            content_type: "text/plain",
            body: body.to_string(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            reason: "Not Found",
            content_type: "text/plain",
            body: "not found".to_string(),
        }
    }
}

/// Loopback server answering `hits` connections, each with the first route
/// whose needle appears in the request line.
pub struct StubServer {
    addr: SocketAddr,
}

impl StubServer {
    pub fn serve(routes: Vec<(&'static str, CannedResponse)>, hits: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener has local addr");

        thread::spawn(move || {
            for _ in 0..hits {
                match listener.accept() {
                    Ok((stream, _)) => answer(stream, &routes),
                    Err(_) => break,
                }
            }
        });

        Self { addr }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

fn answer(mut stream: TcpStream, routes: &[(&'static str, CannedResponse)]) {
    let mut buffer = [0u8; 4096];
    let mut request = Vec::new();
    loop {
        match stream.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                request.extend_from_slice(&buffer[..n]);
                if request.windows(4).any(|window| window == b"\r\n\r\n") {
                    break;
                }
            }
            Err(_) => return,
        }
    }

    let request = String::from_utf8_lossy(&request);
    let request_line = request.lines().next().unwrap_or_default();

    match routes
        .iter()
        .find(|(needle, _)| request_line.contains(needle))
    {
        Some((_, response)) => write_response(&mut stream, response),
        None => write_response(&mut stream, &CannedResponse::not_found()),
    }
}

fn write_response(stream: &mut TcpStream, response: &CannedResponse) {
    let payload = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        response.reason,
        response.content_type,
        response.body.len(),
        response.body
    );
    let _ = stream.write_all(payload.as_bytes());
    let _ = stream.flush();
}
