pub mod mocks;

#[allow(unused_imports)]
pub use mocks::InstrumentedBackend;

use std::net::TcpListener;
use vrnt_core::StudentId;

pub const TEST_KEY: &str = "service-role-key";

#[allow(dead_code)]
pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

#[allow(dead_code)]
pub fn owner() -> StudentId {
    StudentId::new("5d1c7a52-3c2e-4f0a-9a55-0e6f1b2c3d4e").unwrap()
}

/// One-shot server that answers with an error status and a body cut short
/// of its declared length. Returns the base URL.
#[allow(dead_code)]
pub fn truncated_body_server() -> String {
    use std::io::{Read, Write};

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = stream.write_all(
                b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\npartial",
            );
        }
    });
    format!("http://{addr}")
}
