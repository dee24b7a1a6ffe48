use serde_json::{Value, json};
use std::net::TcpListener;
use vrnt_core::config::StoreConfig;

pub const TEST_KEY: &str = "service-role-key";

pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

pub fn test_config(base_url: &str) -> StoreConfig {
    StoreConfig::new(base_url, TEST_KEY)
}

pub fn student_json(id: &str, uid: &str, name: &str) -> Value {
    json!({
        "id": id,
        "uid": uid,
        "name_aadhar": name,
        "mobile_number": "+91 98400 12345",
        "email_address": null,
        "email_id": null,
        "aadhaar_number": null,
        "address": null,
        "year_of_certification": "2023",
        "certified_in": null,
        "school": null,
        "veda_adhyapakar_name": null,
        "certificate_url": null,
        "passport_photo_url": null,
        "aadhaar_card_url": null,
        "vedham": "Yajur Veda",
        "date_of_birth": "2005-03-15",
        "father_name": null,
        "shaka": null,
        "gothram": null,
        "soothram": null,
        "category": "P",
        "created_at": "2024-01-01T00:00:00+00:00",
        "updated_at": "2024-01-01T00:00:00+00:00"
    })
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
