use super::*;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

/// Serves exactly one request and returns it as text (head plus body).
fn one_shot_server(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let handle = std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut request = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
            let end = line == "\r\n" || line.is_empty();
            request.push_str(&line);
            if end {
                break;
            }
        }
        let mut body_buf = vec![0u8; content_length];
        reader.read_exact(&mut body_buf).unwrap();
        request.push_str(&String::from_utf8_lossy(&body_buf));

        let mut stream = reader.into_inner();
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();
        request
    });
    (base_url, handle)
}

fn remote_for(base_url: &str) -> HttpDocumentRemote {
    HttpDocumentRemote::new(&ServiceSettings {
        base_url: format!("{base_url}/"),
        timeout_secs: 5,
    })
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let remote = remote_for("http://localhost:8000");
    assert_eq!(remote.base_url(), "http://localhost:8000");
}

#[test]
fn fetch_gets_file_endpoint() {
    let (url, server) = one_shot_server("200 OK", "Chapter 1");
    let remote = remote_for(&url);

    assert_eq!(remote.fetch("outline.txt").unwrap(), "Chapter 1");

    let request = server.join().unwrap();
    assert!(request.starts_with("GET /files/outline.txt HTTP/1.1"), "{request}");
}

#[test]
fn fetch_maps_error_status() {
    let (url, server) = one_shot_server("404 Not Found", "missing");
    let remote = remote_for(&url);

    match remote.fetch("bubble-map.json") {
        Err(RemoteError::Status { code, url }) => {
            assert_eq!(code, 404);
            assert!(url.ends_with("/files/bubble-map.json"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    server.join().unwrap();
}

#[test]
fn save_posts_json_content() {
    let (url, server) = one_shot_server("200 OK", "{}");
    let remote = remote_for(&url);

    remote.save("outline.txt", "line \"one\"").unwrap();

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /files/outline.txt HTTP/1.1"), "{request}");
    assert!(request
        .to_ascii_lowercase()
        .contains("content-type: application/json"));
    assert!(request.ends_with(r#"{"content":"line \"one\""}"#), "{request}");
}

#[test]
fn upload_sends_multipart_and_requires_json_reply() {
    let (url, server) = one_shot_server("200 OK", r#"{"filename":"a.pdf"}"#);
    let remote = remote_for(&url);
    remote.upload("a.pdf", b"%PDF").unwrap();
    let request = server.join().unwrap();
    assert!(request.starts_with("POST /api/upload HTTP/1.1"), "{request}");
    assert!(request.contains("multipart/form-data; boundary="));
    assert!(request.contains("filename=\"a.pdf\""));

    let (url, server) = one_shot_server("200 OK", "<html>ok</html>");
    let remote = remote_for(&url);
    assert!(matches!(
        remote.upload("a.pdf", b"%PDF"),
        Err(RemoteError::Json(_))
    ));
    server.join().unwrap();
}

#[test]
fn list_uploads_reads_files_array() {
    let (url, server) = one_shot_server("200 OK", r#"{"files":["a.pdf","b.pdf"]}"#);
    let remote = remote_for(&url);

    assert_eq!(remote.list_uploads().unwrap(), ["a.pdf", "b.pdf"]);
    let request = server.join().unwrap();
    assert!(request.starts_with("GET /api/files HTTP/1.1"), "{request}");
}

#[test]
fn unreachable_service_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let remote = remote_for(&url);
    assert!(matches!(
        remote.fetch("outline.txt"),
        Err(RemoteError::Transport(_))
    ));
}

#[test]
fn multipart_body_wraps_bytes_in_file_field() {
    let body = multipart_body("doc.pdf", b"BYTES");
    let text = String::from_utf8(body).unwrap();

    assert!(text.starts_with(&format!("--{BOUNDARY}\r\n")));
    assert!(text.contains("name=\"file\"; filename=\"doc.pdf\""));
    assert!(text.contains("Content-Type: application/pdf\r\n\r\nBYTES\r\n"));
    assert!(text.ends_with(&format!("--{BOUNDARY}--\r\n")));
}
