use counsel_console::api::{AppointmentApi, HttpAppointmentApi};
use counsel_console::error::{AppError, ErrorKind};
use counsel_console::models::{AppointmentId, AppointmentStatus, Requester};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    body: String,
}

type Responder = fn(&str, &str) -> (u16, &'static str);

/// Minimal HTTP/1.1 backend: one canned reply per request, then close.
async fn spawn_backend(respond: Responder) -> (Url, Arc<Mutex<Vec<Recorded>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    let seen = log.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let seen = seen.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 4096];
                let (head, body) = loop {
                    let n = socket.read(&mut chunk).await.unwrap_or(0);
                    if n == 0 {
                        return;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                    let text = String::from_utf8_lossy(&buf).to_string();
                    if let Some(split) = text.find("\r\n\r\n") {
                        let head = text[..split].to_string();
                        let length = head
                            .lines()
                            .find_map(|l| {
                                let (name, value) = l.split_once(':')?;
                                name.eq_ignore_ascii_case("content-length")
                                    .then(|| value.trim().parse::<usize>().ok())
                                    .flatten()
                            })
                            .unwrap_or(0);
                        let body = text[split + 4..].to_string();
                        if body.len() >= length {
                            break (head, body);
                        }
                    }
                };

                let mut request_line = head.lines().next().unwrap_or("").split_whitespace();
                let method = request_line.next().unwrap_or("").to_string();
                let path = request_line.next().unwrap_or("").to_string();
                let (status, reply) = respond(&method, &path);
                seen.lock().unwrap().push(Recorded { method, path, body });

                let response = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reply.len(),
                    reply
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (Url::parse(&format!("http://{}", addr)).unwrap(), log)
}

fn api(base: Url) -> HttpAppointmentApi {
    HttpAppointmentApi::with_client(reqwest::Client::new(), base, "all-appointments").unwrap()
}

const LIST_BODY: &str = r#"{
  "appointments": [
    {"_id": {"$oid": "6630f1a2"}, "date": "2024-05-01", "preferred_time": "10:00 AM",
     "concern_type": "Academic", "status": "Pending",
     "user_info": {"username": "alice", "id_number": "TUPT-22-0001"}},
    {"id": 42, "date": "2024-05-02T01:30:00Z", "status": "Approved", "user_id": "u-17"},
    {"_id": "bad", "date": "2024-05-03", "status": "Archived"},
    {"_id": "no-date", "status": "Pending"}
  ]
}"#;

fn list_only(method: &str, path: &str) -> (u16, &'static str) {
    match (method, path) {
        ("GET", "/all-appointments") => (200, LIST_BODY),
        _ => (404, r#"{"error": "Not found"}"#),
    }
}

#[tokio::test]
async fn test_list_normalizes_and_skips_bad_records() {
    let (base, log) = spawn_backend(list_only).await;

    let batch = api(base).list_appointments().await.unwrap();

    assert_eq!(batch.appointments.len(), 2);
    assert_eq!(batch.skipped, 2);

    let first = &batch.appointments[0];
    assert_eq!(first.id.as_str(), "6630f1a2");
    assert_eq!(first.status, AppointmentStatus::Pending);
    assert_eq!(first.requester.display(), "alice (TUPT-22-0001)");

    let second = &batch.appointments[1];
    assert_eq!(second.id.as_str(), "42");
    assert_eq!(second.requester, Requester::UserId("u-17".to_string()));

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].method, "GET");
}

fn update_ok(method: &str, path: &str) -> (u16, &'static str) {
    match (method, path) {
        ("PUT", "/appointments/6630f1a2/status") => (
            200,
            r#"{"message": "Status updated", "appointment": {"_id": "6630f1a2", "date": "2024-05-01", "status": "Approved"}}"#,
        ),
        _ => (404, r#"{"error": "Appointment not found"}"#),
    }
}

#[tokio::test]
async fn test_update_sends_status_and_reads_echo() {
    let (base, log) = spawn_backend(update_ok).await;

    let echoed = api(base)
        .update_status(&AppointmentId::new("6630f1a2"), AppointmentStatus::Approved)
        .await
        .unwrap()
        .expect("backend echoed the record");
    assert_eq!(echoed.status, AppointmentStatus::Approved);

    let log = log.lock().unwrap();
    assert_eq!(log[0].method, "PUT");
    let sent: serde_json::Value = serde_json::from_str(&log[0].body).unwrap();
    assert_eq!(sent, serde_json::json!({"status": "Approved"}));
}

fn update_rejected(_: &str, _: &str) -> (u16, &'static str) {
    (
        400,
        r#"{"error": "Pending appointments can only be approved or rejected."}"#,
    )
}

#[tokio::test]
async fn test_update_rejection_carries_backend_message() {
    let (base, _log) = spawn_backend(update_rejected).await;

    let err = api(base)
        .update_status(&AppointmentId::new("1"), AppointmentStatus::Completed)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NetworkFailure);
    assert!(!err.is_transient());
    match err {
        AppError::Backend { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Pending appointments can only be approved or rejected.");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_network_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = api(Url::parse(&format!("http://{}", addr)).unwrap())
        .list_appointments()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NetworkFailure);
    assert!(err.is_transient());
    assert_eq!(err.to_safe_string(), "Failed to connect to server. Please try again.");
}

fn html_list(_: &str, _: &str) -> (u16, &'static str) {
    (200, "<html><body>Maintenance</body></html>")
}

#[tokio::test]
async fn test_unreadable_list_body_is_reported_as_such() {
    let (base, _log) = spawn_backend(html_list).await;

    let err = api(base).list_appointments().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NetworkFailure);
    assert!(!err.is_transient());
    assert_eq!(err.to_safe_string(), "Server sent an unreadable response.");
}
