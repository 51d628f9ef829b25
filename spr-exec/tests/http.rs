use std::time::Duration;

use spr_core::Task;
use spr_exec::{FailureKind, ReqwestTransport, Transport, TransportConfig, TransportError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Accepts one connection, answers with `status` and hands back the raw request head.
async fn one_shot_server(status: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let head = read_head(&mut socket).await;
        let response = format!("HTTP/1.1 {status}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        head
    });
    (format!("http://{addr}"), handle)
}

async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn direct() -> TransportConfig {
    TransportConfig {
        proxy: None,
        timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

#[tokio::test]
async fn direct_get_reports_status() {
    let (base, server) = one_shot_server("204 No Content").await;
    let transport = ReqwestTransport::new(&direct()).unwrap();

    let status = transport
        .send(&Task::get(format!("{base}/users/123?limit=123")))
        .await
        .unwrap();
    assert_eq!(status, 204);

    let head = server.await.unwrap().to_ascii_lowercase();
    assert!(head.starts_with("get /users/123?limit=123 http/1.1\r\n"), "{head}");
    assert!(head.contains("user-agent: spr/"), "{head}");
}

#[tokio::test]
async fn error_statuses_are_results_not_failures() {
    let (base, server) = one_shot_server("500 Internal Server Error").await;
    let transport = ReqwestTransport::new(&direct()).unwrap();

    let status = transport.send(&Task::get(format!("{base}/boom"))).await.unwrap();
    assert_eq!(status, 500);
    server.await.unwrap();
}

#[tokio::test]
async fn redirects_are_not_followed_by_default() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_head(&mut socket).await;
        socket
            .write_all(b"HTTP/1.1 302 Found\r\nlocation: /elsewhere\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
            .await
            .unwrap();
    });

    let transport = ReqwestTransport::new(&direct()).unwrap();
    let status = transport
        .send(&Task::get(format!("http://{addr}/old")))
        .await
        .unwrap();
    assert_eq!(status, 302);
    server.await.unwrap();
}

#[tokio::test]
async fn requests_go_through_the_configured_proxy() {
    let (proxy, server) = one_shot_server("200 OK").await;
    let transport = ReqwestTransport::new(&TransportConfig {
        proxy: Some(proxy),
        timeout: Duration::from_secs(5),
        ..Default::default()
    })
    .unwrap();

    let status = transport
        .send(&Task::get("http://upstream.invalid/users/123"))
        .await
        .unwrap();
    assert_eq!(status, 200);

    let head = server.await.unwrap();
    assert!(
        head.starts_with("GET http://upstream.invalid/users/123 HTTP/1.1\r\n"),
        "{head}"
    );
}

#[tokio::test]
async fn extra_headers_are_sent_with_every_request() {
    let (base, server) = one_shot_server("200 OK").await;
    let transport = ReqwestTransport::new(&TransportConfig {
        headers: vec![("X-Api-Key".to_string(), "secret".to_string())],
        ..direct()
    })
    .unwrap();

    transport.send(&Task::get(format!("{base}/"))).await.unwrap();

    let head = server.await.unwrap().to_ascii_lowercase();
    assert!(head.contains("x-api-key: secret\r\n"), "{head}");
}

#[tokio::test]
async fn refused_connection_is_a_network_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = ReqwestTransport::new(&direct()).unwrap();
    let err = transport
        .send(&Task::get(format!("http://{addr}/")))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Network(_)), "{err:?}");
    assert_eq!(err.kind(), FailureKind::Network);
}

#[tokio::test]
async fn unparseable_url_is_rejected_before_sending() {
    let transport = ReqwestTransport::new(&direct()).unwrap();
    let err = transport
        .send(&Task::get("api.example.com/users/123"))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::InvalidUrl(_)), "{err:?}");
    assert_eq!(err.kind(), FailureKind::InvalidUrl);
}

#[tokio::test]
async fn silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let _server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(socket);
    });

    let transport = ReqwestTransport::new(&TransportConfig {
        timeout: Duration::from_millis(200),
        ..direct()
    })
    .unwrap();
    let err = transport
        .send(&Task::get(format!("http://{addr}/slow")))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Timeout), "{err:?}");
}

#[tokio::test]
async fn bad_header_name_is_a_config_error() {
    let err = ReqwestTransport::new(&TransportConfig {
        headers: vec![("bad header".to_string(), "x".to_string())],
        ..direct()
    })
    .unwrap_err();
    assert!(matches!(err, TransportError::Config(_)), "{err:?}");
}

#[tokio::test]
async fn malformed_proxy_is_a_config_error() {
    let err = ReqwestTransport::new(&TransportConfig {
        proxy: Some("http://[::1".to_string()),
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, TransportError::Config(_)), "{err:?}");
}

#[test]
fn default_config_targets_local_intercepting_proxy() {
    let config = TransportConfig::default();
    assert_eq!(config.proxy.as_deref(), Some("http://127.0.0.1:8080"));
    assert!(config.accept_invalid_certs);
    assert!(!config.follow_redirects);
    assert_eq!(config.timeout, Duration::from_secs(30));
}
