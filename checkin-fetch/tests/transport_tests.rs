//! Integration tests for the transport against local servers.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use axum::Router;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use checkin_fetch::{Jar, RequestDescriptor, Transport, TransportError, decode_json};
use tokio::net::TcpListener;

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

#[tokio::test]
async fn test_silent_server_times_out_after_two_attempts() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicU32::new(0));

    let counter = accepted.clone();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            held.push(socket);
        }
    });

    let transport = Transport::new().with_retry_base_delay(Duration::from_millis(50));
    let request = RequestDescriptor::get(format!("http://{addr}/user"))
        .timeout(Duration::from_millis(200));

    let err = transport.execute(&request).await.unwrap_err();

    assert!(matches!(err, TransportError::Timeout(_)), "got {err:?}");
    assert_eq!(accepted.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_refused_connection_is_reported() {
    // Bind then drop to get a port nobody listens on.
    let addr = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap()
        .local_addr()
        .unwrap();

    let transport = Transport::new().with_retry_base_delay(Duration::from_millis(10));
    let err = transport
        .execute(&RequestDescriptor::get(format!("http://{addr}/")))
        .await
        .unwrap_err();

    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_compressed_body_reaches_decoder_raw() {
    let body = gzip(br#"{"ret":1,"msg":"ok"}"#);
    let router = Router::new().route(
        "/user/checkin",
        axum::routing::post(move || {
            let body = body.clone();
            async move { ([(header::CONTENT_ENCODING, "gzip")], body) }
        }),
    );
    let base = serve(router).await;

    let response = Transport::new()
        .execute(&RequestDescriptor::post(format!("{base}/user/checkin")))
        .await
        .unwrap();

    assert_eq!(response.content_encoding(), Some("gzip"));
    assert_eq!(response.body.get(..2), Some(&[0x1f, 0x8b][..]));
    assert_eq!(decode_json(&response).unwrap()["msg"], "ok");
}

#[tokio::test]
async fn test_redirect_not_followed_when_disabled() {
    let router = Router::new()
        .route(
            "/auth/login",
            get(|| async { (StatusCode::FOUND, [(header::LOCATION, "/user")]).into_response() }),
        )
        .route("/user", get(|| async { "dashboard" }));
    let base = serve(router).await;
    let transport = Transport::new();

    let stopped = transport
        .execute(&RequestDescriptor::get(format!("{base}/auth/login")).no_redirects())
        .await
        .unwrap();
    assert_eq!(stopped.status, StatusCode::FOUND);
    assert_eq!(stopped.location(), Some("/user"));

    let followed = transport
        .execute(&RequestDescriptor::get(format!("{base}/auth/login")))
        .await
        .unwrap();
    assert_eq!(followed.status, StatusCode::OK);
    assert_eq!(followed.text(), "dashboard");
}

#[tokio::test]
async fn test_jar_carries_cookies_between_requests() {
    let router = Router::new()
        .route(
            "/auth/login",
            get(|| async { [(header::SET_COOKIE, "uid=42; Path=/")] }),
        )
        .route(
            "/echo",
            get(|headers: axum::http::HeaderMap| async move {
                headers
                    .get(header::COOKIE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string()
            }),
        );
    let base = serve(router).await;
    let jar = Arc::new(Jar::default());
    let transport = Transport::new();

    let first = transport
        .execute(&RequestDescriptor::get(format!("{base}/auth/login")).cookie_jar(jar.clone()))
        .await
        .unwrap();
    assert_eq!(first.set_cookie_count(), 1);

    let echo = transport
        .execute(&RequestDescriptor::get(format!("{base}/echo")).cookie_jar(jar))
        .await
        .unwrap();
    assert_eq!(echo.text(), "uid=42");
}
