//! End-to-end tests against a live server.

use std::collections::HashSet;
use std::time::Duration;

use http_inspector::config::ServiceConfig;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

mod common;

#[tokio::test]
async fn test_status_selection_covers_every_code() {
    let server = common::start_inspector(ServiceConfig::default()).await;
    let client = common::client();

    let mut seen = HashSet::new();
    for _ in 0..200 {
        let res = client
            .get(server.url("/status/200,201,202"))
            .send()
            .await
            .unwrap();
        let status = res.status().as_u16();
        assert!([200, 201, 202].contains(&status));
        assert_eq!(res.text().await.unwrap(), "");
        seen.insert(status);
    }
    assert_eq!(seen, HashSet::from([200, 201, 202]));
}

#[tokio::test]
async fn test_status_with_unknown_code_in_list() {
    let server = common::start_inspector(ServiceConfig::default()).await;
    let client = common::client();

    let mut outcomes = HashSet::new();
    for _ in 0..200 {
        let res = client
            .delete(server.url("/status/200,404,999"))
            .send()
            .await
            .unwrap();
        let status = res.status();
        let body = res.text().await.unwrap();
        match status.as_u16() {
            200 | 404 => assert_eq!(body, ""),
            400 => assert_eq!(body, r#"{"error":"Unknown Http code: 999"}"#),
            other => panic!("unexpected status {other}"),
        }
        outcomes.insert(status.as_u16());
    }
    assert_eq!(outcomes, HashSet::from([200, 404, 400]));
}

#[tokio::test]
async fn test_status_rejects_garbage_and_empty_tokens() {
    let server = common::start_inspector(ServiceConfig::default()).await;
    let client = common::client();

    let res = client.get(server.url("/status/abc")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"error": "Unknown Http code: abc"})
    );

    let res = client.get(server.url("/status/,")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"error": "Unknown Http code: "})
    );
}

#[tokio::test]
async fn test_inspection_endpoints() {
    let server = common::start_inspector(ServiceConfig::default()).await;
    let client = common::client();

    let ip: Value = client
        .get(server.url("/ip"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(ip, json!({"ip_address": "127.0.0.1"}));

    let ua: Value = client
        .get(server.url("/user_agent"))
        .header("User-Agent", "inspector-tests/1.0")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(ua, json!({"user_agent": "inspector-tests/1.0"}));

    let headers: Value = client
        .get(server.url("/headers"))
        .header("X-Probe", "yes")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(headers["X-Probe"], "yes");
    assert_eq!(headers["Host"], server.addr.to_string());
}

#[tokio::test]
async fn test_cache_round_trip() {
    let server = common::start_inspector(ServiceConfig::default()).await;
    let client = common::client();
    let payload = r#"{"z":1,"a":{"nested":[1,2,3]}}"#;

    let res = client
        .get(server.url("/cache"))
        .header("Content-Type", "application/json")
        .body(payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), payload);

    for header in ["If-Modified-Since", "If-None-Match"] {
        let res = client
            .get(server.url("/cache"))
            .header(header, "anything at all")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_MODIFIED, "{header}");
    }
}

#[tokio::test]
async fn test_etag_properties() {
    let server = common::start_inspector(ServiceConfig::default()).await;
    let client = common::client();
    let url = server.url("/etag/abc123");

    let res = client
        .get(&url)
        .header("If-None-Match", "abc123")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_MODIFIED);

    let res = client
        .get(&url)
        .header("If-None-Match", "other")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PRECONDITION_FAILED);

    let res = client
        .get(&url)
        .header("If-None-Match", "other")
        .header("If-Match", "nope")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PRECONDITION_FAILED);

    let res = client
        .get(&url)
        .header("If-Match", "abc123")
        .header("Content-Type", "application/json")
        .body(r#"{"v":1}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), r#"{"v":1}"#);
}

#[tokio::test]
async fn test_cookie_lifecycle() {
    let server = common::start_inspector(ServiceConfig::default()).await;
    let client = common::client();

    let res = client
        .post(server.url("/cookies"))
        .header("Content-Type", "application/json")
        .body(r#"{"name":"session","value":"abc"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let set_cookie = res.headers()["set-cookie"].to_str().unwrap().to_string();
    assert_eq!(set_cookie, "session=abc");
    assert_eq!(
        res.text().await.unwrap(),
        r#"{"name":"session","value":"abc"}"#
    );

    let res = client
        .get(server.url("/cookies/session"))
        .header("Cookie", &set_cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"session": "abc"})
    );

    let res = client
        .get(server.url("/cookies"))
        .header("Cookie", "session=abc; theme=dark")
        .send()
        .await
        .unwrap();
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"session": "abc", "theme": "dark"})
    );

    let res = client
        .delete(server.url("/cookies/session"))
        .header("Cookie", &set_cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["set-cookie"], "session=; Expires=0");

    for method in [Method::GET, Method::DELETE] {
        let res = client
            .request(method.clone(), server.url("/cookies/session"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{method}");
        assert_eq!(
            res.json::<Value>().await.unwrap(),
            json!({"error": "Couldn't find cookie: session"})
        );
    }
}

#[tokio::test]
async fn test_anything_reports_request() {
    let server = common::start_inspector(ServiceConfig::default()).await;
    let client = common::client();

    let res = client
        .patch(server.url("/anything/some/thing?q=1"))
        .json(&json!({"k": "v"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["method"], "PATCH");
    assert_eq!(body["json"], json!({"k": "v"}));
    assert_eq!(body["args"], json!({"q": "1"}));
    assert_eq!(body["origin"], "127.0.0.1");
    assert_eq!(
        body["url"],
        format!("http://{}/anything/some/thing?q=1", server.addr)
    );
}

#[tokio::test]
async fn test_anything_multipart_upload() {
    let server = common::start_inspector(ServiceConfig::default()).await;
    let client = common::client();

    let form = reqwest::multipart::Form::new()
        .text("field", "value")
        .part(
            "doc",
            reqwest::multipart::Part::bytes(b"hello".to_vec())
                .file_name("hello.txt")
                .mime_str("text/plain")
                .unwrap(),
        );
    let body: Value = client
        .post(server.url("/anything"))
        .multipart(form)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["form"], json!({"field": "value"}));
    assert_eq!(body["files"]["doc"]["filename"], "hello.txt");
    assert_eq!(body["files"]["doc"]["size"], 5);
}

#[tokio::test]
async fn test_stalled_request_times_out_with_408() {
    let mut config = ServiceConfig::default();
    config.timeouts.request_secs = 1;
    let server = common::start_inspector(config).await;

    // Promise a body that never arrives.
    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    stream
        .write_all(
            b"POST /anything HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: 10\r\n\r\n",
        )
        .await
        .unwrap();

    let mut buf = vec![0u8; 1024];
    let n = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut buf))
        .await
        .expect("server did not answer a stalled request")
        .unwrap();
    let head = String::from_utf8_lossy(&buf[..n]);
    assert!(head.starts_with("HTTP/1.1 408"), "{head}");
}

#[tokio::test]
async fn test_anything_without_content_type_reports_null_json() {
    let server = common::start_inspector(ServiceConfig::default()).await;
    let client = common::client();

    let res = client
        .post(server.url("/anything"))
        .body("hello")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["json"], Value::Null);
}

#[tokio::test]
async fn test_cookie_values_cannot_carry_attributes() {
    let server = common::start_inspector(ServiceConfig::default()).await;
    let client = common::client();

    let res = client
        .post(server.url("/cookies"))
        .header("Content-Type", "application/json")
        .body(r#"{"name":"a","value":"x; Domain=evil.example; Max-Age=99999999"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.headers().get("set-cookie").is_none());
}
