//! Load testing: many concurrent clients, no cross-request interference.

use std::time::Instant;

use http_inspector::config::ServiceConfig;
use reqwest::StatusCode;
use serde_json::Value;

mod common;

#[tokio::test]
async fn test_concurrent_requests_are_isolated() {
    let server = common::start_inspector(ServiceConfig::default()).await;

    let concurrency = 20;
    let requests_per_task = 25;
    let total_requests = concurrency * requests_per_task;

    let client = common::client();
    let start = Instant::now();

    let mut tasks = Vec::new();
    for task_id in 0..concurrency {
        let client = client.clone();
        let headers_url = server.url("/headers");
        let cookie_url = server.url("/cookies/owner");
        tasks.push(tokio::spawn(async move {
            let mut latencies = Vec::new();
            for i in 0..requests_per_task {
                let req_start = Instant::now();
                let marker = format!("{task_id}-{i}");

                let headers: Value = client
                    .get(&headers_url)
                    .header("X-Marker", &marker)
                    .send()
                    .await
                    .unwrap()
                    .json()
                    .await
                    .unwrap();
                assert_eq!(headers["X-Marker"], marker.as_str());

                let res = client
                    .get(&cookie_url)
                    .header("Cookie", format!("owner={marker}"))
                    .send()
                    .await
                    .unwrap();
                assert_eq!(res.status(), StatusCode::OK);
                let cookie: Value = res.json().await.unwrap();
                assert_eq!(cookie["owner"], marker.as_str());

                latencies.push(req_start.elapsed());
            }
            latencies
        }));
    }

    let mut all_latencies = Vec::new();
    for task in tasks {
        all_latencies.extend(task.await.unwrap());
    }
    assert_eq!(all_latencies.len(), total_requests);

    let duration = start.elapsed();
    all_latencies.sort();
    let p50 = all_latencies[all_latencies.len() / 2];
    let p99 = all_latencies[(all_latencies.len() as f64 * 0.99) as usize];

    println!("\n--- Load Test Results ---");
    println!("Iterations:     {}", total_requests);
    println!("Concurrency:    {}", concurrency);
    println!("Total Duration: {:?}", duration);
    println!("P50 Latency:    {:?}", p50);
    println!("P99 Latency:    {:?}", p99);
    println!("-------------------------\n");
}
