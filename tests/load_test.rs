//! Load testing for the gateway.

use std::time::{Duration, Instant};

use reqwest::StatusCode;

mod common;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_balance_telemetry() {
    let gw = common::spawn_gateway().await;
    let client = common::client();

    let total_requests = 100;
    let start = Instant::now();

    let mut tasks = Vec::new();
    for i in 0..total_requests {
        let client = client.clone();
        let (path, expected) = if i % 2 == 0 {
            ("/users/123", StatusCode::OK)
        } else {
            ("/unknown/path", StatusCode::NOT_FOUND)
        };
        let url = gw.url(path);
        tasks.push(tokio::spawn(async move {
            let req_start = Instant::now();
            let res = client.get(&url).send().await.unwrap();
            assert_eq!(res.status(), expected);
            req_start.elapsed()
        }));
    }

    let mut latencies: Vec<Duration> = Vec::new();
    for task in tasks {
        latencies.push(task.await.unwrap());
    }
    let duration = start.elapsed();

    let rendered = gw.telemetry.render();
    assert_eq!(common::active_requests(&rendered), Some(0.0));
    assert_eq!(
        common::requests_total(&rendered, "GET", "/users/123", "200", "users"),
        Some(50.0)
    );
    assert_eq!(
        common::requests_total(&rendered, "GET", "/unknown/path", "404", "none"),
        Some(50.0)
    );

    latencies.sort();
    let p50 = latencies[latencies.len() / 2];
    let p99 = latencies[(latencies.len() as f64 * 0.99) as usize];

    println!("\n--- Load Test Results ---");
    println!("Total Requests: {}", total_requests);
    println!("Total Duration: {:?}", duration);
    println!("Requests/sec:   {:.2}", total_requests as f64 / duration.as_secs_f64());
    println!("P50 Latency:    {:?}", p50);
    println!("P99 Latency:    {:?}", p99);
    println!("-------------------------\n");
}
