use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Local;
use eye_timer::{
    api::create_router,
    app::{AppConfig, WakeupPayload},
    services::{ClockStyle, ManualClock},
    state::Device,
};
use serde_json::Value;
use tower::ServiceExt;

fn device() -> Arc<Device> {
    let clock = Arc::new(ManualClock::new(Local::now(), ClockStyle::TwelveHour));
    let config = AppConfig {
        display_duration: Duration::ZERO,
        payload: WakeupPayload::Cookie,
        action_bar: true,
    };
    Arc::new(Device::in_memory(clock, 8, config))
}

async fn call(router: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn wait_for_exit(device: &Device) {
    for _ in 0..100 {
        if device.foreground.lock().await.is_none() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("app never left the foreground");
}

#[tokio::test]
async fn launch_publishes_a_glance() {
    let device = device();
    let router = create_router(Arc::clone(&device));

    let (status, body) = call(&router, "POST", "/launch").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "started");
    assert_eq!(body["phase"], "screen");
    let text = body["status"].as_str().unwrap().to_string();
    assert!(text.starts_with("SCREEN "));
    assert!(text.ends_with("AM") || text.ends_with("PM"));

    wait_for_exit(&device).await;

    let (status, body) = call(&router, "GET", "/glance").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slices"].as_array().unwrap().len(), 1);
    assert_eq!(body["slices"][0]["subtitle"], text.as_str());
    assert_eq!(body["slices"][0]["expires_at"], Value::Null);

    let (_, body) = call(&router, "GET", "/status").await;
    assert_eq!(body["phase"], "screen");
    assert_eq!(body["foreground"], false);
    assert_eq!(body["screen_text"], text.as_str());
    assert_eq!(body["pending_wakeups"].as_array().unwrap().len(), 1);
    assert_eq!(body["pending_wakeups"][0]["cookie"], 1);
    assert_eq!(body["last_exit_reason"], "action_performed_successfully");
    assert_eq!(body["last_launch"]["kind"], "user");
}

#[tokio::test]
async fn second_launch_toggles_off() {
    let device = device();
    let router = create_router(Arc::clone(&device));

    call(&router, "POST", "/launch").await;
    wait_for_exit(&device).await;

    let (_, body) = call(&router, "POST", "/launch").await;
    assert_eq!(body["phase"], "off");
    assert_eq!(body["status"], "OFF");
    wait_for_exit(&device).await;

    let (_, body) = call(&router, "GET", "/glance").await;
    assert_eq!(body["slices"][0]["subtitle"], "OFF");

    let (_, body) = call(&router, "GET", "/status").await;
    assert_eq!(body["phase"], "off");
    assert!(body["pending_wakeups"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn health_reports_ok() {
    let router = create_router(device());
    let (status, body) = call(&router, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
