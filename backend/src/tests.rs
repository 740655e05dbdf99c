//! Tests for the application bootstrap, covering readiness signalling and
//! end-to-end request handling through the assembled app.

use super::create_server;
use crate::server::{ServerConfig, build_app, build_http_state};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::net::SocketAddr;
use user_registry::domain::TRACE_ID_HEADER;
use user_registry::inbound::http::health::HealthState;

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 0))
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>, bind_address: SocketAddr) {
    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(health_state.clone(), ServerConfig::new(bind_address))
        .expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[cfg(feature = "metrics")]
#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready_with_metrics(
    health_state: web::Data<HealthState>,
    bind_address: SocketAddr,
) {
    let config = ServerConfig::new(bind_address)
        .with_metrics(crate::server::metrics::default_metrics());
    let _server = create_server(health_state.clone(), config).expect("server should build");
    assert!(health_state.is_ready());
}

#[rstest]
#[actix_web::test]
async fn assembled_app_serves_users_with_trace_header(health_state: web::Data<HealthState>) {
    health_state.mark_ready();
    let app = test::init_service(build_app(health_state, build_http_state())).await;

    let request = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({
            "firstName": "John",
            "lastName": "Doe",
            "email": "john@x.com",
            "age": 30
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));

    let request = test::TestRequest::get().uri("/api/users/2").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace header on error");
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(header.as_str()));

    let request = test::TestRequest::get().uri("/health/ready").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
}
