use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use pipeline_backend::middleware::rate_limit::{new_rps_state, rps_middleware};
use pipeline_backend::routes::health::health;
use tower::ServiceExt;

fn limited_app(rps: u32) -> Router {
    Router::new()
        .route("/health", get(health))
        .layer(axum::middleware::from_fn_with_state(
            new_rps_state(rps),
            rps_middleware,
        ))
}

#[tokio::test]
async fn requests_within_limit_pass() {
    let app = limited_app(2);

    for _ in 0..2 {
        let res = app
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn requests_past_limit_are_throttled() {
    let app = limited_app(1);

    let first = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
}
