//! # HTTP Flows
//!
//! The lifecycle scenario through the router the runtime serves, with access
//! control and the administrative reset switched on.

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use futures::StreamExt;
    use rf_04_api_gateway::{Credential, ADMIN_ROLE, LAUNCH_ROLE};
    use serde_json::{json, Value};
    use service_runtime::{ServiceConfig, ServiceRuntime};
    use std::time::Duration;
    use tokio::time::timeout;
    use tower::ServiceExt;

    const READER: &str = "reader-key";
    const LAUNCHER: &str = "launcher-key";
    const ADMIN: &str = "admin-key";

    fn runtime() -> ServiceRuntime {
        let mut config = ServiceConfig::default();
        config.gateway.admin.enable_state_reset = true;
        config.gateway.auth.credentials = vec![
            Credential::new(READER, &[]),
            Credential::new(LAUNCHER, &[LAUNCH_ROLE]),
            Credential::new(ADMIN, &[ADMIN_ROLE]),
        ];
        ServiceRuntime::new(config).unwrap()
    }

    fn request(method: &str, uri: &str, key: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {key}"));
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap()
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_lifecycle_over_http() {
        let runtime = runtime();
        let router = runtime.gateway().router();

        let (status, created) = send(
            &router,
            request(
                "POST",
                "/api/rockets",
                READER,
                Some(json!({
                    "warhead": "CONVENTIONAL",
                    "target": { "latitude": 0.1, "longitude": 0.1 }
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "NOT_READY");
        let id = created["id"].as_str().unwrap().to_string();

        let (status, ready) = send(
            &router,
            request(
                "PATCH",
                &format!("/api/rockets/{id}/status"),
                READER,
                Some(json!({ "status": "READY" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ready["status"], "READY");
        assert_eq!(ready["target"], created["target"]);

        // Launching needs the launch role.
        let launch_body = Some(json!({ "rocket": id }));
        let (status, _) = send(
            &router,
            request("POST", "/api/launch", READER, launch_body.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, launch) = send(
            &router,
            request("POST", "/api/launch", LAUNCHER, launch_body.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(launch["rocket"]["status"], "LAUNCHED");
        assert_eq!(launch["rocket"]["warhead"], "CONVENTIONAL");

        let (status, body) =
            send(&router, request("POST", "/api/launch", LAUNCHER, launch_body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Launch failed: already launched"));

        let (status, removed) = send(
            &router,
            request("DELETE", &format!("/api/rockets/{id}"), READER, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(removed["status"], "LAUNCHED");

        let (_, launches) = send(&router, request("GET", "/api/launch", READER, None)).await;
        assert_eq!(launches, json!([launch]));
    }

    #[tokio::test]
    async fn test_access_control() {
        let runtime = runtime();
        let router = runtime.gateway().router();

        let unauthenticated = Request::builder()
            .uri("/api/rockets")
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(unauthenticated).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );

        let health = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(&router, health).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "UP" }));

        let (status, _) = send(&router, request("DELETE", "/admin/state", LAUNCHER, None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_reset() {
        let runtime = runtime();
        let router = runtime.gateway().router();

        send(
            &router,
            request(
                "POST",
                "/api/rockets",
                READER,
                Some(json!({
                    "warhead": "NUCLEAR",
                    "target": { "latitude": -45.0, "longitude": 170.0 }
                })),
            ),
        )
        .await;
        assert_eq!(runtime.container().rocket_store.len(), 1);

        let (status, _) = send(&router, request("DELETE", "/admin/state", ADMIN, None)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(runtime.container().rocket_store.is_empty());

        let (_, rockets) = send(&router, request("GET", "/api/rockets", READER, None)).await;
        assert_eq!(rockets, json!([]));
    }

    #[tokio::test]
    async fn test_launch_feed_over_sse() {
        let runtime = runtime();
        let router = runtime.gateway().router();

        let mut subscribe = request("GET", "/api/launch", READER, None);
        subscribe.headers_mut().insert(
            header::ACCEPT,
            header::HeaderValue::from_static("text/event-stream"),
        );
        let response = router.clone().oneshot(subscribe).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let mut frames = response.into_body().into_data_stream();

        let (_, created) = send(
            &router,
            request(
                "POST",
                "/api/rockets",
                READER,
                Some(json!({
                    "warhead": "CONVENTIONAL",
                    "target": { "latitude": 1.0, "longitude": 1.0 }
                })),
            ),
        )
        .await;
        let id = created["id"].as_str().unwrap();
        send(
            &router,
            request(
                "PATCH",
                &format!("/api/rockets/{id}"),
                READER,
                Some(json!({ "status": "READY" })),
            ),
        )
        .await;
        let (status, launch) = send(
            &router,
            request("POST", "/api/launch", LAUNCHER, Some(json!({ "rocket": id }))),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let frame = timeout(Duration::from_millis(500), frames.next())
            .await
            .expect("timeout")
            .unwrap()
            .unwrap();
        let text = String::from_utf8(frame.to_vec()).unwrap();
        let data = text
            .lines()
            .find_map(|line| line.strip_prefix("data: "))
            .unwrap();

        assert!(text.starts_with("event: added\n"));
        assert_eq!(
            serde_json::from_str::<Value>(data).unwrap(),
            json!({ "kind": "added", "value": launch })
        );
    }
}
