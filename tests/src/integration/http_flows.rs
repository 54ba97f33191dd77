//! # HTTP Flows
//!
//! The node's subsystem container (node-runtime) behind the gateway router
//! (bc-05), exercised in-process with `tower::ServiceExt::oneshot`.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use bc_01_result_store::{FileResultStore, ResultStoreConfig};
    use bc_03_ledger::MockLedger;
    use node_runtime::{NodeConfig, SubsystemContainer};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::integration::fixtures::{
        multipart_body, png_evidence, sample_form_fields, BOUNDARY,
    };

    fn config_in(dir: &tempfile::TempDir) -> NodeConfig {
        let data_dir = dir.path().display().to_string();
        NodeConfig::from_lookup(|key| (key == "BC_DATA_DIR").then(|| data_dir.clone()))
    }

    async fn node_with_ledger(dir: &tempfile::TempDir, ledger: Arc<MockLedger>) -> Router {
        let config = config_in(dir);
        let store = FileResultStore::open(&ResultStoreConfig::under_data_dir(dir.path()))
            .await
            .unwrap();
        SubsystemContainer::with_parts(config, Arc::new(store), ledger)
            .gateway()
            .router()
    }

    fn submit(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/projects")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_submission_then_queries() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Arc::new(MockLedger::new());
        let router = node_with_ledger(&dir, ledger.clone()).await;

        let evidence = png_evidence("http");
        let (status, outcome) = send(
            &router,
            submit(multipart_body(&sample_form_fields(), Some(&evidence))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(outcome["success"], true);
        assert_eq!(outcome["evidenceRef"], evidence.digest().to_string());
        // No scorer configured: mangrove fallback, 12.5 ha at 10 credits per hectare.
        assert_eq!(outcome["creditsEstimate"], 125);
        assert_eq!(outcome["degraded"]["reason"], "scorer-failed");
        assert_eq!(outcome["ledger"]["outcome"], "credits-issued");

        let result_id = outcome["analysis"]["id"].as_str().unwrap().to_string();
        assert!(dir
            .path()
            .join("analysis_results")
            .join(format!("{}.json", result_id))
            .exists());

        let (status, stored) = send(&router, get(&format!("/api/analysis/{}", result_id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stored, outcome["analysis"]);

        let project_id = outcome["projectId"].as_str().unwrap();
        let (status, project) = send(&router, get(&format!("/api/projects/{}", project_id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(project["carbonCredits"], 125);
        assert_eq!(project["imageHash"], evidence.digest().to_string());
        assert_eq!(project["analysis"]["id"], result_id.as_str());
    }

    #[tokio::test]
    async fn test_unconfigured_node_serves_degraded() {
        let dir = tempfile::tempdir().unwrap();
        let container = SubsystemContainer::new(config_in(&dir)).await.unwrap();
        let router = container.gateway().router();

        let (_, health) = send(&router, get("/health")).await;
        assert_eq!(health["ledgerEnabled"], false);
        assert_eq!(health["contract"], "Not configured");
        assert_eq!(health["features"]["scorer"], false);
        assert_eq!(health["features"]["aiAnalysis"], true);

        let (status, outcome) = send(
            &router,
            submit(multipart_body(&sample_form_fields(), Some(&png_evidence("x")))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(outcome["ledger"]["outcome"], "skipped-ledger-disabled");
        assert!(outcome["projectId"].as_str().unwrap().starts_with("local-"));

        let (status, _) = send(&router, get("/api/projects/1")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, stats) = send(&router, get("/api/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["totalProjects"], 0);
        assert!(stats["note"].is_string());
    }

    #[tokio::test]
    async fn test_rejected_input_reaches_no_collaborator() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Arc::new(MockLedger::new());
        let router = node_with_ledger(&dir, ledger.clone()).await;

        let mut text = png_evidence("x");
        text.content_type = "text/plain".to_string();
        let (status, body) = send(
            &router,
            submit(multipart_body(&sample_form_fields(), Some(&text))),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert_eq!(ledger.register_calls(), 0);
        let stored = std::fs::read_dir(dir.path().join("analysis_results"))
            .unwrap()
            .count();
        assert_eq!(stored, 0);
    }

    #[tokio::test]
    async fn test_metrics_count_submissions() {
        bc_telemetry::register_metrics().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let router = node_with_ledger(&dir, Arc::new(MockLedger::disabled())).await;

        send(
            &router,
            submit(multipart_body(&sample_form_fields(), Some(&png_evidence("m")))),
        )
        .await;

        let response = router.clone().oneshot(get("/metrics")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("bc_submissions_total"));
        assert!(text.contains("skipped-ledger-disabled"));
    }
}
