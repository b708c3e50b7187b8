//! Tests for the Bare Acts server API
//!
//! Test categories:
//! - Document name validation (property-based)
//! - Error mapping to status codes
//! - Rate limiter settings
//! - HTTP endpoints through the full router

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use crate::api::validate_document_name;

    proptest! {
        /// Property: plain file names are accepted
        #[test]
        fn plain_names_are_valid(name in "[A-Za-z0-9 _,()-]{1,60}\\.pdf") {
            prop_assert!(validate_document_name(&name).is_ok());
        }

        /// Property: any name with a path separator is rejected
        #[test]
        fn names_with_separators_are_rejected(
            prefix in "[A-Za-z0-9]{0,10}",
            separator in prop_oneof![Just("/"), Just("\\"), Just("..")],
            suffix in "[A-Za-z0-9]{0,10}",
        ) {
            let name = format!("{}{}{}", prefix, separator, suffix);
            prop_assert!(validate_document_name(&name).is_err());
        }
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use pretty_assertions::assert_eq;
    use remote_sources::LookupError;
    use section_engine::SectionError;

    use crate::error::ServerError;

    fn status_of(err: ServerError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_section_errors_map_to_statuses() {
        let not_found = ServerError::from(SectionError::NotFound {
            heading: "9. Repeal.".to_string(),
        });
        assert_eq!(
            not_found.to_string(),
            "Content for section '9. Repeal.' not found."
        );
        assert_eq!(status_of(not_found), StatusCode::NOT_FOUND);

        let unavailable = ServerError::from(SectionError::ResourceUnavailable("gone".into()));
        assert_eq!(status_of(unavailable), StatusCode::SERVICE_UNAVAILABLE);

        let malformed = ServerError::from(SectionError::MalformedInput("blank".into()));
        assert_eq!(status_of(malformed), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_lookup_errors_map_to_statuses() {
        let missing = ServerError::from(LookupError::NotFound {
            word: "zzz".to_string(),
        });
        assert_eq!(status_of(missing), StatusCode::NOT_FOUND);

        let transient = ServerError::from(LookupError::Transient("HTTP 503".into()));
        assert_eq!(status_of(transient), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_timeout_is_request_timeout() {
        assert_eq!(status_of(ServerError::Timeout(10)), StatusCode::REQUEST_TIMEOUT);
    }
}

#[cfg(test)]
mod rate_limit_tests {
    use pretty_assertions::assert_eq;
    use tower_governor::governor::GovernorConfigBuilder;

    use crate::replenish_interval_ms;

    #[test]
    fn test_rate_is_requests_per_second() {
        assert_eq!(replenish_interval_ms(10), Some(100));
        assert_eq!(replenish_interval_ms(1), Some(1000));
        assert_eq!(replenish_interval_ms(3), Some(333));
    }

    #[test]
    fn test_very_high_rate_is_capped_at_one_per_millisecond() {
        assert_eq!(replenish_interval_ms(5000), Some(1));
    }

    #[test]
    fn test_zero_rate_is_rejected() {
        assert_eq!(replenish_interval_ms(0), None);
    }

    #[test]
    fn test_default_rate_builds_governor_config() {
        let config = GovernorConfigBuilder::default()
            .per_millisecond(replenish_interval_ms(10).unwrap())
            .burst_size(20)
            .finish();
        assert!(config.is_some());
    }
}

#[cfg(test)]
mod http_tests {
    //! HTTP endpoint integration tests using axum-test

    use std::fs;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{body::Bytes, http::StatusCode};
    use axum_test::TestServer;
    use pretty_assertions::assert_eq;
    use remote_sources::{CircularScraper, DictionaryClient, ScraperConfig};
    use section_engine::{HeadingScope, ReferenceCorpus, SectionEngine, SectionError, TextCorpus};
    use serde_json::json;
    use shared_pdf::fixtures::create_test_pdf;
    use tempfile::TempDir;

    use crate::build_router;
    use crate::state::{AppState, ServerConfig};

    // Nothing listens here, so outbound calls fail fast
    const CLOSED_PORT_URL: &str = "http://127.0.0.1:9";

    const ACT_TEXT: &str = "1. Short title and commencement.\n\
        2. Definitions.\n\
        3. Penalty.\n\n\
        1. Short title and commencement.—(1) This Act may be called the Example Act.\n\
        2. Definitions.—In this Act, the Tribunal means the appellate body.\n\
        3. Penalty.—Whoever contravenes any provision shall be punished.\n\n";

    struct MissingCorpus;

    impl ReferenceCorpus for MissingCorpus {
        fn load(&self) -> Result<String, SectionError> {
            Err(SectionError::ResourceUnavailable(
                "Bare Acts PDF not found".to_string(),
            ))
        }
    }

    /// Unavailable on the first load, available afterwards
    #[derive(Default)]
    struct FlakyCorpus {
        loads: AtomicUsize,
    }

    impl ReferenceCorpus for FlakyCorpus {
        fn load(&self) -> Result<String, SectionError> {
            match self.loads.fetch_add(1, Ordering::SeqCst) {
                0 => Err(SectionError::ResourceUnavailable(
                    "Bare Acts PDF is being replaced".to_string(),
                )),
                _ => Ok("An appeal lies to the Tribunal.".to_string()),
            }
        }
    }

    fn write_fixtures(root: &Path) -> ServerConfig {
        let documents_dir = root.join("All_Documents");
        let metadata_dir = root.join("Cleaned_Metadata");
        let circulars_dir = root.join("Circulars");
        for dir in [&documents_dir, &metadata_dir, &circulars_dir] {
            fs::create_dir_all(dir).unwrap();
        }

        fs::write(
            documents_dir.join("army.pdf"),
            create_test_pdf(&["1. Short title.", "2. Definitions."]),
        )
        .unwrap();
        fs::write(documents_dir.join("railways.pdf"), create_test_pdf(&["Railways"])).unwrap();
        fs::write(
            metadata_dir.join("army.txt"),
            "Title: The Army Act, 1950\nAct: 46\nYear: 1950\nDate: [20th May, 1950]\n",
        )
        .unwrap();
        fs::write(
            metadata_dir.join("railways.txt"),
            "Title: The Railways Act, 1989\nAct: 24\nYear: 1989\nDate: [3rd June, 1989]\n",
        )
        .unwrap();

        fs::write(
            circulars_dir.join("leave.txt"),
            "Issuer: Ministry of Home Affairs\nDate: 2021-05-01\nSignatory: Under Secretary\n",
        )
        .unwrap();
        fs::write(
            circulars_dir.join("border.txt"),
            "Issuer: Border Management\nDate: 2023-01-15\n",
        )
        .unwrap();

        ServerConfig {
            documents_dir,
            metadata_dir,
            circulars_dir,
            extract_timeout_ms: 10_000,
            max_upload_bytes: 1024 * 1024,
        }
    }

    fn create_test_server_with(
        corpus: Arc<dyn ReferenceCorpus + Send + Sync>,
    ) -> (TestServer, TempDir) {
        create_test_server_with_timeout(corpus, 10_000)
    }

    fn create_test_server_with_timeout(
        corpus: Arc<dyn ReferenceCorpus + Send + Sync>,
        extract_timeout_ms: u64,
    ) -> (TestServer, TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            extract_timeout_ms,
            ..write_fixtures(tmp.path())
        };

        let http = remote_sources::http_client(Duration::from_secs(1)).unwrap();
        let dictionary = DictionaryClient::new(http.clone(), CLOSED_PORT_URL);
        let scraper = CircularScraper::new(
            http,
            ScraperConfig {
                base_url: format!("{}/circulars", CLOSED_PORT_URL),
                page_count: 1,
                output_dir: tmp.path().join("Circulars_37"),
            },
        );

        let engine = SectionEngine::new().with_scope(HeadingScope::LeadingPages(2));
        let state = AppState::new(config, engine, corpus, dictionary, scraper);

        (TestServer::new(build_router(state)).unwrap(), tmp)
    }

    /// Create a test server with the full router
    fn create_test_server() -> (TestServer, TempDir) {
        create_test_server_with(Arc::new(TextCorpus(
            "The Tribunal may hear an appeal. The Registrar shall record it.".to_string(),
        )))
    }

    #[tokio::test]
    async fn test_health_returns_200() {
        let (server, _tmp) = create_test_server();
        let response = server.get("/health").await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "bareacts-server");
    }

    #[tokio::test]
    async fn test_acts_default_to_alphabetical() {
        let (server, _tmp) = create_test_server();
        let response = server.get("/api/acts").await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["count"], 2);
        assert_eq!(json["acts"][0]["title"], "The Army Act, 1950");
        assert_eq!(json["acts"][0]["pdf"], "army.pdf");
    }

    #[tokio::test]
    async fn test_acts_sorted_by_number() {
        let (server, _tmp) = create_test_server();
        let response = server.get("/api/acts").add_query_param("sort", "act_number").await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["acts"][0]["act_number"], 24);
        assert_eq!(json["acts"][1]["act_number"], 46);
    }

    #[tokio::test]
    async fn test_acts_rejects_unknown_sort() {
        let (server, _tmp) = create_test_server();
        let response = server.get("/api/acts").add_query_param("sort", "random").await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_circulars_sorted_by_date() {
        let (server, _tmp) = create_test_server();
        let response = server.get("/api/circulars").add_query_param("sort", "date").await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["count"], 2);
        assert_eq!(json["circulars"][0]["issuer"], "Border Management");
        assert_eq!(json["circulars"][1]["pdf"], "leave.pdf");
    }

    #[tokio::test]
    async fn test_get_document_returns_pdf() {
        let (server, _tmp) = create_test_server();
        let response = server.get("/api/documents/army.pdf").await;
        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "application/pdf");
        assert!(response.as_bytes().starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_get_document_missing() {
        let (server, _tmp) = create_test_server();
        let response = server.get("/api/documents/unknown.pdf").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "DOCUMENT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_get_document_rejects_traversal() {
        let (server, _tmp) = create_test_server();
        let response = server.get("/api/documents/..%2FCleaned_Metadata%2Farmy.txt").await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_document_analysis_lists_headings() {
        let (server, _tmp) = create_test_server();
        let response = server.get("/api/documents/army.pdf/analysis").await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["page_count"], 2);
        assert_eq!(json["document_id"].as_str().unwrap().len(), 64);
        let headings = json["headings"].as_array().unwrap();
        assert_eq!(headings.len(), 2);
        assert!(headings[0]["raw_match"]
            .as_str()
            .unwrap()
            .starts_with("1. Short title."));
        assert_eq!(headings[1]["page"], 1);
    }

    #[tokio::test]
    async fn test_analyze_upload() {
        let (server, _tmp) = create_test_server();
        let pdf = create_test_pdf(&["A circular regarding leave rules"]);
        let response = server.post("/api/analyze").bytes(Bytes::from(pdf)).await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["page_count"], 1);
        assert!(json["headings"].as_array().unwrap().is_empty());
        assert_eq!(json["warnings"][0], "no sections found");
    }

    #[tokio::test]
    async fn test_analyze_rejects_garbage() {
        let (server, _tmp) = create_test_server();
        let response = server
            .post("/api/analyze")
            .bytes(Bytes::from_static(b"definitely not a pdf"))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["code"], "INVALID_PDF");
    }

    #[tokio::test]
    async fn test_analyze_times_out() {
        let (server, _tmp) = create_test_server_with_timeout(
            Arc::new(TextCorpus(String::new())),
            0,
        );
        let pages: Vec<String> = (1..=1500)
            .map(|n| format!("{}. Section heading number {}.", n, n))
            .collect();
        let page_refs: Vec<&str> = pages.iter().map(String::as_str).collect();
        let pdf = create_test_pdf(&page_refs);

        let response = server.post("/api/analyze").bytes(Bytes::from(pdf)).await;
        response.assert_status(StatusCode::REQUEST_TIMEOUT);

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "TIMEOUT");
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_body() {
        let (server, _tmp) = create_test_server();
        let response = server.post("/api/analyze").bytes(Bytes::new()).await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_section_resolves_body() {
        let (server, _tmp) = create_test_server();
        let response = server
            .post("/api/sections")
            .json(&json!({
                "full_text": ACT_TEXT,
                "heading": "3. Penalty."
            }))
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["heading"], "3. Penalty.");
        assert_eq!(
            json["body"],
            "Whoever contravenes any provision shall be punished."
        );
        assert!(json["end_offset"].as_u64().unwrap() > json["start_offset"].as_u64().unwrap());
    }

    #[tokio::test]
    async fn test_section_highlights_keyword() {
        let (server, _tmp) = create_test_server();
        let response = server
            .post("/api/sections")
            .json(&json!({
                "full_text": ACT_TEXT,
                "heading": "2. Definitions.",
                "highlight": "tribunal"
            }))
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert!(json["body"]
            .as_str()
            .unwrap()
            .contains("<mark style=\"background-color: orange\">Tribunal</mark>"));
    }

    #[tokio::test]
    async fn test_section_with_strict_boundary() {
        let (server, _tmp) = create_test_server();
        let response = server
            .post("/api/sections")
            .json(&json!({
                "full_text": "1. Scope.—Applies to sub-rule 2. of rule 4 only. 2. Extent.—All of India.",
                "heading": "1. Scope.",
                "boundary": "strict_heading"
            }))
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["body"], "Applies to sub-rule 2. of rule 4 only.");
    }

    #[tokio::test]
    async fn test_section_not_found() {
        let (server, _tmp) = create_test_server();
        let response = server
            .post("/api/sections")
            .json(&json!({
                "full_text": ACT_TEXT,
                "heading": "9. Repeal."
            }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"], "Content for section '9. Repeal.' not found.");
        assert_eq!(json["code"], "SECTION_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_section_rejects_empty_heading() {
        let (server, _tmp) = create_test_server();
        let response = server
            .post("/api/sections")
            .json(&json!({ "full_text": ACT_TEXT, "heading": "  " }))
            .await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_common_keywords() {
        let (server, _tmp) = create_test_server();
        let response = server
            .post("/api/keywords/common")
            .json(&json!({ "text": "An appeal lies to the Tribunal within 30 days." }))
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["keywords"], json!(["appeal", "tribunal"]));
        assert_eq!(json["count"], 2);
    }

    #[tokio::test]
    async fn test_common_keywords_without_corpus() {
        let (server, _tmp) = create_test_server_with(Arc::new(MissingCorpus));
        let response = server
            .post("/api/keywords/common")
            .json(&json!({ "text": "An appeal" }))
            .await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["code"], "RESOURCE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_common_keywords_retries_failed_corpus_load() {
        let corpus = Arc::new(FlakyCorpus::default());
        let (server, _tmp) = create_test_server_with(corpus.clone());
        let request = json!({ "text": "The Tribunal may hear an appeal." });

        let response = server.post("/api/keywords/common").json(&request).await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

        let response = server.post("/api/keywords/common").json(&request).await;
        response.assert_status_ok();
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["keywords"], json!(["appeal", "tribunal"]));

        // the successful load is cached
        server.post("/api/keywords/common").json(&request).await.assert_status_ok();
        assert_eq!(corpus.loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_dictionary_unreachable_is_bad_gateway() {
        let (server, _tmp) = create_test_server();
        let response = server.get("/api/dictionary/tort").await;
        response.assert_status(StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_circular_update_survives_unreachable_listing() {
        let (server, tmp) = create_test_server();
        let response = server.post("/api/circulars/update").await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["downloaded"], 0);
        assert_eq!(json["failed"], 0);
        assert!(tmp.path().join("Circulars_37").is_dir());
    }
}
