//! HTTP import endpoint tests
//!
//! Drive `POST /api/import/{entity}` through the full actix application.

#[cfg(test)]
mod tests {
    use crate::common::{CsvBuilder, MultipartBody, TestApp, TestDatabase};
    use actix_web::http::StatusCode;
    use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
    use actix_web::test;
    use supplies_rs::auth::Role;
    use supplies_rs::config::Config;
    use supplies_rs::core::models::EntityKind;
    use supplies_rs::server::HttpServer;

    fn upload(csv: &[u8]) -> (String, Vec<u8>) {
        MultipartBody::new().file("file", "records.csv", csv).finish()
    }

    fn import_request(uri: &str, auth: Option<String>, body: (String, Vec<u8>)) -> test::TestRequest {
        let (content_type, payload) = body;
        let mut req = test::TestRequest::post()
            .uri(uri)
            .insert_header((CONTENT_TYPE, content_type))
            .set_payload(payload);
        if let Some(auth) = auth {
            req = req.insert_header((AUTHORIZATION, auth));
        }
        req
    }

    #[actix_web::test]
    async fn test_admin_imports_schools() {
        let app = TestApp::new().await;
        let service = test::init_service(HttpServer::create_app(app.data())).await;

        let csv = CsvBuilder::schools()
            .row(&["GLPS Kalady", "Kerala", "Ernakulam"])
            .row(&["GUPS Angamaly", "Kerala", "Ernakulam"])
            .build();
        let req = import_request(
            "/api/import/schools",
            Some(app.bearer(Role::Admin)),
            upload(&csv),
        )
        .to_request();

        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "2 schools imported successfully.");
        assert_eq!(body["entity"], "school");
        assert_eq!(body["attemptedCount"], 2);
        assert_eq!(body["insertedCount"], 2);
        assert_eq!(body["failedCount"], 0);
        assert_eq!(body["failures"], serde_json::json!([]));
        assert_eq!(app.leftover_uploads(), 0);
    }

    #[actix_web::test]
    async fn test_partial_import_against_database() {
        let db = TestDatabase::new().await;
        db.seed(
            EntityKind::School,
            vec![crate::common::fixtures::school("GHSS Aluva")],
        )
        .await;
        let app = TestApp::with_store(db.store(), Config::default()).await;
        let service = test::init_service(HttpServer::create_app(app.data())).await;

        let csv = CsvBuilder::schools()
            .row(&["GLPS Kalady", "Kerala", "Ernakulam"])
            .row(&["GHSS Aluva", "Kerala", "Ernakulam"])
            .row(&["GUPS Angamaly", "Kerala", "Ernakulam"])
            .build();
        let req = import_request(
            "/api/import/schools",
            Some(app.bearer(Role::Admin)),
            upload(&csv),
        )
        .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&service, req).await;
        assert_eq!(body["message"], "2 of 3 schools imported; 1 failed.");
        assert_eq!(body["failures"][0]["row"], 2);
        assert_eq!(body["failures"][0]["stage"], "write");
        assert_eq!(body["failures"][0]["kind"], "duplicate_key");
        assert_eq!(db.count(EntityKind::School).await, 3);
        assert_eq!(app.leftover_uploads(), 0);
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let app = TestApp::new().await;
        let service = test::init_service(HttpServer::create_app(app.data())).await;

        let req = import_request("/api/import/schools", None, upload(b"Name\nA\n")).to_request();
        let resp = test::call_service(&service, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["message"], "Not authorized, token missing or invalid");
        assert_eq!(app.leftover_uploads(), 0);
    }

    #[actix_web::test]
    async fn test_team_member_is_forbidden() {
        let app = TestApp::new().await;
        let service = test::init_service(HttpServer::create_app(app.data())).await;

        let req = import_request(
            "/api/import/contacts",
            Some(app.bearer(Role::TeamMember)),
            upload(b"Name,Email,Phone\nA,a@b.co,1\n"),
        )
        .to_request();
        let resp = test::call_service(&service, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "AUTHORIZATION_ERROR");
    }

    #[actix_web::test]
    async fn test_configured_roles_admit_team_members() {
        let mut config = Config::default();
        config.auth.import_roles = vec!["admin".to_string(), "team_member".to_string()];
        let app = TestApp::with_store(
            std::sync::Arc::new(supplies_rs::storage::memory::MemoryDocumentStore::new()),
            config,
        )
        .await;
        let service = test::init_service(HttpServer::create_app(app.data())).await;

        let req = import_request(
            "/api/import/contacts",
            Some(app.bearer(Role::TeamMember)),
            upload(b"Name,Email,Phone\nAsha,asha@example.com,9847000001\n"),
        )
        .to_request();
        let resp = test::call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_no_file_is_bad_request() {
        let app = TestApp::new().await;
        let service = test::init_service(HttpServer::create_app(app.data())).await;

        let body = MultipartBody::new().text("note", "forgot the file").finish();
        let req = import_request("/api/import/vendors", Some(app.bearer(Role::Admin)), body)
            .to_request();
        let resp = test::call_service(&service, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "NO_FILE_PROVIDED");
        assert_eq!(body["error"]["message"], "No file uploaded");
    }

    async fn assert_no_file_provided(body: (String, Vec<u8>)) {
        let app = TestApp::new().await;
        let service = test::init_service(HttpServer::create_app(app.data())).await;

        let req = import_request("/api/import/schools", Some(app.bearer(Role::Admin)), body)
            .to_request();
        let resp = test::call_service(&service, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "NO_FILE_PROVIDED");
        assert_eq!(body["error"]["message"], "No file uploaded");
        assert_eq!(app.leftover_uploads(), 0);
    }

    #[actix_web::test]
    async fn test_empty_file_input_is_no_file() {
        assert_no_file_provided(MultipartBody::new().file("file", "", b"").finish()).await;
    }

    #[actix_web::test]
    async fn test_text_field_named_file_is_no_file() {
        assert_no_file_provided(
            MultipartBody::new()
                .text("file", "Name,State,District\nA,B,C")
                .finish(),
        )
        .await;
    }

    #[actix_web::test]
    async fn test_file_part_after_blank_file_input_is_used() {
        let app = TestApp::new().await;
        let service = test::init_service(HttpServer::create_app(app.data())).await;

        let body = MultipartBody::new()
            .file("file", "", b"")
            .file("file", "schools.csv", b"Name,State,District\nA,Kerala,Kochi\n")
            .finish();
        let req = import_request("/api/import/schools", Some(app.bearer(Role::Admin)), body)
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&service, req).await;

        assert_eq!(body["insertedCount"], 1);
    }

    #[actix_web::test]
    async fn test_file_under_other_field_name_is_ignored() {
        let app = TestApp::new().await;
        let service = test::init_service(HttpServer::create_app(app.data())).await;

        let body = MultipartBody::new()
            .file("attachment", "schools.csv", b"Name,State,District\nA,B,C\n")
            .finish();
        let req = import_request("/api/import/schools", Some(app.bearer(Role::Admin)), body)
            .to_request();
        let resp = test::call_service(&service, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unknown_entity_is_not_found() {
        let app = TestApp::new().await;
        let service = test::init_service(HttpServer::create_app(app.data())).await;

        let req = import_request(
            "/api/import/invoices",
            Some(app.bearer(Role::Admin)),
            upload(b"Name\nA\n"),
        )
        .to_request();
        let resp = test::call_service(&service, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_oversized_upload_is_rejected() {
        let mut config = Config::default();
        config.uploads.max_upload_bytes = 64;
        let app = TestApp::with_store(
            std::sync::Arc::new(supplies_rs::storage::memory::MemoryDocumentStore::new()),
            config,
        )
        .await;
        let service = test::init_service(HttpServer::create_app(app.data())).await;

        let mut csv = CsvBuilder::schools();
        for i in 0..10 {
            csv = csv.row(&[&format!("School {}", i), "Kerala", "Ernakulam"]);
        }
        let req = import_request(
            "/api/import/schools",
            Some(app.bearer(Role::Admin)),
            upload(&csv.build()),
        )
        .to_request();
        let resp = test::call_service(&service, req).await;

        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(app.leftover_uploads(), 0);
    }

    #[actix_web::test]
    async fn test_unparseable_file_is_bad_request_and_removed() {
        let app = TestApp::new().await;
        let service = test::init_service(HttpServer::create_app(app.data())).await;

        let req = import_request(
            "/api/import/schools",
            Some(app.bearer(Role::Admin)),
            upload(b"Na\xffme,State,District\nA,B,C\n"),
        )
        .to_request();
        let resp = test::call_service(&service, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "PARSE_ERROR");

        let message = body["error"]["message"].as_str().unwrap_or_default();
        let upload_dir = app.upload_dir.path().to_string_lossy().into_owned();
        assert!(message.contains("records.csv"), "message: {}", message);
        assert!(!message.contains(&upload_dir), "message: {}", message);
        assert_eq!(app.leftover_uploads(), 0);
    }

    #[actix_web::test]
    async fn test_non_multipart_body_is_bad_request() {
        let app = TestApp::new().await;
        let service = test::init_service(HttpServer::create_app(app.data())).await;

        let req = test::TestRequest::post()
            .uri("/api/import/schools")
            .insert_header((AUTHORIZATION, app.bearer(Role::Admin)))
            .insert_header((CONTENT_TYPE, "text/csv"))
            .set_payload("Name,State,District\n")
            .to_request();
        let resp = test::call_service(&service, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
