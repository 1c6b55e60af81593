// HTTP tests for the careers API.
//
// Every test builds the full route table on a temporary SQLite file (or on
// the sample dataset only) with accounts kept in a `MemoryAuthProvider`.

use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use careers_api::auth::{AuthProvider, MemoryAuthProvider};
use careers_api::handlers::PageSettings;
use careers_api::{routes, Database, Gateway};
use serde_json::{json, Value};
use tempfile::TempDir;

fn db_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("careers.sqlite3")
}

fn store() -> (TempDir, Gateway) {
    let dir = TempDir::new().unwrap();
    let db = Database::new(&db_path(&dir)).unwrap();
    (dir, Gateway::from(db))
}

fn provider() -> Arc<dyn AuthProvider> {
    Arc::new(MemoryAuthProvider::new(false))
}

macro_rules! init_app {
    ($gateway:expr, $provider:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($gateway.clone()))
                .app_data(web::Data::new($provider.clone()))
                .app_data(web::Data::new(PageSettings::default()))
                .configure(routes::configure),
        )
        .await
    };
}

/// Signs up an admin and returns their access token.
macro_rules! sign_up {
    ($app:expr, $email:expr, $company:expr) => {{
        let company: Option<(&str, &str)> = $company;
        let req = test::TestRequest::post()
            .uri("/api/auth/sign-up")
            .set_json(json!({
                "email": $email,
                "password": "secret123",
                "confirmPassword": "secret123",
                "fullName": "Test Admin",
                "companyName": company.map(|(name, _)| name),
                "companySlug": company.map(|(_, slug)| slug),
            }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        body["session"]["accessToken"].as_str().unwrap().to_string()
    }};
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

async fn body_text(resp: actix_web::dev::ServiceResponse) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}

// Public pages

#[actix_web::test]
async fn test_health_reports_fallback_mode() {
    let app = init_app!(Gateway::fallback_only(), provider());

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "fallback");
}

#[actix_web::test]
async fn test_health_reports_connected_store() {
    let (_dir, gateway) = store();
    let app = init_app!(gateway, provider());

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["database"], "connected");
}

#[actix_web::test]
async fn test_sample_careers_page_renders_without_store() {
    let app = init_app!(Gateway::fallback_only(), provider());

    let req = test::TestRequest::get().uri("/acme-corp/careers").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/html")));

    let html = body_text(resp).await;
    assert!(html.contains("Acme Corp"));
    assert!(html.contains("Join the Future"));
    assert!(html.contains("Full Stack Engineer"));
    assert!(html.contains("/acme-corp/jobs/full-stack-engineer-berlin"));
}

#[actix_web::test]
async fn test_careers_page_applies_query_filters() {
    let app = init_app!(Gateway::fallback_only(), provider());

    let req = test::TestRequest::get()
        .uri("/acme-corp/careers?q=marketing")
        .to_request();
    let html = body_text(test::call_service(&app, req).await).await;

    assert!(html.contains("Marketing Manager"));
    assert!(!html.contains("Full Stack Engineer"));
}

#[actix_web::test]
async fn test_unknown_company_page_is_not_found() {
    let app = init_app!(Gateway::fallback_only(), provider());

    let req = test::TestRequest::get().uri("/nobody/careers").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_text(resp).await.contains("Page not found"));

    let req = test::TestRequest::get().uri("/api/careers/nobody").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_job_detail_page() {
    let app = init_app!(Gateway::fallback_only(), provider());

    let req = test::TestRequest::get()
        .uri("/acme-corp/jobs/business-analyst-riyadh")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Business Analyst"));
    assert!(html.contains("Riyadh, Saudi Arabia"));

    let req = test::TestRequest::get()
        .uri("/acme-corp/jobs/does-not-exist")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_careers_jobs_api_filters_and_lists_facets() {
    let app = init_app!(Gateway::fallback_only(), provider());

    let req = test::TestRequest::get()
        .uri("/api/careers/acme-corp/jobs?location=Berlin%2C%20Germany")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["totalJobs"], 4);
    assert_eq!(body["jobs"].as_array().unwrap().len(), 2);
    assert_eq!(body["locationOptions"][0], "All");
    assert!(body["employmentTypeOptions"]
        .as_array()
        .unwrap()
        .contains(&json!("Part-time")));
}

#[actix_web::test]
async fn test_careers_directory_lists_sample_companies() {
    let app = init_app!(Gateway::fallback_only(), provider());

    let req = test::TestRequest::get().uri("/api/careers").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let slugs: Vec<&str> = body["companies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["acme-corp", "tech-nova"]);
}

#[actix_web::test]
async fn test_composed_page_json_lists_sections_in_order() {
    let app = init_app!(Gateway::fallback_only(), provider());

    let req = test::TestRequest::get().uri("/api/careers/acme-corp").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let kinds: Vec<&str> = body["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["Hero", "About", "Jobs"]);
    assert_eq!(body["header"]["companyName"], "Acme Corp");
}

// Auth

#[actix_web::test]
async fn test_sign_up_validation_errors() {
    let (_dir, gateway) = store();
    let app = init_app!(gateway, provider());

    let cases = [
        (json!({"password": "secret123", "confirmPassword": "other123"}), "Passwords do not match"),
        (json!({"password": "abc", "confirmPassword": "abc"}), "at least 6 characters"),
        (
            json!({"password": "secret123", "confirmPassword": "secret123", "fullName": " "}),
            "Full name is required",
        ),
    ];

    for (fields, message) in cases {
        let mut payload = json!({
            "email": "ada@acme.test",
            "fullName": "Ada Lovelace",
        });
        for (key, value) in fields.as_object().unwrap() {
            payload[key] = value.clone();
        }

        let req = test::TestRequest::post()
            .uri("/api/auth/sign-up")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains(message), "{}", body);
    }
}

#[actix_web::test]
async fn test_sign_up_rejects_invalid_company_slug() {
    let (_dir, gateway) = store();
    let app = init_app!(gateway, provider());

    let req = test::TestRequest::post()
        .uri("/api/auth/sign-up")
        .set_json(json!({
            "email": "ada@acme.test",
            "password": "secret123",
            "confirmPassword": "secret123",
            "fullName": "Ada Lovelace",
            "companyName": "Acme",
            "companySlug": "Not A Slug",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_sign_up_needs_a_store() {
    let app = init_app!(Gateway::fallback_only(), provider());

    let req = test::TestRequest::post()
        .uri("/api/auth/sign-up")
        .set_json(json!({
            "email": "ada@acme.test",
            "password": "secret123",
            "confirmPassword": "secret123",
            "fullName": "Ada Lovelace",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn test_sign_up_with_taken_slug_conflicts() {
    let (_dir, gateway) = store();
    let app = init_app!(gateway, provider());

    sign_up!(app, "first@globex.test", Some(("Globex", "globex")));

    let req = test::TestRequest::post()
        .uri("/api/auth/sign-up")
        .set_json(json!({
            "email": "second@globex.test",
            "password": "secret123",
            "confirmPassword": "secret123",
            "fullName": "Second Admin",
            "companyName": "Globex Two",
            "companySlug": "globex",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_unconfirmed_sign_up_has_no_session() {
    let (_dir, gateway) = store();
    let provider: Arc<dyn AuthProvider> = Arc::new(MemoryAuthProvider::new(true));
    let app = init_app!(gateway, provider);

    let req = test::TestRequest::post()
        .uri("/api/auth/sign-up")
        .set_json(json!({
            "email": "ada@acme.test",
            "password": "secret123",
            "confirmPassword": "secret123",
            "fullName": "Ada Lovelace",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["session"].is_null());
    assert!(body["message"].as_str().unwrap().contains("confirm"));

    let req = test::TestRequest::post()
        .uri("/api/auth/sign-in")
        .set_json(json!({"email": "ada@acme.test", "password": "secret123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("not confirmed"));
}

#[actix_web::test]
async fn test_sign_in_session_and_sign_out() {
    let (_dir, gateway) = store();
    let app = init_app!(gateway, provider());
    sign_up!(app, "ada@acme.test", None);

    let req = test::TestRequest::post()
        .uri("/api/auth/sign-in")
        .set_json(json!({"email": "ada@acme.test", "password": "wrong-password"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/auth/sign-in")
        .set_json(json!({"email": "ada@acme.test", "password": "secret123"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["accessToken"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/auth/session")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user"]["email"], "ada@acme.test");

    let req = test::TestRequest::post()
        .uri("/api/auth/sign-out")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/api/auth/session")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["user"].is_null());
}

#[actix_web::test]
async fn test_admin_routes_require_sign_in() {
    let (_dir, gateway) = store();
    let app = init_app!(gateway, provider());

    let req = test::TestRequest::get().uri("/api/admin/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/admin/profile")
        .insert_header(bearer("not-a-session"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// Admin

#[actix_web::test]
async fn test_editor_redirect() {
    let (_dir, gateway) = store();
    let app = init_app!(gateway, provider());

    let location = |resp: &actix_web::dev::ServiceResponse| {
        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let req = test::TestRequest::get().uri("/admin/editor").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp).as_deref(), Some("/admin/auth"));

    let without_company = sign_up!(app, "solo@acme.test", None);
    let req = test::TestRequest::get()
        .uri("/admin/editor")
        .insert_header(bearer(&without_company))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp).as_deref(), Some("/admin"));

    let with_company = sign_up!(app, "ada@globex.test", Some(("Globex", "globex")));
    let req = test::TestRequest::get()
        .uri("/admin/editor")
        .insert_header(bearer(&with_company))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp).as_deref(), Some("/admin/globex"));
}

#[actix_web::test]
async fn test_create_company_links_admin() {
    let (_dir, gateway) = store();
    let app = init_app!(gateway, provider());
    let token = sign_up!(app, "ada@acme.test", None);

    let req = test::TestRequest::get()
        .uri("/api/admin/profile")
        .insert_header(bearer(&token))
        .to_request();
    let profile: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(profile["fullName"], "Test Admin");
    assert!(profile["companyId"].is_null());

    let req = test::TestRequest::post()
        .uri("/api/admin/companies")
        .insert_header(bearer(&token))
        .set_json(json!({"name": "Initech Labs"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let company: Value = test::read_body_json(resp).await;
    assert_eq!(company["slug"], "initech-labs");
    assert_eq!(company["pageSections"].as_array().unwrap().len(), 3);

    let req = test::TestRequest::get()
        .uri("/api/admin/profile")
        .insert_header(bearer(&token))
        .to_request();
    let profile: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(profile["companyId"], company["id"]);
    assert_eq!(profile["company"]["slug"], "initech-labs");
}

#[actix_web::test]
async fn test_section_editing_round_trip() {
    let (_dir, gateway) = store();
    let app = init_app!(gateway, provider());
    let token = sign_up!(app, "ada@globex.test", Some(("Globex", "globex")));

    let req = test::TestRequest::get()
        .uri("/api/admin/companies/globex")
        .insert_header(bearer(&token))
        .to_request();
    let editor: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(editor["publicPath"], "/globex/careers");
    let company_id = editor["company"]["id"].as_str().unwrap().to_string();
    let sections = editor["company"]["pageSections"].as_array().unwrap().clone();
    assert_eq!(sections.len(), 3);

    // Add a video section at the end
    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/companies/{}/sections", company_id))
        .insert_header(bearer(&token))
        .set_json(json!({"type": "Video"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let company: Value = test::read_body_json(resp).await;
    let video = company["pageSections"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["type"] == "Video")
        .unwrap()
        .clone();
    assert_eq!(video["order"], 3);
    let video_id = video["id"].as_str().unwrap().to_string();

    // A second Jobs section is refused
    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/companies/{}/sections", company_id))
        .insert_header(bearer(&token))
        .set_json(json!({"type": "Jobs"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Edit, move to the top, then delete
    let req = test::TestRequest::patch()
        .uri(&format!("/api/admin/companies/{}/sections/{}", company_id, video_id))
        .insert_header(bearer(&token))
        .set_json(json!({"title": "Life at Globex", "content": "https://youtu.be/dQw4w9WgXcQ"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri(&format!(
                "/api/admin/companies/{}/sections/{}/move",
                company_id, video_id
            ))
            .insert_header(bearer(&token))
            .set_json(json!({"direction": "up"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get().uri("/api/careers/globex").to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["sections"][0]["type"], "Video");
    assert_eq!(page["sections"][0]["title"], "Life at Globex");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/companies/{}/sections/{}", company_id, video_id))
        .insert_header(bearer(&token))
        .to_request();
    let company: Value = test::call_and_read_body_json(&app, req).await;
    let orders: Vec<i64> = company["pageSections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["order"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, vec![0, 1, 2]);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/companies/{}/sections/{}", company_id, video_id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_put_section_list_normalizes_order() {
    let (_dir, gateway) = store();
    let app = init_app!(gateway, provider());
    let token = sign_up!(app, "ada@globex.test", Some(("Globex", "globex")));

    let req = test::TestRequest::get()
        .uri("/api/admin/companies/globex")
        .insert_header(bearer(&token))
        .to_request();
    let editor: Value = test::call_and_read_body_json(&app, req).await;
    let company_id = editor["company"]["id"].as_str().unwrap().to_string();
    let mut sections = editor["company"]["pageSections"].as_array().unwrap().clone();
    assert_eq!(sections.len(), 3);
    let ids: Vec<String> = sections
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_string())
        .collect();

    // Reverse the list and send sparse, tied orders
    sections.reverse();
    for (section, order) in sections.iter_mut().zip([5, 5, 9]) {
        section["order"] = json!(order);
    }
    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/companies/{}", company_id))
        .insert_header(bearer(&token))
        .set_json(json!({"pageSections": sections}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/admin/companies/globex")
        .insert_header(bearer(&token))
        .to_request();
    let editor: Value = test::call_and_read_body_json(&app, req).await;
    let stored: Vec<(String, i64)> = editor["company"]["pageSections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| (s["id"].as_str().unwrap().to_string(), s["order"].as_i64().unwrap()))
        .collect();
    assert_eq!(
        stored,
        vec![(ids[2].clone(), 0), (ids[1].clone(), 1), (ids[0].clone(), 2)]
    );

    // Unknown section types are refused on write
    let mut with_unknown = editor["company"]["pageSections"].as_array().unwrap().clone();
    with_unknown.push(json!({"id": "extra", "type": "Testimonials", "order": 3, "isVisible": true}));
    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/companies/{}", company_id))
        .insert_header(bearer(&token))
        .set_json(json!({"pageSections": with_unknown}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // So is a second Jobs section
    let mut two_jobs = editor["company"]["pageSections"].as_array().unwrap().clone();
    two_jobs.push(json!({"id": "jobs-2", "type": "Jobs", "order": 3, "isVisible": true}));
    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/companies/{}", company_id))
        .insert_header(bearer(&token))
        .set_json(json!({"pageSections": two_jobs}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_section_edit_keeps_stored_unknown_type() {
    let (dir, gateway) = store();
    let app = init_app!(gateway, provider());
    let token = sign_up!(app, "ada@globex.test", Some(("Globex", "globex")));

    let req = test::TestRequest::get()
        .uri("/api/admin/companies/globex")
        .insert_header(bearer(&token))
        .to_request();
    let editor: Value = test::call_and_read_body_json(&app, req).await;
    let company_id = editor["company"]["id"].as_str().unwrap().to_string();

    // Written by a newer editor that knows a section type this build does not
    let raw_sections = r#"[{"id":"h","type":"Hero","title":"Hi","order":0,"isVisible":true},{"id":"t","type":"Testimonials","order":1,"isVisible":true}]"#;
    let conn = rusqlite::Connection::open(db_path(&dir)).unwrap();
    conn.execute(
        "UPDATE companies SET page_sections = ?1 WHERE id = ?2",
        rusqlite::params![raw_sections, company_id],
    )
    .unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/companies/{}/sections/h/move", company_id))
        .insert_header(bearer(&token))
        .set_json(json!({"direction": "down"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/admin/companies/{}/sections/h", company_id))
        .insert_header(bearer(&token))
        .set_json(json!({"title": "Hello"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let stored: String = conn
        .query_row(
            "SELECT page_sections FROM companies WHERE id = ?1",
            rusqlite::params![company_id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stored, raw_sections);

    // Deleting the unknown section leaves a list that saves normally
    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/companies/{}/sections/t", company_id))
        .insert_header(bearer(&token))
        .to_request();
    let company: Value = test::call_and_read_body_json(&app, req).await;
    let sections = company["pageSections"].as_array().unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0]["id"], "h");
    assert_eq!(sections[0]["order"], 0);
}

#[actix_web::test]
async fn test_sign_up_surfaces_profile_failure() {
    let (dir, gateway) = store();
    let app = init_app!(gateway, provider());

    let conn = rusqlite::Connection::open(db_path(&dir)).unwrap();
    conn.execute("DROP TABLE admin_users", []).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/auth/sign-up")
        .set_json(json!({
            "email": "ada@acme.test",
            "password": "secret123",
            "confirmPassword": "secret123",
            "fullName": "Ada",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("Store error"));
}

#[actix_web::test]
async fn test_reserved_company_slug_is_rejected() {
    let (_dir, gateway) = store();
    let app = init_app!(gateway, provider());
    let token = sign_up!(app, "ada@acme.test", None);

    let req = test::TestRequest::post()
        .uri("/api/admin/companies")
        .insert_header(bearer(&token))
        .set_json(json!({"name": "API", "slug": "api"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_update_company_brand_and_slug() {
    let (_dir, gateway) = store();
    let app = init_app!(gateway, provider());
    let token = sign_up!(app, "ada@globex.test", Some(("Globex", "globex")));

    let req = test::TestRequest::get()
        .uri("/api/admin/companies/globex")
        .insert_header(bearer(&token))
        .to_request();
    let editor: Value = test::call_and_read_body_json(&app, req).await;
    let company_id = editor["company"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/companies/{}", company_id))
        .insert_header(bearer(&token))
        .set_json(json!({"brandConfig": {
            "primaryColor": "red",
            "secondaryColor": "#ffffff",
        }}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/companies/{}", company_id))
        .insert_header(bearer(&token))
        .set_json(json!({
            "slug": "globex-corp",
            "brandConfig": {
                "primaryColor": "#112233",
                "secondaryColor": "#ffffff",
                "fontFamily": "Roboto",
            },
        }))
        .to_request();
    let company: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(company["slug"], "globex-corp");
    assert_eq!(company["brandConfig"]["primaryColor"], "#112233");

    let req = test::TestRequest::get().uri("/globex-corp/careers").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_unlinked_admin_is_forbidden() {
    let (_dir, gateway) = store();
    let app = init_app!(gateway, provider());
    let owner = sign_up!(app, "owner@globex.test", Some(("Globex", "globex")));
    let outsider = sign_up!(app, "outsider@acme.test", Some(("Acme", "acme")));

    let req = test::TestRequest::get()
        .uri("/api/admin/companies/globex")
        .insert_header(bearer(&owner))
        .to_request();
    let editor: Value = test::call_and_read_body_json(&app, req).await;
    let company_id = editor["company"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/admin/companies/globex")
        .insert_header(bearer(&outsider))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/companies/{}", company_id))
        .insert_header(bearer(&outsider))
        .set_json(json!({"name": "Hijacked"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/companies/{}/jobs", company_id))
        .insert_header(bearer(&outsider))
        .set_json(json!({"title": "Spy"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_job_lifecycle() {
    let (_dir, gateway) = store();
    let app = init_app!(gateway, provider());
    let token = sign_up!(app, "ada@globex.test", Some(("Globex", "globex")));

    let req = test::TestRequest::get()
        .uri("/api/admin/companies/globex")
        .insert_header(bearer(&token))
        .to_request();
    let editor: Value = test::call_and_read_body_json(&app, req).await;
    let company_id = editor["company"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/companies/{}/jobs", company_id))
        .insert_header(bearer(&token))
        .set_json(json!({
            "title": "Staff Engineer",
            "location": "Lisbon, Portugal",
            "description": "<p data-start=\"0\" data-end=\"10\">Build things</p><script>alert(1)</script>",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let job: Value = test::read_body_json(resp).await;
    assert_eq!(job["slug"], "staff-engineer");
    assert_eq!(job["department"], "Engineering");
    assert_eq!(job["description"], "<p>Build things</p>");
    let job_id = job["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/admin/companies/{}/jobs", company_id))
        .insert_header(bearer(&token))
        .to_request();
    let jobs: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(jobs["jobs"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri("/globex/jobs/staff-engineer")
        .to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains("Staff Engineer"));
    assert!(!html.contains("Apply for this Job"));

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/jobs/{}", job_id))
        .insert_header(bearer(&token))
        .set_json(json!({"title": "  "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/jobs/{}", job_id))
        .insert_header(bearer(&token))
        .set_json(json!({
            "title": "Principal Engineer",
            "applicationUrl": "https://globex.test/apply",
        }))
        .to_request();
    let job: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(job["title"], "Principal Engineer");
    assert_eq!(job["slug"], "staff-engineer");

    let req = test::TestRequest::get()
        .uri("/globex/jobs/staff-engineer")
        .to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains("Apply for this Job"));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/jobs/{}", job_id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/api/careers/globex/jobs/staff-engineer")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_duplicate_job_slug_conflicts() {
    let (_dir, gateway) = store();
    let app = init_app!(gateway, provider());
    let token = sign_up!(app, "ada@globex.test", Some(("Globex", "globex")));

    let req = test::TestRequest::get()
        .uri("/api/admin/companies/globex")
        .insert_header(bearer(&token))
        .to_request();
    let editor: Value = test::call_and_read_body_json(&app, req).await;
    let company_id = editor["company"]["id"].as_str().unwrap().to_string();

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/admin/companies/{}/jobs", company_id))
            .insert_header(bearer(&token))
            .set_json(json!({"title": "Designer"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
    }
}
