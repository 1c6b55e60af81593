use actix_web::web;

use crate::handlers::{admin, auth, companies, jobs, public};

/// Registers every route of the service. API routes come before the
/// public `/{slug}/...` pages.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(public::health))
        // Auth
        .route("/api/auth/sign-up", web::post().to(auth::sign_up))
        .route("/api/auth/sign-in", web::post().to(auth::sign_in))
        .route("/api/auth/sign-out", web::post().to(auth::sign_out))
        .route("/api/auth/session", web::get().to(auth::session))
        // Admin
        .route("/api/admin/profile", web::get().to(admin::profile))
        .route("/api/admin/companies", web::post().to(admin::create_company))
        .route("/api/admin/companies/{slug}", web::get().to(companies::editor_data))
        .route("/api/admin/companies/{id}", web::put().to(companies::update_company))
        .route("/api/admin/companies/{id}/sections", web::post().to(companies::add_section))
        .route(
            "/api/admin/companies/{id}/sections/{section_id}",
            web::patch().to(companies::update_section),
        )
        .route(
            "/api/admin/companies/{id}/sections/{section_id}",
            web::delete().to(companies::delete_section),
        )
        .route(
            "/api/admin/companies/{id}/sections/{section_id}/move",
            web::post().to(companies::move_section),
        )
        .route("/api/admin/companies/{id}/jobs", web::get().to(jobs::list_jobs))
        .route("/api/admin/companies/{id}/jobs", web::post().to(jobs::create_job))
        .route("/api/admin/jobs/{id}", web::put().to(jobs::update_job))
        .route("/api/admin/jobs/{id}", web::delete().to(jobs::delete_job))
        .route("/admin/editor", web::get().to(admin::editor_redirect))
        // Public careers pages
        .route("/api/careers", web::get().to(public::list_careers_pages))
        .route("/api/careers/{slug}", web::get().to(public::careers_page_json))
        .route("/api/careers/{slug}/jobs", web::get().to(public::careers_jobs))
        .route("/api/careers/{slug}/jobs/{job_slug}", web::get().to(public::careers_job))
        .route("/{slug}/careers", web::get().to(public::careers_page))
        .route("/{slug}/jobs/{job_slug}", web::get().to(public::job_detail_page));
}
