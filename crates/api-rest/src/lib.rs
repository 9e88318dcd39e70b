//! # API REST
//!
//! REST API implementation for the patient management system.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, error mapping, CORS, request tracing)
//!
//! Uses `api-shared` for wire types and `pms-core` for all patient store operations.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use pms_core::PatientService;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    pub patient_service: PatientService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::hello,
        handlers::about,
        handlers::health,
        handlers::view_patients,
        handlers::view_patient,
        handlers::sort_patients,
        handlers::create_patient,
        handlers::update_patient,
        handlers::delete_patient,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::MessageRes,
        api_shared::ErrorRes,
        api_shared::PatientRes,
        api_shared::ListPatientsRes,
        api_shared::GetPatientRes,
        api_shared::SortedPatientsRes,
        api_shared::CreatePatientReq,
        api_shared::UpdatePatientReq,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with every route, Swagger UI, CORS and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::hello))
        .route("/about", get(handlers::about))
        .route("/health", get(handlers::health))
        .route("/view", get(handlers::view_patients))
        .route("/patient/:patient_id", get(handlers::view_patient))
        .route("/sort", get(handlers::sort_patients))
        .route("/create", post(handlers::create_patient))
        .route("/edit/:patient_id", put(handlers::update_patient))
        .route("/delete/:patient_id", delete(handlers::delete_patient))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
