//! Route handlers for the patient management REST API.

use crate::error::ApiError;
use crate::AppState;
use api_shared::{
    CreatePatientReq, ErrorRes, GetPatientRes, HealthRes, HealthService, ListPatientsRes,
    MessageRes, PatientRes, SortParams, SortedPatientsRes, UpdatePatientReq,
};
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use pms_core::{Patient, PatientInput, PatientUpdate};

pub const GREETING: &str = "Patient Management System API";
pub const ABOUT: &str = "This is a simple FastAPI application for managing patient data.";

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Greeting", body = MessageRes)
    )
)]
#[axum::debug_handler]
pub async fn hello() -> Json<MessageRes> {
    Json(MessageRes::new(GREETING))
}

#[utoipa::path(
    get,
    path = "/about",
    responses(
        (status = 200, description = "Service description", body = MessageRes)
    )
)]
#[axum::debug_handler]
pub async fn about() -> Json<MessageRes> {
    Json(MessageRes::new(ABOUT))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancer checks.
#[axum::debug_handler]
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/view",
    responses(
        (status = 200, description = "All patients keyed by id", body = ListPatientsRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List all patients in the store
///
/// # Errors
/// Returns `500 Internal Server Error` if the store cannot be read.
#[axum::debug_handler]
pub async fn view_patients(
    State(state): State<AppState>,
) -> Result<Json<ListPatientsRes>, ApiError> {
    let store = state.patient_service.list()?;
    let patients = store
        .iter()
        .map(|(id, patient)| (id.to_string(), patient_res(patient)))
        .collect();
    Ok(Json(ListPatientsRes { patients }))
}

#[utoipa::path(
    get,
    path = "/patient/{patient_id}",
    params(
        ("patient_id" = String, Path, description = "ID of the patient in the store", example = "P001")
    ),
    responses(
        (status = 200, description = "Patient record", body = GetPatientRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// View a single patient
///
/// # Errors
/// Returns `404 Not Found` if no patient has the given id.
#[axum::debug_handler]
pub async fn view_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<GetPatientRes>, ApiError> {
    let patient = state.patient_service.get(&patient_id)?;
    Ok(Json(GetPatientRes {
        patient: patient_res(&patient),
    }))
}

#[utoipa::path(
    get,
    path = "/sort",
    params(SortParams),
    responses(
        (status = 200, description = "Patients in the requested order", body = SortedPatientsRes),
        (status = 400, description = "Invalid sort field or order", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Sort patients by height, weight or BMI
///
/// # Errors
/// Returns `400 Bad Request` if `sort_by` is missing or not one of `height`, `weight`,
/// `bmi`, or if `order` is not `asc` or `desc`.
#[axum::debug_handler]
pub async fn sort_patients(
    State(state): State<AppState>,
    params: Result<Query<SortParams>, QueryRejection>,
) -> Result<Json<SortedPatientsRes>, ApiError> {
    let Query(params) = params?;
    let patients = state
        .patient_service
        .sort(&params.sort_by, params.order.as_deref())?
        .iter()
        .map(patient_res)
        .collect();
    Ok(Json(SortedPatientsRes { patients }))
}

#[utoipa::path(
    post,
    path = "/create",
    request_body = CreatePatientReq,
    responses(
        (status = 201, description = "Patient created", body = MessageRes),
        (status = 400, description = "Patient already exists", body = ErrorRes),
        (status = 422, description = "Validation failure", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Create a new patient record
///
/// `bmi` and `verdict` are computed from `height` and `weight`; the id becomes the store key
/// and is not kept inside the record.
///
/// # Errors
/// - `400 Bad Request` if the id is already in use
/// - `422 Unprocessable Entity` if a field is missing or fails validation
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<CreatePatientReq>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageRes>), ApiError> {
    let Json(req) = payload?;
    let input = PatientInput {
        name: req.name,
        city: req.city,
        age: req.age,
        gender: req.gender,
        height: req.height,
        weight: req.weight,
    };

    state.patient_service.create(&req.id, input)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageRes::new("Patient created successfully")),
    ))
}

#[utoipa::path(
    put,
    path = "/edit/{patient_id}",
    params(
        ("patient_id" = String, Path, description = "ID of the patient to update", example = "P001")
    ),
    request_body = UpdatePatientReq,
    responses(
        (status = 200, description = "Patient updated", body = MessageRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 422, description = "Validation failure", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Update an existing patient
///
/// Only fields present in the body are changed. `bmi` and `verdict` are recomputed.
///
/// # Errors
/// - `404 Not Found` if no patient has the given id
/// - `422 Unprocessable Entity` if a supplied field fails validation
#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    payload: Result<Json<UpdatePatientReq>, JsonRejection>,
) -> Result<Json<MessageRes>, ApiError> {
    let Json(req) = payload?;
    let update = PatientUpdate {
        name: req.name,
        city: req.city,
        age: req.age,
        gender: req.gender,
        height: req.height,
        weight: req.weight,
    };

    state.patient_service.update(&patient_id, update)?;
    Ok(Json(MessageRes::new("Patient updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/delete/{patient_id}",
    params(
        ("patient_id" = String, Path, description = "ID of the patient to delete", example = "P001")
    ),
    responses(
        (status = 200, description = "Patient deleted", body = MessageRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Delete a patient
///
/// # Errors
/// Returns `404 Not Found` if no patient has the given id.
#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<MessageRes>, ApiError> {
    state.patient_service.delete(&patient_id)?;
    Ok(Json(MessageRes::new("Patient deleted successfully")))
}

// Helper function
fn patient_res(patient: &Patient) -> PatientRes {
    PatientRes {
        name: patient.name().to_string(),
        city: patient.city().to_string(),
        age: patient.age(),
        gender: patient.gender().to_string(),
        height: patient.height(),
        weight: patient.weight(),
        bmi: patient.bmi(),
        verdict: patient.verdict().to_string(),
    }
}
