//! # PMS Core
//!
//! Core business logic for the patient management system.
//!
//! This crate contains pure data operations over a single JSON-file patient store:
//! - Patient model with derived BMI and verdict
//! - Field validation for create and partial-update payloads
//! - Whole-document load/save behind the [`PatientStorage`] trait
//! - Listing, lookup, sorting, create, update and delete via [`PatientService`]
//!
//! **No API concerns**: HTTP servers, routing and wire types belong in `api-rest` and `api-shared`.

pub mod bmi;
pub mod config;
pub mod constants;
mod error;
pub mod patient;
pub mod service;
pub mod sort;
pub mod storage;
pub mod validation;

pub use bmi::Verdict;
pub use config::CoreConfig;
pub use constants::DEFAULT_PATIENT_STORE_PATH;
pub use error::{PatientError, PatientResult};
pub use patient::{Gender, Patient, PatientStore};
pub use service::PatientService;
pub use sort::{SortField, SortOrder};
pub use storage::{JsonFileStore, PatientStorage};
pub use validation::{PatientInput, PatientUpdate};
