use crate::HealthRes;

/// Simple health service for the REST API and any future transport.
pub struct HealthService;

impl HealthService {
    /// Checks health; the service holds no state.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Patient Management System API is alive".into(),
        }
    }
}
