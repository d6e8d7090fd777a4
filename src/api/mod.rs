pub mod client;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PontoError;
use crate::model::{AttendanceRecord, Employee, GeoFix};

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub matricula: String,
    pub senha: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub funcionario: Employee,
}

/// Body of POST /presenca. `justificativa` must be null (not an empty
/// string) when the late toggle is off; the server treats the two
/// differently.
#[derive(Debug, Clone, Serialize)]
pub struct NewAttendanceRequest {
    pub funcionario_id: u64,
    pub foto_url: String,
    pub localizacao: Option<GeoFix>,
    pub endereco: Option<String>,
    pub justificativa: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateResponse {
    pub presenca: AttendanceRecord,
}

/// Error envelope the service uses on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

/// The remote attendance service.
///
/// Abstracted behind a trait so the resolver and the submission workflow
/// can be exercised against a mock without a network.
#[async_trait]
pub trait AttendanceApi: Send + Sync {
    /// POST /auth/login. Returns the authenticated employee on 2xx.
    async fn login(&self, matricula: &str, senha: &str) -> Result<Employee, PontoError>;

    /// GET /presenca/{employee_id}?date=YYYY-MM-DD. The returned sequence
    /// carries no ordering guarantee.
    async fn records_for_day(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, PontoError>;

    /// POST /presenca. Returns the record as accepted by the server.
    async fn create_record(
        &self,
        request: &NewAttendanceRequest,
    ) -> Result<AttendanceRecord, PontoError>;
}
