use tracing::info;

use crate::api::AttendanceApi;
use crate::error::PontoError;
use crate::model::Employee;

/// Authenticated session context. Created at login, passed explicitly into
/// whatever needs the employee identity, and dropped at logout or when the
/// submission cycle completes. There is no ambient storage.
#[derive(Debug, Clone)]
pub struct Session {
    employee: Employee,
}

impl Session {
    pub fn new(employee: Employee) -> Self {
        Self { employee }
    }

    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    pub fn employee_id(&self) -> u64 {
        self.employee.id
    }
}

/// Authenticates against the service and opens a session.
///
/// Credentials are validated client-side first; an empty matricula or
/// senha fails with `Validation` and performs no network call.
pub async fn login(
    api: &dyn AttendanceApi,
    matricula: &str,
    senha: &str,
) -> Result<Session, PontoError> {
    if matricula.trim().is_empty() {
        return Err(PontoError::Validation("Informe sua matrícula".to_string()));
    }
    if senha.is_empty() {
        return Err(PontoError::Validation("Informe a senha".to_string()));
    }

    let employee = api.login(matricula, senha).await?;
    info!(employee_id = employee.id, "session opened");
    Ok(Session::new(employee))
}
