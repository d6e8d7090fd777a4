use serde::{Deserialize, Serialize};

/// Employee identity as owned by the remote service. The client holds a
/// read-only copy for the lifetime of one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: u64,
    pub matricula: String,
    pub nome: String,
}
