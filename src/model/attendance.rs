use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// The two clock event kinds. The wire format uses the lowercase
/// Portuguese names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecordType {
    Entrada,
    Saida,
}

/// Position fix. `accuracy` is in meters and may be absent when the
/// provider does not report it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
}

/// One clock event as accepted by the remote service. Immutable once
/// created; the client never deletes these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: u64,
    #[serde(rename = "funcionario_id")]
    pub employee_id: u64,
    #[serde(rename = "tipo")]
    pub record_type: RecordType,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "horario")]
    pub time: NaiveTime,
    #[serde(rename = "justificativa")]
    pub justification: Option<String>,
    #[serde(rename = "localizacao")]
    pub location: Option<GeoFix>,
    #[serde(rename = "endereco")]
    pub address: Option<String>,
}

/// Transient capture result, alive only between capture and a successful
/// submission. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceBundle {
    pub photo_uri: String,
    pub location: Option<GeoFix>,
    pub address: Option<String>,
    /// Always `None` at capture time; the workflow fills it from the
    /// justification toggle when it builds the outgoing submission.
    pub justification: Option<String>,
}
