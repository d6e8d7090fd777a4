use chrono::NaiveDate;
use tracing::warn;

use crate::api::AttendanceApi;
use crate::model::{AttendanceRecord, RecordType};

/// What the employee's records for one day look like. At most one entrada
/// and one saida may exist per day; duplicates in the input are treated as
/// presence, not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayState {
    NoRecords,
    EntradaOnly,
    Both,
}

impl DayState {
    /// Pure, order-independent scan of one day's record set. A saida with
    /// no matching entrada maps to `NoRecords`: the next valid action is
    /// still an entrada.
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let has_entrada = records
            .iter()
            .any(|r| r.record_type == RecordType::Entrada);
        let has_saida = records.iter().any(|r| r.record_type == RecordType::Saida);

        match (has_entrada, has_saida) {
            (true, true) => Self::Both,
            (true, false) => Self::EntradaOnly,
            (false, _) => Self::NoRecords,
        }
    }

    pub fn next_action(self) -> NextAction {
        match self {
            Self::NoRecords => NextAction::Entrada,
            Self::EntradaOnly => NextAction::Saida,
            Self::Both => NextAction::Exhausted,
        }
    }
}

/// The valid next action for an employee today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    Entrada,
    Saida,
    /// Both records exist already; a third submission is meaningless and
    /// the workflow refuses it.
    Exhausted,
}

impl NextAction {
    /// The record type this action would create, if any.
    pub fn record_type(self) -> Option<RecordType> {
        match self {
            Self::Entrada => Some(RecordType::Entrada),
            Self::Saida => Some(RecordType::Saida),
            Self::Exhausted => None,
        }
    }

    /// Type used for screen labels. Exhausted falls back to entrada for
    /// display purposes only.
    pub fn display_type(self) -> RecordType {
        self.record_type().unwrap_or(RecordType::Entrada)
    }
}

/// Fetches the day's records from the service and derives the next action.
///
/// A fetch failure is treated as an empty record set: an employee the
/// service knows nothing about today has not clocked in yet, so the
/// default is entrada.
pub async fn resolve_next_action(
    api: &dyn AttendanceApi,
    employee_id: u64,
    date: NaiveDate,
) -> NextAction {
    let records = match api.records_for_day(employee_id, date).await {
        Ok(records) => records,
        Err(e) => {
            if !e.is_not_found() {
                warn!(error = %e, employee_id, %date, "day records unavailable, assuming none");
            }
            Vec::new()
        }
    };

    DayState::from_records(&records).next_action()
}
