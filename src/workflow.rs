use std::sync::Arc;

use chrono::Local;
use tracing::{info, warn};

use crate::api::{AttendanceApi, NewAttendanceRequest};
use crate::error::PontoError;
use crate::model::{AttendanceRecord, EvidenceBundle, RecordType};
use crate::resolver::{self, NextAction};
use crate::session::Session;

/// Result of a successful submission.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub record: AttendanceRecord,
    /// Confirmation text for the user, e.g.
    /// "Registro de ENTRADA realizado com sucesso".
    pub message: String,
    /// Route the UI should move to next, when one is configured.
    pub navigate_to: Option<String>,
}

/// Screen-level attendance workflow: holds the transient state between
/// capture and submission and owns the submit cycle.
///
/// State clearing happens only after a fully successful submission. Every
/// failure path leaves the bundle, the justification toggle and the motive
/// text exactly as they were, so the user can retry without re-capturing.
pub struct AttendanceWorkflow {
    api: Arc<dyn AttendanceApi>,
    session: Session,
    next_action: NextAction,
    bundle: Option<EvidenceBundle>,
    justify: bool,
    motive: String,
    post_submit_route: Option<String>,
}

impl AttendanceWorkflow {
    /// Builds the workflow for a screen entry, resolving today's next
    /// action from server truth.
    pub async fn load(
        api: Arc<dyn AttendanceApi>,
        session: Session,
        post_submit_route: Option<String>,
    ) -> Self {
        let today = Local::now().date_naive();
        let next_action = resolver::resolve_next_action(api.as_ref(), session.employee_id(), today).await;

        Self {
            api,
            session,
            next_action,
            bundle: None,
            justify: false,
            motive: String::new(),
            post_submit_route,
        }
    }

    pub fn next_action(&self) -> NextAction {
        self.next_action
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn bundle(&self) -> Option<&EvidenceBundle> {
        self.bundle.as_ref()
    }

    pub fn motive(&self) -> &str {
        &self.motive
    }

    pub fn justify(&self) -> bool {
        self.justify
    }

    /// Attaches the capture result. Replaces any previous bundle; the old
    /// one is discarded, never persisted.
    pub fn attach_bundle(&mut self, bundle: EvidenceBundle) {
        self.bundle = Some(bundle);
    }

    pub fn set_justify(&mut self, justify: bool) {
        self.justify = justify;
    }

    pub fn set_motive(&mut self, motive: impl Into<String>) {
        self.motive = motive.into();
    }

    /// Re-resolves the next action from the service, as on screen
    /// re-entry.
    pub async fn refresh(&mut self) {
        let today = Local::now().date_naive();
        self.next_action =
            resolver::resolve_next_action(self.api.as_ref(), self.session.employee_id(), today)
                .await;
    }

    /// Validates the bundle, submits it, and interprets the response.
    ///
    /// On success all transient state is cleared and the screen is back in
    /// its pre-capture shape. On any failure nothing is touched.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, PontoError> {
        let bundle = self
            .bundle
            .as_ref()
            .filter(|b| !b.photo_uri.is_empty())
            .ok_or_else(|| PontoError::Validation("Tire a foto antes de enviar".to_string()))?;

        if self.next_action == NextAction::Exhausted {
            warn!(
                employee_id = self.session.employee_id(),
                "entrada and saida already registered today, refusing third submission"
            );
            return Err(PontoError::Validation(
                "Entrada e saída já registradas hoje".to_string(),
            ));
        }

        // Null, not empty string: the server distinguishes the two.
        let outgoing = EvidenceBundle {
            justification: self.justify.then(|| self.motive.clone()),
            ..bundle.clone()
        };

        let request = NewAttendanceRequest {
            funcionario_id: self.session.employee_id(),
            foto_url: outgoing.photo_uri,
            localizacao: outgoing.location,
            endereco: outgoing.address,
            justificativa: outgoing.justification,
        };

        let record = self.api.create_record(&request).await?;

        info!(
            employee_id = record.employee_id,
            tipo = %record.record_type,
            "attendance registered"
        );

        let message = format!(
            "Registro de {} realizado com sucesso",
            record.record_type.to_string().to_uppercase()
        );

        // Full success: only now is transient state cleared.
        self.bundle = None;
        self.justify = false;
        self.motive.clear();
        self.next_action = match record.record_type {
            RecordType::Entrada => NextAction::Saida,
            RecordType::Saida => NextAction::Exhausted,
        };

        Ok(SubmitOutcome {
            record,
            message,
            navigate_to: self.post_submit_route.clone(),
        })
    }
}
