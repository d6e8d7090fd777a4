use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{
    AttendanceApi, CreateResponse, ErrorBody, LoginRequest, LoginResponse, NewAttendanceRequest,
};
use crate::config::Config;
use crate::error::PontoError;
use crate::model::{AttendanceRecord, Employee};

/// reqwest-backed implementation of [`AttendanceApi`].
pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new(config: &Config) -> Result<Self, PontoError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| PontoError::Network(e.to_string()))?;

        Ok(Self {
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turns a response into a typed value. Non-2xx becomes `Server` with
    /// the body's `error` field verbatim when present; a 2xx body that does
    /// not match `T` becomes `Schema`.
    async fn read_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PontoError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PontoError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(parse_error_body(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| PontoError::Schema(e.to_string()))
    }
}

/// Maps a non-2xx body to a `Server` error, surfacing the `error` field
/// when the envelope parses, an empty message otherwise.
pub(crate) fn parse_error_body(status: u16, body: &str) -> PontoError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_default();
    PontoError::Server { status, message }
}

#[async_trait]
impl AttendanceApi for HttpApi {
    async fn login(&self, matricula: &str, senha: &str) -> Result<Employee, PontoError> {
        let request = LoginRequest {
            matricula: matricula.to_string(),
            senha: senha.to_string(),
        };

        let response = self
            .client
            .post(self.endpoint("/auth/login"))
            .json(&request)
            .send()
            .await
            .map_err(|e| PontoError::Network(e.to_string()))?;

        let parsed: LoginResponse = Self::read_response(response).await?;
        debug!(employee_id = parsed.funcionario.id, "login accepted");
        Ok(parsed.funcionario)
    }

    async fn records_for_day(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, PontoError> {
        let response = self
            .client
            .get(self.endpoint(&format!("/presenca/{employee_id}")))
            .query(&[("date", date.format("%Y-%m-%d").to_string())])
            .send()
            .await
            .map_err(|e| PontoError::Network(e.to_string()))?;

        Self::read_response(response).await
    }

    async fn create_record(
        &self,
        request: &NewAttendanceRequest,
    ) -> Result<AttendanceRecord, PontoError> {
        let response = self
            .client
            .post(self.endpoint("/presenca"))
            .json(request)
            .send()
            .await
            .map_err(|e| PontoError::Network(e.to_string()))?;

        let parsed: CreateResponse = Self::read_response(response).await?;
        Ok(parsed.presenca)
    }
}
