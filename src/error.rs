/// All errors produced by the attendance client.
///
/// Propagation policy:
/// - `Validation` and `Capture` are terminal for the current attempt and
///   require explicit user re-action.
/// - `Location` and `Geocode` are absorbed by the capture path; the bundle
///   degrades to `location: None` / `address: None` instead.
/// - `Network` and `Server` are surfaced to the user but leave all
///   in-progress screen state untouched so a manual retry is possible.
#[derive(Debug, thiserror::Error)]
pub enum PontoError {
    /// Client-side precondition failure. Never reaches the network.
    #[error("{0}")]
    Validation(String),

    /// Capture device unavailable, denied, or already busy.
    #[error("capture failed: {0}")]
    Capture(String),

    /// Position fix unavailable (timeout or permission denial).
    #[error("position fix failed: {0}")]
    Location(String),

    /// Reverse geocoding failed. Always swallowed by callers; the address
    /// is cosmetic and must never block a submission.
    #[error("reverse geocoding failed: {0}")]
    Geocode(String),

    /// Transport failure — no response was received at all.
    #[error("connection failed: {0}")]
    Network(String),

    /// The remote service answered with a non-2xx status.
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    /// The remote service answered 2xx but the body did not match the
    /// expected shape.
    #[error("unexpected response shape: {0}")]
    Schema(String),
}

impl PontoError {
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Server { status: 404, .. })
    }

    /// Message shown to the user for this error.
    ///
    /// Server-provided messages are surfaced verbatim; transport failures
    /// get the connectivity message; anything else falls back to the
    /// screen-specific `generic` text.
    pub fn user_message(&self, generic: &str) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Network(_) => "Erro ao conectar com o servidor".to_string(),
            Self::Server { message, .. } if !message.is_empty() => message.clone(),
            _ => generic.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_surfaced_verbatim() {
        let err = PontoError::Server {
            status: 400,
            message: "Funcionário não encontrado".to_string(),
        };
        assert_eq!(
            err.user_message("Falha ao registrar presença"),
            "Funcionário não encontrado"
        );
    }

    #[test]
    fn empty_server_message_falls_back_to_generic() {
        let err = PontoError::Server {
            status: 500,
            message: String::new(),
        };
        assert_eq!(
            err.user_message("Falha ao registrar presença"),
            "Falha ao registrar presença"
        );
    }

    #[test]
    fn network_error_gets_connectivity_message() {
        let err = PontoError::Network("connection refused".to_string());
        assert_eq!(
            err.user_message("Erro no login"),
            "Erro ao conectar com o servidor"
        );
    }
}
