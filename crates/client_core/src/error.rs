use reqwest::StatusCode;
use thiserror::Error;

/// Uniform error channel for the directory client: every failure is either a
/// transport problem or a non-success status, nothing else crosses the
/// boundary.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a usable response: connection refused,
    /// DNS failure, or a body that could not be read or decoded.
    #[error("user service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success status. `message` carries the
    /// server's raw error payload verbatim when one was provided; callers
    /// classify conflicts from its wording.
    #[error("{message}")]
    Status { status: StatusCode, message: String },
}

impl ClientError {
    pub(crate) fn from_status(status: StatusCode, body: Option<String>) -> Self {
        let message = match body {
            Some(text) if !text.trim().is_empty() => text,
            _ => format!("server returned status {status}"),
        };
        Self::Status { status, message }
    }

    /// Status code of the response, if one was received at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport(_) => None,
            Self::Status { status, .. } => Some(*status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_uses_body_text_verbatim() {
        let err = ClientError::from_status(
            StatusCode::BAD_REQUEST,
            Some("El correo electrónico ya está en uso".to_string()),
        );
        assert_eq!(err.to_string(), "El correo electrónico ya está en uso");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn status_error_falls_back_to_status_line_when_body_is_blank() {
        let err = ClientError::from_status(StatusCode::NOT_FOUND, Some("   ".to_string()));
        assert_eq!(err.to_string(), "server returned status 404 Not Found");

        let err = ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, None);
        assert_eq!(
            err.to_string(),
            "server returned status 500 Internal Server Error"
        );
    }
}
