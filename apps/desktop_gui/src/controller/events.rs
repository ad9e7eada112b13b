//! Backend-to-UI events and save-failure classification.

use shared::domain::{UserId, UserRecord};

/// Whether a save targets a new record or an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update(UserId),
}

impl SaveMode {
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update(_) => "update",
        }
    }
}

/// Events emitted by the backend worker, drained by the UI each frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Info(String),
    WorkerStartupFailed(String),
    ListRefreshing,
    UsersLoaded(Vec<UserRecord>),
    ListLoadFailed(String),
    SaveCompleted,
    SaveFailed { mode: SaveMode, message: String },
    DeleteCompleted,
    DeleteFailed(String),
}

/// Disposition of a failed save after sniffing the failure text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveFailure {
    /// The backend rejected the email as already taken; this surfaces on the
    /// email field instead of the global banner.
    EmailTaken(String),
    /// Anything else becomes the banner, worded by mode.
    Other(String),
}

const EMAIL_TOKENS: [&str; 2] = ["email", "correo"];
const IN_USE_TOKENS: [&str; 3] = ["in use", "uso", "duplicate"];

/// The backend reports write conflicts as free text, not structured codes,
/// so duplicate-email detection sniffs the message wording. Tokens cover the
/// service's Spanish phrasing and English equivalents; any other conflict
/// (duplicate phone, say) falls through to the banner.
pub fn classify_save_failure(mode: SaveMode, message: &str) -> SaveFailure {
    let lower = message.to_lowercase();
    let email_like = EMAIL_TOKENS.iter().any(|token| lower.contains(token));
    let in_use_like = IN_USE_TOKENS.iter().any(|token| lower.contains(token));
    if email_like && in_use_like {
        SaveFailure::EmailTaken("This email address is already in use".to_string())
    } else {
        SaveFailure::Other(format!("Failed to {} user: {message}", mode.verb()))
    }
}
