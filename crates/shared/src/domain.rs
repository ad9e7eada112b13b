use serde::{Deserialize, Serialize};

/// Server-assigned identifier; uniqueness is the backend's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

/// One persisted user as returned by the directory service. Wire keys must
/// match the backend's JSON contract exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
    #[serde(rename = "correoElectronico")]
    pub email: String,
    #[serde(rename = "numeroTelefono")]
    pub phone: String,
}

/// The three editable fields sent on create and update. No id: the server
/// assigns one on create and the update target travels in the path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
    #[serde(rename = "correoElectronico")]
    pub email: String,
    #[serde(rename = "numeroTelefono")]
    pub phone: String,
}

impl UserDraft {
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            full_name: record.full_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
        }
    }
}
