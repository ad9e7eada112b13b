//! Backend commands queued from UI intents to the backend worker.

use shared::domain::{UserDraft, UserId};

use crate::controller::events::SaveMode;

pub enum BackendCommand {
    LoadUsers,
    SaveUser { mode: SaveMode, draft: UserDraft },
    DeleteUser { id: UserId },
}
