//! Backend worker: a dedicated thread with its own tokio runtime that
//! executes directory commands and reports back as UI events.

use std::sync::Arc;
use std::thread;

use client_core::{UserDirectory, UserDirectoryClient};
use crossbeam_channel::{Receiver, Sender};
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{SaveMode, UiEvent};

pub fn spawn_backend_thread(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    base_url: String,
) {
    thread::spawn(move || {
        if let Err(err) = Url::parse(&base_url) {
            let _ = ui_tx.try_send(UiEvent::WorkerStartupFailed(format!(
                "Invalid service URL '{base_url}': {err}"
            )));
            tracing::error!("invalid service url '{base_url}': {err}");
            return;
        }

        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::WorkerStartupFailed(format!(
                    "Backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client: Arc<dyn UserDirectory> = Arc::new(UserDirectoryClient::new(base_url));
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
            process_commands(client, cmd_rx, ui_tx).await;
        });
    });
}

pub(crate) async fn process_commands(
    client: Arc<dyn UserDirectory>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::LoadUsers => {
                refresh_user_list(client.as_ref(), &ui_tx).await;
            }
            BackendCommand::SaveUser { mode, draft } => {
                let result = match mode {
                    SaveMode::Create => client.create(&draft).await,
                    SaveMode::Update(id) => client.update(id, &draft).await,
                };
                match result {
                    Ok(saved) => {
                        tracing::info!(user_id = saved.id.0, action = mode.verb(), "user saved");
                        let _ = ui_tx.try_send(UiEvent::SaveCompleted);
                        let note = match mode {
                            SaveMode::Create => "User created",
                            SaveMode::Update(_) => "User updated",
                        };
                        let _ = ui_tx.try_send(UiEvent::Info(note.to_string()));
                        // Reload only once the mutation has resolved; the
                        // view always reflects server truth afterwards.
                        refresh_user_list(client.as_ref(), &ui_tx).await;
                    }
                    Err(err) => {
                        tracing::warn!(action = mode.verb(), "save failed: {err}");
                        let _ = ui_tx.try_send(UiEvent::SaveFailed {
                            mode,
                            message: err.to_string(),
                        });
                    }
                }
            }
            BackendCommand::DeleteUser { id } => match client.delete(id).await {
                Ok(()) => {
                    tracing::info!(user_id = id.0, "user deleted");
                    let _ = ui_tx.try_send(UiEvent::DeleteCompleted);
                    let _ = ui_tx.try_send(UiEvent::Info("User deleted".to_string()));
                    refresh_user_list(client.as_ref(), &ui_tx).await;
                }
                Err(err) => {
                    tracing::warn!(user_id = id.0, "delete failed: {err}");
                    let _ = ui_tx.try_send(UiEvent::DeleteFailed(err.to_string()));
                }
            },
        }
    }
}

/// Full reload: the list is replaced wholesale, never patched.
async fn refresh_user_list(client: &dyn UserDirectory, ui_tx: &Sender<UiEvent>) {
    let _ = ui_tx.try_send(UiEvent::ListRefreshing);
    match client.list_all().await {
        Ok(users) => {
            let _ = ui_tx.try_send(UiEvent::UsersLoaded(users));
        }
        Err(err) => {
            tracing::warn!("user list reload failed: {err}");
            let _ = ui_tx.try_send(UiEvent::ListLoadFailed(err.to_string()));
        }
    }
}
