//! Reducer-style state machine for the CRUD workflow: list lifecycle,
//! modal/form state, validation gating, and failure handling.

use shared::domain::{UserDraft, UserId, UserRecord};
use shared::validation::{validate_draft, Field, FieldErrors};

use crate::controller::events::{classify_save_failure, SaveFailure, SaveMode, UiEvent};

/// Form state while the modal is open. `editing == None` means create mode;
/// otherwise the id recorded when the modal opened. The buffer is a
/// disposable copy with no live binding to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalState {
    pub editing: Option<UserId>,
    pub form: UserDraft,
    pub field_errors: FieldErrors,
}

/// What the list area should render.
#[derive(Debug, PartialEq, Eq)]
pub enum ListView<'a> {
    Loading,
    Empty,
    Rows(&'a [UserRecord]),
}

/// Outcome of a submit intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No modal open, or validation failed; no network call happens.
    Rejected,
    /// A save is already in flight; the intent is dropped, not queued.
    Busy,
    /// The draft passed validation; the caller dispatches the save.
    Proceed { mode: SaveMode, draft: UserDraft },
}

/// The single state-owning unit behind the UI. All mutation goes through
/// intent methods or [`DirectoryWorkflow::apply`], so the machine is
/// testable without any rendering.
#[derive(Debug, Default)]
pub struct DirectoryWorkflow {
    users: Vec<UserRecord>,
    list_loading: bool,
    submitting: bool,
    banner: Option<String>,
    modal: Option<ModalState>,
    pending_delete: Option<UserId>,
}

impl DirectoryWorkflow {
    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn modal(&self) -> Option<&ModalState> {
        self.modal.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_list_loading(&self) -> bool {
        self.list_loading
    }

    pub fn pending_delete(&self) -> Option<UserId> {
        self.pending_delete
    }

    pub fn list_view(&self) -> ListView<'_> {
        if self.list_loading {
            ListView::Loading
        } else if self.users.is_empty() {
            ListView::Empty
        } else {
            ListView::Rows(&self.users)
        }
    }

    pub fn open_create(&mut self) {
        self.modal = Some(ModalState {
            editing: None,
            form: UserDraft::default(),
            field_errors: FieldErrors::default(),
        });
    }

    pub fn open_edit(&mut self, user: &UserRecord) {
        self.modal = Some(ModalState {
            editing: Some(user.id),
            form: UserDraft::from_record(user),
            field_errors: FieldErrors::default(),
        });
    }

    /// Cancel or post-save close: buffer and field errors are discarded.
    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Updates one field of the open form and clears that field's error, so
    /// the message disappears as soon as the operator starts fixing it.
    pub fn edit_field(&mut self, field: Field, value: String) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };
        match field {
            Field::FullName => modal.form.full_name = value,
            Field::Email => modal.form.email = value,
            Field::Phone => modal.form.phone = value,
        }
        modal.field_errors.clear(field);
    }

    /// Validation runs synchronously before anything is queued; an invalid
    /// draft populates exactly the failing fields and goes no further.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.submitting {
            return SubmitOutcome::Busy;
        }
        let Some(modal) = self.modal.as_mut() else {
            return SubmitOutcome::Rejected;
        };

        let errors = validate_draft(&modal.form);
        if !errors.is_empty() {
            modal.field_errors = errors;
            return SubmitOutcome::Rejected;
        }

        modal.field_errors = FieldErrors::default();
        self.banner = None;
        self.submitting = true;
        let mode = match modal.editing {
            Some(id) => SaveMode::Update(id),
            None => SaveMode::Create,
        };
        SubmitOutcome::Proceed {
            mode,
            draft: modal.form.clone(),
        }
    }

    /// Arms the delete confirmation gate; nothing is sent yet.
    pub fn request_delete(&mut self, id: UserId) {
        self.pending_delete = Some(id);
    }

    /// Declining the confirmation is a no-op beyond disarming the gate.
    pub fn decline_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Confirms the armed deletion, handing back the target id for dispatch.
    pub fn confirm_delete(&mut self) -> Option<UserId> {
        self.pending_delete.take()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Folds one backend event into the state.
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            // Status-line text is owned by the app shell, not the workflow.
            UiEvent::Info(_) => {}
            UiEvent::WorkerStartupFailed(message) => {
                self.banner = Some(message);
            }
            UiEvent::ListRefreshing => {
                self.list_loading = true;
                self.banner = None;
            }
            UiEvent::UsersLoaded(users) => {
                // Wholesale replacement; the list is never patched in place.
                self.users = users;
                self.list_loading = false;
            }
            UiEvent::ListLoadFailed(message) => {
                // The stale list stays visible under the banner.
                self.list_loading = false;
                self.banner = Some(format!("Failed to load users: {message}"));
            }
            UiEvent::SaveCompleted => {
                self.submitting = false;
                self.modal = None;
            }
            UiEvent::SaveFailed { mode, message } => {
                self.submitting = false;
                match classify_save_failure(mode, &message) {
                    SaveFailure::EmailTaken(field_message) => {
                        if let Some(modal) = self.modal.as_mut() {
                            modal.field_errors = FieldErrors {
                                email: Some(field_message),
                                ..FieldErrors::default()
                            };
                        }
                    }
                    SaveFailure::Other(banner) => {
                        self.banner = Some(banner);
                    }
                }
            }
            UiEvent::DeleteCompleted => {}
            UiEvent::DeleteFailed(message) => {
                self.banner = Some(format!("Failed to delete user: {message}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(id: i64, full_name: &str, email: &str, phone: &str) -> UserRecord {
        UserRecord {
            id: UserId(id),
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }

    fn workflow_with_users(users: Vec<UserRecord>) -> DirectoryWorkflow {
        let mut workflow = DirectoryWorkflow::default();
        workflow.apply(UiEvent::UsersLoaded(users));
        workflow
    }

    fn fill_valid_form(workflow: &mut DirectoryWorkflow) {
        workflow.edit_field(Field::FullName, "Ana".to_string());
        workflow.edit_field(Field::Email, "a@b.c".to_string());
        workflow.edit_field(Field::Phone, "123".to_string());
    }

    #[test]
    fn starts_with_an_empty_idle_list() {
        let workflow = DirectoryWorkflow::default();
        assert_eq!(workflow.list_view(), ListView::Empty);
        assert!(workflow.banner().is_none());
        assert!(workflow.modal().is_none());
    }

    #[test]
    fn refresh_shows_loading_and_clears_the_banner() {
        let mut workflow = DirectoryWorkflow::default();
        workflow.apply(UiEvent::DeleteFailed("boom".to_string()));
        assert!(workflow.banner().is_some());

        workflow.apply(UiEvent::ListRefreshing);
        assert_eq!(workflow.list_view(), ListView::Loading);
        assert!(workflow.banner().is_none());
    }

    #[test]
    fn loaded_users_replace_the_list_wholesale() {
        let mut workflow = workflow_with_users(vec![sample_user(1, "Old", "o@b.c", "1")]);
        workflow.apply(UiEvent::UsersLoaded(vec![
            sample_user(2, "Ana", "a@b.c", "111"),
            sample_user(3, "Bruno", "b@c.d", "222"),
        ]));

        let users = workflow.users();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, UserId(2));
        assert!(matches!(workflow.list_view(), ListView::Rows(rows) if rows.len() == 2));
    }

    #[test]
    fn an_empty_load_renders_the_explicit_empty_state() {
        let workflow = workflow_with_users(Vec::new());
        assert_eq!(workflow.list_view(), ListView::Empty);
    }

    #[test]
    fn a_failed_load_keeps_the_stale_list_under_a_banner() {
        let mut workflow = workflow_with_users(vec![sample_user(1, "Ana", "a@b.c", "111")]);

        workflow.apply(UiEvent::ListRefreshing);
        workflow.apply(UiEvent::ListLoadFailed("connection refused".to_string()));

        assert_eq!(
            workflow.banner(),
            Some("Failed to load users: connection refused")
        );
        assert!(matches!(workflow.list_view(), ListView::Rows(rows) if rows.len() == 1));
    }

    #[test]
    fn open_create_seeds_defaults_and_clears_old_errors() {
        let mut workflow = DirectoryWorkflow::default();
        workflow.open_create();
        assert_eq!(workflow.submit(), SubmitOutcome::Rejected);
        assert!(!workflow.modal().expect("modal").field_errors.is_empty());

        workflow.open_create();
        let modal = workflow.modal().expect("modal");
        assert_eq!(modal.editing, None);
        assert_eq!(modal.form, UserDraft::default());
        assert!(modal.field_errors.is_empty());
    }

    #[test]
    fn open_edit_copies_the_record_fields_and_binds_its_id() {
        let mut workflow = DirectoryWorkflow::default();
        workflow.open_edit(&sample_user(7, "Ana", "a@b.c", "123"));

        let modal = workflow.modal().expect("modal");
        assert_eq!(modal.editing, Some(UserId(7)));
        assert_eq!(modal.form.full_name, "Ana");
        assert_eq!(modal.form.email, "a@b.c");
        assert_eq!(modal.form.phone, "123");
        assert!(modal.field_errors.is_empty());
    }

    #[test]
    fn the_form_buffer_is_not_resynced_when_the_list_changes() {
        let mut workflow = workflow_with_users(vec![sample_user(7, "Ana", "a@b.c", "123")]);
        workflow.open_edit(&sample_user(7, "Ana", "a@b.c", "123"));

        workflow.apply(UiEvent::UsersLoaded(vec![sample_user(
            7, "Renamed", "r@b.c", "999",
        )]));

        let modal = workflow.modal().expect("modal");
        assert_eq!(modal.form.full_name, "Ana");
    }

    #[test]
    fn submit_with_empty_fields_populates_exactly_the_failing_fields() {
        let mut workflow = DirectoryWorkflow::default();
        workflow.open_create();
        workflow.edit_field(Field::Email, "a@b.c".to_string());

        assert_eq!(workflow.submit(), SubmitOutcome::Rejected);
        assert!(!workflow.is_submitting());

        let errors = &workflow.modal().expect("modal").field_errors;
        assert!(errors.full_name.is_some());
        assert!(errors.email.is_none());
        assert!(errors.phone.is_some());
    }

    #[test]
    fn submit_rejects_a_malformed_email_with_a_format_message() {
        let mut workflow = DirectoryWorkflow::default();
        workflow.open_create();
        workflow.edit_field(Field::FullName, "Ana".to_string());
        workflow.edit_field(Field::Email, "not-an-email".to_string());
        workflow.edit_field(Field::Phone, "123".to_string());

        assert_eq!(workflow.submit(), SubmitOutcome::Rejected);
        let errors = &workflow.modal().expect("modal").field_errors;
        assert_eq!(errors.email.as_deref(), Some("Email format is not valid"));
        assert!(errors.full_name.is_none());
        assert!(errors.phone.is_none());
    }

    #[test]
    fn a_valid_submit_proceeds_in_create_mode_and_sets_the_busy_flag() {
        let mut workflow = DirectoryWorkflow::default();
        workflow.apply(UiEvent::DeleteFailed("stale banner".to_string()));
        workflow.open_create();
        fill_valid_form(&mut workflow);

        let outcome = workflow.submit();
        let SubmitOutcome::Proceed { mode, draft } = outcome else {
            panic!("expected proceed, got {outcome:?}");
        };
        assert_eq!(mode, SaveMode::Create);
        assert_eq!(draft.full_name, "Ana");
        assert!(workflow.is_submitting());
        assert!(workflow.banner().is_none());
    }

    #[test]
    fn a_valid_submit_in_edit_mode_targets_the_bound_id() {
        let mut workflow = DirectoryWorkflow::default();
        workflow.open_edit(&sample_user(7, "Ana", "a@b.c", "123"));

        let SubmitOutcome::Proceed { mode, .. } = workflow.submit() else {
            panic!("expected proceed");
        };
        assert_eq!(mode, SaveMode::Update(UserId(7)));
    }

    #[test]
    fn a_second_submit_while_one_is_in_flight_is_dropped() {
        let mut workflow = DirectoryWorkflow::default();
        workflow.open_create();
        fill_valid_form(&mut workflow);

        assert!(matches!(workflow.submit(), SubmitOutcome::Proceed { .. }));
        assert_eq!(workflow.submit(), SubmitOutcome::Busy);
    }

    #[test]
    fn save_completion_closes_the_modal_and_discards_the_buffer() {
        let mut workflow = DirectoryWorkflow::default();
        workflow.open_create();
        fill_valid_form(&mut workflow);
        assert!(matches!(workflow.submit(), SubmitOutcome::Proceed { .. }));

        workflow.apply(UiEvent::SaveCompleted);
        assert!(workflow.modal().is_none());
        assert!(!workflow.is_submitting());
    }

    #[test]
    fn a_duplicate_email_failure_lands_on_the_email_field_only() {
        let mut workflow = DirectoryWorkflow::default();
        workflow.open_create();
        fill_valid_form(&mut workflow);
        assert!(matches!(workflow.submit(), SubmitOutcome::Proceed { .. }));

        workflow.apply(UiEvent::SaveFailed {
            mode: SaveMode::Create,
            message: "El correo electrónico ya está en uso".to_string(),
        });

        assert!(workflow.banner().is_none());
        assert!(!workflow.is_submitting());
        let modal = workflow.modal().expect("modal stays open for retry");
        assert_eq!(
            modal.field_errors.email.as_deref(),
            Some("This email address is already in use")
        );
        assert!(modal.field_errors.full_name.is_none());
        assert!(modal.field_errors.phone.is_none());
    }

    #[test]
    fn any_other_save_failure_becomes_a_banner_and_reenables_the_form() {
        let mut workflow = DirectoryWorkflow::default();
        workflow.open_edit(&sample_user(7, "Ana", "a@b.c", "123"));
        assert!(matches!(workflow.submit(), SubmitOutcome::Proceed { .. }));

        workflow.apply(UiEvent::SaveFailed {
            mode: SaveMode::Update(UserId(7)),
            message: "server returned status 500 Internal Server Error".to_string(),
        });

        assert_eq!(
            workflow.banner(),
            Some("Failed to update user: server returned status 500 Internal Server Error")
        );
        assert!(!workflow.is_submitting());
        let modal = workflow.modal().expect("modal stays open for retry");
        assert!(modal.field_errors.is_empty());
    }

    #[test]
    fn editing_a_field_clears_only_that_fields_error() {
        let mut workflow = DirectoryWorkflow::default();
        workflow.open_create();
        assert_eq!(workflow.submit(), SubmitOutcome::Rejected);

        workflow.edit_field(Field::Email, "a".to_string());

        let errors = &workflow.modal().expect("modal").field_errors;
        assert!(errors.email.is_none());
        assert!(errors.full_name.is_some());
        assert!(errors.phone.is_some());
    }

    #[test]
    fn declining_the_delete_confirmation_changes_nothing() {
        let mut workflow = workflow_with_users(vec![sample_user(7, "Ana", "a@b.c", "123")]);

        workflow.request_delete(UserId(7));
        assert_eq!(workflow.pending_delete(), Some(UserId(7)));

        workflow.decline_delete();
        assert_eq!(workflow.pending_delete(), None);
        assert_eq!(workflow.confirm_delete(), None);
        assert_eq!(workflow.users().len(), 1);
        assert!(workflow.banner().is_none());
    }

    #[test]
    fn confirming_the_delete_hands_back_the_target_exactly_once() {
        let mut workflow = DirectoryWorkflow::default();
        workflow.request_delete(UserId(7));

        assert_eq!(workflow.confirm_delete(), Some(UserId(7)));
        assert_eq!(workflow.confirm_delete(), None);
    }

    #[test]
    fn a_delete_failure_banners_without_touching_the_list() {
        let mut workflow = workflow_with_users(vec![sample_user(7, "Ana", "a@b.c", "123")]);

        workflow.apply(UiEvent::DeleteFailed("server returned status 404 Not Found".to_string()));

        assert_eq!(
            workflow.banner(),
            Some("Failed to delete user: server returned status 404 Not Found")
        );
        assert_eq!(workflow.users().len(), 1);
    }

    #[test]
    fn the_banner_can_be_dismissed() {
        let mut workflow = DirectoryWorkflow::default();
        workflow.apply(UiEvent::DeleteFailed("boom".to_string()));
        workflow.dismiss_banner();
        assert!(workflow.banner().is_none());
    }
}
