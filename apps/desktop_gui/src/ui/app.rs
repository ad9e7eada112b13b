//! Application shell: user table, modal form, error banner, delete dialog.

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{UserId, UserRecord};
use shared::validation::Field;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{DirectoryWorkflow, ListView, SubmitOutcome};

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    workflow: DirectoryWorkflow,
    status: String,
    requested_initial_load: bool,
}

impl DesktopGuiApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            workflow: DirectoryWorkflow::default(),
            status: "Starting backend worker...".to_string(),
            requested_initial_load: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                other => self.workflow.apply(other),
            }
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn header_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("User directory");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let loading = self.workflow.is_list_loading();
                let label = if loading { "Loading..." } else { "Add user" };
                if ui
                    .add_enabled(!loading, egui::Button::new(label))
                    .clicked()
                {
                    self.workflow.open_create();
                }
            });
        });
    }

    fn banner_area(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.workflow.banner().map(str::to_string) else {
            return;
        };
        ui.horizontal(|ui| {
            ui.colored_label(ui.visuals().error_fg_color, banner);
            if ui.small_button("×").clicked() {
                self.workflow.dismiss_banner();
            }
        });
        ui.separator();
    }

    fn list_area(&mut self, ui: &mut egui::Ui) {
        let loading = self.workflow.is_list_loading();
        let mut pending_edit: Option<UserRecord> = None;
        let mut pending_delete: Option<UserId> = None;

        match self.workflow.list_view() {
            ListView::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading users...");
                });
            }
            ListView::Empty => {
                ui.label("No users registered yet. Add the first one!");
            }
            ListView::Rows(users) => {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    egui::Grid::new("users_table")
                        .striped(true)
                        .num_columns(4)
                        .spacing([24.0, 6.0])
                        .show(ui, |ui| {
                            ui.strong("Full name");
                            ui.strong("Email");
                            ui.strong("Phone");
                            ui.strong("Actions");
                            ui.end_row();

                            for user in users {
                                ui.label(&user.full_name);
                                ui.label(&user.email);
                                ui.label(&user.phone);
                                ui.horizontal(|ui| {
                                    if ui
                                        .add_enabled(!loading, egui::Button::new("Edit"))
                                        .clicked()
                                    {
                                        pending_edit = Some(user.clone());
                                    }
                                    if ui
                                        .add_enabled(!loading, egui::Button::new("Delete"))
                                        .clicked()
                                    {
                                        pending_delete = Some(user.id);
                                    }
                                });
                                ui.end_row();
                            }
                        });
                });
            }
        }

        if let Some(user) = pending_edit {
            self.workflow.open_edit(&user);
        }
        if let Some(id) = pending_delete {
            self.workflow.request_delete(id);
        }
    }

    fn modal_window(&mut self, ctx: &egui::Context) {
        let Some(modal) = self.workflow.modal() else {
            return;
        };
        let editing = modal.editing.is_some();
        let title = if editing { "Edit user" } else { "Add user" };
        let submitting = self.workflow.is_submitting();
        let form = modal.form.clone();
        let errors = modal.field_errors.clone();

        let mut field_edits: Vec<(Field, String)> = Vec::new();
        let mut save_clicked = false;
        let mut cancel_clicked = false;

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                form_field(
                    ui,
                    "Full name",
                    &form.full_name,
                    errors.get(Field::FullName),
                    Field::FullName,
                    &mut field_edits,
                );
                form_field(
                    ui,
                    "Email",
                    &form.email,
                    errors.get(Field::Email),
                    Field::Email,
                    &mut field_edits,
                );
                form_field(
                    ui,
                    "Phone",
                    &form.phone,
                    errors.get(Field::Phone),
                    Field::Phone,
                    &mut field_edits,
                );

                ui.separator();
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(!submitting, egui::Button::new("Cancel"))
                        .clicked()
                    {
                        cancel_clicked = true;
                    }
                    let save_label = if submitting {
                        "Saving..."
                    } else if editing {
                        "Update"
                    } else {
                        "Save"
                    };
                    if ui
                        .add_enabled(!submitting, egui::Button::new(save_label))
                        .clicked()
                    {
                        save_clicked = true;
                    }
                });
            });

        for (field, value) in field_edits {
            self.workflow.edit_field(field, value);
        }
        if cancel_clicked {
            self.workflow.close_modal();
        }
        if save_clicked {
            if let SubmitOutcome::Proceed { mode, draft } = self.workflow.submit() {
                self.dispatch(BackendCommand::SaveUser { mode, draft });
            }
        }
    }

    fn delete_confirm_window(&mut self, ctx: &egui::Context) {
        let Some(target) = self.workflow.pending_delete() else {
            return;
        };
        let mut confirmed = false;
        let mut declined = false;

        egui::Window::new("Delete user?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Are you sure you want to delete user #{}?",
                    target.0
                ));
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        declined = true;
                    }
                    if ui.button("Delete").clicked() {
                        confirmed = true;
                    }
                });
            });

        if declined {
            self.workflow.decline_delete();
        }
        if confirmed {
            if let Some(id) = self.workflow.confirm_delete() {
                self.dispatch(BackendCommand::DeleteUser { id });
            }
        }
    }
}

fn form_field(
    ui: &mut egui::Ui,
    label: &str,
    value: &str,
    error: Option<&str>,
    field: Field,
    edits: &mut Vec<(Field, String)>,
) {
    ui.label(label);
    let mut buffer = value.to_string();
    if ui.text_edit_singleline(&mut buffer).changed() {
        edits.push((field, buffer.clone()));
    }
    if let Some(message) = error {
        ui.colored_label(ui.visuals().error_fg_color, message);
    }
    ui.add_space(4.0);
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.requested_initial_load {
            self.requested_initial_load = true;
            self.dispatch(BackendCommand::LoadUsers);
        }
        self.process_ui_events();

        egui::TopBottomPanel::top("header").show(ctx, |ui| self.header_bar(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(&self.status);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.banner_area(ui);
            self.list_area(ui);
        });

        self.modal_window(ctx);
        self.delete_confirm_window(ctx);

        // Worker events arrive between frames; keep polling at a low rate so
        // results show up without user input.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
