//! Per-panel event loop.
//!
//! A session owns the form, the request controller and the auto-saver of one
//! panel. It reacts to [`PanelCommand`]s, in-flight call outcomes and its two
//! debounce timers from a single `select!` loop, and reports back through
//! [`PanelUpdate`]s.

use std::sync::Arc;

use courier_application::execution::CANCELLED_MESSAGE;
use courier_application::{
    AutoSaver, FormState, HttpClient, LoadRequest, RequestController, SaveRequest,
    SaveRequestInput, SendOutcome, SharedLibrary,
};
use courier_domain::{CourierSettings, Id, RequestDraft, RequestErrorKind, SaveStatus};
use tokio::sync::mpsc;

use crate::bridge::{PanelCommand, PanelUpdate};

/// State and collaborators of one open panel.
pub struct PanelSession<C> {
    controller: RequestController<C>,
    form: FormState,
    autosaver: AutoSaver,
    save: SaveRequest,
    load: LoadRequest,
    folder_id: Option<Id>,
    updates: mpsc::UnboundedSender<PanelUpdate>,
}

impl<C: HttpClient + 'static> PanelSession<C> {
    /// Creates a session with an empty form.
    #[must_use]
    pub fn new(
        library: SharedLibrary,
        client: Arc<C>,
        settings: &CourierSettings,
        updates: mpsc::UnboundedSender<PanelUpdate>,
    ) -> Self {
        Self {
            controller: RequestController::new(client),
            form: FormState::new(settings.param_sync_debounce()),
            autosaver: AutoSaver::new(Arc::clone(&library), settings.autosave_debounce()),
            save: SaveRequest::new(Arc::clone(&library)),
            load: LoadRequest::new(library),
            folder_id: None,
            updates,
        }
    }

    /// Sets the folder new requests from this panel are saved into.
    #[must_use]
    pub fn in_folder(mut self, folder_id: Option<Id>) -> Self {
        self.folder_id = folder_id;
        self
    }

    /// Runs until `Dispose` arrives or the command channel closes.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<PanelCommand>) {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    None | Some(PanelCommand::Dispose) => break,
                    Some(command) => self.handle(command),
                },
                outcome = self.controller.next_outcome() => self.deliver(outcome),
                () = self.autosaver.due() => self.auto_save(),
                () = self.form.param_sync_due() => {
                    let params = self.form.sync_params_from_url().to_vec();
                    self.emit(PanelUpdate::ParamsSynced(params));
                }
            }
        }
        self.dispose();
    }

    /// Applies one command.
    pub fn handle(&mut self, command: PanelCommand) {
        match command {
            PanelCommand::SendRequest => {
                let ticket = self.controller.send(self.form.draft());
                self.emit(PanelUpdate::RequestStarted { ticket });
            }
            PanelCommand::CancelRequest => {
                self.controller.cancel();
            }
            PanelCommand::LoadRequest { id } => match self.load.execute(&id) {
                Ok(draft) => self.show(draft),
                Err(error) => self.emit(PanelUpdate::ShowError {
                    message: error.to_string(),
                }),
            },
            PanelCommand::GetRequestData => {
                self.emit(PanelUpdate::UpdateFormData(self.form.draft().clone()));
            }
            PanelCommand::SaveRequest => self.save(),
            PanelCommand::AutoSaveRequest => {
                if self.form.draft().is_persisted() {
                    self.auto_save();
                }
            }
            PanelCommand::SetMethod(method) => {
                self.form.set_method(method);
                self.edited();
            }
            PanelCommand::SetUrl(url) => {
                self.form.set_url(url);
                self.edited();
            }
            PanelCommand::SetHeaders(headers) => {
                self.form.set_headers(headers);
                self.edited();
            }
            PanelCommand::SetBody(body) => {
                self.form.set_body(body);
                self.edited();
            }
            PanelCommand::SetParams(params) => {
                self.form.set_params(params);
                self.emit(PanelUpdate::UrlSynced(self.form.draft().url.clone()));
                self.edited();
            }
            PanelCommand::Dispose => self.dispose(),
        }
    }

    /// Current form contents.
    #[must_use]
    pub const fn draft(&self) -> &RequestDraft {
        self.form.draft()
    }

    /// Folder new saves go into.
    #[must_use]
    pub fn folder_id(&self) -> Option<&str> {
        self.folder_id.as_deref()
    }

    /// Cancels any outstanding call and drops a pending auto-save.
    pub fn dispose(&mut self) {
        self.controller.dispose();
        self.autosaver.cancel();
        tracing::debug!("panel session disposed");
    }

    fn edited(&mut self) {
        self.autosaver.note_edit(self.form.draft());
    }

    fn show(&mut self, draft: RequestDraft) {
        self.autosaver.cancel();
        self.folder_id.clone_from(&draft.folder_id);
        self.form.load(draft);
        self.emit(PanelUpdate::UpdateFormData(self.form.draft().clone()));
        self.emit(PanelUpdate::ResetResponseView);
    }

    fn save(&mut self) {
        self.autosaver.cancel();
        let input = SaveRequestInput {
            draft: self.form.draft().clone(),
            panel_folder_id: self.folder_id.clone(),
        };
        match self.save.execute(input) {
            Ok(output) => self.show(RequestDraft::from(&output.request)),
            Err(error) => {
                tracing::warn!(%error, "save failed");
                self.emit(PanelUpdate::ShowError {
                    message: error.to_string(),
                });
            }
        }
    }

    fn auto_save(&mut self) {
        self.autosaver.cancel();
        self.emit(PanelUpdate::UpdateSaveStatus(SaveStatus::Saving));
        let status = self.autosaver.save(self.form.draft());
        self.emit(PanelUpdate::UpdateSaveStatus(status));
    }

    fn deliver(&self, outcome: SendOutcome) {
        let update = match outcome {
            SendOutcome::Completed { response, .. } => PanelUpdate::ResponseReceived(response),
            SendOutcome::Failed { kind, message, .. } => PanelUpdate::request_error(kind, message),
            SendOutcome::Cancelled { .. } => {
                PanelUpdate::request_error(RequestErrorKind::Cancelled, CANCELLED_MESSAGE)
            }
        };
        self.emit(update);
    }

    fn emit(&self, update: PanelUpdate) {
        if self.updates.send(update).is_err() {
            tracing::debug!("panel gone, dropping update");
        }
    }
}
