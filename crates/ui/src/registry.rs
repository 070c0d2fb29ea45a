//! Open panels and which one is active.

use std::sync::Arc;

use courier_application::{HttpClient, SharedLibrary};
use courier_domain::{CourierSettings, Id};
use indexmap::IndexMap;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::bridge::{PanelCommand, PanelUpdate};
use crate::session::PanelSession;

/// Identifier of an open panel.
pub type PanelId = u64;

/// Command side of a running panel session.
#[derive(Debug)]
pub struct PanelHandle {
    id: PanelId,
    commands: mpsc::UnboundedSender<PanelCommand>,
    task: JoinHandle<()>,
}

impl PanelHandle {
    /// Panel id.
    #[must_use]
    pub const fn id(&self) -> PanelId {
        self.id
    }

    /// Forwards a command. Returns false if the session has stopped.
    pub fn send(&self, command: PanelCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Returns true once the session has stopped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    /// Waits for the session task to finish.
    pub async fn join(self) {
        if let Err(error) = self.task.await {
            tracing::error!(panel = self.id, %error, "panel session panicked");
        }
    }
}

/// A freshly opened panel: its id and the updates it will receive.
#[derive(Debug)]
pub struct OpenedPanel {
    /// Panel id.
    pub id: PanelId,
    /// Updates for the renderer.
    pub updates: mpsc::UnboundedReceiver<PanelUpdate>,
}

/// Every open panel of the host.
///
/// The most recently opened or shown panel is active; `create_or_show`
/// reuses it instead of opening another.
pub struct PanelRegistry<C> {
    library: SharedLibrary,
    client: Arc<C>,
    settings: CourierSettings,
    panels: IndexMap<PanelId, PanelHandle>,
    active: Option<PanelId>,
    next_id: PanelId,
}

impl<C: HttpClient + 'static> PanelRegistry<C> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(library: SharedLibrary, client: Arc<C>, settings: CourierSettings) -> Self {
        Self {
            library,
            client,
            settings,
            panels: IndexMap::new(),
            active: None,
            next_id: 1,
        }
    }

    /// Opens a new panel and makes it active.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn open(&mut self, folder_id: Option<Id>) -> OpenedPanel {
        let id = self.next_id;
        self.next_id += 1;

        let (updates_tx, updates) = mpsc::unbounded_channel();
        let (commands, commands_rx) = mpsc::unbounded_channel();
        let session = PanelSession::new(
            Arc::clone(&self.library),
            Arc::clone(&self.client),
            &self.settings,
            updates_tx,
        )
        .in_folder(folder_id);
        let task = tokio::spawn(session.run(commands_rx));

        self.panels.insert(id, PanelHandle { id, commands, task });
        self.active = Some(id);
        tracing::debug!(panel = id, "opened panel");
        OpenedPanel { id, updates }
    }

    /// Shows the active panel, opening one if there is none, and loads
    /// `request_id` into it when given.
    ///
    /// Returns the new panel when one had to be opened.
    pub fn create_or_show(&mut self, request_id: Option<Id>) -> (PanelId, Option<OpenedPanel>) {
        let (id, opened) = match self.active_live() {
            Some(id) => (id, None),
            None => {
                let opened = self.open(None);
                (opened.id, Some(opened))
            }
        };
        if let (Some(request_id), Some(handle)) = (request_id, self.panels.get(&id)) {
            handle.send(PanelCommand::LoadRequest { id: request_id });
        }
        (id, opened)
    }

    /// The active panel.
    #[must_use]
    pub fn active(&self) -> Option<&PanelHandle> {
        self.active.and_then(|id| self.panels.get(&id))
    }

    /// A panel by id.
    #[must_use]
    pub fn get(&self, id: PanelId) -> Option<&PanelHandle> {
        self.panels.get(&id)
    }

    /// Disposes a panel and forgets it. The last remaining panel becomes
    /// active if the closed one was.
    pub fn close(&mut self, id: PanelId) -> Option<PanelHandle> {
        let handle = self.panels.shift_remove(&id)?;
        handle.send(PanelCommand::Dispose);
        if self.active == Some(id) {
            self.active = self.panels.keys().next_back().copied();
        }
        tracing::debug!(panel = id, "closed panel");
        Some(handle)
    }

    /// Number of open panels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Returns true if no panel is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    fn active_live(&mut self) -> Option<PanelId> {
        let id = self.active?;
        if self.panels.get(&id).is_some_and(|handle| !handle.is_closed()) {
            return Some(id);
        }
        self.panels.shift_remove(&id);
        self.active = None;
        None
    }
}
