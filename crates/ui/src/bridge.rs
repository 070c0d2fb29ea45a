//! UI Bridge Module
//!
//! Defines the messages exchanged between a rendered panel and its
//! [`PanelSession`](crate::PanelSession). Both directions serialize as
//! `{"command": ..., "data": ...}` objects so a web view can post them as is.

use courier_domain::{
    Headers, HttpResponse, Id, QueryParam, RequestDraft, RequestErrorKind, SaveStatus,
};
use serde::{Deserialize, Serialize};

/// Commands sent from the panel to its session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "data", rename_all = "camelCase")]
pub enum PanelCommand {
    /// User clicked Send.
    SendRequest,

    /// User clicked Cancel.
    CancelRequest,

    /// Open a saved request in the form.
    LoadRequest {
        /// Request to open.
        id: Id,
    },

    /// Ask for the current form contents.
    GetRequestData,

    /// User clicked Save.
    SaveRequest,

    /// Write a pending auto-save now.
    AutoSaveRequest,

    /// Method selector changed.
    SetMethod(String),

    /// URL field changed.
    SetUrl(String),

    /// Header rows changed.
    SetHeaders(Headers),

    /// Body editor changed.
    SetBody(String),

    /// Parameter rows changed.
    SetParams(Vec<QueryParam>),

    /// The panel was closed.
    Dispose,
}

impl PanelCommand {
    /// Returns true for commands that edit the form.
    #[must_use]
    pub const fn is_edit(&self) -> bool {
        matches!(
            self,
            Self::SetMethod(_)
                | Self::SetUrl(_)
                | Self::SetHeaders(_)
                | Self::SetBody(_)
                | Self::SetParams(_)
        )
    }
}

/// Updates sent from the session to the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "data", rename_all = "camelCase")]
pub enum PanelUpdate {
    /// A send was issued.
    RequestStarted {
        /// Ticket of the send.
        ticket: u64,
    },

    /// The server answered.
    ResponseReceived(Box<HttpResponse>),

    /// The send failed or was cancelled.
    RequestError {
        /// Failure category.
        kind: RequestErrorKind,
        /// Short heading for the error view.
        title: String,
        /// Message for the user.
        message: String,
    },

    /// Replace the form contents.
    UpdateFormData(RequestDraft),

    /// Auto-save progress.
    UpdateSaveStatus(SaveStatus),

    /// Clear the response view.
    ResetResponseView,

    /// Parameters re-derived from the URL.
    ParamsSynced(Vec<QueryParam>),

    /// URL rewritten from the parameter rows.
    UrlSynced(String),

    /// An action failed and the user should be told.
    ShowError {
        /// Message for the user.
        message: String,
    },
}

impl PanelUpdate {
    /// Builds a `RequestError` update.
    #[must_use]
    pub fn request_error(kind: RequestErrorKind, message: impl Into<String>) -> Self {
        Self::RequestError {
            kind,
            title: kind.title().to_string(),
            message: message.into(),
        }
    }
}
