//! Integration tests for sending and auto-saving from a panel.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

use courier_application::testing::{MockHttpClient, MockReply, memory_library};
use courier_application::{RequestController, SendOutcome, SharedLibrary};
use courier_domain::{CourierSettings, RequestDraft, RequestPatch, SaveStatus};
use courier_ui::{PanelCommand, PanelSession, PanelUpdate};

fn draft(url: &str) -> RequestDraft {
    RequestDraft {
        method: "GET".into(),
        url: url.into(),
        ..RequestDraft::default()
    }
}

fn start_panel(
    library: &SharedLibrary,
) -> (
    mpsc::UnboundedSender<PanelCommand>,
    mpsc::UnboundedReceiver<PanelUpdate>,
) {
    let (updates_tx, updates) = mpsc::unbounded_channel();
    let (commands, commands_rx) = mpsc::unbounded_channel();
    let session = PanelSession::new(
        Arc::clone(library),
        Arc::new(MockHttpClient::default()),
        &CourierSettings::default(),
        updates_tx,
    );
    tokio::spawn(session.run(commands_rx));
    (commands, updates)
}

fn drain(updates: &mut mpsc::UnboundedReceiver<PanelUpdate>) -> Vec<PanelUpdate> {
    let mut seen = Vec::new();
    while let Ok(update) = updates.try_recv() {
        seen.push(update);
    }
    seen
}

#[tokio::test(start_paused = true)]
async fn test_newer_send_supersedes_older_one() {
    let client = Arc::new(MockHttpClient::new(vec![
        MockReply::status(200, "first").after(Duration::from_secs(1)),
        MockReply::status(201, "second"),
    ]));
    let mut controller = RequestController::new(Arc::clone(&client));

    let first = controller.send(&draft("https://x.test/1"));
    let second = controller.send(&draft("https://x.test/2"));

    assert_eq!(controller.next_outcome().await, SendOutcome::Cancelled { ticket: first });
    let SendOutcome::Completed { ticket, response } = controller.next_outcome().await else {
        panic!("expected the newer send to complete");
    };
    assert_eq!(ticket, second);
    assert_eq!(response.status, 201);

    // The superseded reply never surfaces.
    tokio::time::sleep(Duration::from_secs(2)).await;
    let late = tokio::time::timeout(Duration::from_secs(1), controller.next_outcome()).await;
    assert!(late.is_err());
    assert!(controller.state().is_terminal());
}

#[tokio::test(start_paused = true)]
async fn test_unsaved_request_never_auto_saves() {
    let library = memory_library();
    let (commands, mut updates) = start_panel(&library);

    commands.send(PanelCommand::SetUrl("https://x.test/a".into())).unwrap();
    commands.send(PanelCommand::SetBody("{}".into())).unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;

    let seen = drain(&mut updates);
    assert!(
        !seen
            .iter()
            .any(|update| matches!(update, PanelUpdate::UpdateSaveStatus(_)))
    );
    assert!(library.lock().requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_auto_save_of_deleted_request_reports_error() {
    let library = memory_library();
    let saved = library
        .lock()
        .create_request(RequestPatch::new().with_name("Gone soon"))
        .unwrap();
    let (commands, mut updates) = start_panel(&library);

    commands
        .send(PanelCommand::LoadRequest { id: saved.id.clone() })
        .unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    drain(&mut updates);

    assert!(library.lock().delete_request(&saved.id).unwrap());
    commands.send(PanelCommand::SetBody("{\"a\":1}".into())).unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(
        drain(&mut updates),
        vec![
            PanelUpdate::UpdateSaveStatus(SaveStatus::Saving),
            PanelUpdate::UpdateSaveStatus(SaveStatus::Error(
                "request not found or deleted".into()
            )),
        ]
    );
}
