//! Subcommand handlers.

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context as _, bail};
use courier_application::{ImportCommand, ImportCommandInput, ImportTarget, SharedLibrary};
use courier_domain::{
    CourierSettings, HeaderEntry, Headers, RequestPatch, SavedRequest, TreeNodeKind,
};
use courier_infrastructure::{CurlParser, ReqwestHttpClient, StorageDir};
use courier_ui::{PanelCommand, PanelRegistry, PanelUpdate};

use crate::cli::{Command, CreateRequest, FolderCommand, RequestCommand};

/// Everything a handler may touch.
pub struct Context {
    pub library: SharedLibrary,
    pub settings: CourierSettings,
    pub storage: StorageDir,
}

pub async fn run(command: Command, ctx: &Context) -> anyhow::Result<()> {
    match command {
        Command::Tree => {
            print_tree(ctx);
            Ok(())
        }
        Command::Folder(command) => folder(command, ctx),
        Command::Request(command) => request(command, ctx).await,
        Command::Import { folder, command } => import(folder, command, ctx),
        Command::StoragePath => {
            let path = ctx.storage.ensure()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn print_tree(ctx: &Context) {
    let library = ctx.library.lock();
    let nodes = library.tree().walk();
    if nodes.is_empty() {
        println!("(no folders)");
    }
    for (depth, node) in nodes {
        let indent = "  ".repeat(depth);
        match &node.kind {
            TreeNodeKind::Folder { .. } => println!("{indent}{}/  [{}]", node.label, node.id),
            TreeNodeKind::Request { badge, .. } => {
                println!("{indent}{:<7} {}  [{}]", badge.label, node.label, node.id);
            }
        }
    }
}

fn folder(command: FolderCommand, ctx: &Context) -> anyhow::Result<()> {
    let mut library = ctx.library.lock();
    match command {
        FolderCommand::Create { name, parent } => {
            if let Some(parent) = parent.as_deref()
                && !library.folders().contains(parent)
            {
                bail!("folder not found: {parent}");
            }
            let folder = library.create_folder(name, parent)?;
            println!("{}", folder.id);
        }
        FolderCommand::Rename { id, name } => {
            let folder = library.rename_folder(&id, name)?;
            println!("renamed {} to {}", folder.id, folder.name);
        }
        FolderCommand::Delete { id, purge } => {
            if !library.delete_folder(&id, purge)? {
                bail!("folder not found: {id}");
            }
            println!("deleted {id}");
        }
    }
    Ok(())
}

async fn request(command: RequestCommand, ctx: &Context) -> anyhow::Result<()> {
    let mut library = ctx.library.lock();
    match command {
        RequestCommand::Send { id } => {
            // The panel session locks the library itself.
            drop(library);
            return send(id, ctx).await;
        }
        RequestCommand::Create(create) => {
            let patch = create_patch(create)?;
            if let Some(folder) = patch.folder_id.as_ref().and_then(Option::as_deref)
                && !library.folders().contains(folder)
            {
                bail!("folder not found: {folder}");
            }
            let request = library.create_request(patch)?;
            println!("{}", request.id);
        }
        RequestCommand::Rename { id, name } => {
            let request = library.rename_request(&id, name)?;
            println!("renamed {} to {}", request.id, request.name);
        }
        RequestCommand::Delete { id } => {
            if !library.delete_request(&id)? {
                bail!("request not found: {id}");
            }
            println!("deleted {id}");
        }
        RequestCommand::Copy { id } => {
            let copy = library.copy_request(&id)?;
            println!("{}", copy.id);
        }
        RequestCommand::Show { id } => {
            let request = library
                .requests()
                .get(&id)
                .with_context(|| format!("request not found: {id}"))?;
            println!("{}", serde_json::to_string_pretty(request)?);
        }
    }
    Ok(())
}

fn create_patch(create: CreateRequest) -> anyhow::Result<RequestPatch> {
    let headers = create
        .headers
        .iter()
        .map(|raw| {
            let (key, value) = raw
                .split_once(':')
                .with_context(|| format!("header must look like \"Key: Value\": {raw}"))?;
            Ok(HeaderEntry::new(key.trim(), value.trim()))
        })
        .collect::<anyhow::Result<Headers>>()?;

    let mut patch = RequestPatch::new()
        .with_name(create.name)
        .with_method(create.method.to_uppercase())
        .with_url(create.url)
        .with_headers(headers)
        .with_body(create.body);
    if let Some(folder) = create.folder {
        patch = patch.in_folder(folder);
    }
    Ok(patch)
}

fn import(folder: Option<String>, command: Option<String>, ctx: &Context) -> anyhow::Result<()> {
    let command = match command {
        Some(command) if command != "-" => command,
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read command from stdin")?;
            buffer
        }
    };
    let target = folder.map_or(ImportTarget::FirstFolder, ImportTarget::Folder);

    let import = ImportCommand::new(Arc::new(CurlParser::new()), Arc::clone(&ctx.library));
    let output = import.execute(ImportCommandInput { command, target })?;
    print_summary(&output.request);
    Ok(())
}

fn print_summary(request: &SavedRequest) {
    println!("{}  {} {}  [{}]", request.name, request.method, request.url, request.id);
}

async fn send(id: String, ctx: &Context) -> anyhow::Result<()> {
    let client = ReqwestHttpClient::new(&ctx.settings)?;
    let mut registry =
        PanelRegistry::new(Arc::clone(&ctx.library), Arc::new(client), ctx.settings.clone());

    let (panel, opened) = registry.create_or_show(Some(id));
    let mut updates = opened.context("panel did not open")?.updates;
    if let Some(handle) = registry.get(panel) {
        handle.send(PanelCommand::SendRequest);
    }

    let result = loop {
        let Some(update) = updates.recv().await else {
            break Err(anyhow::anyhow!("panel closed unexpectedly"));
        };
        match update {
            PanelUpdate::ShowError { message } => break Err(anyhow::anyhow!(message)),
            PanelUpdate::RequestStarted { ticket } => tracing::debug!(ticket, "request started"),
            PanelUpdate::ResponseReceived(response) => {
                println!("{}  ({} ms)", response.status_code(), response.duration.as_millis());
                for (name, value) in &response.headers {
                    println!("{name}: {value}");
                }
                println!();
                println!("{}", response.body.to_display_string());
                break Ok(());
            }
            PanelUpdate::RequestError { title, message, .. } => {
                break Err(anyhow::anyhow!("{title}: {message}"));
            }
            _ => {}
        }
    };

    if let Some(handle) = registry.close(panel) {
        handle.join().await;
    }
    result
}
