//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Compose, organise and send HTTP requests.
#[derive(Debug, Parser)]
#[command(name = "courier", version, about)]
pub struct Cli {
    /// Directory holding directories.json and requests.json.
    #[arg(long, global = true, value_name = "PATH")]
    pub storage_dir: Option<PathBuf>,

    /// Settings file to use instead of the platform default.
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the folder tree.
    Tree,

    /// Manage folders.
    #[command(subcommand)]
    Folder(FolderCommand),

    /// Manage saved requests.
    #[command(subcommand)]
    Request(RequestCommand),

    /// Save a pasted cURL command as a request.
    Import {
        /// Folder to import into. Defaults to the first folder.
        #[arg(long, value_name = "ID")]
        folder: Option<String>,

        /// The command. Read from stdin when omitted.
        command: Option<String>,
    },

    /// Print the storage directory, creating it if needed.
    StoragePath,
}

#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// Create a folder.
    Create {
        /// Folder name.
        name: String,
        /// Parent folder id.
        #[arg(long, value_name = "ID")]
        parent: Option<String>,
    },
    /// Rename a folder.
    Rename {
        /// Folder id.
        id: String,
        /// New name.
        name: String,
    },
    /// Delete a folder and its sub-folders.
    Delete {
        /// Folder id.
        id: String,
        /// Also delete the requests inside.
        #[arg(long)]
        purge: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum RequestCommand {
    /// Create a request.
    Create(CreateRequest),
    /// Rename a request.
    Rename {
        /// Request id.
        id: String,
        /// New name.
        name: String,
    },
    /// Delete a request.
    Delete {
        /// Request id.
        id: String,
    },
    /// Duplicate a request.
    Copy {
        /// Request id.
        id: String,
    },
    /// Print a request as JSON.
    Show {
        /// Request id.
        id: String,
    },
    /// Send a saved request and print the response.
    Send {
        /// Request id.
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct CreateRequest {
    /// Request name.
    pub name: String,
    /// Folder id.
    #[arg(long, value_name = "ID")]
    pub folder: Option<String>,
    /// HTTP method.
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: String,
    /// Request URL.
    #[arg(long, default_value = "")]
    pub url: String,
    /// Header as "Key: Value". Repeatable.
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,
    /// Request body.
    #[arg(short = 'd', long)]
    pub body: Option<String>,
}
