use clap::{Args, Parser, Subcommand};

use crate::model::TodoId;

#[derive(Parser)]
#[command(name = "td", about = concat!("td v", env!("CARGO_PKG_VERSION"), " - a to-do list over HTTP"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Root URL of the todo service (overrides server.base_url)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Read configuration from this file
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every todo
    List,
    /// Add a todo
    Add(AddArgs),
    /// Replace the text of a todo
    Edit(EditArgs),
    /// Delete a todo
    Rm(RmArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Todo text
    pub text: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Todo ID
    pub id: TodoId,
    /// New text
    pub text: String,
}

#[derive(Args)]
pub struct RmArgs {
    /// Todo ID
    pub id: TodoId,
}
