use std::error::Error;

use crate::cli::commands::{Cli, Commands};
use crate::cli::output::{format_items, items_to_json};
use crate::io::config_io::parse_base_url;
use crate::io::http::TodoClient;
use crate::model::{Config, Request, TodoItem};
use crate::ops::sync::ListSync;

/// Run a one-shot subcommand and print the resulting list
pub fn dispatch(cli: Cli, config: &Config) -> Result<(), Box<dyn Error>> {
    let base = parse_base_url(&config.server.base_url)?;
    let client = TodoClient::new(base, config.server.update_body)?;

    // No subcommand launches the TUI in main; treat it as `list` here
    let command = cli.command.unwrap_or(Commands::List);
    let items = run_command(command, &client)?;

    if cli.json {
        println!("{}", items_to_json(&items)?);
    } else {
        println!("{}", format_items(&items));
    }
    Ok(())
}

/// Drive one command through a fresh [`ListSync`] and return the list as
/// the server reports it afterwards
pub fn run_command(command: Commands, client: &TodoClient) -> Result<Vec<TodoItem>, Box<dyn Error>> {
    let mut sync = ListSync::new();
    let first = match command {
        Commands::List => sync.load(),
        Commands::Add(args) => {
            sync.set_draft(args.text);
            sync.create()?
        }
        Commands::Edit(args) => {
            sync.begin_edit(args.id, args.text);
            sync.update()?
        }
        Commands::Rm(args) => sync.delete(args.id),
    };
    drive(&mut sync, client, first)?;
    Ok(sync.items().to_vec())
}

/// Execute `request` and every follow-up it produces, in order
fn drive(sync: &mut ListSync, client: &TodoClient, request: Request) -> Result<(), Box<dyn Error>> {
    let mut next = Some(request);
    while let Some(request) = next.take() {
        next = sync.complete(client.execute(request));
        if let Some(err) = sync.stalled() {
            return Err(err.into());
        }
    }
    Ok(())
}
