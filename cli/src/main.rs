//! Command-line front end for the todo service.
//!
//! Each subcommand plays one user action against a `TodoSync` and prints
//! the resulting list.

mod transport;

use clap::{Parser, Subcommand};
use todo_core::{TodoClient, TodoForm, TodoSync};
use tracing_subscriber::EnvFilter;

use crate::transport::Transport;

#[derive(Parser)]
#[command(name = "todo", about = "Manage the todo list over its REST API")]
struct Cli {
    /// Server root URL.
    #[arg(long, env = "TODO_BASE_URL", default_value = "http://localhost:8080")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show every todo.
    List,
    /// Add a todo.
    Add { title: String },
    /// Change a todo's title and/or completed flag.
    Update {
        id: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long)]
        completed: bool,
    },
    /// Remove a todo.
    Delete { id: String },
}

fn load(sync: &mut TodoSync, transport: &Transport) -> anyhow::Result<()> {
    let ticket = sync.begin_load();
    let response = transport.execute(ticket.request)?;
    sync.finish_load(ticket.generation, response)?;
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let transport = Transport::new();
    let mut sync = TodoSync::new(TodoClient::new(&cli.base_url));

    match cli.command {
        Command::List => load(&mut sync, &transport)?,
        Command::Add { title } => {
            load(&mut sync, &transport)?;
            let form = TodoForm {
                title,
                ..TodoForm::default()
            };
            let request = sync.begin_create(&form)?;
            sync.finish_create(transport.execute(request)?)?;
        }
        Command::Update {
            id,
            title,
            completed,
        } => {
            load(&mut sync, &transport)?;
            let form = TodoForm {
                title,
                completed,
                item_id: id,
            };
            match sync.begin_update(&form)? {
                Some(request) => sync.finish_update(transport.execute(request)?)?,
                None => anyhow::bail!("a numeric todo id is required"),
            }
        }
        Command::Delete { id } => {
            load(&mut sync, &transport)?;
            let form = TodoForm {
                item_id: id,
                ..TodoForm::default()
            };
            match sync.begin_delete(&form) {
                Some(request) => sync.finish_delete(transport.execute(request)?)?,
                None => anyhow::bail!("a numeric todo id is required"),
            }
        }
    }

    print!("{}", sync.view());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}
