use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{UserDirectory, UserDirectoryClient};
use shared::domain::{UserDraft, UserId};
use shared::validation::validate_draft;

#[derive(Parser, Debug)]
#[command(about = "Operator CLI for the user directory service")]
struct Args {
    /// Service root, e.g. http://127.0.0.1:8080/sgu-api
    #[arg(long)]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every user in the directory
    List,
    /// Print one user by id
    Get { id: i64 },
    /// Create a user from the three editable fields
    Create {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },
    /// Overwrite the editable fields of an existing user
    Update {
        id: i64,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },
    /// Delete a user by id
    Delete { id: i64 },
}

/// Same pre-submit checks the desktop form runs; an invalid draft never
/// reaches the network.
fn checked_draft(full_name: String, email: String, phone: String) -> Result<UserDraft> {
    let draft = UserDraft {
        full_name,
        email,
        phone,
    };
    let errors = validate_draft(&draft);
    if let Some(message) = errors
        .full_name
        .as_deref()
        .or(errors.email.as_deref())
        .or(errors.phone.as_deref())
    {
        bail!("invalid draft: {message}");
    }
    Ok(draft)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let client = UserDirectoryClient::new(args.server_url);
    match args.command {
        Command::List => {
            let users = client.list_all().await?;
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
        Command::Get { id } => {
            let user = client.get_by_id(UserId(id)).await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Command::Create {
            full_name,
            email,
            phone,
        } => {
            let draft = checked_draft(full_name, email, phone)?;
            let created = client.create(&draft).await?;
            println!("{}", serde_json::to_string_pretty(&created)?);
        }
        Command::Update {
            id,
            full_name,
            email,
            phone,
        } => {
            let draft = checked_draft(full_name, email, phone)?;
            let updated = client.update(UserId(id), &draft).await?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        Command::Delete { id } => {
            client.delete(UserId(id)).await?;
            println!("deleted user {id}");
        }
    }

    Ok(())
}
