use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::Value;
use spacebridge_client::SpaceClient;
use spacebridge_config::ClientConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "spacebridge",
    about = "spacebridge — collaboration API client (spaces, conversations, app messages)"
)]
struct Cli {
    /// Path to a YAML configuration file. `SPACEBRIDGE_*` variables override it.
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the spaces visible to the app (first 50).
    Spaces,
    /// Print the conversation id of a space.
    Conversation {
        /// Space id.
        space_id: String,
    },
    /// Show a space with its members and recent messages.
    Members {
        /// Space id.
        space_id: String,
    },
    /// Show a conversation and its first 50 messages.
    History {
        /// Conversation id.
        conversation_id: String,
    },
    /// Post an app message into a space.
    Send {
        /// Space id.
        space_id: String,
        /// Message text (markdown).
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::load(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("config error: {e}"))?;
    let client = SpaceClient::connect(config)
        .await
        .map_err(|e| anyhow::anyhow!("failed to initialize client: {e}"))?;

    let output = match cli.command {
        Commands::Spaces => serde_json::to_value(client.list_spaces().await?)?,
        Commands::Conversation { space_id } => {
            Value::String(client.get_conversation_by_space(&space_id).await?)
        }
        Commands::Members { space_id } => {
            serde_json::to_value(client.get_members_in_space(&space_id).await?)?
        }
        Commands::History { conversation_id } => {
            serde_json::to_value(client.get_conversation_by_id(&conversation_id).await?)?
        }
        Commands::Send { space_id, text } => client.send_message(&space_id, &text).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
