use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod chat;
pub mod menu;
pub mod quote;
pub mod serve;

#[derive(Subcommand)]
enum Command {
    /// Run the API server that receives messages from the bridge
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "5000")]
        port: String,
    },
    /// Talk to the assistant from the terminal as a customer would
    Chat {
        #[arg(long, default_value = "terminal")]
        conversation_id: String,
        #[arg(long, default_value = "Cliente")]
        name: String,
    },
    /// Print the full menu
    Menu {},
    /// Quote delivery to a destination
    Quote {
        #[arg(long)]
        destination: String,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

/// Log to stdout using `RUST_LOG` if set, otherwise `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let default_filter = default_filter.to_string();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await?;
        }
        Some(Command::Chat {
            conversation_id,
            name,
        }) => {
            chat::run(&conversation_id, &name).await?;
        }
        Some(Command::Menu {}) => {
            menu::run();
        }
        Some(Command::Quote { destination }) => {
            quote::run(&destination).await?;
        }
        None => {}
    }

    Ok(())
}
