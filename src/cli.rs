use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "regbot")]
#[command(author, version, about = "Telegram bot for self-service user and admin registration", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot and the liveness listener (default)
    Run {
        /// Override the liveness listener port (PORT env var otherwise)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Create or upgrade the database schema, then exit
    Migrate,

    /// Print every registered user
    ListUsers {
        /// Print as JSON instead of plain lines
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
