//! CLI command definitions

use clap::{Parser, Subcommand};
use roomgate::auth::DEFAULT_TTL;

#[derive(Parser)]
#[command(name = "roomgate")]
#[command(about = "Issues signed room-join tokens", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API key identifier (embedded as token issuer)
    #[arg(long, env = "LK_API_KEY", global = true)]
    pub api_key: Option<String>,

    /// API secret used to sign tokens
    #[arg(long, env = "LK_API_SECRET", global = true, hide_env_values = true)]
    pub api_secret: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the token issuance server
    Serve {
        /// Address to bind to
        #[arg(short, long, default_value = "0.0.0.0:8080")]
        bind: String,

        /// Token validity in seconds
        #[arg(long, default_value_t = DEFAULT_TTL.as_secs())]
        ttl: u64,
    },

    /// Mint a single token and print it
    ///
    /// Examples:
    ///   roomgate mint my-room --identity alice
    ///   roomgate mint my-room --ttl 600
    Mint {
        /// Room the token grants access to
        #[arg(required = true)]
        room: String,

        /// Participant identity (random UUID if omitted)
        #[arg(long)]
        identity: Option<String>,

        /// Token validity in seconds
        #[arg(long, default_value_t = DEFAULT_TTL.as_secs())]
        ttl: u64,
    },
}
