//! Roomgate CLI entry point

mod cli;

use crate::cli::{Cli, Commands};
use anyhow::{Context, Result};
use clap::Parser;
use roomgate::auth::{AccessToken, ApiCredentials, RoomGrant};
use roomgate::server::{run_http_server, AppState};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let credentials = ApiCredentials::new(
        cli.api_key.unwrap_or_default(),
        cli.api_secret.unwrap_or_default(),
    )
    .context("LK_API_KEY and LK_API_SECRET must be set and non-empty")?;

    match cli.command {
        Commands::Serve { bind, ttl } => serve(credentials, bind, ttl).await,
        Commands::Mint { room, identity, ttl } => mint(credentials, room, identity, ttl),
    }
}

async fn serve(credentials: ApiCredentials, bind: String, ttl: u64) -> Result<()> {
    let bind_addr = bind.parse().context("Invalid bind address")?;

    let state = AppState {
        credentials,
        token_ttl: Duration::from_secs(ttl),
    };

    info!("Starting roomgate server...");
    run_http_server(bind_addr, state).await?;

    Ok(())
}

fn mint(
    credentials: ApiCredentials,
    room: String,
    identity: Option<String>,
    ttl: u64,
) -> Result<()> {
    let identity = identity.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let grant = RoomGrant::new(room).context("Invalid room name")?;
    let jwt = AccessToken::with_credentials(credentials)
        .with_identity(identity.clone())
        .with_grant(grant.clone())
        .with_ttl(Duration::from_secs(ttl))
        .to_jwt()
        .context("Token signing failed")?;

    println!("{}", jwt);
    println!();
    println!("Identity: {}", identity);
    println!("Grant: {}", grant);

    Ok(())
}
