use std::{net::IpAddr, path::PathBuf};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spotproxy::{cli, config, error, server};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Additional .env file to load
    #[clap(long, global = true)]
    env_file: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the proxy server
    Serve(ServeOptions),

    /// Search tracks through the configured credential
    Search(SearchOptions),

    /// Show details of a single track
    Track(TrackOptions),

    /// Request an access token and show when it expires
    Token,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Port to listen on (overrides PORT)
    #[clap(long)]
    port: Option<u16>,

    /// Address to bind (overrides SERVER_HOST)
    #[clap(long)]
    host: Option<IpAddr>,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Search query
    query: String,
}

#[derive(Parser, Debug, Clone)]
pub struct TrackOptions {
    /// Spotify track ID
    id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    // .env files may set RUST_LOG, so they are read before the filter is built
    let sources = config::load_env(cli.env_file.as_deref());
    init_tracing();
    sources.log();

    let mut config = match config::Config::from_env() {
        Ok(c) => c,
        Err(e) => error!("Cannot load configuration. Err: {}", e),
    };

    match cli.command {
        Command::Serve(opt) => {
            if let Some(port) = opt.port {
                config.port = port;
            }
            if let Some(host) = opt.host {
                config.host = host;
            }

            if let Err(e) = server::start_api_server(config).await {
                error!("Server failed. Err: {}", e);
            }
        }
        Command::Search(opt) => cli::search(&config, opt.query).await,
        Command::Track(opt) => cli::track(&config, opt.id).await,
        Command::Token => cli::token(&config).await,
        Command::Completions(_) => {}
    }
}
