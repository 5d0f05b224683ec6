use anyhow::Result;
use clap::{Parser, Subcommand};
use nifty_options_core::{AppConfig, ConfigLoader};

mod commands;

use commands::{
    ChainArgs, ExecuteArgs, ExpiriesArgs, GreeksArgs, LoginArgs, MonitorArgs, ServeArgs,
};

#[derive(Parser, Debug)]
#[command(name = "nifty-options")]
#[command(about = "NIFTY weekly put-selling toolkit on Zerodha Kite", long_about = None)]
struct Cli {
    /// Base config file
    #[arg(short, long, global = true, default_value = "config/Config.toml")]
    config: String,

    /// Profile layered over the base file (`Config.{profile}.toml`)
    #[arg(long, global = true, env = "NIFTY_PROFILE")]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Exchange a Kite request token for an access token
    Login(LoginArgs),
    /// List upcoming weekly expiries
    Expiries(ExpiriesArgs),
    /// Print the options chain for an expiry
    Chain(ChainArgs),
    /// Run the put-selling strategy once
    Execute(ExecuteArgs),
    /// Check open positions against the stop loss
    Monitor(MonitorArgs),
    /// Aggregate P&L over open positions
    Pnl,
    /// Black-Scholes greeks for one option
    Greeks(GreeksArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Greeks(args) => commands::run_greeks(&args),
        command => {
            let config = ConfigLoader::load_from(&cli.config, cli.profile.as_deref())?;
            dispatch(command, config).await
        }
    }
}

async fn dispatch(command: Commands, config: AppConfig) -> Result<()> {
    match command {
        Commands::Serve(args) => commands::run_serve(config, args).await,
        Commands::Login(args) => commands::run_login(&config, &args).await,
        Commands::Expiries(args) => commands::run_expiries(&config, &args),
        Commands::Chain(args) => commands::run_chain(config, &args).await,
        Commands::Execute(args) => commands::run_execute(config, &args).await,
        Commands::Monitor(args) => commands::run_monitor(config, &args).await,
        Commands::Pnl => commands::run_pnl(config).await,
        Commands::Greeks(args) => commands::run_greeks(&args),
    }
}
