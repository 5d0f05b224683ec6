//! HTTP API server.

use anyhow::Result;
use clap::Args;
use nifty_options_core::AppConfig;
use nifty_options_web_api::ApiServer;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Listen address, overrides `server.host`/`server.port`
    #[arg(short, long)]
    pub addr: Option<String>,

    /// Route orders to the paper broker
    #[arg(long)]
    pub paper: bool,
}

pub async fn run_serve(config: AppConfig, args: ServeArgs) -> Result<()> {
    let addr = args.addr.unwrap_or_else(|| config.server.addr());
    let (kite, service) = super::build_service(config, args.paper)?;
    if !kite.is_authenticated() {
        tracing::warn!("No access token configured; POST /api/login before trading");
    }

    ApiServer::new(service).with_login(kite).serve(&addr).await
}
