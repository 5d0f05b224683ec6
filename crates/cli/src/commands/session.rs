//! Kite login.

use anyhow::Result;
use clap::Args;
use nifty_options_core::AppConfig;
use nifty_options_kite::KiteClient;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// `request_token` from the Kite login redirect
    pub request_token: String,
}

/// Exchanges the request token and prints the session. Store the printed
/// access token as `NIFTY_BROKER__ACCESS_TOKEN` for later commands.
pub async fn run_login(config: &AppConfig, args: &LoginArgs) -> Result<()> {
    let client = KiteClient::from_broker_config(&config.broker)?;
    let session = client.login(&args.request_token).await?;
    super::print_json(&session)
}
