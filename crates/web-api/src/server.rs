use crate::handlers::{self, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use nifty_options_core::SessionLogin;
use nifty_options_manager::OptionsService;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub struct ApiServer {
    service: OptionsService,
    login: Option<Arc<dyn SessionLogin>>,
}

impl ApiServer {
    #[must_use]
    pub const fn new(service: OptionsService) -> Self {
        Self { service, login: None }
    }

    /// Enables `POST /api/login` through the given session manager.
    #[must_use]
    pub fn with_login(mut self, login: Arc<dyn SessionLogin>) -> Self {
        self.login = Some(login);
        self
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/api/health", get(handlers::health))
            .route("/api/login", post(handlers::login))
            .route("/api/expiries", get(handlers::expiries))
            .route("/api/options-chain/:expiry", get(handlers::options_chain))
            .route("/api/quote/:symbol", get(handlers::quote))
            .route("/api/orders/place", post(handlers::place_order))
            .route("/api/orders/positions", get(handlers::positions))
            .route("/api/orders/strategy/execute", post(handlers::execute_strategy))
            .route("/api/analytics/positions/monitor", get(handlers::monitor_positions))
            .route("/api/analytics/pnl/summary", get(handlers::pnl_summary))
            .route("/api/greeks", post(handlers::greeks))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(Arc::new(AppState {
                service: self.service.clone(),
                login: self.login.clone(),
            }))
    }

    /// Starts the web server listening on the specified address.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the address or serve requests.
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Web API listening on {}", addr);

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}
