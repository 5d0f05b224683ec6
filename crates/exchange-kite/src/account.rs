//! Account queries: net positions.

use async_trait::async_trait;
use nifty_options_core::{BrokerResult, Position, PositionSource};
use tracing::debug;

use crate::client::KiteClient;
use crate::types::RawPositions;

impl KiteClient {
    /// Net positions across the day and carried forward.
    pub async fn positions(&self) -> BrokerResult<Vec<Position>> {
        let raw: RawPositions = self.get("/portfolio/positions", &[]).await?;
        debug!(count = raw.net.len(), "Positions retrieved");
        Ok(raw.net.into_iter().map(Position::from).collect())
    }
}

#[async_trait]
impl PositionSource for KiteClient {
    async fn get_positions(&self) -> BrokerResult<Vec<Position>> {
        self.positions().await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::client_for;
    use nifty_options_core::PositionSource;
    use rust_decimal_macros::dec;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn reads_net_positions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/portfolio/positions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "data": {
                    "net": [
                        {
                            "tradingsymbol": "NIFTY25SEP2519000PE",
                            "exchange": "NFO",
                            "quantity": -200,
                            "buy_value": 10000,
                            "pnl": -4000,
                            "realised": 0,
                            "unrealised": -4000
                        },
                        {
                            "tradingsymbol": "NIFTY25SEP2518500PE",
                            "exchange": "NFO",
                            "quantity": -250,
                            "buy_value": 0,
                            "pnl": 1250.5
                        }
                    ],
                    "day": []
                }
            })))
            .mount(&server)
            .await;

        let positions = client_for(&server).get_positions().await.unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].symbol, "NIFTY25SEP2519000PE");
        assert_eq!(positions[0].pnl, dec!(-4000));
        assert_eq!(positions[1].pnl, dec!(1250.5));
        assert_eq!(positions[1].realised, dec!(0));
        assert_eq!(positions[1].unrealised, dec!(0));
    }

    #[tokio::test]
    async fn expired_session_is_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(path("/portfolio/positions"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "status": "error",
                "message": "Token is invalid or has expired.",
                "error_type": "TokenException"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).get_positions().await.unwrap_err();
        assert!(matches!(err, nifty_options_core::BrokerError::Authentication(_)));
    }
}
