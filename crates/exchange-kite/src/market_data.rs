//! Market data: snapshot quotes for indices and option contracts.

use std::collections::HashMap;

use async_trait::async_trait;
use nifty_options_core::{BrokerError, BrokerResult, Quote, QuoteSource};
use tracing::debug;

use crate::client::KiteClient;
use crate::types::RawQuote;

impl KiteClient {
    /// Full quote for `{exchange}:{symbol}`.
    ///
    /// Kite omits unknown instruments from the response map instead of
    /// failing the request, so a missing key is reported as `NotFound`.
    pub async fn quote(&self, symbol: &str, exchange: &str) -> BrokerResult<Quote> {
        let instrument = format!("{exchange}:{symbol}");
        debug!(instrument, "Fetching quote");

        let mut data: HashMap<String, RawQuote> = self.get("/quote", &[("i", instrument.as_str())]).await?;

        data.remove(&instrument)
            .map(|raw| raw.into_quote(symbol, exchange))
            .ok_or_else(|| BrokerError::not_found(symbol))
    }
}

#[async_trait]
impl QuoteSource for KiteClient {
    async fn get_quote(&self, symbol: &str, exchange: &str) -> BrokerResult<Quote> {
        self.quote(symbol, exchange).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::client_for;
    use nifty_options_core::{BrokerError, QuoteSource};
    use rust_decimal_macros::dec;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn option_quote_from_data_map() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quote"))
            .and(query_param("i", "NFO:NIFTY25SEP2519500PE"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "data": {
                    "NFO:NIFTY25SEP2519500PE": {
                        "instrument_token": 12345,
                        "last_price": 150.5,
                        "volume": 98000,
                        "oi": 2150000,
                        "depth": {
                            "buy": [{"price": 150.25, "quantity": 75, "orders": 2}],
                            "sell": [{"price": 150.75, "quantity": 50, "orders": 1}]
                        }
                    }
                }
            })))
            .mount(&server)
            .await;

        let quote = client_for(&server)
            .get_quote("NIFTY25SEP2519500PE", "NFO")
            .await
            .unwrap();
        assert_eq!(quote.symbol, "NIFTY25SEP2519500PE");
        assert_eq!(quote.exchange, "NFO");
        assert_eq!(quote.last_price, dec!(150.5));
        assert_eq!(quote.volume, 98_000);
        assert_eq!(quote.open_interest, 2_150_000);
        assert_eq!(quote.best_bid, dec!(150.25));
        assert_eq!(quote.best_ask, dec!(150.75));
    }

    #[tokio::test]
    async fn index_quote_without_depth() {
        let server = MockServer::start().await;
        Mock::given(path("/quote"))
            .and(query_param("i", "NSE:NIFTY 50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "data": {"NSE:NIFTY 50": {"last_price": 20012.25}}
            })))
            .mount(&server)
            .await;

        let quote = client_for(&server).quote("NIFTY 50", "NSE").await.unwrap();
        assert_eq!(quote.last_price, dec!(20012.25));
        assert_eq!(quote.best_bid, dec!(0));
        assert_eq!(quote.open_interest, 0);
    }

    #[tokio::test]
    async fn absent_instrument_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(path("/quote"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "data": {}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .quote("NIFTY25SEP2599999PE", "NFO")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, BrokerError::NotFound { ref symbol } if symbol == "NIFTY25SEP2599999PE"));
    }

    #[tokio::test]
    async fn server_error_is_transient() {
        let server = MockServer::start().await;
        Mock::given(path("/quote"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).quote("X", "NFO").await.unwrap_err();
        assert!(err.is_transient());
        assert!(!err.is_not_found());
    }
}
