//! HTTP client for the external MaCross rendering service.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, info};

use super::delegate::{ChartDelegate, ChartError};
use super::overrides::ChartOverrides;
use super::types::{ChartFigure, ChartMode, ChartRequest};

/// Renders charts by POSTing the request to a MaCross HTTP service.
///
/// `POST {base_url}/render` with a JSON body; the response body carries the
/// raw figure bytes (PNG for live, PDF for backtest). 204 means "no figure".
pub struct HttpChartDelegate {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct RenderBody<'a> {
    #[serde(flatten)]
    request: &'a ChartRequest,
    overrides: &'a ChartOverrides,
}

impl HttpChartDelegate {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ChartDelegate for HttpChartDelegate {
    async fn render(
        &self,
        request: &ChartRequest,
        overrides: &ChartOverrides,
    ) -> Result<Option<ChartFigure>, ChartError> {
        let url = format!("{}/render", self.base_url);
        debug!(url = %url, symbol = %request.symbol, "Requesting chart render");

        let response = self
            .client
            .post(&url)
            .json(&RenderBody { request, overrides })
            .send()
            .await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(None),
            status if status.is_success() => {
                let bytes = response.bytes().await?.to_vec();
                info!(
                    symbol = %request.symbol,
                    timeframe = %request.timeframe,
                    size = bytes.len(),
                    "Chart rendered"
                );
                let figure = match request.mode {
                    ChartMode::Live => ChartFigure::Png(bytes),
                    ChartMode::Backtest => ChartFigure::Pdf(bytes),
                };
                Ok(Some(figure))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ChartError::Service(format!(
                    "chart service returned {}: {}",
                    status, body
                )))
            }
        }
    }
}
