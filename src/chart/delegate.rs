//! Chart delegate trait and error type.

use async_trait::async_trait;
use thiserror::Error;

use super::overrides::ChartOverrides;
use super::types::{ChartFigure, ChartRequest};

/// Errors from chart generation.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("chart service request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Service(String),
}

/// Opaque external renderer for MA-crossover charts.
///
/// Implementations receive the resolved parameters plus the user's
/// overrides and return figure bytes, or `None` when there is nothing to
/// render (no reply is sent in that case).
#[async_trait]
pub trait ChartDelegate: Send + Sync {
    async fn render(
        &self,
        request: &ChartRequest,
        overrides: &ChartOverrides,
    ) -> Result<Option<ChartFigure>, ChartError>;
}
