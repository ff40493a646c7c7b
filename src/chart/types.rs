//! Request and figure types for the chart delegate.

use serde::{Deserialize, Serialize};

/// Live signal chart vs historical backtest report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    Live,
    Backtest,
}

/// Resolved MA-crossover parameters passed to the delegate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartRequest {
    pub symbol: String,
    pub timeframe: String,
    pub ma_type: String,
    pub ma_fast: u32,
    pub ma_slow: u32,
    pub mode: ChartMode,
}

impl ChartRequest {
    /// Caption body: `SYMBOL | tf | MATYPE(fast,slow)`.
    pub fn summary(&self) -> String {
        format!(
            "{} | {} | {}({},{})",
            self.symbol,
            self.timeframe,
            self.ma_type.to_uppercase(),
            self.ma_fast,
            self.ma_slow
        )
    }
}

/// Rendered figure bytes returned by the delegate.
///
/// Live mode yields a PNG sent as a photo; backtest mode yields a PDF
/// report sent as a document.
#[derive(Debug, Clone)]
pub enum ChartFigure {
    Png(Vec<u8>),
    Pdf(Vec<u8>),
}
