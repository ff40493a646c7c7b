//! Chart delegation: request/figure types, validated overrides, and the
//! HTTP client for the external renderer.

mod delegate;
mod http;
mod overrides;
mod types;

pub use delegate::{ChartDelegate, ChartError};
pub use http::HttpChartDelegate;
pub use overrides::{validate_custom, ChartOverrides, ALLOWED_KEYS};
pub use types::{ChartFigure, ChartMode, ChartRequest};
