//! Validated per-user chart overrides.
//!
//! `/setcustom` values used to be forwarded to the renderer as arbitrary
//! keyword arguments; here the recognized keys are enumerated with their
//! expected shapes, and everything else is rejected at write time.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::storage::CustomRecord;

/// Keys accepted by `/setcustom`, in the order shown to the user.
pub const ALLOWED_KEYS: [&str; 4] = ["figsize", "sl", "tp", "limit"];

/// Recognized chart overrides, forwarded to the delegate alongside the
/// request. Absent fields fall back to the renderer's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOverrides {
    /// Figure size as `[width, height]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub figsize: Option<(f64, f64)>,
    /// Stop-loss fraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sl: Option<f64>,
    /// Take-profit fraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tp: Option<f64>,
    /// Number of candles to load.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ChartOverrides {
    /// Builds overrides from a user's stored customs.
    ///
    /// Rows that no longer validate (e.g. written before a key was
    /// tightened) are skipped with a warning instead of failing the chart.
    pub fn from_customs(customs: &[CustomRecord]) -> Self {
        let mut overrides = Self::default();
        for custom in customs {
            match validate_custom(&custom.key, &custom.value) {
                Ok(value) => overrides.apply(&custom.key, &value),
                Err(reason) => {
                    warn!(
                        user_id = custom.user_id,
                        key = %custom.key,
                        reason = %reason,
                        "Skipping stored custom that fails validation"
                    );
                }
            }
        }
        overrides
    }

    fn apply(&mut self, key: &str, value: &Value) {
        match key {
            "figsize" => {
                if let Some(arr) = value.as_array() {
                    if let (Some(w), Some(h)) = (arr[0].as_f64(), arr[1].as_f64()) {
                        self.figsize = Some((w, h));
                    }
                }
            }
            "sl" => self.sl = value.as_f64(),
            "tp" => self.tp = value.as_f64(),
            "limit" => self.limit = value.as_u64().map(|v| v as u32),
            _ => {}
        }
    }
}

/// Checks a `/setcustom` key/value pair against the recognized keys.
///
/// Returns the parsed JSON value in canonical form on success, or a
/// user-facing rejection message.
pub fn validate_custom(key: &str, raw_value: &str) -> Result<Value, String> {
    let value: Value = serde_json::from_str(raw_value)
        .map_err(|_| format!("Value for '{}' is not valid JSON: {}", key, raw_value))?;

    match key {
        "figsize" => {
            let ok = value
                .as_array()
                .map(|arr| arr.len() == 2 && arr.iter().all(|v| v.as_f64().map_or(false, |n| n > 0.0)))
                .unwrap_or(false);
            if ok {
                Ok(value)
            } else {
                Err("figsize must be a list of two positive numbers, e.g. [10,6]".to_string())
            }
        }
        "sl" | "tp" => {
            if value.as_f64().map_or(false, |n| n > 0.0) {
                Ok(value)
            } else {
                Err(format!("{} must be a positive number, e.g. 0.02", key))
            }
        }
        "limit" => {
            if value.as_u64().map_or(false, |n| n > 0) {
                Ok(value)
            } else {
                Err("limit must be a positive integer, e.g. 500".to_string())
            }
        }
        other => Err(format!(
            "Unknown custom key '{}'. Allowed keys: {}",
            other,
            ALLOWED_KEYS.join(", ")
        )),
    }
}
