//! Dashboard JSON re-encoding
//!
//! Dashboards are embedded in the ConfigMap as text, either compact (one line,
//! no whitespace) or pretty-printed with two-space indentation. Key order of
//! the source document is preserved in both forms.

use crate::error::{ConversionError, ConversionResult};
use serde_json::Value;

/// JSON layout of the embedded dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonStyle {
    Compact,
    Pretty,
}

impl JsonStyle {
    pub fn from_compact(compact: bool) -> Self {
        if compact {
            JsonStyle::Compact
        } else {
            JsonStyle::Pretty
        }
    }
}

/// Encode a dashboard document in the requested style
pub fn encode_dashboard(data: &Value, style: JsonStyle) -> ConversionResult<String> {
    let encoded = match style {
        JsonStyle::Compact => serde_json::to_string(data),
        JsonStyle::Pretty => serde_json::to_string_pretty(data),
    };

    encoded.map_err(|e| ConversionError::encode(e.to_string()))
}

/// Encoded dashboard text as stored under the ConfigMap data key
pub fn embed_dashboard(data: &Value, style: JsonStyle) -> ConversionResult<String> {
    let mut text = encode_dashboard(data, style)?;
    text.push('\n');
    Ok(text)
}
