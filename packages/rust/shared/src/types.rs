//! Core domain types for token-list color enrichment.

use indexmap::IndexMap;
use serde_json::Value;

use crate::color::Color;

/// Derived field: mean color across the logo's pixels.
pub const AVERAGE_COLOR_KEY: &str = "averageColor";
/// Derived field: most prevalent palette color.
pub const DOMINANT1_COLOR_KEY: &str = "dominantColor1";
/// Derived field: second palette color (or lightened fallback).
pub const DOMINANT2_COLOR_KEY: &str = "dominantColor2";

/// The three derived keys, in the order they are inserted after the logo field.
pub const DERIVED_COLOR_KEYS: [&str; 3] =
    [AVERAGE_COLOR_KEY, DOMINANT1_COLOR_KEY, DOMINANT2_COLOR_KEY];

// ---------------------------------------------------------------------------
// TokenRecord
// ---------------------------------------------------------------------------

/// A single token's metadata: an open, ordered field map.
///
/// Key order is significant for output; unknown fields pass through untouched.
pub type TokenRecord = IndexMap<String, Value>;

/// Copy a JSON object into an ordered [`TokenRecord`].
pub fn record_from_object(obj: &serde_json::Map<String, Value>) -> TokenRecord {
    obj.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

/// Turn a [`TokenRecord`] back into a JSON object value, preserving order.
pub fn record_into_value(record: TokenRecord) -> Value {
    Value::Object(record.into_iter().collect())
}

// ---------------------------------------------------------------------------
// ColorTriple
// ---------------------------------------------------------------------------

/// The three colors derived from one logo image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTriple {
    /// Mean color across all (non-transparent) pixels.
    pub average: Color,
    /// Most prevalent palette color.
    pub dominant1: Color,
    /// Second palette color, or a lightened variant of `dominant1`.
    pub dominant2: Color,
}

impl ColorTriple {
    /// Substitute values when the logo cannot be fetched or decoded.
    pub const FALLBACK: ColorTriple = ColorTriple {
        average: Color::BLACK,
        dominant1: Color::BLACK,
        dominant2: Color::WHITE,
    };
}

// ---------------------------------------------------------------------------
// TokenOutcome
// ---------------------------------------------------------------------------

/// Per-token result of one batch step. Failures are data, not control flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenOutcome {
    /// Token has no logo reference; record left untouched.
    Skipped,
    /// Colors extracted from the logo image.
    Enriched,
    /// Fetch or decode failed; fallback colors were merged instead.
    Fallback { reason: String },
}

impl TokenOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, TokenOutcome::Fallback { .. })
    }
}

// ---------------------------------------------------------------------------
// FieldNames
// ---------------------------------------------------------------------------

/// Names of the well-known fields in the input document.
///
/// Defaults follow the token-list convention; all three are configurable.
#[derive(Debug, Clone)]
pub struct FieldNames {
    /// Top-level key holding the ordered token array.
    pub tokens_key: String,
    /// Per-token key holding the logo URI.
    pub logo_key: String,
    /// Per-token key holding the display symbol.
    pub symbol_key: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            tokens_key: "tokens".into(),
            logo_key: "logoURI".into(),
            symbol_key: "symbol".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_preserves_field_order() {
        let doc: Value = serde_json::from_str(
            r#"{"zeta": 1, "symbol": "ABC", "logoURI": "https://x/logo.png", "alpha": 2}"#,
        )
        .unwrap();

        let record = record_from_object(doc.as_object().unwrap());
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "symbol", "logoURI", "alpha"]);

        let back = record_into_value(record);
        let back_keys: Vec<&str> = back.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(back_keys, ["zeta", "symbol", "logoURI", "alpha"]);
    }

    #[test]
    fn fallback_triple_values() {
        assert_eq!(ColorTriple::FALLBACK.average.to_hex(), "#000000");
        assert_eq!(ColorTriple::FALLBACK.dominant1.to_hex(), "#000000");
        assert_eq!(ColorTriple::FALLBACK.dominant2.to_hex(), "#ffffff");
    }

    #[test]
    fn default_field_names() {
        let fields = FieldNames::default();
        assert_eq!(fields.tokens_key, "tokens");
        assert_eq!(fields.logo_key, "logoURI");
        assert_eq!(fields.symbol_key, "symbol");
    }
}
