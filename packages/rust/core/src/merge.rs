//! Field-preserving merge of derived colors into a token record.

use serde_json::Value;

use tokentint_shared::{
    AVERAGE_COLOR_KEY, ColorTriple, DERIVED_COLOR_KEYS, DOMINANT1_COLOR_KEY, DOMINANT2_COLOR_KEY,
    TokenRecord,
};

/// Build a fresh record with the three derived color fields inserted
/// immediately after `logo_key`.
///
/// All other fields keep their original order and values; the input record
/// is never mutated, so the caller can replace the token atomically. Stale
/// derived keys anywhere in the input are re-inserted at the canonical
/// position rather than duplicated. A record without `logo_key` comes back
/// unchanged (minus any stale derived keys).
pub fn merge_colors(record: &TokenRecord, logo_key: &str, colors: &ColorTriple) -> TokenRecord {
    let mut merged = TokenRecord::with_capacity(record.len() + DERIVED_COLOR_KEYS.len());

    for (key, value) in record {
        if DERIVED_COLOR_KEYS.contains(&key.as_str()) {
            continue;
        }

        merged.insert(key.clone(), value.clone());
        if key == logo_key {
            merged.insert(
                AVERAGE_COLOR_KEY.to_string(),
                Value::String(colors.average.to_hex()),
            );
            merged.insert(
                DOMINANT1_COLOR_KEY.to_string(),
                Value::String(colors.dominant1.to_hex()),
            );
            merged.insert(
                DOMINANT2_COLOR_KEY.to_string(),
                Value::String(colors.dominant2.to_hex()),
            );
        }
    }

    merged
}
