// File: ./src/model/mod.rs
pub mod item;
pub mod changelog;
pub mod matcher;
pub mod normalize;

pub use item::{Category, CategoryFilter, Listing, NormalizedItem, RawItem};
pub use changelog::{ChangeLog, LogRecord, LogStatus, NO_CHANGE_RESULT, NO_CHANGE_RESULT_EN};
pub use matcher::{Query, locale_cmp};
pub use normalize::{LinkTemplate, normalize};

use serde_json::Value;

/// Reads a loosely typed JSON scalar as text. Strings pass through, numbers and
/// booleans are printed, everything else counts as absent.
pub(crate) fn loose_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
