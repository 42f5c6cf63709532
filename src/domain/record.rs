//! Fetched record model
//!
//! A [`Record`] is an opaque JSON payload keyed by its [`ItemId`]. The crate
//! never interprets payload fields; the only observable property is whether
//! the upstream returned anything at all.

use super::ids::ItemId;
use serde_json::Value;

/// A single item pulled from the upstream API
///
/// # Examples
///
/// ```
/// use itemsync::domain::{ItemId, Record};
/// use serde_json::json;
///
/// let story = Record::new(ItemId::new(8863), json!({"id": 8863, "type": "story"}));
/// assert!(!story.is_empty());
///
/// let deleted = Record::new(ItemId::new(8864), serde_json::Value::Null);
/// assert!(deleted.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: ItemId,
    payload: Value,
}

impl Record {
    /// Creates a record from an id and its raw payload
    pub fn new(id: ItemId, payload: Value) -> Self {
        Self { id, payload }
    }

    /// The item id this record was fetched under
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// The raw payload
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// True when the upstream returned `null` or an empty value for this id
    /// (deleted or not yet materialized item)
    pub fn is_empty(&self) -> bool {
        match &self.payload {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::String(s) => s.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(Value::Null, true ; "null")]
    #[test_case(json!({}), true ; "empty object")]
    #[test_case(json!([]), true ; "empty array")]
    #[test_case(json!(""), true ; "empty string")]
    #[test_case(json!({"id": 1}), false ; "object")]
    #[test_case(json!(0), false ; "number")]
    #[test_case(json!(false), false ; "bool")]
    fn test_is_empty(payload: Value, expected: bool) {
        assert_eq!(Record::new(ItemId::new(1), payload).is_empty(), expected);
    }

    #[test]
    fn test_accessors() {
        let record = Record::new(ItemId::new(5), json!({"by": "pg"}));
        assert_eq!(record.id(), ItemId::new(5));
        assert_eq!(record.payload()["by"], "pg");
    }
}
