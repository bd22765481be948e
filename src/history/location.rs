//! Navigation locations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::routing::segment::split_query;

/// Key reported by a location that carries no navigation state.
pub const INITIAL_KEY: &str = "initial";

/// Where the navigator currently is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub pathname: String,
    /// Query string without the leading `?`.
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub state: Option<Value>,
    pub key: String,
}

impl Location {
    /// Parse a `pathname?search` uri into a stateless location.
    pub fn from_uri(uri: &str) -> Self {
        let (pathname, search) = split_query(uri);
        Self::with_state(pathname, search.unwrap_or_default(), None)
    }

    /// Build a location, deriving its key from `state`.
    pub fn with_state(pathname: &str, search: &str, state: Option<Value>) -> Self {
        let key = state
            .as_ref()
            .and_then(|s| s.get("key"))
            .and_then(Value::as_str)
            .unwrap_or(INITIAL_KEY)
            .to_string();
        Self {
            pathname: pathname.to_string(),
            search: search.to_string(),
            state,
            key,
        }
    }

    /// The full uri, `pathname` plus `?search` when present.
    pub fn href(&self) -> String {
        if self.search.is_empty() {
            self.pathname.clone()
        } else {
            format!("{}?{}", self.pathname, self.search)
        }
    }
}

/// Stamp navigation state with a fresh key.
///
/// Object state is extended with a `key` field. Any other state is dropped.
pub fn keyed_state(state: Option<Value>) -> Value {
    let mut map = match state {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    map.insert("key".into(), Value::String(Uuid::new_v4().to_string()));
    Value::Object(map)
}
