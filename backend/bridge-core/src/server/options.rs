//! Open-ended server configuration forwarded from the host.

use crate::config::ServerConfig;

use std::collections::BTreeMap;
use std::collections::btree_map::Iter;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Reserved option: identifier of the server, generated when absent.
pub const SERVER_ID_OPTION: &str = "server_id";
/// Host or IP the server binds to and reports back.
pub const ADDRESS_OPTION: &str = "address";
/// Port to bind, `0` or absent for an ephemeral port.
pub const PORT_OPTION: &str = "port";
/// URL path prefix the panel is served under.
pub const PREFIX_OPTION: &str = "prefix";

/// Server options passed through from the host's export call.
///
/// The bridge only ever touches [`SERVER_ID_OPTION`]; everything else reaches
/// the server construction untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerOptions(BTreeMap<String, Value>);

impl ServerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The caller-supplied or generated server id, if it is a string.
    pub fn server_id(&self) -> Option<&str> {
        self.0.get(SERVER_ID_OPTION).and_then(Value::as_str)
    }

    /// The server id as text: strings as-is, other JSON values stringified,
    /// `null` treated as absent.
    pub fn server_id_text(&self) -> Option<String> {
        match self.0.get(SERVER_ID_OPTION)? {
            Value::Null => None,
            Value::String(id) => Some(id.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Insert a fresh hex UUID as the server id unless one was supplied.
    pub fn ensure_server_id(&mut self) -> String {
        let id = self
            .0
            .entry(SERVER_ID_OPTION.to_string())
            .or_insert_with(|| Value::String(Uuid::new_v4().simple().to_string()));

        if id.is_null() {
            *id = Value::String(Uuid::new_v4().simple().to_string());
        }

        match id {
            Value::String(id) => id.clone(),
            other => other.to_string(),
        }
    }

    /// Fill `address` and `port` from add-in configuration where the caller
    /// left them unset.
    pub fn apply_defaults(&mut self, defaults: &ServerConfig) {
        if let Some(address) = &defaults.address {
            self.0
                .entry(ADDRESS_OPTION.to_string())
                .or_insert_with(|| Value::String(address.clone()));
        }
        if let Some(port) = defaults.port {
            self.0
                .entry(PORT_OPTION.to_string())
                .or_insert_with(|| Value::from(port));
        }
    }

    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.0
    }
}

impl From<BTreeMap<String, Value>> for ServerOptions {
    fn from(options: BTreeMap<String, Value>) -> Self {
        Self(options)
    }
}

impl FromIterator<(String, Value)> for ServerOptions {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
