//! Client submissions and their normalisation.
//!
//! Clients disagree on where collected inputs go: some send them flattened
//! under `params`, others nested under `data`, and the href template also
//! carries them in the query string. All shapes are folded into one
//! [`Submission`] before validation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Raw JSON body of a POST to an action endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PostRequest {
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

impl PostRequest {
    pub fn with_account(account: impl Into<String>) -> Self {
        Self {
            account: Some(account.into()),
            ..Default::default()
        }
    }
}

/// Canonical, shape-independent view of one POST.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Submission {
    /// Raw account string; parsed by the executor.
    pub account: String,
    pub fields: BTreeMap<String, String>,
}

impl Submission {
    /// Fold `request` and `query` into a submission holding `names`.
    ///
    /// Sources are consulted in order `params`, `data`, query string; the
    /// first non-empty value wins per field. Empty values count as absent.
    pub fn normalize(request: &PostRequest, query: &HashMap<String, String>, names: &[&str]) -> Self {
        let mut fields = BTreeMap::new();
        for &name in names {
            let value = request
                .params
                .as_ref()
                .and_then(|m| m.get(name))
                .and_then(field_value)
                .or_else(|| request.data.as_ref().and_then(|m| m.get(name)).and_then(field_value))
                .or_else(|| query.get(name).filter(|v| is_substituted(v)).cloned());
            if let Some(value) = value {
                fields.insert(name.to_string(), value);
            }
        }

        Self {
            account: request.account.clone().unwrap_or_default(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

// Clients that skip template substitution echo `{name}` back verbatim.
fn is_substituted(value: &str) -> bool {
    !value.is_empty() && !(value.starts_with('{') && value.ends_with('}'))
}

/// String form of a JSON field value, `None` for empty or structured values.
fn field_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
