//! Result envelopes returned by POST handlers.

use serde::{Deserialize, Serialize};

use crate::descriptor::StepDescriptor;

/// The outcome of a successful POST: either a message (optionally chaining
/// into another step) or an unsigned transaction for the wallet to sign.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResultEnvelope {
    Message {
        data: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        links: Option<MessageLinks>,
    },
    Transaction {
        /// Base64-encoded unsigned transaction.
        transaction: String,
        message: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLinks {
    pub next: NextAction,
}

/// How the client reaches the next step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NextAction {
    /// The next descriptor is embedded in the response; no extra round trip.
    Inline { action: StepDescriptor },
}

impl ResultEnvelope {
    /// A message that chains into `next` inline.
    pub fn chained(data: impl Into<String>, next: StepDescriptor) -> Self {
        Self::Message {
            data: data.into(),
            links: Some(MessageLinks {
                next: NextAction::Inline { action: next },
            }),
        }
    }

    pub fn transaction(transaction: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transaction {
            transaction: transaction.into(),
            message: message.into(),
        }
    }

    /// The inline next-step descriptor, if this envelope chains.
    pub fn next_step(&self) -> Option<&StepDescriptor> {
        match self {
            Self::Message {
                links: Some(MessageLinks {
                    next: NextAction::Inline { action },
                }),
                ..
            } => Some(action),
            _ => None,
        }
    }
}

/// Body of every error response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ActionLink;
    use serde_json::json;

    #[test]
    fn chained_message_wire_shape() {
        let next = StepDescriptor::new("Select", "icon", "desc", "Pick")
            .with_action(ActionLink::transaction("Buy 1 Router", "/buy?routers=1"));
        let envelope = ResultEnvelope::chained("ok", next.clone());

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["type"], "message");
        assert_eq!(value["data"], "ok");
        assert_eq!(value["links"]["next"]["type"], "inline");
        assert_eq!(value["links"]["next"]["action"]["type"], "action");
        assert_eq!(value["links"]["next"]["action"]["title"], "Select");
        assert_eq!(envelope.next_step(), Some(&next));
    }

    #[test]
    fn plain_message_omits_links() {
        let envelope = ResultEnvelope::Message {
            data: "done".into(),
            links: None,
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({ "type": "message", "data": "done" }));
    }

    #[test]
    fn transaction_wire_shape() {
        let envelope = ResultEnvelope::transaction("AQID", "Purchased 1 routers for 1.4214 SOL!");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "transaction",
                "transaction": "AQID",
                "message": "Purchased 1 routers for 1.4214 SOL!"
            })
        );
        assert!(envelope.next_step().is_none());
    }
}
