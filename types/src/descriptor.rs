//! Step descriptors: what a step needs from the user and where to send it.
//!
//! Wire shape:
//!
//! ```json
//! { "type": "action", "title": "...", "icon": "...", "description": "...", "label": "...",
//!   "links": { "actions": [ { "type": "post", "label": "...", "href": "...",
//!     "parameters": [ { "name": "...", "label": "...", "type": "text",
//!                       "required": true, "patternDescription": "..." } ] } ] } }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::DescriptorError;

/// Marker serialized as `"type": "action"` on every descriptor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorKind {
    #[default]
    Action,
}

/// Metadata describing one workflow step and its follow-up actions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDescriptor {
    #[serde(rename = "type", default)]
    pub kind: DescriptorKind,
    pub title: String,
    pub icon: String,
    pub description: String,
    pub label: String,
    pub links: DescriptorLinks,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorLinks {
    pub actions: Vec<ActionLink>,
}

/// What invoking an action link produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Submit collected data; the response is a message, possibly chaining.
    Post,
    /// Request an unsigned transaction to sign.
    Transaction,
}

/// A follow-up operation a client may invoke.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLink {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub label: String,
    /// URL template; `{name}` placeholders are filled from parameters.
    pub href: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterSpec>,
}

/// Input control hint for a parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    Text,
    Email,
    Url,
    Number,
    Date,
    Textarea,
}

/// One user-supplied input of an action link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    pub name: String,
    pub label: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ParameterType>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_description: Option<String>,
}

impl StepDescriptor {
    pub fn new(
        title: impl Into<String>,
        icon: impl Into<String>,
        description: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            kind: DescriptorKind::Action,
            title: title.into(),
            icon: icon.into(),
            description: description.into(),
            label: label.into(),
            links: DescriptorLinks::default(),
        }
    }

    pub fn with_action(mut self, action: ActionLink) -> Self {
        self.links.actions.push(action);
        self
    }

    pub fn actions(&self) -> &[ActionLink] {
        &self.links.actions
    }

    /// Check every link against its own parameters plus `query_names`.
    pub fn validate(&self, query_names: &[&str]) -> Result<(), DescriptorError> {
        self.links
            .actions
            .iter()
            .try_for_each(|link| link.validate(query_names))
    }
}

impl ActionLink {
    pub fn post(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self::new(ActionKind::Post, label, href)
    }

    pub fn transaction(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self::new(ActionKind::Transaction, label, href)
    }

    fn new(kind: ActionKind, label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            href: href.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Placeholder names in `href`, in order of appearance.
    pub fn placeholders(&self) -> Result<Vec<&str>, DescriptorError> {
        let mut names = Vec::new();
        let mut rest = self.href.as_str();
        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| DescriptorError::UnterminatedPlaceholder(self.href.clone()))?;
            names.push(&after[..close]);
            rest = &after[close + 1..];
        }
        Ok(names)
    }

    /// Parameter names are unique and every placeholder is bound either by a
    /// parameter of this link or by a name in `query_names`.
    pub fn validate(&self, query_names: &[&str]) -> Result<(), DescriptorError> {
        let mut seen = HashSet::new();
        for p in &self.parameters {
            if !seen.insert(p.name.as_str()) {
                return Err(DescriptorError::DuplicateParameter(p.name.clone()));
            }
        }

        for placeholder in self.placeholders()? {
            if !seen.contains(placeholder) && !query_names.contains(&placeholder) {
                return Err(DescriptorError::UnboundPlaceholder {
                    href: self.href.clone(),
                    placeholder: placeholder.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl ParameterSpec {
    /// A required parameter.
    pub fn required(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: None,
            required: true,
            pattern_description: None,
        }
    }

    pub fn of_type(mut self, kind: ParameterType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn described(mut self, pattern_description: impl Into<String>) -> Self {
        self.pattern_description = Some(pattern_description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn email_param() -> ParameterSpec {
        ParameterSpec::required("email", "Email Address")
            .of_type(ParameterType::Email)
            .described("Please enter a valid email address")
    }

    #[test]
    fn serializes_to_wire_shape() {
        let descriptor = StepDescriptor::new("T", "https://x/image.png", "D", "L").with_action(
            ActionLink::post("Submit", "/api/a?email={email}").with_parameter(email_param()),
        );

        let value = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "action",
                "title": "T",
                "icon": "https://x/image.png",
                "description": "D",
                "label": "L",
                "links": { "actions": [ {
                    "type": "post",
                    "label": "Submit",
                    "href": "/api/a?email={email}",
                    "parameters": [ {
                        "name": "email",
                        "label": "Email Address",
                        "type": "email",
                        "required": true,
                        "patternDescription": "Please enter a valid email address"
                    } ]
                } ] }
            })
        );
    }

    #[test]
    fn links_without_parameters_omit_the_field() {
        let link = ActionLink::transaction("Buy 1 Router", "/buy?routers=1");
        let value = serde_json::to_value(&link).unwrap();
        assert!(value.get("parameters").is_none());
        assert_eq!(value["type"], "transaction");
    }

    #[test]
    fn placeholders_are_extracted_in_order() {
        let link = ActionLink::post("x", "/a?b={b}&c={c}&d=1");
        assert_eq!(link.placeholders().unwrap(), vec!["b", "c"]);
    }

    #[test]
    fn unbound_placeholder_is_rejected() {
        let link = ActionLink::post("x", "/a?email={email}&name={name}").with_parameter(email_param());
        assert_eq!(
            link.validate(&[]),
            Err(DescriptorError::UnboundPlaceholder {
                href: "/a?email={email}&name={name}".into(),
                placeholder: "name".into(),
            })
        );
        assert!(link.validate(&["name"]).is_ok());
    }

    #[test]
    fn duplicate_parameter_is_rejected() {
        let link = ActionLink::post("x", "/a")
            .with_parameter(email_param())
            .with_parameter(email_param());
        assert_eq!(
            link.validate(&[]),
            Err(DescriptorError::DuplicateParameter("email".into()))
        );
    }

    #[test]
    fn unterminated_placeholder_is_rejected() {
        let link = ActionLink::post("x", "/a?b={b");
        assert!(matches!(
            link.validate(&[]),
            Err(DescriptorError::UnterminatedPlaceholder(_))
        ));
    }
}
