//! Flat form state collected across the wizard

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::{CONTACT_EMAIL, CONTACT_NAME};
use super::types::{Step, StepKind};

/// A single answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    pub fn as_list(&self) -> &[String] {
        match self {
            FieldValue::List(items) => items,
            _ => &[],
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// Value rendered for the review screen
    pub fn display(&self) -> String {
        match self {
            FieldValue::Flag(true) => "yes".to_string(),
            FieldValue::Flag(false) => "no".to_string(),
            FieldValue::Text(s) => s.trim().to_string(),
            FieldValue::List(items) => items.join(", "),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Field name to value. Fields are independent of each other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState {
    fields: BTreeMap<String, FieldValue>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Text value, empty when absent or not text
    pub fn text(&self, field: &str) -> &str {
        self.fields.get(field).map(FieldValue::as_text).unwrap_or("")
    }

    /// List value, empty when absent or not a list
    pub fn list(&self, field: &str) -> &[String] {
        self.fields.get(field).map(FieldValue::as_list).unwrap_or(&[])
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.fields.remove(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Authenticated user used to pre-fill contact fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserIdentity {
    pub fn is_empty(&self) -> bool {
        self.name.as_deref().map_or(true, |n| n.trim().is_empty())
            && self.email.as_deref().map_or(true, |e| e.trim().is_empty())
    }
}

/// Default answers for a fresh session.
///
/// Every step field starts empty (`""`, or `[]` for list steps); the contact
/// name and email are taken from `user` when provided.
pub fn create_initial_form_state(steps: &[Step], user: Option<&UserIdentity>) -> FormState {
    let mut form = FormState::new();
    for step in steps {
        if step.kind.is_list() {
            form.set(step.id, Vec::<String>::new());
        } else if step.kind != StepKind::Review {
            form.set(step.id, "");
        }
    }

    if let Some(user) = user {
        if let Some(name) = user.name.as_deref().filter(|n| !n.trim().is_empty()) {
            form.set(CONTACT_NAME, name.trim());
        }
        if let Some(email) = user.email.as_deref().filter(|e| !e.trim().is_empty()) {
            form.set(CONTACT_EMAIL, email.trim());
        }
    }

    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::catalog::{brand_onboarding_steps, PREFERRED_NICHES, REVIEW};

    #[test]
    fn test_initial_state_without_user() {
        let steps = brand_onboarding_steps();
        let form = create_initial_form_state(&steps, None);
        assert_eq!(form.text(CONTACT_NAME), "");
        assert_eq!(form.text(CONTACT_EMAIL), "");
        assert!(form.list(PREFERRED_NICHES).is_empty());
        assert!(form.get(REVIEW).is_none());
        assert_eq!(form.len(), steps.len() - 1);
    }

    #[test]
    fn test_initial_state_prefills_contact_from_user() {
        let steps = brand_onboarding_steps();
        let user = UserIdentity {
            name: Some("Dana Reyes".to_string()),
            email: Some(" dana@acme.com ".to_string()),
        };
        let form = create_initial_form_state(&steps, Some(&user));
        assert_eq!(form.text(CONTACT_NAME), "Dana Reyes");
        assert_eq!(form.text(CONTACT_EMAIL), "dana@acme.com");
    }

    #[test]
    fn test_blank_identity_does_not_prefill() {
        let steps = brand_onboarding_steps();
        let user = UserIdentity {
            name: Some("   ".to_string()),
            email: None,
        };
        assert!(user.is_empty());
        let form = create_initial_form_state(&steps, Some(&user));
        assert_eq!(form.text(CONTACT_NAME), "");
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut form = FormState::new();
        form.set("company_name", "Acme");
        form.set("preferred_niches", vec!["Beauty".to_string()]);
        form.set("terms_accepted", true);

        let json = form.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"company_name":"Acme","preferred_niches":["Beauty"],"terms_accepted":true}"#
        );

        let restored = FormState::from_json(&json).unwrap();
        assert_eq!(restored, form);
        assert_eq!(restored.get("terms_accepted").and_then(FieldValue::as_flag), Some(true));
    }

    #[test]
    fn test_missing_fields_read_as_empty() {
        let form = FormState::new();
        assert_eq!(form.text("anything"), "");
        assert!(form.list("anything").is_empty());
    }

    #[test]
    fn test_display_values() {
        assert_eq!(FieldValue::from("  Acme ").display(), "Acme");
        assert_eq!(
            FieldValue::from(vec!["EU".to_string(), "US".to_string()]).display(),
            "EU, US"
        );
        assert_eq!(FieldValue::from(false).display(), "no");
    }
}
