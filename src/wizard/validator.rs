//! Per-step validation rules
//!
//! Rules are a table keyed by step id rather than behaviour attached to
//! [`Step`], so the whole rule set can be audited in one place and each
//! entry tested on its own.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::catalog::{self, field_label};
use super::form::FormState;
use super::types::{Step, ValidationOutcome};

/// Local part, `@`, dot-separated domain labels, alphabetic top-level label
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*\.[a-zA-Z]{2,}$",
    )
    .expect("email pattern is valid")
});

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

type Rule = Box<dyn Fn(&FormState) -> ValidationOutcome + Send + Sync>;

/// Maps step id to the rule deciding whether the wizard may advance
pub struct StepValidator {
    rules: HashMap<&'static str, Rule>,
}

impl std::fmt::Debug for StepValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<_> = self.rules.keys().collect();
        ids.sort();
        f.debug_struct("StepValidator").field("rules", &ids).finish()
    }
}

impl Default for StepValidator {
    fn default() -> Self {
        Self::brand_onboarding()
    }
}

impl StepValidator {
    /// Validator with no rules; every step is unknown until registered
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// The rule table for [`catalog::brand_onboarding_steps`]
    pub fn brand_onboarding() -> Self {
        let mut v = Self::empty();

        for field in [
            catalog::COMPANY_NAME,
            catalog::DESCRIPTION,
            catalog::CONTACT_NAME,
            catalog::CONTACT_ROLE,
            catalog::CONTACT_PHONE,
            catalog::WEBSITE,
        ] {
            v.register(field, required_text(field));
        }

        v.register(catalog::INDUSTRY, single_choice(catalog::INDUSTRY, catalog::INDUSTRIES));
        v.register(
            catalog::COMPANY_SIZE,
            single_choice(catalog::COMPANY_SIZE, catalog::COMPANY_SIZES),
        );
        v.register(
            catalog::ANNUAL_BUDGET,
            single_choice(catalog::ANNUAL_BUDGET, catalog::ANNUAL_BUDGETS),
        );
        v.register(
            catalog::INVITE_TEAM_MEMBERS,
            single_choice(catalog::INVITE_TEAM_MEMBERS, catalog::YES_NO),
        );

        v.register(catalog::PREFERRED_NICHES, multi_choice(catalog::PREFERRED_NICHES));
        v.register(catalog::TARGET_REGIONS, multi_choice(catalog::TARGET_REGIONS));

        v.register(catalog::CONTACT_EMAIL, email(catalog::CONTACT_EMAIL));
        v.register(catalog::TEAM_INVITATIONS, email_list(catalog::TEAM_INVITATIONS));

        v.register(catalog::LOGO, always_valid());
        v.register(catalog::REVIEW, always_valid());

        v
    }

    /// Add or replace the rule for a step
    pub fn register(
        &mut self,
        step_id: &'static str,
        rule: impl Fn(&FormState) -> ValidationOutcome + Send + Sync + 'static,
    ) {
        self.rules.insert(step_id, Box::new(rule));
    }

    pub fn has_rule(&self, step_id: &str) -> bool {
        self.rules.contains_key(step_id)
    }

    /// Decide whether the wizard may advance past `step_id`.
    ///
    /// Optional steps are always valid. Never panics; failure is reported
    /// through the returned outcome.
    pub fn validate(&self, step_id: &str, form: &FormState, optional: bool) -> ValidationOutcome {
        if optional {
            return ValidationOutcome::ok();
        }
        match self.rules.get(step_id) {
            Some(rule) => rule(form),
            None => ValidationOutcome::invalid("Unknown step"),
        }
    }

    pub fn validate_step(&self, step: &Step, form: &FormState) -> ValidationOutcome {
        self.validate(step.id, form, step.optional)
    }
}

/// Non-empty after trimming
pub fn required_text(field: &'static str) -> impl Fn(&FormState) -> ValidationOutcome {
    move |form| {
        if form.text(field).trim().is_empty() {
            ValidationOutcome::invalid(format!("{} is required", field_label(field)))
        } else {
            ValidationOutcome::ok()
        }
    }
}

/// Non-empty and one of `options`
pub fn single_choice(
    field: &'static str,
    options: &'static [&'static str],
) -> impl Fn(&FormState) -> ValidationOutcome {
    move |form| {
        let value = form.text(field);
        if value.is_empty() {
            ValidationOutcome::invalid(format!(
                "Please select {}",
                field_label(field).to_lowercase()
            ))
        } else if !options.contains(&value) {
            ValidationOutcome::invalid(format!(
                "Please select a valid {}",
                field_label(field).to_lowercase()
            ))
        } else {
            ValidationOutcome::ok()
        }
    }
}

/// At least one element
pub fn multi_choice(field: &'static str) -> impl Fn(&FormState) -> ValidationOutcome {
    move |form| {
        if form.list(field).is_empty() {
            ValidationOutcome::invalid(format!(
                "Please select at least one option for {}",
                field_label(field).to_lowercase()
            ))
        } else {
            ValidationOutcome::ok()
        }
    }
}

/// Required, then well-formed. The two failures carry different messages.
pub fn email(field: &'static str) -> impl Fn(&FormState) -> ValidationOutcome {
    move |form| {
        let value = form.text(field).trim();
        if value.is_empty() {
            ValidationOutcome::invalid(format!("{} is required", field_label(field)))
        } else if !is_valid_email(value) {
            ValidationOutcome::invalid("Please enter a valid email address")
        } else {
            ValidationOutcome::ok()
        }
    }
}

/// At least one entry, every entry a well-formed email
pub fn email_list(field: &'static str) -> impl Fn(&FormState) -> ValidationOutcome {
    move |form| {
        let entries: Vec<&str> = form
            .list(field)
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .collect();
        if entries.is_empty() {
            return ValidationOutcome::invalid("Add at least one email to invite");
        }
        match entries.iter().find(|e| !is_valid_email(e)) {
            Some(bad) => ValidationOutcome::invalid(format!("'{bad}' is not a valid email address")),
            None => ValidationOutcome::ok(),
        }
    }
}

pub fn always_valid() -> impl Fn(&FormState) -> ValidationOutcome {
    |_| ValidationOutcome::ok()
}
