//! Type definitions for the onboarding wizard

use serde::Serialize;

/// Which input widget renders a step. Purely a rendering hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Text,
    Url,
    Select,
    Radio,
    MultiSelect,
    Upload,
    TextArea,
    Email,
    Tel,
    Review,
    /// Several values collected on one page (e.g. a list of invite emails)
    Composite,
}

impl StepKind {
    pub fn label(&self) -> &'static str {
        match self {
            StepKind::Text => "text",
            StepKind::Url => "url",
            StepKind::Select => "select",
            StepKind::Radio => "radio",
            StepKind::MultiSelect => "multiselect",
            StepKind::Upload => "upload",
            StepKind::TextArea => "textarea",
            StepKind::Email => "email",
            StepKind::Tel => "tel",
            StepKind::Review => "review",
            StepKind::Composite => "composite",
        }
    }

    /// Whether the step stores a list of strings rather than a single string
    pub fn is_list(&self) -> bool {
        matches!(self, StepKind::MultiSelect | StepKind::Composite)
    }
}

/// One page of the wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Stable key used for validation dispatch, persistence and deep links
    pub id: &'static str,
    /// Prompt shown above the input
    pub title: &'static str,
    pub kind: StepKind,
    /// Optional steps never block progression
    pub optional: bool,
    /// Choices for select/radio/multiselect steps, empty otherwise
    pub options: &'static [&'static str],
    /// Extra help line shown under the title
    pub hint: Option<&'static str>,
}

impl Step {
    pub const fn new(id: &'static str, title: &'static str, kind: StepKind) -> Self {
        Self {
            id,
            title,
            kind,
            optional: false,
            options: &[],
            hint: None,
        }
    }

    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub const fn with_options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }

    pub const fn with_hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }
}

/// Result of a single validation check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub error: Option<String>,
}

impl ValidationOutcome {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

/// Result of asking the session to move forward
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextOutcome {
    /// Moved to the given step index
    Advanced(usize),
    /// Current step failed validation; index unchanged
    Blocked(String),
    /// Last step is satisfied; the caller should submit
    ReadyToSubmit,
}

/// Current position plus the transient inline error
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub current_index: usize,
    pub validation_error: Option<String>,
}

/// One row of the review screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    pub index: usize,
    pub step_id: &'static str,
    pub title: &'static str,
    pub display_value: String,
}

/// Validation result for one visitable step, used by headless commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepAudit {
    pub index: usize,
    pub step_id: &'static str,
    pub outcome: ValidationOutcome,
}
