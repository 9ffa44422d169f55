//! Wizard session: owns the answers and the current position
//!
//! Composes the validator and sequencer into the navigation entry points the
//! UI calls (`handle_next`, `handle_prev`, `go_to_step`) and performs the
//! final submission.

use thiserror::Error;

use super::catalog::brand_onboarding_steps;
use super::form::{create_initial_form_state, FieldValue, FormState, UserIdentity};
use super::sequencer::{progress_percent, team_invitation_skip_rule, StepSequencer};
use super::types::{
    NavigationState, NextOutcome, ReviewEntry, Step, StepAudit, StepKind, ValidationOutcome,
};
use super::upload::check_logo_file;
use super::validator::StepValidator;
use crate::api::{SubmissionClient, SubmissionError};
use crate::persistence::FormPersistenceGuard;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WizardError {
    #[error("step {index} is out of range (wizard has {len} steps)")]
    StepOutOfRange { index: usize, len: usize },

    #[error("unknown step '{0}'")]
    UnknownStep(String),
}

pub struct WizardSession {
    sequencer: StepSequencer,
    validator: StepValidator,
    form: FormState,
    nav: NavigationState,
    persistence: FormPersistenceGuard,
    submission_error: Option<String>,
    completed: bool,
}

impl WizardSession {
    /// Start a session, rehydrating answers from `persistence` when a
    /// snapshot exists and falling back to defaults for `identity` otherwise
    pub fn new(
        sequencer: StepSequencer,
        validator: StepValidator,
        mut persistence: FormPersistenceGuard,
        identity: Option<&UserIdentity>,
    ) -> Self {
        let form = match persistence.restore() {
            Some(form) => {
                tracing::info!(key = persistence.storage_key(), "Resuming saved onboarding answers");
                form
            }
            None => create_initial_form_state(sequencer.steps(), identity),
        };

        Self {
            sequencer,
            validator,
            form,
            nav: NavigationState::default(),
            persistence,
            submission_error: None,
            completed: false,
        }
    }

    /// Session over the brand onboarding catalog with its skip rule
    pub fn brand_onboarding(
        persistence: FormPersistenceGuard,
        identity: Option<&UserIdentity>,
    ) -> Self {
        Self::new(
            StepSequencer::new(brand_onboarding_steps(), vec![team_invitation_skip_rule()]),
            StepValidator::brand_onboarding(),
            persistence,
            identity,
        )
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn steps(&self) -> &[Step] {
        self.sequencer.steps()
    }

    pub fn sequencer(&self) -> &StepSequencer {
        &self.sequencer
    }

    pub fn current_index(&self) -> usize {
        self.nav.current_index
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.sequencer.step(self.nav.current_index)
    }

    pub fn is_first(&self) -> bool {
        self.sequencer
            .prev_index(self.nav.current_index, &self.form)
            .is_none()
    }

    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.nav.current_index, self.sequencer.len())
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn validation_error(&self) -> Option<&str> {
        self.nav.validation_error.as_deref()
    }

    pub fn submission_error(&self) -> Option<&str> {
        self.submission_error.as_deref()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    // ─── Editing ────────────────────────────────────────────────────────────

    /// Store an answer, clear the inline error, and mirror the snapshot
    pub fn set_field(&mut self, field: &str, value: impl Into<FieldValue>) {
        self.form.set(field, value);
        self.nav.validation_error = None;
        // Best-effort; the guard has already logged any failure
        let _ = self.persistence.persist(&self.form);
    }

    /// Show an error produced outside the validator (e.g. a rejected file)
    pub fn set_validation_error(&mut self, error: impl Into<String>) {
        self.nav.validation_error = Some(error.into());
    }

    // ─── Navigation ─────────────────────────────────────────────────────────

    /// Validate the current step, then move to the next visitable one.
    ///
    /// On the last step a passing validation yields
    /// [`NextOutcome::ReadyToSubmit`] instead of moving.
    pub fn handle_next(&mut self) -> NextOutcome {
        let current = self.nav.current_index;
        let Some(step) = self.sequencer.step(current) else {
            return NextOutcome::Blocked("Unknown step".to_string());
        };

        let outcome = self.check_step(step);
        if !outcome.valid {
            let error = outcome.error.unwrap_or_else(|| "Invalid answer".to_string());
            tracing::debug!(step = step.id, index = current, error = %error, "Step blocked");
            self.nav.validation_error = Some(error.clone());
            return NextOutcome::Blocked(error);
        }

        self.nav.validation_error = None;
        let next = self.sequencer.next_index(current, &self.form);
        if next >= self.sequencer.len() {
            return NextOutcome::ReadyToSubmit;
        }

        tracing::debug!(from = step.id, index = next, "Advanced");
        self.nav.current_index = next;
        NextOutcome::Advanced(next)
    }

    /// Move to the previous visitable step. Returns false at the start.
    pub fn handle_prev(&mut self) -> bool {
        match self.sequencer.prev_index(self.nav.current_index, &self.form) {
            Some(prev) => {
                self.nav.current_index = prev;
                self.nav.validation_error = None;
                true
            }
            None => false,
        }
    }

    /// Jump directly to a step (review screen deep link). No validation runs
    /// on entry; the next forward move validates as usual.
    pub fn go_to_step(&mut self, index: usize) -> Result<(), WizardError> {
        if index >= self.sequencer.len() {
            return Err(WizardError::StepOutOfRange {
                index,
                len: self.sequencer.len(),
            });
        }
        self.nav.current_index = index;
        self.nav.validation_error = None;
        Ok(())
    }

    pub fn go_to_step_id(&mut self, step_id: &str) -> Result<(), WizardError> {
        let index = self
            .sequencer
            .position(step_id)
            .ok_or_else(|| WizardError::UnknownStep(step_id.to_string()))?;
        self.go_to_step(index)
    }

    // ─── Review / audit ─────────────────────────────────────────────────────

    /// Answers for every visitable, non-review step in order
    pub fn review_entries(&self) -> Vec<ReviewEntry> {
        self.sequencer
            .visitable(&self.form)
            .into_iter()
            .filter_map(|index| {
                let step = self.sequencer.step(index)?;
                if step.kind == StepKind::Review {
                    return None;
                }
                Some(ReviewEntry {
                    index,
                    step_id: step.id,
                    title: step.title,
                    display_value: self
                        .form
                        .get(step.id)
                        .map(FieldValue::display)
                        .unwrap_or_default(),
                })
            })
            .collect()
    }

    /// Validation outcome for every visitable step
    pub fn audit(&self) -> Vec<StepAudit> {
        self.sequencer
            .visitable(&self.form)
            .into_iter()
            .filter_map(|index| {
                let step = self.sequencer.step(index)?;
                Some(StepAudit {
                    index,
                    step_id: step.id,
                    outcome: self.check_step(step),
                })
            })
            .collect()
    }

    /// First visitable step that fails validation
    pub fn first_incomplete(&self) -> Option<StepAudit> {
        self.audit().into_iter().find(|a| !a.outcome.valid)
    }

    /// Validator rules plus the file check for upload steps
    fn check_step(&self, step: &Step) -> ValidationOutcome {
        let outcome = self.validator.validate_step(step, &self.form);
        if !outcome.valid || step.kind != StepKind::Upload {
            return outcome;
        }
        match check_logo_file(self.form.text(step.id)) {
            Ok(_) => outcome,
            Err(e) => ValidationOutcome::invalid(e.to_string()),
        }
    }

    // ─── Completion ─────────────────────────────────────────────────────────

    /// Submit the current answers.
    ///
    /// Success erases the stored snapshot and marks the session complete.
    /// Failure keeps every answer and the current step so the user can retry.
    pub async fn submit(&mut self, client: &dyn SubmissionClient) -> Result<(), SubmissionError> {
        self.submission_error = None;
        let result = client.submit(&self.form).await;

        match result {
            Ok(()) => {
                let _ = self.persistence.complete();
                self.completed = true;
                tracing::info!("Onboarding complete");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Onboarding submission failed");
                self.submission_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
