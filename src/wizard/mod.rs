//! Brand onboarding wizard: steps, answers, navigation and validation

pub mod catalog;
pub mod form;
pub mod sequencer;
pub mod session;
pub mod types;
pub mod upload;
pub mod validator;

pub use form::{create_initial_form_state, FieldValue, FormState, UserIdentity};
pub use sequencer::{progress_percent, team_invitation_skip_rule, SkipRule, StepSequencer};
pub use session::{WizardError, WizardSession};
pub use types::*;
pub use upload::{check_logo_file, LogoError};
pub use validator::{is_valid_email, StepValidator};
