//! Onboarding backend client
//!
//! The wizard only ever talks to one endpoint: the final submission.

pub mod error;
pub mod submission;

pub use error::SubmissionError;
pub use submission::{HttpSubmissionClient, RecordingSubmissionClient, SubmissionClient};
