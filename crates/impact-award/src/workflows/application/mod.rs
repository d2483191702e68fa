//! Award application intake: the eight-step form, its per-step validation rules, and the
//! session controller that gates advancement on a clean step.
//!
//! [`FormSession`] is the single-owner core. [`ApplicationFormService`] hosts sessions for the
//! HTTP router and hands finished applications to a [`SubmissionGateway`].

pub mod domain;
pub mod router;
pub mod service;
pub mod session;
pub mod steps;
pub mod submission;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    FieldUpdate, FileField, FileHandle, FileId, FormField, FormState, TextField, UnknownField,
    SECTOR_OPTIONS,
};
pub use router::application_router;
pub use service::{
    ApplicationFormService, ApplicationServiceError, FileRemoval, Navigation, SessionId,
    SessionView, SubmissionResult, DEFAULT_MAX_SESSIONS,
};
pub use session::{FormSession, SessionStatus, WordCount};
pub use steps::{
    FieldOverview, StepDescriptor, StepIcon, StepOverview, FINAL_STEP, STEPS, STEP_COUNT,
};
pub use submission::{
    next_submission_id, SubmissionError, SubmissionGateway, SubmissionId, SubmissionReceipt,
    SubmitOutcome,
};
pub use validation::{validate, ErrorKind, ErrorMap, FieldError};
