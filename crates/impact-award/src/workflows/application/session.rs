use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{FieldUpdate, FileField, FileHandle, FormField, FormState, TextField};
use super::steps::{StepDescriptor, FINAL_STEP, STEPS};
use super::submission::{SubmissionError, SubmissionGateway, SubmissionReceipt, SubmitOutcome};
use super::validation::{self, word_count, word_limit, ErrorMap};

/// Lifecycle of a single form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Submitted,
}

/// Live word counter for a length-limited field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub field: TextField,
    pub words: usize,
    pub limit: usize,
}

/// One applicant's pass through the form: the values entered, the errors from the last
/// validation pass, and the current step.
///
/// Mutators are the only write path. Once submitted the session is frozen: writes and
/// navigation are ignored and repeated submits return the original receipt.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    state: FormState,
    errors: ErrorMap,
    current_step: usize,
    receipt: Option<SubmissionReceipt>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from previously collected values, still at the first step.
    pub fn with_state(state: FormState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn current_descriptor(&self) -> &'static StepDescriptor {
        &STEPS[self.current_step]
    }

    pub fn is_final_step(&self) -> bool {
        self.current_step == FINAL_STEP
    }

    /// Steps behind the current one.
    pub fn completed_steps(&self) -> Vec<usize> {
        (0..self.current_step).collect()
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        self.receipt.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        if self.receipt.is_some() {
            SessionStatus::Submitted
        } else {
            SessionStatus::InProgress
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.receipt.is_some()
    }

    pub fn word_counts(&self) -> Vec<WordCount> {
        [TextField::MissionStatement, TextField::PersonalStory]
            .into_iter()
            .filter_map(|field| {
                word_limit(field).map(|limit| WordCount {
                    field,
                    words: word_count(self.state.text(field)),
                    limit,
                })
            })
            .collect()
    }

    /// Overwrite one field and drop its stale error. Does not re-validate.
    pub fn set_field(&mut self, update: FieldUpdate) {
        if self.is_submitted() {
            warn!(field = %update.field(), "ignoring field update on submitted form");
            return;
        }
        let field = update.field();
        self.state.apply(update);
        self.errors.remove(field);
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        self.set_field(FieldUpdate::text(field, value));
    }

    pub fn set_declaration(&mut self, accepted: bool) {
        self.set_field(FieldUpdate::Declaration { accepted });
    }

    pub fn set_files(&mut self, field: FileField, files: Vec<FileHandle>) {
        self.set_field(FieldUpdate::Files { field, files });
    }

    /// Append newly picked files after the existing ones. No de-duplication or filtering.
    pub fn add_files(&mut self, field: FileField, incoming: impl IntoIterator<Item = FileHandle>) {
        if self.is_submitted() {
            warn!(field = field.key(), "ignoring file selection on submitted form");
            return;
        }
        let files = self.state.files_mut(field);
        let before = files.len();
        files.extend(incoming);
        debug!(field = field.key(), added = files.len() - before, "files attached");
    }

    /// Remove the file at `index`; later files shift down. Out of range is a no-op.
    pub fn remove_file(&mut self, field: FileField, index: usize) -> Option<FileHandle> {
        if self.is_submitted() {
            warn!(field = field.key(), "ignoring file removal on submitted form");
            return None;
        }
        let files = self.state.files_mut(field);
        (index < files.len()).then(|| files.remove(index))
    }

    /// Validate the current step and move forward only when it is clean.
    ///
    /// Returns whether the step index changed. A clean final step stays put.
    pub fn advance(&mut self) -> bool {
        if self.is_submitted() {
            return false;
        }

        self.errors = validation::validate(self.current_step, &self.state);
        if !self.errors.is_empty() {
            debug!(
                step = self.current_step,
                failures = self.errors.len(),
                "step validation failed"
            );
            return false;
        }

        if self.current_step < FINAL_STEP {
            self.current_step += 1;
            debug!(step = self.current_step, "advanced to next step");
            return true;
        }

        false
    }

    /// Step back without validating. Entered values are kept.
    pub fn back(&mut self) -> bool {
        if self.is_submitted() || self.current_step == 0 {
            return false;
        }
        self.current_step -= 1;
        true
    }

    /// Re-validate the declaration step and hand the form to `gateway` when clean.
    ///
    /// Gateway failures leave the session unsubmitted so the applicant can retry.
    pub fn submit<G>(&mut self, gateway: &G) -> Result<SubmitOutcome, SubmissionError>
    where
        G: SubmissionGateway + ?Sized,
    {
        if let Some(receipt) = &self.receipt {
            return Ok(SubmitOutcome::AlreadySubmitted(receipt.clone()));
        }

        if !self.is_final_step() {
            return Ok(SubmitOutcome::NotAtFinalStep {
                current_step: self.current_step,
            });
        }

        self.errors = validation::validate(FINAL_STEP, &self.state);
        if !self.errors.is_empty() {
            return Ok(SubmitOutcome::Rejected(self.errors.clone()));
        }

        let receipt = gateway.deliver(&self.state)?;
        info!(submission_id = %receipt.submission_id, "application submitted");
        self.receipt = Some(receipt.clone());
        Ok(SubmitOutcome::Accepted(receipt))
    }

    /// Whether `field` currently carries an error.
    pub fn has_error(&self, field: impl Into<FormField>) -> bool {
        self.errors.contains(field)
    }
}
