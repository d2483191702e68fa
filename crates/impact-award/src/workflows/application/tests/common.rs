use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::application::domain::{FileHandle, FormState};
use crate::workflows::application::service::ApplicationFormService;
use crate::workflows::application::session::FormSession;
use crate::workflows::application::steps::FINAL_STEP;
use crate::workflows::application::submission::{
    SubmissionError, SubmissionGateway, SubmissionReceipt,
};

/// Every field filled with values that pass all step rules.
pub(super) fn complete_form() -> FormState {
    FormState {
        company_name: "Acme Social Works".to_string(),
        applicant_name: "Nur Aisyah".to_string(),
        position: "Founder".to_string(),
        email: "founder@acme.org".to_string(),
        contact_number: "+60 12-345 6789".to_string(),
        sector: "Social Enterprise".to_string(),
        year_established: "2019".to_string(),
        number_of_employees: "24".to_string(),
        mission_statement: "We train rural women as solar technicians.".to_string(),
        social_issue: "Energy poverty in off-grid villages".to_string(),
        business_model: "Installation contracts funded by microloans".to_string(),
        key_initiatives: "Technician academy and village microgrids".to_string(),
        stakeholder_engagement: "Monthly village councils".to_string(),
        partnerships: "State energy agency, two universities".to_string(),
        measurable_impact: "1,200 households connected".to_string(),
        feedback_examples: "Clinics now refrigerate vaccines".to_string(),
        impact_contribution: "Impact drives 60% of repeat contracts".to_string(),
        future_goals: "Expand to three more districts".to_string(),
        sustainability_plan: "Maintenance subscriptions".to_string(),
        support_needed: "Mentoring on export markets".to_string(),
        documents: vec![document("doc-1", "annual-report.pdf")],
        photos: vec![photo("img-1", "microgrid.jpg")],
        media_links: "https://news.example.com/acme".to_string(),
        personal_story: "I grew up studying by kerosene lamp.".to_string(),
        declaration: true,
    }
}

pub(super) fn document(id: &str, name: &str) -> FileHandle {
    FileHandle {
        media_type: Some("application/pdf".to_string()),
        ..FileHandle::new(id, name, 48_213)
    }
}

pub(super) fn photo(id: &str, name: &str) -> FileHandle {
    FileHandle {
        media_type: Some("image/jpeg".to_string()),
        ..FileHandle::new(id, name, 311_872)
    }
}

pub(super) fn words(count: usize) -> String {
    vec!["impact"; count].join(" ")
}

/// Session holding a complete form, walked forward to the declaration step.
pub(super) fn session_at_declaration(declaration: bool) -> FormSession {
    let mut state = complete_form();
    state.declaration = declaration;
    let mut session = FormSession::with_state(state);
    while session.current_step() < FINAL_STEP {
        assert!(session.advance(), "step {} should validate", session.current_step());
    }
    session
}

#[derive(Default)]
pub(super) struct RecordingGateway {
    deliveries: Mutex<Vec<FormState>>,
}

impl RecordingGateway {
    pub(super) fn deliveries(&self) -> Vec<FormState> {
        self.deliveries
            .lock()
            .expect("gateway mutex poisoned")
            .clone()
    }
}

impl SubmissionGateway for RecordingGateway {
    fn deliver(&self, application: &FormState) -> Result<SubmissionReceipt, SubmissionError> {
        self.deliveries
            .lock()
            .expect("gateway mutex poisoned")
            .push(application.clone());
        Ok(SubmissionReceipt::issue())
    }
}

pub(super) struct OfflineGateway;

impl SubmissionGateway for OfflineGateway {
    fn deliver(&self, _application: &FormState) -> Result<SubmissionReceipt, SubmissionError> {
        Err(SubmissionError::Transport("mail relay offline".to_string()))
    }
}

/// Rejects every delivery the way a downstream intake system refuses a duplicate.
pub(super) struct RefusingGateway;

impl SubmissionGateway for RefusingGateway {
    fn deliver(&self, application: &FormState) -> Result<SubmissionReceipt, SubmissionError> {
        Err(SubmissionError::Refused(format!(
            "{} already has an application on file",
            application.company_name
        )))
    }
}

pub(super) fn build_service() -> (
    ApplicationFormService<RecordingGateway>,
    Arc<RecordingGateway>,
) {
    let gateway = Arc::new(RecordingGateway::default());
    (ApplicationFormService::new(gateway.clone()), gateway)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
