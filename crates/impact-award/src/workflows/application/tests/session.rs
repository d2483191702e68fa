use super::common::*;
use crate::workflows::application::domain::{FileField, FormField, TextField};
use crate::workflows::application::session::{FormSession, SessionStatus};
use crate::workflows::application::steps::FINAL_STEP;
use crate::workflows::application::submission::{SubmissionError, SubmitOutcome};

#[test]
fn new_session_starts_at_first_step_without_errors() {
    let session = FormSession::new();
    assert_eq!(session.current_step(), 0);
    assert!(session.errors().is_empty());
    assert_eq!(session.status(), SessionStatus::InProgress);
    assert_eq!(session.current_descriptor().title, "Company Information");
    assert!(session.completed_steps().is_empty());
}

#[test]
fn advance_is_gated_by_company_section() {
    let mut session = FormSession::new();
    session.set_text(TextField::CompanyName, "Acme");

    assert!(!session.advance());
    assert_eq!(session.current_step(), 0);
    assert_eq!(session.errors().len(), 7);
    assert!(!session.has_error(TextField::CompanyName));

    session.set_text(TextField::ApplicantName, "Jordan Lee");
    session.set_text(TextField::Position, "Director");
    session.set_text(TextField::Email, "x@y.com");
    session.set_text(TextField::ContactNumber, "+60 12-345 6789");
    session.set_text(TextField::Sector, "Technology");
    session.set_text(TextField::YearEstablished, "2020");
    session.set_text(TextField::NumberOfEmployees, "10");

    assert!(session.advance());
    assert_eq!(session.current_step(), 1);
    assert!(session.errors().is_empty());
    assert_eq!(session.completed_steps(), vec![0]);
}

#[test]
fn setting_a_field_clears_only_its_error_without_revalidating() {
    let mut session = FormSession::new();
    assert!(!session.advance());
    assert_eq!(session.errors().len(), 8);

    session.set_text(TextField::Email, "not-an-email");
    assert!(!session.has_error(TextField::Email));
    assert!(session.has_error(TextField::CompanyName));
    assert_eq!(session.errors().len(), 7);

    assert!(!session.advance());
    assert_eq!(
        session.errors().message(TextField::Email),
        Some("Invalid email format")
    );
}

#[test]
fn back_is_unconditional_and_keeps_values() {
    let mut session = FormSession::with_state(complete_form());
    assert!(!session.back());
    assert_eq!(session.current_step(), 0);

    assert!(session.advance());
    assert!(session.advance());
    assert_eq!(session.current_step(), 2);

    session.set_text(TextField::KeyInitiatives, "");
    assert!(session.back());
    assert_eq!(session.current_step(), 1);
    assert_eq!(session.state().company_name, "Acme Social Works");
    assert_eq!(session.state().key_initiatives, "");
}

#[test]
fn back_then_advance_is_deterministic() {
    let mut session = FormSession::with_state(complete_form());
    assert!(session.advance());
    session.set_text(TextField::SocialIssue, " ");

    assert!(!session.advance());
    let first_state = session.state().clone();
    let first_errors = session.errors().clone();

    assert!(session.back());
    assert!(session.advance());
    assert!(!session.advance());

    assert_eq!(session.state(), &first_state);
    assert_eq!(session.errors(), &first_errors);
    assert_eq!(session.current_step(), 1);
}

#[test]
fn clean_final_step_does_not_advance_past_declaration() {
    let mut session = session_at_declaration(true);
    assert_eq!(session.current_step(), FINAL_STEP);
    assert!(session.is_final_step());

    assert!(!session.advance());
    assert_eq!(session.current_step(), FINAL_STEP);
    assert!(session.errors().is_empty());
}

#[test]
fn add_files_appends_in_selection_order() {
    let mut session = FormSession::new();
    session.add_files(FileField::Documents, vec![document("d1", "a.pdf")]);
    session.add_files(
        FileField::Documents,
        vec![document("d2", "b.docx"), document("d1", "a.pdf")],
    );

    let names: Vec<_> = session
        .state()
        .files(FileField::Documents)
        .iter()
        .map(|file| file.name.as_str())
        .collect();
    assert_eq!(names, vec!["a.pdf", "b.docx", "a.pdf"]);
    assert!(session.state().photos.is_empty());
}

#[test]
fn remove_file_shifts_later_entries_and_ignores_out_of_range() {
    let mut session = FormSession::new();
    session.add_files(
        FileField::Photos,
        vec![photo("p1", "one.jpg"), photo("p2", "two.jpg"), photo("p3", "three.jpg")],
    );

    let removed = session.remove_file(FileField::Photos, 1).expect("file removed");
    assert_eq!(removed.name, "two.jpg");
    let removed = session.remove_file(FileField::Photos, 1).expect("next file removed");
    assert_eq!(removed.name, "three.jpg");
    assert!(session.remove_file(FileField::Photos, 1).is_none());
    assert!(session.remove_file(FileField::Photos, 99).is_none());

    assert_eq!(session.state().photos.len(), 1);
    assert_eq!(session.state().photos[0].name, "one.jpg");
}

#[test]
fn replacing_a_file_list_leaves_other_errors_in_place() {
    let mut session = FormSession::new();
    assert!(!session.advance());
    assert_eq!(session.errors().len(), 8);

    session.set_files(
        FileField::Documents,
        vec![document("d1", "plan.pdf"), document("d2", "budget.pdf")],
    );
    session.set_files(FileField::Documents, vec![document("d3", "final.pdf")]);

    assert_eq!(session.state().documents.len(), 1);
    assert_eq!(session.state().documents[0].name, "final.pdf");
    assert_eq!(session.errors().len(), 8);
    assert!(session.has_error(TextField::CompanyName));
}

#[test]
fn submit_requires_accepted_declaration() {
    let gateway = RecordingGateway::default();
    let mut session = session_at_declaration(false);

    match session.submit(&gateway).expect("gateway not reached") {
        SubmitOutcome::Rejected(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(errors.contains(FormField::Declaration));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(gateway.deliveries().is_empty());
    assert!(session.has_error(FormField::Declaration));

    session.set_declaration(true);
    assert!(!session.has_error(FormField::Declaration));

    let outcome = session.submit(&gateway).expect("delivery succeeds");
    assert!(outcome.is_accepted());

    let deliveries = gateway.deliveries();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(&deliveries[0], session.state());
    assert_eq!(deliveries[0], complete_form());
    assert_eq!(session.status(), SessionStatus::Submitted);
}

#[test]
fn submit_before_declaration_step_is_refused() {
    let gateway = RecordingGateway::default();
    let mut session = FormSession::with_state(complete_form());

    match session.submit(&gateway).expect("no delivery attempted") {
        SubmitOutcome::NotAtFinalStep { current_step } => assert_eq!(current_step, 0),
        other => panic!("expected not-at-final-step, got {other:?}"),
    }
    assert!(gateway.deliveries().is_empty());
    assert!(session.errors().is_empty());
}

#[test]
fn submitted_session_is_frozen() {
    let gateway = RecordingGateway::default();
    let mut session = session_at_declaration(true);
    let receipt = match session.submit(&gateway).expect("delivery succeeds") {
        SubmitOutcome::Accepted(receipt) => receipt,
        other => panic!("expected acceptance, got {other:?}"),
    };

    session.set_text(TextField::CompanyName, "Changed");
    session.add_files(FileField::Photos, vec![photo("p9", "late.jpg")]);
    assert!(session.remove_file(FileField::Documents, 0).is_none());
    assert!(!session.back());
    assert!(!session.advance());

    assert_eq!(session.state(), &complete_form());
    assert_eq!(session.current_step(), FINAL_STEP);

    match session.submit(&gateway).expect("no delivery attempted") {
        SubmitOutcome::AlreadySubmitted(again) => assert_eq!(again, receipt),
        other => panic!("expected original receipt, got {other:?}"),
    }
    assert_eq!(gateway.deliveries().len(), 1);
}

#[test]
fn gateway_failure_leaves_session_open_for_retry() {
    let mut session = session_at_declaration(true);

    match session.submit(&OfflineGateway) {
        Err(SubmissionError::Transport(reason)) => assert!(reason.contains("offline")),
        other => panic!("expected transport failure, got {other:?}"),
    }
    assert_eq!(session.status(), SessionStatus::InProgress);

    let gateway = RecordingGateway::default();
    assert!(session.submit(&gateway).expect("retry succeeds").is_accepted());
}

#[test]
fn refused_delivery_keeps_session_open_with_reason() {
    let mut session = session_at_declaration(true);

    match session.submit(&RefusingGateway) {
        Err(SubmissionError::Refused(reason)) => {
            assert_eq!(reason, "Acme Social Works already has an application on file")
        }
        other => panic!("expected refusal, got {other:?}"),
    }
    assert!(!session.is_submitted());
    assert!(session.receipt().is_none());
    assert!(session.errors().is_empty());
}

#[test]
fn word_counts_track_limited_fields() {
    let mut session = FormSession::new();
    session.set_text(TextField::MissionStatement, words(12));

    let counts = session.word_counts();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].field, TextField::MissionStatement);
    assert_eq!((counts[0].words, counts[0].limit), (12, 400));
    assert_eq!(counts[1].field, TextField::PersonalStory);
    assert_eq!((counts[1].words, counts[1].limit), (0, 300));
}
