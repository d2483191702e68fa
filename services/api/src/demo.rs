use crate::infra::AcknowledgingGateway;
use chrono::Local;
use clap::Args;
use impact_award::error::AppError;
use impact_award::workflows::application::steps::{self, FINAL_STEP, STEP_COUNT};
use impact_award::workflows::application::{
    ApplicationServiceError, ErrorMap, FileField, FileHandle, FormField, FormSession, SubmitOutcome,
    TextField,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Leave the declaration unchecked to show the rejected submission path.
    #[arg(long)]
    pub(crate) decline_declaration: bool,
    /// Print the delivered application payload as JSON.
    #[arg(long)]
    pub(crate) show_payload: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        decline_declaration,
        show_payload,
    } = args;

    println!("Social Impact Entrepreneur Award: application walkthrough");
    let gateway = AcknowledgingGateway::default();
    let mut session = FormSession::new();

    println!("\nAttempting to continue with an empty form");
    session.advance();
    render_errors(session.errors());

    while session.current_step() < FINAL_STEP {
        let step = session.current_step();
        let descriptor = session.current_descriptor();
        println!("\nStep {}/{}: {}", step + 1, STEP_COUNT, descriptor.title);

        for field in descriptor.fields {
            fill(&mut session, *field);
        }
        for counter in session.word_counts() {
            if steps::owning_step(counter.field.into()) == step {
                println!(
                    "  {}: {} / {} words",
                    counter.field.label(),
                    counter.words,
                    counter.limit
                );
            }
        }

        if !session.advance() {
            render_errors(session.errors());
            return Ok(());
        }
        println!("  -> section complete");
    }

    println!(
        "\nStep {}/{}: {}",
        FINAL_STEP + 1,
        STEP_COUNT,
        session.current_descriptor().title
    );
    session.set_declaration(!decline_declaration);
    println!(
        "  Declaration {}",
        if decline_declaration { "left unchecked" } else { "accepted" }
    );

    let outcome = session
        .submit(&gateway)
        .map_err(ApplicationServiceError::from)?;
    match outcome {
        SubmitOutcome::Accepted(receipt) => {
            println!(
                "\nSubmitted as {} at {}",
                receipt.submission_id,
                receipt.received_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
            );
        }
        SubmitOutcome::Rejected(errors) => {
            println!("\nSubmission rejected");
            render_errors(&errors);
            return Ok(());
        }
        SubmitOutcome::NotAtFinalStep { current_step } => {
            println!("\nSubmission unavailable from step {}", current_step + 1);
            return Ok(());
        }
        SubmitOutcome::AlreadySubmitted(receipt) => {
            println!("\nAlready submitted as {}", receipt.submission_id);
        }
    }

    if show_payload {
        for delivery in gateway.deliveries() {
            match serde_json::to_string_pretty(&delivery) {
                Ok(json) => println!("  Delivered payload:\n{}", json),
                Err(err) => println!("  Delivered payload unavailable: {}", err),
            }
        }
    }

    Ok(())
}

pub(crate) fn print_steps() {
    for step in steps::overview() {
        println!("{}. {}", step.index + 1, step.title);
        for field in &step.fields {
            let marker = if field.required { "*" } else { " " };
            let mut line = format!("   {} {} [{}]", marker, field.label, field.field.key());
            if let Some(limit) = field.word_limit {
                line.push_str(&format!(" (max {limit} words)"));
            }
            if let Some(accept) = field.accept {
                line.push_str(&format!(" (accepts {accept})"));
            }
            println!("{line}");
            if let Some(options) = field.options {
                println!("       options: {}", options.join(", "));
            }
        }
    }
    println!("\n* required to continue");
}

fn fill(session: &mut FormSession, field: FormField) {
    match field {
        FormField::Text(text) => session.set_text(text, sample_value(text)),
        FormField::Files(files) => {
            let picked = sample_files(files)
                .into_iter()
                .map(FileHandle::with_guessed_media_type)
                .collect::<Vec<_>>();
            println!("  Attached {} file(s) to {}", picked.len(), files.label());
            session.add_files(files, picked);
        }
        FormField::Declaration => {}
    }
}

fn render_errors(errors: &ErrorMap) {
    if errors.is_empty() {
        return;
    }
    println!("  {} field(s) need attention:", errors.len());
    for (field, error) in errors.iter() {
        println!("    - {}: {}", field.label(), error.message);
    }
}

fn sample_files(field: FileField) -> Vec<FileHandle> {
    match field {
        FileField::Documents => vec![
            FileHandle::new("doc-1", "impact-report-2024.pdf", 482_113),
            FileHandle::new("doc-2", "beneficiary-survey.xlsx", 91_406),
        ],
        FileField::Photos => vec![FileHandle::new("img-1", "community-workshop.jpg", 1_208_331)],
    }
}

fn sample_value(field: TextField) -> &'static str {
    match field {
        TextField::CompanyName => "Lumen Microgrid Co-operative",
        TextField::ApplicantName => "Farah Idris",
        TextField::Position => "Managing Director",
        TextField::Email => "farah@lumen.coop",
        TextField::ContactNumber => "+60 3-2141 0099",
        TextField::Sector => "Social Enterprise",
        TextField::YearEstablished => "2017",
        TextField::NumberOfEmployees => "38",
        TextField::MissionStatement => {
            "We bring reliable solar power to rural clinics and schools and train local youth to maintain it."
        }
        TextField::SocialIssue => "Unreliable electricity in remote communities",
        TextField::BusinessModel => "Pay-as-you-go energy contracts with community co-owners",
        TextField::KeyInitiatives => "Clinic microgrids, technician apprenticeships",
        TextField::StakeholderEngagement => "Quarterly village assemblies and clinic boards",
        TextField::Partnerships => "District health office, two polytechnics",
        TextField::MeasurableImpact => "42 clinics powered, 310 technicians certified",
        TextField::FeedbackExamples => "Night deliveries no longer rely on torchlight",
        TextField::ImpactContribution => "Community co-ownership keeps churn under 3%",
        TextField::FutureGoals => "Reach 150 clinics across three states",
        TextField::SustainabilityPlan => "Maintenance fees cover technician salaries",
        TextField::SupportNeeded => "Introductions to blended-finance investors",
        TextField::MediaLinks => "https://example.org/press/lumen",
        TextField::PersonalStory => {
            "My mother was a midwife who worked by lamplight; this company is my answer to that."
        }
    }
}
