use serde::Serialize;

use super::domain::{FileField, FormField, TextField, SECTOR_OPTIONS};
use super::validation::{self, rules};

/// Icon reference handed to the host; rendering is entirely the host's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepIcon {
    Building,
    Heart,
    Users,
    BarChart,
    TrendingUp,
    FileText,
    User,
    CheckCircle,
}

/// Static description of one form section. The index in [`STEPS`] is its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepDescriptor {
    pub title: &'static str,
    pub icon: StepIcon,
    pub fields: &'static [FormField],
}

pub const STEP_COUNT: usize = 8;
pub const FINAL_STEP: usize = STEP_COUNT - 1;

pub static STEPS: [StepDescriptor; STEP_COUNT] = [
    StepDescriptor {
        title: "Company Information",
        icon: StepIcon::Building,
        fields: &[
            FormField::Text(TextField::CompanyName),
            FormField::Text(TextField::ApplicantName),
            FormField::Text(TextField::Position),
            FormField::Text(TextField::Email),
            FormField::Text(TextField::ContactNumber),
            FormField::Text(TextField::Sector),
            FormField::Text(TextField::YearEstablished),
            FormField::Text(TextField::NumberOfEmployees),
        ],
    },
    StepDescriptor {
        title: "Social Impact Overview",
        icon: StepIcon::Heart,
        fields: &[
            FormField::Text(TextField::MissionStatement),
            FormField::Text(TextField::SocialIssue),
            FormField::Text(TextField::BusinessModel),
        ],
    },
    StepDescriptor {
        title: "Implementation & Activities",
        icon: StepIcon::Users,
        fields: &[
            FormField::Text(TextField::KeyInitiatives),
            FormField::Text(TextField::StakeholderEngagement),
            FormField::Text(TextField::Partnerships),
        ],
    },
    StepDescriptor {
        title: "Impact Measurement",
        icon: StepIcon::BarChart,
        fields: &[
            FormField::Text(TextField::MeasurableImpact),
            FormField::Text(TextField::FeedbackExamples),
            FormField::Text(TextField::ImpactContribution),
        ],
    },
    StepDescriptor {
        title: "Future & Scalability",
        icon: StepIcon::TrendingUp,
        fields: &[
            FormField::Text(TextField::FutureGoals),
            FormField::Text(TextField::SustainabilityPlan),
            FormField::Text(TextField::SupportNeeded),
        ],
    },
    StepDescriptor {
        title: "Supporting Evidence",
        icon: StepIcon::FileText,
        fields: &[
            FormField::Files(FileField::Documents),
            FormField::Files(FileField::Photos),
            FormField::Text(TextField::MediaLinks),
        ],
    },
    StepDescriptor {
        title: "Personal Story",
        icon: StepIcon::User,
        fields: &[FormField::Text(TextField::PersonalStory)],
    },
    StepDescriptor {
        title: "Declaration",
        icon: StepIcon::CheckCircle,
        fields: &[FormField::Declaration],
    },
];

pub fn descriptor(step: usize) -> Option<&'static StepDescriptor> {
    STEPS.get(step)
}

/// Index of the section that collects `field`.
pub fn owning_step(field: FormField) -> usize {
    STEPS
        .iter()
        .position(|step| step.fields.contains(&field))
        .unwrap_or(FINAL_STEP)
}

/// Presentation metadata for one input. Options and accept hints are advisory.
#[derive(Debug, Clone, Serialize)]
pub struct FieldOverview {
    pub field: FormField,
    pub label: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_limit: Option<usize>,
}

impl FieldOverview {
    fn describe(field: FormField, required: bool) -> Self {
        let (accept, options, word_limit) = match field {
            FormField::Files(files) => (Some(files.accept_hint()), None, None),
            FormField::Text(TextField::Sector) => (None, Some(SECTOR_OPTIONS), None),
            FormField::Text(text) => (None, None, validation::word_limit(text)),
            FormField::Declaration => (None, None, None),
        };
        Self {
            field,
            label: field.label(),
            required,
            accept,
            options,
            word_limit,
        }
    }
}

/// Step table enriched with field metadata and the rules that gate each section.
#[derive(Debug, Clone, Serialize)]
pub struct StepOverview {
    pub index: usize,
    pub title: &'static str,
    pub icon: StepIcon,
    pub fields: Vec<FieldOverview>,
}

pub fn overview() -> Vec<StepOverview> {
    STEPS
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let required = rules::required_fields(index);
            StepOverview {
                index,
                title: step.title,
                icon: step.icon,
                fields: step
                    .fields
                    .iter()
                    .map(|field| FieldOverview::describe(*field, required.contains(field)))
                    .collect(),
            }
        })
        .collect()
}
