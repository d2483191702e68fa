use std::sync::OnceLock;

use regex::Regex;

use super::super::domain::{FormField, TextField};
use super::super::steps::STEP_COUNT;
use super::FieldError;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

pub(crate) const DECLARATION_MESSAGE: &str = "You must accept the declaration";

/// Secondary check evaluated only once a field holds a non-blank value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Check {
    Email,
    MaxWords(usize),
}

impl Check {
    fn apply(self, value: &str) -> Option<FieldError> {
        match self {
            Check::Email if !is_valid_email(value) => {
                Some(FieldError::constraint("Invalid email format"))
            }
            Check::MaxWords(limit) if word_count(value) > limit => Some(FieldError::constraint(
                format!("Maximum {limit} words allowed"),
            )),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldRule {
    pub field: TextField,
    pub required: bool,
    pub check: Option<Check>,
}

impl FieldRule {
    const fn required(field: TextField) -> Self {
        Self {
            field,
            required: true,
            check: None,
        }
    }

    const fn optional(field: TextField) -> Self {
        Self {
            field,
            required: false,
            check: None,
        }
    }

    const fn with(self, check: Check) -> Self {
        Self {
            check: Some(check),
            ..self
        }
    }

    /// Required check first; a blank field never reaches its secondary check.
    pub(crate) fn evaluate(&self, value: &str) -> Option<FieldError> {
        if value.trim().is_empty() {
            return self
                .required
                .then(|| FieldError::missing(required_message(self.field)));
        }
        self.check.and_then(|check| check.apply(value))
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct StepRules {
    pub fields: &'static [FieldRule],
    pub declaration: bool,
}

const fn fields(fields: &'static [FieldRule]) -> StepRules {
    StepRules {
        fields,
        declaration: false,
    }
}

const COMPANY_INFORMATION: &[FieldRule] = &[
    FieldRule::required(TextField::CompanyName),
    FieldRule::required(TextField::ApplicantName),
    FieldRule::required(TextField::Position),
    FieldRule::required(TextField::Email).with(Check::Email),
    FieldRule::required(TextField::ContactNumber),
    FieldRule::required(TextField::Sector),
    FieldRule::required(TextField::YearEstablished),
    FieldRule::required(TextField::NumberOfEmployees),
];

const SOCIAL_IMPACT_OVERVIEW: &[FieldRule] = &[
    FieldRule::required(TextField::MissionStatement).with(Check::MaxWords(400)),
    FieldRule::required(TextField::SocialIssue),
    FieldRule::required(TextField::BusinessModel),
];

const IMPLEMENTATION: &[FieldRule] = &[
    FieldRule::required(TextField::KeyInitiatives),
    FieldRule::required(TextField::StakeholderEngagement),
    FieldRule::required(TextField::Partnerships),
];

const IMPACT_MEASUREMENT: &[FieldRule] = &[
    FieldRule::required(TextField::MeasurableImpact),
    FieldRule::required(TextField::FeedbackExamples),
    FieldRule::required(TextField::ImpactContribution),
];

const FUTURE_AND_SCALABILITY: &[FieldRule] = &[
    FieldRule::required(TextField::FutureGoals),
    FieldRule::required(TextField::SustainabilityPlan),
    FieldRule::required(TextField::SupportNeeded),
];

const PERSONAL_STORY: &[FieldRule] =
    &[FieldRule::optional(TextField::PersonalStory).with(Check::MaxWords(300))];

pub(crate) static STEP_RULES: [StepRules; STEP_COUNT] = [
    fields(COMPANY_INFORMATION),
    fields(SOCIAL_IMPACT_OVERVIEW),
    fields(IMPLEMENTATION),
    fields(IMPACT_MEASUREMENT),
    fields(FUTURE_AND_SCALABILITY),
    // supporting evidence is optional
    fields(&[]),
    fields(PERSONAL_STORY),
    StepRules {
        fields: &[],
        declaration: true,
    },
];

pub(crate) fn rules_for(step: usize) -> Option<&'static StepRules> {
    STEP_RULES.get(step)
}

pub(crate) fn required_fields(step: usize) -> Vec<FormField> {
    let Some(rules) = rules_for(step) else {
        return Vec::new();
    };

    let mut required: Vec<FormField> = rules
        .fields
        .iter()
        .filter(|rule| rule.required)
        .map(|rule| FormField::Text(rule.field))
        .collect();
    if rules.declaration {
        required.push(FormField::Declaration);
    }
    required
}

/// Word ceiling attached to `field`, if any step declares one.
pub fn word_limit(field: TextField) -> Option<usize> {
    STEP_RULES
        .iter()
        .flat_map(|rules| rules.fields.iter())
        .filter(|rule| rule.field == field)
        .find_map(|rule| match rule.check {
            Some(Check::MaxWords(limit)) => Some(limit),
            _ => None,
        })
}

/// Counts non-empty whitespace-separated tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

fn required_message(field: TextField) -> &'static str {
    match field {
        TextField::CompanyName => "Company name is required",
        TextField::ApplicantName => "Applicant name is required",
        TextField::Position => "Position is required",
        TextField::Email => "Email is required",
        TextField::ContactNumber => "Contact number is required",
        TextField::Sector => "Sector is required",
        TextField::YearEstablished => "Year established is required",
        TextField::NumberOfEmployees => "Number of employees is required",
        TextField::MissionStatement => "Mission statement is required",
        TextField::SocialIssue => "Social issue is required",
        TextField::BusinessModel => "Business model is required",
        TextField::KeyInitiatives => "Key initiatives are required",
        TextField::StakeholderEngagement => "Stakeholder engagement is required",
        TextField::Partnerships => "Partnerships information is required",
        TextField::MeasurableImpact => "Measurable impact is required",
        TextField::FeedbackExamples => "Feedback examples are required",
        TextField::ImpactContribution => "Impact contribution is required",
        TextField::FutureGoals => "Future goals are required",
        TextField::SustainabilityPlan => "Sustainability plan is required",
        TextField::SupportNeeded => "Support needed is required",
        TextField::MediaLinks => "Media links are required",
        TextField::PersonalStory => "Personal story is required",
    }
}
