use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sector choices offered by the intake form. Advisory only; any non-empty sector passes.
pub const SECTOR_OPTIONS: &[&str] = &[
    "Manufacturing",
    "Services",
    "Agribusiness",
    "Social Enterprise",
    "Technology",
    "Healthcare",
    "Education",
    "Other",
];

/// Free-text inputs collected across the form sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextField {
    CompanyName,
    ApplicantName,
    Position,
    Email,
    ContactNumber,
    Sector,
    YearEstablished,
    NumberOfEmployees,
    MissionStatement,
    SocialIssue,
    BusinessModel,
    KeyInitiatives,
    StakeholderEngagement,
    Partnerships,
    MeasurableImpact,
    FeedbackExamples,
    ImpactContribution,
    FutureGoals,
    SustainabilityPlan,
    SupportNeeded,
    MediaLinks,
    PersonalStory,
}

impl TextField {
    pub const ALL: [TextField; 22] = [
        TextField::CompanyName,
        TextField::ApplicantName,
        TextField::Position,
        TextField::Email,
        TextField::ContactNumber,
        TextField::Sector,
        TextField::YearEstablished,
        TextField::NumberOfEmployees,
        TextField::MissionStatement,
        TextField::SocialIssue,
        TextField::BusinessModel,
        TextField::KeyInitiatives,
        TextField::StakeholderEngagement,
        TextField::Partnerships,
        TextField::MeasurableImpact,
        TextField::FeedbackExamples,
        TextField::ImpactContribution,
        TextField::FutureGoals,
        TextField::SustainabilityPlan,
        TextField::SupportNeeded,
        TextField::MediaLinks,
        TextField::PersonalStory,
    ];

    /// Wire key, matching the payload field names.
    pub const fn key(self) -> &'static str {
        match self {
            TextField::CompanyName => "companyName",
            TextField::ApplicantName => "applicantName",
            TextField::Position => "position",
            TextField::Email => "email",
            TextField::ContactNumber => "contactNumber",
            TextField::Sector => "sector",
            TextField::YearEstablished => "yearEstablished",
            TextField::NumberOfEmployees => "numberOfEmployees",
            TextField::MissionStatement => "missionStatement",
            TextField::SocialIssue => "socialIssue",
            TextField::BusinessModel => "businessModel",
            TextField::KeyInitiatives => "keyInitiatives",
            TextField::StakeholderEngagement => "stakeholderEngagement",
            TextField::Partnerships => "partnerships",
            TextField::MeasurableImpact => "measurableImpact",
            TextField::FeedbackExamples => "feedbackExamples",
            TextField::ImpactContribution => "impactContribution",
            TextField::FutureGoals => "futureGoals",
            TextField::SustainabilityPlan => "sustainabilityPlan",
            TextField::SupportNeeded => "supportNeeded",
            TextField::MediaLinks => "mediaLinks",
            TextField::PersonalStory => "personalStory",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TextField::CompanyName => "Company Name",
            TextField::ApplicantName => "Applicant Name",
            TextField::Position => "Position",
            TextField::Email => "Email",
            TextField::ContactNumber => "Contact Number",
            TextField::Sector => "Sector",
            TextField::YearEstablished => "Year Established",
            TextField::NumberOfEmployees => "Number of Employees",
            TextField::MissionStatement => "Mission Statement",
            TextField::SocialIssue => "Social Issue Addressed",
            TextField::BusinessModel => "Business Model",
            TextField::KeyInitiatives => "Key Initiatives",
            TextField::StakeholderEngagement => "Stakeholder Engagement",
            TextField::Partnerships => "Partnerships",
            TextField::MeasurableImpact => "Measurable Impact",
            TextField::FeedbackExamples => "Feedback Examples",
            TextField::ImpactContribution => "Impact Contribution",
            TextField::FutureGoals => "Future Goals",
            TextField::SustainabilityPlan => "Sustainability Plan",
            TextField::SupportNeeded => "Support Needed",
            TextField::MediaLinks => "Media Links",
            TextField::PersonalStory => "Personal Story",
        }
    }
}

/// Attachment collections. Accepted types are hints for the file picker, never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileField {
    Documents,
    Photos,
}

impl FileField {
    pub const ALL: [FileField; 2] = [FileField::Documents, FileField::Photos];

    pub const fn key(self) -> &'static str {
        match self {
            FileField::Documents => "documents",
            FileField::Photos => "photos",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FileField::Documents => "Supporting Documents",
            FileField::Photos => "Photos",
        }
    }

    pub const fn accept_hint(self) -> &'static str {
        match self {
            FileField::Documents => ".pdf,.doc,.docx",
            FileField::Photos => "image/*",
        }
    }
}

impl FromStr for FileField {
    type Err = UnknownField;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        FileField::ALL
            .into_iter()
            .find(|field| field.key() == raw)
            .ok_or_else(|| UnknownField(raw.to_string()))
    }
}

/// Every addressable slot of [`FormState`]. Serialized as the camelCase payload key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Text(TextField),
    Files(FileField),
    Declaration,
}

impl FormField {
    pub const fn key(self) -> &'static str {
        match self {
            FormField::Text(field) => field.key(),
            FormField::Files(field) => field.key(),
            FormField::Declaration => "declaration",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FormField::Text(field) => field.label(),
            FormField::Files(field) => field.label(),
            FormField::Declaration => "Declaration",
        }
    }
}

impl From<TextField> for FormField {
    fn from(field: TextField) -> Self {
        FormField::Text(field)
    }
}

impl From<FileField> for FormField {
    fn from(field: FileField) -> Self {
        FormField::Files(field)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw == "declaration" {
            return Ok(FormField::Declaration);
        }
        if let Some(field) = TextField::ALL.into_iter().find(|field| field.key() == raw) {
            return Ok(FormField::Text(field));
        }
        raw.parse().map(FormField::Files)
    }
}

impl Serialize for FormField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for FormField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Raised when a wire key names no field of the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field '{0}'")]
pub struct UnknownField(pub String);

/// Identifier assigned by the file picker. The form never dereferences it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileId(pub String);

/// Opaque reference to a host-owned file; bytes are never copied into the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub id: FileId,
    pub name: String,
    pub size_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl FileHandle {
    pub fn new(id: impl Into<String>, name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            id: FileId(id.into()),
            name: name.into(),
            size_bytes,
            media_type: None,
        }
    }

    /// Fill a missing media type from the file name's extension.
    pub fn with_guessed_media_type(mut self) -> Self {
        if self.media_type.is_none() {
            self.media_type = mime_guess::from_path(&self.name)
                .first_raw()
                .map(str::to_string);
        }
        self
    }
}

/// Everything the applicant has entered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    // Company information
    pub company_name: String,
    pub applicant_name: String,
    pub position: String,
    pub email: String,
    pub contact_number: String,
    pub sector: String,
    pub year_established: String,
    pub number_of_employees: String,

    // Social impact overview
    pub mission_statement: String,
    pub social_issue: String,
    pub business_model: String,

    // Implementation and activities
    pub key_initiatives: String,
    pub stakeholder_engagement: String,
    pub partnerships: String,

    // Impact measurement
    pub measurable_impact: String,
    pub feedback_examples: String,
    pub impact_contribution: String,

    // Future and scalability
    pub future_goals: String,
    pub sustainability_plan: String,
    pub support_needed: String,

    // Supporting evidence
    pub documents: Vec<FileHandle>,
    pub photos: Vec<FileHandle>,
    pub media_links: String,

    pub personal_story: String,
    pub declaration: bool,
}

impl FormState {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::CompanyName => &self.company_name,
            TextField::ApplicantName => &self.applicant_name,
            TextField::Position => &self.position,
            TextField::Email => &self.email,
            TextField::ContactNumber => &self.contact_number,
            TextField::Sector => &self.sector,
            TextField::YearEstablished => &self.year_established,
            TextField::NumberOfEmployees => &self.number_of_employees,
            TextField::MissionStatement => &self.mission_statement,
            TextField::SocialIssue => &self.social_issue,
            TextField::BusinessModel => &self.business_model,
            TextField::KeyInitiatives => &self.key_initiatives,
            TextField::StakeholderEngagement => &self.stakeholder_engagement,
            TextField::Partnerships => &self.partnerships,
            TextField::MeasurableImpact => &self.measurable_impact,
            TextField::FeedbackExamples => &self.feedback_examples,
            TextField::ImpactContribution => &self.impact_contribution,
            TextField::FutureGoals => &self.future_goals,
            TextField::SustainabilityPlan => &self.sustainability_plan,
            TextField::SupportNeeded => &self.support_needed,
            TextField::MediaLinks => &self.media_links,
            TextField::PersonalStory => &self.personal_story,
        }
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::CompanyName => &mut self.company_name,
            TextField::ApplicantName => &mut self.applicant_name,
            TextField::Position => &mut self.position,
            TextField::Email => &mut self.email,
            TextField::ContactNumber => &mut self.contact_number,
            TextField::Sector => &mut self.sector,
            TextField::YearEstablished => &mut self.year_established,
            TextField::NumberOfEmployees => &mut self.number_of_employees,
            TextField::MissionStatement => &mut self.mission_statement,
            TextField::SocialIssue => &mut self.social_issue,
            TextField::BusinessModel => &mut self.business_model,
            TextField::KeyInitiatives => &mut self.key_initiatives,
            TextField::StakeholderEngagement => &mut self.stakeholder_engagement,
            TextField::Partnerships => &mut self.partnerships,
            TextField::MeasurableImpact => &mut self.measurable_impact,
            TextField::FeedbackExamples => &mut self.feedback_examples,
            TextField::ImpactContribution => &mut self.impact_contribution,
            TextField::FutureGoals => &mut self.future_goals,
            TextField::SustainabilityPlan => &mut self.sustainability_plan,
            TextField::SupportNeeded => &mut self.support_needed,
            TextField::MediaLinks => &mut self.media_links,
            TextField::PersonalStory => &mut self.personal_story,
        }
    }

    pub fn files(&self, field: FileField) -> &[FileHandle] {
        match field {
            FileField::Documents => &self.documents,
            FileField::Photos => &self.photos,
        }
    }

    pub(crate) fn files_mut(&mut self, field: FileField) -> &mut Vec<FileHandle> {
        match field {
            FileField::Documents => &mut self.documents,
            FileField::Photos => &mut self.photos,
        }
    }

    /// Overwrite a single field. Error bookkeeping is the session's concern.
    pub(crate) fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Text { field, value } => *self.text_mut(field) = value,
            FieldUpdate::Declaration { accepted } => self.declaration = accepted,
            FieldUpdate::Files { field, files } => *self.files_mut(field) = files,
        }
    }
}

/// A typed single-field write. The value always matches the field's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldUpdate {
    Text { field: TextField, value: String },
    Declaration { accepted: bool },
    Files { field: FileField, files: Vec<FileHandle> },
}

impl FieldUpdate {
    pub fn text(field: TextField, value: impl Into<String>) -> Self {
        FieldUpdate::Text {
            field,
            value: value.into(),
        }
    }

    pub fn field(&self) -> FormField {
        match self {
            FieldUpdate::Text { field, .. } => FormField::Text(*field),
            FieldUpdate::Declaration { .. } => FormField::Declaration,
            FieldUpdate::Files { field, .. } => FormField::Files(*field),
        }
    }
}
