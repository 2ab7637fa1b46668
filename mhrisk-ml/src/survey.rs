//! Survey schema: the 24 columns the model was trained on, their option
//! lists, and the question text both front-ends render.
//!
//! Column names and option spellings are an external contract with the
//! model artifact and must not be edited independently of it.

use serde::Serialize;

/// Sentinel offered in the State list for "not applicable". It encodes as a
/// missing cell, never as the literal string.
pub const STATE_MISSING_SENTINEL: &str = "nan";

pub const AGE_MIN: i64 = 18;
pub const AGE_MAX: i64 = 70;
pub const AGE_DEFAULT: i64 = 30;

pub const GENDER_OPTIONS: &[&str] = &["Male", "Female", "Non-binary", "Prefer not to say"];
pub const COUNTRY_OPTIONS: &[&str] = &["USA", "Canada", "UK", "Germany", "Australia", "India"];
pub const STATE_OPTIONS: &[&str] = &[
    "CA", "NY", "TX", "WA", "ON", "QC", "LDN", "BLN", "SYD", "MH", "nan",
];
pub const YES_NO_OPTIONS: &[&str] = &["Yes", "No"];
pub const WORK_INTERFERE_OPTIONS: &[&str] = &["Often", "Sometimes", "Never", "Rarely"];
pub const NO_EMPLOYEES_OPTIONS: &[&str] = &[
    "1-5",
    "6-25",
    "26-100",
    "101-500",
    "501-1000",
    "More than 1000",
];
pub const YES_NO_DONT_KNOW_OPTIONS: &[&str] = &["Yes", "No", "Don't know"];
pub const CARE_OPTIONS_OPTIONS: &[&str] = &["Yes", "No", "Not sure"];
pub const LEAVE_OPTIONS: &[&str] = &[
    "Somewhat easy",
    "Very easy",
    "Don't know",
    "Somewhat difficult",
    "Very difficult",
];
pub const YES_NO_MAYBE_OPTIONS: &[&str] = &["Yes", "No", "Maybe"];
pub const COWORKERS_SUPERVISOR_OPTIONS: &[&str] = &["Yes", "No", "Some of them"];

/// How a field is presented on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Widget {
    Slider { min: i64, max: i64, default: i64 },
    Select,
    Radio,
}

/// Dashboard column groupings, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Demographics,
    History,
    EmployerResources,
    Stigma,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Demographics => "Demographics & Work Environment",
            Section::History => "Mental Health History & Support",
            Section::EmployerResources => "Employer Provided Resources",
            Section::Stigma => "Perceived Stigma & Support",
        }
    }

    pub const ALL: [Section; 4] = [
        Section::Demographics,
        Section::History,
        Section::EmployerResources,
        Section::Stigma,
    ];
}

/// One survey question.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    /// Column name in the model's training schema.
    pub column: &'static str,
    /// Question shown to the respondent.
    pub label: &'static str,
    /// Permitted values; empty for Age.
    pub options: &'static [&'static str],
    pub widget: Widget,
    pub section: Section,
}

impl FieldSpec {
    pub fn is_numeric(&self) -> bool {
        matches!(self.widget, Widget::Slider { .. })
    }
}

const fn field(
    column: &'static str,
    label: &'static str,
    options: &'static [&'static str],
    widget: Widget,
    section: Section,
) -> FieldSpec {
    FieldSpec {
        column,
        label,
        options,
        widget,
        section,
    }
}

/// All 24 fields in training-schema column order.
pub static SURVEY_FIELDS: [FieldSpec; 24] = [
    field(
        "Age",
        "Age",
        &[],
        Widget::Slider {
            min: AGE_MIN,
            max: AGE_MAX,
            default: AGE_DEFAULT,
        },
        Section::Demographics,
    ),
    field("Gender", "Gender", GENDER_OPTIONS, Widget::Select, Section::Demographics),
    field("Country", "Country", COUNTRY_OPTIONS, Widget::Select, Section::Demographics),
    field(
        "State",
        "State (if applicable)",
        STATE_OPTIONS,
        Widget::Select,
        Section::Demographics,
    ),
    field(
        "Self_employed",
        "Are you self-employed?",
        YES_NO_OPTIONS,
        Widget::Radio,
        Section::Demographics,
    ),
    field(
        "Family_history",
        "Do you have a family history of mental illness?",
        YES_NO_OPTIONS,
        Widget::Radio,
        Section::History,
    ),
    field(
        "Work_interfere",
        "If you have a mental health condition, do you feel that it interferes with your work?",
        WORK_INTERFERE_OPTIONS,
        Widget::Select,
        Section::History,
    ),
    field(
        "No_employees",
        "How many employees does your company have?",
        NO_EMPLOYEES_OPTIONS,
        Widget::Select,
        Section::Demographics,
    ),
    field(
        "Remote_work",
        "Do you work remotely?",
        YES_NO_OPTIONS,
        Widget::Radio,
        Section::Demographics,
    ),
    field(
        "Tech_company",
        "Is your employer primarily a tech company/organization?",
        YES_NO_OPTIONS,
        Widget::Radio,
        Section::Demographics,
    ),
    field(
        "Benefits",
        "Does your employer provide mental health benefits?",
        YES_NO_DONT_KNOW_OPTIONS,
        Widget::Select,
        Section::EmployerResources,
    ),
    field(
        "Care_options",
        "Do you know the options for mental health care your employer provides?",
        CARE_OPTIONS_OPTIONS,
        Widget::Select,
        Section::EmployerResources,
    ),
    field(
        "Wellness_program",
        "Has your employer ever discussed mental health as part of an employee wellness program?",
        YES_NO_DONT_KNOW_OPTIONS,
        Widget::Select,
        Section::EmployerResources,
    ),
    field(
        "Seek_help",
        "Does your employer provide resources to learn more about mental health issues and how to seek help?",
        YES_NO_DONT_KNOW_OPTIONS,
        Widget::Select,
        Section::EmployerResources,
    ),
    field(
        "Anonymity",
        "Is your anonymity protected if you choose to seek mental health care through your employer?",
        YES_NO_DONT_KNOW_OPTIONS,
        Widget::Select,
        Section::EmployerResources,
    ),
    field(
        "Leave",
        "How easy is it to take medical leave for a mental health condition?",
        LEAVE_OPTIONS,
        Widget::Select,
        Section::EmployerResources,
    ),
    field(
        "Mental_health_consequence",
        "Do you think discussing a mental health issue with your employer would have negative consequences?",
        YES_NO_MAYBE_OPTIONS,
        Widget::Select,
        Section::Stigma,
    ),
    field(
        "Phys_health_consequence",
        "Do you think discussing a physical health issue with your employer would have negative consequences?",
        YES_NO_MAYBE_OPTIONS,
        Widget::Select,
        Section::Stigma,
    ),
    field(
        "Coworkers",
        "Would you be willing to discuss a mental health issue with your coworkers?",
        COWORKERS_SUPERVISOR_OPTIONS,
        Widget::Select,
        Section::Stigma,
    ),
    field(
        "Supervisor",
        "Would you be willing to discuss a mental health issue with your direct supervisor(s)?",
        COWORKERS_SUPERVISOR_OPTIONS,
        Widget::Select,
        Section::Stigma,
    ),
    field(
        "Mental_health_interview",
        "Would you bring up a mental health issue with a potential employer in an interview?",
        YES_NO_MAYBE_OPTIONS,
        Widget::Select,
        Section::Stigma,
    ),
    field(
        "Phys_health_interview",
        "Would you bring up a physical health issue with a potential employer in an interview?",
        YES_NO_MAYBE_OPTIONS,
        Widget::Select,
        Section::Stigma,
    ),
    field(
        "Mental_vs_physical",
        "Do you feel that your employer takes mental health as seriously as physical health?",
        YES_NO_DONT_KNOW_OPTIONS,
        Widget::Select,
        Section::Stigma,
    ),
    field(
        "Observed_consequence",
        "Have you heard or observed negative consequences for coworkers with mental health conditions in your workplace?",
        YES_NO_OPTIONS,
        Widget::Radio,
        Section::Stigma,
    ),
];

/// Column names in training-schema order.
pub fn columns() -> impl Iterator<Item = &'static str> {
    SURVEY_FIELDS.iter().map(|f| f.column)
}

/// Look up a field by column name.
pub fn field_spec(column: &str) -> Option<&'static FieldSpec> {
    SURVEY_FIELDS.iter().find(|f| f.column == column)
}

/// Fields belonging to one dashboard section, in column order.
pub fn fields_in(section: Section) -> impl Iterator<Item = &'static FieldSpec> {
    SURVEY_FIELDS.iter().filter(move |f| f.section == section)
}
