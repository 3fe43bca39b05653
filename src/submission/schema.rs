use serde::Serialize;
use serde_json::{Value, json};

/// Notion property type a column is written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Title,
    RichText,
    Email,
    PhoneNumber,
    Date,
    Select,
    Number,
}

/// How a column's value is derived from the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Copy the string verbatim, or use `default` when absent or empty.
    Text { key: &'static str, default: &'static str },
    /// `first + " " + last`, whether or not either part is present.
    DisplayName { first: &'static str, last: &'static str },
    /// Coerce to a number, 0 when that fails.
    Number { key: &'static str },
    /// Single select option name, passed through unchecked.
    Select { key: &'static str, default: &'static str },
    /// Join a list with ", ", or use `default` when it is empty.
    List { key: &'static str, default: &'static str },
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Text { .. } => "text",
            Rule::DisplayName { .. } => "display_name",
            Rule::Number { .. } => "number",
            Rule::Select { .. } => "select",
            Rule::List { .. } => "list",
        }
    }

    pub fn sources(&self) -> Vec<&'static str> {
        match *self {
            Rule::DisplayName { first, last } => vec![first, last],
            Rule::Text { key, .. }
            | Rule::Number { key }
            | Rule::Select { key, .. }
            | Rule::List { key, .. } => vec![key],
        }
    }

    pub fn default_value(&self) -> Value {
        match *self {
            Rule::Text { default, .. } | Rule::Select { default, .. } | Rule::List { default, .. } => {
                json!(default)
            }
            Rule::Number { .. } => json!(0),
            Rule::DisplayName { .. } => json!(" "),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub column: &'static str,
    pub kind: PropertyKind,
    pub rule: Rule,
}

impl FieldMapping {
    pub fn describe(&self) -> Value {
        json!({
            "column": self.column,
            "type": self.kind,
            "rule": self.rule.name(),
            "sources": self.rule.sources(),
            "default": self.rule.default_value(),
        })
    }
}

const fn text(key: &'static str, column: &'static str, default: &'static str) -> FieldMapping {
    FieldMapping { column, kind: PropertyKind::RichText, rule: Rule::Text { key, default } }
}

const fn email(key: &'static str, column: &'static str) -> FieldMapping {
    FieldMapping { column, kind: PropertyKind::Email, rule: Rule::Text { key, default: "" } }
}

const fn phone(key: &'static str, column: &'static str) -> FieldMapping {
    FieldMapping { column, kind: PropertyKind::PhoneNumber, rule: Rule::Text { key, default: "" } }
}

const fn date(key: &'static str, column: &'static str) -> FieldMapping {
    FieldMapping { column, kind: PropertyKind::Date, rule: Rule::Text { key, default: "" } }
}

const fn number(key: &'static str, column: &'static str) -> FieldMapping {
    FieldMapping { column, kind: PropertyKind::Number, rule: Rule::Number { key } }
}

const fn select(key: &'static str, column: &'static str, default: &'static str) -> FieldMapping {
    FieldMapping { column, kind: PropertyKind::Select, rule: Rule::Select { key, default } }
}

const fn list(key: &'static str, column: &'static str, default: &'static str) -> FieldMapping {
    FieldMapping { column, kind: PropertyKind::RichText, rule: Rule::List { key, default } }
}

/// The registration database schema: one entry per Notion column.
pub static FIELD_MAPPINGS: &[FieldMapping] = &[
    FieldMapping {
        column: "Name",
        kind: PropertyKind::Title,
        rule: Rule::DisplayName { first: "firstName", last: "lastName" },
    },
    text("firstName", "First Name", "N/A"),
    text("lastName", "Last Name", "N/A"),
    email("email", "Email"),
    phone("phone", "Phone"),
    date("dateOfBirth", "Date of Birth"),
    number("age", "Age"),
    select("gender", "Gender", "Prefer not to say"),
    text("pronouns", "Pronouns", "N/A"),
    text("country", "Country", "N/A"),
    text("city", "City", "N/A"),
    text("school", "School", "N/A"),
    select("levelOfStudy", "Level of Study", "Other"),
    text("major", "Major", "N/A"),
    number("graduationYear", "Graduation Year"),
    select("tshirtSize", "T-Shirt Size", "None"),
    list("dietaryRestrictions", "Dietary Restrictions", "None"),
    text("allergies", "Allergies", "None"),
    text("accessibilityNeeds", "Accessibility Needs", "None"),
    text("emergencyContactName", "Emergency Contact Name", "N/A"),
    phone("emergencyContactPhone", "Emergency Contact Phone"),
    text("emergencyContactRelationship", "Emergency Contact Relationship", "N/A"),
    text("linkedin", "LinkedIn", ""),
    text("github", "GitHub", ""),
    text("portfolio", "Portfolio", ""),
    text("resumeLink", "Resume", ""),
    select("experienceLevel", "Experience Level", "Beginner"),
    number("hackathonsAttended", "Hackathons Attended"),
    list("programmingLanguages", "Programming Languages", "None"),
    list("interests", "Interests", "None"),
    select("teamStatus", "Team Status", "Looking for a team"),
    text("teamName", "Team Name", "N/A"),
    list("teammates", "Teammates", "None"),
    text("projectIdea", "Project Idea", ""),
    select("hearAboutUs", "How Did You Hear About Us", "Other"),
    select("firstHackathon", "First Hackathon", "No"),
    date("arrivalDate", "Arrival Date"),
    date("departureDate", "Departure Date"),
    select("travelReimbursement", "Travel Reimbursement", "No"),
    select("codeOfConduct", "Code of Conduct", "Not agreed"),
    text("additionalComments", "Additional Comments", ""),
];

/// Table of every column, as served by `GET /api/fields`.
pub fn describe_all() -> Value {
    let fields: Vec<Value> = FIELD_MAPPINGS.iter().map(FieldMapping::describe).collect();
    json!({ "fields": fields })
}
