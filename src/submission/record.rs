use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use super::schema::{FIELD_MAPPINGS, FieldMapping, PropertyKind, Rule};

/// Inbound form payload for one registrant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    fields: Map<String, Value>,
}

impl Submission {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Anything other than a JSON object carries no fields.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RichText {
    pub text: TextContent,
}

impl RichText {
    pub fn plain(content: impl Into<String>) -> Vec<RichText> {
        vec![RichText {
            text: TextContent {
                content: content.into(),
            },
        }]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateValue {
    pub start: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub name: String,
}

/// A Notion property value. Serializes to the object Notion expects under
/// `properties`, e.g. `{"select": {"name": "M"}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Title(Vec<RichText>),
    RichText(Vec<RichText>),
    Email(String),
    PhoneNumber(String),
    Date(Option<DateValue>),
    Select(SelectOption),
    Number(Number),
}

impl PropertyValue {
    /// Text carried by the value, for title/rich text/email/phone/date/select.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Title(parts) | PropertyValue::RichText(parts) => {
                parts.first().map(|p| p.text.content.as_str())
            }
            PropertyValue::Email(s) | PropertyValue::PhoneNumber(s) => Some(s),
            PropertyValue::Date(date) => date.as_ref().map(|d| d.start.as_str()),
            PropertyValue::Select(option) => Some(&option.name),
            PropertyValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            PropertyValue::Number(n) => Some(n),
            _ => None,
        }
    }
}

/// The Notion page properties built from one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    properties: BTreeMap<&'static str, PropertyValue>,
}

impl Record {
    pub fn from_submission(submission: &Submission) -> Self {
        let properties = FIELD_MAPPINGS
            .iter()
            .map(|mapping| (mapping.column, mapping.apply(submission)))
            .collect();
        Self { properties }
    }

    pub fn get(&self, column: &str) -> Option<&PropertyValue> {
        self.properties.get(column)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl FieldMapping {
    pub fn apply(&self, submission: &Submission) -> PropertyValue {
        match self.rule {
            Rule::Text { key, default } => {
                let value = text_value(submission.get(key)).unwrap_or_else(|| default.to_string());
                wrap_text(self.kind, value)
            }
            Rule::DisplayName { first, last } => {
                let first = text_value(submission.get(first)).unwrap_or_default();
                let last = text_value(submission.get(last)).unwrap_or_default();
                wrap_text(self.kind, format!("{first} {last}"))
            }
            Rule::Number { key } => PropertyValue::Number(number_value(submission.get(key))),
            Rule::Select { key, default } => {
                let name = text_value(submission.get(key)).unwrap_or_else(|| default.to_string());
                PropertyValue::Select(SelectOption { name })
            }
            Rule::List { key, default } => {
                let joined = list_value(submission.get(key)).unwrap_or_else(|| default.to_string());
                wrap_text(self.kind, joined)
            }
        }
    }
}

fn wrap_text(kind: PropertyKind, value: String) -> PropertyValue {
    match kind {
        PropertyKind::Title => PropertyValue::Title(RichText::plain(value)),
        PropertyKind::Email => PropertyValue::Email(value),
        PropertyKind::PhoneNumber => PropertyValue::PhoneNumber(value),
        PropertyKind::Date if value.is_empty() => PropertyValue::Date(None),
        PropertyKind::Date => PropertyValue::Date(Some(DateValue { start: value })),
        PropertyKind::Select => PropertyValue::Select(SelectOption { name: value }),
        PropertyKind::RichText | PropertyKind::Number => PropertyValue::RichText(RichText::plain(value)),
    }
}

/// Non-empty string form of a scalar. Null, empty strings, lists and objects
/// count as absent.
fn text_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn number_value(value: Option<&Value>) -> Number {
    let parsed = match value {
        Some(Value::Number(n)) => return n.clone(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed.filter(|n| n.is_finite()) {
        Some(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => Number::from(n as i64),
        Some(n) => Number::from_f64(n).unwrap_or_else(|| Number::from(0)),
        None => Number::from(0),
    }
}

fn list_value(value: Option<&Value>) -> Option<String> {
    let items: Vec<String> = match value? {
        Value::Array(items) => items.iter().filter_map(|v| text_value(Some(v))).collect(),
        other => text_value(Some(other)).into_iter().collect(),
    };

    if items.is_empty() {
        None
    } else {
        Some(items.join(", "))
    }
}
