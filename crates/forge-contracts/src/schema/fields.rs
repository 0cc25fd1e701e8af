use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// User-supplied answers for one generation attempt, keyed by field name.
pub type FieldValueSet = IndexMap<String, FieldValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    MultilineText,
    Select { options: Vec<String> },
    Number { min: f64, max: f64 },
}

impl FieldKind {
    pub fn tag(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::MultilineText => "textarea",
            FieldKind::Select { .. } => "select",
            FieldKind::Number { .. } => "number",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldDefinition {
    /// A value satisfies the field when it is non-blank and, for numeric
    /// fields, parses to a number inside the declared bounds.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        if value.is_blank() {
            return false;
        }
        match &self.kind {
            FieldKind::Number { min, max } => value
                .as_number()
                .map(|number| number >= *min && number <= *max)
                .unwrap_or(false),
            _ => true,
        }
    }

    /// Converts raw form input into the value shape this field stores.
    pub fn value_from_input(&self, raw: &str) -> FieldValue {
        if let FieldKind::Number { .. } = self.kind {
            if let Ok(number) = raw.trim().parse::<f64>() {
                if number.is_finite() {
                    return FieldValue::Number(number);
                }
            }
        }
        FieldValue::Text(raw.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::Number(number) => !number.is_finite(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(number) => Some(*number).filter(|value| value.is_finite()),
            FieldValue::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite()),
        }
    }

    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(text) => Cow::Borrowed(text.as_str()),
            FieldValue::Number(number) => Cow::Owned(format_number(*number)),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}
