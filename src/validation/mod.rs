//! Validation of untyped JSON payloads into typed records.
//!
//! Every field is checked and every violation is collected, so a caller gets
//! the complete list of problems in one response. Fields that are not part of
//! a record's schema are ignored.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use validator::ValidateEmail;

use crate::models::{Cv, Direction, Event, EventType, ExperienceLevel, Skill};

/// Longest accepted CV name, in characters.
pub const CV_NAME_MAX_LEN: usize = 50;

/// Category of a single validation failure.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingField,
    TypeMismatch,
    ConstraintViolation,
    InvalidEmail,
    InvalidEnumValue,
}

/// One violation, attributed to the offending field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub kind: ErrorKind,
    pub message: String,
    /// The rejected value, for enum violations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Every violation found in one payload, in field order.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, field: &str, kind: ErrorKind, message: String) {
        self.0.push(FieldError {
            field: field.to_string(),
            kind,
            message,
            value: None,
        });
    }
}

#[cfg(test)]
impl ValidationErrors {
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether any violation names `field`.
    pub(crate) fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a CV payload.
pub fn validate_cv(payload: &Value) -> Result<Cv, ValidationErrors> {
    let mut fields = Fields::new(payload)?;

    let name = fields.required_str("name");
    if let Some(name) = name {
        fields.check_length("name", name, 1, Some(CV_NAME_MAX_LEN));
    }
    let email = fields.email("email");
    let phone = fields.required_str("phone");
    if let Some(phone) = phone {
        fields.check_length("phone", phone, 1, None);
    }
    let summary = fields.optional_str("summary");
    let experience = fields.optional_str("experience");
    let education = fields.optional_str("education");
    let skills = fields.optional_str("skills");

    match (name, email, phone) {
        (Some(name), Some(email), Some(phone)) if fields.errors.is_empty() => Ok(Cv {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            summary,
            experience,
            education,
            skills,
        }),
        _ => Err(fields.errors),
    }
}

/// Validate an event payload.
pub fn validate_event(payload: &Value) -> Result<Event, ValidationErrors> {
    let mut fields = Fields::new(payload)?;

    let name = fields.required_str("name");
    if let Some(name) = name {
        fields.check_length("name", name, 1, None);
    }
    let description = fields.required_str("description");
    if let Some(description) = description {
        fields.check_length("description", description, 1, None);
    }
    let event_type = fields.enum_value(
        "type",
        EventType::from_str,
        &EventType::ALL.map(|v| v.as_str()),
    );
    let direction = fields.enum_value(
        "direction",
        Direction::from_str,
        &Direction::ALL.map(|v| v.as_str()),
    );
    let skills = fields.skills("skills");
    let experience_lvl = fields.enum_value(
        "experience_lvl",
        ExperienceLevel::from_str,
        &ExperienceLevel::ALL.map(|v| v.as_str()),
    );
    let email = fields.email("email");

    match (name, description, event_type, direction, skills, experience_lvl, email) {
        (
            Some(name),
            Some(description),
            Some(event_type),
            Some(direction),
            Some(skills),
            Some(experience_lvl),
            Some(email),
        ) if fields.errors.is_empty() => Ok(Event {
            name: name.to_string(),
            description: description.to_string(),
            event_type,
            direction,
            skills,
            experience_lvl,
            email: email.to_string(),
        }),
        _ => Err(fields.errors),
    }
}

/// Syntactic email check: a valid address whose domain has at least one dot.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) || !value.validate_email() {
        return false;
    }
    match value.rsplit_once('@') {
        Some((_, domain)) => {
            domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Field accessor that records violations instead of stopping at the first one.
struct Fields<'a> {
    map: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> Fields<'a> {
    fn new(payload: &'a Value) -> Result<Self, ValidationErrors> {
        match payload.as_object() {
            Some(map) => Ok(Self {
                map,
                errors: ValidationErrors::default(),
            }),
            None => {
                let mut errors = ValidationErrors::default();
                errors.push(
                    "body",
                    ErrorKind::TypeMismatch,
                    format!("expected a JSON object, got {}", type_name(payload)),
                );
                Err(errors)
            }
        }
    }

    fn required(&mut self, field: &str) -> Option<&'a Value> {
        let value = self.map.get(field);
        if value.is_none() {
            self.errors
                .push(field, ErrorKind::MissingField, "field required".to_string());
        }
        value
    }

    fn required_str(&mut self, field: &str) -> Option<&'a str> {
        let value = self.required(field)?;
        self.expect_str(field, value)
    }

    /// Absent and `null` both mean "not provided".
    fn optional_str(&mut self, field: &str) -> Option<String> {
        let map = self.map;
        match map.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.expect_str(field, value).map(str::to_string),
        }
    }

    fn expect_str(&mut self, field: &str, value: &'a Value) -> Option<&'a str> {
        let s = value.as_str();
        if s.is_none() {
            self.errors.push(
                field,
                ErrorKind::TypeMismatch,
                format!("expected a string, got {}", type_name(value)),
            );
        }
        s
    }

    fn check_length(&mut self, field: &str, value: &str, min: usize, max: Option<usize>) {
        let len = value.chars().count();
        if len < min {
            let message = if min == 1 {
                "must not be empty".to_string()
            } else {
                format!("must be at least {} characters", min)
            };
            self.errors.push(field, ErrorKind::ConstraintViolation, message);
        } else if let Some(max) = max.filter(|max| len > *max) {
            self.errors.push(
                field,
                ErrorKind::ConstraintViolation,
                format!("must be at most {} characters, got {}", max, len),
            );
        }
    }

    fn email(&mut self, field: &str) -> Option<&'a str> {
        let value = self.required_str(field)?;
        if is_valid_email(value) {
            Some(value)
        } else {
            self.errors.push(
                field,
                ErrorKind::InvalidEmail,
                "value is not a valid email address".to_string(),
            );
            None
        }
    }

    fn enum_value<T>(
        &mut self,
        field: &str,
        parse: fn(&str) -> Option<T>,
        allowed: &[&str],
    ) -> Option<T> {
        let raw = self.required_str(field)?;
        self.parse_enum(field, raw, parse, allowed, None)
    }

    fn parse_enum<T>(
        &mut self,
        field: &str,
        raw: &str,
        parse: fn(&str) -> Option<T>,
        allowed: &[&str],
        index: Option<usize>,
    ) -> Option<T> {
        let parsed = parse(raw);
        if parsed.is_none() {
            let position = index.map(|i| format!(" at index {}", i)).unwrap_or_default();
            self.errors.0.push(FieldError {
                field: field.to_string(),
                kind: ErrorKind::InvalidEnumValue,
                message: format!(
                    "{:?}{} is not one of: {}",
                    raw,
                    position,
                    allowed.join(", ")
                ),
                value: Some(raw.to_string()),
            });
        }
        parsed
    }

    /// An ordered, possibly empty, list of known skills.
    fn skills(&mut self, field: &str) -> Option<Vec<Skill>> {
        let value = self.required(field)?;
        let Some(items) = value.as_array() else {
            self.errors.push(
                field,
                ErrorKind::TypeMismatch,
                format!("expected a list, got {}", type_name(value)),
            );
            return None;
        };

        let allowed = Skill::ALL.map(|v| v.as_str());
        let mut skills = Vec::with_capacity(items.len());
        let mut valid = true;
        for (i, item) in items.iter().enumerate() {
            let Some(raw) = item.as_str() else {
                self.errors.push(
                    field,
                    ErrorKind::TypeMismatch,
                    format!("expected a string at index {}, got {}", i, type_name(item)),
                );
                valid = false;
                continue;
            };
            match self.parse_enum(field, raw, Skill::from_str, &allowed, Some(i)) {
                Some(skill) => skills.push(skill),
                None => valid = false,
            }
        }

        valid.then_some(skills)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
