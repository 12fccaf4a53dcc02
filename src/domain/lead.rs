use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .unwrap()
});

/// Email syntax check used for lead submissions and mail config.
pub fn is_valid_email(value: &str) -> bool {
    let local = value.split('@').next().unwrap_or_default();
    !local.starts_with('.') && !local.contains("..") && EMAIL_RE.is_match(value)
}

/// A validated contact-form submission. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub budget: Option<String>,
    pub services: Option<Vec<String>>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    TooSmall,
    InvalidString,
    InvalidJson,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// One field-level problem with a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadIssue {
    pub code: IssueCode,
    pub path: Vec<PathSegment>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub received: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub validation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub minimum: Option<u64>,
}

impl LeadIssue {
    fn new(code: IssueCode, path: Vec<PathSegment>, message: impl Into<String>) -> Self {
        Self {
            code,
            path,
            message: message.into(),
            expected: None,
            received: None,
            validation: None,
            minimum: None,
        }
    }

    pub fn required(field: &str) -> Self {
        Self::invalid_type(vec![PathSegment::Key(field.to_string())], "string", None)
    }

    pub fn invalid_type(path: Vec<PathSegment>, expected: &str, received: Option<&Value>) -> Self {
        let message = match received {
            None => "Required".to_string(),
            Some(value) => format!("Expected {}, received {}", expected, type_name(value)),
        };
        Self {
            expected: Some(expected.to_string()),
            received: Some(received.map(type_name).unwrap_or("undefined").to_string()),
            ..Self::new(IssueCode::InvalidType, path, message)
        }
    }

    pub fn too_small(field: &str, minimum: u64) -> Self {
        Self {
            minimum: Some(minimum),
            ..Self::new(
                IssueCode::TooSmall,
                vec![PathSegment::Key(field.to_string())],
                format!("String must contain at least {} character(s)", minimum),
            )
        }
    }

    pub fn invalid_email(field: &str) -> Self {
        Self {
            validation: Some("email".to_string()),
            ..Self::new(
                IssueCode::InvalidString,
                vec![PathSegment::Key(field.to_string())],
                "Invalid email",
            )
        }
    }

    pub fn invalid_json(detail: impl std::fmt::Display) -> Self {
        Self::new(
            IssueCode::InvalidJson,
            Vec::new(),
            format!("Malformed JSON body: {}", detail),
        )
    }

    /// First path key, if any.
    pub fn field(&self) -> Option<&str> {
        match self.path.first() {
            Some(PathSegment::Key(key)) => Some(key),
            _ => None,
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Walks one JSON object and accumulates every violation it finds.
struct FieldReader<'a> {
    fields: &'a Map<String, Value>,
    issues: Vec<LeadIssue>,
}

impl<'a> FieldReader<'a> {
    fn new(fields: &'a Map<String, Value>) -> Self {
        Self {
            fields,
            issues: Vec::new(),
        }
    }

    fn key(field: &str) -> Vec<PathSegment> {
        vec![PathSegment::Key(field.to_string())]
    }

    fn string(&mut self, field: &str) -> Option<&'a str> {
        match self.fields.get(field) {
            None => {
                self.issues.push(LeadIssue::required(field));
                None
            }
            Some(Value::String(s)) => Some(s.as_str()),
            Some(other) => {
                self.issues
                    .push(LeadIssue::invalid_type(Self::key(field), "string", Some(other)));
                None
            }
        }
    }

    fn non_empty_string(&mut self, field: &str) -> Option<String> {
        let value = self.string(field)?;
        if value.is_empty() {
            self.issues.push(LeadIssue::too_small(field, 1));
            return None;
        }
        Some(value.to_string())
    }

    fn email(&mut self, field: &str) -> Option<String> {
        let value = self.string(field)?;
        if !is_valid_email(value) {
            self.issues.push(LeadIssue::invalid_email(field));
            return None;
        }
        Some(value.to_string())
    }

    fn optional_string(&mut self, field: &str) -> Option<String> {
        match self.fields.get(field) {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.issues
                    .push(LeadIssue::invalid_type(Self::key(field), "string", Some(other)));
                None
            }
        }
    }

    fn optional_string_list(&mut self, field: &str) -> Option<Vec<String>> {
        let items = match self.fields.get(field) {
            None => return None,
            Some(Value::Array(items)) => items,
            Some(other) => {
                self.issues
                    .push(LeadIssue::invalid_type(Self::key(field), "array", Some(other)));
                return None;
            }
        };

        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => values.push(s.clone()),
                other => self.issues.push(LeadIssue::invalid_type(
                    vec![PathSegment::Key(field.to_string()), PathSegment::Index(index)],
                    "string",
                    Some(other),
                )),
            }
        }
        Some(values)
    }
}

impl LeadSubmission {
    /// Checks an untyped payload against the lead schema. Reports every
    /// violation, in schema field order.
    pub fn parse(raw: &Value) -> Result<Self, Vec<LeadIssue>> {
        let Value::Object(fields) = raw else {
            return Err(vec![LeadIssue::invalid_type(Vec::new(), "object", Some(raw))]);
        };

        let mut reader = FieldReader::new(fields);
        let name = reader.non_empty_string("name");
        let email = reader.email("email");
        let phone = reader.optional_string("phone");
        let company = reader.optional_string("company");
        let budget = reader.optional_string("budget");
        let services = reader.optional_string_list("services");
        let message = reader.non_empty_string("message");

        if !reader.issues.is_empty() {
            return Err(reader.issues);
        }

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) => Ok(Self {
                name,
                email,
                phone,
                company,
                budget,
                services,
                message,
            }),
            // every None above pushed an issue
            _ => Err(reader.issues),
        }
    }
}
