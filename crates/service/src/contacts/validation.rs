use serde::{Deserialize, Serialize};

use super::domain::{ContactFields, ContactInput};
use crate::errors::ServiceError;

/// One rejected field, in the `{type, value, msg, path, location}` shape
/// that request validators conventionally emit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Option<String>,
    pub msg: String,
    pub path: String,
    pub location: String,
}

impl FieldViolation {
    pub fn field(path: &str, value: Option<&str>, msg: &str) -> Self {
        Self {
            kind: "field".into(),
            value: value.map(str::to_string),
            msg: msg.into(),
            path: path.into(),
            location: "body".into(),
        }
    }

    /// A violation not tied to a single field.
    pub fn body(msg: impl Into<String>) -> Self {
        Self { kind: "body".into(), value: None, msg: msg.into(), path: String::new(), location: "body".into() }
    }
}

fn is_blank(v: Option<&str>) -> bool {
    v.map_or(true, |s| s.trim().is_empty())
}

fn looks_like_email(s: &str) -> bool {
    let mut parts = s.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !domain.starts_with('.') && !domain.ends_with('.')
                && !s.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}

impl ContactInput {
    /// Check every rule and collect all violations, then hand back the
    /// validated field set. Values pass through untouched.
    pub fn validate(self) -> Result<ContactFields, ServiceError> {
        let mut errors = Vec::new();

        if is_blank(self.name.as_deref()) {
            errors.push(FieldViolation::field("name", self.name.as_deref(), "Name is Required"));
        }
        if is_blank(self.mobile.as_deref()) {
            errors.push(FieldViolation::field("mobile", self.mobile.as_deref(), "Mobile is Required"));
        }
        if let Some(email) = self.email.as_deref().filter(|s| !s.trim().is_empty()) {
            if !looks_like_email(email) {
                errors.push(FieldViolation::field("email", Some(email), "Email is not valid"));
            }
        }

        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        Ok(ContactFields {
            name: self.name.unwrap_or_default(),
            image_url: self.image_url,
            email: self.email,
            mobile: self.mobile.unwrap_or_default(),
            company: self.company,
            title: self.title,
            group_id: self.group_id,
        })
    }
}
