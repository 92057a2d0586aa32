use std::{fmt, str::FromStr};

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::ServiceError;

/// Store-assigned contact identifier. Serialized as its hyphenated string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(Uuid);

impl ContactId {
    pub fn new() -> Self { Self(Uuid::new_v4()) }

    pub fn as_uuid(&self) -> Uuid { self.0 }
}

impl Default for ContactId {
    fn default() -> Self { Self::new() }
}

impl From<Uuid> for ContactId {
    fn from(id: Uuid) -> Self { Self(id) }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ContactId {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| ServiceError::InvalidId(format!("invalid contact id `{s}`: {e}")))
    }
}

/// A stored contact as returned to clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "_id")]
    pub id: ContactId,
    pub name: String,
    pub image_url: Option<String>,
    pub email: Option<String>,
    pub mobile: String,
    pub company: Option<String>,
    pub title: Option<String>,
    pub group_id: Option<String>,
}

impl Contact {
    pub fn from_fields(id: ContactId, f: ContactFields) -> Self {
        Self {
            id,
            name: f.name,
            image_url: f.image_url,
            email: f.email,
            mobile: f.mobile,
            company: f.company,
            title: f.title,
            group_id: f.group_id,
        }
    }
}

impl From<models::contact::Model> for Contact {
    fn from(m: models::contact::Model) -> Self {
        Self {
            id: ContactId(m.id),
            name: m.name,
            image_url: m.image_url,
            email: m.email,
            mobile: m.mobile,
            company: m.company,
            title: m.title,
            group_id: m.group_id,
        }
    }
}

/// Request body for create and update, before validation. Every field is
/// optional here so that missing required fields become validation errors
/// instead of deserialization failures. Text fields also take JSON numbers
/// and booleans (`"mobile": 5550100` is stored as `"5550100"`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub mobile: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub group_id: Option<String>,
}

/// `null` is absent; arrays and objects are rejected.
fn scalar_text<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(de)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected text, found {other}"))),
    }
}

/// Validated field set written by insert and full replace.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactFields {
    pub name: String,
    pub image_url: Option<String>,
    pub email: Option<String>,
    pub mobile: String,
    pub company: Option<String>,
    pub title: Option<String>,
    pub group_id: Option<String>,
}

impl From<ContactFields> for models::contact::ContactColumns {
    fn from(f: ContactFields) -> Self {
        Self {
            name: f.name,
            image_url: f.image_url,
            email: f.email,
            mobile: f.mobile,
            company: f.company,
            title: f.title,
            group_id: f.group_id,
        }
    }
}
