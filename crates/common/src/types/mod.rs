use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Outcome marker carried in every response envelope.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStatus {
    Success,
    Failed,
}

/// Uniform JSON wrapper: `{status, data, error?, msg?}`.
///
/// `data` is always present (serialized as `null` on failures); `error` and
/// `msg` are omitted when unset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub status: AppStatus,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self { status: AppStatus::Success, data: Some(data), error: None, msg: None }
    }

    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());
        self
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { status: AppStatus::Failed, data: None, error: Some(error.into()), msg: None }
    }
}
