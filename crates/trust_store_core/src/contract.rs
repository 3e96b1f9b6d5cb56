use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DATA_MESSAGE: &str = "Message";
pub const DATA_TRUST_STORE_URI: &str = "TrustStoreUri";
pub const DATA_OBJECT_VERSION: &str = "ObjectVersion";

pub const CREATE_SUCCESS_MESSAGE: &str = "Resource creation successful!";
pub const UPDATE_SUCCESS_MESSAGE: &str = "Resource update successful!";

pub type ResponseData = BTreeMap<String, String>;

/// Custom resource event as delivered by the orchestrator.
///
/// `ResourceProperties` stays a raw value so that a malformed property bag
/// can still be answered with a failure notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceEvent {
    #[serde(default)]
    pub request_type: Option<String>,
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    #[serde(default)]
    pub stack_id: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub logical_resource_id: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub service_token: Option<String>,
    #[serde(default)]
    pub resource_properties: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct TrustStoreProperties {
    #[serde(default)]
    pub trust_store_bucket: String,
    #[serde(default)]
    pub trust_store_key: String,
    #[serde(default)]
    pub certs: Vec<String>,
}

impl TrustStoreProperties {
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => serde_json::from_value(value.clone())
                .map_err(|error| ValidationError::InvalidProperties(error.to_string())),
            _ => Err(ValidationError::InvalidProperties(
                "ResourceProperties must be a JSON object".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Update,
    Delete,
    Unknown,
}

impl Operation {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Create" => Self::Create,
            "Update" => Self::Update,
            "Delete" => Self::Delete,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
            Self::Unknown => "Unknown",
        }
    }

    pub fn writes_artifact(self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("RequestType is missing")]
    MissingOperation,
    #[error("{0} request requires at least one certificate")]
    MissingPayload(&'static str),
    #[error("invalid ResourceProperties: {0}")]
    InvalidProperties(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleRequest {
    pub operation: Option<Operation>,
    pub bucket: String,
    pub key: String,
    pub payload_lines: Vec<String>,
    pub callback_url: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub physical_resource_id: String,
}

impl LifecycleRequest {
    pub fn from_event(
        event: &CustomResourceEvent,
        properties: TrustStoreProperties,
        physical_resource_id: impl Into<String>,
    ) -> Self {
        Self {
            operation: event.request_type.as_deref().map(Operation::parse),
            bucket: properties.trust_store_bucket,
            key: properties.trust_store_key,
            payload_lines: properties.certs,
            callback_url: event.response_url.clone(),
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            physical_resource_id: physical_resource_id.into(),
        }
    }

    pub fn validate(&self) -> Result<ValidatedRequest, ValidationError> {
        let operation = self.operation.ok_or(ValidationError::MissingOperation)?;
        if operation.writes_artifact() && self.payload_lines.is_empty() {
            return Err(ValidationError::MissingPayload(operation.as_str()));
        }
        Ok(ValidatedRequest {
            operation,
            request: self.clone(),
        })
    }
}

/// Only obtainable through `LifecycleRequest::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    operation: Operation,
    request: LifecycleRequest,
}

impl ValidatedRequest {
    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn request(&self) -> &LifecycleRequest {
        &self.request
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResultStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleResult {
    pub status: ResultStatus,
    pub data: ResponseData,
}

impl LifecycleResult {
    pub fn success(data: ResponseData) -> Self {
        Self {
            status: ResultStatus::Success,
            data,
        }
    }

    pub fn failed() -> Self {
        Self {
            status: ResultStatus::Failed,
            data: ResponseData::new(),
        }
    }

    pub fn failed_with_message(message: impl Into<String>) -> Self {
        let mut data = ResponseData::new();
        data.insert(DATA_MESSAGE.to_string(), message.into());
        Self {
            status: ResultStatus::Failed,
            data,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.data.get(DATA_MESSAGE).map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct NotificationEnvelope {
    pub status: ResultStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub data: ResponseData,
}

impl NotificationEnvelope {
    pub fn new(
        request: &LifecycleRequest,
        result: LifecycleResult,
        reason: Option<String>,
    ) -> Self {
        let reason = match result.status {
            ResultStatus::Success => None,
            ResultStatus::Failed => reason.or_else(|| result.message().map(str::to_string)),
        };
        Self {
            status: result.status,
            reason,
            physical_resource_id: request.physical_resource_id.clone(),
            stack_id: request.stack_id.clone(),
            request_id: request.request_id.clone(),
            logical_resource_id: request.logical_resource_id.clone(),
            data: result.data,
        }
    }
}
