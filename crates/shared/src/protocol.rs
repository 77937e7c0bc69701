use serde::{Deserialize, Serialize};

use crate::domain::{EffectName, ImageFilename, TransitionName};

/// Display settings pushed to every subscriber by `api_config`. A side that
/// was not accepted is left out of the object entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<EffectName>>,
}

/// Event relayed to every connected display client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ControlEvent {
    ApiNext,
    ApiPrev,
    ApiGoto(ImageFilename),
    ApiConfig(DisplayConfig),
}

impl ControlEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ApiNext => "api_next",
            Self::ApiPrev => "api_prev",
            Self::ApiGoto(_) => "api_goto",
            Self::ApiConfig(_) => "api_config",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct StatusResponse<T> {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> StatusResponse<T> {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            data: None,
        }
    }

    pub fn with_data(status: impl Into<String>, data: T) -> Self {
        Self {
            status: status.into(),
            data: Some(data),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
