use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{EffectName, ImageFilename, TransitionName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Rejections produced by the command validator. Every message enumerates
/// what would have been accepted so callers can correct the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No {0} provided")]
    MissingParameter(&'static str),
    #[error("Available transitions: {}", join(TransitionName::keys()))]
    InvalidTransition,
    #[error("Available effects: {}", join(EffectName::keys()))]
    InvalidEffects,
    #[error(
        "Available transitions: {}; Available effects: {}",
        join(TransitionName::keys()),
        join(EffectName::keys())
    )]
    InvalidConfig,
    #[error("Image not listed in {}", join(.catalog.iter().map(ImageFilename::as_str)))]
    ImageNotFound { catalog: Vec<ImageFilename> },
}

fn join<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items.into_iter().collect::<Vec<_>>().join(", ")
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        Self::new(ErrorCode::Validation, value.to_string())
    }
}
