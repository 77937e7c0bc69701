use shared::{
    domain::{EffectName, ImageFilename, TransitionName},
    error::ValidationError,
    protocol::DisplayConfig,
};

/// How `/api/config` treats a request where only one side is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigPolicy {
    /// Reject only when both the transition and the effects are invalid.
    /// An invalid side is dropped from the resulting config.
    #[default]
    Lenient,
    /// Reject when either side is invalid or missing.
    Strict,
}

impl ConfigPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "lenient" => Some(Self::Lenient),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }
}

pub fn validate_transition(raw: &str) -> Result<TransitionName, ValidationError> {
    TransitionName::parse(raw).ok_or(ValidationError::InvalidTransition)
}

/// Maps every requested effect to its canonical name, keeping request order.
pub fn validate_effects<S: AsRef<str>>(raw: &[S]) -> Result<Vec<EffectName>, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::InvalidEffects);
    }
    raw.iter()
        .map(|effect| EffectName::parse(effect.as_ref()).ok_or(ValidationError::InvalidEffects))
        .collect()
}

pub fn require_image(image: Option<&str>) -> Result<&str, ValidationError> {
    image
        .filter(|image| !image.is_empty())
        .ok_or(ValidationError::MissingParameter("image name"))
}

pub fn validate_goto(
    image: &str,
    catalog: &[ImageFilename],
) -> Result<ImageFilename, ValidationError> {
    if !catalog.iter().any(|listed| listed == image) {
        return Err(ValidationError::ImageNotFound {
            catalog: catalog.to_vec(),
        });
    }
    Ok(ImageFilename(image.to_string()))
}

pub fn validate_config<S: AsRef<str>>(
    transition: Option<&str>,
    effects: &[S],
    policy: ConfigPolicy,
) -> Result<DisplayConfig, ValidationError> {
    let transition = transition.map(validate_transition);
    let effects = validate_effects(effects);

    match policy {
        ConfigPolicy::Lenient => {
            let transition = transition.and_then(Result::ok);
            let effects = effects.ok();
            if transition.is_none() && effects.is_none() {
                return Err(ValidationError::InvalidConfig);
            }
            Ok(DisplayConfig {
                transition,
                effects,
            })
        }
        ConfigPolicy::Strict => {
            let transition = transition.unwrap_or(Err(ValidationError::InvalidTransition));
            match (transition, effects) {
                (Ok(transition), Ok(effects)) => Ok(DisplayConfig {
                    transition: Some(transition),
                    effects: Some(effects),
                }),
                (Err(_), Err(_)) => Err(ValidationError::InvalidConfig),
                (Err(err), Ok(_)) | (Ok(_), Err(err)) => Err(err),
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
