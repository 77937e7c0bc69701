pub mod catalog;
pub mod validation;

use shared::{
    domain::ImageFilename,
    error::{ApiError, ErrorCode},
    protocol::{ControlEvent, DisplayConfig},
};

pub use catalog::AssetCatalog;
pub use validation::{
    require_image, validate_config, validate_effects, validate_goto, validate_transition,
    ConfigPolicy,
};

pub const NEXT_STATUS: &str = "Go to next background broadcasted";
pub const PREV_STATUS: &str = "Go to previous background broadcasted";
pub const GOTO_STATUS: &str = "Go to image emitted";
pub const CONFIG_STATUS: &str = "Config emitted";

#[derive(Debug, Clone)]
pub struct ApiContext {
    pub catalog: AssetCatalog,
    pub config_policy: ConfigPolicy,
}

pub fn images_route() -> &'static str {
    "/api/images"
}

pub fn next_route() -> &'static str {
    "/api/next"
}

pub fn prev_route() -> &'static str {
    "/api/prev"
}

pub fn goto_route() -> &'static str {
    "/api/goto"
}

pub fn config_route() -> &'static str {
    "/api/config"
}

pub fn subscribe_route() -> &'static str {
    "/ws"
}

pub async fn list_images(ctx: &ApiContext) -> Result<Vec<ImageFilename>, ApiError> {
    ctx.catalog.list_images().await.map_err(|err| {
        let err = internal(err);
        tracing::error!(
            dir = %ctx.catalog.dir().display(),
            error = %err.message,
            "asset catalog unavailable"
        );
        err
    })
}

pub fn next() -> ControlEvent {
    ControlEvent::ApiNext
}

pub fn prev() -> ControlEvent {
    ControlEvent::ApiPrev
}

/// Resolves the `api_goto` target against the catalog as it stands right
/// now. Membership is not rechecked when the event is delivered.
pub async fn goto(ctx: &ApiContext, image: Option<&str>) -> Result<ImageFilename, ApiError> {
    // Checked before the scan so a bare request never touches the filesystem.
    let image = require_image(image)?;
    let images = list_images(ctx).await?;
    Ok(validate_goto(image, &images)?)
}

pub fn configure<S: AsRef<str>>(
    ctx: &ApiContext,
    transition: Option<&str>,
    effects: &[S],
) -> Result<DisplayConfig, ApiError> {
    Ok(validate_config(transition, effects, ctx.config_policy)?)
}

fn internal(err: anyhow::Error) -> ApiError {
    ApiError::new(ErrorCode::Internal, format!("{err:#}"))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
