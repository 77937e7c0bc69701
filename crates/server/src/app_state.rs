use std::path::PathBuf;

use server_api::{ApiContext, AssetCatalog};

use crate::{config::Settings, relay::Relay};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    pub(crate) relay: Relay,
    pub(crate) static_dir: PathBuf,
}

impl AppState {
    pub(crate) fn new(settings: &Settings) -> Self {
        Self {
            api: ApiContext {
                catalog: AssetCatalog::new(settings.assets_dir()),
                config_policy: settings.config_policy,
            },
            relay: Relay::new(settings.broadcast_capacity),
            static_dir: settings.static_dir.clone(),
        }
    }
}
