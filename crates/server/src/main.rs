use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, RawQuery, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use server_api::{
    config_route, configure, goto, goto_route, images_route, list_images, next, next_route,
    prev, prev_route, subscribe_route, CONFIG_STATUS, GOTO_STATUS, NEXT_STATUS, PREV_STATUS,
};
use shared::{
    domain::ImageFilename,
    error::{ApiError, ErrorCode},
    protocol::{ControlEvent, DisplayConfig, ErrorBody, StatusResponse},
};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod relay;

use app_state::AppState;
use config::{check_static_layout, load_settings};

type HttpError = (StatusCode, Json<ErrorBody>);

#[derive(Debug, Deserialize)]
struct GotoQuery {
    image: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    check_static_layout(&settings)?;

    let state = AppState::new(&settings);
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(
        %addr,
        static_dir = %settings.static_dir.display(),
        assets_dir = %settings.assets_dir().display(),
        config_policy = ?settings.config_policy,
        "server listening"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let index = ServeFile::new(state.static_dir.join("index.html"));
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route_service("/", index)
        .route("/healthz", get(healthz))
        .route(images_route(), get(http_list_images))
        .route(next_route(), get(http_next))
        .route(prev_route(), get(http_prev))
        .route(goto_route(), get(http_goto))
        .route(config_route(), get(http_config))
        .route(subscribe_route(), get(ws_handler))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

fn reject(err: ApiError) -> HttpError {
    let status = match err.code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorBody { error: err.message }))
}

async fn http_list_images(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ImageFilename>>, HttpError> {
    let images = list_images(&state.api).await.map_err(reject)?;
    Ok(Json(images))
}

async fn http_next(State(state): State<Arc<AppState>>) -> Json<StatusResponse<()>> {
    state.relay.publish(next());
    Json(StatusResponse::new(NEXT_STATUS))
}

async fn http_prev(State(state): State<Arc<AppState>>) -> Json<StatusResponse<()>> {
    state.relay.publish(prev());
    Json(StatusResponse::new(PREV_STATUS))
}

async fn http_goto(
    State(state): State<Arc<AppState>>,
    Query(q): Query<GotoQuery>,
) -> Result<Json<StatusResponse<ImageFilename>>, HttpError> {
    let image = goto(&state.api, q.image.as_deref())
        .await
        .map_err(reject)?;
    state.relay.publish(ControlEvent::ApiGoto(image.clone()));
    Ok(Json(StatusResponse::with_data(GOTO_STATUS, image)))
}

/// `effect` may repeat, so the query is read as raw pairs. Only the first
/// `transition` counts.
async fn http_config(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Result<Json<StatusResponse<DisplayConfig>>, HttpError> {
    let mut transition: Option<String> = None;
    let mut effects = Vec::new();
    for (key, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
        match key.as_ref() {
            "transition" if transition.is_none() => transition = Some(value.into_owned()),
            "effect" => effects.push(value.into_owned()),
            _ => {}
        }
    }

    let config = configure(&state.api, transition.as_deref(), &effects).map_err(reject)?;
    state.relay.publish(ControlEvent::ApiConfig(config.clone()));
    Ok(Json(StatusResponse::with_data(CONFIG_STATUS, config)))
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| ws_connection(state, socket))
}

async fn ws_connection(state: Arc<AppState>, socket: WebSocket) {
    use futures::{SinkExt, StreamExt};

    let (mut sender, mut receiver) = socket.split();
    let mut subscription = state.relay.subscribe();
    let subscriber = subscription.id();
    info!(
        %subscriber,
        subscribers = state.relay.subscriber_count(),
        "display client connected"
    );

    let send_task = tokio::spawn(async move {
        while let Some(event) = subscription.next().await {
            let text = match serde_json::to_string(&event) {
                Ok(v) => v,
                Err(error) => {
                    warn!(%subscriber, %error, "failed to encode control event");
                    continue;
                }
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(_msg)) = receiver.next().await {}

    send_task.abort();
    info!(%subscriber, "display client disconnected");
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
