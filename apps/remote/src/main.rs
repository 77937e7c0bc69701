use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use futures::StreamExt;
use serde::de::DeserializeOwned;
use shared::{
    domain::ImageFilename,
    protocol::{ControlEvent, DisplayConfig, ErrorBody, StatusResponse},
};
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;
use url::Url;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the images the display can switch to.
    Images,
    Next,
    Prev,
    Goto {
        image: String,
    },
    Config {
        #[arg(long)]
        transition: Option<String>,
        #[arg(long = "effect")]
        effects: Vec<String>,
    },
    /// Follow the control events sent to display clients.
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let base = Url::parse(&cli.server_url)
        .with_context(|| format!("invalid server url '{}'", cli.server_url))?;
    let http = reqwest::Client::new();

    match cli.command {
        Command::Images => {
            let images: Vec<ImageFilename> = get(&http, api_url(&base, "/api/images", &[])?).await?;
            for image in images {
                println!("{image}");
            }
        }
        Command::Next => {
            let response: StatusResponse<()> = get(&http, api_url(&base, "/api/next", &[])?).await?;
            println!("{}", response.status);
        }
        Command::Prev => {
            let response: StatusResponse<()> = get(&http, api_url(&base, "/api/prev", &[])?).await?;
            println!("{}", response.status);
        }
        Command::Goto { image } => {
            let url = api_url(&base, "/api/goto", &[("image", image.as_str())])?;
            let response: StatusResponse<ImageFilename> = get(&http, url).await?;
            match response.data {
                Some(image) => println!("{} ({image})", response.status),
                None => println!("{}", response.status),
            }
        }
        Command::Config {
            transition,
            effects,
        } => {
            let mut params: Vec<(&str, &str)> = Vec::new();
            if let Some(transition) = transition.as_deref() {
                params.push(("transition", transition));
            }
            params.extend(effects.iter().map(|effect| ("effect", effect.as_str())));
            let url = api_url(&base, "/api/config", &params)?;
            let response: StatusResponse<DisplayConfig> = get(&http, url).await?;
            println!("{}", response.status);
            if let Some(config) = response.data {
                println!("{}", serde_json::to_string(&config)?);
            }
        }
        Command::Watch => watch(&base).await?,
    }

    Ok(())
}

fn api_url(base: &Url, path: &str, params: &[(&str, &str)]) -> Result<Url> {
    let mut url = base
        .join(path)
        .with_context(|| format!("cannot build url for {path}"))?;
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params.iter().copied());
    }
    Ok(url)
}

async fn get<T: DeserializeOwned>(http: &reqwest::Client, url: Url) -> Result<T> {
    debug!(%url, "sending control request");
    let response = http
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("request to {url} failed"))?;
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());
        bail!("server rejected request ({status}): {message}");
    }
    response
        .json::<T>()
        .await
        .with_context(|| format!("unexpected response body from {url}"))
}

fn ws_url(base: &Url) -> Result<Url> {
    let mut url = base.join("/ws").context("cannot build websocket url")?;
    let scheme = match url.scheme() {
        "https" => "wss",
        _ => "ws",
    };
    if url.set_scheme(scheme).is_err() {
        bail!("cannot use scheme {scheme} for {url}");
    }
    Ok(url)
}

async fn watch(base: &Url) -> Result<()> {
    let url = ws_url(base)?;
    let (mut socket, _) = tokio_tungstenite::connect_async(url.as_str())
        .await
        .with_context(|| format!("failed to connect to {url}"))?;
    eprintln!("watching {url}");

    while let Some(frame) = socket.next().await {
        match frame.context("websocket closed with error")? {
            Message::Text(text) => match serde_json::from_str::<ControlEvent>(&text) {
                Ok(event) => println!("{}", describe(&event)),
                Err(error) => debug!(%error, %text, "ignoring unrecognised frame"),
            },
            Message::Close(_) => break,
            _ => {}
        }
    }
    Ok(())
}

fn describe(event: &ControlEvent) -> String {
    match event {
        ControlEvent::ApiNext | ControlEvent::ApiPrev => event.name().to_string(),
        ControlEvent::ApiGoto(image) => format!("{} {image}", event.name()),
        ControlEvent::ApiConfig(config) => {
            let transition = config
                .transition
                .map(|t| t.display_name().to_string())
                .unwrap_or_else(|| "-".to_string());
            let effects = config
                .effects
                .as_ref()
                .map(|effects| {
                    effects
                        .iter()
                        .map(|e| e.display_name())
                        .collect::<Vec<_>>()
                        .join(",")
                })
                .unwrap_or_else(|| "-".to_string());
            format!("{} transition={transition} effects={effects}", event.name())
        }
    }
}
