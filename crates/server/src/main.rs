use anyhow::Context;
use clap::Parser;
use debox::{Config, DataStore, KakaoGeocoder, Loader};
use debox_server::{AppState, run_server};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Directory or http(s) URL holding the dataset files; overrides the config
    #[arg(short, long)]
    data: Option<String>,

    /// JSON or TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Kakao REST API key; keyword search is disabled without one
    #[arg(long, env = "DEBOX_KAKAO_KEY", hide_env_values = true)]
    kakao_key: Option<String>,

    #[arg(long, default_value = "/debox")]
    base_path: String,
}

async fn load_config(path: &Path) -> anyhow::Result<Config> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading config {}", path.display()))?;

    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Config::from_toml(&text)?,
        _ => Config::from_json(&text)?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debox_server=info,debox=info,info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            load_config(path).await?
        }
        None => Config::default(),
    };
    if let Some(data) = args.data {
        config = config.with_data_base(data);
    }
    config.validate()?;

    let loader = Loader::new(&config)?;
    let mut store = DataStore::new();
    let report = store.load_all(&loader, &config).await;
    if !store.has_data() {
        anyhow::bail!("no dataset could be loaded from {}", config.data_base);
    }
    for (category, e) in &report.failures {
        warn!("{} starts empty: {}", category.label(), e);
    }

    let mut state = AppState::new(config, loader, store).with_base_path(&args.base_path);
    match args.kakao_key {
        Some(key) if !key.trim().is_empty() => {
            state = state.with_geocoder(KakaoGeocoder::new(key.trim())?);
        }
        _ => info!("No Kakao API key given, keyword search disabled"),
    }

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl_c signal: {}", e);
            std::future::pending::<()>().await;
        }
    };

    run_server(listener, state.into_shared(), shutdown).await?;

    Ok(())
}
