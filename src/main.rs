use bedrock_gateway::{
    build_router, AppState, GatewayConfig, GatewayHandler, ReqwestTransport, SharedLogger,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "bedrock-gateway",
    about = "OpenAI-compatible chat completions in front of Claude on Bedrock",
    version
)]
struct Cli {
    /// Path to config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Diagnostic log file path
    #[arg(long, default_value = "bedrock-gateway.log")]
    log_file: PathBuf,

    /// Print config search paths and exit
    #[arg(long)]
    show_config_paths: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bedrock_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if cli.show_config_paths {
        println!("Config search paths:");
        for (i, path) in bedrock_gateway::config::config_search_paths().iter().enumerate() {
            println!("  {}. {}", i + 1, path.display());
        }
        return Ok(());
    }

    let mut config = GatewayConfig::find_and_load(cli.config.as_deref())?;

    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let logger = SharedLogger::new(&cli.log_file)?;

    let credential = config.resolve_credential();
    match credential {
        Some(ref cred) => info!(
            "Credential loaded from {} (embedded target {})",
            config.credential_env,
            if cred.decoded_target().is_some() { "decodable" } else { "not decodable" }
        ),
        None => {
            warn!(
                "{} is not set; completions will report a configuration error",
                config.credential_env
            );
            logger.error(
                "startup",
                format!("{} is missing. Check the deployment configuration.", config.credential_env),
            );
        }
    }

    info!("bedrock-gateway v{}", env!("CARGO_PKG_VERSION"));
    info!("  Endpoint:  {}", config.effective_endpoint());
    info!("  Timeout:   {}s", config.timeout_secs);
    info!("  Log file:  {}", cli.log_file.display());

    logger.info(
        "startup",
        format!("Starting bedrock-gateway on {}", config.bind_addr()),
    );

    let transport = Arc::new(ReqwestTransport::new(reqwest::Client::builder().build()?));
    let gateway = GatewayHandler::new(&config, credential, transport, logger.clone());

    let bind_addr = config.bind_addr();
    let state = Arc::new(AppState {
        config,
        gateway,
        logger,
    });

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
