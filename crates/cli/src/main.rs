use std::path::PathBuf;

use {
    clap::Parser,
    fishbowl_browser::{BrowserSession, SessionConfig},
    fishbowl_config::Deployment,
    tokio_util::sync::CancellationToken,
    tracing::{error, info},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "fishbowl", about = "Fishbowl — one supervised, debuggable browser session")]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,

    /// Path to the browser binary (auto-detected if not set).
    #[arg(long, env = "FISHBOWL_CHROME")]
    chrome_path: Option<PathBuf>,

    /// Directory containing the unpacked error-capture extension.
    #[arg(long, env = "FISHBOWL_EXTENSION_DIR")]
    extension_dir: Option<PathBuf>,

    /// Override the workspace root resolved from the deployment environment.
    #[arg(long)]
    workspace_root: Option<PathBuf>,
}

/// Initialise tracing: `RUST_LOG` wins, `--log-level` is the fallback.
fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_telemetry(&cli);

    // Read the deployment marker exactly once; everything downstream takes
    // the resolved value explicitly.
    let deployment = Deployment::detect();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        managed = deployment.is_managed(),
        "fishbowl starting"
    );

    let defaults = SessionConfig::default();
    let config = SessionConfig {
        workspace_root: cli
            .workspace_root
            .unwrap_or_else(|| deployment.workspace_root()),
        extension_dir: cli
            .extension_dir
            .unwrap_or_else(|| defaults.extension_dir.clone()),
        chrome_path: cli.chrome_path,
        ..defaults
    };

    let session = match BrowserSession::launch(&config).await {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "failed to launch browser session");
            return Err(e.into());
        },
    };

    // External shutdown is a cancellation signal delivered to the supervisor,
    // not an uncaught process kill.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    if let Err(e) = session.run_until_cancelled(cancel).await {
        error!(error = %e, "browser session ended abnormally");
        return Err(e.into());
    }

    Ok(())
}
