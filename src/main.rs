use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use promptgate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "promptgate", version, about = "Describe an app, sign in, and hand it off for creation")]
struct Args {
    /// Path to the config file (default: <config dir>/promptgate/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the identity service base URL
    #[arg(long, value_name = "URL")]
    identity_url: Option<String>,

    /// Override the creation pipeline base URL
    #[arg(long, value_name = "URL")]
    pipeline_url: Option<String>,

    /// Category sent with every prompt
    #[arg(long)]
    category: Option<String>,

    /// Log filter (e.g. "debug", "promptgate=trace"); RUST_LOG takes precedence
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.identity_url {
            config.identity.base_url = url.clone();
        }
        if let Some(url) = &self.pipeline_url {
            config.pipeline.base_url = url.clone();
        }
        if let Some(category) = &self.category {
            config.pipeline.category = category.clone();
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    args.apply_overrides(&mut config);
    config.validate()?;

    let log_path = promptgate::logging::init_logging(&config.logging, args.log_level.as_deref());
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        identity = %config.identity.base_url,
        pipeline = %config.pipeline.base_url,
        log = ?log_path,
        "Starting"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let handoff = promptgate::ui::run(&config, &runtime).context("Terminal UI failed")?;
    runtime.shutdown_timeout(std::time::Duration::from_millis(500));

    if let Some(handoff) = handoff {
        tracing::info!(app_id = ?handoff.app_id, "Handing off to creation view");
        println!("{}", serde_json::to_string_pretty(&handoff)?);
    }

    Ok(())
}
