use std::future::IntoFuture;

use anyhow::Context;
use clap::Parser;
use rf_outlet::http;
use rf_outlet::modem::OokModem;
use rf_outlet::params::Params;
use rf_outlet::sequencer::Sequencer;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "HTTP remote for RF outlets, streams OOK IQ samples on stdout")]
struct Args {
    /// HTTP listen address.
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: String,

    /// Load PHY parameters from a TOML file.
    #[arg(long)]
    params: Option<String>,
}

/// Logs go to stderr: stdout carries the sample stream.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let p = match &args.params {
        Some(path) => Params::from_file(path)?,
        None => Params::default(),
    };
    tracing::info!(
        sample_rate_hz = p.sample_rate_hz,
        bit_rate = p.bit_rate,
        symbol_len = p.symbol_len(),
        repeats = p.repeats,
        "phy parameters"
    );
    let modem = OokModem::new(p)?;

    let seq = Sequencer::start(modem, Box::new(std::io::stdout()))?;
    let app = http::router(seq.handle());

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("bind {}", args.bind))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    let mut writer = tokio::task::spawn_blocking(move || seq.join());
    let served = tokio::select! {
        res = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .into_future() => {
            res.context("serve http")?;
            true
        }
        res = &mut writer => {
            res.context("join sequencer")??;
            false
        }
    };
    if !served {
        anyhow::bail!("sequencer stopped while serving");
    }

    // The router, and with it every handle, is gone: let the last command drain.
    writer.await.context("join sequencer")??;
    Ok(())
}
