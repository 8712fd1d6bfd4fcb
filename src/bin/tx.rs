use anyhow::Context;
use clap::Parser;
use rf_outlet::command::Command;
use rf_outlet::modem::OokModem;
use rf_outlet::params::Params;
use rf_outlet::sequencer::{Sequencer, Sink};
use std::fs::File;
use std::io::{self, BufRead, BufWriter};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Encode outlet commands (e.g. A1+ C3-) to an OOK IQ stream")]
struct Args {
    /// Command ids. Read one per line from stdin when empty.
    ids: Vec<String>,

    /// Load PHY parameters from a TOML file.
    #[arg(long)]
    params: Option<String>,

    /// Write samples to this file instead of stdout.
    #[arg(long)]
    out: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(io::stderr)
        .try_init();
}

fn open_sink(out: Option<&str>) -> anyhow::Result<Sink> {
    Ok(match out {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("create {path}"))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout()),
    })
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    // Validate everything given on the command line before emitting a sample.
    let cmds = args
        .ids
        .iter()
        .map(|id| {
            id.parse::<Command>()
                .with_context(|| format!("invalid command id {id:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let p = match &args.params {
        Some(path) => Params::from_file(path)?,
        None => Params::default(),
    };
    let modem = OokModem::new(p)?;
    let seq = Sequencer::start(modem, open_sink(args.out.as_deref())?)?;
    let h = seq.handle();

    if args.ids.is_empty() {
        tracing::info!("reading command ids from stdin (Ctrl-D to quit)");
        for line in io::stdin().lock().lines() {
            let line = line.context("read stdin")?;
            let id = line.trim();
            if id.is_empty() {
                continue;
            }
            match id.parse::<Command>() {
                Ok(cmd) => {
                    if h.submit(cmd).is_err() {
                        break;
                    }
                }
                Err(e) => tracing::warn!("skipping {id:?}: {e}"),
            }
        }
    } else {
        for cmd in cmds {
            if h.submit(cmd).is_err() {
                break;
            }
        }
    }

    drop(h);
    seq.join()
}
