//! `mailrelay` - relays a voicemail notification piped on standard input.
//!
//! Drop-in for the gateway's `sendmail` command: the message is read from
//! stdin, parsed, assembled, and handed to the transport. Any failure exits
//! with status 1 and a diagnostic on stderr.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Parser;
use mailrelay_core::{Config, SpoolTransport, relay};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mailrelay", version)]
#[command(about = "Relays PBX voicemail notifications to a mail submission service", long_about = None)]
struct Cli {
    /// Log level: 0 warnings, 1 info, 2 debug, 3 trace.
    #[arg(short = 'l', long = "log", value_name = "LOGLEVEL", default_value_t = 0)]
    log: u8,

    /// Read recipients from the To, Cc and Bcc headers (always done; kept
    /// for sendmail compatibility).
    #[arg(short = 't', long)]
    trust: bool,

    /// Configuration file [default: ~/.mail365.conf].
    #[arg(short = 'c', long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter(cli.log).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("mailrelay: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn log_filter(level: u8) -> &'static str {
    match level {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let raw = read_message()?;
    info!(bytes = raw.len(), "read message from stdin");
    if cli.trust {
        debug!("recipients are taken from the message headers");
    }

    let path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let config = Config::load(&path)?;
    info!(username = %config.username, "configuration loaded");

    let mut transport = SpoolTransport::new(io::stdout().lock(), &config);
    relay(&raw, &mut transport).context("message not relayed")?;
    Ok(())
}

fn read_message() -> anyhow::Result<String> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        bail!("improper usage: the message must be piped to standard input");
    }

    let mut raw = String::new();
    stdin
        .read_to_string(&mut raw)
        .context("failed to read message from standard input")?;
    Ok(raw)
}
