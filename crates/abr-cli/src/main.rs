//! `abr` — Australian Business Register lookups from the command line.
//!
//! # Usage
//!
//! ```
//! abr --guid <GUID> abn "53 004 085 616"
//! abr acn 004085616 --history
//! abr search paddy biggs
//! abr --config /etc/abr.toml serve --port 8080
//! ```
//!
//! Results are printed to stdout as pretty JSON; logs go to stderr.

mod settings;

use std::{path::PathBuf, sync::Arc};

use abr_client::{HttpRegistry, Lookup};
use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use settings::Settings;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "abr", author, version, about = "Australian Business Register lookups")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "abr.toml")]
  config: PathBuf,

  /// Authentication GUID issued by the ABR.
  #[arg(long)]
  guid: Option<String>,

  /// Base URL of the ABR XML search service.
  #[arg(long)]
  base_url: Option<String>,

  /// Report values current on this date instead of today.
  #[arg(long, value_name = "YYYY-MM-DD")]
  as_of: Option<NaiveDate>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Look up an Australian Business Number.
  Abn {
    number:  String,
    /// Print every historical record instead of current values.
    #[arg(long)]
    history: bool,
  },
  /// Look up an Australian Company Number.
  Acn {
    number:  String,
    #[arg(long)]
    history: bool,
  },
  /// Search by entity or trading name.
  Search {
    #[arg(required = true, num_args = 1..)]
    name: Vec<String>,
  },
  /// Serve the JSON API over HTTP.
  Serve {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  // Flags override config file and environment.
  let mut settings = Settings::load(&cli.config)?;
  if let Some(guid) = cli.guid {
    settings.guid = guid;
  }
  if let Some(base_url) = cli.base_url {
    settings.base_url = base_url;
  }
  if cli.as_of.is_some() {
    settings.as_of = cli.as_of;
  }
  if settings.guid.is_empty() {
    tracing::warn!("no authentication GUID configured; the register will reject lookups");
  }

  let registry = HttpRegistry::new(settings.client_config())
    .context("failed to build HTTP client")?;
  let lookup = Lookup::new(registry).as_of(settings.as_of);

  match cli.command {
    Command::Abn { number, history } => {
      let result = lookup.lookup_abn(&number).await?;
      if history {
        print_json(&result.history())
      } else {
        print_json(&result)
      }
    }
    Command::Acn { number, history } => {
      let result = lookup.lookup_asic(&number).await?;
      if history {
        print_json(&result.history())
      } else {
        print_json(&result)
      }
    }
    Command::Search { name } => {
      let result = lookup.search_name(&name.join(" ")).await?;
      print_json(&result)
    }
    Command::Serve { host, port } => {
      if let Some(host) = host {
        settings.host = host;
      }
      if let Some(port) = port {
        settings.port = port;
      }
      serve(lookup, &settings.address()).await
    }
  }
}

async fn serve(lookup: Lookup<HttpRegistry>, address: &str) -> anyhow::Result<()> {
  let app = abr_api::api_router(Arc::new(lookup));

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;
  Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("serialising result")?;
  println!("{json}");
  Ok(())
}
