use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mockstash::config::{Config, LogFormat, LoggingConfig};
use mockstash::store::{DiskStore, FingerprintKey, RequestIdentity, RequestMethod};

#[derive(Parser)]
#[command(name = "mockstash")]
#[command(about = "Inspect a directory of recorded HTTP responses")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Fixture root (overrides the config file)
    #[arg(long, global = true, env = "MOCKSTASH_ROOT")]
    root: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `mockstash=trace` (overrides the config file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the fingerprint of a request
    Fingerprint {
        /// HTTP method
        method: RequestMethod,
        /// Request URI, exactly as recorded
        uri: String,
    },

    /// Print where the record for a request and status lives
    Path {
        /// HTTP method
        method: RequestMethod,
        /// Request URI, exactly as recorded
        uri: String,
        /// Expected response status
        status: u16,
    },

    /// Print a recorded response (exit code 1 when absent)
    Lookup {
        /// HTTP method
        method: RequestMethod,
        /// Request URI, exactly as recorded
        uri: String,
        /// Expected response status
        status: u16,

        /// Print response headers
        #[arg(long)]
        headers: bool,

        /// Print the response body
        #[arg(long)]
        body: bool,
    },

    /// List every record under the root
    List,

    /// Check that every record decodes and sits under its own fingerprint
    Verify,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    init_logging(&config.logging, cli.log_level.as_deref())?;

    let root = config.resolve_root(cli.root.as_deref());
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Fingerprint { method, uri } => {
            let identity = RequestIdentity::new(method, uri)?;
            writeln!(out, "{}", FingerprintKey::of(&identity))?;
        }

        Commands::Path {
            method,
            uri,
            status,
        } => {
            let store = open_store(&root)?;
            let identity = RequestIdentity::new(method, uri)?;
            writeln!(out, "{}", store.record_path(&identity, status).display())?;
        }

        Commands::Lookup {
            method,
            uri,
            status,
            headers,
            body,
        } => {
            let store = open_store(&root)?;
            let identity = RequestIdentity::new(method, uri)?;
            let Some(response) = store.read(&identity, status)? else {
                eprintln!("No mock recorded for {} with status {}", identity, status);
                return Ok(ExitCode::FAILURE);
            };

            writeln!(
                out,
                "{} -> {} ({} bytes)",
                identity,
                response.status,
                response.body.len()
            )?;
            if headers {
                for (name, value) in &response.headers {
                    writeln!(out, "{}: {}", name, value)?;
                }
            }
            if body {
                if headers {
                    writeln!(out)?;
                }
                out.write_all(&response.body)?;
                if !response.body.ends_with(b"\n") {
                    writeln!(out)?;
                }
            }
        }

        Commands::List => {
            let store = open_store(&root)?;
            for entry in store.list()? {
                match store.load_entry(&entry) {
                    Ok(record) => writeln!(
                        out,
                        "{} {} {} {}",
                        entry.fingerprint,
                        entry.status,
                        record.identity.method(),
                        record.identity.uri()
                    )?,
                    Err(e) => writeln!(out, "{} {} <unreadable: {}>", entry.fingerprint, entry.status, e)?,
                }
            }
        }

        Commands::Verify => {
            let store = open_store(&root)?;
            let report = store.verify()?;
            for (path, problem) in &report.problems {
                writeln!(out, "{}: {}", path.display(), problem)?;
            }
            writeln!(
                out,
                "{} records checked, {} problems",
                report.checked,
                report.problems.len()
            )?;
            if !report.is_clean() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn open_store(root: &Path) -> anyhow::Result<DiskStore> {
    DiskStore::open(root).with_context(|| format!("open fixture root {}", root.display()))
}

/// Install a stderr subscriber; stdout carries command output.
fn init_logging(config: &LoggingConfig, level_override: Option<&str>) -> anyhow::Result<()> {
    let level = level_override.unwrap_or(&config.level);
    let filter = EnvFilter::try_new(level).with_context(|| format!("invalid log filter `{}`", level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr);

    match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow::anyhow!("initialize logging subscriber: {}", e))
}
