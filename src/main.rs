//! Edge gate CLI.
//!
//! Runs the edge handlers against a configuration file, the way the edge
//! platform would for a single invocation.
//!
//! # Architecture Overview
//!
//! ```text
//!     event JSON / --uri ──▶ EdgeRequest ──▶ handler ──▶ outcome JSON (stdout)
//!                                              ▲
//!                          ExecutionContext ───┘
//!                          (config file, loaded once)
//! ```

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use edge_gate::config::{ConfigError, ConfigSource, FileSource};
use edge_gate::handler::{AccessGateHandler, EdgeOutcome, RedirectHandler};
use edge_gate::http::{EdgeEvent, EdgeRequest};
use edge_gate::observability::{init_logging, resolve_level, LogFormat};

#[derive(Parser)]
#[command(name = "edge-gate")]
#[command(about = "Edge access control and redirect resolver", long_about = None)]
struct Cli {
    /// Configuration file (TOML or JSON); defaults to $EDGE_GATE_CONFIG
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset; defaults to the config's log_level
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format (pretty, json)
    #[arg(long, default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the basic-auth access gate on one request
    Auth(RequestArgs),
    /// Run the redirect/rewrite resolver on one request
    Redirect(RequestArgs),
    /// Validate the configuration and compile both handlers' state
    Check,
}

#[derive(Args)]
struct RequestArgs {
    /// Platform event JSON file, `-` for stdin
    #[arg(long, conflicts_with_all = ["uri", "header"])]
    event: Option<String>,

    /// Request path
    #[arg(long)]
    uri: Option<String>,

    /// Request header as `Name: value`, repeatable
    #[arg(short = 'H', long = "header")]
    header: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let source = match cli.config.clone() {
        Some(path) => Ok(FileSource::new(path)),
        None => FileSource::from_env(),
    };

    // A config that fails to load here fails again, with logging, in `run`.
    let configured = source
        .as_ref()
        .ok()
        .and_then(|source| source.load().ok())
        .map(|config| config.log_level);
    init_logging(
        resolve_level(cli.log_level.as_deref(), configured.as_deref()),
        cli.log_format,
    );

    let result = source
        .map_err(Box::<dyn std::error::Error>::from)
        .and_then(|source| run(cli.command, source));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "edge-gate failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, source: FileSource) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Auth(args) => {
            let handler = AccessGateHandler::new(source);
            print_outcome(&handler.handle(build_request(&args)?)?)
        }
        Commands::Redirect(args) => {
            let handler = RedirectHandler::new(source);
            print_outcome(&handler.handle(build_request(&args)?)?)
        }
        Commands::Check => check(source),
    }
}

fn check(source: FileSource) -> Result<(), Box<dyn std::error::Error>> {
    println!("configuration: {}", source.path().display());
    let shared: Arc<dyn ConfigSource> = Arc::new(source);

    let redirects = RedirectHandler::from_shared(shared.clone());
    let loaded = redirects.context().get()?;
    println!(
        "redirects: {} exact, {} pattern",
        loaded.compiled.exact_len(),
        loaded.compiled.pattern_len()
    );
    println!(
        "allow_omit_html_extension: {}",
        loaded.config.allow_omit_html_extension
    );
    println!("response headers: {}", loaded.config.response_headers.len());
    println!("log level: {}", loaded.config.log_level);

    let gate = AccessGateHandler::from_shared(shared);
    match gate.context().get() {
        Ok(_) => println!("basic auth: configured"),
        Err(ConfigError::MissingField(field)) => {
            println!("basic auth: not configured (missing {field})")
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

fn build_request(args: &RequestArgs) -> Result<EdgeRequest, Box<dyn std::error::Error>> {
    if let Some(event) = &args.event {
        let text = if event == "-" {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            fs::read_to_string(event)?
        };
        return Ok(EdgeEvent::from_json(&text)?.into_request()?);
    }

    let uri = args.uri.as_deref().ok_or("either --event or --uri is required")?;
    let (path, query) = uri.split_once('?').unwrap_or((uri, ""));

    let mut request = EdgeRequest::get(path);
    request.querystring = query.to_string();
    for header in &args.header {
        let (name, value) = header
            .split_once(':')
            .ok_or_else(|| format!("invalid header {header:?}, expected `Name: value`"))?;
        request.headers.append(name.trim(), value.trim());
    }

    Ok(request)
}

fn print_outcome(outcome: &EdgeOutcome) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(outcome)?);
    Ok(())
}
