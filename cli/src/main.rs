use std::path::{Path, PathBuf};
use std::time::Duration;

use cake::{CakeConfig, CakeShape, Catalog, Edit, PlacementPlanner, PriceTable};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use uuid::Uuid;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid catalog: {0}")]
    Catalog(#[from] cake::CatalogError),
    #[error("invalid configuration: {0}")]
    Config(#[from] cake::ConfigError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {message}")]
    ServerError { status: u16, message: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "cake", about = "Cake configurator: offline pricing and planning, and a client for the cakeshop service")]
struct Cli {
    #[arg(long, env = "CAKESHOP_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the service is up.
    Ping,
    /// Price a configuration against a catalog file.
    Price {
        #[command(flatten)]
        offline: OfflineArgs,
        /// Print the itemized estimate instead of the total.
        #[arg(long, default_value_t = false)]
        breakdown: bool,
    },
    /// Compute the placement plan for a configuration.
    Plan {
        #[command(flatten)]
        offline: OfflineArgs,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Print the number of pieces per catalog topping instead of the plan.
        #[arg(long, default_value_t = false)]
        pieces: bool,
    },
    Session(SessionCommand),
}

#[derive(Args, Debug)]
struct OfflineArgs {
    /// Catalog JSON (an array of assets).
    #[arg(long)]
    catalog: PathBuf,
    /// Configuration JSON. The catalog default when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the shape by name. Unrecognized names fall back to Round.
    #[arg(long)]
    shape: Option<String>,
}

#[derive(Args, Debug)]
struct SessionCommand {
    #[command(subcommand)]
    command: SessionSubcommand,
}

#[derive(Subcommand, Debug)]
enum SessionSubcommand {
    Create {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
    },
    Show {
        id: Uuid,
    },
    Delete {
        id: Uuid,
    },
    Undo {
        id: Uuid,
    },
    Redo {
        id: Uuid,
    },
    Reset {
        id: Uuid,
    },
    Plan {
        id: Uuid,
    },
    /// Apply one edit, e.g. `--json '{"op":"add_tier"}'`.
    Edit {
        id: Uuid,
        #[arg(long)]
        json: String,
    },
    /// Submit the current design as a quote.
    Quote {
        id: Uuid,
        /// Snapshot image, typically a data URL.
        #[arg(long)]
        snapshot: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let output = match cli.command {
        Command::Ping => run_ping(&cli.base_url).await?,
        Command::Price { offline, breakdown } => run_price(&offline, breakdown)?,
        Command::Plan { offline, seed, pieces } => run_plan(&offline, seed, pieces)?,
        Command::Session(session) => run_session(&cli.base_url, session).await?,
    };
    print_json(&output)
}

// =============================================================================
// OFFLINE
// =============================================================================

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_owned(), source })
}

fn load_catalog(path: &Path) -> Result<Catalog, CliError> {
    Ok(Catalog::from_json(&read_file(path)?)?)
}

/// Parse a configuration file, or fall back to the catalog default. The
/// result carries exactly the catalog's toppings and any `--shape` override,
/// and is validated.
fn load_config(args: &OfflineArgs, catalog: &Catalog) -> Result<CakeConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => serde_json::from_str::<CakeConfig>(&read_file(path)?)?.with_toppings_reconciled(catalog),
        None => CakeConfig::default_for(catalog),
    };
    if let Some(name) = &args.shape {
        config = config.with_shape(CakeShape::from_name(name));
    }
    config.validate()?;
    Ok(config)
}

fn run_price(args: &OfflineArgs, breakdown: bool) -> Result<Value, CliError> {
    let catalog = load_catalog(&args.catalog)?;
    let config = load_config(args, &catalog)?;
    let prices = PriceTable::from_catalog(&catalog);
    if breakdown {
        Ok(serde_json::to_value(prices.breakdown(&config))?)
    } else {
        Ok(serde_json::json!({ "price": prices.quote(&config) }))
    }
}

fn run_plan(args: &OfflineArgs, seed: u64, pieces: bool) -> Result<Value, CliError> {
    let catalog = load_catalog(&args.catalog)?;
    let config = load_config(args, &catalog)?;
    let plan = PlacementPlanner::new(seed).plan(&config, &catalog);
    if !pieces {
        return Ok(serde_json::to_value(plan)?);
    }
    let counts: serde_json::Map<String, Value> =
        catalog.topping_names().map(|name| (name.to_owned(), Value::from(plan.topping_pieces(name)))).collect();
    Ok(Value::Object(counts))
}

// =============================================================================
// SERVICE
// =============================================================================

async fn run_ping(base_url: &str) -> Result<Value, CliError> {
    let client = http_client()?;
    let response = client.get(url(base_url, "/healthz")).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: "health check failed".to_owned() });
    }
    Ok(Value::String("ok".into()))
}

async fn run_session(base_url: &str, session: SessionCommand) -> Result<Value, CliError> {
    use reqwest::Method;

    let (method, path, body) = match session.command {
        SessionSubcommand::Create { config, seed } => {
            let config = match config {
                Some(path) => Some(serde_json::from_str::<Value>(&read_file(&path)?)?),
                None => None,
            };
            (Method::POST, "/api/sessions".to_owned(), Some(serde_json::json!({ "config": config, "seed": seed })))
        }
        SessionSubcommand::Show { id } => (Method::GET, format!("/api/sessions/{id}"), None),
        SessionSubcommand::Delete { id } => (Method::DELETE, format!("/api/sessions/{id}"), None),
        SessionSubcommand::Undo { id } => (Method::POST, format!("/api/sessions/{id}/undo"), None),
        SessionSubcommand::Redo { id } => (Method::POST, format!("/api/sessions/{id}/redo"), None),
        SessionSubcommand::Reset { id } => (Method::POST, format!("/api/sessions/{id}/reset"), None),
        SessionSubcommand::Plan { id } => (Method::GET, format!("/api/sessions/{id}/plan"), None),
        SessionSubcommand::Edit { id, json } => {
            let edit = parse_edit(&json)?;
            (Method::POST, format!("/api/sessions/{id}/edits"), Some(serde_json::to_value(edit)?))
        }
        SessionSubcommand::Quote { id, snapshot } => (
            Method::POST,
            format!("/api/sessions/{id}/quote"),
            Some(serde_json::json!({ "snapshotImage": snapshot })),
        ),
    };
    api_request(base_url, method, &path, body).await
}

/// Validate an edit locally so typos fail before the round trip.
fn parse_edit(raw: &str) -> Result<Edit, CliError> {
    Ok(serde_json::from_str(raw)?)
}

fn http_client() -> Result<reqwest::Client, CliError> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?)
}

fn url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

async fn api_request(
    base_url: &str,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
) -> Result<Value, CliError> {
    let client = http_client()?;
    let request = client.request(method, url(base_url, path));
    let request = if let Some(json) = body { request.json(&json) } else { request };

    let response = request.send().await?;
    let status = response.status();
    let value = response
        .json::<Value>()
        .await
        .unwrap_or(Value::Null);

    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: value.to_string() });
    }
    Ok(value)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
