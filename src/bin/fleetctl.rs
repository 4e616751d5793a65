//! Command-line client for the fleet backend.
//!
//! Covers the dashboard's everyday lookups and uploads from a terminal,
//! talking to the same REST backend with the same validation rules.
//!
//! # Usage
//!
//! ```bash
//! # Obtain a token
//! fleetctl login --email ops@example.com
//! export FLEET_TOKEN=...
//!
//! # Browse drivers
//! fleetctl drivers list --search amina --page 2
//! fleetctl drivers show 42
//!
//! # Records
//! fleetctl records payments --from 2026-01-01 --to 2026-01-31
//! fleetctl records trips --driver 42
//!
//! # Imports
//! fleetctl import upload payroll-jan.xlsx --kind payroll
//! fleetctl imports list
//!
//! # Backend reachability
//! fleetctl check
//! ```
//!
//! # Environment Variables
//!
//! - `BACKEND_URL` (required): backend base URL
//! - `FLEET_TOKEN`: bearer token, instead of `--token`
//! - `BACKEND_TIMEOUT_SECONDS`, `BACKEND_RETRIES`: client tuning

use fleet_admin::application::services::import_service::DEFAULT_MAX_UPLOAD_BYTES;
use fleet_admin::application::services::record_service::resolve_range;
use fleet_admin::application::services::{
    AuthService, DocumentService, DriverService, ImportService, RecordService, SessionSigner,
};
use fleet_admin::domain::entities::{
    AccessToken, Credentials, DriverFilter, ImportKind, ImportStatus, RecordFilter, UploadFile,
};
use fleet_admin::domain::expiry::{DEFAULT_WARNING_DAYS, ExpiryStatus};
use fleet_admin::domain::pagination::{Page, PageItem, PageRequest};
use fleet_admin::domain::repositories::{
    AuthRepository, BackendHealth, DocumentRepository, DriverRepository, ImportRepository,
    RecordRepository,
};
use fleet_admin::infrastructure::backend::BackendClient;
use fleet_admin::infrastructure::cache::{CacheService, NullCache};
use fleet_admin::state::Repositories;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Input, Password};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Terminal client for the fleet backend.
#[derive(Parser)]
#[command(name = "fleetctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "BACKEND_URL")]
    backend_url: String,

    /// Bearer token (see `fleetctl login`)
    #[arg(long, env = "FLEET_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "BACKEND_TIMEOUT_SECONDS", default_value_t = 15)]
    timeout: u64,

    /// Retries for idempotent requests
    #[arg(long, env = "BACKEND_RETRIES", default_value_t = 2)]
    retries: usize,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Log in and print a bearer token
    Login {
        /// Account email (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Browse drivers
    Drivers {
        #[command(subcommand)]
        action: DriverAction,
    },

    /// Browse payroll and trip records
    Records {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// Upload data files
    Import {
        #[command(subcommand)]
        action: ImportAction,
    },

    /// Import history
    Imports {
        #[command(subcommand)]
        action: ImportsAction,
    },

    /// Check that the backend is reachable
    Check,
}

#[derive(Subcommand)]
enum DriverAction {
    /// List drivers
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 20)]
        page_size: u32,

        /// Match name, phone or national ID
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a driver with documents and compliance
    Show { id: i64 },
}

/// Filters shared by the record commands.
#[derive(clap::Args)]
struct RecordArgs {
    #[arg(short, long, default_value_t = 1)]
    page: u32,

    #[arg(long, default_value_t = 20)]
    page_size: u32,

    /// Only this driver's rows
    #[arg(short, long)]
    driver: Option<i64>,

    /// First day (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum RecordAction {
    /// Payroll rows
    Payments(RecordArgs),
    /// Trip rows
    Trips(RecordArgs),
}

#[derive(Subcommand)]
enum ImportAction {
    /// Upload a CSV or Excel file
    Upload {
        file: PathBuf,

        /// payroll or trips
        #[arg(short, long)]
        kind: ImportKind,
    },
}

#[derive(Subcommand)]
enum ImportsAction {
    /// List uploaded files and their processing state
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
}

/// Services wired against the backend without caching.
struct Client {
    health: Arc<dyn BackendHealth>,
    auth: AuthService<dyn AuthRepository>,
    drivers: DriverService<dyn DriverRepository>,
    documents: DocumentService<dyn DocumentRepository>,
    records: RecordService<dyn RecordRepository>,
    imports: ImportService<dyn ImportRepository>,
}

impl Client {
    fn new(cli: &Cli) -> Result<Self> {
        let backend = BackendClient::new(
            &cli.backend_url,
            Duration::from_secs(cli.timeout),
            cli.retries,
        )
        .context("Invalid BACKEND_URL")?;
        let repos = Repositories::http(Arc::new(backend));
        let cache: Arc<dyn CacheService> = Arc::new(NullCache::new());

        Ok(Self {
            health: repos.health,
            // The CLI never seals cookies; the key is irrelevant.
            auth: AuthService::new(repos.auth, SessionSigner::new(b"fleetctl")),
            drivers: DriverService::new(repos.drivers, cache.clone()),
            documents: DocumentService::new(repos.documents, cache.clone(), DEFAULT_WARNING_DAYS),
            records: RecordService::new(repos.records, cache.clone()),
            imports: ImportService::new(repos.imports, cache, DEFAULT_MAX_UPLOAD_BYTES),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = Client::new(&cli)?;
    let token = cli.token.clone().map(AccessToken::new);

    match cli.command {
        Commands::Login { email } => login(&client, email).await?,
        Commands::Drivers { action } => handle_drivers(&client, require(token)?, action).await?,
        Commands::Records { action } => handle_records(&client, require(token)?, action).await?,
        Commands::Import {
            action: ImportAction::Upload { file, kind },
        } => upload(&client, require(token)?, file, kind).await?,
        Commands::Imports {
            action: ImportsAction::List { page },
        } => list_imports(&client, require(token)?, page).await?,
        Commands::Check => check(&client).await?,
    }

    Ok(())
}

fn require(token: Option<AccessToken>) -> Result<AccessToken> {
    token.context("No token: pass --token or set FLEET_TOKEN (get one with `fleetctl login`)")
}

/// Renders the page window as `1 … 4 [5] 6 … 20`.
fn pager_line<T>(page: &Page<T>) -> String {
    page.window()
        .iter()
        .map(|item| match item {
            PageItem::Page(n) if *n == page.page => {
                format!("[{n}]").bright_white().bold().to_string()
            }
            PageItem::Page(n) => n.to_string().bright_black().to_string(),
            PageItem::Ellipsis => "…".bright_black().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_footer<T>(page: &Page<T>) {
    println!();
    if page.total_pages() > 1 {
        println!("  Pages: {}", pager_line(page));
    }
    println!("  Total: {}", page.total.to_string().bright_white().bold());
    println!();
}

fn colored_status(status: ExpiryStatus) -> ColoredString {
    match status {
        ExpiryStatus::Valid => status.label().green(),
        ExpiryStatus::ExpiringSoon => status.label().yellow().bold(),
        ExpiryStatus::Expired => status.label().red().bold(),
        ExpiryStatus::NoExpiry => status.label().bright_black(),
    }
}

/// Prompts for credentials and prints the issued token.
async fn login(client: &Client, email: Option<String>) -> Result<()> {
    println!("{}", "🔑 Log in".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;

    let token = client
        .auth
        .login(Credentials { email, password })
        .await
        .map_err(|e| anyhow::anyhow!("Login failed: {}", e))?;

    println!();
    println!("{}", "✅ Logged in".green().bold());
    println!();
    println!("{}", "Use the token with:".bright_white());
    println!("  export FLEET_TOKEN={}", token.as_str().bright_yellow());
    println!();

    Ok(())
}

async fn handle_drivers(client: &Client, token: AccessToken, action: DriverAction) -> Result<()> {
    match action {
        DriverAction::List {
            page,
            page_size,
            search,
        } => {
            let filter = DriverFilter::new(PageRequest::new(page, page_size)).with_search(search);
            let page = client.drivers.list(&token, filter).await?;

            println!("{}", "🚗 Drivers".bright_blue().bold());
            println!();
            if page.items.is_empty() {
                println!("{}", "  No drivers found".yellow());
                return Ok(());
            }

            println!(
                "  {:<6} {:<28} {:<18} {:<24} {:<10}",
                "ID".bright_white().bold(),
                "Name".bright_white().bold(),
                "Phone".bright_white().bold(),
                "Company".bright_white().bold(),
                "Status".bright_white().bold()
            );
            println!("  {}", "─".repeat(90).bright_black());
            for driver in &page.items {
                println!(
                    "  {:<6} {:<28} {:<18} {:<24} {}",
                    driver.id.to_string().bright_black(),
                    driver.full_name.cyan(),
                    driver.phone,
                    driver.company_name.as_deref().unwrap_or("-"),
                    driver.status.label()
                );
            }
            print_footer(&page);
        }
        DriverAction::Show { id } => {
            let today = Local::now().date_naive();
            let driver = client.drivers.get(&token, id).await?;
            let (documents, compliance) = tokio::try_join!(
                client.documents.list(&token, id, today),
                client.documents.compliance(&token, id, today),
            )?;

            println!("{}", driver.full_name.bright_blue().bold());
            println!();
            println!("  Status:      {}", driver.status.label());
            println!("  Phone:       {}", driver.phone);
            println!("  Email:       {}", driver.email.as_deref().unwrap_or("-"));
            println!("  National ID: {}", driver.national_id.as_deref().unwrap_or("-"));
            println!("  Company:     {}", driver.company_name.as_deref().unwrap_or("-"));
            println!();

            println!("{}", "  Documents".bright_white().bold());
            if documents.is_empty() {
                println!("{}", "    none on file".yellow());
            }
            for view in &documents {
                let doc = &view.document;
                let expires = doc
                    .expires_on
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "    {:<18} {:<20} {:<12} {}",
                    doc.kind.label(),
                    doc.number,
                    expires,
                    colored_status(view.status)
                );
            }
            println!();

            if compliance.is_compliant() {
                println!("{}", "  ✅ Compliant".green().bold());
            } else {
                println!("{}", "  ⚠️  Not compliant".red().bold());
            }
            for kind in &compliance.missing {
                println!("    {} missing", kind.label().red());
            }
            for kind in &compliance.expired {
                println!("    {} expired", kind.label().red());
            }
            for kind in &compliance.expiring_soon {
                println!("    {} expiring soon", kind.label().yellow());
            }
            println!();
        }
    }
    Ok(())
}

fn record_filter(args: &RecordArgs) -> Result<RecordFilter> {
    let range = resolve_range(args.from, args.to, Local::now().date_naive())?;
    Ok(RecordFilter::new(PageRequest::new(args.page, args.page_size))
        .with_driver(args.driver)
        .with_range(range))
}

async fn handle_records(client: &Client, token: AccessToken, action: RecordAction) -> Result<()> {
    match action {
        RecordAction::Payments(args) => {
            let page = client.records.payments(&token, record_filter(&args)?).await?;

            println!("{}", "💰 Payments".bright_blue().bold());
            println!();
            println!(
                "  {:<26} {:<24} {:>14} {:>14}",
                "Driver".bright_white().bold(),
                "Period".bright_white().bold(),
                "Gross".bright_white().bold(),
                "Net".bright_white().bold()
            );
            println!("  {}", "─".repeat(82).bright_black());
            for row in &page.items {
                println!(
                    "  {:<26} {:<24} {:>14} {:>14}",
                    row.driver_name.cyan(),
                    format!("{} to {}", row.period_start, row.period_end),
                    format!("{:.2} {}", row.gross_amount, row.currency),
                    format!("{:.2} {}", row.net_amount, row.currency).bright_green()
                );
            }
            print_footer(&page);
        }
        RecordAction::Trips(args) => {
            let page = client.records.trips(&token, record_filter(&args)?).await?;

            println!("{}", "🛣️  Trips".bright_blue().bold());
            println!();
            println!(
                "  {:<12} {:<26} {:>7} {:>12} {:>12}",
                "Date".bright_white().bold(),
                "Driver".bright_white().bold(),
                "Trips".bright_white().bold(),
                "Distance".bright_white().bold(),
                "Revenue".bright_white().bold()
            );
            println!("  {}", "─".repeat(74).bright_black());
            for row in &page.items {
                println!(
                    "  {:<12} {:<26} {:>7} {:>12} {:>12}",
                    row.trip_date.to_string(),
                    row.driver_name.cyan(),
                    row.trips,
                    format!("{:.1} km", row.distance_km),
                    format!("{:.2}", row.revenue)
                );
            }
            print_footer(&page);
        }
    }
    Ok(())
}

fn content_type(path: &std::path::Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "csv" => "text/csv",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xls" => "application/vnd.ms-excel",
        _ => return None,
    };
    Some(mime.to_string())
}

async fn upload(client: &Client, token: AccessToken, file: PathBuf, kind: ImportKind) -> Result<()> {
    let bytes = tokio::fs::read(&file)
        .await
        .with_context(|| format!("Cannot read {}", file.display()))?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .context("File name is not valid UTF-8")?
        .to_string();

    println!(
        "{}",
        format!("📤 Uploading {} ({} bytes)", file_name, bytes.len()).bright_blue()
    );

    let import = client
        .imports
        .upload(
            &token,
            UploadFile {
                kind,
                content_type: content_type(&file),
                file_name,
                bytes,
            },
        )
        .await?;

    println!(
        "{}",
        format!("✅ Accepted as import #{} ({})", import.id, import.status.label())
            .green()
            .bold()
    );
    Ok(())
}

async fn list_imports(client: &Client, token: AccessToken, page: u32) -> Result<()> {
    let page = client
        .imports
        .list(&token, PageRequest::new(page, 20))
        .await?;

    println!("{}", "📋 Imports".bright_blue().bold());
    println!();
    if page.items.is_empty() {
        println!("{}", "  Nothing uploaded yet".yellow());
        return Ok(());
    }

    for import in &page.items {
        let status = match import.status {
            ImportStatus::Completed => import.status.label().green(),
            ImportStatus::Failed => import.status.label().red(),
            ImportStatus::Pending | ImportStatus::Processing => import.status.label().yellow(),
        };
        println!(
            "  {:<6} {:<8} {:<36} {:<12} {}",
            import.id.to_string().bright_black(),
            import.kind.label(),
            import.file_name.cyan(),
            status,
            import
                .uploaded_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
        if let Some(error) = &import.error {
            println!("         {}", error.red());
        }
    }
    print_footer(&page);
    Ok(())
}

async fn check(client: &Client) -> Result<()> {
    println!("{}", "🔍 Checking backend...".bright_blue());
    if client.health.ping().await {
        println!("{}", "✅ Backend reachable".green().bold());
        Ok(())
    } else {
        anyhow::bail!("Backend unreachable")
    }
}
