use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use modkit::{ModuleCtxBuilder, ModuleRegistry};
use modkit_db::{ConnectOpts, DbHandle};
use runtime::{AppConfig, AppConfigProvider, CliArgs, DatabaseConfig, ServerConfig};
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

use api_ingress::ApiIngress;
use customers_info::CustomersInfo;
use orders_info::OrdersInfo;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

// Adapter to make AppConfigProvider implement modkit::ConfigProvider
struct ModkitConfigAdapter(Arc<AppConfigProvider>);

impl modkit::ConfigProvider for ModkitConfigAdapter {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.0.get_module_config(module_name)
    }
}

/// CRM Server - customer and order records API
#[derive(Parser)]
#[command(name = "crm-server")]
#[command(about = "CRM Server - customer and order records API")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("CRM Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config, &args),
    }
}

/// DSN to connect with: in-memory SQLite under `--mock`, otherwise the
/// configured URL with relative SQLite paths resolved against `home_dir`.
fn effective_dsn(db: Option<&DatabaseConfig>, args: &CliArgs, home_dir: &Path) -> Result<String> {
    if args.mock {
        return Ok("sqlite::memory:".to_string());
    }
    let db = db.ok_or_else(|| anyhow!("Database URL not configured"))?;
    let raw = db.url.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }
    DbHandle::detect(raw)?;
    if raw.starts_with("sqlite://") {
        Ok(modkit_db::sqlite::absolutize_sqlite_dsn(raw, home_dir)?)
    } else {
        Ok(raw.to_string())
    }
}

/// DSN with any password removed, for logs.
fn redact_dsn(dsn: &str) -> String {
    match Url::parse(dsn) {
        Ok(mut url) if url.password().is_some() => {
            let _ = url.set_password(Some("***"));
            url.to_string()
        }
        _ => dsn.to_string(),
    }
}

/// Resolve `host:port`; host names are looked up once at startup.
fn bind_addr(server: &ServerConfig) -> Result<SocketAddr> {
    (server.host.as_str(), server.port)
        .to_socket_addrs()
        .with_context(|| format!("invalid bind address '{}:{}'", server.host, server.port))?
        .next()
        .ok_or_else(|| anyhow!("bind address '{}' resolved to nothing", server.host))
}

fn connect_opts(db: Option<&DatabaseConfig>) -> ConnectOpts {
    let mut opts = ConnectOpts {
        acquire_timeout: Some(Duration::from_secs(5)),
        ..Default::default()
    };
    if let Some(db) = db {
        if db.max_conns.is_some() {
            opts.max_conns = db.max_conns;
        }
        if let Some(ms) = db.busy_timeout_ms {
            opts.sqlite_busy_timeout = Some(Duration::from_millis(u64::from(ms)));
        }
    }
    opts
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    let addr = bind_addr(&config.server)?;

    let home_dir = PathBuf::from(&config.server.home_dir);
    let dsn = effective_dsn(config.database.as_ref(), &args, &home_dir)?;
    tracing::info!("Connecting to database: {}", redact_dsn(&dsn));
    let db = Arc::new(DbHandle::connect(&dsn, connect_opts(config.database.as_ref())).await?);
    tracing::info!("Connected DB backend: {:?}", db.engine());

    let config_provider = Arc::new(ModkitConfigAdapter(Arc::new(AppConfigProvider::new(
        config.clone(),
    ))));
    let cancel = CancellationToken::new();
    let ctx = ModuleCtxBuilder::new(cancel.clone())
        .with_db(db.clone())
        .with_config_provider(config_provider)
        .build();

    let ingress = Arc::new(ApiIngress::default());
    let mut builder = ModuleRegistry::builder();
    builder.register_core(ingress.clone());
    let registry = builder
        .with_module(Arc::new(CustomersInfo::default()))
        .with_module(Arc::new(OrdersInfo::default()))
        .build()?;

    tracing::info!("Initializing modules...");
    registry.run_init_phase(&ctx).await?;
    registry.run_db_phase(&db).await?;
    let api = registry.run_rest_phase(&ctx, axum::Router::new())?;

    ingress.override_request_timeout(config.server.timeout_sec);
    let router = ingress.build_router(api);
    ingress.serve(addr, router, cancel).await?;

    drop(registry);
    drop(ctx);
    match Arc::try_unwrap(db) {
        Ok(db) => db.close().await,
        Err(_) => tracing::debug!("database handle still shared at shutdown"),
    }
    tracing::info!("CRM Server stopped");
    Ok(())
}

fn check_config(config: AppConfig, args: &CliArgs) -> Result<()> {
    tracing::info!("Checking configuration...");

    let home_dir = PathBuf::from(&config.server.home_dir);
    let dsn = effective_dsn(config.database.as_ref(), args, &home_dir)?;
    let addr = bind_addr(&config.server)?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Listen address: {addr}");
    println!("Database: {}", redact_dsn(&dsn));
    println!("Server config:");
    println!("{}", config.to_yaml()?);
    Ok(())
}
