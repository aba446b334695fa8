use clap::Parser;
use iterdns_domain::CliOverrides;
use std::sync::atomic::Ordering;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "iterdns")]
#[command(version = "0.1.0")]
#[command(about = "iterdns - iterative DNS resolver walking from the root servers")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Root hints file path
    #[arg(long, value_name = "FILE")]
    root_hints: Option<String>,

    /// Server asked for the root referral when no root hints are stored (IP or IP:PORT)
    #[arg(long)]
    bootstrap_server: Option<String>,

    /// Ignore the stored root hints and fetch them again
    #[arg(long)]
    refresh_root_hints: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        root_hints_path: cli.root_hints.clone(),
        bootstrap_server: cli.bootstrap_server.clone(),
        refresh_root_hints: cli.refresh_root_hints,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting iterdns v{}", env!("CARGO_PKG_VERSION"));

    let root_hints = bootstrap::init_root_hints(&config).await?;
    let dns_services = di::DnsServices::new(&config, root_hints);

    let dns_addr = config.server.listen_address();

    tokio::select! {
        result = server::start_dns_server(dns_addr, dns_services.handler.clone()) => {
            if let Err(e) = result {
                error!(error = %e, "DNS server error");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    if let Some(cache) = &dns_services.cache {
        let metrics = cache.metrics();
        info!(
            entries = cache.len(),
            hits = metrics.hits.load(Ordering::Relaxed),
            misses = metrics.misses.load(Ordering::Relaxed),
            hit_rate = format!("{:.1}%", metrics.hit_rate()),
            "Cache statistics"
        );
    }

    info!("Server shutdown complete");
    Ok(())
}
