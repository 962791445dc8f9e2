//! crab-admin — command-line view of the admin console data
//!
//! Runs the same controllers the console uses and prints their state.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use crab_admin::{
    AuditController, ClientConfig, DashboardAggregator, FetchOutcome, HttpClient, LogClient,
    NetworkHttpClient, StatsClient, logger,
};
use shared::util::format_currency_f64;

#[derive(Debug, Parser)]
#[command(name = "crab-admin", about = "Crab POS admin console data")]
struct Cli {
    /// API base URL (overrides CRAB_ADMIN_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Directory for daily log files
    #[arg(long, global = true, env = "CRAB_ADMIN_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Statistics dashboard snapshot
    Dashboard,
    /// Activity log page
    Logs {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        size: Option<u32>,
        /// Filter by user id
        #[arg(long)]
        user: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },
    /// Users available as log filters
    Users,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logger::init_logger_with_file(None, cli.log_dir.as_deref());

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.url {
        config.base_url = url;
    }
    tracing::debug!(base_url = %config.base_url, "Using admin API");

    let http: Arc<dyn HttpClient> =
        Arc::new(NetworkHttpClient::new(&config).context("failed to build HTTP client")?);

    match cli.command {
        Command::Dashboard => dashboard(http, &config).await,
        Command::Logs {
            page,
            size,
            user,
            start,
            end,
        } => {
            let size = size.unwrap_or(config.page_size);
            let controller = AuditController::new(LogClient::new(http), size);
            logs(&controller, page, user, start.as_deref(), end.as_deref()).await
        }
        Command::Users => {
            let users = LogClient::new(http).fetch_users().await?;
            for user in users {
                println!("{}\t{}", user.id, user.display_name);
            }
            Ok(())
        }
    }
}

async fn dashboard(http: Arc<dyn HttpClient>, config: &ClientConfig) -> anyhow::Result<()> {
    let aggregator = DashboardAggregator::new(StatsClient::new(http), config.dashboard);
    let snapshot = aggregator.fetch_snapshot().await?;

    let overview = &snapshot.overview;
    println!("Revenue          {}", format_currency_f64(overview.revenue));
    println!("Orders           {}", overview.orders);
    println!("Customers        {}", overview.customers);
    println!(
        "Avg order value  {}",
        format_currency_f64(overview.average_order_value)
    );

    println!("\nRevenue ({} days)", config.dashboard.days);
    for point in &snapshot.revenue {
        println!("  {:<12} {}", point.date, format_currency_f64(point.revenue));
    }

    println!("\nBest sellers");
    for item in &snapshot.best_sellers {
        println!("  {:<24} x{}", item.name, item.quantity);
    }

    println!("\nLow stock");
    for item in &snapshot.low_stock {
        println!("  {:<24} {}", item.name, item.stock);
    }

    println!("\nOrders");
    for segment in aggregator.order_chart().await.unwrap_or_default() {
        println!("  {:<10} {:>6} {:>5}", segment.label, segment.value, segment.percentage);
    }
    Ok(())
}

async fn logs(
    controller: &AuditController,
    page: u32,
    user: Option<String>,
    start: Option<&str>,
    end: Option<&str>,
) -> anyhow::Result<()> {
    if user.is_some() || start.is_some() || end.is_some() {
        controller.set_raw_filter(user, start, end).await?;
    }
    let outcome = controller.request_page(page).await?;

    let state = controller.state().await;
    if outcome == FetchOutcome::Failed || state.error.is_some() {
        anyhow::bail!(state.error.unwrap_or_else(|| "request failed".into()));
    }

    for entry in &state.items {
        println!("{}", serde_json::to_string(entry)?);
    }
    eprintln!(
        "page {}/{} ({} entries)",
        state.current_page, state.total_pages, state.total_count
    );
    Ok(())
}
