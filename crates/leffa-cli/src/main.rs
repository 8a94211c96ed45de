mod commands;

use clap::{Parser, Subcommand};
use leffa_analytics::Granularity;
use leffa_core::RecentOrdersSort;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "leffa-cli")]
#[command(about = "Leffa merchant analytics command line interface")]
struct Cli {
    /// Report zero instead of random values for metrics with no data source
    /// (per-product sales, unread messages)
    #[arg(long, global = true)]
    zero_placeholders: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sales chart, category split, top products and summary KPIs
    Analytics {
        /// daily, weekly, monthly or yearly
        #[arg(long, default_value_t = Granularity::Monthly)]
        range: Granularity,
    },
    /// Merchant home-screen numbers
    Summary {
        /// Overrides `LEFFA_RECENT_ORDERS_SORT` (source or newest_first)
        #[arg(long)]
        sort: Option<RecentOrdersSort>,
    },
    /// Filtered catalog listing with catalog health counts
    Products {
        /// Keep placeholder products too
        #[arg(long)]
        include_placeholders: bool,
        /// Keep products that are not ACTIVE
        #[arg(long)]
        include_inactive: bool,
        #[arg(long)]
        min_price: Option<Decimal>,
        #[arg(long)]
        min_stock: Option<i64>,
        /// Allowed category name or code; repeatable
        #[arg(long = "category")]
        categories: Vec<String>,
    },
    /// Print a dashboard update every poll interval until Ctrl-C
    Watch {
        /// Overrides `LEFFA_POLL_INTERVAL_SECS`
        #[arg(long)]
        interval_secs: Option<u64>,
        /// Overrides `LEFFA_RECENT_ORDERS_SORT` (source or newest_first)
        #[arg(long)]
        sort: Option<RecentOrdersSort>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = leffa_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Analytics { range } => {
            commands::run_analytics(&config, cli.zero_placeholders, range).await
        }
        Commands::Summary { sort } => {
            commands::run_summary(&config, cli.zero_placeholders, sort).await
        }
        Commands::Products {
            include_placeholders,
            include_inactive,
            min_price,
            min_stock,
            categories,
        } => {
            let options = commands::product_filter_options(
                include_placeholders,
                include_inactive,
                min_price,
                min_stock,
                categories,
            );
            commands::run_products(&config, &options).await
        }
        Commands::Watch {
            interval_secs,
            sort,
        } => commands::run_watch(&config, cli.zero_placeholders, interval_secs, sort).await,
    }
}
