mod render;

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use coin_watch_core::models::listing::SortCriterion;
use coin_watch_core::models::session::Session;
use coin_watch_core::models::settings::Settings;
use coin_watch_core::services::auth_service::{Authenticator, SimulatedAuthenticator};
use coin_watch_core::services::series_service::SeriesService;
use coin_watch_core::CoinWatch;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    /// Highest price first
    Price,
    /// Largest 24h change first
    Change,
}

impl From<SortArg> for SortCriterion {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Price => SortCriterion::Price,
            SortArg::Change => SortCriterion::PercentageChange,
        }
    }
}

/// Live cryptocurrency prices in the terminal.
#[derive(Debug, Parser)]
#[command(name = "coin-watch", version, about)]
struct Args {
    /// Comma-separated asset ids to track (default: built-in list)
    #[arg(long, value_delimiter = ',')]
    ids: Option<Vec<String>>,

    /// Seconds between refreshes
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u64).range(1..=86_400))]
    interval_secs: u64,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=300))]
    timeout_secs: u64,

    /// Only show assets whose name contains this text
    #[arg(long, default_value = "")]
    search: String,

    /// Sort order of the list
    #[arg(long, value_enum, default_value_t = SortArg::Price)]
    sort: SortArg,

    /// Fetch once, print, and exit
    #[arg(long)]
    once: bool,

    /// Print the detail view of one asset id and exit
    #[arg(long)]
    detail: Option<String>,

    /// Add a holding to the portfolio, as NAME=AMOUNT (repeatable)
    #[arg(long = "hold", value_name = "NAME=AMOUNT")]
    holdings: Vec<String>,

    /// Sign in as this user before showing prices
    #[arg(long)]
    user: Option<String>,

    /// Password for --user
    #[arg(long, requires = "user", default_value = "")]
    password: String,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        if let Some(ids) = &self.ids {
            settings.asset_ids = ids.iter().map(|id| id.trim().to_lowercase()).collect();
        }
        settings.refresh_interval = Duration::from_secs(self.interval_secs);
        settings.request_timeout = Duration::from_secs(self.timeout_secs);
        settings.stale_after = settings.refresh_interval.saturating_mul(5);
        settings
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn sign_in(
    auth: &dyn Authenticator,
    username: &str,
    password: &str,
) -> anyhow::Result<Session> {
    let session = auth
        .login(username, password)
        .await
        .with_context(|| format!("could not sign in as '{username}'"))?;
    info!(user = %session.username, "signed in");
    Ok(session)
}

fn print_screen(watch: &CoinWatch, color: bool) {
    let rows = watch.visible_quotes();
    let series = SeriesService::new();
    let sparklines: Vec<_> = rows.iter().map(|_| series.generate()).collect();
    print!(
        "{}",
        render::render_quotes(
            &rows,
            &sparklines,
            watch.search_query(),
            watch.sort_criterion(),
            watch.is_stale(),
            color,
        )
    );
    if !watch.holdings().is_empty() {
        print!("{}", render::render_holdings(watch.holdings()));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let color = !args.no_color;

    if let Some(user) = &args.user {
        let session = sign_in(&SimulatedAuthenticator::default(), user, &args.password).await?;
        println!("Signed in as {}", session.username);
    }

    let mut watch = CoinWatch::new(args.settings()).context("invalid settings")?;
    watch.set_search_query(args.search.clone());
    watch.set_sort_criterion(args.sort.into());

    for entry in &args.holdings {
        let (name, amount) = entry
            .split_once('=')
            .with_context(|| format!("holding '{entry}' must look like NAME=AMOUNT"))?;
        watch
            .add_holding(name, amount)
            .with_context(|| format!("rejected holding '{entry}'"))?;
    }

    if args.once || args.detail.is_some() {
        watch.refresh().await;
        if let Some(error) = watch.snapshot().last_error {
            warn!(%error, "could not fetch prices");
        }
        match &args.detail {
            Some(id) => {
                let detail = watch.quote_detail(id)?;
                print!("{}", render::render_detail(&detail, color));
            }
            None => print_screen(&watch, color),
        }
        return Ok(());
    }

    watch.start();
    info!("press Ctrl-C to quit");
    loop {
        tokio::select! {
            changed = watch.changed() => {
                changed?;
                println!();
                print_screen(&watch, color);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    watch.stop().await;
    Ok(())
}
