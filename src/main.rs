mod dashboard;
mod market;
mod news;
mod scenario;
mod scheduling;
mod sentiment;
mod types;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::dashboard::Dashboard;
use crate::dashboard::analysis_filter::AnalysisFilter;
use crate::dashboard::snapshot::DashboardSnapshot;
use crate::scenario::scenario::Scenario;
use crate::scenario::sources::NewsSourceKind;
use crate::scheduling::phase_tracker::PhaseTracker;
use crate::scheduling::policies::market_hours_policy::MarketHoursPolicy;
use crate::scheduling::policies::min_interval_policy::MinIntervalPolicy;
use crate::scheduling::refresh_scheduler::RefreshScheduler;
use crate::scheduling::schedule_context::ScheduleContext;
use crate::scheduling::types::{ScheduleDecision, SkipReason};
use crate::sentiment::sentiment_label::SentimentLabel;
use crate::types::dashboard_config::DashboardConfig;

#[derive(Debug, Clone, Parser)]
struct Args {
    #[arg(long, value_enum, default_value = "mock")]
    pub source: NewsSourceKind,

    #[arg(long, default_value = DashboardConfig::FILE_NAME)]
    pub config: PathBuf,

    /// Only list analysis rows with this sentiment.
    #[arg(long, value_enum)]
    pub sentiment: Option<SentimentLabel>,

    /// Only list analysis rows from this publisher (case-insensitive).
    #[arg(long)]
    pub news_source: Option<String>,

    /// Render a single snapshot and exit.
    #[arg(long)]
    pub once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("market_pulse=debug".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    let config = DashboardConfig::load(&args.config)?.clone();
    let live_interval = config.refresh.live_interval();

    let source = Scenario::news_source(args.source)?;
    let dashboard = Dashboard::new(config, source)?
        .with_analysis_filter(AnalysisFilter::new(args.sentiment, args.news_source));

    let now = dashboard.service().current_local_time();
    let snapshot = dashboard.refresh(now).await?;
    render(&snapshot)?;

    if args.once {
        return Ok(());
    }

    let mut refresh_scheduler = RefreshScheduler::new(vec![
        Box::new(MarketHoursPolicy),
        Box::new(MinIntervalPolicy::new(live_interval)),
    ]);

    let mut ticker = tokio::time::interval(live_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    let mut phase_tracker = PhaseTracker::seeded(snapshot.phase.status);

    loop {
        tokio::select! {
            tick = ticker.tick() => {
                let now = dashboard.service().current_local_time();
                let phase = dashboard.service().classify(&now);

                let status_changed = phase_tracker.observe(phase.status);
                if status_changed {
                    info!(
                        status = %phase.status,
                        context = %phase.data_context,
                        "market phase changed"
                    );
                }

                let context = ScheduleContext {
                    now: tick.into_std(),
                    phase: &phase,
                };

                match refresh_scheduler.decide(&context) {
                    ScheduleDecision::Refresh => {}
                    ScheduleDecision::Skip(reason) if status_changed => {
                        tracing::debug!(?reason, "rendering phase change");
                    }
                    ScheduleDecision::Skip(SkipReason::MarketClosed { status }) => {
                        tracing::debug!(
                            %status,
                            next_open = %dashboard.service().time_until_next_open(&now),
                            "market closed; auto-refresh paused"
                        );
                        continue;
                    }
                    ScheduleDecision::Skip(reason) => {
                        tracing::debug!(?reason, "refresh skipped");
                        continue;
                    }
                }

                match dashboard.refresh(now).await {
                    Ok(snapshot) => render(&snapshot)?,
                    Err(error) => error!("dashboard refresh failed: {error:?}"),
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}

fn render(snapshot: &DashboardSnapshot) -> Result<()> {
    info!(
        status = %snapshot.phase.status,
        context = %snapshot.phase.data_context,
        source = snapshot.data_source,
        articles = snapshot.analysis.len(),
        overall = snapshot.metrics.as_ref().map(|metrics| metrics.overall_sentiment),
        "{}",
        snapshot.phase
    );

    if let Some(notice) = &snapshot.notice {
        info!(%notice);
    }

    if let Some(notice) = &snapshot.analysis_notice {
        info!(%notice);
    }

    println!("{}", serde_json::to_string(snapshot)?);

    Ok(())
}
