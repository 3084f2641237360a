//! Application wiring: history seed, live streams, periodic reporting.

use crate::config::AppConfig;
use crate::error::AppResult;
use chrono::{Datelike, Utc};
use mcal_calendar::{detect_anomalies, merge_market_data, month_grid, quick_stats, technical_summary};
use mcal_core::{Interval, StreamKey};
use mcal_feed::{DataCallback, FeedClient, SeriesStore};
use mcal_rest::HistoryClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Owns the store, the feed client and the history client, and drives
/// the refresh loop.
pub struct Application {
    config: AppConfig,
    store: Arc<SeriesStore>,
    feed: FeedClient,
    history: HistoryClient,
}

impl Application {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let history = HistoryClient::new(&config.rest.base_url)?;
        let feed = FeedClient::new(config.feed.clone().into());

        Ok(Self {
            config,
            store: Arc::new(SeriesStore::default()),
            feed,
            history,
        })
    }

    /// Seed each symbol's rolling series from REST history.
    ///
    /// A failed fetch is logged and skipped: the symbol still goes live
    /// from the push streams, just without backfill.
    pub async fn seed_history(&self) {
        for symbol in &self.config.symbols {
            match self
                .history
                .get_historical_data(symbol, self.config.history_days)
                .await
            {
                Ok(points) => {
                    info!(%symbol, count = points.len(), "Seeded history");
                    self.store.seed(symbol, points);
                }
                Err(e) => {
                    warn!(%symbol, error = %e, "History seed failed, continuing live-only");
                }
            }
        }
    }

    /// Subscribe the ticker and daily-kline stream per symbol. Each
    /// delivered point merges into the rolling store.
    pub fn start_streams(&self) {
        for symbol in &self.config.symbols {
            let store = self.store.clone();
            let callback: DataCallback = Arc::new(move |point| store.apply(point));

            self.feed.subscribe_ticker(symbol, callback.clone());
            self.feed.subscribe_kline(symbol, Interval::Day1, callback);
        }
    }

    /// Main loop: report on an interval until ctrl-c, then tear down
    /// every subscription.
    pub async fn run(&mut self) -> AppResult<()> {
        self.seed_history().await;
        self.start_streams();

        let mut ticker = tokio::time::interval(Duration::from_secs(self.config.refresh_secs));

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.report();
                }
                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        warn!(error = %e, "ctrl-c handler failed, shutting down");
                    }
                    info!("Shutdown requested");
                    break;
                }
            }
        }

        self.feed.unsubscribe_all();
        Ok(())
    }

    /// Recompute and log the month classification and summary figures
    /// for every symbol.
    fn report(&self) {
        let today = Utc::now().date_naive();

        for symbol in &self.config.symbols {
            let points = self.store.series(symbol);
            if points.is_empty() {
                info!(%symbol, "No data yet");
                continue;
            }

            let days = match month_grid(today.year(), today.month(), today) {
                Ok(days) => days,
                Err(e) => {
                    warn!(%symbol, error = %e, "Month grid failed");
                    continue;
                }
            };
            let days = detect_anomalies(&merge_market_data(&days, &points));
            let anomalies = days.iter().filter(|d| d.anomaly_type.is_some()).count();

            let stats = quick_stats(&points);
            let technical = technical_summary(&points);

            let ticker_live = self.feed.connection_status(&StreamKey::ticker(symbol.as_str()));
            let kline_live = self
                .feed
                .connection_status(&StreamKey::kline(symbol.as_str(), Interval::Day1));

            info!(
                %symbol,
                days = points.len(),
                anomalies,
                avg_volatility = stats.avg_volatility,
                monthly_performance = stats.monthly_performance,
                high_vol_days = stats.high_vol_days,
                rsi = technical.rsi,
                ma20 = technical.ma20,
                macd = ?technical.macd_trend,
                ticker_live,
                kline_live,
                "Refresh"
            );
        }
    }
}
