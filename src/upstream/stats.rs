//! Usage statistics poller for the footer widget.
//!
//! One background task fetches the stats endpoint right away and then on a
//! fixed interval. The latest result is kept as a snapshot that
//! GET /api/stats renders into a `StatsView`.
//!
//! At most one poll cycle is in flight: the periodic loop is sequential and
//! skips missed ticks, and a manual refresh that races a running cycle is
//! skipped instead of issuing a second request.
//!
//! Used by: routes/stats.rs, main.rs (spawns `run`)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::error::{AppError, Result};
use crate::models::{StatsPayload, StatsStatus, StatsView};
use crate::upstream::UpstreamClient;

pub type SharedStats = Arc<StatsPoller>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Completed,
    /// Another cycle already held the in-flight slot.
    Skipped,
}

#[derive(Debug, Default)]
struct Snapshot {
    payload: Option<StatsPayload>,
    error: Option<String>,
    fetched_at: Option<DateTime<Utc>>,
}

pub struct StatsPoller {
    client: UpstreamClient,
    url: String,
    snapshot: RwLock<Snapshot>,
    in_flight: AtomicBool,
}

/// Releases the in-flight slot when dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl StatsPoller {
    pub fn new(client: UpstreamClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            snapshot: RwLock::new(Snapshot::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_polling(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one fetch cycle unless one is already running.
    pub async fn poll_once(&self) -> Result<PollOutcome> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::debug!("Stats poll already in flight, skipping");
            return Ok(PollOutcome::Skipped);
        };

        let result = self.client.get_json::<StatsPayload>(&self.url).await;

        let mut snapshot = self
            .snapshot
            .write()
            .map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
        match result {
            Ok(payload) => {
                snapshot.payload = Some(payload);
                snapshot.error = None;
            }
            Err(e) => {
                tracing::warn!("Failed to fetch usage stats: {}", e);
                snapshot.payload = None;
                snapshot.error = Some(e.to_string());
            }
        }
        snapshot.fetched_at = Some(Utc::now());

        Ok(PollOutcome::Completed)
    }

    /// Poll every `period` until `shutdown` flips or its sender is dropped.
    pub async fn run(self: Arc<Self>, period: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.poll_once().await {
                        tracing::error!("Stats poll failed: {}", e);
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Stats poller stopped");
    }

    pub fn view(&self) -> Result<StatsView> {
        let snapshot = self
            .snapshot
            .read()
            .map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
        let mut view = build_view(&snapshot);
        view.refreshing = self.is_polling();
        Ok(view)
    }
}

fn build_view(snapshot: &Snapshot) -> StatsView {
    if snapshot.fetched_at.is_none() {
        return StatsView {
            status: StatsStatus::Loading,
            total_seconds: None,
            total_time: None,
            date: None,
            error: None,
            fetched_at: None,
            refreshing: false,
        };
    }

    if let Some(error) = &snapshot.error {
        return StatsView {
            status: StatsStatus::Error,
            total_seconds: None,
            total_time: None,
            date: None,
            error: Some(error.clone()),
            fetched_at: snapshot.fetched_at,
            refreshing: false,
        };
    }

    let data = snapshot.payload.as_ref().and_then(|p| p.data.as_ref());
    let total_seconds = data.and_then(|d| d.total_seconds);
    let date = data
        .and_then(|d| d.range.as_ref())
        .and_then(|r| r.date.as_deref())
        .and_then(format_date);

    StatsView {
        status: StatsStatus::Ready,
        total_seconds,
        total_time: total_seconds.map(format_duration),
        date,
        error: None,
        fetched_at: snapshot.fetched_at,
        refreshing: false,
    }
}

/// Render seconds as hours and minutes, e.g. `2小时 5分钟`.
pub fn format_duration(seconds: f64) -> String {
    if seconds.is_nan() || seconds <= 0.0 {
        return "0分钟".to_string();
    }

    let total = seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;

    if hours > 0 {
        if minutes > 0 {
            format!("{}小时 {}分钟", hours, minutes)
        } else {
            format!("{}小时", hours)
        }
    } else {
        format!("{}分钟", minutes)
    }
}

/// Long zh-CN date, e.g. `2026年10月14日`. Accepts `YYYY-MM-DD` or RFC 3339.
pub fn format_date(date: &str) -> Option<String> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }

    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|d| d.date_naive()))?;

    Some(parsed.format("%Y年%-m月%-d日").to_string())
}
