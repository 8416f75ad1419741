//! Periodic session re-validation.

use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace, warn};

/// Cadence of background session refreshes.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Shortest period the scheduler accepts.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Owner of at most one periodic refresh task.
///
/// The first tick fires one full period after [`RefreshScheduler::arm`];
/// there is no immediate tick and no jitter. Ticks that fall behind are
/// delayed rather than bursted, and a tick never overlaps the previous one.
/// Dropping the scheduler aborts its task.
#[derive(Debug)]
pub struct RefreshScheduler {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl RefreshScheduler {
    /// Create a disarmed scheduler. Periods below
    /// [`MIN_REFRESH_INTERVAL`] are clamped.
    pub fn new(period: Duration) -> Self {
        let period = if period < MIN_REFRESH_INTERVAL {
            warn!(
                requested_ms = period.as_millis() as u64,
                "refresh interval below minimum; clamping"
            );
            MIN_REFRESH_INTERVAL
        } else {
            period
        };

        Self {
            period,
            handle: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true while a refresh task is scheduled.
    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    /// Start a new periodic task, replacing any existing one.
    ///
    /// `tick` runs once per period; returning [`ControlFlow::Break`] ends the
    /// task. Must be called from within a tokio runtime.
    pub fn arm<F, Fut>(&mut self, mut tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ControlFlow<()>> + Send + 'static,
    {
        self.disarm();

        let period = self.period;
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                trace!("refresh tick");
                if tick().await.is_break() {
                    debug!("refresh task finished");
                    break;
                }
            }
        });

        self.handle = Some(handle);
        debug!(period_secs = period.as_secs(), "refresh scheduler armed");
    }

    /// Cancel the task, if any, and clear the handle.
    pub fn disarm(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("refresh scheduler disarmed");
        }
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new(REFRESH_INTERVAL)
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.disarm();
    }
}
