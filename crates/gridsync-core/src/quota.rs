//! Sliding-window request pacing.
//!
//! The remote service enforces separate read and write quotas per credential
//! over a rolling window. [`QuotaLimiter`] keeps one timestamp log per kind and
//! blocks the caller, in-line, while admitting another request would exceed the
//! ceiling. This is voluntary pacing, not hard enforcement: a second process
//! using the same credential is invisible to it.

use log::info;
use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};

/// Whether a remote operation counts against the read or the write quota.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Read,
    Write,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Read => f.write_str("read"),
            RequestKind::Write => f.write_str("write"),
        }
    }
}

/// Quota ceilings and window timing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuotaConfig {
    /// Reads admitted per window.
    pub read_quota: usize,
    /// Writes admitted per window.
    pub write_quota: usize,
    /// Record requests but never block.
    pub ignore_quota: bool,
    pub window: Duration,
    /// Extra age an entry must reach before it leaves the window.
    pub slack: Duration,
    /// Sleep between re-checks while throttled.
    pub poll_interval: Duration,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        QuotaConfig {
            read_quota: 90,
            write_quota: 90,
            ignore_quota: false,
            window: Duration::from_secs(100),
            slack: Duration::from_secs(1),
            poll_interval: Duration::from_secs(1),
        }
    }
}

static SHARED: Lazy<Arc<QuotaLimiter>> =
    Lazy::new(|| Arc::new(QuotaLimiter::new(QuotaConfig::default())));

pub struct QuotaLimiter {
    config: RwLock<QuotaConfig>,
    clock: Arc<dyn Clock>,
    reads: Mutex<VecDeque<Instant>>,
    writes: Mutex<VecDeque<Instant>>,
}

impl QuotaLimiter {
    pub fn new(config: QuotaConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: QuotaConfig, clock: Arc<dyn Clock>) -> Self {
        QuotaLimiter {
            config: RwLock::new(config),
            clock,
            reads: Mutex::new(VecDeque::new()),
            writes: Mutex::new(VecDeque::new()),
        }
    }

    /// The process-wide limiter shared by every client that is not given its own.
    pub fn shared() -> Arc<QuotaLimiter> {
        SHARED.clone()
    }

    pub fn config(&self) -> QuotaConfig {
        self.config.read().clone()
    }

    pub fn configure(&self, config: QuotaConfig) {
        *self.config.write() = config;
    }

    /// Number of requests of `kind` still inside the window.
    pub fn in_window(&self, kind: RequestKind) -> usize {
        let horizon = self.horizon();
        let mut log = self.log(kind).lock();
        prune(&mut log, self.clock.now(), horizon);
        log.len()
    }

    /// Record one request of `kind`, first sleeping while the window is full.
    ///
    /// Exactly `ceiling` requests are admitted per window; the next one waits
    /// until the oldest entry ages past `window + slack`.
    pub fn record_and_throttle(&self, kind: RequestKind) {
        let config = self.config();
        let horizon = config.window + config.slack;
        let ceiling = match kind {
            RequestKind::Read => config.read_quota,
            RequestKind::Write => config.write_quota,
        }
        .max(1);

        let mut log = self.log(kind).lock();
        prune(&mut log, self.clock.now(), horizon);

        if !config.ignore_quota {
            let mut waited = Duration::ZERO;
            while log.len() > ceiling - 1 {
                if waited.is_zero() {
                    info!(
                        "{} quota of {} per {:?} reached; throttling",
                        kind, ceiling, config.window
                    );
                }
                self.clock.sleep(config.poll_interval);
                waited += config.poll_interval;
                prune(&mut log, self.clock.now(), horizon);
            }
        }

        log.push_back(self.clock.now());
    }

    fn horizon(&self) -> Duration {
        let config = self.config.read();
        config.window + config.slack
    }

    fn log(&self, kind: RequestKind) -> &Mutex<VecDeque<Instant>> {
        match kind {
            RequestKind::Read => &self.reads,
            RequestKind::Write => &self.writes,
        }
    }
}

fn prune(log: &mut VecDeque<Instant>, now: Instant, horizon: Duration) {
    while let Some(&oldest) = log.front() {
        if now.saturating_duration_since(oldest) > horizon {
            log.pop_front();
        } else {
            break;
        }
    }
}
