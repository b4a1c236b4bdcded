//! Request dispatch: quota pacing, transport call, backoff on exhaustion.

use log::{debug, warn};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::error::{GridsyncError, Result};
use crate::quota::QuotaLimiter;
use crate::remote::{Operation, Transport};

/// Linear backoff applied when the service reports quota exhaustion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub base: Duration,
    pub increment: Duration,
    /// First pause at or beyond this gives up.
    pub limit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            base: Duration::from_secs(10),
            increment: Duration::from_secs(5),
            limit: Duration::from_secs(50),
        }
    }
}

impl RetryPolicy {
    /// Never retry.
    pub fn none() -> Self {
        RetryPolicy {
            base: Duration::ZERO,
            increment: Duration::ZERO,
            limit: Duration::ZERO,
        }
    }

    /// Pauses taken between attempts, in order. With the default policy that is
    /// 10, 15, 20 ... 45 seconds.
    pub fn delays(&self) -> Vec<Duration> {
        let mut delays = Vec::new();
        let mut pause = self.base;
        while pause < self.limit {
            delays.push(pause);
            if self.increment.is_zero() {
                break;
            }
            pause += self.increment;
        }
        delays
    }
}

/// Single gateway for every remote call.
///
/// Each attempt is recorded against the quota before it is sent, so retries
/// are paced like any other request.
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    limiter: Arc<QuotaLimiter>,
    clock: Arc<dyn Clock>,
    retry: RetryPolicy,
}

impl Dispatcher {
    /// Dispatcher using the process-wide limiter and the wall clock.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Dispatcher {
            transport,
            limiter: QuotaLimiter::shared(),
            clock: Arc::new(SystemClock),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_limiter(mut self, limiter: Arc<QuotaLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn limiter(&self) -> &Arc<QuotaLimiter> {
        &self.limiter
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Execute `operation` and decode the body as JSON. An empty body is `Null`.
    pub fn execute(&self, operation: Operation, params: &JsonValue) -> Result<JsonValue> {
        let body = self.execute_raw(operation, params)?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonValue::Null);
        }
        serde_json::from_slice(&body).map_err(|e| {
            GridsyncError::UnexpectedResponse(format!("{} returned invalid JSON: {}", operation, e))
        })
    }

    /// Execute `operation` and return the body untouched.
    pub fn execute_raw(&self, operation: Operation, params: &JsonValue) -> Result<Vec<u8>> {
        let mut delays = self.retry.delays().into_iter();
        loop {
            self.limiter.record_and_throttle(operation.kind());
            debug!("{} {} {}", operation.kind(), operation, params);

            let err = match self.transport.call(operation, params) {
                Ok(body) => return Ok(body),
                Err(err) => err,
            };
            if !err.is_quota_exhausted() {
                return Err(GridsyncError::RemoteFatal(err));
            }
            match delays.next() {
                Some(pause) => {
                    warn!(
                        "{} hit the remote quota; retrying in {}s",
                        operation,
                        pause.as_secs_f64()
                    );
                    self.clock.sleep(pause);
                }
                None => return Err(GridsyncError::RemoteTransient(err)),
            }
        }
    }
}
