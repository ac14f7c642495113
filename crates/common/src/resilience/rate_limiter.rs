//! Sliding-window rate limiting for outbound request admission
//!
//! The limiter counts admissions within a trailing window rather than fixed
//! calendar buckets. Each admission check purges expired timestamps, then
//! either records the new call or reports how long the caller should wait
//! before the oldest recorded call ages out of the window.
//!
//! The purge-check-record step runs inside a single critical section so
//! concurrent callers can never admit more than the configured maximum
//! within one window.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, warn};

use super::{Clock, SystemClock};

/// Length of the trailing admission window in milliseconds.
pub const WINDOW_MS: u64 = 60_000;

/// Outcome of a single admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The call was recorded and may proceed.
    Admitted,
    /// The window is full; `retry_in` is the time until the oldest recorded
    /// call ages out.
    Denied {
        /// How long the caller should wait before re-checking.
        retry_in: Duration,
    },
}

impl Admission {
    /// Whether this admission check allowed the call through.
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted)
    }
}

/// Sliding-window rate limiter
///
/// Admits up to `max_requests` calls within any trailing 60 second interval.
/// Denied checks do not consume window capacity; only admitted calls are
/// recorded.
///
/// # Examples
///
/// ```rust
/// use finrelay_common::resilience::{Admission, SlidingWindow};
///
/// # fn example() -> Result<(), String> {
/// let limiter = SlidingWindow::new(5)?;
///
/// match limiter.try_acquire() {
///     Admission::Admitted => println!("Request allowed"),
///     Admission::Denied { retry_in } => println!("Wait {:?}", retry_in),
/// }
/// # Ok(())
/// # }
/// ```
pub struct SlidingWindow<C: Clock = SystemClock> {
    max_requests: u32,
    timestamps: Arc<Mutex<VecDeque<u64>>>,
    clock: Arc<C>,
}

impl SlidingWindow<SystemClock> {
    /// Create a new limiter with the system clock
    pub fn new(max_requests: u32) -> Result<Self, String> {
        Self::with_clock(max_requests, SystemClock)
    }
}

impl<C: Clock> SlidingWindow<C> {
    /// Create a new limiter with a custom clock
    pub fn with_clock(max_requests: u32, clock: C) -> Result<Self, String> {
        if max_requests == 0 {
            return Err("max_requests must be greater than 0".to_string());
        }

        Ok(Self {
            max_requests,
            timestamps: Arc::new(Mutex::new(VecDeque::with_capacity(max_requests as usize))),
            clock: Arc::new(clock),
        })
    }

    /// Check and, if allowed, record one call against the window
    ///
    /// Purges timestamps older than the window, then admits if fewer than
    /// `max_requests` remain. Returns [`Admission::Denied`] with the wait
    /// until the oldest recorded call expires otherwise.
    pub fn try_acquire(&self) -> Admission {
        let now = self.clock.millis_since_epoch();

        let mut window = match self.timestamps.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("Sliding window timestamp lock poisoned");
                poisoned.into_inner()
            }
        };

        while window.front().is_some_and(|&recorded| recorded + WINDOW_MS <= now) {
            window.pop_front();
        }

        if (window.len() as u32) < self.max_requests {
            window.push_back(now);
            debug!(recorded = window.len(), max = self.max_requests, "request admitted");
            return Admission::Admitted;
        }

        // The oldest survivor is strictly inside the window, so the wait is
        // always positive.
        let oldest = window.front().copied().unwrap_or(now);
        let retry_ms = WINDOW_MS.saturating_sub(now.saturating_sub(oldest));
        debug!(retry_ms, max = self.max_requests, "request denied by sliding window");

        Admission::Denied { retry_in: Duration::from_millis(retry_ms) }
    }

    /// Number of calls currently recorded inside the window
    pub fn active_count(&self) -> usize {
        let now = self.clock.millis_since_epoch();

        let mut window = match self.timestamps.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("Sliding window timestamp lock poisoned");
                poisoned.into_inner()
            }
        };

        while window.front().is_some_and(|&recorded| recorded + WINDOW_MS <= now) {
            window.pop_front();
        }

        window.len()
    }

    /// Maximum admissions per window
    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Forget all recorded calls
    pub fn reset(&self) {
        if let Ok(mut window) = self.timestamps.lock() {
            window.clear();
        }
    }
}

impl<C: Clock> Clone for SlidingWindow<C> {
    fn clone(&self) -> Self {
        Self {
            max_requests: self.max_requests,
            timestamps: Arc::clone(&self.timestamps),
            clock: Arc::clone(&self.clock),
        }
    }
}
