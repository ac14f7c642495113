//! Resilience primitives for outbound request control
//!
//! This module provides:
//! - **Clock abstraction**: injectable time source so time-dependent behavior
//!   is testable without real delays
//! - **Sliding window rate limiter**: counts admissions within a trailing
//!   time interval and reports how long a denied caller should wait
//!
//! The limiter is advisory on the client side only; it enforces a cooperative
//! outbound rate and knows nothing about the remote service's own quotas.

pub mod clock;
pub mod rate_limiter;

pub use clock::{Clock, MockClock, SystemClock};
pub use rate_limiter::{Admission, SlidingWindow, WINDOW_MS};
