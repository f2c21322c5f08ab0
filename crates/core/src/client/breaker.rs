use std::sync::Mutex;
use std::time::{Duration, Instant};

pub const DEFAULT_FAILURE_THRESHOLD: u32 = 4;
pub const DEFAULT_OPEN_FOR: Duration = Duration::from_secs(10);

/// Consecutive-failure circuit breaker.
///
/// After `failure_threshold` failures in a row the circuit opens and
/// [`CircuitBreaker::allows_request`] returns false for `open_for`. Once that
/// elapses a trial request is let through; a success closes the circuit, a
/// failure opens it again.
#[derive(Debug)]
pub struct CircuitBreaker {
    failure_threshold: u32,
    open_for: Duration,
    state: Mutex<BreakerState>,
}

#[derive(Debug, Default)]
struct BreakerState {
    consecutive_failures: u32,
    opened_at: Option<Instant>,
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_THRESHOLD, DEFAULT_OPEN_FOR)
    }
}

impl CircuitBreaker {
    pub fn new(failure_threshold: u32, open_for: Duration) -> Self {
        Self {
            failure_threshold: failure_threshold.max(1),
            open_for,
            state: Mutex::new(BreakerState::default()),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, BreakerState> {
        // The state is two plain counters; a panic elsewhere can't leave it inconsistent.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn allows_request(&self) -> bool {
        match self.state().opened_at {
            Some(opened_at) => opened_at.elapsed() >= self.open_for,
            None => true,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.allows_request()
    }

    pub fn record_success(&self) {
        let mut state = self.state();
        state.consecutive_failures = 0;
        state.opened_at = None;
    }

    pub fn record_failure(&self) {
        let mut state = self.state();
        state.consecutive_failures = state.consecutive_failures.saturating_add(1);
        if state.consecutive_failures >= self.failure_threshold {
            state.opened_at = Some(Instant::now());
        }
    }
}
