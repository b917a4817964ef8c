//! Cooperative shutdown token shared between the run loop and the
//! signal listener

use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

/// Cancellation token observed between loop iterations.
///
/// The signal listener triggers it; the scheduler checks it and sleeps on
/// it, so a termination signal preempts any pause immediately. The one
/// place preemption cannot reach is an in-flight blocking telemetry query
/// (the CPU sampler), which bounds shutdown latency at the sampling
/// window.
#[derive(Clone)]
pub struct ShutdownToken {
    state: Arc<(Mutex<bool>, Condvar)>,
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self {
            state: Arc::new((Mutex::new(false), Condvar::new())),
        }
    }

    /// Request shutdown and wake every sleeper.
    pub fn trigger(&self) {
        let (triggered, signal) = &*self.state;
        *triggered.lock().unwrap() = true;
        signal.notify_all();
    }

    pub fn is_triggered(&self) -> bool {
        let (triggered, _) = &*self.state;
        *triggered.lock().unwrap()
    }

    /// Pause for up to `duration`. Returns true if shutdown was requested
    /// before or during the pause.
    pub fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        let (triggered, signal) = &*self.state;
        let mut guard = triggered.lock().unwrap();
        while !*guard {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (next, _) = signal.wait_timeout(guard, deadline - now).unwrap();
            guard = next;
        }
        true
    }
}

impl Default for ShutdownToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_untriggered_sleep_runs_to_timeout() {
        let token = ShutdownToken::new();
        let start = Instant::now();
        assert!(!token.sleep(Duration::from_millis(20)));
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert!(!token.is_triggered());
    }

    #[test]
    fn test_pre_triggered_sleep_returns_immediately() {
        let token = ShutdownToken::new();
        token.trigger();
        let start = Instant::now();
        assert!(token.sleep(Duration::from_secs(60)));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_trigger_preempts_sleep_from_another_thread() {
        let token = ShutdownToken::new();
        let remote = token.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.trigger();
        });
        let start = Instant::now();
        assert!(token.sleep(Duration::from_secs(60)));
        assert!(start.elapsed() < Duration::from_secs(5));
        handle.join().unwrap();
    }
}
