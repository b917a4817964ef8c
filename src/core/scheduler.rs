//! The outer poll/blank loop

use crate::config::ActiveWindow;
use crate::core::{RunState, ShutdownToken};
use crate::display::DisplaySink;
use crate::render::FrameComposer;
use crate::sources::Telemetry;
use anyhow::Result;
use chrono::{Local, Timelike};
use log::{debug, info, warn};
use std::time::Duration;

/// Pause between render iterations while active.
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Pause between window re-checks while idle.
pub const IDLE_INTERVAL: Duration = Duration::from_secs(60);

fn local_hour() -> u32 {
    Local::now().hour()
}

/// Owns everything one loop iteration touches: the telemetry providers,
/// the frame composer, the display sink, and the shutdown token.
///
/// Constructed once at startup and handed to `run`; there is no other
/// process-wide mutable state.
pub struct Scheduler<S: DisplaySink> {
    window: ActiveWindow,
    telemetry: Telemetry,
    composer: FrameComposer,
    sink: S,
    shutdown: ShutdownToken,
    clock: fn() -> u32,
}

impl<S: DisplaySink> Scheduler<S> {
    pub fn new(window: ActiveWindow, telemetry: Telemetry, sink: S, shutdown: ShutdownToken) -> Self {
        let composer = FrameComposer::new(telemetry.total_gb());
        Self {
            window,
            telemetry,
            composer,
            sink,
            shutdown,
            clock: local_hour,
        }
    }

    #[cfg(test)]
    fn with_clock(mut self, clock: fn() -> u32) -> Self {
        self.clock = clock;
        self
    }

    /// Run until the shutdown token triggers.
    ///
    /// Telemetry and display failures propagate out and crash the process;
    /// only the final shutdown blank is best-effort.
    pub fn run(&mut self) -> Result<()> {
        while !self.shutdown.is_triggered() {
            match RunState::classify((self.clock)(), &self.window) {
                RunState::Active => self.run_active()?,
                RunState::Idle => self.run_idle()?,
            }
        }
        if let Err(e) = self.sink.blank() {
            warn!("could not blank display during shutdown: {e}");
        }
        info!("display blanked, shutting down");
        Ok(())
    }

    /// One render iteration every poll interval while the hour stays
    /// inside the window.
    ///
    /// The hour is re-checked between iterations, never mid-iteration: a
    /// render that straddles the window boundary always completes.
    fn run_active(&mut self) -> Result<()> {
        debug!("entering active window");
        while !self.shutdown.is_triggered()
            && RunState::classify((self.clock)(), &self.window) == RunState::Active
        {
            let snapshot = self.telemetry.snapshot()?;
            let frame = self.composer.compose(&snapshot);
            self.sink.push(frame)?;
            if self.shutdown.sleep(POLL_INTERVAL) {
                break;
            }
        }
        Ok(())
    }

    /// Keep the display dark on a coarse cadence until the window opens
    /// again.
    fn run_idle(&mut self) -> Result<()> {
        debug!("outside active window, blanking display");
        while !self.shutdown.is_triggered()
            && RunState::classify((self.clock)(), &self.window) == RunState::Idle
        {
            self.sink.blank()?;
            if self.shutdown.sleep(IDLE_INTERVAL) {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::HardwareError;
    use crate::render::Frame;
    use crate::sources::{MetricProvider, QueryError, Telemetry};
    use std::sync::{Arc, Mutex};

    struct Fixed(&'static str);

    impl MetricProvider for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }
        fn sample(&self) -> Result<String, QueryError> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    impl MetricProvider for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }
        fn sample(&self) -> Result<String, QueryError> {
            Err(QueryError::Parse {
                command: "failing",
                detail: "boom".to_string(),
            })
        }
    }

    fn fixed_telemetry() -> Telemetry {
        Telemetry::new(
            Box::new(Fixed("192.168.1.2")),
            Box::new(Fixed("12")),
            crate::sources::MemorySource::with_total(8.0),
            Box::new(Fixed("45%")),
            Box::new(Fixed("2 days")),
            Box::new(Fixed("48.2")),
        )
    }

    /// Records every push; optionally triggers shutdown on the first one
    /// so loop tests terminate without waiting out a sleep.
    #[derive(Clone)]
    struct MockSink {
        pushes: Arc<Mutex<Vec<Frame>>>,
        clears: Arc<Mutex<u32>>,
        trigger_on_push: Option<ShutdownToken>,
    }

    impl MockSink {
        fn new(trigger_on_push: Option<ShutdownToken>) -> Self {
            Self {
                pushes: Arc::new(Mutex::new(Vec::new())),
                clears: Arc::new(Mutex::new(0)),
                trigger_on_push,
            }
        }
    }

    impl DisplaySink for MockSink {
        fn clear(&mut self) -> Result<(), HardwareError> {
            *self.clears.lock().unwrap() += 1;
            Ok(())
        }

        fn push(&mut self, frame: &Frame) -> Result<(), HardwareError> {
            self.pushes.lock().unwrap().push(frame.clone());
            if let Some(token) = &self.trigger_on_push {
                token.trigger();
            }
            Ok(())
        }
    }

    fn active_clock() -> u32 {
        12
    }

    fn idle_clock() -> u32 {
        3
    }

    #[test]
    fn test_pre_triggered_run_blanks_and_returns() {
        let shutdown = ShutdownToken::new();
        shutdown.trigger();
        let sink = MockSink::new(None);
        let pushes = sink.pushes.clone();
        let mut scheduler =
            Scheduler::new(ActiveWindow::default(), fixed_telemetry(), sink, shutdown)
                .with_clock(active_clock);

        scheduler.run().unwrap();

        let pushes = pushes.lock().unwrap();
        assert_eq!(pushes.len(), 1);
        assert!(pushes[0].is_blank());
    }

    #[test]
    fn test_active_pushes_composed_frame_then_blanks_on_shutdown() {
        let shutdown = ShutdownToken::new();
        let sink = MockSink::new(Some(shutdown.clone()));
        let pushes = sink.pushes.clone();
        let mut scheduler =
            Scheduler::new(ActiveWindow::default(), fixed_telemetry(), sink, shutdown)
                .with_clock(active_clock);

        scheduler.run().unwrap();

        let pushes = pushes.lock().unwrap();
        // one composed frame, then the shutdown blank
        assert_eq!(pushes.len(), 2);
        assert!(!pushes[0].is_blank());
        assert!(pushes[1].is_blank());
    }

    #[test]
    fn test_idle_keeps_display_blank() {
        let shutdown = ShutdownToken::new();
        let sink = MockSink::new(Some(shutdown.clone()));
        let pushes = sink.pushes.clone();
        let clears = sink.clears.clone();
        let mut scheduler =
            Scheduler::new(ActiveWindow::default(), fixed_telemetry(), sink, shutdown)
                .with_clock(idle_clock);

        scheduler.run().unwrap();

        let pushes = pushes.lock().unwrap();
        assert!(pushes.iter().all(Frame::is_blank));
        assert!(*clears.lock().unwrap() >= 1);
    }

    #[test]
    fn test_query_failure_aborts_without_push() {
        let shutdown = ShutdownToken::new();
        let telemetry = Telemetry::new(
            Box::new(Failing),
            Box::new(Fixed("12")),
            crate::sources::MemorySource::with_total(8.0),
            Box::new(Fixed("45%")),
            Box::new(Fixed("2 days")),
            Box::new(Fixed("48.2")),
        );
        let sink = MockSink::new(None);
        let pushes = sink.pushes.clone();
        let mut scheduler =
            Scheduler::new(ActiveWindow::default(), telemetry, sink, shutdown).with_clock(active_clock);

        assert!(scheduler.run().is_err());
        assert!(pushes.lock().unwrap().is_empty());
    }
}
