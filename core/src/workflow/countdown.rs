//! Resend countdown: a scoped one-second tick task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::traits::FlowView;

/// Formats whole seconds as `MM:SS`.
pub fn format_mm_ss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Handle to a running countdown.
///
/// Starting a countdown disables resend, renders the full window, and
/// spawns a tick task that re-renders the remaining time every second.
/// When the remaining time reaches zero the task enables resend and stops
/// ticking; it does not trigger the resend itself. Dropping the handle
/// aborts the task, so every exit path from the awaiting-code state
/// releases the timer.
#[derive(Debug)]
pub struct Countdown {
    expired: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Starts a countdown of `seconds` rendered through `view`.
    pub fn start<V: FlowView + 'static>(view: Arc<V>, seconds: u64) -> Self {
        view.set_resend_enabled(false);
        view.render_countdown(&format_mm_ss(seconds));

        let expired = Arc::new(AtomicBool::new(seconds == 0));
        let deadline = Instant::now() + Duration::from_secs(seconds);
        let flag = Arc::clone(&expired);

        let handle = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(Duration::from_secs(1));
            // the first tick completes immediately; the start render above
            // already covered it
            ticks.tick().await;
            loop {
                ticks.tick().await;
                let remaining = deadline.saturating_duration_since(Instant::now());
                let secs = (remaining.as_millis() as u64 + 500) / 1000;
                view.render_countdown(&format_mm_ss(secs));
                if secs == 0 {
                    view.set_resend_enabled(true);
                    flag.store(true, Ordering::SeqCst);
                    tracing::debug!(event = "countdown_expired", "Resend window elapsed");
                    break;
                }
            }
        });

        Self { expired, handle }
    }

    /// Whether the countdown has reached zero (resend permitted).
    pub fn is_expired(&self) -> bool {
        self.expired.load(Ordering::SeqCst)
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
