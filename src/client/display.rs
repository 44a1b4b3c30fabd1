use crate::client::format::format_elapsed;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

pub const IDLE_DISPLAY: &str = "00:00:00";

const TICK: Duration = Duration::from_secs(1);

/// Running-timer text, refreshed once a second from the start instant.
#[derive(Debug)]
pub struct TimerDisplay {
    text: Arc<watch::Sender<String>>,
    ticker: Option<JoinHandle<()>>,
}

impl TimerDisplay {
    pub fn new() -> Self {
        let (text, _) = watch::channel(IDLE_DISPLAY.to_string());
        Self {
            text: Arc::new(text),
            ticker: None,
        }
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.text.subscribe()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Begins ticking. Must be called from within a tokio runtime.
    pub fn start(&mut self, started_at: Instant) {
        self.halt();
        let text = Arc::clone(&self.text);
        self.ticker = Some(tokio::spawn(async move {
            let mut ticks = interval_at(started_at + TICK, TICK);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                text.send_replace(elapsed_text(started_at, Instant::now()));
            }
        }));
    }

    /// Cancels the ticker and shows zero again.
    pub fn stop(&mut self) {
        self.halt();
        self.text.send_replace(IDLE_DISPLAY.to_string());
    }

    fn halt(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl Default for TimerDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TimerDisplay {
    fn drop(&mut self) {
        self.halt();
    }
}

/// Whole seconds between the two instants, formatted.
pub fn elapsed_text(started_at: Instant, now: Instant) -> String {
    format_elapsed(now.saturating_duration_since(started_at).as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[test]
    fn elapsed_text_floors_partial_seconds() {
        let start = Instant::now();
        assert_eq!(elapsed_text(start, start), "00:00:00");
        assert_eq!(elapsed_text(start, start + Duration::from_millis(999)), "00:00:00");
        assert_eq!(elapsed_text(start, start + Duration::from_millis(3_999)), "00:00:03");
        assert_eq!(elapsed_text(start, start + Duration::from_secs(3661)), "01:01:01");
    }

    #[test]
    fn elapsed_text_clamps_clock_skew() {
        let start = Instant::now() + Duration::from_secs(5);
        assert_eq!(elapsed_text(start, Instant::now()), "00:00:00");
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_a_second_until_stopped() {
        let mut display = TimerDisplay::new();
        display.start(Instant::now());
        assert!(display.is_ticking());
        assert_eq!(display.text(), IDLE_DISPLAY);

        sleep(Duration::from_millis(3_500)).await;
        assert_eq!(display.text(), "00:00:03");

        display.stop();
        assert!(!display.is_ticking());
        assert_eq!(display.text(), IDLE_DISPLAY);

        sleep(Duration::from_secs(2)).await;
        assert_eq!(display.text(), IDLE_DISPLAY);
    }

    #[tokio::test(start_paused = true)]
    async fn derives_from_start_instant_not_tick_count() {
        let mut display = TimerDisplay::new();
        let started_at = Instant::now() - Duration::from_secs(120);
        display.start(started_at);

        sleep(Duration::from_millis(1_200)).await;
        assert_eq!(display.text(), "00:02:01");
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_updates() {
        let mut display = TimerDisplay::new();
        let mut updates = display.subscribe();
        display.start(Instant::now());

        updates.changed().await.unwrap();
        assert_eq!(*updates.borrow(), "00:00:01");
    }
}
