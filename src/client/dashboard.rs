use crate::client::ActionOutcome;
use crate::client::api::TrackerApi;
use crate::client::entry::ManualEntryForm;
use crate::client::notify::{Notifier, TracingNotifier};
use crate::client::timer::TimerControl;
use crate::client::views::{AnalyticsView, TimelineView};

/// The whole page: timer, backfill form and the two views.
///
/// Every completed action is followed by a refresh of both views.
#[derive(Debug)]
pub struct Dashboard<A, N = TracingNotifier> {
    api: A,
    notifier: N,
    pub timer: TimerControl,
    pub entry: ManualEntryForm,
    pub timeline: TimelineView,
    pub analytics: AnalyticsView,
}

impl<A: TrackerApi> Dashboard<A> {
    pub fn new(api: A) -> Self {
        Self::with_notifier(api, TracingNotifier)
    }
}

impl<A: TrackerApi, N: Notifier> Dashboard<A, N> {
    pub fn with_notifier(api: A, notifier: N) -> Self {
        Self {
            api,
            notifier,
            timer: TimerControl::new(),
            entry: ManualEntryForm::new(),
            timeline: TimelineView::default(),
            analytics: AnalyticsView::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Initial page load.
    pub async fn load(&mut self) {
        self.refresh().await;
    }

    pub async fn refresh(&mut self) {
        tokio::join!(
            self.timeline.refresh(&self.api),
            self.analytics.refresh(&self.api)
        );
    }

    pub async fn start_timer(&mut self) -> ActionOutcome {
        let outcome = self.timer.start(&self.api, &mut self.notifier).await;
        self.refresh_after(outcome).await
    }

    pub async fn stop_timer(&mut self) -> ActionOutcome {
        let outcome = self.timer.stop(&self.api, &mut self.notifier).await;
        self.refresh_after(outcome).await
    }

    pub async fn add_entry(&mut self) -> ActionOutcome {
        let outcome = self.entry.submit(&self.api, &mut self.notifier).await;
        self.refresh_after(outcome).await
    }

    async fn refresh_after(&mut self, outcome: ActionOutcome) -> ActionOutcome {
        if outcome.is_completed() {
            self.refresh().await;
        }
        outcome
    }
}
