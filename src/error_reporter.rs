//! Transient error banner
//!
//! Every failed user action funnels through [`ErrorReporter::show`]: the
//! banner text is replaced and a hide is scheduled after a fixed delay.
//! The hide timer is owned and reset on each call rather than stacked, so
//! the most recent message always stays visible for the full delay; a
//! stale timer from an earlier error can never hide a newer message.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::view::Screen;

pub struct ErrorReporter {
    screen: Arc<dyn Screen>,
    delay: Duration,
    /// Bumped on every show(); a scheduled hide only fires if it still
    /// belongs to the latest generation.
    generation: Arc<AtomicU64>,
}

impl ErrorReporter {
    pub fn new(screen: Arc<dyn Screen>, delay: Duration) -> Self {
        Self {
            screen,
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Reveal `message`, superseding whatever is currently displayed
    pub fn show(&self, message: &str) {
        warn!("{}", message);
        self.screen.show_error_banner(message);

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let counter = Arc::clone(&self.generation);
        let screen = Arc::clone(&self.screen);
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if counter.load(Ordering::SeqCst) == generation {
                screen.hide_error_banner();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{CacheStatus, LedgerView};
    use std::sync::Mutex;

    #[derive(Default)]
    struct BannerProbe {
        /// (message, still visible) transitions
        events: Mutex<Vec<String>>,
        visible: Mutex<Option<String>>,
    }

    impl Screen for BannerProbe {
        fn show_price(&self, _headline: &str, _detail: &str) {}
        fn set_cache_status(&self, _status: CacheStatus, _last_updated_line: &str) {}
        fn set_price_input(&self, _value: &str) {}
        fn render_ledger(&self, _view: &LedgerView) {}
        fn show_error_banner(&self, message: &str) {
            self.events.lock().unwrap().push(format!("show:{}", message));
            *self.visible.lock().unwrap() = Some(message.to_string());
        }
        fn hide_error_banner(&self) {
            self.events.lock().unwrap().push("hide".to_string());
            *self.visible.lock().unwrap() = None;
        }
        fn import_file_selected(&self, _name: &str) {}
        fn reset_import(&self) {}
        fn upload_progress(&self, _loaded: u64, _total: u64) {}
        fn show_import_results(&self, _lines: &[String]) {}
    }

    #[tokio::test(start_paused = true)]
    async fn test_banner_hides_after_delay() {
        let probe = Arc::new(BannerProbe::default());
        let reporter = ErrorReporter::new(probe.clone(), Duration::from_secs(5));

        reporter.show("boom");
        assert_eq!(probe.visible.lock().unwrap().as_deref(), Some("boom"));

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert!(probe.visible.lock().unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_message_survives_older_timer() {
        let probe = Arc::new(BannerProbe::default());
        let reporter = ErrorReporter::new(probe.clone(), Duration::from_secs(5));

        reporter.show("first");
        tokio::time::sleep(Duration::from_secs(3)).await;
        reporter.show("second");

        // 6s after "first" its timer has expired, but "second" is newer
        // and must still be visible.
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(probe.visible.lock().unwrap().as_deref(), Some("second"));

        // Full delay after "second": now it hides.
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(probe.visible.lock().unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_show_replaces_banner_text() {
        let probe = Arc::new(BannerProbe::default());
        let reporter = ErrorReporter::new(probe.clone(), Duration::from_secs(5));

        reporter.show("first");
        reporter.show("second");
        let events = probe.events.lock().unwrap().clone();
        assert_eq!(events, vec!["show:first", "show:second"]);
    }
}
