//! Current and historical gold price fetching
//!
//! Reconciles the price display and the cached-vs-fresh badge after each
//! fetch. A failed fetch reports through the error banner and leaves the
//! previous price display untouched.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::api::GoldApi;
use crate::error_reporter::ErrorReporter;
use crate::ledger::PurchaseForm;
use crate::utils::format_unix_local;
use crate::view::{price_headline, CacheStatus, Screen};

pub struct PriceSync {
    api: Arc<dyn GoldApi>,
    screen: Arc<dyn Screen>,
    errors: Arc<ErrorReporter>,
}

impl PriceSync {
    pub fn new(api: Arc<dyn GoldApi>, screen: Arc<dyn Screen>, errors: Arc<ErrorReporter>) -> Self {
        Self {
            api,
            screen,
            errors,
        }
    }

    /// Fetch the current price, bypassing the server-side cache when
    /// `force_refresh` is set, and render it with the cache badge.
    pub async fn fetch_current_price(&self, force_refresh: bool) {
        match self.api.current_price(force_refresh).await {
            Ok(resp) if resp.success => {
                let (Some(price), Some(price_usd), Some(rate)) =
                    (resp.price, resp.price_usd, resp.exchange_rate)
                else {
                    self.errors.show("Failed to fetch current price");
                    return;
                };

                let status = CacheStatus::from_cached(resp.cached);
                let updated = last_updated_text(resp.last_updated.as_deref(), resp.timestamp);

                self.screen
                    .show_price(&price_headline(price, price_usd), &detail_line(&updated, rate, status));
                self.screen
                    .set_cache_status(status, &format!("Last updated: {}", updated));
            }
            Ok(resp) => {
                self.errors.show(
                    resp.message
                        .as_deref()
                        .unwrap_or("Failed to fetch current price"),
                );
            }
            Err(e) => {
                debug!("current price request failed: {:#}", e);
                self.errors.show("Network error when fetching current price");
            }
        }
    }

    /// Fetch the price for the form's selected purchase date and write it
    /// into the purchase-price field, rounded to 2 decimals. Never
    /// auto-submits.
    pub async fn fetch_historical_price(&self, form: &mut PurchaseForm) {
        if form.date.trim().is_empty() {
            self.errors.show("Please select a purchase date first");
            return;
        }

        match self.api.historical_price(form.date.trim()).await {
            Ok(resp) if resp.success => match resp.price {
                Some(price) => {
                    form.price = format!("{:.2}", price);
                    self.screen.set_price_input(&form.price);
                }
                None => self.errors.show("Failed to fetch historical price"),
            },
            Ok(resp) => {
                self.errors.show(
                    resp.message
                        .as_deref()
                        .unwrap_or("Failed to fetch historical price"),
                );
            }
            Err(e) => {
                debug!("historical price request failed: {:#}", e);
                self.errors
                    .show("Network error when fetching historical price");
            }
        }
    }
}

/// Prefer the server's pre-formatted string; fall back to converting the
/// unix timestamp to local time.
fn last_updated_text(last_updated: Option<&str>, timestamp: Option<f64>) -> String {
    match (last_updated, timestamp) {
        (Some(text), _) => text.to_string(),
        (None, Some(ts)) => format_unix_local(ts),
        (None, None) => "Unknown".to_string(),
    }
}

fn detail_line(updated: &str, rate: Decimal, status: CacheStatus) -> String {
    // The inline note is lowercase "Fresh data"; the badge keeps the
    // "Fresh Data" label.
    let note = match status {
        CacheStatus::Cached => "Cached",
        CacheStatus::Fresh => "Fresh data",
    };
    format!(
        "Last updated: {} • Exchange rate: 1 USD = {:.2} SAR • {}",
        updated, rate, note
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_last_updated_prefers_preformatted_string() {
        let text = last_updated_text(Some("2024-06-10 09:13:20"), Some(1718010800.0));
        assert_eq!(text, "2024-06-10 09:13:20");
    }

    #[test]
    fn test_last_updated_falls_back_to_timestamp() {
        let text = last_updated_text(None, Some(1718010800.0));
        assert_ne!(text, "Unknown");
        assert!(text.contains('/'));
    }

    #[test]
    fn test_last_updated_unknown_when_absent() {
        assert_eq!(last_updated_text(None, None), "Unknown");
    }

    #[test]
    fn test_detail_line_carries_cache_label() {
        let line = detail_line("2024-06-10 09:13:20", dec!(3.75), CacheStatus::Cached);
        assert_eq!(
            line,
            "Last updated: 2024-06-10 09:13:20 • Exchange rate: 1 USD = 3.75 SAR • Cached"
        );

        let fresh = detail_line("2024-06-10 09:13:20", dec!(3.75), CacheStatus::Fresh);
        assert!(fresh.ends_with("• Fresh data"));
        assert!(!fresh.ends_with("Fresh Data"));
    }
}
