//! Purchase ledger: load, add, delete and render
//!
//! The rendered table and summary always reflect the last successful
//! load; any failure reports through the banner and leaves the previous
//! render intact. Adding or deleting reloads with cached price data, so
//! neither ever triggers an external price refetch.

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::api::models::NewPurchase;
use crate::api::GoldApi;
use crate::error_reporter::ErrorReporter;
use crate::utils::today_iso;
use crate::view::{build_ledger_view, CacheStatus, Screen};

/// Combined validation failure message; individual field errors are not
/// distinguished.
pub const VALIDATION_MESSAGE: &str = "Please fill in all required fields with valid values";

/// The purchase entry form, held as raw field text until submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseForm {
    pub date: String,
    pub price: String,
    pub grams: String,
    pub description: String,
}

impl PurchaseForm {
    /// Fresh form with the date defaulted to today
    pub fn with_today() -> Self {
        Self {
            date: today_iso(),
            price: String::new(),
            grams: String::new(),
            description: String::new(),
        }
    }

    /// Reset after a successful submission: date back to today, the rest
    /// cleared.
    pub fn reset(&mut self) {
        *self = Self::with_today();
    }

    /// Validate the form as a whole. Date must be non-empty and price and
    /// grams must parse as decimals; any failure yields the single
    /// combined message and no request is issued.
    pub fn validate(&self) -> Result<NewPurchase, &'static str> {
        if self.date.trim().is_empty() {
            return Err(VALIDATION_MESSAGE);
        }
        let price = Decimal::from_str(self.price.trim()).map_err(|_| VALIDATION_MESSAGE)?;
        let grams = Decimal::from_str(self.grams.trim()).map_err(|_| VALIDATION_MESSAGE)?;

        Ok(NewPurchase {
            purchase_date: self.date.trim().to_string(),
            purchase_price: price,
            grams,
            description: self.description.clone(),
        })
    }
}

pub struct PurchaseLedgerView {
    api: Arc<dyn GoldApi>,
    screen: Arc<dyn Screen>,
    errors: Arc<ErrorReporter>,
}

impl PurchaseLedgerView {
    pub fn new(api: Arc<dyn GoldApi>, screen: Arc<dyn Screen>, errors: Arc<ErrorReporter>) -> Self {
        Self {
            api,
            screen,
            errors,
        }
    }

    /// Fetch the full purchase list and summary and fully replace the
    /// rendered table.
    pub async fn load(&self, force_refresh: bool) {
        match self.api.purchases(force_refresh).await {
            Ok(resp) if resp.success => {
                let Some(summary) = resp.summary else {
                    self.errors.show("Failed to load purchases");
                    return;
                };

                self.screen
                    .render_ledger(&build_ledger_view(&resp.purchases, &summary));

                let updated = summary.last_updated.as_deref().unwrap_or("Unknown");
                self.screen.set_cache_status(
                    CacheStatus::from_cached(summary.cached),
                    &format!("Last updated: {}", updated),
                );
            }
            Ok(resp) => {
                self.errors
                    .show(resp.message.as_deref().unwrap_or("Failed to load purchases"));
            }
            Err(e) => {
                debug!("purchases request failed: {:#}", e);
                self.errors.show("Network error when loading purchases");
            }
        }
    }

    /// Validate and submit the form. On success the form is reset (date
    /// back to today) and the ledger reloads from cached price data.
    pub async fn add(&self, form: &mut PurchaseForm) {
        let purchase = match form.validate() {
            Ok(purchase) => purchase,
            Err(message) => {
                self.errors.show(message);
                return;
            }
        };

        match self.api.add_purchase(&purchase).await {
            Ok(resp) if resp.success => {
                form.reset();
                self.load(false).await;
            }
            Ok(resp) => {
                self.errors
                    .show(resp.message.as_deref().unwrap_or("Failed to add purchase"));
            }
            Err(e) => {
                debug!("add purchase failed: {:#}", e);
                self.errors.show("Network error when adding purchase");
            }
        }
    }

    /// Delete by id and reload from cached price data. A failed delete
    /// leaves the visible table untouched.
    pub async fn delete(&self, id: &str) {
        match self.api.delete_purchase(id).await {
            Ok(resp) if resp.success => {
                self.load(false).await;
            }
            Ok(resp) => {
                self.errors.show(
                    resp.message
                        .as_deref()
                        .unwrap_or("Failed to delete purchase"),
                );
            }
            Err(e) => {
                debug!("delete purchase failed: {:#}", e);
                self.errors.show("Network error when deleting purchase");
            }
        }
    }
}
