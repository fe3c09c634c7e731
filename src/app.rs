//! Component wiring and session state
//!
//! Owns one instance of each component plus the purchase form, all
//! sharing a single screen and error reporter. Operations are driven
//! one at a time from the session loop; only `refresh` fans out into
//! concurrent requests.

use std::sync::Arc;

use crate::api::GoldApi;
use crate::config::Config;
use crate::error_reporter::ErrorReporter;
use crate::export::ExportFlow;
use crate::import_flow::{Dismissal, ImportFlow};
use crate::ledger::{PurchaseForm, PurchaseLedgerView};
use crate::price_sync::PriceSync;
use crate::view::Screen;

pub struct App {
    pub prices: Arc<PriceSync>,
    pub ledger: Arc<PurchaseLedgerView>,
    pub import: ImportFlow,
    pub export: ExportFlow,
    pub form: PurchaseForm,
}

impl App {
    pub fn new(config: &Config, api: Arc<dyn GoldApi>, screen: Arc<dyn Screen>) -> Self {
        let errors = Arc::new(ErrorReporter::new(
            Arc::clone(&screen),
            config.banner_delay(),
        ));

        Self {
            prices: Arc::new(PriceSync::new(
                Arc::clone(&api),
                Arc::clone(&screen),
                Arc::clone(&errors),
            )),
            ledger: Arc::new(PurchaseLedgerView::new(
                Arc::clone(&api),
                Arc::clone(&screen),
                Arc::clone(&errors),
            )),
            import: ImportFlow::new(
                Arc::clone(&api),
                Arc::clone(&screen),
                Arc::clone(&errors),
            ),
            export: ExportFlow::new(Arc::clone(&api), errors),
            form: PurchaseForm::with_today(),
        }
    }

    /// Initial dashboard load: current price and ledger, both from cache
    pub async fn startup(&self) {
        self.prices.fetch_current_price(false).await;
        self.ledger.load(false).await;
    }

    /// Force refresh: the price fetch and the ledger fetch run as two
    /// independent tasks with no ordering guarantee between them; the
    /// last to complete renders last. The awaits below only pin the
    /// process lifetime.
    pub async fn refresh(&self) {
        let prices = Arc::clone(&self.prices);
        let ledger = Arc::clone(&self.ledger);

        let price_task = tokio::spawn(async move { prices.fetch_current_price(true).await });
        let ledger_task = tokio::spawn(async move { ledger.load(true).await });

        let _ = price_task.await;
        let _ = ledger_task.await;
    }

    /// Submit the purchase form
    pub async fn add_purchase(&mut self) {
        self.ledger.add(&mut self.form).await;
    }

    /// Fill the form's price field from the historical price for its date
    pub async fn fetch_historical_price(&mut self) {
        self.prices.fetch_historical_price(&mut self.form).await;
    }

    /// Dismiss the import results; the OK affordance also reloads the
    /// ledger with cached price data.
    pub async fn dismiss_import(&mut self, dismissal: Dismissal) {
        if self.import.dismiss(dismissal) {
            self.ledger.load(false).await;
        }
    }
}
