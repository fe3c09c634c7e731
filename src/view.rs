//! Rendering abstraction between components and the terminal
//!
//! Components never talk to the terminal directly; they build display
//! models here and hand them to a [`Screen`]. That keeps every rendering
//! rule (placeholder row, sign prefixes, cache badge) testable without a
//! real output surface.

use rust_decimal::Decimal;

use crate::api::models::{Purchase, Summary};
use crate::utils::{format_date, format_profit_loss, format_sar};

/// Placeholder shown instead of rows when the ledger is empty
pub const EMPTY_LEDGER_PLACEHOLDER: &str = "No purchases yet. Add a purchase above.";

/// Whether the last successful load was served from the server-side cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Cached,
    Fresh,
}

impl CacheStatus {
    pub fn from_cached(cached: bool) -> Self {
        if cached {
            CacheStatus::Cached
        } else {
            CacheStatus::Fresh
        }
    }

    /// Badge text; the two labels are mutually exclusive
    pub fn label(&self) -> &'static str {
        match self {
            CacheStatus::Cached => "Cached",
            CacheStatus::Fresh => "Fresh Data",
        }
    }
}

/// One fully formatted ledger table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub grams: String,
    pub purchase_price: String,
    pub purchase_value: String,
    pub current_value: String,
    pub profit_loss: String,
    pub is_profit: bool,
}

/// Formatted aggregate row shown under the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub total_investment: String,
    pub total_current_value: String,
    pub total_profit_loss: String,
    pub is_profit: bool,
}

/// Display model for the ledger: either the placeholder (summary hidden)
/// or one row per purchase plus the summary row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerView {
    Empty,
    Rows {
        rows: Vec<LedgerRow>,
        summary: SummaryRow,
    },
}

/// Build the ledger display model from a successful purchases response
pub fn build_ledger_view(purchases: &[Purchase], summary: &Summary) -> LedgerView {
    if purchases.is_empty() {
        return LedgerView::Empty;
    }

    let rows = purchases.iter().map(build_row).collect();
    LedgerView::Rows {
        rows,
        summary: build_summary_row(summary),
    }
}

fn build_row(purchase: &Purchase) -> LedgerRow {
    LedgerRow {
        id: purchase.id.clone(),
        date: format_date(purchase.purchase_date),
        description: if purchase.description.is_empty() {
            "-".to_string()
        } else {
            purchase.description.clone()
        },
        grams: format!("{:.2} g", purchase.grams),
        purchase_price: format_sar(purchase.purchase_price),
        purchase_value: format_sar(purchase.purchase_value),
        current_value: format_sar(purchase.current_value),
        profit_loss: format_profit_loss(
            purchase.profit_loss,
            purchase.profit_loss_percentage,
            purchase.is_profit,
        ),
        is_profit: purchase.is_profit,
    }
}

fn build_summary_row(summary: &Summary) -> SummaryRow {
    SummaryRow {
        total_investment: format_sar(summary.total_investment),
        total_current_value: format_sar(summary.total_current_value),
        total_profit_loss: format_profit_loss(
            summary.total_profit_loss,
            summary.total_profit_loss_percentage,
            summary.is_profit,
        ),
        is_profit: summary.is_profit,
    }
}

/// Price headline: "304.12 SAR per gram (81.10 USD)"
pub fn price_headline(price: Decimal, price_usd: Decimal) -> String {
    format!("{:.2} SAR per gram ({:.2} USD)", price, price_usd)
}

/// Render surface the components draw on.
///
/// The terminal implementation lives in [`crate::ui`]; tests use a
/// recording double.
pub trait Screen: Send + Sync {
    /// Replace the price display (headline + detail line)
    fn show_price(&self, headline: &str, detail: &str);
    /// Reconcile the cache badge and last-updated line
    fn set_cache_status(&self, status: CacheStatus, last_updated_line: &str);
    /// Write a fetched historical price into the purchase-price form field
    fn set_price_input(&self, value: &str);
    /// Fully replace the rendered ledger
    fn render_ledger(&self, view: &LedgerView);
    /// Reveal the error banner with the given message
    fn show_error_banner(&self, message: &str);
    /// Hide the error banner
    fn hide_error_banner(&self);
    /// A valid import file was selected; confirm becomes available
    fn import_file_selected(&self, name: &str);
    /// Clear all transient import state (file label, progress, confirm)
    fn reset_import(&self);
    /// Proportional upload progress
    fn upload_progress(&self, loaded: u64, total: u64);
    /// Show the import results surface
    fn show_import_results(&self, lines: &[String]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_purchase(is_profit: bool) -> Purchase {
        Purchase {
            id: "abc-123".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            purchase_price: dec!(250),
            grams: dec!(10.5),
            description: String::new(),
            purchase_value: dec!(2625),
            current_value: if is_profit { dec!(3193.26) } else { dec!(2500) },
            profit_loss: if is_profit { dec!(568.26) } else { dec!(-125) },
            profit_loss_percentage: if is_profit { dec!(21.65) } else { dec!(-4.76) },
            is_profit,
        }
    }

    fn sample_summary() -> Summary {
        Summary {
            total_investment: dec!(2625),
            total_current_value: dec!(3193.26),
            total_profit_loss: dec!(568.26),
            total_profit_loss_percentage: dec!(21.65),
            is_profit: true,
            last_updated: Some("2024-06-10 09:13:20".to_string()),
            cached: true,
        }
    }

    #[test]
    fn test_empty_list_renders_placeholder_view() {
        let view = build_ledger_view(&[], &sample_summary());
        assert_eq!(view, LedgerView::Empty);
    }

    #[test]
    fn test_row_count_matches_purchase_count() {
        let purchases = vec![
            sample_purchase(true),
            sample_purchase(false),
            sample_purchase(true),
        ];
        match build_ledger_view(&purchases, &sample_summary()) {
            LedgerView::Rows { rows, .. } => assert_eq!(rows.len(), 3),
            LedgerView::Empty => panic!("expected rows"),
        }
    }

    #[test]
    fn test_profit_row_is_sign_prefixed() {
        let purchases = vec![sample_purchase(true)];
        let LedgerView::Rows { rows, .. } = build_ledger_view(&purchases, &sample_summary())
        else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].profit_loss, "+568.26 SAR (+21.65%)");
        assert!(rows[0].is_profit);
    }

    #[test]
    fn test_loss_row_has_no_plus_prefix() {
        let purchases = vec![sample_purchase(false)];
        let LedgerView::Rows { rows, .. } = build_ledger_view(&purchases, &sample_summary())
        else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].profit_loss, "-125.00 SAR (-4.76%)");
        assert!(!rows[0].is_profit);
    }

    #[test]
    fn test_empty_description_shows_dash() {
        let purchases = vec![sample_purchase(true)];
        let LedgerView::Rows { rows, .. } = build_ledger_view(&purchases, &sample_summary())
        else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].description, "-");
    }

    #[test]
    fn test_summary_row_formatting() {
        let purchases = vec![sample_purchase(true)];
        let LedgerView::Rows { summary, .. } = build_ledger_view(&purchases, &sample_summary())
        else {
            panic!("expected rows");
        };
        assert_eq!(summary.total_investment, "2625.00 SAR");
        assert_eq!(summary.total_profit_loss, "+568.26 SAR (+21.65%)");
    }

    #[test]
    fn test_price_headline() {
        assert_eq!(
            price_headline(dec!(304.12), dec!(81.10)),
            "304.12 SAR per gram (81.10 USD)"
        );
    }

    #[test]
    fn test_cache_status_labels_mutually_exclusive() {
        assert_eq!(CacheStatus::from_cached(true).label(), "Cached");
        assert_eq!(CacheStatus::from_cached(false).label(), "Fresh Data");
    }
}
