//! Wire types for the dashboard REST API
//!
//! Every endpoint answers a JSON envelope with a `success` flag; failures
//! carry a human-readable `message` and omit the data fields. Monetary
//! values are deserialized straight into `Decimal`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Response from `GET /api/current-price`
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentPriceResponse {
    pub success: bool,
    pub message: Option<String>,
    /// SAR per gram
    pub price: Option<Decimal>,
    pub price_usd: Option<Decimal>,
    pub exchange_rate: Option<Decimal>,
    /// Unix seconds; the server sends a float clock reading
    pub timestamp: Option<f64>,
    /// Pre-formatted server-local time, preferred over `timestamp` for display
    pub last_updated: Option<String>,
    #[serde(default)]
    pub cached: bool,
}

/// Response from `GET /api/historical-price`
#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalPriceResponse {
    pub success: bool,
    pub message: Option<String>,
    pub price: Option<Decimal>,
}

/// A purchase row as served by `GET /api/purchases`.
///
/// The derived fields (`purchase_value` onwards) are computed server-side
/// against the current price; the client never recomputes them.
#[derive(Debug, Clone, Deserialize)]
pub struct Purchase {
    pub id: String,
    pub purchase_date: NaiveDate,
    pub purchase_price: Decimal,
    pub grams: Decimal,
    #[serde(default)]
    pub description: String,
    pub purchase_value: Decimal,
    pub current_value: Decimal,
    pub profit_loss: Decimal,
    pub profit_loss_percentage: Decimal,
    pub is_profit: bool,
}

/// Aggregate summary over all purchases, computed server-side
#[derive(Debug, Clone, Deserialize)]
pub struct Summary {
    pub total_investment: Decimal,
    pub total_current_value: Decimal,
    pub total_profit_loss: Decimal,
    pub total_profit_loss_percentage: Decimal,
    pub is_profit: bool,
    pub last_updated: Option<String>,
    #[serde(default)]
    pub cached: bool,
}

/// Response from `GET /api/purchases`
#[derive(Debug, Clone, Deserialize)]
pub struct PurchasesResponse {
    pub success: bool,
    pub message: Option<String>,
    #[serde(default)]
    pub purchases: Vec<Purchase>,
    pub summary: Option<Summary>,
}

/// Request body for `POST /api/purchases`
#[derive(Debug, Clone, Serialize)]
pub struct NewPurchase {
    pub purchase_date: String,
    pub purchase_price: Decimal,
    pub grams: Decimal,
    pub description: String,
}

/// Bare acknowledgement envelope (add/delete)
#[derive(Debug, Clone, Deserialize)]
pub struct AckResponse {
    pub success: bool,
    pub message: Option<String>,
}

/// Response from `POST /api/import` (HTTP 200 only)
#[derive(Debug, Clone, Deserialize)]
pub struct ImportResponse {
    pub success: bool,
    pub message: Option<String>,
    #[serde(default)]
    pub imported_count: u32,
    #[serde(default)]
    pub error_count: u32,
}

/// Response from `GET /health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_current_price_success() {
        let json = r#"{
            "success": true,
            "price": 304.12,
            "price_usd": 81.10,
            "currency": "SAR",
            "exchange_rate": 3.75,
            "timestamp": 1718000000.5,
            "last_updated": "2024-06-10 09:13:20",
            "cached": true
        }"#;
        let resp: CurrentPriceResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert!(resp.cached);
        assert_eq!(resp.price.unwrap(), dec!(304.12));
        assert_eq!(resp.exchange_rate.unwrap(), dec!(3.75));
        assert_eq!(resp.last_updated.as_deref(), Some("2024-06-10 09:13:20"));
    }

    #[test]
    fn test_parse_current_price_failure_has_no_data() {
        let json = r#"{"success": false, "message": "Failed to get gold price data"}"#;
        let resp: CurrentPriceResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.success);
        assert!(resp.price.is_none());
        assert!(!resp.cached);
        assert_eq!(
            resp.message.as_deref(),
            Some("Failed to get gold price data")
        );
    }

    #[test]
    fn test_parse_purchase_row() {
        let json = r#"{
            "id": "7e1a9f0c-8a3d-4a6f-9f0e-2b1c3d4e5f6a",
            "purchase_date": "2024-01-15",
            "purchase_price": 250.00,
            "grams": 10.5,
            "description": "",
            "purchase_value": 2625.00,
            "current_value": 3193.26,
            "profit_loss": 568.26,
            "profit_loss_percentage": 21.65,
            "is_profit": true
        }"#;
        let purchase: Purchase = serde_json::from_str(json).unwrap();
        assert_eq!(
            purchase.purchase_date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(purchase.grams, dec!(10.5));
        assert!(purchase.is_profit);
        assert!(purchase.description.is_empty());
    }

    #[test]
    fn test_parse_import_counts_default_to_zero() {
        let json = r#"{"success": false, "message": "Missing required field: grams"}"#;
        let resp: ImportResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.imported_count, 0);
        assert_eq!(resp.error_count, 0);
    }
}
