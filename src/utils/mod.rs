//! Utility functions for formatting and common operations
//!
//! This module provides centralized formatting utilities for consistent
//! display of monetary values, dates and timestamps throughout the client.
//! All amounts are shown with two decimal places in SAR.

use chrono::{Local, NaiveDate, TimeZone};
use rust_decimal::Decimal;

/// Format a monetary value: "304.12 SAR"
///
/// # Examples
/// ```
/// use goldtrack::utils::format_sar;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_sar(dec!(304.12)), "304.12 SAR");
/// assert_eq!(format_sar(dec!(-500)), "-500.00 SAR");
/// ```
pub fn format_sar(value: Decimal) -> String {
    format!("{:.2} SAR", value)
}

/// Sign prefix for a profit/loss figure. Losses carry their own minus sign,
/// so only profits get an explicit prefix.
pub fn sign_prefix(is_profit: bool) -> &'static str {
    if is_profit {
        "+"
    } else {
        ""
    }
}

/// Format a profit/loss amount with its percentage:
/// "+568.26 SAR (+21.65%)" or "-120.00 SAR (-4.10%)"
///
/// # Examples
/// ```
/// use goldtrack::utils::format_profit_loss;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(
///     format_profit_loss(dec!(568.26), dec!(21.65), true),
///     "+568.26 SAR (+21.65%)"
/// );
/// assert_eq!(
///     format_profit_loss(dec!(-120), dec!(-4.1), false),
///     "-120.00 SAR (-4.10%)"
/// );
/// ```
pub fn format_profit_loss(amount: Decimal, percentage: Decimal, is_profit: bool) -> String {
    let sign = sign_prefix(is_profit);
    format!("{}{:.2} SAR ({}{:.2}%)", sign, amount, sign, percentage)
}

/// Format a purchase date for display
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Convert a unix-seconds timestamp to local display time.
///
/// The server sends a float clock reading; sub-second precision is dropped.
pub fn format_unix_local(timestamp: f64) -> String {
    match Local.timestamp_opt(timestamp as i64, 0) {
        chrono::LocalResult::Single(dt) => dt.format("%d/%m/%Y %H:%M:%S").to_string(),
        _ => "Unknown".to_string(),
    }
}

/// Today's date in the wire format used by the purchase form
pub fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
