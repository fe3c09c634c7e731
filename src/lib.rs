//! Goldtrack - gold purchase dashboard client
//!
//! A terminal front-end for a gold purchase tracking API: current and
//! historical prices with cached-vs-fresh reconciliation, a purchase
//! ledger with profit/loss summaries, and CSV import with upload
//! progress.

pub mod api;
pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod error_reporter;
pub mod export;
pub mod import_flow;
pub mod ledger;
pub mod price_sync;
pub mod repl;
pub mod ui;
pub mod utils;
pub mod view;
