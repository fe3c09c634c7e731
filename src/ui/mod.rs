//! Terminal rendering surface
//!
//! Implements [`Screen`] on top of stdout: tabled for the ledger,
//! colored badges for cache state and profit/loss, indicatif for upload
//! progress.

use std::sync::Mutex;

use colored::Colorize;
use indicatif::ProgressBar;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use crate::view::{CacheStatus, LedgerView, Screen, SummaryRow, EMPTY_LEDGER_PLACEHOLDER};

#[derive(Default)]
pub struct TerminalScreen {
    upload_bar: Mutex<Option<ProgressBar>>,
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Grams")]
    grams: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "P&L")]
    profit_loss: String,
    #[tabled(rename = "Id")]
    id: String,
}

fn print_summary(summary: &SummaryRow) {
    println!("\n{} Summary", "━".repeat(60).bright_black());
    println!(
        "{:<24} {}",
        "Total Investment:".bold(),
        summary.total_investment
    );
    println!(
        "{:<24} {}",
        "Total Current Value:".bold(),
        summary.total_current_value
    );

    let pl_colored = if summary.is_profit {
        summary.total_profit_loss.green()
    } else {
        summary.total_profit_loss.red()
    };
    println!("{:<24} {}\n", "Total Profit/Loss:".bold(), pl_colored);
}

impl Screen for TerminalScreen {
    fn show_price(&self, headline: &str, detail: &str) {
        println!("\n{} {}", "💰".yellow(), headline.bold());
        println!("{}", detail.bright_black());
    }

    fn set_cache_status(&self, status: CacheStatus, last_updated_line: &str) {
        let badge = match status {
            CacheStatus::Cached => status.label().yellow(),
            CacheStatus::Fresh => status.label().green(),
        };
        println!("{} [{}]", last_updated_line.bright_black(), badge);
    }

    fn set_price_input(&self, value: &str) {
        println!("Purchase price set to {} SAR/g", value.bold());
    }

    fn render_ledger(&self, view: &LedgerView) {
        match view {
            LedgerView::Empty => {
                println!("\n{}", EMPTY_LEDGER_PLACEHOLDER.bright_black());
            }
            LedgerView::Rows { rows, summary } => {
                let table_rows: Vec<TableRow> = rows
                    .iter()
                    .map(|row| TableRow {
                        date: row.date.clone(),
                        description: row.description.clone(),
                        grams: row.grams.clone(),
                        price: row.purchase_price.clone(),
                        cost: row.purchase_value.clone(),
                        value: row.current_value.clone(),
                        profit_loss: if row.is_profit {
                            row.profit_loss.green().to_string()
                        } else {
                            row.profit_loss.red().to_string()
                        },
                        id: row.id.clone(),
                    })
                    .collect();

                let mut table = Table::new(&table_rows);
                table.with(Style::modern());
                table.modify(Columns::new(2..7), Alignment::right());
                println!("\n{}", table);

                print_summary(summary);
            }
        }
    }

    fn show_error_banner(&self, message: &str) {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }

    fn hide_error_banner(&self) {
        // Scrollback cannot be retracted; the banner simply expires.
    }

    fn import_file_selected(&self, name: &str) {
        println!("Selected {} (confirm to upload)", name.bold());
    }

    fn reset_import(&self) {
        if let Some(bar) = self.upload_bar.lock().unwrap().take() {
            bar.finish_and_clear();
        }
    }

    fn upload_progress(&self, loaded: u64, total: u64) {
        let mut guard = self.upload_bar.lock().unwrap();
        let bar = guard.get_or_insert_with(|| ProgressBar::new(total));
        bar.set_position(loaded);
        if loaded >= total {
            bar.finish();
        }
    }

    fn show_import_results(&self, lines: &[String]) {
        println!();
        for line in lines {
            if line.starts_with('✓') {
                println!("{}", line.green());
            } else if line.starts_with('⚠') {
                println!("{}", line.yellow());
            } else {
                println!("{}", line.red());
            }
        }
    }
}
