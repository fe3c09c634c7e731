mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::info;

use cli::{Cli, Commands};
use goldtrack::api::{GoldApi, HttpGoldApi};
use goldtrack::app::App;
use goldtrack::config;
use goldtrack::import_flow::Dismissal;
use goldtrack::ledger::PurchaseForm;
use goldtrack::repl;
use goldtrack::ui::TerminalScreen;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = config::load()?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    info!("Using API server at {}", config.api_url);

    let api: Arc<dyn GoldApi> = Arc::new(HttpGoldApi::new(
        &config.api_url,
        config.request_timeout(),
    )?);
    let screen = Arc::new(TerminalScreen::new());
    let mut app = App::new(&config, Arc::clone(&api), screen);

    match cli.command {
        None => repl::run(app, api).await,

        Some(Commands::Price { refresh }) => {
            app.prices.fetch_current_price(refresh).await;
            Ok(())
        }

        Some(Commands::Historical { date }) => {
            app.form.date = date;
            app.fetch_historical_price().await;
            Ok(())
        }

        Some(Commands::List { refresh }) => {
            app.ledger.load(refresh).await;
            Ok(())
        }

        Some(Commands::Add {
            date,
            price,
            grams,
            description,
        }) => {
            app.form = PurchaseForm {
                date,
                price,
                grams,
                description,
            };
            app.add_purchase().await;
            Ok(())
        }

        Some(Commands::Delete { id }) => {
            app.ledger.delete(&id).await;
            Ok(())
        }

        Some(Commands::Refresh) => {
            app.refresh().await;
            Ok(())
        }

        Some(Commands::Import { file }) => {
            app.import.select_file(&file);
            if app.import.can_upload() {
                app.import.upload().await;
                // One-shot run: treat completion as the OK affordance so
                // the reloaded ledger is shown before exiting.
                app.dismiss_import(Dismissal::Ok).await;
            }
            Ok(())
        }

        Some(Commands::Export { output }) => {
            if let Some(path) = app.export.export(output.as_deref()).await {
                println!("{} Exported to {}", "✓".green(), path.display());
            }
            Ok(())
        }

        Some(Commands::Health) => {
            match api.health().await {
                Ok(health) => {
                    println!("{} {} ({})", "✓".green(), health.status, health.timestamp)
                }
                Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
            }
            Ok(())
        }
    }
}
