//! Interactive session REPL
//!
//! Keeps the purchase form and import flow state alive across commands,
//! the way the dashboard page does between clicks.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::api::GoldApi;
use crate::app::App;
use crate::commands::{parse_command, Command};
use crate::import_flow::Dismissal;

/// Launch the interactive session
pub async fn run(mut app: App, api: Arc<dyn GoldApi>) -> Result<()> {
    println!("{}", "Goldtrack - Interactive Mode".bold());
    println!(
        "Type {} for help, {} to exit\n",
        "help".cyan(),
        "exit".cyan()
    );

    let mut rl = DefaultEditor::new()?;

    // Initial dashboard load, both from cache
    app.startup().await;

    loop {
        match rl.readline("goldtrack> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match parse_command(trimmed) {
                    Ok(Command::Exit) => {
                        println!("Goodbye!");
                        break;
                    }
                    Ok(cmd) => dispatch(&mut app, &api, cmd).await,
                    Err(e) => {
                        eprintln!("{} {}", "Parse error:".yellow().bold(), e.message);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".red().bold(), err);
                break;
            }
        }
    }

    Ok(())
}

async fn dispatch(app: &mut App, api: &Arc<dyn GoldApi>, cmd: Command) {
    match cmd {
        Command::Price { refresh } => app.prices.fetch_current_price(refresh).await,
        Command::Historical { date } => {
            if let Some(date) = date {
                app.form.date = date;
            }
            app.fetch_historical_price().await;
        }
        Command::List { refresh } => app.ledger.load(refresh).await,
        Command::Add {
            date,
            price,
            grams,
            description,
        } => {
            if let Some(date) = date {
                app.form.date = date;
            }
            if let Some(price) = price {
                app.form.price = price;
            }
            if let Some(grams) = grams {
                app.form.grams = grams;
            }
            if let Some(description) = description {
                app.form.description = description;
            }
            app.add_purchase().await;
        }
        Command::Set { field, value } => {
            match field.as_str() {
                "date" => app.form.date = value,
                "price" => app.form.price = value,
                "grams" => app.form.grams = value,
                "description" => app.form.description = value,
                _ => {}
            }
            print_form(app);
        }
        Command::Form => print_form(app),
        Command::Delete { id } => app.ledger.delete(&id).await,
        Command::Refresh => app.refresh().await,
        Command::Import { path } => app.import.select_file(Path::new(&path)),
        Command::Confirm => app.import.upload().await,
        Command::Dismiss { ok } => {
            let dismissal = if ok { Dismissal::Ok } else { Dismissal::Close };
            app.dismiss_import(dismissal).await;
        }
        Command::Export { path } => {
            if let Some(written) = app.export.export(path.as_deref().map(Path::new)).await {
                println!("{} Exported to {}", "✓".green(), written.display());
            }
        }
        Command::Health => match api.health().await {
            Ok(health) => println!("{} {} ({})", "✓".green(), health.status, health.timestamp),
            Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
        },
        Command::Help => print_help(),
        // Exit is handled by the session loop
        Command::Exit => {}
    }
}

fn print_form(app: &App) {
    println!("{}", "Purchase form".bold());
    println!("  date:        {}", app.form.date);
    println!("  price:       {}", app.form.price);
    println!("  grams:       {}", app.form.grams);
    println!("  description: {}", app.form.description);
}

fn print_help() {
    println!("{}", "Commands".bold());
    println!("  price [--refresh]                     show current gold price");
    println!("  historical [date]                     fill form price from a past date");
    println!("  list [--refresh]                      show the purchase ledger");
    println!("  add [date price grams [description]]  submit a purchase");
    println!("  set <field> <value>                   edit the purchase form");
    println!("  form                                  show the purchase form");
    println!("  delete <id>                           delete a purchase");
    println!("  refresh                               force refresh price and ledger");
    println!("  import <path>                         select a CSV file for import");
    println!("  confirm                               upload the selected file");
    println!("  dismiss [ok|x]                        close the import results");
    println!("  export [path]                         download purchases as CSV");
    println!("  health                                check the API server");
    println!("  exit                                  leave the session");
}
