//! Command parsing for the interactive session
//!
//! A small hand-rolled parser so the same command strings work from the
//! REPL and from tests without a terminal.

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the current price: `price [--refresh]`
    Price { refresh: bool },
    /// Fill the form's price from a historical quote: `historical [date]`
    Historical { date: Option<String> },
    /// Show the ledger: `list [--refresh]`
    List { refresh: bool },
    /// Submit the purchase form, optionally filling it first:
    /// `add [<date> <price> <grams> [description...]]`
    Add {
        date: Option<String>,
        price: Option<String>,
        grams: Option<String>,
        description: Option<String>,
    },
    /// Edit one form field: `set <date|price|grams|description> <value>`
    Set { field: String, value: String },
    /// Show the current form contents
    Form,
    /// Delete a purchase: `delete <id>`
    Delete { id: String },
    /// Force refresh price and ledger: `refresh`
    Refresh,
    /// Select a CSV file for import: `import <path>`
    Import { path: String },
    /// Upload the selected file: `confirm`
    Confirm,
    /// Dismiss the import results: `dismiss [ok|x]`
    Dismiss { ok: bool },
    /// Export purchases to CSV: `export [path]`
    Export { path: Option<String> },
    /// Server health check
    Health,
    /// Show help
    Help,
    /// Exit/quit
    Exit,
}

/// Error type for command parsing
#[derive(Debug, Clone)]
pub struct CommandParseError {
    pub message: String,
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommandParseError {}

fn err(message: impl Into<String>) -> CommandParseError {
    CommandParseError {
        message: message.into(),
    }
}

const FORM_FIELDS: &[&str] = &["date", "price", "grams", "description"];

/// Parse a command string into a Command enum
pub fn parse_command(input: &str) -> Result<Command, CommandParseError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(err("Empty command. Type `help` for commands."));
    }

    let input = input.strip_prefix('/').unwrap_or(input);

    let mut parts = input.split_whitespace();
    let cmd = parts
        .next()
        .ok_or_else(|| err("No command provided"))?
        .to_lowercase();

    match cmd.as_str() {
        "price" => {
            let refresh = parts.any(|p| p == "--refresh" || p == "-r");
            Ok(Command::Price { refresh })
        }
        "historical" | "hist" => {
            let date = parts.next().map(|s| s.to_string());
            Ok(Command::Historical { date })
        }
        "list" | "ls" => {
            let refresh = parts.any(|p| p == "--refresh" || p == "-r");
            Ok(Command::List { refresh })
        }
        "add" => {
            let collected: Vec<_> = parts.collect();
            if collected.is_empty() {
                // Submit the form as it stands
                return Ok(Command::Add {
                    date: None,
                    price: None,
                    grams: None,
                    description: None,
                });
            }
            if collected.len() < 3 {
                return Err(err(
                    "add requires date, price and grams. Usage: add <date> <price> <grams> [description]",
                ));
            }
            let description = if collected.len() > 3 {
                Some(collected[3..].join(" "))
            } else {
                None
            };
            Ok(Command::Add {
                date: Some(collected[0].to_string()),
                price: Some(collected[1].to_string()),
                grams: Some(collected[2].to_string()),
                description,
            })
        }
        "set" => {
            let field = parts
                .next()
                .ok_or_else(|| err("set requires a field. Usage: set <field> <value>"))?
                .to_lowercase();
            if !FORM_FIELDS.contains(&field.as_str()) {
                return Err(err(format!(
                    "Unknown field: {}. Use: date, price, grams or description",
                    field
                )));
            }
            let value: Vec<_> = parts.collect();
            if value.is_empty() {
                return Err(err(format!("set {} requires a value", field)));
            }
            Ok(Command::Set {
                field,
                value: value.join(" "),
            })
        }
        "form" => Ok(Command::Form),
        "delete" | "del" => {
            let id = parts
                .next()
                .ok_or_else(|| err("delete requires an id. Usage: delete <id>"))?
                .to_string();
            Ok(Command::Delete { id })
        }
        "refresh" => Ok(Command::Refresh),
        "import" => {
            let path = parts
                .next()
                .ok_or_else(|| err("import requires a file path. Usage: import <path>"))?
                .to_string();
            Ok(Command::Import { path })
        }
        "confirm" => Ok(Command::Confirm),
        "dismiss" => match parts.next() {
            None | Some("ok") => Ok(Command::Dismiss { ok: true }),
            Some("x") | Some("close") => Ok(Command::Dismiss { ok: false }),
            Some(other) => Err(err(format!("Unknown dismissal: {}. Use: ok or x", other))),
        },
        "export" => {
            let path = parts.next().map(|s| s.to_string());
            Ok(Command::Export { path })
        }
        "health" => Ok(Command::Health),
        "help" | "?" => Ok(Command::Help),
        "exit" | "quit" | "q" => Ok(Command::Exit),
        _ => Err(err(format!(
            "Unknown command: '{}'. Type 'help' for available commands.",
            cmd
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_command("price").unwrap(), Command::Price { refresh: false });
        assert_eq!(
            parse_command("price --refresh").unwrap(),
            Command::Price { refresh: true }
        );
    }

    #[test]
    fn test_parse_with_slash() {
        assert_eq!(parse_command("/list").unwrap(), Command::List { refresh: false });
    }

    #[test]
    fn test_parse_historical_date_optional() {
        assert_eq!(
            parse_command("historical").unwrap(),
            Command::Historical { date: None }
        );
        assert_eq!(
            parse_command("hist 2024-01-01").unwrap(),
            Command::Historical {
                date: Some("2024-01-01".to_string())
            }
        );
    }

    #[test]
    fn test_parse_add_full() {
        let cmd = parse_command("add 2024-01-01 100.5 12.5 gift for mom").unwrap();
        assert_eq!(
            cmd,
            Command::Add {
                date: Some("2024-01-01".to_string()),
                price: Some("100.5".to_string()),
                grams: Some("12.5".to_string()),
                description: Some("gift for mom".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_add_bare_submits_form() {
        let cmd = parse_command("add").unwrap();
        assert_eq!(
            cmd,
            Command::Add {
                date: None,
                price: None,
                grams: None,
                description: None,
            }
        );
    }

    #[test]
    fn test_parse_add_partial_is_error() {
        let result = parse_command("add 2024-01-01 100.5");
        assert!(result.is_err());
        assert!(result.unwrap_err().message.contains("requires date"));
    }

    #[test]
    fn test_parse_set_validates_field() {
        assert_eq!(
            parse_command("set grams 12.5").unwrap(),
            Command::Set {
                field: "grams".to_string(),
                value: "12.5".to_string()
            }
        );
        assert!(parse_command("set weight 12.5").is_err());
        assert!(parse_command("set grams").is_err());
    }

    #[test]
    fn test_parse_set_description_joins_words() {
        assert_eq!(
            parse_command("set description gift for mom").unwrap(),
            Command::Set {
                field: "description".to_string(),
                value: "gift for mom".to_string()
            }
        );
    }

    #[test]
    fn test_parse_delete_requires_id() {
        assert_eq!(
            parse_command("delete abc-123").unwrap(),
            Command::Delete {
                id: "abc-123".to_string()
            }
        );
        assert!(parse_command("delete").is_err());
    }

    #[test]
    fn test_parse_import_requires_path() {
        assert_eq!(
            parse_command("import purchases.csv").unwrap(),
            Command::Import {
                path: "purchases.csv".to_string()
            }
        );
        assert!(parse_command("import").is_err());
    }

    #[test]
    fn test_parse_dismiss_variants() {
        assert_eq!(parse_command("dismiss").unwrap(), Command::Dismiss { ok: true });
        assert_eq!(parse_command("dismiss ok").unwrap(), Command::Dismiss { ok: true });
        assert_eq!(parse_command("dismiss x").unwrap(), Command::Dismiss { ok: false });
        assert!(parse_command("dismiss maybe").is_err());
    }

    #[test]
    fn test_parse_exit_aliases() {
        assert_eq!(parse_command("exit").unwrap(), Command::Exit);
        assert_eq!(parse_command("quit").unwrap(), Command::Exit);
        assert_eq!(parse_command("q").unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_unknown_command() {
        let result = parse_command("frobnicate");
        assert!(result.is_err());
        assert!(result.unwrap_err().message.contains("Unknown command"));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_command("").is_err());
        assert!(parse_command("   ").is_err());
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(parse_command("PRICE").unwrap(), parse_command("price").unwrap());
    }
}
