//! # Command-Line Interface
//!
//! ```text
//! ustock lists                          all lists with item counts
//! ustock lists new <name>               create a list
//! ustock lists delete <name>            delete a list and its items
//! ustock items <list>                   numbered items of a list
//! ustock add <list> --name N ...        add an item by hand
//! ustock remove <list> <index>          remove item #index (as shown by items)
//! ustock scan <code> --list L ...       look the code up, then add it
//! ustock expiring [--days N]            items expiring soon, across lists
//! ustock config [--write]               effective configuration
//! ```

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use ustock_core::format::parse_date;

/// Track what is in your fridge, cupboards and cellar.
#[derive(Debug, Parser)]
#[command(name = "ustock", version, about)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// More logging on stderr (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show, create or delete lists
    Lists {
        #[command(subcommand)]
        action: Option<ListsAction>,
    },

    /// Show the items of a list
    Items { list: String },

    /// Add an item by hand
    Add {
        list: String,

        /// Product name
        #[arg(long)]
        name: String,

        /// Barcode, if known
        #[arg(long, default_value = "")]
        code: String,

        #[command(flatten)]
        details: ItemDetails,
    },

    /// Remove an item by its number in `ustock items`
    Remove { list: String, index: usize },

    /// Look a barcode up and add the product to a list
    Scan {
        code: String,

        /// Target list
        #[arg(long)]
        list: String,

        /// Name to use when the lookup finds nothing
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        details: ItemDetails,
    },

    /// Items expiring soon, expired ones included
    Expiring {
        /// Window in days (default from config)
        #[arg(long)]
        days: Option<i64>,
    },

    /// Show the effective configuration
    Config {
        /// Also write it to the config file
        #[arg(long)]
        write: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ListsAction {
    /// Create a list
    New { name: String },
    /// Delete a list and everything in it
    Delete { name: String },
}

/// Quantity and expiration options shared by `add` and `scan`.
#[derive(Debug, Clone, Args)]
pub struct ItemDetails {
    /// Number of units
    #[arg(long, default_value_t = 1)]
    pub qty: u32,

    /// Expiration date, dd/mm/yyyy or yyyy-mm-dd (default: today)
    #[arg(long, value_parser = parse_date_arg, conflicts_with = "no_expiration")]
    pub expires: Option<NaiveDate>,

    /// Do not track an expiration date
    #[arg(long)]
    pub no_expiration: bool,
}

impl Default for ItemDetails {
    fn default() -> Self {
        ItemDetails {
            qty: 1,
            expires: None,
            no_expiration: false,
        }
    }
}

fn parse_date_arg(input: &str) -> Result<NaiveDate, String> {
    parse_date(input).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan() {
        let cli = Cli::try_parse_from([
            "ustock", "scan", "3017620422003", "--list", "Fridge", "--qty", "2", "--expires",
            "07/03/2025",
        ])
        .unwrap();

        match cli.command {
            Command::Scan {
                code,
                list,
                name,
                details,
            } => {
                assert_eq!(code, "3017620422003");
                assert_eq!(list, "Fridge");
                assert_eq!(name, None);
                assert_eq!(details.qty, 2);
                assert_eq!(details.expires, NaiveDate::from_ymd_opt(2025, 3, 7));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_expiration_flags_conflict() {
        assert!(Cli::try_parse_from([
            "ustock",
            "add",
            "Fridge",
            "--name",
            "Milk",
            "--expires",
            "2025-03-07",
            "--no-expiration",
        ])
        .is_err());
    }

    #[test]
    fn test_bad_date_rejected() {
        assert!(Cli::try_parse_from([
            "ustock", "add", "Fridge", "--name", "Milk", "--expires", "31/02/2025",
        ])
        .is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["ustock", "lists", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Lists { action: None }));
    }
}
