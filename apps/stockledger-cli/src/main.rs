use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stockledger_common::{DEFAULT_LOW_STOCK_THRESHOLD, LedgerConfig};
use stockledger_kernel::Ledger;
use stockledger_persist::LedgerStore;
use stockledger_report::{LedgerSummary, LowStockReport, StockReport};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stockledger", about = "In-memory inventory tracker backed by a JSON file")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Stock file to read and write
    #[arg(short, long, default_value = "inventory.json")]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demonstration sequence against a fresh ledger
    Demo,
    /// Print the stock report for the file
    Report,
    /// List items below a threshold
    LowStock {
        /// Items with strictly fewer units are listed
        #[arg(short, long, default_value_t = DEFAULT_LOW_STOCK_THRESHOLD)]
        threshold: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = LedgerConfig {
        data_file: cli.file,
        ..LedgerConfig::default()
    };

    match cli.command {
        Commands::Demo => {
            run_demo(&config);
        }
        Commands::Report => {
            let ledger = open_ledger(&config)?;
            print!("{}", StockReport::capture(&ledger));
        }
        Commands::LowStock { threshold } => {
            let ledger = open_ledger(&config)?;
            println!("{}", LowStockReport::capture(&ledger, threshold));
        }
    }

    Ok(())
}

fn open_ledger(config: &LedgerConfig) -> anyhow::Result<Ledger> {
    let store = LedgerStore::with_config(config);
    let mut ledger = Ledger::new();
    store
        .load_into(&mut ledger)
        .with_context(|| format!("failed to load {}", store.path().display()))?;
    Ok(ledger)
}

/// Failures are logged by the ledger and store; the sequence keeps going.
/// Returns the operation log it printed.
fn run_demo(config: &LedgerConfig) -> Vec<String> {
    let store = LedgerStore::with_config(config);
    let mut ledger = Ledger::new();
    let mut log = Vec::new();

    let _ = ledger.add_logged("apple", 10, &mut log);
    let _ = ledger.add_logged("banana", 5, &mut log);

    // Rejected with a warning, no mutation.
    let _ = ledger.add_logged("", 10, &mut log);
    let _ = ledger.add_logged("orange", -2, &mut log);

    let _ = ledger.remove("apple", 3);
    let _ = ledger.remove("orange", 1);

    match ledger.get_quantity("apple") {
        Some(qty) => println!("Apple stock: {qty}"),
        None => println!("Apple stock: not found"),
    }

    let low = LowStockReport::capture(&ledger, config.low_stock_threshold);
    println!("Low items: {:?}", low.names());

    let _ = store.save(&ledger);
    let _ = store.load_into(&mut ledger);
    print!("{}", StockReport::capture(&ledger));

    println!("Operation log:");
    for line in &log {
        println!("  {line}");
    }
    tracing::debug!("{}", LedgerSummary::capture(&ledger));
    log
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["stockledger", "-f", "stock.json", "low-stock", "-t", "3"])
            .unwrap();
        assert_eq!(cli.file, PathBuf::from("stock.json"));
        assert!(matches!(cli.command, Commands::LowStock { threshold: 3 }));

        let cli = Cli::try_parse_from(["stockledger", "low-stock"]).unwrap();
        assert!(matches!(cli.command, Commands::LowStock { threshold: 5 }));
        assert_eq!(cli.file, PathBuf::from("inventory.json"));
    }

    #[test]
    fn demo_leaves_expected_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = LedgerConfig {
            data_file: tmp.path().join("inventory.json"),
            ..LedgerConfig::default()
        };
        let log = run_demo(&config);
        assert_eq!(log.len(), 2);
        assert!(log[0].ends_with(": Added 10 of apple"));
        assert!(log[1].ends_with(": Added 5 of banana"));

        let ledger = open_ledger(&config).unwrap();
        assert_eq!(ledger.get_quantity("apple").map(|q| q.get()), Some(7));
        assert_eq!(ledger.get_quantity("banana").map(|q| q.get()), Some(5));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn open_ledger_reports_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = LedgerConfig {
            data_file: tmp.path().join("absent.json"),
            ..LedgerConfig::default()
        };
        let err = open_ledger(&config).unwrap_err();
        assert!(err.to_string().contains("failed to load"));
    }
}
