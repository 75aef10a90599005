//! # Expense-Desk CLI
//!
//! One-shot commands against the accounting backend. Each run builds a
//! fresh [`HttpDashboard`], executes one command and prints the notification
//! the dashboard would have shown.
//!
//! ```text
//! desk sync chart-of-accounts
//! desk expense --account 460000 --paid-through 300010 --amount 12.50 --date 2024-03-01
//! desk upload-receipt ./lunch.jpg --amount 12.50 --category Meals
//! desk --metrics stats
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use desk_runtime::{DeskConfig, HttpDashboard};
use desk_telemetry::{gather_metrics, init_telemetry, TelemetryConfig};
use ed_03_expense_submission::DraftField;
use ed_04_receipt_lifecycle::{format_file_size, ReceiptFile, ReceiptMetadata};
use shared_types::ResourceKey;

/// Expense-Desk: sync reference data, record expenses, attach receipts
#[derive(Parser, Debug)]
#[command(name = "desk", version)]
#[command(about = "Command-line client for the Expense-Desk dashboard")]
struct Args {
    /// Print the Prometheus metrics of this run after the command
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Trigger a remote sync, then reload the local copy
    Sync {
        /// chart-of-accounts, contacts or receipts
        resource: ResourceKey,
    },

    /// Reload the local copy without a remote sync
    Refresh {
        /// chart-of-accounts, contacts or receipts
        resource: ResourceKey,
    },

    /// Create an expense
    Expense {
        /// Expense account id
        #[arg(long)]
        account: String,

        /// Bank or cash account the expense was paid through
        #[arg(long)]
        paid_through: String,

        /// Positive decimal amount
        #[arg(long)]
        amount: String,

        /// YYYY-MM-DD
        #[arg(long)]
        date: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Customer contact id
        #[arg(long, default_value = "")]
        customer: String,
    },

    /// Upload a receipt file
    UploadReceipt {
        /// Image or PDF file
        path: PathBuf,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        amount: String,

        #[arg(long, default_value = "")]
        category: String,
    },

    /// Load accounts and contacts, then print the dashboard counters as JSON
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_telemetry(&TelemetryConfig::from_env()).context("Failed to initialize telemetry")?;
    let config = DeskConfig::from_env().context("Invalid configuration")?;
    let dashboard = HttpDashboard::connect(config).context("Failed to create dashboard")?;

    let result = run(&dashboard, args.command).await;

    if let Some(notification) = dashboard.current_notification() {
        println!("{}", notification);
    }
    if args.metrics {
        print!("{}", gather_metrics()?);
    }
    result
}

async fn run(dashboard: &HttpDashboard, command: Command) -> Result<()> {
    match command {
        Command::Sync { resource } => {
            let report = dashboard.sync(resource).await?;
            debug!("{} now holds {} items", resource, report.item_count);
        }
        Command::Refresh { resource } => {
            let report = dashboard.refresh(resource).await?;
            println!("{}: {} items", resource.title(), report.item_count);
        }
        Command::Expense {
            account,
            paid_through,
            amount,
            date,
            description,
            customer,
        } => {
            let fields = [
                (DraftField::AccountId, account),
                (DraftField::PaidThroughAccountId, paid_through),
                (DraftField::Amount, amount),
                (DraftField::Date, date),
                (DraftField::Description, description),
                (DraftField::CustomerId, customer),
            ];
            for (field, value) in fields {
                dashboard.set_expense_field(field.as_str(), &value)?;
            }
            let expense = dashboard.submit_expense().await?;
            debug!("Recorded expense {}", expense.id);
        }
        Command::UploadReceipt {
            path,
            description,
            amount,
            category,
        } => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Cannot read {}", path.display()))?;
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let metadata = ReceiptMetadata {
                description,
                amount,
                category,
            };
            let receipt = dashboard
                .upload_receipt(Some(ReceiptFile::new(filename, bytes)), metadata)
                .await?;
            debug!("Recorded receipt {}", receipt.id);
            println!(
                "{} ({})",
                receipt.filename,
                format_file_size(receipt.file_size.unwrap_or_default())
            );
        }
        Command::Stats => {
            let (accounts, contacts) = dashboard.load_initial().await;
            accounts?;
            contacts?;
            println!("{}", serde_json::to_string_pretty(&dashboard.stats())?);
        }
    }
    Ok(())
}
