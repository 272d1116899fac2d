use crate::domain::model::{ClientStatus, MedicationItem, MedicationStatus, TaskCategory, TransactionType};
use crate::app::khata::ReportPeriod;
use crate::utils::error::{OpsError, Result};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "kripa-ops")]
#[command(about = "Back-office toolkit for Shri Kripa Pharmacy")]
pub struct Cli {
    #[arg(long, default_value = "./data", help = "Directory holding the persisted books")]
    pub data_dir: String,

    #[arg(long, help = "Optional TOML settings file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plan a visiting order for all pending deliveries
    Route {
        #[arg(long, help = "Print the route as JSON instead of text")]
        json: bool,
    },
    #[command(subcommand)]
    Delivery(DeliveryCommand),
    #[command(subcommand)]
    Khata(KhataCommand),
    #[command(subcommand)]
    Client(ClientCommand),
}

#[derive(Debug, Subcommand)]
pub enum DeliveryCommand {
    /// Add a delivery to the roster
    Add {
        #[arg(long)]
        patient: String,
        #[arg(long)]
        address: String,
        #[arg(long, default_value = "")]
        contact: String,
        #[arg(long = "medication", value_name = "NAME[:QTY]")]
        medications: Vec<String>,
    },
    /// List deliveries (pending only unless --all)
    List {
        #[arg(long)]
        all: bool,
    },
    /// Mark a delivery as completed
    Complete { id: u64 },
    /// Reopen a completed delivery
    Reopen { id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum KhataCommand {
    /// Add a customer (or supplier with --supplier)
    AddParty {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        contact: String,
        #[arg(long)]
        supplier: bool,
    },
    /// Record a credit or debit entry against a party
    Entry {
        party_id: u64,
        #[arg(long)]
        amount: f64,
        #[arg(long, value_enum, default_value_t = TransactionType::Credit)]
        kind: TransactionType,
        #[arg(long)]
        note: Option<String>,
        #[arg(long)]
        supplier: bool,
    },
    /// Show balances for one party or the whole book
    Balance {
        party_id: Option<u64>,
        #[arg(long)]
        supplier: bool,
    },
    /// Export a period report as CSV
    Report {
        #[arg(long, value_enum, default_value_t = ReportPeriod::Daily)]
        period: ReportPeriod,
        #[arg(long, help = "Write CSV here instead of stdout")]
        out: Option<String>,
        #[arg(long)]
        supplier: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// Add a hospital client
    Add {
        #[arg(long)]
        hospital: String,
        #[arg(long)]
        contact_person: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, value_enum, default_value_t = ClientStatus::Prospect)]
        status: ClientStatus,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List clients with open task counts
    List,
    /// Change a client's status
    SetStatus {
        id: u64,
        #[arg(value_enum)]
        status: ClientStatus,
    },
    /// Add a follow-up task for a client
    Task {
        client_id: u64,
        #[arg(long)]
        description: String,
        #[arg(long, value_name = "YYYY-MM-DD")]
        due: String,
        #[arg(long, value_enum, default_value_t = TaskCategory::PcdInfiltration)]
        category: TaskCategory,
    },
    /// Mark a client task as done
    CompleteTask { client_id: u64, task_id: u64 },
    /// Show open tasks due on or before a date
    Due {
        #[arg(long, value_name = "YYYY-MM-DD")]
        on_or_before: String,
    },
}

/// Parses a `--medication` argument of the form `NAME` or `NAME:QTY`.
pub fn parse_medication(raw: &str) -> Result<MedicationItem> {
    let (name, quantity) = match raw.rsplit_once(':') {
        Some((name, qty)) => {
            let quantity = qty.parse::<u32>().map_err(|_| OpsError::ValidationError {
                field: "medication".to_string(),
                reason: format!("quantity must be a positive integer, got {:?}", qty),
            })?;
            (name, quantity)
        }
        None => (raw, 1),
    };

    if name.trim().is_empty() {
        return Err(OpsError::ValidationError {
            field: "medication".to_string(),
            reason: "medication name cannot be empty".to_string(),
        });
    }
    if quantity == 0 {
        return Err(OpsError::ValidationError {
            field: "medication".to_string(),
            reason: "quantity must be at least 1".to_string(),
        });
    }

    Ok(MedicationItem {
        name: name.trim().to_string(),
        quantity,
        status: MedicationStatus::Pending,
    })
}
