use chrono::{NaiveDate, Utc};
use clap::Parser;
use kripa_ops::app::clients::NewClient;
use kripa_ops::app::deliveries::NewDelivery;
use kripa_ops::app::khata::report_totals;
use kripa_ops::config::cli::{
    parse_medication, Cli, ClientCommand, Command, DeliveryCommand, KhataCommand,
};
use kripa_ops::core::prompt::PHARMACY_ADDRESS;
use kripa_ops::domain::model::{Delivery, DeliveryStatus, MedicationStatus, PartyKind};
use kripa_ops::utils::error::Result;
use kripa_ops::utils::logger;
use kripa_ops::{
    AppConfig, ClientDirectory, DeliveryBook, GeminiClient, JsonFileStore, KhataBook, OpsError,
    RouteOptimizer,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {} (category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::resolve(&cli)?;
    let store = JsonFileStore::new(config.data_dir.clone());

    match cli.command {
        Command::Route { json } => run_route(&config, store, json).await,
        Command::Delivery(command) => run_delivery(store, command).await,
        Command::Khata(command) => run_khata(store, command).await,
        Command::Client(command) => run_client(store, command).await,
    }
}

async fn run_route(config: &AppConfig, store: JsonFileStore, as_json: bool) -> Result<()> {
    let book = DeliveryBook::new(store);
    let optimizer = RouteOptimizer::new(GeminiClient::new(config.gemini.clone()));

    let route = book.optimize_pending(&optimizer).await?;
    if route.is_empty() {
        println!("No pending deliveries to optimize.");
        return Ok(());
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&route)?);
    } else {
        println!("Optimized route starting from {}:", PHARMACY_ADDRESS);
        for stop in &route {
            println!("  {}. {} - {}", stop.order, stop.customer_name, stop.address);
        }
    }
    Ok(())
}

fn print_delivery(delivery: &Delivery) {
    let status = match delivery.status {
        DeliveryStatus::Pending => "Pending",
        DeliveryStatus::Completed => "Completed",
    };
    println!(
        "#{} [{}] {} - {} ({})",
        delivery.id, status, delivery.patient_name, delivery.address, delivery.contact
    );
    for medication in &delivery.medications {
        let med_status = match medication.status {
            MedicationStatus::Pending => "Pending",
            MedicationStatus::OrderPlaced => "Order Placed",
            MedicationStatus::ArrivingToday => "Arriving Today",
            MedicationStatus::InStock => "In Stock",
        };
        println!("    {} x{} [{}]", medication.name, medication.quantity, med_status);
    }
}

async fn run_delivery(store: JsonFileStore, command: DeliveryCommand) -> Result<()> {
    let book = DeliveryBook::new(store);

    match command {
        DeliveryCommand::Add {
            patient,
            address,
            contact,
            medications,
        } => {
            let medications = medications
                .iter()
                .map(|raw| parse_medication(raw))
                .collect::<Result<Vec<_>>>()?;
            let delivery = book
                .add(NewDelivery {
                    patient_name: patient,
                    address,
                    contact,
                    medications,
                })
                .await?;
            println!("✅ Added delivery #{} for {}", delivery.id, delivery.patient_name);
        }
        DeliveryCommand::List { all } => {
            let deliveries = if all { book.list().await? } else { book.pending().await? };
            if deliveries.is_empty() {
                println!("No deliveries.");
            }
            for delivery in &deliveries {
                print_delivery(delivery);
            }
        }
        DeliveryCommand::Complete { id } => {
            let delivery = book.set_status(id, DeliveryStatus::Completed).await?;
            println!("✅ Delivery #{} marked as completed", delivery.id);
        }
        DeliveryCommand::Reopen { id } => {
            let delivery = book.set_status(id, DeliveryStatus::Pending).await?;
            println!("✅ Delivery #{} reopened", delivery.id);
        }
    }
    Ok(())
}

fn party_kind(supplier: bool) -> PartyKind {
    if supplier {
        PartyKind::Supplier
    } else {
        PartyKind::Customer
    }
}

async fn run_khata(store: JsonFileStore, command: KhataCommand) -> Result<()> {
    let book = KhataBook::new(store);

    match command {
        KhataCommand::AddParty {
            name,
            contact,
            supplier,
        } => {
            let party = book.add_party(party_kind(supplier), &name, &contact).await?;
            println!("✅ Added party #{}: {}", party.id, party.name);
        }
        KhataCommand::Entry {
            party_id,
            amount,
            kind,
            note,
            supplier,
        } => {
            let entry = book
                .record_entry(party_kind(supplier), party_id, kind, amount, note, Utc::now())
                .await?;
            println!("✅ Recorded entry #{} of {:.2}", entry.id, entry.amount);
        }
        KhataCommand::Balance { party_id, supplier } => {
            let kind = party_kind(supplier);
            match party_id {
                Some(id) => {
                    let balance = book.balance(kind, id).await?;
                    println!("{:.2}", balance);
                }
                None => {
                    for (party, balance) in book.balances(kind).await? {
                        let label = if balance > 0.0 { "outstanding" } else { "settled" };
                        println!("#{} {} - {:.2} ({})", party.id, party.name, balance, label);
                    }
                }
            }
        }
        KhataCommand::Report {
            period,
            out,
            supplier,
        } => {
            let kind = party_kind(supplier);
            let now = Utc::now();
            let entries = book.report(kind, period, now).await?;
            let totals = report_totals(&entries);

            match out {
                Some(path) => {
                    let file = std::fs::File::create(&path)?;
                    book.export_report_csv(kind, period, now, file).await?;
                    println!("📁 Report with {} entries written to {}", entries.len(), path);
                }
                None => {
                    book.export_report_csv(kind, period, now, std::io::stdout()).await?;
                }
            }
            tracing::info!(
                "Report totals: credit {:.2}, debit {:.2}",
                totals.credit,
                totals.debit
            );
        }
    }
    Ok(())
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| OpsError::ValidationError {
        field: field.to_string(),
        reason: format!("expected YYYY-MM-DD, got {:?}", raw),
    })
}

async fn run_client(store: JsonFileStore, command: ClientCommand) -> Result<()> {
    let directory = ClientDirectory::new(store);

    match command {
        ClientCommand::Add {
            hospital,
            contact_person,
            phone,
            address,
            status,
            notes,
        } => {
            let client = directory
                .add(NewClient {
                    hospital_name: hospital,
                    contact_person,
                    phone,
                    address,
                    status,
                    notes,
                })
                .await?;
            println!("✅ Added client #{}: {}", client.id, client.hospital_name);
        }
        ClientCommand::List => {
            let clients = directory.list().await?;
            if clients.is_empty() {
                println!("No clients.");
            }
            for client in &clients {
                let open_tasks = client.tasks.iter().filter(|t| !t.is_completed).count();
                println!(
                    "#{} {} ({:?}) - {} open task(s)",
                    client.id, client.hospital_name, client.status, open_tasks
                );
            }
        }
        ClientCommand::SetStatus { id, status } => {
            let client = directory.set_status(id, status).await?;
            println!("✅ Client #{} is now {:?}", client.id, client.status);
        }
        ClientCommand::Task {
            client_id,
            description,
            due,
            category,
        } => {
            let due_date = parse_date("due", &due)?;
            let task = directory
                .add_task(client_id, &description, due_date, category)
                .await?;
            println!("✅ Added task #{} due {}", task.id, task.due_date);
        }
        ClientCommand::CompleteTask { client_id, task_id } => {
            directory.complete_task(client_id, task_id).await?;
            println!("✅ Task #{} completed", task_id);
        }
        ClientCommand::Due { on_or_before } => {
            let cutoff = parse_date("on_or_before", &on_or_before)?;
            let due = directory.due_tasks(cutoff).await?;
            if due.is_empty() {
                println!("No tasks due on or before {}.", cutoff);
            }
            for (hospital, task) in &due {
                println!("{} | {} (due {})", hospital, task.description, task.due_date);
            }
        }
    }
    Ok(())
}
