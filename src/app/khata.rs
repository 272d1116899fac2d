use crate::app::{load_collection, next_id, save_collection};
use crate::domain::model::{LedgerEntry, Party, PartyKind, TransactionType};
use crate::domain::ports::KeyValueStore;
use crate::utils::error::{OpsError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive_amount};
use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use std::io::Write;

pub const CUSTOMERS_KEY: &str = "khata_customers";
pub const CUSTOMER_ENTRIES_KEY: &str = "khata_transactions";
pub const SUPPLIERS_KEY: &str = "khata_suppliers";
pub const SUPPLIER_ENTRIES_KEY: &str = "khata_supplier_transactions";

impl PartyKind {
    fn parties_key(self) -> &'static str {
        match self {
            PartyKind::Customer => CUSTOMERS_KEY,
            PartyKind::Supplier => SUPPLIERS_KEY,
        }
    }

    fn entries_key(self) -> &'static str {
        match self {
            PartyKind::Customer => CUSTOMER_ENTRIES_KEY,
            PartyKind::Supplier => SUPPLIER_ENTRIES_KEY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReportPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl ReportPeriod {
    /// First day covered by the report: today, the start of the current
    /// week (Sunday), or the first of the current month.
    fn start(self, now: DateTime<Utc>) -> NaiveDate {
        let today = now.date_naive();
        match self {
            ReportPeriod::Daily => today,
            ReportPeriod::Weekly => today
                .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_sunday())))
                .unwrap_or(today),
            ReportPeriod::Monthly => today.with_day(1).unwrap_or(today),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReportTotals {
    pub credit: f64,
    pub debit: f64,
}

/// Customer and supplier ledgers, each a party list plus a flat entry
/// list under its own store key.
pub struct KhataBook<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KhataBook<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn parties(&self, kind: PartyKind) -> Result<Vec<Party>> {
        load_collection(&self.store, kind.parties_key()).await
    }

    pub async fn add_party(&self, kind: PartyKind, name: &str, contact: &str) -> Result<Party> {
        validate_non_empty_string("name", name)?;

        let mut parties = self.parties(kind).await?;
        let party = Party {
            id: next_id(parties.iter().map(|p| p.id)),
            name: name.to_string(),
            contact: contact.to_string(),
        };
        parties.push(party.clone());
        save_collection(&self.store, kind.parties_key(), &parties).await?;
        Ok(party)
    }

    pub async fn entries(&self, kind: PartyKind) -> Result<Vec<LedgerEntry>> {
        load_collection(&self.store, kind.entries_key()).await
    }

    pub async fn record_entry(
        &self,
        kind: PartyKind,
        party_id: u64,
        tx_type: TransactionType,
        amount: f64,
        notes: Option<String>,
        date: DateTime<Utc>,
    ) -> Result<LedgerEntry> {
        validate_positive_amount("amount", amount)?;
        self.require_party(kind, party_id).await?;

        let mut entries = self.entries(kind).await?;
        let entry = LedgerEntry {
            id: next_id(entries.iter().map(|e| e.id)),
            party_id,
            kind: tx_type,
            amount,
            notes,
            date,
        };
        entries.push(entry.clone());
        save_collection(&self.store, kind.entries_key(), &entries).await?;
        Ok(entry)
    }

    /// Positive balance: the party owes the shop (customers) or is owed
    /// by it (suppliers). Credits add, debits subtract.
    pub async fn balance(&self, kind: PartyKind, party_id: u64) -> Result<f64> {
        self.require_party(kind, party_id).await?;
        let balance = self
            .entries(kind)
            .await?
            .iter()
            .filter(|e| e.party_id == party_id)
            .map(|e| match e.kind {
                TransactionType::Credit => e.amount,
                TransactionType::Debit => -e.amount,
            })
            .sum();
        Ok(balance)
    }

    pub async fn balances(&self, kind: PartyKind) -> Result<Vec<(Party, f64)>> {
        let parties = self.parties(kind).await?;
        let entries = self.entries(kind).await?;

        Ok(parties
            .into_iter()
            .map(|party| {
                let balance = entries
                    .iter()
                    .filter(|e| e.party_id == party.id)
                    .map(|e| match e.kind {
                        TransactionType::Credit => e.amount,
                        TransactionType::Debit => -e.amount,
                    })
                    .sum();
                (party, balance)
            })
            .collect())
    }

    /// Entries dated on or after the period start, oldest first.
    pub async fn report(
        &self,
        kind: PartyKind,
        period: ReportPeriod,
        now: DateTime<Utc>,
    ) -> Result<Vec<LedgerEntry>> {
        let start = period.start(now);
        let mut entries: Vec<LedgerEntry> = self
            .entries(kind)
            .await?
            .into_iter()
            .filter(|e| e.date.date_naive() >= start)
            .collect();
        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }

    pub async fn export_report_csv<W: Write>(
        &self,
        kind: PartyKind,
        period: ReportPeriod,
        now: DateTime<Utc>,
        writer: W,
    ) -> Result<()> {
        let parties = self.parties(kind).await?;
        let entries = self.report(kind, period, now).await?;

        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["date", "party", "type", "amount", "notes"])?;
        for entry in &entries {
            let party_name = parties
                .iter()
                .find(|p| p.id == entry.party_id)
                .map(|p| p.name.as_str())
                .unwrap_or("Unknown");
            let tx_type = match entry.kind {
                TransactionType::Credit => "Credit",
                TransactionType::Debit => "Debit",
            };
            csv_writer.write_record([
                entry.date.format("%Y-%m-%d %H:%M").to_string().as_str(),
                party_name,
                tx_type,
                format!("{:.2}", entry.amount).as_str(),
                entry.notes.as_deref().unwrap_or(""),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    async fn require_party(&self, kind: PartyKind, party_id: u64) -> Result<()> {
        let parties = self.parties(kind).await?;
        if parties.iter().any(|p| p.id == party_id) {
            Ok(())
        } else {
            Err(OpsError::NotFoundError {
                message: format!("no party with id {}", party_id),
            })
        }
    }
}

pub fn report_totals(entries: &[LedgerEntry]) -> ReportTotals {
    entries.iter().fold(ReportTotals::default(), |mut totals, e| {
        match e.kind {
            TransactionType::Credit => totals.credit += e.amount,
            TransactionType::Debit => totals.debit += e.amount,
        }
        totals
    })
}
