use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A destination to be sequenced into a delivery route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryStop {
    pub patient_name: String,
    pub address: String,
}

/// One stop of a planned route. `order` is the 1-based visiting rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizedStop {
    #[serde(rename = "customerName")]
    pub customer_name: String,
    pub address: String,
    #[serde(rename = "optimized_order")]
    pub order: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MedicationStatus {
    Pending,
    #[serde(rename = "Order Placed")]
    OrderPlaced,
    #[serde(rename = "Arriving Today")]
    ArrivingToday,
    #[serde(rename = "In Stock")]
    InStock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationItem {
    pub name: String,
    pub quantity: u32,
    pub status: MedicationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: u64,
    pub patient_name: String,
    pub medications: Vec<MedicationItem>,
    pub address: String,
    pub contact: String,
    pub status: DeliveryStatus,
}

impl Delivery {
    pub fn to_stop(&self) -> DeliveryStop {
        DeliveryStop {
            patient_name: self.patient_name.clone(),
            address: self.address.clone(),
        }
    }
}

/// Credit: money or goods given out (udhaar). Debit: money received (jama).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum TransactionType {
    Credit,
    Debit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyKind {
    Customer,
    Supplier,
}

/// A customer or supplier tracked in the khata book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: u64,
    pub name: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: u64,
    pub party_id: u64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ClientStatus {
    Active,
    Prospect,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum TaskCategory {
    #[serde(rename = "PCD Infiltration")]
    PcdInfiltration,
    #[serde(rename = "AyushServe")]
    AyushServe,
    #[serde(rename = "Vertex Supplies")]
    VertexSupplies,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientTask {
    pub id: u64,
    pub description: String,
    pub due_date: NaiveDate,
    pub is_completed: bool,
    pub category: TaskCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalClient {
    pub id: u64,
    pub hospital_name: String,
    pub contact_person: String,
    pub phone: String,
    pub address: String,
    pub status: ClientStatus,
    pub tasks: Vec<ClientTask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimized_stop_round_trips_the_wire_names() {
        let json = r#"{"customerName":"Bob Johnson","address":"789 Pine St","optimized_order":1}"#;
        let stop: OptimizedStop = serde_json::from_str(json).unwrap();
        assert_eq!(stop.customer_name, "Bob Johnson");
        assert_eq!(stop.order, 1);

        let back = serde_json::to_value(&stop).unwrap();
        assert_eq!(back["customerName"], "Bob Johnson");
        assert_eq!(back["optimized_order"], 1);
    }

    #[test]
    fn medication_status_uses_the_display_labels() {
        let json = serde_json::to_string(&MedicationStatus::ArrivingToday).unwrap();
        assert_eq!(json, r#""Arriving Today""#);

        let parsed: MedicationStatus = serde_json::from_str(r#""Order Placed""#).unwrap();
        assert_eq!(parsed, MedicationStatus::OrderPlaced);
    }

    #[test]
    fn ledger_entry_serializes_kind_as_type() {
        let entry = LedgerEntry {
            id: 1,
            party_id: 7,
            kind: TransactionType::Credit,
            amount: 250.0,
            notes: None,
            date: Utc::now(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "Credit");
        assert_eq!(value["partyId"], 7);
        assert!(value.get("notes").is_none());
    }
}
