use crate::app::{load_collection, next_id, save_collection};
use crate::core::optimizer::RouteOptimizer;
use crate::domain::model::{
    Delivery, DeliveryStatus, DeliveryStop, MedicationItem, MedicationStatus, OptimizedStop,
};
use crate::domain::ports::{KeyValueStore, RoutePlanner};
use crate::utils::error::{OpsError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};

pub const DELIVERIES_KEY: &str = "pharmacy_deliveries";

#[derive(Debug, Clone)]
pub struct NewDelivery {
    pub patient_name: String,
    pub address: String,
    pub contact: String,
    pub medications: Vec<MedicationItem>,
}

impl Validate for NewDelivery {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("patient_name", &self.patient_name)?;
        validate_non_empty_string("address", &self.address)?;
        for medication in &self.medications {
            validate_non_empty_string("medication.name", &medication.name)?;
        }
        Ok(())
    }
}

/// The pharmacy delivery roster, persisted under one store key.
pub struct DeliveryBook<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> DeliveryBook<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Delivery>> {
        load_collection(&self.store, DELIVERIES_KEY).await
    }

    pub async fn pending(&self) -> Result<Vec<Delivery>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|d| d.status == DeliveryStatus::Pending)
            .collect())
    }

    /// New deliveries go to the front of the roster, as on the board.
    pub async fn add(&self, new: NewDelivery) -> Result<Delivery> {
        new.validate()?;

        let mut deliveries = self.list().await?;
        let delivery = Delivery {
            id: next_id(deliveries.iter().map(|d| d.id)),
            patient_name: new.patient_name,
            medications: new.medications,
            address: new.address,
            contact: new.contact,
            status: DeliveryStatus::Pending,
        };
        deliveries.insert(0, delivery.clone());
        save_collection(&self.store, DELIVERIES_KEY, &deliveries).await?;

        tracing::info!("Added delivery #{} for {}", delivery.id, delivery.patient_name);
        Ok(delivery)
    }

    pub async fn set_status(&self, id: u64, status: DeliveryStatus) -> Result<Delivery> {
        let mut deliveries = self.list().await?;
        let delivery = deliveries
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| OpsError::NotFoundError {
                message: format!("no delivery with id {}", id),
            })?;
        delivery.status = status;
        let updated = delivery.clone();
        save_collection(&self.store, DELIVERIES_KEY, &deliveries).await?;
        Ok(updated)
    }

    pub async fn update_medication_status(
        &self,
        id: u64,
        medication_name: &str,
        status: MedicationStatus,
    ) -> Result<Delivery> {
        let mut deliveries = self.list().await?;
        let delivery = deliveries
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| OpsError::NotFoundError {
                message: format!("no delivery with id {}", id),
            })?;
        let medication = delivery
            .medications
            .iter_mut()
            .find(|m| m.name == medication_name)
            .ok_or_else(|| OpsError::NotFoundError {
                message: format!("delivery {} has no medication {}", id, medication_name),
            })?;
        medication.status = status;
        let updated = delivery.clone();
        save_collection(&self.store, DELIVERIES_KEY, &deliveries).await?;
        Ok(updated)
    }

    /// Plans a visiting order for every pending delivery. Completed
    /// deliveries never reach the planner.
    pub async fn optimize_pending<P: RoutePlanner>(
        &self,
        optimizer: &RouteOptimizer<P>,
    ) -> Result<Vec<OptimizedStop>> {
        let stops: Vec<DeliveryStop> = self.pending().await?.iter().map(Delivery::to_stop).collect();
        optimizer.optimize_route(&stops).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::MemoryStore;
    use crate::domain::ports::RoutePlanner;
    use crate::utils::error::ErrorCategory;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct RecordingPlanner {
        prompts: Arc<Mutex<Vec<String>>>,
        body: String,
    }

    impl RecordingPlanner {
        fn new(body: &str) -> (Self, Arc<Mutex<Vec<String>>>) {
            let prompts = Arc::new(Mutex::new(Vec::new()));
            let planner = Self {
                prompts: prompts.clone(),
                body: body.to_string(),
            };
            (planner, prompts)
        }
    }

    #[async_trait]
    impl RoutePlanner for RecordingPlanner {
        async fn plan_route(
            &self,
            prompt: &str,
            _response_schema: &serde_json::Value,
        ) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.body.clone())
        }
    }

    fn new_delivery(name: &str, address: &str) -> NewDelivery {
        NewDelivery {
            patient_name: name.to_string(),
            address: address.to_string(),
            contact: "9876543210".to_string(),
            medications: vec![MedicationItem {
                name: "Paracetamol 500mg".to_string(),
                quantity: 2,
                status: MedicationStatus::Pending,
            }],
        }
    }

    #[tokio::test]
    async fn add_assigns_ids_and_puts_newest_first() {
        let book = DeliveryBook::new(MemoryStore::new());

        let first = book.add(new_delivery("Jane Smith", "456 Oak Ave")).await.unwrap();
        let second = book.add(new_delivery("Bob Johnson", "789 Pine St")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.status, DeliveryStatus::Pending);

        let roster = book.list().await.unwrap();
        assert_eq!(roster[0].patient_name, "Bob Johnson");
        assert_eq!(roster[1].patient_name, "Jane Smith");
    }

    #[tokio::test]
    async fn add_rejects_blank_patient_name() {
        let book = DeliveryBook::new(MemoryStore::new());

        let err = book.add(new_delivery("  ", "456 Oak Ave")).await.unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(book.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn complete_and_reopen_round_trip() {
        let book = DeliveryBook::new(MemoryStore::new());
        let delivery = book.add(new_delivery("Jane Smith", "456 Oak Ave")).await.unwrap();

        let completed = book
            .set_status(delivery.id, DeliveryStatus::Completed)
            .await
            .unwrap();
        assert_eq!(completed.status, DeliveryStatus::Completed);
        assert!(book.pending().await.unwrap().is_empty());

        let reopened = book
            .set_status(delivery.id, DeliveryStatus::Pending)
            .await
            .unwrap();
        assert_eq!(reopened.status, DeliveryStatus::Pending);
        assert_eq!(book.pending().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_delivery_is_not_found() {
        let book = DeliveryBook::new(MemoryStore::new());

        let err = book
            .set_status(42, DeliveryStatus::Completed)
            .await
            .unwrap_err();

        assert!(matches!(err, OpsError::NotFoundError { .. }));
    }

    #[tokio::test]
    async fn medication_status_updates_in_place() {
        let book = DeliveryBook::new(MemoryStore::new());
        let delivery = book.add(new_delivery("Jane Smith", "456 Oak Ave")).await.unwrap();

        let updated = book
            .update_medication_status(delivery.id, "Paracetamol 500mg", MedicationStatus::InStock)
            .await
            .unwrap();

        assert_eq!(updated.medications[0].status, MedicationStatus::InStock);

        let err = book
            .update_medication_status(delivery.id, "Ibuprofen", MedicationStatus::InStock)
            .await
            .unwrap_err();
        assert!(matches!(err, OpsError::NotFoundError { .. }));
    }

    #[tokio::test]
    async fn optimize_pending_only_sends_pending_stops() {
        let book = DeliveryBook::new(MemoryStore::new());
        let done = book.add(new_delivery("Done Customer", "1 Old Rd")).await.unwrap();
        book.add(new_delivery("Jane Smith", "456 Oak Ave")).await.unwrap();
        book.set_status(done.id, DeliveryStatus::Completed).await.unwrap();

        let body = r#"[{"customerName":"Jane Smith","address":"456 Oak Ave","optimized_order":1}]"#;
        let (planner, prompts) = RecordingPlanner::new(body);
        let optimizer = RouteOptimizer::new(planner);

        let route = book.optimize_pending(&optimizer).await.unwrap();

        assert_eq!(route.len(), 1);
        assert_eq!(route[0].customer_name, "Jane Smith");

        let prompts = prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Jane Smith"));
        assert!(!prompts[0].contains("Done Customer"));
    }
}
