use crate::app::{load_collection, next_id, save_collection};
use crate::domain::model::{ClientStatus, ClientTask, HospitalClient, TaskCategory};
use crate::domain::ports::KeyValueStore;
use crate::utils::error::{OpsError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use chrono::NaiveDate;

pub const CLIENTS_KEY: &str = "ayushman_clients";

#[derive(Debug, Clone)]
pub struct NewClient {
    pub hospital_name: String,
    pub contact_person: String,
    pub phone: String,
    pub address: String,
    pub status: ClientStatus,
    pub notes: Option<String>,
}

impl Validate for NewClient {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("hospital_name", &self.hospital_name)?;
        validate_non_empty_string("contact_person", &self.contact_person)?;
        Ok(())
    }
}

/// Hospital-client directory with per-client follow-up tasks.
pub struct ClientDirectory<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ClientDirectory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<HospitalClient>> {
        load_collection(&self.store, CLIENTS_KEY).await
    }

    pub async fn add(&self, new: NewClient) -> Result<HospitalClient> {
        new.validate()?;

        let mut clients = self.list().await?;
        let client = HospitalClient {
            id: next_id(clients.iter().map(|c| c.id)),
            hospital_name: new.hospital_name,
            contact_person: new.contact_person,
            phone: new.phone,
            address: new.address,
            status: new.status,
            tasks: Vec::new(),
            notes: new.notes,
        };
        clients.push(client.clone());
        save_collection(&self.store, CLIENTS_KEY, &clients).await?;
        Ok(client)
    }

    pub async fn set_status(&self, id: u64, status: ClientStatus) -> Result<HospitalClient> {
        self.update_client(id, |client| {
            client.status = status;
            Ok(())
        })
        .await
    }

    pub async fn add_task(
        &self,
        client_id: u64,
        description: &str,
        due_date: NaiveDate,
        category: TaskCategory,
    ) -> Result<ClientTask> {
        validate_non_empty_string("description", description)?;

        let description = description.to_string();
        let client = self
            .update_client(client_id, move |client| {
                let task = ClientTask {
                    id: next_id(client.tasks.iter().map(|t| t.id)),
                    description,
                    due_date,
                    is_completed: false,
                    category,
                };
                client.tasks.push(task);
                Ok(())
            })
            .await?;

        client
            .tasks
            .last()
            .cloned()
            .ok_or_else(|| OpsError::NotFoundError {
                message: format!("task was not recorded for client {}", client_id),
            })
    }

    pub async fn complete_task(&self, client_id: u64, task_id: u64) -> Result<ClientTask> {
        let client = self
            .update_client(client_id, move |client| {
                let task = client
                    .tasks
                    .iter_mut()
                    .find(|t| t.id == task_id)
                    .ok_or_else(|| OpsError::NotFoundError {
                        message: format!("client {} has no task {}", client_id, task_id),
                    })?;
                task.is_completed = true;
                Ok(())
            })
            .await?;

        client
            .tasks
            .into_iter()
            .find(|t| t.id == task_id)
            .ok_or_else(|| OpsError::NotFoundError {
                message: format!("client {} has no task {}", client_id, task_id),
            })
    }

    /// Open tasks across every client due on or before the given date,
    /// soonest first.
    pub async fn due_tasks(&self, on_or_before: NaiveDate) -> Result<Vec<(String, ClientTask)>> {
        let mut due: Vec<(String, ClientTask)> = self
            .list()
            .await?
            .into_iter()
            .flat_map(|client| {
                let hospital = client.hospital_name;
                client
                    .tasks
                    .into_iter()
                    .filter(|t| !t.is_completed && t.due_date <= on_or_before)
                    .map(move |t| (hospital.clone(), t))
                    .collect::<Vec<_>>()
            })
            .collect();
        due.sort_by_key(|(_, task)| task.due_date);
        Ok(due)
    }

    async fn update_client<F>(&self, id: u64, mutate: F) -> Result<HospitalClient>
    where
        F: FnOnce(&mut HospitalClient) -> Result<()>,
    {
        let mut clients = self.list().await?;
        let client = clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| OpsError::NotFoundError {
                message: format!("no client with id {}", id),
            })?;
        mutate(client)?;
        let updated = client.clone();
        save_collection(&self.store, CLIENTS_KEY, &clients).await?;
        Ok(updated)
    }
}
