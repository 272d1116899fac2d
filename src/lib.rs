pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::gemini::{GeminiClient, GeminiConfig};
pub use adapters::store::JsonFileStore;
pub use app::clients::ClientDirectory;
pub use app::deliveries::DeliveryBook;
pub use app::khata::KhataBook;
pub use config::AppConfig;
pub use core::optimizer::RouteOptimizer;
pub use utils::error::{ErrorCategory, OpsError, Result};
