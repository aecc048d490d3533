//! Storage implementations for different backends

#[cfg(feature = "dynamodb")]
pub mod dynamodb;
#[cfg(feature = "in-memory")]
pub mod in_memory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDBSaleRepository;
#[cfg(feature = "in-memory")]
pub use in_memory::InMemorySaleRepository;

use crate::config::{StoreBackend, StoreConfig};
use crate::core::{ConfigError, SaleRepository};
use std::sync::Arc;

/// Build the repository selected by `store.backend`
///
/// Fails when the selected backend was not compiled in.
pub fn connect(store: &StoreConfig) -> Result<Arc<dyn SaleRepository>, ConfigError> {
    match store.backend {
        #[cfg(feature = "in-memory")]
        StoreBackend::InMemory => {
            tracing::info!("Using in-memory sale repository");
            Ok(Arc::new(InMemorySaleRepository::new()))
        }
        #[cfg(feature = "dynamodb")]
        StoreBackend::DynamoDB => Ok(Arc::new(DynamoDBSaleRepository::from_config(store)?)),
        #[allow(unreachable_patterns)]
        other => Err(ConfigError::invalid(
            "store.backend",
            format!("backend '{}' is not enabled in this build", other),
        )),
    }
}
