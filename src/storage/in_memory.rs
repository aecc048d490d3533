//! In-memory implementation of SaleRepository for testing and development

use crate::core::{Sale, SaleRepository, StoreError};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory sale repository
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Scans return sales in insertion order.
#[derive(Clone, Default)]
pub struct InMemorySaleRepository {
    sales: Arc<RwLock<IndexMap<String, Sale>>>,
}

impl InMemorySaleRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
        operation: &str,
    ) -> Result<RwLockReadGuard<'_, IndexMap<String, Sale>>, StoreError> {
        self.sales.read().map_err(|e| {
            tracing::error!(operation, "Failed to acquire read lock: {}", e);
            StoreError::backend(operation, format!("Failed to acquire read lock: {}", e))
        })
    }

    fn write(
        &self,
        operation: &str,
    ) -> Result<RwLockWriteGuard<'_, IndexMap<String, Sale>>, StoreError> {
        self.sales.write().map_err(|e| {
            tracing::error!(operation, "Failed to acquire write lock: {}", e);
            StoreError::backend(operation, format!("Failed to acquire write lock: {}", e))
        })
    }

    fn scan<P>(&self, operation: &str, predicate: P) -> Result<Vec<Sale>, StoreError>
    where
        P: Fn(&Sale) -> bool,
    {
        let sales = self.read(operation)?;
        Ok(sales.values().filter(|s| predicate(*s)).cloned().collect())
    }
}

#[async_trait]
impl SaleRepository for InMemorySaleRepository {
    async fn create_sale(&self, sale: Sale) -> Result<Sale, StoreError> {
        let mut sales = self.write("create_sale").inspect_err(|e| {
            tracing::error!(sale_id = %sale.sale_id, error = %e, "Error creating sale");
        })?;
        sales.insert(sale.sale_id.clone(), sale.clone());
        tracing::info!(sale_id = %sale.sale_id, "Sale created successfully");
        Ok(sale)
    }

    async fn get_sale_by_id(&self, sale_id: &str) -> Result<Option<Sale>, StoreError> {
        let sales = self.read("get_sale_by_id").inspect_err(|e| {
            tracing::error!(sale_id = %sale_id, error = %e, "Error getting sale");
        })?;
        let sale = sales.get(sale_id).cloned();
        if sale.is_none() {
            tracing::debug!(sale_id = %sale_id, "Sale not found");
        }
        Ok(sale)
    }

    async fn get_sales_by_user_id(&self, user_id: i64) -> Result<Vec<Sale>, StoreError> {
        self.scan("get_sales_by_user_id", |sale| sale.user_id == user_id)
    }

    async fn get_sales_by_date(&self, date: &str) -> Result<Vec<Sale>, StoreError> {
        self.scan("get_sales_by_date", |sale| sale.created_at == date)
    }

    async fn get_all_sales(&self) -> Result<Vec<Sale>, StoreError> {
        self.scan("get_all_sales", |_| true)
    }

    async fn delete_sale(&self, sale_id: &str) -> Result<bool, StoreError> {
        let mut sales = self.write("delete_sale").inspect_err(|e| {
            tracing::error!(sale_id = %sale_id, error = %e, "Error deleting sale");
        })?;

        let existed = sales.shift_remove(sale_id).is_some();
        if existed {
            tracing::info!(sale_id = %sale_id, "Sale deleted successfully");
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Product;

    fn sale(id: &str, user_id: i64, created_at: &str) -> Sale {
        Sale {
            sale_id: id.to_string(),
            user_id,
            products: vec![Product::new("1", "Prod", 1000.0, 2)],
            total_amount: 2000.0,
            created_at: created_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_sale() {
        let repo = InMemorySaleRepository::new();
        let created = repo
            .create_sale(sale("a", 1, "2024-08-24T00:00:00.000Z"))
            .await
            .unwrap();
        assert_eq!(created.sale_id, "a");

        let fetched = repo.get_sale_by_id("a").await.unwrap();
        assert_eq!(fetched, Some(created));
        assert!(repo.get_sale_by_id("b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_scans_filter_by_exact_value() {
        let repo = InMemorySaleRepository::new();
        repo.create_sale(sale("a", 1, "2024-08-24T00:00:00.000Z"))
            .await
            .unwrap();
        repo.create_sale(sale("b", 2, "2024-08-24T00:00:00.000Z"))
            .await
            .unwrap();
        repo.create_sale(sale("c", 1, "2024-08-25T00:00:00.000Z"))
            .await
            .unwrap();

        let by_user: Vec<_> = repo
            .get_sales_by_user_id(1)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.sale_id)
            .collect();
        assert_eq!(by_user, vec!["a", "c"]);

        let by_date: Vec<_> = repo
            .get_sales_by_date("2024-08-24T00:00:00.000Z")
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.sale_id)
            .collect();
        assert_eq!(by_date, vec!["a", "b"]);

        // Prefix of a stored timestamp is not a match
        assert!(repo.get_sales_by_date("2024-08-24").await.unwrap().is_empty());

        assert_eq!(repo.get_all_sales().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let repo = InMemorySaleRepository::new();
        repo.create_sale(sale("a", 1, "2024-08-24T00:00:00.000Z"))
            .await
            .unwrap();

        assert!(repo.delete_sale("a").await.unwrap());
        assert!(!repo.delete_sale("a").await.unwrap());
        assert!(repo.get_sale_by_id("a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_poisoned_lock_is_a_store_error() {
        let repo = InMemorySaleRepository::new();
        let shared = repo.sales.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        let err = repo.get_sale_by_id("a").await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Backend { ref operation, .. } if operation == "get_sale_by_id"
        ));
        assert!(matches!(
            repo.delete_sale("a").await,
            Err(StoreError::Backend { .. })
        ));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = InMemorySaleRepository::new();
        let clone = repo.clone();
        repo.create_sale(sale("a", 1, "2024-08-24T00:00:00.000Z"))
            .await
            .unwrap();
        assert_eq!(clone.get_all_sales().await.unwrap().len(), 1);
    }
}
