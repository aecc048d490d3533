//! Sale service: business rules on top of a [`SaleRepository`]

use crate::core::{
    dto::{CreateSaleRequest, SaleResponse},
    error::{SaleError, StoreError},
    repository::SaleRepository,
    sale::Sale,
    timestamp::{Clock, SystemClock, format_timestamp},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Service trait for sale operations
///
/// This is the seam the HTTP handlers depend on. Absence is reported as a
/// normal result (`None` / `false`); every `Err` is a store failure that has
/// already been logged.
#[async_trait]
pub trait SaleService: Send + Sync {
    /// Record a new sale and return its generated identifier
    async fn create_sale(&self, request: CreateSaleRequest) -> Result<String, SaleError>;

    /// Get a sale by ID
    async fn get_sale_by_id(&self, sale_id: &str) -> Result<Option<SaleResponse>, SaleError>;

    /// List the sales of one user
    async fn get_sales_by_user_id(&self, user_id: i64) -> Result<Vec<SaleResponse>, SaleError>;

    /// List the sales created at exactly `date`
    async fn get_sales_by_date(&self, date: DateTime<Utc>)
    -> Result<Vec<SaleResponse>, SaleError>;

    /// List all sales
    async fn get_all_sales(&self) -> Result<Vec<SaleResponse>, SaleError>;

    /// Delete a sale, returning `false` when it did not exist
    async fn delete_sale(&self, sale_id: &str) -> Result<bool, SaleError>;
}

/// Default [`SaleService`] backed by any [`SaleRepository`]
#[derive(Clone)]
pub struct SaleServiceImpl {
    repository: Arc<dyn SaleRepository>,
    clock: Arc<dyn Clock>,
    store_timeout: Option<Duration>,
}

impl SaleServiceImpl {
    pub fn new(repository: Arc<dyn SaleRepository>) -> Self {
        Self {
            repository,
            clock: Arc::new(SystemClock),
            store_timeout: None,
        }
    }

    /// Replace the wall clock used to stamp new sales
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Bound every store call by `timeout`
    ///
    /// An elapsed timeout is reported as [`StoreError::Timeout`]. Calls are
    /// never retried.
    pub fn with_store_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.store_timeout = timeout;
        self
    }

    async fn guarded<T, F>(&self, operation: &str, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>> + Send,
    {
        let Some(limit) = self.store_timeout else {
            return call.await;
        };

        tokio::time::timeout(limit, call)
            .await
            .unwrap_or_else(|_| {
                Err(StoreError::Timeout {
                    operation: operation.to_string(),
                    timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                })
            })
    }
}

#[async_trait]
impl SaleService for SaleServiceImpl {
    async fn create_sale(&self, request: CreateSaleRequest) -> Result<String, SaleError> {
        let sale_id = Uuid::new_v4().to_string();
        let sale = Sale {
            sale_id: sale_id.clone(),
            user_id: request.user_id,
            products: request.products,
            total_amount: request.total_amount,
            created_at: format_timestamp(self.clock.now()),
        };

        match self
            .guarded("create_sale", self.repository.create_sale(sale))
            .await
        {
            Ok(_) => {
                tracing::info!(sale_id = %sale_id, "Sale created");
                Ok(sale_id)
            }
            Err(e) => {
                tracing::error!(sale_id = %sale_id, error = %e, "Error creating sale");
                Err(SaleError::CreationFailed(e))
            }
        }
    }

    async fn get_sale_by_id(&self, sale_id: &str) -> Result<Option<SaleResponse>, SaleError> {
        let sale = self
            .guarded("get_sale_by_id", self.repository.get_sale_by_id(sale_id))
            .await
            .map_err(|e| {
                tracing::error!(sale_id = %sale_id, error = %e, "Failed to get sale");
                SaleError::LookupFailed(e)
            })?;

        Ok(sale.map(SaleResponse::from))
    }

    async fn get_sales_by_user_id(&self, user_id: i64) -> Result<Vec<SaleResponse>, SaleError> {
        let sales = self
            .guarded(
                "get_sales_by_user_id",
                self.repository.get_sales_by_user_id(user_id),
            )
            .await
            .map_err(|e| {
                tracing::error!(user_id, error = %e, "Failed to get sales for user");
                SaleError::RetrievalFailed(e)
            })?;

        Ok(sales.into_iter().map(SaleResponse::from).collect())
    }

    async fn get_sales_by_date(
        &self,
        date: DateTime<Utc>,
    ) -> Result<Vec<SaleResponse>, SaleError> {
        let date = format_timestamp(date);
        let sales = self
            .guarded("get_sales_by_date", self.repository.get_sales_by_date(&date))
            .await
            .map_err(|e| {
                tracing::error!(date = %date, error = %e, "Failed to get sales for date");
                SaleError::RetrievalFailed(e)
            })?;

        Ok(sales.into_iter().map(SaleResponse::from).collect())
    }

    async fn get_all_sales(&self) -> Result<Vec<SaleResponse>, SaleError> {
        let sales = self
            .guarded("get_all_sales", self.repository.get_all_sales())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to get all sales");
                SaleError::RetrievalFailed(e)
            })?;

        Ok(sales.into_iter().map(SaleResponse::from).collect())
    }

    async fn delete_sale(&self, sale_id: &str) -> Result<bool, SaleError> {
        let existed = self
            .guarded("delete_sale", self.repository.delete_sale(sale_id))
            .await
            .map_err(|e| {
                tracing::error!(sale_id = %sale_id, error = %e, "Failed to delete sale");
                SaleError::DeletionFailed(e)
            })?;

        if existed {
            tracing::info!(sale_id = %sale_id, "Sale deleted");
        } else {
            tracing::warn!(sale_id = %sale_id, "Sale not found");
        }

        Ok(existed)
    }
}

#[cfg(all(test, feature = "in-memory"))]
mod tests {
    use super::*;
    use crate::core::sale::Product;
    use crate::storage::InMemorySaleRepository;
    use chrono::TimeZone;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    /// Repository whose every call fails
    struct BrokenRepository;

    #[async_trait]
    impl SaleRepository for BrokenRepository {
        async fn create_sale(&self, _sale: Sale) -> Result<Sale, StoreError> {
            Err(StoreError::backend("PutItem", "connection refused"))
        }

        async fn get_sale_by_id(&self, _sale_id: &str) -> Result<Option<Sale>, StoreError> {
            Err(StoreError::backend("GetItem", "connection refused"))
        }

        async fn get_sales_by_user_id(&self, _user_id: i64) -> Result<Vec<Sale>, StoreError> {
            Err(StoreError::backend("Scan", "connection refused"))
        }

        async fn get_sales_by_date(&self, _date: &str) -> Result<Vec<Sale>, StoreError> {
            Err(StoreError::backend("Scan", "connection refused"))
        }

        async fn get_all_sales(&self) -> Result<Vec<Sale>, StoreError> {
            Err(StoreError::backend("Scan", "connection refused"))
        }

        async fn delete_sale(&self, _sale_id: &str) -> Result<bool, StoreError> {
            Err(StoreError::backend("DeleteItem", "connection refused"))
        }
    }

    /// Repository that never answers
    struct StalledRepository;

    #[async_trait]
    impl SaleRepository for StalledRepository {
        async fn create_sale(&self, _sale: Sale) -> Result<Sale, StoreError> {
            std::future::pending().await
        }

        async fn get_sale_by_id(&self, _sale_id: &str) -> Result<Option<Sale>, StoreError> {
            std::future::pending().await
        }

        async fn get_sales_by_user_id(&self, _user_id: i64) -> Result<Vec<Sale>, StoreError> {
            std::future::pending().await
        }

        async fn get_sales_by_date(&self, _date: &str) -> Result<Vec<Sale>, StoreError> {
            std::future::pending().await
        }

        async fn get_all_sales(&self) -> Result<Vec<Sale>, StoreError> {
            std::future::pending().await
        }

        async fn delete_sale(&self, _sale_id: &str) -> Result<bool, StoreError> {
            std::future::pending().await
        }
    }

    fn request(user_id: i64) -> CreateSaleRequest {
        CreateSaleRequest {
            user_id,
            products: vec![Product::new("1", "Prod", 1000.0, 2)],
            total_amount: 2000.0,
        }
    }

    fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 24, 10, 30, 0).unwrap()
    }

    fn service() -> SaleServiceImpl {
        SaleServiceImpl::new(Arc::new(InMemorySaleRepository::new()))
            .with_clock(Arc::new(FixedClock(fixed_instant())))
    }

    #[tokio::test]
    async fn test_create_sale_assigns_id_and_timestamp() {
        let service = service();

        let sale_id = service.create_sale(request(1)).await.unwrap();
        Uuid::parse_str(&sale_id).unwrap();

        let stored = service.get_sale_by_id(&sale_id).await.unwrap().unwrap();
        assert_eq!(stored.sale_id, sale_id);
        assert_eq!(stored.user_id, 1);
        assert_eq!(stored.total_amount, 2000.0);
        assert_eq!(stored.products, request(1).products);
        assert_eq!(stored.created_at, "2024-08-24T10:30:00.000Z");
    }

    #[tokio::test]
    async fn test_create_sale_ids_are_unique() {
        let service = service();

        let first = service.create_sale(request(1)).await.unwrap();
        let second = service.create_sale(request(1)).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(service.get_all_sales().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_unknown_sale_is_none() {
        let service = service();
        assert!(service.get_sale_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_sales_by_user_id_filters() {
        let service = service();
        let a = service.create_sale(request(1)).await.unwrap();
        let b = service.create_sale(request(1)).await.unwrap();
        service.create_sale(request(2)).await.unwrap();

        let mut ids: Vec<String> = service
            .get_sales_by_user_id(1)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.sale_id)
            .collect();
        ids.sort();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(ids, expected);

        assert!(service.get_sales_by_user_id(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_sales_by_date_normalizes_input() {
        let service = service();
        let sale_id = service.create_sale(request(1)).await.unwrap();

        // Same instant expressed with an offset
        let query = chrono::DateTime::parse_from_rfc3339("2024-08-24T12:30:00+02:00")
            .unwrap()
            .with_timezone(&Utc);
        let sales = service.get_sales_by_date(query).await.unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].sale_id, sale_id);

        let other_day = Utc.with_ymd_and_hms(2024, 8, 25, 10, 30, 0).unwrap();
        assert!(service.get_sales_by_date(other_day).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let service = service();
        let sale_id = service.create_sale(request(1)).await.unwrap();

        assert!(service.delete_sale(&sale_id).await.unwrap());
        assert!(service.get_sale_by_id(&sale_id).await.unwrap().is_none());
        assert!(!service.delete_sale(&sale_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_store_failures_are_wrapped() {
        let service = SaleServiceImpl::new(Arc::new(BrokenRepository));

        assert!(matches!(
            service.create_sale(request(1)).await,
            Err(SaleError::CreationFailed(_))
        ));
        assert!(matches!(
            service.get_sale_by_id("x").await,
            Err(SaleError::LookupFailed(_))
        ));
        assert!(matches!(
            service.get_sales_by_user_id(1).await,
            Err(SaleError::RetrievalFailed(_))
        ));
        assert!(matches!(
            service.get_sales_by_date(fixed_instant()).await,
            Err(SaleError::RetrievalFailed(_))
        ));
        assert!(matches!(
            service.get_all_sales().await,
            Err(SaleError::RetrievalFailed(_))
        ));
        assert!(matches!(
            service.delete_sale("x").await,
            Err(SaleError::DeletionFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_store_timeout_is_a_failure() {
        let service = SaleServiceImpl::new(Arc::new(StalledRepository))
            .with_store_timeout(Some(Duration::from_millis(20)));

        let err = service.get_all_sales().await.unwrap_err();
        assert!(matches!(
            err.store_error(),
            StoreError::Timeout { timeout_ms: 20, .. }
        ));

        let err = service.delete_sale("x").await.unwrap_err();
        assert!(matches!(err, SaleError::DeletionFailed(StoreError::Timeout { .. })));
    }
}
