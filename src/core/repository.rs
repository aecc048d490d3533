//! Repository trait for sale persistence

use crate::core::{error::StoreError, sale::Sale};
use async_trait::async_trait;

/// CRUD bridge between sales and a key-value document store
///
/// Records are keyed by `saleID`. Implementations hold no business logic:
/// they translate entities to store records and back, log store failures
/// with the identifier involved, and hand the failure back unchanged.
///
/// Lookups that find nothing are not errors. `get_sale_by_id` returns
/// `None` and `delete_sale` returns `false`.
#[async_trait]
pub trait SaleRepository: Send + Sync {
    /// Write the full record, returning the same entity
    async fn create_sale(&self, sale: Sale) -> Result<Sale, StoreError>;

    /// Fetch a sale by its key
    async fn get_sale_by_id(&self, sale_id: &str) -> Result<Option<Sale>, StoreError>;

    /// Every sale whose `userID` equals `user_id`, in store order
    async fn get_sales_by_user_id(&self, user_id: i64) -> Result<Vec<Sale>, StoreError>;

    /// Every sale whose stored `createdAt` string equals `date` verbatim
    ///
    /// This is an exact match, not a range query.
    async fn get_sales_by_date(&self, date: &str) -> Result<Vec<Sale>, StoreError>;

    /// Every stored sale, fully materialized
    async fn get_all_sales(&self) -> Result<Vec<Sale>, StoreError>;

    /// Remove a sale, reporting whether it existed
    async fn delete_sale(&self, sale_id: &str) -> Result<bool, StoreError>;
}
