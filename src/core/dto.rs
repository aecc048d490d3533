//! Request and response shapes exposed over HTTP
//!
//! Structurally these mirror [`Sale`] but are kept as separate types so the
//! wire format can diverge from the stored record.

use crate::core::sale::{Product, Sale};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/v1/sales`
///
/// `saleID` and `createdAt` are assigned server-side and are not accepted here.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate)]
pub struct CreateSaleRequest {
    #[serde(rename = "userID")]
    pub user_id: i64,

    #[validate(length(min = 1), nested)]
    pub products: Vec<Product>,

    #[serde(rename = "totalAmount")]
    #[validate(range(min = 0.0))]
    pub total_amount: f64,
}

/// A sale as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleResponse {
    #[serde(rename = "saleID")]
    pub sale_id: String,

    #[serde(rename = "userID")]
    pub user_id: i64,

    pub products: Vec<Product>,

    #[serde(rename = "totalAmount")]
    pub total_amount: f64,

    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl From<Sale> for SaleResponse {
    fn from(sale: Sale) -> Self {
        Self {
            sale_id: sale.sale_id,
            user_id: sale.user_id,
            products: sale.products,
            total_amount: sale.total_amount,
            created_at: sale.created_at,
        }
    }
}
