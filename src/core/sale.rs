//! Sale entity and its embedded product lines
//!
//! [`Sale`] is the persisted shape. Field names are serialized in camelCase
//! (`saleID`, `userID`, `totalAmount`, `createdAt`) so that the same struct
//! maps onto the JSON wire format and the store record without a separate
//! schema type.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

/// Opaque product identifier
///
/// Always stored and emitted as a string. Integer input (`"productID": 1`)
/// is accepted on the way in and converted to its decimal form, so older
/// clients that send numeric ids keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawProductId {
            Text(String),
            Integer(i64),
        }

        Ok(match RawProductId::deserialize(deserializer)? {
            RawProductId::Text(id) => ProductId(id),
            RawProductId::Integer(id) => ProductId::from(id),
        })
    }
}

fn validate_product_id(id: &ProductId) -> Result<(), ValidationError> {
    if id.as_str().trim().is_empty() {
        return Err(ValidationError::new("empty_product_id"));
    }
    Ok(())
}

/// A product line embedded in a sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    #[serde(rename = "productID")]
    #[validate(custom(function = "validate_product_id"))]
    pub product_id: ProductId,

    #[validate(length(min = 1))]
    pub name: String,

    #[validate(range(min = 0.0))]
    pub price: f64,

    #[validate(range(min = 1))]
    pub quantity: u32,
}

impl Product {
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        price: f64,
        quantity: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
            quantity,
        }
    }
}

/// A persisted sale transaction
///
/// `sale_id` and `created_at` are assigned by the service when the sale is
/// created and never change afterwards. There is no update path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    #[serde(rename = "saleID")]
    pub sale_id: String,

    #[serde(rename = "userID")]
    pub user_id: i64,

    pub products: Vec<Product>,

    #[serde(rename = "totalAmount")]
    pub total_amount: f64,

    /// ISO-8601 creation instant, see [`crate::core::timestamp`]
    #[serde(rename = "createdAt")]
    pub created_at: String,
}
