//! DynamoDB implementation of SaleRepository
//!
//! # Table layout
//!
//! One item per sale, partition key `saleID` (string). Attributes mirror the
//! serialized [`Sale`]: `userID` (N), `products` (L of M), `totalAmount` (N)
//! and `createdAt` (S). Items are converted with `serde_dynamo`, so the record
//! shape always follows the entity definition.
//!
//! Lookups by user and by date are full-table scans with a filter expression.
//! Scans follow `LastEvaluatedKey` until the table is exhausted.
//!
//! # Feature flag
//!
//! Enable with `--features dynamodb`.

use crate::config::StoreConfig;
use crate::core::{ConfigError, Sale, SaleRepository, StoreError};
use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDBClient;
use aws_sdk_dynamodb::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::operation::scan::builders::ScanFluentBuilder;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use std::collections::HashMap;

const KEY_ATTRIBUTE: &str = "saleID";

type Item = HashMap<String, AttributeValue>;

/// DynamoDB implementation of SaleRepository
#[derive(Clone)]
pub struct DynamoDBSaleRepository {
    client: DynamoDBClient,
    table_name: String,
}

impl DynamoDBSaleRepository {
    pub fn new(client: DynamoDBClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build a client from the store section of the service config
    ///
    /// Credentials come from `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and
    /// the optional `AWS_SESSION_TOKEN`. Missing keys are a configuration
    /// error, since every request would fail to sign.
    pub fn from_config(store: &StoreConfig) -> Result<Self, ConfigError> {
        let credentials = credentials_from(|key| std::env::var(key).ok()).ok_or_else(|| {
            ConfigError::invalid(
                "store.credentials",
                "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set for the dynamodb backend",
            )
        })?;

        Ok(Self::with_credentials(store, credentials))
    }

    /// Build a client from the store config and explicit credentials
    pub fn with_credentials(store: &StoreConfig, credentials: Credentials) -> Self {
        let mut builder = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(store.region.clone()))
            .credentials_provider(credentials);

        if let Some(endpoint) = &store.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        tracing::info!(
            table = %store.table_name,
            region = %store.region,
            endpoint = ?store.endpoint,
            "DynamoDB sale repository configured"
        );

        Self::new(
            DynamoDBClient::from_conf(builder.build()),
            store.table_name.clone(),
        )
    }

    fn key(sale_id: &str) -> Item {
        HashMap::from([(
            KEY_ATTRIBUTE.to_string(),
            AttributeValue::S(sale_id.to_string()),
        )])
    }

    fn sale_to_item(sale: &Sale) -> Result<Item, StoreError> {
        serde_dynamo::to_item(sale).map_err(StoreError::serialization)
    }

    fn item_to_sale(item: Item) -> Result<Sale, StoreError> {
        serde_dynamo::from_item(item).map_err(StoreError::serialization)
    }

    /// Run a scan to completion, decoding every returned item
    async fn scan_all(&self, scan: ScanFluentBuilder) -> Result<Vec<Sale>, StoreError> {
        let mut pages = scan.into_paginator().items().send();
        let mut sales = Vec::new();

        while let Some(item) = pages.next().await {
            let item = item.map_err(|e| StoreError::backend("Scan", DisplayErrorContext(&e)))?;
            sales.push(Self::item_to_sale(item)?);
        }

        Ok(sales)
    }
}

/// Static credentials from `AWS_*` variables; blank values count as unset
fn credentials_from<F>(lookup: F) -> Option<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let access_key = var("AWS_ACCESS_KEY_ID")?;
    let secret_key = var("AWS_SECRET_ACCESS_KEY")?;
    let session_token = var("AWS_SESSION_TOKEN");

    Some(Credentials::new(
        access_key,
        secret_key,
        session_token,
        None,
        "sales-service-env",
    ))
}

#[async_trait]
impl SaleRepository for DynamoDBSaleRepository {
    async fn create_sale(&self, sale: Sale) -> Result<Sale, StoreError> {
        let item = Self::sale_to_item(&sale).inspect_err(|e| {
            tracing::error!(sale_id = %sale.sale_id, error = %e, "Error creating sale");
        })?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| {
                let err = StoreError::backend("PutItem", DisplayErrorContext(&e));
                tracing::error!(sale_id = %sale.sale_id, error = %err, "Error creating sale");
                err
            })?;

        tracing::info!(sale_id = %sale.sale_id, "Sale created successfully");
        Ok(sale)
    }

    async fn get_sale_by_id(&self, sale_id: &str) -> Result<Option<Sale>, StoreError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key(sale_id)))
            .send()
            .await
            .map_err(|e| {
                let err = StoreError::backend("GetItem", DisplayErrorContext(&e));
                tracing::error!(sale_id = %sale_id, error = %err, "Error getting sale");
                err
            })?;

        match result.item {
            Some(item) => Ok(Some(Self::item_to_sale(item).inspect_err(|e| {
                tracing::error!(sale_id = %sale_id, error = %e, "Error decoding sale");
            })?)),
            None => {
                tracing::debug!(sale_id = %sale_id, "Sale not found");
                Ok(None)
            }
        }
    }

    async fn get_sales_by_user_id(&self, user_id: i64) -> Result<Vec<Sale>, StoreError> {
        let scan = self
            .client
            .scan()
            .table_name(&self.table_name)
            .filter_expression("#userID = :userID")
            .expression_attribute_names("#userID", "userID")
            .expression_attribute_values(":userID", AttributeValue::N(user_id.to_string()));

        self.scan_all(scan).await.inspect_err(|e| {
            tracing::error!(user_id, error = %e, "Error getting sales for user");
        })
    }

    async fn get_sales_by_date(&self, date: &str) -> Result<Vec<Sale>, StoreError> {
        let scan = self
            .client
            .scan()
            .table_name(&self.table_name)
            .filter_expression("#createdAt = :createdAt")
            .expression_attribute_names("#createdAt", "createdAt")
            .expression_attribute_values(":createdAt", AttributeValue::S(date.to_string()));

        self.scan_all(scan).await.inspect_err(|e| {
            tracing::error!(date = %date, error = %e, "Error getting sales for date");
        })
    }

    async fn get_all_sales(&self) -> Result<Vec<Sale>, StoreError> {
        let scan = self.client.scan().table_name(&self.table_name);

        self.scan_all(scan).await.inspect_err(|e| {
            tracing::error!(error = %e, "Error getting all sales");
        })
    }

    async fn delete_sale(&self, sale_id: &str) -> Result<bool, StoreError> {
        // ALL_OLD returns the removed item, which tells us whether it existed
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key(sale_id)))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| {
                let err = StoreError::backend("DeleteItem", DisplayErrorContext(&e));
                tracing::error!(sale_id = %sale_id, error = %err, "Error deleting sale");
                err
            })?;

        let existed = result.attributes.is_some_and(|old| !old.is_empty());
        if existed {
            tracing::info!(sale_id = %sale_id, "Sale deleted successfully");
        }
        Ok(existed)
    }
}
