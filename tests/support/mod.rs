//! Shared fixtures for HTTP-level tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use sales::core::{Clock, Sale, SaleRepository, SaleServiceImpl, StoreError};
use sales::server::ServerBuilder;
use sales::storage::InMemorySaleRepository;
use serde_json::{Value, json};
use std::sync::Arc;

/// Clock pinned to a single instant
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 24, 0, 0, 0).unwrap()
}

/// Repository whose every call fails
pub struct FailingRepository;

#[async_trait]
impl SaleRepository for FailingRepository {
    async fn create_sale(&self, _sale: Sale) -> Result<Sale, StoreError> {
        Err(StoreError::backend("PutItem", "table unavailable"))
    }

    async fn get_sale_by_id(&self, _sale_id: &str) -> Result<Option<Sale>, StoreError> {
        Err(StoreError::backend("GetItem", "table unavailable"))
    }

    async fn get_sales_by_user_id(&self, _user_id: i64) -> Result<Vec<Sale>, StoreError> {
        Err(StoreError::backend("Scan", "table unavailable"))
    }

    async fn get_sales_by_date(&self, _date: &str) -> Result<Vec<Sale>, StoreError> {
        Err(StoreError::backend("Scan", "table unavailable"))
    }

    async fn get_all_sales(&self) -> Result<Vec<Sale>, StoreError> {
        Err(StoreError::backend("Scan", "table unavailable"))
    }

    async fn delete_sale(&self, _sale_id: &str) -> Result<bool, StoreError> {
        Err(StoreError::backend("DeleteItem", "table unavailable"))
    }
}

/// Server over `repository` with the clock pinned to [`fixed_instant`]
pub fn server_with(repository: Arc<dyn SaleRepository>) -> TestServer {
    let service = SaleServiceImpl::new(repository).with_clock(Arc::new(FixedClock(fixed_instant())));
    let app = ServerBuilder::new()
        .with_service(Arc::new(service))
        .build()
        .unwrap();
    TestServer::new(app)
}

/// Server over a fresh in-memory repository
pub fn in_memory_server() -> TestServer {
    server_with(Arc::new(InMemorySaleRepository::new()))
}

/// Server whose store always fails
pub fn failing_server() -> TestServer {
    server_with(Arc::new(FailingRepository))
}

pub fn sale_body(user_id: i64) -> Value {
    json!({
        "userID": user_id,
        "products": [
            { "productID": "1", "name": "Prod", "price": 1000, "quantity": 2 }
        ],
        "totalAmount": 2000
    })
}

/// POST a sale and return its id
pub async fn create_sale(server: &TestServer, body: &Value) -> String {
    let response = server.post("/api/v1/sales").json(body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = response.json();
    body["data"].as_str().unwrap().to_string()
}
