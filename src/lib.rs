//! # Sales Microservice
//!
//! REST service that records, retrieves and deletes sale transactions kept in
//! a key-value table.
//!
//! ## Layers
//!
//! - **Repository** ([`core::SaleRepository`]): persistence, one item per sale.
//!   Backends live in [`storage`]: in-memory (default) and DynamoDB
//!   (`--features dynamodb`).
//! - **Service** ([`core::SaleService`]): assigns ids and timestamps, maps
//!   entities to responses, wraps store failures.
//! - **Controller** ([`server`]): axum handlers answering with the
//!   `{code, status, msg, data}` envelope.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sales::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_repository(Arc::new(InMemorySaleRepository::new()), None)
//!     .build()?;
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Clock, CreateSaleRequest, Product, ProductId, Sale, SaleError, SaleRepository,
        SaleResponse, SaleService, SaleServiceImpl, StoreError, SystemClock,
    };

    // === Storage ===
    #[cfg(feature = "dynamodb")]
    pub use crate::storage::DynamoDBSaleRepository;
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemorySaleRepository;

    // === Config ===
    pub use crate::config::{ServiceConfig, StoreBackend, StoreConfig};

    // === Server ===
    pub use crate::server::{BaseResponse, SalesState, ServerBuilder};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use std::sync::Arc;
}
