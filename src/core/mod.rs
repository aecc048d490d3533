//! Core module containing the sale model, errors and the repository/service traits

pub mod dto;
pub mod error;
pub mod repository;
pub mod sale;
pub mod service;
pub mod timestamp;

pub use dto::{CreateSaleRequest, SaleResponse};
pub use error::{ConfigError, SaleError, StoreError};
pub use repository::SaleRepository;
pub use sale::{Product, ProductId, Sale};
pub use service::{SaleService, SaleServiceImpl};
pub use timestamp::{Clock, SystemClock, format_timestamp, parse_date};
