//! HTTP layer: envelope, extractors, handlers, routes and the server builder
//!
//! - `GET /` and `GET /health` for liveness
//! - `/api/v1/sales` CRUD-style routes, all answering with a [`BaseResponse`]

pub mod builder;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;

pub use builder::ServerBuilder;
pub use extract::{ExtractorError, SalePath, ValidatedJson};
pub use handlers::SalesState;
pub use response::BaseResponse;
pub use router::{SALES_BASE_PATH, build_sales_routes, build_service_routes};
