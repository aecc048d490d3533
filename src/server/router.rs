//! Route table for the sales API

use axum::{Router, routing::get};

use super::handlers::{
    SalesState, create_sale, delete_sale, get_all_sales, get_sale_by_id, get_sales_by_date,
    get_sales_by_user_id, health_check, welcome,
};

/// Prefix of every sale endpoint
pub const SALES_BASE_PATH: &str = "/api/v1/sales";

/// Build the sale routes
///
/// Static `user/` and `date/` segments take priority over `{saleID}`. The
/// collection is also served with a trailing slash.
pub fn build_sales_routes(state: SalesState) -> Router {
    Router::new()
        .route(SALES_BASE_PATH, get(get_all_sales).post(create_sale))
        .route(
            &format!("{}/", SALES_BASE_PATH),
            get(get_all_sales).post(create_sale),
        )
        .route(
            &format!("{}/{{saleID}}", SALES_BASE_PATH),
            get(get_sale_by_id).delete(delete_sale),
        )
        .route(
            &format!("{}/user/{{userID}}", SALES_BASE_PATH),
            get(get_sales_by_user_id),
        )
        .route(
            &format!("{}/date/{{date}}", SALES_BASE_PATH),
            get(get_sales_by_date),
        )
        .with_state(state)
}

/// Welcome and health routes
pub fn build_service_routes() -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
}
