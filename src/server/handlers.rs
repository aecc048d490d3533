//! HTTP handlers for sale operations
//!
//! Handlers translate between HTTP and [`SaleService`]: parse input, call the
//! service, and wrap the outcome in a [`BaseResponse`]. Not-found is decided
//! here, from the service's `Option`/`bool` results.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::sync::Arc;

use super::extract::{SalePath, ValidatedJson, parse_date_param, parse_user_id};
use super::response::BaseResponse;
use crate::core::{CreateSaleRequest, SaleError, SaleResponse, SaleService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct SalesState {
    pub service: Arc<dyn SaleService>,
}

impl SalesState {
    pub fn new(service: Arc<dyn SaleService>) -> Self {
        Self { service }
    }
}

pub async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to Sales Microservice" }))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "message": "Sales Microservice is healthy" }))
}

/// POST /api/v1/sales
pub async fn create_sale(
    State(state): State<SalesState>,
    ValidatedJson(request): ValidatedJson<CreateSaleRequest>,
) -> Response {
    match state.service.create_sale(request).await {
        Ok(sale_id) => BaseResponse::created("Sale created successfully", sale_id).into_response(),
        Err(_) => BaseResponse::<String>::internal_error("Failed to create sale").into_response(),
    }
}

/// GET /api/v1/sales/{saleID}
pub async fn get_sale_by_id(
    State(state): State<SalesState>,
    SalePath(sale_id): SalePath<String>,
) -> Response {
    match state.service.get_sale_by_id(&sale_id).await {
        Ok(Some(sale)) => BaseResponse::ok("Sale retrieved successfully", sale).into_response(),
        Ok(None) => {
            tracing::warn!(sale_id = %sale_id, "Sale not found");
            BaseResponse::<SaleResponse>::not_found("Sale not found").into_response()
        }
        Err(_) => {
            BaseResponse::<SaleResponse>::internal_error("Failed to retrieve sale").into_response()
        }
    }
}

/// GET /api/v1/sales/user/{userID}
pub async fn get_sales_by_user_id(
    State(state): State<SalesState>,
    SalePath(user_id): SalePath<String>,
) -> Response {
    let user_id = match parse_user_id(&user_id) {
        Ok(id) => id,
        Err(rejection) => return rejection.into_response(),
    };

    sales_list(state.service.get_sales_by_user_id(user_id).await)
}

/// GET /api/v1/sales/date/{date}
pub async fn get_sales_by_date(
    State(state): State<SalesState>,
    SalePath(date): SalePath<String>,
) -> Response {
    let date = match parse_date_param(&date) {
        Ok(date) => date,
        Err(rejection) => return rejection.into_response(),
    };

    sales_list(state.service.get_sales_by_date(date).await)
}

/// GET /api/v1/sales
pub async fn get_all_sales(State(state): State<SalesState>) -> Response {
    sales_list(state.service.get_all_sales().await)
}

/// DELETE /api/v1/sales/{saleID}
pub async fn delete_sale(
    State(state): State<SalesState>,
    SalePath(sale_id): SalePath<String>,
) -> Response {
    match state.service.delete_sale(&sale_id).await {
        Ok(true) => {
            BaseResponse::<()>::new(StatusCode::OK, "Sale deleted successfully", None)
                .into_response()
        }
        Ok(false) => BaseResponse::<()>::not_found("Sale not found").into_response(),
        Err(_) => BaseResponse::<()>::internal_error("Failed to delete sale").into_response(),
    }
}

fn sales_list(result: Result<Vec<SaleResponse>, SaleError>) -> Response {
    match result {
        Ok(sales) => BaseResponse::ok("Sales retrieved successfully", sales).into_response(),
        Err(_) => {
            BaseResponse::<Vec<SaleResponse>>::internal_error("Failed to retrieve sales")
                .into_response()
        }
    }
}
